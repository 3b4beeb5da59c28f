//! Focus Session - A segmented focus-session timer served over HTTP
//! 
//! This is the main entry point for the focus-session application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use focus_session::{
    api::create_router,
    config::Config,
    services::JsonlSessionStore,
    state::AppState,
    tasks::{session_reporter_task, session_timer_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("focus_session={},tower_http=info", config.log_level()))
        .init();

    let timer_config = config.timer_config()?;

    info!("Starting focus-session server v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, session={}x{}min, history={}",
        config.host,
        config.port,
        config.segments,
        config.segment_minutes,
        config.history_file.display()
    );

    let history = Arc::new(JsonlSessionStore::new(&config.history_file));

    // Create application state
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        timer_config,
        history,
    ));

    // Start the tick driver and the reporter
    tokio::spawn(session_timer_task(Arc::clone(&state)));
    tokio::spawn(session_reporter_task(Arc::clone(&state)));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /session/start  - Start a focus session");
    info!("  POST /session/pause  - Pause the running session");
    info!("  POST /session/resume - Resume the paused session");
    info!("  POST /session/cancel - End the session early");
    info!("  GET  /session        - Current session and progress");
    info!("  GET  /history        - Finished sessions and totals");
    info!("  GET  /notifications  - Recent milestone messages");
    info!("  GET  /health         - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        signal = shutdown_signal() => {
            info!("Shutdown signal received: {:?}", signal?);
        }
    }

    info!("Server shutdown complete");
    Ok(())
}

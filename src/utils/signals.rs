//! Signal handling for graceful shutdown

use anyhow::{anyhow, Context};
use futures::stream::StreamExt;
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook_tokio::Signals;

/// Wait for SIGTERM or SIGINT and return the signal number
pub async fn shutdown_signal() -> anyhow::Result<i32> {
    let mut signals =
        Signals::new([SIGTERM, SIGINT]).context("Failed to register signal handlers")?;
    let handle = signals.handle();

    let signal = signals.next().await;
    handle.close();

    signal.ok_or_else(|| anyhow!("Signal stream ended before a shutdown signal"))
}

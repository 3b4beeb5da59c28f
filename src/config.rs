//! Configuration and CLI argument handling

use std::path::PathBuf;

use clap::Parser;

use crate::engine::{EngineError, TimerConfig};

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "focus-session")]
#[command(about = "A segmented focus-session timer served over HTTP")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Default segment length in minutes
    #[arg(short = 's', long, default_value = "45")]
    pub segment_minutes: u64,

    /// Default number of segments per session
    #[arg(short = 'n', long, default_value = "4")]
    pub segments: u32,

    /// File finished sessions are appended to, one JSON object per line
    #[arg(long, default_value = "focus-history.jsonl")]
    pub history_file: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Default session shape for start requests without overrides
    pub fn timer_config(&self) -> Result<TimerConfig, EngineError> {
        TimerConfig::from_minutes(self.segment_minutes, self.segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_a_three_hour_session() {
        let config = Config::try_parse_from(["focus-session"]).unwrap();
        assert_eq!(config.address(), "0.0.0.0:20554");
        assert_eq!(config.log_level(), "info");
        assert_eq!(config.timer_config().unwrap().total_session_seconds(), 3 * 3600);
    }

    #[test]
    fn zero_segments_fail_fast() {
        let config = Config::try_parse_from(["focus-session", "-n", "0", "-v"]).unwrap();
        assert_eq!(config.log_level(), "debug");
        assert!(config.timer_config().is_err());
    }
}

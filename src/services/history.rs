//! Finished-session persistence

use std::{
    fmt::Debug,
    fs::{self, OpenOptions},
    io::{BufRead, BufReader, Write},
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::engine::{TimerState, TimerStatus};

/// Record of a session that ended, by completion or cancellation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub total_elapsed_seconds: u64,
    pub milestones_reached: u32,
    pub completed: bool,
    pub timestamp: DateTime<Utc>,
}

impl SessionRecord {
    /// Build a record from the final snapshot of a session
    pub fn from_final_state(state: &TimerState, timestamp: DateTime<Utc>) -> Self {
        Self {
            total_elapsed_seconds: state.elapsed_total_seconds,
            milestones_reached: state.milestones_reached,
            completed: state.status == TimerStatus::Completed,
            timestamp,
        }
    }
}

/// Aggregate progress across all recorded sessions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HistorySummary {
    pub total_sessions: usize,
    pub completed_sessions: usize,
    pub cancelled_sessions: usize,
    pub total_focus_seconds: u64,
    pub total_milestones: u64,
}

impl HistorySummary {
    pub fn from_records(records: &[SessionRecord]) -> Self {
        records.iter().fold(Self::default(), |mut summary, record| {
            summary.total_sessions += 1;
            if record.completed {
                summary.completed_sessions += 1;
            } else {
                summary.cancelled_sessions += 1;
            }
            summary.total_focus_seconds += record.total_elapsed_seconds;
            summary.total_milestones += u64::from(record.milestones_reached);
            summary
        })
    }
}

/// Storage for finished-session records
pub trait SessionStore: Send + Sync + Debug {
    fn append(&self, record: &SessionRecord) -> anyhow::Result<()>;
    fn load(&self) -> anyhow::Result<Vec<SessionRecord>>;
}

/// Store that writes one JSON object per line
#[derive(Debug)]
pub struct JsonlSessionStore {
    path: PathBuf,
    // Serializes appends from concurrent reporters
    write_lock: Mutex<()>,
}

impl JsonlSessionStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for JsonlSessionStore {
    fn append(&self, record: &SessionRecord) -> anyhow::Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| anyhow::anyhow!("Failed to lock history file: {}", e))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let line = serde_json::to_string(record)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;
        writeln!(file, "{}", line)?;

        debug!("Appended session record to {}", self.path.display());
        Ok(())
    }

    fn load(&self) -> anyhow::Result<Vec<SessionRecord>> {
        let file = match fs::File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to open {}", self.path.display()))
            }
        };

        let mut records = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str(&line) {
                Ok(record) => records.push(record),
                Err(e) => warn!(
                    "Skipping malformed history line {} in {}: {}",
                    index + 1,
                    self.path.display(),
                    e
                ),
            }
        }
        Ok(records)
    }
}

/// In-memory store, used when no history file is wanted
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    records: Mutex<Vec<SessionRecord>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn append(&self, record: &SessionRecord) -> anyhow::Result<()> {
        self.records
            .lock()
            .map_err(|e| anyhow::anyhow!("Failed to lock session records: {}", e))?
            .push(record.clone());
        Ok(())
    }

    fn load(&self) -> anyhow::Result<Vec<SessionRecord>> {
        self.records
            .lock()
            .map(|records| records.clone())
            .map_err(|e| anyhow::anyhow!("Failed to lock session records: {}", e))
    }
}

//! Path resolution for session logs and snapshots

use std::path::PathBuf;

/// Resolves standard paths under the nudge home directory
#[derive(Debug, Clone)]
pub struct Paths {
    pub home_nudge: PathBuf,
}

impl Paths {
    pub fn new() -> std::io::Result<Self> {
        let home = dirs::home_dir().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "home directory not found")
        })?;

        Ok(Self {
            home_nudge: home.join(".nudge"),
        })
    }

    /// Session analytics log
    pub fn sessions_file(&self) -> PathBuf {
        self.home_nudge.join("sessions.jsonl")
    }

    /// Last session-state snapshot (diagnostic output, never re-loaded)
    pub fn snapshot_file(&self) -> PathBuf {
        self.home_nudge.join("last_session.json")
    }
}

//! Persisted analytics record types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One prompt lifecycle event as persisted to the session log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptRecord {
    pub session_id: String,
    /// shown | dismissed | converted
    pub kind: String,
    pub tier_id: Option<String>,
    pub elapsed_ms: u64,
    pub engagement_score: f64,
    pub timestamp: DateTime<Utc>,
    /// Departure-triggered presentation (absent in records from before the
    /// field existed)
    #[serde(default)]
    pub departure: bool,
}

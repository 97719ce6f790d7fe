//! Run summary export
//!
//! The last completed run is written to LocalStorage as JSON and can be
//! downloaded as a one-row CSV.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::content::DecisionPoint;
use crate::sim::RunState;

/// CSV header, fixed field order
pub const CSV_HEADER: &str = "timestamp,d1,d2,commits";

/// Snapshot persisted under the storage key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSnapshot {
    /// Unix time in seconds
    pub timestamp: f64,
    pub d1: String,
    pub d2: String,
    pub commits: u32,
}

/// One exported row
#[derive(Debug, Clone, PartialEq)]
pub struct RunRow {
    /// When the run reached the final screen, not when it was exported
    pub timestamp: DateTime<Local>,
    pub d1: String,
    pub d2: String,
    pub commits: u32,
}

impl RunRow {
    /// Build a row from a finished run. Missing decisions export as empty.
    pub fn from_run(run: &RunState, finished_at: DateTime<Local>) -> Self {
        let id = |point| run.option(point).map(|o| o.id.to_string()).unwrap_or_default();
        Self {
            timestamp: finished_at,
            d1: id(DecisionPoint::First),
            d2: id(DecisionPoint::Second),
            commits: run.score,
        }
    }

    pub fn snapshot(&self) -> RunSnapshot {
        RunSnapshot {
            timestamp: self.timestamp.timestamp_millis() as f64 / 1000.0,
            d1: self.d1.clone(),
            d2: self.d2.clone(),
            commits: self.commits,
        }
    }

    fn csv_line(&self) -> String {
        format!(
            "{},{},{},{}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.d1,
            self.d2,
            self.commits
        )
    }
}

/// Header plus one line per row, each newline-terminated
pub fn csv_document(rows: &[RunRow]) -> String {
    let mut out = String::with_capacity(CSV_HEADER.len() + 1 + rows.len() * 64);
    out.push_str(CSV_HEADER);
    out.push('\n');
    for row in rows {
        out.push_str(&row.csv_line());
        out.push('\n');
    }
    out
}

/// Serialize a snapshot for storage
pub fn snapshot_json(snapshot: &RunSnapshot) -> anyhow::Result<String> {
    Ok(serde_json::to_string(snapshot)?)
}

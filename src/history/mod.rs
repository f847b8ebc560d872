//! Analysis history persistence
//!
//! This module stores every completed analysis run, including:
//! - The full result as JSON, so past runs can be re-exported
//! - Denormalized summary columns for cheap listings
//! - The actor and source input that started the run
//! - The hash of the configuration the run used

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteHistory;
pub use traits::{HistoryError, HistoryResult, HistoryStore};

use crate::report::AnalysisSummary;
use std::path::Path;

/// Initializes or opens a history database
///
/// # Arguments
///
/// * `path` - Path to the SQLite database file
///
/// # Returns
///
/// * `Ok(SqliteHistory)` - Successfully initialized history store
/// * `Err(HistoryError)` - Failed to initialize the store
pub fn open_history(path: &Path) -> HistoryResult<SqliteHistory> {
    SqliteHistory::new(path)
}

/// Metadata for one stored analysis run
#[derive(Debug, Clone)]
pub struct HistoryRecord {
    pub id: i64,
    pub actor: String,
    pub source_url: String,
    pub status: AnalysisStatus,
    pub summary: AnalysisSummary,
    pub config_hash: String,
    pub created_at: String,
}

/// Terminal status of an analysis run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisStatus {
    Completed,
    Failed,
}

impl AnalysisStatus {
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "completed" => Some(Self::Completed),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }
}

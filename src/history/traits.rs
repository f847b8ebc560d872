//! History traits and error types
//!
//! This module defines the trait interface for history backends and
//! associated error types.

use crate::history::{AnalysisStatus, HistoryRecord};
use crate::report::AnalysisResult;
use thiserror::Error;

/// Errors that can occur during history operations
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Analysis record not found: {0}")]
    RecordNotFound(i64),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for history operations
pub type HistoryResult<T> = Result<T, HistoryError>;

/// Trait for analysis-history backend implementations
///
/// Each completed run is stored whole: the full result as JSON alongside
/// denormalized summary columns so listings never deserialize page data.
pub trait HistoryStore {
    /// Persists a finished analysis
    ///
    /// # Arguments
    ///
    /// * `actor` - Who requested the analysis
    /// * `source_url` - The input the run was started from
    /// * `status` - Terminal status of the run
    /// * `result` - The full analysis result
    /// * `config_hash` - Hash of the configuration the run used
    ///
    /// # Returns
    ///
    /// The stored record, including its assigned ID
    fn save(
        &mut self,
        actor: &str,
        source_url: &str,
        status: AnalysisStatus,
        result: &AnalysisResult,
        config_hash: &str,
    ) -> HistoryResult<HistoryRecord>;

    /// Gets a record's metadata by ID
    fn get(&self, id: i64) -> HistoryResult<HistoryRecord>;

    /// Gets the full stored result for a record
    fn get_result(&self, id: i64) -> HistoryResult<AnalysisResult>;

    /// Lists the most recent records, newest first
    fn list_recent(&self, limit: usize) -> HistoryResult<Vec<HistoryRecord>>;
}

//! SQLite history implementation
//!
//! This module provides a SQLite-based implementation of the HistoryStore
//! trait.

use crate::history::schema::initialize_schema;
use crate::history::traits::{HistoryError, HistoryResult, HistoryStore};
use crate::history::{AnalysisStatus, HistoryRecord};
use crate::report::{AnalysisResult, AnalysisSummary};
use chrono::Utc;
use rusqlite::{params, Connection, Row};
use std::path::Path;

/// SQLite history backend
pub struct SqliteHistory {
    conn: Connection,
}

impl SqliteHistory {
    /// Creates a new SqliteHistory instance
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteHistory)` - Successfully opened/created database
    /// * `Err(HistoryError)` - Failed to open database
    pub fn new(path: &Path) -> HistoryResult<Self> {
        let conn = Connection::open(path)?;

        // Configure SQLite for better performance
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> HistoryResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    fn record_from_row(row: &Row<'_>) -> rusqlite::Result<HistoryRecord> {
        Ok(HistoryRecord {
            id: row.get(0)?,
            actor: row.get(1)?,
            source_url: row.get(2)?,
            status: AnalysisStatus::from_db_string(&row.get::<_, String>(3)?)
                .unwrap_or(AnalysisStatus::Failed),
            summary: AnalysisSummary {
                total_pages: row.get::<_, i64>(4)? as usize,
                average_score: row.get(5)?,
                critical_issues: row.get::<_, i64>(6)? as usize,
                warnings: row.get::<_, i64>(7)? as usize,
            },
            config_hash: row.get(8)?,
            created_at: row.get(9)?,
        })
    }
}

const RECORD_COLUMNS: &str = "id, actor, source_url, status, total_pages, average_score,
     critical_issues, warnings, config_hash, created_at";

impl HistoryStore for SqliteHistory {
    fn save(
        &mut self,
        actor: &str,
        source_url: &str,
        status: AnalysisStatus,
        result: &AnalysisResult,
        config_hash: &str,
    ) -> HistoryResult<HistoryRecord> {
        let results_json = serde_json::to_string(result)?;
        let now = Utc::now().to_rfc3339();

        self.conn.execute(
            "INSERT INTO analyses
             (actor, source_url, status, total_pages, average_score, critical_issues,
              warnings, results_json, config_hash, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                actor,
                source_url,
                status.to_db_string(),
                result.summary.total_pages as i64,
                result.summary.average_score,
                result.summary.critical_issues as i64,
                result.summary.warnings as i64,
                results_json,
                config_hash,
                now,
            ],
        )?;

        Ok(HistoryRecord {
            id: self.conn.last_insert_rowid(),
            actor: actor.to_string(),
            source_url: source_url.to_string(),
            status,
            summary: result.summary.clone(),
            config_hash: config_hash.to_string(),
            created_at: now,
        })
    }

    fn get(&self, id: i64) -> HistoryResult<HistoryRecord> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM analyses WHERE id = ?1",
            RECORD_COLUMNS
        ))?;

        stmt.query_row(params![id], Self::record_from_row)
            .map_err(|_| HistoryError::RecordNotFound(id))
    }

    fn get_result(&self, id: i64) -> HistoryResult<AnalysisResult> {
        let json: String = self
            .conn
            .query_row(
                "SELECT results_json FROM analyses WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .map_err(|_| HistoryError::RecordNotFound(id))?;

        Ok(serde_json::from_str(&json)?)
    }

    fn list_recent(&self, limit: usize) -> HistoryResult<Vec<HistoryRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM analyses ORDER BY id DESC LIMIT ?1",
            RECORD_COLUMNS
        ))?;

        let records = stmt
            .query_map(params![limit as i64], Self::record_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{build_result, FieldAnalysis, PageAnalysis, PerformanceAnalysis, SeoIssue};

    fn sample_result() -> AnalysisResult {
        let field = FieldAnalysis {
            text: String::new(),
            length: 0,
            is_optimal: false,
            issues: vec![],
        };
        build_result(vec![PageAnalysis {
            url: "https://example.com/".to_string(),
            title: field.clone(),
            description: field,
            performance: PerformanceAnalysis {
                load_time_ms: 120.0,
                issues: vec![],
            },
            images: vec![],
            score: 80,
            issues: vec![SeoIssue::error("Missing title tag", "x")],
        }])
    }

    #[test]
    fn test_create_in_memory() {
        assert!(SqliteHistory::new_in_memory().is_ok());
    }

    #[test]
    fn test_save_and_get() {
        let mut history = SqliteHistory::new_in_memory().unwrap();
        let result = sample_result();

        let record = history
            .save(
                "local",
                "https://example.com",
                AnalysisStatus::Completed,
                &result,
                "abc123",
            )
            .unwrap();
        assert!(record.id > 0);

        let loaded = history.get(record.id).unwrap();
        assert_eq!(loaded.actor, "local");
        assert_eq!(loaded.source_url, "https://example.com");
        assert_eq!(loaded.status, AnalysisStatus::Completed);
        assert_eq!(loaded.summary.total_pages, 1);
        assert_eq!(loaded.summary.critical_issues, 1);
        assert_eq!(loaded.config_hash, "abc123");
    }

    #[test]
    fn test_get_result_round_trips() {
        let mut history = SqliteHistory::new_in_memory().unwrap();
        let result = sample_result();

        let record = history
            .save(
                "local",
                "https://example.com",
                AnalysisStatus::Completed,
                &result,
                "abc123",
            )
            .unwrap();

        let loaded = history.get_result(record.id).unwrap();
        assert_eq!(loaded, result);
    }

    #[test]
    fn test_get_missing_record() {
        let history = SqliteHistory::new_in_memory().unwrap();
        let err = history.get(999).unwrap_err();
        assert!(matches!(err, HistoryError::RecordNotFound(999)));
    }

    #[test]
    fn test_list_recent_newest_first() {
        let mut history = SqliteHistory::new_in_memory().unwrap();
        let result = sample_result();

        for i in 0..3 {
            history
                .save(
                    "local",
                    &format!("https://example.com/{}", i),
                    AnalysisStatus::Completed,
                    &result,
                    "abc123",
                )
                .unwrap();
        }

        let records = history.list_recent(2).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].source_url, "https://example.com/2");
        assert_eq!(records[1].source_url, "https://example.com/1");
    }
}

//! Database schema definitions
//!
//! This module contains the SQL schema for the analysis-history database.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- One row per completed analysis run
CREATE TABLE IF NOT EXISTS analyses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    actor TEXT NOT NULL,
    source_url TEXT NOT NULL,
    status TEXT NOT NULL,
    total_pages INTEGER NOT NULL,
    average_score REAL NOT NULL,
    critical_issues INTEGER NOT NULL,
    warnings INTEGER NOT NULL,
    results_json TEXT NOT NULL,
    config_hash TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_analyses_actor ON analyses(actor);
CREATE INDEX IF NOT EXISTS idx_analyses_created ON analyses(created_at);
"#;

/// Initializes the database schema
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Returns
///
/// * `Ok(())` - Schema initialized successfully
/// * `Err(rusqlite::Error)` - Failed to initialize schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

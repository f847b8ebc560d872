use serde::Deserialize;

/// Main configuration structure for Sitelens
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub proxy: ProxyConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub analyzer: AnalyzerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            proxy: ProxyConfig::default(),
            fetch: FetchConfig::default(),
            analyzer: AnalyzerConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Proxy endpoint configuration
///
/// All outbound fetches are routed through this relay, never direct.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Base URL of the fetch proxy (the `/api/fetch` endpoint lives under it)
    #[serde(rename = "base-url")]
    pub base_url: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3003".to_string(),
        }
    }
}

/// Fetch gateway configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Global outbound request budget; the dispatch interval is derived
    /// from this (1000ms / requests-per-second)
    #[serde(rename = "requests-per-second")]
    pub requests_per_second: u32,

    /// Number of retries after the first attempt
    pub retries: u32,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            requests_per_second: 100,
            retries: 2,
        }
    }
}

/// Batch analysis configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Number of pages analyzed concurrently per batch
    #[serde(rename = "batch-size")]
    pub batch_size: usize,

    /// Pause between batches (milliseconds)
    #[serde(rename = "batch-pause-ms")]
    pub batch_pause_ms: u64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            batch_size: 10,
            batch_pause_ms: 1000,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the SQLite history database file
    #[serde(rename = "history-path")]
    pub history_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            history_path: "./sitelens.db".to_string(),
        }
    }
}

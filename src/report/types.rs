use serde::{Deserialize, Serialize};

/// How severe an SEO finding is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A single SEO finding; pure value, no identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoIssue {
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl SeoIssue {
    /// Creates an Error-severity issue
    pub fn error(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a Warning-severity issue
    pub fn warning(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            details: Some(details.into()),
        }
    }
}

/// Shared analysis shape for the title and meta-description signals
///
/// Invariant: `is_optimal == issues.is_empty()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldAnalysis {
    pub text: String,
    pub length: usize,
    pub is_optimal: bool,
    pub issues: Vec<SeoIssue>,
}

/// One `<img>` element's alt-text and dimension attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAnalysis {
    pub src: String,
    pub has_alt: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    /// Numeric width attribute; absent or non-numeric becomes None
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// Load-time signal for one page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceAnalysis {
    pub load_time_ms: f64,
    pub issues: Vec<SeoIssue>,
}

/// Full analysis of one page; produced once per distinct URL, never mutated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageAnalysis {
    pub url: String,
    pub title: FieldAnalysis,
    pub description: FieldAnalysis,
    pub performance: PerformanceAnalysis,
    pub images: Vec<ImageAnalysis>,
    /// Aggregate score in [0, 100]
    pub score: u8,
    /// Concatenation of title, description, and performance issues
    pub issues: Vec<SeoIssue>,
}

/// Site-wide statistics, recomputed from the full page list each run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub total_pages: usize,
    pub critical_issues: usize,
    pub warnings: usize,
    pub average_score: f64,
}

/// The terminal artifact of an analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub pages: Vec<PageAnalysis>,
    pub summary: AnalysisSummary,
}

//! Summary statistics over a completed page list
//!
//! The summary is always derived from scratch; it is never updated
//! incrementally, so it cannot drift from the pages it describes.

use crate::report::types::{AnalysisResult, AnalysisSummary, PageAnalysis, Severity};

/// Computes site-wide statistics from the full page list
pub fn summarize(pages: &[PageAnalysis]) -> AnalysisSummary {
    let critical_issues = pages
        .iter()
        .flat_map(|p| &p.issues)
        .filter(|i| i.severity == Severity::Error)
        .count();

    let warnings = pages
        .iter()
        .flat_map(|p| &p.issues)
        .filter(|i| i.severity == Severity::Warning)
        .count();

    let average_score = if pages.is_empty() {
        0.0
    } else {
        pages.iter().map(|p| f64::from(p.score)).sum::<f64>() / pages.len() as f64
    };

    AnalysisSummary {
        total_pages: pages.len(),
        critical_issues,
        warnings,
        average_score,
    }
}

/// Packages pages and their freshly computed summary into the terminal artifact
pub fn build_result(pages: Vec<PageAnalysis>) -> AnalysisResult {
    let summary = summarize(&pages);
    AnalysisResult { pages, summary }
}

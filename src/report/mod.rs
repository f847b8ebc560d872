//! Analysis result model and terminal/JSON output
//!
//! The data shapes here are the contract between the pipeline and the
//! history store; everything serializes with camelCase field names so stored
//! results stay readable as plain JSON.

mod summary;
mod types;

pub use summary::{build_result, summarize};
pub use types::{
    AnalysisResult, AnalysisSummary, FieldAnalysis, ImageAnalysis, PageAnalysis,
    PerformanceAnalysis, SeoIssue, Severity,
};

use std::path::Path;

/// Prints an analysis result to stdout in a formatted manner
///
/// # Arguments
///
/// * `result` - The completed analysis
/// * `worst` - How many lowest-scoring pages to list individually
pub fn print_report(result: &AnalysisResult, worst: usize) {
    println!("=== SEO Analysis ===\n");

    println!("Overview:");
    println!("  Pages analyzed: {}", result.summary.total_pages);
    println!("  Critical issues: {}", result.summary.critical_issues);
    println!("  Warnings: {}", result.summary.warnings);
    println!("  Average score: {:.1}", result.summary.average_score);
    println!();

    if result.pages.is_empty() {
        return;
    }

    let mut ranked: Vec<&PageAnalysis> = result.pages.iter().collect();
    ranked.sort_by(|a, b| a.score.cmp(&b.score).then_with(|| a.url.cmp(&b.url)));

    println!("Lowest-scoring pages:");
    for page in ranked.iter().take(worst) {
        println!("  [{:>3}] {}", page.score, page.url);
        for issue in &page.issues {
            let tag = match issue.severity {
                Severity::Error => "error",
                Severity::Warning => "warn",
            };
            println!("        {}: {}", tag, issue.message);
        }
    }
    println!();

    let clean = result.pages.iter().filter(|p| p.issues.is_empty()).count();
    let percentage = (clean as f64 / result.pages.len() as f64) * 100.0;
    println!(
        "Clean pages: {} / {} ({:.1}%)",
        clean,
        result.pages.len(),
        percentage
    );
}

/// Writes the full analysis result as pretty-printed JSON
pub fn write_json(result: &AnalysisResult, path: &Path) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(result)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    std::fs::write(path, json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_trip() {
        let result = build_result(vec![]);
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("totalPages"));
        assert!(json.contains("averageScore"));

        let back: AnalysisResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn test_write_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.json");
        let result = build_result(vec![]);

        write_json(&result, &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"pages\": []"));
    }
}

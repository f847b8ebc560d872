//! SEO scoring rules
//!
//! Pure functions, no I/O. Each signal (title, description, load time, image
//! alt coverage) produces its own issue list; the aggregate score starts at
//! 100 and loses 20 points per Error and 5 per Warning, clamped to [0, 100].

use crate::report::{FieldAnalysis, ImageAnalysis, PerformanceAnalysis, SeoIssue, Severity};

/// Optimal title length bounds (characters, inclusive)
pub const TITLE_MIN: usize = 30;
pub const TITLE_MAX: usize = 60;

/// Optimal meta-description length bounds (characters, inclusive)
pub const DESCRIPTION_MIN: usize = 120;
pub const DESCRIPTION_MAX: usize = 155;

/// Load-time thresholds (milliseconds)
pub const SLOW_MS: f64 = 3000.0;
pub const VERY_SLOW_MS: f64 = 5000.0;

/// Points deducted per issue severity
const ERROR_PENALTY: i32 = 20;
const WARNING_PENALTY: i32 = 5;

/// Analyzes the `<title>` text; empty means missing
pub fn analyze_title(title: &str) -> FieldAnalysis {
    analyze_field(
        title,
        TITLE_MIN,
        TITLE_MAX,
        "Missing title tag",
        "Every page should have a title tag",
        "Title tag too short",
        "Title tag too long",
        "Title",
    )
}

/// Analyzes the `<meta name="description">` content; empty means missing
pub fn analyze_description(description: &str) -> FieldAnalysis {
    analyze_field(
        description,
        DESCRIPTION_MIN,
        DESCRIPTION_MAX,
        "Missing meta description",
        "Every page should have a meta description",
        "Meta description too short",
        "Meta description too long",
        "Description",
    )
}

/// Shared length-band check for title and description
///
/// Too-short and too-long are mutually exclusive by construction, and a
/// missing field raises only the missing error.
#[allow(clippy::too_many_arguments)]
fn analyze_field(
    text: &str,
    min: usize,
    max: usize,
    missing_message: &str,
    missing_details: &str,
    short_message: &str,
    long_message: &str,
    noun: &str,
) -> FieldAnalysis {
    let length = text.chars().count();
    let mut issues = Vec::new();

    if text.is_empty() {
        issues.push(SeoIssue::error(missing_message, missing_details));
    } else if length < min {
        issues.push(SeoIssue::warning(
            short_message,
            format!(
                "{} should be at least {} characters. Current length: {}",
                noun, min, length
            ),
        ));
    } else if length > max {
        issues.push(SeoIssue::warning(
            long_message,
            format!(
                "{} should be no more than {} characters. Current length: {}",
                noun, max, length
            ),
        ));
    }

    FieldAnalysis {
        text: text.to_string(),
        length,
        is_optimal: issues.is_empty(),
        issues,
    }
}

/// Analyzes page load time against the slow / very-slow thresholds
pub fn analyze_load_time(load_time_ms: f64) -> PerformanceAnalysis {
    let mut issues = Vec::new();

    if load_time_ms > VERY_SLOW_MS {
        issues.push(SeoIssue::error(
            "Very slow load time",
            format!(
                "Page took {}ms to load. Should be under {}ms",
                load_time_ms.round() as i64,
                VERY_SLOW_MS as i64
            ),
        ));
    } else if load_time_ms > SLOW_MS {
        issues.push(SeoIssue::warning(
            "Slow load time",
            format!(
                "Page took {}ms to load. Should be under {}ms",
                load_time_ms.round() as i64,
                SLOW_MS as i64
            ),
        ));
    }

    PerformanceAnalysis {
        load_time_ms,
        issues,
    }
}

/// Produces the aggregate alt-text warning for a page's images
///
/// No images means no finding; with at least one image, any missing alt
/// attributes roll up into a single warning.
pub fn analyze_image_alts(images: &[ImageAnalysis]) -> Vec<SeoIssue> {
    if images.is_empty() {
        return Vec::new();
    }

    let missing = images.iter().filter(|i| !i.has_alt).count();
    if missing == 0 {
        return Vec::new();
    }

    vec![SeoIssue::warning(
        format!("{} images are missing alt text", missing),
        "Images should have descriptive alt attributes for accessibility and SEO",
    )]
}

/// Computes the aggregate score from every sub-analysis issue list
///
/// 100 minus 20 per Error and 5 per Warning, clamped to [0, 100]. A score of
/// 100 therefore means exactly zero issues.
pub fn calculate_score(issue_groups: &[&[SeoIssue]]) -> u8 {
    let mut score: i32 = 100;

    for group in issue_groups {
        for issue in *group {
            score -= match issue.severity {
                Severity::Error => ERROR_PENALTY,
                Severity::Warning => WARNING_PENALTY,
            };
        }
    }

    score.clamp(0, 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_title() {
        let analysis = analyze_title("");
        assert!(!analysis.is_optimal);
        assert_eq!(analysis.length, 0);
        assert_eq!(analysis.issues.len(), 1);
        assert_eq!(analysis.issues[0].severity, Severity::Error);
        assert_eq!(analysis.issues[0].message, "Missing title tag");
    }

    #[test]
    fn test_optimal_title() {
        // Inside the [30, 60] band
        let analysis = analyze_title("Example Title For SEO Testing Purposes Here");
        assert!(analysis.is_optimal);
        assert!(analysis.issues.is_empty());
    }

    #[test]
    fn test_title_too_short() {
        let analysis = analyze_title("Short title");
        assert!(!analysis.is_optimal);
        assert_eq!(analysis.issues.len(), 1);
        assert_eq!(analysis.issues[0].severity, Severity::Warning);
        assert_eq!(analysis.issues[0].message, "Title tag too short");
    }

    #[test]
    fn test_title_too_long() {
        let analysis = analyze_title(&"x".repeat(61));
        assert!(!analysis.is_optimal);
        assert_eq!(analysis.issues.len(), 1);
        assert_eq!(analysis.issues[0].message, "Title tag too long");
    }

    #[test]
    fn test_title_boundaries_are_optimal() {
        assert!(analyze_title(&"x".repeat(30)).is_optimal);
        assert!(analyze_title(&"x".repeat(60)).is_optimal);
        assert!(!analyze_title(&"x".repeat(29)).is_optimal);
        assert!(!analyze_title(&"x".repeat(61)).is_optimal);
    }

    #[test]
    fn test_title_never_both_short_and_long() {
        for length in 0..200 {
            let analysis = analyze_title(&"x".repeat(length));
            assert!(analysis.issues.len() <= 1, "length {}: {:?}", length, analysis.issues);
            assert_eq!(
                analysis.is_optimal,
                (30..=60).contains(&length),
                "length {}",
                length
            );
        }
    }

    #[test]
    fn test_optimality_matches_empty_issue_list() {
        for text in ["", "tiny", &"x".repeat(45), &"x".repeat(200)] {
            let analysis = analyze_title(text);
            assert_eq!(analysis.is_optimal, analysis.issues.is_empty());
        }
    }

    #[test]
    fn test_description_thresholds() {
        assert!(!analyze_description("").is_optimal);
        assert!(!analyze_description(&"x".repeat(119)).is_optimal);
        assert!(analyze_description(&"x".repeat(120)).is_optimal);
        assert!(analyze_description(&"x".repeat(155)).is_optimal);
        assert!(!analyze_description(&"x".repeat(156)).is_optimal);
    }

    #[test]
    fn test_missing_description_is_error() {
        let analysis = analyze_description("");
        assert_eq!(analysis.issues[0].severity, Severity::Error);
        assert_eq!(analysis.issues[0].message, "Missing meta description");
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let analysis = analyze_title(&"é".repeat(45));
        assert_eq!(analysis.length, 45);
        assert!(analysis.is_optimal);
    }

    #[test]
    fn test_fast_load_time() {
        let analysis = analyze_load_time(250.0);
        assert!(analysis.issues.is_empty());
    }

    #[test]
    fn test_slow_load_time() {
        let analysis = analyze_load_time(3500.0);
        assert_eq!(analysis.issues.len(), 1);
        assert_eq!(analysis.issues[0].severity, Severity::Warning);
        assert_eq!(analysis.issues[0].message, "Slow load time");
    }

    #[test]
    fn test_very_slow_load_time() {
        let analysis = analyze_load_time(6000.0);
        assert_eq!(analysis.issues.len(), 1);
        assert_eq!(analysis.issues[0].severity, Severity::Error);
        assert_eq!(analysis.issues[0].message, "Very slow load time");
        assert!(analysis.issues[0]
            .details
            .as_deref()
            .unwrap()
            .contains("6000ms"));
    }

    #[test]
    fn test_load_time_thresholds_exclusive() {
        // Exactly at a threshold is still fine / still only slow
        assert!(analyze_load_time(3000.0).issues.is_empty());
        assert_eq!(
            analyze_load_time(5000.0).issues[0].severity,
            Severity::Warning
        );
    }

    fn image(src: &str, has_alt: bool) -> ImageAnalysis {
        ImageAnalysis {
            src: src.to_string(),
            has_alt,
            alt_text: has_alt.then(|| "alt".to_string()),
            width: None,
            height: None,
        }
    }

    #[test]
    fn test_no_images_no_finding() {
        assert!(analyze_image_alts(&[]).is_empty());
    }

    #[test]
    fn test_all_images_covered() {
        let images = vec![image("a.png", true), image("b.png", true)];
        assert!(analyze_image_alts(&images).is_empty());
    }

    #[test]
    fn test_missing_alt_rolls_up() {
        let images = vec![
            image("a.png", true),
            image("b.png", false),
            image("c.png", false),
        ];
        let issues = analyze_image_alts(&images);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert_eq!(issues[0].message, "2 images are missing alt text");
    }

    #[test]
    fn test_score_no_issues() {
        assert_eq!(calculate_score(&[&[], &[]]), 100);
    }

    #[test]
    fn test_score_penalties() {
        let errors = vec![SeoIssue::error("a", "b")];
        let warnings = vec![SeoIssue::warning("c", "d"), SeoIssue::warning("e", "f")];
        // 100 - 20 - 5 - 5
        assert_eq!(calculate_score(&[&errors, &warnings]), 70);
    }

    #[test]
    fn test_score_clamped_at_zero() {
        let errors: Vec<SeoIssue> = (0..10).map(|i| SeoIssue::error(format!("e{}", i), "x")).collect();
        assert_eq!(calculate_score(&[&errors]), 0);
    }

    #[test]
    fn test_score_monotonically_decreases() {
        let mut issues: Vec<SeoIssue> = Vec::new();
        let mut last = calculate_score(&[&issues]);
        for i in 0..8 {
            issues.push(SeoIssue::warning(format!("w{}", i), "x"));
            let next = calculate_score(&[&issues]);
            assert!(next <= last);
            last = next;
        }
    }

    #[test]
    fn test_score_100_iff_no_issues() {
        let one_warning = vec![SeoIssue::warning("w", "x")];
        assert!(calculate_score(&[&one_warning]) < 100);
        assert_eq!(calculate_score(&[]), 100);
    }
}

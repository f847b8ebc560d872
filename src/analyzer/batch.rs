//! Concurrent batch execution over the page list
//!
//! Pages are analyzed in fixed-size batches: every page in a batch runs
//! concurrently, the runner waits for the whole batch to settle, then pauses
//! before starting the next one. The per-request rate limit lives in the
//! fetch gateway, so the batch pause is purely a pacing courtesy between
//! bursts of work.

use crate::analyzer::page::PageAnalyzer;
use crate::config::AnalyzerConfig;
use crate::report::PageAnalysis;
use std::time::Duration;

/// Progress through a batch run
#[derive(Debug, Clone, PartialEq)]
pub struct BatchProgress {
    pub completed: usize,
    pub total: usize,
    /// `(completed / total) * 100`
    pub percent: f64,
}

/// Callback invoked after each page settles
pub type BatchObserver<'a> = &'a (dyn Fn(&BatchProgress) + Send + Sync);

/// Runs page analyses in paced, fixed-size batches
pub struct BatchRunner {
    analyzer: PageAnalyzer,
    batch_size: usize,
    batch_pause: Duration,
}

impl BatchRunner {
    /// Creates a runner from the analyzer section of the config
    pub fn new(analyzer: PageAnalyzer, config: &AnalyzerConfig) -> Self {
        Self {
            analyzer,
            batch_size: config.batch_size.max(1),
            batch_pause: Duration::from_millis(config.batch_pause_ms),
        }
    }

    /// Analyzes every URL, returning results in input order
    ///
    /// The pause runs between batches only, never after the last one. A page
    /// that fails to fetch still yields a (degraded) result, so the output
    /// length always matches the input length.
    pub async fn run(
        &self,
        urls: &[String],
        observer: Option<BatchObserver<'_>>,
    ) -> Vec<PageAnalysis> {
        let total = urls.len();
        let mut pages = Vec::with_capacity(total);

        for (batch_index, batch) in urls.chunks(self.batch_size).enumerate() {
            if batch_index > 0 {
                tokio::time::sleep(self.batch_pause).await;
            }

            tracing::debug!(
                "Starting batch {} ({} pages, {} of {} done)",
                batch_index + 1,
                batch.len(),
                pages.len(),
                total
            );

            let mut handles = Vec::with_capacity(batch.len());
            for url in batch {
                let analyzer = self.analyzer.clone();
                let url = url.clone();
                handles.push(tokio::spawn(async move { analyzer.analyze(&url).await }));
            }

            for handle in handles {
                match handle.await {
                    Ok(page) => pages.push(page),
                    Err(e) => {
                        // Only reachable if an analysis task panics
                        tracing::error!("Analysis task failed: {}", e);
                        continue;
                    }
                }

                if let Some(observer) = observer {
                    let completed = pages.len();
                    observer(&BatchProgress {
                        completed,
                        total,
                        percent: (completed as f64 / total as f64) * 100.0,
                    });
                }
            }
        }

        pages
    }
}

//! End-to-end analysis pipeline
//!
//! Wires the stages together: sitemap discovery, page URL collection, batch
//! analysis, and history recording. Every network request from every stage
//! funnels through one [`FetchGateway`], so the whole run shares a single
//! rate-limited FIFO queue.

use crate::analyzer::{BatchObserver, BatchRunner, PageAnalyzer};
use crate::config::Config;
use crate::fetch::{build_http_client, FetchGateway};
use crate::history::{AnalysisStatus, HistoryRecord, HistoryStore};
use crate::report::{build_result, AnalysisResult};
use crate::sitemap::{ProgressObserver, SitemapDiscoverer};
use crate::{DiscoveryError, Result};
use url::Url;

/// Owns the shared gateway and runs analyses against it
pub struct Pipeline {
    config: Config,
    config_hash: String,
    gateway: FetchGateway,
}

impl Pipeline {
    /// Builds the HTTP client and fetch gateway from the config
    pub fn new(config: Config, config_hash: String) -> Result<Self> {
        let client = build_http_client()?;
        let proxy_base = Url::parse(&config.proxy.base_url)?;
        let gateway = FetchGateway::new(client, &proxy_base, &config.fetch)?;

        Ok(Self {
            config,
            config_hash,
            gateway,
        })
    }

    /// Runs a full analysis for a domain or sitemap URL
    ///
    /// # Arguments
    ///
    /// * `input` - Domain or sitemap URL to analyze
    /// * `discovery_observer` - Optional progress callback for discovery
    /// * `batch_observer` - Optional progress callback for page analysis
    ///
    /// # Returns
    ///
    /// The completed result; discovery that yields no sitemaps or no page
    /// URLs is an error, since there would be nothing to score.
    pub async fn run(
        &self,
        input: &str,
        discovery_observer: Option<ProgressObserver<'_>>,
        batch_observer: Option<BatchObserver<'_>>,
    ) -> Result<AnalysisResult> {
        let discoverer = SitemapDiscoverer::new(self.gateway.clone());

        let sitemaps = discoverer.discover(input, discovery_observer).await?;
        if sitemaps.is_empty() {
            return Err(DiscoveryError::NoSitemaps {
                input: input.to_string(),
            }
            .into());
        }
        tracing::info!("Found {} sitemap(s) for {}", sitemaps.len(), input);

        let urls = discoverer.collect_page_urls(&sitemaps).await;
        if urls.is_empty() {
            return Err(DiscoveryError::NoUrls {
                input: input.to_string(),
            }
            .into());
        }
        tracing::info!("Collected {} page URL(s)", urls.len());

        let runner = BatchRunner::new(
            PageAnalyzer::new(self.gateway.clone()),
            &self.config.analyzer,
        );
        let pages = runner.run(&urls, batch_observer).await;

        let result = build_result(pages);
        tracing::info!(
            "Analysis complete: {} pages, average score {:.1}",
            result.summary.total_pages,
            result.summary.average_score
        );
        Ok(result)
    }

    /// Records a completed result in the history store
    pub fn record(
        &self,
        history: &mut dyn HistoryStore,
        actor: &str,
        source_url: &str,
        result: &AnalysisResult,
    ) -> Result<HistoryRecord> {
        let record = history.save(
            actor,
            source_url,
            AnalysisStatus::Completed,
            result,
            &self.config_hash,
        )?;
        tracing::info!("Saved analysis #{} for {}", record.id, source_url);
        Ok(record)
    }
}

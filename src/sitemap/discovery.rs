//! Sitemap discovery
//!
//! Given a domain or a direct sitemap URL, runs the staged discovery state
//! machine: direct check, robots.txt, well-known paths, then one level of
//! sitemap-index expansion. Every probe goes through the shared
//! [`FetchGateway`]; failed probes mean "nothing here", not errors.

use crate::fetch::FetchGateway;
use crate::sitemap::parser::{self, ParsedSitemap};
use crate::url::{normalize_input, origin_of};
use crate::DiscoveryError;
use std::collections::HashSet;

/// Well-known sitemap paths probed when robots.txt yields nothing
const COMMON_SITEMAP_PATHS: &[&str] = &[
    "/sitemap.xml",
    "/sitemap_index.xml",
    "/sitemaps/sitemap.xml",
    "/wp-sitemap.xml",
    "/sitemap.php",
    "/sitemap.txt",
];

/// Index children are expanded this many levels deep; children of children
/// are never scanned for further indexes
const MAX_INDEX_DEPTH: usize = 1;

/// Whether a sitemap lists pages directly or other sitemaps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SitemapKind {
    Single,
    Index,
}

/// How a sitemap was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SitemapSource {
    /// Listed in robots.txt
    Robots,
    /// The input URL itself was a sitemap
    Direct,
    /// Found at a well-known path or through index expansion
    Discovered,
}

/// A validated sitemap found during discovery
///
/// Immutable once returned; `children` is populated only for `Index` kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapLocation {
    pub url: String,
    pub kind: SitemapKind,
    pub source: SitemapSource,
    /// Child sitemap URLs, in document order (Index only)
    pub children: Vec<String>,
}

/// One phase of the discovery state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryStage {
    Direct,
    Robots,
    CommonPaths,
    IndexExpansion,
}

/// Informational progress snapshot, reported after every fetch attempt
#[derive(Debug, Clone)]
pub struct DiscoveryProgress {
    pub stage: DiscoveryStage,
    pub current_attempt: String,
    /// Attempts made so far within the current stage
    pub attempts_made: usize,
    pub sitemaps_found: usize,
}

/// Observer callback for discovery progress; purely informational
pub type ProgressObserver<'a> = &'a (dyn Fn(&DiscoveryProgress) + Send + Sync);

/// Locates and validates sitemaps for a site
pub struct SitemapDiscoverer {
    gateway: FetchGateway,
}

impl SitemapDiscoverer {
    /// Creates a discoverer over the shared fetch gateway
    pub fn new(gateway: FetchGateway) -> Self {
        Self { gateway }
    }

    /// Discovers sitemaps for a domain or direct sitemap URL
    ///
    /// Stages run in order and short-circuit as documented:
    ///
    /// 1. The input is normalized (scheme fallback https then http); an
    ///    unusable input is the only fatal error here.
    /// 2. If the input itself mentions "sitemap" it is validated directly;
    ///    a page-listing hit returns immediately, and an index hit skips the
    ///    robots and well-known-path stages but still expands its children.
    /// 3. robots.txt `Sitemap:` lines are validated; fetch failure counts
    ///    as zero sitemaps, not an error.
    /// 4. Only when robots.txt yielded nothing, well-known paths are probed
    ///    in order, stopping at the first page-listing (Single) hit.
    /// 5. Children of any discovered index are validated and appended, one
    ///    level deep.
    ///
    /// # Returns
    ///
    /// Discovered locations in the order they were validated; possibly empty.
    pub async fn discover(
        &self,
        input: &str,
        observer: Option<ProgressObserver<'_>>,
    ) -> Result<Vec<SitemapLocation>, DiscoveryError> {
        let normalized = normalize_input(input).map_err(|e| DiscoveryError::InvalidInput {
            input: input.to_string(),
            reason: e.to_string(),
        })?;

        let mut sitemaps: Vec<SitemapLocation> = Vec::new();

        // Stage 1: the input may already be a sitemap URL
        if normalized.as_str().to_lowercase().contains("sitemap") {
            tracing::info!("Input looks like a sitemap URL, validating directly");
            let candidate = normalized.as_str();
            let found = self.validate_sitemap(candidate, SitemapSource::Direct).await;

            report(
                observer,
                DiscoveryStage::Direct,
                candidate,
                1,
                usize::from(found.is_some()),
            );

            if let Some(location) = found {
                let is_single = location.kind == SitemapKind::Single;
                sitemaps.push(location);
                if is_single {
                    return Ok(sitemaps);
                }
                // A direct index hit still needs its children expanded below
            }
        }

        // Stages 2 and 3 search for sitemaps; a direct hit makes them moot
        if sitemaps.is_empty() {
            let origin = origin_of(&normalized);

            // Stage 2: robots.txt
            let robots_url = format!("{}/robots.txt", origin);
            let robots_refs = self.robots_sitemap_refs(&robots_url).await;
            report(observer, DiscoveryStage::Robots, &robots_url, 1, 0);

            let mut robots_attempts = 1;
            for reference in robots_refs {
                let url = match normalize_input(&reference) {
                    Ok(url) => url.to_string(),
                    Err(e) => {
                        tracing::warn!(
                            "Skipping malformed robots.txt sitemap '{}': {}",
                            reference,
                            e
                        );
                        continue;
                    }
                };

                let found = self.validate_sitemap(&url, SitemapSource::Robots).await;
                robots_attempts += 1;
                if let Some(location) = found {
                    sitemaps.push(location);
                }
                report(
                    observer,
                    DiscoveryStage::Robots,
                    &url,
                    robots_attempts,
                    sitemaps.len(),
                );
            }

            // Stage 3: well-known paths, only when robots.txt came up empty
            if sitemaps.is_empty() {
                for (index, path) in COMMON_SITEMAP_PATHS.iter().enumerate() {
                    let url = format!("{}{}", origin, path);
                    let found = self.validate_sitemap(&url, SitemapSource::Discovered).await;
                    if let Some(location) = found {
                        sitemaps.push(location);
                    }
                    report(
                        observer,
                        DiscoveryStage::CommonPaths,
                        &url,
                        index + 1,
                        sitemaps.len(),
                    );

                    // A page-listing sitemap ends the scan; an index keeps it
                    // going in case more sitemaps live at other paths
                    if sitemaps
                        .last()
                        .is_some_and(|l| l.kind == SitemapKind::Single)
                    {
                        break;
                    }
                }
            }
        }

        // Stage 4: expand index children via an explicit work list so the
        // depth bound stays a visible constant
        let mut work: Vec<(String, usize)> = sitemaps
            .iter()
            .filter(|l| l.kind == SitemapKind::Index)
            .flat_map(|l| l.children.iter().map(|c| (c.clone(), 1)))
            .collect();

        let mut expansion_attempts = 0;
        let mut cursor = 0;
        while cursor < work.len() {
            let (child_ref, depth) = work[cursor].clone();
            cursor += 1;

            let url = match normalize_input(&child_ref) {
                Ok(url) => url.to_string(),
                Err(e) => {
                    tracing::warn!("Skipping malformed index child '{}': {}", child_ref, e);
                    continue;
                }
            };

            let found = self.validate_sitemap(&url, SitemapSource::Discovered).await;
            expansion_attempts += 1;
            if let Some(location) = found {
                if location.kind == SitemapKind::Index && depth < MAX_INDEX_DEPTH {
                    for child in &location.children {
                        work.push((child.clone(), depth + 1));
                    }
                }
                sitemaps.push(location);
            }
            report(
                observer,
                DiscoveryStage::IndexExpansion,
                &url,
                expansion_attempts,
                sitemaps.len(),
            );
        }

        tracing::info!("Discovery finished with {} sitemap(s)", sitemaps.len());
        Ok(sitemaps)
    }

    /// Collects page URLs from every page-listing sitemap, preserving
    /// document order and dropping duplicates
    ///
    /// Index locations are skipped; their children were already expanded into
    /// Single locations during discovery.
    pub async fn collect_page_urls(&self, locations: &[SitemapLocation]) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut urls = Vec::new();

        for location in locations {
            if location.kind != SitemapKind::Single {
                continue;
            }

            let content = match self.gateway.fetch(&location.url).await {
                Ok(content) => content,
                Err(e) => {
                    tracing::warn!("Could not re-fetch sitemap {}: {}", location.url, e);
                    continue;
                }
            };

            if let ParsedSitemap::Urlset(found) = parser::parse(&content) {
                for url in found {
                    if seen.insert(url.clone()) {
                        urls.push(url);
                    }
                }
            }
        }

        urls
    }

    /// Fetch + parse + classify; None means "not a sitemap here"
    async fn validate_sitemap(&self, url: &str, source: SitemapSource) -> Option<SitemapLocation> {
        let content = match self.gateway.fetch(url).await {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!("No sitemap at {}: {}", url, e);
                return None;
            }
        };

        match parser::parse(&content) {
            ParsedSitemap::Urlset(urls) if !urls.is_empty() => Some(SitemapLocation {
                url: url.to_string(),
                kind: SitemapKind::Single,
                source,
                children: Vec::new(),
            }),
            ParsedSitemap::Index(children) if !children.is_empty() => Some(SitemapLocation {
                url: url.to_string(),
                kind: SitemapKind::Index,
                source,
                children,
            }),
            _ => {
                tracing::debug!("Content at {} matched no sitemap shape", url);
                None
            }
        }
    }

    /// Extracts `Sitemap:` references from robots.txt; fetch failure is
    /// treated as zero references
    async fn robots_sitemap_refs(&self, robots_url: &str) -> Vec<String> {
        let content = match self.gateway.fetch(robots_url).await {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!("No robots.txt at {}: {}", robots_url, e);
                return Vec::new();
            }
        };

        content
            .lines()
            .filter_map(|line| {
                let trimmed = line.trim();
                let (directive, value) = trimmed.split_once(':')?;
                if directive.eq_ignore_ascii_case("sitemap") {
                    let value = value.trim();
                    (!value.is_empty()).then(|| value.to_string())
                } else {
                    None
                }
            })
            .collect()
    }
}

fn report(
    observer: Option<ProgressObserver<'_>>,
    stage: DiscoveryStage,
    current_attempt: &str,
    attempts_made: usize,
    sitemaps_found: usize,
) {
    if let Some(observer) = observer {
        observer(&DiscoveryProgress {
            stage,
            current_attempt: current_attempt.to_string(),
            attempts_made,
            sitemaps_found,
        });
    }
}

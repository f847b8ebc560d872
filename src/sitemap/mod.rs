//! Sitemap parsing and discovery
//!
//! [`parser`] turns raw sitemap content into URL lists; [`discovery`] runs
//! the staged search (direct URL, robots.txt, well-known paths, index
//! expansion) that locates those documents in the first place.

pub mod discovery;
pub mod parser;

pub use discovery::{
    DiscoveryProgress, DiscoveryStage, ProgressObserver, SitemapDiscoverer, SitemapKind,
    SitemapLocation, SitemapSource,
};
pub use parser::{parse, ParsedSitemap};

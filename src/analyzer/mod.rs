//! Page analysis engine
//!
//! `scoring` holds the pure SEO rules, `page` applies them to fetched HTML,
//! and `batch` fans page analyses out in paced concurrent batches.

mod batch;
mod page;
pub mod scoring;

pub use batch::{BatchObserver, BatchProgress, BatchRunner};
pub use page::PageAnalyzer;

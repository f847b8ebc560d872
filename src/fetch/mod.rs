//! Outbound HTTP layer
//!
//! Every fetch in the system goes through the [`FetchGateway`], which
//! serializes dispatch through one FIFO queue and enforces the global rate
//! budget. The gateway talks only to the configured proxy endpoint, never to
//! target sites directly.

mod gateway;

pub use gateway::FetchGateway;

use reqwest::Client;
use std::time::Duration;

/// Builds the HTTP client used to talk to the fetch proxy
///
/// The proxy injects the browser-facing User-Agent itself; this identifies
/// the auditor to the proxy only.
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    let user_agent = format!("sitelens/{}", env!("CARGO_PKG_VERSION"));

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

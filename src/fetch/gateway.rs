//! Rate-limited fetch gateway
//!
//! All callers share one process-wide FIFO queue drained by a single
//! dispatch task, so the effective outbound request rate is bounded no matter
//! how many analyses are in flight. The queue is also the concurrency
//! limiter: exactly one HTTP request is in flight at a time, trading
//! throughput for predictable, polite behavior toward the proxy.

use crate::config::FetchConfig;
use crate::{FetchError, UrlError};
use reqwest::Client;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender, WeakUnboundedSender};
use tokio::sync::oneshot;
use url::Url;

/// Delay before a failed request rejoins the queue
const RETRY_BACKOFF: Duration = Duration::from_millis(1000);

/// A fetch waiting in the queue
///
/// Lifecycle: enqueued, dequeued in FIFO order, executed under the rate gate,
/// then either resolved through `done` or re-enqueued with one fewer retry.
struct FetchRequest {
    url: String,
    retries_remaining: u32,
    done: oneshot::Sender<Result<String, FetchError>>,
}

/// Error body returned by the proxy on a failed upstream fetch
#[derive(Debug, Deserialize)]
struct ProxyErrorBody {
    error: String,
    status: Option<u16>,
}

/// Handle for submitting fetches to the shared dispatch queue
///
/// Cheap to clone; all clones feed the same queue and worker. Dropping every
/// clone shuts the worker down once the queue drains.
#[derive(Clone)]
pub struct FetchGateway {
    tx: UnboundedSender<FetchRequest>,
    retries: u32,
}

impl FetchGateway {
    /// Creates a gateway and spawns its dispatch task
    ///
    /// # Arguments
    ///
    /// * `client` - HTTP client used for all proxy calls
    /// * `proxy_base` - Base URL of the proxy; requests go to `{base}/api/fetch`
    /// * `config` - Rate and retry budget
    ///
    /// # Returns
    ///
    /// * `Ok(FetchGateway)` - Gateway ready to accept fetches
    /// * `Err(UrlError)` - The proxy endpoint URL could not be formed
    pub fn new(client: Client, proxy_base: &Url, config: &FetchConfig) -> Result<Self, UrlError> {
        let endpoint_str = format!("{}/api/fetch", proxy_base.as_str().trim_end_matches('/'));
        let endpoint = Url::parse(&endpoint_str).map_err(|e| UrlError::Parse {
            input: endpoint_str,
            reason: e.to_string(),
        })?;

        // Floor at one request per second; a zero rate would make the
        // interval non-finite
        let requests_per_second = config.requests_per_second.max(1);
        let min_interval = Duration::from_secs_f64(1.0 / f64::from(requests_per_second));

        let (tx, rx) = mpsc::unbounded_channel();
        let dispatcher = Dispatcher {
            client,
            endpoint,
            min_interval,
            rx,
            retry_tx: tx.downgrade(),
            last_dispatch: None,
        };
        tokio::spawn(dispatcher.run());

        Ok(Self {
            tx,
            retries: config.retries,
        })
    }

    /// Fetches a URL through the proxy, waiting for its turn in the queue
    ///
    /// Transient failures are retried up to the configured budget before the
    /// error is surfaced.
    ///
    /// # Arguments
    ///
    /// * `url` - The target URL to fetch
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The raw text body of the target resource
    /// * `Err(FetchError)` - Retries exhausted or the queue is gone
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let (done, result) = oneshot::channel();

        let request = FetchRequest {
            url: url.to_string(),
            retries_remaining: self.retries,
            done,
        };

        self.tx
            .send(request)
            .map_err(|_| FetchError::transport(url, "fetch queue is closed"))?;

        result
            .await
            .map_err(|_| FetchError::transport(url, "fetch worker dropped the request"))?
    }
}

/// The single cooperative worker draining the queue
struct Dispatcher {
    client: Client,
    endpoint: Url,
    min_interval: Duration,
    rx: UnboundedReceiver<FetchRequest>,
    /// Weak handle so the worker does not keep its own queue alive
    retry_tx: WeakUnboundedSender<FetchRequest>,
    last_dispatch: Option<Instant>,
}

impl Dispatcher {
    /// Runs until every gateway handle is dropped and the queue drains
    async fn run(mut self) {
        while let Some(request) = self.rx.recv().await {
            // Rate gate: sleep out the remainder of the interval since the
            // previous dispatch
            if let Some(last) = self.last_dispatch {
                let elapsed = last.elapsed();
                if elapsed < self.min_interval {
                    tokio::time::sleep(self.min_interval - elapsed).await;
                }
            }

            tracing::debug!("Dispatching fetch for {}", request.url);
            let outcome = self.attempt(&request.url).await;
            self.last_dispatch = Some(Instant::now());

            match outcome {
                Ok(body) => {
                    let _ = request.done.send(Ok(body));
                }
                Err(error) if request.retries_remaining > 0 => {
                    tracing::warn!(
                        "Fetch failed for {} ({}), retrying ({} attempts left)",
                        request.url,
                        error.message,
                        request.retries_remaining
                    );

                    // The backoff stalls the whole queue, then the retry
                    // rejoins at the back behind anything queued meanwhile
                    tokio::time::sleep(RETRY_BACKOFF).await;

                    match self.retry_tx.upgrade() {
                        Some(tx) => {
                            let _ = tx.send(FetchRequest {
                                url: request.url,
                                retries_remaining: request.retries_remaining - 1,
                                done: request.done,
                            });
                        }
                        None => {
                            // All handles dropped while we were backing off
                            let _ = request.done.send(Err(error));
                        }
                    }
                }
                Err(error) => {
                    tracing::error!("Fetch failed for {} after all retries", request.url);
                    let _ = request.done.send(Err(error));
                }
            }
        }

        tracing::debug!("Fetch queue closed, dispatcher exiting");
    }

    /// Performs one proxy round trip
    async fn attempt(&self, target: &str) -> Result<String, FetchError> {
        let mut proxy_url = self.endpoint.clone();
        proxy_url.query_pairs_mut().append_pair("url", target);

        let response = self
            .client
            .get(proxy_url)
            .send()
            .await
            .map_err(|e| FetchError::transport(target, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // The proxy forwards upstream failures as a JSON error body
            let body = response.text().await.unwrap_or_default();
            let parsed: Option<ProxyErrorBody> = serde_json::from_str(&body).ok();

            return Err(FetchError {
                url: target.to_string(),
                status_code: parsed
                    .as_ref()
                    .and_then(|p| p.status)
                    .or(Some(status.as_u16())),
                message: parsed
                    .map(|p| p.error)
                    .unwrap_or_else(|| format!("proxy returned {}", status)),
            });
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::transport(target, e.to_string()))
    }
}

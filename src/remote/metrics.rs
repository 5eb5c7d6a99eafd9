//! Metrics collection for origin requests.
//!
//! Tracks how many requests a session issued, how many bytes came back and
//! how long the round trips took. Failed requests are counted too.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Metrics for a single origin request
#[derive(Debug, Clone)]
pub struct RequestMetric {
    /// Requested URL
    pub url: String,
    /// Response status, `None` when the transport failed
    pub status: Option<u16>,
    /// Number of body bytes received
    pub bytes: u64,
    /// Duration of the request
    pub duration: Duration,
}

/// Collector for origin request metrics.
///
/// Shared between the directory service and tab-completion probes.
#[derive(Debug, Default)]
pub struct FetchMetrics {
    total_bytes: AtomicU64,
    request_count: AtomicUsize,
    failure_count: AtomicUsize,
    /// Total time spent in requests (nanoseconds)
    total_request_time_ns: AtomicU64,
    requests: RwLock<Vec<RequestMetric>>,
}

impl FetchMetrics {
    /// Create a new metrics collector wrapped in Arc for sharing
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Record a completed request
    pub fn record_request(&self, url: &str, status: Option<u16>, bytes: u64, duration: Duration) {
        self.total_bytes.fetch_add(bytes, Ordering::Relaxed);
        self.request_count.fetch_add(1, Ordering::Relaxed);
        self.total_request_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
        if !status.is_some_and(|s| (200..300).contains(&s)) {
            self.failure_count.fetch_add(1, Ordering::Relaxed);
        }

        if let Ok(mut requests) = self.requests.write() {
            requests.push(RequestMetric {
                url: url.to_string(),
                status,
                bytes,
                duration,
            });
        }
    }

    /// Get total bytes transferred
    pub fn total_bytes(&self) -> u64 {
        self.total_bytes.load(Ordering::Relaxed)
    }

    /// Get request count
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::Relaxed)
    }

    /// Requests that failed in transport or returned a non-success status
    pub fn failure_count(&self) -> usize {
        self.failure_count.load(Ordering::Relaxed)
    }

    /// Get total request time
    pub fn total_request_time(&self) -> Duration {
        Duration::from_nanos(self.total_request_time_ns.load(Ordering::Relaxed))
    }

    /// Get all individual request metrics
    pub fn requests(&self) -> Vec<RequestMetric> {
        self.requests
            .read()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// One-line summary of the session's traffic
    pub fn summary(&self) -> String {
        format!(
            "{} requests ({} failed), {} bytes received in {:.2?}",
            self.request_count(),
            self.failure_count(),
            self.total_bytes(),
            self.total_request_time()
        )
    }
}

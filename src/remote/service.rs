use anyhow::Result;
use log::debug;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use std::sync::Arc;
use std::time::Instant;

use super::autoindex::{ListingBody, extract_anchor_hrefs};
use super::client::{FetchError, ReqwestTransport, Transport};
use super::metrics::FetchMetrics;
use crate::vfs::{DirectoryEntry, ListingResult, VirtualPath};

/// Bytes escaped inside one path segment. A segment never contains `/`, and
/// `%` is escaped so names are sent literally.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Lists directories and reads files on a single fixed origin.
///
/// Every call is one best-effort attempt: no retries and no timeouts beyond
/// the transport's own defaults. Paths are expected to be normalized already.
pub struct RemoteDirectoryService {
    /// Base URL, always ending in `/`
    origin: String,
    transport: Arc<dyn Transport>,
    metrics: Arc<FetchMetrics>,
}

impl RemoteDirectoryService {
    /// Create a service talking to `origin` over HTTP
    pub fn new(origin: &str) -> Result<Self> {
        let transport = Arc::new(ReqwestTransport::new()?);
        Ok(Self::with_transport(origin, transport))
    }

    /// Create a service with a specific transport
    pub fn with_transport(origin: &str, transport: Arc<dyn Transport>) -> Self {
        let mut origin = origin.to_string();
        if !origin.ends_with('/') {
            origin.push('/');
        }
        RemoteDirectoryService {
            origin,
            transport,
            metrics: FetchMetrics::new(),
        }
    }

    /// Request metrics for this service
    pub fn metrics(&self) -> &Arc<FetchMetrics> {
        &self.metrics
    }

    /// Full request URL for a virtual path, each segment percent-encoded
    pub fn url_for(&self, path: &VirtualPath) -> String {
        let mut url = self.origin.clone();
        for (i, segment) in path.segments().iter().enumerate() {
            if i > 0 {
                url.push('/');
            }
            url.extend(utf8_percent_encode(segment, SEGMENT));
        }
        if path.is_dir() && !path.is_root() {
            url.push('/');
        }
        url
    }

    /// List a directory.
    ///
    /// A successful response is decoded as a JSON listing, or scanned as an
    /// HTML index when it is not one. If that first request fails, a single
    /// fallback request is scanned as HTML. Only a failure of the fallback
    /// yields [`ListingResult::Absent`]; zero entries is [`ListingResult::Empty`].
    pub async fn list_directory(&self, path: &VirtualPath) -> ListingResult {
        let url = self.url_for(path);

        match self.fetch(&url).await {
            Ok(body) => {
                let listing = ListingBody::decode(&body);
                debug!("{url}: decoded {} listing", listing.kind());
                return ListingResult::from_entries(listing.into_entries());
            }
            Err(e) => debug!("structured listing failed ({e}), falling back to HTML index"),
        }

        match self.fetch(&url).await {
            Ok(body) => {
                let entries = extract_anchor_hrefs(&body)
                    .into_iter()
                    .map(DirectoryEntry::new)
                    .collect();
                ListingResult::from_entries(entries)
            }
            Err(e) => {
                debug!("listing unavailable: {e}");
                ListingResult::Absent
            }
        }
    }

    /// Read a file as text, or `None` if it cannot be fetched
    pub async fn fetch_file_content(&self, path: &VirtualPath) -> Option<String> {
        let url = self.url_for(path);
        match self.fetch(&url).await {
            Ok(body) => Some(body),
            Err(e) => {
                debug!("file unavailable: {e}");
                None
            }
        }
    }

    /// One GET; non-success statuses become [`FetchError::Status`]
    async fn fetch(&self, url: &str) -> std::result::Result<String, FetchError> {
        debug!("GET {url}");
        let start = Instant::now();
        let result = self.transport.get(url).await;
        let elapsed = start.elapsed();

        match result {
            Ok(resp) => {
                self.metrics.record_request(
                    url,
                    Some(resp.status),
                    resp.received,
                    elapsed,
                );
                if resp.is_success() {
                    Ok(resp.body)
                } else {
                    Err(FetchError::Status {
                        url: url.to_string(),
                        status: resp.status,
                    })
                }
            }
            Err(e) => {
                self.metrics.record_request(url, None, 0, elapsed);
                Err(e)
            }
        }
    }
}

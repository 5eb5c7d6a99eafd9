pub mod autoindex;
pub mod client;
pub mod metrics;
pub mod service;

pub use client::{FetchError, HttpResponse, ReqwestTransport, Transport};
pub use metrics::FetchMetrics;
pub use service::RemoteDirectoryService;

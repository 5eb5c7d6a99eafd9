use anyhow::{Context, Result, bail};

/// Directories kept for tab completion unless configured otherwise
pub const DEFAULT_COMPLETION_CACHE_SIZE: usize = 64;

/// Configuration for a shell session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    /// Base URL of the autoindex server, always ending in `/`
    pub origin: String,
    /// Label shown in the prompt before the working directory
    pub hostname: String,
    /// Maximum number of directories kept for tab completion
    pub completion_cache_size: usize,
}

impl ShellConfig {
    /// Validate an origin URL and build the session configuration.
    ///
    /// The hostname defaults to the origin's host.
    pub fn new(origin: &str, hostname: Option<String>) -> Result<Self> {
        let url = reqwest::Url::parse(origin)
            .with_context(|| format!("Invalid origin URL: {origin}"))?;

        if !matches!(url.scheme(), "http" | "https") {
            bail!("Unsupported origin scheme '{}': expected http or https", url.scheme());
        }
        if url.query().is_some() || url.fragment().is_some() {
            bail!("Origin URL must not carry a query string or fragment: {origin}");
        }

        let hostname = match hostname {
            Some(name) => name,
            None => url
                .host_str()
                .context("Origin URL has no host")?
                .to_string(),
        };

        let mut origin = url.to_string();
        if !origin.ends_with('/') {
            origin.push('/');
        }

        Ok(ShellConfig {
            origin,
            hostname,
            completion_cache_size: DEFAULT_COMPLETION_CACHE_SIZE,
        })
    }
}

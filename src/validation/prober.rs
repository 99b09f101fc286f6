use async_trait::async_trait;
use log::debug;
use reqwest::redirect::Policy;

use crate::config::Config;
use crate::core::constants::{http_status, timeouts};
use crate::core::error::Result;
use crate::core::types::ProbeStatus;

/// Something that can tell whether a URI is currently reachable.
#[async_trait]
pub trait Probe: Send + Sync {
    /// Check one URI. Never fails: every failure collapses into
    /// [`ProbeStatus::Invalid`].
    async fn probe(&self, uri: &str) -> ProbeStatus;
}

/// Probes URIs with a single HTTP GET each.
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: reqwest::Client,
}

impl HttpProber {
    /// Build a prober from the run configuration.
    ///
    /// The timeout covers the whole request, redirects are followed up to
    /// ten hops and certificates are verified. An out-of-range timeout is a
    /// `Config` error.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let user_agent = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

        let client = reqwest::Client::builder()
            .timeout(config.timeout_duration())
            .redirect(Policy::limited(timeouts::MAX_REDIRECTS))
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client })
    }

    /// Wrap an already configured client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

/// Reduce an HTTP status code to the binary outcome.
pub fn classify(status_code: u16) -> ProbeStatus {
    if status_code == http_status::OK {
        ProbeStatus::Ok
    } else {
        ProbeStatus::Invalid
    }
}

#[async_trait]
impl Probe for HttpProber {
    async fn probe(&self, uri: &str) -> ProbeStatus {
        match self.client.get(uri).send().await {
            Ok(response) => {
                let status_code = response.status().as_u16();
                debug!("{uri} -> {status_code}");
                classify(status_code)
            }
            Err(err) => {
                let description = std::error::Error::source(&err)
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| err.to_string());
                debug!("{uri} -> {description}");
                ProbeStatus::Invalid
            }
        }
    }
}

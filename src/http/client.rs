//! API client
//!
//! Resolves endpoints against the API base URL, issues a single GET and
//! hands the body to the row set decoder. No retries are attempted;
//! callers that want them can check [`Error::is_retryable`].

use crate::decode::{Decoder, DecoderConfig};
use crate::destination::Destination;
use crate::error::{Error, Result};
use crate::metadata::Metadata;
use bytes::Bytes;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// The base URL for all API calls
pub const DEFAULT_BASE_URL: &str = "https://api.eveonline.com/";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_user_agent() -> String {
    format!("eve-rowset/{}", env!("CARGO_PKG_VERSION"))
}

/// Configuration for the API client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL relative endpoints are resolved against
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Load a config from YAML
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: ClientConfig = serde_yaml::from_str(yaml)
            .map_err(|e| Error::config(format!("Failed to parse client YAML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(Error::config("base_url cannot be empty"));
        }
        if self.timeout_ms == 0 {
            return Err(Error::config("timeout_ms must be greater than zero"));
        }
        Url::parse(&self.base_url)?;
        Ok(())
    }
}

/// Builder for client config
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the request timeout. Sub-millisecond remainders round up.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        let mut ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        if timeout.subsec_nanos() % 1_000_000 != 0 {
            ms = ms.saturating_add(1);
        }
        self.config.timeout_ms = ms;
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

/// API client
///
/// The default value uses [`DEFAULT_BASE_URL`] and a plain reqwest client.
#[derive(Debug, Clone)]
pub struct Client {
    http: ReqwestClient,
    config: ClientConfig,
    decoder: DecoderConfig,
}

impl Client {
    /// Create a client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let http = ReqwestClient::builder()
            .timeout(config.timeout())
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            http,
            config,
            decoder: DecoderConfig::default(),
        })
    }

    /// Create a client around a caller-supplied HTTP client.
    ///
    /// Timeouts and user agent come from `http`; only `base_url` is used
    /// from `config`.
    pub fn with_http_client(http: ReqwestClient, config: ClientConfig) -> Self {
        Self {
            http,
            config,
            decoder: DecoderConfig::default(),
        }
    }

    /// Set the decoder configuration used for responses
    #[must_use]
    pub fn with_decoder_config(mut self, decoder: DecoderConfig) -> Self {
        self.decoder = decoder;
        self
    }

    /// Client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &ReqwestClient {
        &self.http
    }

    /// Resolve an endpoint, absolute or relative, against the base URL
    pub fn resolve(&self, endpoint: &str) -> Result<Url> {
        let base = Url::parse(&self.config.base_url)?;
        Ok(base.join(endpoint)?)
    }

    /// GET an endpoint and return the response body
    pub async fn fetch(&self, endpoint: &str) -> Result<Bytes> {
        let url = self.resolve(endpoint)?;
        debug!("GET {}", url);

        let response = self.http.get(url).send().await?.error_for_status()?;
        let body = response.bytes().await?;

        debug!("Received {} bytes", body.len());
        Ok(body)
    }

    /// GET an endpoint and decode the response into `dest`
    pub async fn call<D: Destination>(&self, endpoint: &str, dest: &mut D) -> Result<Metadata> {
        let body = self.fetch(endpoint).await?;
        Decoder::from_buf_reader(body.as_ref())
            .with_config(self.decoder.clone())
            .decode(dest)
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::with_http_client(ReqwestClient::new(), ClientConfig::default())
    }
}

static DEFAULT_CLIENT: LazyLock<Client> = LazyLock::new(Client::default);

/// GET an endpoint with the default client and decode it into `dest`
pub async fn call<D: Destination>(endpoint: &str, dest: &mut D) -> Result<Metadata> {
    DEFAULT_CLIENT.call(endpoint, dest).await
}

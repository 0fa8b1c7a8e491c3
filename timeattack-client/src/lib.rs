use std::time::Duration;

use async_trait::async_trait;
use timeattack_common::{HttpResponse, RequestExecutor, RequestMethod, Result, TimeAttackError};
use tracing::debug;

pub const DEFAULT_PORT: u16 = 80;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Target host configuration, fixed for the lifetime of a client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    /// Applied to every request; a request that outlives it fails the exchange.
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// HTTP executor backed by a pooled `reqwest` client.
///
/// The underlying client is internally synchronized, so one `RestClient` can
/// be shared by all concurrent sampling tasks.
pub struct RestClient {
    pub config: ClientConfig,
    http_client: reqwest::Client,
}

impl RestClient {
    /// Create a client for the given target. Redirects are not followed:
    /// a redirect hop would add a second round-trip to the measured latency.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| TimeAttackError::ClientBuild(e.to_string()))?;

        debug!("Created client for {}:{}", config.host, config.port);

        Ok(Self { config, http_client })
    }

    /// Build the URL for a request against the configured target.
    pub fn build_url(&self, endpoint: &str) -> String {
        format!("http://{}:{}{}", self.config.host, self.config.port, endpoint)
    }
}

#[async_trait]
impl RequestExecutor for RestClient {
    async fn execute(
        &self,
        method: RequestMethod,
        endpoint: &str,
        body: &str,
    ) -> Result<HttpResponse> {
        let url = self.build_url(endpoint);

        let request = match method {
            RequestMethod::Get => self.http_client.get(&url),
            RequestMethod::Post => self
                .http_client
                .post(&url)
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(body.to_string()),
        };

        let response = request
            .send()
            .await
            .map_err(|e| TimeAttackError::RequestFailed(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TimeAttackError::RequestFailed(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

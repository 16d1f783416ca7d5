use std::sync::OnceLock;

use async_trait::async_trait;
use courier_config::TransportConfig;
use courier_core::{ResponseMetadata, StatusPolicy, Transport, TransportError, TransportResponse};
use reqwest::Client;

/// [`Transport`] backed by a `reqwest::Client`
///
/// Connection pooling, TLS and redirects are left to reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Transport sharing one process-wide client
    pub fn new() -> Self {
        static CLIENT: OnceLock<Client> = OnceLock::new();

        Self {
            client: CLIENT.get_or_init(Client::new).clone(),
        }
    }

    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Build a dedicated client from the `[transport]` configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a duration cannot be parsed or the client
    /// cannot be built
    pub fn from_config(config: &TransportConfig) -> anyhow::Result<Self> {
        let mut builder = Client::builder();

        if let Some(timeout) = config.timeout()? {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout()? {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = config.pool_idle_timeout()? {
            builder = builder.pool_idle_timeout(timeout);
        }
        if let Some(ref user_agent) = config.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }

        let client = builder
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build HTTP client: {e}"))?;

        Ok(Self { client })
    }

    pub const fn client(&self) -> &Client {
        &self.client
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    type Request = reqwest::Request;

    async fn execute(&self, request: reqwest::Request, policy: &StatusPolicy) -> TransportResponse {
        let method = request.method().clone();

        tracing::debug!(%method, url = %request.url(), "sending request");

        let response = match self.client.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!("request failed: {e}");
                return TransportResponse::failed(transport_error(&e));
            }
        };

        let metadata = ResponseMetadata::new(response.status(), response.version(), response.headers().clone())
            .with_url(response.url().clone());

        match response.bytes().await {
            Ok(body) => policy.classify(&method, metadata, body),
            Err(e) => TransportResponse {
                metadata: Some(metadata),
                body: None,
                error: Some(TransportError::Body(e.to_string())),
            },
        }
    }
}

fn transport_error(error: &reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout
    } else if error.is_connect() {
        TransportError::Connect(error.to_string())
    } else if error.is_body() || error.is_decode() {
        TransportError::Body(error.to_string())
    } else {
        TransportError::Other(error.to_string())
    }
}

use std::fmt;
use std::sync::Arc;

use courier_core::{
    DecoderConfig, EmptyResponse, Outcome, StatusPolicy, Transport, TransportResponse, resolve, resolve_expecting_body,
};
use serde::de::DeserializeOwned;

use crate::call::Call;
use crate::delivery::DeliveryContext;

/// Runs prepared requests through a transport and decodes the result
///
/// Clones share the transport and delivery context. There is no mutable
/// state, so any number of calls may be in flight at once.
pub struct ResponseDecoder<Tr: Transport> {
    transport: Arc<Tr>,
    delivery: Arc<dyn DeliveryContext>,
    policy: Arc<StatusPolicy>,
    config: Arc<DecoderConfig>,
}

impl<Tr: Transport> ResponseDecoder<Tr> {
    /// Create a decoder that delivers every outcome on `delivery`
    pub fn new(transport: Tr, delivery: impl DeliveryContext) -> Self {
        Self {
            transport: Arc::new(transport),
            delivery: Arc::new(delivery),
            policy: Arc::new(StatusPolicy::default()),
            config: Arc::new(DecoderConfig::default()),
        }
    }

    /// Build a decoder from the `[status]` and `[decoder]` configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the status configuration is invalid
    pub fn from_config(
        transport: Tr,
        delivery: impl DeliveryContext,
        config: &courier_config::Config,
    ) -> anyhow::Result<Self> {
        Ok(Self::new(transport, delivery)
            .with_status_policy(config.status.to_policy()?)
            .with_decoder_config(config.decoder.clone()))
    }

    #[must_use]
    pub fn with_status_policy(mut self, policy: StatusPolicy) -> Self {
        self.policy = Arc::new(policy);
        self
    }

    #[must_use]
    pub fn with_decoder_config(mut self, config: DecoderConfig) -> Self {
        self.config = Arc::new(config);
        self
    }

    pub fn status_policy(&self) -> &StatusPolicy {
        &self.policy
    }

    pub fn transport(&self) -> &Tr {
        &self.transport
    }

    /// Execute `request` and decode the body as `T`
    ///
    /// A success response without a body yields `T`'s empty value.
    pub fn run<T>(&self, request: Tr::Request) -> Call<T>
    where
        T: DeserializeOwned + EmptyResponse + Send + 'static,
    {
        self.run_with(request, DecoderConfig::clone(&self.config))
    }

    /// Like [`run`](Self::run), with decoder options for this call only
    pub fn run_with<T>(&self, request: Tr::Request, config: DecoderConfig) -> Call<T>
    where
        T: DeserializeOwned + EmptyResponse + Send + 'static,
    {
        self.call(request, Arc::new(config), resolve::<T>)
    }

    /// Execute `request` for a type that has no empty value
    ///
    /// A success response without a body fails with
    /// [`courier_core::DecodeError::MissingBody`] as the cause.
    pub fn run_expecting_body<T>(&self, request: Tr::Request) -> Call<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        self.call(request, Arc::clone(&self.config), resolve_expecting_body::<T>)
    }

    fn call<T>(
        &self,
        request: Tr::Request,
        config: Arc<DecoderConfig>,
        resolve: fn(TransportResponse, &DecoderConfig) -> Outcome<T>,
    ) -> Call<T>
    where
        T: Send + 'static,
    {
        let transport = Arc::clone(&self.transport);
        let policy = Arc::clone(&self.policy);

        let pipeline = async move {
            tracing::debug!("executing request");
            let response = transport.execute(request, &policy).await;
            resolve(response, &config)
        };

        Call::new(Box::pin(pipeline), Arc::clone(&self.delivery))
    }
}

impl<Tr: Transport> Clone for ResponseDecoder<Tr> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            delivery: Arc::clone(&self.delivery),
            policy: Arc::clone(&self.policy),
            config: Arc::clone(&self.config),
        }
    }
}

impl<Tr: Transport> fmt::Debug for ResponseDecoder<Tr> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseDecoder")
            .field("policy", &self.policy)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

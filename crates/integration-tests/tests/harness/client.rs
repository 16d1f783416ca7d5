//! Decoder wired to the reqwest transport and a dedicated delivery queue

use courier_client::{Call, Outcome, ReqwestTransport, ResponseDecoder, SerialQueue};
use courier_config::LoggingConfig;
use reqwest::Method;
use tokio::sync::oneshot;

use super::mock_api::MockApi;

/// Decoder plus the pieces tests need to inspect
pub struct TestClient {
    pub decoder: ResponseDecoder<ReqwestTransport>,
    pub queue: SerialQueue,
    http: reqwest::Client,
}

impl TestClient {
    pub fn new() -> anyhow::Result<Self> {
        init_logging();

        let http = reqwest::Client::new();
        let queue = SerialQueue::new("courier-main")?;
        let decoder = ResponseDecoder::new(ReqwestTransport::with_client(http.clone()), queue.clone());

        Ok(Self { decoder, queue, http })
    }

    /// Prepared request against the mock
    pub fn request(&self, mock: &MockApi, method: Method, path: &str) -> reqwest::Request {
        self.http
            .request(method, mock.url(path))
            .build()
            .expect("request should build")
    }

    pub fn get(&self, mock: &MockApi, path: &str) -> reqwest::Request {
        self.request(mock, Method::GET, path)
    }

    /// Subscribe and wait for the outcome, checking it arrived on the queue
    pub async fn deliver<T: Send + 'static>(&self, call: Call<T>) -> Outcome<T> {
        let (tx, rx) = oneshot::channel();
        let queue = self.queue.clone();

        let _subscription = call.subscribe(move |outcome| {
            tx.send((queue.is_current(), outcome)).ok();
        });

        let (on_queue, outcome) = rx.await.expect("outcome was never delivered");
        assert!(on_queue, "outcome was observed off the delivery queue");
        outcome
    }
}

/// Subscribe and wait for the outcome on whatever context the decoder uses
pub async fn deliver<T: Send + 'static>(call: Call<T>) -> Outcome<T> {
    let (tx, rx) = oneshot::channel();

    let _subscription = call.subscribe(move |outcome| {
        tx.send(outcome).ok();
    });

    rx.await.expect("outcome was never delivered")
}

/// Print courier's debug logs when a test fails
pub fn init_logging() {
    let config = LoggingConfig {
        filter: "courier_core=debug,courier_client=debug".to_owned(),
        ..LoggingConfig::default()
    };

    // only the first test in a binary gets to install the subscriber
    courier_telemetry::init(&config).ok();
}

//! The seam between courier and whatever actually performs HTTP I/O.
//!
//! A [`Transport`] executes a prepared request and reports one
//! [`TransportResponse`]. Status validation is described by a
//! [`StatusPolicy`] handed to the transport on every call; transports apply
//! it with [`StatusPolicy::classify`] so every implementation agrees on
//! which responses count as failures.

use std::ops::RangeInclusive;

use async_trait::async_trait;
use bytes::Bytes;
use http::{Method, StatusCode};

use crate::error::TransportError;
use crate::response::ResponseMetadata;

/// Executes prepared requests
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Fully configured request handle (method, URL, headers, body)
    type Request: Send + 'static;

    /// Execute `request` and validate the response against `policy`
    ///
    /// Must always resolve to exactly one result. Dropping the returned
    /// future cancels the request.
    async fn execute(&self, request: Self::Request, policy: &StatusPolicy) -> TransportResponse;
}

/// Raw result of one request as seen by a transport
#[derive(Debug, Default)]
pub struct TransportResponse {
    /// Present whenever the server answered
    pub metadata: Option<ResponseMetadata>,
    /// Response bytes, `None` when there were none
    pub body: Option<Bytes>,
    /// Set when the request failed or did not pass validation
    pub error: Option<TransportError>,
}

impl TransportResponse {
    /// Request failed before a response was available
    pub fn failed(error: TransportError) -> Self {
        Self {
            metadata: None,
            body: None,
            error: Some(error),
        }
    }

    /// Successful response without validation, mostly useful for tests
    pub fn success(metadata: ResponseMetadata, body: impl Into<Bytes>) -> Self {
        let body = body.into();
        Self {
            metadata: Some(metadata),
            body: (!body.is_empty()).then_some(body),
            error: None,
        }
    }
}

/// Which responses are acceptable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusPolicy {
    success: RangeInclusive<u16>,
    empty_body_codes: Vec<u16>,
    empty_body_methods: Vec<Method>,
}

impl Default for StatusPolicy {
    fn default() -> Self {
        Self {
            success: 200..=299,
            empty_body_codes: vec![200, 204, 205],
            empty_body_methods: vec![Method::HEAD],
        }
    }
}

impl StatusPolicy {
    pub fn new(success: RangeInclusive<u16>, empty_body_codes: impl IntoIterator<Item = u16>) -> Self {
        Self {
            success,
            empty_body_codes: empty_body_codes.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Request methods whose responses may always be empty
    #[must_use]
    pub fn with_empty_body_methods(mut self, methods: impl IntoIterator<Item = Method>) -> Self {
        self.empty_body_methods = methods.into_iter().collect();
        self
    }

    pub fn is_success(&self, status: StatusCode) -> bool {
        self.success.contains(&status.as_u16())
    }

    pub fn allows_empty_body(&self, method: &Method, status: StatusCode) -> bool {
        self.empty_body_methods.contains(method) || self.empty_body_codes.contains(&status.as_u16())
    }

    pub const fn success_range(&self) -> &RangeInclusive<u16> {
        &self.success
    }

    pub fn empty_body_codes(&self) -> &[u16] {
        &self.empty_body_codes
    }

    /// Validate a completed exchange
    ///
    /// A status outside the success range fails with the body kept so the
    /// error payload can still be read. A success status with an empty body
    /// only passes when the status or the request method allows it.
    pub fn classify(&self, method: &Method, metadata: ResponseMetadata, body: Bytes) -> TransportResponse {
        let status = metadata.status();
        let body = (!body.is_empty()).then_some(body);

        let error = if !self.is_success(status) {
            Some(TransportError::Status { status })
        } else if body.is_none() && !self.allows_empty_body(method, status) {
            Some(TransportError::EmptyBody { status })
        } else {
            None
        };

        TransportResponse {
            metadata: Some(metadata),
            body,
            error,
        }
    }
}

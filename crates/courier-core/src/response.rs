use http::{HeaderMap, StatusCode, Version};
use url::Url;

use crate::error::ApiError;

/// Result of a single request
pub type Outcome<T> = Result<ResponseEnvelope<T>, ApiError>;

/// Transport-level description of a response
#[derive(Debug, Clone)]
pub struct ResponseMetadata {
    status: StatusCode,
    version: Version,
    headers: HeaderMap,
    url: Option<Url>,
}

impl ResponseMetadata {
    pub const fn new(status: StatusCode, version: Version, headers: HeaderMap) -> Self {
        Self {
            status,
            version,
            headers,
            url: None,
        }
    }

    /// Attach the final URL of the response (after redirects)
    #[must_use]
    pub fn with_url(mut self, url: Url) -> Self {
        self.url = Some(url);
        self
    }

    pub const fn status(&self) -> StatusCode {
        self.status
    }

    pub const fn version(&self) -> Version {
        self.version
    }

    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub const fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }
}

impl From<StatusCode> for ResponseMetadata {
    fn from(status: StatusCode) -> Self {
        Self::new(status, Version::HTTP_11, HeaderMap::new())
    }
}

/// A decoded value together with the response it came from
#[derive(Debug, Clone)]
pub struct ResponseEnvelope<T> {
    value: T,
    metadata: ResponseMetadata,
}

impl<T> ResponseEnvelope<T> {
    pub const fn new(value: T, metadata: ResponseMetadata) -> Self {
        Self { value, metadata }
    }

    pub const fn value(&self) -> &T {
        &self.value
    }

    pub const fn metadata(&self) -> &ResponseMetadata {
        &self.metadata
    }

    pub const fn status(&self) -> StatusCode {
        self.metadata.status
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn into_parts(self) -> (T, ResponseMetadata) {
        (self.value, self.metadata)
    }

    /// Transform the value, keeping the metadata
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ResponseEnvelope<U> {
        ResponseEnvelope {
            value: f(self.value),
            metadata: self.metadata,
        }
    }
}

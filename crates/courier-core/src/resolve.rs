use serde::de::DeserializeOwned;

use crate::decode::DecoderConfig;
use crate::empty::EmptyResponse;
use crate::error::{ApiError, Cause, DecodeError, ErrorPayload, TransportError};
use crate::response::{Outcome, ResponseEnvelope, ResponseMetadata};
use crate::transport::TransportResponse;

/// Turn a transport result into an outcome, using `T`'s empty value for
/// success responses without a body
pub fn resolve<T>(response: TransportResponse, config: &DecoderConfig) -> Outcome<T>
where
    T: DeserializeOwned + EmptyResponse,
{
    resolve_with(response, config, |_| Ok(T::empty_value()))
}

/// Like [`resolve`], but an empty success body is an error
pub fn resolve_expecting_body<T>(response: TransportResponse, config: &DecoderConfig) -> Outcome<T>
where
    T: DeserializeOwned,
{
    resolve_with(response, config, |metadata| {
        Err(DecodeError::MissingBody {
            status: metadata.status(),
        })
    })
}

fn resolve_with<T, F>(response: TransportResponse, config: &DecoderConfig, on_empty: F) -> Outcome<T>
where
    T: DeserializeOwned,
    F: FnOnce(&ResponseMetadata) -> Result<T, DecodeError>,
{
    let TransportResponse { metadata, body, error } = response;

    if let Some(error) = error {
        return Err(failure(error, body.as_deref()));
    }

    let Some(metadata) = metadata else {
        return Err(collapse(DecodeError::MissingResponse));
    };

    let value = match body.filter(|body| !body.is_empty()) {
        Some(body) => config.decode(&body),
        None => on_empty(&metadata),
    }
    .map_err(collapse)?;

    tracing::debug!(status = %metadata.status(), "response decoded");

    Ok(ResponseEnvelope::new(value, metadata))
}

/// Map a failed exchange to the caller-visible error
fn failure(error: TransportError, body: Option<&[u8]>) -> ApiError {
    let Some(body) = body.filter(|body| !body.is_empty()) else {
        return collapse(error);
    };

    match serde_json::from_slice::<ErrorPayload>(body) {
        Ok(payload) => {
            tracing::debug!(status = payload.status_code, "structured error response");
            ApiError::Http(payload)
        }
        Err(source) => collapse(Cause::UnreadableErrorBody {
            transport: error,
            source,
        }),
    }
}

fn collapse(cause: impl Into<Cause>) -> ApiError {
    let cause = cause.into();
    tracing::warn!("request failed with unclassified error: {cause}");
    ApiError::unknown(cause)
}

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! Core types for courier
//!
//! Turns a raw transport result into a typed outcome: status validation,
//! JSON decoding of success bodies, and mapping of failure bodies into a
//! structured error payload. Nothing in here is async apart from the
//! [`Transport`] seam itself.

mod decode;
mod empty;
pub mod error;
mod resolve;
mod response;
pub mod transport;

pub use decode::{DecoderConfig, KeyStrategy};
pub use empty::{Empty, EmptyResponse};
pub use error::{ApiError, Cause, DecodeError, ErrorPayload, TransportError};
pub use resolve::{resolve, resolve_expecting_body};
pub use response::{Outcome, ResponseEnvelope, ResponseMetadata};
pub use transport::{StatusPolicy, Transport, TransportResponse};

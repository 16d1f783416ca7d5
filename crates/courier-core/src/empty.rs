use serde::{Deserialize, Serialize};

/// Types with a designated value for a success response that carries no body
///
/// Only types implementing this can be used where an empty body is accepted,
/// so a missing sentinel is a compile error rather than a runtime failure.
pub trait EmptyResponse {
    fn empty_value() -> Self;
}

/// Marker for endpoints that return nothing useful
///
/// Also decodes from any JSON object, so `{}` bodies are accepted too.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Empty {}

impl EmptyResponse for Empty {
    fn empty_value() -> Self {
        Self {}
    }
}

impl EmptyResponse for () {
    fn empty_value() -> Self {}
}

impl<T> EmptyResponse for Option<T> {
    fn empty_value() -> Self {
        None
    }
}

impl<T> EmptyResponse for Vec<T> {
    fn empty_value() -> Self {
        Self::new()
    }
}

impl EmptyResponse for serde_json::Value {
    fn empty_value() -> Self {
        Self::Null
    }
}

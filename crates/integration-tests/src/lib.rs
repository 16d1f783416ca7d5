//! End-to-end tests for courier live under `tests/`

//! Unit tests for async_runtime

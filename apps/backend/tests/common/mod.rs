//! Common test utilities for integration tests.
//!
//! Every test gets its own in-process server; no external services are needed.

pub mod fixtures;

use axum_test::TestServer;

use quiz_converter_backend::app;
use quiz_converter_backend::config::Config;

/// Server with the default configuration.
pub fn test_server() -> TestServer {
    test_server_with(Config::default())
}

/// Server with a custom configuration.
pub fn test_server_with(config: Config) -> TestServer {
    TestServer::new(app(&config)).expect("Failed to start test server")
}

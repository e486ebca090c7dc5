//! Host client for the management API.
//!
//! `ManagementClient` owns the transport; resource traits such as
//! [`crate::device_credentials::DeviceCredentials`] are implemented on it
//! and reach the wire through the verb primitives.

use crate::transport::{HttpTransport, Transport};
use std::time::Duration;
use url::Url;

/// Configuration for a [`ManagementClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Root URL of the tenant, e.g. `https://tenant.example.com`
    pub base_url: Url,
    /// Management API token sent as a bearer header when present
    pub token: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl ClientConfig {
    /// Default timeout for API requests
    const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Create a config for the given tenant with no token and the default
    /// timeout.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            token: None,
            timeout: Self::DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Set the management API token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// The host client aggregate for the management API.
///
/// Generic over its transport so tests can substitute a
/// [`crate::transport::MockTransport`]; production code uses
/// [`ManagementClient::new`] which wires up an [`HttpTransport`].
#[derive(Clone)]
pub struct ManagementClient<T: Transport = HttpTransport> {
    transport: T,
}

impl ManagementClient<HttpTransport> {
    /// Build a client over a reqwest transport from the given config.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            transport: HttpTransport::new(config.base_url, config.token, config.timeout),
        }
    }
}

impl<T: Transport> ManagementClient<T> {
    /// Build a client over a custom transport (mocks, instrumented stacks).
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub(crate) fn transport(&self) -> &T {
        &self.transport
    }
}

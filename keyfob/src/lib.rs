//! Client for the device-credentials resource of an identity management API.
//!
//! This crate provides:
//! - A host [`ManagementClient`] that owns the HTTP transport
//! - The [`DeviceCredentials`] trait with the list/create/delete operations
//! - Local validation of enumerated inputs before anything hits the wire
//!
//! Resource operations are thin: they marshal parameters, validate the
//! closed set of credential types and required fields, and delegate to the
//! generic verb primitives behind the [`Transport`] trait. Transport
//! failures (network errors, non-2xx responses) propagate to the caller
//! unmodified; there is no retry or caching layer here.
//!
//! # Example
//! ```ignore
//! use keyfob::{ClientConfig, DeviceCredentials, ListDeviceCredentialsParams, ManagementClient};
//!
//! let config = ClientConfig::new("https://tenant.example.com".parse()?)
//!     .with_token("mgmt-api-token");
//! let client = ManagementClient::new(config);
//!
//! // List rotating refresh tokens for one client application
//! let params = ListDeviceCredentialsParams::builder()
//!     .credential_type("rotating_refresh_token".to_string())
//!     .build();
//! let credentials = client.list_device_credentials(Some("client_abc"), params).await?;
//!
//! // Register a device public key
//! let created = client
//!     .create_device_public_key("laptop", "QmFzZTY0IGtleQ==", "dev_1", "client_abc")
//!     .await?;
//! ```

pub mod client;
pub mod device_credentials;
pub mod error;
pub mod transport;

// Re-export commonly used types
pub use client::{ClientConfig, ManagementClient};
pub use device_credentials::{
    CredentialType, DeviceCredentials, ListDeviceCredentialsParams, DEVICE_CREDENTIALS_PATH,
};
pub use error::{Error, Result};
pub use transport::{HttpTransport, MockTransport, RecordedCall, Transport};

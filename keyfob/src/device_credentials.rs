//! The device-credentials resource of the management API.
//!
//! A device credential is a stored public key, refresh token, or rotating
//! refresh token associated with a client application and optionally a
//! user, used to authenticate a specific device instance. This module
//! exposes the three CRUD operations over that resource; everything here is
//! parameter marshaling and light validation on top of the verb primitives
//! in [`crate::transport`].

use crate::client::ManagementClient;
use crate::error::{Error, Result};
use crate::transport::Transport;
use async_trait::async_trait;
use bon::Builder;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;

/// Collection path for device credentials on the management API.
pub const DEVICE_CREDENTIALS_PATH: &str = "/api/v2/device-credentials";

/// The kinds of credential the API stores for a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialType {
    PublicKey,
    RefreshToken,
    RotatingRefreshToken,
}

impl CredentialType {
    /// Wire name of this credential type.
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialType::PublicKey => "public_key",
            CredentialType::RefreshToken => "refresh_token",
            CredentialType::RotatingRefreshToken => "rotating_refresh_token",
        }
    }
}

impl fmt::Display for CredentialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CredentialType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "public_key" => Ok(CredentialType::PublicKey),
            "refresh_token" => Ok(CredentialType::RefreshToken),
            "rotating_refresh_token" => Ok(CredentialType::RotatingRefreshToken),
            other => Err(Error::InvalidParameter(format!(
                "type must be one of public_key, refresh_token, rotating_refresh_token, got {:?}",
                other
            ))),
        }
    }
}

/// Query options for listing device credentials.
///
/// Every field is optional; absent fields are omitted from the query string
/// entirely. `credential_type` is kept as a string so untrusted input can
/// be forwarded and rejected here with a field-naming error instead of at
/// the call site - see [`CredentialType`] for the allowed values.
///
/// # Example
/// ```ignore
/// let params = ListDeviceCredentialsParams::builder()
///     .user_id("usr_1".to_string())
///     .credential_type("refresh_token".to_string())
///     .include_totals(true)
///     .build();
/// ```
#[derive(Debug, Clone, Default, Builder)]
pub struct ListDeviceCredentialsParams {
    /// Field names to include in (or exclude from) the result, sent
    /// comma-joined as one `fields` value
    pub fields: Option<Vec<String>>,
    /// Whether `fields` lists inclusions (true) or exclusions (false)
    pub include_fields: Option<bool>,
    /// Restrict to credentials owned by this user
    pub user_id: Option<String>,
    /// Credential type filter; must be one of the [`CredentialType`] wire
    /// names when present
    pub credential_type: Option<String>,
    /// Zero-based page index
    pub page: Option<u32>,
    /// Number of results per page
    pub per_page: Option<u32>,
    /// Ask the server to wrap the page in an envelope with a total count
    pub include_totals: Option<bool>,
}

impl ListDeviceCredentialsParams {
    /// Render the present fields as query pairs.
    ///
    /// Validates the type filter against [`CredentialType`] before
    /// anything is assembled, so an invalid filter never reaches the wire.
    fn to_query(&self, client_id: Option<&str>) -> Result<Vec<(String, String)>> {
        if let Some(credential_type) = &self.credential_type {
            credential_type.parse::<CredentialType>()?;
        }

        let mut query = Vec::new();
        if let Some(fields) = &self.fields {
            query.push(("fields".to_string(), fields.join(",")));
        }
        if let Some(include_fields) = self.include_fields {
            query.push(("include_fields".to_string(), include_fields.to_string()));
        }
        if let Some(user_id) = &self.user_id {
            query.push(("user_id".to_string(), user_id.clone()));
        }
        if let Some(client_id) = client_id {
            query.push(("client_id".to_string(), client_id.to_string()));
        }
        if let Some(credential_type) = &self.credential_type {
            query.push(("type".to_string(), credential_type.clone()));
        }
        if let Some(page) = self.page {
            query.push(("page".to_string(), page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            query.push(("per_page".to_string(), per_page.to_string()));
        }
        if let Some(include_totals) = self.include_totals {
            query.push(("include_totals".to_string(), include_totals.to_string()));
        }
        Ok(query)
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::InvalidParameter(format!(
            "{} must not be empty",
            field
        )));
    }
    Ok(())
}

/// CRUD operations over the device-credentials resource.
///
/// Implemented by the host client. Every method is a single
/// request/response exchange; validation happens before anything goes on
/// the wire, and transport failures propagate unmodified.
#[async_trait]
pub trait DeviceCredentials: Send + Sync {
    /// List device credentials, optionally scoped to one client
    /// application.
    ///
    /// Fails with [`Error::InvalidParameter`] - without issuing a request -
    /// when `params.credential_type` is present and not a
    /// [`CredentialType`] wire name. The response shape is whatever the
    /// server returns: a list of credential records, or a totals envelope
    /// when `include_totals` is set.
    async fn list_device_credentials(
        &self,
        client_id: Option<&str>,
        params: ListDeviceCredentialsParams,
    ) -> Result<Value>;

    /// Alias for [`DeviceCredentials::list_device_credentials`].
    async fn device_credentials(
        &self,
        client_id: Option<&str>,
        params: ListDeviceCredentialsParams,
    ) -> Result<Value> {
        self.list_device_credentials(client_id, params).await
    }

    /// Register a public key for a device.
    ///
    /// All four fields are required; the first empty one (checked in
    /// argument order) fails with [`Error::InvalidParameter`] naming that
    /// field, and no request is issued. `value` is the base64-encoded key
    /// material, opaque to this module.
    async fn create_device_public_key(
        &self,
        device_name: &str,
        value: &str,
        device_id: &str,
        client_id: &str,
    ) -> Result<Value>;

    /// Alias for [`DeviceCredentials::create_device_public_key`].
    async fn create_device_credential(
        &self,
        device_name: &str,
        value: &str,
        device_id: &str,
        client_id: &str,
    ) -> Result<Value> {
        self.create_device_public_key(device_name, value, device_id, client_id)
            .await
    }

    /// Remove a device credential by id.
    ///
    /// Fails with [`Error::InvalidParameter`] on an empty id; the response
    /// is typically empty.
    async fn delete_device_credential(&self, id: &str) -> Result<Value>;
}

#[async_trait]
impl<T: Transport> DeviceCredentials for ManagementClient<T> {
    #[tracing::instrument(skip(self, params))]
    async fn list_device_credentials(
        &self,
        client_id: Option<&str>,
        params: ListDeviceCredentialsParams,
    ) -> Result<Value> {
        let query = params.to_query(client_id)?;
        tracing::debug!(pairs = query.len(), "listing device credentials");
        self.transport().get(DEVICE_CREDENTIALS_PATH, &query).await
    }

    #[tracing::instrument(skip(self, value))]
    async fn create_device_public_key(
        &self,
        device_name: &str,
        value: &str,
        device_id: &str,
        client_id: &str,
    ) -> Result<Value> {
        require_non_empty("device_name", device_name)?;
        require_non_empty("value", value)?;
        require_non_empty("device_id", device_id)?;
        require_non_empty("client_id", client_id)?;

        let body = json!({
            "device_name": device_name,
            "type": CredentialType::PublicKey.as_str(),
            "value": value,
            "device_id": device_id,
            "client_id": client_id,
        });
        tracing::debug!("creating device public key");
        self.transport().post(DEVICE_CREDENTIALS_PATH, &body).await
    }

    #[tracing::instrument(skip(self))]
    async fn delete_device_credential(&self, id: &str) -> Result<Value> {
        require_non_empty("id", id)?;
        tracing::debug!("deleting device credential");
        self.transport()
            .delete(&format!("{}/{}", DEVICE_CREDENTIALS_PATH, id))
            .await
    }
}

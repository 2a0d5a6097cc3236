//! Remote settings gateway
//!
//! The form only ever talks to the backend through [`SettingsGateway`]. The
//! in-memory implementation stands in for a real service.

use async_trait::async_trait;
use thiserror::Error;

use crate::settings::{SettingsDocument, SettingsPatch};

mod memory;
pub use memory::{FailureMode, InMemoryGateway};

#[derive(Debug, Error)]
pub enum GatewayError {
    /// Transport or server failure
    #[error("settings service unavailable: {0}")]
    Unavailable(String),

    /// The backend refused the request
    #[error("settings update rejected: {0}")]
    Rejected(String),

    #[error("settings document could not be (de)serialized: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Fetch and persist the notification settings document. No retries.
#[async_trait]
pub trait SettingsGateway: Send + Sync {
    async fn fetch(&self) -> Result<SettingsDocument, GatewayError>;

    /// Apply a replace-only patch and return the resulting settings
    async fn save(&self, patch: &SettingsPatch) -> Result<SettingsDocument, GatewayError>;
}

//! In-memory settings backend with simulated latency

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{info, warn};

use super::{GatewayError, SettingsGateway};
use crate::constants::gateway::{FETCH_DELAY_MS, SAVE_DELAY_MS};
use crate::settings::{AccountConfig, SettingsDocument, SettingsPatch};

/// Which calls the mock backend should fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FailureMode {
    #[default]
    Never,
    Fetch,
    Save,
    Always,
}

impl FailureMode {
    fn fails_fetch(self) -> bool {
        matches!(self, FailureMode::Fetch | FailureMode::Always)
    }

    fn fails_save(self) -> bool {
        matches!(self, FailureMode::Save | FailureMode::Always)
    }
}

pub struct InMemoryGateway {
    account: Mutex<AccountConfig>,
    fetch_delay: Duration,
    save_delay: Duration,
    failure: FailureMode,
}

impl InMemoryGateway {
    pub fn new(account: AccountConfig) -> Self {
        Self {
            account: Mutex::new(account),
            fetch_delay: Duration::from_millis(FETCH_DELAY_MS),
            save_delay: Duration::from_millis(SAVE_DELAY_MS),
            failure: FailureMode::Never,
        }
    }

    pub fn with_latency(mut self, fetch_delay: Duration, save_delay: Duration) -> Self {
        self.fetch_delay = fetch_delay;
        self.save_delay = save_delay;
        self
    }

    pub fn with_failure(mut self, failure: FailureMode) -> Self {
        self.failure = failure;
        self
    }

    /// Current backend document
    pub async fn snapshot(&self) -> AccountConfig {
        self.account.lock().await.clone()
    }
}

impl Default for InMemoryGateway {
    fn default() -> Self {
        Self::new(AccountConfig::sample())
    }
}

#[async_trait]
impl SettingsGateway for InMemoryGateway {
    async fn fetch(&self) -> Result<SettingsDocument, GatewayError> {
        tokio::time::sleep(self.fetch_delay).await;
        if self.failure.fails_fetch() {
            warn!("Simulated fetch failure");
            return Err(GatewayError::Unavailable("simulated fetch failure".to_string()));
        }

        let account = self.account.lock().await;
        info!(account_id = %account.account_id, "Served settings fetch");
        Ok(SettingsDocument::from(&*account))
    }

    async fn save(&self, patch: &SettingsPatch) -> Result<SettingsDocument, GatewayError> {
        tokio::time::sleep(self.save_delay).await;
        if self.failure.fails_save() {
            warn!("Simulated save failure");
            return Err(GatewayError::Unavailable("simulated save failure".to_string()));
        }

        let mut account = self.account.lock().await;
        let updated = patch.apply(&account)?;
        *account = updated;
        info!(
            account_id = %account.account_id,
            operations = patch.operations().len(),
            "Applied settings patch"
        );
        Ok(SettingsDocument::from(&*account))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::paths;
    use crate::settings::{BatchingInterval, PatchOperation};

    #[tokio::test(start_paused = true)]
    async fn test_fetch_returns_projection_after_delay() {
        let gateway = InMemoryGateway::default();
        let started = tokio::time::Instant::now();
        let doc = gateway.fetch().await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(FETCH_DELAY_MS));
        assert!(doc.send_digests);
        assert_eq!(doc.alert_batching_interval_hours, BatchingInterval::OneHour);
    }

    #[tokio::test(start_paused = true)]
    async fn test_save_persists_patch() {
        let gateway = InMemoryGateway::default().with_latency(Duration::ZERO, Duration::ZERO);
        let patch = SettingsPatch(vec![
            PatchOperation::replace(paths::SEND_DIGESTS, false),
            PatchOperation::replace(paths::BATCHING_INTERVAL, 12),
        ]);

        let doc = gateway.save(&patch).await.unwrap();
        assert!(!doc.send_digests);
        assert_eq!(doc.alert_batching_interval_hours, BatchingInterval::TwelveHours);

        let refetched = gateway.fetch().await.unwrap();
        assert_eq!(refetched, doc);

        let snapshot = gateway.snapshot().await;
        assert_eq!(snapshot.storage_region, "US");
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejected_patch_leaves_document_untouched() {
        let gateway = InMemoryGateway::default().with_latency(Duration::ZERO, Duration::ZERO);
        let before = gateway.snapshot().await;
        let patch = SettingsPatch(vec![
            PatchOperation::replace(paths::SEND_DIGESTS, false),
            PatchOperation::replace("/accountId", "other"),
        ]);

        assert!(matches!(gateway.save(&patch).await, Err(GatewayError::Rejected(_))));
        assert_eq!(gateway.snapshot().await, before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_injection() {
        let gateway = InMemoryGateway::default()
            .with_latency(Duration::ZERO, Duration::ZERO)
            .with_failure(FailureMode::Save);
        assert!(gateway.fetch().await.is_ok());
        assert!(matches!(
            gateway.save(&SettingsPatch::default()).await,
            Err(GatewayError::Unavailable(_))
        ));

        let gateway = InMemoryGateway::default()
            .with_latency(Duration::ZERO, Duration::ZERO)
            .with_failure(FailureMode::Always);
        assert!(gateway.fetch().await.is_err());
    }
}

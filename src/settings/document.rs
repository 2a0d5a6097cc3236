//! Remote account configuration and the flat settings view the form edits
//!
//! `AccountConfig` mirrors the document the backend stores, with optional
//! nested sections. `SettingsDocument` is the projection of it that the
//! notification form cares about, with defaults applied for absent fields.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Alert batching window offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum BatchingInterval {
    /// No batching, alerts go out immediately
    #[default]
    Realtime,
    OneHour,
    ThreeHours,
    SixHours,
    TwelveHours,
}

impl BatchingInterval {
    /// Every selectable interval, in menu order
    pub const ALL: [BatchingInterval; 5] = [
        BatchingInterval::Realtime,
        BatchingInterval::OneHour,
        BatchingInterval::ThreeHours,
        BatchingInterval::SixHours,
        BatchingInterval::TwelveHours,
    ];

    pub fn hours(self) -> u32 {
        match self {
            BatchingInterval::Realtime => 0,
            BatchingInterval::OneHour => 1,
            BatchingInterval::ThreeHours => 3,
            BatchingInterval::SixHours => 6,
            BatchingInterval::TwelveHours => 12,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BatchingInterval::Realtime => "Realtime",
            BatchingInterval::OneHour => "1 hour",
            BatchingInterval::ThreeHours => "3 hours",
            BatchingInterval::SixHours => "6 hours",
            BatchingInterval::TwelveHours => "12 hours",
        }
    }
}

/// Raised when an hour count is not one of the selectable intervals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnsupportedInterval(pub u32);

impl fmt::Display for UnsupportedInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported batching interval: {} hours", self.0)
    }
}

impl std::error::Error for UnsupportedInterval {}

impl TryFrom<u32> for BatchingInterval {
    type Error = UnsupportedInterval;

    fn try_from(hours: u32) -> Result<Self, Self::Error> {
        BatchingInterval::ALL
            .into_iter()
            .find(|interval| interval.hours() == hours)
            .ok_or(UnsupportedInterval(hours))
    }
}

impl From<BatchingInterval> for u32 {
    fn from(interval: BatchingInterval) -> Self {
        interval.hours()
    }
}

/// Result filtering preferences (not edited by this form)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResultConfiguration {
    pub confidence_threshold: f64,
    pub show_sensitive_only: bool,
}

/// End-user alert section of the account document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlertConfiguration {
    pub end_user_alerts_last_modified_threshold_in_minutes: u32,
    pub notifier_ids: Vec<String>,
    pub send_end_user_alerts: Option<bool>,
    pub send_remediation_alerts: Option<bool>,
    /// Raw hour count; anything outside the selectable set is tolerated on read
    pub alerts_batching_hourly_interval: Option<u32>,
}

/// Admin digest section of the account document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DigestConfiguration {
    pub digest_hourly_interval: u32,
    pub email_destinations: Option<Vec<String>>,
    pub finding_confidence_threshold: f64,
    pub notifier_ids: Vec<String>,
    pub send_digests: Option<bool>,
}

/// Full account configuration as held by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountConfig {
    pub account_id: String,
    #[serde(default)]
    pub preview_expiration_days: u32,
    #[serde(default)]
    pub report_expiration_days: Option<u32>,
    #[serde(default)]
    pub limit_mode: String,
    #[serde(default)]
    pub result_configuration: Option<ResultConfiguration>,
    #[serde(default)]
    pub alert_configuration: Option<AlertConfiguration>,
    #[serde(default)]
    pub digest_configuration: Option<DigestConfiguration>,
    #[serde(default)]
    pub storage_region: String,
    #[serde(default)]
    pub onboarded_time: String,
}

impl AccountConfig {
    /// Seed account served by the in-memory backend
    pub fn sample() -> Self {
        Self {
            account_id: "dfsdsdsdsdsd".to_string(),
            preview_expiration_days: 0,
            report_expiration_days: None,
            limit_mode: "Normal".to_string(),
            result_configuration: Some(ResultConfiguration {
                confidence_threshold: 0.8,
                show_sensitive_only: true,
            }),
            alert_configuration: Some(AlertConfiguration {
                end_user_alerts_last_modified_threshold_in_minutes: 60,
                notifier_ids: Vec::new(),
                send_end_user_alerts: Some(true),
                send_remediation_alerts: Some(true),
                alerts_batching_hourly_interval: Some(1),
            }),
            digest_configuration: Some(DigestConfiguration {
                digest_hourly_interval: 24,
                email_destinations: Some(Vec::new()),
                finding_confidence_threshold: 0.8,
                notifier_ids: Vec::new(),
                send_digests: Some(true),
            }),
            storage_region: "US".to_string(),
            onboarded_time: "2024-10-01T13:27:51.08Z".to_string(),
        }
    }
}

/// Notification settings the form reads and writes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsDocument {
    pub send_digests: bool,
    pub digest_recipients: Vec<String>,
    pub send_end_user_alerts: bool,
    pub send_remediation_alerts: bool,
    pub alert_batching_interval_hours: BatchingInterval,
}

impl Default for SettingsDocument {
    fn default() -> Self {
        Self {
            send_digests: false,
            digest_recipients: Vec::new(),
            send_end_user_alerts: true,
            send_remediation_alerts: true,
            alert_batching_interval_hours: BatchingInterval::Realtime,
        }
    }
}

/// Absent fields take the form defaults; a fetched `false` for either alert
/// flag is kept rather than replaced with `true`.
impl From<&AccountConfig> for SettingsDocument {
    fn from(config: &AccountConfig) -> Self {
        let defaults = SettingsDocument::default();
        let digest = config.digest_configuration.as_ref();
        let alert = config.alert_configuration.as_ref();

        let alert_batching_interval_hours = match alert.and_then(|a| a.alerts_batching_hourly_interval) {
            None => defaults.alert_batching_interval_hours,
            Some(hours) => BatchingInterval::try_from(hours).unwrap_or_else(|err| {
                warn!(hours, error = %err, "Unknown batching interval from backend, using realtime");
                BatchingInterval::Realtime
            }),
        };

        Self {
            send_digests: digest
                .and_then(|d| d.send_digests)
                .unwrap_or(defaults.send_digests),
            digest_recipients: digest
                .and_then(|d| d.email_destinations.clone())
                .unwrap_or_default(),
            send_end_user_alerts: alert
                .and_then(|a| a.send_end_user_alerts)
                .unwrap_or(defaults.send_end_user_alerts),
            send_remediation_alerts: alert
                .and_then(|a| a.send_remediation_alerts)
                .unwrap_or(defaults.send_remediation_alerts),
            alert_batching_interval_hours,
        }
    }
}

//! Application-wide constants
//!
//! This module contains the magic numbers and string literals used throughout
//! the application, providing a single source of truth for constant values.

/// Config file location
pub mod config {
    /// Directory under the platform config dir
    pub const APP_DIR: &str = "email-settings";

    /// TOML file name inside `APP_DIR`
    pub const FILENAME: &str = "config.toml";
}

/// Simulated backend latency
pub mod gateway {
    /// Delay before a fetch resolves
    pub const FETCH_DELAY_MS: u64 = 1000;

    /// Delay before a save resolves
    pub const SAVE_DELAY_MS: u64 = 500;

    /// Upper bound accepted from config for either delay
    pub const MAX_DELAY_MS: u64 = 60_000;
}

/// Result banner timing
pub mod banner {
    /// Time the save result banner stays up before it is dismissed
    pub const DISMISS_MS: u64 = 5000;

    pub const MIN_DISMISS_MS: u64 = 500;
    pub const MAX_DISMISS_MS: u64 = 60_000;
}

/// Messages written into the store when the gateway fails
pub mod messages {
    pub const FETCH_FAILED: &str = "Failed to fetch email settings";
    pub const SAVE_FAILED: &str = "Failed to update email settings";
}

/// JSON pointer paths accepted by the settings patch
pub mod paths {
    pub const SEND_DIGESTS: &str = "/digestConfiguration/sendDigests";
    pub const EMAIL_DESTINATIONS: &str = "/digestConfiguration/emailDestinations";
    pub const SEND_END_USER_ALERTS: &str = "/alertConfiguration/sendEndUserAlerts";
    pub const SEND_REMEDIATION_ALERTS: &str = "/alertConfiguration/sendRemediationAlerts";
    pub const BATCHING_INTERVAL: &str = "/alertConfiguration/alertsBatchingHourlyInterval";
}

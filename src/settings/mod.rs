//! Notification settings data model
//!
//! - **document**: remote account configuration and its flat settings view
//! - **patch**: replace-only updates built from the form and applied by the backend

pub mod document;
pub mod patch;

// Re-export commonly used types
pub use document::{AccountConfig, BatchingInterval, SettingsDocument};
pub use patch::{parse_recipients, PatchOperation, SettingsPatch};

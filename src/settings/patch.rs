//! Sparse replace-only updates sent to the backend on save

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::document::AccountConfig;
use crate::constants::paths;
use crate::gateway::GatewayError;
use crate::store::FormState;

/// Paths a patch may touch
const ALLOWED_PATHS: [&str; 5] = [
    paths::SEND_DIGESTS,
    paths::SEND_END_USER_ALERTS,
    paths::SEND_REMEDIATION_ALERTS,
    paths::BATCHING_INTERVAL,
    paths::EMAIL_DESTINATIONS,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    Replace,
}

/// One `{ path, op, value }` triple
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchOperation {
    pub path: String,
    pub op: PatchOp,
    pub value: Value,
}

impl PatchOperation {
    pub fn replace(path: &str, value: impl Into<Value>) -> Self {
        Self {
            path: path.to_string(),
            op: PatchOp::Replace,
            value: value.into(),
        }
    }
}

/// Ordered list of replace operations
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingsPatch(pub Vec<PatchOperation>);

/// Split raw editor text into trimmed, non-empty recipient lines
pub fn parse_recipients(text: &str) -> Vec<String> {
    text.lines()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

impl SettingsPatch {
    /// Build the patch persisted for the current form values.
    /// The recipient list is replaced wholesale and is empty unless the editor is shown.
    pub fn from_form(state: &FormState) -> Self {
        let recipients = if state.show_recipients_editor && !state.recipients_text.trim().is_empty() {
            parse_recipients(&state.recipients_text)
        } else {
            Vec::new()
        };

        SettingsPatch(vec![
            PatchOperation::replace(paths::SEND_DIGESTS, state.send_digests),
            PatchOperation::replace(paths::SEND_END_USER_ALERTS, state.send_end_user_alerts),
            PatchOperation::replace(paths::SEND_REMEDIATION_ALERTS, state.send_remediation_alerts),
            PatchOperation::replace(paths::BATCHING_INTERVAL, state.alert_batching_interval_hours.hours()),
            PatchOperation::replace(paths::EMAIL_DESTINATIONS, recipients),
        ])
    }

    pub fn operations(&self) -> &[PatchOperation] {
        &self.0
    }

    /// Value the patch assigns to `path`, if any (last write wins)
    pub fn value_at(&self, path: &str) -> Option<&Value> {
        self.0.iter().rev().find(|op| op.path == path).map(|op| &op.value)
    }

    /// Apply every operation to a copy of `config`.
    /// Missing sections are created; unknown paths reject the whole patch.
    pub fn apply(&self, config: &AccountConfig) -> Result<AccountConfig, GatewayError> {
        let mut root = serde_json::to_value(config)?;

        for operation in &self.0 {
            if !ALLOWED_PATHS.contains(&operation.path.as_str()) {
                return Err(GatewayError::Rejected(format!(
                    "path not writable: {}",
                    operation.path
                )));
            }
            let Some((section, field)) = operation.path.trim_start_matches('/').split_once('/') else {
                return Err(GatewayError::Rejected(format!("malformed path: {}", operation.path)));
            };

            let object = root
                .as_object_mut()
                .ok_or_else(|| GatewayError::Rejected("account document is not an object".to_string()))?;
            let entry = object.entry(section).or_insert(Value::Null);
            if entry.is_null() {
                *entry = Value::Object(Map::new());
            }
            let section_object = entry
                .as_object_mut()
                .ok_or_else(|| GatewayError::Rejected(format!("section {section} is not an object")))?;

            match operation.op {
                PatchOp::Replace => {
                    section_object.insert(field.to_string(), operation.value.clone());
                }
            }
        }

        Ok(serde_json::from_value(root)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{BatchingInterval, SettingsDocument};
    use serde_json::json;

    fn form(show_editor: bool, text: &str) -> FormState {
        FormState {
            send_digests: true,
            show_recipients_editor: show_editor,
            recipients_text: text.to_string(),
            alert_batching_interval_hours: BatchingInterval::ThreeHours,
            ..FormState::default()
        }
    }

    #[test]
    fn test_parse_recipients_trims_and_skips_blank_lines() {
        let parsed = parse_recipients("  a@example.com \n\n\tb@example.com\n   \n");
        assert_eq!(parsed, vec!["a@example.com", "b@example.com"]);
    }

    #[test]
    fn test_from_form_splits_recipient_lines() {
        let patch = SettingsPatch::from_form(&form(true, "a@example.com\nb@example.com"));
        assert_eq!(
            patch.value_at(paths::EMAIL_DESTINATIONS),
            Some(&json!(["a@example.com", "b@example.com"]))
        );
        assert_eq!(patch.value_at(paths::BATCHING_INTERVAL), Some(&json!(3)));
        assert_eq!(patch.operations().len(), 5);
    }

    #[test]
    fn test_from_form_hidden_editor_sends_empty_list() {
        let patch = SettingsPatch::from_form(&form(false, "a@example.com"));
        assert_eq!(patch.value_at(paths::EMAIL_DESTINATIONS), Some(&json!([])));

        let patch = SettingsPatch::from_form(&form(true, "   \n "));
        assert_eq!(patch.value_at(paths::EMAIL_DESTINATIONS), Some(&json!([])));
    }

    #[test]
    fn test_wire_format_is_path_op_value_triples() {
        let patch = SettingsPatch(vec![PatchOperation::replace(paths::SEND_DIGESTS, false)]);
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(
            json,
            json!([{ "path": "/digestConfiguration/sendDigests", "op": "replace", "value": false }])
        );

        let bad = r#"[{ "path": "/digestConfiguration/sendDigests", "op": "add", "value": true }]"#;
        assert!(serde_json::from_str::<SettingsPatch>(bad).is_err());
    }

    #[test]
    fn test_apply_replaces_fields_and_keeps_the_rest() {
        let config = AccountConfig::sample();
        let patch = SettingsPatch::from_form(&form(true, "a@example.com\nb@example.com"));
        let updated = patch.apply(&config).unwrap();

        let doc = SettingsDocument::from(&updated);
        assert_eq!(doc.digest_recipients, vec!["a@example.com", "b@example.com"]);
        assert_eq!(doc.alert_batching_interval_hours, BatchingInterval::ThreeHours);

        let digest = updated.digest_configuration.unwrap();
        assert_eq!(digest.digest_hourly_interval, 24);
        assert_eq!(updated.account_id, config.account_id);
        assert_eq!(updated.storage_region, "US");
    }

    #[test]
    fn test_apply_replaces_recipient_list_wholesale() {
        let mut config = AccountConfig::sample();
        if let Some(digest) = config.digest_configuration.as_mut() {
            digest.email_destinations = Some(vec!["old@example.com".to_string()]);
        }
        let patch = SettingsPatch(vec![PatchOperation::replace(
            paths::EMAIL_DESTINATIONS,
            vec!["new@example.com"],
        )]);
        let updated = patch.apply(&config).unwrap();
        assert_eq!(
            updated.digest_configuration.unwrap().email_destinations,
            Some(vec!["new@example.com".to_string()])
        );
    }

    #[test]
    fn test_apply_creates_missing_section() {
        let config: AccountConfig = serde_json::from_str(r#"{ "accountId": "abc" }"#).unwrap();
        let patch = SettingsPatch(vec![PatchOperation::replace(paths::SEND_REMEDIATION_ALERTS, false)]);
        let updated = patch.apply(&config).unwrap();
        let alert = updated.alert_configuration.unwrap();
        assert_eq!(alert.send_remediation_alerts, Some(false));
        assert!(updated.digest_configuration.is_none());
    }

    #[test]
    fn test_apply_rejects_unknown_path() {
        let patch = SettingsPatch(vec![PatchOperation::replace("/storageRegion", "EU")]);
        let err = patch.apply(&AccountConfig::sample()).unwrap_err();
        assert!(matches!(err, GatewayError::Rejected(_)));
    }

    #[test]
    fn test_apply_wrong_value_type_is_serialization_error() {
        let patch = SettingsPatch(vec![PatchOperation::replace(paths::SEND_DIGESTS, "yes")]);
        let err = patch.apply(&AccountConfig::sample()).unwrap_err();
        assert!(matches!(err, GatewayError::Serialization(_)));
    }
}

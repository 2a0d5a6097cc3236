//! Recipient list validation

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

use crate::store::FormState;

/// Local part (dot-atoms or a quoted string), then either a bracketed IPv4
/// literal or a dotted domain ending in an alphabetic label of 2+ chars
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#,
    )
    .expect("email pattern is a valid regex")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no recipient addresses entered")]
    EmptyRecipients,

    #[error("invalid recipient address(es): {}", .0.join(", "))]
    InvalidRecipients(Vec<String>),
}

pub fn is_email(candidate: &str) -> bool {
    EMAIL_PATTERN.is_match(candidate)
}

/// Check the recipient list of `state`.
///
/// Recipients only matter while digests are on and the editor is shown; in any
/// other case this succeeds regardless of the text. A single bad line rejects
/// the whole list.
pub fn validate(state: &FormState) -> Result<(), ValidationError> {
    if !state.show_recipients_editor || !state.send_digests {
        return Ok(());
    }
    if state.recipients_text.trim().is_empty() {
        return Err(ValidationError::EmptyRecipients);
    }

    let invalid: Vec<String> = state
        .recipients_text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !is_email(line))
        .map(str::to_string)
        .collect();

    if invalid.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::InvalidRecipients(invalid))
    }
}

pub fn is_valid(state: &FormState) -> bool {
    validate(state).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(send_digests: bool, show_editor: bool, text: &str) -> FormState {
        FormState {
            send_digests,
            show_recipients_editor: show_editor,
            recipients_text: text.to_string(),
            ..FormState::default()
        }
    }

    #[test]
    fn test_email_pattern_accepts_common_forms() {
        for address in [
            "a@example.com",
            "first.last@sub.example.co.uk",
            "ops+alerts@example.io",
            "\"quoted name\"@example.com",
            "root@[192.168.0.1]",
            "x@my-host.example.org",
        ] {
            assert!(is_email(address), "expected valid: {address}");
        }
    }

    #[test]
    fn test_email_pattern_rejects_malformed() {
        for address in [
            "not-an-email",
            "missing-at.example.com",
            "a@localhost",
            "a@example.c",
            "a..b@example.com",
            ".a@example.com",
            "a b@example.com",
            "a@exa_mple.com",
            "a@@example.com",
            "<a>@example.com",
            "",
        ] {
            assert!(!is_email(address), "expected invalid: {address}");
        }
    }

    #[test]
    fn test_irrelevant_recipients_are_always_valid() {
        assert!(is_valid(&state(false, true, "not-an-email")));
        assert!(is_valid(&state(true, false, "not-an-email")));
        assert!(is_valid(&state(false, false, "")));
    }

    #[test]
    fn test_empty_or_whitespace_text_is_invalid() {
        assert_eq!(validate(&state(true, true, "")), Err(ValidationError::EmptyRecipients));
        assert_eq!(validate(&state(true, true, "  \n\t ")), Err(ValidationError::EmptyRecipients));
    }

    #[test]
    fn test_all_lines_must_match() {
        assert!(is_valid(&state(true, true, "a@example.com\n  b@example.com  ")));
        assert!(is_valid(&state(true, true, "a@example.com\n\nb@example.com\n")));

        let result = validate(&state(true, true, "a@example.com\nnot-an-email\nb@example"));
        assert_eq!(
            result,
            Err(ValidationError::InvalidRecipients(vec![
                "not-an-email".to_string(),
                "b@example".to_string(),
            ]))
        );
    }

    #[test]
    fn test_error_message_lists_offending_lines() {
        let err = ValidationError::InvalidRecipients(vec!["x".to_string(), "y".to_string()]);
        assert_eq!(err.to_string(), "invalid recipient address(es): x, y");
    }
}

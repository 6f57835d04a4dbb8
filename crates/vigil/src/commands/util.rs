//! Shared helpers for command handlers.

use std::io::IsTerminal;

use chrono::{DateTime, Utc};

use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal on stdin there is nobody to ask, so the action is
/// refused unless `--yes` was given.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Parse an RFC 3339 timestamp flag such as `--since`.
pub fn parse_timestamp(field: &str, raw: Option<&str>) -> Result<Option<DateTime<Utc>>, CliError> {
    raw.map(|value| {
        DateTime::parse_from_rfc3339(value)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(|e| CliError::Validation {
                field: field.into(),
                reason: format!("expected an RFC 3339 timestamp, got '{value}' ({e})"),
            })
    })
    .transpose()
}

/// Render a bool as a short on/off marker for tables.
pub fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_offsets_into_utc() {
        let ts = parse_timestamp("since", Some("2024-05-01T12:00:00+02:00"))
            .unwrap()
            .unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn missing_timestamp_is_none() {
        assert!(parse_timestamp("until", None).unwrap().is_none());
    }

    #[test]
    fn malformed_timestamp_is_a_validation_error() {
        let err = parse_timestamp("since", Some("yesterday")).unwrap_err();
        assert!(matches!(err, CliError::Validation { ref field, .. } if field == "since"));
    }

    #[test]
    fn confirm_with_yes_skips_the_prompt() {
        assert!(confirm("Delete?", "delete", true).unwrap());
    }
}

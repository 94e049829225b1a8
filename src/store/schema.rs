use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::config::Config;
use crate::engine::history::CompletionHistory;
use crate::session::profile::Profile;

pub const PROFILE_KEY: &str = "playerProfile";
pub const HISTORY_KEY: &str = "trainingHistory";

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),
}

#[derive(Debug)]
pub enum DefaultReason {
    Missing,
    Malformed(DecodeError),
}

/// Outcome of reading a stored blob. Decoding never fails outright: a missing
/// or unreadable value falls back to the default and says why.
#[derive(Debug)]
pub enum Decoded<T> {
    Loaded(T),
    Defaulted { value: T, reason: DefaultReason },
}

impl<T> Decoded<T> {
    pub fn into_value(self) -> T {
        match self {
            Decoded::Loaded(value) | Decoded::Defaulted { value, .. } => value,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Decoded::Loaded(_))
    }
}

pub fn decode_profile(raw: Option<&str>) -> Decoded<Profile> {
    let Some(raw) = raw else {
        return Decoded::Defaulted {
            value: Profile::default(),
            reason: DefaultReason::Missing,
        };
    };
    let value: serde_json::Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            return Decoded::Defaulted {
                value: Profile::default(),
                reason: DefaultReason::Malformed(e.into()),
            };
        }
    };
    let Some(fields) = value.as_object() else {
        return Decoded::Defaulted {
            value: Profile::default(),
            reason: DefaultReason::Malformed(DecodeError::NotAnObject(json_kind(&value))),
        };
    };
    // Each field falls back on its own, so one bad value keeps the rest.
    let defaults = Profile::default();
    Decoded::Loaded(Profile {
        age: profile_field(fields, "age", defaults.age),
        level: profile_field(fields, "level", defaults.level),
        position: profile_field(fields, "position", defaults.position),
    })
}

fn profile_field<T: DeserializeOwned>(
    fields: &serde_json::Map<String, serde_json::Value>,
    name: &'static str,
    default: T,
) -> T {
    let Some(raw) = fields.get(name) else {
        return default;
    };
    match T::deserialize(raw) {
        Ok(value) => value,
        Err(e) => {
            warn!(field = name, error = %e, "unreadable profile field, using default");
            default
        }
    }
}

pub fn decode_history(raw: Option<&str>) -> Decoded<CompletionHistory> {
    let Some(raw) = raw else {
        return Decoded::Defaulted {
            value: CompletionHistory::default(),
            reason: DefaultReason::Missing,
        };
    };
    let value: serde_json::Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            return Decoded::Defaulted {
                value: CompletionHistory::default(),
                reason: DefaultReason::Malformed(e.into()),
            };
        }
    };
    if !value.is_object() {
        return Decoded::Defaulted {
            value: CompletionHistory::default(),
            reason: DefaultReason::Malformed(DecodeError::NotAnObject(json_kind(&value))),
        };
    }
    let (history, unparsed) = CompletionHistory::from_json_lenient(&value);
    if unparsed > 0 {
        warn!(unparsed, "history entries with malformed dates kept but not counted");
    }
    Decoded::Loaded(history)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

pub fn encode_profile(profile: &Profile) -> serde_json::Result<String> {
    serde_json::to_string(profile)
}

pub fn encode_history(history: &CompletionHistory) -> serde_json::Result<String> {
    serde_json::to_string(history)
}

pub const EXPORT_VERSION: u32 = 1;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExportData {
    pub pitchside_export_version: u32,
    pub exported_at: DateTime<Utc>,
    pub config: Config,
    pub profile: Profile,
    pub history: CompletionHistory,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::catalog::Level;
    use crate::session::profile::{AgeGroup, Position};
    use chrono::NaiveDate;

    #[test]
    fn test_missing_profile_defaults() {
        let decoded = decode_profile(None);
        assert!(matches!(
            decoded,
            Decoded::Defaulted {
                reason: DefaultReason::Missing,
                ..
            }
        ));
        assert_eq!(decoded.into_value(), Profile::default());
    }

    #[test]
    fn test_truncated_profile_defaults() {
        let decoded = decode_profile(Some(r#"{"age":"adult","lev"#));
        assert!(matches!(
            decoded,
            Decoded::Defaulted {
                reason: DefaultReason::Malformed(DecodeError::Json(_)),
                ..
            }
        ));
        assert_eq!(decoded.into_value(), Profile::default());
    }

    #[test]
    fn test_unknown_level_keeps_other_fields() {
        let decoded =
            decode_profile(Some(r#"{"age":"adult","level":"expert","position":"forward"}"#));
        assert!(decoded.is_loaded());
        let profile = decoded.into_value();
        assert_eq!(profile.age, AgeGroup::Adult);
        assert_eq!(profile.level, Level::Beginner);
        assert_eq!(profile.position, Position::Forward);
    }

    #[test]
    fn test_partial_profile_fills_missing_fields() {
        let profile = decode_profile(Some(r#"{"level":"advanced","extra":1}"#)).into_value();
        assert_eq!(
            profile,
            Profile {
                level: Level::Advanced,
                ..Profile::default()
            }
        );
    }

    #[test]
    fn test_non_object_profile_defaults() {
        let decoded = decode_profile(Some(r#""advanced""#));
        assert!(matches!(
            decoded,
            Decoded::Defaulted {
                reason: DefaultReason::Malformed(DecodeError::NotAnObject("a string")),
                ..
            }
        ));
    }

    #[test]
    fn test_profile_roundtrip() {
        let profile = Profile {
            age: AgeGroup::Youth,
            level: Level::Intermediate,
            position: Position::Midfielder,
        };
        let raw = encode_profile(&profile).unwrap();
        let decoded = decode_profile(Some(&raw));
        assert!(decoded.is_loaded());
        assert_eq!(decoded.into_value(), profile);
    }

    #[test]
    fn test_history_roundtrip() {
        let mut history = CompletionHistory::new();
        history.record(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(), true);
        history.record(NaiveDate::from_ymd_opt(2026, 10, 17).unwrap(), false);
        let raw = encode_history(&history).unwrap();
        let decoded = decode_history(Some(&raw));
        assert!(decoded.is_loaded());
        assert_eq!(decoded.into_value(), history);
    }

    #[test]
    fn test_truncated_history_defaults() {
        let decoded = decode_history(Some(r#"{"2026-10-18": tr"#));
        assert!(!decoded.is_loaded());
        assert!(decoded.into_value().is_empty());
    }

    #[test]
    fn test_non_object_history_defaults() {
        let decoded = decode_history(Some("[true, false]"));
        match decoded {
            Decoded::Defaulted {
                value,
                reason: DefaultReason::Malformed(DecodeError::NotAnObject(kind)),
            } => {
                assert!(value.is_empty());
                assert_eq!(kind, "an array");
            }
            other => panic!("unexpected decode result: {other:?}"),
        }
    }

    #[test]
    fn test_history_with_bad_entries_still_loads() {
        let decoded = decode_history(Some(r#"{"2026-10-18": true, "garbage": true, "2026-10-17": null}"#));
        assert!(decoded.is_loaded());
        let history = decoded.into_value();
        assert_eq!(history.len(), 2);
        assert_eq!(history.streak(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()), 1);
    }
}

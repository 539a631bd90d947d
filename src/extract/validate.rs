use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::extract::models::{
    CategoryType, ExtractionResult, Status, TIME_FORMAT, Trigger, TriggerType,
};

/// Message used when the model returns a reminder with no trigger at all.
const NO_TRIGGER_MESSAGE: &str = "The reminder has no trigger condition";

#[derive(Debug, Error)]
pub enum ResponseValidationError {
    #[error("model output is not a JSON object: {0}")]
    Malformed(String),
    #[error("model output is missing required field `{0}`")]
    MissingField(&'static str),
    #[error("invalid `{field}` value: {value}")]
    InvalidEnum {
        field: &'static str,
        value: String,
    },
}

/// Validates raw model output against the extraction contract and derives
/// the final `status`/`message` pair.
///
/// Schema violations (unparseable output, missing keys, unknown enum
/// values) fail with a typed error. Business-rule violations (no triggers,
/// a location outside `known_locations`, a time value outside the fixed
/// format) normalize into a `status=error` result instead. Model-supplied
/// `status` and `message` fields are advisory and ignored.
pub fn validate(
    raw: &str,
    known_locations: &[String],
) -> Result<ExtractionResult, ResponseValidationError> {
    let value: Value = serde_json::from_str(strip_code_fences(raw))
        .map_err(|e| ResponseValidationError::Malformed(e.to_string()))?;
    let object = value
        .as_object()
        .ok_or_else(|| ResponseValidationError::Malformed("expected a JSON object".to_string()))?;

    let text = require_str(object, "text")?.to_string();
    let category_type: CategoryType = parse_enum(require_str(object, "categoryType")?, "categoryType")?;

    let entries = object
        .get("triggers")
        .ok_or(ResponseValidationError::MissingField("triggers"))?
        .as_array()
        .ok_or_else(|| ResponseValidationError::Malformed("`triggers` is not an array".to_string()))?;

    let mut triggers = Vec::with_capacity(entries.len());
    for entry in entries {
        let entry = entry.as_object().ok_or_else(|| {
            ResponseValidationError::Malformed("trigger entry is not a JSON object".to_string())
        })?;
        let trigger_type: TriggerType = parse_enum(require_str(entry, "triggerType")?, "triggerType")?;
        let trigger_value = require_str(entry, "triggerValue")?.to_string();
        triggers.push(Trigger {
            trigger_type,
            trigger_value,
        });
    }

    let (status, message) = derive_status(&triggers, known_locations);

    Ok(ExtractionResult {
        text,
        category_type,
        triggers,
        status,
        message,
    })
}

fn require_str<'a>(
    object: &'a Map<String, Value>,
    key: &'static str,
) -> Result<&'a str, ResponseValidationError> {
    object
        .get(key)
        .ok_or(ResponseValidationError::MissingField(key))?
        .as_str()
        .ok_or_else(|| ResponseValidationError::Malformed(format!("expected a string for `{}`", key)))
}

fn parse_enum<T: DeserializeOwned>(
    value: &str,
    field: &'static str,
) -> Result<T, ResponseValidationError> {
    serde_json::from_value(Value::String(value.to_string())).map_err(|_| {
        ResponseValidationError::InvalidEnum {
            field,
            value: value.to_string(),
        }
    })
}

fn derive_status(triggers: &[Trigger], known_locations: &[String]) -> (Status, String) {
    if triggers.is_empty() {
        return (Status::Error, NO_TRIGGER_MESSAGE.to_string());
    }

    for trigger in triggers {
        match trigger.trigger_type {
            TriggerType::Location => {
                if !is_known_location(&trigger.trigger_value, known_locations) {
                    return (
                        Status::Error,
                        format!(
                            "The place \"{}\" is not a known location",
                            trigger.trigger_value
                        ),
                    );
                }
            }
            TriggerType::Time => {
                if NaiveDateTime::parse_from_str(&trigger.trigger_value, TIME_FORMAT).is_err() {
                    return (
                        Status::Error,
                        format!(
                            "The time \"{}\" is not in the format YYYY-MM-DD HH:MM",
                            trigger.trigger_value
                        ),
                    );
                }
            }
        }
    }

    (Status::Success, String::new())
}

// Matching is case-insensitive and whitespace-trimmed; diacritics must
// match literally.
fn is_known_location(value: &str, known_locations: &[String]) -> bool {
    let value = value.trim().to_lowercase();
    known_locations
        .iter()
        .any(|known| known.trim().to_lowercase() == value)
}

fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(inner) = trimmed
        .strip_prefix("```")
        .and_then(|rest| rest.strip_suffix("```"))
    else {
        return trimmed;
    };
    // Drop an optional language tag on the opening fence, e.g. ```json
    let inner = match inner.split_once('\n') {
        Some((first_line, rest)) if !first_line.trim().is_empty() && !first_line.contains('{') => {
            rest
        }
        _ => inner,
    };
    inner.trim()
}

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp format shared by `current_time` and time trigger values.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub user_text: String,
    pub current_time: String,
    #[serde(default)]
    pub known_locations: Vec<String>,
}

impl ExtractRequest {
    /// Checks that `current_time` parses under [`TIME_FORMAT`].
    pub fn parsed_current_time(&self) -> Result<NaiveDateTime, chrono::ParseError> {
        NaiveDateTime::parse_from_str(&self.current_time, TIME_FORMAT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryType {
    Time,
    Location,
    Event,
    Shopping,
    Call,
    Meeting,
    Deadline,
    Health,
    Routine,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerType {
    Time,
    Location,
}

/// A condition that activates a reminder: an absolute time or a known place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trigger {
    pub trigger_type: TriggerType,
    pub trigger_value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// Terminal output of an extraction. `message` is empty iff `status` is
/// `success`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub text: String,
    pub category_type: CategoryType,
    pub triggers: Vec<Trigger>,
    pub status: Status,
    pub message: String,
}

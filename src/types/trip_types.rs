use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// A scalar request field. Callers send budgets and day counts either as
/// JSON numbers or as strings, so both are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TripField {
    Number(serde_json::Number),
    Text(String),
}

impl TripField {
    /// Empty strings and zero count as missing.
    pub fn is_blank(&self) -> bool {
        match self {
            TripField::Text(text) => text.is_empty(),
            TripField::Number(number) => number.as_f64().map_or(true, |n| n == 0.0),
        }
    }
}

impl fmt::Display for TripField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TripField::Number(number) => write!(f, "{}", number),
            TripField::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for TripField {
    fn from(value: &str) -> Self {
        TripField::Text(value.to_string())
    }
}

impl From<u64> for TripField {
    fn from(value: u64) -> Self {
        TripField::Number(value.into())
    }
}

/// Body of `POST /generate`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    /// City the group departs from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_city: Option<TripField>,
    /// Where the group is travelling to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<TripField>,
    /// Total budget in rupees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<TripField>,
    /// Trip length in days
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<TripField>,
    /// Free-form description such as "friends" or "family"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_type: Option<TripField>,
    /// Preferred transport mode such as "train"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport: Option<TripField>,
}

impl TripRequest {
    /// Check that every required field is present and non-blank.
    pub fn validate(&self) -> Result<TripDetails> {
        let from_city = required(&self.from_city)?;
        let destination = required(&self.destination)?;
        let budget = required(&self.budget)?;
        let days = required(&self.days)?;

        Ok(TripDetails {
            from_city,
            destination,
            budget,
            days,
            group_type: descriptive(&self.group_type),
            transport: descriptive(&self.transport),
        })
    }
}

fn required(field: &Option<TripField>) -> Result<String> {
    match field {
        Some(value) if !value.is_blank() => Ok(value.to_string()),
        _ => Err(PlannerError::Validation),
    }
}

fn descriptive(field: &Option<TripField>) -> String {
    field.as_ref().map(ToString::to_string).unwrap_or_default()
}

/// A validated trip request with every field rendered as prompt text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripDetails {
    pub from_city: String,
    pub destination: String,
    pub budget: String,
    pub days: String,
    pub group_type: String,
    pub transport: String,
}

/// Successful response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanResponse {
    pub plan: String,
}

//! Shared types for the ProPlan activity provider.
//!
//! This crate holds the activity identifier used throughout the workspace and
//! the wire types of the Inven!RA integration contract (parameter listing,
//! analytics contract, per-student analytics). It has no knowledge of events
//! or HTTP; both `proplan-events` and `proplan-server` build on it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when constructing shared types from untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    /// The activity identifier was empty.
    #[error("activity identifier must not be empty")]
    EmptyActivityId,
}

/// Identifier of an activity instance, as assigned by Inven!RA.
///
/// Always non-empty. The original string is kept as-is (whitespace
/// included) so that URLs built from it match what the caller sent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ActivityId(String);

impl ActivityId {
    /// Validates and wraps an activity identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TypesError::EmptyActivityId`] if `raw` is empty.
    pub fn parse(raw: &str) -> Result<Self, TypesError> {
        Self::try_from(raw.to_string())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ActivityId {
    type Error = TypesError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(TypesError::EmptyActivityId);
        }
        Ok(Self(value))
    }
}

impl From<ActivityId> for String {
    fn from(id: ActivityId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ActivityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ActivityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A configurable parameter of the activity, as listed by `json_params_url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityParam {
    /// Parameter name.
    pub name: String,
    /// Parameter type label (e.g. `text/plain`, `integer`).
    #[serde(rename = "type")]
    pub kind: String,
}

/// One analytics entry in the analytics contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsDescriptor {
    /// Analytics name (e.g. `decisions_count`).
    pub name: String,
    /// Value type label (e.g. `integer`, `URL`, `text/plain`).
    #[serde(rename = "type")]
    pub kind: String,
}

/// The analytics contract served by `analytics_list_url`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsContract {
    /// Quantitative analytics collected by the activity.
    #[serde(rename = "quantAnalytics", default)]
    pub quant_analytics: Vec<AnalyticsDescriptor>,
    /// Qualitative analytics collected by the activity.
    #[serde(rename = "qualAnalytics", default)]
    pub qual_analytics: Vec<AnalyticsDescriptor>,
}

/// A single analytics value reported for a student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsValue {
    /// Analytics name, matching an [`AnalyticsDescriptor`].
    pub name: String,
    /// Value type label, copied from the descriptor.
    #[serde(rename = "type")]
    pub kind: String,
    /// The value itself: a number, a string, or `null`.
    pub value: serde_json::Value,
}

/// Analytics for one student of an activity instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentAnalytics {
    /// Inven!RA student identifier.
    #[serde(rename = "inveniraStdID")]
    pub invenira_std_id: String,
    /// Quantitative values.
    #[serde(rename = "quantAnalytics")]
    pub quant_analytics: Vec<AnalyticsValue>,
    /// Qualitative values.
    #[serde(rename = "qualAnalytics")]
    pub qual_analytics: Vec<AnalyticsValue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_id_rejects_only_empty_text() {
        assert_eq!(ActivityId::parse(""), Err(TypesError::EmptyActivityId));

        let blank = ActivityId::parse("   ").expect("whitespace is still an id");
        assert_eq!(blank.as_str(), "   ");
    }

    #[test]
    fn activity_id_keeps_original_text() {
        let id = ActivityId::parse("A1").expect("valid id");
        assert_eq!(id.as_str(), "A1");
        assert_eq!(id.to_string(), "A1");
    }

    #[test]
    fn activity_id_deserialization_validates() {
        let ok: ActivityId = serde_json::from_str("\"abc\"").expect("should parse");
        assert_eq!(ok.as_str(), "abc");

        let err = serde_json::from_str::<ActivityId>("\"\"");
        assert!(err.is_err(), "empty id must not deserialize");
    }

    #[test]
    fn contract_uses_invenira_field_names() {
        let contract: AnalyticsContract = serde_json::from_str(
            r#"{"quantAnalytics":[{"name":"decisions_count","type":"integer"}]}"#,
        )
        .expect("contract should parse");

        assert_eq!(contract.quant_analytics.len(), 1);
        assert_eq!(contract.quant_analytics[0].kind, "integer");
        assert!(contract.qual_analytics.is_empty());

        let json = serde_json::to_value(&contract).expect("serialize");
        assert_eq!(json["quantAnalytics"][0]["type"], "integer");
        assert!(json["qualAnalytics"].is_array());
    }
}

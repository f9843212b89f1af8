//! Join request model
//!
//! Applications submitted by prospective candidates and volunteers. The
//! upstream owns their lifecycle; this side only lists, filters and triggers
//! status transitions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of applicant
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ApplicantType {
    Candidate,
    Volunteer,
    /// Any value the upstream sends that this side does not know about
    Other(String),
}

impl ApplicantType {
    /// Label of the "no filter" option in the type select
    pub const ALL_LABEL: &'static str = "All Types";

    pub fn as_str(&self) -> &str {
        match self {
            Self::Candidate => "Candidate",
            Self::Volunteer => "Volunteer",
            Self::Other(s) => s,
        }
    }

    /// Parse a select value; the "all" option and blanks mean no filter.
    pub fn from_filter(value: &str) -> Option<Self> {
        match value.trim() {
            "" | Self::ALL_LABEL => None,
            other => Some(Self::from(other.to_string())),
        }
    }
}

impl From<String> for ApplicantType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Candidate" => Self::Candidate,
            "Volunteer" => Self::Volunteer,
            _ => Self::Other(value),
        }
    }
}

impl From<ApplicantType> for String {
    fn from(value: ApplicantType) -> Self {
        match value {
            ApplicantType::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ApplicantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Review status of a join request
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JoinRequestStatus {
    Pending,
    Accepted,
    Rejected,
    Other(String),
}

impl JoinRequestStatus {
    /// Label of the "no filter" option in the status select
    pub const ALL_LABEL: &'static str = "All Statuses";

    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "Pending",
            Self::Accepted => "Accepted",
            Self::Rejected => "Rejected",
            Self::Other(s) => s,
        }
    }

    pub fn from_filter(value: &str) -> Option<Self> {
        match value.trim() {
            "" | Self::ALL_LABEL => None,
            other => Some(Self::from(other.to_string())),
        }
    }
}

impl From<String> for JoinRequestStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Pending" => Self::Pending,
            "Accepted" => Self::Accepted,
            "Rejected" => Self::Rejected,
            _ => Self::Other(value),
        }
    }
}

impl From<JoinRequestStatus> for String {
    fn from(value: JoinRequestStatus) -> Self {
        match value {
            JoinRequestStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for JoinRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A join request as listed by the admin endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub constituency: String,
    #[serde(rename = "type")]
    pub kind: ApplicantType,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub remarks: String,
    pub status: JoinRequestStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl JoinRequest {
    /// Only pending requests can be opened for review
    pub fn can_view(&self) -> bool {
        self.status == JoinRequestStatus::Pending
    }

    /// Deletion is offered regardless of status
    pub fn can_delete(&self) -> bool {
        true
    }
}

/// Review decision on a join request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    Approve,
    Reject,
}

impl ReviewAction {
    /// Path segment of the upstream endpoint
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
        }
    }
}

impl fmt::Display for ReviewAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.endpoint())
    }
}

/// Body of approve/reject calls
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReviewRequest {
    pub id: String,
}

/// Fields the public form must fill in
pub const REQUIRED_SUBMISSION_FIELDS: [&str; 5] =
    ["fullName", "email", "phone", "constituency", "type"];

/// Public join request form
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequestSubmission {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub constituency: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

/// Names of required fields that are absent or falsy in a raw JSON body.
///
/// Falsy follows the browser form semantics: missing, `null`, `""`,
/// `false` and `0` all count as not provided.
pub fn missing_submission_fields(body: &serde_json::Value) -> Vec<&'static str> {
    REQUIRED_SUBMISSION_FIELDS
        .iter()
        .copied()
        .filter(|field| !body.get(*field).is_some_and(is_truthy))
        .collect()
}

fn is_truthy(value: &serde_json::Value) -> bool {
    use serde_json::Value;
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_join_request_deserializes_upstream_shape() {
        let request: JoinRequest = serde_json::from_value(json!({
            "_id": "66a1",
            "constituency": "North",
            "type": "Volunteer",
            "experience": "3 years",
            "remarks": "",
            "status": "Pending",
            "fullName": "Ada"
        }))
        .unwrap();

        assert_eq!(request.id, "66a1");
        assert_eq!(request.kind, ApplicantType::Volunteer);
        assert_eq!(request.status, JoinRequestStatus::Pending);
        assert_eq!(request.full_name.as_deref(), Some("Ada"));
        assert!(request.can_view());
        assert!(request.can_delete());
    }

    #[test]
    fn test_unknown_status_is_preserved() {
        let status: JoinRequestStatus = serde_json::from_value(json!("OnHold")).unwrap();
        assert_eq!(status, JoinRequestStatus::Other("OnHold".to_string()));
        assert_eq!(serde_json::to_value(&status).unwrap(), json!("OnHold"));
    }

    #[test]
    fn test_view_disabled_unless_pending() {
        for status in ["Accepted", "Rejected"] {
            let request = JoinRequest {
                id: "1".into(),
                constituency: String::new(),
                kind: ApplicantType::Candidate,
                experience: String::new(),
                remarks: String::new(),
                status: JoinRequestStatus::from(status.to_string()),
                full_name: None,
                email: None,
                phone: None,
            };
            assert!(!request.can_view());
            assert!(request.can_delete());
        }
    }

    #[test]
    fn test_filter_labels() {
        assert_eq!(ApplicantType::from_filter("All Types"), None);
        assert_eq!(ApplicantType::from_filter(""), None);
        assert_eq!(ApplicantType::from_filter("Candidate"), Some(ApplicantType::Candidate));
        assert_eq!(JoinRequestStatus::from_filter("All Statuses"), None);
        assert_eq!(JoinRequestStatus::from_filter("Rejected"), Some(JoinRequestStatus::Rejected));
    }

    #[test]
    fn test_missing_submission_fields() {
        let complete = json!({
            "fullName": "Ada", "email": "a@b.c", "phone": "123",
            "constituency": "North", "type": "Candidate"
        });
        assert!(missing_submission_fields(&complete).is_empty());

        let partial = json!({"fullName": "", "email": null, "phone": 0, "type": "Volunteer"});
        assert_eq!(
            missing_submission_fields(&partial),
            vec!["fullName", "email", "phone", "constituency"]
        );

        assert_eq!(missing_submission_fields(&json!([])).len(), 5);
    }

    #[test]
    fn test_submission_serializes_camel_case() {
        let submission = JoinRequestSubmission {
            full_name: "Ada".into(),
            email: "a@b.c".into(),
            phone: "123".into(),
            constituency: "North".into(),
            kind: "Candidate".into(),
            experience: None,
            remarks: Some("hi".into()),
        };
        let value = serde_json::to_value(&submission).unwrap();
        assert!(missing_submission_fields(&value).is_empty());
        assert_eq!(value["remarks"], "hi");
        assert!(value.get("experience").is_none());
    }
}

//! Upstream response envelope
//!
//! Every upstream endpoint answers with the same JSON shape:
//! `{status_code, data, message, pagination: {totalPages, totalItems}}`.
//! All fields are optional on the wire.

use serde::{Deserialize, Serialize};

/// Status code the upstream puts in the body of a successful envelope
pub const ENVELOPE_OK: u16 = 200;

/// Generic response envelope
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T> Envelope<T> {
    /// Whether the body reports success (`status_code == 200`)
    pub fn is_ok(&self) -> bool {
        self.status_code == Some(ENVELOPE_OK)
    }

    /// Whether the body reports any 2xx status, or none at all
    pub fn is_success(&self) -> bool {
        self.status_code.map_or(true, |code| (200..300).contains(&code))
    }

    pub fn total_pages(&self) -> u32 {
        self.pagination
            .as_ref()
            .and_then(|p| p.total_pages)
            .filter(|pages| *pages > 0)
            .unwrap_or(1)
    }

    pub fn total_items(&self) -> u64 {
        self.pagination
            .as_ref()
            .and_then(|p| p.total_items)
            .unwrap_or(0)
    }
}

/// Pagination block of a list envelope
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub total_items: Option<u64>,
}

/// Body of an error reply, from upstream or from this service
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MessageBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// One page of a list, with defaults filled in
#[derive(Debug, Clone, PartialEq)]
pub struct PagedList<T> {
    pub items: Vec<T>,
    pub total_pages: u32,
    pub total_items: u64,
}

impl<T> PagedList<T> {
    /// The empty page shown after a failed fetch
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_pages: 1,
            total_items: 0,
        }
    }
}

impl<T> Default for PagedList<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<Envelope<Vec<T>>> for PagedList<T> {
    fn from(envelope: Envelope<Vec<T>>) -> Self {
        let total_pages = envelope.total_pages();
        let total_items = envelope.total_items();
        Self {
            items: envelope.data.unwrap_or_default(),
            total_pages,
            total_items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_with_pagination() {
        let envelope: Envelope<Vec<String>> = serde_json::from_value(json!({
            "status_code": 200,
            "data": ["a", "b"],
            "message": "ok",
            "pagination": {"totalPages": 4, "totalItems": 37}
        }))
        .unwrap();

        assert!(envelope.is_ok());
        assert_eq!(envelope.total_pages(), 4);
        assert_eq!(envelope.total_items(), 37);

        let page = PagedList::from(envelope);
        assert_eq!(page.items, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_envelope_missing_fields_use_defaults() {
        let envelope: Envelope<Vec<String>> =
            serde_json::from_value(json!({"status_code": 200})).unwrap();

        let page = PagedList::from(envelope);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total_items, 0);
    }

    #[test]
    fn test_envelope_not_ok_without_status_code() {
        let envelope: Envelope<serde_json::Value> =
            serde_json::from_value(json!({"message": "nope"})).unwrap();
        assert!(!envelope.is_ok());
        assert_eq!(envelope.message.as_deref(), Some("nope"));
    }

    #[test]
    fn test_zero_total_pages_clamped_to_one() {
        let envelope: Envelope<Vec<u8>> = serde_json::from_value(json!({
            "status_code": 200,
            "pagination": {"totalPages": 0, "totalItems": 0}
        }))
        .unwrap();
        assert_eq!(envelope.total_pages(), 1);
    }

    #[test]
    fn test_created_envelope_is_success_but_not_ok() {
        let created: Envelope<serde_json::Value> =
            serde_json::from_value(json!({"status_code": 201, "message": "Created"})).unwrap();
        assert!(created.is_success());
        assert!(!created.is_ok());

        let bare: Envelope<serde_json::Value> = serde_json::from_value(json!({})).unwrap();
        assert!(bare.is_success());

        let failed: Envelope<serde_json::Value> =
            serde_json::from_value(json!({"status_code": 400})).unwrap();
        assert!(!failed.is_success());
    }
}

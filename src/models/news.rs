//! News article model

use serde::{Deserialize, Serialize};

/// A news article as returned by `getById`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_active: bool,
}

/// PATCH payload for `update`.
///
/// Unset optional fields are sent as empty strings, matching what the edit
/// form submits.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewsUpdate {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub author: String,
    pub date: String,
    pub tags: Vec<String>,
}

impl NewsUpdate {
    /// Build the payload from the edited article and the tag editor contents
    pub fn from_article(article: &NewsArticle, tags: Vec<String>) -> Self {
        Self {
            title: article.title.clone(),
            description: article.description.clone(),
            kind: article.kind.clone(),
            author: article.author.clone().unwrap_or_default(),
            date: article.date.clone().unwrap_or_default(),
            tags,
        }
    }

    /// Names of required form fields left blank
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.description.trim().is_empty() {
            missing.push("description");
        }
        if self.kind.trim().is_empty() {
            missing.push("type");
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_article_ignores_duplicate_plain_id() {
        let article: NewsArticle = serde_json::from_value(json!({
            "id": "abc",
            "_id": "abc",
            "title": "Rally",
            "description": "Town hall",
            "type": "event",
            "tags": ["local"],
            "isActive": true
        }))
        .unwrap();

        assert_eq!(article.id, "abc");
        assert_eq!(article.kind, "event");
        assert!(article.is_active);
        assert_eq!(article.author, None);
    }

    #[test]
    fn test_update_fills_blank_optionals() {
        let article = NewsArticle {
            id: "1".into(),
            title: "T".into(),
            description: "D".into(),
            kind: "press".into(),
            author: None,
            date: Some("2024-05-01".into()),
            tags: vec!["old".into()],
            is_active: true,
        };
        let update = NewsUpdate::from_article(&article, vec!["new".into()]);
        let value = serde_json::to_value(&update).unwrap();

        assert_eq!(value, json!({
            "title": "T",
            "description": "D",
            "type": "press",
            "author": "",
            "date": "2024-05-01",
            "tags": ["new"]
        }));
        assert!(update.missing_fields().is_empty());
    }

    #[test]
    fn test_update_reports_blank_required_fields() {
        let update = NewsUpdate {
            title: "  ".into(),
            ..Default::default()
        };
        assert_eq!(update.missing_fields(), vec!["title", "description", "type"]);
    }
}

//! Citizen query list parameters
//!
//! Queries are only ever listed, so the model is the filter set the list
//! endpoint understands.

use serde::{Deserialize, Serialize};

/// Filter and sort parameters for `GET /api/admin/queries`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QueryListParams {
    #[serde(default = "default_page")]
    pub page: String,
    #[serde(default = "default_limit")]
    pub limit: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default = "default_priority")]
    pub priority: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub constituency: String,
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    #[serde(default = "default_sort_order")]
    pub sort_order: String,
}

fn default_page() -> String {
    "1".to_string()
}

fn default_limit() -> String {
    "10".to_string()
}

fn default_category() -> String {
    "All Categories".to_string()
}

fn default_priority() -> String {
    "All Priorities".to_string()
}

fn default_status() -> String {
    "All Statuses".to_string()
}

fn default_sort_by() -> String {
    "createdAt".to_string()
}

fn default_sort_order() -> String {
    "desc".to_string()
}

impl Default for QueryListParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
            category: default_category(),
            priority: default_priority(),
            status: default_status(),
            search: String::new(),
            constituency: String::new(),
            sort_by: default_sort_by(),
            sort_order: default_sort_order(),
        }
    }
}

impl QueryListParams {
    /// Every parameter, in the order the upstream receives them
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        vec![
            ("page".into(), self.page.clone()),
            ("limit".into(), self.limit.clone()),
            ("category".into(), self.category.clone()),
            ("priority".into(), self.priority.clone()),
            ("status".into(), self.status.clone()),
            ("search".into(), self.search.clone()),
            ("constituency".into(), self.constituency.clone()),
            ("sortBy".into(), self.sort_by.clone()),
            ("sortOrder".into(), self.sort_order.clone()),
        ]
    }
}

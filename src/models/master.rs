//! Master data model
//!
//! Enumerated option lists managed by the upstream, resolved in two steps:
//! category code to category id, then category id to items.

use serde::{Deserialize, Serialize};

/// Category code of the news type option list
pub const NEWS_TYPE_CATEGORY: &str = "typeOfNews";

/// A master data category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MasterCategory {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// One entry of a master data list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MasterDataItem {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    pub title: String,
    pub value: String,
}

/// A select option built from a master data item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TypeOption {
    pub key: String,
    pub label: String,
}

impl From<MasterDataItem> for TypeOption {
    fn from(item: MasterDataItem) -> Self {
        Self {
            key: item.value,
            label: item.title,
        }
    }
}

//! Master data lookups
//!
//! Option lists are resolved in two sequential calls: the category is looked
//! up by code, then its items are fetched by the category id. A missing
//! category or any failed call yields an empty option list for callers that
//! only need something to render.

use async_trait::async_trait;
use std::sync::Arc;

use crate::models::{Envelope, MasterCategory, MasterDataItem, TypeOption};
use crate::upstream::{UpstreamClient, UpstreamError};

const CATEGORY_PATH: &str = "/api/master/masterCategory/getAll";
const ITEMS_PATH: &str = "/api/master/masterData/getByMasterCategoryId";

/// Where master data comes from
#[async_trait]
pub trait MasterDataSource: Send + Sync {
    /// Categories matching a code
    async fn categories_by_code(&self, code: &str) -> Result<Vec<MasterCategory>, UpstreamError>;

    /// Items belonging to a category id
    async fn items_by_category(
        &self,
        category_id: &str,
    ) -> Result<Vec<MasterDataItem>, UpstreamError>;
}

#[async_trait]
impl MasterDataSource for UpstreamClient {
    async fn categories_by_code(&self, code: &str) -> Result<Vec<MasterCategory>, UpstreamError> {
        let envelope: Envelope<Vec<MasterCategory>> = self
            .get_json(CATEGORY_PATH, vec![("code".to_string(), code.to_string())])
            .await?;
        Ok(envelope.data.unwrap_or_default())
    }

    async fn items_by_category(
        &self,
        category_id: &str,
    ) -> Result<Vec<MasterDataItem>, UpstreamError> {
        let envelope: Envelope<Vec<MasterDataItem>> = self
            .get_json(
                ITEMS_PATH,
                vec![("masterCategoryId".to_string(), category_id.to_string())],
            )
            .await?;
        Ok(envelope.data.unwrap_or_default())
    }
}

/// Error type for master data lookups
#[derive(Debug, thiserror::Error)]
pub enum MasterDataError {
    #[error("No master category found for {0}")]
    CategoryNotFound(String),
    #[error("Master data lookup failed: {0}")]
    Upstream(#[from] UpstreamError),
}

/// Resolves option lists from master data
pub struct MasterDataService {
    source: Arc<dyn MasterDataSource>,
}

impl MasterDataService {
    pub fn new(source: Arc<dyn MasterDataSource>) -> Self {
        Self { source }
    }

    /// Resolve the options of a category code.
    ///
    /// Uses the first category the code lookup returns.
    pub async fn type_options(&self, code: &str) -> Result<Vec<TypeOption>, MasterDataError> {
        let categories = self.source.categories_by_code(code).await?;
        let category = categories
            .into_iter()
            .next()
            .ok_or_else(|| MasterDataError::CategoryNotFound(code.to_string()))?;

        tracing::debug!(code, category_id = %category.id, "resolved master category");

        let items = self.source.items_by_category(&category.id).await?;
        Ok(items.into_iter().map(TypeOption::from).collect())
    }

    /// Like [`type_options`](Self::type_options), but any failure resolves
    /// to an empty list.
    pub async fn type_options_or_empty(&self, code: &str) -> Vec<TypeOption> {
        match self.type_options(code).await {
            Ok(options) => {
                tracing::debug!(code, count = options.len(), "loaded type options");
                options
            }
            Err(e) => {
                tracing::warn!(code, error = %e, "type options unavailable");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NEWS_TYPE_CATEGORY;
    use std::sync::Mutex;

    /// In-memory source recording which category ids were requested
    #[derive(Default)]
    struct FakeSource {
        categories: Vec<MasterCategory>,
        items: Vec<MasterDataItem>,
        fail_items: bool,
        requested_ids: Mutex<Vec<String>>,
        category_calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl MasterDataSource for FakeSource {
        async fn categories_by_code(
            &self,
            code: &str,
        ) -> Result<Vec<MasterCategory>, UpstreamError> {
            self.category_calls.lock().unwrap().push(code.to_string());
            Ok(self.categories.clone())
        }

        async fn items_by_category(
            &self,
            category_id: &str,
        ) -> Result<Vec<MasterDataItem>, UpstreamError> {
            self.requested_ids.lock().unwrap().push(category_id.to_string());
            if self.fail_items {
                return Err(UpstreamError::Rejected {
                    status: 500,
                    message: "boom".to_string(),
                });
            }
            Ok(self.items.clone())
        }
    }

    fn category(id: &str) -> MasterCategory {
        MasterCategory {
            id: id.to_string(),
            code: Some(NEWS_TYPE_CATEGORY.to_string()),
            name: None,
        }
    }

    fn item(title: &str, value: &str) -> MasterDataItem {
        MasterDataItem {
            id: None,
            title: title.to_string(),
            value: value.to_string(),
        }
    }

    #[tokio::test]
    async fn test_options_fetched_with_resolved_category_id() {
        let source = Arc::new(FakeSource {
            categories: vec![category("cat-42"), category("cat-99")],
            items: vec![item("Press Release", "press"), item("Event", "event")],
            ..Default::default()
        });
        let service = MasterDataService::new(source.clone());

        let options = service.type_options(NEWS_TYPE_CATEGORY).await.unwrap();

        assert_eq!(*source.category_calls.lock().unwrap(), vec!["typeOfNews".to_string()]);
        assert_eq!(*source.requested_ids.lock().unwrap(), vec!["cat-42".to_string()]);
        assert_eq!(
            options,
            vec![
                TypeOption { key: "press".into(), label: "Press Release".into() },
                TypeOption { key: "event".into(), label: "Event".into() },
            ]
        );
    }

    #[tokio::test]
    async fn test_no_category_resolves_to_empty() {
        let source = Arc::new(FakeSource::default());
        let service = MasterDataService::new(source.clone());

        let err = service.type_options(NEWS_TYPE_CATEGORY).await.unwrap_err();
        assert!(matches!(err, MasterDataError::CategoryNotFound(_)));

        assert!(service.type_options_or_empty(NEWS_TYPE_CATEGORY).await.is_empty());
        assert!(source.requested_ids.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_items_call_resolves_to_empty() {
        let source = Arc::new(FakeSource {
            categories: vec![category("c1")],
            fail_items: true,
            ..Default::default()
        });
        let service = MasterDataService::new(source);

        assert!(service.type_options_or_empty(NEWS_TYPE_CATEGORY).await.is_empty());
    }
}

//! News article editor
//!
//! Loads an article by id, exposes its fields and tags for editing and
//! submits the update. The news type options come from master data and are
//! fetched at most once per [`FetchLatch`].

use std::sync::atomic::{AtomicBool, Ordering};

use crate::admin::client::NewsApi;
use crate::admin::tag_editor::TagEditor;
use crate::models::{NewsArticle, NewsUpdate, TypeOption, NEWS_TYPE_CATEGORY};
use crate::services::MasterDataService;

/// Fallback shown when an update fails without a backend message
pub const UPDATE_FAILED: &str = "Failed to update news article";

/// One-shot guard owned by the caller
#[derive(Debug, Default)]
pub struct FetchLatch(AtomicBool);

impl FetchLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// True exactly once
    pub fn try_acquire(&self) -> bool {
        !self.0.swap(true, Ordering::AcqRel)
    }

    pub fn is_spent(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Resolve the news type options, unless `latch` was already spent.
///
/// Returns `None` when the lookup was skipped. A failed lookup yields an
/// empty list.
pub async fn load_type_options(
    master: &MasterDataService,
    latch: &FetchLatch,
) -> Option<Vec<TypeOption>> {
    if !latch.try_acquire() {
        return None;
    }
    Some(master.type_options_or_empty(NEWS_TYPE_CATEGORY).await)
}

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("News article not loaded")]
    NotLoaded,
    #[error("Failed to load news article: {0}")]
    Load(String),
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("{0}")]
    Update(String),
}

pub struct NewsEditor<N: NewsApi> {
    api: N,
    id: String,
    article: Option<NewsArticle>,
    tags: TagEditor,
    type_options: Vec<TypeOption>,
}

impl<N: NewsApi> NewsEditor<N> {
    pub fn new(api: N, id: impl Into<String>) -> Self {
        Self {
            api,
            id: id.into(),
            article: None,
            tags: TagEditor::new(),
            type_options: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Load type options (once per latch) and the article
    pub async fn load(
        &mut self,
        master: &MasterDataService,
        latch: &FetchLatch,
    ) -> Result<(), EditorError> {
        if let Some(options) = load_type_options(master, latch).await {
            self.type_options = options;
        }

        let article = self
            .api
            .get_news(&self.id)
            .await
            .map_err(|e| EditorError::Load(e.user_message(&e.to_string())))?;

        tracing::debug!(id = %self.id, tags = article.tags.len(), "loaded news article");
        self.tags = TagEditor::with_tags(&article.tags);
        self.article = Some(article);
        Ok(())
    }

    pub fn article(&self) -> Option<&NewsArticle> {
        self.article.as_ref()
    }

    pub fn article_mut(&mut self) -> Option<&mut NewsArticle> {
        self.article.as_mut()
    }

    pub fn tags(&self) -> &TagEditor {
        &self.tags
    }

    pub fn tags_mut(&mut self) -> &mut TagEditor {
        &mut self.tags
    }

    pub fn type_options(&self) -> &[TypeOption] {
        &self.type_options
    }

    /// The payload a submit would send
    pub fn pending_update(&self) -> Result<NewsUpdate, EditorError> {
        let article = self.article.as_ref().ok_or(EditorError::NotLoaded)?;
        Ok(NewsUpdate::from_article(article, self.tags.tags().to_vec()))
    }

    /// Send the update. On success the caller returns to the list.
    pub async fn submit(&self) -> Result<(), EditorError> {
        let update = self.pending_update()?;
        let missing = update.missing_fields();
        if !missing.is_empty() {
            return Err(EditorError::MissingFields(missing));
        }

        self.api.update_news(&self.id, &update).await.map_err(|e| {
            tracing::warn!(id = %self.id, error = %e, "news update failed");
            EditorError::Update(e.user_message(UPDATE_FAILED))
        })?;

        tracing::info!(id = %self.id, "news article updated");
        Ok(())
    }
}

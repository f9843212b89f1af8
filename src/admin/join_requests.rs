//! Join request list screen
//!
//! Holds filters, the current page and the last fetched page of results.
//! Filter changes are debounced and restart at page 1; explicit page
//! navigation fetches immediately. Every fetch takes a sequence number and a
//! response is applied only if no newer fetch was issued meanwhile.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::admin::client::{ClientError, JoinRequestApi};
use crate::admin::debounce::Debouncer;
use crate::config::ClientConfig;
use crate::models::{ApplicantType, JoinRequest, JoinRequestStatus, PagedList, ReviewAction};

/// Active filters. `None` is the "all" option of a select.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinRequestFilters {
    pub search: String,
    pub kind: Option<ApplicantType>,
    pub status: Option<JoinRequestStatus>,
}

impl JoinRequestFilters {
    /// Query pairs for a list call. Default filters are left out.
    pub fn to_query(&self, page: u32, limit: u32) -> Vec<(String, String)> {
        let mut query = vec![
            ("page".to_string(), page.to_string()),
            ("limit".to_string(), limit.to_string()),
        ];
        if !self.search.is_empty() {
            query.push(("search".to_string(), self.search.clone()));
        }
        if let Some(kind) = &self.kind {
            query.push(("type".to_string(), kind.to_string()));
        }
        if let Some(status) = &self.status {
            query.push(("status".to_string(), status.to_string()));
        }
        query
    }

    fn apply(&mut self, change: FilterChange) {
        match change {
            FilterChange::Search(text) => self.search = text,
            FilterChange::Type(value) => self.kind = ApplicantType::from_filter(&value),
            FilterChange::Status(value) => self.status = JoinRequestStatus::from_filter(&value),
        }
    }
}

/// A filter control changed; values are what the control holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChange {
    Search(String),
    Type(String),
    Status(String),
}

/// Failures of row and review actions
#[derive(Debug, thiserror::Error)]
pub enum ListActionError {
    #[error("No request selected")]
    NothingSelected,
    #[error("Failed to {action} request: {message}")]
    Review { action: ReviewAction, message: String },
    #[error("Failed to delete request: {message}")]
    Delete { message: String },
}

/// Point-in-time view of the screen
#[derive(Debug, Clone, PartialEq)]
pub struct ListSnapshot {
    pub filters: JoinRequestFilters,
    pub page: u32,
    pub data: PagedList<JoinRequest>,
    pub loading: bool,
    pub selected: Option<JoinRequest>,
}

#[derive(Debug)]
struct ListState {
    filters: JoinRequestFilters,
    page: u32,
    data: PagedList<JoinRequest>,
    loading: bool,
    issued_seq: u64,
    selected: Option<JoinRequest>,
}

struct Inner<A> {
    api: A,
    page_size: u32,
    state: Mutex<ListState>,
}

impl<A: JoinRequestApi> Inner<A> {
    fn lock(&self) -> MutexGuard<'_, ListState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Fetch `page` with `filters`. Returns false when the response was
    /// superseded by a newer fetch and dropped.
    async fn fetch_page(&self, page: u32, filters: JoinRequestFilters) -> bool {
        let seq = {
            let mut state = self.lock();
            state.issued_seq += 1;
            state.page = page;
            state.loading = true;
            state.issued_seq
        };

        let query = filters.to_query(page, self.page_size);
        let result = self.api.list_join_requests(&query).await;

        let mut state = self.lock();
        if seq != state.issued_seq {
            tracing::debug!(seq, latest = state.issued_seq, "discarding stale join request page");
            return false;
        }

        state.loading = false;
        state.data = match result {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!(page, error = %e, "failed to fetch join requests");
                PagedList::empty()
            }
        };
        true
    }
}

/// Controller behind the join request list
pub struct JoinRequestList<A: JoinRequestApi + 'static> {
    inner: Arc<Inner<A>>,
    debouncer: Debouncer<JoinRequestFilters>,
}

impl<A: JoinRequestApi + 'static> JoinRequestList<A> {
    /// Must be called inside a tokio runtime
    pub fn new(api: A, page_size: u32, debounce: Duration) -> Self {
        let inner = Arc::new(Inner {
            api,
            page_size: page_size.max(1),
            state: Mutex::new(ListState {
                filters: JoinRequestFilters::default(),
                page: 1,
                data: PagedList::empty(),
                loading: false,
                issued_seq: 0,
                selected: None,
            }),
        });

        let fire = inner.clone();
        let debouncer = Debouncer::new(debounce, move |filters| {
            let inner = fire.clone();
            async move {
                inner.fetch_page(1, filters).await;
            }
        });

        Self { inner, debouncer }
    }

    /// Page size and debounce taken from the `client` config section
    pub fn from_config(api: A, config: &ClientConfig) -> Self {
        Self::new(api, config.page_size, config.debounce())
    }

    pub fn api(&self) -> &A {
        &self.inner.api
    }

    pub fn snapshot(&self) -> ListSnapshot {
        let state = self.inner.lock();
        ListSnapshot {
            filters: state.filters.clone(),
            page: state.page,
            data: state.data.clone(),
            loading: state.loading,
            selected: state.selected.clone(),
        }
    }

    /// Initial fetch of page 1 with default filters
    pub async fn load(&self) -> bool {
        let filters = self.inner.lock().filters.clone();
        self.inner.fetch_page(1, filters).await
    }

    /// Update a filter now and schedule the debounced refetch
    pub fn set_filter(&self, change: FilterChange) {
        let filters = {
            let mut state = self.inner.lock();
            state.filters.apply(change);
            state.filters.clone()
        };
        self.debouncer.push(filters);
    }

    pub async fn go_to_page(&self, page: u32) -> bool {
        let filters = self.inner.lock().filters.clone();
        self.inner.fetch_page(page.max(1), filters).await
    }

    /// Refetch the current page with current filters
    pub async fn refresh(&self) -> bool {
        let (page, filters) = {
            let state = self.inner.lock();
            (state.page, state.filters.clone())
        };
        self.inner.fetch_page(page, filters).await
    }

    /// Open a row for review. Only pending requests can be opened.
    pub fn select(&self, id: &str) -> bool {
        let mut state = self.inner.lock();
        let found = state.data.items.iter().find(|r| r.id == id && r.can_view()).cloned();
        match found {
            Some(request) => {
                state.selected = Some(request);
                true
            }
            None => false,
        }
    }

    pub fn clear_selection(&self) {
        self.inner.lock().selected = None;
    }

    /// Approve or reject the selected request, then refetch the page
    pub async fn review(&self, action: ReviewAction) -> Result<(), ListActionError> {
        let id = self
            .inner
            .lock()
            .selected
            .as_ref()
            .map(|r| r.id.clone())
            .ok_or(ListActionError::NothingSelected)?;

        self.inner
            .api
            .review_join_request(action, &id)
            .await
            .map_err(|e| ListActionError::Review {
                action,
                message: failure_text(&e),
            })?;

        tracing::info!(%id, %action, "join request reviewed");
        self.clear_selection();
        self.refresh().await;
        Ok(())
    }

    /// Delete a row after `confirm` agrees. Returns Ok(false) when declined.
    pub async fn delete_with<F>(&self, id: &str, confirm: F) -> Result<bool, ListActionError>
    where
        F: FnOnce(&str) -> bool,
    {
        if !confirm(id) {
            return Ok(false);
        }

        self.inner
            .api
            .delete_join_request(id)
            .await
            .map_err(|e| ListActionError::Delete { message: failure_text(&e) })?;

        tracing::info!(%id, "join request deleted");
        {
            let mut state = self.inner.lock();
            if state.selected.as_ref().is_some_and(|r| r.id == id) {
                state.selected = None;
            }
        }
        self.refresh().await;
        Ok(true)
    }
}

fn failure_text(err: &ClientError) -> String {
    err.user_message(&err.to_string())
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Page and limit always lead; a filter appears only when set
        #[test]
        fn query_contains_only_active_filters(
            page in 1u32..500,
            search in "[a-z ]{0,8}",
            kind in prop::option::of(prop_oneof![Just("Candidate"), Just("Volunteer")]),
            status in prop::option::of(
                prop_oneof![Just("Pending"), Just("Accepted"), Just("Rejected")]
            ),
        ) {
            let filters = JoinRequestFilters {
                search: search.clone(),
                kind: kind.map(|k| ApplicantType::from(k.to_string())),
                status: status.map(|s| JoinRequestStatus::from(s.to_string())),
            };
            let query = filters.to_query(page, 10);

            prop_assert_eq!(&query[0], &("page".to_string(), page.to_string()));
            prop_assert_eq!(&query[1], &("limit".to_string(), "10".to_string()));
            let keys: Vec<&str> = query.iter().map(|(k, _)| k.as_str()).collect();
            prop_assert_eq!(keys.contains(&"search"), !search.is_empty());
            prop_assert_eq!(keys.contains(&"type"), kind.is_some());
            prop_assert_eq!(keys.contains(&"status"), status.is_some());
        }
    }
}

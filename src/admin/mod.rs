//! Admin screen logic
//!
//! State and behavior behind the admin pages, kept free of any rendering:
//! - HTTP client for the proxy routes
//! - Debounced, paginated join request list
//! - News editor with its tag editor

pub mod client;
pub mod debounce;
pub mod join_requests;
pub mod news_editor;
pub mod tag_editor;

pub use client::{AdminClient, AuthContext, ClientError, JoinRequestApi, NewsApi};
pub use debounce::Debouncer;
pub use join_requests::{
    FilterChange, JoinRequestFilters, JoinRequestList, ListActionError, ListSnapshot,
};
pub use news_editor::{load_type_options, EditorError, FetchLatch, NewsEditor};
pub use tag_editor::{TagEditor, TagKey};

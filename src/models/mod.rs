//! Data models
//!
//! Typed views of the JSON the upstream backend exchanges:
//! - Response envelope and pagination
//! - Join requests and the public submission form
//! - News articles and their update payload
//! - Query list parameters
//! - Master data categories and options

mod envelope;
mod join_request;
mod master;
mod news;
mod query;

pub use envelope::{Envelope, MessageBody, PagedList, Pagination, ENVELOPE_OK};
pub use join_request::{
    missing_submission_fields, ApplicantType, JoinRequest, JoinRequestStatus, JoinRequestSubmission,
    ReviewAction, ReviewRequest, REQUIRED_SUBMISSION_FIELDS,
};
pub use master::{MasterCategory, MasterDataItem, TypeOption, NEWS_TYPE_CATEGORY};
pub use news::{NewsArticle, NewsUpdate};
pub use query::QueryListParams;

//! Services layer
//!
//! Logic that sits between the HTTP handlers and the upstream client.

pub mod master_data;

pub use master_data::{MasterDataError, MasterDataService, MasterDataSource};

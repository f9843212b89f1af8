//! Civic admin - proxy layer and admin screen logic for a civic content system
//!
//! The server half relays `/api/...` routes to the upstream backend with the
//! caller's token. The admin half holds the state of the join request list
//! and the news editor.

pub mod admin;
pub mod api;
pub mod config;
pub mod models;
pub mod services;
pub mod upstream;

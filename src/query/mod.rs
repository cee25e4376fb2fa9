//! Query Module
//!
//! Listing, lookup and creation of catalog items for the REST API.

mod service;

pub use service::{ItemPage, QueryService};

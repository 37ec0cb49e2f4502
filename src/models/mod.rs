//! Data models for HTTP requests and responses.
//!
//! This module contains the core data structures the executor works with.

pub mod request;
pub mod response;

pub use request::{HttpMethod, HttpRequest};
pub use response::{response_size, HttpResponse};

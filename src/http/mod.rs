//! HTTP client module
//!
//! Thin wrapper around reqwest for talking to the NetBox REST API.
//!
//! # Features
//!
//! - **Base URL joining**: relative API paths are resolved against the server URL
//! - **Authentication**: integration with the auth module
//! - **Status classification**: non-2xx responses become typed errors
//!
//! Requests are sent once. A failed request fails the current object type.

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};

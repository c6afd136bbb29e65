//! HTTP client module with retry logic and error handling.

mod client;

pub use client::HttpClient;

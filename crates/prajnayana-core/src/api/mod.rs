//! HTTP access to the Prajnayana REST API.

pub mod client;

pub use client::ApiClient;

//! HTTP client, endpoint table and wire models for the probed API.
mod auth;
mod client;
mod endpoints;
pub mod models;

#[cfg(test)]
mod tests;

pub use auth::{BearerToken, Credentials};
pub use client::{ApiClient, ApiResponse};
pub use endpoints::Endpoint;

pub mod client;
pub mod models;
pub mod transport;

#[cfg(test)]
pub(crate) mod fake;

pub use client::{BlogApi, PAGE_SIZE};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Transport};

// Library exports for Quill
// The binary and the integration tests both build on these modules

pub mod api;
pub mod auth;
pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod forms;
pub mod notify;
pub mod render;
pub mod routes;
pub mod state;

//! HTTP boundary: routing, handlers, and form payloads.

pub mod forms;
mod handlers;
mod server;

pub use server::{AppState, HttpServer};

//! Formgate - Request Throttling for Form Endpoints
//!
//! This crate implements a small HTTP service that fronts public
//! form-submission endpoints and throttles them with an in-process,
//! fixed-window rate limiter keyed by client IP. State lives entirely in
//! process memory; there is no persistence and no coordination between
//! instances.

pub mod config;
pub mod error;
pub mod http;
pub mod mail;
pub mod ratelimit;

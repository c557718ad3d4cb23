//! Rate limiting logic and state management.

mod client_id;
mod limiter;

pub use client_id::{client_identifier, UNKNOWN_CLIENT};
pub use limiter::{RateLimiter, SweeperHandle};

//! HTTP layer answering skill requests.
//!
//! A single POST endpoint receives request envelopes and returns response
//! envelopes, plus a health check for load balancers.

pub mod handlers;
pub mod router;

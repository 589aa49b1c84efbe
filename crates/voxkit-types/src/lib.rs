//! Shared wire types and errors for Voxkit.
//!
//! Everything in this crate mirrors a JSON surface of the skill platform:
//! the request/response envelopes exchanged at runtime, the interaction
//! model artifact, and the `skill.json` manifest artifact. Field names and
//! casing are dictated by the deployment API and must not drift.

pub mod error;
pub mod manifest;
pub mod model;
pub mod request;
pub mod response;

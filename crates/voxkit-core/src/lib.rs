//! Core logic for Voxkit: localization, artifact builders, and dispatch.
//!
//! Modules:
//! - `l10n`: locale registry and per-locale snippet tables with error
//!   accumulation.
//! - `builder`: chained builders producing the interaction model and the
//!   `skill.json` manifest from locale lookups.
//! - `response`: response envelope builder and locale-aware error responses.
//! - `router`: handler trait and request multiplexer.
//! - `ssml`: speech markup string helpers.

pub mod builder;
pub mod l10n;
pub mod response;
pub mod router;
pub mod ssml;

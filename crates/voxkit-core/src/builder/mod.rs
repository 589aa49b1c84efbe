//! Builders producing the interaction model and skill manifest artifacts.
//!
//! All builders share an `Arc<LocaleRegistry>` and resolve their content
//! through locale lookup keys at build time. Configuration methods chain on
//! `&mut self`; the first configuration error is stored and turns every
//! later call into a no-op, so a chain can be checked once at build time.
//! Children live in ordered maps, making repeated builds byte-identical.

mod intent;
mod model;
mod prompt;
mod skill;

pub use intent::{IntentBuilder, SlotBuilder, TypeBuilder, ValidationRulesBuilder};
pub use model::ModelBuilder;
pub use prompt::{PromptBuilder, PromptKind, VariationsBuilder};
pub use skill::{PrivacyFlag, SkillBuilder, SkillLocaleBuilder};

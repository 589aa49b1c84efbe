//! The interaction model builder.

use std::collections::BTreeMap;
use std::sync::Arc;

use voxkit_types::error::BuildError;
use voxkit_types::model::{
    DelegationStrategy, Dialog, InteractionModel, LanguageModel, Model, ValidationType, Variation,
};

use crate::l10n::{KEY_SKILL_INVOCATION, Locale, LocaleRegistry};

use super::intent::IntentBuilder;
use super::prompt::PromptBuilder;
use super::TypeBuilder;

/// Builds one [`Model`] per registered locale.
///
/// Intents, types, and prompts live in ordered maps; building twice from an
/// unmodified builder yields byte-identical serialized artifacts.
pub struct ModelBuilder {
    registry: Arc<LocaleRegistry>,
    invocation_key: String,
    delegation: DelegationStrategy,
    intents: BTreeMap<String, IntentBuilder>,
    types: BTreeMap<String, TypeBuilder>,
    prompts: BTreeMap<String, PromptBuilder>,
    error: Option<BuildError>,
}

impl ModelBuilder {
    /// Create a builder with its own empty registry.
    pub fn new() -> Self {
        Self::with_registry(Arc::new(LocaleRegistry::new()))
    }

    /// Create a builder sharing an existing registry.
    pub fn with_registry(registry: Arc<LocaleRegistry>) -> Self {
        Self {
            registry,
            invocation_key: KEY_SKILL_INVOCATION.to_string(),
            delegation: DelegationStrategy::Always,
            intents: BTreeMap::new(),
            types: BTreeMap::new(),
            prompts: BTreeMap::new(),
            error: None,
        }
    }

    pub fn registry(&self) -> Arc<LocaleRegistry> {
        Arc::clone(&self.registry)
    }

    /// Override the lookup key for the invocation name.
    pub fn with_invocation(&mut self, key: &str) -> &mut Self {
        if self.error.is_some() {
            return self;
        }
        self.invocation_key = key.to_string();
        self
    }

    /// Set the model-wide dialog delegation strategy.
    pub fn with_delegation(&mut self, delegation: DelegationStrategy) -> &mut Self {
        if self.error.is_some() {
            return self;
        }
        self.delegation = delegation;
        self
    }

    /// Register a new locale and set its invocation name.
    pub fn with_locale(&mut self, locale: &str, invocation: &str) -> &mut Self {
        if self.error.is_some() {
            return self;
        }
        match self.registry.register(Locale::new(locale)) {
            Ok(loc) => loc.set(&self.invocation_key, [invocation]),
            Err(err) => self.error = Some(err.into()),
        }
        self
    }

    /// Add a named intent. Re-adding a name replaces it.
    pub fn with_intent(&mut self, name: &str) -> &mut Self {
        if self.error.is_some() {
            return self;
        }
        let intent = IntentBuilder::new(Arc::clone(&self.registry), name);
        self.intents.insert(name.to_string(), intent);
        self
    }

    pub fn intent(&mut self, name: &str) -> Option<&mut IntentBuilder> {
        self.intents.get_mut(name)
    }

    /// Add a named custom slot type. Re-adding a name replaces it.
    pub fn with_type(&mut self, name: &str) -> &mut Self {
        if self.error.is_some() {
            return self;
        }
        let ty = TypeBuilder::new(Arc::clone(&self.registry), name);
        self.types.insert(name.to_string(), ty);
        self
    }

    pub fn custom_type(&mut self, name: &str) -> Option<&mut TypeBuilder> {
        self.types.get_mut(name)
    }

    /// Add an elicitation prompt for an existing intent slot and link them.
    ///
    /// The intent and slot must have been added first; otherwise the error
    /// is recorded immediately.
    pub fn with_elicitation_slot_prompt(&mut self, intent: &str, slot: &str) -> &mut Self {
        if self.error.is_some() {
            return self;
        }
        let registry = Arc::clone(&self.registry);
        let Some(slot_builder) = self.find_intent_slot(intent, slot) else {
            self.error = Some(BuildError::NoSuchIntentSlot {
                intent: intent.to_string(),
                slot: slot.to_string(),
            });
            return self;
        };

        let prompt = PromptBuilder::elicitation(registry, intent, slot);
        slot_builder.with_elicitation_prompt(prompt.id());
        self.prompts.insert(prompt.id().to_string(), prompt);
        self
    }

    /// Add a confirmation prompt for an existing intent slot and link them.
    pub fn with_confirmation_slot_prompt(&mut self, intent: &str, slot: &str) -> &mut Self {
        if self.error.is_some() {
            return self;
        }
        let registry = Arc::clone(&self.registry);
        let Some(slot_builder) = self.find_intent_slot(intent, slot) else {
            self.error = Some(BuildError::NoSuchIntentSlot {
                intent: intent.to_string(),
                slot: slot.to_string(),
            });
            return self;
        };

        let prompt = PromptBuilder::confirmation(registry, intent, slot);
        slot_builder.with_confirmation_prompt(prompt.id());
        self.prompts.insert(prompt.id().to_string(), prompt);
        self
    }

    /// Add a validation prompt for an existing slot (on any intent) and
    /// attach the matching validation rule to it.
    pub fn with_validation_slot_prompt(
        &mut self,
        slot: &str,
        rule_type: ValidationType,
        values_key: Option<&str>,
    ) -> &mut Self {
        if self.error.is_some() {
            return self;
        }
        let registry = Arc::clone(&self.registry);
        let Some(slot_builder) = self.find_slot(slot) else {
            self.error = Some(BuildError::NoSuchIntentSlot {
                intent: String::new(),
                slot: slot.to_string(),
            });
            return self;
        };

        let prompt = PromptBuilder::validation(registry, slot, rule_type.as_str());
        slot_builder.with_validation_rule(rule_type, prompt.id(), values_key);
        self.prompts.insert(prompt.id().to_string(), prompt);
        self
    }

    pub fn elicitation_prompt(&mut self, intent: &str, slot: &str) -> Option<&mut PromptBuilder> {
        self.prompts
            .get_mut(&PromptBuilder::elicitation_id(intent, slot))
    }

    pub fn confirmation_prompt(&mut self, intent: &str, slot: &str) -> Option<&mut PromptBuilder> {
        self.prompts
            .get_mut(&PromptBuilder::confirmation_id(intent, slot))
    }

    pub fn validation_prompt(
        &mut self,
        slot: &str,
        rule_type: ValidationType,
    ) -> Option<&mut PromptBuilder> {
        self.prompts
            .get_mut(&PromptBuilder::validation_id(slot, rule_type.as_str()))
    }

    /// Build a model for every registered locale.
    ///
    /// The first failure aborts the whole build; no partial artifact is
    /// returned.
    pub fn build(&self) -> Result<BTreeMap<String, Model>, BuildError> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }

        let mut models = BTreeMap::new();
        for locale in self.registry.locales() {
            let model = self.build_locale(locale.name())?;
            models.insert(locale.name().to_string(), model);
        }
        Ok(models)
    }

    /// Build the model for one locale.
    pub fn build_locale(&self, locale: &str) -> Result<Model, BuildError> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        let loc = self.registry.resolve(locale)?;

        let mut types = Vec::new();
        for ty in self.types.values() {
            types.push(ty.build(locale)?);
        }

        let mut prompts = Vec::new();
        for prompt in self.prompts.values() {
            prompts.push(prompt.build_locale(locale)?);
        }

        let mut intents = Vec::new();
        let mut dialog_intents = Vec::new();
        for intent in self.intents.values() {
            intents.push(intent.build_language_intent(locale)?);
            if intent.has_slots() {
                dialog_intents.push(intent.build_dialog_intent(locale)?);
            }
        }

        Ok(Model {
            interaction_model: InteractionModel {
                language_model: LanguageModel {
                    invocation_name: loc.get(&self.invocation_key, &[]),
                    intents,
                    types,
                },
                dialog: Some(Dialog {
                    delegation_strategy: self.delegation,
                    intents: dialog_intents,
                }),
                prompts,
            },
        })
    }

    fn find_intent_slot(&mut self, intent: &str, slot: &str) -> Option<&mut super::SlotBuilder> {
        self.intents
            .get_mut(intent)
            .filter(|i| i.slot_names().any(|s| s == slot))
            .and_then(|i| i.slot(slot))
    }

    fn find_slot(&mut self, slot: &str) -> Option<&mut super::SlotBuilder> {
        self.intents
            .values_mut()
            .find(|i| i.slot_names().any(|s| s == slot))
            .and_then(|i| i.slot(slot))
    }
}

impl Default for ModelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxkit_types::error::RegistryError;

    fn demo_builder() -> ModelBuilder {
        let mut mb = ModelBuilder::new();
        mb.with_locale("en-US", "demo skill");
        mb.with_intent("OrderIntent");
        if let Some(i) = mb.intent("OrderIntent") {
            i.with_locale_samples("en-US", ["order a {}"]);
        }
        mb
    }

    #[test]
    fn test_build_basic_model() {
        let mb = demo_builder();
        let models = mb.build().unwrap();
        assert_eq!(models.len(), 1);

        let model = &models["en-US"];
        assert_eq!(model.interaction_model.language_model.invocation_name, "demo skill");
        assert_eq!(model.interaction_model.language_model.intents.len(), 1);
        assert_eq!(
            model.interaction_model.language_model.intents[0].samples,
            vec!["order a {}".to_string()]
        );
        // no intents with slots, so the dialog carries no intents
        assert!(model.interaction_model.dialog.as_ref().unwrap().intents.is_empty());
    }

    #[test]
    fn test_duplicate_locale_poisons_builder() {
        let mut mb = ModelBuilder::new();
        mb.with_locale("en-US", "demo skill");
        mb.with_locale("en-US", "demo again");
        assert_eq!(
            mb.build().unwrap_err(),
            BuildError::Registry(RegistryError::AlreadyRegistered("en-US".to_string()))
        );
    }

    #[test]
    fn test_build_locale_unknown_locale() {
        let mb = demo_builder();
        assert_eq!(
            mb.build_locale("fr-FR").unwrap_err(),
            BuildError::Registry(RegistryError::NotFound("fr-FR".to_string()))
        );
    }

    #[test]
    fn test_elicitation_prompt_requires_existing_slot() {
        let mut mb = demo_builder();
        mb.with_elicitation_slot_prompt("OrderIntent", "Size");
        assert_eq!(
            mb.build().unwrap_err(),
            BuildError::NoSuchIntentSlot {
                intent: "OrderIntent".to_string(),
                slot: "Size".to_string(),
            }
        );
    }

    #[test]
    fn test_elicitation_prompt_links_slot() {
        let mut mb = demo_builder();
        if let Some(i) = mb.intent("OrderIntent") {
            i.with_slot("Size", "SizeType");
        }
        mb.with_type("SizeType");
        if let Some(t) = mb.custom_type("SizeType") {
            t.with_locale_values("en-US", ["small", "large"]);
        }
        mb.with_elicitation_slot_prompt("OrderIntent", "Size");
        if let Some(p) = mb.elicitation_prompt("OrderIntent", "Size") {
            p.with_variation(Variation::PlainText);
            if let Some(v) = p.variation(Variation::PlainText) {
                v.with_locale_values("en-US", Variation::PlainText, ["Which size?", "What size?"]);
            }
        }

        let model = mb.build_locale("en-US").unwrap();
        let im = &model.interaction_model;

        assert_eq!(im.prompts.len(), 1);
        assert_eq!(im.prompts[0].id, "Elicit.Intent-OrderIntent.IntentSlot-Size");
        assert_eq!(im.prompts[0].variations.len(), 2);

        let dialog = im.dialog.as_ref().unwrap();
        assert_eq!(dialog.intents.len(), 1);
        let slot = &dialog.intents[0].slots[0];
        assert!(slot.elicitation_required);
        assert_eq!(
            slot.prompts.as_ref().unwrap().elicitation.as_deref(),
            Some("Elicit.Intent-OrderIntent.IntentSlot-Size")
        );
    }

    #[test]
    fn test_validation_prompt_adds_rule() {
        let mut mb = demo_builder();
        if let Some(i) = mb.intent("OrderIntent") {
            i.with_slot("Size", "SizeType");
        }
        mb.with_type("SizeType");
        if let Some(t) = mb.custom_type("SizeType") {
            t.with_locale_values("en-US", ["small", "large"]);
        }
        mb.with_validation_slot_prompt("Size", ValidationType::InSet, Some("SizeType_Values"));
        if let Some(p) = mb.validation_prompt("Size", ValidationType::InSet) {
            p.with_variation(Variation::PlainText);
            if let Some(v) = p.variation(Variation::PlainText) {
                v.with_locale_values(
                    "en-US",
                    Variation::PlainText,
                    ["Please pick small or large."],
                );
            }
        }

        let model = mb.build_locale("en-US").unwrap();
        let dialog = model.interaction_model.dialog.as_ref().unwrap();
        let validations = &dialog.intents[0].slots[0].validations;
        assert_eq!(validations.len(), 1);
        assert_eq!(validations[0].rule_type, ValidationType::InSet);
        assert_eq!(validations[0].prompt, "Validate.Slot-Size.Type-isInSet");
        assert_eq!(validations[0].values, vec!["small".to_string(), "large".to_string()]);
    }

    #[test]
    fn test_delegation_strategy_in_dialog() {
        let mut mb = demo_builder();
        mb.with_delegation(DelegationStrategy::SkillResponse);
        let model = mb.build_locale("en-US").unwrap();
        assert_eq!(
            model.interaction_model.dialog.as_ref().unwrap().delegation_strategy,
            DelegationStrategy::SkillResponse
        );
    }

    #[test]
    fn test_build_is_idempotent() {
        let mut mb = demo_builder();
        mb.with_locale("de-DE", "demo skill");
        if let Some(i) = mb.intent("OrderIntent") {
            i.with_locale_samples("de-DE", ["bestelle ein {}"]);
            i.with_slot("Size", "SizeType");
        }
        mb.with_type("SizeType");
        if let Some(t) = mb.custom_type("SizeType") {
            t.with_locale_values("en-US", ["small", "large"]);
            t.with_locale_values("de-DE", ["klein", "gross"]);
        }

        let first = serde_json::to_string(&mb.build().unwrap()).unwrap();
        let second = serde_json::to_string(&mb.build().unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_error_makes_later_calls_noops() {
        let mut mb = ModelBuilder::new();
        mb.with_locale("en-US", "demo skill");
        mb.with_elicitation_slot_prompt("NoIntent", "NoSlot");
        mb.with_intent("LateIntent");
        assert!(mb.intent("LateIntent").is_none());
        assert!(mb.build().is_err());
    }
}

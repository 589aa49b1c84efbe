//! Intent, slot, type, and validation rule builders.

use std::collections::BTreeMap;
use std::sync::Arc;

use voxkit_types::error::BuildError;
use voxkit_types::model::{
    DelegationStrategy, DialogIntent, DialogSlot, ModelIntent, ModelSlot, ModelType, SlotPrompts,
    SlotValidation, TypeValue, TypeValueName, ValidationType,
};

use crate::l10n::{KEY_POSTFIX_SAMPLES, KEY_POSTFIX_VALUES, LocaleRegistry};

// ---------------------------------------------------------------------------
// Intent
// ---------------------------------------------------------------------------

/// Builds the language and dialog projections of one intent.
pub struct IntentBuilder {
    registry: Arc<LocaleRegistry>,
    name: String,
    samples_key: String,
    delegation: DelegationStrategy,
    confirmation: bool,
    slots: BTreeMap<String, SlotBuilder>,
    error: Option<BuildError>,
}

impl IntentBuilder {
    pub fn new(registry: Arc<LocaleRegistry>, name: &str) -> Self {
        Self {
            registry,
            name: name.to_string(),
            samples_key: format!("{name}{KEY_POSTFIX_SAMPLES}"),
            delegation: DelegationStrategy::Always,
            confirmation: false,
            slots: BTreeMap::new(),
            error: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Override the lookup key for the sample utterances.
    pub fn with_samples(&mut self, key: &str) -> &mut Self {
        if self.error.is_some() {
            return self;
        }
        self.samples_key = key.to_string();
        self
    }

    /// Write translated sample utterances for one locale.
    pub fn with_locale_samples<I, S>(&mut self, locale: &str, samples: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.error.is_some() {
            return self;
        }
        match self.registry.resolve(locale) {
            Ok(loc) => loc.set(&self.samples_key, samples),
            Err(err) => self.error = Some(err.into()),
        }
        self
    }

    /// Add a named slot of the given type. Re-adding a name replaces it.
    pub fn with_slot(&mut self, name: &str, type_name: &str) -> &mut Self {
        if self.error.is_some() {
            return self;
        }
        let slot = SlotBuilder::new(Arc::clone(&self.registry), &self.name, name, type_name);
        self.slots.insert(name.to_string(), slot);
        self
    }

    pub fn slot(&mut self, name: &str) -> Option<&mut SlotBuilder> {
        self.slots.get_mut(name)
    }

    pub(crate) fn slot_names(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    pub(crate) fn has_slots(&self) -> bool {
        !self.slots.is_empty()
    }

    /// Dialog delegation for this intent, overriding the model default.
    pub fn with_delegation(&mut self, delegation: DelegationStrategy) -> &mut Self {
        if self.error.is_some() {
            return self;
        }
        self.delegation = delegation;
        self
    }

    /// Whether the assistant should ask to confirm the whole intent.
    pub fn with_confirmation(&mut self, confirmation: bool) -> &mut Self {
        if self.error.is_some() {
            return self;
        }
        self.confirmation = confirmation;
        self
    }

    /// Build the language-model view of the intent for one locale.
    pub fn build_language_intent(&self, locale: &str) -> Result<ModelIntent, BuildError> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        let loc = self.registry.resolve(locale)?;

        let mut slots = Vec::new();
        for slot in self.slots.values() {
            slots.push(slot.build_intent_slot(locale)?);
        }

        Ok(ModelIntent {
            name: self.name.clone(),
            samples: loc.get_all(&self.samples_key, &[]),
            slots,
        })
    }

    /// Build the dialog view of the intent for one locale.
    pub fn build_dialog_intent(&self, locale: &str) -> Result<DialogIntent, BuildError> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }

        let mut slots = Vec::new();
        for slot in self.slots.values() {
            slots.push(slot.build_dialog_slot(locale)?);
        }

        Ok(DialogIntent {
            name: self.name.clone(),
            confirmation_required: self.confirmation,
            delegation_strategy: Some(self.delegation),
            prompts: None,
            slots,
        })
    }
}

// ---------------------------------------------------------------------------
// Slot
// ---------------------------------------------------------------------------

/// Builds the language and dialog projections of one intent slot.
pub struct SlotBuilder {
    registry: Arc<LocaleRegistry>,
    name: String,
    type_name: String,
    samples_key: String,
    confirmation_required: bool,
    elicitation_required: bool,
    elicitation_prompt: Option<String>,
    confirmation_prompt: Option<String>,
    validation: Option<ValidationRulesBuilder>,
}

impl SlotBuilder {
    pub fn new(registry: Arc<LocaleRegistry>, intent: &str, name: &str, type_name: &str) -> Self {
        Self {
            registry,
            name: name.to_string(),
            type_name: type_name.to_string(),
            samples_key: format!("{intent}_{name}{KEY_POSTFIX_SAMPLES}"),
            confirmation_required: false,
            elicitation_required: false,
            elicitation_prompt: None,
            confirmation_prompt: None,
            validation: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Override the lookup key for the slot samples.
    pub fn with_samples(&mut self, key: &str) -> &mut Self {
        self.samples_key = key.to_string();
        self
    }

    /// Write translated slot samples for one locale. Unknown locales are
    /// ignored; the build fails later when the locale is resolved.
    pub fn with_locale_samples<I, S>(&mut self, locale: &str, samples: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Ok(loc) = self.registry.resolve(locale) {
            loc.set(&self.samples_key, samples);
        }
        self
    }

    pub fn with_confirmation(&mut self, required: bool) -> &mut Self {
        self.confirmation_required = required;
        self
    }

    /// Link a confirmation prompt id; implies the confirmation requirement.
    pub fn with_confirmation_prompt(&mut self, id: &str) -> &mut Self {
        self.confirmation_required = true;
        self.confirmation_prompt = Some(id.to_string());
        self
    }

    pub fn with_elicitation(&mut self, required: bool) -> &mut Self {
        self.elicitation_required = required;
        self
    }

    /// Link an elicitation prompt id; implies the elicitation requirement.
    pub fn with_elicitation_prompt(&mut self, id: &str) -> &mut Self {
        self.elicitation_required = true;
        self.elicitation_prompt = Some(id.to_string());
        self
    }

    /// Add a validation rule referencing a prompt id, with an optional
    /// lookup key for the rule's value list.
    pub fn with_validation_rule(
        &mut self,
        rule_type: ValidationType,
        prompt_id: &str,
        values_key: Option<&str>,
    ) -> &mut Self {
        let rules = self
            .validation
            .get_or_insert_with(|| ValidationRulesBuilder::new(Arc::clone(&self.registry)));
        rules.with_rule(rule_type, prompt_id, values_key);
        self
    }

    pub fn build_intent_slot(&self, locale: &str) -> Result<ModelSlot, BuildError> {
        let loc = self.registry.resolve(locale)?;
        Ok(ModelSlot {
            name: self.name.clone(),
            slot_type: self.type_name.clone(),
            samples: loc.get_all(&self.samples_key, &[]),
        })
    }

    pub fn build_dialog_slot(&self, locale: &str) -> Result<DialogSlot, BuildError> {
        self.registry.resolve(locale)?;

        let prompts = if self.elicitation_prompt.is_some() || self.confirmation_prompt.is_some() {
            Some(SlotPrompts {
                elicitation: self.elicitation_prompt.clone(),
                confirmation: self.confirmation_prompt.clone(),
            })
        } else {
            None
        };

        let validations = match &self.validation {
            Some(rules) => rules.build(locale)?,
            None => Vec::new(),
        };

        Ok(DialogSlot {
            name: self.name.clone(),
            slot_type: self.type_name.clone(),
            confirmation_required: self.confirmation_required,
            elicitation_required: self.elicitation_required,
            prompts,
            validations,
        })
    }
}

// ---------------------------------------------------------------------------
// Type
// ---------------------------------------------------------------------------

/// Builds one custom slot type from a values lookup key.
pub struct TypeBuilder {
    registry: Arc<LocaleRegistry>,
    name: String,
    values_key: String,
}

impl TypeBuilder {
    pub fn new(registry: Arc<LocaleRegistry>, name: &str) -> Self {
        Self {
            registry,
            name: name.to_string(),
            values_key: format!("{name}{KEY_POSTFIX_VALUES}"),
        }
    }

    /// Override the lookup key for the type values.
    pub fn with_values(&mut self, key: &str) -> &mut Self {
        self.values_key = key.to_string();
        self
    }

    /// Write translated type values for one locale. Unknown locales are
    /// ignored; the build fails later when the locale is resolved.
    pub fn with_locale_values<I, S>(&mut self, locale: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Ok(loc) = self.registry.resolve(locale) {
            loc.set(&self.values_key, values);
        }
        self
    }

    pub fn build(&self, locale: &str) -> Result<ModelType, BuildError> {
        let loc = self.registry.resolve(locale)?;
        let values = loc
            .get_all(&self.values_key, &[])
            .into_iter()
            .map(|value| TypeValue {
                id: None,
                name: TypeValueName {
                    value,
                    synonyms: Vec::new(),
                },
            })
            .collect();
        Ok(ModelType {
            name: self.name.clone(),
            values,
        })
    }
}

// ---------------------------------------------------------------------------
// Validation rules
// ---------------------------------------------------------------------------

/// Collects the validation rules of one slot.
pub struct ValidationRulesBuilder {
    registry: Arc<LocaleRegistry>,
    rules: Vec<ValidationRule>,
}

struct ValidationRule {
    rule_type: ValidationType,
    prompt_id: String,
    values_key: Option<String>,
}

impl ValidationRulesBuilder {
    pub fn new(registry: Arc<LocaleRegistry>) -> Self {
        Self {
            registry,
            rules: Vec::new(),
        }
    }

    pub fn with_rule(
        &mut self,
        rule_type: ValidationType,
        prompt_id: &str,
        values_key: Option<&str>,
    ) -> &mut Self {
        self.rules.push(ValidationRule {
            rule_type,
            prompt_id: prompt_id.to_string(),
            values_key: values_key.map(str::to_string),
        });
        self
    }

    /// Resolve all rules for one locale.
    ///
    /// Set-membership rules with an empty resolved value list fail the
    /// build; other rule types pass their values through when present.
    pub fn build(&self, locale: &str) -> Result<Vec<SlotValidation>, BuildError> {
        let loc = self.registry.resolve(locale)?;

        let mut validations = Vec::new();
        for rule in &self.rules {
            let values = match &rule.values_key {
                Some(key) => loc.get_all(key, &[]),
                None => Vec::new(),
            };

            if rule.rule_type.requires_values() && values.is_empty() {
                return Err(BuildError::ValidationRequiresValues(rule.prompt_id.clone()));
            }

            validations.push(SlotValidation {
                rule_type: rule.rule_type,
                prompt: rule.prompt_id.clone(),
                values,
            });
        }
        Ok(validations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::l10n::Locale;

    fn registry_with_en() -> Arc<LocaleRegistry> {
        let registry = Arc::new(LocaleRegistry::new());
        registry.register(Locale::new("en-US")).unwrap();
        registry
    }

    #[test]
    fn test_intent_uses_default_samples_key() {
        let registry = registry_with_en();
        registry
            .resolve("en-US")
            .unwrap()
            .set("OrderIntent_Samples", ["order a {}", "get me a {}"]);

        let intent = IntentBuilder::new(Arc::clone(&registry), "OrderIntent");
        let built = intent.build_language_intent("en-US").unwrap();
        assert_eq!(built.name, "OrderIntent");
        assert_eq!(built.samples.len(), 2);
        assert!(built.slots.is_empty());
    }

    #[test]
    fn test_intent_with_locale_samples() {
        let registry = registry_with_en();
        let mut intent = IntentBuilder::new(Arc::clone(&registry), "OrderIntent");
        intent.with_locale_samples("en-US", ["order now"]);
        let built = intent.build_language_intent("en-US").unwrap();
        assert_eq!(built.samples, vec!["order now".to_string()]);
    }

    #[test]
    fn test_intent_unknown_locale_stores_error() {
        let registry = registry_with_en();
        let mut intent = IntentBuilder::new(registry, "OrderIntent");
        intent.with_locale_samples("fr-FR", ["commander"]);
        assert!(intent.build_language_intent("en-US").is_err());
    }

    #[test]
    fn test_slot_appears_in_both_views() {
        let registry = registry_with_en();
        registry
            .resolve("en-US")
            .unwrap()
            .set("OrderIntent_Size_Samples", ["{} size"]);

        let mut intent = IntentBuilder::new(Arc::clone(&registry), "OrderIntent");
        intent.with_slot("Size", "SizeType");

        let lang = intent.build_language_intent("en-US").unwrap();
        assert_eq!(lang.slots.len(), 1);
        assert_eq!(lang.slots[0].slot_type, "SizeType");
        assert_eq!(lang.slots[0].samples, vec!["{} size".to_string()]);

        let dialog = intent.build_dialog_intent("en-US").unwrap();
        assert_eq!(dialog.slots.len(), 1);
        assert!(!dialog.slots[0].elicitation_required);
        assert!(dialog.slots[0].prompts.is_none());
    }

    #[test]
    fn test_readding_slot_replaces_it() {
        let registry = registry_with_en();
        let mut intent = IntentBuilder::new(registry, "OrderIntent");
        intent.with_slot("Size", "SizeType");
        intent.with_slot("Size", "OtherType");
        let lang = intent.build_language_intent("en-US").unwrap();
        assert_eq!(lang.slots.len(), 1);
        assert_eq!(lang.slots[0].slot_type, "OtherType");
    }

    #[test]
    fn test_prompt_link_forces_requirement() {
        let registry = registry_with_en();
        let mut slot = SlotBuilder::new(registry, "OrderIntent", "Size", "SizeType");
        slot.with_elicitation_prompt("Elicit.Intent-OrderIntent.IntentSlot-Size");
        let dialog = slot.build_dialog_slot("en-US").unwrap();
        assert!(dialog.elicitation_required);
        assert_eq!(
            dialog.prompts.unwrap().elicitation.unwrap(),
            "Elicit.Intent-OrderIntent.IntentSlot-Size"
        );
    }

    #[test]
    fn test_type_builder_resolves_values() {
        let registry = registry_with_en();
        let mut ty = TypeBuilder::new(Arc::clone(&registry), "SizeType");
        ty.with_locale_values("en-US", ["small", "large"]);
        let built = ty.build("en-US").unwrap();
        assert_eq!(built.name, "SizeType");
        assert_eq!(built.values.len(), 2);
        assert_eq!(built.values[0].name.value, "small");
        assert!(built.values[0].name.synonyms.is_empty());
    }

    #[test]
    fn test_validation_set_rule_requires_values() {
        let registry = registry_with_en();
        let mut rules = ValidationRulesBuilder::new(Arc::clone(&registry));
        rules.with_rule(ValidationType::InSet, "Validate.Slot-Size.Type-isInSet", None);
        assert_eq!(
            rules.build("en-US").unwrap_err(),
            BuildError::ValidationRequiresValues("Validate.Slot-Size.Type-isInSet".to_string())
        );
    }

    #[test]
    fn test_validation_rule_with_values() {
        let registry = registry_with_en();
        registry
            .resolve("en-US")
            .unwrap()
            .set("SizeType_Values", ["small", "large"]);

        let mut rules = ValidationRulesBuilder::new(Arc::clone(&registry));
        rules.with_rule(
            ValidationType::InSet,
            "Validate.Slot-Size.Type-isInSet",
            Some("SizeType_Values"),
        );
        let built = rules.build("en-US").unwrap();
        assert_eq!(built.len(), 1);
        assert_eq!(built[0].values, vec!["small".to_string(), "large".to_string()]);
    }

    #[test]
    fn test_validation_non_set_rule_allows_missing_values() {
        let registry = registry_with_en();
        let mut rules = ValidationRulesBuilder::new(registry);
        rules.with_rule(ValidationType::GreaterThan, "Validate.Slot-Size.Type-isGreaterThan", None);
        let built = rules.build("en-US").unwrap();
        assert_eq!(built.len(), 1);
        assert!(built[0].values.is_empty());
    }
}

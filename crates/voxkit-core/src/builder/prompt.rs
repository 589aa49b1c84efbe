//! Prompt and variation builders.
//!
//! A prompt is identified by its kind and target (intent slot, or slot and
//! validation type) and carries one variations builder per content type.
//! Variation content is looked up per locale at build time.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use voxkit_types::error::BuildError;
use voxkit_types::model::{ModelPrompt, PromptVariation, Variation};

use crate::l10n::LocaleRegistry;

/// The dialog situation a prompt speaks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Elicit,
    Confirm,
    Validate,
}

impl PromptKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Elicit => "Elicit",
            Self::Confirm => "Confirm",
            Self::Validate => "Validate",
        }
    }
}

impl fmt::Display for PromptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds one named [`ModelPrompt`] from typed variations.
pub struct PromptBuilder {
    registry: Arc<LocaleRegistry>,
    kind: PromptKind,
    intent: String,
    slot: String,
    id: String,
    variations: BTreeMap<Variation, VariationsBuilder>,
}

impl PromptBuilder {
    /// Prompt asking the user to fill an intent slot.
    pub fn elicitation(registry: Arc<LocaleRegistry>, intent: &str, slot: &str) -> Self {
        Self {
            registry,
            kind: PromptKind::Elicit,
            intent: intent.to_string(),
            slot: slot.to_string(),
            id: Self::elicitation_id(intent, slot),
            variations: BTreeMap::new(),
        }
    }

    /// Prompt asking the user to confirm an intent slot.
    pub fn confirmation(registry: Arc<LocaleRegistry>, intent: &str, slot: &str) -> Self {
        Self {
            registry,
            kind: PromptKind::Confirm,
            intent: intent.to_string(),
            slot: slot.to_string(),
            id: Self::confirmation_id(intent, slot),
            variations: BTreeMap::new(),
        }
    }

    /// Prompt spoken when a slot validation rule rejects the value.
    pub fn validation(registry: Arc<LocaleRegistry>, slot: &str, rule_type: &str) -> Self {
        Self {
            registry,
            kind: PromptKind::Validate,
            intent: String::new(),
            slot: slot.to_string(),
            id: Self::validation_id(slot, rule_type),
            variations: BTreeMap::new(),
        }
    }

    pub fn elicitation_id(intent: &str, slot: &str) -> String {
        format!("Elicit.Intent-{intent}.IntentSlot-{slot}")
    }

    pub fn confirmation_id(intent: &str, slot: &str) -> String {
        format!("Confirm.Intent-{intent}.IntentSlot-{slot}")
    }

    pub fn validation_id(slot: &str, rule_type: &str) -> String {
        format!("Validate.Slot-{slot}.Type-{rule_type}")
    }

    /// The prompt id referenced from dialog slots.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Add a variation of the given content type with its default lookup key.
    pub fn with_variation(&mut self, variation: Variation) -> &mut Self {
        let builder = VariationsBuilder::new(
            Arc::clone(&self.registry),
            &self.intent,
            &self.slot,
            self.kind,
            variation,
        );
        self.variations.insert(variation, builder);
        self
    }

    /// The variations builder for the content type, if added.
    pub fn variation(&mut self, variation: Variation) -> Option<&mut VariationsBuilder> {
        self.variations.get_mut(&variation)
    }

    /// Resolve the prompt for one locale.
    pub fn build_locale(&self, locale: &str) -> Result<ModelPrompt, BuildError> {
        if self.variations.is_empty() {
            return Err(BuildError::PromptWithoutVariations(self.id.clone()));
        }

        let mut variations = Vec::new();
        for builder in self.variations.values() {
            variations.extend(builder.build_locale(locale)?);
        }

        Ok(ModelPrompt {
            id: self.id.clone(),
            variations,
        })
    }
}

/// Builds the [`PromptVariation`] list for one content type of a prompt.
///
/// Each variation type maps to a lookup key, by default
/// `<intent>_<slot>_<Kind>` plus the content type postfix. Every variant
/// stored under the key becomes one variation.
pub struct VariationsBuilder {
    registry: Arc<LocaleRegistry>,
    label: String,
    keys: BTreeMap<Variation, String>,
    error: Option<BuildError>,
}

impl VariationsBuilder {
    fn new(
        registry: Arc<LocaleRegistry>,
        intent: &str,
        slot: &str,
        kind: PromptKind,
        variation: Variation,
    ) -> Self {
        let label = format!("{intent}_{slot}_{kind}");
        let mut keys = BTreeMap::new();
        keys.insert(variation, format!("{label}{}", variation.key_postfix()));
        Self {
            registry,
            label,
            keys,
            error: None,
        }
    }

    /// Add another content type with its default lookup key.
    pub fn with_variation(&mut self, variation: Variation) -> &mut Self {
        if self.error.is_some() {
            return self;
        }
        self.keys
            .insert(variation, format!("{}{}", self.label, variation.key_postfix()));
        self
    }

    /// Rebind the lookup key for a content type.
    pub fn with_key(&mut self, variation: Variation, key: &str) -> &mut Self {
        if self.error.is_some() {
            return self;
        }
        self.keys.insert(variation, key.to_string());
        self
    }

    /// Write translated values for a content type straight into a locale.
    pub fn with_locale_values<I, S>(
        &mut self,
        locale: &str,
        variation: Variation,
        values: I,
    ) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.error.is_some() {
            return self;
        }
        let key = match self.keys.get(&variation) {
            Some(key) => key.clone(),
            None => return self,
        };
        match self.registry.resolve(locale) {
            Ok(loc) => loc.set(&key, values),
            Err(err) => self.error = Some(err.into()),
        }
        self
    }

    /// Resolve all variations of this content type for one locale.
    ///
    /// An empty result is an error: a prompt entry without content would be
    /// rejected by the deployment API.
    pub fn build_locale(&self, locale: &str) -> Result<Vec<PromptVariation>, BuildError> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        let loc = self.registry.resolve(locale)?;

        let mut variations = Vec::new();
        for (variation, key) in &self.keys {
            for value in loc.get_all(key, &[]) {
                variations.push(PromptVariation {
                    variation_type: *variation,
                    value,
                });
            }
        }

        if variations.is_empty() {
            return Err(BuildError::PromptWithoutContent(self.label.clone()));
        }

        Ok(variations)
    }
}

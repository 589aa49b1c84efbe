//! Interaction model wire types.
//!
//! Mirrors the deployment API's interaction model JSON: a language model
//! (invocation, intents, custom types), an optional dialog section, and the
//! prompt pool referenced from dialog slots by id.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BuildError;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Dialog delegation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DelegationStrategy {
    #[serde(rename = "ALWAYS")]
    Always,
    #[serde(rename = "SKILL_RESPONSE")]
    SkillResponse,
}

impl DelegationStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Always => "ALWAYS",
            Self::SkillResponse => "SKILL_RESPONSE",
        }
    }
}

impl fmt::Display for DelegationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DelegationStrategy {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALWAYS" => Ok(Self::Always),
            "SKILL_RESPONSE" => Ok(Self::SkillResponse),
            other => Err(BuildError::InvalidDelegation(other.to_string())),
        }
    }
}

/// Slot validation rule types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationType {
    #[serde(rename = "hasEntityResolutionMatch")]
    HasEntityResolutionMatch,
    #[serde(rename = "isInSet")]
    InSet,
    #[serde(rename = "isNotInSet")]
    NotInSet,
    #[serde(rename = "isGreaterThan")]
    GreaterThan,
    #[serde(rename = "isGreaterThanOrEqualTo")]
    GreaterThanOrEqualTo,
    #[serde(rename = "isLessThan")]
    LessThan,
    #[serde(rename = "isLessThanOrEqualTo")]
    LessThanOrEqualTo,
    #[serde(rename = "isInDuration")]
    InDuration,
    #[serde(rename = "isNotInDuration")]
    NotInDuration,
}

impl ValidationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HasEntityResolutionMatch => "hasEntityResolutionMatch",
            Self::InSet => "isInSet",
            Self::NotInSet => "isNotInSet",
            Self::GreaterThan => "isGreaterThan",
            Self::GreaterThanOrEqualTo => "isGreaterThanOrEqualTo",
            Self::LessThan => "isLessThan",
            Self::LessThanOrEqualTo => "isLessThanOrEqualTo",
            Self::InDuration => "isInDuration",
            Self::NotInDuration => "isNotInDuration",
        }
    }

    /// Set-membership rules are meaningless without a value list.
    pub fn requires_values(&self) -> bool {
        matches!(self, Self::InSet | Self::NotInSet)
    }
}

impl fmt::Display for ValidationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prompt variation content types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Variation {
    #[serde(rename = "PlainText")]
    PlainText,
    #[serde(rename = "SSML")]
    Ssml,
}

impl Variation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PlainText => "PlainText",
            Self::Ssml => "SSML",
        }
    }

    /// Postfix appended to the default lookup key for this variation.
    pub const fn key_postfix(&self) -> &'static str {
        match self {
            Self::PlainText => "_Text",
            Self::Ssml => "_SSML",
        }
    }
}

impl fmt::Display for Variation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Language model
// ---------------------------------------------------------------------------

/// Top element of the interaction model artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    #[serde(rename = "interactionModel")]
    pub interaction_model: InteractionModel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionModel {
    #[serde(rename = "languageModel")]
    pub language_model: LanguageModel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dialog: Option<Dialog>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prompts: Vec<ModelPrompt>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageModel {
    #[serde(rename = "invocationName")]
    pub invocation_name: String,
    pub intents: Vec<ModelIntent>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<ModelType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelIntent {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub samples: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub slots: Vec<ModelSlot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSlot {
    pub name: String,
    #[serde(rename = "type")]
    pub slot_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub samples: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelType {
    pub name: String,
    pub values: Vec<TypeValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: TypeValueName,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeValueName {
    pub value: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub synonyms: Vec<String>,
}

// ---------------------------------------------------------------------------
// Dialog
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dialog {
    #[serde(rename = "delegationStrategy")]
    pub delegation_strategy: DelegationStrategy,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub intents: Vec<DialogIntent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogIntent {
    pub name: String,
    #[serde(rename = "confirmationRequired")]
    pub confirmation_required: bool,
    #[serde(
        rename = "delegationStrategy",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub delegation_strategy: Option<DelegationStrategy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompts: Option<IntentPrompts>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub slots: Vec<DialogSlot>,
}

/// Prompt ids attached to a dialog intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentPrompts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogSlot {
    pub name: String,
    #[serde(rename = "type")]
    pub slot_type: String,
    #[serde(rename = "confirmationRequired")]
    pub confirmation_required: bool,
    #[serde(rename = "elicitationRequired")]
    pub elicitation_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompts: Option<SlotPrompts>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validations: Vec<SlotValidation>,
}

/// Prompt ids attached to a dialog slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotPrompts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elicitation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotValidation {
    #[serde(rename = "type")]
    pub rule_type: ValidationType,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

// ---------------------------------------------------------------------------
// Prompt pool
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelPrompt {
    pub id: String,
    pub variations: Vec<PromptVariation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptVariation {
    #[serde(rename = "type")]
    pub variation_type: Variation,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delegation_strategy_round_trip() {
        assert_eq!(
            "SKILL_RESPONSE".parse::<DelegationStrategy>().ok(),
            Some(DelegationStrategy::SkillResponse)
        );
        assert_eq!(DelegationStrategy::Always.to_string(), "ALWAYS");
    }

    #[test]
    fn test_delegation_strategy_rejects_unknown() {
        let err = "SOMETIMES".parse::<DelegationStrategy>().unwrap_err();
        assert_eq!(err, BuildError::InvalidDelegation("SOMETIMES".to_string()));
    }

    #[test]
    fn test_validation_type_requires_values() {
        assert!(ValidationType::InSet.requires_values());
        assert!(ValidationType::NotInSet.requires_values());
        assert!(!ValidationType::GreaterThan.requires_values());
    }

    #[test]
    fn test_variation_serializes_with_wire_name() {
        let v = PromptVariation {
            variation_type: Variation::Ssml,
            value: "<speak>hi</speak>".to_string(),
        };
        let json = serde_json::to_string(&v).unwrap();
        assert!(json.contains(r#""type":"SSML""#));
    }

    #[test]
    fn test_empty_collections_are_omitted() {
        let model = Model {
            interaction_model: InteractionModel {
                language_model: LanguageModel {
                    invocation_name: "demo skill".to_string(),
                    intents: vec![ModelIntent {
                        name: "AMAZON.StopIntent".to_string(),
                        samples: vec![],
                        slots: vec![],
                    }],
                    types: vec![],
                },
                dialog: None,
                prompts: vec![],
            },
        };
        let json = serde_json::to_string(&model).unwrap();
        assert!(!json.contains("dialog"));
        assert!(!json.contains("types"));
        assert!(!json.contains("samples"));
    }
}

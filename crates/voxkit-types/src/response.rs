//! Response envelope wire types.
//!
//! Plain data mirrored to the platform's response JSON. The builder that
//! assembles these lives in the core crate.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::request::Intent;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub version: String,
    #[serde(
        rename = "sessionAttributes",
        default,
        skip_serializing_if = "HashMap::is_empty"
    )]
    pub session_attributes: HashMap<String, Value>,
    pub response: ResponseBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseBody {
    #[serde(
        rename = "outputSpeech",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub output_speech: Option<OutputSpeech>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<Card>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub directives: Vec<Directive>,
    #[serde(rename = "shouldEndSession")]
    pub should_end_session: bool,
    #[serde(
        rename = "canFulfillIntent",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub can_fulfill_intent: Option<CanFulfillIntent>,
}

/// Plain text or SSML speech output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSpeech {
    #[serde(rename = "type")]
    pub speech_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ssml: String,
}

impl OutputSpeech {
    /// Wraps `text` as SSML speech when it carries `<speak>` tags,
    /// plain text otherwise.
    pub fn from_text(text: &str) -> Self {
        if text.starts_with("<speak>") && text.ends_with("</speak>") {
            return Self {
                speech_type: "SSML".to_string(),
                text: String::new(),
                ssml: text.to_string(),
            };
        }

        Self {
            speech_type: "PlainText".to_string(),
            text: text.to_string(),
            ssml: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    #[serde(rename = "type")]
    pub card_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    #[serde(
        rename = "smallImageUrl",
        default,
        skip_serializing_if = "String::is_empty"
    )]
    pub small_image_url: String,
    #[serde(
        rename = "largeImageUrl",
        default,
        skip_serializing_if = "String::is_empty"
    )]
    pub large_image_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reprompt {
    #[serde(
        rename = "outputSpeech",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub output_speech: Option<OutputSpeech>,
}

/// Dialog directive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DirectiveKind {
    #[serde(rename = "Dialog.Delegate")]
    DialogDelegate,
    #[serde(rename = "Dialog.ElicitSlot")]
    DialogElicitSlot,
    #[serde(rename = "Dialog.ConfirmSlot")]
    DialogConfirmSlot,
    #[serde(rename = "Dialog.ConfirmIntent")]
    DialogConfirmIntent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Directive {
    #[serde(rename = "type")]
    pub kind: DirectiveKind,
    #[serde(
        rename = "slotToElicit",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub slot_to_elicit: Option<String>,
    #[serde(
        rename = "updatedIntent",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_intent: Option<Intent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanFulfillIntent {
    #[serde(rename = "canFulfill")]
    pub can_fulfill: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub slots: HashMap<String, CanFulfillSlot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanFulfillSlot {
    #[serde(rename = "canUnderstand")]
    pub can_understand: String,
    #[serde(rename = "canFulfill")]
    pub can_fulfill: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_speech_detects_ssml() {
        let speech = OutputSpeech::from_text("<speak>hello</speak>");
        assert_eq!(speech.speech_type, "SSML");
        assert_eq!(speech.ssml, "<speak>hello</speak>");
        assert!(speech.text.is_empty());
    }

    #[test]
    fn test_output_speech_plain_text() {
        let speech = OutputSpeech::from_text("hello");
        assert_eq!(speech.speech_type, "PlainText");
        assert_eq!(speech.text, "hello");
        assert!(speech.ssml.is_empty());
    }

    #[test]
    fn test_envelope_omits_empty_elements() {
        let envelope = ResponseEnvelope {
            version: "1.0".to_string(),
            session_attributes: HashMap::new(),
            response: ResponseBody {
                output_speech: None,
                card: None,
                reprompt: None,
                directives: vec![],
                should_end_session: true,
                can_fulfill_intent: None,
            },
        };
        let json = serde_json::to_string(&envelope).unwrap();
        assert_eq!(
            json,
            r#"{"version":"1.0","response":{"shouldEndSession":true}}"#
        );
    }
}

//! Runtime response assembly.
//!
//! Handlers fill a [`ResponseBuilder`] during dispatch; the envelope is
//! serialized once at the end. The helpers at the bottom cover the shared
//! failure paths: resolving the request locale and turning accumulated
//! translation errors into a spoken error response.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use voxkit_types::error::LocaleError;
use voxkit_types::response::{
    CanFulfillIntent, Card, Directive, Image, OutputSpeech, Reprompt, ResponseBody,
    ResponseEnvelope,
};

use crate::l10n::{
    KEY_ERROR_MISSING_PLACEHOLDER_SSML, KEY_ERROR_MISSING_PLACEHOLDER_TEXT,
    KEY_ERROR_MISSING_PLACEHOLDER_TITLE, KEY_ERROR_NO_TRANSLATION_SSML,
    KEY_ERROR_NO_TRANSLATION_TEXT, KEY_ERROR_NO_TRANSLATION_TITLE, KEY_ERROR_TRANSLATION_SSML,
    KEY_ERROR_TRANSLATION_TEXT, KEY_ERROR_TRANSLATION_TITLE, Locale, LocaleRegistry,
};

/// Envelope version accepted by the platform.
pub const RESPONSE_VERSION: &str = "1.0";

/// A fully resolved response in one value.
///
/// `image` may carry a `{}` marker which expands to `small` and `large`
/// for the two card image sizes. `speech` becomes a reprompt instead of
/// output speech when `reprompt` is set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    pub title: String,
    pub text: String,
    pub speech: String,
    pub image: String,
    pub reprompt: bool,
    pub end: bool,
}

/// Assembles a [`ResponseEnvelope`] step by step.
#[derive(Debug, Default)]
pub struct ResponseBuilder {
    speech: Option<OutputSpeech>,
    card: Option<Card>,
    reprompt: Option<Reprompt>,
    directives: Vec<Directive>,
    should_end_session: bool,
    session_attributes: HashMap<String, Value>,
    can_fulfill_intent: Option<CanFulfillIntent>,
}

impl ResponseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a resolved [`Response`] in one step.
    pub fn with(&mut self, response: Response) -> &mut Self {
        if response.image.is_empty() {
            self.with_simple_card(&response.title, &response.text);
        } else {
            let image = Image {
                small_image_url: response.image.replace("{}", "small"),
                large_image_url: response.image.replace("{}", "large"),
            };
            self.with_standard_card(&response.title, &response.text, Some(image));
        }
        if !response.speech.is_empty() {
            if response.reprompt {
                self.with_reprompt(&response.speech);
            } else {
                self.with_speech(&response.speech);
            }
        }
        self.should_end_session = response.end;
        self
    }

    /// Set the output speech; `<speak>` wrapped text is sent as SSML.
    pub fn with_speech(&mut self, text: &str) -> &mut Self {
        self.speech = Some(OutputSpeech::from_text(text));
        self
    }

    /// Set the reprompt spoken after a period of silence.
    pub fn with_reprompt(&mut self, text: &str) -> &mut Self {
        self.reprompt = Some(Reprompt {
            output_speech: Some(OutputSpeech::from_text(text)),
        });
        self
    }

    pub fn with_simple_card(&mut self, title: &str, content: &str) -> &mut Self {
        self.card = Some(Card {
            card_type: "Simple".to_string(),
            title: title.to_string(),
            text: String::new(),
            content: content.to_string(),
            image: None,
        });
        self
    }

    pub fn with_standard_card(
        &mut self,
        title: &str,
        text: &str,
        image: Option<Image>,
    ) -> &mut Self {
        self.card = Some(Card {
            card_type: "Standard".to_string(),
            title: title.to_string(),
            text: text.to_string(),
            content: String::new(),
            image,
        });
        self
    }

    pub fn with_should_end_session(&mut self, end: bool) -> &mut Self {
        self.should_end_session = end;
        self
    }

    pub fn with_session_attributes(&mut self, attributes: HashMap<String, Value>) -> &mut Self {
        self.session_attributes = attributes;
        self
    }

    pub fn with_can_fulfill_intent(&mut self, can_fulfill: CanFulfillIntent) -> &mut Self {
        self.can_fulfill_intent = Some(can_fulfill);
        self
    }

    pub fn add_directive(&mut self, directive: Directive) -> &mut Self {
        self.directives.push(directive);
        self
    }

    pub fn build(&self) -> ResponseEnvelope {
        ResponseEnvelope {
            version: RESPONSE_VERSION.to_string(),
            session_attributes: self.session_attributes.clone(),
            response: ResponseBody {
                output_speech: self.speech.clone(),
                card: self.card.clone(),
                reprompt: self.reprompt.clone(),
                directives: self.directives.clone(),
                should_end_session: self.should_end_session,
                can_fulfill_intent: self.can_fulfill_intent.clone(),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Shared failure paths
// ---------------------------------------------------------------------------

/// Resolve the request locale, falling back to the registry default.
///
/// With no usable locale at all, the builder is loaded with a terminal
/// error response and `None` is returned.
pub fn locale_or_fallback(
    b: &mut ResponseBuilder,
    registry: &LocaleRegistry,
    tag: &str,
) -> Option<Arc<Locale>> {
    if let Ok(loc) = registry.resolve(tag) {
        return Some(loc);
    }
    if let Some(loc) = registry.default_locale() {
        tracing::warn!(locale = tag, fallback = loc.name(), "unknown request locale");
        return Some(loc);
    }
    tracing::error!(locale = tag, "no locale registered");
    b.with(Response {
        title: "Error".to_string(),
        text: "No locale found!".to_string(),
        end: true,
        ..Response::default()
    });
    None
}

/// Respond to a specific translation failure with the matching error texts.
pub fn handle_locale_error(b: &mut ResponseBuilder, loc: &Locale, err: &LocaleError) {
    tracing::error!(locale = loc.name(), error = %err, "translation failure");
    let (title_key, text_key, ssml_key) = match err {
        LocaleError::NoTranslation { .. } => (
            KEY_ERROR_NO_TRANSLATION_TITLE,
            KEY_ERROR_NO_TRANSLATION_TEXT,
            KEY_ERROR_NO_TRANSLATION_SSML,
        ),
        LocaleError::MissingPlaceholder { .. } => (
            KEY_ERROR_MISSING_PLACEHOLDER_TITLE,
            KEY_ERROR_MISSING_PLACEHOLDER_TEXT,
            KEY_ERROR_MISSING_PLACEHOLDER_SSML,
        ),
    };
    respond_error(b, loc, err, title_key, text_key, ssml_key);
}

/// Turn accumulated lookup errors into a generic translation error
/// response. Returns `true` when an error response was written; the
/// handler should stop in that case.
pub fn check_locale_errors(b: &mut ResponseBuilder, loc: &Locale) -> bool {
    let Some(err) = loc.last_error() else {
        return false;
    };
    tracing::error!(locale = loc.name(), error = %err, "handler left translation errors");
    respond_error(
        b,
        loc,
        &err,
        KEY_ERROR_TRANSLATION_TITLE,
        KEY_ERROR_TRANSLATION_TEXT,
        KEY_ERROR_TRANSLATION_SSML,
    );
    true
}

fn respond_error(
    b: &mut ResponseBuilder,
    loc: &Locale,
    err: &LocaleError,
    title_key: &str,
    text_key: &str,
    ssml_key: &str,
) {
    let key = err.key().to_string();
    let mut response = Response {
        title: loc.get_any(title_key, &[]),
        text: loc.get_any(text_key, &[&key]),
        speech: loc.get_any(ssml_key, &[&key]),
        end: true,
        ..Response::default()
    };
    // the error texts themselves may be untranslated
    loc.reset_errors();
    if response.title.is_empty() {
        response.title = "Error".to_string();
    }
    if response.text.is_empty() {
        response.text = format!("An error occurred: {err}");
    }
    b.with(response);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::l10n::{KEY_ERROR_NO_TRANSLATION_TITLE, KEY_ERROR_TRANSLATION_TITLE};

    #[test]
    fn test_with_builds_simple_card_and_speech() {
        let mut b = ResponseBuilder::new();
        b.with(Response {
            title: "Welcome".to_string(),
            text: "Hello there.".to_string(),
            speech: "Hello there.".to_string(),
            end: false,
            ..Response::default()
        });
        let envelope = b.build();

        assert_eq!(envelope.version, "1.0");
        assert!(!envelope.response.should_end_session);
        let card = envelope.response.card.unwrap();
        assert_eq!(card.card_type, "Simple");
        assert_eq!(card.content, "Hello there.");
        assert!(card.text.is_empty());
        let speech = envelope.response.output_speech.unwrap();
        assert_eq!(speech.speech_type, "PlainText");
        assert!(envelope.response.reprompt.is_none());
    }

    #[test]
    fn test_with_image_builds_standard_card() {
        let mut b = ResponseBuilder::new();
        b.with(Response {
            title: "Welcome".to_string(),
            text: "Hello.".to_string(),
            image: "https://img.example.com/{}.png".to_string(),
            ..Response::default()
        });
        let card = b.build().response.card.unwrap();
        assert_eq!(card.card_type, "Standard");
        assert_eq!(card.text, "Hello.");
        let image = card.image.unwrap();
        assert_eq!(image.small_image_url, "https://img.example.com/small.png");
        assert_eq!(image.large_image_url, "https://img.example.com/large.png");
    }

    #[test]
    fn test_with_reprompt_flag_sets_reprompt_speech() {
        let mut b = ResponseBuilder::new();
        b.with(Response {
            title: "Hm?".to_string(),
            text: "Say it again.".to_string(),
            speech: "Say it again.".to_string(),
            reprompt: true,
            ..Response::default()
        });
        let body = b.build().response;
        assert!(body.output_speech.is_none());
        assert!(body.reprompt.unwrap().output_speech.is_some());
    }

    #[test]
    fn test_ssml_speech_detected() {
        let mut b = ResponseBuilder::new();
        b.with_speech("<speak>Hello.</speak>");
        let speech = b.build().response.output_speech.unwrap();
        assert_eq!(speech.speech_type, "SSML");
    }

    #[test]
    fn test_session_attributes_survive_build() {
        let mut attributes = HashMap::new();
        attributes.insert("count".to_string(), Value::from(3));
        let mut b = ResponseBuilder::new();
        b.with_session_attributes(attributes);
        let envelope = b.build();
        assert_eq!(envelope.session_attributes["count"], Value::from(3));
    }

    #[test]
    fn test_locale_or_fallback_uses_default() {
        let registry = LocaleRegistry::new();
        registry.register(Locale::new("en-US")).unwrap();
        let mut b = ResponseBuilder::new();
        let loc = locale_or_fallback(&mut b, &registry, "fr-FR").unwrap();
        assert_eq!(loc.name(), "en-US");
    }

    #[test]
    fn test_locale_or_fallback_without_locales_fails_terminally() {
        let registry = LocaleRegistry::new();
        let mut b = ResponseBuilder::new();
        assert!(locale_or_fallback(&mut b, &registry, "fr-FR").is_none());
        let envelope = b.build();
        assert!(envelope.response.should_end_session);
        assert_eq!(envelope.response.card.unwrap().content, "No locale found!");
    }

    #[test]
    fn test_handle_locale_error_uses_translated_texts() {
        let loc = Locale::new("en-US");
        loc.set(KEY_ERROR_NO_TRANSLATION_TITLE, ["Missing text"]);
        loc.set(
            crate::l10n::KEY_ERROR_NO_TRANSLATION_TEXT,
            ["No text for '{}'."],
        );
        let err = LocaleError::NoTranslation {
            locale: "en-US".to_string(),
            key: "Launch_Text".to_string(),
        };

        let mut b = ResponseBuilder::new();
        handle_locale_error(&mut b, &loc, &err);
        let envelope = b.build();
        let card = envelope.response.card.unwrap();
        assert_eq!(card.title, "Missing text");
        assert_eq!(card.content, "No text for 'Launch_Text'.");
        assert!(envelope.response.should_end_session);
        assert!(loc.errors().is_empty());
    }

    #[test]
    fn test_handle_locale_error_falls_back_to_builtin_texts() {
        let loc = Locale::new("en-US");
        let err = LocaleError::MissingPlaceholder {
            locale: "en-US".to_string(),
            key: "Greeting".to_string(),
        };
        let mut b = ResponseBuilder::new();
        handle_locale_error(&mut b, &loc, &err);
        let card = b.build().response.card.unwrap();
        assert_eq!(card.title, "Error");
        assert!(card.content.contains("Greeting"));
        // no cascading errors from the missing error texts themselves
        assert!(loc.errors().is_empty());
    }

    #[test]
    fn test_check_locale_errors_clean_locale() {
        let loc = Locale::new("en-US");
        let mut b = ResponseBuilder::new();
        assert!(!check_locale_errors(&mut b, &loc));
    }

    #[test]
    fn test_check_locale_errors_responds_and_resets() {
        let loc = Locale::new("en-US");
        loc.set(KEY_ERROR_TRANSLATION_TITLE, ["Translation broken"]);
        loc.get("Missing_Key", &[]);

        let mut b = ResponseBuilder::new();
        assert!(check_locale_errors(&mut b, &loc));
        let card = b.build().response.card.unwrap();
        assert_eq!(card.title, "Translation broken");
        assert!(loc.errors().is_empty());
    }
}

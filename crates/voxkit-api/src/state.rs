//! Application state wiring the demo skill together.
//!
//! The skill definition lives here: locales with their translations, the
//! manifest and model builders, and the request router. Both the HTTP
//! endpoint and the export command work off this state.

use std::sync::Arc;

use voxkit_core::builder::SkillBuilder;
use voxkit_core::l10n::{
    KEY_CANCEL_SSML, KEY_CANCEL_TEXT, KEY_CANCEL_TITLE, KEY_ERROR_NO_TRANSLATION_TEXT,
    KEY_ERROR_NO_TRANSLATION_TITLE, KEY_ERROR_TRANSLATION_TEXT, KEY_ERROR_TRANSLATION_TITLE,
    KEY_HELP_SSML, KEY_HELP_TEXT, KEY_HELP_TITLE, KEY_LAUNCH_SSML, KEY_LAUNCH_TEXT,
    KEY_LAUNCH_TITLE, KEY_SKILL_INVOCATION, KEY_STOP_SSML, KEY_STOP_TEXT, KEY_STOP_TITLE,
    LocaleRegistry,
};
use voxkit_core::response::{
    Response, ResponseBuilder, check_locale_errors, locale_or_fallback,
};
use voxkit_core::router::SkillRouter;
use voxkit_core::ssml;
use voxkit_types::manifest::Category;
use voxkit_types::model::Variation;
use voxkit_types::request::{CANCEL_INTENT, HELP_INTENT, RequestEnvelope, RequestKind, STOP_INTENT};

const KEY_ORDER_TITLE: &str = "Order_Title";
const KEY_ORDER_TEXT: &str = "Order_Text";
const KEY_ORDER_SSML: &str = "Order_SSML";

/// Shared application state, used by HTTP handlers and CLI commands.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<LocaleRegistry>,
    pub skill: Arc<SkillBuilder>,
    pub router: Arc<SkillRouter>,
}

impl AppState {
    /// Assemble the demo skill: locales, builders, and handlers.
    pub fn init() -> anyhow::Result<Self> {
        let mut skill = build_skill()?;
        skill.with_model();
        let registry = skill.registry();
        configure_model(&mut skill)?;
        let router = build_router(Arc::clone(&registry));

        Ok(Self {
            registry,
            skill: Arc::new(skill),
            router: Arc::new(router),
        })
    }
}

fn build_skill() -> anyhow::Result<SkillBuilder> {
    let mut skill = SkillBuilder::new();
    skill
        .with_category(Category::DeliveryAndTakeout)
        .add_locale("en-US")
        .add_locale("de-DE");

    if let Some(l) = skill.locale("en-US") {
        l.with_locale_name("Pizza Corner")
            .with_locale_summary("Order a pizza by voice.")
            .with_locale_description("Order your favorite pizza without lifting a finger.")
            .with_locale_examples(["order a large pizza", "open pizza corner"])
            .with_locale_keywords(["pizza", "delivery"])
            .with_locale_small_icon("https://img.example.com/icon-108.png")
            .with_locale_large_icon("https://img.example.com/icon-512.png")
            .with_locale_privacy_policy_url("https://example.com/privacy");
    }
    if let Some(l) = skill.locale("de-DE") {
        l.with_locale_name("Pizza Corner")
            .with_locale_summary("Pizza per Sprache bestellen.")
            .with_locale_description("Bestelle deine Lieblingspizza ohne einen Finger zu ruehren.")
            .with_locale_examples(["bestelle eine grosse Pizza", "oeffne Pizza Corner"])
            .with_locale_keywords(["Pizza", "Lieferung"])
            .with_locale_small_icon("https://img.example.com/icon-108.png")
            .with_locale_large_icon("https://img.example.com/icon-512.png")
            .with_locale_privacy_policy_url("https://example.com/datenschutz");
    }
    skill.with_default_locale_testing_instructions("Say: open pizza corner, then order a pizza.");

    let registry = skill.registry();

    let en = registry.resolve("en-US")?;
    en.set(KEY_SKILL_INVOCATION, ["pizza corner"]);
    en.set(KEY_LAUNCH_TITLE, ["Welcome"]);
    en.set(
        KEY_LAUNCH_TEXT,
        ["Welcome to Pizza Corner. What would you like to order?"],
    );
    en.set(
        KEY_LAUNCH_SSML,
        [ssml::speak("Welcome to Pizza Corner. What would you like to order?").as_str()],
    );
    en.set(KEY_HELP_TITLE, ["Help"]);
    en.set(KEY_HELP_TEXT, ["Say: order a pizza."]);
    en.set(KEY_HELP_SSML, [ssml::speak("Say: order a pizza.").as_str()]);
    en.set(KEY_STOP_TITLE, ["Goodbye"]);
    en.set(KEY_STOP_TEXT, ["See you next time!", "Goodbye!"]);
    en.set(
        KEY_STOP_SSML,
        [
            ssml::speak("See you next time!").as_str(),
            ssml::speak("Goodbye!").as_str(),
        ],
    );
    en.set(KEY_CANCEL_TITLE, ["Canceled"]);
    en.set(KEY_CANCEL_TEXT, ["Your order was canceled."]);
    en.set(
        KEY_CANCEL_SSML,
        [ssml::speak("Your order was canceled.").as_str()],
    );
    en.set(KEY_ORDER_TITLE, ["Your order"]);
    en.set(KEY_ORDER_TEXT, ["One {} pizza, coming right up."]);
    en.set(
        KEY_ORDER_SSML,
        [ssml::speak("One {} pizza, coming right up.").as_str()],
    );
    en.set(KEY_ERROR_TRANSLATION_TITLE, ["Translation error"]);
    en.set(KEY_ERROR_TRANSLATION_TEXT, ["The text for '{}' is missing."]);
    en.set(KEY_ERROR_NO_TRANSLATION_TITLE, ["Missing text"]);
    en.set(
        KEY_ERROR_NO_TRANSLATION_TEXT,
        ["There is no translation for '{}'."],
    );

    let de = registry.resolve("de-DE")?;
    de.set(KEY_SKILL_INVOCATION, ["pizza corner"]);
    de.set(KEY_LAUNCH_TITLE, ["Willkommen"]);
    de.set(
        KEY_LAUNCH_TEXT,
        ["Willkommen bei Pizza Corner. Was moechtest du bestellen?"],
    );
    de.set(
        KEY_LAUNCH_SSML,
        [ssml::speak("Willkommen bei Pizza Corner. Was moechtest du bestellen?").as_str()],
    );
    de.set(KEY_HELP_TITLE, ["Hilfe"]);
    de.set(KEY_HELP_TEXT, ["Sage: bestelle eine Pizza."]);
    de.set(
        KEY_HELP_SSML,
        [ssml::speak("Sage: bestelle eine Pizza.").as_str()],
    );
    de.set(KEY_STOP_TITLE, ["Tschuess"]);
    de.set(KEY_STOP_TEXT, ["Bis zum naechsten Mal!"]);
    de.set(
        KEY_STOP_SSML,
        [ssml::speak("Bis zum naechsten Mal!").as_str()],
    );
    de.set(KEY_CANCEL_TITLE, ["Abgebrochen"]);
    de.set(KEY_CANCEL_TEXT, ["Deine Bestellung wurde abgebrochen."]);
    de.set(
        KEY_CANCEL_SSML,
        [ssml::speak("Deine Bestellung wurde abgebrochen.").as_str()],
    );
    de.set(KEY_ORDER_TITLE, ["Deine Bestellung"]);
    de.set(KEY_ORDER_TEXT, ["Eine Pizza in {} kommt sofort."]);
    de.set(
        KEY_ORDER_SSML,
        [ssml::speak("Eine Pizza in {} kommt sofort.").as_str()],
    );
    de.set(KEY_ERROR_TRANSLATION_TITLE, ["Uebersetzungsfehler"]);
    de.set(KEY_ERROR_TRANSLATION_TEXT, ["Der Text fuer '{}' fehlt."]);
    de.set(KEY_ERROR_NO_TRANSLATION_TITLE, ["Fehlender Text"]);
    de.set(
        KEY_ERROR_NO_TRANSLATION_TEXT,
        ["Es gibt keine Uebersetzung fuer '{}'."],
    );

    Ok(skill)
}

fn configure_model(skill: &mut SkillBuilder) -> anyhow::Result<()> {
    let Some(model) = skill.model() else {
        return Ok(());
    };

    model.with_intent("OrderIntent");
    if let Some(intent) = model.intent("OrderIntent") {
        intent.with_locale_samples("en-US", ["order a {} pizza", "get me a {} pizza"]);
        intent.with_locale_samples("de-DE", ["bestelle eine {} Pizza"]);
        intent.with_slot("Size", "SizeType");
    }

    model.with_type("SizeType");
    if let Some(ty) = model.custom_type("SizeType") {
        ty.with_locale_values("en-US", ["small", "medium", "large"]);
        ty.with_locale_values("de-DE", ["klein", "mittel", "gross"]);
    }

    model.with_elicitation_slot_prompt("OrderIntent", "Size");
    if let Some(prompt) = model.elicitation_prompt("OrderIntent", "Size") {
        prompt.with_variation(Variation::PlainText);
        if let Some(v) = prompt.variation(Variation::PlainText) {
            v.with_locale_values(
                "en-US",
                Variation::PlainText,
                ["Which size would you like?", "What size?"],
            );
            v.with_locale_values("de-DE", Variation::PlainText, ["Welche Groesse?"]);
        }
    }

    Ok(())
}

fn build_router(registry: Arc<LocaleRegistry>) -> SkillRouter {
    let mut router = SkillRouter::new();

    router.handle_request_kind(
        RequestKind::Launch,
        speech_handler(
            Arc::clone(&registry),
            KEY_LAUNCH_TITLE,
            KEY_LAUNCH_TEXT,
            KEY_LAUNCH_SSML,
            false,
        ),
    );
    router.handle_request_kind(
        RequestKind::SessionEnded,
        |b: &mut ResponseBuilder, _: &RequestEnvelope| {
            b.with_should_end_session(true);
        },
    );

    router.handle_intent(
        HELP_INTENT,
        speech_handler(
            Arc::clone(&registry),
            KEY_HELP_TITLE,
            KEY_HELP_TEXT,
            KEY_HELP_SSML,
            false,
        ),
    );
    router.handle_intent(
        STOP_INTENT,
        speech_handler(
            Arc::clone(&registry),
            KEY_STOP_TITLE,
            KEY_STOP_TEXT,
            KEY_STOP_SSML,
            true,
        ),
    );
    router.handle_intent(
        CANCEL_INTENT,
        speech_handler(
            Arc::clone(&registry),
            KEY_CANCEL_TITLE,
            KEY_CANCEL_TEXT,
            KEY_CANCEL_SSML,
            true,
        ),
    );

    let order_registry = Arc::clone(&registry);
    router.handle_intent(
        "OrderIntent",
        move |b: &mut ResponseBuilder, req: &RequestEnvelope| {
            let Some(loc) = locale_or_fallback(b, &order_registry, req.locale()) else {
                return;
            };
            let size = req.slot_value("Size");
            let response = Response {
                title: loc.get_any(KEY_ORDER_TITLE, &[]),
                text: loc.get_any(KEY_ORDER_TEXT, &[size]),
                speech: loc.get_any(KEY_ORDER_SSML, &[size]),
                end: true,
                ..Response::default()
            };
            if check_locale_errors(b, &loc) {
                return;
            }
            b.with(response);
        },
    );

    router
}

/// Handler answering with the `get_any` variant of a title/text/SSML key
/// triple for the request locale.
fn speech_handler(
    registry: Arc<LocaleRegistry>,
    title_key: &'static str,
    text_key: &'static str,
    ssml_key: &'static str,
    end: bool,
) -> impl Fn(&mut ResponseBuilder, &RequestEnvelope) + Send + Sync {
    move |b, req| {
        let Some(loc) = locale_or_fallback(b, &registry, req.locale()) else {
            return;
        };
        let response = Response {
            title: loc.get_any(title_key, &[]),
            text: loc.get_any(text_key, &[]),
            speech: loc.get_any(ssml_key, &[]),
            end,
            ..Response::default()
        };
        if check_locale_errors(b, &loc) {
            return;
        }
        b.with(response);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intent_request(locale: &str, intent: &str, size: Option<&str>) -> RequestEnvelope {
        let slots = match size {
            Some(size) => format!(
                r#","slots":{{"Size":{{"name":"Size","value":"{size}"}}}}"#
            ),
            None => String::new(),
        };
        serde_json::from_str(&format!(
            r#"{{
                "version": "1.0",
                "request": {{
                    "type": "IntentRequest",
                    "requestId": "amzn1.echo-api.request.1",
                    "timestamp": "2023-05-01T10:00:00Z",
                    "locale": "{locale}",
                    "intent": {{ "name": "{intent}"{slots} }}
                }}
            }}"#,
        ))
        .unwrap()
    }

    fn launch_request(locale: &str) -> RequestEnvelope {
        serde_json::from_str(&format!(
            r#"{{
                "version": "1.0",
                "request": {{
                    "type": "LaunchRequest",
                    "requestId": "amzn1.echo-api.request.2",
                    "timestamp": "2023-05-01T10:00:00Z",
                    "locale": "{locale}"
                }}
            }}"#,
        ))
        .unwrap()
    }

    #[test]
    fn test_state_builds_skill_and_models() {
        let state = AppState::init().unwrap();
        let skill = state.skill.build().unwrap();
        assert_eq!(skill.manifest.publishing.locales.len(), 2);

        let models = state.skill.build_models().unwrap();
        assert_eq!(models.len(), 2);
        assert_eq!(
            models["en-US"].interaction_model.language_model.invocation_name,
            "pizza corner"
        );
        assert_eq!(models["en-US"].interaction_model.prompts.len(), 1);
    }

    #[test]
    fn test_launch_is_answered_in_request_locale() {
        let state = AppState::init().unwrap();
        let envelope = state.router.dispatch(&launch_request("de-DE"));
        let card = envelope.response.card.unwrap();
        assert_eq!(card.title, "Willkommen");
        assert!(!envelope.response.should_end_session);
    }

    #[test]
    fn test_order_intent_uses_slot_value() {
        let state = AppState::init().unwrap();
        let envelope =
            state
                .router
                .dispatch(&intent_request("en-US", "OrderIntent", Some("large")));
        let card = envelope.response.card.unwrap();
        assert_eq!(card.content, "One large pizza, coming right up.");
        assert!(envelope.response.should_end_session);
    }

    #[test]
    fn test_unknown_locale_falls_back_to_default() {
        let state = AppState::init().unwrap();
        let envelope = state.router.dispatch(&launch_request("fr-FR"));
        assert_eq!(envelope.response.card.unwrap().title, "Welcome");
    }

    #[test]
    fn test_stop_intent_ends_session() {
        let state = AppState::init().unwrap();
        let envelope = state
            .router
            .dispatch(&intent_request("en-US", STOP_INTENT, None));
        assert!(envelope.response.should_end_session);
    }
}

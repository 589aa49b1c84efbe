//! Request dispatch.
//!
//! A [`SkillRouter`] maps request kinds and intent names to handlers.
//! Intent requests are routed by intent name; everything else by request
//! kind. Requests with no matching handler get a terminal error response
//! instead of panicking the invocation.

use std::collections::HashMap;

use voxkit_types::request::{RequestEnvelope, RequestKind};
use voxkit_types::response::ResponseEnvelope;

use crate::response::{Response, ResponseBuilder};

/// A request handler. Handlers write into the builder; they never fail the
/// invocation, failures become error responses.
pub trait Handler: Send + Sync {
    fn handle(&self, b: &mut ResponseBuilder, req: &RequestEnvelope);
}

impl<F> Handler for F
where
    F: Fn(&mut ResponseBuilder, &RequestEnvelope) + Send + Sync,
{
    fn handle(&self, b: &mut ResponseBuilder, req: &RequestEnvelope) {
        self(b, req)
    }
}

/// Routes incoming envelopes to registered handlers.
#[derive(Default)]
pub struct SkillRouter {
    kinds: HashMap<RequestKind, Box<dyn Handler>>,
    intents: HashMap<String, Box<dyn Handler>>,
}

impl SkillRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for a non-intent request kind.
    ///
    /// [`RequestKind::Intent`] is ignored here; intent requests always go
    /// through the intent table.
    pub fn handle_request_kind(&mut self, kind: RequestKind, handler: impl Handler + 'static) {
        if kind == RequestKind::Intent {
            return;
        }
        self.kinds.insert(kind, Box::new(handler));
    }

    /// Register a handler for an intent by name.
    pub fn handle_intent(&mut self, intent: &str, handler: impl Handler + 'static) {
        self.intents.insert(intent.to_string(), Box::new(handler));
    }

    /// Dispatch one envelope and build the response.
    pub fn dispatch(&self, req: &RequestEnvelope) -> ResponseEnvelope {
        if tracing::enabled!(tracing::Level::DEBUG) {
            match serde_json::to_string(req) {
                Ok(json) => tracing::debug!(request = %json, "dispatching"),
                Err(err) => tracing::debug!(error = %err, "request not serializable"),
            }
        }

        let mut b = ResponseBuilder::new();
        self.handler_for(req).handle(&mut b, req);
        let envelope = b.build();

        if tracing::enabled!(tracing::Level::DEBUG) {
            if let Ok(json) = serde_json::to_string(&envelope) {
                tracing::debug!(response = %json, "dispatched");
            }
        }
        envelope
    }

    fn handler_for(&self, req: &RequestEnvelope) -> &dyn Handler {
        let handler = if req.is_intent_request() {
            self.intents.get(req.intent_name()).map(Box::as_ref)
        } else {
            self.kinds.get(&req.request_kind()).map(Box::as_ref)
        };
        handler.unwrap_or(&FallbackHandler)
    }
}

/// Responds when no handler matches the request.
struct FallbackHandler;

impl Handler for FallbackHandler {
    fn handle(&self, b: &mut ResponseBuilder, req: &RequestEnvelope) {
        tracing::error!(
            kind = ?req.request_kind(),
            intent = req.intent_name(),
            "no handler registered"
        );
        b.with(Response {
            title: "Error".to_string(),
            text: "An unexpected error occurred.".to_string(),
            end: true,
            ..Response::default()
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(json: &str) -> RequestEnvelope {
        serde_json::from_str(json).unwrap()
    }

    fn launch_request() -> RequestEnvelope {
        envelope(
            r#"{
                "version": "1.0",
                "request": {
                    "type": "LaunchRequest",
                    "requestId": "amzn1.echo-api.request.1",
                    "timestamp": "2023-05-01T10:00:00Z",
                    "locale": "en-US"
                }
            }"#,
        )
    }

    fn intent_request(name: &str) -> RequestEnvelope {
        envelope(&format!(
            r#"{{
                "version": "1.0",
                "request": {{
                    "type": "IntentRequest",
                    "requestId": "amzn1.echo-api.request.2",
                    "timestamp": "2023-05-01T10:00:00Z",
                    "locale": "en-US",
                    "intent": {{ "name": "{name}" }}
                }}
            }}"#,
        ))
    }

    #[test]
    fn test_dispatch_by_request_kind() {
        let mut router = SkillRouter::new();
        router.handle_request_kind(RequestKind::Launch, |b: &mut ResponseBuilder, _: &RequestEnvelope| {
            b.with_speech("Welcome!");
        });

        let envelope = router.dispatch(&launch_request());
        assert_eq!(envelope.response.output_speech.unwrap().text, "Welcome!");
    }

    #[test]
    fn test_dispatch_by_intent_name() {
        let mut router = SkillRouter::new();
        router.handle_intent("OrderIntent", |b: &mut ResponseBuilder, req: &RequestEnvelope| {
            b.with_speech(&format!("Handling {}.", req.intent_name()));
        });

        let envelope = router.dispatch(&intent_request("OrderIntent"));
        assert_eq!(
            envelope.response.output_speech.unwrap().text,
            "Handling OrderIntent."
        );
    }

    #[test]
    fn test_intent_kind_handler_is_ignored() {
        let mut router = SkillRouter::new();
        router.handle_request_kind(RequestKind::Intent, |b: &mut ResponseBuilder, _: &RequestEnvelope| {
            b.with_speech("should never run");
        });

        let envelope = router.dispatch(&intent_request("OrderIntent"));
        assert!(envelope.response.output_speech.is_none());
        assert!(envelope.response.should_end_session);
    }

    #[test]
    fn test_unhandled_request_gets_error_response() {
        let router = SkillRouter::new();
        let envelope = router.dispatch(&launch_request());
        assert!(envelope.response.should_end_session);
        let card = envelope.response.card.unwrap();
        assert_eq!(card.title, "Error");
        assert_eq!(card.content, "An unexpected error occurred.");
    }

    #[test]
    fn test_unknown_intent_gets_error_response() {
        let mut router = SkillRouter::new();
        router.handle_intent("OrderIntent", |b: &mut ResponseBuilder, _: &RequestEnvelope| {
            b.with_speech("ok");
        });

        let envelope = router.dispatch(&intent_request("OtherIntent"));
        assert!(envelope.response.should_end_session);
        assert!(envelope.response.card.is_some());
    }
}

//! Request envelope wire types and accessors.
//!
//! The envelope arrives as JSON from the voice platform. Accessor methods
//! return `RequestError` values for absent elements instead of panicking, so
//! handlers can decide how strict they want to be.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RequestError;

/// Built-in intent names.
pub const HELP_INTENT: &str = "AMAZON.HelpIntent";
pub const CANCEL_INTENT: &str = "AMAZON.CancelIntent";
pub const STOP_INTENT: &str = "AMAZON.StopIntent";
pub const FALLBACK_INTENT: &str = "AMAZON.FallbackIntent";

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// The `request.type` discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestKind {
    #[serde(rename = "LaunchRequest")]
    Launch,
    #[serde(rename = "IntentRequest")]
    Intent,
    #[serde(rename = "SessionEndedRequest")]
    SessionEnded,
    #[serde(rename = "CanFulfillIntentRequest")]
    CanFulfillIntent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DialogState {
    #[serde(rename = "STARTED")]
    Started,
    #[serde(rename = "IN_PROGRESS")]
    InProgress,
    #[serde(rename = "COMPLETED")]
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ConfirmationStatus {
    #[serde(rename = "NONE")]
    #[default]
    None,
    #[serde(rename = "CONFIRMED")]
    Confirmed,
    #[serde(rename = "DENIED")]
    Denied,
}

/// Entity resolution status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionStatusCode {
    #[serde(rename = "ER_SUCCESS_MATCH")]
    Match,
    #[serde(rename = "ER_SUCCESS_NO_MATCH")]
    NoMatch,
    #[serde(rename = "ER_ERROR_TIMEOUT")]
    Timeout,
    #[serde(rename = "ER_ERROR_EXCEPTION")]
    Exception,
}

// ---------------------------------------------------------------------------
// Intent and slots
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub name: String,
    #[serde(default)]
    pub slots: HashMap<String, Slot>,
    #[serde(rename = "confirmationStatus", default)]
    pub confirmation_status: ConfirmationStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub name: String,
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolutions: Option<Resolutions>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub source: String,
}

impl Slot {
    /// First resolution authority that produced a match.
    pub fn first_authority_with_match(&self) -> Result<&PerAuthority, RequestError> {
        let resolutions = self
            .resolutions
            .as_ref()
            .ok_or(RequestError::Missing("slot resolutions"))?;

        resolutions
            .per_authority
            .iter()
            .find(|a| {
                a.status
                    .as_ref()
                    .is_some_and(|s| s.code == ResolutionStatusCode::Match)
            })
            .ok_or(RequestError::NoResolutionMatch)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolutions {
    #[serde(rename = "resolutionsPerAuthority")]
    pub per_authority: Vec<PerAuthority>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerAuthority {
    pub authority: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ResolutionStatus>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<AuthorityValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionStatus {
    pub code: ResolutionStatusCode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorityValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<AuthorityValueValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorityValueValue {
    pub name: String,
    pub id: String,
}

// ---------------------------------------------------------------------------
// Session and context
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub new: bool,
    #[serde(rename = "sessionId")]
    pub session_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application: Option<Application>,
    #[serde(default)]
    pub attributes: HashMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    #[serde(rename = "applicationId")]
    pub application_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(
        rename = "accessToken",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub access_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Context {
    #[serde(rename = "System", default, skip_serializing_if = "Option::is_none")]
    pub system: Option<System>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct System {
    #[serde(
        rename = "apiAccessToken",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub api_access_token: Option<String>,
    #[serde(
        rename = "apiEndpoint",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub api_endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application: Option<Application>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<Device>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    #[serde(rename = "deviceId", default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Request and envelope
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    #[serde(rename = "type")]
    pub kind: RequestKind,
    #[serde(rename = "requestId")]
    pub request_id: String,
    pub timestamp: String,
    pub locale: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(
        rename = "dialogState",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub dialog_state: Option<DialogState>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<Session>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Context>,
    pub request: Request,
}

impl RequestEnvelope {
    /// The `request.type` discriminator.
    pub fn request_kind(&self) -> RequestKind {
        self.request.kind
    }

    pub fn is_intent_request(&self) -> bool {
        self.request.kind == RequestKind::Intent
    }

    /// The locale tag of the request, e.g. "en-US".
    pub fn locale(&self) -> &str {
        &self.request.locale
    }

    pub fn dialog_state(&self) -> Option<DialogState> {
        self.request.dialog_state
    }

    pub fn intent(&self) -> Result<&Intent, RequestError> {
        self.request
            .intent
            .as_ref()
            .ok_or(RequestError::Missing("intent"))
    }

    /// Intent name, or "" for non-intent requests.
    pub fn intent_name(&self) -> &str {
        self.intent().map(|i| i.name.as_str()).unwrap_or_default()
    }

    pub fn is_intent_confirmed(&self) -> bool {
        self.intent()
            .map(|i| i.confirmation_status == ConfirmationStatus::Confirmed)
            .unwrap_or(false)
    }

    /// All slots of the intent; empty for non-intent requests.
    pub fn slots(&self) -> HashMap<String, Slot> {
        self.intent().map(|i| i.slots.clone()).unwrap_or_default()
    }

    pub fn slot(&self, name: &str) -> Result<&Slot, RequestError> {
        self.intent()?
            .slots
            .get(name)
            .ok_or_else(|| RequestError::NoSlot(name.to_string()))
    }

    /// The raw value of the named slot, or "" when absent.
    pub fn slot_value(&self, name: &str) -> &str {
        self.slot(name).map(|s| s.value.as_str()).unwrap_or_default()
    }

    /// Application id from the session, falling back to the system context.
    pub fn application_id(&self) -> Result<&str, RequestError> {
        if let Some(session) = &self.session {
            return session
                .application
                .as_ref()
                .map(|a| a.application_id.as_str())
                .ok_or(RequestError::Missing("session.application"));
        }

        self.system()?
            .application
            .as_ref()
            .map(|a| a.application_id.as_str())
            .ok_or(RequestError::Missing("context.System.application"))
    }

    pub fn session_id(&self) -> &str {
        self.session
            .as_ref()
            .map(|s| s.session_id.as_str())
            .unwrap_or_default()
    }

    pub fn session_user(&self) -> Result<&User, RequestError> {
        self.session
            .as_ref()
            .and_then(|s| s.user.as_ref())
            .ok_or(RequestError::Missing("session.user"))
    }

    pub fn system(&self) -> Result<&System, RequestError> {
        self.context
            .as_ref()
            .and_then(|c| c.system.as_ref())
            .ok_or(RequestError::Missing("context.System"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intent_envelope() -> RequestEnvelope {
        serde_json::from_str(
            r#"{
                "version": "1.0",
                "session": {
                    "new": false,
                    "sessionId": "amzn1.echo-api.session.demo",
                    "application": {"applicationId": "amzn1.ask.skill.demo"},
                    "attributes": {},
                    "user": {"userId": "amzn1.ask.account.demo"}
                },
                "request": {
                    "type": "IntentRequest",
                    "requestId": "amzn1.echo-api.request.demo",
                    "timestamp": "2024-01-01T00:00:00Z",
                    "locale": "en-US",
                    "intent": {
                        "name": "OrderIntent",
                        "confirmationStatus": "CONFIRMED",
                        "slots": {
                            "Size": {
                                "name": "Size",
                                "value": "large",
                                "resolutions": {
                                    "resolutionsPerAuthority": [{
                                        "authority": "demo",
                                        "status": {"code": "ER_SUCCESS_MATCH"},
                                        "values": [{"value": {"name": "large", "id": "L"}}]
                                    }]
                                }
                            }
                        }
                    }
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_intent_accessors() {
        let req = intent_envelope();
        assert!(req.is_intent_request());
        assert_eq!(req.request_kind(), RequestKind::Intent);
        assert_eq!(req.intent_name(), "OrderIntent");
        assert_eq!(req.locale(), "en-US");
        assert!(req.is_intent_confirmed());
    }

    #[test]
    fn test_slot_value_lookup() {
        let req = intent_envelope();
        assert_eq!(req.slot_value("Size"), "large");
        assert_eq!(req.slot_value("Color"), "");
        assert_eq!(
            req.slot("Color").unwrap_err(),
            RequestError::NoSlot("Color".to_string())
        );
    }

    #[test]
    fn test_resolution_match() {
        let req = intent_envelope();
        let slot = req.slot("Size").unwrap();
        let authority = slot.first_authority_with_match().unwrap();
        assert_eq!(authority.values[0].value.as_ref().unwrap().id, "L");
    }

    #[test]
    fn test_application_id_prefers_session() {
        let req = intent_envelope();
        assert_eq!(req.application_id().unwrap(), "amzn1.ask.skill.demo");
    }

    #[test]
    fn test_launch_request_has_no_intent() {
        let req: RequestEnvelope = serde_json::from_str(
            r#"{
                "version": "1.0",
                "request": {
                    "type": "LaunchRequest",
                    "requestId": "r1",
                    "timestamp": "2024-01-01T00:00:00Z",
                    "locale": "de-DE"
                }
            }"#,
        )
        .unwrap();
        assert!(!req.is_intent_request());
        assert_eq!(req.intent_name(), "");
        assert_eq!(req.intent().unwrap_err(), RequestError::Missing("intent"));
        assert!(req.slots().is_empty());
    }
}

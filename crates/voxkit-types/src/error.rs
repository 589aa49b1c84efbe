//! Error types shared across the workspace.
//!
//! Three families, matching how failures propagate:
//! - [`LocaleError`]: soft lookup failures, accumulated on the locale and
//!   reported after the fact.
//! - [`RegistryError`]: registration and resolution failures, fatal to the
//!   calling operation.
//! - [`BuildError`]: configuration problems detected while assembling an
//!   interaction model or manifest, fatal to the whole build.

use thiserror::Error;

/// Soft translation failures, accumulated per locale.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocaleError {
    #[error("locale '{locale}': no translation for key '{key}'")]
    NoTranslation { locale: String, key: String },

    #[error("locale '{locale}': key '{key}' is missing arguments for its placeholders")]
    MissingPlaceholder { locale: String, key: String },
}

impl LocaleError {
    /// The locale the failed lookup ran against.
    pub fn locale(&self) -> &str {
        match self {
            Self::NoTranslation { locale, .. } | Self::MissingPlaceholder { locale, .. } => locale,
        }
    }

    /// The lookup key that failed.
    pub fn key(&self) -> &str {
        match self {
            Self::NoTranslation { key, .. } | Self::MissingPlaceholder { key, .. } => key,
        }
    }
}

/// Errors from locale registration and resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("locale name must not be empty")]
    EmptyName,

    #[error("locale '{0}' is already registered")]
    AlreadyRegistered(String),

    #[error("locale '{0}' is not registered")]
    NotFound(String),
}

/// Configuration errors detected while assembling a model or manifest.
///
/// A builder stores the first of these it encounters; every later chained
/// call is a no-op and every build attempt returns a clone of it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("no locales registered, add at least one before building")]
    NoLocales,

    #[error("no default locale set")]
    NoDefaultLocale,

    #[error("invalid delegation strategy: '{0}'")]
    InvalidDelegation(String),

    #[error("no matching slot '{slot}' on intent '{intent}'")]
    NoSuchIntentSlot { intent: String, slot: String },

    #[error("prompt '{0}' has no variations")]
    PromptWithoutVariations(String),

    #[error("prompt '{0}' resolved to no content")]
    PromptWithoutContent(String),

    #[error("validation rule '{0}' requires a non-empty value list")]
    ValidationRequiresValues(String),

    #[error("skill category is required")]
    MissingCategory,

    #[error("testing instructions must not be empty")]
    MissingTestingInstructions,

    #[error("locale '{locale}': required field '{field}' is empty")]
    IncompleteLocale { locale: String, field: String },

    #[error("locale '{0}': no more than 3 example phrases are allowed")]
    TooManyExamples(String),

    #[error("locale '{0}': no more than 3 keywords are allowed")]
    TooManyKeywords(String),

    #[error("locale '{0}': terms of use can not be set, remove the translation")]
    TermsOfUseUnsupported(String),

    #[error("no interaction model attached to the skill")]
    NoModel,
}

/// Errors from reading elements out of a request envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("element '{0}' was not found in the request")]
    Missing(&'static str),

    #[error("slot '{0}' was not found in the request")]
    NoSlot(String),

    #[error("no resolution with match")]
    NoResolutionMatch,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_error_accessors() {
        let err = LocaleError::NoTranslation {
            locale: "en-US".to_string(),
            key: "Greeting".to_string(),
        };
        assert_eq!(err.locale(), "en-US");
        assert_eq!(err.key(), "Greeting");
        assert!(err.to_string().contains("no translation"));
    }

    #[test]
    fn test_registry_error_display() {
        let err = RegistryError::AlreadyRegistered("de-DE".to_string());
        assert_eq!(err.to_string(), "locale 'de-DE' is already registered");
    }

    #[test]
    fn test_build_error_wraps_registry_error() {
        let err: BuildError = RegistryError::NotFound("fr-FR".to_string()).into();
        assert_eq!(err.to_string(), "locale 'fr-FR' is not registered");
    }

    #[test]
    fn test_no_such_intent_slot_display() {
        let err = BuildError::NoSuchIntentSlot {
            intent: "OrderIntent".to_string(),
            slot: "Size".to_string(),
        };
        assert!(err.to_string().contains("OrderIntent"));
        assert!(err.to_string().contains("Size"));
    }
}

//! Localization: locale snippet tables and the shared registry.
//!
//! Lookup keys follow a flat naming convention shared between the builders
//! and the runtime response path. The constants below are the well-known
//! keys; builders derive further keys from intent/slot/type names plus the
//! postfixes.

mod locale;
mod registry;

use voxkit_types::model::Variation;

pub use locale::Locale;
pub use registry::{LocaleRegistry, RegisterOptions};

// Skill manifest keys.
pub const KEY_SKILL_NAME: &str = "SKILL_Name";
pub const KEY_SKILL_DESCRIPTION: &str = "SKILL_Description";
pub const KEY_SKILL_SUMMARY: &str = "SKILL_Summary";
pub const KEY_SKILL_EXAMPLE_PHRASES: &str = "SKILL_ExamplePhrases";
pub const KEY_SKILL_KEYWORDS: &str = "SKILL_Keywords";
pub const KEY_SKILL_SMALL_ICON_URI: &str = "SKILL_SmallIconURI";
pub const KEY_SKILL_LARGE_ICON_URI: &str = "SKILL_LargeIconURI";
pub const KEY_SKILL_TESTING_INSTRUCTIONS: &str = "SKILL_TestingInstructions";
pub const KEY_SKILL_INVOCATION: &str = "SKILL_Invocation";
pub const KEY_SKILL_PRIVACY_POLICY_URL: &str = "SKILL_PrivacyPolicyURL";
pub const KEY_SKILL_TERMS_OF_USE_URL: &str = "SKILL_TermsOfUse";

// Postfixes for derived keys. The content-type postfixes come from
// [`Variation`] so prompt lookup keys cannot drift from it.
pub const KEY_POSTFIX_SAMPLES: &str = "_Samples";
pub const KEY_POSTFIX_VALUES: &str = "_Values";
pub const KEY_POSTFIX_TITLE: &str = "_Title";
pub const KEY_POSTFIX_TEXT: &str = Variation::PlainText.key_postfix();
pub const KEY_POSTFIX_SSML: &str = Variation::Ssml.key_postfix();

// Error response keys.
pub const KEY_ERROR_TITLE: &str = "Error_Title";
pub const KEY_ERROR_TEXT: &str = "Error_Text";
pub const KEY_ERROR_SSML: &str = "Error_SSML";
pub const KEY_ERROR_UNKNOWN_TITLE: &str = "Error_Unknown_Title";
pub const KEY_ERROR_UNKNOWN_TEXT: &str = "Error_Unknown_Text";
pub const KEY_ERROR_UNKNOWN_SSML: &str = "Error_Unknown_SSML";
pub const KEY_ERROR_NOT_FOUND_TITLE: &str = "Error_NotFound_Title";
pub const KEY_ERROR_NOT_FOUND_TEXT: &str = "Error_NotFound_Text";
pub const KEY_ERROR_NOT_FOUND_SSML: &str = "Error_NotFound_SSML";
pub const KEY_ERROR_LOCALE_NOT_FOUND_TITLE: &str = "Error_LocaleNotFound_Title";
pub const KEY_ERROR_LOCALE_NOT_FOUND_TEXT: &str = "Error_LocaleNotFound_Text";
pub const KEY_ERROR_LOCALE_NOT_FOUND_SSML: &str = "Error_LocaleNotFound_SSML";
pub const KEY_ERROR_TRANSLATION_TITLE: &str = "Error_Translation_Title";
pub const KEY_ERROR_TRANSLATION_TEXT: &str = "Error_Translation_Text";
pub const KEY_ERROR_TRANSLATION_SSML: &str = "Error_Translation_SSML";
pub const KEY_ERROR_NO_TRANSLATION_TITLE: &str = "Error_NoTranslation_Title";
pub const KEY_ERROR_NO_TRANSLATION_TEXT: &str = "Error_NoTranslation_Text";
pub const KEY_ERROR_NO_TRANSLATION_SSML: &str = "Error_NoTranslation_SSML";
pub const KEY_ERROR_MISSING_PLACEHOLDER_TITLE: &str = "Error_MissingPlaceholder_Title";
pub const KEY_ERROR_MISSING_PLACEHOLDER_TEXT: &str = "Error_MissingPlaceholder_Text";
pub const KEY_ERROR_MISSING_PLACEHOLDER_SSML: &str = "Error_MissingPlaceholder_SSML";

// Standard response keys.
pub const KEY_LAUNCH_TITLE: &str = "Launch_Title";
pub const KEY_LAUNCH_TEXT: &str = "Launch_Text";
pub const KEY_LAUNCH_SSML: &str = "Launch_SSML";
pub const KEY_HELP_TITLE: &str = "Help_Title";
pub const KEY_HELP_TEXT: &str = "Help_Text";
pub const KEY_HELP_SSML: &str = "Help_SSML";
pub const KEY_STOP_TITLE: &str = "Stop_Title";
pub const KEY_STOP_TEXT: &str = "Stop_Text";
pub const KEY_STOP_SSML: &str = "Stop_SSML";
pub const KEY_CANCEL_TITLE: &str = "Cancel_Title";
pub const KEY_CANCEL_TEXT: &str = "Cancel_Text";
pub const KEY_CANCEL_SSML: &str = "Cancel_SSML";

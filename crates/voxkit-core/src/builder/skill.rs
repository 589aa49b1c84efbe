//! The skill manifest builder.

use std::collections::BTreeMap;
use std::sync::Arc;

use voxkit_types::error::BuildError;
use voxkit_types::manifest::{
    Category, MANIFEST_VERSION, Manifest, PrivacyAndCompliance, PrivacyLocale,
    PublishingInformation, PublishingLocale, Skill,
};
use voxkit_types::model::Model;

use crate::l10n::{
    KEY_SKILL_DESCRIPTION, KEY_SKILL_EXAMPLE_PHRASES, KEY_SKILL_KEYWORDS, KEY_SKILL_LARGE_ICON_URI,
    KEY_SKILL_NAME, KEY_SKILL_PRIVACY_POLICY_URL, KEY_SKILL_SMALL_ICON_URI, KEY_SKILL_SUMMARY,
    KEY_SKILL_TERMS_OF_USE_URL, KEY_SKILL_TESTING_INSTRUCTIONS, Locale, LocaleRegistry,
};

use super::ModelBuilder;

/// Maximum example phrases and keywords accepted per store locale.
const MAX_EXAMPLES: usize = 3;
const MAX_KEYWORDS: usize = 3;

/// Privacy declaration flags of the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivacyFlag {
    IsExportCompliant,
    ContainsAds,
    AllowsPurchases,
    UsesPersonalInfo,
    IsChildDirected,
}

#[derive(Debug, Clone, Copy, Default)]
struct PrivacyFlags {
    export_compliant: bool,
    contains_ads: bool,
    allows_purchases: bool,
    uses_personal_info: bool,
    child_directed: bool,
}

/// Builds the `skill.json` manifest from locale lookups.
///
/// Store texts come from the registered locales via the `SKILL_*` keys (or
/// keys rebound per locale through [`SkillLocaleBuilder`]). An attached
/// [`ModelBuilder`] shares the registry, so one set of locales feeds both
/// artifacts.
pub struct SkillBuilder {
    registry: Arc<LocaleRegistry>,
    category: Option<Category>,
    countries: Vec<String>,
    instructions_key: String,
    privacy: PrivacyFlags,
    locales: BTreeMap<String, SkillLocaleBuilder>,
    model: Option<ModelBuilder>,
    error: Option<BuildError>,
}

impl SkillBuilder {
    /// Create a builder with its own empty registry.
    pub fn new() -> Self {
        Self::with_registry(Arc::new(LocaleRegistry::new()))
    }

    /// Create a builder sharing an existing registry.
    pub fn with_registry(registry: Arc<LocaleRegistry>) -> Self {
        Self {
            registry,
            category: None,
            countries: Vec::new(),
            instructions_key: KEY_SKILL_TESTING_INSTRUCTIONS.to_string(),
            privacy: PrivacyFlags::default(),
            locales: BTreeMap::new(),
            model: None,
            error: None,
        }
    }

    pub fn registry(&self) -> Arc<LocaleRegistry> {
        Arc::clone(&self.registry)
    }

    pub fn with_category(&mut self, category: Category) -> &mut Self {
        if self.error.is_some() {
            return self;
        }
        self.category = Some(category);
        self
    }

    /// Restrict distribution to the given countries. An empty list means
    /// worldwide availability.
    pub fn with_countries<I, S>(&mut self, countries: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.error.is_some() {
            return self;
        }
        self.countries = countries.into_iter().map(Into::into).collect();
        self
    }

    pub fn add_country(&mut self, country: &str) -> &mut Self {
        if self.error.is_some() {
            return self;
        }
        self.countries.push(country.to_string());
        self
    }

    /// Override the lookup key for the testing instructions.
    pub fn with_testing_instructions(&mut self, key: &str) -> &mut Self {
        if self.error.is_some() {
            return self;
        }
        self.instructions_key = key.to_string();
        self
    }

    /// Write the testing instructions into the default locale.
    pub fn with_default_locale_testing_instructions(&mut self, text: &str) -> &mut Self {
        if self.error.is_some() {
            return self;
        }
        match self.registry.default_locale() {
            Some(loc) => loc.set(&self.instructions_key, [text]),
            None => self.error = Some(BuildError::NoDefaultLocale),
        }
        self
    }

    pub fn with_privacy_flag(&mut self, flag: PrivacyFlag, value: bool) -> &mut Self {
        if self.error.is_some() {
            return self;
        }
        match flag {
            PrivacyFlag::IsExportCompliant => self.privacy.export_compliant = value,
            PrivacyFlag::ContainsAds => self.privacy.contains_ads = value,
            PrivacyFlag::AllowsPurchases => self.privacy.allows_purchases = value,
            PrivacyFlag::UsesPersonalInfo => self.privacy.uses_personal_info = value,
            PrivacyFlag::IsChildDirected => self.privacy.child_directed = value,
        }
        self
    }

    /// Register a new locale and attach a locale builder for it.
    pub fn add_locale(&mut self, locale: &str) -> &mut Self {
        if self.error.is_some() {
            return self;
        }
        if let Err(err) = self.registry.register(Locale::new(locale)) {
            self.error = Some(err.into());
            return self;
        }
        self.locales.insert(
            locale.to_string(),
            SkillLocaleBuilder::new(Arc::clone(&self.registry), locale),
        );
        self
    }

    /// Make a registered locale the default.
    pub fn with_default_locale(&mut self, locale: &str) -> &mut Self {
        if self.error.is_some() {
            return self;
        }
        if let Err(err) = self.registry.set_default(locale) {
            self.error = Some(err.into());
        }
        self
    }

    pub fn locale(&mut self, locale: &str) -> Option<&mut SkillLocaleBuilder> {
        self.locales.get_mut(locale)
    }

    /// Attach an interaction model builder sharing this registry.
    pub fn with_model(&mut self) -> &mut Self {
        if self.error.is_some() {
            return self;
        }
        self.model = Some(ModelBuilder::with_registry(Arc::clone(&self.registry)));
        self
    }

    pub fn model(&mut self) -> Option<&mut ModelBuilder> {
        self.model.as_mut()
    }

    /// Build the manifest.
    pub fn build(&self) -> Result<Skill, BuildError> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        if self.registry.is_empty() {
            return Err(BuildError::NoLocales);
        }
        let default = self.registry.default_locale().ok_or(BuildError::NoDefaultLocale)?;
        let category = self.category.ok_or(BuildError::MissingCategory)?;

        let instructions = default.get(&self.instructions_key, &[]);
        if instructions.is_empty() {
            return Err(BuildError::MissingTestingInstructions);
        }

        let mut publishing_locales = BTreeMap::new();
        let mut privacy_locales = BTreeMap::new();
        for locale in self.registry.locales() {
            let name = locale.name().to_string();
            // locales added through the registry directly still get the
            // default lookup keys
            let fallback;
            let builder = match self.locales.get(&name) {
                Some(b) => b,
                None => {
                    fallback = SkillLocaleBuilder::new(Arc::clone(&self.registry), &name);
                    &fallback
                }
            };
            publishing_locales.insert(name.clone(), builder.build_publishing_locale()?);
            privacy_locales.insert(name, builder.build_privacy_locale()?);
        }

        Ok(Skill {
            manifest: Manifest {
                version: MANIFEST_VERSION.to_string(),
                publishing: PublishingInformation {
                    locales: publishing_locales,
                    worldwide: self.countries.is_empty(),
                    category,
                    countries: self.countries.clone(),
                    testing_instructions: instructions,
                },
                apis: None,
                permissions: Vec::new(),
                privacy: PrivacyAndCompliance {
                    export_compliant: self.privacy.export_compliant,
                    contains_ads: self.privacy.contains_ads,
                    allows_purchases: self.privacy.allows_purchases,
                    uses_personal_info: self.privacy.uses_personal_info,
                    child_directed: self.privacy.child_directed,
                    locales: privacy_locales,
                },
            },
        })
    }

    /// Build the interaction models of the attached model builder.
    pub fn build_models(&self) -> Result<BTreeMap<String, Model>, BuildError> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        self.model.as_ref().ok_or(BuildError::NoModel)?.build()
    }
}

impl Default for SkillBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-locale store listing builder.
///
/// Every field pairs a key setter (`with_*`) rebinding the lookup key with
/// a value setter (`with_locale_*`) writing the translation directly.
pub struct SkillLocaleBuilder {
    registry: Arc<LocaleRegistry>,
    locale: String,
    name_key: String,
    description_key: String,
    summary_key: String,
    examples_key: String,
    keywords_key: String,
    small_icon_key: String,
    large_icon_key: String,
    privacy_url_key: String,
    terms_key: String,
    error: Option<BuildError>,
}

impl SkillLocaleBuilder {
    pub fn new(registry: Arc<LocaleRegistry>, locale: &str) -> Self {
        Self {
            registry,
            locale: locale.to_string(),
            name_key: KEY_SKILL_NAME.to_string(),
            description_key: KEY_SKILL_DESCRIPTION.to_string(),
            summary_key: KEY_SKILL_SUMMARY.to_string(),
            examples_key: KEY_SKILL_EXAMPLE_PHRASES.to_string(),
            keywords_key: KEY_SKILL_KEYWORDS.to_string(),
            small_icon_key: KEY_SKILL_SMALL_ICON_URI.to_string(),
            large_icon_key: KEY_SKILL_LARGE_ICON_URI.to_string(),
            privacy_url_key: KEY_SKILL_PRIVACY_POLICY_URL.to_string(),
            terms_key: KEY_SKILL_TERMS_OF_USE_URL.to_string(),
            error: None,
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn with_name(&mut self, key: &str) -> &mut Self {
        self.name_key = key.to_string();
        self
    }

    pub fn with_locale_name(&mut self, name: &str) -> &mut Self {
        self.set(&self.name_key.clone(), [name])
    }

    pub fn with_description(&mut self, key: &str) -> &mut Self {
        self.description_key = key.to_string();
        self
    }

    pub fn with_locale_description(&mut self, description: &str) -> &mut Self {
        self.set(&self.description_key.clone(), [description])
    }

    pub fn with_summary(&mut self, key: &str) -> &mut Self {
        self.summary_key = key.to_string();
        self
    }

    pub fn with_locale_summary(&mut self, summary: &str) -> &mut Self {
        self.set(&self.summary_key.clone(), [summary])
    }

    pub fn with_examples(&mut self, key: &str) -> &mut Self {
        self.examples_key = key.to_string();
        self
    }

    pub fn with_locale_examples<I, S>(&mut self, examples: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set(&self.examples_key.clone(), examples)
    }

    pub fn with_keywords(&mut self, key: &str) -> &mut Self {
        self.keywords_key = key.to_string();
        self
    }

    pub fn with_locale_keywords<I, S>(&mut self, keywords: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set(&self.keywords_key.clone(), keywords)
    }

    pub fn with_small_icon(&mut self, key: &str) -> &mut Self {
        self.small_icon_key = key.to_string();
        self
    }

    pub fn with_locale_small_icon(&mut self, uri: &str) -> &mut Self {
        self.set(&self.small_icon_key.clone(), [uri])
    }

    pub fn with_large_icon(&mut self, key: &str) -> &mut Self {
        self.large_icon_key = key.to_string();
        self
    }

    pub fn with_locale_large_icon(&mut self, uri: &str) -> &mut Self {
        self.set(&self.large_icon_key.clone(), [uri])
    }

    pub fn with_privacy_policy_url(&mut self, key: &str) -> &mut Self {
        self.privacy_url_key = key.to_string();
        self
    }

    pub fn with_locale_privacy_policy_url(&mut self, url: &str) -> &mut Self {
        self.set(&self.privacy_url_key.clone(), [url])
    }

    /// Store texts for this locale's publishing section.
    pub fn build_publishing_locale(&self) -> Result<PublishingLocale, BuildError> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        let loc = self.registry.resolve(&self.locale)?;

        let name = loc.get(&self.name_key, &[]);
        let description = loc.get(&self.description_key, &[]);
        let summary = loc.get(&self.summary_key, &[]);
        let small_icon_uri = loc.get(&self.small_icon_key, &[]);
        let large_icon_uri = loc.get(&self.large_icon_key, &[]);

        for (field, value) in [
            ("name", &name),
            ("description", &description),
            ("summary", &summary),
            ("smallIconUri", &small_icon_uri),
            ("largeIconUri", &large_icon_uri),
        ] {
            if value.is_empty() {
                return Err(BuildError::IncompleteLocale {
                    locale: self.locale.clone(),
                    field: field.to_string(),
                });
            }
        }

        let example_phrases = loc.get_all(&self.examples_key, &[]);
        if example_phrases.len() > MAX_EXAMPLES {
            return Err(BuildError::TooManyExamples(self.locale.clone()));
        }
        let keywords = loc.get_all(&self.keywords_key, &[]);
        if keywords.len() > MAX_KEYWORDS {
            return Err(BuildError::TooManyKeywords(self.locale.clone()));
        }

        Ok(PublishingLocale {
            name,
            description,
            summary,
            example_phrases,
            keywords,
            small_icon_uri,
            large_icon_uri,
        })
    }

    /// Privacy section for this locale.
    ///
    /// Terms of use are rejected outright: the deployment API refuses the
    /// field, so failing the build beats a broken upload.
    pub fn build_privacy_locale(&self) -> Result<PrivacyLocale, BuildError> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        let loc = self.registry.resolve(&self.locale)?;

        let terms = loc.get(&self.terms_key, &[]);
        if !terms.is_empty() {
            return Err(BuildError::TermsOfUseUnsupported(self.locale.clone()));
        }

        let privacy_policy_url = match loc.get(&self.privacy_url_key, &[]) {
            url if url.is_empty() => None,
            url => Some(url),
        };

        Ok(PrivacyLocale {
            privacy_policy_url,
            terms_of_use: None,
        })
    }

    fn set<I, S>(&mut self, key: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.error.is_some() {
            return self;
        }
        match self.registry.resolve(&self.locale) {
            Ok(loc) => loc.set(key, values),
            Err(err) => self.error = Some(err.into()),
        }
        self
    }
}

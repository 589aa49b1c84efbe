//! Concurrent locale registry shared across builders.

use std::sync::{Arc, RwLock};

use dashmap::DashMap;

use voxkit_types::error::RegistryError;

use super::Locale;

/// Options for registering a locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegisterOptions {
    /// Make the registered locale the default, replacing any earlier one.
    pub default: bool,
}

impl RegisterOptions {
    pub fn as_default() -> Self {
        Self { default: true }
    }
}

/// Thread-safe map of locale tag to [`Locale`], with one default locale.
///
/// The first registered locale becomes the default unless a later
/// registration claims it explicitly. Locales are only ever added.
#[derive(Debug, Default)]
pub struct LocaleRegistry {
    locales: DashMap<String, Arc<Locale>>,
    default_name: RwLock<Option<String>>,
}

impl LocaleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a locale, keeping the existing default.
    pub fn register(&self, locale: Locale) -> Result<Arc<Locale>, RegistryError> {
        self.register_with(locale, RegisterOptions::default())
    }

    /// Register a locale with explicit options.
    pub fn register_with(
        &self,
        locale: Locale,
        opts: RegisterOptions,
    ) -> Result<Arc<Locale>, RegistryError> {
        if locale.name().is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.locales.contains_key(locale.name()) {
            return Err(RegistryError::AlreadyRegistered(locale.name().to_string()));
        }

        let name = locale.name().to_string();
        let locale = Arc::new(locale);
        self.locales.insert(name.clone(), Arc::clone(&locale));

        let mut default = self.default_name.write().unwrap_or_else(|e| e.into_inner());
        if opts.default || default.is_none() {
            *default = Some(name);
        }

        Ok(locale)
    }

    /// Look up a locale by tag.
    pub fn resolve(&self, name: &str) -> Result<Arc<Locale>, RegistryError> {
        self.locales
            .get(name)
            .map(|l| Arc::clone(&l))
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    /// The default locale, or `None` for an empty registry.
    pub fn default_locale(&self) -> Option<Arc<Locale>> {
        let name = self
            .default_name
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()?;
        self.locales.get(&name).map(|l| Arc::clone(&l))
    }

    /// Make a registered locale the default.
    pub fn set_default(&self, name: &str) -> Result<(), RegistryError> {
        if !self.locales.contains_key(name) {
            return Err(RegistryError::NotFound(name.to_string()));
        }
        let mut default = self.default_name.write().unwrap_or_else(|e| e.into_inner());
        *default = Some(name.to_string());
        Ok(())
    }

    /// All registered locales, sorted by tag for deterministic iteration.
    pub fn locales(&self) -> Vec<Arc<Locale>> {
        let mut all: Vec<Arc<Locale>> = self
            .locales
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        all.sort_by(|a, b| a.name().cmp(b.name()));
        all
    }

    /// All registered locale tags, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.locales.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.locales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }
}

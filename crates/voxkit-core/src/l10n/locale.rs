//! A single locale: snippet table, error accumulator, and variation RNG.

use std::sync::Mutex;

use dashmap::DashMap;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use voxkit_types::error::LocaleError;

/// A locale holds translations keyed by snippet name.
///
/// Each key maps to an ordered list of variants. Lookups never fail hard:
/// a missing key or missing placeholder argument records a [`LocaleError`]
/// on the locale and the call returns an empty or partially filled string.
/// Callers inspect [`Locale::errors`] when they care.
///
/// All methods take `&self`; a `Locale` is shared as `Arc<Locale>` between
/// the registry and every builder attached to it.
pub struct Locale {
    name: String,
    snippets: DashMap<String, Vec<String>>,
    errors: Mutex<Vec<LocaleError>>,
    rng: Mutex<StdRng>,
}

impl Locale {
    /// Create a locale with an entropy-seeded RNG for `get_any`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            snippets: DashMap::new(),
            errors: Mutex::new(Vec::new()),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Create a locale with a fixed RNG seed, making `get_any` deterministic.
    pub fn with_seed(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            snippets: DashMap::new(),
            errors: Mutex::new(Vec::new()),
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// The locale tag, e.g. "en-US".
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set (or overwrite) the variants for a key.
    pub fn set<I, S>(&self, key: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.snippets
            .insert(key.to_string(), values.into_iter().map(Into::into).collect());
    }

    /// First variant for the key with placeholders substituted.
    ///
    /// Returns "" and records a `NoTranslation` error when the key has no
    /// non-empty variants.
    pub fn get(&self, key: &str, args: &[&str]) -> String {
        match self.first_variant(key) {
            Some(template) => self.substitute(key, &template, args),
            None => {
                self.record(LocaleError::NoTranslation {
                    locale: self.name.clone(),
                    key: key.to_string(),
                });
                String::new()
            }
        }
    }

    /// A uniformly random variant for the key with placeholders substituted.
    ///
    /// With zero or one variant this behaves exactly like [`Locale::get`].
    pub fn get_any(&self, key: &str, args: &[&str]) -> String {
        let variants = match self.snippets.get(key) {
            Some(v) if !v.is_empty() && !v[0].is_empty() => v.clone(),
            _ => {
                self.record(LocaleError::NoTranslation {
                    locale: self.name.clone(),
                    key: key.to_string(),
                });
                return String::new();
            }
        };

        let template = if variants.len() > 1 {
            let idx = {
                let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
                rng.gen_range(0..variants.len())
            };
            &variants[idx]
        } else {
            &variants[0]
        };

        self.substitute(key, template, args)
    }

    /// All variants for the key with placeholders substituted, in order.
    ///
    /// Returns an empty list and records a `NoTranslation` error when the
    /// key is absent.
    pub fn get_all(&self, key: &str, args: &[&str]) -> Vec<String> {
        let variants = match self.snippets.get(key) {
            Some(v) if !v.is_empty() && !v[0].is_empty() => v.clone(),
            _ => {
                self.record(LocaleError::NoTranslation {
                    locale: self.name.clone(),
                    key: key.to_string(),
                });
                return Vec::new();
            }
        };

        variants
            .iter()
            .map(|t| self.substitute(key, t, args))
            .collect()
    }

    /// Snapshot of the accumulated lookup errors.
    pub fn errors(&self) -> Vec<LocaleError> {
        self.errors
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// The most recent lookup error, if any.
    pub fn last_error(&self) -> Option<LocaleError> {
        self.errors
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .cloned()
    }

    /// Clear the accumulated lookup errors.
    pub fn reset_errors(&self) {
        self.errors.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }

    fn first_variant(&self, key: &str) -> Option<String> {
        self.snippets
            .get(key)
            .and_then(|v| v.first().cloned())
            .filter(|v| !v.is_empty())
    }

    /// Replace `{}` markers with the positional arguments.
    ///
    /// Markers beyond the supplied arguments stay in the output and record
    /// a single `MissingPlaceholder` error for the call.
    fn substitute(&self, key: &str, template: &str, args: &[&str]) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        let mut used = 0usize;

        while let Some(pos) = rest.find("{}") {
            out.push_str(&rest[..pos]);
            if let Some(arg) = args.get(used) {
                out.push_str(arg);
            } else {
                out.push_str("{}");
            }
            used += 1;
            rest = &rest[pos + 2..];
        }
        out.push_str(rest);

        if used > args.len() {
            self.record(LocaleError::MissingPlaceholder {
                locale: self.name.clone(),
                key: key.to_string(),
            });
        }

        out
    }

    fn record(&self, err: LocaleError) {
        self.errors.lock().unwrap_or_else(|e| e.into_inner()).push(err);
    }
}

impl std::fmt::Debug for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Locale")
            .field("name", &self.name)
            .field("keys", &self.snippets.len())
            .finish()
    }
}

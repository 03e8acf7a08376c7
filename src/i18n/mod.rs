//! Internationalization (i18n) support
//!
//! The blog ships exactly two locales. Each has its own content subtree and
//! its own translation table; `zh` is the default and is served without a
//! path prefix, while `en` lives under `/en`.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

const ZH_TABLE: &str = include_str!("zh.yml");
const EN_TABLE: &str = include_str!("en.yml");

/// A supported content language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Zh,
    En,
}

impl Locale {
    /// Every supported locale, default first
    pub const ALL: [Locale; 2] = [Locale::Zh, Locale::En];

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Zh => "zh",
            Locale::En => "en",
        }
    }

    pub fn is_default(&self) -> bool {
        *self == Locale::default()
    }

    /// Parse a locale, falling back to the default for unknown values
    pub fn parse_or_default(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "zh" => Ok(Locale::Zh),
            "en" => Ok(Locale::En),
            other => anyhow::bail!("Unsupported locale: {}", other),
        }
    }
}

/// Check whether a string names a supported locale
pub fn is_valid_locale(value: &str) -> bool {
    value.parse::<Locale>().is_ok()
}

/// Map a canonical path to its locale-prefixed form
///
/// # Examples
/// ```ignore
/// locale_path("/posts/hello", Locale::En) // -> "/en/posts/hello"
/// ```
pub fn locale_path(path: &str, locale: Locale) -> String {
    match locale {
        Locale::Zh => path.to_string(),
        Locale::En => format!("/en{}", path),
    }
}

/// Split a locale-prefixed path back into its locale and canonical path
pub fn strip_locale(path: &str) -> (Locale, String) {
    match path.strip_prefix("/en") {
        Some("") => (Locale::En, "/".to_string()),
        Some(rest) if rest.starts_with('/') => (Locale::En, rest.to_string()),
        _ => (Locale::Zh, path.to_string()),
    }
}

/// Per-locale translation tables
pub struct Translations {
    /// Language data: locale -> key -> translation
    tables: HashMap<Locale, HashMap<String, serde_yaml::Value>>,
}

impl Translations {
    /// Load the translation tables compiled into the binary
    pub fn builtin() -> Self {
        let mut tables = HashMap::new();
        for (locale, source) in [(Locale::Zh, ZH_TABLE), (Locale::En, EN_TABLE)] {
            match serde_yaml::from_str(source) {
                Ok(data) => {
                    tables.insert(locale, data);
                }
                Err(e) => tracing::warn!("Failed to parse built-in {} table: {}", locale, e),
            }
        }
        Self { tables }
    }

    /// Merge `<dir>/<locale>.yml` overrides over the current tables
    pub fn load_overrides<P: AsRef<Path>>(&mut self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        if !dir.exists() {
            return Ok(());
        }

        for locale in Locale::ALL {
            let path = dir.join(format!("{}.yml", locale));
            if !path.is_file() {
                continue;
            }

            let content = fs::read_to_string(&path)?;
            match serde_yaml::from_str::<HashMap<String, serde_yaml::Value>>(&content) {
                Ok(data) => {
                    let table = self.tables.entry(locale).or_default();
                    for (key, value) in data {
                        merge_value(table.entry(key).or_insert(serde_yaml::Value::Null), value);
                    }
                    tracing::debug!("Loaded language overrides: {:?}", path);
                }
                Err(e) => tracing::warn!("Failed to parse language file {:?}: {}", path, e),
            }
        }

        Ok(())
    }

    /// Get a translation by dot-separated key, e.g. `"post.readTime"`
    pub fn get(&self, locale: Locale, key: &str) -> String {
        if let Some(value) = self.lookup(locale, key) {
            return yaml_value_to_string(value);
        }

        // Fallback to the default locale
        if !locale.is_default() {
            if let Some(value) = self.lookup(Locale::default(), key) {
                return yaml_value_to_string(value);
            }
        }

        key.to_string()
    }

    /// Check if a translation exists for the given locale
    pub fn has(&self, locale: Locale, key: &str) -> bool {
        self.lookup(locale, key).is_some()
    }

    /// All translations for a locale flattened to dot-notation keys
    pub fn flatten(&self, locale: Locale) -> HashMap<String, String> {
        let mut result = HashMap::new();

        if let Some(data) = self.tables.get(&locale) {
            flatten_translations(data, "", &mut result);
        }

        if !locale.is_default() {
            if let Some(data) = self.tables.get(&Locale::default()) {
                let mut fallback = HashMap::new();
                flatten_translations(data, "", &mut fallback);
                for (k, v) in fallback {
                    result.entry(k).or_insert(v);
                }
            }
        }

        result
    }

    fn lookup(&self, locale: Locale, key: &str) -> Option<&serde_yaml::Value> {
        self.tables
            .get(&locale)
            .and_then(|data| get_nested_value(data, key))
    }
}

impl Default for Translations {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Recursively merge an override value into an existing one
fn merge_value(target: &mut serde_yaml::Value, value: serde_yaml::Value) {
    match (target, value) {
        (serde_yaml::Value::Mapping(existing), serde_yaml::Value::Mapping(incoming)) => {
            for (k, v) in incoming {
                match existing.get_mut(&k) {
                    Some(slot) => merge_value(slot, v),
                    None => {
                        existing.insert(k, v);
                    }
                }
            }
        }
        (target, value) => *target = value,
    }
}

/// Get a nested value from a YAML map using dot notation
fn get_nested_value<'a>(
    data: &'a HashMap<String, serde_yaml::Value>,
    key: &str,
) -> Option<&'a serde_yaml::Value> {
    let mut parts = key.split('.');
    let mut current = data.get(parts.next()?);

    for part in parts {
        match current {
            Some(serde_yaml::Value::Mapping(map)) => {
                current = map.get(serde_yaml::Value::String(part.to_string()));
            }
            _ => return None,
        }
    }

    current
}

fn yaml_value_to_string(value: &serde_yaml::Value) -> String {
    match value {
        serde_yaml::Value::String(s) => s.clone(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Null => String::new(),
        _ => format!("{:?}", value),
    }
}

fn flatten_translations(
    data: &HashMap<String, serde_yaml::Value>,
    prefix: &str,
    result: &mut HashMap<String, String>,
) {
    for (key, value) in data {
        let full_key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        match value {
            serde_yaml::Value::Mapping(map) => {
                let nested: HashMap<String, serde_yaml::Value> = map
                    .iter()
                    .filter_map(|(k, v)| k.as_str().map(|k| (k.to_string(), v.clone())))
                    .collect();
                flatten_translations(&nested, &full_key, result);
            }
            serde_yaml::Value::Sequence(_) | serde_yaml::Value::Tagged(_) => {}
            other => {
                result.insert(full_key, yaml_value_to_string(other));
            }
        }
    }
}

//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the configuration file in the site's base directory
pub const CONFIG_FILE: &str = "_config.yml";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,

    // URL
    pub url: String,

    // Directory
    pub content_dir: String,
    pub i18n_dir: String,

    // Writing
    pub words_per_minute: usize,
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Listings
    pub related_limit: usize,
    pub featured_limit: usize,
    pub recent_limit: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Chao的部落格".to_string(),
            description: String::new(),
            author: "Anonymous".to_string(),

            url: "http://localhost:3000".to_string(),

            content_dir: "content/posts".to_string(),
            i18n_dir: "languages".to_string(),

            words_per_minute: 200,
            highlight: HighlightConfig::default(),

            related_limit: 3,
            featured_limit: 3,
            recent_limit: 6,
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load `_config.yml` from a base directory, using defaults if absent
    pub fn load_from_dir<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let path = base_dir.as_ref().join(CONFIG_FILE);
        if path.exists() {
            tracing::debug!("Loading config from {:?}", path);
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: false,
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

//! bilingual-blog: content pipeline for a Chinese/English Markdown blog
//!
//! Markdown files with YAML front-matter live in one directory per locale.
//! This crate turns them into rendered posts, derives category and tag
//! listings, answers substring searches and related-post queries, and maps
//! paths between locales. Page templating is left to the caller; a small
//! JSON API and a CLI are included.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod helpers;
pub mod i18n;
pub mod search;
pub mod server;
pub mod taxonomy;

use anyhow::Result;
use std::path::{Path, PathBuf};

pub use content::{Category, Post, PostRepository, Tag};
pub use i18n::Locale;

/// A blog site rooted at a directory
#[derive(Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Posts directory (holds one subdirectory per locale)
    pub content_dir: PathBuf,
}

impl Blog {
    /// Open a site directory, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config = config::SiteConfig::load_from_dir(&base_dir)?;
        let content_dir = base_dir.join(&config.content_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
        })
    }

    /// Build a repository over this site's content
    pub fn repository(&self) -> Result<PostRepository> {
        PostRepository::from_config(&self.base_dir, &self.config)
    }

    /// Create a new post
    pub fn new_post(&self, options: &commands::new::NewPost) -> Result<PathBuf> {
        commands::new::create_post(self, options)
    }
}

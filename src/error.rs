//! Error types for the content pipeline

use thiserror::Error;

use crate::i18n::Locale;

/// Errors raised while loading a single post
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Post not found: {locale}/{slug}")]
    NotFound { slug: String, locale: Locale },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid front-matter: {0}")]
    FrontMatter(#[from] serde_yaml::Error),

    #[error("Front-matter block is never closed")]
    UnclosedFrontMatter,
}

pub type ContentResult<T> = std::result::Result<T, ContentError>;

//! Post repository - builds posts from the content store on demand
//!
//! Nothing is cached: every call re-reads the locale's files, so listings
//! always reflect what is on disk.

use anyhow::Result;
use std::path::Path;

use super::store::{strip_extension, ContentStore};
use super::{FrontMatter, MarkdownRenderer, Post, ReadingTime};
use crate::config::SiteConfig;
use crate::error::{ContentError, ContentResult};
use crate::i18n::{Locale, Translations};

/// Result of loading every post of a locale
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Published posts, newest first
    pub posts: Vec<Post>,
    /// Files that could not be turned into a post, by slug
    pub failures: Vec<(String, ContentError)>,
}

impl LoadReport {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Aggregates parsed posts per locale
pub struct PostRepository {
    store: ContentStore,
    renderer: MarkdownRenderer,
    translations: Translations,
    words_per_minute: usize,
}

impl PostRepository {
    pub fn new(
        store: ContentStore,
        renderer: MarkdownRenderer,
        translations: Translations,
        words_per_minute: usize,
    ) -> Self {
        Self {
            store,
            renderer,
            translations,
            words_per_minute,
        }
    }

    /// Build a repository for a site directory
    pub fn from_config<P: AsRef<Path>>(base_dir: P, config: &SiteConfig) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        let store = ContentStore::new(base_dir.join(&config.content_dir));
        let renderer = MarkdownRenderer::with_config(&config.highlight);

        let mut translations = Translations::builtin();
        translations.load_overrides(base_dir.join(&config.i18n_dir))?;

        Ok(Self::new(
            store,
            renderer,
            translations,
            config.words_per_minute,
        ))
    }

    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    pub fn translations(&self) -> &Translations {
        &self.translations
    }

    /// Load a single post, reporting why it could not be built
    pub fn try_get_post_by_slug(&self, slug: &str, locale: Locale) -> ContentResult<Post> {
        let slug = strip_extension(slug);
        let raw = self.store.load_raw(slug, locale)?;
        let (fm, body) = FrontMatter::parse(&raw)?;

        let content = self.renderer.render(body);
        let reading_time = ReadingTime::estimate(body, self.words_per_minute)
            .display(&self.translations.get(locale, "post.readTime"));

        Ok(Post::from_front_matter(
            slug.to_string(),
            fm,
            content,
            reading_time,
        ))
    }

    /// Load a single post; missing or malformed files yield `None`
    pub fn get_post_by_slug(&self, slug: &str, locale: Locale) -> Option<Post> {
        match self.try_get_post_by_slug(slug, locale) {
            Ok(post) => Some(post),
            Err(e) => {
                log_failure(slug, locale, &e);
                None
            }
        }
    }

    /// Load every post of a locale, keeping track of the files that failed
    pub fn load_report(&self, locale: Locale) -> LoadReport {
        let mut report = LoadReport::default();
        let mut dated = Vec::new();

        for name in self.store.list_slugs(locale) {
            match self.try_get_post_by_slug(&name, locale) {
                Ok(post) if post.published => dated.push((post.parsed_date(), post)),
                Ok(post) => tracing::debug!("Skipping unpublished post {}/{}", locale, post.slug),
                Err(e) => {
                    log_failure(&name, locale, &e);
                    report.failures.push((strip_extension(&name).to_string(), e));
                }
            }
        }

        // Stable: equal dates keep filename order. Undated posts go last.
        dated.sort_by(|a, b| b.0.cmp(&a.0));
        report.posts = dated.into_iter().map(|(_, post)| post).collect();

        tracing::debug!(
            "Loaded {} posts for {} ({} failed)",
            report.posts.len(),
            locale,
            report.failures.len()
        );
        report
    }

    /// All published posts of a locale, newest first
    pub fn get_all_posts(&self, locale: Locale) -> Vec<Post> {
        self.load_report(locale).posts
    }

    /// Posts whose category matches, ignoring case
    pub fn get_posts_by_category(&self, category: &str, locale: Locale) -> Vec<Post> {
        let wanted = category.to_lowercase();
        self.get_all_posts(locale)
            .into_iter()
            .filter(|post| post.category.to_lowercase() == wanted)
            .collect()
    }

    /// Posts carrying the tag, ignoring case
    pub fn get_posts_by_tag(&self, tag: &str, locale: Locale) -> Vec<Post> {
        let wanted = tag.to_lowercase();
        self.get_all_posts(locale)
            .into_iter()
            .filter(|post| post.tags.iter().any(|t| t.to_lowercase() == wanted))
            .collect()
    }

    /// Featured posts, newest first
    pub fn get_featured_posts(&self, locale: Locale, limit: usize) -> Vec<Post> {
        self.get_all_posts(locale)
            .into_iter()
            .filter(|post| post.featured)
            .take(limit)
            .collect()
    }

    /// The newest posts
    pub fn get_recent_posts(&self, locale: Locale, limit: usize) -> Vec<Post> {
        let mut posts = self.get_all_posts(locale);
        posts.truncate(limit);
        posts
    }
}

fn log_failure(slug: &str, locale: Locale, error: &ContentError) {
    match error {
        ContentError::NotFound { .. } => tracing::debug!("{}", error),
        _ => tracing::warn!("Error reading post {}/{}: {}", locale, slug, error),
    }
}

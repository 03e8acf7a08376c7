//! Post, Category, and Tag models

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::frontmatter::{FrontMatter, SeoMeta};
use crate::helpers::parse_post_date;

/// Author used when front-matter leaves it out
pub const DEFAULT_AUTHOR: &str = "Anonymous";

/// Category used when front-matter leaves it out
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// A blog post
///
/// Built once from its source file and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Filename without the `.md` extension
    pub slug: String,

    pub title: String,

    pub description: String,

    /// Publication date as written in the front-matter
    pub date: String,

    pub author: String,

    pub category: String,

    pub tags: Vec<String>,

    /// Rendered HTML content
    pub content: String,

    /// Localized reading-time string, e.g. "4 min read"
    pub reading_time: String,

    pub featured: bool,

    pub published: bool,

    pub comments_enabled: bool,

    #[serde(default)]
    pub seo: SeoMeta,
}

impl Post {
    /// Build a post from parsed front-matter, applying field defaults
    pub fn from_front_matter(
        slug: String,
        fm: FrontMatter,
        content: String,
        reading_time: String,
    ) -> Self {
        Self {
            slug,
            title: fm.title.unwrap_or_default(),
            description: fm.description.unwrap_or_default(),
            date: fm.date.unwrap_or_default(),
            author: non_empty_or(fm.author, DEFAULT_AUTHOR),
            category: non_empty_or(fm.category, DEFAULT_CATEGORY),
            tags: fm.tags,
            content,
            reading_time,
            featured: fm.featured.unwrap_or(false),
            published: fm.published.unwrap_or(true),
            comments_enabled: fm.comments_enabled.unwrap_or(true),
            seo: fm.seo.unwrap_or_default(),
        }
    }

    /// Parsed publication date, if the date string is recognizable
    pub fn parsed_date(&self) -> Option<NaiveDateTime> {
        parse_post_date(&self.date)
    }

    /// Title for `<title>` and social cards, honoring the SEO override
    pub fn seo_title(&self) -> &str {
        self.seo.title.as_deref().unwrap_or(&self.title)
    }

    /// Description for metadata, honoring the SEO override
    pub fn seo_description(&self) -> &str {
        self.seo.description.as_deref().unwrap_or(&self.description)
    }
}

fn non_empty_or(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// A category with the number of posts carrying it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub slug: String,
    pub count: usize,
}

/// A tag with the number of posts carrying it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub slug: String,
    pub count: usize,
}

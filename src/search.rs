//! Substring search and related-post ranking

use crate::content::{Post, PostRepository};
use crate::i18n::Locale;

/// Score for sharing the exact category label
const SAME_CATEGORY_SCORE: usize = 3;

/// Whether `query` (already lowercased) occurs in any searchable field
fn matches_query(post: &Post, query: &str) -> bool {
    post.title.to_lowercase().contains(query)
        || post.description.to_lowercase().contains(query)
        || post.category.to_lowercase().contains(query)
        || post.tags.iter().any(|tag| tag.to_lowercase().contains(query))
}

/// Relatedness of `candidate` to `current`
///
/// Category and tag comparisons are exact, case included.
pub fn relevance_score(current: &Post, candidate: &Post) -> usize {
    let category = if candidate.category == current.category {
        SAME_CATEGORY_SCORE
    } else {
        0
    };

    let shared_tags = candidate
        .tags
        .iter()
        .filter(|tag| current.tags.contains(tag))
        .count();

    category + shared_tags
}

/// Filter posts by a case-insensitive substring, keeping their order
///
/// An empty query matches every post.
pub fn filter_posts(posts: Vec<Post>, query: &str) -> Vec<Post> {
    let query = query.to_lowercase();
    posts
        .into_iter()
        .filter(|post| matches_query(post, &query))
        .collect()
}

/// Rank `candidates` by relevance to `current`, excluding `current` itself
pub fn rank_related(current: &Post, candidates: Vec<Post>, limit: usize) -> Vec<Post> {
    let mut scored: Vec<(usize, Post)> = candidates
        .into_iter()
        .filter(|post| post.slug != current.slug)
        .map(|post| (relevance_score(current, &post), post))
        .collect();

    // Stable: equal scores keep date order
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    scored
        .into_iter()
        .take(limit)
        .map(|(_, post)| post)
        .collect()
}

impl PostRepository {
    /// Published posts whose title, description, category, or a tag
    /// contains `query`, newest first
    pub fn search_posts(&self, query: &str, locale: Locale) -> Vec<Post> {
        filter_posts(self.get_all_posts(locale), query)
    }

    /// Up to `limit` posts most related to `post`
    pub fn get_related_posts(&self, post: &Post, locale: Locale, limit: usize) -> Vec<Post> {
        rank_related(post, self.get_all_posts(locale), limit)
    }
}

//! Category and tag listings derived from the post set
//!
//! Labels are counted by their exact text and listed in the order they are
//! first met while walking posts newest first. Two labels differing only in
//! case ("Tech", "tech") stay separate entries that share one slug.

use indexmap::IndexMap;

use crate::content::{Category, Post, PostRepository, Tag};
use crate::helpers::label_slug;
use crate::i18n::Locale;

/// Count category labels in first-occurrence order
pub fn derive_categories(posts: &[Post]) -> Vec<Category> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for post in posts {
        *counts.entry(post.category.as_str()).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(name, count)| Category {
            name: name.to_string(),
            slug: label_slug(name),
            count,
        })
        .collect()
}

/// Count tag labels in first-occurrence order
pub fn derive_tags(posts: &[Post]) -> Vec<Tag> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for tag in posts.iter().flat_map(|post| post.tags.iter()) {
        *counts.entry(tag.as_str()).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(name, count)| Tag {
            name: name.to_string(),
            slug: label_slug(name),
            count,
        })
        .collect()
}

impl PostRepository {
    /// Categories of a locale's published posts, recomputed on every call
    pub fn get_categories(&self, locale: Locale) -> Vec<Category> {
        derive_categories(&self.get_all_posts(locale))
    }

    /// Tags of a locale's published posts, recomputed on every call
    pub fn get_tags(&self, locale: Locale) -> Vec<Tag> {
        derive_tags(&self.get_all_posts(locale))
    }

    /// First category whose slug matches
    pub fn find_category_by_slug(&self, slug: &str, locale: Locale) -> Option<Category> {
        self.get_categories(locale)
            .into_iter()
            .find(|category| category.slug == slug)
    }

    /// First tag whose slug matches
    pub fn find_tag_by_slug(&self, slug: &str, locale: Locale) -> Option<Tag> {
        self.get_tags(locale).into_iter().find(|tag| tag.slug == slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::repository::tests::{repository, sample_site, write_post};

    #[test]
    fn test_get_categories() {
        let dir = sample_site();
        let repo = repository(dir.path());

        let categories = repo.get_categories(Locale::En);
        let summary: Vec<(&str, &str, usize)> = categories
            .iter()
            .map(|c| (c.name.as_str(), c.slug.as_str(), c.count))
            .collect();
        // B (Tech) is newest, then C (Life)
        assert_eq!(summary, vec![("Tech", "tech", 2), ("Life", "life", 1)]);
    }

    #[test]
    fn test_get_tags() {
        let dir = sample_site();
        let repo = repository(dir.path());

        let tags = repo.get_tags(Locale::En);
        let summary: Vec<(&str, usize)> =
            tags.iter().map(|t| (t.name.as_str(), t.count)).collect();
        assert_eq!(summary, vec![("y", 2), ("x", 1)]);
    }

    #[test]
    fn test_counts_match_published_pairs() {
        let dir = sample_site();
        write_post(
            dir.path(),
            Locale::En,
            "draft",
            "category: Tech\ntags: [x, z]\npublished: false",
            "x",
        );
        let repo = repository(dir.path());
        let posts = repo.get_all_posts(Locale::En);

        let category_total: usize = repo.get_categories(Locale::En).iter().map(|c| c.count).sum();
        assert_eq!(category_total, posts.len());

        let tag_total: usize = repo.get_tags(Locale::En).iter().map(|t| t.count).sum();
        let pairs: usize = posts.iter().map(|p| p.tags.len()).sum();
        assert_eq!(tag_total, pairs);

        assert!(repo.find_tag_by_slug("z", Locale::En).is_none());
    }

    #[test]
    fn test_case_variants_stay_separate() {
        let dir = tempfile::TempDir::new().unwrap();
        write_post(dir.path(), Locale::Zh, "one", "date: 2024-02-01\ncategory: Tech", "x");
        write_post(dir.path(), Locale::Zh, "two", "date: 2024-01-01\ncategory: tech", "x");
        let repo = repository(dir.path());

        let categories = repo.get_categories(Locale::Zh);
        assert_eq!(categories.len(), 2);
        assert!(categories.iter().all(|c| c.slug == "tech"));
        assert_eq!(
            repo.find_category_by_slug("tech", Locale::Zh).unwrap().name,
            "Tech"
        );
        assert_eq!(repo.get_posts_by_category("TECH", Locale::Zh).len(), 2);
    }

    #[test]
    fn test_multi_word_slugs() {
        let dir = tempfile::TempDir::new().unwrap();
        write_post(
            dir.path(),
            Locale::En,
            "ml",
            "category: Machine Learning\ntags: [Deep  Nets]",
            "x",
        );
        let repo = repository(dir.path());
        let category = repo
            .find_category_by_slug("machine-learning", Locale::En)
            .unwrap();
        assert_eq!(category.name, "Machine Learning");
        assert_eq!(repo.get_tags(Locale::En)[0].slug, "deep-nets");
    }

    #[test]
    fn test_uncategorized_default() {
        let dir = tempfile::TempDir::new().unwrap();
        write_post(dir.path(), Locale::En, "plain", "title: Plain", "x");
        let repo = repository(dir.path());
        let categories = repo.get_categories(Locale::En);
        assert_eq!(categories[0].name, "Uncategorized");
        assert_eq!(categories[0].slug, "uncategorized");
    }
}

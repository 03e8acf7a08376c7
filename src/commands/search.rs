//! Search posts from the command line

use anyhow::Result;

use crate::helpers::short_date;
use crate::i18n::Locale;
use crate::Blog;

/// Print posts matching `query`
pub fn run(blog: &Blog, query: &str, locale: Locale) -> Result<()> {
    let repo = blog.repository()?;
    let translations = repo.translations();

    // An empty query would match every post
    if query.trim().is_empty() {
        println!("{}", translations.get(locale, "search.noResults"));
        return Ok(());
    }

    let results = repo.search_posts(query, locale);
    if results.is_empty() {
        println!("{}", translations.get(locale, "search.noResults"));
        return Ok(());
    }

    println!(
        "{} ({}):",
        translations.get(locale, "search.results"),
        results.len()
    );
    for post in results {
        println!(
            "  {} - {} [{}] {}",
            short_date(&post.date),
            post.title,
            post.category,
            post.tags.join(", ")
        );
    }

    Ok(())
}

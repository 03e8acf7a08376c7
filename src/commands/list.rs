//! List site content

use anyhow::Result;

use crate::helpers::short_date;
use crate::i18n::Locale;
use crate::Blog;

/// List site content of one locale by type
pub fn run(blog: &Blog, content_type: &str, locale: Locale) -> Result<()> {
    let repo = blog.repository()?;

    match content_type {
        "post" | "posts" => {
            let report = repo.load_report(locale);
            println!("Posts ({}, {}):", locale, report.posts.len());
            for post in &report.posts {
                let marker = if post.featured { " *" } else { "" };
                println!(
                    "  {} - {} [{}]{}",
                    short_date(&post.date),
                    post.title,
                    post.slug,
                    marker
                );
            }
            if report.has_failures() {
                println!("Skipped ({}):", report.failures.len());
                for (slug, error) in &report.failures {
                    println!("  {} - {}", slug, error);
                }
            }
        }
        "tag" | "tags" => {
            let tags = repo.get_tags(locale);
            println!("Tags ({}, {}):", locale, tags.len());
            for tag in tags {
                println!("  {} ({}) /{}", tag.name, tag.count, tag.slug);
            }
        }
        "category" | "categories" => {
            let categories = repo.get_categories(locale);
            println!("Categories ({}, {}):", locale, categories.len());
            for category in categories {
                println!("  {} ({}) /{}", category.name, category.count, category.slug);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, tag, category",
                content_type
            );
        }
    }

    Ok(())
}

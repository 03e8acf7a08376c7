//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::content::store::{is_file_slug, strip_extension};
use crate::content::FrontMatter;
use crate::helpers::slugify;
use crate::i18n::Locale;
use crate::Blog;

/// Options for a new post
#[derive(Debug, Clone, Default)]
pub struct NewPost {
    pub title: String,
    pub locale: Locale,
    pub category: Option<String>,
    pub tags: Vec<String>,
    /// Filename without extension; derived from the title when absent
    pub slug: Option<String>,
}

/// Write a post file with a front-matter scaffold
pub fn create_post(blog: &Blog, options: &NewPost) -> Result<PathBuf> {
    let now = chrono::Local::now();

    let slug = match &options.slug {
        Some(slug) => strip_extension(slug).to_string(),
        None => {
            let slug = slugify(&options.title);
            if slug.is_empty() {
                now.format("%Y%m%d-%H%M%S").to_string()
            } else {
                slug
            }
        }
    };

    if !is_file_slug(&slug) {
        anyhow::bail!("Invalid post filename: {:?}", slug);
    }

    let target_dir = blog.content_dir.join(options.locale.as_str());
    fs::create_dir_all(&target_dir)?;

    let file_path = target_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let mut front = serde_yaml::Mapping::new();
    let mut set = |key: &str, value: serde_yaml::Value| {
        front.insert(serde_yaml::Value::String(key.to_string()), value);
    };
    set("title", options.title.clone().into());
    set("description", String::new().into());
    set("date", now.format("%Y-%m-%d").to_string().into());
    set("author", blog.config.author.clone().into());
    if let Some(category) = &options.category {
        set("category", category.clone().into());
    }
    set(
        "tags",
        serde_yaml::Value::Sequence(options.tags.iter().cloned().map(Into::into).collect()),
    );
    set("featured", false.into());
    set("published", true.into());
    set("commentsEnabled", true.into());

    let content = format!("---\n{}---\n\n", serde_yaml::to_string(&front)?);

    // The scaffold must read back as valid front-matter
    FrontMatter::parse(&content)?;

    fs::write(&file_path, content)?;
    tracing::info!("Created {:?}", file_path);

    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_post() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::new(dir.path()).unwrap();

        let path = blog
            .new_post(&NewPost {
                title: "Hello: World".to_string(),
                locale: Locale::En,
                category: Some("Tech".to_string()),
                tags: vec!["rust".to_string()],
                slug: None,
            })
            .unwrap();
        assert!(path.ends_with("content/posts/en/hello-world.md"));

        let repo = blog.repository().unwrap();
        let post = repo.get_post_by_slug("hello-world", Locale::En).unwrap();
        assert_eq!(post.title, "Hello: World");
        assert_eq!(post.category, "Tech");
        assert_eq!(post.tags, vec!["rust"]);
        assert!(post.published);
        assert!(post.parsed_date().is_some());
    }

    #[test]
    fn test_create_post_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        let options = NewPost {
            title: "Same".to_string(),
            slug: Some("same.md".to_string()),
            ..NewPost::default()
        };

        let path = blog.new_post(&options).unwrap();
        assert!(path.ends_with("content/posts/zh/same.md"));
        assert!(blog.new_post(&options).is_err());
    }

    #[test]
    fn test_create_post_cjk_title_uses_timestamp() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::new(dir.path()).unwrap();

        let path = blog
            .new_post(&NewPost {
                title: "你好世界".to_string(),
                ..NewPost::default()
            })
            .unwrap();
        let name = path.file_stem().unwrap().to_str().unwrap();
        assert_eq!(name.len(), "20240101-120000".len());
        assert!(name.chars().all(|c| c.is_ascii_digit() || c == '-'));

        let repo = blog.repository().unwrap();
        assert_eq!(repo.get_post_by_slug(name, Locale::Zh).unwrap().title, "你好世界");
    }

    #[test]
    fn test_create_post_rejects_path_slug() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        let options = NewPost {
            title: "Escape".to_string(),
            slug: Some("../outside".to_string()),
            ..NewPost::default()
        };

        assert!(blog.new_post(&options).is_err());
        assert!(!dir.path().join("content/posts/outside.md").exists());
    }
}

//! Content store - reads per-locale Markdown files from disk

use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{ContentError, ContentResult};
use crate::i18n::Locale;

/// Markdown file extension, including the dot
const MARKDOWN_EXT: &str = ".md";

/// Reads `<root>/<locale>/<slug>.md` files
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
}

impl ContentStore {
    /// Create a store rooted at the posts directory
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// The posts directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding one locale's posts
    pub fn locale_dir(&self, locale: Locale) -> PathBuf {
        self.root.join(locale.as_str())
    }

    /// List Markdown filenames (extension included) for a locale
    ///
    /// Names come back in filename order. A missing locale directory is an
    /// empty content set.
    pub fn list_slugs(&self, locale: Locale) -> Vec<String> {
        let dir = self.locale_dir(locale);
        if !dir.is_dir() {
            tracing::debug!("No content directory for {}: {:?}", locale, dir);
            return Vec::new();
        }

        WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| match e {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::warn!("Skipping unreadable entry in {:?}: {}", dir, err);
                    None
                }
            })
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| match e.file_name().to_str() {
                Some(name) => Some(name.to_string()),
                None => {
                    tracing::warn!("Skipping non UTF-8 filename: {:?}", e.path());
                    None
                }
            })
            .filter(|name| name.ends_with(MARKDOWN_EXT))
            .collect()
    }

    /// Read the raw text of a post; `slug` may carry the `.md` extension
    ///
    /// Only bare filenames resolve. A slug with separators or `..` never
    /// leaves the locale directory and is reported as not found.
    pub fn load_raw(&self, slug: &str, locale: Locale) -> ContentResult<String> {
        let slug = strip_extension(slug);
        let path = self.post_path(slug, locale);

        if !is_file_slug(slug) || !path.is_file() {
            return Err(ContentError::NotFound {
                slug: slug.to_string(),
                locale,
            });
        }

        Ok(fs::read_to_string(&path)?)
    }

    /// Path of a post file
    pub fn post_path(&self, slug: &str, locale: Locale) -> PathBuf {
        self.locale_dir(locale)
            .join(format!("{}{}", strip_extension(slug), MARKDOWN_EXT))
    }
}

/// Whether `slug` is a single plain path component
pub(crate) fn is_file_slug(slug: &str) -> bool {
    let mut components = Path::new(slug).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Slug of a Markdown filename
pub fn strip_extension(name: &str) -> &str {
    name.strip_suffix(MARKDOWN_EXT).unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, ContentStore) {
        let dir = TempDir::new().unwrap();
        let zh = dir.path().join("zh");
        fs::create_dir_all(zh.join("drafts")).unwrap();
        fs::write(zh.join("b-post.md"), "B").unwrap();
        fs::write(zh.join("a-post.md"), "A").unwrap();
        fs::write(zh.join("notes.txt"), "not markdown").unwrap();
        fs::write(zh.join("drafts").join("nested.md"), "nested").unwrap();
        let store = ContentStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_list_slugs() {
        let (_dir, store) = setup();
        assert_eq!(store.list_slugs(Locale::Zh), vec!["a-post.md", "b-post.md"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_list_slugs_skips_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let (dir, store) = setup();
        let name = OsStr::from_bytes(b"bad\xff.md");
        fs::write(dir.path().join("zh").join(name), "bad").unwrap();
        assert_eq!(store.list_slugs(Locale::Zh), vec!["a-post.md", "b-post.md"]);
    }

    #[test]
    fn test_missing_locale_dir_is_empty() {
        let (_dir, store) = setup();
        assert!(store.list_slugs(Locale::En).is_empty());
    }

    #[test]
    fn test_load_raw() {
        let (_dir, store) = setup();
        assert_eq!(store.load_raw("a-post", Locale::Zh).unwrap(), "A");
        assert_eq!(store.load_raw("b-post.md", Locale::Zh).unwrap(), "B");
    }

    #[test]
    fn test_load_raw_not_found() {
        let (_dir, store) = setup();
        match store.load_raw("missing", Locale::Zh) {
            Err(ContentError::NotFound { slug, locale }) => {
                assert_eq!(slug, "missing");
                assert_eq!(locale, Locale::Zh);
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
        assert!(matches!(
            store.load_raw("a-post", Locale::En),
            Err(ContentError::NotFound { .. })
        ));
    }

    #[test]
    fn test_load_raw_stays_in_locale_dir() {
        let (dir, store) = setup();
        fs::create_dir_all(dir.path().join("secret")).unwrap();
        fs::write(dir.path().join("secret").join("keys.md"), "hunter2").unwrap();
        fs::create_dir_all(dir.path().join("en")).unwrap();
        fs::write(dir.path().join("en").join("other.md"), "EN").unwrap();

        for slug in [
            "../secret/keys",
            "../en/other",
            "../en/other.md",
            "drafts/nested",
            "/etc/passwd",
            "..",
            ".",
            "",
        ] {
            assert!(
                matches!(
                    store.load_raw(slug, Locale::Zh),
                    Err(ContentError::NotFound { .. })
                ),
                "{:?} should not resolve",
                slug
            );
        }
    }

    #[test]
    fn test_strip_extension() {
        assert_eq!(strip_extension("hello.md"), "hello");
        assert_eq!(strip_extension("hello"), "hello");
    }
}

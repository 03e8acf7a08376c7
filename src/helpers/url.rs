//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::config::SiteConfig;
use crate::i18n::{locale_path, Locale};

/// Characters escaped inside a single path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Absolute URL of a post for SEO metadata
///
/// # Examples
/// ```ignore
/// generate_seo_url(&config, "hello", Locale::En) // -> "https://blog.example/en/hello"
/// ```
pub fn generate_seo_url(config: &SiteConfig, slug: &str, locale: Locale) -> String {
    let base = config.url.trim_end_matches('/');
    match locale {
        Locale::Zh => format!("{}/{}", base, slug),
        Locale::En => format!("{}/en/{}", base, slug),
    }
}

/// Localized path of a post page
pub fn post_path(slug: &str, locale: Locale) -> String {
    locale_path(&format!("/posts/{}", encode_segment(slug)), locale)
}

/// Localized path of a category page
pub fn category_path(category_slug: &str, locale: Locale) -> String {
    locale_path(
        &format!("/categories/{}", encode_segment(category_slug)),
        locale,
    )
}

/// Prefix a site-relative path with the configured site URL
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    format!(
        "{}/{}",
        config.url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Percent-encode a single path segment
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        SiteConfig {
            url: "https://blog.example/".to_string(),
            ..SiteConfig::default()
        }
    }

    #[test]
    fn test_generate_seo_url() {
        let config = test_config();
        assert_eq!(
            generate_seo_url(&config, "hello", Locale::Zh),
            "https://blog.example/hello"
        );
        assert_eq!(
            generate_seo_url(&config, "hello", Locale::En),
            "https://blog.example/en/hello"
        );
    }

    #[test]
    fn test_localized_paths() {
        assert_eq!(post_path("hello", Locale::Zh), "/posts/hello");
        assert_eq!(post_path("hello", Locale::En), "/en/posts/hello");
        assert_eq!(
            category_path("machine learning", Locale::En),
            "/en/categories/machine%20learning"
        );
        assert_eq!(category_path("生活", Locale::Zh), "/categories/%E7%94%9F%E6%B4%BB");
    }

    #[test]
    fn test_full_url_for() {
        let config = test_config();
        assert_eq!(
            full_url_for(&config, "/en/about"),
            "https://blog.example/en/about"
        );
    }
}

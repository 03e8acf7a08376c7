//! Front-matter parsing

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ContentError, ContentResult};

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// SEO overrides for a post
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeoMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        deserialize_with = "string_or_vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub keywords: Vec<String>,
}

/// Front-matter data of a post
///
/// Every field is optional; defaults are applied when the post is built.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    #[serde(deserialize_with = "string_or_vec")]
    pub tags: Vec<String>,
    pub featured: Option<bool>,
    pub published: Option<bool>,
    #[serde(rename = "commentsEnabled")]
    pub comments_enabled: Option<bool>,
    pub seo: Option<SeoMeta>,
}

impl FrontMatter {
    /// Parse front-matter from file content
    /// Returns (front_matter, body)
    ///
    /// Content that does not open with a `---` line has no front-matter and
    /// is returned whole as the body.
    pub fn parse(content: &str) -> ContentResult<(Self, &str)> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        let Some(rest) = strip_delimiter_line(content) else {
            return Ok((FrontMatter::default(), content));
        };

        let mut offset = 0;
        for line in rest.split_inclusive('\n') {
            if line.trim_end() == "---" {
                let yaml = &rest[..offset];
                let body = &rest[offset + line.len()..];

                if yaml.trim().is_empty() {
                    return Ok((FrontMatter::default(), body));
                }

                let fm: FrontMatter = serde_yaml::from_str(yaml)?;
                return Ok((fm, body));
            }
            offset += line.len();
        }

        Err(ContentError::UnclosedFrontMatter)
    }
}

/// Strip the opening `---` line, if the content starts with one
fn strip_delimiter_line(content: &str) -> Option<&str> {
    let first_end = content.find('\n').map(|i| i + 1).unwrap_or(content.len());
    if content[..first_end].trim_end() == "---" {
        Some(&content[first_end..])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
description: First post
date: 2024-01-15
category: Tech
tags:
  - rust
  - blog
featured: true
commentsEnabled: false
seo:
  title: Hello SEO
  keywords: [rust, markdown]
---

This is the content.
"#;

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Hello World"));
        assert_eq!(fm.date.as_deref(), Some("2024-01-15"));
        assert_eq!(fm.category.as_deref(), Some("Tech"));
        assert_eq!(fm.tags, vec!["rust", "blog"]);
        assert_eq!(fm.featured, Some(true));
        assert_eq!(fm.published, None);
        assert_eq!(fm.comments_enabled, Some(false));

        let seo = fm.seo.unwrap();
        assert_eq!(seo.title.as_deref(), Some("Hello SEO"));
        assert_eq!(seo.description, None);
        assert_eq!(seo.keywords, vec!["rust", "markdown"]);

        assert!(body.contains("This is the content."));
        assert!(!body.contains("---"));
    }

    #[test]
    fn test_parse_single_string_tags() {
        let content = "---\ntitle: Single\ntags: Notes\n---\nBody\n";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.tags, vec!["Notes"]);
        assert_eq!(body, "Body\n");
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "# Just Markdown\n\nNo metadata here.";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert!(fm.title.is_none());
        assert!(fm.tags.is_empty());
        assert_eq!(body, content);
    }

    #[test]
    fn test_empty_frontmatter() {
        let (fm, body) = FrontMatter::parse("---\n---\nBody").unwrap();
        assert!(fm.title.is_none());
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_horizontal_rule_in_body_is_kept() {
        let content = "---\ntitle: Rules\n---\nAbove\n\n---\n\nBelow\n";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Rules"));
        assert!(body.contains("Above"));
        assert!(body.contains("---"));
        assert!(body.contains("Below"));
    }

    #[test]
    fn test_crlf_line_endings() {
        let content = "---\r\ntitle: Windows\r\n---\r\nBody\r\n";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Windows"));
        assert_eq!(body, "Body\r\n");
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        let content = "---\ntitle: [unclosed\n---\nBody\n";
        assert!(matches!(
            FrontMatter::parse(content),
            Err(ContentError::FrontMatter(_))
        ));
    }

    #[test]
    fn test_unclosed_frontmatter_is_an_error() {
        let content = "---\ntitle: Never closed\n\nBody\n";
        assert!(matches!(
            FrontMatter::parse(content),
            Err(ContentError::UnclosedFrontMatter)
        ));
    }

    #[test]
    fn test_wrong_type_is_an_error() {
        let content = "---\npublished: maybe\n---\nBody\n";
        assert!(FrontMatter::parse(content).is_err());
    }
}

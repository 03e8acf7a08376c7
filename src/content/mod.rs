//! Content module - loads, parses, and renders posts

mod frontmatter;
mod markdown;
mod post;
pub mod repository;
pub mod store;

pub use frontmatter::{FrontMatter, SeoMeta};
pub use markdown::{count_words, MarkdownRenderer, ReadingTime};
pub use post::{Category, Post, Tag, DEFAULT_AUTHOR, DEFAULT_CATEGORY};
pub use repository::{LoadReport, PostRepository};
pub use store::ContentStore;

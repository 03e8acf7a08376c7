//! Helper functions shared by the presentation layer
//!
//! Date formatting, slugs and text cleanup, and localized URL building.

mod date;
mod text;
mod url;

pub use date::*;
pub use text::*;
pub use url::*;

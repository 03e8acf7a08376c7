//! Configuration module

pub mod site;

pub use site::HighlightConfig;
pub use site::SiteConfig;

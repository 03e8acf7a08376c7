//! Initialize a new blog site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::config::{site::CONFIG_FILE, SiteConfig};
use crate::i18n::Locale;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config = SiteConfig::default();
    let content_dir = target_dir.join(&config.content_dir);

    for locale in Locale::ALL {
        fs::create_dir_all(content_dir.join(locale.as_str()))?;
    }
    fs::create_dir_all(target_dir.join(&config.i18n_dir))?;

    let config_path = target_dir.join(CONFIG_FILE);
    if !config_path.exists() {
        let header = "# Blog configuration\n# Posts live in <content_dir>/<locale>/<slug>.md\n\n";
        fs::write(&config_path, format!("{}{}", header, serde_yaml::to_string(&config)?))?;
    }

    let date = chrono::Local::now().format("%Y-%m-%d");
    let samples = [
        (
            Locale::Zh,
            format!(
                "---\ntitle: 你好，世界\ndescription: 第一篇文章\ndate: {}\ncategory: 隨筆\ntags: [開始]\n---\n\n歡迎來到新的部落格！\n",
                date
            ),
        ),
        (
            Locale::En,
            format!(
                "---\ntitle: Hello World\ndescription: The first post\ndate: {}\ncategory: Notes\ntags: [start]\n---\n\nWelcome to the new blog!\n",
                date
            ),
        ),
    ];

    for (locale, content) in samples {
        let path = content_dir.join(locale.as_str()).join("hello-world.md");
        if !path.exists() {
            fs::write(&path, content)?;
        }
    }

    Ok(())
}

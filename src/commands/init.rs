//! Initialize a new content site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::config::SiteConfig;
use crate::content::ContentKind;

const CONFIG_TEMPLATE: &str = r#"# ChatAT content configuration

# Site
title: ChatAT
# Language of command line output (en or ar)
language: en
# IANA time zone used to date undated content; empty means UTC
timezone: ''

# Content
content_dir: src/data
default_author: ChatAT Team
default_image: /api/placeholder/600/400

# Content service
server:
  ip: localhost
  port: 8888
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir)?;

    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        tracing::info!("Keeping existing {:?}", config_path);
    } else {
        fs::write(&config_path, CONFIG_TEMPLATE)?;
    }

    let config = SiteConfig::load(&config_path)?;
    let content_dir = target_dir.join(&config.content_dir);
    for kind in ContentKind::ALL {
        fs::create_dir_all(content_dir.join(kind.dir_name()))?;
    }

    // Create a sample article
    let sample_path = content_dir
        .join(ContentKind::Article.dir_name())
        .join("welcome.md");
    if !sample_path.exists() {
        let today = chrono::Utc::now().date_naive();
        let sample = format!(
            r#"---
title: "Welcome"
excerpt: "Your first article"
date: {}
language: en
tags: ["welcome"]
---

Welcome! This article lives in `{}`. Add Markdown files next to it and
they appear in the article list, newest first.

Create more content with `chatat new articles "My Article"` and serve it
with `chatat serve`.
"#,
            today.format("%Y-%m-%d"),
            content_dir.join("articles").display()
        );
        fs::write(&sample_path, sample)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Site;
    use tempfile::TempDir;

    #[test]
    fn test_init_site() {
        let dir = TempDir::new().unwrap();
        init_site(dir.path()).unwrap();

        assert!(dir.path().join("_config.yml").exists());
        for kind in ContentKind::ALL {
            assert!(dir.path().join("src/data").join(kind.dir_name()).is_dir());
        }

        let site = Site::new(dir.path()).unwrap();
        let articles = site.service().list(ContentKind::Article).unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title.en, "Welcome");
        assert_eq!(articles[0].tags, vec!["welcome"]);
    }

    #[test]
    fn test_init_keeps_existing_config() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("_config.yml"), "content_dir: content\n").unwrap();
        init_site(dir.path()).unwrap();

        assert!(dir.path().join("content/books").is_dir());
        let config = fs::read_to_string(dir.path().join("_config.yml")).unwrap();
        assert_eq!(config, "content_dir: content\n");
    }
}

//! chatat: bilingual Markdown content for the ChatAT website
//!
//! Articles, blog posts and books are Markdown files with a front-matter
//! header. This crate parses them, projects every text field into English
//! and Arabic, and serves list/detail lookups in-process or over HTTP.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod server;
pub mod service;

use anyhow::Result;
use std::path::{Path, PathBuf};

use content::{ContentStore, DirectorySource, StoreOptions};
use service::ContentService;

/// The ChatAT site rooted at a base directory
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding one subdirectory per content kind
    pub content_dir: PathBuf,
}

impl Site {
    /// Create a new site from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let content_dir = base_dir.join(&config.content_dir);
        Self {
            config,
            base_dir,
            content_dir,
        }
    }

    /// Content service reading from this site's content directory
    pub fn service(&self) -> ContentService {
        let store = ContentStore::new(
            DirectorySource::new(&self.content_dir),
            StoreOptions::from_config(&self.config),
        );
        ContentService::new(store)
    }
}

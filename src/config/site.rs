//! Site configuration (_config.yml)

use anyhow::Result;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::content::Language;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    /// Language used for CLI output
    pub language: Language,
    /// IANA time zone deciding the default date of undated content
    pub timezone: String,

    // Content
    /// Directory holding `articles/`, `blog/` and `books/`
    pub content_dir: String,
    pub default_author: String,
    pub default_image: String,

    // Server
    #[serde(default)]
    pub server: ServerConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "ChatAT".to_string(),
            language: Language::En,
            timezone: String::new(),

            content_dir: "src/data".to_string(),
            default_author: "ChatAT Team".to_string(),
            default_image: "/api/placeholder/600/400".to_string(),

            server: ServerConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Parsed time zone; `None` (UTC) when empty or unknown
    pub fn timezone(&self) -> Option<Tz> {
        let name = self.timezone.trim();
        if name.is_empty() {
            return None;
        }
        match name.parse::<Tz>() {
            Ok(tz) => Some(tz),
            Err(e) => {
                tracing::warn!("Unknown timezone '{}', using UTC: {}", name, e);
                None
            }
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "localhost".to_string(),
            port: 8888,
        }
    }
}

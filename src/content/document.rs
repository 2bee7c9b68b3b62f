//! Content kinds and the document model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::localize::{Language, LocalizedText};
use crate::error::ContentError;

/// The three kinds of content on the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Article,
    BlogPost,
    Book,
}

impl ContentKind {
    pub const ALL: [ContentKind; 3] = [ContentKind::Article, ContentKind::BlogPost, ContentKind::Book];

    /// Parse the `type` query value used over HTTP (`articles`, `blog`, `books`)
    pub fn from_query(value: &str) -> Option<Self> {
        match value {
            "articles" => Some(ContentKind::Article),
            "blog" => Some(ContentKind::BlogPost),
            "books" => Some(ContentKind::Book),
            _ => None,
        }
    }

    /// The `type` query value, which is also the content subdirectory name
    pub fn param(&self) -> &'static str {
        match self {
            ContentKind::Article => "articles",
            ContentKind::BlogPost => "blog",
            ContentKind::Book => "books",
        }
    }

    pub fn dir_name(&self) -> &'static str {
        self.param()
    }

    /// Default `category` (articles, blog) or `genre` (books)
    pub fn default_category(&self) -> &'static str {
        match self {
            ContentKind::Article => "Faith",
            ContentKind::BlogPost => "Stories",
            ContentKind::Book => "Spiritual",
        }
    }
}

impl FromStr for ContentKind {
    type Err = ContentError;

    /// Accepts the query values and the singular names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(kind) = Self::from_query(s) {
            return Ok(kind);
        }
        match s {
            "article" => Ok(ContentKind::Article),
            "blog_post" | "post" => Ok(ContentKind::BlogPost),
            "book" => Ok(ContentKind::Book),
            _ => Err(ContentError::InvalidKind(s.to_string())),
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.param())
    }
}

/// Book-only defaults
pub const DEFAULT_AUDIENCE: &str = "General";
pub const DEFAULT_FORMATS: [&str; 2] = ["Physical", "Digital"];

/// Fields that depend on the content kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum KindFields {
    Article {
        category: String,
    },
    BlogPost {
        category: String,
    },
    Book {
        description: LocalizedText,
        genre: String,
        audience: String,
        formats: Vec<String>,
        isbn: String,
    },
}

/// One Markdown file, parsed and localized
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentDocument {
    /// Derived from the file name
    pub id: u32,

    pub title: LocalizedText,

    pub excerpt: LocalizedText,

    /// Markdown body
    pub content: LocalizedText,

    pub author: String,

    /// Serialized as `YYYY-MM-DD`
    pub date: NaiveDate,

    pub image: String,

    /// Language the file was authored in
    pub language: Language,

    pub tags: Vec<String>,

    /// Never set from front-matter
    pub featured: bool,

    #[serde(flatten)]
    pub fields: KindFields,
}

impl ContentDocument {
    pub fn kind(&self) -> ContentKind {
        match self.fields {
            KindFields::Article { .. } => ContentKind::Article,
            KindFields::BlogPost { .. } => ContentKind::BlogPost,
            KindFields::Book { .. } => ContentKind::Book,
        }
    }

    /// `category` for articles and blog posts, `genre` for books
    pub fn category(&self) -> &str {
        match &self.fields {
            KindFields::Article { category } | KindFields::BlogPost { category } => category,
            KindFields::Book { genre, .. } => genre,
        }
    }

    pub fn description(&self) -> Option<&LocalizedText> {
        match &self.fields {
            KindFields::Book { description, .. } => Some(description),
            _ => None,
        }
    }
}

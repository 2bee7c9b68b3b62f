//! Content module - parsing, localization and loading of Markdown documents

mod document;
mod frontmatter;
pub mod id;
pub mod loader;
pub mod localize;
pub mod markdown;

pub use document::{ContentDocument, ContentKind, KindFields, DEFAULT_AUDIENCE, DEFAULT_FORMATS};
pub use frontmatter::{coerce_value, parse_date_string, FrontMatter, FrontMatterValue};
pub use id::generate_id;
pub use loader::{
    lookup, ContentSource, ContentStore, DirectorySource, LoadReport, MemorySource, SourceFile,
    StoreOptions,
};
pub use localize::{Language, LocalizedText, AR_PLACEHOLDER, EN_PLACEHOLDER};

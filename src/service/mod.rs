//! Content service - list and detail access shared by the CLI and the HTTP server

use crate::content::{ContentDocument, ContentKind, ContentStore};
use crate::error::{ContentError, Result};

/// List/detail access to the documents of every kind.
///
/// Each call reloads from the content source; nothing is cached, so one
/// service can be shared across concurrent requests.
pub struct ContentService {
    store: ContentStore,
}

impl ContentService {
    pub fn new(store: ContentStore) -> Self {
        Self { store }
    }

    /// All documents of `kind` (`articles`, `blog`, `books`, or a singular name)
    pub fn list_content(&self, kind: &str) -> Result<Vec<ContentDocument>> {
        self.list(kind.parse()?)
    }

    /// The document of `kind` with `id`
    pub fn get_content(&self, kind: &str, id: u32) -> Result<ContentDocument> {
        self.get(kind.parse()?, id)
    }

    pub fn list(&self, kind: ContentKind) -> Result<Vec<ContentDocument>> {
        self.store.load(kind)
    }

    pub fn get(&self, kind: ContentKind, id: u32) -> Result<ContentDocument> {
        self.store
            .get(kind, id)?
            .ok_or_else(|| ContentError::not_found(kind.param(), id))
    }
}

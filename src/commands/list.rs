//! List site content

use anyhow::Result;
use std::fmt::Write;

use crate::content::localize::NO_CONTENT;
use crate::content::{ContentDocument, Language};
use crate::Site;

/// List the documents of a content type, newest first
pub fn run(site: &Site, content_type: &str, language: Language) -> Result<()> {
    let documents = site.service().list_content(content_type)?;
    print!("{}", render(content_type, &documents, language));
    Ok(())
}

/// One line per document: id, date, category and title in `language`
pub fn render(content_type: &str, documents: &[ContentDocument], language: Language) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({}):", content_type, documents.len());

    if documents.is_empty() {
        let _ = writeln!(out, "  {}", NO_CONTENT.get(language));
        return out;
    }

    for doc in documents {
        let marker = if doc.title.is_authored(language) { "" } else { " *" };
        let _ = writeln!(
            out,
            "  {:>10}  {}  [{}] {}{}",
            doc.id,
            doc.date.format("%Y-%m-%d"),
            doc.category(),
            doc.title.get(language),
            marker
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentKind, ContentStore, MemorySource, StoreOptions};
    use crate::content::localize::EN_PLACEHOLDER;
    use crate::service::ContentService;

    fn documents() -> Vec<ContentDocument> {
        let source = MemorySource::new()
            .with_file(
                ContentKind::BlogPost,
                "hello.md",
                "---\ntitle: Hello\ndate: 2024-01-01\n---\nBody",
            )
            .with_file(
                ContentKind::BlogPost,
                "marhaba.md",
                "---\ntitle: مرحبا\ndate: 2024-02-01\nlanguage: ar\n---\nنص",
            );
        ContentService::new(ContentStore::new(source, StoreOptions::default()))
            .list(ContentKind::BlogPost)
            .unwrap()
    }

    #[test]
    fn test_render_english() {
        let out = render("blog", &documents(), Language::En);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "blog (2):");
        assert!(lines[1].contains("2024-02-01"));
        assert!(lines[1].contains(EN_PLACEHOLDER));
        assert!(lines[1].ends_with(" *"));
        assert!(lines[2].contains("99162322"));
        assert!(lines[2].ends_with("[Stories] Hello"));
    }

    #[test]
    fn test_render_arabic() {
        let out = render("blog", &documents(), Language::Ar);
        assert!(out.contains("مرحبا"));
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(
            render("books", &[], Language::Ar),
            "books (0):\n  لا توجد عناصر متاحة حالياً\n"
        );
    }
}

//! Show a single content item

use anyhow::Result;
use std::fmt::Write;

use crate::content::localize::NOT_FOUND;
use crate::content::{ContentDocument, KindFields, Language};
use crate::error::ContentError;
use crate::Site;

/// Print the document with `id`, or the localized not-found message
pub fn run(site: &Site, content_type: &str, id: u32, language: Language, json: bool) -> Result<()> {
    match site.service().get_content(content_type, id) {
        Ok(doc) if json => println!("{}", serde_json::to_string_pretty(&doc)?),
        Ok(doc) => print!("{}", render(&doc, language)),
        Err(ContentError::NotFound { .. }) => println!("{}", NOT_FOUND.get(language)),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

/// Human-readable view of one document in `language`
pub fn render(doc: &ContentDocument, language: Language) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}", doc.title.get(language));
    let _ = writeln!(out);
    let _ = writeln!(out, "id:       {}", doc.id);
    let _ = writeln!(out, "date:     {}", doc.date.format("%Y-%m-%d"));
    let _ = writeln!(out, "author:   {}", doc.author);
    let _ = writeln!(out, "language: {}", doc.language);
    match &doc.fields {
        KindFields::Article { category } | KindFields::BlogPost { category } => {
            let _ = writeln!(out, "category: {}", category);
        }
        KindFields::Book {
            genre,
            audience,
            formats,
            isbn,
            ..
        } => {
            let _ = writeln!(out, "genre:    {}", genre);
            let _ = writeln!(out, "audience: {}", audience);
            let _ = writeln!(out, "formats:  {}", formats.join(", "));
            if !isbn.is_empty() {
                let _ = writeln!(out, "isbn:     {}", isbn);
            }
        }
    }
    if !doc.tags.is_empty() {
        let _ = writeln!(out, "tags:     {}", doc.tags.join(", "));
    }
    let _ = writeln!(out);
    if let Some(description) = doc.description() {
        let _ = writeln!(out, "{}", description.get(language));
        let _ = writeln!(out);
    }
    let _ = writeln!(out, "{}", doc.content.get(language));
    out
}

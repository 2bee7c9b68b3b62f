//! Create a new content file

use anyhow::Result;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

use crate::content::{ContentKind, Language, DEFAULT_AUDIENCE, DEFAULT_FORMATS};
use crate::Site;

/// Create a new Markdown file for `kind` and return its path
pub fn create_content(
    site: &Site,
    kind: ContentKind,
    title: &str,
    language: Language,
) -> Result<PathBuf> {
    let today = chrono::Utc::now().date_naive();
    let target_dir = site.content_dir.join(kind.dir_name());
    fs::create_dir_all(&target_dir)?;

    let file_path = target_dir.join(file_name(title, today));

    // Check if file already exists
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let content = scaffold(site, kind, title, language, today);
    fs::write(&file_path, content)?;

    println!("Created: {:?}", file_path);

    Ok(file_path)
}

/// `YYYY-MM-DD-<slug>.md`
fn file_name(title: &str, date: NaiveDate) -> String {
    let slug = slug::slugify(title);
    let slug = if slug.is_empty() { "untitled".to_string() } else { slug };
    format!("{}-{}.md", date.format("%Y-%m-%d"), slug)
}

fn scaffold(site: &Site, kind: ContentKind, title: &str, language: Language, date: NaiveDate) -> String {
    let mut front_matter = format!(
        "---\ntitle: \"{}\"\nexcerpt: \"\"\ndate: {}\nlanguage: {}\nauthor: {}\nimage: {}\ntags: []\n",
        title.trim(),
        date.format("%Y-%m-%d"),
        language,
        site.config.default_author,
        site.config.default_image,
    );

    match kind {
        ContentKind::Article | ContentKind::BlogPost => {
            front_matter.push_str(&format!("category: {}\n", kind.default_category()));
        }
        ContentKind::Book => {
            let formats = DEFAULT_FORMATS
                .iter()
                .map(|f| format!("\"{}\"", f))
                .collect::<Vec<_>>()
                .join(", ");
            front_matter.push_str(&format!(
                "description: \"\"\ngenre: {}\naudience: {}\nformats: [{}]\nisbn: \"\"\n",
                kind.default_category(),
                DEFAULT_AUDIENCE,
                formats
            ));
        }
    }

    front_matter.push_str("---\n\n");
    front_matter
}

//! Content loader - collects the documents of one kind from a content source

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::document::{ContentDocument, ContentKind, KindFields, DEFAULT_AUDIENCE, DEFAULT_FORMATS};
use super::frontmatter::{parse_date_string, FrontMatter};
use super::id::generate_id;
use super::localize::{Language, LocalizedText};
use super::markdown;
use crate::config::SiteConfig;
use crate::error::{ContentError, Result};

/// A raw Markdown file handed to the store
#[derive(Debug)]
pub struct SourceFile {
    /// File name including the extension
    pub name: String,
    /// File text, or the error hit while reading it
    pub text: Result<String>,
}

/// Where raw Markdown files come from
pub trait ContentSource: Send + Sync {
    /// All Markdown files of `kind`, ordered by file name.
    ///
    /// A failure for a single file belongs in its `SourceFile::text`; an
    /// `Err` here means the listing itself failed.
    fn files(&self, kind: ContentKind) -> Result<Vec<SourceFile>>;
}

/// Reads `<root>/<kind dir>/*.md`, without descending into subdirectories
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl ContentSource for DirectorySource {
    fn files(&self, kind: ContentKind) -> Result<Vec<SourceFile>> {
        let dir = self.root.join(kind.dir_name());
        if !dir.exists() {
            tracing::debug!("Content directory {:?} does not exist", dir);
            return Ok(Vec::new());
        }
        if !dir.is_dir() {
            return Err(ContentError::internal(format!(
                "{} is not a directory",
                dir.display()
            )));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(ContentError::internal(format!(
                        "Failed to list {}: {}",
                        dir.display(),
                        e
                    )));
                }
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry in {:?}: {}", dir, e);
                    continue;
                }
            };

            let path = entry.path();
            if !path.is_file() || !is_markdown_file(path) {
                continue;
            }

            let name = entry.file_name().to_string_lossy().to_string();
            let text = fs::read_to_string(path).map_err(|source| ContentError::FileRead {
                file: name.clone(),
                source,
            });
            files.push(SourceFile { name, text });
        }

        Ok(files)
    }
}

/// Files held in memory, keyed by kind and file name
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<ContentKind, BTreeMap<String, String>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, replacing any file of the same name
    pub fn with_file(mut self, kind: ContentKind, name: &str, text: &str) -> Self {
        self.insert(kind, name, text);
        self
    }

    pub fn insert(&mut self, kind: ContentKind, name: &str, text: &str) {
        self.files
            .entry(kind)
            .or_default()
            .insert(name.to_string(), text.to_string());
    }
}

impl ContentSource for MemorySource {
    fn files(&self, kind: ContentKind) -> Result<Vec<SourceFile>> {
        Ok(self
            .files
            .get(&kind)
            .into_iter()
            .flatten()
            .filter(|(name, _)| name.ends_with(".md"))
            .map(|(name, text)| SourceFile {
                name: name.clone(),
                text: Ok(text.clone()),
            })
            .collect())
    }
}

/// Values filled in when front-matter leaves them out
#[derive(Debug, Clone)]
pub struct StoreOptions {
    pub default_author: String,
    pub default_image: String,
    /// Zone used to decide what "today" is; UTC when unset
    pub timezone: Option<Tz>,
    /// Fixed processing date, overriding the clock
    pub today: Option<NaiveDate>,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            default_author: "ChatAT Team".to_string(),
            default_image: "/api/placeholder/600/400".to_string(),
            timezone: None,
            today: None,
        }
    }
}

impl StoreOptions {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            default_author: config.default_author.clone(),
            default_image: config.default_image.clone(),
            timezone: config.timezone(),
            today: None,
        }
    }

    /// Pin the processing date
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    fn today(&self) -> NaiveDate {
        match (self.today, self.timezone) {
            (Some(today), _) => today,
            (None, Some(tz)) => Utc::now().with_timezone(&tz).date_naive(),
            (None, None) => Utc::now().date_naive(),
        }
    }
}

/// Result of loading one kind, with the files that were skipped
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Sorted by date, newest first
    pub documents: Vec<ContentDocument>,
    /// One message per skipped file
    pub warnings: Vec<String>,
}

/// Loads and assembles the documents of each kind
pub struct ContentStore {
    source: Box<dyn ContentSource>,
    options: StoreOptions,
}

impl ContentStore {
    pub fn new(source: impl ContentSource + 'static, options: StoreOptions) -> Self {
        Self {
            source: Box::new(source),
            options,
        }
    }

    /// Load all documents of `kind`, newest first
    pub fn load(&self, kind: ContentKind) -> Result<Vec<ContentDocument>> {
        self.load_with_report(kind).map(|report| report.documents)
    }

    /// Load all documents of `kind`, keeping a warning for every skipped file
    pub fn load_with_report(&self, kind: ContentKind) -> Result<LoadReport> {
        let files = self.source.files(kind)?;
        let today = self.options.today();
        let mut report = LoadReport::default();

        for file in files {
            let document = file
                .text
                .and_then(|text| self.build_document(kind, &file.name, &text, today));
            match document {
                Ok(document) => report.documents.push(document),
                Err(e) => {
                    tracing::warn!("Failed to process file {}: {}", file.name, e);
                    report.warnings.push(e.to_string());
                }
            }
        }

        // Sort by date descending (newest first); ties keep file name order
        report.documents.sort_by(|a, b| b.date.cmp(&a.date));

        tracing::debug!(
            "Loaded {} {} ({} skipped)",
            report.documents.len(),
            kind,
            report.warnings.len()
        );

        Ok(report)
    }

    /// Load `kind` and find the document with `id`
    pub fn get(&self, kind: ContentKind, id: u32) -> Result<Option<ContentDocument>> {
        let documents = self.load(kind)?;
        Ok(lookup(&documents, id).cloned())
    }

    /// Assemble one document from its file
    fn build_document(
        &self,
        kind: ContentKind,
        name: &str,
        text: &str,
        today: NaiveDate,
    ) -> Result<ContentDocument> {
        let (fm, body) = FrontMatter::parse(text);
        if fm.is_empty() && body.trim().is_empty() {
            return Err(ContentError::Parse {
                file: name.to_string(),
                message: "document is empty".to_string(),
            });
        }

        // Only the first `.md` goes: `notes.md.md` keeps the stem `notes.md`
        let stem = name.replacen(".md", "", 1);
        let stem = stem.as_str();
        let language = Language::parse(fm.text("language").as_deref());
        let localized = |value: String| LocalizedText::resolve(value, language);

        let title = fm.text("title").unwrap_or_else(|| stem.to_string());
        let excerpt = fm
            .text("excerpt")
            .or_else(|| markdown::excerpt(body))
            .unwrap_or_else(|| title.clone());

        let date = match fm.text("date") {
            Some(raw) => parse_date_string(&raw).unwrap_or_else(|| {
                tracing::warn!("Unparsable date '{}' in {}, using {}", raw, name, today);
                today
            }),
            None => today,
        };

        let fields = match kind {
            ContentKind::Article | ContentKind::BlogPost => {
                let category = fm
                    .text("category")
                    .unwrap_or_else(|| kind.default_category().to_string());
                if kind == ContentKind::Article {
                    KindFields::Article { category }
                } else {
                    KindFields::BlogPost { category }
                }
            }
            ContentKind::Book => KindFields::Book {
                description: localized(fm.text("description").unwrap_or_else(|| excerpt.clone())),
                genre: fm
                    .text("genre")
                    .unwrap_or_else(|| kind.default_category().to_string()),
                audience: fm
                    .text("audience")
                    .unwrap_or_else(|| DEFAULT_AUDIENCE.to_string()),
                formats: fm
                    .list("formats")
                    .unwrap_or_else(|| DEFAULT_FORMATS.iter().map(|f| f.to_string()).collect()),
                isbn: fm.text("isbn").unwrap_or_default(),
            },
        };

        Ok(ContentDocument {
            id: generate_id(stem),
            title: localized(title),
            excerpt: localized(excerpt),
            content: localized(body.to_string()),
            author: fm
                .text("author")
                .unwrap_or_else(|| self.options.default_author.clone()),
            date,
            image: fm
                .text("image")
                .unwrap_or_else(|| self.options.default_image.clone()),
            language,
            tags: fm.list("tags").unwrap_or_default(),
            featured: false,
            fields,
        })
    }
}

/// Find a document by id
pub fn lookup(documents: &[ContentDocument], id: u32) -> Option<&ContentDocument> {
    documents.iter().find(|doc| doc.id == id)
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::localize::{AR_PLACEHOLDER, EN_PLACEHOLDER};
    use tempfile::TempDir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn store(source: impl ContentSource + 'static) -> ContentStore {
        ContentStore::new(source, StoreOptions::default().with_today(today()))
    }

    fn dated(date: &str) -> String {
        format!("---\ntitle: Post {date}\ndate: {date}\n---\nBody for {date}")
    }

    #[test]
    fn test_missing_field_defaults() {
        let source = MemorySource::new().with_file(
            ContentKind::Article,
            "welcome.md",
            "---\ntitle: Welcome\nlanguage: en\n---\nHello and welcome.",
        );
        let docs = store(source).load(ContentKind::Article).unwrap();
        assert_eq!(docs.len(), 1);

        let doc = &docs[0];
        assert_eq!(doc.id, generate_id("welcome"));
        assert_eq!(doc.author, "ChatAT Team");
        assert_eq!(doc.category(), "Faith");
        assert!(doc.tags.is_empty());
        assert_eq!(doc.image, "/api/placeholder/600/400");
        assert_eq!(doc.date, today());
        assert!(!doc.featured);
        assert_eq!(doc.title.en, "Welcome");
        assert_eq!(doc.title.ar, AR_PLACEHOLDER);
        assert_eq!(doc.content.en, "Hello and welcome.");
        assert_eq!(doc.excerpt.en, "Hello and welcome.");
    }

    #[test]
    fn test_kind_specific_defaults() {
        let source = MemorySource::new()
            .with_file(ContentKind::BlogPost, "story.md", "---\ntitle: Story\n---\nOnce.")
            .with_file(
                ContentKind::Book,
                "book-one.md",
                "---\ntitle: Book One\nexcerpt: A short book\n---\nChapter one.",
            );
        let store = store(source);

        let blog = store.load(ContentKind::BlogPost).unwrap();
        assert_eq!(blog[0].category(), "Stories");
        assert_eq!(blog[0].kind(), ContentKind::BlogPost);

        let books = store.load(ContentKind::Book).unwrap();
        let book = &books[0];
        assert_eq!(book.id, 2003485058);
        match &book.fields {
            KindFields::Book {
                description,
                genre,
                audience,
                formats,
                isbn,
            } => {
                assert_eq!(description.en, "A short book");
                assert_eq!(genre, "Spiritual");
                assert_eq!(audience, "General");
                assert_eq!(formats, &vec!["Physical".to_string(), "Digital".to_string()]);
                assert_eq!(isbn, "");
            }
            other => panic!("expected book fields, got {:?}", other),
        }
    }

    #[test]
    fn test_front_matter_overrides_defaults() {
        let source = MemorySource::new().with_file(
            ContentKind::Book,
            "psalms.md",
            "---\ntitle: Psalms\nauthor: David\ngenre: Poetry\naudience: Youth\nformats: ['Digital']\nisbn: 9781234567890\ntags: [\"worship\", \"poetry\"]\nimage: /images/psalms.jpg\nfeatured: true\n---\nSing.",
        );
        let books = store(source).load(ContentKind::Book).unwrap();
        let book = &books[0];
        assert_eq!(book.author, "David");
        assert_eq!(book.category(), "Poetry");
        assert_eq!(book.image, "/images/psalms.jpg");
        assert_eq!(book.tags, vec!["worship", "poetry"]);
        assert!(!book.featured);
        match &book.fields {
            KindFields::Book {
                audience,
                formats,
                isbn,
                ..
            } => {
                assert_eq!(audience, "Youth");
                assert_eq!(formats, &vec!["Digital".to_string()]);
                assert_eq!(isbn, "9781234567890");
            }
            other => panic!("expected book fields, got {:?}", other),
        }
    }

    #[test]
    fn test_arabic_document() {
        let source = MemorySource::new().with_file(
            ContentKind::Article,
            "marhaba.md",
            "---\ntitle: مرحبا\nlanguage: ar\n---\nنص المقال",
        );
        let docs = store(source).load(ContentKind::Article).unwrap();
        let doc = &docs[0];
        assert_eq!(doc.language, Language::Ar);
        assert_eq!(doc.title.ar, "مرحبا");
        assert_eq!(doc.title.en, EN_PLACEHOLDER);
        assert_eq!(doc.content.ar, "نص المقال");
        assert_eq!(doc.content.en, EN_PLACEHOLDER);
    }

    #[test]
    fn test_sorted_by_date_descending() {
        let source = MemorySource::new()
            .with_file(ContentKind::Article, "a.md", &dated("2024-01-01"))
            .with_file(ContentKind::Article, "b.md", &dated("2025-06-15"))
            .with_file(ContentKind::Article, "c.md", &dated("2023-12-25"));
        let docs = store(source).load(ContentKind::Article).unwrap();
        let dates: Vec<String> = docs.iter().map(|d| d.date.to_string()).collect();
        assert_eq!(dates, vec!["2025-06-15", "2024-01-01", "2023-12-25"]);
    }

    #[test]
    fn test_equal_dates_keep_file_order() {
        let source = MemorySource::new()
            .with_file(ContentKind::Article, "b-second.md", &dated("2024-05-01"))
            .with_file(ContentKind::Article, "a-first.md", &dated("2024-05-01"))
            .with_file(ContentKind::Article, "c-newest.md", &dated("2024-06-01"));
        let docs = store(source).load(ContentKind::Article).unwrap();
        let ids: Vec<u32> = docs.iter().map(|d| d.id).collect();
        assert_eq!(
            ids,
            vec![
                generate_id("c-newest"),
                generate_id("a-first"),
                generate_id("b-second")
            ]
        );
    }

    #[test]
    fn test_date_fallbacks() {
        let source = MemorySource::new()
            .with_file(ContentKind::Article, "bad-date.md", "---\ndate: someday\n---\nBody")
            .with_file(ContentKind::Article, "no-date.md", "---\ntitle: Undated\n---\nBody")
            .with_file(
                ContentKind::Article,
                "timestamp.md",
                "---\ndate: 2024-03-01 18:45:00\n---\nBody",
            );
        let docs = store(source).load(ContentKind::Article).unwrap();
        assert_eq!(docs.len(), 3);
        assert_eq!(docs[0].date, today());
        assert_eq!(docs[1].date, today());
        assert_eq!(docs[2].date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn test_title_and_excerpt_fallbacks() {
        let source = MemorySource::new().with_file(
            ContentKind::BlogPost,
            "2024-06-15-hope.md",
            "# Hope\n\nHope does not disappoint.\n\nMore text.",
        );
        let docs = store(source).load(ContentKind::BlogPost).unwrap();
        let doc = &docs[0];
        assert_eq!(doc.id, 206020971);
        assert_eq!(doc.title.en, "2024-06-15-hope");
        assert_eq!(doc.excerpt.en, "Hope does not disappoint.");
        assert!(doc.content.en.starts_with("# Hope"));
    }

    #[test]
    fn test_lookup() {
        let source = MemorySource::new()
            .with_file(ContentKind::Article, "grace.md", &dated("2024-01-01"))
            .with_file(ContentKind::Article, "faith-and-works.md", &dated("2024-02-01"));
        let store = store(source);
        let docs = store.load(ContentKind::Article).unwrap();

        let found = lookup(&docs, 290618879).unwrap();
        assert_eq!(found.title.en, "Post 2024-02-01");
        assert!(lookup(&docs, 1).is_none());

        assert!(store
            .get(ContentKind::Article, generate_id("grace"))
            .unwrap()
            .is_some());
        assert!(store.get(ContentKind::Article, 1).unwrap().is_none());
    }

    #[test]
    fn test_only_first_extension_is_stripped() {
        let source =
            MemorySource::new().with_file(ContentKind::Article, "notes.md.md", &dated("2024-01-01"));
        let docs = store(source).load(ContentKind::Article).unwrap();
        assert_eq!(docs[0].id, 1582000100);
        assert_eq!(docs[0].id, generate_id("notes.md"));
    }

    #[test]
    fn test_fault_isolation() {
        let dir = TempDir::new().unwrap();
        let articles = dir.path().join("articles");
        fs::create_dir_all(&articles).unwrap();

        for (name, date) in [
            ("good-1.md", "2024-01-01"),
            ("good-2.md", "2024-02-01"),
            ("good-3.md", "2024-03-01"),
            ("good-4.md", "2024-04-01"),
        ] {
            fs::write(articles.join(name), dated(date)).unwrap();
        }
        // Not valid UTF-8
        fs::write(articles.join("bad.md"), [0x2d, 0x2d, 0x2d, 0x0a, 0xff, 0xfe, 0xfd]).unwrap();

        let store = store(DirectorySource::new(dir.path()));
        let report = store.load_with_report(ContentKind::Article).unwrap();
        assert_eq!(report.documents.len(), 4);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("bad.md"));
        assert_eq!(store.load(ContentKind::Article).unwrap().len(), 4);
    }

    #[test]
    fn test_empty_file_is_skipped() {
        let source = MemorySource::new()
            .with_file(ContentKind::Article, "empty.md", "  \n")
            .with_file(ContentKind::Article, "real.md", &dated("2024-01-01"));
        let report = store(source)
            .load_with_report(ContentKind::Article)
            .unwrap();
        assert_eq!(report.documents.len(), 1);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_directory_scan_is_flat_and_markdown_only() {
        let dir = TempDir::new().unwrap();
        let blog = dir.path().join("blog");
        fs::create_dir_all(blog.join("nested")).unwrap();
        fs::write(blog.join("top.md"), dated("2024-01-01")).unwrap();
        fs::write(blog.join("notes.txt"), dated("2024-01-02")).unwrap();
        fs::write(blog.join("nested").join("deep.md"), dated("2024-01-03")).unwrap();

        let docs = store(DirectorySource::new(dir.path()))
            .load(ContentKind::BlogPost)
            .unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, generate_id("top"));
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let dir = TempDir::new().unwrap();
        let docs = store(DirectorySource::new(dir.path()))
            .load(ContentKind::Book)
            .unwrap();
        assert!(docs.is_empty());
    }
}

//! CLI entry point for chatat

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chatat::content::{ContentKind, Language};

#[derive(Parser)]
#[command(name = "chatat")]
#[command(author = "ChatAT Team")]
#[command(version)]
#[command(about = "Bilingual Markdown content for the ChatAT website", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new content site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new article, blog post or book
    New {
        /// Content type (articles, blog, books)
        r#type: String,

        /// Title of the new item
        title: String,

        /// Authoring language (en, ar)
        #[arg(short, long, default_value = "en")]
        lang: Language,
    },

    /// List the items of a content type
    #[command(alias = "ls")]
    List {
        /// Content type (articles, blog, books)
        #[arg(default_value = "articles")]
        r#type: String,

        /// Display language (defaults to the configured language)
        #[arg(short, long)]
        lang: Option<Language>,
    },

    /// Show a single item
    Show {
        /// Content type (articles, blog, books)
        r#type: String,

        /// Item id
        id: u32,

        /// Display language (defaults to the configured language)
        #[arg(short, long)]
        lang: Option<Language>,

        /// Print the item as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start the HTTP content service
    #[command(alias = "s")]
    Serve {
        /// Port to listen on (defaults to the configured port)
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to (defaults to the configured address)
        #[arg(short, long)]
        ip: Option<String>,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "chatat=debug,tower_http=debug,info"
    } else {
        "chatat=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Cannot determine the current directory")?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing content site in {:?}", target_dir);
            chatat::commands::init::init_site(&target_dir)?;
            println!("Initialized content site in {:?}", target_dir);
        }

        Commands::New {
            r#type,
            title,
            lang,
        } => {
            let site = chatat::Site::new(&base_dir)?;
            let kind: ContentKind = r#type.parse()?;
            tracing::info!("Creating new {} with title: {}", kind, title);
            chatat::commands::new::create_content(&site, kind, &title, lang)?;
        }

        Commands::List { r#type, lang } => {
            let site = chatat::Site::new(&base_dir)?;
            let lang = lang.unwrap_or(site.config.language);
            chatat::commands::list::run(&site, &r#type, lang)?;
        }

        Commands::Show {
            r#type,
            id,
            lang,
            json,
        } => {
            let site = chatat::Site::new(&base_dir)?;
            let lang = lang.unwrap_or(site.config.language);
            chatat::commands::show::run(&site, &r#type, id, lang, json)?;
        }

        Commands::Serve { port, ip } => {
            let site = chatat::Site::new(&base_dir)?;
            let ip = ip.unwrap_or_else(|| site.config.server.ip.clone());
            let port = port.unwrap_or(site.config.server.port);

            tracing::info!("Starting content service at http://{}:{}", ip, port);
            chatat::server::start(&site, &ip, port).await?;
        }

        Commands::Version => {
            println!("chatat version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

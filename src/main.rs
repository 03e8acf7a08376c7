//! CLI entry point for bilingual-blog

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bilingual_blog::commands::new::NewPost;
use bilingual_blog::{Blog, Locale};

#[derive(Parser)]
#[command(name = "blog")]
#[command(version)]
#[command(about = "Content pipeline for a bilingual Markdown blog", long_about = None)]
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
    /// Initialize a new blog site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Locale of the post (zh, en)
        #[arg(short, long, default_value = "zh")]
        locale: Locale,

        /// Category label
        #[arg(long)]
        category: Option<String>,

        /// Tags, comma separated
        #[arg(short, long, value_delimiter = ',')]
        tags: Vec<String>,

        /// Filename for the new post (without extension)
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// List site information
    List {
        /// Type of content to list (post, tag, category)
        #[arg(default_value = "post")]
        r#type: String,

        /// Locale to list (zh, en)
        #[arg(short, long, default_value = "zh")]
        locale: Locale,
    },

    /// Search post titles, descriptions, categories, and tags
    Search {
        query: String,

        /// Locale to search (zh, en)
        #[arg(short, long, default_value = "zh")]
        locale: Locale,
    },

    /// Start the JSON API server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "bilingual_blog=debug,info"
    } else {
        "bilingual_blog=info"
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
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing blog in {:?}", target_dir);
            bilingual_blog::commands::init::init_site(&target_dir)?;
            println!("Initialized blog in {:?}", target_dir);
        }

        Commands::New {
            title,
            locale,
            category,
            tags,
            slug,
        } => {
            let blog = Blog::new(&base_dir)?;
            tracing::info!("Creating new {} post with title: {}", locale, title);
            let path = blog.new_post(&NewPost {
                title,
                locale,
                category,
                tags,
                slug,
            })?;
            println!("Created: {:?}", path);
        }

        Commands::List { r#type, locale } => {
            let blog = Blog::new(&base_dir)?;
            bilingual_blog::commands::list::run(&blog, &r#type, locale)?;
        }

        Commands::Search { query, locale } => {
            let blog = Blog::new(&base_dir)?;
            bilingual_blog::commands::search::run(&blog, &query, locale)?;
        }

        Commands::Serve { port, ip } => {
            let blog = Blog::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            bilingual_blog::server::start(&blog, &ip, port).await?;
        }

        Commands::Version => {
            println!("blog version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

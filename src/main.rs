use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;

use cli::commands::Output;
use config::Config;

#[derive(Parser)]
#[command(name = "mdo")]
#[command(author, version, about = "mdoutline - navigate markdown by its headings")]
struct Cli {
    /// Path to config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    
    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
    
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the heading tree
    Tree {
        /// Markdown file ("-" for stdin)
        file: PathBuf,
        
        /// Ignore collapsed headings
        #[arg(long)]
        all: bool,
    },
    
    /// List headings in document order
    Flat {
        /// Markdown file ("-" for stdin)
        file: PathBuf,
    },
    
    /// Find headings containing text (case-insensitive)
    Search {
        /// Markdown file ("-" for stdin)
        file: PathBuf,
        
        /// Text to look for
        query: String,
    },
    
    /// Show heading counts per level
    Stats {
        /// Markdown file ("-" for stdin)
        file: PathBuf,
    },
    
    /// Generate a table of contents
    Toc {
        /// Markdown file ("-" for stdin)
        file: PathBuf,
        
        /// Deepest heading level to include
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=6))]
        max_level: Option<u8>,
        
        /// Link to slugified heading text
        #[arg(long)]
        slug: bool,
        
        /// Spaces per nesting level
        #[arg(long)]
        indent: Option<usize>,
    },
    
    /// Line number for a character offset
    Line {
        /// Markdown file ("-" for stdin)
        file: PathBuf,
        
        /// Character offset (0-based)
        #[arg(allow_negative_numbers = true)]
        position: i64,
    },
    
    /// Character offset where a line starts
    Pos {
        /// Markdown file ("-" for stdin)
        file: PathBuf,
        
        /// Line number (1-based)
        #[arg(allow_negative_numbers = true)]
        line: i64,
    },
    
    /// Collapse or expand a heading in `mdo tree`
    Fold {
        /// Markdown file
        file: PathBuf,
        
        /// Heading id, e.g. heading-12
        id: String,
    },
    
    /// Summarize headings in every markdown file under a directory
    Scan {
        /// Directory to walk
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
    
    /// Create a default config file
    Init,
}

fn init_logging(verbose: bool, config: &Config) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("MDO_LOG").unwrap_or_else(|_| {
            EnvFilter::new(config.log_level.as_deref().unwrap_or("warn"))
        })
    };
    
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    
    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    
    if let Commands::Init = cli.command {
        return cli::commands::init(&config_path);
    }
    
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    
    init_logging(cli.verbose, &config);
    tracing::debug!(config = %config_path.display(), "Loaded configuration");
    
    let output = Output { json: cli.json };
    
    match cli.command {
        Commands::Tree { file, all } => cli::commands::tree(&config, &output, &file, all),
        Commands::Flat { file } => cli::commands::flat(&output, &file),
        Commands::Search { file, query } => cli::commands::search_headings(&output, &file, &query),
        Commands::Stats { file } => cli::commands::stats(&output, &file),
        Commands::Toc { file, max_level, slug, indent } => {
            cli::commands::toc(&config, &output, &file, max_level, slug, indent)
        }
        Commands::Line { file, position } => cli::commands::line(&output, &file, position),
        Commands::Pos { file, line } => cli::commands::pos(&output, &file, line),
        Commands::Fold { file, id } => cli::commands::fold(&config, &output, &file, &id),
        Commands::Scan { dir } => cli::commands::scan(&output, &dir),
        Commands::Init => cli::commands::init(&config_path),
    }
}

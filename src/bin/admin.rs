//! Recipebox Admin CLI
//!
//! Maintains the cuisine and tag vocabularies recipes are validated against.
//!
//! # Usage
//!
//! ```bash
//! recipebox-admin cuisine add Italian
//! recipebox-admin tag add quick spicy vegan
//! recipebox-admin tag list
//! recipebox-admin cuisine remove Italian
//! ```
//!
//! # Configuration
//!
//! The database is located the same way the server locates it: the
//! `data_dir` of the config file (`--config`, `RECIPEBOX_CONFIG`, or
//! ~/.config/recipebox/config.yaml), overridden by `RECIPEBOX_DATA_DIR`,
//! overridden by `--data-dir`.

use clap::{Args, Parser, Subcommand};
use recipebox::config::{Config, ConfigError};
use recipebox::db::{init_db, CatalogRepository};
use recipebox_core::{Cuisine, Tag};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "recipebox-admin")]
#[command(version)]
#[command(about = "Recipebox catalog administration tool")]
struct Cli {
    /// Path to the server config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Data directory (overrides config file and RECIPEBOX_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage cuisines
    Cuisine(VocabularyCommand),
    /// Manage tags
    Tag(VocabularyCommand),
}

#[derive(Args)]
struct VocabularyCommand {
    #[command(subcommand)]
    command: VocabularySubcommand,
}

#[derive(Subcommand)]
enum VocabularySubcommand {
    /// Add one or more entries
    Add {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// List all entries
    List,
    /// Remove an entry. Recipes keep their embedded copy.
    Remove { name: String },
}

#[derive(Clone, Copy)]
enum Vocabulary {
    Cuisine,
    Tag,
}

impl Vocabulary {
    fn label(self) -> &'static str {
        match self {
            Vocabulary::Cuisine => "cuisine",
            Vocabulary::Tag => "tag",
        }
    }
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// The server's database path, without requiring its JWT secret.
fn database_path(
    config_path: Option<PathBuf>,
    data_dir: Option<PathBuf>,
) -> Result<PathBuf, ConfigError> {
    let mut config = Config::load_without_secret(config_path)?;
    if let Some(dir) = data_dir {
        config.data_dir = dir;
    }
    Ok(config.database_path())
}

async fn add(catalog: &CatalogRepository, vocabulary: Vocabulary, names: Vec<String>) -> CliResult {
    for name in names {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }

        let exists = match vocabulary {
            Vocabulary::Cuisine => catalog.find_cuisine(name).await?.is_some(),
            Vocabulary::Tag => !catalog.find_tags(&[name.to_string()]).await?.is_empty(),
        };
        if exists {
            println!("Skipped existing {}: {}", vocabulary.label(), name);
            continue;
        }

        match vocabulary {
            Vocabulary::Cuisine => catalog.create_cuisine(&Cuisine::new(name)).await?,
            Vocabulary::Tag => catalog.create_tag(&Tag::new(name)).await?,
        }
        println!("Added {}: {}", vocabulary.label(), name);
    }
    Ok(())
}

async fn list(catalog: &CatalogRepository, vocabulary: Vocabulary) -> CliResult {
    let entries: Vec<(String, String)> = match vocabulary {
        Vocabulary::Cuisine => catalog
            .list_cuisines()
            .await?
            .into_iter()
            .map(|c| (c.id.to_string(), c.name))
            .collect(),
        Vocabulary::Tag => catalog
            .list_tags()
            .await?
            .into_iter()
            .map(|t| (t.id.to_string(), t.name))
            .collect(),
    };

    if entries.is_empty() {
        println!("No {} entries.", vocabulary.label());
        return Ok(());
    }

    println!("{:<38} {:<30}", "ID", "NAME");
    println!("{}", "-".repeat(68));
    for (id, name) in &entries {
        println!("{:<38} {:<30}", id, name);
    }
    println!();
    println!("Total: {} {}(s)", entries.len(), vocabulary.label());
    Ok(())
}

async fn remove(catalog: &CatalogRepository, vocabulary: Vocabulary, name: String) -> CliResult {
    let removed = match vocabulary {
        Vocabulary::Cuisine => catalog.delete_cuisine(&name).await?,
        Vocabulary::Tag => catalog.delete_tag(&name).await?,
    };

    if !removed {
        eprintln!("Error: {} '{}' not found", vocabulary.label(), name);
        std::process::exit(1);
    }
    println!("Removed {}: {}", vocabulary.label(), name);
    Ok(())
}

async fn run(cli: Cli) -> CliResult {
    let pool = init_db(&database_path(cli.config, cli.data_dir)?).await?;
    let catalog = CatalogRepository::new(pool);

    let (vocabulary, command) = match cli.command {
        Commands::Cuisine(cmd) => (Vocabulary::Cuisine, cmd.command),
        Commands::Tag(cmd) => (Vocabulary::Tag, cmd.command),
    };

    match command {
        VocabularySubcommand::Add { names } => add(&catalog, vocabulary, names).await,
        VocabularySubcommand::List => list(&catalog, vocabulary).await,
        VocabularySubcommand::Remove { name } => remove(&catalog, vocabulary, name).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

//! Manifest Query CLI
//!
//! Loads manifests and answers attribute lookups.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use manifests::{ContextSource, DirectoryContext, FilesSource, Manifests, ManifestsConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "manifest-query")]
#[command(about = "Read attributes from MANIFEST.MF files")]
struct Cli {
    /// Manifest file to load (repeatable); the default registry is used when
    /// neither --file nor --dir is given
    #[arg(short, long)]
    file: Vec<PathBuf>,

    /// Deployment directory whose META-INF/MANIFEST.MF is loaded (repeatable)
    #[arg(short, long)]
    dir: Vec<PathBuf>,

    /// Config file with parser limits
    #[arg(short, long)]
    config: Option<String>,

    /// Print the load report
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the value of an attribute
    Read {
        name: String,
    },

    /// Exit 0 if the attribute exists, 1 otherwise
    Exists {
        name: String,
    },

    /// Print every value seen for an attribute, oldest first
    History {
        name: String,
    },

    /// List all attributes
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<bool> {
    let local;
    let registry: &Manifests = if cli.file.is_empty() && cli.dir.is_empty() {
        manifests::singleton()
    } else {
        let config = ManifestsConfig::load_from(cli.config.as_deref())
            .context("failed to load config")?;
        local = Manifests::new().with_limits(config.parse_limits());
        if !cli.file.is_empty() {
            let report = local.append(&FilesSource::from_paths(&cli.file))?;
            if cli.verbose {
                println!("{}", serde_json::to_string(&report)?);
            }
        }
        for dir in &cli.dir {
            let report = local.append(&ContextSource::new(DirectoryContext::new(dir)))?;
            if cli.verbose {
                println!("{}", serde_json::to_string(&report)?);
            }
        }
        &local
    };

    match cli.command {
        Commands::Read { name } => {
            println!("{}", registry.read(&name)?);
            Ok(true)
        }

        Commands::Exists { name } => {
            let found = registry.exists(&name)?;
            println!("{}", found);
            Ok(found)
        }

        Commands::History { name } => {
            for value in registry.all_values(&name) {
                println!("{}", value);
            }
            Ok(true)
        }

        Commands::List { json } => {
            let map = registry.as_map();
            if json {
                let sorted: std::collections::BTreeMap<_, _> = map.into_iter().collect();
                println!("{}", serde_json::to_string_pretty(&sorted)?);
            } else {
                for name in registry.key_set() {
                    if let Some(value) = map.get(&name) {
                        println!("{}: {}", name, value);
                    }
                }
            }
            Ok(true)
        }
    }
}

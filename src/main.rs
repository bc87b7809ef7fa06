use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process;

use tracing_subscriber::EnvFilter;

use docref::config;
use docref::model::Project;
use docref::validators;

/// Cross-reference validation for generated API documentation models.
#[derive(Parser)]
#[command(
    name = "docref",
    about = "Cross-reference validation for API documentation models"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate cross-references in a reflection model
    Validate {
        /// Path to the serialized reflection model
        model: PathBuf,
        /// Configuration file (default: docref.config.json next to the model)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Treat reported errors as fatal
        #[arg(short, long)]
        strict: bool,
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// Show reflection counts for a model
    Stats {
        /// Path to the serialized reflection model
        model: PathBuf,
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> docref::errors::Result<()> {
    match cli.command {
        Commands::Validate {
            model,
            config: config_path,
            strict,
            json,
        } => {
            let cfg = match config_path {
                Some(path) => config::read_config(&path)?,
                None => config::load_config(model.parent().unwrap_or(Path::new(".")))?,
            };

            let project = Project::from_file(&model)?;
            let errors = validators::collect(&project, &cfg)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&errors)?);
            } else if errors.is_empty() {
                println!("No documentation errors found.");
            } else {
                for error in &errors {
                    println!("{}", error);
                }
                println!("\nFound {} documentation error(s).", errors.len());
            }

            if (strict || cfg.strict) && !errors.is_empty() {
                process::exit(1);
            }
        }
        Commands::Stats { model, json } => {
            let project = Project::from_file(&model)?;

            let mut counts: HashMap<&'static str, u64> = HashMap::new();
            for reflection in project.reflections() {
                *counts.entry(reflection.kind.as_str()).or_insert(0) += 1;
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&counts)?);
            } else {
                println!("Reflection model");
                println!("  Reflections: {}", project.len());
                if !counts.is_empty() {
                    println!("\n  By kind:");
                    let mut sorted: Vec<_> = counts.iter().collect();
                    sorted.sort_by_key(|(kind, _)| **kind);
                    for (kind, count) in &sorted {
                        println!("    {}: {}", kind, count);
                    }
                }
            }
        }
    }
    Ok(())
}

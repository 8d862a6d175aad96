//! Entlog binary: thin CLI shell over the [`entlog_core`] library crate.

use clap::Parser;
use std::path::PathBuf;

use entlog_core::generate;

/// Derive a TypeORM log entity (and its type augmentation) from an entity file.
#[derive(Parser)]
#[command(name = "entlog", version, about)]
struct Cli {
    /// Path to the entity source file (e.g. user.entity.ts)
    file: PathBuf,

    /// Output the generation summary as JSON instead of human-readable text
    #[arg(long)]
    json: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("entlog_core=warn".parse().unwrap()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match generate(&cli.file) {
        Ok(summary) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&summary).unwrap());
            } else {
                println!("Log entity generated: {}", summary.log_entity_path.display());
                println!(
                    "Extension declaration generated: {}",
                    summary.declaration_path.display()
                );
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

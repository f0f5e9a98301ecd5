//! typebridge CLI - TypeScript generation from annotated Rust schemas
//!
//! Commands:
//! - `typebridge generate` - Project discovered schemas into a TypeScript file
//! - `typebridge list` - List discovered schema symbols

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod generate;
mod list;

#[derive(Parser)]
#[command(name = "typebridge")]
#[command(author, version, about = "TypeScript generation for annotated Rust schemas", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate TypeScript declarations and client stubs
    Generate {
        /// Source tree to scan for annotated schemas
        #[arg(short, long)]
        root: PathBuf,

        /// Base namespace the source tree maps under
        #[arg(short, long)]
        namespace: String,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List discovered schema symbols in traversal order
    List {
        /// Source tree to scan for annotated schemas
        #[arg(short, long)]
        root: PathBuf,

        /// Base namespace the source tree maps under
        #[arg(short, long)]
        namespace: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            root,
            namespace,
            output,
        } => {
            generate::run(&root, &namespace, output)?;
        }
        Commands::List { root, namespace } => {
            list::run(&root, &namespace)?;
        }
    }

    Ok(())
}

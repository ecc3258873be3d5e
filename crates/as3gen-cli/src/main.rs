//! as3gen CLI - ActionScript 3 code generator
//!
//! Commands:
//! - `as3gen generate` - Generate `.as` sources for a schema
//! - `as3gen check` - Validate a schema and list the files it would produce

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod check;
mod generate;
mod logging;

#[derive(Parser)]
#[command(name = "as3gen")]
#[command(author, version, about = "ActionScript 3 code generator for protocol buffer schemas", long_about = None)]
struct Cli {
    /// Log level filter (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate ActionScript 3 sources for a schema
    Generate {
        /// Schema description (.toml or .json)
        #[arg(short, long)]
        schema: PathBuf,

        /// Output root directory
        #[arg(short, long)]
        output: PathBuf,

        /// Generator options (e.g., output_list_file=files.txt)
        #[arg(short, long, default_value = "")]
        parameter: String,
    },

    /// Validate a schema and print the files it would produce
    Check {
        /// Schema description (.toml or .json)
        #[arg(short, long)]
        schema: PathBuf,

        /// Generator options (e.g., output_list_file=files.txt)
        #[arg(short, long, default_value = "")]
        parameter: String,

        /// Print the planned files as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level)?;

    match cli.command {
        Commands::Generate {
            schema,
            output,
            parameter,
        } => {
            generate::run(&schema, &output, &parameter)?;
        }
        Commands::Check {
            schema,
            parameter,
            json,
        } => {
            check::run(&schema, &parameter, json)?;
        }
    }

    Ok(())
}

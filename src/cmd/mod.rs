mod generate;
mod order;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate as generate_completions, Shell};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "synthgen")]
#[command(version)]
#[command(about = "Generate synthetic JSON Lines records from declarative templates", long_about = None)]
pub struct Cli {
    /// Log progress of each template to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate records for every template
    Generate {
        /// Template directory, file or glob pattern (e.g., templates/, "templates/*.json")
        templates: String,

        /// Output directory for <template>.jsonl files
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Random seed for reproducible output
        #[arg(short, long)]
        seed: Option<u64>,

        /// Records per template when the file name gives no count
        #[arg(short, long)]
        iterations: Option<u64>,

        /// YAML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Fail when a template's dependencies cannot run first
        #[arg(long)]
        strict: bool,

        /// Generate without writing files (dry run)
        #[arg(long)]
        dry_run: bool,

        /// Show progress during generation
        #[arg(short, long)]
        progress: bool,

        /// Output run summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the order templates would run in
    Order {
        /// Template directory, file or glob pattern
        templates: String,

        /// YAML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            templates,
            output,
            seed,
            iterations,
            config,
            strict,
            dry_run,
            progress,
            json,
        } => generate::run(
            templates, output, seed, iterations, config, strict, dry_run, progress, json,
        ),
        Commands::Order {
            templates,
            config,
            json,
        } => order::run(templates, config, json),
        Commands::Completions { shell } => {
            generate_completions(shell, &mut Cli::command(), "synthgen", &mut io::stdout());
            Ok(())
        }
    }
}

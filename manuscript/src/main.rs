use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use manuscript::config::ManuscriptConfig;

mod commands;

#[derive(Parser)]
#[command(name = "manuscript")]
#[command(about = "Reformat and spell-check a long-form Markdown document")]
#[command(version)]
struct Cli {
    /// Path to config file (default: ./manuscript.toml, then ~/.config/manuscript/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Drop everything before the marker line, re-flow, and replace the document
    #[command(group(ArgGroup::new("mode").args(["check", "stdout"])))]
    Format {
        /// Document to format
        #[arg(long)]
        document: Option<PathBuf>,

        /// First line to keep
        #[arg(long)]
        marker: Option<String>,

        /// Exit 1 if formatting would change the document; write nothing
        #[arg(long)]
        check: bool,

        /// Print the formatted document instead of writing it
        #[arg(long)]
        stdout: bool,

        /// Wrap width
        #[arg(long)]
        columns: Option<u32>,

        /// Output markup dialect (e.g. gfm, markdown)
        #[arg(long)]
        target: Option<String>,

        /// Do not generate a table of contents
        #[arg(long)]
        no_toc: bool,

        /// Table of contents depth (1-6)
        #[arg(long)]
        toc_depth: Option<u8>,

        /// Remove the backup after a successful run
        #[arg(long)]
        no_backup: bool,
    },

    /// Spell-check the document against the custom word list
    Spell {
        /// Document to check
        #[arg(long)]
        document: Option<PathBuf>,

        /// Custom word list, one word per line
        #[arg(long)]
        word_list: Option<PathBuf>,

        /// Print misspellings instead of starting an interactive session
        #[arg(long)]
        list: bool,

        /// With --list, print the report as JSON
        #[arg(long, requires = "list")]
        json: bool,
    },

    /// Check that the external tools are installed
    Doctor,

    /// Print the effective configuration
    Config,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<u8> {
    let cli = Cli::parse();
    manuscript::logging::init(cli.verbose);

    let cwd = std::env::current_dir()?;
    let (mut config, source) = ManuscriptConfig::load(cli.config.as_deref(), &cwd)?;
    if let Some(ref path) = source {
        tracing::debug!(config = %path.display(), "loaded config");
    }

    match cli.command {
        Commands::Format {
            document,
            marker,
            check,
            stdout,
            columns,
            target,
            no_toc,
            toc_depth,
            no_backup,
        } => {
            let overrides = commands::format::Overrides {
                document,
                marker,
                columns,
                target,
                no_toc,
                toc_depth,
                no_backup,
            };
            overrides.apply(&mut config);
            commands::format::run(&config, check, stdout)
        }

        Commands::Spell {
            document,
            word_list,
            list,
            json,
        } => {
            if let Some(document) = document {
                config.document = document;
            }
            if let Some(word_list) = word_list {
                config.word_list = word_list;
            }
            commands::spell::run(&config, list, json)
        }

        Commands::Doctor => commands::doctor::run(&config),

        Commands::Config => commands::config::run(&config, source.as_deref()),
    }
}

#![forbid(unsafe_code)]
//! cmdgen Command Line Interface

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

use cmdgen::commands::{
    execute_check, execute_code, execute_docs, CheckOptions, CodeOptions, DocsOptions,
};
use cmdgen::config::{Config, DEFAULT_CONFIG_FILE};

#[derive(Parser)]
#[command(name = "cmdgen")]
#[command(about = "Generate clap command trees and reference docs from a command specification")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the command tree source unit
    Code {
        /// Specification files, merged in order
        #[arg(short, long = "input", required = true)]
        inputs: Vec<PathBuf>,

        /// Unit name written into the generated header
        #[arg(long)]
        module: Option<String>,

        /// Context type passed to constructors and run
        #[arg(long = "context")]
        context_type: Option<String>,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip rustfmt
        #[arg(long)]
        no_format: bool,

        /// Fail with a diff instead of writing when the output is stale
        #[arg(long)]
        check: bool,
    },

    /// Generate one reference document per top-level command
    Docs {
        /// Specification files, merged in order
        #[arg(short, long = "input", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Lint a specification
    Check {
        /// Specification files, merged in order
        #[arg(short, long = "input", required = true)]
        inputs: Vec<PathBuf>,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("cmdgen=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = if cli.config.exists() {
        Config::load(&cli.config)?
    } else {
        Config::default()
    };

    let result = match cli.command {
        Commands::Code {
            inputs,
            module,
            context_type,
            output,
            no_format,
            check,
        } => {
            let options = CodeOptions {
                inputs,
                module: module.unwrap_or(config.code.module),
                context_type: context_type.unwrap_or(config.code.context_type),
                output: output.or(config.code.output),
                format: config.code.format && !no_format,
                check,
            };
            execute_code(options)
        }

        Commands::Docs { inputs, output } => {
            let mut docs = config.docs;
            if let Some(output) = output {
                docs.output_dir = output;
            }
            execute_docs(DocsOptions {
                inputs,
                config: docs,
            })
        }

        Commands::Check { inputs } => execute_check(CheckOptions { inputs }),
    };

    if let Err(err) = result {
        eprintln!("{} {:#}", style("✗").red(), err);
        std::process::exit(1);
    }
    Ok(())
}

#![forbid(unsafe_code)]

//! @acp:module "cmdgen Library"
//! @acp:summary "Command-specification compiler: YAML command trees to clap code and reference docs"
//! @acp:domain cli
//! @acp:layer api
//! @acp:stability stable
//!
//! # cmdgen
//!
//! Turns a declarative description of a command tree into a generated clap
//! command tree and markdown reference documentation.
//!
//! ## Features
//!
//! - **Tree inference**: parents are derived from whitespace-separated names
//! - **Option sets**: reusable flag bundles, optionally owned by another module
//! - **Self-contained output**: support types are spliced into the generated unit
//! - **Deterministic**: the same input always produces byte-identical output
//!
//! ## Example
//!
//! ```rust,no_run
//! use cmdgen::{generate_code, generate_docs, parse_commands, DocsConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let commands = parse_commands(&std::fs::read("commands.yaml")?)?;
//!
//!     let unit = generate_code("commands", "&CommandContext", &commands)?;
//!     std::fs::write("src/commands.gen.rs", unit)?;
//!
//!     for (key, doc) in generate_docs(&commands, &DocsConfig::default())? {
//!         std::fs::write(format!("docs/{}.mdx", key), doc)?;
//!     }
//!     Ok(())
//! }
//! ```

pub mod codegen;
pub mod commands;
pub mod config;
pub mod deprecation;
pub mod docs;
pub mod error;
pub mod spec;
pub mod support;
pub mod tree;

// Re-exports
pub use codegen::{generate_code, generate_code_with, generate_source, ImportTable, Rustfmt, SourceFormatter, Verbatim};
pub use config::{CodeConfig, Config, DocsConfig};
pub use deprecation::deprecation_box;
pub use docs::generate_docs;
pub use error::{CmdgenError, Result};
pub use spec::{lint, parse_commands, parse_documents, parse_files, Command, CommandOption, Commands, LintFinding, OptionSet, OptionType};
pub use support::{parse_duration, Duration, InvalidDuration};
pub use tree::CommandTree;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! @acp:module "Docs Command"
//! @acp:summary "Write one reference document per top-level command"
//! @acp:domain cli
//! @acp:layer handler

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;

use super::read_specification;
use crate::config::DocsConfig;
use crate::docs::generate_docs;

/// Options for the docs command
#[derive(Debug, Clone)]
pub struct DocsOptions {
    /// Specification files, merged in order
    pub inputs: Vec<PathBuf>,
    /// Output directory and document settings
    pub config: DocsConfig,
}

/// Execute the docs command
pub fn execute_docs(options: DocsOptions) -> Result<()> {
    println!("{} Generating reference docs...", style("→").cyan());

    let commands = read_specification(&options.inputs)?;
    let documents =
        generate_docs(&commands, &options.config).context("Failed to generate docs")?;

    let dir = &options.config.output_dir;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    for (key, contents) in &documents {
        let path = dir.join(format!("{}.{}", key, options.config.extension));
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("  {} {}", style("•").dim(), path.display());
    }

    println!(
        "{} Wrote {} documents to {}",
        style("✓").green(),
        documents.len(),
        dir.display()
    );
    Ok(())
}

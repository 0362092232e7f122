//! @acp:module "Code Command"
//! @acp:summary "Generate the clap command tree source unit"
//! @acp:domain cli
//! @acp:layer handler

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use console::style;
use similar::TextDiff;
use tracing::debug;

use super::read_specification;
use crate::codegen::{generate_code_with, Rustfmt, SourceFormatter, Verbatim};

/// Options for the code command
#[derive(Debug, Clone)]
pub struct CodeOptions {
    /// Specification files, merged in order
    pub inputs: Vec<PathBuf>,
    /// Unit name written into the header
    pub module: String,
    /// Context type threaded through constructors and `run`
    pub context_type: String,
    /// Output file; stdout when absent
    pub output: Option<PathBuf>,
    /// Run rustfmt
    pub format: bool,
    /// Compare with the existing output instead of writing
    pub check: bool,
}

/// Execute the code command
pub fn execute_code(options: CodeOptions) -> Result<()> {
    let commands = read_specification(&options.inputs)?;

    let formatter: Box<dyn SourceFormatter> = if options.format {
        Box::new(Rustfmt::default())
    } else {
        debug!("Formatting disabled, emitting unit verbatim");
        Box::new(Verbatim)
    };
    let generated = generate_code_with(
        &options.module,
        &options.context_type,
        &commands,
        formatter.as_ref(),
    )
    .context("Failed to generate code")?;

    if options.check {
        let Some(output) = &options.output else {
            bail!("--check needs an output file to compare against");
        };
        let existing = std::fs::read_to_string(output).unwrap_or_default();
        let fresh = String::from_utf8_lossy(&generated);
        if existing == fresh {
            println!("{} {} is up to date", style("✓").green(), output.display());
            return Ok(());
        }

        let old_name = output.display().to_string();
        let diff = TextDiff::from_lines(existing.as_str(), &*fresh);
        print!(
            "{}",
            diff.unified_diff()
                .context_radius(3)
                .header(&old_name, "generated")
        );
        eprintln!(
            "{} {} is stale, rerun cmdgen code",
            style("✗").red(),
            output.display()
        );
        std::process::exit(1);
    }

    match &options.output {
        Some(output) => {
            if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            std::fs::write(output, &generated)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!(
                "{} Generated {} ({} bytes)",
                style("✓").green(),
                output.display(),
                generated.len()
            );
        }
        None => {
            std::io::stdout().write_all(&generated)?;
        }
    }

    Ok(())
}

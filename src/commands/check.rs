//! @acp:module "Check Command"
//! @acp:summary "Lint a specification and verify it generates"
//! @acp:domain cli
//! @acp:layer handler

use std::path::PathBuf;

use anyhow::Result;
use console::style;

use super::read_specification;
use crate::codegen::generate_source;
use crate::spec::lint;

/// Options for the check command
#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// Specification files, merged in order
    pub inputs: Vec<PathBuf>,
}

/// Execute the check command
pub fn execute_check(options: CheckOptions) -> Result<()> {
    let commands = read_specification(&options.inputs)?;

    let findings = lint(&commands);
    for finding in &findings {
        println!(
            "  {} {}: {}",
            style("⚠").yellow(),
            style(&finding.context).bold(),
            finding.message
        );
    }

    // Semantic errors only surface while generating
    let generation = generate_source("check", "&()", &commands);
    if let Err(err) = &generation {
        eprintln!("{} {}", style("✗").red(), err);
    }

    if findings.is_empty() && generation.is_ok() {
        println!(
            "{} {} commands, {} option sets, no findings",
            style("✓").green(),
            commands.command_list.len(),
            commands.option_sets.len()
        );
        return Ok(());
    }

    eprintln!(
        "{} {} lint findings{}",
        style("✗").red(),
        findings.len(),
        if generation.is_err() { ", generation failed" } else { "" }
    );
    std::process::exit(1);
}

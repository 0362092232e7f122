//! @acp:module "Commands"
//! @acp:summary "CLI command implementations"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Each command is in its own submodule and reads its inputs through
//! [`read_specification`].

pub mod check;
pub mod code;
pub mod docs;

pub use check::{execute_check, CheckOptions};
pub use code::{execute_code, CodeOptions};
pub use docs::{execute_docs, DocsOptions};

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing::info;

use crate::spec::{parse_files, Commands};

/// Parse and merge every input specification
pub fn read_specification(inputs: &[PathBuf]) -> Result<Commands> {
    if inputs.is_empty() {
        bail!("no input specification given");
    }
    let commands = parse_files(inputs).with_context(|| {
        let names: Vec<String> = inputs.iter().map(|p| p.display().to_string()).collect();
        format!("Failed to read specification from {}", names.join(", "))
    })?;
    info!(
        inputs = inputs.len(),
        commands = commands.command_list.len(),
        option_sets = commands.option_sets.len(),
        "Loaded specification"
    );
    Ok(commands)
}

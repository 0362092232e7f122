//! @acp:module "Specification Parser"
//! @acp:summary "Decode YAML specification documents into the command model"
//! @acp:domain cli
//! @acp:layer parse
//!
//! Structural decode only: fields are populated, name paths and text
//! variants are derived. Semantic checks live in the generators and in
//! [`crate::spec::lint`].

use std::path::Path;

use tracing::debug;

use super::markdown;
use super::model::{Command, CommandOption, Commands, OptionSet};
use crate::deprecation::deprecation_box;
use crate::error::{CmdgenError, Result};

/// @acp:summary "Parse one specification document"
pub fn parse_commands(input: &[u8]) -> Result<Commands> {
    let text = std::str::from_utf8(input)
        .map_err(|e| CmdgenError::InputDecode(format!("input is not UTF-8: {}", e)))?;
    let text = text.replace("\r\n", "\n");

    let mut commands: Commands = if text.trim().is_empty() {
        Commands::default()
    } else {
        serde_yaml::from_str(&text).map_err(|e| CmdgenError::InputDecode(e.to_string()))?
    };

    for set in &mut commands.option_sets {
        process_option_set(set);
    }
    for command in &mut commands.command_list {
        process_command(command);
    }

    debug!(
        commands = commands.command_list.len(),
        option_sets = commands.option_sets.len(),
        "Parsed command specification"
    );
    Ok(commands)
}

/// Parse several documents and merge them in order
pub fn parse_documents<I, B>(inputs: I) -> Result<Commands>
where
    I: IntoIterator<Item = B>,
    B: AsRef<[u8]>,
{
    let mut merged = Commands::default();
    for input in inputs {
        merged.merge(parse_commands(input.as_ref())?);
    }
    Ok(merged)
}

/// Read and merge specification files
pub fn parse_files<P: AsRef<Path>>(paths: &[P]) -> Result<Commands> {
    let mut merged = Commands::default();
    for path in paths {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let parsed = parse_commands(&bytes).map_err(|e| match e {
            CmdgenError::InputDecode(message) => {
                CmdgenError::InputDecode(format!("{}: {}", path.display(), message))
            }
            other => other,
        })?;
        merged.merge(parsed);
    }
    Ok(merged)
}

fn process_option_set(set: &mut OptionSet) {
    for option in &mut set.options {
        process_option(option);
    }
}

fn process_command(command: &mut Command) {
    command.name_path = command
        .full_name
        .split_whitespace()
        .map(str::to_string)
        .collect();

    command.description = command.description.trim_end_matches('\n').to_string();
    if let Some(message) = &command.deprecated {
        command.description = format!("{}{}", deprecation_box(message), command.description);
    }

    command.summary_plain = markdown::plain(&command.summary);
    command.summary_highlighted = markdown::highlighted(&command.summary_plain);
    command.description_plain = markdown::plain(&command.description);
    command.description_highlighted = markdown::highlighted(&command.description_plain);

    for option in &mut command.options {
        process_option(option);
    }
}

fn process_option(option: &mut CommandOption) {
    option.description = option
        .description
        .replace('\n', " ")
        .trim_end()
        .to_string();
}

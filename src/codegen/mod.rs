//! @acp:module "Code Generator"
//! @acp:summary "Emit a self-contained clap command tree from a parsed specification"
//! @acp:domain cli
//! @acp:layer codegen
//!
//! The unit is written into one buffer: option-set records, command records,
//! then the spliced support fragments. Every path the body refers to goes
//! through a single [`ImportTable`], rendered as a sorted `use` block at the
//! top, so regenerating from the same input is byte-identical.

macro_rules! w {
    ($($tt:tt)*) => {
        drop(write!($($tt)*))
    };
}

pub mod command;
pub mod format;
pub mod imports;
pub mod naming;
pub mod option;
pub mod splice;

use std::collections::HashSet;
use std::fmt::Write;

use tracing::{debug, info};

pub use format::{format_unit, Rustfmt, SourceFormatter, Verbatim};
pub use imports::ImportTable;

use crate::error::{CmdgenError, Result};
use crate::spec::Commands;
use crate::support::FRAGMENTS;
use crate::tree::CommandTree;

/// @acp:summary "Generate and rustfmt the unit named `unit`"
pub fn generate_code(unit: &str, context_type: &str, commands: &Commands) -> Result<Vec<u8>> {
    generate_code_with(unit, context_type, commands, &Rustfmt::default())
}

/// Generate the unit and pass it through `formatter`
pub fn generate_code_with(
    unit: &str,
    context_type: &str,
    commands: &Commands,
    formatter: &dyn SourceFormatter,
) -> Result<Vec<u8>> {
    let source = generate_source(unit, context_type, commands)?;
    let formatted = format_unit(formatter, source)?;
    Ok(formatted.into_bytes())
}

/// Unformatted unit text
pub fn generate_source(unit: &str, context_type: &str, commands: &Commands) -> Result<String> {
    let tree = CommandTree::new(commands)?;
    let mut imports = ImportTable::new();
    let mut body = String::new();

    let mut type_names = HashSet::new();
    for set in commands.option_sets.iter().filter(|set| !set.is_external()) {
        let set_type = naming::option_set_type(&set.name).map_err(|e| e.in_option_set(&set.name))?;
        if !type_names.insert(set_type) {
            return Err(CmdgenError::InvalidOption {
                option: set.name.clone(),
                reason: "option set type name is already in use".to_string(),
            }
            .in_option_set(&set.name));
        }
        option::write_option_set(&mut body, set, &mut imports)
            .map_err(|e| e.in_option_set(&set.name))?;
    }

    for cmd in tree.commands() {
        let cmd_type = naming::command_type(&cmd.full_name).map_err(|e| e.in_command(&cmd.full_name))?;
        if !type_names.insert(cmd_type) {
            return Err(CmdgenError::DuplicateCommand(cmd.full_name.clone()));
        }
        command::write_command(&mut body, &tree, cmd, context_type, &mut imports)
            .map_err(|e| e.in_command(&cmd.full_name))?;
    }

    for (name, source) in FRAGMENTS {
        let fragment = splice::split_fragment(source);
        for used in &fragment.uses {
            match &used.alias {
                Some(alias) => imports.import_as(&used.path, alias)?,
                None => imports.import(&used.path)?,
            };
        }
        debug!(fragment = name, bytes = fragment.body.len(), "Spliced support fragment");
        w!(body, "// {}\n\n{}\n", name, fragment.body.trim_end());
    }

    let mut unit_text = String::with_capacity(body.len() + 1024);
    w!(unit_text, "// Code generated by cmdgen. DO NOT EDIT.\n");
    w!(unit_text, "// Unit: {}\n\n", unit);
    w!(unit_text, "#![allow(dead_code, clippy::all)]\n\n");
    unit_text.push_str(&imports.render());
    unit_text.push('\n');
    unit_text.push_str(&body);

    info!(
        unit,
        commands = commands.command_list.len(),
        imports = imports.len(),
        bytes = unit_text.len(),
        "Generated command unit"
    );
    Ok(unit_text)
}

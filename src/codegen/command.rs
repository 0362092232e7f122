//! @acp:module "Command Emitter"
//! @acp:summary "Record type, constructor and dispatch of one generated command"
//! @acp:domain cli
//! @acp:layer codegen
//!
//! Hand-written code plugs in through three seams: `run(&self, cctx, args)`
//! on every runnable command, `init_command(&mut self, cctx)` when
//! `has-init` is set, and the context type's `fail(err)`.

use std::collections::HashSet;
use std::fmt::Write;

use super::imports::ImportTable;
use super::naming;
use super::option::{flag_code, FlagCode, Propagation};
use crate::deprecation::DEFAULT_DEPRECATION_MESSAGE;
use crate::error::{CmdgenError, Result};
use crate::spec::Command;
use crate::support::Arity;
use crate::tree::{arity, CommandTree};

struct SetField {
    field: String,
    ty: String,
}

/// Literal of `plain`, or a `highlight` switch when the variants differ
fn text_choice(plain: &str, highlighted: &str) -> String {
    if plain == highlighted {
        format!("{:?}", plain)
    } else {
        format!("if highlight {{ {:?} }} else {{ {:?} }}", highlighted, plain)
    }
}

/// @acp:summary "Emit the record and impl block of `command`"
pub fn write_command(
    buf: &mut String,
    tree: &CommandTree<'_>,
    command: &Command,
    context_type: &str,
    imports: &mut ImportTable,
) -> Result<()> {
    let clap_command = imports.import("clap::Command")?;
    let matches_type = imports.import("clap::ArgMatches")?;

    let ty = naming::command_type(&command.full_name)?;
    let parent = tree.parent(command);
    let subcommands = tree.subcommands(command);
    let sub_types = subcommands
        .iter()
        .map(|sub| naming::command_type(&sub.full_name))
        .collect::<Result<Vec<_>>>()?;
    let has_subcommands = !subcommands.is_empty();
    let runnable = !has_subcommands || command.subcommands_optional;
    let propagation = if has_subcommands {
        Propagation::Global
    } else {
        Propagation::Local
    };

    let mut seen: HashSet<String> = naming::RESERVED_FIELDS
        .iter()
        .map(|field| field.to_string())
        .collect();

    let mut set_fields = Vec::new();
    for set in tree.option_sets(command)? {
        let field = naming::option_set_field(&set.name)?;
        let set_type = naming::option_set_type(&set.name)?;
        let ty = match set.external_package.as_deref().filter(|p| !p.is_empty()) {
            Some(package) => format!("{}::{}", imports.import(package)?, set_type),
            None => set_type,
        };
        if !seen.insert(field.clone()) {
            return Err(CmdgenError::InvalidOption {
                option: set.name.clone(),
                reason: format!("option set field {} is already in use", field),
            });
        }
        set_fields.push(SetField { field, ty });
    }

    let mut flags: Vec<FlagCode> = Vec::with_capacity(command.options.len());
    for option in &command.options {
        let code = flag_code(option, "s", propagation, imports)?;
        if !seen.insert(code.field.clone()) {
            return Err(CmdgenError::InvalidOption {
                option: option.name.clone(),
                reason: format!("field {} is already in use", code.field),
            });
        }
        flags.push(code);
    }

    let rc = if parent.is_some() || has_subcommands {
        Some(imports.import("std::rc::Rc")?)
    } else {
        None
    };

    // Record
    for line in command.summary_plain.lines() {
        w!(buf, "/// {}\n", line);
    }
    w!(buf, "#[derive(Debug, Default)]\n");
    w!(buf, "pub struct {ty} {{\n");
    if let (Some(parent), Some(rc)) = (parent, &rc) {
        let parent_type = naming::command_type(&parent.full_name)?;
        w!(buf, "    pub parent: Option<{rc}<{parent_type}>>,\n");
    }
    w!(buf, "    pub command: {clap_command},\n");
    for set in &set_fields {
        w!(buf, "    pub {}: {},\n", set.field, set.ty);
    }
    for flag in &flags {
        w!(buf, "    pub {}: {},\n", flag.field, flag.field_type);
    }
    w!(buf, "}}\n\n");

    w!(buf, "impl {ty} {{\n");
    if command.ignore_missing_env {
        w!(buf, "    pub const IGNORES_MISSING_ENV: bool = true;\n");
    }
    if let Some(message) = &command.deprecated {
        let message = if message.is_empty() {
            DEFAULT_DEPRECATION_MESSAGE
        } else {
            message
        };
        w!(buf, "    pub const DEPRECATED: &'static str = {:?};\n", message);
    }
    if command.ignore_missing_env || command.deprecated.is_some() {
        w!(buf, "\n");
    }

    // Constructor
    w!(buf, "    #[allow(unused_variables)]\n");
    w!(buf, "    pub fn new(cctx: {context_type}, highlight: bool) -> Self {{\n");
    w!(buf, "        let mut s = Self::default();\n");
    w!(
        buf,
        "        s.command = {clap_command}::new({:?})\n            .about({})\n            .long_about({})",
        command.leaf_name(),
        text_choice(&command.summary_plain, &command.summary_highlighted),
        text_choice(&command.description_plain, &command.description_highlighted),
    );
    if !has_subcommands {
        w!(
            buf,
            "\n            .override_usage({:?})",
            format!("{} [flags]", command.full_name)
        );
    }
    if command.deprecated.is_some() {
        w!(buf, "\n            .hide(true)");
    }
    w!(buf, ";\n");

    match arity(command) {
        Arity::None => {}
        Arity::Exact(n) => w!(buf, "        s.command = with_arity(s.command, Arity::Exact({n}));\n"),
        Arity::Max(n) => w!(buf, "        s.command = with_arity(s.command, Arity::Max({n}));\n"),
    }
    if has_subcommands && !command.subcommands_optional {
        w!(buf, "        s.command = s.command.subcommand_required(true);\n");
    }
    for sub_type in &sub_types {
        w!(
            buf,
            "        s.command = s.command.subcommand({sub_type}::new(cctx, highlight).command);\n"
        );
    }
    for flag in &flags {
        for preset in &flag.presets {
            w!(buf, "        {}\n", preset);
        }
        w!(buf, "        s.command = s.command.arg({});\n", flag.arg);
    }
    for set in &set_fields {
        w!(
            buf,
            "        s.command = s.{}.build_flags(s.command, {});\n",
            set.field,
            has_subcommands
        );
    }
    let aliases = tree.alias_table(command)?;
    if !aliases.is_empty() {
        let pairs = aliases
            .iter()
            .map(|(alias, name)| format!("({:?}, {:?})", alias, name))
            .collect::<Vec<_>>()
            .join(", ");
        w!(buf, "        s.command = normalize_aliases(s.command, &[{pairs}]);\n");
    }
    if command.has_init {
        w!(buf, "        s.init_command(cctx);\n");
    }
    w!(buf, "        s\n");
    w!(buf, "    }}\n\n");

    // Matches
    w!(buf, "    #[allow(unused_variables)]\n");
    w!(
        buf,
        "    pub fn apply_matches(&mut self, m: &{matches_type}) -> Result<(), clap::Error> {{\n"
    );
    for set in &set_fields {
        w!(buf, "        self.{}.apply_matches(m)?;\n", set.field);
    }
    for flag in &flags {
        for line in &flag.apply {
            w!(buf, "        {}\n", line);
        }
    }
    w!(buf, "        Ok(())\n");
    w!(buf, "    }}\n\n");

    // Dispatch
    w!(buf, "    #[allow(unused_variables)]\n");
    w!(
        buf,
        "    pub fn dispatch(mut self, cctx: {context_type}, matches: &{matches_type}, highlight: bool) {{\n"
    );
    w!(buf, "        if let Err(err) = self.apply_matches(matches) {{\n");
    w!(buf, "            cctx.fail(err);\n");
    w!(buf, "            return;\n");
    w!(buf, "        }}\n");
    if command.deprecated.is_some() {
        w!(
            buf,
            "        eprintln!(\"Command {{:?}} is deprecated, {{}}\", {:?}, Self::DEPRECATED);\n",
            command.full_name
        );
    }
    let run = "if let Err(err) = s.run(cctx, positional_args(matches)) {\n            cctx.fail(err);\n        }";
    match &rc {
        Some(rc) if has_subcommands => {
            w!(buf, "        let s = {rc}::new(self);\n");
            w!(buf, "        match matches.subcommand() {{\n");
            for (sub, sub_type) in subcommands.iter().zip(&sub_types) {
                w!(buf, "            Some(({:?}, sub)) => {{\n", sub.leaf_name());
                w!(buf, "                let mut child = {sub_type}::new(cctx, highlight);\n");
                w!(buf, "                child.parent = Some({rc}::clone(&s));\n");
                w!(buf, "                child.dispatch(cctx, sub, highlight);\n");
                w!(buf, "            }}\n");
            }
            if runnable {
                w!(buf, "            _ => {{\n            {run}\n            }}\n");
            } else {
                w!(buf, "            _ => {{}}\n");
            }
            w!(buf, "        }}\n");
        }
        _ => {
            w!(buf, "        let s = self;\n");
            w!(buf, "        {run}\n");
        }
    }
    w!(buf, "    }}\n");

    if parent.is_none() {
        let os_string = imports.import("std::ffi::OsString")?;
        w!(buf, "\n");
        w!(
            buf,
            "    pub fn execute<I, T>(cctx: {context_type}, args: I, highlight: bool) -> Result<(), clap::Error>\n"
        );
        w!(buf, "    where\n");
        w!(buf, "        I: IntoIterator<Item = T>,\n");
        w!(buf, "        T: Into<{os_string}> + Clone,\n");
        w!(buf, "    {{\n");
        w!(buf, "        let s = Self::new(cctx, highlight);\n");
        w!(buf, "        let matches = s.command.clone().try_get_matches_from(args)?;\n");
        w!(buf, "        s.dispatch(cctx, &matches, highlight);\n");
        w!(buf, "        Ok(())\n");
        w!(buf, "    }}\n");
    }

    w!(buf, "}}\n\n");
    Ok(())
}

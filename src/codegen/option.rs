//! @acp:module "Flag Emitter"
//! @acp:summary "Type-to-builder mapping for a single option and option-set records"
//! @acp:domain cli
//! @acp:layer codegen

use std::collections::HashSet;
use std::fmt::Write;

use super::imports::ImportTable;
use super::naming;
use crate::error::{CmdgenError, Result};
use crate::spec::{CommandOption, OptionSet, OptionType};
use crate::support::parse_duration;

/// How the generated arg is propagated to subcommands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// Command without subcommands
    Local,
    /// Command with subcommands
    Global,
    /// Option set; decided by the `global` parameter of `build_flags`
    Parameter,
}

/// Generated pieces for one option
#[derive(Debug, Clone)]
pub struct FlagCode {
    pub field: String,
    pub field_type: &'static str,
    /// Statements run before the arg is registered
    pub presets: Vec<String>,
    /// `Arg` builder expression
    pub arg: String,
    /// Statements in `apply_matches`, reading from `m`
    pub apply: Vec<String>,
}

/// Help text: description, accepted values, required, aliases, experimental
pub fn help_text(option: &CommandOption) -> String {
    let mut help = option.description.clone();
    if option.is_enum() && !option.enum_values.is_empty() {
        help.push_str(&format!(" Accepted values: {}.", option.enum_values.join(", ")));
    }
    if option.required {
        help.push_str(" Required.");
    }
    for alias in &option.aliases {
        help.push_str(&format!(" Aliased as \"--{}\".", alias));
    }
    if option.experimental {
        help.push_str(" EXPERIMENTAL.");
    }
    help
}

/// @acp:summary "Build the field, presets, arg and apply code of one option"
pub fn flag_code(
    option: &CommandOption,
    receiver: &str,
    propagation: Propagation,
    imports: &mut ImportTable,
) -> Result<FlagCode> {
    let ty = option.option_type()?;
    let field = naming::option_field(&option.name)?;
    let id = format!("{:?}", option.name);
    let default = option.default_literal();

    let invalid_default = |reason: String| CmdgenError::InvalidDefault {
        option: option.name.clone(),
        reason,
    };
    let forbid_default = |ty: OptionType| match default {
        Some(_) => Err(invalid_default(format!("cannot have default for {} option", ty))),
        None => Ok(()),
    };

    let arg_type = imports.import("clap::Arg")?;
    let action = imports.import("clap::ArgAction")?;

    let mut presets = Vec::new();
    let mut apply = Vec::new();
    let mut arg = format!("{arg_type}::new({id}).long({id})");

    if let Some(short) = option.short_flag() {
        let mut chars = short.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                w!(arg, ".short({:?})", c);
            }
            _ => {
                return Err(CmdgenError::InvalidOption {
                    option: option.name.clone(),
                    reason: format!("short flag {:?} must be a single character", short),
                })
            }
        }
    }

    let field_type = match ty {
        OptionType::Bool => {
            forbid_default(ty)?;
            w!(arg, ".action({action}::SetTrue)");
            apply.push(format!("self.{field} = m.get_flag({id});"));
            "bool"
        }
        OptionType::Int => {
            let value = match default {
                Some(text) => text
                    .parse::<i64>()
                    .map_err(|e| invalid_default(format!("{:?} is not an int: {}", text, e)))?,
                None => 0,
            };
            let parser = imports.import("clap::value_parser")?;
            presets.push(format!("{receiver}.{field} = {value};"));
            w!(
                arg,
                ".action({action}::Set).value_parser({parser}!(i64)).default_value(\"{value}\")"
            );
            apply.push(format!(
                "if let Some(v) = m.get_one::<i64>({id}) {{ self.{field} = *v; }}"
            ));
            "i64"
        }
        OptionType::Float => {
            let value = match default {
                Some(text) => text
                    .parse::<f32>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| invalid_default(format!("{:?} is not a float", text)))?,
                None => 0.0,
            };
            let parser = imports.import("clap::value_parser")?;
            presets.push(format!("{receiver}.{field} = {:?};", value));
            w!(
                arg,
                ".action({action}::Set).value_parser({parser}!(f32)).default_value({:?})",
                default.unwrap_or("0")
            );
            apply.push(format!(
                "if let Some(v) = m.get_one::<f32>({id}) {{ self.{field} = *v; }}"
            ));
            "f32"
        }
        OptionType::String => {
            w!(arg, ".action({action}::Set)");
            if let Some(text) = default {
                presets.push(format!("{receiver}.{field} = {:?}.to_string();", text));
                w!(arg, ".default_value({:?})", text);
            }
            apply.push(format!(
                "if let Some(v) = m.get_one::<String>({id}) {{ self.{field} = v.clone(); }}"
            ));
            "String"
        }
        OptionType::StringArray => {
            forbid_default(ty)?;
            w!(arg, ".action({action}::Append)");
            apply.push(format!(
                "if let Some(v) = m.get_many::<String>({id}) {{ self.{field} = v.cloned().collect(); }}"
            ));
            "Vec<String>"
        }
        OptionType::Duration => {
            w!(arg, ".action({action}::Set)");
            if let Some(text) = default {
                let parsed = parse_duration(text).map_err(|e| invalid_default(e.to_string()))?;
                presets.push(format!(
                    "{receiver}.{field} = Duration::from_millis({});",
                    parsed.as_millis()
                ));
                w!(arg, ".default_value({:?})", text);
            }
            apply.push(format!("set_flag_value(&mut self.{field}, m, {id})?;"));
            "Duration"
        }
        OptionType::Timestamp => {
            forbid_default(ty)?;
            w!(arg, ".action({action}::Set)");
            apply.push(format!("set_flag_value(&mut self.{field}, m, {id})?;"));
            "Timestamp"
        }
        OptionType::StringEnum | OptionType::StringEnumArray => {
            if option.enum_values.is_empty() {
                return Err(CmdgenError::InvalidOption {
                    option: option.name.clone(),
                    reason: "missing enum values".to_string(),
                });
            }
            let allowed = option
                .enum_values
                .iter()
                .chain(&option.hidden_legacy_values)
                .map(|v| format!("{:?}", v))
                .collect::<Vec<_>>()
                .join(", ");
            let array = ty == OptionType::StringEnumArray;
            let preset = if array {
                let seed = default.map(|d| format!("{:?}", d)).unwrap_or_default();
                format!("{receiver}.{field} = StringEnumArray::new(&[{allowed}], &[{seed}]);")
            } else {
                format!(
                    "{receiver}.{field} = StringEnum::new(&[{allowed}], {:?});",
                    default.unwrap_or_default()
                )
            };
            presets.push(preset);
            w!(
                arg,
                ".action({action}::{})",
                if array { "Append" } else { "Set" }
            );
            if let Some(text) = default {
                w!(arg, ".default_value({:?})", text);
            }
            apply.push(format!("set_flag_value(&mut self.{field}, m, {id})?;"));
            if array {
                "StringEnumArray"
            } else {
                "StringEnum"
            }
        }
    };

    w!(arg, ".help({:?})", help_text(option));
    if let Some(display) = option.display_type.as_deref().filter(|d| !d.is_empty()) {
        w!(arg, ".value_name({:?})", display);
    }
    match (option.required, propagation) {
        (true, Propagation::Local) => arg.push_str(".required(true)"),
        (true, Propagation::Parameter) => arg.push_str(".required(!global)"),
        // global args cannot be required
        _ => {}
    }
    if let Some(message) = &option.deprecated {
        arg.push_str(".hide(true)");
        apply.push(format!("warn_deprecated(m, {id}, {:?});", message));
    }
    match propagation {
        Propagation::Local => {}
        Propagation::Global => arg.push_str(".global(true)"),
        Propagation::Parameter => arg.push_str(".global(global)"),
    }
    if let Some(env) = option.env_var() {
        w!(arg, ".env({:?})", env);
    }

    Ok(FlagCode {
        field,
        field_type,
        presets,
        arg,
        apply,
    })
}

/// @acp:summary "Record type, `build_flags` and `apply_matches` of an option set"
pub fn write_option_set(buf: &mut String, set: &OptionSet, imports: &mut ImportTable) -> Result<()> {
    let command = imports.import("clap::Command")?;
    let matches = imports.import("clap::ArgMatches")?;

    let mut seen: HashSet<String> = HashSet::new();
    let mut flags = Vec::with_capacity(set.options.len());
    for option in &set.options {
        let code = flag_code(option, "self", Propagation::Parameter, imports)?;
        if !seen.insert(code.field.clone()) {
            return Err(CmdgenError::InvalidOption {
                option: option.name.clone(),
                reason: format!("duplicate field {}", code.field),
            });
        }
        flags.push(code);
    }

    let ty = naming::option_set_type(&set.name)?;
    for line in set.description.lines() {
        w!(buf, "/// {}\n", line);
    }
    w!(buf, "#[derive(Debug, Clone, Default)]\n");
    w!(buf, "pub struct {ty} {{\n");
    for flag in &flags {
        w!(buf, "    pub {}: {},\n", flag.field, flag.field_type);
    }
    w!(buf, "    pub flag_set: FlagSet,\n");
    w!(buf, "}}\n\n");

    w!(buf, "impl {ty} {{\n");
    w!(buf, "    #[allow(unused_mut, unused_variables)]\n");
    w!(
        buf,
        "    pub fn build_flags(&mut self, mut cmd: {command}, global: bool) -> {command} {{\n"
    );
    for flag in &flags {
        for preset in &flag.presets {
            w!(buf, "        {}\n", preset);
        }
        w!(buf, "        cmd = cmd.arg({});\n", flag.arg);
    }
    w!(buf, "        cmd\n");
    w!(buf, "    }}\n\n");

    let names = set
        .options
        .iter()
        .map(|o| format!("{:?}", o.name))
        .collect::<Vec<_>>()
        .join(", ");
    w!(
        buf,
        "    pub fn apply_matches(&mut self, m: &{matches}) -> Result<(), clap::Error> {{\n"
    );
    w!(buf, "        self.flag_set = FlagSet::from_matches(m, &[{names}]);\n");
    for flag in &flags {
        for line in &flag.apply {
            w!(buf, "        {}\n", line);
        }
    }
    w!(buf, "        Ok(())\n");
    w!(buf, "    }}\n");
    w!(buf, "}}\n\n");
    Ok(())
}

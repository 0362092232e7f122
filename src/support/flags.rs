// Flag plumbing shared by every generated command tree.
//
// Compiled into cmdgen and spliced verbatim into each generated unit, so it
// may only refer to clap, std and the other support fragments.

use std::collections::BTreeSet;
use std::fmt;

use clap::error::ErrorKind;
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command};

/// Id of the positional argument registered by `with_arity`.
pub const POSITIONAL_ARGS: &str = "args";

/// A flag value parsed from its raw command-line text.
pub trait FlagValue: fmt::Display {
    /// Parse `raw` and store (or accumulate) it.
    fn set(&mut self, raw: &str) -> Result<(), String>;

    /// Type name shown in diagnostics.
    fn type_name(&self) -> &'static str;
}

/// Flags the user set explicitly, on the command line or through the
/// environment variable bound to them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagSet {
    explicit: BTreeSet<String>,
}

impl FlagSet {
    pub fn from_matches(m: &ArgMatches, names: &[&str]) -> Self {
        let explicit = names
            .iter()
            .filter(|name| explicitly_set(m, name))
            .map(|name| name.to_string())
            .collect();
        Self { explicit }
    }

    pub fn changed(&self, name: &str) -> bool {
        self.explicit.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.explicit.iter().map(String::as_str)
    }
}

/// Whether `id` got its value from the user rather than a default.
pub fn explicitly_set(m: &ArgMatches, id: &str) -> bool {
    matches!(
        m.value_source(id),
        Some(ValueSource::CommandLine) | Some(ValueSource::EnvVariable)
    )
}

/// Positional argument policy of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Arity {
    #[default]
    None,
    Exact(usize),
    Max(usize),
}

pub fn with_arity(cmd: Command, arity: Arity) -> Command {
    let positional = Arg::new(POSITIONAL_ARGS)
        .value_name("ARG")
        .action(ArgAction::Append);
    match arity {
        Arity::None => cmd,
        Arity::Exact(n) => cmd.arg(positional.num_args(n).required(true)),
        Arity::Max(n) => cmd.arg(positional.num_args(1..=n).required(false)),
    }
}

/// Positional arguments captured by `with_arity`, empty when none were declared.
pub fn positional_args(m: &ArgMatches) -> Vec<String> {
    match m.try_get_many::<String>(POSITIONAL_ARGS) {
        Ok(Some(values)) => values.cloned().collect(),
        _ => Vec::new(),
    }
}

/// Register `(alias, canonical)` spellings so alternate flag names resolve
/// to the canonical flag before values are matched.
pub fn normalize_aliases(cmd: Command, aliases: &[(&'static str, &'static str)]) -> Command {
    aliases
        .iter()
        .fold(cmd, |cmd, &(alias, name)| cmd.mut_arg(name, |arg| arg.alias(alias)))
}

/// Feed every explicitly given raw value of `id` into `value`.
pub fn set_flag_value<V: FlagValue>(
    value: &mut V,
    m: &ArgMatches,
    id: &str,
) -> Result<(), clap::Error> {
    if !explicitly_set(m, id) {
        return Ok(());
    }
    if let Ok(Some(raws)) = m.try_get_many::<String>(id) {
        for raw in raws {
            value.set(raw).map_err(|err| {
                clap::Error::raw(
                    ErrorKind::InvalidValue,
                    format!(
                        "invalid argument {raw:?} for \"--{id}\" flag ({}): {err}\n",
                        value.type_name()
                    ),
                )
            })?;
        }
    }
    Ok(())
}

pub fn warn_deprecated(m: &ArgMatches, id: &str, message: &str) {
    if explicitly_set(m, id) {
        eprintln!("Flag --{id} has been deprecated, {message}");
    }
}

//! @acp:module "Specification Model"
//! @acp:summary "Commands, option sets and options decoded from a specification document"
//! @acp:domain cli
//! @acp:layer model
//!
//! The model is built once per run and never mutated after parsing.
//! Option-level rules (allowed defaults, enum values, known types) are not
//! enforced here; generators check them so errors name the exact option.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{CmdgenError, Result};

/// @acp:summary "Top-level specification: every command plus reusable option sets"
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Commands {
    #[serde(rename = "commands")]
    pub command_list: Vec<Command>,
    pub option_sets: Vec<OptionSet>,
}

impl Commands {
    /// Find an option set by name
    pub fn option_set(&self, name: &str) -> Option<&OptionSet> {
        self.option_sets.iter().find(|set| set.name == name)
    }

    /// Append the commands and option sets of another document
    pub fn merge(&mut self, other: Commands) {
        self.command_list.extend(other.command_list);
        self.option_sets.extend(other.option_sets);
    }
}

/// @acp:summary "One node of the command tree, identified by its full name"
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Command {
    /// Whitespace-joined path, e.g. `app workflow start`
    #[serde(rename = "name")]
    pub full_name: String,

    /// Segments of `full_name`
    #[serde(skip)]
    pub name_path: Vec<String>,

    /// One-line summary (markdown)
    pub summary: String,
    #[serde(skip)]
    pub summary_plain: String,
    #[serde(skip)]
    pub summary_highlighted: String,

    /// Long description (markdown)
    pub description: String,
    #[serde(skip)]
    pub description_plain: String,
    #[serde(skip)]
    pub description_highlighted: String,

    /// Generated constructor calls a hand-written `init_command`
    pub has_init: bool,
    pub exact_args: usize,
    pub maximum_args: usize,
    #[serde(rename = "ignores-missing-env")]
    pub ignore_missing_env: bool,
    /// Command runs itself when no subcommand is given
    pub subcommands_optional: bool,

    /// Deprecation message; an empty message means the default sentence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,

    pub options: Vec<CommandOption>,
    /// Names of included option sets
    pub option_sets: Vec<String>,

    /// Docs-only metadata
    pub docs: CommandDocs,
}

impl Command {
    /// Number of segments below the program name
    pub fn depth(&self) -> usize {
        self.name_path.len().saturating_sub(1)
    }

    /// Last path segment
    pub fn leaf_name(&self) -> &str {
        self.name_path.last().map(String::as_str).unwrap_or_default()
    }

    /// Key of the reference document this command belongs to
    pub fn file_name(&self) -> Option<&str> {
        self.name_path.get(1).map(String::as_str)
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecated.is_some()
    }
}

/// Reference-document metadata for top-level commands
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CommandDocs {
    pub keywords: Vec<String>,
    pub description_header: String,
    pub tags: Vec<String>,
}

/// @acp:summary "Named bundle of options included by reference"
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OptionSet {
    pub name: String,
    pub description: String,
    pub options: Vec<CommandOption>,
    /// Module path that owns the concrete type; nothing but a reference is generated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_package: Option<String>,
}

impl OptionSet {
    pub fn is_external(&self) -> bool {
        self.external_package
            .as_deref()
            .is_some_and(|package| !package.is_empty())
    }
}

/// @acp:summary "A single flag definition"
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CommandOption {
    pub name: String,
    /// Raw type name; see [`OptionType`]
    #[serde(rename = "type")]
    pub type_name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short: Option<String>,
    /// Type-dependent literal; YAML numbers and booleans are kept as text
    #[serde(
        deserialize_with = "scalar_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub default: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implied_env: Option<String>,
    pub required: bool,
    pub aliases: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,
    pub experimental: bool,
    /// Documented accepted values
    pub enum_values: Vec<String>,
    /// Accepted but undocumented values
    pub hidden_legacy_values: Vec<String>,
    /// Type label shown in docs and help instead of `type`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_type: Option<String>,
}

impl CommandOption {
    pub fn option_type(&self) -> Result<OptionType> {
        self.type_name
            .parse()
            .map_err(|_| CmdgenError::UnknownOptionType {
                option: self.name.clone(),
                type_name: self.type_name.clone(),
            })
    }

    /// Default literal, treating an empty string as absent
    pub fn default_literal(&self) -> Option<&str> {
        self.default.as_deref().filter(|d| !d.is_empty())
    }

    /// `env`, falling back to `implied-env`
    pub fn env_var(&self) -> Option<&str> {
        self.env
            .as_deref()
            .filter(|e| !e.is_empty())
            .or_else(|| self.implied_env.as_deref().filter(|e| !e.is_empty()))
    }

    pub fn short_flag(&self) -> Option<&str> {
        self.short.as_deref().filter(|s| !s.is_empty())
    }

    /// Type label for docs
    pub fn display_type_name(&self) -> &str {
        self.display_type
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or(&self.type_name)
    }

    pub fn is_enum(&self) -> bool {
        matches!(
            self.type_name.as_str(),
            "string-enum" | "string-enum[]"
        )
    }
}

/// Closed set of option types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionType {
    Bool,
    Int,
    Float,
    String,
    Duration,
    Timestamp,
    StringArray,
    StringEnum,
    StringEnumArray,
}

impl OptionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::Bool => "bool",
            OptionType::Int => "int",
            OptionType::Float => "float",
            OptionType::String => "string",
            OptionType::Duration => "duration",
            OptionType::Timestamp => "timestamp",
            OptionType::StringArray => "string[]",
            OptionType::StringEnum => "string-enum",
            OptionType::StringEnumArray => "string-enum[]",
        }
    }
}

impl std::str::FromStr for OptionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "bool" => Ok(OptionType::Bool),
            "int" => Ok(OptionType::Int),
            "float" => Ok(OptionType::Float),
            "string" => Ok(OptionType::String),
            "duration" => Ok(OptionType::Duration),
            "timestamp" => Ok(OptionType::Timestamp),
            "string[]" => Ok(OptionType::StringArray),
            "string-enum" => Ok(OptionType::StringEnum),
            "string-enum[]" => Ok(OptionType::StringEnumArray),
            _ => Err(format!("Unknown option type: {}", s)),
        }
    }
}

impl std::fmt::Display for OptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn scalar_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<serde_yaml::Value>::deserialize(deserializer)? {
        None | Some(serde_yaml::Value::Null) => Ok(None),
        Some(serde_yaml::Value::String(s)) => Ok(Some(s)),
        Some(serde_yaml::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(serde_yaml::Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "default must be a scalar, got {:?}",
            other
        ))),
    }
}

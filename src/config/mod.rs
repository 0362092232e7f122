//! @acp:module "Configuration"
//! @acp:summary "Generator configuration loading and defaults"
//! @acp:domain cli
//! @acp:layer config

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = ".cmdgen.config.json";

/// @acp:summary "Top-level cmdgen configuration"
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Source code generation settings
    #[serde(default)]
    pub code: CodeConfig,

    /// Reference documentation settings
    #[serde(default)]
    pub docs: DocsConfig,
}

impl Config {
    /// @acp:summary "Load config from a JSON file"
    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// @acp:summary "Save config to a file"
    pub fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// @acp:summary "Load from default location or fall back to defaults"
    pub fn load_or_default() -> Self {
        Self::load(DEFAULT_CONFIG_FILE).unwrap_or_default()
    }
}

/// @acp:summary "Settings for `cmdgen code`"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeConfig {
    /// Unit name written into the generated header
    #[serde(default = "default_module")]
    pub module: String,

    /// Type of the context passed to constructors and `run`
    #[serde(default = "default_context_type")]
    pub context_type: String,

    /// Output file; stdout when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Run rustfmt over the generated unit
    #[serde(default = "default_true")]
    pub format: bool,
}

impl Default for CodeConfig {
    fn default() -> Self {
        Self {
            module: default_module(),
            context_type: default_context_type(),
            output: None,
            format: true,
        }
    }
}

/// @acp:summary "Settings for `cmdgen docs`"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocsConfig {
    #[serde(default = "default_docs_dir")]
    pub output_dir: PathBuf,

    /// Prefix of every document title, e.g. `CLI` in "CLI workflow command reference"
    #[serde(default = "default_title_prefix")]
    pub title_prefix: String,

    /// Specification file named in the auto-generated notice
    #[serde(default = "default_source")]
    pub source: String,

    /// File extension of written documents
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            output_dir: default_docs_dir(),
            title_prefix: default_title_prefix(),
            source: default_source(),
            extension: default_extension(),
        }
    }
}

fn default_module() -> String {
    "commands".to_string()
}

fn default_context_type() -> String {
    "&CommandContext".to_string()
}

fn default_true() -> bool {
    true
}

fn default_docs_dir() -> PathBuf {
    PathBuf::from("docs")
}

fn default_title_prefix() -> String {
    "CLI".to_string()
}

fn default_source() -> String {
    "commands.yaml".to_string()
}

fn default_extension() -> String {
    "mdx".to_string()
}

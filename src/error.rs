//! @acp:module "Errors"
//! @acp:summary "Error taxonomy shared by the parser, resolver and generators"
//! @acp:domain cli
//! @acp:layer core
//!
//! Every error is terminal to the run that produced it. Generators wrap
//! failures with the command or option set being written so the message
//! names the offending node of the tree.

use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, CmdgenError>;

/// @acp:summary "All failures raised while compiling a command specification"
#[derive(Debug, Error)]
pub enum CmdgenError {
    /// Malformed specification document
    #[error("failed decoding command specification: {0}")]
    InputDecode(String),

    /// Option type outside the closed set
    #[error("unrecognized data type {type_name:?} for option {option:?}")]
    UnknownOptionType { option: String, type_name: String },

    /// Default literal not allowed or not parseable for the option type
    #[error("invalid default for option {option:?}: {reason}")]
    InvalidDefault { option: String, reason: String },

    /// Option definition that cannot be turned into a flag
    #[error("invalid option {option:?}: {reason}")]
    InvalidOption { option: String, reason: String },

    /// Command or option-set name that yields no valid Rust identifier
    #[error("invalid name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    /// A command references an option set that is not defined
    #[error("command {command:?} uses undefined option set {set:?}")]
    OptionSetNotFound { command: String, set: String },

    /// Two commands share the same full name
    #[error("duplicate command {0:?}")]
    DuplicateCommand(String),

    /// The same short reference was requested for two different paths
    #[error("duplicate import {alias:?} for {path} and {previous}")]
    ImportCollision {
        alias: String,
        path: String,
        previous: String,
    },

    /// The formatter rejected the generated unit; carries the raw buffer
    #[error("failed generating code: {message}, code:\n-----\n{source_text}\n-----")]
    SourceFormat { message: String, source_text: String },

    /// A nested command has no top-level document to be written into
    #[error("command {command:?} has no top-level document {document:?}")]
    MissingDocument { command: String, document: String },

    /// Failure while handling a specific command
    #[error("failed writing command {name}: {source}")]
    Command {
        name: String,
        source: Box<CmdgenError>,
    },

    /// Failure while handling a specific option set
    #[error("failed writing option set {name}: {source}")]
    OptionSet {
        name: String,
        source: Box<CmdgenError>,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
}

impl CmdgenError {
    /// Wrap this error with the full name of the command it belongs to
    pub fn in_command(self, name: impl Into<String>) -> Self {
        CmdgenError::Command {
            name: name.into(),
            source: Box::new(self),
        }
    }

    /// Wrap this error with the name of the option set it belongs to
    pub fn in_option_set(self, name: impl Into<String>) -> Self {
        CmdgenError::OptionSet {
            name: name.into(),
            source: Box::new(self),
        }
    }

    /// Innermost error, skipping command/option-set context
    pub fn root_cause(&self) -> &CmdgenError {
        match self {
            CmdgenError::Command { source, .. } | CmdgenError::OptionSet { source, .. } => {
                source.root_cause()
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_chain_names_command() {
        let err = CmdgenError::InvalidDefault {
            option: "verbose".to_string(),
            reason: "cannot have default for bool option".to_string(),
        }
        .in_option_set("shared")
        .in_command("app run");

        let text = err.to_string();
        assert!(text.starts_with("failed writing command app run: failed writing option set shared"));
        assert!(matches!(err.root_cause(), CmdgenError::InvalidDefault { .. }));
    }
}

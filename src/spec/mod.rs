//! @acp:module "Specification"
//! @acp:summary "Declarative command-tree specification: model, parser and lint"
//! @acp:domain cli
//! @acp:layer parse

pub mod lint;
pub mod markdown;
pub mod model;
pub mod parse;

pub use lint::{lint, LintFinding};
pub use model::{Command, CommandDocs, CommandOption, Commands, OptionSet, OptionType};
pub use parse::{parse_commands, parse_documents, parse_files};

//! @acp:module "Generated Names"
//! @acp:summary "Type and field identifiers derived from command, option-set and option names"
//! @acp:domain cli
//! @acp:layer codegen

use crate::error::{CmdgenError, Result};

/// Fields every generated record may carry itself
pub const RESERVED_FIELDS: &[&str] = &["command", "parent", "flag_set"];

const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

// Keywords that cannot be written as raw identifiers.
const NON_RAW: &[&str] = &["self", "super", "crate", "_"];

fn pieces(name: &str) -> impl Iterator<Item = &str> {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|piece| !piece.is_empty())
}

fn is_identifier(ident: &str) -> bool {
    ident
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && ident.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn checked(name: &str, ident: String) -> Result<String> {
    if is_identifier(&ident) {
        Ok(ident)
    } else {
        Err(CmdgenError::InvalidName {
            name: name.to_string(),
            reason: format!("{:?} is not a valid identifier", ident),
        })
    }
}

fn first_upper(s: &str) -> String {
    let mut chars = s.chars();
    chars
        .next()
        .map(|c| c.to_ascii_uppercase())
        .into_iter()
        .chain(chars)
        .collect()
}

/// `app workflow-start.v2` -> `AppWorkflowStartV2`
pub fn camel(name: &str) -> String {
    pieces(name).map(first_upper).collect()
}

/// `Workflow-ID` -> `workflow_id`
pub fn snake(name: &str) -> String {
    pieces(name)
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

pub fn command_type(full_name: &str) -> Result<String> {
    checked(full_name, format!("{}Command", camel(full_name)))
}

pub fn option_set_type(set_name: &str) -> Result<String> {
    checked(set_name, format!("{}Options", camel(set_name)))
}

pub fn option_set_field(set_name: &str) -> Result<String> {
    checked(set_name, format!("{}_options", snake(set_name)))
}

/// Field identifier for an option, raw when it collides with a keyword
pub fn option_field(option_name: &str) -> Result<String> {
    let field = snake(option_name);
    let invalid = |reason: &str| CmdgenError::InvalidOption {
        option: option_name.to_string(),
        reason: reason.to_string(),
    };

    if !is_identifier(&field) {
        return Err(invalid("cannot derive a field name"));
    }
    if NON_RAW.contains(&field.as_str()) || RESERVED_FIELDS.contains(&field.as_str()) {
        return Err(invalid("name is reserved"));
    }
    if KEYWORDS.contains(&field.as_str()) {
        return Ok(format!("r#{}", field));
    }
    Ok(field)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names() {
        assert_eq!(command_type("app workflow start").unwrap(), "AppWorkflowStartCommand");
        assert_eq!(command_type("app task-queue").unwrap(), "AppTaskQueueCommand");
        assert_eq!(option_set_type("client").unwrap(), "ClientOptions");
        assert_eq!(
            option_set_field("workflow-reference").unwrap(),
            "workflow_reference_options"
        );
    }

    #[test]
    fn test_punctuation_splits_words() {
        assert_eq!(command_type("app config.get").unwrap(), "AppConfigGetCommand");
        assert_eq!(option_set_type("tls.v2").unwrap(), "TlsV2Options");
        assert_eq!(option_set_field("tls.v2").unwrap(), "tls_v2_options");
        assert_eq!(option_set_field("a/b:c").unwrap(), "a_b_c_options");
    }

    #[test]
    fn test_names_without_identifier_rejected() {
        for result in [command_type("9 lives"), option_set_type("2fa"), option_set_field("9")] {
            assert!(matches!(result, Err(CmdgenError::InvalidName { .. })), "{:?}", result);
        }
    }

    #[test]
    fn test_option_fields() {
        assert_eq!(option_field("workflow-id").unwrap(), "workflow_id");
        assert_eq!(option_field("TLS-Cert").unwrap(), "tls_cert");
        assert_eq!(option_field("type").unwrap(), "r#type");
        assert!(option_field("parent").is_err());
        assert!(option_field("self").is_err());
        assert!(option_field("9lives").is_err());
        assert_eq!(option_field("a.b").unwrap(), "a_b");
        assert!(option_field("...").is_err());
    }
}

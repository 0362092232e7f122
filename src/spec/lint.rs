//! @acp:module "Specification Lint"
//! @acp:summary "Style and consistency findings for a parsed specification"
//! @acp:domain cli
//! @acp:layer validation
//!
//! Lint never fails; it reports every finding so a single `cmdgen check`
//! run shows everything that needs fixing.

use std::fmt;

use serde::Serialize;

use super::model::{Command, CommandOption, Commands};

/// @acp:summary "One lint finding with the node it was raised on"
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintFinding {
    /// e.g. `command "app run"` or `option "address" in option set "client"`
    pub context: String,
    pub message: String,
}

impl fmt::Display for LintFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.context, self.message)
    }
}

/// @acp:summary "Check every command, option set and option"
pub fn lint(commands: &Commands) -> Vec<LintFinding> {
    let mut findings = Vec::new();

    for set in &commands.option_sets {
        let context = format!("option set {:?}", set.name);
        if set.name.is_empty() {
            push(&mut findings, &context, "missing name");
        }
        for option in &set.options {
            lint_option(option, &context, &mut findings);
        }
    }

    for command in &commands.command_list {
        lint_command(command, &mut findings);
    }

    findings
}

fn lint_command(command: &Command, findings: &mut Vec<LintFinding>) {
    let context = format!("command {:?}", command.full_name);

    if command.full_name.trim().is_empty() {
        push(findings, &context, "missing name");
    }
    if command.summary.is_empty() {
        push(findings, &context, "missing summary");
    } else if command.summary.ends_with('.') {
        push(findings, &context, "summary should not end in a '.'");
    }
    if command.exact_args > 0 && command.maximum_args > 0 {
        push(findings, &context, "cannot have both exact-args and maximum-args");
    }
    if command.description.trim().is_empty() {
        push(findings, &context, "missing description");
    }
    if command.name_path.len() == 2 {
        if command.docs.keywords.is_empty() {
            push(findings, &context, "top-level command missing docs.keywords");
        }
        if command.docs.description_header.is_empty() {
            push(findings, &context, "top-level command missing docs.description-header");
        }
    }

    for option in &command.options {
        lint_option(option, &context, findings);
    }
}

fn lint_option(option: &CommandOption, owner: &str, findings: &mut Vec<LintFinding>) {
    let context = format!("option {:?} in {}", option.name, owner);

    if option.name.is_empty() {
        push(findings, &context, "missing name");
    }
    if option.type_name.is_empty() {
        push(findings, &context, "missing type");
    }
    if option.description.is_empty() {
        push(findings, &context, "missing description");
    } else if !option.description.ends_with('.') {
        push(findings, &context, "description should end in a '.'");
    }
    if let Some(env) = option.env.as_deref().filter(|e| !e.is_empty()) {
        if env != env.to_uppercase() {
            push(findings, &context, "env variables must be in all caps");
        }
    }
    if !option.is_enum() && !option.enum_values.is_empty() {
        push(findings, &context, "enum-values only allowed on string-enum types");
    }
    if option.is_enum() {
        if let Some(default) = option.default_literal() {
            if !option.enum_values.iter().any(|v| v == default) {
                push(
                    findings,
                    &context,
                    &format!("default {:?} is not one of the enum-values", default),
                );
            }
        }
    }
}

fn push(findings: &mut Vec<LintFinding>, context: &str, message: &str) {
    findings.push(LintFinding {
        context: context.to_string(),
        message: message.to_string(),
    });
}

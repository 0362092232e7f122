//! @acp:module "Option Tables"
//! @acp:summary "Markdown option tables for command reference documents"
//! @acp:domain cli
//! @acp:layer output

use std::sync::LazyLock;

use regex::Regex;

use crate::spec::CommandOption;

/// `'Key={"json": "value"}'` examples, which MDX would evaluate as expressions
static JSON_EXAMPLE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"('[a-zA-Z0-9]*=\{.*\}')").unwrap());

pub const LOCAL_PREFACE: &str = "Use the following options to change the behavior of this command.\n\n";

/// Wrap JSON-looking examples in code spans
pub fn encode_json_example(text: &str) -> String {
    JSON_EXAMPLE_PATTERN.replace_all(text, "`$1`").into_owned()
}

/// One table row; the default column is only present in global tables
pub fn option_row(option: &CommandOption, include_default: bool) -> String {
    let mut flag = format!("`--{}`", option.name);
    if let Some(short) = option.short_flag() {
        flag.push_str(&format!(", `-{}`", short));
    }
    let required = if option.required { "Yes" } else { "No" };

    let mut description = format!(
        "**{}** {}",
        option.display_type_name(),
        encode_json_example(&option.description)
    );
    if !option.enum_values.is_empty() {
        description.push_str(&format!(" Accepted values: {}.", option.enum_values.join(", ")));
    }
    if option.experimental {
        description.push_str(" _(Experimental)_");
    }
    let description = description.replace('|', "\\|");

    if include_default {
        let default = option
            .default_literal()
            .map(|d| format!("`{}`", d))
            .unwrap_or_default();
        format!("| {} | {} | {} | {} |\n", flag, required, description, default)
    } else {
        format!("| {} | {} | {} |\n", flag, required, description)
    }
}

/// Three-column table of a command's own options, in the given order
pub fn local_table(options: &[&CommandOption]) -> String {
    let mut out = String::new();
    out.push_str("| Flag | Required | Description |\n");
    out.push_str("|------|----------|-------------|\n");
    for option in options {
        out.push_str(&option_row(option, false));
    }
    out.push('\n');
    out
}

/// Trailing "Global Flags" section with a default column
pub fn global_section<'a>(options: impl IntoIterator<Item = &'a CommandOption>) -> String {
    let mut out = String::new();
    out.push_str("## Global Flags\n\n");
    out.push_str("The following options can be used with any command.\n\n");
    out.push_str("| Flag | Required | Description | Default |\n");
    out.push_str("|------|----------|-------------|--------|\n");
    for option in options {
        out.push_str(&option_row(option, true));
    }
    out.push('\n');
    out
}

//! @acp:module "Fragment Splicer"
//! @acp:summary "Split a support fragment into its imported paths and verbatim body"
//! @acp:domain cli
//! @acp:layer codegen
//!
//! Fragments are treated as text templates, not parsed as Rust. The preamble
//! is the leading run of blank lines, plain `//` comments and `use`
//! statements; the body starts at the first line that is none of those.

/// One imported path and the alias it was renamed to, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsePath {
    pub path: String,
    pub alias: Option<String>,
}

/// Fragment split into its external imports and the text after its preamble
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment<'a> {
    pub uses: Vec<UsePath>,
    pub body: &'a str,
}

pub fn split_fragment(source: &str) -> Fragment<'_> {
    let mut uses = Vec::new();
    let mut statement = String::new();
    let mut offset = 0;

    for line in source.split_inclusive('\n') {
        let trimmed = line.trim();
        if !statement.is_empty() {
            statement.push(' ');
            statement.push_str(trimmed);
            if trimmed.ends_with(';') {
                collect_use(&statement, &mut uses);
                statement.clear();
            }
        } else if trimmed.is_empty() || is_plain_comment(trimmed) {
            // preamble
        } else if let Some(rest) = trimmed.strip_prefix("use ") {
            if trimmed.ends_with(';') {
                collect_use(rest, &mut uses);
            } else {
                statement.push_str(rest);
            }
        } else {
            break;
        }
        offset += line.len();
    }

    Fragment {
        uses,
        body: &source[offset..],
    }
}

fn is_plain_comment(line: &str) -> bool {
    line.starts_with("//") && !line.starts_with("///") && !line.starts_with("//!")
}

// `rest` is the statement after `use `, with the trailing `;`.
fn collect_use(rest: &str, out: &mut Vec<UsePath>) {
    let tree = rest.trim().trim_end_matches(';').trim();
    expand_tree("", tree, out);
}

fn expand_tree(prefix: &str, tree: &str, out: &mut Vec<UsePath>) {
    let tree = tree.trim();
    if tree.is_empty() {
        return;
    }

    if let (Some(open), true) = (tree.find('{'), tree.ends_with('}')) {
        let head = tree[..open].trim().trim_end_matches("::");
        let prefix = join(prefix, head);
        for item in split_top_level(&tree[open + 1..tree.len() - 1]) {
            expand_tree(&prefix, item, out);
        }
        return;
    }

    let (path, alias) = match tree.split_once(" as ") {
        Some((path, alias)) => (path.trim(), Some(alias.trim().to_string())),
        None => (tree, None),
    };
    let path = if path == "self" {
        prefix.to_string()
    } else {
        join(prefix, path)
    };

    let first = path.split("::").next().unwrap_or_default();
    if matches!(first, "super" | "crate" | "self") {
        return;
    }
    out.push(UsePath { path, alias });
}

fn join(prefix: &str, segment: &str) -> String {
    match (prefix.is_empty(), segment.is_empty()) {
        (true, _) => segment.to_string(),
        (_, true) => prefix.to_string(),
        _ => format!("{}::{}", prefix, segment),
    }
}

// Comma-separated items of a brace group, ignoring commas in nested groups.
fn split_top_level(group: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in group.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                items.push(&group[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    items.push(&group[start..]);
    items
}

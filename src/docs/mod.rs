//! @acp:module "Docs Generator"
//! @acp:summary "One markdown reference document per top-level command"
//! @acp:domain cli
//! @acp:layer output
//!
//! The tree is walked depth-first from every root while a stack of option
//! frames mirrors the current path: each frame holds a command's own options
//! plus those of its option sets. At a leaf, the innermost frame is rendered
//! in place and the outer frames are deferred to the file's "Global Flags"
//! section, each flag listed once.

pub mod table;

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::config::DocsConfig;
use crate::error::{CmdgenError, Result};
use crate::spec::{Command, CommandOption, Commands};
use crate::tree::CommandTree;

/// @acp:summary "Render every reference document, keyed by top-level command name"
pub fn generate_docs(commands: &Commands, config: &DocsConfig) -> Result<BTreeMap<String, Vec<u8>>> {
    let tree = CommandTree::new(commands)?;
    let mut writer = DocWriter {
        tree: &tree,
        config,
        files: BTreeMap::new(),
        globals: BTreeMap::new(),
    };

    let mut stack = Vec::new();
    for root in tree.roots() {
        writer.walk(root, &mut stack)?;
    }
    writer.write_global_sections();

    debug!(documents = writer.files.len(), "Generated reference documents");
    Ok(writer
        .files
        .into_iter()
        .map(|(key, text)| (key, text.into_bytes()))
        .collect())
}

struct DocWriter<'t, 'a> {
    tree: &'t CommandTree<'a>,
    config: &'t DocsConfig,
    files: BTreeMap<String, String>,
    /// file -> flag name -> first option seen under that name
    globals: BTreeMap<String, BTreeMap<String, &'a CommandOption>>,
}

impl<'t, 'a> DocWriter<'t, 'a> {
    fn walk(&mut self, command: &'a Command, stack: &mut Vec<Vec<&'a CommandOption>>) -> Result<()> {
        let sets = self
            .tree
            .option_sets(command)
            .map_err(|e| e.in_command(&command.full_name))?;
        let frame = command
            .options
            .iter()
            .chain(sets.into_iter().flat_map(|set| set.options.iter()))
            .collect();
        stack.push(frame);

        self.write_command(command, stack)
            .map_err(|e| e.in_command(&command.full_name))?;
        for sub in self.tree.subcommands(command) {
            self.walk(sub, stack)?;
        }

        stack.pop();
        Ok(())
    }

    fn write_command(&mut self, command: &'a Command, stack: &[Vec<&'a CommandOption>]) -> Result<()> {
        let depth = command.depth();
        let Some(key) = command.file_name() else {
            // program root, nothing to document
            return Ok(());
        };

        if depth == 1 {
            if self.files.contains_key(key) {
                warn!(document = key, command = %command.full_name, "Replacing reference document");
                self.globals.remove(key);
            }
            let header = self.front_matter(command, key);
            self.files.insert(key.to_string(), header);
        } else {
            let doc = self.document(command, key)?;
            doc.push_str(&format!(
                "{} {}\n\n{}\n\n",
                "#".repeat(depth),
                command.leaf_name(),
                command.description
            ));
        }

        if !self.tree.is_leaf(command) {
            return Ok(());
        }

        let Some((local, outer)) = stack.split_last() else {
            return Ok(());
        };
        let mut local = local.clone();
        local.sort_by(|a, b| a.name.cmp(&b.name));
        if !local.is_empty() {
            let doc = self.document(command, key)?;
            doc.push_str(table::LOCAL_PREFACE);
            doc.push_str(&table::local_table(&local));
        }

        let globals = self.globals.entry(key.to_string()).or_default();
        for option in outer.iter().flatten() {
            globals.entry(option.name.clone()).or_insert(*option);
        }
        Ok(())
    }

    fn document(&mut self, command: &Command, key: &str) -> Result<&mut String> {
        self.files
            .get_mut(key)
            .ok_or_else(|| CmdgenError::MissingDocument {
                command: command.full_name.clone(),
                document: key.to_string(),
            })
    }

    fn front_matter(&self, command: &Command, key: &str) -> String {
        let mut out = String::new();
        out.push_str("---\n");
        out.push_str(&format!("id: {}\n", key));
        out.push_str(&format!(
            "title: {} {} command reference\n",
            self.config.title_prefix, key
        ));
        out.push_str(&format!("sidebar_label: {}\n", key));
        out.push_str(&format!("description: {}\n", command.docs.description_header));
        out.push_str("toc_max_heading_level: 4\n");
        out.push_str("keywords:\n");
        for keyword in &command.docs.keywords {
            out.push_str(&format!("  - {}\n", keyword));
        }
        out.push_str("tags:\n");
        for tag in &command.docs.tags {
            out.push_str(&format!("  - {}\n", tag));
        }
        out.push_str("---\n\n");
        out.push_str(
            "{/* NOTE: This is an auto-generated file. Any edit to this file will be overwritten.\n",
        );
        out.push_str(&format!(
            "This file is generated from {} via cmdgen docs */}}\n",
            self.config.source
        ));
        out
    }

    fn write_global_sections(&mut self) {
        for (key, options) in &self.globals {
            if options.is_empty() {
                continue;
            }
            if let Some(doc) = self.files.get_mut(key) {
                doc.push_str(&table::global_section(options.values().copied()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::parse_commands;

    #[test]
    fn test_nested_command_without_document() {
        let commands = parse_commands(b"commands:\n  - name: app orphan child\n    description: Lost.\n").unwrap();
        let err = generate_docs(&commands, &DocsConfig::default()).unwrap_err();
        assert!(err.to_string().starts_with("failed writing command app orphan child"));
        assert!(matches!(err.root_cause(), CmdgenError::MissingDocument { .. }));
    }

    #[test]
    fn test_program_root_only() {
        let commands = parse_commands(b"commands:\n  - name: app\n").unwrap();
        let docs = generate_docs(&commands, &DocsConfig::default()).unwrap();
        assert!(docs.is_empty());
    }
}

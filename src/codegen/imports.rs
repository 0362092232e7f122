//! @acp:module "Import Table"
//! @acp:summary "Alias-to-path table rendered as the generated unit's use block"
//! @acp:domain cli
//! @acp:layer codegen

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{CmdgenError, Result};

/// @acp:summary "Every module path the generated unit refers to, keyed by its short name"
///
/// Claiming an alias that is already bound to a different path fails at
/// once; nothing is ever renamed behind the caller's back.
#[derive(Debug, Default, Clone)]
pub struct ImportTable {
    entries: BTreeMap<String, String>,
    // `use path as _;` imports bind no name and never collide
    anonymous: BTreeSet<String>,
}

impl ImportTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Import `path` under its last segment and return that alias
    pub fn import(&mut self, path: &str) -> Result<String> {
        let alias = match path.rsplit("::").next() {
            Some("*") | None => path.to_string(),
            Some(last) => last.to_string(),
        };
        self.import_as(path, &alias)
    }

    /// Import `path` under an explicit alias
    pub fn import_as(&mut self, path: &str, alias: &str) -> Result<String> {
        if alias == "_" {
            self.anonymous.insert(path.to_string());
            return Ok(alias.to_string());
        }
        match self.entries.get(alias) {
            Some(existing) if existing == path => {}
            Some(existing) => {
                return Err(CmdgenError::ImportCollision {
                    alias: alias.to_string(),
                    path: path.to_string(),
                    previous: existing.clone(),
                });
            }
            None => {
                self.entries.insert(alias.to_string(), path.to_string());
            }
        }
        Ok(alias.to_string())
    }

    pub fn len(&self) -> usize {
        self.entries.len() + self.anonymous.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `use` lines sorted by their rendered text
    pub fn render(&self) -> String {
        let mut lines: Vec<String> = self
            .entries
            .iter()
            .map(|(alias, path)| {
                let natural = path.rsplit("::").next() == Some(alias.as_str()) || alias == path;
                if natural {
                    format!("use {};", path)
                } else {
                    format!("use {} as {};", path, alias)
                }
            })
            .chain(self.anonymous.iter().map(|path| format!("use {} as _;", path)))
            .collect();
        lines.sort();

        let mut out = String::new();
        for line in lines {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}

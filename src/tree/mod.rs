//! @acp:module "Command Tree"
//! @acp:summary "Parent/child inference, arity and option-set resolution over the parsed model"
//! @acp:domain cli
//! @acp:layer model
//!
//! A command's parent is the command whose name path is its own path minus
//! the last segment. The tree is indexed once by name path, so every lookup
//! after construction is a hash probe.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{CmdgenError, Result};
use crate::spec::{Command, Commands, OptionSet};
use crate::support::Arity;

/// @acp:summary "Resolved view of a specification's command tree"
#[derive(Debug)]
pub struct CommandTree<'a> {
    commands: &'a Commands,
    index: HashMap<&'a [String], usize>,
    parents: Vec<Option<usize>>,
    children: Vec<Vec<usize>>,
    sets: HashMap<&'a str, &'a OptionSet>,
}

impl<'a> CommandTree<'a> {
    /// Index `commands`; fails on duplicate full names
    pub fn new(commands: &'a Commands) -> Result<Self> {
        let list = &commands.command_list;

        let mut index: HashMap<&'a [String], usize> = HashMap::with_capacity(list.len());
        for (i, command) in list.iter().enumerate() {
            if index.insert(command.name_path.as_slice(), i).is_some() {
                return Err(CmdgenError::DuplicateCommand(command.full_name.clone()));
            }
        }

        let mut parents = vec![None; list.len()];
        let mut children = vec![Vec::new(); list.len()];
        for (i, command) in list.iter().enumerate() {
            let path = command.name_path.as_slice();
            if path.len() < 2 {
                continue;
            }
            if let Some(&parent) = index.get(&path[..path.len() - 1]) {
                parents[i] = Some(parent);
                children[parent].push(i);
            }
        }

        let sets = commands
            .option_sets
            .iter()
            .map(|set| (set.name.as_str(), set))
            .collect();

        debug!(commands = list.len(), "Resolved command tree");
        Ok(Self {
            commands,
            index,
            parents,
            children,
            sets,
        })
    }

    pub fn model(&self) -> &'a Commands {
        self.commands
    }

    /// Commands in declaration order
    pub fn commands(&self) -> impl Iterator<Item = &'a Command> + '_ {
        self.commands.command_list.iter()
    }

    /// Commands without a parent, in declaration order
    pub fn roots(&self) -> impl Iterator<Item = &'a Command> + '_ {
        self.commands
            .command_list
            .iter()
            .zip(&self.parents)
            .filter(|(_, parent)| parent.is_none())
            .map(|(command, _)| command)
    }

    pub fn parent(&self, command: &Command) -> Option<&'a Command> {
        let i = self.position(command)?;
        self.parents[i].map(|p| &self.commands.command_list[p])
    }

    /// Direct children in declaration order
    pub fn subcommands(&self, command: &Command) -> Vec<&'a Command> {
        self.position(command)
            .map(|i| {
                self.children[i]
                    .iter()
                    .map(|&c| &self.commands.command_list[c])
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn is_leaf(&self, command: &Command) -> bool {
        self.position(command)
            .map_or(true, |i| self.children[i].is_empty())
    }

    /// Included option sets in reference order
    pub fn option_sets(&self, command: &Command) -> Result<Vec<&'a OptionSet>> {
        command
            .option_sets
            .iter()
            .map(|name| {
                self.sets
                    .get(name.as_str())
                    .copied()
                    .ok_or_else(|| CmdgenError::OptionSetNotFound {
                        command: command.full_name.clone(),
                        set: name.clone(),
                    })
            })
            .collect()
    }

    /// `(alias, option name)` pairs of the command and its option sets, sorted by alias
    pub fn alias_table(&self, command: &Command) -> Result<Vec<(String, String)>> {
        let sets = self.option_sets(command)?;
        let mut table: Vec<(String, String)> = command
            .options
            .iter()
            .chain(sets.iter().flat_map(|set| set.options.iter()))
            .flat_map(|option| {
                option
                    .aliases
                    .iter()
                    .map(move |alias| (alias.clone(), option.name.clone()))
            })
            .collect();
        table.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(table)
    }

    fn position(&self, command: &Command) -> Option<usize> {
        self.index.get(command.name_path.as_slice()).copied()
    }
}

/// Positional policy: exact wins over maximum, otherwise none
pub fn arity(command: &Command) -> Arity {
    if command.exact_args > 0 {
        Arity::Exact(command.exact_args)
    } else if command.maximum_args > 0 {
        Arity::Max(command.maximum_args)
    } else {
        Arity::None
    }
}

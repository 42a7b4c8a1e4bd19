//! Root command tree shared with plugins during registration.

use std::collections::BTreeMap;

use clap::Command;

use crate::error::RegistrationError;

/// Generated by clap on any command with subcommands.
const HELP_SUBCOMMAND: &str = "help";

/// Who owns a top-level subcommand name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubtreeOwner {
    /// Declared by the host binary before plugins were registered.
    Builtin,
    /// Attached by the plugin at this index of the dispatcher's plugin list.
    Plugin(usize),
}

/// The root `clap` command plus ownership of every top-level subcommand name.
///
/// Plugins call [`CommandTree::attach`]; attachments are staged and only become
/// part of the root once the dispatcher commits the plugin's registration, so a
/// plugin that fails halfway leaves no partial subtree behind.
#[derive(Debug)]
pub struct CommandTree {
    root: Command,
    owners: BTreeMap<String, SubtreeOwner>,
    staged: Vec<Command>,
}

impl CommandTree {
    /// Wrap `root`; its existing subcommands, and clap's generated `help`,
    /// are reserved as built-ins.
    pub fn new(root: Command) -> Self {
        let owners = root
            .get_subcommands()
            .map(|sub| sub.get_name().to_string())
            .chain(std::iter::once(HELP_SUBCOMMAND.to_string()))
            .map(|name| (name, SubtreeOwner::Builtin))
            .collect();
        Self {
            root,
            owners,
            staged: Vec::new(),
        }
    }

    /// Attach a named subtree with a help string.
    ///
    /// Fails if the name is empty, starts with `-`, or is already claimed.
    pub fn attach(
        &mut self,
        name: &str,
        help: &str,
        subtree: Command,
    ) -> Result<(), RegistrationError> {
        if name.is_empty() || name.starts_with('-') || name.chars().any(char::is_whitespace) {
            return Err(RegistrationError::InvalidName {
                name: name.to_string(),
            });
        }
        if self.is_claimed(name) {
            return Err(RegistrationError::DuplicateSubtree {
                name: name.to_string(),
            });
        }

        self.staged
            .push(subtree.name(name.to_string()).about(help.to_string()));
        Ok(())
    }

    /// Whether `name` is owned by a built-in, a committed plugin, or staged.
    pub fn is_claimed(&self, name: &str) -> bool {
        self.owners.contains_key(name) || self.staged.iter().any(|c| c.get_name() == name)
    }

    pub fn owner_of(&self, name: &str) -> Option<SubtreeOwner> {
        self.owners.get(name).copied()
    }

    /// The root command, including every committed subtree.
    pub fn command(&self) -> &Command {
        &self.root
    }

    /// Move staged subtrees into the root, owned by plugin `index`.
    pub(crate) fn commit(&mut self, index: usize) -> Vec<String> {
        let mut names = Vec::with_capacity(self.staged.len());
        for subtree in self.staged.drain(..) {
            let name = subtree.get_name().to_string();
            self.owners.insert(name.clone(), SubtreeOwner::Plugin(index));
            self.root = std::mem::take(&mut self.root).subcommand(subtree);
            names.push(name);
        }
        names
    }

    /// Drop staged subtrees of a failed registration.
    pub(crate) fn discard(&mut self) -> usize {
        let dropped = self.staged.len();
        self.staged.clear();
        dropped
    }
}

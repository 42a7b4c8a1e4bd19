//! Stub plugins shared by the plugin module tests.

use std::sync::Arc;

use clap::{ArgMatches, Command};

use super::{CommandTree, Outcome, PluginContext, PluginMeta, ToolkitPlugin};
use crate::error::PluginError;

/// Attaches one subtree with `run` and `fail` leaves.
#[derive(Debug)]
pub(crate) struct StubPlugin {
    meta: PluginMeta,
    subtree: String,
    after_attach: AfterAttach,
}

#[derive(Debug, Clone, Copy)]
enum AfterAttach {
    Succeed,
    Fail,
    Panic,
}

impl StubPlugin {
    fn build(name: &str, subtree: &str, after_attach: AfterAttach) -> Arc<dyn ToolkitPlugin> {
        Arc::new(Self {
            meta: PluginMeta::new(name, "0.1.0", format!("Stub {name}")),
            subtree: subtree.to_string(),
            after_attach,
        })
    }

    pub(crate) fn arc(name: &str, subtree: &str) -> Arc<dyn ToolkitPlugin> {
        Self::build(name, subtree, AfterAttach::Succeed)
    }

    pub(crate) fn failing_after_attach(name: &str, subtree: &str) -> Arc<dyn ToolkitPlugin> {
        Self::build(name, subtree, AfterAttach::Fail)
    }

    pub(crate) fn panicking_after_attach(name: &str, subtree: &str) -> Arc<dyn ToolkitPlugin> {
        Self::build(name, subtree, AfterAttach::Panic)
    }
}

impl ToolkitPlugin for StubPlugin {
    fn meta(&self) -> &PluginMeta {
        &self.meta
    }

    fn register(&self, tree: &mut CommandTree) -> Result<(), PluginError> {
        let subtree = Command::new(self.subtree.clone())
            .subcommand(Command::new("run"))
            .subcommand(Command::new("fail"));
        tree.attach(&self.subtree, &self.meta.description, subtree)?;
        match self.after_attach {
            AfterAttach::Succeed => Ok(()),
            AfterAttach::Fail => Err(PluginError::factory("registration aborted")),
            AfterAttach::Panic => panic!("subtree builder blew up"),
        }
    }

    fn execute(
        &self,
        _ctx: &PluginContext,
        _subtree: &str,
        matches: &ArgMatches,
    ) -> Result<Outcome, PluginError> {
        match matches.subcommand_name() {
            Some("fail") => Ok(Outcome::ChecksFailed),
            _ => Ok(Outcome::Success),
        }
    }
}

//! Handlers for the commands the host binary owns.
//!
//! Everything else on the command line belongs to a plugin and is routed by
//! the dispatcher before these run.

pub(crate) mod doctor;
pub(crate) mod init;
pub(crate) mod plugins;

pub(crate) use doctor::handle_doctor_command;
pub(crate) use init::handle_init_command;
pub(crate) use plugins::handle_plugins_command;

use crate::output;

pub(crate) fn handle_version_command() {
    output::plain(format!("devkit {}", env!("CARGO_PKG_VERSION")));
}

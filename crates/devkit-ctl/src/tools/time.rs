//! `devkit time`: project time tracking sessions.

use std::path::PathBuf;

use chrono::Utc;
use clap::{ArgMatches, Command, FromArgMatches, Subcommand};
use devkit_core::timetrack::{
    format_duration, ReportQuery, SessionStore, StartOutcome, StatusOutcome, StopOutcome,
};
use devkit_core::{CommandTree, Outcome, PluginContext, PluginError, PluginMeta, ToolkitPlugin};

use super::{leaf_required, BUILTIN_VERSION};
use crate::output;

const SUBTREE: &str = "time";
const HELP: &str = "Track time in small sessions.";

#[derive(Debug, Subcommand)]
enum TimeCommands {
    /// Start tracking a project
    Start {
        /// Project name
        project: String,
    },
    /// Stop the active session
    Stop,
    /// Show the active session and its elapsed time
    Status,
    /// Total completed time per project
    Report {
        /// Lookback window (days) [default: report-days from config, else 7]
        #[arg(long)]
        days: Option<u32>,
        /// Filter by project
        #[arg(long)]
        project: Option<String>,
    },
    /// Write the session file as JSON
    Export {
        /// Output JSON path
        #[arg(long, default_value = "time_tracker_export.json")]
        out: PathBuf,
    },
}

#[derive(Debug)]
pub(crate) struct TimeTrackerPlugin {
    meta: PluginMeta,
    report_days: u32,
}

impl TimeTrackerPlugin {
    pub(crate) fn new(report_days: u32) -> Self {
        Self {
            meta: PluginMeta::new(
                "time-tracker",
                BUILTIN_VERSION,
                "Simple time tracking sessions stored in a local JSON file.",
            ),
            report_days,
        }
    }
}

impl ToolkitPlugin for TimeTrackerPlugin {
    fn meta(&self) -> &PluginMeta {
        &self.meta
    }

    fn register(&self, tree: &mut CommandTree) -> Result<(), PluginError> {
        let subtree = leaf_required(TimeCommands::augment_subcommands(Command::new(SUBTREE)));
        tree.attach(SUBTREE, HELP, subtree)?;
        Ok(())
    }

    fn execute(
        &self,
        ctx: &PluginContext,
        _subtree: &str,
        matches: &ArgMatches,
    ) -> Result<Outcome, PluginError> {
        let store = SessionStore::in_data_dir(&ctx.data_dir)?;
        let now = Utc::now();

        match TimeCommands::from_arg_matches(matches)? {
            TimeCommands::Start { project } => match store.start(&project, now)? {
                StartOutcome::AlreadyActive { project, start } => {
                    output::error(format!("Already tracking: {project} (started {start})"));
                    Ok(Outcome::Conflict)
                }
                StartOutcome::Started(session) => {
                    output::success(format!("Started {}", session.project));
                    Ok(Outcome::Success)
                }
            },
            TimeCommands::Stop => {
                match store.stop(now)? {
                    StopOutcome::Idle => output::warning("No active session."),
                    StopOutcome::Stopped { project, seconds } => {
                        output::success("Stopped");
                        if let Some(secs) = seconds {
                            output::dim(format!("  {project}: {}", format_duration(secs)));
                        }
                    }
                }
                Ok(Outcome::Success)
            }
            TimeCommands::Status => {
                match store.status(now) {
                    StatusOutcome::Tracking { session, elapsed } => output::plain(format!(
                        "Tracking {} for {}",
                        session.project,
                        format_duration(elapsed)
                    )),
                    StatusOutcome::Unreadable { project, start } => output::warning(format!(
                        "Tracking {project} (start time unreadable: {start})"
                    )),
                    StatusOutcome::Idle => output::plain("No active session."),
                }
                Ok(Outcome::Success)
            }
            TimeCommands::Report { days, project } => {
                let query = ReportQuery {
                    days: days.unwrap_or(self.report_days),
                    project,
                };
                let totals = store.report(&query, now);
                if totals.is_empty() {
                    output::warning("No completed sessions in range.");
                    return Ok(Outcome::Success);
                }

                let title = format!("Time Report (last {} days)", query.days);
                let mut table = output::Table::new(title, &["Project", "Time"]);
                for total in totals {
                    table.row([total.project, format_duration(total.seconds)]);
                }
                table.print();
                Ok(Outcome::Success)
            }
            TimeCommands::Export { out } => {
                store.export(&out)?;
                output::plain(format!("Wrote {}", out.display()));
                Ok(Outcome::Success)
            }
        }
    }
}

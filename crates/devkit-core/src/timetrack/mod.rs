//! Time tracking: an append-only log of project sessions in a local JSON file.
//!
//! At most one session is open (no `end`) at any time. `start` refuses to open
//! a second one, `stop` closes the open one, nothing is ever deleted.

mod report;
mod session;
mod store;

pub use report::{build_report, ProjectTotal, ReportQuery, DEFAULT_REPORT_DAYS};
pub use session::{
    format_duration, format_timestamp, parse_timestamp, Session, SessionDocument, SessionRecord,
};
pub use store::{
    SessionStore, StartOutcome, StatusOutcome, StopOutcome, STATE_DIR, STATE_FILENAME,
};

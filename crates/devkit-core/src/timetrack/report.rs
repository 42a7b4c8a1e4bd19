//! Per-project totals over a lookback window.

use chrono::{DateTime, TimeDelta, Utc};

use super::session::SessionDocument;

/// Default lookback for `time report`.
pub const DEFAULT_REPORT_DAYS: u32 = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportQuery {
    /// Lookback window in days.
    pub days: u32,
    /// Exact project name filter.
    pub project: Option<String>,
}

impl Default for ReportQuery {
    fn default() -> Self {
        Self {
            days: DEFAULT_REPORT_DAYS,
            project: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectTotal {
    pub project: String,
    pub seconds: i64,
}

/// Total completed time per project, largest first.
///
/// A session is in range when its end (or `now`, while open) is not older than
/// `now - days`. Open sessions pass the range filter but never count towards
/// totals. Projects with equal totals keep first-seen order.
pub fn build_report(
    doc: &SessionDocument,
    query: &ReportQuery,
    now: DateTime<Utc>,
) -> Vec<ProjectTotal> {
    let cutoff = TimeDelta::try_days(i64::from(query.days))
        .and_then(|window| now.checked_sub_signed(window))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);

    let mut totals: Vec<ProjectTotal> = Vec::new();
    for session in doc.parsed() {
        if session.effective_end(now) < cutoff {
            continue;
        }
        if query
            .project
            .as_deref()
            .is_some_and(|p| p != session.project)
        {
            continue;
        }
        if session.is_open() {
            continue;
        }

        let seconds = session.duration_seconds(now);
        match totals.iter_mut().find(|t| t.project == session.project) {
            Some(total) => total.seconds += seconds,
            None => totals.push(ProjectTotal {
                project: session.project,
                seconds,
            }),
        }
    }

    totals.sort_by(|a, b| b.seconds.cmp(&a.seconds));
    totals
}

//! Session records and the on-disk document.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// The whole state file: `{"sessions": [...]}`.
///
/// Unknown top-level keys are carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionDocument {
    #[serde(default)]
    pub sessions: Vec<SessionRecord>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One stored session, kept as the raw JSON value it was read from.
///
/// Nothing about a record is assumed until it is parsed, so a record with a
/// bad timestamp, a wrong-typed field or no fields at all survives rewrites and
/// exports exactly as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionRecord(Value);

/// A parsed session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub project: String,
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
}

impl SessionRecord {
    /// New open record starting at `start`.
    pub fn open(project: impl Into<String>, start: DateTime<Utc>) -> Self {
        Self(json!({
            "project": project.into(),
            "start": format_timestamp(start),
            "end": null,
        }))
    }

    fn field(&self, key: &str) -> Option<&Value> {
        self.0.as_object()?.get(key)
    }

    pub fn project(&self) -> Option<&str> {
        self.field("project")?.as_str()
    }

    /// Stored start text, if it is a string.
    pub fn start(&self) -> Option<&str> {
        self.field("start")?.as_str()
    }

    /// Stored end text, if it is a string.
    pub fn end(&self) -> Option<&str> {
        self.field("end")?.as_str()
    }

    /// `key` for display: strings as-is, anything else as JSON, missing as empty.
    pub fn display_field(&self, key: &str) -> String {
        match self.field(key) {
            None => String::new(),
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// A record is open when `end` is missing, null or empty. Records that are
    /// not JSON objects are never open.
    pub fn is_open(&self) -> bool {
        let Some(fields) = self.0.as_object() else {
            return false;
        };
        match fields.get("end") {
            None | Some(Value::Null) => true,
            Some(Value::String(text)) => text.is_empty(),
            Some(_) => false,
        }
    }

    /// Set `end`, leaving every other stored key untouched.
    pub fn close(&mut self, end: DateTime<Utc>) {
        if let Some(fields) = self.0.as_object_mut() {
            fields.insert("end".to_string(), Value::String(format_timestamp(end)));
        }
    }

    /// Parse the record; `None` if `project` or `start` is missing or not a
    /// string, or if either timestamp is malformed.
    pub fn parse(&self) -> Option<Session> {
        let project = self.project()?;
        let start = parse_timestamp(self.start()?)?;
        let end = match self.field("end") {
            None | Some(Value::Null) => None,
            Some(Value::String(raw)) if raw.is_empty() => None,
            Some(Value::String(raw)) => Some(parse_timestamp(raw)?),
            Some(_) => return None,
        };
        Some(Session {
            project: project.to_string(),
            start,
            end,
        })
    }

    /// The stored value.
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl Session {
    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }

    /// Whole seconds from start to end (or `now` while open), never negative.
    pub fn duration_seconds(&self, now: DateTime<Utc>) -> i64 {
        (self.end.unwrap_or(now) - self.start).num_seconds().max(0)
    }

    /// End time, or `now` while open.
    pub fn effective_end(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.end.unwrap_or(now)
    }
}

impl SessionDocument {
    /// Index of the open record. The invariant allows at most one, so the first
    /// open record in stored order is the open record.
    pub fn active_index(&self) -> Option<usize> {
        self.sessions.iter().position(SessionRecord::is_open)
    }

    pub fn active_record(&self) -> Option<&SessionRecord> {
        self.active_index().map(|i| &self.sessions[i])
    }

    /// The open session, if it parses.
    pub fn active(&self) -> Option<Session> {
        self.active_record().and_then(SessionRecord::parse)
    }

    /// All records that parse, in stored order.
    pub fn parsed(&self) -> impl Iterator<Item = Session> + '_ {
        self.sessions.iter().filter_map(|record| {
            let parsed = record.parse();
            if parsed.is_none() {
                tracing::debug!(record = %record.as_value(), "Ignoring malformed session record");
            }
            parsed
        })
    }

    /// Number of open records. Anything above one means the invariant was broken
    /// outside this program.
    pub fn open_count(&self) -> usize {
        self.sessions.iter().filter(|r| r.is_open()).count()
    }
}

/// RFC 3339 in UTC with microseconds and a `Z` suffix.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse any RFC 3339 timestamp into UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}

/// Compact duration: `"1h 5m"`, `"4m 2s"` or `"7s"`. Negative input renders as `"0s"`.
pub fn format_duration(secs: i64) -> String {
    let secs = secs.max(0);
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}

use crate::model::{Incident, Severity, Status};
use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt::Display;

pub const COLUMNS: [&str; 6] = ["Timestamp", "Category", "Source", "Message", "Severity", "Status"];
pub const EMPTY_PLACEHOLDER: &str = "No incidents found.";

/// One body row of the incident table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableRow {
    Incident(IncidentRow),
    Placeholder { text: &'static str, colspan: usize },
}

impl TableRow {
    pub fn placeholder() -> Self {
        TableRow::Placeholder {
            text: EMPTY_PLACEHOLDER,
            colspan: COLUMNS.len(),
        }
    }
}

/// Display-ready cells for one incident.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IncidentRow {
    pub id: String,
    pub timestamp: String,
    pub category: String,
    pub source: String,
    pub message: String,
    pub severity: Severity,
    pub status: Status,
}

impl IncidentRow {
    pub fn new<Tz>(incident: &Incident, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        Self {
            id: incident.id.clone(),
            timestamp: format_timestamp(&incident.timestamp, tz),
            category: incident.display_category().to_string(),
            source: incident.source.clone(),
            message: incident.message.clone(),
            severity: incident.severity,
            status: incident.status,
        }
    }

    pub fn local(incident: &Incident) -> Self {
        Self::new(incident, &Local)
    }
}

/// `1/1/2024, 12:00:00 AM` in the given zone.
pub fn format_timestamp<Tz>(ts: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    ts.with_timezone(tz).format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

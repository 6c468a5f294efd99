use crate::api::ApiError;
use crate::model::Incident;
use crate::row::{IncidentRow, TableRow};
use chrono::{Local, TimeZone};
use std::fmt::Display;

pub const FETCH_FAILED: &str = "Failed to fetch incidents. Is the backend server running?";
pub const STATUS_UPDATE_FAILED: &str = "Failed to update status. Please try again.";

/// What the list view shows. Exactly one of these at any time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListView {
    Loading,
    Failed(String),
    Table(Vec<TableRow>),
}

/// Load state of the list, without the rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListPhase {
    Loading,
    Failed(String),
    Ready,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusOutcome {
    /// The server record replaced the element with the same id.
    Applied,
    /// The record succeeded on the server but is no longer in the list.
    NotListed,
    /// The server answered with a record for a different id; nothing applied.
    Mismatched,
    /// The request failed; the collection is untouched.
    Rejected,
}

impl StatusOutcome {
    pub fn notice(self) -> Option<&'static str> {
        match self {
            StatusOutcome::Rejected => Some(STATUS_UPDATE_FAILED),
            StatusOutcome::Applied | StatusOutcome::NotListed | StatusOutcome::Mismatched => None,
        }
    }
}

/// State owned by the incident list: the canonical in-memory collection plus
/// its load status. Newest created incidents sit at the front.
///
/// `revision` advances on every settled load, create and status attempt,
/// failed ones included. Views re-render rows whenever it moves, so a selector
/// always shows committed state after a request resolves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IncidentList {
    incidents: Vec<Incident>,
    loading: bool,
    error: Option<String>,
    revision: u64,
}

impl IncidentList {
    /// A list that has not finished its first load yet.
    pub fn new() -> Self {
        Self {
            incidents: Vec::new(),
            loading: true,
            error: None,
            revision: 0,
        }
    }

    pub fn incidents(&self) -> &[Incident] {
        &self.incidents
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn finish_load(&mut self, result: Result<Vec<Incident>, ApiError>) {
        match result {
            Ok(incidents) => {
                tracing::debug!(count = incidents.len(), "incident list loaded");
                self.incidents = incidents;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to fetch incidents");
                self.error = Some(FETCH_FAILED.to_string());
            }
        }
        self.loading = false;
        self.bump();
    }

    pub fn apply_status_update(
        &mut self,
        incident_id: &str,
        result: Result<Incident, ApiError>,
    ) -> StatusOutcome {
        self.bump();
        let updated = match result {
            Ok(updated) => updated,
            Err(err) => {
                tracing::error!(id = incident_id, error = %err, "failed to update status");
                return StatusOutcome::Rejected;
            }
        };

        if updated.id != incident_id {
            tracing::warn!(
                id = incident_id,
                returned = %updated.id,
                "status response is for a different incident"
            );
            return StatusOutcome::Mismatched;
        }

        match self.incidents.iter_mut().find(|i| i.id == incident_id) {
            Some(slot) => {
                *slot = updated;
                StatusOutcome::Applied
            }
            None => {
                tracing::warn!(id = incident_id, "status updated for incident not in list");
                StatusOutcome::NotListed
            }
        }
    }

    /// Puts a freshly persisted incident at the front. No deduplication.
    pub fn prepend(&mut self, incident: Incident) {
        tracing::debug!(id = %incident.id, "prepending created incident");
        self.incidents.insert(0, incident);
        self.bump();
    }

    pub fn phase(&self) -> ListPhase {
        if self.loading {
            ListPhase::Loading
        } else if let Some(error) = &self.error {
            ListPhase::Failed(error.clone())
        } else {
            ListPhase::Ready
        }
    }

    pub fn table_rows(&self) -> Vec<TableRow> {
        self.table_rows_in(&Local)
    }

    /// One row per incident, or a single placeholder row when empty.
    pub fn table_rows_in<Tz>(&self, tz: &Tz) -> Vec<TableRow>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        if self.incidents.is_empty() {
            return vec![TableRow::placeholder()];
        }
        self.incidents
            .iter()
            .map(|i| TableRow::Incident(IncidentRow::new(i, tz)))
            .collect()
    }

    pub fn view(&self) -> ListView {
        self.view_in(&Local)
    }

    pub fn view_in<Tz>(&self, tz: &Tz) -> ListView
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        match self.phase() {
            ListPhase::Loading => ListView::Loading,
            ListPhase::Failed(error) => ListView::Failed(error),
            ListPhase::Ready => ListView::Table(self.table_rows_in(tz)),
        }
    }
}

impl Default for IncidentList {
    fn default() -> Self {
        Self::new()
    }
}

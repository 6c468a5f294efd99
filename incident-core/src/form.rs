use crate::api::ApiError;
use crate::model::{Incident, NewIncident, Severity};
use thiserror::Error;

pub const CREATE_FAILED: &str = "Failed to create incident. Please try again.";

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("a create request is already in flight")]
    InFlight,
    #[error("{0} is required")]
    MissingField(&'static str),
}

/// Message the form hands to its parent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormEvent {
    Created(Incident),
}

/// Draft state of the create form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CreateForm {
    source: String,
    message: String,
    severity: Severity,
    submitting: bool,
    error: Option<String>,
}

impl CreateForm {
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.submitting {
            "Creating..."
        } else {
            "Create Incident"
        }
    }

    pub fn set_source(&mut self, source: impl Into<String>) {
        self.source = source.into();
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    pub fn set_severity(&mut self, severity: Severity) {
        self.severity = severity;
    }

    /// Marks the form as submitting and returns the request body.
    ///
    /// Refuses while a request is in flight or when a required field is empty;
    /// in both cases no request should be issued.
    pub fn begin_submit(&mut self) -> Result<NewIncident, SubmitError> {
        if self.submitting {
            return Err(SubmitError::InFlight);
        }
        let missing = if self.source.is_empty() {
            Some("source")
        } else if self.message.is_empty() {
            Some("message")
        } else {
            None
        };
        if let Some(field) = missing {
            let err = SubmitError::MissingField(field);
            self.error = Some(err.to_string());
            return Err(err);
        }

        self.submitting = true;
        self.error = None;
        Ok(NewIncident {
            source: self.source.clone(),
            message: self.message.clone(),
            severity: self.severity,
        })
    }

    /// Settles an in-flight create. On success the draft resets and the
    /// server's record is handed back for the parent; on failure the draft stays.
    pub fn finish_submit(&mut self, result: Result<Incident, ApiError>) -> Option<FormEvent> {
        self.submitting = false;
        match result {
            Ok(created) => {
                self.source.clear();
                self.message.clear();
                self.severity = Severity::default();
                Some(FormEvent::Created(created))
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to create incident");
                self.error = Some(CREATE_FAILED.to_string());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Status;

    fn filled() -> CreateForm {
        let mut form = CreateForm::default();
        form.set_source("Grafana");
        form.set_message("disk full");
        form.set_severity(Severity::Critical);
        form
    }

    fn created() -> Incident {
        Incident {
            id: "42".into(),
            timestamp: "2024-01-01T00:00:00Z".parse().expect("ts"),
            source: "Grafana".into(),
            message: "disk full".into(),
            category: Some("database".into()),
            severity: Severity::Critical,
            status: Status::New,
        }
    }

    #[test]
    fn defaults_to_medium_severity() {
        let form = CreateForm::default();
        assert_eq!(form.severity(), Severity::Medium);
        assert!(!form.is_submitting());
        assert_eq!(form.submit_label(), "Create Incident");
    }

    #[test]
    fn begin_submit_builds_body_and_blocks_duplicates() {
        let mut form = filled();
        let body = form.begin_submit().expect("body");
        assert_eq!(
            body,
            NewIncident {
                source: "Grafana".into(),
                message: "disk full".into(),
                severity: Severity::Critical,
            }
        );
        assert!(form.is_submitting());
        assert_eq!(form.submit_label(), "Creating...");
        assert_eq!(form.begin_submit(), Err(SubmitError::InFlight));
    }

    #[test]
    fn empty_required_field_issues_no_request() {
        let mut form = CreateForm::default();
        form.set_source("Grafana");
        assert_eq!(form.begin_submit(), Err(SubmitError::MissingField("message")));
        assert!(!form.is_submitting());
        assert_eq!(form.error(), Some("message is required"));
    }

    #[test]
    fn success_resets_draft_and_reports_server_record() {
        let mut form = filled();
        form.begin_submit().expect("body");
        let event = form.finish_submit(Ok(created()));
        assert_eq!(event, Some(FormEvent::Created(created())));
        assert_eq!(form, CreateForm::default());
    }

    #[test]
    fn failure_keeps_draft_and_reenables_submit() {
        let mut form = filled();
        form.begin_submit().expect("body");
        let event = form.finish_submit(Err(ApiError::Status {
            url: "http://127.0.0.1:8000/incidents".into(),
            status: 422,
        }));
        assert_eq!(event, None);
        assert_eq!(form.source(), "Grafana");
        assert_eq!(form.message(), "disk full");
        assert_eq!(form.severity(), Severity::Critical);
        assert_eq!(form.error(), Some(CREATE_FAILED));
        assert!(!form.is_submitting());
    }
}

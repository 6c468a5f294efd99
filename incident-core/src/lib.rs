pub mod api;
pub mod config;
pub mod form;
pub mod list;
pub mod liveness;
pub mod model;
pub mod row;

pub use api::{ApiError, HttpIncidentApi, IncidentApi};
pub use config::{ApiConfig, ConfigError};
pub use form::{CreateForm, FormEvent, SubmitError};
pub use list::{IncidentList, ListPhase, ListView, StatusOutcome};
pub use liveness::Liveness;
pub use model::{Incident, NewIncident, Severity, Status, StatusChange};
pub use row::{IncidentRow, TableRow};

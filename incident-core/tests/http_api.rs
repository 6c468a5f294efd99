use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};
use incident_core::{ApiConfig, ApiError, HttpIncidentApi, IncidentApi, NewIncident, Severity, Status};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

type Bodies = Arc<Mutex<Vec<Value>>>;

async fn spawn_backend(router: Router) -> HttpIncidentApi {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    HttpIncidentApi::new(ApiConfig::new(&format!("http://{addr}")).expect("config"))
}

fn document(id: &str, status: &str) -> Value {
    json!({
        "_id": id,
        "source": "Prometheus",
        "message": "CPU high",
        "severity": "high",
        "status": status,
        "timestamp": "2024-01-01T00:00:00",
        "category": "server-performance"
    })
}

async fn list_handler() -> Json<Value> {
    Json(json!([document("2", "new"), document("1", "investigating")]))
}

async fn create_handler(State(bodies): State<Bodies>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    bodies.lock().expect("lock").push(body.clone());
    let mut created = document("new-id", "new");
    created["source"] = body["source"].clone();
    created["message"] = body["message"].clone();
    created["severity"] = body["severity"].clone();
    (StatusCode::CREATED, Json(created))
}

async fn status_handler(
    State(bodies): State<Bodies>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    bodies.lock().expect("lock").push(body.clone());
    let status = body["status"].as_str().unwrap_or_default().to_string();
    Json(document(&id, &status))
}

fn backend(bodies: Bodies) -> Router {
    Router::new()
        .route("/incidents", get(list_handler).post(create_handler))
        .route("/incidents/:id/status", patch(status_handler))
        .with_state(bodies)
}

#[tokio::test]
async fn lists_incidents_in_server_order() {
    let api = spawn_backend(backend(Bodies::default())).await;
    let incidents = api.list_incidents().await.expect("list");
    let ids: Vec<_> = incidents.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["2", "1"]);
    assert_eq!(incidents[1].status, Status::Investigating);
}

#[tokio::test]
async fn create_posts_exactly_the_draft_fields() {
    let bodies = Bodies::default();
    let api = spawn_backend(backend(bodies.clone())).await;

    let created = api
        .create_incident(&NewIncident {
            source: "Grafana".into(),
            message: "disk full".into(),
            severity: Severity::Critical,
        })
        .await
        .expect("create");

    assert_eq!(created.id, "new-id");
    assert_eq!(created.status, Status::New);
    assert_eq!(created.severity, Severity::Critical);
    assert_eq!(
        bodies.lock().expect("lock").as_slice(),
        &[json!({"source": "Grafana", "message": "disk full", "severity": "critical"})]
    );
}

#[tokio::test]
async fn patches_status_for_the_given_id() {
    let bodies = Bodies::default();
    let api = spawn_backend(backend(bodies.clone())).await;

    let updated = api.update_status("1", Status::Resolved).await.expect("patch");

    assert_eq!(updated.id, "1");
    assert_eq!(updated.status, Status::Resolved);
    assert_eq!(
        bodies.lock().expect("lock").as_slice(),
        &[json!({"status": "resolved"})]
    );
}

#[tokio::test]
async fn non_success_status_is_a_failure() {
    let router = Router::new().route(
        "/incidents",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let api = spawn_backend(router).await;
    let err = api.list_incidents().await.expect_err("should fail");
    assert!(matches!(err, ApiError::Status { status: 500, .. }));
}

#[tokio::test]
async fn unknown_id_is_a_failure() {
    let router = Router::new().route(
        "/incidents/:id/status",
        patch(|| async { (StatusCode::NOT_FOUND, Json(json!({"detail": "not found"}))) }),
    );
    let api = spawn_backend(router).await;
    let err = api
        .update_status("missing", Status::Resolved)
        .await
        .expect_err("should fail");
    assert!(matches!(err, ApiError::Status { status: 404, .. }));
}

#[tokio::test]
async fn malformed_body_is_a_failure() {
    let router = Router::new().route("/incidents", get(|| async { Json(json!({"not": "a list"})) }));
    let api = spawn_backend(router).await;
    let err = api.list_incidents().await.expect_err("should fail");
    assert!(matches!(err, ApiError::Decode { .. }));
}

#[tokio::test]
async fn unreachable_backend_is_a_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let api = HttpIncidentApi::new(ApiConfig::new(&format!("http://{addr}")).expect("config"));
    let err = api.list_incidents().await.expect_err("should fail");
    assert!(matches!(err, ApiError::Transport { .. }));
}

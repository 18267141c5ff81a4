//! Integration tests for the reqwest-backed client against a local axum server.
//!
//! Tests cover:
//! - Methods, paths and JSON bodies of all four operations
//! - Non-2xx responses, undecodable bodies and unreachable backends

mod common;

use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
};
use common::*;
use employee_manager::{Config, core::HttpEmployeeApi};
use serde_json::{Value, json};

/// Method, path and body of every request the test server receives.
type Log = Arc<Mutex<Vec<(String, String, Option<Value>)>>>;

async fn list(State(log): State<Log>) -> Json<Value> {
    log.lock().unwrap().push(("GET".into(), "/employees".into(), None));
    Json(json!([
        {"employeeId": 1, "name": "Ann", "manager": "Bo", "salary": 50000},
        {"employeeId": 2, "name": "Cy", "manager": "Bo", "salary": 41000.5}
    ]))
}

async fn create(State(log): State<Log>, Json(body): Json<Value>) -> Json<Value> {
    log.lock()
        .unwrap()
        .push(("POST".into(), "/employees".into(), Some(body.clone())));
    let mut created = body;
    created["employeeId"] = json!(7);
    Json(created)
}

async fn update(
    State(log): State<Log>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Json<Value> {
    log.lock()
        .unwrap()
        .push(("PATCH".into(), format!("/employees/{id}"), Some(body.clone())));
    Json(body)
}

async fn remove(State(log): State<Log>, Path(id): Path<i64>) -> &'static str {
    log.lock()
        .unwrap()
        .push(("DELETE".into(), format!("/employees/{id}"), None));
    "Employee deleted"
}

async fn serve(router: Router) -> anyhow::Result<HttpEmployeeApi> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    let config = Config::new(&format!("http://{addr}"), None, 5)?;
    Ok(HttpEmployeeApi::new(&config)?)
}

async fn spawn_backend() -> anyhow::Result<(HttpEmployeeApi, Log)> {
    let log = Log::default();
    let router = Router::new()
        .route("/employees", get(list).post(create))
        .route("/employees/{id}", patch(update).delete(remove))
        .with_state(log.clone());
    Ok((serve(router).await?, log))
}

#[tokio::test]
async fn test_list_decodes_employees() -> anyhow::Result<()> {
    let (api, log) = spawn_backend().await?;

    let employees = api.list().await?;
    assert_eq!(employees.len(), 2);
    assert_eq!(employees[0], employee(1, "Ann", "Bo", 50000));
    assert_eq!(employees[1].salary.to_string(), "41000.5");
    assert_eq!(log.lock().unwrap().len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_create_posts_without_identifier() -> anyhow::Result<()> {
    let (api, log) = spawn_backend().await?;

    let created = api
        .create(NewEmployee {
            name: "Ann".into(),
            manager: "Bo".into(),
            salary: Salary::from(50000),
        })
        .await?;
    assert_eq!(created, employee(7, "Ann", "Bo", 50000));

    let log = log.lock().unwrap();
    let (method, path, body) = &log[0];
    assert_eq!(method, "POST");
    assert_eq!(path, "/employees");
    assert_eq!(
        body.as_ref(),
        Some(&json!({"name": "Ann", "manager": "Bo", "salary": 50000}))
    );

    Ok(())
}

#[tokio::test]
async fn test_update_patches_member_with_full_record() -> anyhow::Result<()> {
    let (api, log) = spawn_backend().await?;

    let updated = api.update(employee(1, "Ann", "Bo", 60000)).await?;
    assert_eq!(updated, employee(1, "Ann", "Bo", 60000));

    let log = log.lock().unwrap();
    let (method, path, body) = &log[0];
    assert_eq!(method, "PATCH");
    assert_eq!(path, "/employees/1");
    assert_eq!(
        body.as_ref(),
        Some(&json!({"employeeId": 1, "name": "Ann", "manager": "Bo", "salary": 60000}))
    );

    Ok(())
}

#[tokio::test]
async fn test_delete_returns_confirmation_text() -> anyhow::Result<()> {
    let (api, log) = spawn_backend().await?;

    let confirmation = api.delete(EmployeeId(3)).await?;
    assert_eq!(confirmation, "Employee deleted");
    assert_eq!(log.lock().unwrap()[0].1, "/employees/3");

    Ok(())
}

#[tokio::test]
async fn test_full_session_against_http_backend() -> anyhow::Result<()> {
    let (api, log) = spawn_backend().await?;
    let mut session = Session::default();

    drive(&mut session, &api, Event::Mounted, |_| false).await;
    assert_eq!(session.employees().len(), 2);

    session.handle(Event::EditRequested(session.employees()[0].clone()));
    session.handle(Event::FieldChanged(Field::Salary, "60000".into()));
    drive(&mut session, &api, Event::SubmitRequested, |_| false).await;

    let methods: Vec<_> = log.lock().unwrap().iter().map(|(m, _, _)| m.clone()).collect();
    assert_eq!(methods, ["GET", "PATCH", "GET"]);
    assert!(!session.draft().is_editing());
    assert_eq!(session.notices().errors().count(), 0);

    Ok(())
}

#[tokio::test]
async fn test_server_error_is_reported_with_status() -> anyhow::Result<()> {
    let router = Router::new().route(
        "/employees",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "database down") }),
    );
    let api = serve(router).await?;

    let error = api.list().await.unwrap_err();
    match &error {
        ApiError::Status { status, body, .. } => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, "database down");
        }
        other => panic!("expected a status error, got {other:?}"),
    }
    assert!(error.to_string().contains("500"));

    Ok(())
}

#[tokio::test]
async fn test_garbage_body_is_a_decode_error() -> anyhow::Result<()> {
    let router = Router::new().route("/employees", get(|| async { "not json" }));
    let api = serve(router).await?;

    let error = api.list().await.unwrap_err();
    assert!(matches!(error, ApiError::Decode { .. }));

    Ok(())
}

#[tokio::test]
async fn test_unreachable_backend_is_a_transport_error() -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let config = Config::new(&format!("http://{addr}"), None, 5)?;
    let api = HttpEmployeeApi::new(&config)?;
    let error = api.list().await.unwrap_err();
    assert!(matches!(error, ApiError::Transport { .. }));

    Ok(())
}

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use shiftdesk_core::api::{HttpApi, ShiftApi};
use shiftdesk_core::error::DeskError;
use shiftdesk_core::protocol::shifts::{AssignRequest, DecisionRequest};
use shiftdesk_core::protocol::status::{ApplicationStatus, Decision};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

type Seen = Arc<Mutex<Vec<Value>>>;

async fn spawn_server(seen: Seen) -> String {
    let seen_apply = seen.clone();
    let seen_assign = seen.clone();

    let app = Router::new()
        .route(
            "/api/staff/recommendations/",
            get(|Query(q): Query<HashMap<String, String>>| async move {
                Json(json!({
                    "results": [{
                        "job_id": 42,
                        "name": format!("{}|{}|{}", q["staff_id"], q["department"], q["limit"]),
                        "match": 101.5
                    }],
                    "recommendation_engine": "deterministic"
                }))
            }),
        )
        .route(
            "/api/staff/jobs/{job_id}/apply/",
            post(
                move |Path(job_id): Path<u64>, Json(body): Json<Value>| {
                    let seen = seen_apply.clone();
                    async move {
                        seen.lock().unwrap().push(json!({"job_id": job_id, "body": body}));
                        Json(json!({"application_id": 900, "status": "APPLIED"}))
                    }
                },
            ),
        )
        .route(
            "/api/staff/applications/{id}/withdraw/",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"error": "Cannot withdraw after acceptance."})),
                )
            }),
        )
        .route(
            "/api/hospital/applications/{id}/decision/",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
        .route(
            "/api/hospital/shifts/{job_id}/assign/",
            post(move |Json(body): Json<Value>| {
                let seen = seen_assign.clone();
                async move {
                    seen.lock().unwrap().push(body);
                    (
                        StatusCode::CONFLICT,
                        Json(json!({"message": "Shift is already full."})),
                    )
                }
            }),
        )
        .route(
            "/api/hospital/recommendations/",
            get(|Query(q): Query<HashMap<String, String>>| async move {
                if let Some(job_id) = q.get("job_id") {
                    return Json(json!({
                        "job_id": job_id.parse::<u64>().unwrap(),
                        "results": [{"staff_id": 7, "name": "Ana", "match": 88}]
                    }));
                }
                let mut keys: Vec<_> = q.keys().cloned().collect();
                keys.sort();
                Json(json!({
                    "results": [{"department": keys.join(","), "job_id": null, "results": []}]
                }))
            }),
        );

    let addr = SocketAddr::from(([127, 0, 0, 1], 0));
    let listener = TcpListener::bind(addr).await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Trailing slash on purpose.
    format!("http://127.0.0.1:{}/", port)
}

#[tokio::test]
async fn test_query_string_and_unclamped_match() {
    let api = HttpApi::new(spawn_server(Seen::default()).await);
    let resp = api.staff_recommendations(7, "ICU", 6).await.unwrap();

    assert_eq!(resp.results[0].name, "7|ICU|6");
    assert_eq!(resp.results[0].match_percent, 101.5);
    assert!(resp.baseline_results.is_none());
    assert_eq!(resp.recommendation_engine.as_deref(), Some("deterministic"));
}

#[tokio::test]
async fn test_apply_posts_staff_id() {
    let seen = Seen::default();
    let api = HttpApi::new(spawn_server(seen.clone()).await);

    let resp = api.apply(42, 7).await.unwrap();
    assert_eq!(resp.application_id, 900);
    assert_eq!(resp.status, ApplicationStatus::Applied);
    assert_eq!(
        seen.lock().unwrap()[0],
        json!({"job_id": 42, "body": {"staff_id": 7}})
    );
}

#[tokio::test]
async fn test_error_field_becomes_message() {
    let api = HttpApi::new(spawn_server(Seen::default()).await);
    let err = api.withdraw(300, 7).await.unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert_eq!(
        err.message_or("Unable to withdraw application."),
        "Cannot withdraw after acceptance."
    );
}

#[tokio::test]
async fn test_message_field_and_null_acting_user() {
    let seen = Seen::default();
    let api = HttpApi::new(spawn_server(seen.clone()).await);
    let req = AssignRequest {
        staff_id: 7,
        assigned_by_user_id: None,
    };

    let err = api.assign(42, &req).await.unwrap_err();
    assert_eq!(err.to_string(), "Shift is already full.");
    assert_eq!(
        seen.lock().unwrap()[0],
        json!({"staff_id": 7, "assigned_by_user_id": null})
    );
}

#[tokio::test]
async fn test_non_json_error_uses_status_text() {
    let api = HttpApi::new(spawn_server(Seen::default()).await);
    let req = DecisionRequest {
        status: Decision::Accepted,
        note: String::new(),
    };

    match api.decide(300, &req).await {
        Err(DeskError::Api { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "Request failed (500)");
        }
        other => panic!("expected an API error, got {:?}", other.map(|r| r.status)),
    }
}

#[tokio::test]
async fn test_department_filter_params() {
    let api = HttpApi::new(spawn_server(Seen::default()).await);

    let icu = api.department_recommendations(1, "ICU", 6).await.unwrap();
    let job = api.job_recommendations(42, 6).await.unwrap();

    assert_eq!(icu.results[0].department, "department,hospital_id,limit");
    assert_eq!(icu.results[0].job_id, None);
    assert_eq!(job.job_id, 42);
    assert_eq!(job.results[0].staff_id, 7);
}

#[tokio::test]
async fn test_connection_refused_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let api = HttpApi::new(format!("http://127.0.0.1:{}", port));
    let err = api.staff_dashboard(7).await.unwrap_err();
    assert!(matches!(err, DeskError::Transport(_)));
    assert!(err.message_or("Unable to load dashboard.").starts_with("Network error"));
}

use super::common::*;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

#[tokio::test]
async fn open_session_returns_created_snapshot() {
    let (service, _, _) = build_service();
    let router = diagnosis_router_with_service(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/diagnosis/sessions",
            json!({ "flow": "standard" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("state"), Some(&json!("intro")));
    assert!(payload.get("session_id").is_some());
    assert!(payload.get("recommendation").is_none());
}

#[tokio::test]
async fn select_route_advances_the_session() {
    let (service, _, _) = build_service();
    let router = diagnosis_router_with_service(service);

    let opened = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/diagnosis/sessions",
            json!({}),
        ))
        .await
        .expect("open executes");
    let opened = read_json_body(opened).await;
    let id = opened
        .get("session_id")
        .and_then(serde_json::Value::as_str)
        .expect("session id")
        .to_string();

    let started = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/v1/diagnosis/sessions/{id}/start"))
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("start executes");
    assert_eq!(started.status(), StatusCode::OK);

    let selected = router
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/v1/diagnosis/sessions/{id}/select"),
            json!({ "step": "industry", "option": "manufacturing" }),
        ))
        .await
        .expect("select executes");

    assert_eq!(selected.status(), StatusCode::OK);
    let payload = read_json_body(selected).await;
    assert_eq!(payload.get("state"), Some(&json!("age_select")));
    assert_eq!(payload.get("industry"), Some(&json!("제조업")));
}

#[tokio::test]
async fn unknown_session_returns_not_found() {
    let (service, _, _) = build_service();
    let router = diagnosis_router_with_service(service);

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/diagnosis/sessions/diag-nope")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn lead_route_rejects_unfinished_sessions() {
    let (service, _, _) = build_service();
    let router = diagnosis_router_with_service(service);

    let opened = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/diagnosis/sessions",
            json!({}),
        ))
        .await
        .expect("open executes");
    let opened = read_json_body(opened).await;
    let id = opened
        .get("session_id")
        .and_then(serde_json::Value::as_str)
        .expect("session id")
        .to_string();

    let response = router
        .oneshot(json_request(
            "POST",
            &format!("/api/v1/diagnosis/sessions/{id}/lead"),
            json!({ "name": "홍길동", "phone": "010-1234-5678" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn direct_lead_route_accepts_consultation_requests() {
    let (service, _, sink) = build_service();
    let router = diagnosis_router_with_service(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/leads",
            json!({
                "company": "(주)한결상사",
                "name": "성춘향",
                "phone": "010-2222-3333",
                "annual_sales": "12억"
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("delivered"), Some(&serde_json::json!(true)));
    assert_eq!(sink.submissions().len(), 1);
}

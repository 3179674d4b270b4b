mod common;

use std::sync::{Arc, Mutex};

use axum::{
    body::Body,
    http::{Request, StatusCode, header::CONTENT_TYPE},
};
use s3manager_common::ManagerError;
use s3manager_storage::{CopyConditions, MockObjectStore};
use serde_json::{Value, json};

use common::{body_bytes, body_string, send};

#[derive(Debug, Clone, PartialEq)]
struct CopyCall {
    bucket: String,
    key: String,
    source: String,
    conditions: CopyConditions,
}

fn copy_request(body: impl Into<Body>) -> Request<Body> {
    Request::post("/api/buckets/dst/objects")
        .header(CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

fn recording_store(calls: Arc<Mutex<Vec<CopyCall>>>) -> MockObjectStore {
    MockObjectStore::new().on_copy_object(move |bucket, key, source, conditions| {
        calls.lock().unwrap().push(CopyCall {
            bucket: bucket.to_string(),
            key: key.to_string(),
            source: source.to_string(),
            conditions: conditions.clone(),
        });
        Ok(())
    })
}

#[tokio::test]
async fn copy_echoes_request_with_created() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let payload = json!({
        "bucketName": "dst",
        "objectName": "copies/report.pdf",
        "sourceBucketName": "src",
        "sourceObjectName": "reports/2024/report.pdf",
    });

    let response = send(
        recording_store(Arc::clone(&calls)),
        copy_request(payload.to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
    let echoed: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(echoed, payload);

    let calls = calls.lock().unwrap();
    assert_eq!(
        *calls,
        vec![CopyCall {
            bucket: "dst".to_string(),
            key: "copies/report.pdf".to_string(),
            source: "/src/reports/2024/report.pdf".to_string(),
            conditions: CopyConditions::default(),
        }]
    );
}

#[tokio::test]
async fn copy_accepts_json_with_charset() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let request = Request::post("/api/buckets/dst/objects")
        .header(CONTENT_TYPE, "application/json; charset=utf-8")
        .body(Body::from(
            r#"{"bucketName":"a","objectName":"b","sourceBucketName":"c","sourceObjectName":"d"}"#,
        ))
        .unwrap();

    let response = send(recording_store(Arc::clone(&calls)), request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(calls.lock().unwrap()[0].source, "/c/d");
}

#[tokio::test]
async fn copy_storage_error_is_internal_server_error() {
    let errors = [
        ManagerError::Storage("copy object: NoSuchKey".to_string()),
        ManagerError::Storage("copy object: AccessDenied".to_string()),
        ManagerError::InternalError("connection reset".to_string()),
    ];

    for error in errors {
        let message = error.to_string();
        let shared = Arc::new(Mutex::new(Some(error)));
        let store = MockObjectStore::new().on_copy_object(move |_, _, _, _| {
            Err(shared.lock().unwrap().take().expect("called once"))
        });
        let payload = json!({
            "bucketName": "dst",
            "objectName": "b.txt",
            "sourceBucketName": "src",
            "sourceObjectName": "a.txt",
        });

        let response = send(store, copy_request(payload.to_string())).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_string(response).await, message);
    }
}

#[tokio::test]
async fn malformed_json_is_internal_server_error() {
    for body in ["{", "not json", r#"{"bucketName": 3}"#, ""] {
        let store = MockObjectStore::new()
            .on_copy_object(|_, _, _, _| panic!("copy must not be attempted"));

        let response = send(store, copy_request(body)).await;

        assert_eq!(
            response.status(),
            StatusCode::INTERNAL_SERVER_ERROR,
            "body {body:?}"
        );
    }
}

#[tokio::test]
async fn unsupported_content_type_is_internal_server_error() {
    let request = Request::post("/api/buckets/dst/objects")
        .header(CONTENT_TYPE, "text/plain")
        .body(Body::from("hello"))
        .unwrap();

    let response = send(MockObjectStore::new(), request).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_string(response).await.contains("unsupported content type"));
}

//! License validator tests against a loopback HTTP endpoint standing in for
//! the real validation service.

use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use prhub_services::{LicenseError, LicenseValidator};
use std::collections::HashMap;
use std::time::Duration;

/// Serve `router` on an ephemeral loopback port and return the endpoint URL.
async fn spawn_endpoint(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind loopback listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve mock validator");
    });
    format!("http://{}/lcp_validate.php", addr)
}

fn validator(endpoint: String) -> LicenseValidator {
    LicenseValidator::new(endpoint, Duration::from_secs(2)).expect("build validator")
}

#[tokio::test]
async fn valid_license_is_accepted() {
    let router = Router::new().route(
        "/lcp_validate.php",
        get(|| async { r#"{"Valid": true, "User": "someone"}"# }),
    );
    let endpoint = spawn_endpoint(router).await;

    let validation = validator(endpoint)
        .validate("1.2.3.4", "16567", "abc")
        .await
        .expect("validation call");

    assert!(validation.valid);
    assert_eq!(validation.user, "someone");
}

#[tokio::test]
async fn invalid_license_is_reported_not_errored() {
    let router = Router::new().route(
        "/lcp_validate.php",
        get(|| async { r#"{"Valid": false, "User": ""}"# }),
    );
    let endpoint = spawn_endpoint(router).await;

    let validation = validator(endpoint)
        .validate("1.2.3.4", "16567", "bogus")
        .await
        .expect("validation call");

    assert!(!validation.valid);
}

#[tokio::test]
async fn connection_parameters_are_forwarded() {
    let router = Router::new().route(
        "/lcp_validate.php",
        get(|Query(params): Query<HashMap<String, String>>| async move {
            let expected = params.get("action").map(String::as_str) == Some("server")
                && params.get("game").map(String::as_str) == Some("prbf2")
                && params.get("key").map(String::as_str) == Some("abc")
                && params.get("ip").map(String::as_str) == Some("1.2.3.4")
                && params.get("port").map(String::as_str) == Some("16567");
            if expected {
                r#"{"Valid": true, "User": "someone"}"#
            } else {
                r#"{"Valid": false, "User": ""}"#
            }
        }),
    );
    let endpoint = spawn_endpoint(router).await;

    let validation = validator(endpoint)
        .validate("1.2.3.4", "16567", "abc")
        .await
        .expect("validation call");

    assert!(validation.valid);
}

#[tokio::test]
async fn non_200_with_error_body_is_a_service_error() {
    let router = Router::new().route(
        "/lcp_validate.php",
        get(|| async {
            (
                StatusCode::FORBIDDEN,
                r#"{"ErrorCode": 12, "ErrorMsg": "license expired"}"#,
            )
        }),
    );
    let endpoint = spawn_endpoint(router).await;

    let err = validator(endpoint)
        .validate("1.2.3.4", "16567", "expired")
        .await
        .expect_err("expected service error");

    match err {
        LicenseError::Service { code, message } => {
            assert_eq!(code, 12);
            assert_eq!(message, "license expired");
        }
        other => panic!("expected Service error, got {:?}", other),
    }
}

#[tokio::test]
async fn unparseable_success_body_is_malformed() {
    let router = Router::new().route(
        "/lcp_validate.php",
        get(|| async { "<html>definitely not json</html>" }),
    );
    let endpoint = spawn_endpoint(router).await;

    let err = validator(endpoint)
        .validate("1.2.3.4", "16567", "abc")
        .await
        .expect_err("expected malformed error");

    assert!(matches!(err, LicenseError::Malformed(_)));
}

#[tokio::test]
async fn unparseable_error_body_is_malformed() {
    let router = Router::new().route(
        "/lcp_validate.php",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "oops") }),
    );
    let endpoint = spawn_endpoint(router).await;

    let err = validator(endpoint)
        .validate("1.2.3.4", "16567", "abc")
        .await
        .expect_err("expected malformed error");

    assert!(matches!(err, LicenseError::Malformed(_)));
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_error() {
    // Port 9 (discard) on loopback is not listening.
    let err = validator("http://127.0.0.1:9/lcp_validate.php".to_string())
        .validate("1.2.3.4", "16567", "abc")
        .await
        .expect_err("expected transport error");

    assert!(matches!(err, LicenseError::Transport(_)));
}

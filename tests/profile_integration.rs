//! Integration tests for the session probe.

use schedcal_core::{ACCESS_TOKEN_SLOT, ApiClient, AuthError, CredentialStore, SessionProbe};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

mod support;
use support::socket_guard::start_mock_server_or_skip;

#[tokio::test]
async fn test_unauthenticated_profile_fetch_short_circuits() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };

    // Any request reaching the server is a failure of the short-circuit.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let api = ApiClient::new(&mock_server.uri()).expect("valid mock endpoint");
    let probe = SessionProbe::new(api, CredentialStore::in_memory());

    let err = probe.fetch_profile().await.unwrap_err();
    assert!(
        matches!(err, AuthError::NotAuthenticated),
        "expected unauthenticated error, got {err:?}"
    );

    let received = mock_server
        .received_requests()
        .await
        .expect("request recording enabled");
    assert!(
        received.is_empty(),
        "no network call may be issued without a token, saw {}",
        received.len()
    );
}

#[tokio::test]
async fn test_profile_fetch_sends_bearer_token() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("GET"))
        .and(path("/profile/"))
        .and(header("authorization", "Bearer T"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "username": "student",
            "email": "student@example.edu",
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = ApiClient::new(&mock_server.uri()).expect("valid mock endpoint");
    let store = CredentialStore::in_memory();
    store.set(ACCESS_TOKEN_SLOT, "T").expect("in-memory set");
    let probe = SessionProbe::new(api, store);

    let profile = probe.fetch_profile().await.expect("profile fetch");
    assert_eq!(profile["username"], "student");
}

#[tokio::test]
async fn test_profile_rejection_is_status_failure() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("GET"))
        .and(path("/profile/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = ApiClient::new(&mock_server.uri()).expect("valid mock endpoint");
    let store = CredentialStore::in_memory();
    store.set(ACCESS_TOKEN_SLOT, "stale").expect("in-memory set");
    let probe = SessionProbe::new(api, store.clone());

    let err = probe.fetch_profile().await.unwrap_err();
    assert!(
        matches!(err, AuthError::Status { status: 401, .. }),
        "expected 401 status error, got {err:?}"
    );
    // The probe is read-only; a rejected token stays in the store.
    assert_eq!(store.get(ACCESS_TOKEN_SLOT), Some("stale".to_string()));
}

#[tokio::test]
async fn test_profile_non_json_body_is_malformed_response() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("GET"))
        .and(path("/profile/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = ApiClient::new(&mock_server.uri()).expect("valid mock endpoint");
    let store = CredentialStore::in_memory();
    store.set(ACCESS_TOKEN_SLOT, "T").expect("in-memory set");
    let probe = SessionProbe::new(api, store);

    let err = probe.fetch_profile().await.unwrap_err();
    assert!(
        matches!(err, AuthError::MalformedResponse { .. }),
        "expected malformed-response error, got {err:?}"
    );
}

//! Exercises `HttpAccountsApi` against an in-process account service.

use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use lodestar_core::{AccountPatch, SaveOutcome, SendingDomain};
use lodestar_integration::{
    AccountsApi, AccountsApiConfig, ApiError, HttpAccountsApi, OnboardingService,
};
use std::collections::HashMap;

const TOKEN: &str = "session-token";

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        == Some("Bearer session-token")
}

async fn get_account(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(serde_json::json!({
        "sendingName": "Acme",
        "slackTeamId": ["T001"],
        "mailgunAPIKey": "key-1",
        "sendingDomain": "mail.acme.io",
        "verified": true,
        "email": "ada@acme.io"
    }))
    .into_response()
}

async fn patch_account(headers: HeaderMap, Json(body): Json<serde_json::Value>) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    match body.get("mailgunAPIKey").and_then(|v| v.as_str()) {
        Some("bad") => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"message": "Bad key"})),
        )
            .into_response(),
        Some("explode") => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        _ => StatusCode::OK.into_response(),
    }
}

async fn install_url() -> &'static str {
    "https://slack.com/oauth/v2/authorize?client_id=42\n"
}

async fn domains(Query(params): Query<HashMap<String, String>>) -> Json<Vec<SendingDomain>> {
    let domains = match params.get("key").map(String::as_str) {
        Some("key-1") => vec![
            SendingDomain::new("mail.acme.io"),
            SendingDomain::new("news.acme.io"),
        ],
        _ => Vec::new(),
    };
    Json(domains)
}

async fn spawn_service() -> String {
    let app = Router::new()
        .route("/accounts", get(get_account).patch(patch_account))
        .route("/slack/install/url", get(install_url))
        .route("/settings/domains", get(domains));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{addr}")
}

async fn client() -> HttpAccountsApi {
    let base = spawn_service().await;
    HttpAccountsApi::new(AccountsApiConfig::new(base))
        .expect("client builds")
        .with_bearer(TOKEN)
}

fn patch_with_key(key: &str) -> AccountPatch {
    let mut patch = AccountPatch::default();
    patch.insert("mailgunAPIKey", key);
    patch.insert("sendingDomain", "mail.acme.io");
    patch
}

#[tokio::test]
async fn fetches_account_with_bearer() {
    let api = client().await;
    let record = api.fetch_account().await.expect("fetch");
    assert_eq!(record.sending_name.as_deref(), Some("Acme"));
    assert_eq!(record.sending_domain.as_deref(), Some("mail.acme.io"));
    assert_eq!(record.verified, Some(true));
}

#[tokio::test]
async fn missing_bearer_is_rejected() {
    let base = spawn_service().await;
    let api = HttpAccountsApi::new(AccountsApiConfig::new(base)).expect("client builds");

    let err = api.fetch_account().await.expect_err("unauthorized");
    assert!(matches!(err, ApiError::Rejected { status: 401, .. }));
}

#[tokio::test]
async fn plain_text_install_url_is_trimmed() {
    let api = client().await;
    let url = api.slack_install_url().await.expect("install url");
    assert_eq!(url, "https://slack.com/oauth/v2/authorize?client_id=42");
}

#[tokio::test]
async fn domains_are_listed_by_key() {
    let api = client().await;
    let domains = api.list_domains("key-1").await.expect("domains");
    assert_eq!(domains.len(), 2);
    assert_eq!(domains[0].name, "mail.acme.io");

    let none = api.list_domains("other").await.expect("domains");
    assert!(none.is_empty());
}

#[tokio::test]
async fn rejected_update_carries_message() {
    let api = client().await;
    let err = api
        .update_account(&patch_with_key("bad"))
        .await
        .expect_err("rejected");
    assert_eq!(err.service_message(), Some("Bad key"));
}

#[tokio::test]
async fn service_maps_update_results() {
    let service = OnboardingService::new(client().await);

    assert_eq!(
        service.save(&patch_with_key("key-1")).await,
        SaveOutcome::Saved
    );
    assert_eq!(
        service.save(&patch_with_key("bad")).await,
        SaveOutcome::Rejected {
            message: Some("Bad key".to_string())
        }
    );
    assert_eq!(
        service.save(&patch_with_key("explode")).await,
        SaveOutcome::Rejected { message: None }
    );
}

#[tokio::test]
async fn unreachable_service_is_a_rejection_without_message() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let api = HttpAccountsApi::new(AccountsApiConfig::new(format!("http://{addr}")))
        .expect("client builds");
    let service = OnboardingService::new(api);
    assert_eq!(
        service.save(&patch_with_key("key-1")).await,
        SaveOutcome::Rejected { message: None }
    );
}

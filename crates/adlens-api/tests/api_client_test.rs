#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use std::time::Duration;

use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use adlens_api::{AnalysisRequest, ApiClient, CreateUserRequest, Error, SummaryQuery, UpdateUserRequest};

// ── Helpers ─────────────────────────────────────────────────────────

fn secret(s: &str) -> SecretString {
    s.to_string().into()
}

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let client = ApiClient::new(
        &server.uri(),
        &secret("test-api-key"),
        Some(&secret("test-token")),
        Duration::from_secs(5),
    )
    .unwrap();
    (server, client)
}

// ── Header injection ────────────────────────────────────────────────

#[tokio::test]
async fn test_credential_headers_sent() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/dashboard"))
        .and(header("API_KEY", "test-api-key"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    client.metrics_summary(&SummaryQuery::default()).await.unwrap();
}

// ── Dashboard tests ─────────────────────────────────────────────────

#[tokio::test]
async fn test_metrics_summary_with_filters() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/dashboard"))
        .and(query_param("startDate", "2026-01-01"))
        .and(query_param("endDate", "2026-03-31"))
        .and(query_param("adSetName", "Spring Promo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "TotalSpend": 1250.5,
            "TotalReach": 40200.0,
            "TotalImpressions": 88000.0,
            "TotalResults": 312.0,
            "AvailableAdSets": ["Spring Promo", "Retargeting"],
            "SpendPerAdSet": {"Spring Promo": 1250.5},
            "DailyBudgetPerAdSet": {"Spring Promo": 50.0}
        })))
        .mount(&server)
        .await;

    let query = SummaryQuery {
        start_date: Some("2026-01-01".into()),
        end_date: Some("2026-03-31".into()),
        ad_set_name: Some("Spring Promo".into()),
    };
    let summary = client.metrics_summary(&query).await.unwrap();

    assert_eq!(summary.total_spend, 1250.5);
    assert_eq!(summary.available_ad_sets.len(), 2);
    assert_eq!(summary.spend_per_ad_set.get("Spring Promo"), Some(&1250.5));
}

#[tokio::test]
async fn test_monthly_series_with_year() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/dashboard/monthly"))
        .and(query_param("year", "2026"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Spend": [10.0, 20.0, 30.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            "Reach": [],
            "Impressions": [1.0],
            "Results": []
        })))
        .mount(&server)
        .await;

    let monthly = client.monthly_series(Some(2026)).await.unwrap();

    assert_eq!(monthly.spend.len(), 12);
    assert_eq!(monthly.spend[2], 30.0);
    // Raw wire data passes through unnormalized; core pads to 12.
    assert_eq!(monthly.impressions.len(), 1);
}

#[tokio::test]
async fn test_ad_set_breakdown() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/dashboard/adsets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Spend": {"A": 100.0, "B": 200.0},
            "Reach": {"A": 1000.0},
            "Impressions": {},
            "Results": {"B": 12.0},
            "CostPerResult": {"B": 16.7}
        })))
        .mount(&server)
        .await;

    let breakdown = client.ad_set_breakdown().await.unwrap();

    assert_eq!(breakdown.spend.len(), 2);
    // Ad-set key sets may differ per metric.
    assert_eq!(breakdown.reach.len(), 1);
    assert!(breakdown.impressions.is_empty());
}

#[tokio::test]
async fn test_generate_analysis_omits_blank_ad_set() {
    let (server, client) = setup().await;

    // The body must not contain an adSetName key at all.
    Mock::given(method("POST"))
        .and(path("/api/dashboard/generate-analysis"))
        .and(body_json(json!({
            "startDate": "2026-01-01",
            "endDate": "2026-01-31"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Analysis": "Spend is concentrated in one ad set.",
            "HasAnalysis": true,
            "Summary": {
                "TotalSpent": 99.0,
                "TotalReach": 1.0,
                "TotalImpressions": 2.0,
                "TotalResults": 3.0,
                "AdSetCount": 1,
                "CostPerResult": 33.0
            },
            "AvailableAdSets": ["A"],
            "StartDate": "2026-01-01",
            "EndDate": "2026-01-31",
            "SelectedAdSet": null
        })))
        .mount(&server)
        .await;

    let request = AnalysisRequest {
        start_date: "2026-01-01".into(),
        end_date: "2026-01-31".into(),
        ad_set_name: None,
    };
    let analysis = client.generate_analysis(&request).await.unwrap();

    assert!(analysis.has_analysis);
    assert_eq!(analysis.summary.ad_set_count, 1);
}

// ── User tests ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_users_bare_array() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "u1",
                "Username": "ana",
                "Email": "ana@example.com",
                "Role": "Admin",
                "IsActive": true,
                "CreatedAt": "2026-08-01T09:00:00Z",
                "LastLogin": null
            }
        ])))
        .mount(&server)
        .await;

    let users = client.list_users().await.unwrap();

    assert_eq!(users.len(), 1);
    assert_eq!(users[0].id, "u1");
    assert_eq!(users[0].username, "ana");
    assert!(users[0].is_active);
    assert!(users[0].last_login.is_none());
}

#[tokio::test]
async fn test_list_users_wrapped_envelope() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [
                {"_id": "u2", "Username": "luis", "Email": "luis@example.com"}
            ]
        })))
        .mount(&server)
        .await;

    let users = client.list_users().await.unwrap();

    assert_eq!(users.len(), 1);
    assert_eq!(users[0].id, "u2");
}

#[tokio::test]
async fn test_update_user_omits_blank_password() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/users/u1"))
        .and(body_json(json!({
            "Username": "ana",
            "Email": "ana@example.com",
            "Role": "Admin",
            "IsActive": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;

    let request = UpdateUserRequest {
        username: "ana".into(),
        email: "ana@example.com".into(),
        password: None,
        role: "Admin".into(),
        is_active: false,
    };
    client.update_user("u1", &request).await.unwrap();
}

#[tokio::test]
async fn test_create_and_delete_user() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "u9"})))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/users/u9"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let request = CreateUserRequest {
        username: "nuevo".into(),
        email: "nuevo@example.com".into(),
        password: "hunter2!".into(),
        role: "User".into(),
        is_active: true,
    };
    client.create_user(&request).await.unwrap();
    client.delete_user("u9").await.unwrap();
}

// ── Auth tests ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_login_success() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "jwt-token",
            "username": "ana"
        })))
        .mount(&server)
        .await;

    let resp = client.login("ana@example.com", &secret("pw")).await.unwrap();
    assert_eq!(resp.access_token, "jwt-token");
}

#[tokio::test]
async fn test_login_rejected() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.login("ana@example.com", &secret("wrong")).await;
    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
}

// ── Error classification ────────────────────────────────────────────

#[tokio::test]
async fn test_session_expired_on_401_with_bearer() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.metrics_summary(&SummaryQuery::default()).await;

    match result {
        Err(Error::SessionExpired) => {}
        other => panic!("expected SessionExpired, got: {other:?}"),
    }
    assert!(Error::SessionExpired.is_auth_expired());
}

#[tokio::test]
async fn test_invalid_api_key_on_401_without_bearer() {
    let server = MockServer::start().await;
    let client = ApiClient::new(
        &server.uri(),
        &secret("bad-key"),
        None,
        Duration::from_secs(5),
    )
    .unwrap();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.metrics_summary(&SummaryQuery::default()).await;
    assert!(matches!(result, Err(Error::InvalidApiKey)));
}

#[tokio::test]
async fn test_not_found_classification() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/dashboard/monthly"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let result = client.monthly_series(None).await;

    match result {
        Err(ref e) => assert!(e.is_not_found(), "expected not-found, got: {e:?}"),
        Ok(_) => panic!("expected error"),
    }
}

#[tokio::test]
async fn test_structured_api_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/dashboard"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "startDate must precede endDate",
            "code": "invalid_range"
        })))
        .mount(&server)
        .await;

    let result = client.metrics_summary(&SummaryQuery::default()).await;

    match result {
        Err(Error::Api { status, ref message, ref code }) => {
            assert_eq!(status, 422);
            assert!(message.contains("startDate"));
            assert_eq!(code.as_deref(), Some("invalid_range"));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

//! Integration tests for the HTTP collaborator client.
//!
//! Each test runs against a local `httpmock` server standing in for the rate
//! service, so no network access is needed.

use httpmock::prelude::*;
use serde_json::json;

use rate_history::error::{FetchError, HttpError};
use rate_history::http::RatesHttp;
use rate_history::prelude::*;

fn http(server: &MockServer) -> RatesHttp {
    RatesHttp::new(&server.base_url(), None).expect("client should build")
}

#[tokio::test]
async fn fetch_data_sends_period_and_parses_ack() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/fetch_data").query_param("period", "12m");
            then.status(200)
                .json_body(json!({ "message": "Data fetched and stored" }));
        })
        .await;

    let ack = http(&server).fetch_data(Period::TwelveMonths).await.unwrap();

    mock.assert_async().await;
    assert_eq!(ack.message.as_deref(), Some("Data fetched and stored"));
}

#[tokio::test]
async fn fetch_data_accepts_any_success_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/fetch_data").query_param("period", "1m");
            then.status(204);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/fetch_data").query_param("period", "3m");
            then.status(200).body("stored");
        })
        .await;
    let list = server
        .mock_async(|when, then| {
            when.method(GET).path("/exchange_rates");
            then.status(200)
                .json_body(json!([{ "date": "2024-01-01T00:00:00", "rate": 1.1 }]));
        })
        .await;

    let empty = http(&server).fetch_data(Period::OneMonth).await.unwrap();
    assert_eq!(empty, RefreshAck::default());

    let plain = http(&server).fetch_data(Period::ThreeMonths).await.unwrap();
    assert_eq!(plain.message.as_deref(), Some("stored"));

    let client = RateHistoryClient::builder()
        .base_url(&server.base_url())
        .build()
        .unwrap();
    let view = client.select_period(Period::OneMonth).await;
    list.assert_async().await;
    assert!(view.is_ready());
}

#[tokio::test]
async fn exchange_rates_parses_entries() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/exchange_rates");
            then.status(200).json_body(json!([
                { "date": "2024-01-01T00:00:00", "rate": 1.0945 },
                { "date": "2024-01-02T00:00:00", "rate": 1.0921 }
            ]));
        })
        .await;

    let entries = http(&server).exchange_rates().await.unwrap();

    mock.assert_async().await;
    assert_eq!(
        entries,
        vec![
            RateEntry::new("2024-01-01T00:00:00", 1.0945),
            RateEntry::new("2024-01-02T00:00:00", 1.0921),
        ]
    );
}

#[tokio::test]
async fn server_error_maps_to_server_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/fetch_data");
            then.status(502).body("Error fetching data from API");
        })
        .await;

    let err = http(&server).fetch_data(Period::OneMonth).await.unwrap_err();
    match err {
        HttpError::ServerError { status, body } => {
            assert_eq!(status, 502);
            assert_eq!(body, "Error fetching data from API");
        }
        other => panic!("expected ServerError, got {other:?}"),
    }
}

#[tokio::test]
async fn client_errors_are_classified() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/fetch_data");
            then.status(400).json_body(json!({ "detail": "Invalid period" }));
        })
        .await;

    let err = http(&server).fetch_data(Period::OneMonth).await.unwrap_err();
    assert!(matches!(err, HttpError::BadRequest(ref body) if body.contains("Invalid period")));

    // No mock registered for this path.
    let err = http(&server).exchange_rates().await.unwrap_err();
    assert!(matches!(err, HttpError::NotFound(_)));
}

#[tokio::test]
async fn malformed_body_is_decode_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/exchange_rates");
            then.status(200).body("<html>not json</html>");
        })
        .await;

    let err = http(&server).exchange_rates().await.unwrap_err();
    assert!(matches!(err, HttpError::Decode(_)));
}

#[tokio::test]
async fn client_end_to_end_over_http() {
    let server = MockServer::start_async().await;
    let trigger = server
        .mock_async(|when, then| {
            when.method(GET).path("/fetch_data").query_param("period", "1m");
            then.status(200).json_body(json!({ "message": "Data fetched and stored" }));
        })
        .await;
    let list = server
        .mock_async(|when, then| {
            when.method(GET).path("/exchange_rates");
            then.status(200).json_body(json!([
                { "date": "2024-01-01T00:00:00Z", "rate": 1.10 },
                { "date": "2024-01-02T00:00:00Z", "rate": 1.12 }
            ]));
        })
        .await;

    let client = RateHistoryClient::builder()
        .base_url(&format!("{}/", server.base_url()))
        .build()
        .unwrap();
    let view = client.select_period(Period::OneMonth).await;

    trigger.assert_async().await;
    list.assert_async().await;

    let rows: Vec<(String, String)> = view
        .table_rows()
        .into_iter()
        .map(|r| (r.date, r.rate))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("2024-01-01".to_string(), "1.10".to_string()),
            ("2024-01-02".to_string(), "1.12".to_string()),
        ]
    );
    let config = view.chart_config().unwrap();
    assert!((config.domain.min - 1.09).abs() < 1e-9);
    assert!((config.domain.max - 1.13).abs() < 1e-9);
    assert_eq!(config.ticks.to_string(), "every 2 days");
}

#[tokio::test]
async fn client_reports_trigger_failure() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/fetch_data");
            then.status(500).body("boom");
        })
        .await;

    let client = RateHistoryClient::builder()
        .base_url(&server.base_url())
        .build()
        .unwrap();
    let view = client.select_period(Period::SixMonths).await;

    assert!(matches!(
        view.error(),
        Some(FetchError::Trigger {
            period: Period::SixMonths,
            source: HttpError::ServerError { status: 500, .. }
        })
    ));
}

#[tokio::test]
async fn unreachable_service_fails_at_trigger() {
    // Port 9 (discard) is not expected to have an HTTP listener.
    let client = RateHistoryClient::builder()
        .base_url("http://127.0.0.1:9")
        .build()
        .unwrap();
    let view = client.select_period(Period::OneMonth).await;

    assert!(matches!(view.error(), Some(FetchError::Trigger { .. })));
}

//! Integration tests using mock HTTP server
//!
//! Tests the full flow: config → authenticated requests → paginated, typed records

use chrono::{TimeZone, Utc};
use mds_provider_client::{
    load_config_from_str, BoundingBox, ClientConfig, Endpoint, Error, ProviderClient,
    QueryParams, StatusChangesQuery, TripsQuery,
};
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ProviderClient {
    let config = ClientConfig::builder(server.uri())
        .token("test-token")
        .delay(Duration::ZERO)
        .timeout(Duration::from_secs(5))
        .build();
    ProviderClient::new(config).unwrap()
}

fn trips_page(ids: &[&str], next: Option<String>) -> ResponseTemplate {
    let trips: Vec<Value> = ids.iter().map(|id| json!({"trip_id": id})).collect();
    let mut body = json!({"version": "0.3.0", "data": {"trips": trips}});
    if let Some(next) = next {
        body["links"] = json!({"next": next});
    }
    ResponseTemplate::new(200).set_body_json(body)
}

async fn mount_page(server: &MockServer, page_path: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(response)
        .mount(server)
        .await;
}

fn trip_ids(trips: &[mds_provider_client::Trip]) -> Vec<String> {
    trips
        .iter()
        .map(|t| t.trip_id.clone().unwrap_or_default())
        .collect()
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_missing_credentials_fail_at_construction() {
    let config = ClientConfig::builder("https://mds.example.com").build();
    let err = ProviderClient::new(config).unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
}

#[test]
fn test_client_from_yaml() {
    let config = load_config_from_str(
        "url: https://mds.example.com/provider\ntoken: abc\nmax_attempts: 2\ndelay: 0\n",
    )
    .unwrap();
    let client = ProviderClient::new(config).unwrap();
    assert_eq!(client.config().max_attempts, 2);
}

// ============================================================================
// Pagination
// ============================================================================

#[tokio::test]
async fn test_follows_pages_in_order() {
    let server = MockServer::start().await;
    let uri = server.uri();

    mount_page(&server, "/trips", trips_page(&["a", "b"], Some(format!("{uri}/trips/2")))).await;
    mount_page(&server, "/trips/2", trips_page(&["c"], Some(format!("{uri}/trips/3")))).await;
    mount_page(&server, "/trips/3", trips_page(&["d", "e"], None)).await;

    let trips = client(&server).get_trips(&TripsQuery::new()).await.unwrap();

    assert_eq!(trip_ids(&trips), vec!["a", "b", "c", "d", "e"]);
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_records_are_not_deduplicated() {
    let server = MockServer::start().await;
    let uri = server.uri();

    mount_page(&server, "/trips", trips_page(&["a", "a"], Some(format!("{uri}/trips/2")))).await;
    mount_page(&server, "/trips/2", trips_page(&["a"], None)).await;

    let trips = client(&server).get_trips(&TripsQuery::new()).await.unwrap();
    assert_eq!(trip_ids(&trips), vec!["a", "a", "a"]);
}

#[tokio::test]
async fn test_empty_page_stops_pagination() {
    let server = MockServer::start().await;
    let uri = server.uri();

    mount_page(&server, "/trips", trips_page(&["a"], Some(format!("{uri}/trips/2")))).await;
    mount_page(&server, "/trips/2", trips_page(&[], Some(format!("{uri}/trips/3")))).await;
    Mock::given(method("GET"))
        .and(path("/trips/3"))
        .respond_with(trips_page(&["never"], None))
        .expect(0)
        .mount(&server)
        .await;

    let trips = client(&server).get_trips(&TripsQuery::new()).await.unwrap();
    assert_eq!(trip_ids(&trips), vec!["a"]);
}

#[tokio::test]
async fn test_missing_data_stops_pagination() {
    let server = MockServer::start().await;
    let uri = server.uri();

    mount_page(&server, "/trips", trips_page(&["a"], Some(format!("{uri}/trips/2")))).await;
    mount_page(
        &server,
        "/trips/2",
        ResponseTemplate::new(200).set_body_json(json!({"links": {"next": format!("{uri}/trips/3")}})),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/trips/3"))
        .respond_with(trips_page(&["never"], None))
        .expect(0)
        .mount(&server)
        .await;

    let trips = client(&server).get_trips(&TripsQuery::new()).await.unwrap();
    assert_eq!(trip_ids(&trips), vec!["a"]);
}

#[tokio::test]
async fn test_no_paging_returns_first_page_only() {
    let server = MockServer::start().await;
    let uri = server.uri();

    mount_page(&server, "/trips", trips_page(&["a", "b"], Some(format!("{uri}/trips/2")))).await;
    Mock::given(method("GET"))
        .and(path("/trips/2"))
        .respond_with(trips_page(&["c"], None))
        .expect(0)
        .mount(&server)
        .await;

    let trips = client(&server)
        .get_trips(&TripsQuery::new().paging(false))
        .await
        .unwrap();
    assert_eq!(trip_ids(&trips), vec!["a", "b"]);
}

#[tokio::test]
async fn test_next_request_drops_first_page_filters() {
    let server = MockServer::start().await;
    let uri = server.uri();

    Mock::given(method("GET"))
        .and(path("/status_changes"))
        .and(query_param("start_time", "1533081600"))
        .and(query_param("end_time", "1533168000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"status_changes": [{"event_type": "available"}]},
            "links": {"next": format!("{uri}/status_changes/2")}
        })))
        .expect(1)
        .mount(&server)
        .await;
    mount_page(
        &server,
        "/status_changes/2",
        ResponseTemplate::new(200).set_body_json(json!({
            "data": {"status_changes": [{"event_type": "reserved"}]}
        })),
    )
    .await;

    let query = StatusChangesQuery::new()
        .start_time(1_533_081_600_i64)
        .end_time(1_533_168_000_i64);
    let records = client(&server).get_status_changes(&query).await.unwrap();
    assert_eq!(records.len(), 2);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].url.query().is_some());
    assert!(requests[1].url.query().is_none());
}

// ============================================================================
// Retries and failures
// ============================================================================

#[tokio::test]
async fn test_two_timeouts_then_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/trips"))
        .respond_with(trips_page(&["slow"], None).set_delay(Duration::from_secs(2)))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/trips"))
        .respond_with(trips_page(&["ok"], None))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::builder(server.uri())
        .token("test-token")
        .delay(Duration::ZERO)
        .timeout(Duration::from_millis(200))
        .max_attempts(3)
        .build();
    let trips = ProviderClient::new(config)
        .unwrap()
        .get_trips(&TripsQuery::new())
        .await
        .unwrap();

    assert_eq!(trip_ids(&trips), vec!["ok"]);
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_timeouts_exhaust_max_attempts() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(trips_page(&["slow"], None).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let config = ClientConfig::builder(server.uri())
        .token("test-token")
        .delay(Duration::ZERO)
        .timeout(Duration::from_millis(200))
        .max_attempts(4)
        .build();
    let err = ProviderClient::new(config)
        .unwrap()
        .get_trips(&TripsQuery::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Timeout { attempts: 4, .. }));
    assert_eq!(server.received_requests().await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_non_200_mid_pagination_fails() {
    let server = MockServer::start().await;
    let uri = server.uri();

    mount_page(&server, "/trips", trips_page(&["a"], Some(format!("{uri}/trips/2")))).await;
    Mock::given(method("GET"))
        .and(path("/trips/2"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server)
        .get_trips(&TripsQuery::new())
        .await
        .unwrap_err();

    match err {
        Error::RequestFailed { status, url, body, .. } => {
            assert_eq!(status, 503);
            assert_eq!(url, format!("{uri}/trips/2"));
            assert_eq!(body, "maintenance");
        }
        other => panic!("Expected RequestFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_response() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/status_changes",
        ResponseTemplate::new(200).set_body_string("<html>gateway</html>"),
    )
    .await;

    let err = client(&server)
        .get_status_changes(&StatusChangesQuery::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::MalformedResponse { .. }));
}

// ============================================================================
// Auth and query encoding
// ============================================================================

#[tokio::test]
async fn test_auth_header_and_extra_headers_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/trips"))
        .and(header("Authorization", "Token abc"))
        .and(header("X-Provider-Region", "west"))
        .respond_with(trips_page(&["a"], None))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::builder(server.uri())
        .auth_type("Token")
        .token("abc")
        .header("X-Provider-Region", "west")
        .delay(Duration::ZERO)
        .build();
    let trips = ProviderClient::new(config)
        .unwrap()
        .get_trips(&TripsQuery::new())
        .await
        .unwrap();
    assert_eq!(trips.len(), 1);
}

#[tokio::test]
async fn test_datetime_and_integer_filters_match() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/trips"))
        .respond_with(trips_page(&["a"], None))
        .mount(&server)
        .await;

    let client = client(&server);
    let dt = Utc.with_ymd_and_hms(2018, 8, 1, 0, 0, 0).unwrap() + chrono::Duration::milliseconds(400);

    client
        .get_trips(&TripsQuery::new().start_time(dt))
        .await
        .unwrap();
    client
        .get_trips(&TripsQuery::new().start_time(1_533_081_600_i64))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].url.query(), Some("start_time=1533081600"));
    assert_eq!(requests[0].url.query(), requests[1].url.query());
}

#[tokio::test]
async fn test_trip_filters_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/trips"))
        .and(query_param("device_id", "dev-1"))
        .and(query_param("vehicle_id", "ABC123"))
        .and(query_param("bbox", "-122.4183,37.7758,-122.412,37.7858"))
        .and(query_param("min_trip_distance", "100"))
        .respond_with(trips_page(&["a"], None))
        .expect(1)
        .mount(&server)
        .await;

    let query = TripsQuery::new()
        .device_id("dev-1")
        .vehicle_id("ABC123")
        .bbox(BoundingBox::new(-122.4183, 37.7758, -122.412, 37.7858))
        .param("min_trip_distance", "100");

    let trips = client(&server).get_trips(&query).await.unwrap();
    assert_eq!(trips.len(), 1);
}

#[tokio::test]
async fn test_fetch_raw() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/status_changes",
        ResponseTemplate::new(200).set_body_json(json!({
            "data": {"status_changes": [{"event_type": "available", "custom": 1}]}
        })),
    )
    .await;

    let records = client(&server)
        .fetch_raw(Endpoint::StatusChanges, &QueryParams::new(), true)
        .await
        .unwrap();
    assert_eq!(records, vec![json!({"event_type": "available", "custom": 1})]);
}

#[tokio::test]
async fn test_concurrent_calls_share_client() {
    let server = MockServer::start().await;
    mount_page(&server, "/trips", trips_page(&["t"], None)).await;
    mount_page(
        &server,
        "/status_changes",
        ResponseTemplate::new(200).set_body_json(json!({
            "data": {"status_changes": [{"event_type": "available"}]}
        })),
    )
    .await;

    let client = client(&server);
    let trips_query = TripsQuery::new();
    let status_query = StatusChangesQuery::new();
    let (trips, status_changes) = tokio::join!(
        client.get_trips(&trips_query),
        client.get_status_changes(&status_query)
    );

    assert_eq!(trips.unwrap().len(), 1);
    assert_eq!(status_changes.unwrap().len(), 1);
}

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use ingest::{DistanceClient, IngestErr, RecordClient, TravelMode};

const TIMEOUT: Duration = Duration::from_secs(2);

/// One-shot HTTP stub: answers the first connection with a canned response
/// and exits. The request itself is drained but not parsed.
async fn serve_once(status: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = stream.read(&mut buf).await.unwrap();

        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len(),
        );
        stream.write_all(response.as_bytes()).await.unwrap();
    });

    format!("http://{addr}")
}

#[tokio::test]
async fn fetch_parses_collection_payload() {
    let endpoint = serve_once(
        "200 OK",
        r#"[{"Height": 10, "Width": 5, "Weight": 100, "Cost": 500}]"#,
    )
    .await;

    let client = RecordClient::new(endpoint, TIMEOUT).unwrap();
    let records = client.fetch().await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].numeric("Cost"), Some(500.0));
}

#[tokio::test]
async fn fetch_surfaces_error_status() {
    let endpoint = serve_once("500 Internal Server Error", "{}").await;

    let client = RecordClient::new(endpoint, TIMEOUT).unwrap();
    let err = client.fetch().await.unwrap_err();

    assert!(matches!(err, IngestErr::Status { code: 500 }));
}

#[tokio::test]
async fn fetch_fails_fast_on_dead_endpoint() {
    // Bind and immediately drop to get a port nothing listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = RecordClient::new(format!("http://{addr}"), TIMEOUT).unwrap();
    let err = client.fetch().await.unwrap_err();

    assert!(matches!(err, IngestErr::Http(_)));
}

#[tokio::test]
async fn resolve_returns_passthrough_report() {
    let endpoint = serve_once(
        "200 OK",
        r#"{
            "origin": "Pune",
            "destination": "Delhi",
            "mode": "driving",
            "distance": "1,447 km",
            "duration": "1 day 2 hours",
            "status": "OK"
        }"#,
    )
    .await;

    let client = DistanceClient::new(endpoint, TIMEOUT).unwrap();
    let report = client
        .resolve("Pune", "Delhi", TravelMode::Driving)
        .await
        .unwrap();

    assert_eq!(report.status, "OK");
    assert_eq!(ingest::parse_magnitude(&report.distance).unwrap(), 1447.0);
}

#[tokio::test]
async fn resolve_surfaces_missing_parameter_status() {
    let endpoint = serve_once("400 Bad Request", r#"{"error": "Please provide origin"}"#).await;

    let client = DistanceClient::new(endpoint, TIMEOUT).unwrap();
    let err = client
        .resolve("", "Delhi", TravelMode::Transit)
        .await
        .unwrap_err();

    assert!(matches!(err, IngestErr::Status { code: 400 }));
}

//! Startup and serving tests for the booking server.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect

use std::path::Path;
use studio_booking_server::config::{ServerConfig, StorageConfig};
use studio_booking_server::{BookingApp, Config};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

fn config_in(dir: &Path) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        storage: StorageConfig {
            classes_path: dir.join("classes.json"),
            bookings_path: dir.join("bookings.json"),
            audit_log_path: dir.join("api_responses.log"),
        },
        metrics_port: None,
    }
}

async fn request(address: std::net::SocketAddr, raw: &str) -> String {
    let mut stream = TcpStream::connect(address).await.expect("connect");
    stream.write_all(raw.as_bytes()).await.expect("write");
    let mut response = String::new();
    stream.read_to_string(&mut response).await.expect("read");
    response
}

fn post(path: &str, body: &str) -> String {
    format!(
        "POST {path} HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
}

#[tokio::test]
async fn test_corrupt_snapshot_refuses_to_start() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("bookings.json"), "[{").expect("write");

    let result = BookingApp::new(config_in(dir.path())).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_serves_bookings_and_persists_them() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = BookingApp::new(config_in(dir.path())).await.expect("app");

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let address = listener.local_addr().expect("address");
    let (stop, stopped) = oneshot::channel::<()>();
    let server = tokio::spawn(app.serve_on(listener, async move {
        let _ = stopped.await;
    }));

    let response = request(
        address,
        &post(
            "/classes",
            r#"{"name":"Pilates","startDate":"01-12-2024","endDate":"20-12-2024","capacity":10}"#,
        ),
    )
    .await;
    assert!(response.starts_with("HTTP/1.1 201"), "{response}");

    let response = request(
        address,
        &post(
            "/bookings",
            r#"{"memberName":"Rahul R P","date":"16-12-2024","className":"Pilates"}"#,
        ),
    )
    .await;
    assert!(response.starts_with("HTTP/1.1 201"), "{response}");
    assert!(response.contains(r#""availableSlots":9"#), "{response}");

    let response = request(
        address,
        "GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
    )
    .await;
    assert!(response.starts_with("HTTP/1.1 200"), "{response}");
    assert!(response.contains(r#""bookings":1"#), "{response}");

    stop.send(()).expect("server still running");
    server.await.expect("task").expect("clean shutdown");

    let bookings: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("bookings.json")).expect("read"),
    )
    .expect("json");
    assert_eq!(bookings[0]["memberName"], "Rahul R P");

    let audit = std::fs::read_to_string(dir.path().join("api_responses.log")).expect("read");
    assert_eq!(audit.lines().count(), 2);
    assert!(audit.lines().nth(1).unwrap().contains("] Booking successful: {"));
}

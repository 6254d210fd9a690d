// tests/e2e_http.rs
// Real sockets, real process table.
#![cfg(unix)]

use std::net::SocketAddr;
use std::sync::Arc;

use niceness_api::metrics::{spawn_metrics_server, MetricsRegistry};
use niceness_api::process::SystemInspector;
use niceness_api::server::listener::bind_tcp;
use niceness_api::server::{RequestHandler, ServerBuilder};

async fn spawn_server(handler: RequestHandler) -> SocketAddr {
    let listener = bind_tcp("127.0.0.1:0".parse().unwrap()).await.unwrap();
    let server = ServerBuilder::from_listener(listener)
        .unwrap()
        .with_handler(handler);
    let addr = server.local_addr();

    tokio::spawn(server.serve());
    addr
}

fn system_handler() -> RequestHandler {
    RequestHandler::new(Arc::new(SystemInspector))
}

#[tokio::test]
async fn bind_failure_ends_serve_with_an_error() {
    let held = bind_tcp("127.0.0.1:0".parse().unwrap()).await.unwrap();
    let addr = held.local_addr().unwrap();

    let err = ServerBuilder::new(addr)
        .with_handler(system_handler())
        .serve()
        .await
        .unwrap_err();
    assert!(
        format!("{:#}", err).contains(&format!("Failed to bind {}", addr)),
        "{err:#}"
    );
}

#[tokio::test]
async fn serves_liveness_over_http() {
    let addr = spawn_server(system_handler()).await;

    let response = reqwest::get(format!("http://{}/", addr)).await.unwrap();
    assert_eq!(response.status(), 200);

    let json: serde_json::Value = response.json().await.unwrap();
    assert_eq!(json["status"], "OK");
    assert!(json["timestamp"].is_i64());
}

#[tokio::test]
async fn reports_server_niceness() {
    let addr = spawn_server(system_handler()).await;

    let response = reqwest::get(format!("http://{}/nice", addr)).await.unwrap();
    assert_eq!(response.status(), 200);

    let json: serde_json::Value = response.json().await.unwrap();
    assert_eq!(json["PID"].as_i64(), Some(i64::from(std::process::id())));
    let nice = json["Nice"].as_i64().unwrap();
    assert!((-20..=19).contains(&nice));

    let by_id = reqwest::get(format!("http://{}/nice/{}", addr, std::process::id()))
        .await
        .unwrap()
        .json::<serde_json::Value>()
        .await
        .unwrap();
    assert_eq!(by_id, json);
}

#[tokio::test]
async fn missing_process_is_a_bad_gateway() {
    let addr = spawn_server(system_handler()).await;

    for pid in ["-1", "2147483647"] {
        let response = reqwest::get(format!("http://{}/nice/{}", addr, pid))
            .await
            .unwrap();
        assert_eq!(response.status(), 502, "pid {pid}");
        let body = response.text().await.unwrap();
        assert!(body.contains("No such process"), "pid {pid}: {body}");
    }
}

#[tokio::test]
async fn bad_identifier_is_a_bad_gateway() {
    let addr = spawn_server(system_handler()).await;

    let response = reqwest::get(format!("http://{}/nice/abc", addr)).await.unwrap();
    assert_eq!(response.status(), 502);
    assert_eq!(
        response.text().await.unwrap(),
        "parsing \"abc\": invalid digit found in string\n"
    );
}

#[tokio::test]
async fn exposes_metrics_on_a_separate_listener() {
    let registry = MetricsRegistry::new().unwrap();
    let addr = spawn_server(system_handler().with_metrics(registry.collector())).await;
    let metrics_addr = spawn_metrics_server("127.0.0.1:0".parse().unwrap(), registry)
        .await
        .unwrap();

    reqwest::get(format!("http://{}/nice", addr)).await.unwrap();

    let text = reqwest::get(format!("http://{}/metrics", metrics_addr))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(text.contains(r#"niceness_api_requests_total{route="nice_self",status_code="200"} 1"#));

    let missing = reqwest::get(format!("http://{}/other", metrics_addr))
        .await
        .unwrap();
    assert_eq!(missing.status(), 404);
}

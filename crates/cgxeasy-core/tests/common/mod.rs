// Shared wiremock fixtures for session integration tests.
#![allow(dead_code, clippy::unwrap_used)]

use secrecy::SecretString;
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use cgxeasy_core::{ControllerConfig, Session};

pub const TENANT: &str = "t1";

pub fn config(server: &MockServer) -> ControllerConfig {
    ControllerConfig::new(
        Url::parse(&server.uri()).unwrap(),
        SecretString::from("test-token".to_string()),
    )
}

/// Start a mock controller and return a session connected to it.
pub async fn connected() -> (MockServer, Session) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2.1/api/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "tenant_id": TENANT })))
        .mount(&server)
        .await;

    let session = Session::new(config(&server));
    session.connect().await.unwrap();
    (server, session)
}

pub fn tenant_path(version: &str, suffix: &str) -> String {
    format!("/{version}/api/tenants/{TENANT}/{suffix}")
}

pub fn items(items: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "items": items }))
}

/// Respond to a write with the object that was sent.
pub fn echo(req: &Request) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_bytes(req.body.clone())
}

pub async fn mount_sites(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(tenant_path("v4.7", "sites")))
        .respond_with(items(json!([
            { "id": "s1", "name": "CA-1025" },
            { "id": "s2", "name": "NY-0001" }
        ])))
        .mount(server)
        .await;
}

pub async fn mount_elements(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(tenant_path("v3.0", "elements")))
        .respond_with(items(json!([
            { "id": "e1", "name": "ion-ca-1", "site_id": "s1" },
            { "id": "e2", "name": "ion-ny-1", "site_id": "s2" },
            { "id": "e3", "name": "ion-spare", "site_id": "1" }
        ])))
        .mount(server)
        .await;
}

pub fn interfaces_path() -> String {
    tenant_path("v4.15", "sites/s1/elements/e1/interfaces")
}

pub async fn mount_interfaces(server: &MockServer, interfaces: Value) {
    Mock::given(method("GET"))
        .and(path(interfaces_path()))
        .respond_with(items(interfaces))
        .mount(server)
        .await;
}

/// JSON bodies of every request with this method and path.
pub async fn bodies(server: &MockServer, verb: &str, request_path: &str) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.method.as_str() == verb && r.url.path() == request_path)
        .map(|r| r.body_json::<Value>().unwrap())
        .collect()
}

pub async fn count(server: &MockServer, verb: &str, request_path: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.method.as_str() == verb && r.url.path() == request_path)
        .count()
}

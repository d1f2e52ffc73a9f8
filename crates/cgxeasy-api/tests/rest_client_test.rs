#![allow(clippy::unwrap_used)]
// Integration tests for `CgxClient` using wiremock.

use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cgxeasy_api::models::{AnynetLink, DhcpRelay, Interface};
use cgxeasy_api::{CgxClient, Error, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, CgxClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = CgxClient::with_client(reqwest::Client::new(), base_url).with_tenant("t1");
    (server, client)
}

fn tenant_path(version: &str, suffix: &str) -> String {
    format!("/{version}/api/tenants/t1/{suffix}")
}

// ── Authentication tests ────────────────────────────────────────────

#[tokio::test]
async fn test_token_login_resolves_tenant() {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let token: SecretString = "tok-123".to_string().into();
    let client = CgxClient::from_token(base_url, &token, &TransportConfig::default()).unwrap();

    Mock::given(method("GET"))
        .and(path("/v2.1/api/profile"))
        .and(header("X-Auth-Token", "tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tenant_id": "t-42",
            "email": "ops@example.com",
            "roles": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    assert!(client.tenant_id().is_none());
    let profile = client.login_with_token().await.unwrap();
    assert_eq!(profile.tenant_id, "t-42");
    assert_eq!(client.tenant_id().as_deref(), Some("t-42"));
}

#[tokio::test]
async fn test_token_login_rejected() {
    let server = MockServer::start().await;
    let client = CgxClient::with_client(reqwest::Client::new(), Url::parse(&server.uri()).unwrap());

    Mock::given(method("GET"))
        .and(path("/v2.1/api/profile"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.login_with_token().await;
    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
    assert!(client.tenant_id().is_none());
}

#[tokio::test]
async fn test_tenant_call_without_session() {
    let server = MockServer::start().await;
    let client = CgxClient::with_client(reqwest::Client::new(), Url::parse(&server.uri()).unwrap());

    let result = client.list_sites().await;
    assert!(matches!(result, Err(Error::SessionNotEstablished)));
}

// ── Collection tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_list_sites_unwraps_items() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(tenant_path("v4.7", "sites")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "items": [
                { "id": "s1", "name": "Branch-1", "admin_state": "active" },
                { "id": "s2", "name": "DC-East", "element_cluster_role": "HUB" }
            ]
        })))
        .mount(&server)
        .await;

    let sites = client.list_sites().await.unwrap();
    assert_eq!(sites.len(), 2);
    assert_eq!(sites[1].name, "DC-East");
    assert_eq!(sites[1].element_cluster_role.as_deref(), Some("HUB"));
}

#[tokio::test]
async fn test_null_items_is_empty() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(tenant_path("v2.1", "sites/s1/dhcpservers")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": null })))
        .mount(&server)
        .await;

    let pools = client.list_dhcp_servers("s1").await.unwrap();
    assert!(pools.is_empty());
}

#[tokio::test]
async fn test_list_interfaces_path() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(tenant_path("v4.15", "sites/s1/elements/e1/interfaces")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{
                "id": "if-1",
                "name": "1",
                "type": "port",
                "dhcp_relay": { "enabled": true, "server_ips": ["10.0.0.5"] }
            }]
        })))
        .mount(&server)
        .await;

    let ifaces = client.list_interfaces("s1", "e1").await.unwrap();
    assert_eq!(ifaces[0].name(), "1");
    let relay = ifaces[0].dhcp_relay.as_ref().unwrap();
    assert_eq!(relay.server_ips.as_deref(), Some(&["10.0.0.5".to_string()][..]));
}

// ── Write tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_update_interface_sends_null_lists() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path(tenant_path("v4.15", "sites/s1/elements/e1/interfaces/if-1")))
        .and(body_partial_json(json!({ "tags": null, "mtu": 1500 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "if-1", "name": "1", "tags": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut iface: Interface = serde_json::from_value(json!({
        "id": "if-1", "name": "1", "tags": ["a"], "mtu": 1500
    }))
    .unwrap();
    iface.tags = None;
    iface.dhcp_relay = Some(DhcpRelay::default());

    client
        .update_interface("s1", "e1", "if-1", &iface)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_tolerates_empty_body() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path(tenant_path("v2.1", "sites/s1/dhcpservers/pool-1")))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client.delete_dhcp_server("s1", "pool-1").await.unwrap();
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_error_envelope_decoded() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(tenant_path("v4.0", "anynetlinks")))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "_error": [{ "code": "ANYNETLINK_EXISTS", "message": "Link already exists" }]
        })))
        .mount(&server)
        .await;

    let link = AnynetLink {
        ep1_site_id: "s1".into(),
        ep1_wan_if_id: "w1".into(),
        ep2_site_id: "s2".into(),
        ep2_wan_if_id: "w2".into(),
        admin_up: true,
        forced: true,
        ..Default::default()
    };
    let err = client.create_anynet_link(&link).await.unwrap_err();
    assert_eq!(err.api_error_code(), Some("ANYNETLINK_EXISTS"));
    assert!(err.is_duplicate_link());
}

#[tokio::test]
async fn test_error_envelope_with_ok_status() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(tenant_path("v2.0", "securityzones")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_error": [{ "code": "PERMISSION_DENIED" }]
        })))
        .mount(&server)
        .await;

    let err = client.list_security_zones().await.unwrap_err();
    match err {
        Error::Api { status, message, .. } => {
            assert_eq!(status, 200);
            assert_eq!(message, "PERMISSION_DENIED");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_without_envelope_keeps_status() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(tenant_path("v3.0", "elements")))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = client.list_elements().await.unwrap_err();
    assert!(
        matches!(err, Error::Api { status: 503, code: None, .. }),
        "expected HTTP 503 Api error, got: {err:?}"
    );
}

#[tokio::test]
async fn test_create_global_prefix_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(tenant_path("v2.1", "networkpolicyglobalprefixes")))
        .and(body_partial_json(json!({
            "name": "corp",
            "ipv4_prefixes": ["10.0.0.0/8"],
            "ipv6_prefixes": null
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "gp-1",
            "name": "corp",
            "ipv4_prefixes": ["10.0.0.0/8"],
            "ipv6_prefixes": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = client
        .create_global_prefix(&cgxeasy_api::models::GlobalPrefix {
            name: "corp".into(),
            ipv4_prefixes: Some(vec!["10.0.0.0/8".into()]),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(created.id.as_deref(), Some("gp-1"));
}

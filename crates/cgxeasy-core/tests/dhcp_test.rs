#![allow(clippy::unwrap_used)]
// DHCP pool and custom option reconciliation.

mod common;

use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cgxeasy_core::{Change, DhcpOptionSpec, ErrorKind, Session};

use common::{bodies, connected, echo, items, mount_sites, tenant_path};

fn pools_path() -> String {
    tenant_path("v2.1", "sites/s1/dhcpservers")
}

async fn with_pools(pools: Value) -> (MockServer, Session) {
    let (server, session) = connected().await;
    mount_sites(&server).await;
    Mock::given(method("GET"))
        .and(path(pools_path()))
        .respond_with(items(pools))
        .mount(&server)
        .await;
    (server, session)
}

fn tftp() -> DhcpOptionSpec {
    DhcpOptionSpec {
        name: "tftp-server".into(),
        definition: "option tftp-server code 150 = ip-address;".into(),
        value: "10.1.1.10".into(),
        vendor_class: None,
    }
}

// ── Pool delete ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_pool_delete_unknown_subnet() {
    let (server, session) =
        with_pools(json!([{ "id": "p1", "subnet": "10.10.0.0/24" }])).await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = session.dhcp_pool_delete("CA-1025", "192.168.0.0/24").await;
    assert_eq!(result.as_pair(), (false, "DHCP subnet not found"));
    assert_eq!(result.error, Some(ErrorKind::NotFound));
}

#[tokio::test]
async fn test_pool_delete_unknown_site() {
    let (server, session) = connected().await;
    mount_sites(&server).await;
    Mock::given(method("GET"))
        .and(path(pools_path()))
        .respond_with(items(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let result = session.dhcp_pool_delete("TX-9999", "192.168.0.0/24").await;
    assert_eq!(result.as_pair(), (false, "Site not found"));
}

#[tokio::test]
async fn test_pool_delete_matching_subnet() {
    let (server, session) = with_pools(json!([
        { "id": "p1", "subnet": "10.10.0.0/24" },
        { "id": "p2", "subnet": "192.168.0.0/24" }
    ]))
    .await;
    Mock::given(method("DELETE"))
        .and(path(tenant_path("v2.1", "sites/s1/dhcpservers/p2")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "p2" })))
        .expect(1)
        .mount(&server)
        .await;

    let result = session.dhcp_pool_delete("CA-1025", "192.168.0.0/24").await;
    assert!(result.success, "{}", result.message);
    assert_eq!(result.change, Some(Change::Deleted));
}

// ── Custom options ──────────────────────────────────────────────────

#[tokio::test]
async fn test_option_add_initialises_null_list() {
    let (server, session) = with_pools(json!([{
        "id": "p1",
        "subnet": "10.10.0.0/24",
        "custom_options": null,
        "gateway": "10.10.0.1"
    }]))
    .await;
    Mock::given(method("PUT"))
        .and(path(tenant_path("v2.1", "sites/s1/dhcpservers/p1")))
        .respond_with(echo)
        .expect(1)
        .mount(&server)
        .await;

    let result = session.dhcp_option_add("CA-1025", "10.10.0.0/24", &tftp()).await;
    assert!(result.success, "{}", result.message);

    let sent = bodies(&server, "PUT", &tenant_path("v2.1", "sites/s1/dhcpservers/p1")).await;
    assert_eq!(sent[0]["gateway"], "10.10.0.1");
    assert_eq!(
        sent[0]["custom_options"],
        json!([{
            "option_definition": "option tftp-server code 150 = ip-address;",
            "option_value": "10.1.1.10",
            "vendor_class_identifier": null
        }])
    );
}

#[tokio::test]
async fn test_option_add_existing_is_rejected() {
    let (server, session) = with_pools(json!([{
        "id": "p1",
        "subnet": "10.10.0.0/24",
        "custom_options": [{
            "option_definition": "option tftp-server code 150 = ip-address;",
            "option_value": "10.9.9.9",
            "vendor_class_identifier": null
        }]
    }]))
    .await;
    Mock::given(method("PUT"))
        .respond_with(echo)
        .expect(0)
        .mount(&server)
        .await;

    let result = session.dhcp_option_add("CA-1025", "10.10.0.0/24", &tftp()).await;
    assert!(!result.success);
    assert_eq!(result.error, Some(ErrorKind::AlreadyExists));
}

#[tokio::test]
async fn test_option_add_other_vendor_class_is_allowed() {
    let (server, session) = with_pools(json!([{
        "id": "p1",
        "subnet": "10.10.0.0/24",
        "custom_options": [{
            "option_definition": "option tftp-server code 150 = ip-address;",
            "option_value": "10.9.9.9",
            "vendor_class_identifier": "Cisco AP c2700"
        }]
    }]))
    .await;
    Mock::given(method("PUT"))
        .respond_with(echo)
        .expect(1)
        .mount(&server)
        .await;

    let result = session.dhcp_option_add("CA-1025", "10.10.0.0/24", &tftp()).await;
    assert!(result.success, "{}", result.message);
}

#[tokio::test]
async fn test_option_add_rejects_mismatched_definition() {
    let (_server, session) = connected().await;
    let mut spec = tftp();
    spec.name = "ntp-servers".into();

    let result = session.dhcp_option_add("CA-1025", "10.10.0.0/24", &spec).await;
    assert_eq!(result.error, Some(ErrorKind::Validation));
}

#[tokio::test]
async fn test_option_remove_absent_makes_no_write() {
    let (server, session) = with_pools(json!([{
        "id": "p1",
        "subnet": "10.10.0.0/24",
        "custom_options": null
    }]))
    .await;
    Mock::given(method("PUT"))
        .respond_with(echo)
        .expect(0)
        .mount(&server)
        .await;

    let result = session
        .dhcp_option_remove("CA-1025", "10.10.0.0/24", "tftp-server", None)
        .await;
    assert_eq!(result.as_pair(), (false, "DHCP option not found"));
}

#[tokio::test]
async fn test_option_remove_last_writes_null() {
    let (server, session) = with_pools(json!([{
        "id": "p1",
        "subnet": "10.10.0.0/24",
        "custom_options": [
            { "option_definition": "option tftp-server code 150 = ip-address;", "option_value": "10.1.1.10" },
            { "option_definition": "option tftp-server code 150 = ip-address;", "option_value": "10.1.1.11",
              "vendor_class_identifier": "Cisco AP c2700" }
        ]
    }]))
    .await;
    Mock::given(method("PUT"))
        .respond_with(echo)
        .expect(1)
        .mount(&server)
        .await;

    let result = session
        .dhcp_option_remove("CA-1025", "10.10.0.0/24", "tftp-server", None)
        .await;
    assert!(result.success, "{}", result.message);

    let sent = bodies(&server, "PUT", &tenant_path("v2.1", "sites/s1/dhcpservers/p1")).await;
    assert_eq!(sent[0]["custom_options"], Value::Null);
}

#[tokio::test]
async fn test_option_remove_by_vendor_class_keeps_others() {
    let (server, session) = with_pools(json!([{
        "id": "p1",
        "subnet": "10.10.0.0/24",
        "custom_options": [
            { "option_definition": "option tftp-server code 150 = ip-address;", "option_value": "10.1.1.10" },
            { "option_definition": "option tftp-server code 150 = ip-address;", "option_value": "10.1.1.11",
              "vendor_class_identifier": "Cisco AP c2700" }
        ]
    }]))
    .await;
    Mock::given(method("PUT"))
        .respond_with(echo)
        .expect(1)
        .mount(&server)
        .await;

    let result = session
        .dhcp_option_remove("CA-1025", "10.10.0.0/24", "tftp-server", Some("Cisco AP c2700"))
        .await;
    assert!(result.success, "{}", result.message);

    let sent = bodies(&server, "PUT", &tenant_path("v2.1", "sites/s1/dhcpservers/p1")).await;
    let remaining = sent[0]["custom_options"].as_array().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0]["option_value"], "10.1.1.10");
}

#![allow(clippy::unwrap_used)]
// Resource and interface cache behaviour against a mock controller.

mod common;

use regex::Regex;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cgxeasy_core::{CollectionKey, CoreError, Session};

use common::{connected, count, interfaces_path, items, mount_elements, mount_interfaces, tenant_path};

#[tokio::test]
async fn test_lookup_before_connect_is_not_initialized() {
    let server = MockServer::start().await;
    let session = Session::new(common::config(&server));

    let result = session.resolve(CollectionKey::Name2Site, "CA-1025").await;
    assert!(
        matches!(result, Err(CoreError::NotInitialized)),
        "expected NotInitialized, got: {result:?}"
    );
    assert!(!session.is_connected().await);
}

#[tokio::test]
async fn test_connect_with_rejected_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2.1/api/profile"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let session = Session::new(common::config(&server));
    let result = session.connect().await;
    assert!(matches!(result, Err(CoreError::AuthenticationFailed { .. })));
    assert!(!session.is_connected().await);
}

#[tokio::test]
async fn test_site_table_built_once() {
    let (server, session) = connected().await;
    Mock::given(method("GET"))
        .and(path(tenant_path("v4.7", "sites")))
        .respond_with(items(json!([
            { "id": "s1", "name": "CA-1025" },
            { "id": "s2", "name": "NY-0001" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let first = session.resolve(CollectionKey::Name2Site, "CA-1025").await.unwrap();
    let second = session.resolve(CollectionKey::Name2Site, "CA-1025").await.unwrap();
    assert_eq!(first.id(), "s1");
    assert_eq!(second.id(), "s1");

    // The id table came from the same listing.
    let by_id = session.resolve(CollectionKey::Id2Site, "s2").await.unwrap();
    assert_eq!(by_id.name(), "NY-0001");
}

#[tokio::test]
async fn test_unknown_site_is_not_found() {
    let (server, session) = connected().await;
    common::mount_sites(&server).await;

    let err = session.site("TX-9999").await.unwrap_err();
    assert_eq!(err.to_string(), "Site not found");
}

#[tokio::test]
async fn test_empty_site_listing_is_refetched() {
    let (server, session) = connected().await;
    Mock::given(method("GET"))
        .and(path(tenant_path("v4.7", "sites")))
        .respond_with(items(json!([])))
        .expect(2)
        .mount(&server)
        .await;

    assert!(session.site("CA-1025").await.is_err());
    assert!(session.site("CA-1025").await.is_err());
}

#[tokio::test]
async fn test_element_pattern_lookup() {
    let (server, session) = connected().await;
    mount_elements(&server).await;

    let pattern = Regex::new("^ion-(ca|ny)-").unwrap();
    let found = session
        .resolve_by_pattern(CollectionKey::Name2Element, &pattern)
        .await
        .unwrap();
    let names: Vec<_> = found.iter().map(|e| e.name().to_owned()).collect();
    assert_eq!(names, vec!["ion-ca-1", "ion-ny-1"]);
}

#[tokio::test]
async fn test_interface_cache_reuses_listing_until_invalidated() {
    let (server, session) = connected().await;
    mount_elements(&server).await;
    mount_interfaces(&server, json!([{ "id": "if-1", "name": "1", "tags": ["uplink"] }])).await;

    // Two no-op tag adds read the interface list once.
    assert!(session.interface_tag_add("ion-ca-1", "1", "uplink").await.success);
    assert!(session.interface_tag_add("ion-ca-1", "1", "uplink").await.success);
    assert_eq!(count(&server, "GET", &interfaces_path()).await, 1);

    session.interfaces().invalidate("s1", "e1").await;
    assert!(session.interface_tag_add("ion-ca-1", "1", "uplink").await.success);
    assert_eq!(count(&server, "GET", &interfaces_path()).await, 2);
}

#[tokio::test]
async fn test_sessions_do_not_share_caches() {
    let (server, session) = connected().await;
    Mock::given(method("GET"))
        .and(path(tenant_path("v4.7", "sites")))
        .respond_with(items(json!([{ "id": "s1", "name": "CA-1025" }])))
        .expect(2)
        .mount(&server)
        .await;

    let other = Session::new(common::config(&server));
    other.connect().await.unwrap();

    session.site("CA-1025").await.unwrap();
    other.site("CA-1025").await.unwrap();
}

#[tokio::test]
async fn test_unnamed_element_does_not_break_lookups() {
    let (server, session) = connected().await;
    Mock::given(method("GET"))
        .and(path(tenant_path("v3.0", "elements")))
        .respond_with(items(json!([
            { "id": "e1", "name": "ion-ca-1", "site_id": "s1" },
            { "id": "e9", "name": null, "site_id": null }
        ])))
        .mount(&server)
        .await;
    mount_interfaces(&server, json!([{ "id": "if-1", "name": "1", "tags": ["uplink"] }])).await;

    let result = session.interface_tag_add("ion-ca-1", "1", "uplink").await;
    assert!(result.success, "{}", result.message);

    let err = session.resolve(CollectionKey::Name2Element, "").await.unwrap_err();
    assert_eq!(err.to_string(), "Element not found");
}

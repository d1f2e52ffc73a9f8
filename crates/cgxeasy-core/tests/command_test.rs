#![allow(clippy::unwrap_used)]
// Command fan-out over element targets.

mod common;

use std::io::Write;

use regex::Regex;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer};

use cgxeasy_core::{Command, CoreError, ElementTarget, ErrorKind, Session};

use common::{connected, echo, items, mount_elements, tenant_path};

async fn with_two_elements() -> (MockServer, Session) {
    let (server, session) = connected().await;
    mount_elements(&server).await;
    for (site, element) in [("s1", "e1"), ("s2", "e2")] {
        Mock::given(method("GET"))
            .and(path(tenant_path(
                "v4.15",
                &format!("sites/{site}/elements/{element}/interfaces"),
            )))
            .respond_with(items(json!([{ "id": format!("{element}-if-1"), "name": "1" }])))
            .mount(&server)
            .await;
    }
    Mock::given(method("PUT"))
        .respond_with(echo)
        .mount(&server)
        .await;
    (server, session)
}

fn tag(target: ElementTarget) -> Command {
    Command::TagAdd {
        target,
        interface: "1".into(),
        tag: "managed".into(),
    }
}

#[tokio::test]
async fn test_file_target_isolates_failures() {
    let (_server, session) = with_two_elements().await;
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "ion-ca-1\nion-gone\n\nion-ny-1").unwrap();

    let report = session
        .execute(tag(ElementTarget::File(file.path().to_path_buf())))
        .await
        .unwrap();

    assert_eq!(report.len(), 3);
    assert_eq!(report.succeeded(), 2);
    let failed = report.iter().find(|r| !r.success).unwrap();
    assert_eq!(failed.target, "ion-gone/1");
    assert_eq!(failed.message, "Element not found");
}

#[tokio::test]
async fn test_missing_target_file_is_an_error() {
    let (_server, session) = connected().await;
    let dir = tempfile::tempdir().unwrap();

    let err = session
        .execute(tag(ElementTarget::File(dir.path().join("elements.txt"))))
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::TargetFile { .. }));
}

#[tokio::test]
async fn test_pattern_target() {
    let (_server, session) = with_two_elements().await;
    let report = session
        .execute(tag(ElementTarget::Pattern(Regex::new("-1$").unwrap())))
        .await
        .unwrap();

    let targets: Vec<_> = report.iter().map(|r| r.target.as_str()).collect();
    assert_eq!(targets, vec!["ion-ca-1/1", "ion-ny-1/1"]);
    assert!(report.all_succeeded());
}

#[tokio::test]
async fn test_site_command_yields_single_result() {
    let (server, session) = connected().await;
    common::mount_sites(&server).await;

    let report = session
        .execute(Command::DhcpPoolDelete {
            site: "TX-9999".into(),
            subnet: "10.0.0.0/24".into(),
        })
        .await
        .unwrap();
    assert_eq!(report.len(), 1);
    assert_eq!(report.results[0].error, Some(ErrorKind::NotFound));
    assert_eq!(report.results[0].operation, "dhcp_pool_delete");
}

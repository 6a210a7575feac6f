#![allow(clippy::unwrap_used)]
// End-to-end scanner behaviour against a wiremock router.

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use linkscan_core::{
    CoreError, DeviceScanner, LinksysScanner, MacAddress, RefreshOutcome, ScannerConfig,
};

const LOGIN_OK: &str = r#"<html><script>document.location.href="index.asp;session_id=c0ffee42";</script></html>"#;
const LOGIN_DENIED: &str = "<html><script>alert('Incorrect user name or password.');</script></html>";
const CLIENTS_TWO: &str = "<table><tr><td>AA:BB:CC:DD:EE:FF</td></tr><tr><td>aa:11:22:33:44:55</td></tr></table>";
const CLIENTS_NONE: &str = "<table><tr><th>MAC Address</th></tr></table>";
const CLIENT_LIST_PATH: &str = "/WL_ClientList.asp;session_id=c0ffee42";

// ── Helpers ─────────────────────────────────────────────────────────

fn config_for(server: &MockServer) -> ScannerConfig {
    ScannerConfig::new(
        server.address().to_string(),
        "admin",
        SecretString::from("password1".to_owned()),
    )
}

async fn mount_login(server: &MockServer, body: &str) {
    Mock::given(method("POST"))
        .and(path("/login.cgi"))
        .and(body_string_contains("http_passwd=dfa00531ea3520bf6143839edbcb4501"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

async fn mount_clients_once(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path(CLIENT_LIST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .up_to_n_times(1)
        .mount(server)
        .await;
}

async fn mount_clients(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path(CLIENT_LIST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

fn macs(list: &[&str]) -> Vec<MacAddress> {
    list.iter().copied().map(MacAddress::from).collect()
}

// ── Construction ────────────────────────────────────────────────────

#[tokio::test]
async fn test_connect_performs_first_scan() {
    let server = MockServer::start().await;
    mount_login(&server, LOGIN_OK).await;
    mount_clients(&server, CLIENTS_TWO).await;

    let scanner = LinksysScanner::connect(config_for(&server)).await.unwrap();

    let cached = scanner.cached_result().unwrap();
    assert!(cached.success);
    assert_eq!(cached.outcome, RefreshOutcome::Updated { count: 2 });
    assert_eq!(
        scanner.last_results(),
        macs(&["AA:BB:CC:DD:EE:FF", "aa:11:22:33:44:55"])
    );
}

#[tokio::test]
async fn test_connect_unreachable_fails() {
    let host = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().to_string()
    };
    let config = ScannerConfig::new(host, "admin", SecretString::from("admin".to_owned()));

    let result = LinksysScanner::connect(config).await;

    match result {
        Err(ref e @ CoreError::ConnectionFailed { .. }) => assert!(e.is_unreachable()),
        other => panic!("expected ConnectionFailed, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_connect_timeout_is_reported_as_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login.cgi"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(LOGIN_OK)
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let config = config_for(&server).with_timeout(Duration::from_millis(300));
    let result = LinksysScanner::connect(config).await;

    match result {
        Err(ref e @ CoreError::Timeout) => assert!(e.is_unreachable()),
        other => panic!("expected Timeout, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_connect_rejects_invalid_config() {
    let config = ScannerConfig::new(
        "http://192.168.1.1",
        "admin",
        SecretString::from("admin".to_owned()),
    );

    let result = LinksysScanner::connect(config).await;

    assert!(matches!(result, Err(CoreError::Config { .. })));
}

#[tokio::test]
async fn test_connect_with_denied_login_still_builds_scanner() {
    let server = MockServer::start().await;
    mount_login(&server, LOGIN_DENIED).await;
    Mock::given(method("GET"))
        .and(path("/WL_ClientList.asp;session_id="))
        .respond_with(ResponseTemplate::new(200).set_body_string(LOGIN_DENIED))
        .expect(1)
        .mount(&server)
        .await;

    let scanner = LinksysScanner::connect(config_for(&server)).await.unwrap();

    assert!(scanner.cached_result().is_none());
    assert!(scanner.last_results().is_empty());
    assert_eq!(
        scanner.last_outcome().as_deref(),
        Some(&RefreshOutcome::SessionNotGranted)
    );
}

// ── Refresh ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_empty_refresh_keeps_previous_results() {
    let server = MockServer::start().await;
    mount_login(&server, LOGIN_OK).await;
    mount_clients_once(&server, CLIENTS_TWO).await;
    mount_clients(&server, CLIENTS_NONE).await;

    let scanner = LinksysScanner::connect(config_for(&server)).await.unwrap();
    let first = scanner.cached_result().unwrap();

    let second = scanner.refresh().await;
    assert!(!second.success);
    assert_eq!(second.outcome, RefreshOutcome::NoClients);
    assert!(second.mac_addresses.is_empty());

    let expected = macs(&["AA:BB:CC:DD:EE:FF", "aa:11:22:33:44:55"]);
    assert_eq!(scanner.scan_devices().await, expected);
    assert!(Arc::ptr_eq(&first, &scanner.cached_result().unwrap()));
}

#[tokio::test]
async fn test_successful_refresh_replaces_results() {
    let server = MockServer::start().await;
    mount_login(&server, LOGIN_OK).await;
    mount_clients_once(&server, CLIENTS_TWO).await;
    mount_clients(&server, "<td>00:1E:C2:9A:4B:10</td>").await;

    let scanner = LinksysScanner::connect(config_for(&server)).await.unwrap();
    let result = scanner.refresh().await;

    assert!(result.success);
    assert_eq!(scanner.last_results(), macs(&["00:1E:C2:9A:4B:10"]));
}

#[tokio::test]
async fn test_session_not_granted_outcome() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login.cgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LOGIN_OK))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/login.cgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LOGIN_DENIED))
        .mount(&server)
        .await;
    mount_clients(&server, CLIENTS_TWO).await;
    Mock::given(method("GET"))
        .and(path("/WL_ClientList.asp;session_id="))
        .respond_with(ResponseTemplate::new(200).set_body_string(LOGIN_DENIED))
        .mount(&server)
        .await;

    let scanner = LinksysScanner::connect(config_for(&server)).await.unwrap();
    let result = scanner.refresh().await;

    assert_eq!(result.outcome, RefreshOutcome::SessionNotGranted);
    assert_eq!(scanner.last_results().len(), 2);
}

#[tokio::test]
async fn test_unreachable_refresh_keeps_previous_results() {
    let server = MockServer::start().await;
    mount_login(&server, LOGIN_OK).await;
    mount_clients_once(&server, CLIENTS_TWO).await;
    Mock::given(method("GET"))
        .and(path(CLIENT_LIST_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(CLIENTS_TWO)
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let config = config_for(&server).with_timeout(Duration::from_millis(300));
    let scanner = LinksysScanner::connect(config).await.unwrap();

    let result = scanner.refresh().await;

    assert!(!result.success);
    assert!(matches!(result.outcome, RefreshOutcome::Unreachable { .. }));
    assert_eq!(scanner.last_results().len(), 2);
}

#[tokio::test]
async fn test_every_refresh_logs_in_again() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login.cgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LOGIN_OK))
        .expect(3)
        .mount(&server)
        .await;
    mount_clients(&server, CLIENTS_TWO).await;

    let scanner = LinksysScanner::connect(config_for(&server)).await.unwrap();
    scanner.refresh().await;
    scanner.refresh().await;
}

#[tokio::test]
async fn test_concurrent_refreshes_are_serialized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login.cgi"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(LOGIN_OK)
                .set_delay(Duration::from_millis(50)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(CLIENT_LIST_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(CLIENTS_TWO)
                .set_delay(Duration::from_millis(50)),
        )
        .mount(&server)
        .await;

    let scanner = LinksysScanner::connect(config_for(&server)).await.unwrap();

    let (a, b) = tokio::join!(scanner.refresh(), scanner.refresh());
    assert!(a.success && b.success);

    // Skip the login + fetch made by connect().
    let requests = server.received_requests().await.unwrap();
    let sequence: Vec<String> = requests
        .iter()
        .skip(2)
        .map(|r| format!("{} {}", r.method, r.url.path()))
        .collect();
    assert_eq!(
        sequence,
        vec![
            "POST /login.cgi".to_owned(),
            format!("GET {CLIENT_LIST_PATH}"),
            "POST /login.cgi".to_owned(),
            format!("GET {CLIENT_LIST_PATH}"),
        ]
    );
}

#[tokio::test]
async fn test_last_outcome_follows_the_refresh_that_ran_last() {
    let server = MockServer::start().await;
    mount_login(&server, LOGIN_OK).await;
    mount_clients_once(&server, CLIENTS_TWO).await;
    Mock::given(method("GET"))
        .and(path(CLIENT_LIST_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(CLIENTS_TWO)
                .set_delay(Duration::from_secs(5)),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_clients(&server, CLIENTS_TWO).await;

    let config = config_for(&server).with_timeout(Duration::from_millis(300));
    let scanner = LinksysScanner::connect(config).await.unwrap();

    let (first, second) = tokio::join!(scanner.refresh(), scanner.refresh());

    assert!(matches!(first.outcome, RefreshOutcome::Unreachable { .. }));
    assert_eq!(second.outcome, RefreshOutcome::Updated { count: 2 });
    assert_eq!(
        scanner.last_outcome().as_deref(),
        Some(&RefreshOutcome::Updated { count: 2 })
    );
}

#[tokio::test]
async fn test_never_logs_out() {
    let server = MockServer::start().await;
    mount_login(&server, LOGIN_OK).await;
    mount_clients(&server, CLIENTS_TWO).await;

    let scanner = LinksysScanner::connect(config_for(&server)).await.unwrap();
    scanner.refresh().await;

    let requests = server.received_requests().await.unwrap();
    let paths: Vec<String> = requests.iter().map(|r| r.url.path().to_owned()).collect();
    assert!(
        paths
            .iter()
            .all(|p| p == "/login.cgi" || p == CLIENT_LIST_PATH),
        "unexpected requests: {paths:?}"
    );
}

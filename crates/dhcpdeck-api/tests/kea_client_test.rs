#![allow(clippy::unwrap_used)]
// Integration tests for `KeaClient` using wiremock.

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dhcpdeck_api::{Command, Error, KeaClient, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, KeaClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = KeaClient::new(base_url, &TransportConfig::default()).unwrap();
    (server, client)
}

fn request(command: &str, arguments: serde_json::Value) -> serde_json::Value {
    json!({ "arguments": arguments, "command": command, "service": ["dhcp4"] })
}

// ── Envelope tests ──────────────────────────────────────────────────

#[tokio::test]
async fn test_execute_posts_json_envelope() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(header("content-type", "application/json"))
        .and(body_json(request("status-get", json!(""))))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "result": 0, "arguments": { "pid": 42 } }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let entries = client.execute(Command::StatusGet, &"").await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].result, 0);
}

#[tokio::test]
async fn test_bare_object_response_is_accepted() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "result": 1, "text": "unable to forward command" })),
        )
        .mount(&server)
        .await;

    let entry = client.execute_first(Command::StatusGet, &"").await.unwrap();
    assert_eq!(entry.result, 1);
    assert_eq!(entry.text(), "unable to forward command");
}

#[tokio::test]
async fn test_empty_array_is_malformed() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let result = client.execute_first(Command::ConfigGet, &"").await;
    assert!(
        matches!(result, Err(Error::MalformedEnvelope(_))),
        "expected MalformedEnvelope, got: {result:?}"
    );
}

#[tokio::test]
async fn test_garbage_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
        .mount(&server)
        .await;

    let result = client.fetch_subnets().await;
    assert!(
        matches!(result, Err(Error::Deserialization { .. })),
        "expected Deserialization error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_http_error_status() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;

    let result = client.fetch_leases(1).await;
    assert!(
        matches!(result, Err(Error::Status { status: 503, .. })),
        "expected Status error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let base_url = Url::parse(&format!("http://127.0.0.1:{port}/")).unwrap();

    let client = KeaClient::new(base_url, &TransportConfig::default()).unwrap();
    let err = client.fetch_subnets().await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)), "got: {err:?}");
    assert!(err.is_unreachable());
}

// ── config-get ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_subnets() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(body_json(request("config-get", json!(""))))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "result": 0,
            "arguments": {
                "Dhcp4": {
                    "subnet4": [{
                        "id": 1,
                        "subnet": "10.0.0.0/24",
                        "renew-timer": 900,
                        "rebind-timer": 1800,
                        "valid-lifetime": 3600,
                        "pools": [{ "pool": "10.0.0.10 - 10.0.0.200" }],
                        "option-data": [{ "name": "routers", "code": 3, "data": "10.0.0.1", "space": "dhcp4" }],
                        "reservations": [{ "ip-address": "10.0.0.5", "hw-address": "aa:bb:cc:dd:ee:ff", "hostname": "printer" }]
                    }]
                },
                "hash": "abc"
            }
        }])))
        .mount(&server)
        .await;

    let subnets = client.fetch_subnets().await.unwrap();
    assert_eq!(subnets.len(), 1);
    let subnet = &subnets[0];
    assert_eq!(subnet.id, 1);
    assert_eq!(subnet.subnet, "10.0.0.0/24");
    assert_eq!(subnet.valid_lifetime, 3600);
    assert_eq!(subnet.pools[0].pool, "10.0.0.10 - 10.0.0.200");
    assert_eq!(subnet.option_data[0].name, "routers");
    assert_eq!(subnet.reservations[0].hostname, "printer");
}

#[tokio::test]
async fn test_fetch_subnets_missing_subnet4() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "result": 0,
            "arguments": { "Dhcp4": { "interfaces-config": {} } }
        }])))
        .mount(&server)
        .await;

    let result = client.fetch_subnets().await;
    assert!(
        matches!(&result, Err(Error::MissingFragment { key, .. }) if key == "Dhcp4.subnet4"),
        "expected MissingFragment, got: {result:?}"
    );
}

// ── lease4-get-all ──────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_leases_scopes_by_subnet() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(body_json(request("lease4-get-all", json!({ "subnets": [7] }))))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "result": 0,
            "text": "2 IPv4 lease(s) found.",
            "arguments": {
                "leases": [
                    {
                        "client-id": "01:aa", "cltt": 1_700_000_000, "fqdn-fwd": false,
                        "fqdn-rev": false, "hostname": "laptop", "hw-address": "aa:aa:aa:aa:aa:aa",
                        "ip-address": "10.0.7.20", "state": 0, "subnet-id": 7, "valid-lft": 3600
                    },
                    {
                        "cltt": 1_700_000_100, "hostname": "", "hw-address": "bb:bb:bb:bb:bb:bb",
                        "ip-address": "10.0.7.21", "state": 1, "subnet-id": 7, "valid-lft": 3600
                    }
                ]
            }
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let leases = client.fetch_leases(7).await.unwrap();
    assert_eq!(leases.len(), 2);
    assert_eq!(leases[0].hostname, "laptop");
    assert_eq!(leases[0].subnet_id, 7);
    assert_eq!(leases[1].state, 1);
    assert_eq!(leases[1].client_id, "");
}

#[tokio::test]
async fn test_fetch_leases_empty_subnet() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "result": 3,
            "text": "0 IPv4 lease(s) found."
        }])))
        .mount(&server)
        .await;

    assert!(client.fetch_leases(2).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_fetch_leases_command_failure() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "result": 2,
            "text": "'lease4-get-all' command not supported."
        }])))
        .mount(&server)
        .await;

    let result = client.fetch_leases(2).await;
    assert!(
        matches!(result, Err(Error::Command { result: 2, .. })),
        "expected Command error, got: {result:?}"
    );
}

// ── lease4-del ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_lease_success() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(body_json(request("lease4-del", json!({ "ip-address": "10.0.0.9" }))))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "result": 0, "text": "IPv4 lease deleted." }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = client.delete_lease("10.0.0.9").await.unwrap();
    assert!(outcome.is_success());
    assert_eq!(outcome.text, "IPv4 lease deleted.");
}

#[tokio::test]
async fn test_delete_lease_not_found_is_not_an_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "result": 1, "text": "lease not found" }
        ])))
        .mount(&server)
        .await;

    let outcome = client.delete_lease("10.0.0.9").await.unwrap();
    assert_eq!(outcome.result, 1);
    assert_eq!(outcome.text, "lease not found");
}

// ── status-get ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_status() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(body_json(request("status-get", json!(""))))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "result": 0,
            "arguments": {
                "pid": 1234,
                "uptime": 3_661,
                "reload": 60,
                "multi-threading-enabled": true,
                "high-availability": []
            }
        }])))
        .mount(&server)
        .await;

    let status = client.fetch_status().await.unwrap();
    assert_eq!(status.pid, 1234);
    assert_eq!(status.uptime, 3_661);
    assert_eq!(status.reload, 60);
    assert!(status.multi_threading_enabled);
}

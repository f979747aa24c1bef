#![allow(clippy::unwrap_used, clippy::float_cmp)]
// Live-mode behavior of the resource services against a wiremock server:
// envelope tolerance, degrade-on-failure, and access-link propagation.

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use beagle_core::{
    CoreError, DataLayer, DataLayerConfig, InstanceStatus, ListParams, NodeStatus,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, DataLayer) {
    let server = MockServer::start().await;
    let config = DataLayerConfig::live(Url::parse(&server.uri()).unwrap());
    let layer = DataLayer::new(&config).unwrap();
    (server, layer)
}

/// A layer whose transport can never connect.
fn unreachable_layer() -> DataLayer {
    let config = DataLayerConfig::live(Url::parse("http://127.0.0.1:9").unwrap());
    DataLayer::new(&config).unwrap()
}

fn node_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": format!("Node {id}"),
        "type": "physical",
        "status": "online",
        "network": { "ip": "10.0.0.1", "port": 8080 }
    })
}

// ── get_list ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_sends_paging_query() {
    let (server, layer) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/nodes"))
        .and(query_param("page", "2"))
        .and(query_param("pageSize", "5"))
        .and(query_param("keyword", "gpu"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [node_json("n1"), node_json("n2")],
            "total": 12
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = layer
        .nodes()
        .get_list(&ListParams::page(2, 5).with_keyword("gpu"))
        .await;

    assert_eq!(page.total, 12);
    assert_eq!(page.list.len(), 2);
    assert_eq!(page.list[0].status, NodeStatus::Online);
    assert_eq!(page.list[1].network.ip, "10.0.0.1");
}

#[tokio::test]
async fn test_list_accepts_items_and_bare_array_envelopes() {
    let (server, layer) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/cards"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{ "id": "game_001", "name": "Cyberpunk 2077", "status": "published" }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/instances"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "i1", "status": "running" },
            { "id": "i2", "status": "hibernating" }
        ])))
        .mount(&server)
        .await;

    let cards = layer.cards().get_list(&ListParams::default()).await;
    assert_eq!(cards.total, 1);
    assert_eq!(cards.list[0].name, "Cyberpunk 2077");

    let instances = layer.instances().get_list(&ListParams::default()).await;
    assert_eq!(instances.total, 2);
    assert_eq!(instances.list[1].status, InstanceStatus::Unknown);
}

#[tokio::test]
async fn test_list_tolerates_null_fields() {
    let (server, layer) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/platforms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "id": "steam", "name": "Steam", "status": "active" },
                {
                    "id": "lutris",
                    "name": "Lutris",
                    "description": null,
                    "status": null,
                    "files": null,
                    "features": null,
                    "config": null,
                    "created_at": null
                }
            ],
            "total": 2
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/nodes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "id": "n1",
                "description": null,
                "labels": null,
                "metrics": { "cpu_usage": 12.5, "player_count": null }
            }]
        })))
        .mount(&server)
        .await;

    let platforms = layer.platforms().get_list(&ListParams::default()).await;
    assert_eq!(platforms.total, 2);
    let lutris = &platforms.list[1];
    assert_eq!(lutris.name, "Lutris");
    assert_eq!(lutris.description, "");
    assert!(lutris.files.is_empty());
    assert!(lutris.config.is_empty());
    assert!(lutris.created_at.is_none());

    let nodes = layer.nodes().get_list(&ListParams::default()).await;
    assert_eq!(nodes.list.len(), 1);
    assert!(nodes.list[0].labels.is_empty());
    assert_eq!(nodes.list[0].metrics.cpu_usage, 12.5);
    assert_eq!(nodes.list[0].metrics.player_count, 0);
}

#[tokio::test]
async fn test_list_degrades_on_unknown_envelope() {
    let (server, layer) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/platforms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .mount(&server)
        .await;

    let page = layer.platforms().get_list(&ListParams::default()).await;
    assert!(page.list.is_empty());
    assert_eq!(page.total, 0);
}

#[tokio::test]
async fn test_list_degrades_on_server_error() {
    let (server, layer) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/nodes"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let page = layer.nodes().get_list(&ListParams::default()).await;
    assert!(page.is_empty());
    assert_eq!(page.total, 0);
}

#[tokio::test]
async fn test_list_degrades_when_unreachable() {
    let layer = unreachable_layer();
    let page = layer.nodes().get_list(&ListParams::default()).await;
    assert!(page.is_empty());
}

// ── get_detail ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_detail_unwraps_data_envelope() {
    let (server, layer) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/nodes/node-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": node_json("node-1") })))
        .mount(&server)
        .await;

    let node = layer.nodes().get_detail("node-1").await.unwrap();
    assert_eq!(node.id, "node-1");
    assert_eq!(node.name, "Node node-1");
}

#[tokio::test]
async fn test_detail_missing_is_none() {
    let (server, layer) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/cards/nope"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "not found" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/cards/null-data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": null })))
        .mount(&server)
        .await;

    assert!(layer.cards().get_detail("nope").await.is_none());
    assert!(layer.cards().get_detail("null-data").await.is_none());
}

// ── create / update / delete ────────────────────────────────────────

#[tokio::test]
async fn test_create_returns_server_id() {
    let (server, layer) = setup().await;
    let payload = json!({ "name": "Elden Ring", "platformId": "steam" });

    Mock::given(method("POST"))
        .and(path("/api/v1/cards"))
        .and(body_json(&payload))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "data": { "id": "game_003" } })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/nodes"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 42 })))
        .mount(&server)
        .await;

    assert_eq!(layer.cards().create(&payload).await, "game_003");
    assert_eq!(layer.nodes().create(&json!({ "name": "n" })).await, "42");
}

#[tokio::test]
async fn test_create_rejection_returns_empty_id() {
    let (server, layer) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/instances"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "node offline" })))
        .mount(&server)
        .await;

    assert_eq!(layer.instances().create(&json!({ "name": "x" })).await, "");
    assert_eq!(unreachable_layer().cards().create(&json!({})).await, "");
}

#[tokio::test]
async fn test_update_and_delete_reduce_to_flags() {
    let (server, layer) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/platforms/steam"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "id": "steam" } })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/platforms/steam"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/platforms/locked"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({ "message": "in use" })))
        .mount(&server)
        .await;

    assert!(layer.platforms().update("steam", &json!({ "version": "2" })).await);
    assert!(layer.platforms().delete("steam").await);
    assert!(!layer.platforms().delete("locked").await);
}

// ── Instance lifecycle ──────────────────────────────────────────────

#[tokio::test]
async fn test_start_and_stop() {
    let (server, layer) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/instances/instance_001/start"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "starting" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/instances/instance_001/stop"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    assert!(layer.instances().start("instance_001").await);
    assert!(!layer.instances().stop("instance_001").await);
}

// ── Access links ────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_access_returns_url() {
    let (server, layer) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/platforms/steam/access"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "url": "https://access.example.com/steam?token=abc" }
        })))
        .mount(&server)
        .await;

    let url = layer.platforms().get_access("steam").await.unwrap();
    assert_eq!(url, "https://access.example.com/steam?token=abc");
}

#[tokio::test]
async fn test_get_access_rejection_propagates() {
    let (server, layer) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/platforms/steam/access"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({ "message": "gateway down" })))
        .mount(&server)
        .await;

    let err = layer.platforms().get_access("steam").await.unwrap_err();
    assert!(err.is_transport());
    assert_eq!(err.status(), Some(503));

    let err = unreachable_layer().platforms().get_access("steam").await.unwrap_err();
    assert!(matches!(err, CoreError::Transport { operation: "get_access", .. }));
}

#[tokio::test]
async fn test_refresh_access_posts_and_propagates() {
    let (server, layer) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/platforms/steam/access/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "url": "https://a/new" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/platforms/lutris/access/refresh"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    assert_eq!(layer.platforms().refresh_access("steam").await.unwrap(), "https://a/new");

    let err = layer.platforms().refresh_access("lutris").await.unwrap_err();
    assert!(matches!(err, CoreError::Transport { operation: "refresh_access", .. }));
}

#[tokio::test]
async fn test_access_without_url_is_empty_link() {
    let (server, layer) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/platforms/switch/access"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {} })))
        .mount(&server)
        .await;

    assert_eq!(layer.platforms().get_access("switch").await.unwrap(), "");
}

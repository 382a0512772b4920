//! Bundle aggregation tests

mod common;

use async_trait::async_trait;
use common::{refused_config, ScriptedTransport};
use gridrpc_client::{Bundle, ClientBuilder, Query, RpcClient, RpcConfig, Transport};
use gridrpc_core::{ErrorKind, Result, RpcRequest};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Transport that sleeps per method and tracks peak concurrency
struct SlowTransport {
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl SlowTransport {
    fn new() -> Self {
        Self {
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for SlowTransport {
    async fn dispatch(&self, request: &RpcRequest) -> Result<Value> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        // Earlier declared keys finish later
        let delay = match request.method.as_str() {
            "getinfo" => 60,
            "getbalance" => 30,
            _ => 5,
        };
        tokio::time::sleep(Duration::from_millis(delay)).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(json!(request.method))
    }
}

fn summary() -> Bundle {
    Bundle::new("summary")
        .with("info", Query::Info)
        .with("balance", Query::Balance)
        .with("peers", Query::PeerInfo)
}

#[tokio::test]
async fn test_failure_is_isolated_to_its_key() {
    let client = RpcClient::with_transport(ScriptedTransport::failing(&["getpeerinfo"]));

    let result = client.fetch_bundle(&summary()).await;

    assert_eq!(result.keys().collect::<Vec<_>>(), vec!["info", "balance", "peers"]);
    assert_eq!(result.get("info").unwrap().data(), Some(&json!({"method": "getinfo"})));
    assert_eq!(
        result.get("balance").unwrap().data(),
        Some(&json!({"method": "getbalance"}))
    );
    assert_eq!(
        result.get("peers").unwrap().kind(),
        Some(ErrorKind::TransportConnection)
    );
    assert_eq!(result.failed_keys(), vec!["peers"]);
    assert!(!result.all_success());
}

#[tokio::test]
async fn test_every_query_attempted_once() {
    let client = RpcClient::with_transport(ScriptedTransport::failing(&[
        "getinfo",
        "getbalance",
        "getpeerinfo",
    ]));

    let result = client.fetch_bundle(&summary()).await;

    assert_eq!(client.transport().call_count(), 3);
    assert_eq!(result.len(), 3);
    assert_eq!(result.failed_keys().len(), 3);

    let mut methods: Vec<String> = client
        .transport()
        .requests()
        .into_iter()
        .map(|r| r.method)
        .collect();
    methods.sort();
    assert_eq!(methods, vec!["getbalance", "getinfo", "getpeerinfo"]);
}

#[tokio::test]
async fn test_dashboard_keys_complete_when_daemon_is_down() {
    let client = RpcClient::new(refused_config()).unwrap();

    let result = client.fetch_dashboard_bundle().await;

    assert_eq!(
        result.keys().collect::<Vec<_>>(),
        Bundle::dashboard().keys().collect::<Vec<_>>()
    );
    for (key, outcome) in result.iter() {
        assert_eq!(
            outcome.kind(),
            Some(ErrorKind::TransportConnection),
            "{} should report the refused connection",
            key
        );
    }
}

#[tokio::test]
async fn test_preset_bundles_send_their_queries() {
    let client = RpcClient::with_transport(ScriptedTransport::echo());

    let network = client.fetch_network_bundle().await;
    assert!(network.all_success());
    assert_eq!(network.get("peer_info").unwrap().data(), Some(&json!("getpeerinfo")));

    let research = client.fetch_research_bundle().await;
    assert_eq!(
        research.get("researcher_info").unwrap().data(),
        Some(&json!("getmininginfo"))
    );
    assert_eq!(
        research.get("research_accounts").unwrap().data(),
        Some(&json!("listresearcheraccounts"))
    );

    assert_eq!(client.transport().call_count(), 7);
}

#[tokio::test]
async fn test_order_preserved_under_concurrency() {
    let client = RpcClient::with_transport(SlowTransport::new());

    let result = client.fetch_bundle(&summary()).await;

    assert_eq!(result.keys().collect::<Vec<_>>(), vec!["info", "balance", "peers"]);
    assert_eq!(result.get("info").unwrap().data(), Some(&json!("getinfo")));
    assert_eq!(result.get("peers").unwrap().data(), Some(&json!("getpeerinfo")));
    assert!(client.transport().peak() > 1);
}

#[tokio::test]
async fn test_sequential_dispatch() {
    let config = RpcConfig::default().with_max_in_flight(1);
    let client = ClientBuilder::new(config)
        .build_with_transport(SlowTransport::new())
        .unwrap();

    let result = client.fetch_bundle(&summary()).await;

    assert!(result.all_success());
    assert_eq!(client.transport().peak(), 1);
}

#[tokio::test]
async fn test_sequential_ids_follow_declaration_order() {
    let config = RpcConfig::default().with_max_in_flight(1);
    let client = ClientBuilder::new(config)
        .build_with_transport(ScriptedTransport::echo())
        .unwrap();

    client.fetch_bundle(&summary()).await;

    let sent: Vec<(u64, String)> = client
        .transport()
        .requests()
        .into_iter()
        .map(|r| (r.id, r.method))
        .collect();
    assert_eq!(
        sent,
        vec![
            (1, "getinfo".to_string()),
            (2, "getbalance".to_string()),
            (3, "getpeerinfo".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_empty_bundle() {
    let client = RpcClient::with_transport(ScriptedTransport::echo());

    let result = client.fetch_bundle(&Bundle::new("nothing")).await;

    assert!(result.is_empty());
    assert!(result.all_success());
    assert_eq!(client.transport().call_count(), 0);
}

#[tokio::test]
async fn test_serialized_shape() {
    let client = RpcClient::with_transport(ScriptedTransport::failing(&["getpeerinfo"]));

    let result = client.fetch_bundle(&summary()).await;
    let text = serde_json::to_string(&result).unwrap();

    // Keys appear in declaration order
    let info = text.find("\"info\"").unwrap();
    let balance = text.find("\"balance\"").unwrap();
    let peers = text.find("\"peers\"").unwrap();
    assert!(info < balance && balance < peers);

    let value: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        value["info"],
        json!({"success": true, "data": {"method": "getinfo"}})
    );
    assert_eq!(value["peers"]["success"], false);
    assert_eq!(value["peers"]["error"]["kind"], "transport-connection");
    assert!(value["peers"].get("data").is_none());
}

//! Ad-hoc command tests

mod common;

use common::ScriptedTransport;
use gridrpc_client::RpcClient;
use gridrpc_core::ErrorKind;
use serde_json::{json, Value};

fn client() -> RpcClient<ScriptedTransport> {
    RpcClient::with_transport(ScriptedTransport::new(|request| Ok(json!(request.params))))
}

#[tokio::test]
async fn test_empty_method_is_rejected_without_sending() {
    let client = client();

    let outcome = client.execute_ad_hoc("", &json!([1, 2])).await;
    let error = outcome.error().expect("failure outcome");
    assert_eq!(error.kind, ErrorKind::InvocationError);
    assert_eq!(error.message, "Method is required");

    assert_eq!(client.transport().call_count(), 0);
}

#[tokio::test]
async fn test_structured_params_pass_through() {
    let client = client();

    let outcome = client
        .execute_ad_hoc("sendtoaddress", &json!(["SAbc", 1.5, {"comment": "rent"}]))
        .await;

    assert_eq!(outcome.data(), Some(&json!(["SAbc", 1.5, {"comment": "rent"}])));
    let request = client.transport().last_request().unwrap();
    assert_eq!(request.method, "sendtoaddress");
}

#[tokio::test]
async fn test_json_text_params() {
    let client = client();

    let outcome = client
        .execute_ad_hoc("listunspent", &json!(r#"[1, 9999999, ["SAbc"]]"#))
        .await;
    assert_eq!(outcome.data(), Some(&json!([1, 9999999, ["SAbc"]])));

    let outcome = client.execute_ad_hoc("getblockbynumber", &json!("1000")).await;
    assert_eq!(outcome.data(), Some(&json!([1000])));
}

#[tokio::test]
async fn test_whitespace_text_params_stay_strings() {
    let client = client();

    let outcome = client
        .execute_ad_hoc("getblockbynumber", &json!("1000 true"))
        .await;

    assert_eq!(outcome.data(), Some(&json!(["1000", "true"])));
}

#[tokio::test]
async fn test_missing_params() {
    let client = client();

    for raw in [json!(""), json!("   "), Value::Null, json!([])] {
        let outcome = client.execute_ad_hoc("getinfo", &raw).await;
        assert_eq!(outcome.data(), Some(&json!([])), "raw params {}", raw);
    }

    assert_eq!(client.transport().ids(), vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn test_method_name_sent_verbatim() {
    let client = client();

    client.execute_ad_hoc(" getpeerinfo", &json!("")).await;
    assert_eq!(client.transport().last_request().unwrap().method, " getpeerinfo");

    // Whitespace is not empty, so the daemon gets to reject it
    let outcome = client.execute_ad_hoc("   ", &json!("")).await;
    assert!(outcome.is_success());
    assert_eq!(client.transport().call_count(), 2);
}

#[tokio::test]
async fn test_rejection_does_not_consume_an_id() {
    let client = client();

    client.execute_ad_hoc("", &json!("")).await;
    client.execute_ad_hoc("getinfo", &json!("")).await;

    assert_eq!(client.transport().ids(), vec![1]);
}

//! Dealer directory against a stubbed dealer cloud function.

mod common;

use common::dealer_json;
use dealership::services::{DealerDirectory, DealerError};
use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn directory(server: &MockServer) -> DealerDirectory {
    DealerDirectory::new(
        reqwest::Client::new(),
        format!("{}/dealerships/get", server.uri()),
    )
}

#[tokio::test]
async fn test_list_dealers_unpacks_rows_in_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dealerships/get"))
        .and(query_param_is_missing("state"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "body": {
                "total_rows": 2,
                "rows": [
                    { "id": "x", "doc": dealer_json(7, "Texas", "TX") },
                    { "id": "y", "doc": dealer_json(2, "California", "CA") }
                ]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dealers = directory(&server).list_dealers().await.unwrap();

    let ids: Vec<i64> = dealers.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![7, 2]);
    assert_eq!(dealers[0].st, "TX");
    assert_eq!(dealers[1].to_string(), "Holdlamis Car Dealership 2, California");
}

#[tokio::test]
async fn test_get_dealer_by_id_returns_first_entry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("dealerId", "15"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "entries": [dealer_json(15, "Kansas", "KS"), dealer_json(99, "Ohio", "OH")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dealer = directory(&server)
        .get_dealer_by_id(15)
        .await
        .unwrap()
        .expect("dealer should be found");

    assert_eq!(dealer.id, 15);
    assert_eq!(dealer.state, "Kansas");
}

#[tokio::test]
async fn test_get_dealer_by_id_without_entries_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("dealerId", "404"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "entries": [] })))
        .mount(&server)
        .await;

    let dealer = directory(&server).get_dealer_by_id(404).await.unwrap();
    assert!(dealer.is_none());
}

#[tokio::test]
async fn test_list_dealers_by_state_reads_docs_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("state", "Texas"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "body": { "docs": [dealer_json(1, "Texas", "TX"), dealer_json(4, "Texas", "TX")] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dealers = directory(&server)
        .list_dealers_by_state("Texas")
        .await
        .unwrap();

    assert_eq!(dealers.len(), 2);
    assert!(dealers.iter().all(|d| d.state == "Texas"));
}

#[tokio::test]
async fn test_state_filter_rejects_rows_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "body": { "rows": [{ "doc": dealer_json(1, "Texas", "TX") }] }
        })))
        .mount(&server)
        .await;

    let result = directory(&server)
        .list_dealers_by_state("Texas")
        .await;

    assert!(matches!(result, Err(DealerError::MalformedResponse(_))));
}

#[tokio::test]
async fn test_upstream_failure_is_reported_with_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = directory(&server).list_dealers().await;

    assert!(matches!(result, Err(DealerError::Upstream { status: 503 })));
}

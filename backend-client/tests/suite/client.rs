use pretty_assertions::assert_eq;
use serde_json::Value;
use serde_json::json;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;
use wiremock::matchers::method;
use wiremock::matchers::path;
use wiremock::matchers::query_param;
use xcp420_backend_client::BackendError;
use xcp420_backend_client::CounterpartyClient;
use xcp420_models::MinterStatus;
use xcp420_models::StatusFilter;

fn fairminter_json(asset: &str) -> Value {
    json!({
        "tx_hash": "8a6a3f0c9d",
        "tx_index": 101,
        "block_index": 990001,
        "source": "1BurnAddrXXXXXXXXXXXXXXXXXXXXXXXX",
        "asset": asset,
        "price": 10000000,
        "quantity_by_price": 100000000000i64,
        "hard_cap": 1000000000000000i64,
        "soft_cap": 420000000000000i64,
        "start_block": 990000,
        "end_block": 991000,
        "burn_payment": true,
        "max_mint_per_tx": 3500000000000i64,
        "max_mint_per_address": 3500000000000i64,
        "premint_quantity": 0,
        "soft_cap_deadline_block": 990999,
        "lock_description": false,
        "lock_quantity": true,
        "divisible": true,
        "status": "open",
        "block_time": 1727000000,
        "hard_cap_normalized": "10000000.00000000"
    })
}

#[tokio::test]
async fn fairminters_unwraps_the_result_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fairminters"))
        .and(query_param("status", "open"))
        .and(query_param("verbose", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [fairminter_json("PEPECASH")],
            "result_count": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = CounterpartyClient::new(server.uri());
    let minters = client.fairminters(StatusFilter::Open).await.unwrap();

    assert_eq!(minters.len(), 1);
    assert_eq!(minters[0].asset, "PEPECASH");
    assert_eq!(minters[0].status, MinterStatus::Open);
    assert_eq!(minters[0].hard_cap, 1_000_000_000_000_000);
    // Absent on the wire: must default, not fail.
    assert_eq!(minters[0].minted_asset_commission_int, 0);
}

#[tokio::test]
async fn fairminter_fetches_a_single_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fairminters/8a6a3f0c9d"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": fairminter_json("RAREPEPE")
        })))
        .mount(&server)
        .await;

    let client = CounterpartyClient::new(server.uri());
    let minter = client.fairminter("8a6a3f0c9d").await.unwrap();
    assert_eq!(minter.asset, "RAREPEPE");
}

#[tokio::test]
async fn non_success_status_is_a_typed_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fairminters"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let client = CounterpartyClient::new(server.uri());
    let err = client.fairminters(StatusFilter::All).await.unwrap_err();
    match err {
        BackendError::UnexpectedStatus { status, .. } => assert_eq!(status.as_u16(), 502),
        other => panic!("expected UnexpectedStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn garbage_body_is_a_malformed_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fairminters"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = CounterpartyClient::new(server.uri());
    let err = client.fairminters(StatusFilter::All).await.unwrap_err();
    assert!(matches!(err, BackendError::MalformedResponse { .. }), "got {err:?}");
}

#[tokio::test]
async fn fairmints_page_carries_the_indexer_total() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fairminters/8a6a3f0c9d/fairmints"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [{
                "tx_hash": "mint1",
                "tx_index": 102,
                "block_index": 990500,
                "source": "1MinterAddr",
                "fairminter_tx_hash": "8a6a3f0c9d",
                "asset": "PEPECASH",
                "earn_quantity": 100000000000i64,
                "paid_quantity": 10000000,
                "status": "valid",
                "block_time": 1727000600
            }],
            "result_count": 250
        })))
        .mount(&server)
        .await;

    let client = CounterpartyClient::new(server.uri());
    let page = client.fairmints_for("8a6a3f0c9d").await.unwrap();
    assert_eq!(page.mints.len(), 1);
    assert_eq!(page.total, 250);
    assert_eq!(page.mints[0].earn_quantity, 100_000_000_000);
}

#[tokio::test]
async fn mempool_events_tolerate_missing_fields_and_truncate() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/mempool/events/NEW_FAIRMINT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [
                { "tx_hash": "a", "params": { "asset": "PEPECASH" } },
                { "params": {} },
                { "tx_hash": "c" }
            ]
        })))
        .mount(&server)
        .await;

    let client = CounterpartyClient::new(server.uri());
    let events = client.mempool_fairmints(2).await.unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].tx_hash.as_deref(), Some("a"));
    assert_eq!(
        events[0].params.as_ref().and_then(|p| p.asset.as_deref()),
        Some("PEPECASH")
    );
    assert_eq!(events[1].tx_hash, None);
}

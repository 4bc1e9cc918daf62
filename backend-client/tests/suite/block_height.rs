use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;
use wiremock::matchers::method;
use wiremock::matchers::path;
use xcp420_backend_client::BlockHeightTracker;
use xcp420_backend_client::FALLBACK_BLOCK_HEIGHT;

async fn mock_counterparty(server: &MockServer, height: u64) {
    Mock::given(method("GET"))
        .and(path("/blocks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [{ "block_index": height }]
        })))
        .mount(server)
        .await;
}

async fn mock_tip(server: &MockServer, height: u64) {
    Mock::given(method("GET"))
        .and(path("/api/blocks/tip/height"))
        .respond_with(ResponseTemplate::new(200).set_body_string(height.to_string()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn takes_the_median_of_disagreeing_sources() {
    let counterparty = MockServer::start().await;
    let mempool = MockServer::start().await;
    let blockstream = MockServer::start().await;
    mock_counterparty(&counterparty, 914_900).await;
    mock_tip(&mempool, 914_955).await;
    // Outlier: a source stuck far ahead must not win.
    mock_tip(&blockstream, 999_999).await;

    let tracker =
        BlockHeightTracker::with_bases(counterparty.uri(), mempool.uri(), blockstream.uri());
    assert_eq!(tracker.current().await, 914_955);
}

#[tokio::test]
async fn serves_the_cache_within_the_ttl() {
    let counterparty = MockServer::start().await;
    let mempool = MockServer::start().await;
    let blockstream = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/blocks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [{ "block_index": 914_955 }]
        })))
        .expect(1)
        .mount(&counterparty)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/blocks/tip/height"))
        .respond_with(ResponseTemplate::new(200).set_body_string("914955"))
        .expect(1)
        .mount(&mempool)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/blocks/tip/height"))
        .respond_with(ResponseTemplate::new(200).set_body_string("914955"))
        .expect(1)
        .mount(&blockstream)
        .await;

    let tracker =
        BlockHeightTracker::with_bases(counterparty.uri(), mempool.uri(), blockstream.uri());
    assert_eq!(tracker.current().await, 914_955);
    // Second call must come from the cache; the expect(1) mocks verify it.
    assert_eq!(tracker.current().await, 914_955);
}

#[tokio::test]
async fn survives_a_partial_outage() {
    let counterparty = MockServer::start().await;
    let mempool = MockServer::start().await;
    let blockstream = MockServer::start().await;
    // counterparty 500s, blockstream serves garbage, mempool answers.
    Mock::given(method("GET"))
        .and(path("/blocks"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&counterparty)
        .await;
    mock_tip(&mempool, 914_955).await;
    Mock::given(method("GET"))
        .and(path("/api/blocks/tip/height"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not a number"))
        .mount(&blockstream)
        .await;

    let tracker =
        BlockHeightTracker::with_bases(counterparty.uri(), mempool.uri(), blockstream.uri());
    assert_eq!(tracker.current().await, 914_955);
}

#[tokio::test]
async fn falls_back_when_every_source_fails() {
    let counterparty = MockServer::start().await;
    let mempool = MockServer::start().await;
    let blockstream = MockServer::start().await;
    for server in [&counterparty, &mempool, &blockstream] {
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(server)
            .await;
    }

    let tracker =
        BlockHeightTracker::with_bases(counterparty.uri(), mempool.uri(), blockstream.uri());
    assert_eq!(tracker.current().await, FALLBACK_BLOCK_HEIGHT);
}

//! Drives `EsRepositoryImpl` against a wiremock server standing in for Elasticsearch.

use elastic_proxy_rust::model::elastic_dto::elastic_source_parser::*;
use elastic_proxy_rust::model::elastic_dto::es_response::*;
use elastic_proxy_rust::repository::es_repository::*;
use elastic_proxy_rust::traits::repository::es_repository_trait::*;

use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{body_string, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const INDEX: &str = "packetbeat-unittest";

fn es_for(server: &MockServer) -> EsRepositoryImpl {
    EsRepositoryImpl::new(vec![server.uri()], "", "", Duration::from_secs(5), true).unwrap()
}

fn es_reply(status: u16, body: Value) -> ResponseTemplate {
    ResponseTemplate::new(status)
        .insert_header("x-elastic-product", "Elasticsearch")
        .set_body_json(body)
}

fn created() -> ResponseTemplate {
    es_reply(
        201,
        json!({ "_index": INDEX, "_id": "a1", "_version": 1, "result": "created" }),
    )
}

// ============================================================================
// insert
// ============================================================================

#[tokio::test]
async fn insert_posts_body_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/{}/trans", INDEX)))
        .and(query_param_is_missing("refresh"))
        .and(body_string(r#"{"test": 1}"#))
        .respond_with(created())
        .expect(1)
        .mount(&server)
        .await;

    let resp: EsResponse = es_for(&server)
        .insert(INDEX, "trans", r#"{"test": 1}"#, false)
        .await
        .unwrap();

    assert!(resp.is_success());
    assert!(resp.server_error().is_none());
}

#[tokio::test]
async fn insert_with_refresh_sets_query_param() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/{}/trans", INDEX)))
        .and(query_param("refresh", "true"))
        .respond_with(created())
        .expect(1)
        .mount(&server)
        .await;

    let resp: EsResponse = es_for(&server)
        .insert(INDEX, "trans", r#"{"test": 1}"#, true)
        .await
        .unwrap();

    assert_eq!(*resp.status_code(), 201);
}

#[tokio::test]
async fn insert_without_doc_type_uses_doc_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/{}/_doc", INDEX)))
        .respond_with(created())
        .expect(1)
        .mount(&server)
        .await;

    let resp: EsResponse = es_for(&server)
        .insert(INDEX, "", r#"{"test": 1}"#, false)
        .await
        .unwrap();

    assert!(resp.is_success());
}

#[tokio::test]
async fn insert_bogus_json_returns_response_and_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/{}/trans", INDEX)))
        .and(body_string(r#"{"test": 1"#))
        .respond_with(es_reply(
            400,
            json!({
                "error": {
                    "root_cause": [{ "type": "mapper_parsing_exception", "reason": "failed to parse" }],
                    "type": "mapper_parsing_exception",
                    "reason": "failed to parse"
                },
                "status": 400
            }),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let resp: EsResponse = es_for(&server)
        .insert(INDEX, "trans", r#"{"test": 1"#, false)
        .await
        .unwrap();

    let err: EsServerError = resp.server_error().unwrap();
    assert_eq!(*err.status_code(), 400);
    assert_eq!(err.reason(), "failed to parse");
    assert!(resp.error_for_status().is_err());
}

#[tokio::test]
async fn transport_failure_is_an_error() {
    /* nothing listens on port 1 */
    let es = EsRepositoryImpl::new(
        vec!["127.0.0.1:1".to_string()],
        "",
        "",
        Duration::from_secs(2),
        true,
    )
    .unwrap();

    assert!(es.insert(INDEX, "trans", r#"{"test": 1}"#, false).await.is_err());
    assert!(es.search(INDEX, &[], "{}").await.is_err());
}

// ============================================================================
// delete_index / refresh
// ============================================================================

#[tokio::test]
async fn delete_missing_index_is_not_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(format!("/{}", INDEX)))
        .respond_with(es_reply(
            404,
            json!({
                "error": { "type": "index_not_found_exception", "reason": "no such index" },
                "status": 404
            }),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let resp: EsResponse = es_for(&server).delete_index(INDEX).await.unwrap();
    assert_eq!(*resp.status_code(), 404);
}

#[tokio::test]
async fn delete_index_failure_is_surfaced_on_response() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(format!("/{}", INDEX)))
        .respond_with(es_reply(
            403,
            json!({
                "error": { "type": "cluster_block_exception", "reason": "index read-only" },
                "status": 403
            }),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let resp: EsResponse = es_for(&server).delete_index(INDEX).await.unwrap();

    let err: EsServerError = resp.server_error().unwrap();
    assert_eq!(*err.status_code(), 403);
    assert_eq!(err.reason(), "index read-only");
}

#[tokio::test]
async fn delete_index_ignores_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(format!("/{}", INDEX)))
        .and(query_param("ignore_unavailable", "true"))
        .respond_with(es_reply(200, json!({ "acknowledged": true })))
        .expect(1)
        .mount(&server)
        .await;

    let resp: EsResponse = es_for(&server).delete_index(INDEX).await.unwrap();
    assert!(resp.is_success());
}

#[tokio::test]
async fn refresh_hits_refresh_endpoint() {
    let server = MockServer::start().await;

    Mock::given(path(format!("/{}/_refresh", INDEX)))
        .respond_with(es_reply(
            200,
            json!({ "_shards": { "total": 2, "successful": 1, "failed": 0 } }),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let resp: EsResponse = es_for(&server).refresh(INDEX).await.unwrap();
    assert!(resp.is_success());
}

// ============================================================================
// search / aggregations
// ============================================================================

#[tokio::test]
async fn search_returns_one_document() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/{}/_search", INDEX)))
        .and(body_string("{}"))
        .respond_with(es_reply(
            200,
            json!({
                "took": 1,
                "timed_out": false,
                "hits": {
                    "total": { "value": 1, "relation": "eq" },
                    "hits": [ { "_index": INDEX, "_id": "a1", "_score": 1.0, "_source": { "test": 1 } } ]
                }
            }),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let resp: EsResponse = es_for(&server).search(INDEX, &[], "{}").await.unwrap();
    assert_eq!(*resp.status_code(), 200);

    let results: EsSearchResults = resp.json().unwrap();
    assert_eq!(results.total(), 1);
    assert_eq!(results.hits_len(), 1);
    assert_eq!(results.into_sources(), vec![json!({ "test": 1 })]);
}

#[tokio::test]
async fn search_forwards_query_params() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/{}/_search", INDEX)))
        .and(query_param("search_type", "query_then_fetch"))
        .and(query_param("size", "0"))
        .respond_with(es_reply(200, json!({ "hits": { "total": 0, "hits": [] } })))
        .expect(1)
        .mount(&server)
        .await;

    let resp: EsResponse = es_for(&server)
        .search(
            INDEX,
            &[("search_type", "query_then_fetch"), ("size", "0")],
            "{}",
        )
        .await
        .unwrap();

    let results: EsSearchResults = resp.json().unwrap();
    assert_eq!(results.total(), 0);
}

#[tokio::test]
async fn sum_aggregation_adds_two_and_three() {
    let server = MockServer::start().await;
    let query: &str = r#"{"aggs":{"value_sum":{"sum":{"field":"value"}}}}"#;

    Mock::given(method("POST"))
        .and(path(format!("/{}/_search", INDEX)))
        .and(body_string(query))
        .respond_with(es_reply(
            200,
            json!({
                "hits": { "total": { "value": 2, "relation": "eq" }, "hits": [] },
                "aggregations": { "value_sum": { "value": 5.0 } }
            }),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let resp: EsResponse = es_for(&server).search(INDEX, &[], query).await.unwrap();
    let results: EsSearchResults = resp.json().unwrap();

    assert_eq!(results.aggs().len(), 1);
    let sum: ValueAggregation = results.aggregation("value_sum").unwrap();
    assert_eq!(sum.value.map(|v| v as i64), Some(5));
}

#[tokio::test]
async fn search_error_is_surfaced_on_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/{}/_search", INDEX)))
        .respond_with(es_reply(
            400,
            json!({
                "error": { "type": "parsing_exception", "reason": "Unknown key for a START_OBJECT in [bogus]." },
                "status": 400
            }),
        ))
        .mount(&server)
        .await;

    let resp: EsResponse = es_for(&server)
        .search(INDEX, &[], r#"{"bogus":{}}"#)
        .await
        .unwrap();

    assert!(resp.server_error().is_some());
    /* decoding an error body as a result envelope fails at decode time */
    assert!(resp.json::<EsSearchResults>().is_err());
}

// ============================================================================
// bulk
// ============================================================================

#[tokio::test]
async fn simple_bulk_insert() {
    let server = MockServer::start().await;
    let payload: &str = "{ \"index\" : { \"_type\": \"test1\" } }\n{ \"field1\" : \"value1\" }\n";

    Mock::given(method("POST"))
        .and(path(format!("/{}/_bulk", INDEX)))
        .and(header("content-type", "application/x-ndjson"))
        .and(body_string(payload))
        .respond_with(es_reply(
            200,
            json!({
                "took": 3,
                "errors": false,
                "items": [ { "index": { "_index": INDEX, "_id": "b1", "status": 201 } } ]
            }),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let resp: EsResponse = es_for(&server)
        .bulk(INDEX, payload.as_bytes())
        .await
        .unwrap();

    assert!(resp.is_success());
    assert_eq!(resp.json::<Value>().unwrap()["errors"], false);
}

#[tokio::test]
async fn bulk_appends_missing_trailing_newline() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/{}/_bulk", INDEX)))
        .and(body_string("{\"index\":{}}\n{\"field1\":\"value1\"}\n"))
        .respond_with(es_reply(200, json!({ "took": 1, "errors": false, "items": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let resp: EsResponse = es_for(&server)
        .bulk(INDEX, "{\"index\":{}}\n{\"field1\":\"value1\"}".as_bytes())
        .await
        .unwrap();

    assert!(resp.is_success());
}

#[tokio::test]
async fn host_list_is_kept() {
    let server = MockServer::start().await;
    let es: EsRepositoryImpl = es_for(&server);

    assert_eq!(es.get_cluster_all_host_infos(), vec![server.uri()]);
}

#[test]
fn empty_host_list_is_rejected() {
    assert!(EsRepositoryImpl::new(vec![], "", "", Duration::from_secs(1), true).is_err());
}

#[test]
fn invalid_host_is_rejected() {
    assert!(EsRepositoryImpl::new(
        vec!["http://[::1".to_string()],
        "",
        "",
        Duration::from_secs(1),
        true
    )
    .is_err());
}

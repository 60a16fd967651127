use propai_search::backends::{AlgoliaIndex, SearchBackend, SearchRequest};
use propai_search::config::{IndexConfig, LlmConfig};
use propai_search::llm::{GeminiClient, ModelOutput, PromptRequest, TextGenerator};
use propai_search::pipeline::SearchPipeline;
use propai_search::query::{QueryStructurer, StructuredFilter};
use propai_search::{PropertyType, SearchError};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GEMINI_PATH: &str = "/v1beta/models/test-model:generateContent";
const QUERY_PATH: &str = "/1/indexes/properties/query";

fn llm_config(server: &MockServer) -> LlmConfig {
    LlmConfig {
        base_url: server.uri(),
        model: "test-model".to_string(),
        timeout_secs: 5,
        ..LlmConfig::new("test-key")
    }
}

fn index_config(server: &MockServer) -> IndexConfig {
    IndexConfig {
        app_id: "APP".to_string(),
        search_api_key: "search-key".to_string(),
        admin_api_key: Some("admin-key".to_string()),
        index_name: "properties".to_string(),
        host_override: Some(server.uri()),
    }
}

fn gemini_reply(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

#[tokio::test]
async fn gemini_request_shape_and_text_reply() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "contents": [{ "role": "user", "parts": [{ "text": "villa in Goa" }] }],
            "generationConfig": { "responseMimeType": "application/json" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply("{\"city\": \"Goa\"}")))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiClient::new(&llm_config(&server)).unwrap();
    let output = client
        .generate(&PromptRequest {
            instruction: "extract",
            input: "villa in Goa",
            json_output: true,
        })
        .await
        .unwrap();

    assert_eq!(output, ModelOutput::Text("{\"city\": \"Goa\"}".to_string()));
}

#[tokio::test]
async fn end_to_end_filtered_search() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply(
            r#"{"city": "Bangalore", "bedrooms_min": 3, "bedrooms_max": 3, "price_max": 20000000, "propertyType": "Apartment"}"#,
        )))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(QUERY_PATH))
        .and(header("X-Algolia-Application-Id", "APP"))
        .and(header("X-Algolia-API-Key", "search-key"))
        .and(body_json(json!({
            "query": "3 bedroom apartments in Bangalore under 2 crores",
            "filters": "city:\"Bangalore\" AND propertyType:\"Apartment\" AND bedrooms >= 3 AND bedrooms <= 3 AND price <= 20000000"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hits": [
                {
                    "objectID": "7",
                    "id": 7,
                    "city": "Bangalore",
                    "propertyType": "Apartment",
                    "bedrooms": 3,
                    "price": 18500000,
                    "address": "Whitefield, Bangalore"
                },
                { "objectID": "broken", "city": "Bangalore" }
            ],
            "nbHits": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    let generator = GeminiClient::new(&llm_config(&server)).unwrap();
    let index = AlgoliaIndex::new(&index_config(&server), "search-key").unwrap();
    let pipeline = SearchPipeline::new(generator, index);

    let outcome = pipeline
        .search("  3 bedroom apartments in Bangalore under 2 crores ")
        .await
        .unwrap();

    assert_eq!(outcome.filter.property_type, Some(PropertyType::Apartment));
    assert_eq!(outcome.listings.len(), 1);
    assert_eq!(outcome.listings[0].id, "7");
}

#[tokio::test]
async fn model_outage_degrades_to_text_search() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(QUERY_PATH))
        .and(body_json(json!({ "query": "sea view flat" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "hits": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let structurer = QueryStructurer::new(GeminiClient::new(&llm_config(&server)).unwrap());
    assert_eq!(structurer.structure("sea view flat").await, StructuredFilter::default());

    let pipeline = SearchPipeline::new(
        GeminiClient::new(&llm_config(&server)).unwrap(),
        AlgoliaIndex::new(&index_config(&server), "search-key").unwrap(),
    );
    let outcome = pipeline.search("sea view flat").await.unwrap();
    assert!(outcome.expression.is_none());
    assert!(outcome.listings.is_empty());
}

#[tokio::test]
async fn index_failure_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(QUERY_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_string("invalid key"))
        .mount(&server)
        .await;

    let index = AlgoliaIndex::new(&index_config(&server), "wrong").unwrap();
    let filter = StructuredFilter::default();
    let err = index
        .search(&SearchRequest {
            text: "anything",
            filter: &filter,
            expression: None,
        })
        .await
        .unwrap_err();

    match err {
        SearchError::Backend { backend, message } => {
            assert_eq!(backend, "algolia");
            assert!(message.contains("403"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn bulk_load_upserts_and_lets_index_assign_ids() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/1/indexes/properties/batch"))
        .and(header("X-Algolia-API-Key", "admin-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "taskID": 42,
            "objectIDs": ["1", "generated-0"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let index = AlgoliaIndex::new(&index_config(&server), "admin-key").unwrap();
    let batch = index
        .save_objects(vec![
            json!({ "id": 1, "city": "Mumbai", "propertyType": "Apartment", "price": 15000000 }),
            json!({ "city": "Delhi", "propertyType": "House", "price": 30000000 }),
        ])
        .await
        .unwrap();

    assert_eq!(batch.task_id, 42);
    assert_eq!(batch.object_ids, vec!["1", "generated-0"]);

    let requests = server.received_requests().await.unwrap();
    let sent: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(sent["requests"][0]["action"], "updateObject");
    assert_eq!(sent["requests"][0]["body"]["objectID"], "1");
    assert_eq!(sent["requests"][1]["action"], "addObject");
    assert!(sent["requests"][1]["body"].get("objectID").is_none());
}

#[tokio::test]
async fn bulk_load_rejects_non_objects_before_sending() {
    let server = MockServer::start().await;
    let index = AlgoliaIndex::new(&index_config(&server), "admin-key").unwrap();

    let err = index.save_objects(vec![json!("nope")]).await.unwrap_err();
    assert!(matches!(err, SearchError::Backend { .. }));
    assert!(server.received_requests().await.unwrap().is_empty());
}

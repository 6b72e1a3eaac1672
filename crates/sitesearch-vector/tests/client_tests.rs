use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sitesearch_core::traits::VectorStore;
use sitesearch_core::types::{VectorAttributes, VectorRecord};
use sitesearch_vector::HttpVectorStore;

fn record() -> VectorRecord {
    VectorRecord {
        data: "how to install".into(),
        attributes: VectorAttributes {
            data: "how to install".into(),
            title: Some("Install".into()),
            url: "/docs/install".into(),
            hash: None,
            page_title: Some("Getting Started".into()),
            breadcrumb: Some(vec!["docs".into()]),
        },
    }
}

#[tokio::test]
async fn ingest_posts_text_modality_with_json_attributes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/index_data"))
        .and(header("Authorization", "Bearer write-token"))
        .and(body_partial_json(json!({
            "vectorSpaceId": "docs-42",
            "modality": "TEXT",
            "input": ["how to install"],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let store = HttpVectorStore::new(&server.uri(), "docs-42", "write-token");
    store.ingest(record()).await.expect("ingest");
}

#[tokio::test]
async fn ingest_failure_is_a_fatal_build_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/index_data"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let store = HttpVectorStore::new(&server.uri(), "docs-42", "write-token");
    let err = store.ingest(record()).await.expect_err("must fail");
    assert!(!err.is_recoverable());
}

#[tokio::test]
async fn clear_targets_the_configured_space() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/clear_vector_space"))
        .and(body_partial_json(json!({"vectorSpaceId": "docs-42"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let store = HttpVectorStore::new(&server.uri(), "docs-42", "write-token");
    store.clear().await.expect("clear");
}

#[tokio::test]
async fn lookup_parses_similarity_scored_hits() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/lookup"))
        .and(body_partial_json(json!({
            "vectorSpaceId": "docs-42",
            "topK": 5,
            "query": "install",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {
                    "similarity": 0.91,
                    "attributes": {
                        "url": "/docs/install",
                        "title": "Install",
                        "pageTitle": "Getting Started",
                        "data": "how to install"
                    }
                },
                {
                    "similarity": 0.42,
                    "attributes": {"url": "/docs/other", "title": null, "data": ""}
                }
            ]
        })))
        .mount(&server)
        .await;

    let store = HttpVectorStore::new(&server.uri(), "docs-42", "public-token");
    let hits = store.lookup("install", 5).await.expect("lookup");
    assert_eq!(hits.len(), 2);
    assert!((hits[0].similarity - 0.91).abs() < 1e-9);
    assert_eq!(hits[0].attributes.page_title.as_deref(), Some("Getting Started"));
    assert_eq!(hits[1].attributes.title, None);
}

#[tokio::test]
async fn lookup_failure_is_recoverable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/lookup"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let store = HttpVectorStore::new(&server.uri(), "docs-42", "public-token");
    let err = store.lookup("install", 5).await.expect_err("must fail");
    assert!(err.is_recoverable());
}

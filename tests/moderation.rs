use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shardai::{BlockingShardClient, ShardClient, ShardError, TransportOptions};

fn client_for(server: &MockServer) -> ShardClient {
    ShardClient::with_options(TransportOptions::new("test-key").with_base_url(server.uri()))
}

fn moderation_body() -> serde_json::Value {
    json!({
        "score": 0.87,
        "languages": ["en"],
        "data": {
            "prompt": "you are terrible",
            "attribute": "TOXICITY",
            "time": 0.031
        }
    })
}

#[tokio::test]
async fn completions_defaults_to_toxicity() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/moderation/completions"))
        .and(header("api-key", "test-key"))
        .and(body_partial_json(json!({
            "prompt": "you are terrible",
            "attribute": "TOXICITY"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(moderation_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client
        .moderation
        .completions("you are terrible", None)
        .await
        .unwrap();

    assert_eq!(result.score, 0.87);
    assert_eq!(result.languages, ["en"]);
    assert_eq!(result.data.prompt.as_deref(), Some("you are terrible"));
    assert_eq!(result.data.attribute.as_deref(), Some("TOXICITY"));
    assert_eq!(result.data.time, Some(0.031));
}

#[tokio::test]
async fn explicit_attribute_is_sent() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/moderation/completions"))
        .and(body_partial_json(json!({"attribute": "INSULT"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(moderation_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client
        .moderation
        .completions("you are terrible", Some("INSULT"))
        .await
        .unwrap();
}

#[tokio::test]
async fn attributes_catalog_uses_the_singular_wire_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/moderation/attributes"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"attribute": ["TOXICITY", "INSULT", "THREAT"]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let attributes = client.moderation.attributes().await.unwrap();
    assert_eq!(attributes, ["TOXICITY", "INSULT", "THREAT"]);

    let requests = server.received_requests().await.unwrap();
    assert!(!requests[0].headers.contains_key("api-key"));
}

#[tokio::test]
async fn missing_input_makes_no_network_call() {
    let server = MockServer::start().await;

    let client = client_for(&server);
    let err = client.moderation.completions("", None).await.unwrap_err();

    assert!(matches!(err, ShardError::MissingInput("prompt")));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn non_200_status_is_a_remote_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/moderation/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .moderation
        .completions("text", None)
        .await
        .unwrap_err();

    assert!(matches!(err, ShardError::Remote(429)));
}

#[tokio::test]
async fn blocking_client_shares_the_same_semantics() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/moderation/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(moderation_body()))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let result = tokio::task::spawn_blocking(move || {
        let client = BlockingShardClient::with_options(
            TransportOptions::new("test-key").with_base_url(uri),
        );
        client.moderation.completions("you are terrible", None)
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(result.score, 0.87);
}

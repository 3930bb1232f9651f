use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shardai::{BlockingShardClient, Media, ShardClient, ShardError, TransportOptions, TtsParams};

fn client_for(server: &MockServer) -> ShardClient {
    ShardClient::with_options(TransportOptions::new("test-key").with_base_url(server.uri()))
}

fn audio_body(audio: &str) -> serde_json::Value {
    json!({
        "audio": audio,
        "generation-time": 1.1,
        "warning!": null,
        "info": {"provider": "elevenlabs"}
    })
}

#[tokio::test]
async fn elevenlabs_defaults_to_the_rachel_voice() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/tts/completions"))
        .and(header("api-key", "test-key"))
        .and(body_partial_json(json!({
            "prompt": "Hello there",
            "model": "ElevenLabs",
            "voice": "Rachel"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(audio_body("https://cdn.shard-ai.xyz/audio/1.mp3")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client
        .tts
        .completions("Hello there", &TtsParams::default())
        .await
        .unwrap();

    assert_eq!(
        result.audio,
        Media::Remote("https://cdn.shard-ai.xyz/audio/1.mp3".to_string())
    );
    assert_eq!(result.generation_time, 1.1);
    assert!(result.warning.is_none());

    // Voice-clone payloads never carry narrator fields.
    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = requests[0].body_json().unwrap();
    assert!(body.get("gender").is_none());
    assert!(body.get("language").is_none());
}

#[tokio::test]
async fn narrator_providers_send_gender_and_language() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/tts/completions"))
        .and(body_partial_json(json!({
            "model": "google",
            "gender": "Female",
            "language": "de"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(audio_body("https://cdn.shard-ai.xyz/audio/2.mp3")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let params = TtsParams::new()
        .with_model("google")
        .with_gender("Female")
        .with_language("de");
    client.tts.completions("Hallo", &params).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = requests[0].body_json().unwrap();
    assert!(body.get("voice").is_none());
}

#[tokio::test]
async fn unknown_model_fails_before_any_network_call() {
    let server = MockServer::start().await;

    let client = client_for(&server);
    let params = TtsParams::new().with_model("bogus");
    let err = client.tts.completions("hi", &params).await.unwrap_err();

    match err {
        ShardError::InvalidModel(name) => assert_eq!(name, "bogus"),
        other => panic!("expected InvalidModel, got {:?}", other),
    }
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn voice_catalog_decodes_every_provider_shape() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/tts/voices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "eleven_labs": [
                {
                    "name": "Rachel",
                    "accent": "american",
                    "age": "young",
                    "gender": "female",
                    "use_case": "narration"
                },
                {"name": "Adam"}
            ],
            "tiktok": ["en_us_001", "en_us_006"],
            "bing": {
                "Message": "use locale codes",
                "parameters": {"pitch": "default", "rate": "default"}
            },
            "google": {
                "Messages": ["gender + language selects the voice"]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let catalog = client.tts.voices().await.unwrap();

    assert_eq!(catalog.elevenlabs.len(), 2);
    assert_eq!(catalog.elevenlabs[0].name, "Rachel");
    assert_eq!(catalog.elevenlabs[0].accent.as_deref(), Some("american"));
    assert!(catalog.elevenlabs[1].accent.is_none());
    assert_eq!(catalog.tiktok, ["en_us_001", "en_us_006"]);
    assert_eq!(catalog.edge.message, "use locale codes");
    assert_eq!(catalog.edge.parameters["pitch"], "default");
    assert!(catalog.google.messages.is_array());

    // The catalog endpoint takes no credential header.
    let requests = server.received_requests().await.unwrap();
    assert!(!requests[0].headers.contains_key("api-key"));
}

#[tokio::test]
async fn inline_audio_payload_decodes_without_network() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/tts/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(audio_body("data:audio/mpeg;base64,aGVsbG8=")),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client
        .tts
        .completions("hi", &TtsParams::default())
        .await
        .unwrap();

    let bytes = result.as_bytes().await.unwrap();
    assert_eq!(&bytes[..], b"hello");
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn non_200_status_is_a_remote_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/tts/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .tts
        .completions("hi", &TtsParams::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ShardError::Remote(503)));
}

#[tokio::test]
async fn blocking_client_shares_the_same_semantics() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/tts/completions"))
        .and(body_partial_json(json!({"voice": "Rachel"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(audio_body("data:audio/mpeg;base64,aGVsbG8=")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let bytes = tokio::task::spawn_blocking(move || {
        let client = BlockingShardClient::with_options(
            TransportOptions::new("test-key").with_base_url(uri),
        );
        let result = client.tts.completions("hi", &TtsParams::default())?;
        result.as_bytes_blocking()
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(&bytes[..], b"hello");
}

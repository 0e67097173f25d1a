//! Contract tests for instant voice cloning against a mocked Play.ht server.


use fixture::{Fixture, API_KEY, USER_ID};
use serde_json::json;
use voxclone_core::voice::{VoiceError, VoiceProvider, VoiceSample};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

fn sample(filename: &str) -> VoiceSample {
    VoiceSample::new(filename, b"RIFF....WAVEfmt sample-bytes".to_vec()).unwrap()
}

#[tokio::test]
async fn test_clone_uploads_multipart_sample() {
    let fixture = Fixture::new().await;

    Mock::given(method("POST"))
        .and(path("/cloned-voices/instant"))
        .and(header("X-User-ID", USER_ID))
        .and(header("Authorization", format!("Bearer {API_KEY}").as_str()))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "s3://voice-cloning-zero-shot/abc/narrator/manifest.json",
            "name": "Narrator",
            "type": "instant"
        })))
        .expect(1)
        .mount(&fixture.server)
        .await;

    let voice = fixture
        .provider
        .clone_voice(sample("narrator.mp3"), "Narrator")
        .await
        .unwrap();

    assert_eq!(
        voice.id.as_str(),
        "s3://voice-cloning-zero-shot/abc/narrator/manifest.json"
    );
    assert_eq!(voice.name, "Narrator");

    let requests = fixture.server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains(r#"name="sample_file"; filename="narrator.mp3""#));
    assert!(body.contains("Content-Type: audio/mp3"));
    assert!(body.contains("sample-bytes"));
    assert!(body.contains(r#"name="voice_name""#));
    assert!(body.contains("Narrator"));
}

#[tokio::test]
async fn test_unknown_extension_is_uploaded_as_wav() {
    let fixture = Fixture::new().await;

    Mock::given(method("POST"))
        .and(path("/cloned-voices/instant"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "v-1"})))
        .mount(&fixture.server)
        .await;

    fixture
        .provider
        .clone_voice(sample("recording.aiff"), "Aiff")
        .await
        .unwrap();

    let requests = fixture.server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("Content-Type: audio/wav"));
}

#[tokio::test]
async fn test_voice_id_field_is_accepted() {
    let fixture = Fixture::new().await;

    Mock::given(method("POST"))
        .and(path("/cloned-voices/instant"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"voice_id": "v-42"})))
        .mount(&fixture.server)
        .await;

    let voice = fixture
        .provider
        .clone_voice(sample("take.wav"), "Fallback Name")
        .await
        .unwrap();

    assert_eq!(voice.id.as_str(), "v-42");
    assert_eq!(voice.name, "Fallback Name");
}

#[tokio::test]
async fn test_success_without_identifier_is_content_error() {
    let fixture = Fixture::new().await;

    Mock::given(method("POST"))
        .and(path("/cloned-voices/instant"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "Narrator"})))
        .mount(&fixture.server)
        .await;

    let err = fixture
        .provider
        .clone_voice(sample("take.wav"), "Narrator")
        .await
        .unwrap_err();

    assert!(matches!(err, VoiceError::Content(_)), "got {err:?}");
}

#[tokio::test]
async fn test_success_with_non_json_body_is_content_error() {
    let fixture = Fixture::new().await;

    Mock::given(method("POST"))
        .and(path("/cloned-voices/instant"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .mount(&fixture.server)
        .await;

    let err = fixture
        .provider
        .clone_voice(sample("take.wav"), "Narrator")
        .await
        .unwrap_err();

    assert!(matches!(err, VoiceError::Content(_)), "got {err:?}");
}

#[tokio::test]
async fn test_clone_error_statuses_are_classified() {
    let fixture = Fixture::new().await;

    Mock::given(method("POST"))
        .and(path("/cloned-voices/instant"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"id": "looks-fine"})))
        .up_to_n_times(1)
        .mount(&fixture.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/cloned-voices/instant"))
        .respond_with(ResponseTemplate::new(413).set_body_string("sample too large"))
        .mount(&fixture.server)
        .await;

    let forbidden = fixture
        .provider
        .clone_voice(sample("take.wav"), "Narrator")
        .await
        .unwrap_err();
    assert!(matches!(forbidden, VoiceError::Permission { .. }), "got {forbidden:?}");

    let too_large = fixture
        .provider
        .clone_voice(sample("take.wav"), "Narrator")
        .await
        .unwrap_err();
    match too_large {
        VoiceError::UnexpectedStatus { status, body } => {
            assert_eq!(status, 413);
            assert_eq!(body, "sample too large");
        }
        other => panic!("expected unexpected status, got {other:?}"),
    }
}

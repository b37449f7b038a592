//! Tests for the Gemini API client

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;

use super::*;
use insta::assert_snapshot;
use proptest::prelude::*;

fn test_client() -> GeminiClient {
    GeminiClient::new(
        "AIza-test-key".to_string(),
        "gemini-2.5-flash".to_string(),
        "gemini-2.5-flash-image".to_string(),
    )
}

/// Serve exactly one HTTP response on a local port and return its base URL
///
/// The request is read in full before replying so the client never sees a
/// reset connection.
fn serve_once(status_line: &'static str, body: String) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    std::thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream);

        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            if reader.read_line(&mut line).unwrap() == 0 {
                break;
            }
            let line = line.trim_end();
            if line.is_empty() {
                break;
            }
            if let Some((name, value)) = line.split_once(':')
                && name.eq_ignore_ascii_case("content-length")
            {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }
        let mut request_body = vec![0u8; content_length];
        reader.read_exact(&mut request_body).unwrap();

        let mut stream = reader.into_inner();
        let response = format!(
            "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).unwrap();
    });

    format!("http://{}", addr)
}

fn local_client(base_url: String) -> GeminiClient {
    let config = AiConfig {
        base_url,
        timeout_secs: 5,
        ..AiConfig::default()
    };
    GeminiClient::from_config(&config, Some("AIza-test-key".to_string())).unwrap()
}

#[test]
fn test_gemini_client_new() {
    let client = test_client();
    assert!(format!("{:?}", client).contains("GeminiClient"));
    assert_eq!(client.api_key(), "AIza-test-key");
    assert_eq!(client.model(), "gemini-2.5-flash");
    assert_eq!(client.image_model(), "gemini-2.5-flash-image");
}

#[test]
fn test_from_config_requires_api_key() {
    let result = GeminiClient::from_config(&AiConfig::default(), None);
    assert!(matches!(result, Err(AiError::NotConfigured(_))));

    let result = GeminiClient::from_config(&AiConfig::default(), Some("  ".to_string()));
    assert!(matches!(result, Err(AiError::NotConfigured(_))));
}

#[test]
fn test_from_config_uses_configured_models_and_base_url() {
    let config = AiConfig {
        model: "text-model".to_string(),
        image_model: "image-model".to_string(),
        base_url: "http://localhost:9999/v1beta/".to_string(),
        ..AiConfig::default()
    };

    let client = GeminiClient::from_config(&config, Some("key".to_string())).unwrap();

    assert_eq!(client.model(), "text-model");
    assert_eq!(client.image_model(), "image-model");
    assert_eq!(
        client.build_url("text-model"),
        "http://localhost:9999/v1beta/models/text-model:generateContent"
    );
}

#[test]
fn test_build_url_format() {
    let client = test_client();
    assert_snapshot!(
        client.build_url("gemini-2.5-flash"),
        @"https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
    );
}

#[test]
fn test_plain_text_body_has_no_generation_config() {
    let body = GeminiClient::build_text_body(&TextRequest::plain("suggest things"));

    assert!(body.get("generationConfig").is_none());
    assert_eq!(body["contents"][0]["role"], "user");
    assert_eq!(body["contents"][0]["parts"][0]["text"], "suggest things");
}

#[test]
fn test_structured_text_body() {
    let schema = serde_json::json!({"type": "OBJECT"});
    let request = TextRequest::structured("make a recipe", schema.clone(), 0.5);

    let body = GeminiClient::build_text_body(&request);
    let config = &body["generationConfig"];

    assert_eq!(config["responseMimeType"], "application/json");
    assert_eq!(config["responseSchema"], schema);
    assert_eq!(config["temperature"].as_f64(), Some(0.5));
}

#[test]
fn test_image_body_requests_image_modality() {
    let body = GeminiClient::build_image_body("a plate of pasta");

    assert_eq!(body["contents"][0]["parts"][0]["text"], "a plate of pasta");
    assert_eq!(
        body["generationConfig"]["responseModalities"],
        serde_json::json!(["IMAGE"])
    );
}

// Any prompt, however odd, lands verbatim in the single user part
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_prompt_round_trips_into_body(prompt in ".*") {
        let body = GeminiClient::build_text_body(&TextRequest::plain(prompt.clone()));
        let serialized = serde_json::to_string(&body).unwrap();
        let parsed: Value = serde_json::from_str(&serialized).unwrap();

        let contents = parsed["contents"].as_array().unwrap();
        prop_assert_eq!(contents.len(), 1);
        prop_assert_eq!(parsed["contents"][0]["parts"][0]["text"].as_str(), Some(prompt.as_str()));
    }
}

#[test]
fn test_response_text_concatenates_parts() {
    let response = parse_response(
        r#"{"candidates": [{"content": {"parts": [{"text": "olive oil, "}, {"text": "salt"}]}}]}"#,
    )
    .unwrap();

    assert_eq!(response.text().unwrap(), "olive oil, salt");
}

#[test]
fn test_response_text_without_content_is_empty() {
    let response = parse_response(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#).unwrap();
    assert_eq!(response.text().unwrap(), "");
}

#[test]
fn test_response_without_candidates_is_parse_error() {
    let response = parse_response(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#).unwrap();
    assert!(matches!(response.text(), Err(AiError::Parse(_))));
    assert!(matches!(response.first_image(), Err(AiError::Parse(_))));
}

#[test]
fn test_first_image_skips_text_parts() {
    let response = parse_response(
        r#"{"candidates": [{"content": {"parts": [
            {"text": "Here is your dish"},
            {"inlineData": {"mimeType": "image/jpeg", "data": "AAAA"}},
            {"inlineData": {"mimeType": "image/png", "data": "BBBB"}}
        ]}}]}"#,
    )
    .unwrap();

    let image = response.first_image().unwrap();
    assert_eq!(image.mime_type, "image/jpeg");
    assert_eq!(image.data, "AAAA");
}

#[test]
fn test_first_image_missing_is_missing_image_error() {
    let response =
        parse_response(r#"{"candidates": [{"content": {"parts": [{"text": "sorry"}]}}]}"#)
            .unwrap();
    assert_eq!(response.first_image(), Err(AiError::MissingImage));
}

#[test]
fn test_parse_response_invalid_json() {
    assert!(matches!(parse_response("<html>"), Err(AiError::Parse(_))));
}

#[test]
fn test_extract_error_message() {
    let body = r#"{"error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}}"#;
    assert_eq!(extract_error_message(body), "API key not valid.");
    assert_eq!(extract_error_message("upstream timeout"), "upstream timeout");
    assert_eq!(extract_error_message(""), "Unknown error");
}

#[tokio::test]
async fn test_generate_text_against_local_server() {
    let body = r#"{"candidates": [{"content": {"parts": [{"text": "salt, pepper"}]}}]}"#;
    let client = local_client(serve_once("200 OK", body.to_string()));

    let text = client
        .generate_text(TextRequest::plain("suggest"))
        .await
        .unwrap();

    assert_eq!(text, "salt, pepper");
}

#[tokio::test]
async fn test_generate_image_against_local_server() {
    let body = r#"{"candidates": [{"content": {"parts": [{"inlineData": {"mimeType": "image/png", "data": "aGVsbG8="}}]}}]}"#;
    let client = local_client(serve_once("200 OK", body.to_string()));

    let image = client.generate_image("a dish").await.unwrap();

    assert_eq!(image.data_uri(), "data:image/png;base64,aGVsbG8=");
}

#[tokio::test]
async fn test_api_error_status_is_mapped() {
    let body = r#"{"error": {"code": 403, "message": "Permission denied"}}"#;
    let client = local_client(serve_once("403 Forbidden", body.to_string()));

    let result = client.generate_text(TextRequest::plain("suggest")).await;

    assert_eq!(
        result,
        Err(AiError::Api {
            code: 403,
            message: "Permission denied".to_string()
        })
    );
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    // Bind then drop to get a port nothing listens on
    let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
    let client = local_client(format!("http://{}", addr));

    let result = client.generate_text(TextRequest::plain("suggest")).await;

    assert!(matches!(result, Err(AiError::Network(_))));
}

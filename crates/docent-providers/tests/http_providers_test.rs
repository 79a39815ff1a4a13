//! HTTP providers against a canned local server.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::JoinHandle;
use std::time::Duration;

use docent_core::errors::{RerankError, SynthesisError};
use docent_core::models::ChatMessage;
use docent_core::traits::{CompletionRequest, ICrossEncoder, IEmbeddingProvider, ILlmJudge};
use docent_core::DocentError;
use docent_providers::{HttpCrossEncoder, HttpSettings, OpenAiClient};

struct Canned {
    status: u16,
    content_type: &'static str,
    body: String,
}

fn json(status: u16, body: &str) -> Canned {
    Canned {
        status,
        content_type: "application/json",
        body: body.to_string(),
    }
}

/// Serves the canned responses in order, one per connection, and returns
/// each request line plus body.
fn serve(responses: Vec<Canned>) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let handle = std::thread::spawn(move || {
        let mut seen = Vec::new();
        for canned in responses {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            let mut content_length = 0usize;
            loop {
                let mut header = String::new();
                reader.read_line(&mut header).unwrap();
                if header == "\r\n" || header.is_empty() {
                    break;
                }
                let lower = header.to_ascii_lowercase();
                if let Some(v) = lower.strip_prefix("content-length:") {
                    content_length = v.trim().parse().unwrap();
                }
            }
            let mut body = vec![0u8; content_length];
            reader.read_exact(&mut body).unwrap();
            seen.push(format!("{}{}", request_line.trim_end(), String::from_utf8_lossy(&body)));

            let mut stream = stream;
            write!(
                stream,
                "HTTP/1.1 {} X\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                canned.status,
                canned.content_type,
                canned.body.len(),
                canned.body
            )
            .unwrap();
            stream.flush().unwrap();
        }
        seen
    });
    (base, handle)
}

fn settings(base: &str) -> HttpSettings {
    HttpSettings::new(base)
        .with_api_key("test-key")
        .with_timeout(Duration::from_secs(5))
}

fn request() -> CompletionRequest {
    CompletionRequest {
        messages: vec![ChatMessage::system("be brief"), ChatMessage::user("hi")],
        model: "gpt-test".into(),
        temperature: 0.1,
        max_tokens: 32,
    }
}

#[test]
fn chat_completion_returns_first_choice() {
    let (base, server) = serve(vec![json(
        200,
        r#"{"choices":[{"message":{"role":"assistant","content":"hello there"}}]}"#,
    )]);
    let client = OpenAiClient::new(settings(&base)).unwrap();
    assert_eq!(client.complete(&request()).unwrap(), "hello there");

    let seen = server.join().unwrap();
    assert!(seen[0].starts_with("POST /chat/completions"));
    assert!(seen[0].contains(r#""model":"gpt-test""#));
    assert!(!seen[0].contains("stream"));
}

#[test]
fn chat_error_status_is_call_failed() {
    let (base, server) = serve(vec![json(500, r#"{"error":"boom"}"#)]);
    let client = OpenAiClient::new(settings(&base)).unwrap();
    let err = client.complete(&request()).unwrap_err();
    assert!(matches!(err, SynthesisError::CallFailed { ref reason } if reason.contains("500")));
    server.join().unwrap();
}

#[test]
fn missing_choices_is_empty_completion() {
    let (base, server) = serve(vec![json(200, r#"{"choices":[]}"#)]);
    let client = OpenAiClient::new(settings(&base)).unwrap();
    assert!(matches!(client.complete(&request()), Err(SynthesisError::EmptyCompletion)));
    server.join().unwrap();
}

#[test]
fn streaming_yields_content_deltas() {
    let body = concat!(
        "data: {\"choices\":[{\"delta\":{\"role\":\"assistant\"}}]}\n\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\"Fail\"}}]}\n\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\"over [1]\"}}]}\n\n",
        "data: [DONE]\n\n",
    );
    let (base, server) = serve(vec![Canned {
        status: 200,
        content_type: "text/event-stream",
        body: body.to_string(),
    }]);
    let client = OpenAiClient::new(settings(&base)).unwrap();
    let tokens: Vec<String> = client
        .stream(&request())
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(tokens, vec!["Fail".to_string(), "over [1]".to_string()]);

    let seen = server.join().unwrap();
    assert!(seen[0].contains(r#""stream":true"#));
}

#[test]
fn embeddings_are_reordered_by_index() {
    let (base, server) = serve(vec![json(
        200,
        r#"{"data":[{"index":1,"embedding":[0.0,1.0]},{"index":0,"embedding":[1.0,0.0]}]}"#,
    )]);
    let client = OpenAiClient::new(settings(&base)).unwrap();
    let out = client
        .embed_batch(&["a".to_string(), "b".to_string()], "embed-test")
        .unwrap();
    assert_eq!(out, vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
    let seen = server.join().unwrap();
    assert!(seen[0].starts_with("POST /embeddings"));
}

#[test]
fn embedding_count_mismatch_is_reported() {
    let (base, server) = serve(vec![json(200, r#"{"data":[{"index":0,"embedding":[1.0]}]}"#)]);
    let client = OpenAiClient::new(settings(&base)).unwrap();
    let err = client
        .embed_batch(&["a".to_string(), "b".to_string()], "m")
        .unwrap_err();
    assert!(matches!(err, DocentError::EmbeddingError(_)));
    server.join().unwrap();
}

#[test]
fn unreachable_endpoint_marks_client_unavailable() {
    // Bind then drop to get a port nothing listens on.
    let port = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
    let client = OpenAiClient::new(settings(&format!("http://127.0.0.1:{port}"))).unwrap();
    assert!(ILlmJudge::is_available(&client));
    assert!(client.complete(&request()).is_err());
    assert!(!ILlmJudge::is_available(&client));
    client.reset_availability();
    assert!(ILlmJudge::is_available(&client));
}

#[test]
fn cross_encoder_is_unavailable_until_probed() {
    let (base, server) = serve(vec![
        json(200, r#"{"status":"ok"}"#),
        json(200, r#"{"scores":[0.2,0.9]}"#),
    ]);
    let ce = HttpCrossEncoder::new(settings(&base), "ce-test").unwrap();
    assert!(!ce.is_available());
    assert!(ce.probe());
    assert!(ce.is_available());

    let scores = ce
        .predict("failover", &["billing".to_string(), "failover".to_string()])
        .unwrap();
    assert_eq!(scores, vec![0.2, 0.9]);

    let seen = server.join().unwrap();
    assert!(seen[0].starts_with("GET /health"));
    assert!(seen[1].starts_with("POST /rerank"));
    assert!(seen[1].contains(r#""documents":["billing","failover"]"#));
}

#[test]
fn cross_encoder_score_count_must_match() {
    let (base, server) = serve(vec![json(200, r#"{"scores":[0.5]}"#)]);
    let ce = HttpCrossEncoder::new(settings(&base), "ce-test").unwrap();
    let err = ce
        .predict("q", &["a".to_string(), "b".to_string()])
        .unwrap_err();
    assert!(matches!(err, RerankError::ScoreCountMismatch { expected: 2, actual: 1 }));
    server.join().unwrap();
}

#[test]
fn failed_probe_keeps_cross_encoder_unavailable() {
    let (base, server) = serve(vec![json(503, "{}")]);
    let ce = HttpCrossEncoder::new(settings(&base), "ce-test").unwrap();
    assert!(!ce.probe());
    assert!(!ce.is_available());
    server.join().unwrap();
}

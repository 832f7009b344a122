//! Wire-level contract tests: bind a localhost listener, capture the raw
//! request the client sends, and check field names against what the backend
//! binds. Shape drift here fails server-side with a 400/422 on every call,
//! so it is locked down explicitly.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;

use ff_api::{ApiClient, Session, SessionData};

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Accept one connection, capture the full request (headers + body), answer
/// with an empty JSON object.
fn capture_one_request(listener: TcpListener) -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let Ok((mut stream, _)) = listener.accept() else {
            return;
        };
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            match stream.read(&mut chunk) {
                Ok(0) | Err(_) => break,
                Ok(n) => buf.extend_from_slice(&chunk[..n]),
            }
            if let Some(end) = find_subslice(&buf, b"\r\n\r\n") {
                let headers = String::from_utf8_lossy(&buf[..end]).to_string();
                let content_length = headers
                    .lines()
                    .find_map(|line| {
                        let (key, value) = line.split_once(':')?;
                        key.trim()
                            .eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buf.len() >= end + 4 + content_length {
                    break;
                }
            }
        }
        let _ = stream.write_all(
            b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 2\r\nconnection: close\r\n\r\n{}",
        );
        let _ = tx.send(String::from_utf8_lossy(&buf).into_owned());
    });
    rx
}

fn local_client(listener: &TcpListener) -> ApiClient {
    let addr = listener.local_addr().expect("listener addr");
    ApiClient::new(format!("http://{addr}"), Session::new(SessionData::default()))
        .expect("client build")
}

#[tokio::test]
async fn financial_team_sends_query_field() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let client = local_client(&listener);
    let captured = capture_one_request(listener);

    client
        .financial_team("should I retire early")
        .await
        .expect("request should settle");

    let request = captured.recv().expect("captured request");
    assert!(request.starts_with("POST /api/financial-team"));
    // The backend binds `query` and 400s without it.
    assert!(request.contains(r#""query":"should I retire early""#), "{request}");
    assert!(!request.contains(r#""message""#), "{request}");
}

#[tokio::test]
async fn product_chat_sends_message_field() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let client = local_client(&listener);
    let captured = capture_one_request(listener);

    client
        .chat_products("low-fee index funds")
        .await
        .expect("request should settle");

    let request = captured.recv().expect("captured request");
    assert!(request.starts_with("POST /api/chat/products"));
    assert!(request.contains(r#""message":"low-fee index funds""#), "{request}");
}

#[tokio::test]
async fn voice_upload_part_is_named_file() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let client = local_client(&listener);
    let captured = capture_one_request(listener);

    client
        .voice_to_text("clip.wav", vec![0x52, 0x49, 0x46, 0x46])
        .await
        .expect("request should settle");

    let request = captured.recv().expect("captured request");
    assert!(request.starts_with("POST /api/voice-to-text"));
    // The backend binds `file: UploadFile`; any other part name is a 422.
    assert!(request.contains(r#"name="file""#), "{request}");
    assert!(request.contains(r#"filename="clip.wav""#), "{request}");
    assert!(!request.contains(r#"name="audio""#), "{request}");
}

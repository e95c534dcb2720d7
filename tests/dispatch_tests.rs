//! Dispatch boundary tests against a local single-shot HTTP server

#![cfg(feature = "cli")]

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;
use web2app::dispatch::{dispatch_workflow_to, DispatchRequest};
use web2app::BuildError;

/// Accept one connection, capture the request, send a canned response.
fn single_shot_server(status_line: &'static str, body: &'static str) -> (String, thread::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 4096];

        // Read headers, then exactly content-length body bytes.
        let (headers_end, content_length) = loop {
            let n = stream.read(&mut chunk).unwrap();
            buffer.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buffer);
            if let Some(end) = text.find("\r\n\r\n") {
                let length = text
                    .lines()
                    .find_map(|line| {
                        let (key, value) = line.split_once(':')?;
                        if key.eq_ignore_ascii_case("content-length") {
                            value.trim().parse::<usize>().ok()
                        } else {
                            None
                        }
                    })
                    .unwrap_or(0);
                break (end + 4, length);
            }
        };
        while buffer.len() < headers_end + content_length {
            let n = stream.read(&mut chunk).unwrap();
            buffer.extend_from_slice(&chunk[..n]);
        }

        let response = format!(
            "HTTP/1.1 {}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).unwrap();

        String::from_utf8_lossy(&buffer).into_owned()
    });

    (base, handle)
}

fn request() -> DispatchRequest {
    let mut request = DispatchRequest::new("token", "acme/shell", "Demo App", "com.demo.app");
    request.web_url = Some("https://example.com".into());
    request
}

#[tokio::test(flavor = "multi_thread")]
async fn accepted_dispatch_hits_the_workflow_endpoint() {
    let (base, server) = single_shot_server("204 No Content", "");

    dispatch_workflow_to(&base, &request()).await.unwrap();

    let captured = server.join().unwrap();
    assert!(captured.starts_with("POST /repos/acme/shell/actions/workflows/build.yml/dispatches"));
    assert!(captured.contains("authorization: Bearer token")
        || captured.contains("Authorization: Bearer token"));
    assert!(captured.contains("2022-11-28"));
    assert!(captured.contains(r#""ref":"main""#));
    assert!(captured.contains(r#""app_name":"Demo App""#));
    assert!(captured.contains(r#""app_id":"com.demo.app""#));
    assert!(captured.contains(r#""web_url":"https://example.com""#));
}

#[tokio::test(flavor = "multi_thread")]
async fn rejected_dispatch_surfaces_the_remote_status() {
    let (base, server) = single_shot_server("401 Unauthorized", "{\"message\":\"Bad credentials\"}");

    let result = dispatch_workflow_to(&base, &request()).await;
    server.join().unwrap();

    match result {
        Err(BuildError::Dispatch(message)) => {
            assert!(message.contains("401"), "message was: {}", message);
        }
        other => panic!("expected dispatch error, got {:?}", other),
    }
}

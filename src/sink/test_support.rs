// src/sink/test_support.rs

#![cfg(test)]

use reqwest::blocking::Client;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Throwaway 2048-bit RSA key; only ever signs requests to `FakeServer`.
pub const TEST_RSA_KEY_PEM: &str = include_str!("testdata/test_rsa_key.pem");

#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub method: String,
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl SeenRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body is json")
    }
}

/// Answers exactly one connection per scripted `(status, body)` and closes it.
pub struct FakeServer {
    pub base: String,
    handle: JoinHandle<Vec<SeenRequest>>,
}

impl FakeServer {
    pub fn start(responses: Vec<(u16, &str)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let base = format!("http://{}", listener.local_addr().expect("addr"));
        let responses: Vec<(u16, String)> = responses
            .into_iter()
            .map(|(s, b)| (s, b.to_string()))
            .collect();

        let handle = thread::spawn(move || {
            let mut seen = Vec::new();
            for (status, body) in responses {
                let Ok((stream, _)) = listener.accept() else {
                    break;
                };
                seen.push(serve_one(stream, status, &body));
            }
            seen
        });

        Self { base, handle }
    }

    /// Waits for every scripted exchange and returns the requests in order.
    pub fn finish(self) -> Vec<SeenRequest> {
        self.handle.join().expect("fake server thread")
    }
}

/// Client that never routes loopback traffic through an ambient proxy.
pub fn direct_client() -> Client {
    Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(10))
        .build()
        .expect("client")
}

fn serve_one(mut stream: TcpStream, status: u16, body: &str) -> SeenRequest {
    let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));

    let mut line = String::new();
    reader.read_line(&mut line).expect("request line");
    let mut parts = line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let target = parts.next().unwrap_or_default().to_string();

    let mut headers = Vec::new();
    loop {
        let mut h = String::new();
        reader.read_line(&mut h).expect("header line");
        let h = h.trim_end();
        if h.is_empty() {
            break;
        }
        if let Some((k, v)) = h.split_once(':') {
            headers.push((k.trim().to_string(), v.trim().to_string()));
        }
    }

    let len = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);
    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf).expect("request body");

    let reply = format!(
        "HTTP/1.1 {status} Fake\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(reply.as_bytes()).expect("write response");
    stream.flush().expect("flush");

    SeenRequest {
        method,
        target,
        headers,
        body: String::from_utf8_lossy(&buf).into_owned(),
    }
}

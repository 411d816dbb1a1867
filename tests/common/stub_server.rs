/*!
 * One-shot HTTP server for exercising the chat-completion client on the wire
 */

use anyhow::{Context, Result, anyhow};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Request as received by the stub server
#[derive(Debug)]
pub struct RecordedRequest {
    /// Request line, e.g. `POST /v1/chat/completions HTTP/1.1`
    pub request_line: String,
    /// Header block, lowercased
    pub headers: String,
    /// Raw body
    pub body: String,
}

impl RecordedRequest {
    /// Body parsed as JSON
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap_or(serde_json::Value::Null)
    }
}

/// Server answering exactly one request with a canned response
pub struct StubServer {
    /// Base URL to use as the client endpoint, ending in `/v1`
    pub endpoint: String,
    handle: JoinHandle<Result<RecordedRequest>>,
}

impl StubServer {
    /// Bind to a free local port and answer the first request with `status` and `body`
    pub async fn respond_once(status: u16, body: impl Into<String>) -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let endpoint = format!("http://{}/v1", listener.local_addr()?);
        let body = body.into();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await?;
            let request = read_request(&mut socket).await?;

            let response = format!(
                "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                reason_phrase(status),
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await?;
            socket.shutdown().await?;
            Ok::<_, anyhow::Error>(request)
        });

        Ok(Self { endpoint, handle })
    }

    /// Wait for the server task and return what it received
    pub async fn received(self) -> Result<RecordedRequest> {
        self.handle.await.context("Stub server task panicked")?
    }
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> Result<RecordedRequest> {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let read = socket.read(&mut chunk).await?;
        if read == 0 {
            return Err(anyhow!("Connection closed before headers were complete"));
        }
        buffer.extend_from_slice(&chunk[..read]);
        if let Some(pos) = find_subsequence(&buffer, b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buffer[..header_end]).to_string();
    let mut lines = head.lines();
    let request_line = lines.next().unwrap_or_default().to_string();
    let headers = lines.collect::<Vec<_>>().join("\n").to_lowercase();

    let content_length = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buffer.len() < header_end + content_length {
        let read = socket.read(&mut chunk).await?;
        if read == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..read]);
    }

    let body_end = (header_end + content_length).min(buffer.len());
    let body = String::from_utf8_lossy(&buffer[header_end..body_end]).to_string();

    Ok(RecordedRequest { request_line, headers, body })
}

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        401 => "Unauthorized",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        _ => "Status",
    }
}

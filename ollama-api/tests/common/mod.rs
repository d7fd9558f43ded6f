//! Scripted HTTP/1.1 stub server for driving the client in tests.
//!
//! Each accepted connection consumes the next [`Reply`] and is closed after
//! answering, so the client never reuses a connection between requests.

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

use ollama_api::{Ollama, OllamaConfig};

/// A canned response.
#[derive(Debug, Clone)]
pub struct Reply {
    status: u16,
    content_type: &'static str,
    body: Body,
}

#[derive(Debug, Clone)]
enum Body {
    Full(String),
    Chunked(Vec<String>),
}

impl Reply {
    /// A JSON body sent with `Content-Length`.
    pub fn json(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: "application/json; charset=utf-8",
            body: Body::Full(body.into()),
        }
    }

    /// A plain text body.
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: "text/plain; charset=utf-8",
            body: Body::Full(body.into()),
        }
    }

    /// No body at all.
    pub fn empty(status: u16) -> Self {
        Self::text(status, "")
    }

    /// A chunked NDJSON body; each piece is written and flushed separately.
    ///
    /// Pieces are raw bytes on the wire, so a JSON line may be split across them.
    pub fn ndjson<I, S>(pieces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            status: 200,
            content_type: "application/x-ndjson",
            body: Body::Chunked(pieces.into_iter().map(Into::into).collect()),
        }
    }
}

/// A request as the stub received it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("request body should be JSON")
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// A running stub server.
pub struct StubServer {
    pub base_url: String,
    requests: mpsc::UnboundedReceiver<Recorded>,
}

impl StubServer {
    /// Start a server answering one connection per reply, in order.
    pub async fn start(replies: Vec<Reply>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let (tx, requests) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            for reply in replies {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let request = read_request(&mut socket).await;
                let is_head = request.method == "HEAD";
                let _ = tx.send(request);
                // The client may hang up early; that is what some tests check.
                let _ = write_reply(&mut socket, &reply, is_head).await;
                let _ = socket.shutdown().await;
            }
        });

        Self { base_url, requests }
    }

    /// A client pointed at this server.
    pub fn client(&self) -> Ollama {
        Ollama::new(OllamaConfig::new().base_url(&self.base_url).timeout(10)).unwrap()
    }

    /// The next request the server received.
    pub async fn request(&mut self) -> Recorded {
        tokio::time::timeout(Duration::from_secs(5), self.requests.recv())
            .await
            .expect("timed out waiting for a request")
            .expect("server stopped")
    }

    /// Number of requests received and not yet taken.
    pub fn pending(&mut self) -> usize {
        let mut n = 0;
        while self.requests.try_recv().is_ok() {
            n += 1;
        }
        n
    }
}

/// A client pointed at a port nothing listens on.
pub fn unreachable_client() -> Ollama {
    Ollama::new(OllamaConfig::new().base_url("http://127.0.0.1:9").connect_timeout(2)).unwrap()
}

async fn read_request(socket: &mut TcpStream) -> Recorded {
    let mut buf = Vec::new();
    let mut chunk = [0_u8; 4096];

    let head_end = loop {
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos + 4;
        }
        let n = socket.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before request head");
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).into_owned();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next().unwrap().split(' ');
    let method = request_line.next().unwrap().to_owned();
    let path = request_line.next().unwrap().to_owned();
    let headers: Vec<(String, String)> = lines
        .filter(|l| !l.is_empty())
        .filter_map(|l| l.split_once(':'))
        .map(|(n, v)| (n.trim().to_owned(), v.trim().to_owned()))
        .collect();

    let header = |name: &str| {
        headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.clone())
    };

    let mut body = buf[head_end..].to_vec();
    if let Some(len) = header("content-length") {
        let len: usize = len.parse().unwrap();
        while body.len() < len {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "connection closed before request body");
            body.extend_from_slice(&chunk[..n]);
        }
    } else if header("transfer-encoding").is_some_and(|v| v.eq_ignore_ascii_case("chunked")) {
        while !body.ends_with(b"0\r\n\r\n") {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "connection closed before request body");
            body.extend_from_slice(&chunk[..n]);
        }
    }

    Recorded {
        method,
        path,
        headers,
        body,
    }
}

async fn write_reply(socket: &mut TcpStream, reply: &Reply, is_head: bool) -> std::io::Result<()> {
    let status_line = format!("HTTP/1.1 {} Stub\r\n", reply.status);
    match &reply.body {
        Body::Full(body) => {
            let mut out = format!(
                "{status_line}Content-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                reply.content_type,
                body.len()
            );
            if !is_head {
                out.push_str(body);
            }
            socket.write_all(out.as_bytes()).await?;
        }
        Body::Chunked(pieces) => {
            let head = format!(
                "{status_line}Content-Type: {}\r\nTransfer-Encoding: chunked\r\nConnection: close\r\n\r\n",
                reply.content_type
            );
            socket.write_all(head.as_bytes()).await?;
            socket.flush().await?;
            for piece in pieces {
                let frame = format!("{:x}\r\n{piece}\r\n", piece.len());
                socket.write_all(frame.as_bytes()).await?;
                socket.flush().await?;
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
            socket.write_all(b"0\r\n\r\n").await?;
        }
    }
    socket.flush().await
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

//! A tiny HTTP/1.1 responder that plays back one canned reply per connection.

use std::time::Duration;

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
    sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender},
};

pub(crate) struct Request {
    pub(crate) head: String,
    pub(crate) body: String,
}

impl Request {
    pub(crate) fn request_line(&self) -> &str {
        self.head.lines().next().unwrap_or_default()
    }

    pub(crate) fn header(&self, name: &str) -> Option<&str> {
        self.head.lines().skip(1).find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.trim()
                .eq_ignore_ascii_case(name)
                .then_some(value.trim())
        })
    }
}

pub(crate) struct Stub {
    pub(crate) url: String,
    pub(crate) requests: UnboundedReceiver<Request>,
    pub(crate) closed: UnboundedReceiver<()>,
}

impl Stub {
    /// Replies with `reply` and closes the connection.
    pub(crate) async fn once(reply: String) -> Self {
        Self::spawn(reply, false).await
    }

    /// Replies with `reply` and keeps the connection open until the client hangs up.
    pub(crate) async fn streaming(reply: String) -> Self {
        Self::spawn(reply, true).await
    }

    pub(crate) async fn next_request(&mut self) -> Request {
        tokio::time::timeout(Duration::from_secs(5), self.requests.recv())
            .await
            .expect("a request within the timeout")
            .expect("stub is running")
    }

    async fn spawn(reply: String, hold_open: bool) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());

        let (request_tx, requests) = unbounded_channel();
        let (closed_tx, closed) = unbounded_channel();

        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                tokio::spawn(serve(
                    stream,
                    reply.clone(),
                    hold_open,
                    request_tx.clone(),
                    closed_tx.clone(),
                ));
            }
        });

        Self {
            url,
            requests,
            closed,
        }
    }
}

pub(crate) fn event_stream(body: &str) -> String {
    format!(
        "HTTP/1.1 200 OK\r\ncontent-type: text/event-stream\r\ncache-control: no-cache\r\n\r\n{body}"
    )
}

pub(crate) fn json(status: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {len}\r\nconnection: close\r\n\r\n{body}",
        len = body.len()
    )
}

async fn serve(
    mut stream: TcpStream,
    reply: String,
    hold_open: bool,
    requests: UnboundedSender<Request>,
    closed: UnboundedSender<()>,
) {
    let Ok(request) = read_request(&mut stream).await else {
        return;
    };
    let _ = requests.send(request);

    if stream.write_all(reply.as_bytes()).await.is_err() || stream.flush().await.is_err() {
        return;
    }

    if hold_open {
        let mut buf = [0u8; 256];
        while matches!(stream.read(&mut buf).await, Ok(n) if n > 0) {}
        let _ = closed.send(());
    } else {
        let _ = stream.shutdown().await;
    }
}

async fn read_request(stream: &mut TcpStream) -> std::io::Result<Request> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let head_end = loop {
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Err(std::io::ErrorKind::UnexpectedEof.into());
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).into_owned();
    let mut request = Request {
        head,
        body: String::new(),
    };

    let len = request
        .header("content-length")
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < head_end + len {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Err(std::io::ErrorKind::UnexpectedEof.into());
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    request.body = String::from_utf8_lossy(&buf[head_end..head_end + len]).into_owned();
    Ok(request)
}

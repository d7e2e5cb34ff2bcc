use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

use crate::Message;

use super::Endpoint;

#[derive(Clone)]
pub struct Writer {
    pub(in crate::realtime) send: UnboundedSender<WriteKind>,
}

pub(in crate::realtime) enum WriteKind {
    Set { path: String, message: Message },
}

impl Writer {
    /// Queues a write of `message` at `path`. Nothing reports back.
    pub fn set(&self, path: impl ToString, message: Message) {
        let _ = self.send.send(WriteKind::Set {
            path: path.to_string(),
            message,
        });
    }
}

pub(in crate::realtime) async fn run(
    http: reqwest::Client,
    endpoint: Endpoint,
    mut write: UnboundedReceiver<WriteKind>,
) {
    while let Some(kind) = write.recv().await {
        match kind {
            WriteKind::Set { path, message } => {
                let request = endpoint.authorize(http.put(endpoint.url(&path)));
                let result = request
                    .json(&message)
                    .send()
                    .await
                    .and_then(reqwest::Response::error_for_status);

                match result {
                    Ok(..) => tracing::debug!(%path, "write accepted"),
                    Err(err) => tracing::warn!(%path, %err, "write failed"),
                }
            }
        }
    }

    tracing::debug!("writer closed");
}

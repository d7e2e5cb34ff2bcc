//! Client for a hosted realtime database over its REST streaming interface.
//!
//! Reads are a server-sent event stream of `put`/`patch` changes applied to
//! a local [`Tree`]; every change is delivered as a full snapshot. Writes are
//! `PUT`s queued to a background [`Writer`].

use std::sync::Arc;

use futures_util::StreamExt as _;
use reqwest_eventsource::{Event as SseEvent, EventSource};
use tokio::sync::mpsc::UnboundedSender;

use crate::{repaint::Repaint, Message};

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub auth: Option<String>,
}

/// The backend operations the chat needs.
pub trait Store {
    /// A fresh unique key, or `None` if one cannot be produced.
    fn generate_key(&self) -> Option<String>;

    /// Issues a write of `message` under `key`. Fire-and-forget.
    fn write(&self, key: &str, message: Message);
}

#[derive(Clone, Debug)]
pub(crate) struct Endpoint {
    base: String,
    auth: Option<Arc<str>>,
}

impl Endpoint {
    fn url(&self, path: &str) -> String {
        format!("{base}/{path}.json", base = self.base)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth {
            Some(auth) => request.query(&[("auth", &**auth)]),
            None => request,
        }
    }
}

#[derive(serde::Deserialize)]
struct Change {
    path: String,
    #[serde(default)]
    data: serde_json::Value,
}

async fn run(
    request: reqwest::RequestBuilder,
    path: String,
    repaint: impl Repaint,
    read: UnboundedSender<Event>,
) {
    macro_rules! send_event {
        ($ev:expr) => {
            if read.send($ev).is_err() {
                break;
            }
            repaint.repaint();
        };
    }

    let mut source = match EventSource::new(request) {
        Ok(source) => source,
        Err(err) => {
            let error = SubscriptionError::Request(format!("{err:?}"));
            tracing::warn!(%path, %error, "failed to read messages");
            if read.send(Event::Cancelled { error }).is_ok() {
                repaint.repaint();
            }
            return;
        }
    };

    let mut tree = Tree::default();

    while let Some(event) = source.next().await {
        let message = match event {
            Ok(SseEvent::Open) => {
                tracing::debug!(%path, "stream open");
                continue;
            }
            Ok(SseEvent::Message(message)) => message,
            Err(err) => {
                let error = SubscriptionError::classify(&err);
                if error.is_terminal() {
                    tracing::warn!(%path, %error, "failed to read messages");
                    send_event!(Event::Cancelled { error });
                    break;
                }
                tracing::warn!(%path, %error, "stream interrupted, reconnecting");
                send_event!(Event::Interrupted { error });
                continue;
            }
        };

        match message.event.as_str() {
            kind @ ("put" | "patch") => {
                let change = match serde_json::from_str::<Change>(&message.data) {
                    Ok(change) => change,
                    Err(err) => {
                        tracing::warn!(%path, %err, data = %message.data.escape_debug(), "cannot decode change");
                        continue;
                    }
                };

                if kind == "put" {
                    tree.put(&change.path, change.data);
                } else {
                    tree.patch(&change.path, change.data);
                }

                let messages = tree.messages();
                tracing::trace!(%path, count = messages.len(), "snapshot");
                send_event!(Event::Snapshot { messages });
            }

            "keep-alive" => {}

            "cancel" => {
                let error = SubscriptionError::Cancelled(reason(&message.data));
                tracing::warn!(%path, %error, "failed to read messages");
                send_event!(Event::Cancelled { error });
                break;
            }

            "auth_revoked" => {
                let error = SubscriptionError::AuthRevoked(reason(&message.data));
                tracing::warn!(%path, %error, "failed to read messages");
                send_event!(Event::Cancelled { error });
                break;
            }

            other => tracing::debug!(%path, event = other, "ignoring unknown event"),
        }
    }

    source.close();
    tracing::debug!(%path, "subscription closed");
}

fn reason(data: &str) -> String {
    serde_json::from_str::<String>(data).unwrap_or_else(|_| data.trim().to_string())
}

mod client;
pub use client::{Collection, Connection};

mod error;
pub use error::SubscriptionError;

mod events;
pub use events::{Event, Subscription};

mod push_id;
pub use push_id::PushIdGenerator;

mod tree;
pub use tree::Tree;

mod writer;
pub use writer::Writer;

#[cfg(test)]
mod stub;

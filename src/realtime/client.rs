use std::sync::Arc;

use tokio::sync::mpsc::unbounded_channel;

use crate::{repaint::Repaint, Message};

use super::{Config, Endpoint, PushIdGenerator, Store, Subscription, Writer};

/// The shared handle to the database. Cheap to clone.
#[derive(Clone)]
pub struct Connection {
    http: reqwest::Client,
    endpoint: Endpoint,
    keys: Arc<PushIdGenerator>,
    writer: Writer,
}

impl Connection {
    pub fn create(config: Config) -> Self {
        Self::with_client(config, crate::default_http_client())
    }

    /// Must be called from within a tokio runtime; the writer task is spawned here.
    pub fn with_client(config: Config, http: reqwest::Client) -> Self {
        let endpoint = Endpoint {
            base: config.database_url.trim_end_matches('/').to_string(),
            auth: config.auth.map(Arc::from),
        };

        let (send, write) = unbounded_channel();
        tokio::spawn(super::writer::run(http.clone(), endpoint.clone(), write));

        Self {
            http,
            endpoint,
            keys: Arc::default(),
            writer: Writer { send },
        }
    }

    pub fn collection(&self, path: impl Into<String>) -> Collection {
        Collection {
            connection: self.clone(),
            path: path.into().trim_matches('/').to_string(),
        }
    }
}

/// An ordered collection of messages under one path.
#[derive(Clone)]
pub struct Collection {
    connection: Connection,
    path: String,
}

impl Collection {
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Starts streaming snapshots of this collection.
    pub fn subscribe(&self, repaint: impl Repaint) -> Subscription {
        let Connection { http, endpoint, .. } = &self.connection;
        let request = endpoint.authorize(http.get(endpoint.url(&self.path)));

        let (read, recv) = unbounded_channel();
        let task = tokio::spawn({
            let path = self.path.clone();
            async move { super::run(request, path, repaint, read).await }
        });

        Subscription { recv, task }
    }
}

impl Store for Collection {
    fn generate_key(&self) -> Option<String> {
        self.connection.keys.generate()
    }

    fn write(&self, key: &str, message: Message) {
        self.connection
            .writer
            .set(format!("{path}/{key}", path = self.path), message);
    }
}

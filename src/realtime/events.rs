use tokio::{sync::mpsc::UnboundedReceiver, task::JoinHandle};

use crate::Message;

use super::SubscriptionError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// The complete current contents of the collection.
    Snapshot { messages: Vec<Message> },
    /// The connection dropped; the stream is reconnecting and the server
    /// re-sends the whole collection once it is back.
    Interrupted { error: SubscriptionError },
    /// The subscription ended; no further events follow.
    Cancelled { error: SubscriptionError },
}

/// A live subscription. Dropping it stops the stream.
pub struct Subscription {
    pub(in crate::realtime) recv: UnboundedReceiver<Event>,
    pub(in crate::realtime) task: JoinHandle<()>,
}

impl Subscription {
    pub fn poll(&mut self) -> Option<Event> {
        self.recv.try_recv().ok()
    }

    /// Waits for the next event; `None` once the stream is over.
    pub async fn next(&mut self) -> Option<Event> {
        self.recv.recv().await
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}

use crate::{
    realtime::{Event, Store},
    Message,
};

mod input;
pub use input::InputText;

mod message_list;
pub use message_list::MessageList;

/// Everything the chat screen reads and writes.
///
/// Holds the store handle used by send, the last snapshot from the
/// subscription and the text being typed.
pub struct ChatState<S> {
    store: S,
    messages: MessageList,
    input: InputText,
}

impl<S: Store> ChatState<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            messages: MessageList::default(),
            input: InputText::default(),
        }
    }

    pub fn apply(&mut self, event: Event) {
        match event {
            Event::Snapshot { messages } => self.messages.replace(messages),
            Event::Interrupted { error } => {
                tracing::warn!(%error, "message stream interrupted");
            }
            Event::Cancelled { error } => {
                tracing::warn!(%error, "failed to read messages");
            }
        }
    }

    /// Writes a new message under a fresh key. Does not touch the local list;
    /// the message shows up when the subscription reports it.
    pub fn send(&self, text: &str) {
        let Some(key) = self.store.generate_key() else {
            tracing::debug!("no key available, message dropped");
            return;
        };

        self.store.write(&key, Message::now(text));
    }

    /// Sends whatever is in the input and clears it.
    pub fn submit(&mut self) {
        let text = self.input.take();
        self.send(&text);
    }

    pub fn messages(&self) -> &MessageList {
        &self.messages
    }

    #[cfg(test)]
    pub(crate) fn input(&self) -> &InputText {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputText {
        &mut self.input
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;

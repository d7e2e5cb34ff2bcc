use crate::Message;

/// The messages on screen, in the order the backend reported them.
#[derive(Debug, Default)]
pub struct MessageList {
    messages: Vec<Message>,
}

impl MessageList {
    pub fn replace(&mut self, messages: Vec<Message>) {
        self.messages = messages;
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> + ExactSizeIterator {
        self.messages.iter()
    }

    #[cfg(test)]
    pub(crate) fn as_slice(&self) -> &[Message] {
        &self.messages
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

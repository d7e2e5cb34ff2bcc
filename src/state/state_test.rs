use std::cell::{Cell, RefCell};

use super::*;
use crate::{message::now_millis, realtime::SubscriptionError};

#[derive(Default)]
struct FakeStore {
    no_keys: bool,
    next: Cell<u32>,
    writes: RefCell<Vec<(String, Message)>>,
}

impl FakeStore {
    fn without_keys() -> Self {
        Self {
            no_keys: true,
            ..Self::default()
        }
    }

    fn writes(&self) -> Vec<(String, Message)> {
        self.writes.borrow().clone()
    }
}

impl Store for FakeStore {
    fn generate_key(&self) -> Option<String> {
        if self.no_keys {
            return None;
        }
        let n = self.next.get();
        self.next.set(n + 1);
        Some(format!("key-{n}"))
    }

    fn write(&self, key: &str, message: Message) {
        self.writes.borrow_mut().push((key.to_string(), message));
    }
}

fn snapshot(messages: &[(&str, i64)]) -> Event {
    Event::Snapshot {
        messages: messages
            .iter()
            .map(|&(text, ts)| Message::new(text, ts))
            .collect(),
    }
}

#[test]
fn list_is_exactly_the_latest_snapshot() {
    let mut chat = ChatState::new(FakeStore::default());
    assert!(chat.messages().is_empty());

    let snapshots = [
        vec![("a", 1)],
        vec![("a", 1), ("b", 2)],
        vec![("c", 3)],
        vec![],
        vec![("d", 4), ("a", 1)],
    ];

    for expected in snapshots {
        chat.apply(snapshot(&expected));
        let got = chat
            .messages()
            .iter()
            .map(|m| (m.text(), m.timestamp()))
            .collect::<Vec<_>>();
        assert_eq!(got, expected);
    }
}

#[test]
fn cancellation_keeps_the_last_snapshot() {
    let mut chat = ChatState::new(FakeStore::default());
    chat.apply(snapshot(&[("a", 1), ("b", 2)]));
    chat.apply(Event::Cancelled {
        error: SubscriptionError::PermissionDenied(401),
    });

    assert_eq!(
        chat.messages().as_slice(),
        [Message::new("a", 1), Message::new("b", 2)]
    );
}

#[test]
fn interruption_keeps_the_list_until_the_next_snapshot() {
    let mut chat = ChatState::new(FakeStore::default());
    chat.apply(snapshot(&[("a", 1)]));
    chat.apply(Event::Interrupted {
        error: SubscriptionError::Transport("connection reset".into()),
    });
    assert_eq!(chat.messages().as_slice(), [Message::new("a", 1)]);

    chat.apply(snapshot(&[("a", 1), ("b", 2)]));
    assert_eq!(
        chat.messages().as_slice(),
        [Message::new("a", 1), Message::new("b", 2)]
    );
}

#[test]
fn send_writes_text_and_current_time() {
    let chat = ChatState::new(FakeStore::default());

    let before = now_millis();
    chat.send("hello");
    let after = now_millis();

    let writes = chat.store().writes();
    assert_eq!(writes.len(), 1);

    let (key, msg) = &writes[0];
    assert_eq!(key, "key-0");
    assert_eq!(msg.text(), "hello");
    assert!((before..=after).contains(&msg.timestamp()));
}

#[test]
fn send_does_not_touch_the_list() {
    let mut chat = ChatState::new(FakeStore::default());
    chat.apply(snapshot(&[("a", 1)]));

    chat.send("hello");

    assert_eq!(chat.messages().as_slice(), [Message::new("a", 1)]);
}

#[test]
fn empty_text_is_sent() {
    let chat = ChatState::new(FakeStore::default());
    chat.send("");

    let writes = chat.store().writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].1.text(), "");
    assert_ne!(writes[0].1.timestamp(), 0);
}

#[test]
fn no_key_means_no_write() {
    let chat = ChatState::new(FakeStore::without_keys());
    chat.send("hello");

    assert!(chat.store().writes().is_empty());
}

#[test]
fn each_send_gets_a_fresh_key() {
    let chat = ChatState::new(FakeStore::default());
    chat.send("one");
    chat.send("two");

    let keys = chat
        .store()
        .writes()
        .into_iter()
        .map(|(key, _)| key)
        .collect::<Vec<_>>();
    assert_eq!(keys, ["key-0", "key-1"]);
}

#[test]
fn submit_sends_and_clears_the_input() {
    let mut chat = ChatState::new(FakeStore::default());
    chat.input_mut().buffer_mut().push_str("hi there");

    chat.submit();

    assert_eq!(chat.input().as_str(), "");
    let writes = chat.store().writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].1.text(), "hi there");
}

#[test]
fn submit_clears_the_input_even_without_a_key() {
    let mut chat = ChatState::new(FakeStore::without_keys());
    chat.input_mut().buffer_mut().push_str("lost");

    chat.submit();

    assert_eq!(chat.input().as_str(), "");
    assert!(chat.store().writes().is_empty());
}

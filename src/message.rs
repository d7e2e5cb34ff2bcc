/// A single chat message as stored in the remote collection.
///
/// The remote key is not part of the value. Missing fields decode to their
/// defaults, which is the only place [`Message::default`] shows up.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Message {
    text: String,
    timestamp: i64,
}

impl Message {
    pub fn new(text: impl Into<String>, timestamp: i64) -> Self {
        Self {
            text: text.into(),
            timestamp,
        }
    }

    /// Creates a message stamped with the local wall clock.
    pub fn now(text: impl Into<String>) -> Self {
        Self::new(text, now_millis())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Milliseconds since the Unix epoch.
    pub const fn timestamp(&self) -> i64 {
        self.timestamp
    }
}

pub(crate) fn now_millis() -> i64 {
    let nanos = time::OffsetDateTime::now_utc().unix_timestamp_nanos();
    i64::try_from(nanos / 1_000_000).unwrap_or(i64::MAX)
}

/// Why a subscription failed to deliver snapshots.
///
/// [`Transport`](Self::Transport) is reported while the stream reconnects on
/// its own; every other variant ends the subscription.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SubscriptionError {
    #[error("permission denied (http {0})")]
    PermissionDenied(u16),

    #[error("unexpected http status {0}")]
    Status(u16),

    #[error("expected an event stream, got '{0}'")]
    ContentType(String),

    #[error("cancelled by the server: {0}")]
    Cancelled(String),

    #[error("credentials revoked: {0}")]
    AuthRevoked(String),

    #[error("cannot open the stream: {0}")]
    Request(String),

    #[error("connection lost: {0}")]
    Transport(String),
}

impl SubscriptionError {
    pub(super) fn classify(err: &reqwest_eventsource::Error) -> Self {
        use reqwest::StatusCode;
        use reqwest_eventsource::Error;

        match err {
            Error::InvalidStatusCode(status, _)
                if *status == StatusCode::UNAUTHORIZED || *status == StatusCode::FORBIDDEN =>
            {
                Self::PermissionDenied(status.as_u16())
            }
            Error::InvalidStatusCode(status, _) => Self::Status(status.as_u16()),
            Error::InvalidContentType(value, _) => {
                Self::ContentType(value.to_str().unwrap_or("<non-ascii>").to_string())
            }
            Error::StreamEnded => Self::Transport("the server closed the stream".into()),
            err => Self::Transport(err.to_string()),
        }
    }

    /// Whether the subscription ends after this error.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Transport(..))
    }
}

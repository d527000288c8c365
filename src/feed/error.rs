#![expect(
    clippy::module_name_repetitions,
    reason = "Error types include the module name to indicate their scope"
)]

use std::error::Error as StdError;
use std::fmt;

/// Feed transport error variants.
///
/// These never surface through the public API during normal operation; the
/// connection loop absorbs them and reconnects. They are visible to
/// [`FeedObserver::on_disconnect`](super::observer::FeedObserver::on_disconnect)
/// as the source of the reported [`Error`](crate::error::Error).
#[non_exhaustive]
#[derive(Debug)]
pub enum FeedError {
    /// Error connecting to or communicating with the WebSocket server
    Connection(tokio_tungstenite::tungstenite::Error),
    /// WebSocket connection was closed
    ConnectionClosed,
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connection(e) => write!(f, "WebSocket connection error: {e}"),
            Self::ConnectionClosed => write!(f, "WebSocket connection closed"),
        }
    }
}

impl StdError for FeedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Connection(e) => Some(e),
            Self::ConnectionClosed => None,
        }
    }
}

impl From<FeedError> for crate::error::Error {
    fn from(e: FeedError) -> Self {
        crate::error::Error::with_source(crate::error::Kind::WebSocket, e)
    }
}

use crate::error::Error;

/// Observation hooks for feed lifecycle events.
///
/// Every method has a no-op default, so implementors only override what they
/// care about. The default observer used by
/// [`Client::start_feed`](super::client::Client::start_feed) is
/// [`NoopObserver`]: dropped frames produce no output at all.
pub trait FeedObserver: Send + Sync + 'static {
    /// A frame failed to decode and was dropped. The connection stays open.
    fn on_decode_error(&self, frame: &str, error: &Error) {
        let _ = (frame, error);
    }

    /// The message handler panicked while processing a frame. The panic was
    /// caught; the connection and reconnect loop are unaffected.
    fn on_handler_panic(&self, frame: &str) {
        let _ = frame;
    }

    /// The transport closed or failed to establish. A reconnect will be
    /// scheduled unless the feed was stopped or the attempt cap was reached.
    fn on_disconnect(&self, error: &Error) {
        let _ = error;
    }

    /// A reconnection attempt is about to be scheduled. `attempt` counts
    /// consecutive attempts since the last successful connect, starting at 1.
    fn on_reconnect(&self, attempt: u32) {
        let _ = attempt;
    }
}

/// Observer that ignores every event.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl FeedObserver for NoopObserver {}

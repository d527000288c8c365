#![expect(
    clippy::module_name_repetitions,
    reason = "Connection types expose their domain in the name for clarity"
)]

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Instant;

use futures::StreamExt as _;
use serde::de::DeserializeOwned;
use tokio::sync::watch;
use tokio::time::sleep;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tokio_util::sync::CancellationToken;

use super::config::{Config, DelaySchedule};
use super::error::FeedError;
use super::observer::FeedObserver;
use super::traits::FrameDecoder;
use crate::error::{Error, Kind};

type WsStream = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

/// Connection state tracking.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Not connected
    Disconnected,
    /// Attempting to connect
    Connecting,
    /// Successfully connected
    Connected {
        /// When the connection was established
        since: Instant,
    },
    /// Waiting to reconnect after a disconnect
    Reconnecting {
        /// Consecutive reconnection attempt number since the last successful
        /// connect
        attempt: u32,
    },
}

impl ConnectionState {
    /// Check if the connection is currently active.
    #[must_use]
    pub const fn is_connected(self) -> bool {
        matches!(self, Self::Connected { .. })
    }
}

/// Handle to a running feed.
///
/// Returned by [`Client::start_feed`](super::client::Client::start_feed)
/// immediately, before the connection is established. Dropping the handle
/// does NOT stop the feed; the loop runs until [`stop`](Self::stop) is called
/// or the configured attempt cap is exhausted.
#[derive(Debug, Clone)]
pub struct FeedHandle {
    state_rx: watch::Receiver<ConnectionState>,
    cancel: CancellationToken,
}

impl FeedHandle {
    /// Get the current connection state.
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        *self.state_rx.borrow()
    }

    /// Subscribe to connection state changes.
    ///
    /// Useful for detecting reconnections or waiting for the feed to
    /// terminate after [`stop`](Self::stop).
    #[must_use]
    pub fn state_receiver(&self) -> watch::Receiver<ConnectionState> {
        self.state_rx.clone()
    }

    /// Stop the feed.
    ///
    /// Cancels the reconnect loop: no further connection attempts are made,
    /// the active connection (if any) is torn down, and the state settles at
    /// [`ConnectionState::Disconnected`]. Idempotent.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Whether [`stop`](Self::stop) has been called.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// Spawn the connection loop and return its handle.
///
/// Must be called from within a tokio runtime.
pub(crate) fn spawn_feed<M, D, F, O>(
    endpoint: String,
    config: Config,
    decoder: D,
    on_message: F,
    observer: O,
) -> FeedHandle
where
    M: DeserializeOwned + Send + 'static,
    D: FrameDecoder<M>,
    F: FnMut(M) + Send + 'static,
    O: FeedObserver,
{
    // The handle is live from the moment it is returned; Disconnected is
    // reserved for the terminal state after stop() or attempt exhaustion.
    let (state_tx, state_rx) = watch::channel(ConnectionState::Connecting);
    let cancel = CancellationToken::new();

    let loop_cancel = cancel.clone();
    tokio::spawn(async move {
        connection_loop(endpoint, config, decoder, on_message, observer, state_tx, loop_cancel)
            .await;
    });

    FeedHandle { state_rx, cancel }
}

/// Main connection loop: connect, read until close, wait, repeat.
///
/// The loop is strictly sequential, so at most one transport session is live
/// at any time and a new session only begins after the previous one has fully
/// ended.
async fn connection_loop<M, D, F, O>(
    endpoint: String,
    config: Config,
    decoder: D,
    mut on_message: F,
    observer: O,
    state_tx: watch::Sender<ConnectionState>,
    cancel: CancellationToken,
) where
    M: DeserializeOwned + Send + 'static,
    D: FrameDecoder<M>,
    F: FnMut(M) + Send + 'static,
    O: FeedObserver,
{
    let mut attempt = 0_u32;
    let mut schedule = DelaySchedule::from(&config.reconnect.policy);

    loop {
        if cancel.is_cancelled() {
            break;
        }

        _ = state_tx.send(ConnectionState::Connecting);

        match connect_async(&endpoint).await {
            Ok((ws_stream, _)) => {
                attempt = 0;
                schedule.reset();
                _ = state_tx.send(ConnectionState::Connected {
                    since: Instant::now(),
                });
                #[cfg(feature = "tracing")]
                tracing::debug!(%endpoint, "feed connected");

                let reason = run_session(ws_stream, &decoder, &mut on_message, &observer, &cancel)
                    .await;
                #[cfg(feature = "tracing")]
                tracing::debug!(error = %reason, "feed connection ended");
                observer.on_disconnect(&reason.into());
            }
            Err(e) => {
                let error = Error::with_source(Kind::WebSocket, FeedError::Connection(e));
                #[cfg(feature = "tracing")]
                tracing::warn!(%endpoint, "unable to connect: {error}");
                observer.on_disconnect(&error);
            }
        }

        if cancel.is_cancelled() {
            break;
        }

        // All close causes are indistinguishable here: failure to establish,
        // graceful close, and transport error each schedule the same reconnect.
        attempt = attempt.saturating_add(1);
        if let Some(max) = config.reconnect.max_attempts
            && attempt > max
        {
            #[cfg(feature = "tracing")]
            tracing::warn!(max, "feed reconnect attempts exhausted");
            break;
        }

        _ = state_tx.send(ConnectionState::Reconnecting { attempt });
        observer.on_reconnect(attempt);

        let delay = schedule.next_delay();
        tokio::select! {
            () = sleep(delay) => {}
            () = cancel.cancelled() => break,
        }
    }

    _ = state_tx.send(ConnectionState::Disconnected);
}

/// Read frames from one transport session until it ends.
///
/// Returns the reason the session ended. Decode failures and handler panics
/// do NOT end the session; they are reported to the observer and the next
/// frame is awaited.
async fn run_session<M, D, F, O>(
    mut ws_stream: WsStream,
    decoder: &D,
    on_message: &mut F,
    observer: &O,
    cancel: &CancellationToken,
) -> FeedError
where
    M: DeserializeOwned + Send + 'static,
    D: FrameDecoder<M>,
    F: FnMut(M) + Send + 'static,
    O: FeedObserver,
{
    loop {
        tokio::select! {
            msg = ws_stream.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        #[cfg(feature = "tracing")]
                        tracing::trace!(%text, "received feed frame");

                        match decoder.decode(&text) {
                            Ok(value) => dispatch(on_message, value, &text, observer),
                            Err(e) => {
                                #[cfg(feature = "tracing")]
                                tracing::warn!(%text, error = %e, "dropping malformed feed frame");
                                observer.on_decode_error(&text, &e);
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => return FeedError::ConnectionClosed,
                    Some(Ok(_)) => {
                        // Binary frames and protocol ping/pong are ignored;
                        // tungstenite answers pings on its own.
                    }
                    Some(Err(e)) => return FeedError::Connection(e),
                }
            }
            () = cancel.cancelled() => return FeedError::ConnectionClosed,
        }
    }
}

/// Invoke the handler inside a panic boundary.
///
/// A panicking handler must not be able to unwind into the connection loop
/// and corrupt the reconnect state machine; the panic is caught and reported.
fn dispatch<M, F, O>(on_message: &mut F, value: M, frame: &str, observer: &O)
where
    F: FnMut(M),
    O: FeedObserver,
{
    if catch_unwind(AssertUnwindSafe(|| on_message(value))).is_err() {
        #[cfg(feature = "tracing")]
        tracing::warn!(%frame, "feed handler panicked; frame skipped");
        observer.on_handler_panic(frame);
    }
}

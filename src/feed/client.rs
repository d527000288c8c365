use serde::de::DeserializeOwned;
use url::Url;

use super::config::Config;
use super::connection::{FeedHandle, spawn_feed};
use super::observer::{FeedObserver, NoopObserver};
use super::traits::JsonDecoder;
use crate::error::Error;
use crate::{DEFAULT_ENDPOINT, Result};

/// Client for a live telemetry feed.
///
/// Holds the endpoint and configuration; [`start_feed`](Self::start_feed)
/// spawns the connection loop and returns immediately with a [`FeedHandle`].
///
/// # Example
///
/// ```no_run
/// use rpm_feed_client::feed::{Client, RpmSample};
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let client = Client::default();
///     let handle = client.start_feed(|sample: RpmSample| {
///         println!("rpm: {}", sample.rpm);
///     });
///
///     tokio::signal::ctrl_c().await?;
///     handle.stop();
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    endpoint: String,
    config: Config,
}

impl Default for Client {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT, Config::default())
            .expect("feed client with default endpoint should succeed")
    }
}

impl Client {
    /// Create a new feed client for the given endpoint.
    ///
    /// The endpoint must be a valid `ws://` or `wss://` URL.
    pub fn new(endpoint: &str, config: Config) -> Result<Self> {
        let url = Url::parse(endpoint)?;
        if !matches!(url.scheme(), "ws" | "wss") {
            return Err(Error::validation(format!(
                "endpoint scheme must be ws or wss, got {}",
                url.scheme()
            )));
        }

        Ok(Self {
            endpoint: endpoint.to_owned(),
            config,
        })
    }

    /// The endpoint this client connects to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Start the feed, delivering each decoded frame to `on_message`.
    ///
    /// Returns immediately with a live [`FeedHandle`]; connection
    /// establishment happens asynchronously and can be observed via
    /// [`FeedHandle::state_receiver`]. The same handler is reused across
    /// every reconnect for the lifetime of the loop.
    ///
    /// Frames are dispatched in arrival order, one at a time, on the
    /// connection task. Malformed frames are silently dropped; use
    /// [`start_feed_with_observer`](Self::start_feed_with_observer) to be
    /// notified of drops.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start_feed<M, F>(&self, on_message: F) -> FeedHandle
    where
        M: DeserializeOwned + Send + 'static,
        F: FnMut(M) + Send + 'static,
    {
        self.start_feed_with_observer(on_message, NoopObserver)
    }

    /// Start the feed with an observer for dropped frames, handler panics,
    /// and disconnects.
    ///
    /// Identical to [`start_feed`](Self::start_feed) otherwise; the observer
    /// never changes delivery behavior, it only reports.
    pub fn start_feed_with_observer<M, F, O>(&self, on_message: F, observer: O) -> FeedHandle
    where
        M: DeserializeOwned + Send + 'static,
        F: FnMut(M) + Send + 'static,
        O: FeedObserver,
    {
        spawn_feed(
            self.endpoint.clone(),
            self.config.clone(),
            JsonDecoder,
            on_message,
            observer,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Kind;

    #[test]
    fn default_client_uses_local_backend_endpoint() {
        let client = Client::default();
        assert_eq!(client.endpoint(), "ws://localhost:8000/ws");
    }

    #[test]
    fn rejects_non_websocket_scheme() {
        let error = Client::new("http://localhost:8000/ws", Config::default()).unwrap_err();
        assert_eq!(error.kind(), Kind::Validation);
    }

    #[test]
    fn rejects_unparseable_endpoint() {
        let error = Client::new("not a url", Config::default()).unwrap_err();
        assert_eq!(error.kind(), Kind::Internal);
    }
}

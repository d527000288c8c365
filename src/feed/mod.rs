//! Live telemetry feed over a single WebSocket connection.
//!
//! The feed client owns the whole connection lifecycle: it connects to one
//! fixed endpoint, decodes every inbound text frame as JSON, dispatches each
//! decoded value to a caller-supplied handler, and reconnects after any
//! disconnect. Malformed frames are dropped without closing the connection.
//!
//! # Architecture
//!
//! - [`Client`]: entry point; holds the endpoint and [`Config`]
//! - [`FeedHandle`]: returned by [`Client::start_feed`]; exposes connection
//!   state and `stop()`
//! - [`FrameDecoder`]: trait for decoding raw frames, [`JsonDecoder`] by
//!   default
//! - [`FeedObserver`]: hooks for dropped frames and handler panics, no-op by
//!   default
//!
//! # Example
//!
//! ```ignore
//! let client = Client::default();
//! let handle = client.start_feed(|sample: RpmSample| {
//!     println!("rpm: {}", sample.rpm);
//! });
//! ```

pub mod client;
pub mod config;
pub mod connection;
pub mod error;
pub mod observer;
pub mod traits;
pub mod types;

pub use client::Client;
pub use config::{Config, ReconnectConfig, ReconnectPolicy};
pub use connection::{ConnectionState, FeedHandle};
#[expect(
    clippy::module_name_repetitions,
    reason = "FeedError includes module name for clarity when used outside this module"
)]
pub use error::FeedError;
pub use observer::{FeedObserver, NoopObserver};
pub use traits::{FrameDecoder, JsonDecoder};
pub use types::RpmSample;

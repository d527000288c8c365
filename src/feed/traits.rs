//! Core traits for the feed pipeline.

use serde::de::DeserializeOwned;

/// Frame decoder trait for converting a raw text frame into a message.
///
/// The connection loop applies the decoder to every inbound text frame. A
/// decode failure never closes the connection; the frame is dropped and the
/// failure is reported to the [`FeedObserver`](super::observer::FeedObserver).
///
/// # Example
///
/// ```ignore
/// pub struct LineDecoder;
///
/// impl FrameDecoder<u32> for LineDecoder {
///     fn decode(&self, frame: &str) -> crate::Result<u32> {
///         frame.trim().parse().map_err(|e| Error::validation(e.to_string()))
///     }
/// }
/// ```
pub trait FrameDecoder<M: DeserializeOwned>: Send + Sync + 'static {
    /// Decode one frame into a message.
    fn decode(&self, frame: &str) -> crate::Result<M>;
}

/// Decodes each frame as a single JSON value.
///
/// This matches the feed protocol: one JSON object per frame, no batching.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl<M: DeserializeOwned> FrameDecoder<M> for JsonDecoder {
    fn decode(&self, frame: &str) -> crate::Result<M> {
        Ok(serde_json::from_str(frame)?)
    }
}

use serde::{Deserialize, Serialize};

/// Engine RPM sample streamed by the telemetry backend.
///
/// Wire format: `{"rpm": 1234}`, one object per frame at roughly 20 Hz.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct RpmSample {
    /// Engine speed in revolutions per minute
    pub rpm: u32,
}

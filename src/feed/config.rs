#![expect(
    clippy::module_name_repetitions,
    reason = "Configuration types intentionally mirror the module name for clarity"
)]

use std::time::Duration;

use backoff::backoff::Backoff as _;
use backoff::{ExponentialBackoff, ExponentialBackoffBuilder};

/// Delay observed in the reference client between close and reconnect.
const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_millis(500);
const DEFAULT_INITIAL_BACKOFF_DURATION: Duration = Duration::from_millis(500);
const DEFAULT_MAX_BACKOFF_DURATION: Duration = Duration::from_secs(60);
const DEFAULT_BACKOFF_MULTIPLIER: f64 = 2.0;

/// Configuration for feed client behavior.
#[non_exhaustive]
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Reconnection strategy configuration
    pub reconnect: ReconnectConfig,
}

/// Configuration for automatic reconnection behavior.
#[non_exhaustive]
#[derive(Debug, Clone, Default)]
pub struct ReconnectConfig {
    /// Maximum number of reconnection attempts before giving up.
    /// `None` means infinite retries (the default).
    pub max_attempts: Option<u32>,
    /// Delay policy between attempts
    pub policy: ReconnectPolicy,
}

/// Delay policy between reconnection attempts.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum ReconnectPolicy {
    /// Wait the same duration before every attempt. This is the default,
    /// matching the reference client's fixed 500 ms delay.
    Fixed(Duration),
    /// Exponentially growing delay, capped at `max`.
    Exponential {
        /// Delay before the first reconnection attempt
        initial: Duration,
        /// Upper bound on the delay
        max: Duration,
        /// Growth factor applied after each attempt
        multiplier: f64,
    },
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self::Fixed(DEFAULT_RECONNECT_DELAY)
    }
}

impl ReconnectPolicy {
    /// Exponential policy with the default initial delay, cap, and multiplier.
    #[must_use]
    pub const fn exponential() -> Self {
        Self::Exponential {
            initial: DEFAULT_INITIAL_BACKOFF_DURATION,
            max: DEFAULT_MAX_BACKOFF_DURATION,
            multiplier: DEFAULT_BACKOFF_MULTIPLIER,
        }
    }
}

/// Yields the wait before each reconnection attempt.
///
/// The exponential variant is stateful; `reset` must be called after a
/// successful connect so the next disconnect starts from the initial delay
/// again.
#[derive(Debug)]
pub(crate) enum DelaySchedule {
    Fixed(Duration),
    Exponential(Box<ExponentialBackoff>),
}

impl DelaySchedule {
    pub(crate) fn next_delay(&mut self) -> Duration {
        match self {
            Self::Fixed(delay) => *delay,
            Self::Exponential(backoff) => {
                let max = backoff.max_interval;
                backoff.next_backoff().unwrap_or(max)
            }
        }
    }

    pub(crate) fn reset(&mut self) {
        if let Self::Exponential(backoff) = self {
            backoff.reset();
        }
    }
}

impl From<&ReconnectPolicy> for DelaySchedule {
    fn from(policy: &ReconnectPolicy) -> Self {
        match *policy {
            ReconnectPolicy::Fixed(delay) => Self::Fixed(delay),
            ReconnectPolicy::Exponential {
                initial,
                max,
                multiplier,
            } => Self::Exponential(Box::new(
                ExponentialBackoffBuilder::default()
                    .with_initial_interval(initial)
                    .with_max_interval(max)
                    .with_multiplier(multiplier)
                    .with_max_elapsed_time(None) // Max attempts are handled by the connection loop
                    .build(),
            )),
        }
    }
}

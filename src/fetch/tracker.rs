//! Last-trigger-wins bookkeeping for a single request slot.
//!
//! Each slot (paper listing, related lookup, processing trigger) owns one
//! [`RequestTracker`]. Beginning a request hands out a fresh [`Generation`]
//! and forgets the previous one, so whatever the earlier request eventually
//! resolves to is recognized as stale and dropped.

use std::fmt;
use std::str::FromStr;

/// Monotonic tag identifying one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Generation {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// Tracks the one request in a slot whose outcome is still wanted.
///
/// # Example
///
/// ```rust
/// use paperlens::fetch::RequestTracker;
///
/// let mut tracker = RequestTracker::default();
/// let first = tracker.begin();
/// let second = tracker.begin();
///
/// assert!(!tracker.settle(first));  // superseded
/// assert!(tracker.settle(second));  // current
/// assert!(!tracker.settle(second)); // already settled
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    last_issued: u64,
    in_flight: Option<Generation>,
}

impl RequestTracker {
    /// Issues a new generation, making any unsettled earlier one stale.
    pub fn begin(&mut self) -> Generation {
        self.last_issued += 1;
        let generation = Generation(self.last_issued);
        if let Some(previous) = self.in_flight.replace(generation) {
            tracing::debug!(%previous, current = %generation, "superseding in-flight request");
        }
        generation
    }

    /// Accepts the outcome of `generation` if it is the tracked request.
    ///
    /// Returns `true` exactly once for the current generation; the slot is
    /// empty afterwards. Stale or repeated generations return `false`.
    pub fn settle(&mut self, generation: Generation) -> bool {
        if self.in_flight == Some(generation) {
            self.in_flight = None;
            true
        } else {
            tracing::debug!(
                %generation,
                in_flight = ?self.in_flight,
                "discarding stale response"
            );
            false
        }
    }

    /// Stops waiting for the in-flight request without issuing a new one.
    pub fn abandon(&mut self) {
        self.in_flight = None;
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generations_increase() {
        let mut tracker = RequestTracker::default();
        let a = tracker.begin();
        let b = tracker.begin();
        assert!(b > a);
        assert!(tracker.is_pending());
    }

    #[test]
    fn late_response_of_superseded_request_is_stale() {
        let mut tracker = RequestTracker::default();
        let r1 = tracker.begin();
        let r2 = tracker.begin();

        assert!(tracker.settle(r2));
        assert!(!tracker.settle(r1));
        assert!(!tracker.is_pending());
    }

    #[test]
    fn abandon_discards_pending() {
        let mut tracker = RequestTracker::default();
        let r = tracker.begin();
        tracker.abandon();
        assert!(!tracker.settle(r));
    }

    #[test]
    fn generation_round_trips_through_text() {
        let g = Generation::new(42);
        assert_eq!(g.to_string().parse::<Generation>(), Ok(g));
        assert!("forty-two".parse::<Generation>().is_err());
    }
}

//! Single-flight request guard
//!
//! At most one in-flight operation of a given kind is permitted at a
//! time; concurrent requests are rejected rather than queued. The
//! guard is a single-slot request state machine: acquiring hands out a
//! token, and results are only applied when their token is still
//! current. Invalidation bumps a generation counter, so a response
//! that arrives for a superseded request is discarded instead of
//! overwriting newer state. This replaces the ad-hoc boolean flags the
//! equivalent UI code would use.

use crate::error::{Result, SeoForgeError};

/// Token representing one admitted request
///
/// Tokens are not cloneable; the holder either finishes the flight or
/// drops interest in it.
#[derive(Debug)]
pub struct FlightToken {
    generation: u64,
}

/// Single-slot guard for one kind of operation
#[derive(Debug)]
pub struct FlightSlot {
    /// Operation name, used in the `Busy` rejection
    name: &'static str,
    /// Bumped on every invalidation; stale tokens fail `is_current`
    generation: u64,
    in_flight: bool,
}

impl FlightSlot {
    /// Create an idle slot for the named operation
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            generation: 0,
            in_flight: false,
        }
    }

    /// Admit a request, or reject it when one is already in flight
    ///
    /// # Errors
    ///
    /// Returns `Busy` while another token from this slot is live.
    pub fn try_acquire(&mut self) -> Result<FlightToken> {
        if self.in_flight {
            return Err(SeoForgeError::Busy(self.name).into());
        }
        self.in_flight = true;
        Ok(FlightToken {
            generation: self.generation,
        })
    }

    /// True while a token is live and current
    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// True when the token belongs to the current generation
    ///
    /// A stale token means the request was superseded; its result must
    /// not be applied.
    pub fn is_current(&self, token: &FlightToken) -> bool {
        token.generation == self.generation
    }

    /// Mark the flight finished
    ///
    /// Finishing with a stale token is a no-op for the slot state: the
    /// invalidation that made it stale already reopened the slot.
    pub fn finish(&mut self, token: FlightToken) {
        if self.is_current(&token) {
            self.in_flight = false;
        }
    }

    /// Drop interest in any outstanding request
    ///
    /// The underlying request is not aborted; its eventual result just
    /// no longer passes `is_current`. The slot immediately accepts a
    /// new request.
    pub fn invalidate_all(&mut self) {
        self.generation += 1;
        self.in_flight = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::is_busy;

    #[test]
    fn test_second_acquire_rejected_while_in_flight() {
        let mut slot = FlightSlot::new("section generation");
        let token = slot.try_acquire().unwrap();
        assert!(slot.in_flight());

        let err = slot.try_acquire().unwrap_err();
        assert!(is_busy(&err));
        assert_eq!(
            err.to_string(),
            "Operation already in flight: section generation"
        );

        slot.finish(token);
        assert!(!slot.in_flight());
        assert!(slot.try_acquire().is_ok());
    }

    #[test]
    fn test_invalidation_makes_token_stale() {
        let mut slot = FlightSlot::new("paraphrase");
        let stale = slot.try_acquire().unwrap();

        // A new selection supersedes the pending request.
        slot.invalidate_all();
        assert!(!slot.is_current(&stale));

        // The slot accepts the replacement request immediately.
        let fresh = slot.try_acquire().unwrap();
        assert!(slot.is_current(&fresh));

        // The stale flight finishing must not release the fresh one.
        slot.finish(stale);
        assert!(slot.in_flight());

        slot.finish(fresh);
        assert!(!slot.in_flight());
    }

    #[test]
    fn test_finish_then_acquire_keeps_generation() {
        let mut slot = FlightSlot::new("save");
        let first = slot.try_acquire().unwrap();
        slot.finish(first);

        let second = slot.try_acquire().unwrap();
        assert!(slot.is_current(&second));
    }
}

//! Countdown state machine.
//!
//! [`ProgressState`] is the whole of the ring's behavior: a bounded counter
//! that advances once per tick, can be paused, and reaches a terminal
//! completed state exactly once. It performs no I/O and knows nothing about
//! rendering or the bubbletea runtime, so it can be driven directly by any
//! event loop.
//!
//! # Example
//!
//! ```rust
//! use bubbletea_ring::state::{ProgressState, TickOutcome};
//!
//! let mut state = ProgressState::new(3).unwrap();
//! assert_eq!(state.on_tick(), TickOutcome::Advanced);
//! assert_eq!(state.on_tick(), TickOutcome::Advanced);
//! assert_eq!(state.on_tick(), TickOutcome::Completed);
//! assert_eq!(state.on_tick(), TickOutcome::Idle);
//! assert_eq!(state.current(), 3);
//! ```

use crate::error::{Result, RingError};
use std::num::NonZeroU64;

/// What a single tick did to the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// `current` moved forward by one and the target is not reached yet.
    Advanced,
    /// The session is paused; the tick was swallowed.
    Absorbed,
    /// This tick moved the session into its terminal state.
    ///
    /// Returned at most once per session. Hosts fire their completion
    /// callback on this outcome.
    Completed,
    /// The session had already completed; nothing changed.
    Idle,
}

impl TickOutcome {
    /// Returns `true` for the one tick that completed the session.
    pub fn is_completed(self) -> bool {
        matches!(self, TickOutcome::Completed)
    }
}

/// Mutable state of one countdown session.
///
/// Invariants upheld by every method:
/// - `current <= target`
/// - once `completed()` is `true`, `current` never changes again
/// - `target` is positive and fixed for the lifetime of the value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressState {
    current: u64,
    target: NonZeroU64,
    paused: bool,
    completed: bool,
}

impl ProgressState {
    /// Starts a new session that completes after `target` ticks.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::InvalidConfiguration`] when `target <= 0`.
    ///
    /// ```rust
    /// use bubbletea_ring::state::ProgressState;
    ///
    /// assert!(ProgressState::new(10).is_ok());
    /// assert!(ProgressState::new(0).is_err());
    /// assert!(ProgressState::new(-5).is_err());
    /// ```
    pub fn new(target: i64) -> Result<Self> {
        let target = u64::try_from(target)
            .ok()
            .and_then(NonZeroU64::new)
            .ok_or(RingError::InvalidConfiguration { target })?;
        Ok(Self::with_target(target))
    }

    /// Starts a new session from a target that is already known to be valid.
    pub fn with_target(target: NonZeroU64) -> Self {
        Self {
            current: 0,
            target,
            paused: false,
            completed: false,
        }
    }

    /// Ticks elapsed so far.
    pub fn current(&self) -> u64 {
        self.current
    }

    /// Ticks required to complete the session.
    pub fn target(&self) -> u64 {
        self.target.get()
    }

    /// Whether ticks are currently being absorbed.
    pub fn paused(&self) -> bool {
        self.paused
    }

    /// Whether the session has reached its terminal state.
    pub fn completed(&self) -> bool {
        self.completed
    }

    /// Consumes one tick.
    ///
    /// The completion check runs before the pause check, so a session that
    /// sits on its target is completed even while paused. The increment is
    /// guarded by `current < target` and can never overshoot.
    pub fn on_tick(&mut self) -> TickOutcome {
        if self.completed {
            return TickOutcome::Idle;
        }

        if self.current >= self.target.get() {
            self.current = self.target.get();
            self.completed = true;
            return TickOutcome::Completed;
        }

        if self.paused {
            return TickOutcome::Absorbed;
        }

        self.current += 1;
        if self.current == self.target.get() {
            self.completed = true;
            return TickOutcome::Completed;
        }

        TickOutcome::Advanced
    }

    /// Flips the paused flag and returns the new value.
    ///
    /// Never touches `current` or `completed`.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Pauses the session. Pausing twice is harmless.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resumes the session. Resuming a running session is harmless.
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Returns to the initial state of a fresh session with the same target.
    pub fn reset(&mut self) {
        *self = Self::with_target(self.target);
    }
}

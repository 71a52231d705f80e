//! Debounce state machine with cancel-on-revert.
//!
//! DESIGN
//! ======
//! Time is passed in explicitly (milliseconds) so the machine is pure; the
//! component layer owns the actual timer and calls [`Debouncer::poll`] when it
//! fires. A timer that fires early (because the deadline moved) is harmless:
//! `poll` only commits once the current deadline has passed.
//!
//! ```text
//! Idle/Fired --input != committed--> Pending(value, now + delay)
//! Pending    --input == committed--> Idle            (cancel)
//! Pending    --input != pending----> Pending(input, now + delay)
//! Pending    --poll >= deadline----> Fired           (commit)
//! ```

#[cfg(test)]
#[path = "debounce_test.rs"]
mod debounce_test;

/// Current phase of a [`Debouncer`].
#[derive(Clone, Debug, PartialEq)]
pub enum DebouncePhase<T> {
    /// Nothing pending; the committed value is current.
    Idle,
    /// A value is waiting for its quiet period to elapse.
    Pending { value: T, deadline_ms: f64 },
    /// The last pending value was committed; behaves like `Idle`.
    Fired,
}

/// What the caller should do after feeding an input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DebounceAction {
    /// Nothing changed.
    None,
    /// (Re)arm a timer that calls `poll` at `deadline_ms`.
    Schedule { deadline_ms: f64 },
    /// The pending value was dropped; any armed timer may be ignored.
    Cancelled,
}

/// Coalesces rapid input changes into one committed value per quiet period.
#[derive(Clone, Debug)]
pub struct Debouncer<T> {
    delay_ms: f64,
    committed: T,
    phase: DebouncePhase<T>,
}

impl<T: Clone + PartialEq> Debouncer<T> {
    /// Create a debouncer whose initial value is committed immediately.
    pub fn new(initial: T, delay_ms: u32) -> Self {
        Self { delay_ms: f64::from(delay_ms), committed: initial, phase: DebouncePhase::Idle }
    }

    /// The value downstream consumers should observe.
    pub fn committed(&self) -> &T {
        &self.committed
    }

    pub fn phase(&self) -> &DebouncePhase<T> {
        &self.phase
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self.phase, DebouncePhase::Pending { .. })
    }

    /// Feed a new raw value observed at `now_ms`.
    pub fn input(&mut self, value: T, now_ms: f64) -> DebounceAction {
        if value == self.committed {
            return if self.is_pending() {
                self.phase = DebouncePhase::Idle;
                log::debug!("debounce cancelled: input returned to committed value");
                DebounceAction::Cancelled
            } else {
                DebounceAction::None
            };
        }

        if let DebouncePhase::Pending { value: pending, .. } = &self.phase {
            if *pending == value {
                return DebounceAction::None;
            }
        }

        let deadline_ms = now_ms + self.delay_ms;
        self.phase = DebouncePhase::Pending { value, deadline_ms };
        DebounceAction::Schedule { deadline_ms }
    }

    /// Drop any pending value without committing it.
    pub fn cancel(&mut self) {
        if self.is_pending() {
            self.phase = DebouncePhase::Idle;
        }
    }

    /// Commit the pending value if its deadline has passed.
    ///
    /// Returns the newly committed value, or `None` when nothing fired.
    pub fn poll(&mut self, now_ms: f64) -> Option<T> {
        let DebouncePhase::Pending { deadline_ms, .. } = &self.phase else {
            return None;
        };
        if now_ms < *deadline_ms {
            return None;
        }
        let DebouncePhase::Pending { value, .. } = std::mem::replace(&mut self.phase, DebouncePhase::Fired) else {
            return None;
        };
        self.committed = value.clone();
        Some(value)
    }
}

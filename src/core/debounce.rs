//! Double-tap debounce for the index-finger distress gesture
//!
//! Transitions, evaluated on every index-only detection at time t:
//! - t - last_tap < window AND t - last_confirmed > cooldown → CONFIRMED
//!   (last_confirmed = t)
//! - otherwise → stays idle (last_tap = t)
//!
//! The state is a plain value owned by the caller, so the logic stays pure
//! and replays identically under a manual clock.

use std::time::Duration;

use tracing::debug;

use crate::config::DebounceConfig;

/// Tap timestamps, mutated only by `DebounceEngine::register_tap`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DebounceState {
    last_tap: Option<Duration>,
    last_confirmed: Option<Duration>,
}

impl DebounceState {
    pub fn new() -> Self {
        Self::default()
    }

    /// When the last unconfirmed tap was seen
    pub fn last_tap(&self) -> Option<Duration> {
        self.last_tap
    }

    /// When the last distress signal fired
    pub fn last_confirmed(&self) -> Option<Duration> {
        self.last_confirmed
    }
}

/// What a single tap did to the state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// First tap of a potential double tap
    Armed,
    /// Double tap completed, distress fires
    Confirmed,
    /// Double tap completed inside the cooldown, suppressed
    CoolingDown,
}

impl TapOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, TapOutcome::Confirmed)
    }
}

/// Applies the window / cooldown rules to a `DebounceState`
#[derive(Debug, Clone)]
pub struct DebounceEngine {
    window: Duration,
    cooldown: Duration,
}

impl Default for DebounceEngine {
    fn default() -> Self {
        Self::new(&DebounceConfig::default())
    }
}

impl DebounceEngine {
    pub fn new(config: &DebounceConfig) -> Self {
        Self {
            window: config.window(),
            cooldown: config.cooldown(),
        }
    }

    /// Register an index-only detection at `now`
    pub fn register_tap(&self, state: &mut DebounceState, now: Duration) -> TapOutcome {
        // Never move a timestamp backwards, even if the clock does
        let floor = state.last_tap.max(state.last_confirmed).unwrap_or_default();
        let now = now.max(floor);

        let within_window = state
            .last_tap
            .map(|tap| now - tap < self.window)
            .unwrap_or(false);
        let cooled_down = state
            .last_confirmed
            .map(|confirmed| now - confirmed > self.cooldown)
            .unwrap_or(true);

        if within_window && cooled_down {
            state.last_confirmed = Some(now);
            debug!(at_ms = now.as_millis() as u64, "double tap confirmed");
            return TapOutcome::Confirmed;
        }

        state.last_tap = Some(now);
        if within_window {
            debug!(at_ms = now.as_millis() as u64, "double tap suppressed by cooldown");
            TapOutcome::CoolingDown
        } else {
            TapOutcome::Armed
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

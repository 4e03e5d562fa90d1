//! Per-tick state transitions for the three tick sources.
//!
//! Each function takes the counters a handler owns plus the channel period and
//! returns the next counters and the side effect to perform. The interrupt
//! entry points in [`crate::indicators`] load and store the registry around
//! these, so the timing rules can be tested without any hardware.

use crate::time::{BASE_TICK_MS, SLOW_TICK_MS};

/// Result of one base clock tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseTick {
    /// Millisecond counter after this tick.
    pub millis: u32,
    /// The red period boundary was crossed.
    pub release: bool,
}

/// Advances the millisecond counter and checks the red period boundary.
///
/// A zero period never releases.
#[inline]
pub const fn base_tick(millis: u32, red_period_ms: u32) -> BaseTick {
    let millis = millis.wrapping_add(BASE_TICK_MS);
    let release = red_period_ms != 0 && millis % red_period_ms == 0;
    BaseTick { millis, release }
}

/// Result of one slow tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlowTick {
    /// Accumulated slow ticks after this one.
    pub accumulator: u32,
    /// Toggle the yellow output now.
    pub toggle: bool,
}

/// Accumulates slow ticks and toggles once `period / SLOW_TICK_MS` have passed.
///
/// A disabled channel holds its accumulator at zero so a later enable starts a
/// full period.
#[inline]
pub const fn slow_tick(accumulator: u32, yellow_period_ms: u32) -> SlowTick {
    if yellow_period_ms == 0 {
        return SlowTick {
            accumulator: 0,
            toggle: false,
        };
    }

    let accumulator = accumulator.saturating_add(1);
    if accumulator >= yellow_period_ms / SLOW_TICK_MS {
        SlowTick {
            accumulator: 0,
            toggle: true,
        }
    } else {
        SlowTick {
            accumulator,
            toggle: false,
        }
    }
}

/// What a green compare match does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareMatch {
    /// Channel disabled; ignore the match.
    Ignore,
    /// Count the match. `toggle` is set when software must flip the output.
    Count { toggle: bool },
}

/// Decides the effect of a compare match.
#[inline]
pub const fn compare_match(green_period_ms: u32, software_toggle: bool) -> CompareMatch {
    if green_period_ms == 0 {
        CompareMatch::Ignore
    } else {
        CompareMatch::Count {
            toggle: software_toggle,
        }
    }
}

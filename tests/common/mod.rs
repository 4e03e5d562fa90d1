//! Shared test infrastructure for tick-indicators integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use embedded_hal::delay::DelayNs;
use tick_indicators::{Channel, CompareTimer, GreenToggle, IndicatorOutput, Indicators, TimerClock};

// ============================================================================
// Mock Outputs
// ============================================================================

/// Electrical state of one mock pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PinRecord {
    pub enabled: bool,
    pub on: bool,
    pub toggles: u32,
}

/// Mock indicator outputs that record every pin change
pub struct MockOutputs {
    pins: [PinRecord; 3],
    history: heapless::Vec<(Channel, bool), 64>,
}

impl MockOutputs {
    pub fn new() -> Self {
        Self {
            // Pins come up driven so construction has to disable them.
            pins: [PinRecord {
                enabled: true,
                on: false,
                toggles: 0,
            }; 3],
            history: heapless::Vec::new(),
        }
    }

    pub fn pin(&self, channel: Channel) -> PinRecord {
        self.pins[channel.index()]
    }

    /// Level changes in order, capped at the buffer capacity
    pub fn history(&self) -> &[(Channel, bool)] {
        &self.history
    }

    fn record(&mut self, channel: Channel) {
        let on = self.pins[channel.index()].on;
        let _ = self.history.push((channel, on));
    }
}

impl IndicatorOutput for MockOutputs {
    fn enable(&mut self, channel: Channel) {
        self.pins[channel.index()].enabled = true;
    }

    fn disable(&mut self, channel: Channel) {
        self.pins[channel.index()].enabled = false;
    }

    fn toggle(&mut self, channel: Channel) {
        let pin = &mut self.pins[channel.index()];
        pin.on = !pin.on;
        pin.toggles += 1;
        self.record(channel);
    }

    fn set(&mut self, channel: Channel, on: bool) {
        self.pins[channel.index()].on = on;
        self.record(channel);
    }
}

// ============================================================================
// Mock Compare Timer
// ============================================================================

/// Mock timer that keeps every compare target it was given
#[derive(Default)]
pub struct MockTimer {
    targets: heapless::Vec<u32, 16>,
}

impl MockTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_target(&self) -> Option<u32> {
        self.targets.last().copied()
    }

    pub fn targets(&self) -> &[u32] {
        &self.targets
    }
}

impl CompareTimer for MockTimer {
    fn set_compare_target(&mut self, target: u32) {
        let _ = self.targets.push(target);
    }
}

// ============================================================================
// Mock Delay
// ============================================================================

/// Mock delay that only adds up the requested time
#[derive(Default)]
pub struct MockDelay {
    pub total_ns: u64,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

pub type TestIndicators = Indicators<MockOutputs, MockTimer>;

/// Indicators on mock hardware with the reference clock and software green toggling
pub fn indicators() -> TestIndicators {
    Indicators::new(
        MockOutputs::new(),
        MockTimer::new(),
        TimerClock::REFERENCE,
        GreenToggle::Software,
    )
}

/// Indicators whose green toggle is left to the (mock) timer hardware
pub fn hardware_green_indicators() -> TestIndicators {
    Indicators::new(
        MockOutputs::new(),
        MockTimer::new(),
        TimerClock::REFERENCE,
        GreenToggle::Hardware,
    )
}

/// Checks that every output is enabled exactly when its period is non-zero
pub fn enable_matches_period(indicators: &TestIndicators) -> bool {
    Channel::ALL.iter().all(|&channel| {
        let period = indicators.diagnostics(channel).period_ms;
        let enabled = indicators.with_outputs(|outputs| outputs.pin(channel).enabled);
        enabled == (period != 0)
    })
}

/// Runs `f` `n` times
pub fn repeat(n: usize, mut f: impl FnMut()) {
    for _ in 0..n {
        f();
    }
}

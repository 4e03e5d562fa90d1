//! Tick rates and timer clock arithmetic.

/// Frequency of the base clock that releases the red channel.
pub const BASE_TICK_HZ: u32 = 1000;

/// Milliseconds added to the counter on every base tick.
pub const BASE_TICK_MS: u32 = 1000 / BASE_TICK_HZ;

/// Interval between slow ticks driving the yellow channel.
pub const SLOW_TICK_MS: u32 = 100;

/// Every stored period is a multiple of this.
pub const PERIOD_RESOLUTION_MS: u32 = 100;

/// Longest green period the compare timer is configured for.
pub const GREEN_MAX_PERIOD_MS: u32 = 4000;

/// How long all outputs are held on during the startup self-test.
pub const SELF_TEST_MS: u32 = 2000;

/// Counting rate of the variable-frequency timer behind the green channel.
///
/// The compare target for a period is `round(period_ms * tick_scale)` where
/// `tick_scale = clock_hz / (prescaler * 1000)` counts per millisecond. The
/// clock and prescaler are kept apart so fractional scales round exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerClock {
    clock_hz: u32,
    prescaler: u32,
}

impl TimerClock {
    /// 20 MHz core clock through a /1024 prescaler: 19.53125 counts per millisecond.
    pub const REFERENCE: TimerClock = TimerClock::from_prescaler(20_000_000, 1024);

    /// Clock counting at `counts_per_second`, no prescaler.
    pub const fn new(counts_per_second: u32) -> Self {
        Self::from_prescaler(counts_per_second, 1)
    }

    /// Clock derived from the input frequency and prescaler.
    ///
    /// A prescaler of zero is treated as one.
    pub const fn from_prescaler(clock_hz: u32, prescaler: u32) -> Self {
        Self {
            clock_hz,
            prescaler: if prescaler == 0 { 1 } else { prescaler },
        }
    }

    #[inline]
    pub const fn clock_hz(&self) -> u32 {
        self.clock_hz
    }

    #[inline]
    pub const fn prescaler(&self) -> u32 {
        self.prescaler
    }

    /// Compare target producing one match every `period_ms`, rounded to nearest.
    pub const fn compare_target(&self, period_ms: u32) -> u32 {
        let counts = period_ms as u64 * self.clock_hz as u64;
        let divisor = self.prescaler as u64 * 1000;
        let target = (counts + divisor / 2) / divisor;
        if target > u32::MAX as u64 {
            u32::MAX
        } else {
            target as u32
        }
    }
}

impl Default for TimerClock {
    fn default() -> Self {
        TimerClock::REFERENCE
    }
}

/// Who performs the green toggle on a compare match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GreenToggle {
    /// The timer toggles the pin; the handler only counts.
    Hardware,
    /// The handler toggles the output and counts.
    #[default]
    Software,
}

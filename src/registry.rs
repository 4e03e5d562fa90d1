//! Shared per-channel state.
//!
//! Every field is a single word-sized atomic so neither side of the
//! interrupt/foreground boundary can observe a torn value. Periods have one
//! writer (the configurator); counters have one writer each (their tick
//! handler). `portable-atomic` keeps this working on cores without native
//! read-modify-write instructions.

use crate::channel::{Channel, ChannelState};
use portable_atomic::{AtomicBool, AtomicU32, Ordering};

/// Read-only snapshot of one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Diagnostics {
    pub channel: Channel,
    pub period_ms: u32,
    pub toggle_count: u32,
    pub tick_accumulator: u32,
}

impl Diagnostics {
    pub fn state(&self) -> ChannelState {
        ChannelState::from_period(self.period_ms)
    }
}

/// Periods, counters and the red release flag.
pub struct PeriodRegistry {
    period: [AtomicU32; 3],
    tick_accumulator: [AtomicU32; 3],
    toggle_count: [AtomicU32; 3],
    millis: AtomicU32,
    compare_target: AtomicU32,
    release: AtomicBool,
}

impl PeriodRegistry {
    /// All periods zero, all counters cleared.
    pub const fn new() -> Self {
        Self {
            period: [AtomicU32::new(0), AtomicU32::new(0), AtomicU32::new(0)],
            tick_accumulator: [AtomicU32::new(0), AtomicU32::new(0), AtomicU32::new(0)],
            toggle_count: [AtomicU32::new(0), AtomicU32::new(0), AtomicU32::new(0)],
            millis: AtomicU32::new(0),
            compare_target: AtomicU32::new(0),
            release: AtomicBool::new(false),
        }
    }

    /// Configured period of `channel` in milliseconds.
    #[inline]
    pub fn period(&self, channel: Channel) -> u32 {
        self.period[channel.index()].load(Ordering::Acquire)
    }

    #[inline]
    pub(crate) fn store_period(&self, channel: Channel, period_ms: u32) {
        self.period[channel.index()].store(period_ms, Ordering::Release);
    }

    #[inline]
    pub fn toggle_count(&self, channel: Channel) -> u32 {
        self.toggle_count[channel.index()].load(Ordering::Relaxed)
    }

    #[inline]
    pub(crate) fn count_toggle(&self, channel: Channel) {
        self.toggle_count[channel.index()].fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn tick_accumulator(&self, channel: Channel) -> u32 {
        self.tick_accumulator[channel.index()].load(Ordering::Relaxed)
    }

    #[inline]
    pub(crate) fn store_tick_accumulator(&self, channel: Channel, ticks: u32) {
        self.tick_accumulator[channel.index()].store(ticks, Ordering::Relaxed);
    }

    /// Milliseconds counted by the base clock.
    #[inline]
    pub fn millis(&self) -> u32 {
        self.millis.load(Ordering::Relaxed)
    }

    #[inline]
    pub(crate) fn store_millis(&self, millis: u32) {
        self.millis.store(millis, Ordering::Relaxed);
    }

    /// Compare target last computed for the green period.
    #[inline]
    pub fn compare_target(&self) -> u32 {
        self.compare_target.load(Ordering::Acquire)
    }

    #[inline]
    pub(crate) fn store_compare_target(&self, target: u32) {
        self.compare_target.store(target, Ordering::Release);
    }

    #[inline]
    pub(crate) fn raise_release(&self) {
        self.release.store(true, Ordering::Release);
    }

    /// Returns the red release flag and clears it in one step.
    #[inline]
    pub fn take_release(&self) -> bool {
        self.release.swap(false, Ordering::AcqRel)
    }

    /// Snapshot of `channel` for display.
    pub fn diagnostics(&self, channel: Channel) -> Diagnostics {
        Diagnostics {
            channel,
            period_ms: self.period(channel),
            toggle_count: self.toggle_count(channel),
            tick_accumulator: self.tick_accumulator(channel),
        }
    }

    /// Clears counters, accumulators and the release flag. Periods are kept.
    ///
    /// Only valid while the tick sources are not yet running.
    pub(crate) fn reset_counters(&self) {
        for channel in Channel::ALL {
            self.toggle_count[channel.index()].store(0, Ordering::Relaxed);
            self.tick_accumulator[channel.index()].store(0, Ordering::Relaxed);
        }
        self.millis.store(0, Ordering::Relaxed);
        self.release.store(false, Ordering::Release);
    }
}

impl Default for PeriodRegistry {
    fn default() -> Self {
        Self::new()
    }
}

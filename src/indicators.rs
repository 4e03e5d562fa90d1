//! The configurator and the interrupt entry points.
//!
//! Provides [`Indicators`], which owns the period registry, the indicator
//! outputs and the green compare timer. Foreground code calls
//! [`Indicators::set_period`] and [`Indicators::read_and_clear_release_flag`];
//! the platform's interrupt trampolines call the three `on_*` handlers.
//!
//! Everything takes `&self`, so a single instance can live in a `static` and
//! be shared between the main loop and the interrupt handlers.

use crate::channel::{Channel, ChannelSelector};
use crate::command::PeriodCommand;
use crate::output::{CompareTimer, IndicatorOutput};
use crate::period::{PeriodChange, PeriodError};
use crate::registry::{Diagnostics, PeriodRegistry};
use crate::tick::{self, CompareMatch};
use crate::time::{GreenToggle, SELF_TEST_MS, TimerClock};
use core::cell::RefCell;
use critical_section::Mutex;
use embedded_hal::delay::DelayNs;

/// Drives red, green and yellow from three independent tick sources.
///
/// # Type Parameters
/// * `O` - Indicator output implementation
/// * `T` - Compare timer behind the green channel
pub struct Indicators<O: IndicatorOutput, T: CompareTimer> {
    registry: PeriodRegistry,
    outputs: Mutex<RefCell<O>>,
    timer: Mutex<RefCell<T>>,
    clock: TimerClock,
    green_toggle: GreenToggle,
}

impl<O: IndicatorOutput, T: CompareTimer> Indicators<O, T> {
    /// Creates the handle with every channel disabled.
    ///
    /// All outputs are switched to high impedance so the enable state matches
    /// the zero periods from the start.
    pub fn new(mut outputs: O, timer: T, clock: TimerClock, green_toggle: GreenToggle) -> Self {
        for channel in Channel::ALL {
            outputs.set(channel, false);
            outputs.disable(channel);
        }

        Self {
            registry: PeriodRegistry::new(),
            outputs: Mutex::new(RefCell::new(outputs)),
            timer: Mutex::new(RefCell::new(timer)),
            clock,
            green_toggle,
        }
    }

    /// Runs the startup self-test.
    ///
    /// Every output is driven on for two seconds, then switched off. Counters
    /// are zeroed and each channel's enable state is restored from its period.
    /// Call this before the tick sources are started.
    pub fn self_test<D: DelayNs>(&self, delay: &mut D) {
        critical_section::with(|cs| {
            let mut outputs = self.outputs.borrow_ref_mut(cs);
            for channel in Channel::ALL {
                outputs.enable(channel);
                outputs.set(channel, true);
            }
        });

        delay.delay_ms(SELF_TEST_MS);

        critical_section::with(|cs| {
            let mut outputs = self.outputs.borrow_ref_mut(cs);
            for channel in Channel::ALL {
                outputs.set(channel, false);
                if self.registry.period(channel) == 0 {
                    outputs.disable(channel);
                }
            }
            self.registry.reset_counters();
        });

        #[cfg(feature = "defmt")]
        defmt::info!("indicator self-test complete");
    }

    /// Validates `requested_ms` and applies it to the selected channel(s).
    ///
    /// The request is rounded down to a multiple of 100 ms and green is
    /// clamped to 4000 ms; both adjustments are reported as notices in the
    /// returned [`PeriodChange`]. A zero period disables the output.
    ///
    /// # Returns
    /// * `Ok(PeriodChange)` - The applied change and any notices
    /// * `Err(PeriodError::InvalidPeriod)` - Negative request, nothing changed
    pub fn set_period(
        &self,
        selector: ChannelSelector,
        requested_ms: i32,
    ) -> Result<PeriodChange, PeriodError> {
        let change = match PeriodChange::resolve(selector, requested_ms) {
            Ok(change) => change,
            Err(err) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("rejected period: {}", err);
                return Err(err);
            }
        };

        // Outputs, periods and the compare target change together so no
        // handler sees an enabled output with a stale period or vice versa.
        critical_section::with(|cs| {
            let mut outputs = self.outputs.borrow_ref_mut(cs);
            for channel in selector.channels() {
                let Some(period_ms) = change.period_for(channel) else {
                    continue;
                };

                if period_ms == 0 {
                    outputs.disable(channel);
                } else {
                    outputs.enable(channel);
                }
                self.registry.store_period(channel, period_ms);

                if channel == Channel::Green && period_ms > 0 {
                    let target = self.clock.compare_target(period_ms);
                    self.timer.borrow_ref_mut(cs).set_compare_target(target);
                    self.registry.store_compare_target(target);
                }
            }
        });

        #[cfg(feature = "defmt")]
        {
            for notice in change.notices() {
                defmt::info!("{}", notice);
            }
            defmt::debug!(
                "period {} ms (requested {}) applied to {}",
                change.rounded_ms(),
                change.requested_ms(),
                change.selector()
            );
        }

        Ok(change)
    }

    /// Applies a parsed menu command.
    pub fn handle_command(&self, command: PeriodCommand) -> Result<PeriodChange, PeriodError> {
        self.set_period(command.selector, command.requested_ms)
    }

    /// Returns whether red is due and clears the flag in the same step.
    ///
    /// The consumer toggles red itself; see [`Indicators::service_red`] for a
    /// helper that does both.
    pub fn read_and_clear_release_flag(&self) -> bool {
        self.registry.take_release()
    }

    /// Consumes a pending red release by toggling red and counting it.
    ///
    /// Returns true if a release was pending. Meant for the foreground loop.
    pub fn service_red(&self) -> bool {
        if !self.registry.take_release() {
            return false;
        }

        critical_section::with(|cs| {
            self.outputs.borrow_ref_mut(cs).toggle(Channel::Red);
        });
        self.registry.count_toggle(Channel::Red);
        true
    }

    /// Read-only snapshot of `channel`.
    pub fn diagnostics(&self, channel: Channel) -> Diagnostics {
        self.registry.diagnostics(channel)
    }

    /// Compare target programmed for the current green period.
    pub fn compare_target(&self) -> u32 {
        self.registry.compare_target()
    }

    /// Milliseconds counted by the base clock since the self-test.
    pub fn millis(&self) -> u32 {
        self.registry.millis()
    }

    /// Returns the shared registry.
    pub fn registry(&self) -> &PeriodRegistry {
        &self.registry
    }

    /// Runs `f` with exclusive access to the outputs.
    pub fn with_outputs<R>(&self, f: impl FnOnce(&mut O) -> R) -> R {
        critical_section::with(|cs| f(&mut *self.outputs.borrow_ref_mut(cs)))
    }

    /// Runs `f` with exclusive access to the compare timer.
    pub fn with_timer<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        critical_section::with(|cs| f(&mut *self.timer.borrow_ref_mut(cs)))
    }

    /// Base clock handler (1 kHz). Raises the red release flag on period boundaries.
    pub fn on_base_tick(&self) {
        let tick = tick::base_tick(self.registry.millis(), self.registry.period(Channel::Red));
        self.registry.store_millis(tick.millis);
        if tick.release {
            self.registry.raise_release();
        }
    }

    /// Slow tick handler (10 Hz). Toggles yellow once its period has elapsed.
    pub fn on_slow_tick(&self) {
        critical_section::with(|cs| {
            let tick = tick::slow_tick(
                self.registry.tick_accumulator(Channel::Yellow),
                self.registry.period(Channel::Yellow),
            );
            self.registry
                .store_tick_accumulator(Channel::Yellow, tick.accumulator);
            if tick.toggle {
                self.outputs.borrow_ref_mut(cs).toggle(Channel::Yellow);
                self.registry.count_toggle(Channel::Yellow);
            }
        });
    }

    /// Green compare-match handler. Counts the toggle, performing it too unless
    /// the timer toggles the pin in hardware.
    pub fn on_compare_match(&self) {
        let software = self.green_toggle == GreenToggle::Software;
        critical_section::with(|cs| {
            match tick::compare_match(self.registry.period(Channel::Green), software) {
                CompareMatch::Ignore => {}
                CompareMatch::Count { toggle } => {
                    if toggle {
                        self.outputs.borrow_ref_mut(cs).toggle(Channel::Green);
                    }
                    self.registry.count_toggle(Channel::Green);
                }
            }
        });
    }
}

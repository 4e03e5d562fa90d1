//! Hardware seams: the indicator outputs and the green compare timer.

use crate::channel::Channel;
use embedded_hal::digital::{OutputPin, PinState, StatefulOutputPin};

/// Trait for abstracting the three indicator outputs.
///
/// Implement this for your board to let [`Indicators`](crate::Indicators)
/// drive it. Calls arrive from both foreground code and interrupt handlers,
/// always inside a critical section, so implementations need no locking of
/// their own. Handle any hardware errors internally - these methods cannot
/// fail.
pub trait IndicatorOutput {
    /// Drives the channel's pin as an output.
    fn enable(&mut self, channel: Channel);

    /// Stops driving the channel's pin entirely (high impedance), not merely low.
    fn disable(&mut self, channel: Channel);

    /// Inverts the channel's output level.
    fn toggle(&mut self, channel: Channel);

    /// Sets the channel's output level; `true` is lit.
    fn set(&mut self, channel: Channel, on: bool);
}

/// Trait for the variable-frequency timer behind the green channel.
pub trait CompareTimer {
    /// Programs the counter value that produces a compare match.
    ///
    /// Called from `set_period` whenever the green period changes to a
    /// non-zero value.
    fn set_compare_target(&mut self, target: u32);
}

/// Compare timer for boards where the green channel is timed by some other
/// means. Targets are still computed and recorded in the registry.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCompareTimer;

impl CompareTimer for NoCompareTimer {
    fn set_compare_target(&mut self, _target: u32) {}
}

/// An output pin that can also be switched to high impedance.
///
/// `embedded-hal` has no direction-switching trait, so HAL pins need a thin
/// wrapper that flips the data-direction bit.
pub trait IndicatorPin: StatefulOutputPin {
    /// Switches the pin to push-pull output.
    fn drive(&mut self) -> Result<(), Self::Error>;

    /// Switches the pin to input so it is no longer driven.
    fn release(&mut self) -> Result<(), Self::Error>;
}

/// [`IndicatorOutput`] over three individual pins.
pub struct PinIndicators<R, G, Y> {
    red: R,
    green: G,
    yellow: Y,
    active_low: bool,
}

impl<R, G, Y> PinIndicators<R, G, Y>
where
    R: IndicatorPin,
    G: IndicatorPin,
    Y: IndicatorPin,
{
    /// Creates the adapter. `active_low` inverts every level written by `set`.
    pub fn new(red: R, green: G, yellow: Y, active_low: bool) -> Self {
        Self {
            red,
            green,
            yellow,
            active_low,
        }
    }

    /// Releases the pins.
    pub fn free(self) -> (R, G, Y) {
        (self.red, self.green, self.yellow)
    }

    fn level(&self, on: bool) -> PinState {
        PinState::from(on != self.active_low)
    }
}

// Pin errors are dropped: the indicator contract is infallible.
macro_rules! with_pin {
    ($self:ident, $channel:expr, |$pin:ident| $body:expr) => {
        match $channel {
            Channel::Red => {
                let $pin = &mut $self.red;
                let _ = $body;
            }
            Channel::Green => {
                let $pin = &mut $self.green;
                let _ = $body;
            }
            Channel::Yellow => {
                let $pin = &mut $self.yellow;
                let _ = $body;
            }
        }
    };
}

impl<R, G, Y> IndicatorOutput for PinIndicators<R, G, Y>
where
    R: IndicatorPin,
    G: IndicatorPin,
    Y: IndicatorPin,
{
    fn enable(&mut self, channel: Channel) {
        with_pin!(self, channel, |pin| pin.drive());
    }

    fn disable(&mut self, channel: Channel) {
        with_pin!(self, channel, |pin| pin.release());
    }

    fn toggle(&mut self, channel: Channel) {
        with_pin!(self, channel, |pin| pin.toggle());
    }

    fn set(&mut self, channel: Channel, on: bool) {
        let state = self.level(on);
        with_pin!(self, channel, |pin| pin.set_state(state));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;

    #[derive(Default)]
    struct MockPin {
        high: bool,
        driven: bool,
    }

    impl ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high = true;
            Ok(())
        }
    }

    impl StatefulOutputPin for MockPin {
        fn is_set_high(&mut self) -> Result<bool, Self::Error> {
            Ok(self.high)
        }

        fn is_set_low(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.high)
        }
    }

    impl IndicatorPin for MockPin {
        fn drive(&mut self) -> Result<(), Self::Error> {
            self.driven = true;
            Ok(())
        }

        fn release(&mut self) -> Result<(), Self::Error> {
            self.driven = false;
            Ok(())
        }
    }

    fn bank(active_low: bool) -> PinIndicators<MockPin, MockPin, MockPin> {
        PinIndicators::new(
            MockPin::default(),
            MockPin::default(),
            MockPin::default(),
            active_low,
        )
    }

    #[test]
    fn enable_and_disable_switch_direction() {
        let mut pins = bank(false);
        pins.enable(Channel::Green);
        pins.enable(Channel::Yellow);
        pins.disable(Channel::Yellow);

        let (red, green, yellow) = pins.free();
        assert!(!red.driven);
        assert!(green.driven);
        assert!(!yellow.driven);
    }

    #[test]
    fn toggle_inverts_only_the_selected_pin() {
        let mut pins = bank(false);
        pins.toggle(Channel::Red);
        pins.toggle(Channel::Yellow);
        pins.toggle(Channel::Yellow);

        let (red, green, yellow) = pins.free();
        assert!(red.high);
        assert!(!green.high);
        assert!(!yellow.high);
    }

    #[test]
    fn set_respects_active_low() {
        let mut pins = bank(true);
        pins.set(Channel::Red, true);
        pins.set(Channel::Green, false);

        let (red, green, _) = pins.free();
        assert!(!red.high);
        assert!(green.high);
    }
}

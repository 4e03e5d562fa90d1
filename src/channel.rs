//! Channel identifiers and the per-channel enable state machine.

/// One of the three independently scheduled indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    /// Released by the base clock, toggled by the foreground scheduler.
    Red,
    /// Toggled on every compare match of the variable-frequency timer.
    Green,
    /// Toggled by the slow tick handler itself.
    Yellow,
}

impl Channel {
    /// All channels, in registry order.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Yellow];

    /// Registry slot of this channel.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Yellow => 2,
        }
    }

    /// Largest period this channel accepts, if it has one.
    #[inline]
    pub const fn max_period_ms(self) -> Option<u32> {
        match self {
            Channel::Green => Some(crate::time::GREEN_MAX_PERIOD_MS),
            Channel::Red | Channel::Yellow => None,
        }
    }
}

/// Which channel(s) a period change applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelSelector {
    Red,
    Green,
    Yellow,
    /// Every channel at once.
    All,
}

impl ChannelSelector {
    /// Maps the single-letter menu selector (`R`, `G`, `Y`, `A`) to a selector.
    ///
    /// Letters are case-insensitive. Returns `None` for anything else.
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'R' => Some(ChannelSelector::Red),
            'G' => Some(ChannelSelector::Green),
            'Y' => Some(ChannelSelector::Yellow),
            'A' => Some(ChannelSelector::All),
            _ => None,
        }
    }

    /// Returns true if this selector covers `channel`.
    #[inline]
    pub fn includes(self, channel: Channel) -> bool {
        match self {
            ChannelSelector::All => true,
            ChannelSelector::Red => channel == Channel::Red,
            ChannelSelector::Green => channel == Channel::Green,
            ChannelSelector::Yellow => channel == Channel::Yellow,
        }
    }

    /// Iterates over the channels this selector covers.
    pub fn channels(self) -> impl Iterator<Item = Channel> {
        Channel::ALL.into_iter().filter(move |c| self.includes(*c))
    }
}

impl From<Channel> for ChannelSelector {
    fn from(channel: Channel) -> Self {
        match channel {
            Channel::Red => ChannelSelector::Red,
            Channel::Green => ChannelSelector::Green,
            Channel::Yellow => ChannelSelector::Yellow,
        }
    }
}

/// Enable state of a channel as seen by the configurator.
///
/// Only `set_period` moves a channel between these states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelState {
    /// Period is zero. The output is not driven.
    Disabled,
    /// Output toggles once every `period_ms`.
    Enabled { period_ms: u32 },
}

impl ChannelState {
    /// Derives the state from a stored period.
    #[inline]
    pub const fn from_period(period_ms: u32) -> Self {
        if period_ms == 0 {
            ChannelState::Disabled
        } else {
            ChannelState::Enabled { period_ms }
        }
    }

    #[inline]
    pub const fn is_enabled(&self) -> bool {
        matches!(self, ChannelState::Enabled { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_map_to_selectors() {
        assert_eq!(ChannelSelector::from_letter('R'), Some(ChannelSelector::Red));
        assert_eq!(ChannelSelector::from_letter('g'), Some(ChannelSelector::Green));
        assert_eq!(ChannelSelector::from_letter('Y'), Some(ChannelSelector::Yellow));
        assert_eq!(ChannelSelector::from_letter('a'), Some(ChannelSelector::All));
        assert_eq!(ChannelSelector::from_letter('B'), None);
    }

    #[test]
    fn all_selector_covers_every_channel() {
        assert_eq!(ChannelSelector::All.channels().count(), 3);
        let mut single = ChannelSelector::Yellow.channels();
        assert_eq!(single.next(), Some(Channel::Yellow));
        assert_eq!(single.next(), None);
    }

    #[test]
    fn only_green_has_a_maximum() {
        assert_eq!(Channel::Green.max_period_ms(), Some(4000));
        assert_eq!(Channel::Red.max_period_ms(), None);
        assert_eq!(Channel::Yellow.max_period_ms(), None);
    }

    #[test]
    fn state_follows_period() {
        assert_eq!(ChannelState::from_period(0), ChannelState::Disabled);
        assert_eq!(
            ChannelState::from_period(300),
            ChannelState::Enabled { period_ms: 300 }
        );
        assert!(!ChannelState::Disabled.is_enabled());
    }
}

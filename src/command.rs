//! Period-change requests as issued by the operator menu.

use crate::channel::ChannelSelector;

/// A request to change the period of one or all channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PeriodCommand {
    pub selector: ChannelSelector,
    pub requested_ms: i32,
}

impl PeriodCommand {
    /// Creates command.
    pub fn new(selector: impl Into<ChannelSelector>, requested_ms: i32) -> Self {
        Self {
            selector: selector.into(),
            requested_ms,
        }
    }

    /// Builds a command from the menu's channel letter (`R`, `G`, `Y` or `A`).
    pub fn from_letter(letter: char, requested_ms: i32) -> Result<Self, CommandError> {
        let selector =
            ChannelSelector::from_letter(letter).ok_or(CommandError::UnknownChannel(letter))?;
        Ok(Self::new(selector, requested_ms))
    }
}

/// Malformed menu commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Letter is not one of `R`, `G`, `Y` or `A`.
    UnknownChannel(char),
}

impl core::fmt::Display for CommandError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CommandError::UnknownChannel(letter) => {
                write!(f, "unknown channel '{}', expected R, G, Y or A", letter)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CommandError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::Channel;

    #[test]
    fn letter_commands_parse() {
        let command = PeriodCommand::from_letter('y', 300).unwrap();
        assert_eq!(command.selector, ChannelSelector::Yellow);
        assert_eq!(command.requested_ms, 300);
    }

    #[test]
    fn unknown_letters_are_rejected() {
        assert_eq!(
            PeriodCommand::from_letter('X', 300),
            Err(CommandError::UnknownChannel('X'))
        );
    }

    #[test]
    fn channel_converts_into_selector() {
        let command = PeriodCommand::new(Channel::Green, 1000);
        assert_eq!(command.selector, ChannelSelector::Green);
    }
}

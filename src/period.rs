//! Validation of requested periods.
//!
//! A request is checked, rounded down to [`PERIOD_RESOLUTION_MS`] and clamped
//! per channel before anything is stored. Everything here is pure so the
//! configurator can resolve a request before entering its critical section.

use crate::channel::{Channel, ChannelSelector};
use crate::time::PERIOD_RESOLUTION_MS;
use heapless::Vec;

/// Informational notices produced while resolving a request.
///
/// None of these are errors; the adjusted value is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PeriodNotice {
    /// The request was not a multiple of the base resolution.
    Rounded { requested: u32, applied: u32 },
    /// The request exceeded the channel maximum.
    Clamped {
        channel: Channel,
        requested: u32,
        applied: u32,
    },
}

impl core::fmt::Display for PeriodNotice {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PeriodNotice::Rounded { applied, .. } => {
                write!(f, "converted to toggle period: {}", applied)
            }
            PeriodNotice::Clamped {
                channel,
                requested,
                applied,
            } => {
                write!(
                    f,
                    "{:?} period {} exceeds maximum, clamped to {}",
                    channel, requested, applied
                )
            }
        }
    }
}

/// Rejected period requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PeriodError {
    /// Negative period requested. Nothing was changed.
    InvalidPeriod { requested: i32 },
}

impl core::fmt::Display for PeriodError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PeriodError::InvalidPeriod { requested } => {
                write!(f, "cannot toggle negative ms: {}", requested)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PeriodError {}

/// An accepted period request, ready to be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodChange {
    selector: ChannelSelector,
    requested: u32,
    rounded_ms: u32,
    notices: Vec<PeriodNotice, 2>,
}

impl PeriodChange {
    /// Validates `requested_ms` for the channels in `selector`.
    pub fn resolve(selector: ChannelSelector, requested_ms: i32) -> Result<Self, PeriodError> {
        let requested = u32::try_from(requested_ms).map_err(|_| PeriodError::InvalidPeriod {
            requested: requested_ms,
        })?;

        let rounded_ms = round_down(requested);
        let mut notices = Vec::new();

        // Capacity covers one rounding plus one clamp; at most green clamps.
        if rounded_ms != requested {
            let _ = notices.push(PeriodNotice::Rounded {
                requested,
                applied: rounded_ms,
            });
        }
        for channel in selector.channels() {
            let applied = clamp(channel, rounded_ms);
            if applied != rounded_ms {
                let _ = notices.push(PeriodNotice::Clamped {
                    channel,
                    requested: rounded_ms,
                    applied,
                });
            }
        }

        Ok(Self {
            selector,
            requested,
            rounded_ms,
            notices,
        })
    }

    pub fn selector(&self) -> ChannelSelector {
        self.selector
    }

    /// The request as given.
    pub fn requested_ms(&self) -> u32 {
        self.requested
    }

    /// The request rounded down, before any channel clamp.
    pub fn rounded_ms(&self) -> u32 {
        self.rounded_ms
    }

    /// Period stored for `channel`, or `None` if the selector does not cover it.
    pub fn period_for(&self, channel: Channel) -> Option<u32> {
        if self.selector.includes(channel) {
            Some(clamp(channel, self.rounded_ms))
        } else {
            None
        }
    }

    /// Notices to report to the operator.
    pub fn notices(&self) -> &[PeriodNotice] {
        &self.notices
    }

    pub fn was_rounded(&self) -> bool {
        self.notices
            .iter()
            .any(|n| matches!(n, PeriodNotice::Rounded { .. }))
    }

    pub fn was_clamped(&self) -> bool {
        self.notices
            .iter()
            .any(|n| matches!(n, PeriodNotice::Clamped { .. }))
    }
}

/// Rounds down to the nearest multiple of the base resolution.
#[inline]
pub const fn round_down(ms: u32) -> u32 {
    ms - ms % PERIOD_RESOLUTION_MS
}

/// Applies the channel maximum, if any.
#[inline]
pub const fn clamp(channel: Channel, ms: u32) -> u32 {
    match channel.max_period_ms() {
        Some(max) if ms > max => max,
        _ => ms,
    }
}

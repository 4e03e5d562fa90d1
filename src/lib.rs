#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Channel`**: One of the three indicators (`Red`, `Green`, `Yellow`)
//! - **`ChannelSelector`**: A channel or `All`, the target of a period change
//! - **`Indicators`**: Owns the registry and hardware; configurator plus interrupt entry points
//! - **`PeriodRegistry`**: Interrupt-safe periods, counters and the red release flag
//! - **`PeriodChange`**: A validated request with its rounding/clamping notices
//! - **`IndicatorOutput`**: Trait to implement for your indicator hardware
//! - **`CompareTimer`**: Trait to implement for the green channel's timer
//! - **`TimerClock`**: Counting rate used to turn a green period into a compare target
//!
//! Periods are in milliseconds, always a multiple of 100. A period of zero
//! disables the channel and leaves its pin undriven.

pub mod channel;
pub mod command;
pub mod indicators;
pub mod output;
pub mod period;
pub mod registry;
pub mod tick;
pub mod time;

pub use channel::{Channel, ChannelSelector, ChannelState};
pub use command::{CommandError, PeriodCommand};
pub use indicators::Indicators;
pub use output::{CompareTimer, IndicatorOutput, IndicatorPin, NoCompareTimer, PinIndicators};
pub use period::{PeriodChange, PeriodError, PeriodNotice};
pub use registry::{Diagnostics, PeriodRegistry};
pub use time::{
    BASE_TICK_HZ, BASE_TICK_MS, GREEN_MAX_PERIOD_MS, GreenToggle, PERIOD_RESOLUTION_MS, SELF_TEST_MS,
    SLOW_TICK_MS, TimerClock,
};

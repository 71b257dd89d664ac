#![cfg_attr(not(test), no_std)]

pub use chrono;
pub use embedded_graphics;
pub use err_derive;

pub use crate::battery::{BatterySource, BatteryState};
pub use crate::system_time::SystemTimeExt;

mod battery;
pub mod display;
mod system_time;

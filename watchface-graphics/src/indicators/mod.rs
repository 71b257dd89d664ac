//! Event-driven indicators: each one owns the visual state for a face
//! element, rewrites it from a host notification, and reports which regions
//! now need a redraw.

pub use battery::BatteryIndicator;
pub use time::TimeIndicator;

use watchface_common::err_derive;

pub mod battery;
pub mod time;

#[derive(Debug, err_derive::Error)]
pub enum Error {
    #[error(display = "Formatting error")]
    Formatting(#[error(source)] core::fmt::Error),
}

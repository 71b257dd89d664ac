use chrono::NaiveDateTime;

/// Read access to the host's wall clock.
///
/// The firmware's RTC-backed clock and the simulator's local-time clock
/// both implement this; the watchface itself never keeps time.
pub trait SystemTimeExt {
    fn date_time(&self) -> &NaiveDateTime;
}

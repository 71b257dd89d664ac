use super::Error;
use crate::screens::watch_face::Redraw;
use core::fmt::Write;
use heapless::String;
use watchface_common::chrono::{NaiveDateTime, Timelike};

/// Projects the wall clock into the time label: 12-hour hour, space padded
/// with no leading zero, zero-padded minute. No AM/PM indicator.
pub struct TimeIndicator {
    text: String<5>,
    hour_minute: Option<(u32, u32)>,
}

impl TimeIndicator {
    pub fn new() -> Self {
        TimeIndicator {
            text: String::new(),
            hour_minute: None,
        }
    }

    /// The formatted label text, e.g. `" 1:05"` or `"11:47"`.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Handles a minute tick. Returns the regions to invalidate; empty when
    /// the displayed hour and minute are unchanged.
    pub fn handle_tick(&mut self, dt: &NaiveDateTime) -> Result<Redraw, Error> {
        let time = dt.time();
        let (_, hour) = time.hour12();
        let minute = time.minute();
        if self.hour_minute == Some((hour, minute)) {
            return Ok(Redraw::empty());
        }

        self.text.clear();
        write!(&mut self.text, "{:2}:{:02}", hour, minute)?;
        self.hour_minute = Some((hour, minute));
        Ok(Redraw::TIME)
    }
}

impl Default for TimeIndicator {
    fn default() -> Self {
        TimeIndicator::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use watchface_common::chrono::NaiveDate;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd(2021, 3, 2).and_hms(hour, minute, 0)
    }

    #[test]
    fn single_digit_hours_are_space_padded() {
        let mut time = TimeIndicator::new();
        time.handle_tick(&at(1, 5)).unwrap();
        assert_eq!(time.text(), " 1:05");
    }

    #[test]
    fn double_digit_hours_fill_the_buffer() {
        let mut time = TimeIndicator::new();
        time.handle_tick(&at(11, 47)).unwrap();
        assert_eq!(time.text(), "11:47");
    }

    #[test]
    fn noon_renders_as_twelve() {
        let mut time = TimeIndicator::new();
        time.handle_tick(&at(12, 0)).unwrap();
        assert_eq!(time.text(), "12:00");
    }

    #[test]
    fn midnight_renders_as_twelve() {
        let mut time = TimeIndicator::new();
        time.handle_tick(&at(0, 7)).unwrap();
        assert_eq!(time.text(), "12:07");
    }

    #[test]
    fn afternoon_drops_to_twelve_hour() {
        let mut time = TimeIndicator::new();
        time.handle_tick(&at(23, 47)).unwrap();
        assert_eq!(time.text(), "11:47");
    }

    #[test]
    fn first_tick_always_invalidates() {
        let mut time = TimeIndicator::new();
        assert_eq!(time.handle_tick(&at(9, 3)).unwrap(), Redraw::TIME);
    }

    #[test]
    fn unchanged_minute_is_a_no_op() {
        let mut time = TimeIndicator::new();
        time.handle_tick(&at(9, 3)).unwrap();
        assert_eq!(time.handle_tick(&at(9, 3)).unwrap(), Redraw::empty());
        assert_eq!(time.handle_tick(&at(9, 4)).unwrap(), Redraw::TIME);
    }
}

use super::Error;
use crate::screens::watch_face::Redraw;
use core::fmt::Write;
use heapless::String;
use watchface_common::BatteryState;

/// Projects a battery snapshot into the percentage label and the charge
/// bar level. The bar geometry itself is derived at draw time from the
/// stored level.
pub struct BatteryIndicator {
    level: u8,
    text: String<4>,
}

impl BatteryIndicator {
    pub fn new() -> Self {
        BatteryIndicator {
            level: 0,
            text: String::new(),
        }
    }

    /// Charge level last received, in [0, 100].
    pub fn level(&self) -> u8 {
        self.level
    }

    /// The formatted label text, e.g. `"42%"`.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Handles a battery state notification. Returns the regions to
    /// invalidate; empty when the displayed level is unchanged.
    pub fn handle_battery(&mut self, state: BatteryState) -> Result<Redraw, Error> {
        let level = state.percent_remaining().min(100);
        if level == self.level && !self.text.is_empty() {
            return Ok(Redraw::empty());
        }

        self.level = level;
        self.text.clear();
        write!(&mut self.text, "{}%", level)?;
        Ok(Redraw::PERCENT | Redraw::BAR)
    }
}

impl Default for BatteryIndicator {
    fn default() -> Self {
        BatteryIndicator::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_the_percentage_label() {
        let mut battery = BatteryIndicator::new();
        battery.handle_battery(BatteryState::new(0, false)).unwrap();
        assert_eq!(battery.text(), "0%");

        battery.handle_battery(BatteryState::new(7, false)).unwrap();
        assert_eq!(battery.text(), "7%");

        battery
            .handle_battery(BatteryState::new(100, false))
            .unwrap();
        assert_eq!(battery.text(), "100%");
    }

    #[test]
    fn label_never_exceeds_four_characters() {
        let mut battery = BatteryIndicator::new();
        for level in 0..=100 {
            battery
                .handle_battery(BatteryState::new(level, false))
                .unwrap();
            assert!(battery.text().len() <= 4);
        }
    }

    #[test]
    fn notification_invalidates_label_and_bar() {
        let mut battery = BatteryIndicator::new();
        assert_eq!(
            battery.handle_battery(BatteryState::new(42, false)).unwrap(),
            Redraw::PERCENT | Redraw::BAR
        );
    }

    #[test]
    fn unchanged_level_is_a_no_op() {
        let mut battery = BatteryIndicator::new();
        battery.handle_battery(BatteryState::new(42, false)).unwrap();
        assert_eq!(
            battery.handle_battery(BatteryState::new(42, true)).unwrap(),
            Redraw::empty()
        );
    }

    #[test]
    fn initial_zero_level_still_formats() {
        let mut battery = BatteryIndicator::new();
        assert_eq!(
            battery.handle_battery(BatteryState::new(0, false)).unwrap(),
            Redraw::PERCENT | Redraw::BAR
        );
        assert_eq!(battery.text(), "0%");
    }

    #[test]
    fn stored_level_tracks_the_latest_notification() {
        let mut battery = BatteryIndicator::new();
        for level in [100, 73, 9, 0] {
            battery
                .handle_battery(BatteryState::new(level, false))
                .unwrap();
            assert_eq!(i16::from(battery.level()), level);
        }
    }
}

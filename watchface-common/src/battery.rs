use core::fmt;

/// Snapshot of the battery service state, carried by change notifications
/// and returned by the startup peek.
///
/// `charging` is part of the notification contract but unused by the
/// current rendering.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct BatteryState {
    percent: u8,
    charging: bool,
}

impl BatteryState {
    /// Builds a snapshot from a raw reading, clamping the percentage to
    /// [0, 100]. Out-of-range readings are an upstream contract violation
    /// and are never surfaced as errors.
    pub fn new(percent: i16, charging: bool) -> Self {
        BatteryState {
            percent: percent.clamp(0, 100) as u8,
            charging,
        }
    }

    pub fn percent_remaining(&self) -> u8 {
        self.percent
    }

    pub fn is_charging(&self) -> bool {
        self.charging
    }
}

impl fmt::Display for BatteryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.charging {
            write!(f, "{}% (charging)", self.percent)
        } else {
            write!(f, "{}%", self.percent)
        }
    }
}

/// Peek access to the current battery state.
///
/// Used once at session start so the face is never blank before the first
/// change notification arrives.
pub trait BatterySource {
    fn battery_state(&self) -> BatteryState;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_range_readings_pass_through() {
        assert_eq!(BatteryState::new(0, false).percent_remaining(), 0);
        assert_eq!(BatteryState::new(42, false).percent_remaining(), 42);
        assert_eq!(BatteryState::new(100, true).percent_remaining(), 100);
    }

    #[test]
    fn out_of_range_readings_clamp_to_nearest_bound() {
        assert_eq!(BatteryState::new(-5, false).percent_remaining(), 0);
        assert_eq!(BatteryState::new(150, false).percent_remaining(), 100);
        assert_eq!(BatteryState::new(i16::MIN, false).percent_remaining(), 0);
        assert_eq!(BatteryState::new(i16::MAX, true).percent_remaining(), 100);
    }

    #[test]
    fn charging_flag_is_carried() {
        assert!(BatteryState::new(50, true).is_charging());
        assert!(!BatteryState::new(50, false).is_charging());
    }
}

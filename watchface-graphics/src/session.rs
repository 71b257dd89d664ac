//! Startup/shutdown sequencing and the event handler surface.
//!
//! [`start`] builds the visual elements, synchronizes them with the host's
//! current clock and battery state, and paints the face once, so no blank
//! frame can ever reach the panel. The host then routes its tick and
//! battery notifications into the returned [`ActiveSession`]. Stopping
//! consumes the session: a torn-down face cannot be started or stopped a
//! second time.

use crate::{
    font_styles::FontStyles,
    icons::Icons,
    indicators::{self, BatteryIndicator, TimeIndicator},
    screens::{WatchFace, WatchFaceResources},
};
use core::fmt;
use watchface_common::chrono::NaiveDateTime;
use watchface_common::display::{PixelFormat, BACKGROUND_COLOR};
use watchface_common::embedded_graphics::draw_target::DrawTarget;
use watchface_common::{BatterySource, BatteryState, SystemTimeExt};

#[derive(Debug)]
pub enum Error<E> {
    /// A label failed to format; only reachable through a buffer sizing
    /// logic error.
    Indicator(indicators::Error),
    /// The drawing surface rejected an operation. Fatal at startup: the
    /// face must not run partially drawn.
    Surface(E),
}

impl<E> From<indicators::Error> for Error<E> {
    fn from(e: indicators::Error) -> Self {
        Error::Indicator(e)
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Indicator(e) => write!(f, "{}", e),
            Error::Surface(e) => write!(f, "surface error: {:?}", e),
        }
    }
}

/// A running watchface session: the face, its two indicators, and the
/// styles they are drawn with.
pub struct ActiveSession {
    face: WatchFace,
    time: TimeIndicator,
    battery: BatteryIndicator,
    font_styles: FontStyles,
    icons: Icons,
}

/// Brings the face up: element placement, initial time sync, initial
/// battery sync (in that order), then one full paint. Callers subscribe
/// the returned session to their event sources afterwards, so nothing can
/// fire against a half-initialized face.
pub fn start<D, C, B>(target: &mut D, clock: &C, battery: &B) -> Result<ActiveSession, Error<D::Error>>
where
    D: DrawTarget<Color = PixelFormat>,
    C: SystemTimeExt,
    B: BatterySource,
{
    let mut session = ActiveSession {
        face: WatchFace::new(),
        time: TimeIndicator::new(),
        battery: BatteryIndicator::new(),
        font_styles: FontStyles::default(),
        icons: Icons::default(),
    };

    session.time.handle_tick(clock.date_time())?;
    session.battery.handle_battery(battery.battery_state())?;

    target.clear(BACKGROUND_COLOR).map_err(Error::Surface)?;
    session.face.force_redraw();
    session.refresh(target).map_err(Error::Surface)?;

    Ok(session)
}

impl ActiveSession {
    /// Minute-tick handler. Cheap when the displayed minute is unchanged.
    pub fn handle_tick(&mut self, dt: &NaiveDateTime) -> Result<(), indicators::Error> {
        let dirty = self.time.handle_tick(dt)?;
        self.face.invalidate(dirty);
        Ok(())
    }

    /// Battery-change handler; also used for the startup peek.
    pub fn handle_battery(&mut self, state: BatteryState) -> Result<(), indicators::Error> {
        let dirty = self.battery.handle_battery(state)?;
        self.face.invalidate(dirty);
        Ok(())
    }

    pub fn needs_refresh(&self) -> bool {
        self.face.is_dirty()
    }

    /// Redraws whatever the handlers invalidated since the last pass.
    pub fn refresh<D>(&mut self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = PixelFormat>,
    {
        let ActiveSession {
            face,
            time,
            battery,
            font_styles,
            icons,
        } = self;
        let res = WatchFaceResources {
            font_styles,
            icons,
            time,
            battery,
        };
        face.refresh(target, &res)
    }

    /// Tears the session down, clearing the surface. Consuming `self` makes
    /// a second stop (or any use after stop) a compile error rather than a
    /// runtime misuse.
    pub fn stop<D>(self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = PixelFormat>,
    {
        target.clear(BACKGROUND_COLOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{layout, test_canvas::TestCanvas};
    use watchface_common::chrono::{NaiveDate, NaiveDateTime};
    use watchface_common::embedded_graphics::prelude::RgbColor;

    struct FixedClock {
        dt: NaiveDateTime,
    }

    impl FixedClock {
        fn at(hour: u32, minute: u32) -> Self {
            FixedClock {
                dt: NaiveDate::from_ymd(2021, 3, 2).and_hms(hour, minute, 0),
            }
        }
    }

    impl SystemTimeExt for FixedClock {
        fn date_time(&self) -> &NaiveDateTime {
            &self.dt
        }
    }

    struct FixedBattery {
        percent: i16,
    }

    impl BatterySource for FixedBattery {
        fn battery_state(&self) -> BatteryState {
            BatteryState::new(self.percent, false)
        }
    }

    #[test]
    fn startup_synchronizes_before_any_event() {
        let mut canvas = TestCanvas::new();
        let clock = FixedClock::at(9, 3);
        let battery = FixedBattery { percent: 42 };

        let session = start(&mut canvas, &clock, &battery).unwrap();

        assert_eq!(session.time.text(), " 9:03");
        assert_eq!(session.battery.text(), "42%");
        assert_eq!(layout::bar_fill_width(session.battery.level()), 4);
        assert!(canvas.touched() > 0);
    }

    #[test]
    fn startup_paints_the_bar_at_the_peeked_level() {
        let mut canvas = TestCanvas::new();
        let clock = FixedClock::at(9, 3);
        let battery = FixedBattery { percent: 42 };

        start(&mut canvas, &clock, &battery).unwrap();

        let origin = layout::BAR_REGION.top_left;
        let track = layout::BAR_TRACK_UNITS as i32;
        // 42% -> 4 filled units, 6 bare track units.
        for x in 0..4 {
            assert_eq!(
                canvas.pixel(origin.x + x, origin.y),
                Some(PixelFormat::BLACK)
            );
        }
        for x in 4..track {
            assert_eq!(
                canvas.pixel(origin.x + x, origin.y),
                Some(PixelFormat::WHITE)
            );
        }
    }

    #[test]
    fn startup_leaves_the_face_clean() {
        let mut canvas = TestCanvas::new();
        let clock = FixedClock::at(9, 3);
        let battery = FixedBattery { percent: 42 };

        let session = start(&mut canvas, &clock, &battery).unwrap();
        assert!(!session.needs_refresh());
    }

    #[test]
    fn battery_event_invalidates_and_refresh_cleans() {
        let mut canvas = TestCanvas::new();
        let clock = FixedClock::at(9, 3);
        let battery = FixedBattery { percent: 42 };
        let mut session = start(&mut canvas, &clock, &battery).unwrap();

        session.handle_battery(BatteryState::new(17, false)).unwrap();
        assert!(session.needs_refresh());

        session.refresh(&mut canvas).unwrap();
        assert!(!session.needs_refresh());
        assert_eq!(session.battery.text(), "17%");
    }

    #[test]
    fn tick_event_rewrites_the_time_label() {
        let mut canvas = TestCanvas::new();
        let clock = FixedClock::at(9, 3);
        let battery = FixedBattery { percent: 42 };
        let mut session = start(&mut canvas, &clock, &battery).unwrap();

        let later = FixedClock::at(11, 47);
        session.handle_tick(later.date_time()).unwrap();
        session.refresh(&mut canvas).unwrap();
        assert_eq!(session.time.text(), "11:47");
    }

    #[test]
    fn duplicate_events_leave_the_face_clean() {
        let mut canvas = TestCanvas::new();
        let clock = FixedClock::at(9, 3);
        let battery = FixedBattery { percent: 42 };
        let mut session = start(&mut canvas, &clock, &battery).unwrap();

        session.handle_tick(clock.date_time()).unwrap();
        session.handle_battery(battery.battery_state()).unwrap();
        assert!(!session.needs_refresh());
    }

    #[test]
    fn stop_clears_the_surface() {
        let mut canvas = TestCanvas::new();
        let clock = FixedClock::at(9, 3);
        let battery = FixedBattery { percent: 42 };
        let session = start(&mut canvas, &clock, &battery).unwrap();

        session.stop(&mut canvas).unwrap();
        assert!(canvas.all_background());
    }
}

//! Wall-clock time derived from the RTC monotonic tick counter.
//!
//! Seeded once at boot (from the build-host clock), then advanced by whole
//! seconds as ticks accumulate; the sub-second remainder is carried in the
//! stored instant so the clock never drifts by truncation.

use crate::hal::{rtc, timer};
use crate::rtc_monotonic::{RtcMonotonic, MAX_TICKS, TICK_RATE_HZ};
use rtic::time::{duration::Seconds, Instant};
use watchface_common::chrono::{Duration, NaiveDateTime};
use watchface_common::SystemTimeExt;

pub struct SystemTime<RTC: rtc::Instance, TIM: timer::Instance> {
    uptime: Seconds,
    last_clock_instant: Instant<RtcMonotonic<RTC, TIM>>,
    date_time: NaiveDateTime,
}

impl<RTC, TIM> SystemTime<RTC, TIM>
where
    RTC: rtc::Instance,
    TIM: timer::Instance,
{
    pub fn new(date_time: NaiveDateTime) -> Self {
        SystemTime {
            uptime: Seconds::new(0),
            last_clock_instant: Instant::new(0),
            date_time,
        }
    }

    pub fn update_time(&mut self, now: Instant<RtcMonotonic<RTC, TIM>>) {
        let ticks = now.duration_since_epoch().integer();
        let prev_ticks = self.last_clock_instant.duration_since_epoch().integer();

        let tick_delta = if ticks < prev_ticks {
            (MAX_TICKS - prev_ticks) + (ticks + 1)
        } else {
            ticks - prev_ticks
        };

        let whole_seconds = tick_delta / TICK_RATE_HZ;
        let rest = tick_delta - (whole_seconds * TICK_RATE_HZ);
        let last_clock_ticks = if ticks >= rest {
            ticks - rest
        } else {
            MAX_TICKS - (rest - ticks)
        };

        self.last_clock_instant = Instant::new(last_clock_ticks);

        let sec = Seconds::new(whole_seconds);
        self.uptime = self.uptime + sec;

        self.date_time += Duration::from_std(core::time::Duration::from_secs(sec.0 as _)).unwrap();
    }

    pub fn uptime(&self) -> Seconds {
        self.uptime
    }

    pub fn date_time(&self) -> &NaiveDateTime {
        &self.date_time
    }
}

impl<RTC, TIM> SystemTimeExt for SystemTime<RTC, TIM>
where
    RTC: rtc::Instance,
    TIM: timer::Instance,
{
    fn date_time(&self) -> &NaiveDateTime {
        &self.date_time
    }
}

//! Runs the watchface against a simulated host: the local wall clock
//! provides minute ticks, and the keyboard stands in for the battery
//! service (B steps the charge level, C toggles charging).

use chrono::{DateTime, Local, NaiveDateTime, Timelike};
use embedded_graphics_simulator::{
    sdl2::Keycode, OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window,
};
use std::{thread, time::Duration};
use watchface_common::{
    display::{self, PixelFormat, BACKGROUND_COLOR},
    BatterySource, BatteryState, SystemTimeExt,
};
use watchface_graphics::session;

const SIMULATOR_SCALE: u32 = 2;

const FRAME_INTERVAL: Duration = Duration::from_millis(20);

fn main() -> Result<(), core::convert::Infallible> {
    let mut display =
        SimulatorDisplay::<PixelFormat>::with_default_color(display::SIZE, BACKGROUND_COLOR);
    let output_settings = OutputSettingsBuilder::new().scale(SIMULATOR_SCALE).build();
    let mut window = Window::new("Watchface Simulator", &output_settings);

    let mut sim_clock = SimClock::default();
    let mut sim_battery = SimBattery::default();

    let mut session =
        session::start(&mut display, &sim_clock, &sim_battery).expect("watchface startup failed");
    let mut last_minute = sim_clock.dt.time().minute();

    'running: loop {
        window.update(&display);

        sim_clock.update();
        let minute = sim_clock.dt.time().minute();
        if minute != last_minute {
            last_minute = minute;
            session
                .handle_tick(&sim_clock.dt)
                .expect("time label update failed");
        }

        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,
                SimulatorEvent::KeyDown {
                    keycode,
                    keymod: _,
                    repeat,
                } => {
                    if !repeat {
                        match keycode {
                            Keycode::B => {
                                sim_battery.percent += 10;
                                if sim_battery.percent > 100 {
                                    sim_battery.percent = 0;
                                }
                                println!("Battery {} %", sim_battery.percent);
                            }
                            Keycode::C => {
                                sim_battery.charging = !sim_battery.charging;
                                println!("Charging {}", sim_battery.charging);
                            }
                            _ => continue,
                        }
                        session
                            .handle_battery(sim_battery.battery_state())
                            .expect("battery label update failed");
                    }
                }
                _ => {}
            }
        }

        if session.needs_refresh() {
            session.refresh(&mut display)?;
        }

        thread::sleep(FRAME_INTERVAL);
    }

    session.stop(&mut display)?;
    Ok(())
}

pub struct SimClock {
    pub dt: NaiveDateTime,
}

impl Default for SimClock {
    fn default() -> Self {
        let mut sc = SimClock {
            dt: NaiveDateTime::from_timestamp(0, 0),
        };
        sc.update();
        sc
    }
}

impl SimClock {
    pub fn update(&mut self) {
        let now: DateTime<Local> = Local::now();
        self.dt = now.naive_local();
    }
}

impl SystemTimeExt for SimClock {
    fn date_time(&self) -> &NaiveDateTime {
        &self.dt
    }
}

pub struct SimBattery {
    pub charging: bool,
    pub percent: i16,
}

impl Default for SimBattery {
    fn default() -> Self {
        SimBattery {
            charging: false,
            percent: 100,
        }
    }
}

impl BatterySource for SimBattery {
    fn battery_state(&self) -> BatteryState {
        BatteryState::new(self.percent, self.charging)
    }
}

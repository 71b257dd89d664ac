#![no_main]
#![no_std]

use nrf52832_hal as hal;
use panic_rtt_target as _;

mod rtc_monotonic;
mod system_time;

include!(concat!(env!("OUT_DIR"), "/build_time.rs"));

/// Offset applied to the build-host seed. Without a companion link the
/// device has no other wall-clock source.
const TIMEZONE_OFFSET_SECONDS: i64 = 0;

#[rtic::app(device = crate::hal::pac, peripherals = true, dispatchers = [SWI0_EGU0, SWI1_EGU1, SWI2_EGU2, SWI3_EGU3])]
mod app {
    use crate::{hal, rtc_monotonic, system_time, BUILD_UTC_TIME, TIMEZONE_OFFSET_SECONDS};
    use hal::{
        clocks::Clocks,
        gpio::{self, Level},
        gpiote::Gpiote,
        pac, ppi,
        prelude::*,
        spim::{self, Spim},
        timer::Timer,
    };
    use rtc_monotonic::{Rtc1Monotonic, RtcMonotonic};
    use rtic::time::duration::{Milliseconds, Seconds};
    use rtt_target::{rprintln, rtt_init_print};
    use system_time::SystemTime;
    use watchface_common::chrono::{NaiveDateTime, Timelike};
    use watchface_common::BatterySource;
    use watchface_drivers::{
        backlight::{Backlight, Brightness},
        battery_controller::BatteryController,
        display_interface_spi::SPIInterfaceNoCS,
        lcd::{LcdCsPin, LcdDcPin, LcdResetPin},
        st7789::{Orientation, ST7789},
        watchdog::Watchdog,
    };
    use watchface_graphics::session::{self, ActiveSession};

    const SCREEN_REFRESH_INTERVAL: Milliseconds = Milliseconds(50_u32);
    const BATTERY_POLL_INTERVAL: Seconds = Seconds(5_u32);

    #[monotonic(binds = RTC1, default = true)]
    type RtcMono = Rtc1Monotonic;

    #[shared]
    struct Shared {
        #[lock_free]
        system_time: SystemTime<pac::RTC1, pac::TIMER1>,

        #[lock_free]
        display: ST7789<SPIInterfaceNoCS<Spim<pac::SPIM1>, LcdDcPin>, LcdResetPin>,

        #[lock_free]
        battery_controller: BatteryController,

        #[lock_free]
        session: ActiveSession,
    }

    #[local]
    struct Local {
        gpiote: Gpiote,
        watchdog: Watchdog,
        _backlight: Backlight,
        _delay: Timer<pac::TIMER0>,
    }

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        rtt_init_print!();
        rprintln!("Initializing");

        let hal::pac::Peripherals {
            CLOCK,
            P0,
            SPIM1,
            TIMER0,
            TIMER1,
            RTC1,
            PPI,
            GPIOTE,
            RADIO,
            SAADC,
            WDT,
            ..
        } = ctx.device;

        // Switch to the external HF oscillator and start the low-power
        // clock for the RTCs
        let _clocks = Clocks::new(CLOCK).enable_ext_hfosc().start_lfclk();
        let gpio = gpio::p0::Parts::new(P0);
        let gpiote = Gpiote::new(GPIOTE);
        let ppi_channels = ppi::Parts::new(PPI);

        let watchdog = Watchdog::new(WDT);

        let mono = RtcMonotonic::new(RTC1, TIMER1, ppi_channels.ppi3).unwrap();
        let system_time = SystemTime::new(NaiveDateTime::from_timestamp(
            BUILD_UTC_TIME + TIMEZONE_OFFSET_SECONDS,
            0,
        ));

        // The radio is unused, power it down
        RADIO.tasks_txen.write(|w| unsafe { w.bits(0) });
        RADIO.tasks_rxen.write(|w| unsafe { w.bits(0) });
        RADIO.tasks_stop.write(|w| unsafe { w.bits(1) });
        RADIO.tasks_disable.write(|w| unsafe { w.bits(1) });
        RADIO.tasks_bcstop.write(|w| unsafe { w.bits(1) });
        RADIO.events_disabled.write(|w| unsafe { w.bits(1) });
        RADIO.power.write(|w| unsafe { w.bits(0) });

        let mut delay = Timer::new(TIMER0);

        let bl0 = gpio.p0_14.into_push_pull_output(Level::High);
        let bl1 = gpio.p0_22.into_push_pull_output(Level::High);
        let bl2 = gpio.p0_23.into_push_pull_output(Level::High);
        let mut backlight = Backlight::new(bl0, bl1, bl2);
        backlight.set_brightness(Brightness::L7);

        // PowerPresence pin generates events on GPIOTE channel 0
        let mut battery_controller = BatteryController::new(
            SAADC,
            gpio.p0_12.into_floating_input(),
            gpio.p0_19.into_floating_input(),
            gpio.p0_31.into_floating_input(),
            &gpiote.channel0(),
        );
        battery_controller.update();

        let spi_clk = gpio.p0_02.into_push_pull_output(Level::Low).degrade();
        let spi_mosi = gpio.p0_03.into_push_pull_output(Level::Low).degrade();
        let spi_miso = gpio.p0_04.into_floating_input().degrade();
        let spi_pins = spim::Pins {
            sck: spi_clk,
            miso: Some(spi_miso),
            mosi: Some(spi_mosi),
        };
        let display_spi = Spim::new(SPIM1, spi_pins, spim::Frequency::M8, spim::MODE_3, 0);

        // Display control
        let mut lcd_cs: LcdCsPin = gpio.p0_25.into_push_pull_output(Level::Low);
        let lcd_dc: LcdDcPin = gpio.p0_18.into_push_pull_output(Level::Low);
        let lcd_rst: LcdResetPin = gpio.p0_26.into_push_pull_output(Level::Low);

        // Hold CS low while driving the display
        lcd_cs.set_low().unwrap();

        let di = SPIInterfaceNoCS::new(display_spi, lcd_dc);
        let mut display = ST7789::new(
            di,
            lcd_rst,
            watchface_common::display::WIDTH,
            watchface_common::display::HEIGHT,
        );
        display.init(&mut delay).unwrap();
        display.set_orientation(Orientation::Portrait).unwrap();

        // Bring the face up synchronized with the current clock and battery
        // state; the tasks spawned below are the event subscriptions
        let session = session::start(&mut display, &system_time, &battery_controller).unwrap();

        watchdog_petter::spawn().unwrap();
        update_system_time::spawn().unwrap();
        tick::spawn().unwrap();
        poll_battery::spawn().unwrap();
        draw_screen::spawn().unwrap();

        (
            Shared {
                system_time,
                display,
                battery_controller,
                session,
            },
            Local {
                gpiote,
                watchdog,
                _backlight: backlight,
                _delay: delay,
            },
            init::Monotonics(mono),
        )
    }

    #[task(binds = GPIOTE, local = [gpiote], priority = 3)]
    fn gpiote_handler(ctx: gpiote_handler::Context) {
        if ctx.local.gpiote.channel0().is_event_triggered() {
            ctx.local.gpiote.channel0().reset_events();
            battery_io_event::spawn_after(BatteryController::POWER_PRESENCE_DEBOUNCE_MS).ok();
        }
        if ctx.local.gpiote.port().is_event_triggered() {
            rprintln!("Unexpected interrupt from port event");
        }
    }

    #[task(local = [watchdog], priority = 4)]
    fn watchdog_petter(ctx: watchdog_petter::Context) {
        ctx.local.watchdog.pet();
        watchdog_petter::spawn_after(Watchdog::PET_INTERVAL).unwrap();
    }

    #[task(shared = [system_time], priority = 2)]
    fn update_system_time(ctx: update_system_time::Context) {
        ctx.shared.system_time.update_time(monotonics::now());
        update_system_time::spawn_after(Seconds(1_u32)).unwrap();
    }

    /// Per-minute tick: lets the session rewrite the time label, then
    /// re-arms itself for the next minute boundary.
    #[task(shared = [session, system_time], priority = 2)]
    fn tick(ctx: tick::Context) {
        let dt = *ctx.shared.system_time.date_time();
        if let Err(e) = ctx.shared.session.handle_tick(&dt) {
            rprintln!("tick error: {}", e);
        }

        let to_next_minute = Seconds(60_u32 - dt.time().second());
        tick::spawn_after(to_next_minute).unwrap();
    }

    /// Charger plug/unplug, debounced via GPIOTE.
    #[task(shared = [session, battery_controller], priority = 2)]
    fn battery_io_event(ctx: battery_io_event::Context) {
        if ctx.shared.battery_controller.update_charging_io() {
            let state = ctx.shared.battery_controller.battery_state();
            rprintln!("battery changed: {}", state);
            if let Err(e) = ctx.shared.session.handle_battery(state) {
                rprintln!("battery error: {}", e);
            }
        }
    }

    /// Periodic voltage sampling; the SAADC has no change interrupt.
    #[task(shared = [session, battery_controller], priority = 2)]
    fn poll_battery(ctx: poll_battery::Context) {
        let (charging_changed, voltage_changed) = ctx.shared.battery_controller.update();
        if charging_changed || voltage_changed {
            let state = ctx.shared.battery_controller.battery_state();
            if let Err(e) = ctx.shared.session.handle_battery(state) {
                rprintln!("battery error: {}", e);
            }
        }
        poll_battery::spawn_after(BATTERY_POLL_INTERVAL).unwrap();
    }

    #[task(shared = [session, display], priority = 2)]
    fn draw_screen(ctx: draw_screen::Context) {
        if ctx.shared.session.needs_refresh() {
            if let Err(e) = ctx.shared.session.refresh(ctx.shared.display) {
                rprintln!("draw error: {:?}", e);
            }
        }
        draw_screen::spawn_after(SCREEN_REFRESH_INTERVAL).unwrap();
    }
}

//! Character-device GPIO lines.
//!
//! The encoder lines (DT/CLK) and the push switch are wired with pull-ups
//! and read active-low; LEDs are plain outputs. A failed input read is
//! reported as a missing sample for that tick, never as a crash.

use anyhow::{Context, Result};
use gpio_cdev::{Chip, LineHandle, LineRequestFlags};
use log::{debug, trace};

use knobkiosk::config::KioskConfig;
use knobkiosk::dispatch::IndicatorOutput;
use knobkiosk::error::Error;
use knobkiosk::input::RawSignals;

const CONSUMER: &str = "knobkiosk";

/// The three encoder input lines.
pub struct InputLines {
    dt: LineHandle,
    clk: LineHandle,
    sw: LineHandle,
}

impl InputLines {
    pub fn open(chip: &mut Chip, config: &KioskConfig) -> Result<Self> {
        Ok(Self {
            dt: request_input(chip, config.dt_pin).context("requesting DT line")?,
            clk: request_input(chip, config.clk_pin).context("requesting CLK line")?,
            sw: request_input(chip, config.sw_pin).context("requesting SW line")?,
        })
    }

    /// Non-blocking snapshot of all three lines. A failed read surfaces as
    /// [`Error::HardwareRead`]; the tick treats that as "no change".
    pub fn sample(&self) -> Result<RawSignals, Error> {
        let read = |line: &LineHandle, name: &str| {
            line.get_value().map_err(|e| {
                debug!("GPIO read failed on {name}: {e}");
                Error::HardwareRead
            })
        };

        // Pull-up wiring: line low means asserted / pressed.
        Ok(RawSignals {
            clk: read(&self.clk, "CLK")? == 0,
            dt: read(&self.dt, "DT")? == 0,
            switch_pressed: read(&self.sw, "SW")? == 0,
        })
    }
}

fn request_input(chip: &mut Chip, pin: u32) -> Result<LineHandle> {
    let line = chip
        .get_line(pin)
        .with_context(|| format!("looking up GPIO line {pin}"))?;
    line.request(LineRequestFlags::INPUT, 0, CONSUMER)
        .with_context(|| format!("requesting GPIO line {pin} as input"))
}

/// The LED bank, one output line per category.
pub struct Leds {
    handles: Vec<LineHandle>,
}

impl Leds {
    pub fn open(chip: &mut Chip, config: &KioskConfig) -> Result<Self> {
        let mut handles = Vec::with_capacity(config.led_pins.len());
        for &pin in config.led_pins.iter() {
            let line = chip
                .get_line(pin)
                .with_context(|| format!("looking up LED line {pin}"))?;
            let handle = line
                .request(LineRequestFlags::OUTPUT, 0, CONSUMER)
                .with_context(|| format!("requesting LED line {pin} as output"))?;
            handles.push(handle);
        }
        Ok(Self { handles })
    }
}

impl IndicatorOutput for Leds {
    fn set(&mut self, states: &[bool]) {
        for (handle, &on) in self.handles.iter().zip(states) {
            if let Err(e) = handle.set_value(u8::from(on)) {
                trace!("LED write failed: {e}");
            }
        }
    }
}

//! knobkiosk - Raspberry Pi kiosk binary.
//!
//! Wires the pure selection core to the hardware collaborators: cdev GPIO
//! for the encoder and LEDs, evdev for the touchscreen, the Linux
//! framebuffer for rendering. One poll loop, one short sleep per tick.
//!
//! Build: `cargo build --release --features hardware`

mod hw;

use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use gpio_cdev::Chip;
use log::{info, warn};

use knobkiosk::config::TICK_INTERVAL_MS;
use knobkiosk::kiosk::Kiosk;

use hw::touch::{TouchInput, MAX_TOUCH_EVENTS_PER_TICK};

const CONFIG_PATH: &str = "gpio_config.json";
const GPIO_CHIP: &str = "/dev/gpiochip0";
const FRAMEBUFFER: &str = "/dev/fb0";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let file = hw::config_file::load(Path::new(CONFIG_PATH))?;
    let config = file.kiosk;
    if config.steps_per_section_is_clamped() {
        warn!(
            "degrees_per_section = {} is below one encoder pulse; clamping to 1 sub-step per category",
            config.degrees_per_section
        );
    }

    let mut chip = Chip::new(GPIO_CHIP).with_context(|| format!("opening {GPIO_CHIP}"))?;
    let inputs = hw::gpio::InputLines::open(&mut chip, &config)?;
    let mut leds = hw::gpio::Leds::open(&mut chip, &config)?;

    let mut renderer =
        hw::render::FbRenderer::new(FRAMEBUFFER, &file.screens_directory, &config.led_pins)?;
    let mut touch = TouchInput::open_first();

    // Seed the edge detector from the first raw read. If even that fails,
    // assume the pulled-up resting level.
    let initial_clk = inputs.sample().map_or(true, |raw| raw.clk);
    let mut kiosk = Kiosk::new(&config, renderer.screen_width() as f32, initial_clk, 0);

    // Start the clock past the idle timeout so the kiosk boots into the
    // idle screen with all LEDs on, exactly until the first interaction.
    let clock_offset = config.idle_timeout_ms + 1;
    let start = Instant::now();

    info!(
        "kiosk up: {} categories, {} sub-steps per section, idle after {} ms",
        config.category_count(),
        config.steps_per_section(),
        config.idle_timeout_ms
    );

    let mut events: heapless::Vec<_, MAX_TOUCH_EVENTS_PER_TICK> = heapless::Vec::new();
    loop {
        let now_ms = clock_offset + start.elapsed().as_millis() as u64;

        let raw = inputs.sample().ok();
        events.clear();
        if let Some(touch) = touch.as_mut() {
            touch.poll(&mut events);
        }

        kiosk.tick(raw, &events, now_ms, &mut renderer, &mut leds);
        renderer.step();

        thread::sleep(Duration::from_millis(TICK_INTERVAL_MS));
    }
}

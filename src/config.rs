//! Tuning constants and the validated configuration model.
//!
//! All timing parameters, thresholds and hardware properties live here so
//! they can be tuned in one place. The hardware binary fills `KioskConfig`
//! from `gpio_config.json`; tests build it directly.

use crate::error::ConfigError;
use heapless::Vec;

// Rotary encoder

/// Electrical pulses the encoder emits per full 360° rotation.
/// Property of the KY-040 class encoders this was built for, not configurable.
pub const PULSES_PER_360: u32 = 20;

/// Default knob angle covered by one category step (degrees).
pub const DEGREES_PER_SECTION: u32 = 30;

// Interaction

/// Default inactivity timeout before the idle fallback is shown (seconds).
pub const IDLE_TIMEOUT_SECS: u64 = 5;

/// Default minimum horizontal displacement for a touch gesture to count as
/// a swipe (pixels, after scaling normalized coordinates to the screen).
pub const SWIPE_THRESHOLD_PX: f32 = 50.0;

/// Poll loop sleep between ticks (milliseconds).
pub const TICK_INTERVAL_MS: u64 = 1;

// Rendering

/// Alpha added per crossfade step (0-255 scale).
pub const CROSSFADE_ALPHA_STEP: u8 = 35;

/// Upper bound on crossfade steps per second.
pub const CROSSFADE_FPS: u32 = 60;

// Categories / LEDs

/// Upper bound on the number of categories (one LED output each).
pub const MAX_CATEGORIES: usize = 16;

/// Validated runtime configuration, read once at startup.
#[derive(Clone, Debug, PartialEq)]
pub struct KioskConfig {
    /// Output pins, one per category; order defines category indices and
    /// the on-disk folder names under the screens directory.
    pub led_pins: Vec<u32, MAX_CATEGORIES>,
    /// Encoder DT input pin.
    pub dt_pin: u32,
    /// Encoder CLK input pin.
    pub clk_pin: u32,
    /// Encoder push-switch input pin.
    pub sw_pin: u32,
    /// Knob angle per category step (degrees).
    pub degrees_per_section: u32,
    /// Inactivity timeout before the idle fallback (milliseconds).
    pub idle_timeout_ms: u64,
    /// Swipe displacement threshold (pixels).
    pub swipe_threshold_px: f32,
}

impl KioskConfig {
    /// Number of selectable categories. Equals the LED count.
    pub fn category_count(&self) -> usize {
        self.led_pins.len()
    }

    /// Encoder sub-steps that make up one category step:
    /// `round(PULSES_PER_360 / 360 * degrees_per_section)`, never below 1.
    pub fn steps_per_section(&self) -> i32 {
        (self.raw_steps_per_section() as i32).max(1)
    }

    /// True when the configured angle is so small the step count had to be
    /// clamped up to 1. The driver warns about this at startup.
    pub fn steps_per_section_is_clamped(&self) -> bool {
        self.raw_steps_per_section() < 1
    }

    fn raw_steps_per_section(&self) -> u32 {
        // integer rounding of PULSES_PER_360 * degrees / 360
        (PULSES_PER_360 * self.degrees_per_section + 180) / 360
    }

    /// Reject configurations the selection core cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.led_pins.is_empty() {
            return Err(ConfigError::NoCategories);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(degrees: u32) -> KioskConfig {
        KioskConfig {
            led_pins: Vec::from_slice(&[17, 27, 22]).unwrap(),
            dt_pin: 5,
            clk_pin: 6,
            sw_pin: 13,
            degrees_per_section: degrees,
            idle_timeout_ms: IDLE_TIMEOUT_SECS * 1000,
            swipe_threshold_px: SWIPE_THRESHOLD_PX,
        }
    }

    #[test]
    fn steps_per_section_default_angle() {
        // 20 pulses / 360° * 30° = 1.67, rounds to 2
        assert_eq!(config(DEGREES_PER_SECTION).steps_per_section(), 2);
    }

    #[test]
    fn steps_per_section_rounds_to_nearest() {
        assert_eq!(config(18).steps_per_section(), 1); // 1.0
        assert_eq!(config(45).steps_per_section(), 3); // 2.5 rounds up
        assert_eq!(config(90).steps_per_section(), 5); // 5.0
    }

    #[test]
    fn steps_per_section_clamped_to_one() {
        let tiny = config(1); // 0.056 pulses, would truncate to 0
        assert_eq!(tiny.steps_per_section(), 1);
        assert!(tiny.steps_per_section_is_clamped());
        assert!(!config(DEGREES_PER_SECTION).steps_per_section_is_clamped());
    }

    #[test]
    fn validate_rejects_empty_led_list() {
        let mut bad = config(DEGREES_PER_SECTION);
        bad.led_pins.clear();
        assert_eq!(bad.validate(), Err(ConfigError::NoCategories));
        assert!(config(DEGREES_PER_SECTION).validate().is_ok());
    }
}

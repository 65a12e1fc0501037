//! Configuration document loading.
//!
//! `gpio_config.json` is read once at startup. Required keys: `leds` (the
//! ordered LED pin list, one per category), `dt`, `clk`, `sw`. Everything
//! else has defaults. A missing or malformed document is fatal.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use knobkiosk::config::{
    KioskConfig, DEGREES_PER_SECTION, IDLE_TIMEOUT_SECS, MAX_CATEGORIES, SWIPE_THRESHOLD_PX,
};
use knobkiosk::error::ConfigError;

/// Raw on-disk document. Field names match the JSON keys; required keys are
/// checked explicitly in [`convert`] so the error names the missing key.
#[derive(Debug, Deserialize)]
struct Document {
    leds: Option<Vec<u32>>,
    dt: Option<u32>,
    clk: Option<u32>,
    sw: Option<u32>,
    #[serde(default = "default_screens_directory")]
    screens_directory: PathBuf,
    #[serde(default = "default_idle_timeout_secs")]
    idle_timeout_secs: u64,
    #[serde(default = "default_degrees_per_section")]
    degrees_per_section: u32,
    #[serde(default = "default_swipe_threshold_px")]
    swipe_threshold_px: f32,
}

fn default_screens_directory() -> PathBuf {
    PathBuf::from("screens")
}

fn default_idle_timeout_secs() -> u64 {
    IDLE_TIMEOUT_SECS
}

fn default_degrees_per_section() -> u32 {
    DEGREES_PER_SECTION
}

fn default_swipe_threshold_px() -> f32 {
    SWIPE_THRESHOLD_PX
}

/// Validated configuration plus the hardware-only extras.
#[derive(Debug)]
pub struct FileConfig {
    pub kiosk: KioskConfig,
    pub screens_directory: PathBuf,
}

/// Load and validate the configuration document.
pub fn load(path: &Path) -> Result<FileConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading configuration document {}", path.display()))?;
    let document: Document = serde_json::from_str(&text)
        .with_context(|| format!("parsing configuration document {}", path.display()))?;
    convert(document)
}

fn require<T>(value: Option<T>, key: &'static str) -> Result<T> {
    value.ok_or_else(|| anyhow::Error::msg(ConfigError::MissingKey(key).to_string()))
}

fn convert(document: Document) -> Result<FileConfig> {
    let leds = require(document.leds, "leds")?;
    let led_pins = heapless::Vec::from_slice(&leds)
        .map_err(|_| anyhow::Error::msg(ConfigError::TooManyCategories.to_string()))
        .with_context(|| format!("`leds` supports at most {MAX_CATEGORIES} pins"))?;

    let kiosk = KioskConfig {
        led_pins,
        dt_pin: require(document.dt, "dt")?,
        clk_pin: require(document.clk, "clk")?,
        sw_pin: require(document.sw, "sw")?,
        degrees_per_section: document.degrees_per_section,
        idle_timeout_ms: document.idle_timeout_secs * 1000,
        swipe_threshold_px: document.swipe_threshold_px,
    };
    kiosk
        .validate()
        .map_err(|e| anyhow::Error::msg(e.to_string()))?;

    Ok(FileConfig {
        kiosk,
        screens_directory: document.screens_directory,
    })
}

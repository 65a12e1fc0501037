//! Raspberry Pi hardware collaborators (compiled with `--features hardware`).
//!
//! ## Components
//!
//! - **config_file**: `gpio_config.json` into the validated `KioskConfig`
//! - **gpio**: character-device GPIO lines (encoder inputs, LED outputs)
//! - **touch**: evdev touchscreen, normalized down/up events
//! - **render**: framebuffer renderer with stepped crossfade
//!
//! Everything here follows the same rule: startup failures are fatal,
//! steady-state failures are logged and become no-ops for that tick.

pub mod config_file;
pub mod gpio;
pub mod render;
pub mod touch;

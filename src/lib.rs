//! Input and selection core for knobkiosk.
//!
//! A rotary encoder (categories) and capacitive touch swipes (images within
//! a category) drive a fullscreen slideshow with a bank of indicator LEDs.
//! This library holds everything that can be reasoned about without
//! hardware: quadrature decoding, swipe recognition, the selection state
//! machine, idle timing, LED vector computation and render request dispatch.
//!
//! GPIO sampling, the touch device, image decoding and the poll loop live in
//! the `hardware`-gated binary (`src/main.rs` + `src/hw/`).
//!
//! Host tests: `cargo test`
//! Kiosk build: `cargo build --release --features hardware`

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod dispatch;
pub mod error;
pub mod idle;
pub mod indicator;
pub mod input;
pub mod kiosk;
pub mod selection;

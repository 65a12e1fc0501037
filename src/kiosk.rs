//! The per-tick pipeline.
//!
//! One tick feeds a raw GPIO sample and the tick's touch events through the
//! decoders, folds resulting pulses into the selection, checks the idle
//! timer, recomputes the LED vector and dispatches render requests - in that
//! fixed order. The encoder runs before the swipes so a same-tick swipe can
//! never undo the image reset of a category change.
//!
//! Single-threaded and non-blocking by construction: all inputs arrive as
//! snapshots, all outputs leave through fire-and-forget collaborator traits,
//! and the driver owns the one sleep between ticks.

use heapless::Vec;

use crate::config::KioskConfig;
use crate::dispatch::{render_request, IndicatorOutput, RenderRequest, Renderer};
use crate::idle::IdleWatchdog;
use crate::indicator::indicator_vector;
use crate::input::encoder::QuadratureDecoder;
use crate::input::swipe::SwipeRecognizer;
use crate::input::{InputSource, RawSignals, TouchEvent};
use crate::selection::{SelectionChange, SelectionController};

/// Most selection changes a single tick can produce. One physical gesture
/// per tick is the expected case; the headroom covers event bursts.
pub const MAX_CHANGES_PER_TICK: usize = 8;

/// What one tick did. Returned for the driver and for tests.
#[derive(Debug)]
pub struct TickReport {
    /// Accepted selection changes, in application order.
    pub changes: Vec<SelectionChange, MAX_CHANGES_PER_TICK>,
    /// Idle state after this tick.
    pub idle: bool,
}

/// Owns the decoders and selection state; drives the collaborators.
pub struct Kiosk {
    decoder: QuadratureDecoder,
    swipe: SwipeRecognizer,
    selection: SelectionController,
    watchdog: IdleWatchdog,
}

impl Kiosk {
    /// `initial_clk` comes from the first raw read; `start_ms` seeds the
    /// interaction timestamp.
    pub fn new(config: &KioskConfig, screen_width_px: f32, initial_clk: bool, start_ms: u64) -> Self {
        Self {
            decoder: QuadratureDecoder::new(initial_clk, config.steps_per_section()),
            swipe: SwipeRecognizer::new(screen_width_px, config.swipe_threshold_px),
            selection: SelectionController::new(config.category_count(), start_ms),
            watchdog: IdleWatchdog::new(config.idle_timeout_ms),
        }
    }

    /// Run one tick.
    ///
    /// `raw` is `None` when the hardware sample failed this tick; the
    /// encoder simply sees no edge and the loop keeps running.
    pub fn tick<R: Renderer, L: IndicatorOutput>(
        &mut self,
        raw: Option<RawSignals>,
        touch: &[TouchEvent],
        now_ms: u64,
        renderer: &mut R,
        indicators: &mut L,
    ) -> TickReport {
        let mut changes: Vec<SelectionChange, MAX_CHANGES_PER_TICK> = Vec::new();

        // Encoder first: category change must win over a same-tick swipe.
        if let Some(raw) = raw {
            let pulse = self.decoder.step(raw);
            if let Some(change) = self.selection.apply(pulse, InputSource::Encoder, now_ms) {
                let _ = changes.push(change);
            }
        }

        for event in touch {
            match *event {
                TouchEvent::Down { x, y } => self.swipe.on_touch_down(x, y),
                TouchEvent::Up { x, y } => {
                    let pulse = self.swipe.on_touch_up(x, y);
                    if let Some(change) = self.selection.apply(pulse, InputSource::Swipe, now_ms) {
                        let _ = changes.push(change);
                    }
                }
            }
        }

        let idle = self
            .watchdog
            .check(self.selection.last_interaction_ms(), now_ms);

        let vector = indicator_vector(
            self.selection.category_index(),
            self.selection.category_count(),
            idle,
        );
        indicators.set(vector.as_slice());

        if idle {
            // Re-issued every tick while idle; the renderer dedupes.
            renderer.show(RenderRequest::ShowIdle);
        } else {
            for &change in changes.iter() {
                renderer.show(render_request(change));
            }
        }

        TickReport { changes, idle }
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEGREES_PER_SECTION, SWIPE_THRESHOLD_PX};

    struct NullRenderer;
    impl Renderer for NullRenderer {
        fn show(&mut self, _request: RenderRequest) {}
    }

    struct NullLeds;
    impl IndicatorOutput for NullLeds {
        fn set(&mut self, _states: &[bool]) {}
    }

    fn config() -> KioskConfig {
        KioskConfig {
            led_pins: heapless::Vec::from_slice(&[17, 27, 22]).unwrap(),
            dt_pin: 5,
            clk_pin: 6,
            sw_pin: 13,
            degrees_per_section: DEGREES_PER_SECTION,
            idle_timeout_ms: 5_000,
            swipe_threshold_px: SWIPE_THRESHOLD_PX,
        }
    }

    fn raw(clk: bool, dt: bool) -> Option<RawSignals> {
        Some(RawSignals {
            clk,
            dt,
            switch_pressed: false,
        })
    }

    #[test]
    fn failed_sample_is_no_change() {
        let mut kiosk = Kiosk::new(&config(), 800.0, true, 0);
        let report = kiosk.tick(None, &[], 1, &mut NullRenderer, &mut NullLeds);
        assert!(report.changes.is_empty());
        assert!(!report.idle);
    }

    #[test]
    fn encoder_category_change_wins_over_same_tick_swipe() {
        let mut kiosk = Kiosk::new(&config(), 800.0, true, 0);

        // First detent edge: sub-step only.
        kiosk.tick(raw(false, true), &[], 1, &mut NullRenderer, &mut NullLeds);
        kiosk.tick(raw(true, true), &[], 2, &mut NullRenderer, &mut NullLeds);

        // Second falling edge and a complete swipe in the same tick.
        let touch = [
            TouchEvent::Down { x: 0.1, y: 0.5 },
            TouchEvent::Up { x: 0.9, y: 0.5 },
        ];
        let report = kiosk.tick(raw(false, true), &touch, 3, &mut NullRenderer, &mut NullLeds);

        assert_eq!(
            report.changes.as_slice(),
            &[
                SelectionChange::Category { index: 1 },
                SelectionChange::Image {
                    category: 1,
                    index: 1
                },
            ]
        );
        // The category reset happened before the swipe was applied.
        assert_eq!(kiosk.selection().image_index(), 1);
    }

    #[test]
    fn pulse_resets_idle_timer() {
        let mut kiosk = Kiosk::new(&config(), 800.0, true, 0);

        let report = kiosk.tick(raw(true, true), &[], 6_000, &mut NullRenderer, &mut NullLeds);
        assert!(report.idle);

        // A swipe during the idle tick window wakes the kiosk up.
        let touch = [
            TouchEvent::Down { x: 0.1, y: 0.5 },
            TouchEvent::Up { x: 0.9, y: 0.5 },
        ];
        let report = kiosk.tick(raw(true, true), &touch, 6_001, &mut NullRenderer, &mut NullLeds);
        assert!(!report.idle);
    }
}

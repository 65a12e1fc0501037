//! Touch swipe recognition.
//!
//! A touch-down stores a pending start position; the matching touch-up
//! scales the horizontal displacement to pixel space and emits a pulse when
//! it exceeds the threshold. Vertical displacement is ignored entirely.

use crate::input::Pulse;

/// Turns touch-down/touch-up pairs into direction pulses.
#[derive(Debug)]
pub struct SwipeRecognizer {
    /// Pending touch-down position, normalized. At most one in flight; a
    /// second touch-down overwrites rather than queues.
    pending: Option<(f32, f32)>,
    screen_width_px: f32,
    threshold_px: f32,
}

impl SwipeRecognizer {
    pub fn new(screen_width_px: f32, threshold_px: f32) -> Self {
        Self {
            pending: None,
            screen_width_px,
            threshold_px,
        }
    }

    /// Record a touch-down. Overwrites any prior pending start.
    pub fn on_touch_down(&mut self, x: f32, y: f32) {
        self.pending = Some((x, y));
    }

    /// Evaluate a touch-up against the pending start. The pending start is
    /// consumed whether or not the gesture qualifies as a swipe.
    pub fn on_touch_up(&mut self, x: f32, _y: f32) -> Option<Pulse> {
        let (start_x, _start_y) = self.pending.take()?;

        let dx = (x - start_x) * self.screen_width_px;
        if dx > self.threshold_px {
            Some(Pulse::Increment)
        } else if dx < -self.threshold_px {
            Some(Pulse::Decrement)
        } else {
            None
        }
    }
}

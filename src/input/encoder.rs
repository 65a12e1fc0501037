//! Quadrature rotary encoder decoding.
//!
//! Raw encoders emit several electrical pulses per mechanical detent. The
//! decoder reacts only to falling edges on CLK, integrates signed sub-steps
//! from the DT phase, and emits one clean pulse each time the accumulated
//! angle crosses the configured threshold. The integration itself is the
//! debounce: a few spurious sub-steps in either direction cancel out long
//! before they reach the threshold.

use crate::input::{Pulse, RawSignals};

/// Stateful decoder for the two-line (CLK/DT) encoder signal.
#[derive(Debug)]
pub struct QuadratureDecoder {
    previous_clk: bool,
    substeps: i32,
    steps_per_section: i32,
}

impl QuadratureDecoder {
    /// `initial_clk` seeds the edge detector from the first raw read so the
    /// startup level is not mistaken for an edge. `steps_per_section` below
    /// 1 is clamped to 1.
    pub fn new(initial_clk: bool, steps_per_section: i32) -> Self {
        Self {
            previous_clk: initial_clk,
            substeps: 0,
            steps_per_section: steps_per_section.max(1),
        }
    }

    /// Feed one raw sample. Returns a pulse when the accumulated sub-steps
    /// cross the section threshold, `None` otherwise.
    pub fn step(&mut self, raw: RawSignals) -> Option<Pulse> {
        let mut pulse = None;

        // Falling edge on CLK is the only reactive moment.
        if self.previous_clk && !raw.clk {
            self.substeps += if raw.dt { 1 } else { -1 };

            if self.substeps.abs() >= self.steps_per_section {
                pulse = Some(if self.substeps > 0 {
                    Pulse::Increment
                } else {
                    Pulse::Decrement
                });
                self.substeps = 0;
            }
        }

        // Latch the level regardless of which branch was taken.
        self.previous_clk = raw.clk;
        pulse
    }

    #[cfg(test)]
    fn substeps(&self) -> i32 {
        self.substeps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(clk: bool, dt: bool) -> RawSignals {
        RawSignals {
            clk,
            dt,
            switch_pressed: false,
        }
    }

    /// Drive one full falling edge (CLK high, then low) with the given DT.
    fn edge(decoder: &mut QuadratureDecoder, dt: bool) -> Option<Pulse> {
        assert_eq!(decoder.step(raw(true, dt)), None);
        decoder.step(raw(false, dt))
    }

    #[test]
    fn emits_one_increment_per_section() {
        let mut decoder = QuadratureDecoder::new(true, 2);

        assert_eq!(edge(&mut decoder, true), None);
        assert_eq!(edge(&mut decoder, true), Some(Pulse::Increment));
        assert_eq!(decoder.substeps(), 0);

        // Next section starts from scratch.
        assert_eq!(edge(&mut decoder, true), None);
        assert_eq!(edge(&mut decoder, true), Some(Pulse::Increment));
    }

    #[test]
    fn emits_decrement_for_opposite_phase() {
        let mut decoder = QuadratureDecoder::new(true, 2);

        assert_eq!(edge(&mut decoder, false), None);
        assert_eq!(edge(&mut decoder, false), Some(Pulse::Decrement));
    }

    #[test]
    fn substeps_stay_bounded() {
        let mut decoder = QuadratureDecoder::new(true, 3);

        for _ in 0..30 {
            let _ = decoder.step(raw(true, true));
            let _ = decoder.step(raw(false, true));
            assert!(decoder.substeps().abs() < 3);
        }
    }

    #[test]
    fn opposite_substeps_cancel() {
        let mut decoder = QuadratureDecoder::new(true, 2);

        assert_eq!(edge(&mut decoder, true), None); // +1
        assert_eq!(edge(&mut decoder, false), None); // back to 0
        assert_eq!(edge(&mut decoder, true), None); // +1
        assert_eq!(edge(&mut decoder, true), Some(Pulse::Increment));
    }

    #[test]
    fn level_without_edge_is_a_no_op() {
        let mut decoder = QuadratureDecoder::new(false, 1);

        // CLK held low: no edges, no pulses, regardless of DT.
        assert_eq!(decoder.step(raw(false, true)), None);
        assert_eq!(decoder.step(raw(false, false)), None);
        // Rising edge alone is also inert.
        assert_eq!(decoder.step(raw(true, true)), None);
        assert_eq!(decoder.substeps(), 0);
    }

    #[test]
    fn startup_level_is_not_an_edge() {
        // Seeded with CLK low and first sample low: nothing to detect.
        let mut decoder = QuadratureDecoder::new(false, 1);
        assert_eq!(decoder.step(raw(false, true)), None);
    }

    #[test]
    fn threshold_below_one_is_clamped() {
        let mut decoder = QuadratureDecoder::new(true, 0);
        // With a clamped threshold of 1 every falling edge is a pulse.
        assert_eq!(edge(&mut decoder, true), Some(Pulse::Increment));

        let mut negative = QuadratureDecoder::new(true, -5);
        assert_eq!(edge(&mut negative, false), Some(Pulse::Decrement));
    }
}

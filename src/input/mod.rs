//! Input interpretation - raw signal types and the two gesture decoders.
//!
//! ## Components
//!
//! - **encoder**: quadrature decoding of the rotary knob (CLK/DT lines)
//! - **swipe**: touch-down/touch-up pairs into horizontal swipe pulses
//!
//! Both decoders emit at most one [`Pulse`] per tick; the selection layer
//! folds those pulses into the category/image indices.

pub mod encoder;
pub mod swipe;

/// One snapshot of the three input lines, sampled once per tick.
///
/// Lines are wired with pull-ups and read active-low; the hardware layer
/// already converts them, so `true` means "asserted" here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSignals {
    /// Encoder CLK line.
    pub clk: bool,
    /// Encoder DT line.
    pub dt: bool,
    /// Encoder push switch. Sampled for completeness; currently unbound.
    pub switch_pressed: bool,
}

/// One discrete selection step. Produced at most once per tick per source,
/// never persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pulse {
    Increment,
    Decrement,
}

impl Pulse {
    /// Signed index delta this pulse applies.
    pub fn delta(self) -> i32 {
        match self {
            Pulse::Increment => 1,
            Pulse::Decrement => -1,
        }
    }
}

/// Which physical gesture produced a pulse. The knob navigates categories
/// (coarse), swipes navigate images within a category (fine).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputSource {
    Encoder,
    Swipe,
}

/// Touch event from the pointer collaborator, coordinates normalized to
/// `[0, 1]` in both axes.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchEvent {
    Down { x: f32, y: f32 },
    Up { x: f32, y: f32 },
}

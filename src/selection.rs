//! Selection state machine.
//!
//! Owns the current category index, the image offset within the category and
//! the last-interaction timestamp. Pulses from the encoder advance the
//! category (wrapping, resetting the image offset); pulses from swipes move
//! the image offset. The offset is deliberately unbounded and signed - only
//! the renderer knows the live image count of a category, so wrapping into
//! that count happens at render time.

use crate::input::{InputSource, Pulse};

/// State change produced by an accepted pulse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SelectionChange {
    /// The knob moved to another category. The image offset was reset.
    Category { index: usize },
    /// A swipe moved within the current category.
    Image { category: usize, index: i32 },
}

/// Current selection plus interaction timing.
#[derive(Debug)]
pub struct SelectionController {
    category_index: usize,
    image_index: i32,
    last_interaction_ms: u64,
    category_count: usize,
}

impl SelectionController {
    pub fn new(category_count: usize, start_ms: u64) -> Self {
        Self {
            category_index: 0,
            image_index: 0,
            last_interaction_ms: start_ms,
            category_count: category_count.max(1),
        }
    }

    /// Fold one pulse into the selection. Returns the resulting change, or
    /// `None` when there was no pulse. Any accepted pulse refreshes the
    /// interaction timestamp.
    pub fn apply(
        &mut self,
        pulse: Option<Pulse>,
        source: InputSource,
        now_ms: u64,
    ) -> Option<SelectionChange> {
        let pulse = pulse?;

        // Timestamp stays monotonically non-decreasing even if the caller's
        // clock briefly does not.
        self.last_interaction_ms = self.last_interaction_ms.max(now_ms);

        match source {
            InputSource::Encoder => {
                let count = self.category_count as i32;
                self.category_index =
                    (self.category_index as i32 + pulse.delta()).rem_euclid(count) as usize;
                self.image_index = 0;
                Some(SelectionChange::Category {
                    index: self.category_index,
                })
            }
            InputSource::Swipe => {
                self.image_index += pulse.delta();
                Some(SelectionChange::Image {
                    category: self.category_index,
                    index: self.image_index,
                })
            }
        }
    }

    pub fn category_index(&self) -> usize {
        self.category_index
    }

    pub fn category_count(&self) -> usize {
        self.category_count
    }

    pub fn image_index(&self) -> i32 {
        self.image_index
    }

    /// Timestamp of the last accepted pulse (milliseconds).
    pub fn last_interaction_ms(&self) -> u64 {
        self.last_interaction_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INC: Option<Pulse> = Some(Pulse::Increment);
    const DEC: Option<Pulse> = Some(Pulse::Decrement);

    #[test]
    fn encoder_pulse_advances_category() {
        let mut sel = SelectionController::new(3, 0);
        assert_eq!(
            sel.apply(INC, InputSource::Encoder, 10),
            Some(SelectionChange::Category { index: 1 })
        );
        assert_eq!(sel.category_index(), 1);
        assert_eq!(sel.last_interaction_ms(), 10);
    }

    #[test]
    fn category_wraps_in_both_directions() {
        let mut sel = SelectionController::new(3, 0);

        assert_eq!(
            sel.apply(DEC, InputSource::Encoder, 1),
            Some(SelectionChange::Category { index: 2 })
        );

        // A full lap returns to where it started.
        for _ in 0..3 {
            sel.apply(INC, InputSource::Encoder, 2);
        }
        assert_eq!(sel.category_index(), 2);
    }

    #[test]
    fn category_change_resets_image_index() {
        let mut sel = SelectionController::new(3, 0);
        sel.apply(INC, InputSource::Swipe, 1);
        sel.apply(INC, InputSource::Swipe, 2);
        assert_eq!(sel.image_index(), 2);

        sel.apply(INC, InputSource::Encoder, 3);
        assert_eq!(sel.image_index(), 0);
    }

    #[test]
    fn swipe_pulse_moves_image_only() {
        let mut sel = SelectionController::new(3, 0);
        assert_eq!(
            sel.apply(INC, InputSource::Swipe, 5),
            Some(SelectionChange::Image {
                category: 0,
                index: 1
            })
        );
        assert_eq!(sel.category_index(), 0);
    }

    #[test]
    fn image_index_may_go_negative() {
        let mut sel = SelectionController::new(2, 0);
        sel.apply(DEC, InputSource::Swipe, 1);
        sel.apply(DEC, InputSource::Swipe, 2);
        assert_eq!(sel.image_index(), -2);
    }

    #[test]
    fn no_pulse_changes_nothing() {
        let mut sel = SelectionController::new(3, 7);
        assert_eq!(sel.apply(None, InputSource::Encoder, 99), None);
        assert_eq!(sel.apply(None, InputSource::Swipe, 99), None);
        assert_eq!(sel.category_index(), 0);
        assert_eq!(sel.last_interaction_ms(), 7);
    }

    #[test]
    fn timestamp_never_goes_backwards() {
        let mut sel = SelectionController::new(3, 100);
        sel.apply(INC, InputSource::Encoder, 50);
        assert_eq!(sel.last_interaction_ms(), 100);
        sel.apply(INC, InputSource::Encoder, 150);
        assert_eq!(sel.last_interaction_ms(), 150);
    }

    #[test]
    fn single_category_still_wraps() {
        let mut sel = SelectionController::new(1, 0);
        assert_eq!(
            sel.apply(INC, InputSource::Encoder, 1),
            Some(SelectionChange::Category { index: 0 })
        );
    }
}

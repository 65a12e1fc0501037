//! Render request dispatch and the collaborator seams.
//!
//! The core never touches pixels or pins. It talks to two collaborators
//! through small traits: a fullscreen [`Renderer`] that receives logical
//! requests and an [`IndicatorOutput`] driving the LED bank. Both are
//! fire-and-forget - failures stay inside the collaborator (logged there),
//! so the tick loop can never stall on I/O.

use crate::selection::SelectionChange;

/// Logical request sent to the renderer collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderRequest {
    /// Show an image from `category`. `index` is an unbounded signed offset;
    /// the renderer wraps it into the category's live image count. An empty
    /// category renders nothing (logged no-op, never a panic).
    ShowImage { category: usize, index: i32 },
    /// Show the idle fallback image.
    ShowIdle,
}

/// Fullscreen renderer collaborator. Decoding, aspect-fit scaling, centering
/// and the crossfade transition happen behind this seam; transitions must be
/// advanced in bounded steps so input sampling is never blocked for more
/// than one frame interval.
pub trait Renderer {
    fn show(&mut self, request: RenderRequest);
}

/// LED bank collaborator: one boolean per category, in order.
pub trait IndicatorOutput {
    fn set(&mut self, states: &[bool]);
}

/// Map a selection change to its render request.
pub fn render_request(change: SelectionChange) -> RenderRequest {
    match change {
        SelectionChange::Category { index } => RenderRequest::ShowImage {
            category: index,
            index: 0,
        },
        SelectionChange::Image { category, index } => RenderRequest::ShowImage { category, index },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_change_requests_first_image() {
        assert_eq!(
            render_request(SelectionChange::Category { index: 2 }),
            RenderRequest::ShowImage {
                category: 2,
                index: 0
            }
        );
    }

    #[test]
    fn image_change_keeps_offset() {
        assert_eq!(
            render_request(SelectionChange::Image {
                category: 1,
                index: -4
            }),
            RenderRequest::ShowImage {
                category: 1,
                index: -4
            }
        );
    }
}

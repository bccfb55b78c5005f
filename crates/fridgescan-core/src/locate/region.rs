//! Candidate region geometry.

/// An axis-aligned candidate rectangle in frame coordinates, produced by the
/// locator and consumed once by the ROI decode pass.
///
/// Padding is applied at construction and the edges are clamped to the frame
/// bounds, so a `Region` never extends outside the image it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Region {
    /// Build a region from a bounding rectangle, padded by `padding` on every
    /// side and clamped to the `frame_width` x `frame_height` bounds.
    ///
    /// The padding preserves the symbol's quiet-zone margins, which most
    /// decoders require for reliable reads.
    pub fn from_rect_padded(
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        padding: u32,
        frame_width: u32,
        frame_height: u32,
    ) -> Self {
        Self {
            left: x.saturating_sub(padding).min(frame_width),
            top: y.saturating_sub(padding).min(frame_height),
            right: (x.saturating_add(width).saturating_add(padding)).min(frame_width),
            bottom: (y.saturating_add(height).saturating_add(padding)).min(frame_height),
        }
    }

    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }
}

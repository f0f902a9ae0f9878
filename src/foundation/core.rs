use crate::foundation::error::{AdLayoutError, AdLayoutResult, TEMPLATE_SCOPE};

use kurbo::Rect;

/// Canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas with non-zero dimensions.
    pub fn new(width: u32, height: u32) -> AdLayoutResult<Self> {
        let canvas = Self { width, height };
        canvas.validate()?;
        Ok(canvas)
    }

    /// Reject zero-sized canvases.
    pub fn validate(self) -> AdLayoutResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(AdLayoutError::invalid_geometry(
                TEMPLATE_SCOPE,
                format!("canvas must be non-empty, got {}x{}", self.width, self.height),
            ));
        }
        Ok(())
    }

    /// Longest side in pixels.
    pub fn max_side(self) -> u32 {
        self.width.max(self.height)
    }

    /// Width divided by height.
    pub fn aspect(self) -> f64 {
        f64::from(self.width) / f64::from(self.height.max(1))
    }
}

impl std::fmt::Display for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Declared element size in absolute pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Absolute pixel rectangle computed for one element on one canvas.
///
/// Always lies within the canvas it was resolved against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ResolvedBox {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ResolvedBox {
    /// Exclusive right edge.
    pub fn right(self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(self) -> u32 {
        self.y + self.height
    }

    /// `true` when the box lies entirely inside `canvas`.
    pub fn fits(self, canvas: Canvas) -> bool {
        u64::from(self.x) + u64::from(self.width) <= u64::from(canvas.width)
            && u64::from(self.y) + u64::from(self.height) <= u64::from(canvas.height)
    }

    /// Box as a float rectangle for drawing.
    pub fn to_rect(self) -> Rect {
        Rect::new(
            f64::from(self.x),
            f64::from(self.y),
            f64::from(self.right()),
            f64::from(self.bottom()),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

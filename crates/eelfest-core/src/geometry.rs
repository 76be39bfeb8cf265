#![forbid(unsafe_code)]

//! Geometric primitives in document coordinates.

use serde::{Deserialize, Serialize};

/// A rectangle in document (page) coordinates.
///
/// Origin is the top-left of the document, not the viewport; `y` grows
/// downward. Units are CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: f64,
    /// Top edge (inclusive).
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top edge. Alias for `self.y`.
    #[inline]
    pub const fn top(&self) -> f64 {
        self.y
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Whether any part of the rectangle lies in the viewport's vertical band.
    ///
    /// Edges are inclusive: a rectangle whose bottom touches the viewport top
    /// counts as visible.
    #[inline]
    pub fn overlaps_viewport(&self, viewport: &Viewport) -> bool {
        self.bottom() >= viewport.top && self.top() <= viewport.bottom()
    }
}

/// The visible vertical band of the document.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    /// Current vertical scroll offset.
    pub top: f64,
    /// Viewport height.
    pub height: f64,
}

impl Viewport {
    #[inline]
    pub const fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

//! Marker placement math.
//!
//! # Responsibility
//! - Map click positions on the rendered page surface to stored percentage
//!   coordinates, and project stored coordinates back for drawing.
//!
//! # Invariants
//! - Stored positions are percentages of the surface bounding box, never raw
//!   pixels; the mapping is independent of the transient zoom scale, which is
//!   what keeps annotations in place across resize and rescale.
//! - Degenerate surfaces are rejected instead of producing NaN/Inf.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// One point in screen pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfacePoint {
    pub x: f64,
    pub y: f64,
}

impl SurfacePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// On-screen pixel bounding box of the rendered page surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceBounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl SurfaceBounds {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    fn is_degenerate(&self) -> bool {
        !(self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0)
    }
}

/// Percentage pair (0-100 on a visible surface) stored on an issue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerPosition {
    pub x: f64,
    pub y: f64,
}

/// Placement computation failures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlacementError {
    /// Surface with non-positive or non-finite extent.
    DegenerateBounds { width: f64, height: f64 },
}

impl Display for PlacementError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DegenerateBounds { width, height } => write!(
                f,
                "surface bounds are degenerate: width={width} height={height}"
            ),
        }
    }
}

impl Error for PlacementError {}

/// Normalizes a click position to percentages of the surface bounding box.
///
/// Exactly `x = 100 * (click_x - left) / width` and the same for `y`. Clicks
/// outside the box yield values outside 0-100; the renderer owns clamping to
/// visible bounds.
///
/// # Errors
/// - `DegenerateBounds` when the surface has non-positive or non-finite
///   extent.
pub fn normalize_click(
    point: SurfacePoint,
    bounds: SurfaceBounds,
) -> Result<MarkerPosition, PlacementError> {
    if bounds.is_degenerate() {
        return Err(PlacementError::DegenerateBounds {
            width: bounds.width,
            height: bounds.height,
        });
    }
    Ok(MarkerPosition {
        x: 100.0 * (point.x - bounds.left) / bounds.width,
        y: 100.0 * (point.y - bounds.top) / bounds.height,
    })
}

/// Projects a stored marker position back onto a rendered surface.
///
/// Inverse of [`normalize_click`] over the same bounds; this is the pixel
/// offset at which the renderer draws the marker.
pub fn marker_offset(position: MarkerPosition, bounds: SurfaceBounds) -> SurfacePoint {
    SurfacePoint {
        x: bounds.left + bounds.width * position.x / 100.0,
        y: bounds.top + bounds.height * position.y / 100.0,
    }
}

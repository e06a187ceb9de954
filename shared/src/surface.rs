//! Draw surface - the seam between the clock core and a rendering backend
//!
//! The core describes a repaint as a handful of primitive calls; a backend
//! (the nannou adapter in the application crate, a recording stub in tests)
//! turns them into pixels. Coordinates are canvas-convention: origin at the
//! top-left, y growing downward. Angles are radians with 0 at 3 o'clock,
//! increasing clockwise.

use crate::angle::Point;
use crate::style::{Rgba, ShadowSpec};

/// Primitive drawing capabilities the clock repaint needs.
pub trait DrawSurface {
    /// Erase the whole surface.
    fn clear(&mut self);

    /// Enable or disable drop-shadow state for subsequent fills and lines.
    fn set_shadow(&mut self, shadow: Option<&ShadowSpec>);

    /// Fill a disc.
    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba);

    /// Stroke a circle outline.
    fn stroke_circle(&mut self, center: Point, radius: f64, weight: f64, color: Rgba);

    /// Fill a pie wedge between two angles. Callers guarantee
    /// `end_angle - start_angle <= pi`.
    fn fill_wedge(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64, color: Rgba);

    /// Stroke a line segment.
    fn line(&mut self, from: Point, to: Point, weight: f64, color: Rgba);
}

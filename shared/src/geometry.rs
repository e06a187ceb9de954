//! Face geometry - sizes derived from the drawing surface, and hit testing
//!
//! Every length on the face scales from the radius, with pixel floors so the
//! hands stay visible on small surfaces. Hit testing is the inverse path:
//! from a surface coordinate back to a turn around the face.

use crate::angle::{turn_at, Point};

/// Smallest usable surface dimension.
pub const MIN_SURFACE_DIM: f64 = 55.0;

/// Stroke width and radial extent of one hand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandMetrics {
    /// Stroke width
    pub width: f64,
    /// How far the hand extends behind the axis
    pub tail: f64,
    /// How far the hand extends toward the rim
    pub length: f64,
}

/// All face measurements, derived once from the surface dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceGeometry {
    pub width: f64,
    pub height: f64,
    pub center: Point,
    pub radius: f64,
    pub hour: HandMetrics,
    pub minute: HandMetrics,
    pub second: HandMetrics,
    /// Radius of the central cap the hands turn on
    pub axis_radius: f64,
}

impl FaceGeometry {
    /// Derive the face measurements for a `width x height` surface.
    pub fn derive(width: f64, height: f64) -> Self {
        let dim = width.min(height);
        let radius = dim / 2.0 - 2.0;
        let unit = radius / 25.0;

        let hour = HandMetrics {
            width: (radius / 20.0).max(3.0),
            tail: (2.0 * unit).max(2.0),
            length: (15.0 * unit).max(15.0),
        };
        let minute = HandMetrics {
            width: (radius / 30.0).max(2.0),
            tail: (3.0 * unit).max(3.0),
            length: (20.0 * unit).max(20.0),
        };
        let second = HandMetrics {
            width: (radius / 40.0).max(1.0),
            tail: (4.0 * unit).max(4.0),
            length: (21.0 * unit).max(21.0),
        };

        // The cap must cover every hand base without swallowing a tail
        let axis_radius = (unit / 2.0)
            .max(1.0)
            .min(hour.tail)
            .min(minute.tail)
            .min(second.tail);

        Self {
            width,
            height,
            center: Point::new(width / 2.0, height / 2.0),
            radius,
            hour,
            minute,
            second,
            axis_radius,
        }
    }

    /// Resolve a surface coordinate against the face.
    pub fn position(&self, x: f64, y: f64) -> FacePoint {
        let rel_x = x - self.center.x;
        let rel_y = y - self.center.y;
        let on_face = rel_x * rel_x + rel_y * rel_y <= self.radius * self.radius;
        FacePoint {
            rel_x,
            rel_y,
            on_face,
            turn: turn_at(rel_x, rel_y),
        }
    }
}

/// A surface coordinate resolved against the face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacePoint {
    /// Offset from the face center
    pub rel_x: f64,
    pub rel_y: f64,
    /// Whether the point lies on the face disc
    pub on_face: bool,
    /// Turn around the face the point corresponds to
    pub turn: f64,
}

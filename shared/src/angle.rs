//! Angle math - conversions between face turns and drawing angles
//!
//! A position on the clock face is a "turn": a fraction of a full rotation in
//! [0, 1), with 0 at 12 o'clock and values increasing clockwise. The drawing
//! surface speaks radians with 0 at 3 o'clock, increasing clockwise in y-down
//! surface coordinates. Every angle derived from a time fraction goes through
//! `turn_to_angle` so ticks, hands, and event wedges stay mutually aligned.

use std::f64::consts::{PI, TAU};

/// A point in surface coordinates (origin top-left, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Convert a turn around the face to a drawing angle in radians.
pub fn turn_to_angle(turn: f64) -> f64 {
    PI * (2.0 * turn - 0.5)
}

/// Project from a pole point to polar offset `(length, angle)`.
///
/// A negative `length` lands on the diametrically opposite side of the pole,
/// which is how hand tails are placed.
pub fn polar_from(center: Point, length: f64, angle: f64) -> Point {
    Point::new(center.x + length * angle.cos(), center.y + length * angle.sin())
}

/// Recover the turn for a center-relative offset `(dx, dy)`.
///
/// Inverse of `turn_to_angle` composed with the polar projection. The four
/// axis-aligned cases are handled explicitly; in particular the exact center
/// (`dx == 0`, `dy == 0`) maps to turn 0.
pub fn turn_at(dx: f64, dy: f64) -> f64 {
    if dx == 0.0 {
        if dy > 0.0 {
            0.5
        } else {
            0.0
        }
    } else if dy == 0.0 {
        if dx > 0.0 {
            0.25
        } else {
            0.75
        }
    } else {
        (dy.atan2(dx) / TAU + 0.25).rem_euclid(1.0)
    }
}

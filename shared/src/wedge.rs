//! Wedge projector - from a stored event to angular sectors on the face
//!
//! `project` is a pure two-argument function over an event and the current
//! time window; events carry no reference back to the clock. The projected
//! span is split into sub-wedges of at most a half turn, the widest arc the
//! drawing primitive can fill without direction ambiguity.

use std::f64::consts::PI;

use crate::angle::turn_to_angle;
use crate::events::Event;
use crate::style::Rgba;
use crate::window::TimeWindow;

/// How an event's clipped interval relates to the displayed window. Decides
/// the default wedge color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WedgeKind {
    /// Started before the window opened
    CarriedOver,
    /// No defined end; drawn up to the observed instant
    Ongoing,
    /// Ends after the window closes
    Continuing,
    /// Fully contained in the window
    Contained,
}

impl WedgeKind {
    /// Default palette, translucent so the face shows through.
    pub fn default_color(self) -> Rgba {
        match self {
            WedgeKind::CarriedOver => Rgba::new(178, 34, 34, 128),
            WedgeKind::Ongoing => Rgba::new(255, 140, 0, 128),
            WedgeKind::Continuing => Rgba::new(199, 21, 133, 128),
            WedgeKind::Contained => Rgba::new(255, 0, 0, 128),
        }
    }
}

/// An angular sector of the face, in drawing radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wedge {
    pub start_angle: f64,
    pub end_angle: f64,
    pub kind: WedgeKind,
}

/// Project an event onto the face for the current window.
///
/// Returns `None` when the event is not displayable: it has not started by
/// the observed instant, or it ended at or before the window opened. The
/// displayed interval is the event clipped to the window, with an open end
/// standing in for "up to now".
pub fn project(event: &Event, window: &TimeWindow) -> Option<Wedge> {
    let now = window.last_observed();
    if event.start > now {
        return None;
    }
    if let Some(end) = event.end {
        if end <= window.start() {
            return None;
        }
    }

    let clipped_start = event.start.max(window.start());
    let clipped_end = match event.end {
        None => now,
        Some(end) => end.min(window.end()),
    };

    let kind = if event.start < window.start() {
        WedgeKind::CarriedOver
    } else {
        match event.end {
            None => WedgeKind::Ongoing,
            Some(end) if end > window.end() => WedgeKind::Continuing,
            Some(_) => WedgeKind::Contained,
        }
    };

    let start_turn = window.hour_turn(clipped_start);
    // An end clipped to the window boundary is a full turn, not a wrap to 0
    let end_turn = if clipped_end >= window.end() {
        1.0
    } else {
        window.hour_turn(clipped_end)
    };

    Some(Wedge {
        start_angle: turn_to_angle(start_turn),
        end_angle: turn_to_angle(end_turn),
        kind,
    })
}

/// Split the span `[a1, a2]` into sub-spans of at most half a turn each.
pub fn split_span(a1: f64, a2: f64) -> Vec<(f64, f64)> {
    let mut out = Vec::new();
    split_into(a1, a2, &mut out);
    out
}

fn split_into(a1: f64, a2: f64, out: &mut Vec<(f64, f64)>) {
    if a2 - a1 > PI {
        let mid = 0.5 * (a1 + a2);
        split_into(a1, mid, out);
        split_into(mid, a2, out);
    } else {
        out.push((a1, a2));
    }
}

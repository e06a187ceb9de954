//! Style - clock construction options and their resolved form
//!
//! Options follow a defaulting chain: hands fall back to the base `color`,
//! the axis cap falls back to `fill`, and so on. Resolution happens once at
//! construction and produces an immutable `FaceStyle`; no defaults are shared
//! between clock instances.

use crate::events::Event;
use crate::wedge::WedgeKind;
use crate::zone::ClockZone;

/// An sRGB color with alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const BLACK: Rgba = Rgba::opaque(0, 0, 0);
    pub const WHITE: Rgba = Rgba::opaque(255, 255, 255);
}

/// Drop-shadow parameters applied to the face disc and the hands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowSpec {
    pub color: Rgba,
    pub offset_x: f64,
    pub offset_y: f64,
    pub blur: f64,
}

/// Per-wedge color override hook.
///
/// Returning `None` declines the wedge and the default palette for its kind
/// applies, so a hook can never leave a wedge unpainted or abort a repaint.
pub type EventColorFn = Box<dyn Fn(&Event, WedgeKind) -> Option<Rgba> + Send + Sync>;

/// Construction options for a clock. All fields optional in spirit:
/// `Default` yields a black-on-white local-time 12-hour face.
pub struct ClockOptions {
    /// 24-hour face instead of 12-hour
    pub is24: bool,
    /// Zone whose wall time the face shows
    pub zone: ClockZone,
    /// Base color for hands, outline, and ticks
    pub color: Rgba,
    /// Face disc fill
    pub fill: Rgba,
    /// Hand colors; each falls back to `color`
    pub hour: Option<Rgba>,
    pub minute: Option<Rgba>,
    pub second: Option<Rgba>,
    /// Face outline color; falls back to `color`
    pub face: Option<Rgba>,
    /// Axis cap color; falls back to `fill`
    pub axis: Option<Rgba>,
    /// Tick colors; each falls back to `color`
    pub minute_ticks: Option<Rgba>,
    pub hour_ticks: Option<Rgba>,
    /// Optional drop shadow on the face and hands
    pub shadow: Option<ShadowSpec>,
    /// Visibility flags
    pub no_hands: bool,
    pub no_hour: bool,
    pub no_minute: bool,
    pub no_second: bool,
    pub no_ticks: bool,
    pub no_minute_ticks: bool,
    pub no_hour_ticks: bool,
    /// Per-wedge color override
    pub event_color: Option<EventColorFn>,
}

impl Default for ClockOptions {
    fn default() -> Self {
        Self {
            is24: false,
            zone: ClockZone::Local,
            color: Rgba::BLACK,
            fill: Rgba::WHITE,
            hour: None,
            minute: None,
            second: None,
            face: None,
            axis: None,
            minute_ticks: None,
            hour_ticks: None,
            shadow: None,
            no_hands: false,
            no_hour: false,
            no_minute: false,
            no_second: false,
            no_ticks: false,
            no_minute_ticks: false,
            no_hour_ticks: false,
            event_color: None,
        }
    }
}

impl ClockOptions {
    /// Resolve the defaulting chain into a concrete style.
    pub fn resolve(&self) -> FaceStyle {
        FaceStyle {
            fill: self.fill,
            hour: self.hour.unwrap_or(self.color),
            minute: self.minute.unwrap_or(self.color),
            second: self.second.unwrap_or(self.color),
            face: self.face.unwrap_or(self.color),
            axis: self.axis.unwrap_or(self.fill),
            minute_ticks: self.minute_ticks.unwrap_or(self.color),
            hour_ticks: self.hour_ticks.unwrap_or(self.color),
            shadow: self.shadow,
            show_hour: !(self.no_hands || self.no_hour),
            show_minute: !(self.no_hands || self.no_minute),
            show_second: !(self.no_hands || self.no_second),
            show_minute_ticks: !(self.no_ticks || self.no_minute_ticks),
            show_hour_ticks: !(self.no_ticks || self.no_hour_ticks),
        }
    }
}

/// Fully resolved appearance of a clock face. Immutable after construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceStyle {
    pub fill: Rgba,
    pub hour: Rgba,
    pub minute: Rgba,
    pub second: Rgba,
    pub face: Rgba,
    pub axis: Rgba,
    pub minute_ticks: Rgba,
    pub hour_ticks: Rgba,
    pub shadow: Option<ShadowSpec>,
    pub show_hour: bool,
    pub show_minute: bool,
    pub show_second: bool,
    pub show_minute_ticks: bool,
    pub show_hour_ticks: bool,
}

//! Drawing module - nannou backend for the clock's draw surface
//!
//! Adapts the core's canvas-convention draw calls (origin top-left, y down,
//! angles clockwise) onto nannou's y-up window coordinates, and renders the
//! application chrome around the face: wedge legend, hover readout, error
//! banner.

use nannou::prelude::*;
use shared::{polar_from, DrawSurface, Rgba, ShadowSpec, WedgeKind};

/// Color palette for the application chrome
pub mod colors {
    use nannou::prelude::*;

    pub const BACKGROUND: Srgb<u8> = Srgb {
        red: 24,
        green: 26,
        blue: 30,
        standard: std::marker::PhantomData,
    };
    pub const TEXT_PRIMARY: Srgb<u8> = Srgb {
        red: 235,
        green: 235,
        blue: 235,
        standard: std::marker::PhantomData,
    };
    pub const TEXT_SECONDARY: Srgb<u8> = Srgb {
        red: 150,
        green: 155,
        blue: 160,
        standard: std::marker::PhantomData,
    };
    pub const READOUT_BG: Srgb<u8> = Srgb {
        red: 40,
        green: 44,
        blue: 50,
        standard: std::marker::PhantomData,
    };
}

/// The core's drawing seam, implemented on nannou's `Draw` API for one
/// rectangular region of the window.
pub struct NannouSurface<'a> {
    draw: &'a Draw,
    /// Clock area in nannou window coordinates
    area: Rect,
    shadow: Option<ShadowSpec>,
}

impl<'a> NannouSurface<'a> {
    pub fn new(draw: &'a Draw, area: Rect) -> Self {
        Self {
            draw,
            area,
            shadow: None,
        }
    }

    /// Surface coordinates (y down from the area's top-left) to window
    /// coordinates (y up from the window center).
    fn to_window(&self, p: shared::Point) -> Point2 {
        pt2(
            self.area.left() + p.x as f32,
            self.area.top() - p.y as f32,
        )
    }

    fn shadowed(&self, p: shared::Point) -> Option<Point2> {
        self.shadow.as_ref().map(|s| {
            self.to_window(shared::Point::new(p.x + s.offset_x, p.y + s.offset_y))
        })
    }

    fn wedge_points(&self, center: shared::Point, radius: f64, a1: f64, a2: f64) -> Vec<Point2> {
        // enough arc samples that the rim stays visually circular
        let steps = (((a2 - a1).abs() / 0.02).ceil() as usize).max(2);
        let mut points = Vec::with_capacity(steps + 2);
        points.push(self.to_window(center));
        for i in 0..=steps {
            let angle = a1 + (a2 - a1) * (i as f64 / steps as f64);
            points.push(self.to_window(polar_from(center, radius, angle)));
        }
        points
    }
}

fn color(c: Rgba) -> Srgba<u8> {
    srgba(c.r, c.g, c.b, c.a)
}

impl DrawSurface for NannouSurface<'_> {
    fn clear(&mut self) {
        // the host clears the whole frame with draw.background()
    }

    fn set_shadow(&mut self, shadow: Option<&ShadowSpec>) {
        self.shadow = shadow.copied();
    }

    fn fill_circle(&mut self, center: shared::Point, radius: f64, c: Rgba) {
        // no blur primitive in the Draw API; the offset silhouette stands in
        if let (Some(ghost), Some(s)) = (self.shadowed(center), self.shadow.as_ref()) {
            self.draw
                .ellipse()
                .xy(ghost)
                .radius(radius as f32)
                .color(color(s.color));
        }
        self.draw
            .ellipse()
            .xy(self.to_window(center))
            .radius(radius as f32)
            .color(color(c));
    }

    fn stroke_circle(&mut self, center: shared::Point, radius: f64, weight: f64, c: Rgba) {
        let segments = 120;
        let points: Vec<Point2> = (0..=segments)
            .map(|i| {
                let angle = (i as f64 / segments as f64) * std::f64::consts::TAU;
                self.to_window(polar_from(center, radius, angle))
            })
            .collect();
        self.draw
            .polyline()
            .weight(weight as f32)
            .color(color(c))
            .points(points);
    }

    fn fill_wedge(&mut self, center: shared::Point, radius: f64, a1: f64, a2: f64, c: Rgba) {
        let points = self.wedge_points(center, radius, a1, a2);
        self.draw.polygon().color(color(c)).points(points);
    }

    fn line(&mut self, from: shared::Point, to: shared::Point, weight: f64, c: Rgba) {
        if let (Some(ghost_from), Some(ghost_to), Some(s)) =
            (self.shadowed(from), self.shadowed(to), self.shadow.as_ref())
        {
            self.draw
                .line()
                .start(ghost_from)
                .end(ghost_to)
                .weight(weight as f32)
                .color(color(s.color));
        }
        self.draw
            .line()
            .start(self.to_window(from))
            .end(self.to_window(to))
            .weight(weight as f32)
            .color(color(c));
    }
}

/// Draw the wedge color legend under the clock area.
pub fn draw_legend(draw: &Draw, area: Rect) {
    let entries = [
        (WedgeKind::CarriedOver, "carried over"),
        (WedgeKind::Ongoing, "ongoing"),
        (WedgeKind::Continuing, "continuing"),
        (WedgeKind::Contained, "contained"),
    ];

    let swatch = 10.0;
    let spacing = area.w() / entries.len() as f32;
    let y = area.bottom() - 24.0;

    for (i, (kind, label)) in entries.iter().enumerate() {
        let x = area.left() + spacing * (i as f32 + 0.5);
        let c = kind.default_color();
        draw.rect()
            .x_y(x - spacing / 2.0 + swatch, y)
            .w_h(swatch, swatch)
            .color(color(c));
        draw.text(label)
            .x_y(x + swatch, y)
            .color(colors::TEXT_SECONDARY)
            .font_size(12)
            .left_justify()
            .w(spacing - swatch * 3.0);
    }
}

/// Draw the hover readout line at the bottom of the window.
pub fn draw_readout(draw: &Draw, text: &str, pinned: bool, window_rect: Rect) {
    let height = 28.0;
    let pos = pt2(window_rect.x(), window_rect.bottom() + height / 2.0 + 6.0);

    draw.rect()
        .xy(pos)
        .w_h(window_rect.w() - 20.0, height)
        .color(colors::READOUT_BG);

    let prefix = if pinned { "pinned: " } else { "" };
    draw.text(&format!("{}{}", prefix, text))
        .xy(pos)
        .color(colors::TEXT_PRIMARY)
        .font_size(14)
        .w(window_rect.w() - 40.0);
}

/// Draw the error banner across the top of the window.
pub fn draw_error_banner(draw: &Draw, message: &str, rect: Rect) {
    let banner_height = 40.0;
    let banner_rect = Rect::from_x_y_w_h(
        rect.x(),
        rect.top() - banner_height / 2.0,
        rect.w(),
        banner_height,
    );

    draw.rect()
        .xy(banner_rect.xy())
        .wh(banner_rect.wh())
        .color(srgb(80u8, 20u8, 20u8));

    draw.text(message)
        .xy(banner_rect.xy())
        .color(colors::TEXT_PRIMARY)
        .font_size(14)
        .w(banner_rect.w() - 20.0);
}

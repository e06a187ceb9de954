//! Clock widget - repaint sequence and runtime API
//!
//! One repaint is a synchronous pass: sample the window, evict expired
//! events, then issue draw calls in layering order (face disc, event wedges,
//! outline, ticks, hands, axis cap). The widget owns its resolved style,
//! geometry, window, and event store; the drawing backend stays behind the
//! `DrawSurface` trait.

use chrono::{DateTime, Duration, Utc};

use crate::angle::{polar_from, turn_to_angle};
use crate::events::{Event, EventStore};
use crate::geometry::{FaceGeometry, FacePoint, HandMetrics, MIN_SURFACE_DIM};
use crate::style::{ClockOptions, EventColorFn, FaceStyle, Rgba};
use crate::surface::DrawSurface;
use crate::wedge::{project, split_span, WedgeKind};
use crate::window::TimeWindow;

/// Stroke weight of the face outline.
const FACE_OUTLINE_WEIGHT: f64 = 2.0;

/// Construction failure.
#[derive(Debug, Clone, PartialEq)]
pub enum ClockError {
    /// Surface dimensions are degenerate (non-finite or non-positive)
    InvalidSurface { width: f64, height: f64 },
    /// Surface is smaller than the face can usefully occupy
    SurfaceTooSmall { width: f64, height: f64 },
}

impl std::fmt::Display for ClockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClockError::InvalidSurface { width, height } => {
                write!(f, "cannot create clock: unusable surface {}x{}", width, height)
            }
            ClockError::SurfaceTooSmall { width, height } => write!(
                f,
                "cannot create clock: surface {}x{} is below the {} unit minimum",
                width, height, MIN_SURFACE_DIM
            ),
        }
    }
}

impl std::error::Error for ClockError {}

/// An analog clock face that overlays timed events as colored wedges.
pub struct Clock {
    style: FaceStyle,
    geometry: FaceGeometry,
    window: TimeWindow,
    events: EventStore,
    event_color: Option<EventColorFn>,
}

impl Clock {
    /// Build a clock for a `width x height` surface, sampling `now` so the
    /// face is drawable immediately.
    pub fn new(
        width: f64,
        height: f64,
        options: ClockOptions,
        now: DateTime<Utc>,
    ) -> Result<Self, ClockError> {
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(ClockError::InvalidSurface { width, height });
        }
        if width.min(height) < MIN_SURFACE_DIM {
            return Err(ClockError::SurfaceTooSmall { width, height });
        }

        let style = options.resolve();
        let window = TimeWindow::new(options.zone, options.is24, now);
        Ok(Self {
            style,
            geometry: FaceGeometry::derive(width, height),
            window,
            events: EventStore::new(),
            event_color: options.event_color,
        })
    }

    /// Add events to display.
    pub fn add(&mut self, batch: impl IntoIterator<Item = Event>) {
        self.events.add(batch);
    }

    /// Move the displayed instant forward, rolling the window and evicting
    /// events that can no longer appear. Returns whether the window rolled.
    pub fn advance(&mut self, now: DateTime<Utc>) -> bool {
        let rolled = self.window.sample(now);
        self.events.evict_before(self.window.start());
        rolled
    }

    /// Issue the draw calls for the current state.
    pub fn render(&self, surface: &mut dyn DrawSurface) {
        surface.clear();
        self.draw_face(surface);
        self.draw_ticks(surface);
        self.draw_hands(surface);
        self.draw_axis(surface);
    }

    /// One full repaint: advance to `now`, then render.
    pub fn repaint(&mut self, now: DateTime<Utc>, surface: &mut dyn DrawSurface) {
        self.advance(now);
        self.render(surface);
    }

    /// The last displayed instant.
    pub fn time(&self) -> DateTime<Utc> {
        self.window.last_observed()
    }

    /// Whether this is a 24-hour face.
    pub fn is24(&self) -> bool {
        self.window.hours_in_period() == 24
    }

    /// First instant shown on the face.
    pub fn start_time(&self) -> DateTime<Utc> {
        self.window.start()
    }

    /// First instant past the face.
    pub fn end_time(&self) -> DateTime<Utc> {
        self.window.end()
    }

    /// Resolve a surface coordinate against the face.
    pub fn position(&self, x: f64, y: f64) -> FacePoint {
        self.geometry.position(x, y)
    }

    /// The instant a surface coordinate points at, if it is on the face.
    pub fn instant_at(&self, x: f64, y: f64) -> Option<DateTime<Utc>> {
        let p = self.geometry.position(x, y);
        p.on_face.then(|| self.window.instant_at_turn(p.turn))
    }

    /// The event under a surface coordinate, if any.
    pub fn event_at(&self, x: f64, y: f64) -> Option<&Event> {
        self.instant_at(x, y)
            .and_then(|instant| self.events.lookup(instant))
    }

    /// The event active at an instant, if any.
    pub fn event_at_instant(&self, instant: DateTime<Utc>) -> Option<&Event> {
        self.events.lookup(instant)
    }

    /// Stored events in ascending start order.
    pub fn events(&self) -> &[Event] {
        self.events.events()
    }

    /// The face measurements.
    pub fn geometry(&self) -> &FaceGeometry {
        &self.geometry
    }

    /// The resolved appearance.
    pub fn style(&self) -> &FaceStyle {
        &self.style
    }

    fn wedge_color(&self, event: &Event, kind: WedgeKind) -> Rgba {
        if let Some(hook) = &self.event_color {
            if let Some(color) = hook(event, kind) {
                return color;
            }
        }
        kind.default_color()
    }

    fn draw_face(&self, surface: &mut dyn DrawSurface) {
        let g = &self.geometry;
        if let Some(shadow) = &self.style.shadow {
            surface.set_shadow(Some(shadow));
        }
        surface.fill_circle(g.center, g.radius, self.style.fill);
        if self.style.shadow.is_some() {
            surface.set_shadow(None);
        }

        for event in self.events.events() {
            if let Some(wedge) = project(event, &self.window) {
                let color = self.wedge_color(event, wedge.kind);
                for (a1, a2) in split_span(wedge.start_angle, wedge.end_angle) {
                    surface.fill_wedge(g.center, g.radius, a1, a2, color);
                }
            }
        }

        // Re-stroke after the wedges so they cannot obscure the outline
        surface.stroke_circle(g.center, g.radius, FACE_OUTLINE_WEIGHT, self.style.face);
    }

    fn draw_ticks(&self, surface: &mut dyn DrawSurface) {
        let g = &self.geometry;
        let minute_len = (g.radius / 20.0).max(2.0);
        if self.style.show_minute_ticks {
            for i in 0..60 {
                let turn = f64::from(i) / 60.0;
                self.draw_radial(surface, g.radius - minute_len, g.radius, 1.0, self.style.minute_ticks, turn);
            }
        }
        if self.style.show_hour_ticks {
            let hours = self.window.hours_in_period();
            let hour_len = minute_len * 2.0;
            for i in 0..hours {
                let turn = f64::from(i) / f64::from(hours);
                self.draw_radial(surface, g.radius - hour_len, g.radius, 3.0, self.style.hour_ticks, turn);
            }
        }
    }

    fn draw_hands(&self, surface: &mut dyn DrawSurface) {
        let now = self.window.last_observed();
        if let Some(shadow) = &self.style.shadow {
            surface.set_shadow(Some(shadow));
        }
        if self.style.show_hour {
            self.draw_hand(surface, self.geometry.hour, self.style.hour, self.window.hour_turn(now));
        }
        if self.style.show_minute {
            self.draw_hand(surface, self.geometry.minute, self.style.minute, self.window.minute_turn(now));
        }
        if self.style.show_second {
            self.draw_hand(surface, self.geometry.second, self.style.second, self.window.second_turn(now));
        }
        if self.style.shadow.is_some() {
            surface.set_shadow(None);
        }
    }

    fn draw_axis(&self, surface: &mut dyn DrawSurface) {
        // Drawn last so it caps the hand bases
        surface.fill_circle(self.geometry.center, self.geometry.axis_radius, self.style.axis);
    }

    fn draw_hand(
        &self,
        surface: &mut dyn DrawSurface,
        metrics: HandMetrics,
        color: Rgba,
        turn: f64,
    ) {
        let angle = turn_to_angle(turn);
        let tail = polar_from(self.geometry.center, -metrics.tail, angle);
        let tip = polar_from(self.geometry.center, metrics.length, angle);
        surface.line(tail, tip, metrics.width, color);
    }

    fn draw_radial(
        &self,
        surface: &mut dyn DrawSurface,
        inner: f64,
        outer: f64,
        weight: f64,
        color: Rgba,
        turn: f64,
    ) {
        let angle = turn_to_angle(turn);
        let from = polar_from(self.geometry.center, inner, angle);
        let to = polar_from(self.geometry.center, outer, angle);
        surface.line(from, to, weight, color);
    }
}

/// Schedules repaints at a fixed cadence.
///
/// The host polls it from its own loop; a poll that comes due answers `true`
/// exactly once per period. Dropping the timer (or ceasing to poll) is the
/// only teardown.
#[derive(Debug, Clone)]
pub struct RepaintTimer {
    period: Duration,
    last: Option<DateTime<Utc>>,
}

impl RepaintTimer {
    pub fn new(period: Duration) -> Self {
        Self { period, last: None }
    }

    /// The 1-second cadence the full face repaints at.
    pub fn per_second() -> Self {
        Self::new(Duration::seconds(1))
    }

    /// Whether a repaint is due at `now`. The first poll is always due.
    pub fn poll(&mut self, now: DateTime<Utc>) -> bool {
        let due = match self.last {
            None => true,
            // a backwards clock jump resynchronizes rather than stalling
            Some(last) => now - last >= self.period || now < last,
        };
        if due {
            self.last = Some(now);
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle::Point;
    use crate::style::ShadowSpec;
    use crate::zone::ClockZone;
    use chrono::TimeZone;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Clear,
        Shadow(bool),
        FillCircle(f64),
        StrokeCircle(f64),
        Wedge(f64, f64),
        Line(f64),
    }

    #[derive(Default)]
    struct Recording {
        ops: Vec<Op>,
    }

    impl DrawSurface for Recording {
        fn clear(&mut self) {
            self.ops.push(Op::Clear);
        }
        fn set_shadow(&mut self, shadow: Option<&ShadowSpec>) {
            self.ops.push(Op::Shadow(shadow.is_some()));
        }
        fn fill_circle(&mut self, _center: Point, radius: f64, _color: Rgba) {
            self.ops.push(Op::FillCircle(radius));
        }
        fn stroke_circle(&mut self, _center: Point, radius: f64, _weight: f64, _color: Rgba) {
            self.ops.push(Op::StrokeCircle(radius));
        }
        fn fill_wedge(&mut self, _center: Point, _radius: f64, a1: f64, a2: f64, _color: Rgba) {
            self.ops.push(Op::Wedge(a1, a2));
        }
        fn line(&mut self, _from: Point, _to: Point, weight: f64, _color: Rgba) {
            self.ops.push(Op::Line(weight));
        }
    }

    fn utc(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, h, m, s).unwrap()
    }

    fn options() -> ClockOptions {
        ClockOptions {
            zone: ClockZone::Named(chrono_tz::UTC),
            ..ClockOptions::default()
        }
    }

    fn clock_at(h: u32, m: u32, s: u32) -> Clock {
        Clock::new(200.0, 200.0, options(), utc(h, m, s)).unwrap()
    }

    #[test]
    fn test_construction_rejects_bad_surfaces() {
        assert!(matches!(
            Clock::new(f64::NAN, 200.0, options(), utc(9, 0, 0)),
            Err(ClockError::InvalidSurface { .. })
        ));
        assert!(matches!(
            Clock::new(0.0, 200.0, options(), utc(9, 0, 0)),
            Err(ClockError::InvalidSurface { .. })
        ));
        assert!(matches!(
            Clock::new(54.0, 200.0, options(), utc(9, 0, 0)),
            Err(ClockError::SurfaceTooSmall { .. })
        ));
        assert!(Clock::new(55.0, 55.0, options(), utc(9, 0, 0)).is_ok());
    }

    #[test]
    fn test_render_layering_order() {
        let mut clock = clock_at(9, 0, 0);
        clock.add([Event::closed(utc(8, 0, 0), utc(8, 30, 0), "done")]);
        let mut surface = Recording::default();
        clock.render(&mut surface);

        assert_eq!(surface.ops[0], Op::Clear);
        let face_fill = surface
            .ops
            .iter()
            .position(|op| matches!(op, Op::FillCircle(_)))
            .unwrap();
        let wedge = surface
            .ops
            .iter()
            .position(|op| matches!(op, Op::Wedge(..)))
            .unwrap();
        let outline = surface
            .ops
            .iter()
            .position(|op| matches!(op, Op::StrokeCircle(_)))
            .unwrap();
        assert!(face_fill < wedge && wedge < outline);
        // axis cap is the very last call
        let axis_radius = clock.geometry().axis_radius;
        assert_eq!(surface.ops.last(), Some(&Op::FillCircle(axis_radius)));
    }

    #[test]
    fn test_render_draws_expected_tick_and_hand_counts() {
        let clock = clock_at(9, 0, 0);
        let mut surface = Recording::default();
        clock.render(&mut surface);
        let lines = surface
            .ops
            .iter()
            .filter(|op| matches!(op, Op::Line(_)))
            .count();
        // 60 minute ticks + 12 hour ticks + 3 hands
        assert_eq!(lines, 75);
    }

    #[test]
    fn test_render_honors_visibility_flags() {
        let opts = ClockOptions {
            no_hands: true,
            no_minute_ticks: true,
            ..options()
        };
        let clock = Clock::new(200.0, 200.0, opts, utc(9, 0, 0)).unwrap();
        let mut surface = Recording::default();
        clock.render(&mut surface);
        let lines = surface
            .ops
            .iter()
            .filter(|op| matches!(op, Op::Line(_)))
            .count();
        // only the 12 hour ticks remain
        assert_eq!(lines, 12);
    }

    #[test]
    fn test_render_24h_face_has_24_hour_ticks() {
        let opts = ClockOptions {
            is24: true,
            no_minute_ticks: true,
            no_hands: true,
            ..options()
        };
        let clock = Clock::new(200.0, 200.0, opts, utc(9, 0, 0)).unwrap();
        let mut surface = Recording::default();
        clock.render(&mut surface);
        let lines = surface
            .ops
            .iter()
            .filter(|op| matches!(op, Op::Line(_)))
            .count();
        assert_eq!(lines, 24);
    }

    #[test]
    fn test_future_events_draw_no_wedge() {
        let mut clock = clock_at(9, 0, 0);
        clock.add([Event::closed(utc(10, 0, 0), utc(11, 0, 0), "later")]);
        let mut surface = Recording::default();
        clock.render(&mut surface);
        assert!(!surface.ops.iter().any(|op| matches!(op, Op::Wedge(..))));
    }

    #[test]
    fn test_shadow_brackets_face_and_hands() {
        let opts = ClockOptions {
            shadow: Some(ShadowSpec {
                color: Rgba::new(0, 0, 0, 80),
                offset_x: 2.0,
                offset_y: 2.0,
                blur: 4.0,
            }),
            ..options()
        };
        let clock = Clock::new(200.0, 200.0, opts, utc(9, 0, 0)).unwrap();
        let mut surface = Recording::default();
        clock.render(&mut surface);
        let shadows: Vec<_> = surface
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Shadow(on) => Some(*on),
                _ => None,
            })
            .collect();
        // enabled and disabled once around the face, once around the hands
        assert_eq!(shadows, vec![true, false, true, false]);
    }

    #[test]
    fn test_event_color_hook_overrides_and_declines() {
        let green = Rgba::opaque(0, 200, 0);
        let opts = ClockOptions {
            event_color: Some(Box::new(move |event: &Event, _kind| {
                (event.content == "special").then_some(green)
            })),
            ..options()
        };
        let mut clock = Clock::new(200.0, 200.0, opts, utc(9, 0, 0)).unwrap();
        clock.add([Event::closed(utc(7, 0, 0), utc(8, 0, 0), "special")]);
        assert_eq!(clock.wedge_color(&clock.events()[0].clone(), WedgeKind::Contained), green);
        let plain = Event::closed(utc(7, 0, 0), utc(8, 0, 0), "plain");
        assert_eq!(
            clock.wedge_color(&plain, WedgeKind::Contained),
            WedgeKind::Contained.default_color()
        );
    }

    #[test]
    fn test_advance_evicts_behind_the_window() {
        let mut clock = Clock::new(200.0, 200.0, options(), utc(11, 0, 0)).unwrap();
        clock.add([Event::closed(utc(9, 0, 0), utc(10, 0, 0), "morning")]);
        assert_eq!(clock.events().len(), 1);
        // noon rolls a 12-hour window; the morning event scrolls out
        let rolled = clock.advance(utc(12, 0, 5));
        assert!(rolled);
        assert!(clock.events().is_empty());
    }

    #[test]
    fn test_hit_testing_round_trip() {
        let mut clock = clock_at(9, 0, 0);
        clock.add([Event::closed(utc(2, 0, 0), utc(4, 0, 0), "early")]);

        // center points at the window start
        assert_eq!(clock.instant_at(100.0, 100.0), Some(clock.start_time()));
        // off the face there is no instant
        assert_eq!(clock.instant_at(0.0, 0.0), None);

        // 3 o'clock on a 12-hour face is a quarter turn past the start
        let p = clock.position(180.0, 100.0);
        assert!(p.on_face);
        let instant = clock.instant_at(180.0, 100.0).unwrap();
        assert_eq!(instant, utc(3, 0, 0));
        assert_eq!(clock.event_at(180.0, 100.0).map(|e| e.content.as_str()), Some("early"));
        assert!(clock.event_at_instant(utc(5, 0, 0)).is_none());
    }

    #[test]
    fn test_time_reports_last_displayed_instant() {
        let mut clock = clock_at(9, 0, 0);
        assert_eq!(clock.time(), utc(9, 0, 0));
        clock.advance(utc(9, 0, 1));
        assert_eq!(clock.time(), utc(9, 0, 1));
        assert!(!clock.is24());
        assert_eq!(clock.start_time(), utc(0, 0, 0));
        assert_eq!(clock.end_time(), utc(12, 0, 0));
    }

    #[test]
    fn test_repaint_timer_cadence() {
        let mut timer = RepaintTimer::per_second();
        assert!(timer.poll(utc(9, 0, 0)));
        assert!(!timer.poll(utc(9, 0, 0)));
        assert!(timer.poll(utc(9, 0, 1)));
        assert!(!timer.poll(utc(9, 0, 1)));
        // backwards jump resynchronizes
        assert!(timer.poll(utc(8, 59, 0)));
    }
}

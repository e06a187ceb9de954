//! Event Horizon Clock
//!
//! An analog face that overlays timed events as colored wedges. The displayed
//! window rolls at noon/midnight, expired events scroll off on rollover, and
//! pointer positions resolve back to instants and events on the face.

mod drawing;
mod ui;

use chrono::{DateTime, Duration, Utc};
use nannou::prelude::*;
use nannou_egui::{self, Egui};
use serde::{Deserialize, Serialize};
use shared::{parse_timezone, Clock, ClockOptions, ClockZone, Event, RepaintTimer, Rgba, ShadowSpec};

use crate::drawing::{colors, draw_error_banner, draw_legend, draw_readout, NannouSurface};
use crate::ui::{draw_control_panel, ComposerState, PickerState};

/// Width reserved for the egui sidebar
const PANEL_WIDTH: f32 = 300.0;
/// Margin around the clock area
const AREA_MARGIN: f32 = 30.0;
/// Height reserved under the clock for the hover readout
const READOUT_HEIGHT: f32 = 44.0;

fn main() {
    nannou::app(model).update(update).run();
}

/// Face color themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    Classic,
    Midnight,
    Chalk,
}

impl Theme {
    pub fn all() -> &'static [Theme] {
        &[Theme::Classic, Theme::Midnight, Theme::Chalk]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Theme::Classic => "Classic",
            Theme::Midnight => "Midnight",
            Theme::Chalk => "Chalk",
        }
    }

    /// Base color, face fill, and second-hand accent
    fn palette(&self) -> (Rgba, Rgba, Rgba) {
        match self {
            Theme::Classic => (
                Rgba::BLACK,
                Rgba::WHITE,
                Rgba::opaque(200, 30, 30),
            ),
            Theme::Midnight => (
                Rgba::opaque(225, 228, 235),
                Rgba::opaque(30, 34, 42),
                Rgba::opaque(0, 212, 255),
            ),
            Theme::Chalk => (
                Rgba::opaque(240, 238, 230),
                Rgba::opaque(58, 66, 74),
                Rgba::opaque(255, 200, 100),
            ),
        }
    }
}

/// Persisted application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub is24: bool,
    /// IANA zone id; `None` follows the system zone
    pub timezone_id: Option<String>,
    pub theme: Theme,
    pub show_hour_hand: bool,
    pub show_minute_hand: bool,
    pub show_second_hand: bool,
    pub show_minute_ticks: bool,
    pub show_hour_ticks: bool,
    pub shadow: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            is24: false,
            timezone_id: None,
            theme: Theme::Classic,
            show_hour_hand: true,
            show_minute_hand: true,
            show_second_hand: true,
            show_minute_ticks: true,
            show_hour_ticks: true,
            shadow: false,
        }
    }
}

impl Settings {
    pub fn zone(&self) -> ClockZone {
        match &self.timezone_id {
            Some(id) => parse_timezone(id)
                .ok()
                .map(ClockZone::Named)
                .unwrap_or(ClockZone::Local),
            None => ClockZone::Local,
        }
    }

    fn clock_options(&self) -> ClockOptions {
        let (color, fill, accent) = self.theme.palette();
        ClockOptions {
            is24: self.is24,
            zone: self.zone(),
            color,
            fill,
            second: Some(accent),
            shadow: self.shadow.then(|| ShadowSpec {
                color: Rgba::new(0, 0, 0, 90),
                offset_x: 3.0,
                offset_y: 3.0,
                blur: 6.0,
            }),
            no_hour: !self.show_hour_hand,
            no_minute: !self.show_minute_hand,
            no_second: !self.show_second_hand,
            no_minute_ticks: !self.show_minute_ticks,
            no_hour_ticks: !self.show_hour_ticks,
            ..ClockOptions::default()
        }
    }
}

/// Application state
struct Model {
    /// The clock widget
    clock: Clock,
    /// 1 Hz repaint cadence
    timer: RepaintTimer,
    /// Clock area in window coordinates
    area: Rect,
    settings: Settings,
    picker_state: PickerState,
    composer: ComposerState,
    /// Last mouse position
    mouse: Option<Point2>,
    /// Hover readout text, frozen while pinned
    hover: Option<String>,
    pinned: bool,
    /// Error message to display (if any)
    error_message: Option<String>,
    /// egui integration
    egui: Egui,
}

fn save_settings(settings: &Settings) {
    if let Err(e) = shared::save_config(settings) {
        eprintln!("Failed to save settings: {}", e);
    }
}

/// The square region of the window the face occupies.
fn clock_area(window_rect: Rect) -> Rect {
    let usable = Rect::from_corners(
        pt2(
            window_rect.left() + AREA_MARGIN,
            window_rect.bottom() + AREA_MARGIN + READOUT_HEIGHT,
        ),
        pt2(
            window_rect.right() - PANEL_WIDTH - AREA_MARGIN,
            window_rect.top() - AREA_MARGIN,
        ),
    );
    let side = usable.w().min(usable.h()).max(1.0);
    Rect::from_x_y_w_h(usable.x(), usable.y(), side, side)
}

fn build_clock(settings: &Settings, area: Rect, now: DateTime<Utc>) -> Result<Clock, shared::ClockError> {
    Clock::new(<f64 as From<f32>>::from(area.w()), <f64 as From<f32>>::from(area.h()), settings.clock_options(), now)
}

/// Rebuild the widget for new settings or a new area, carrying events over.
fn rebuild_clock(model: &mut Model, area: Rect, now: DateTime<Utc>) {
    match build_clock(&model.settings, area, now) {
        Ok(mut clock) => {
            clock.add(model.clock.events().to_vec());
            model.clock = clock;
            model.area = area;
            model.error_message = None;
        }
        Err(e) => {
            // keep the old clock; the banner explains why it stopped tracking
            model.error_message = Some(e.to_string());
        }
    }
}

fn model(app: &App) -> Model {
    // Create window
    let window_id = app
        .new_window()
        .title("Event Horizon Clock")
        .size(1000, 700)
        .min_size(560, 420)
        .view(view)
        .key_pressed(key_pressed)
        .mouse_pressed(mouse_pressed)
        .mouse_moved(mouse_moved)
        .raw_event(raw_window_event)
        .build()
        .unwrap();

    let window = app.window(window_id).unwrap();
    let egui = Egui::from_window(&window);

    // Load settings
    let settings: Settings = shared::load_config().ok().flatten().unwrap_or_default();

    let now = Utc::now();
    let area = clock_area(app.window_rect());
    let mut clock = build_clock(&settings, area, now)
        .expect("the minimum window size keeps the face above the minimum surface size");

    // Seed a couple of events so the face shows its point immediately
    let warmup_start = now - Duration::minutes(75);
    clock.add([
        Event::closed(warmup_start, warmup_start + Duration::minutes(45), "warm-up"),
        Event::new(now - Duration::minutes(20), "focus block"),
    ]);

    Model {
        clock,
        timer: RepaintTimer::per_second(),
        area,
        settings,
        picker_state: PickerState::default(),
        composer: ComposerState::default(),
        mouse: None,
        hover: None,
        pinned: false,
        error_message: None,
        egui,
    }
}

/// Resolve the mouse position to a readout line, if it is on the face.
fn hover_text(model: &Model, pos: Point2) -> Option<String> {
    let x = <f64 as From<f32>>::from(pos.x - model.area.left());
    let y = <f64 as From<f32>>::from(model.area.top() - pos.y);
    let instant = model.clock.instant_at(x, y)?;
    let civil = model.settings.zone().civil(instant);
    let mut text = format!("{:02}:{:02}:{:02}", civil.hour, civil.minute, civil.second);
    if let Some(event) = model.clock.event_at(x, y) {
        text.push_str(" - ");
        text.push_str(&event.content);
    }
    Some(text)
}

fn update(app: &App, model: &mut Model, update: Update) {
    let now = Utc::now();

    // Advance displayed state at the repaint cadence, not the frame rate
    if model.timer.poll(now) {
        model.clock.advance(now);
    }

    // Track window resizes
    let area = clock_area(app.window_rect());
    if area != model.area {
        rebuild_clock(model, area, now);
    }

    // Refresh the hover readout unless it is pinned
    if !model.pinned {
        let text = model.mouse.and_then(|pos| hover_text(model, pos));
        model.hover = text;
    }

    // Begin egui frame
    model.egui.set_elapsed_time(update.since_start);
    let ctx = model.egui.begin_frame();

    let zone = model.settings.zone();
    let result = draw_control_panel(
        &ctx,
        &mut model.picker_state,
        &mut model.composer,
        &mut model.settings,
        zone,
        model.clock.events(),
        now,
    );
    drop(ctx);

    if result.settings_changed {
        rebuild_clock(model, model.area, now);
        save_settings(&model.settings);
    }
    if let Some(event) = result.add_event {
        model.clock.add([event]);
    }
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();

    // Clear background
    draw.background().color(colors::BACKGROUND);

    // The widget issues its draw calls through the adapter
    let mut surface = NannouSurface::new(&draw, model.area);
    model.clock.render(&mut surface);

    draw_legend(&draw, model.area);

    if let Some(text) = &model.hover {
        draw_readout(&draw, text, model.pinned, app.window_rect());
    }

    if let Some(message) = &model.error_message {
        draw_error_banner(&draw, message, app.window_rect());
    }

    // Render to frame
    draw.to_frame(app, &frame).unwrap();

    // Render egui on top
    model.egui.draw_to_frame(&frame).unwrap();
}

fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    match key {
        // Escape closes the picker, then unpins the readout
        Key::Escape => {
            if model.picker_state.is_open {
                model.picker_state.close();
            } else if model.pinned {
                model.pinned = false;
            }
        }
        // T opens the timezone picker
        Key::T => {
            if !model.picker_state.is_open {
                model.picker_state.open();
            }
        }
        // H toggles the 12/24-hour face
        Key::H => {
            if !model.picker_state.is_open {
                model.settings.is24 = !model.settings.is24;
                rebuild_clock(model, model.area, Utc::now());
                save_settings(&model.settings);
            }
        }
        // S toggles the second hand
        Key::S => {
            if !model.picker_state.is_open {
                model.settings.show_second_hand = !model.settings.show_second_hand;
                rebuild_clock(model, model.area, Utc::now());
                save_settings(&model.settings);
            }
        }
        _ => {}
    }
}

fn mouse_pressed(app: &App, model: &mut Model, button: MouseButton) {
    if button != MouseButton::Left || model.picker_state.is_open {
        return;
    }
    let pos = app.mouse.position();
    // Ignore clicks under the control panel
    if pos.x > app.window_rect().right() - PANEL_WIDTH {
        return;
    }
    if model.pinned {
        model.pinned = false;
        return;
    }
    if let Some(text) = hover_text(model, pos) {
        model.hover = Some(text);
        model.pinned = true;
    }
}

fn mouse_moved(_app: &App, model: &mut Model, pos: Point2) {
    model.mouse = Some(pos);
}

fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    // Let egui handle raw events for keyboard and mouse input
    model.egui.handle_raw_event(event);
}

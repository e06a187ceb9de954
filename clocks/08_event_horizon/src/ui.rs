//! UI module for the Event Horizon Clock
//!
//! Provides the control sidebar: display options, theme choice, timezone
//! picker, and the event composer, using egui.

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use nannou_egui::egui;
use shared::{search_timezones, ClockZone, Event};

use crate::{Settings, Theme};

/// State for the timezone picker
#[derive(Default)]
pub struct PickerState {
    /// Whether the picker is currently open
    pub is_open: bool,
    /// Current search query
    pub search_query: String,
    /// Cached search results
    pub search_results: Vec<Tz>,
    /// Whether the search field should be focused
    pub should_focus_search: bool,
}

impl PickerState {
    pub fn open(&mut self) {
        self.is_open = true;
        self.search_query.clear();
        self.search_results = search_timezones("");
        self.should_focus_search = true;
    }

    pub fn close(&mut self) {
        self.is_open = false;
        self.search_query.clear();
        self.search_results.clear();
    }

    pub fn update_search(&mut self) {
        self.search_results = search_timezones(&self.search_query);
    }
}

/// State for the event composer form
pub struct ComposerState {
    /// Minutes before now the event started
    pub started_mins_ago: i32,
    /// Whether the event has no end
    pub open_ended: bool,
    /// Event length in minutes (ignored when open-ended)
    pub duration_mins: i32,
    /// Content label
    pub label: String,
}

impl Default for ComposerState {
    fn default() -> Self {
        Self {
            started_mins_ago: 30,
            open_ended: false,
            duration_mins: 45,
            label: String::new(),
        }
    }
}

impl ComposerState {
    /// Build the event the form currently describes.
    fn compose(&self, now: DateTime<Utc>) -> Event {
        let start = now - Duration::minutes(i64::from(self.started_mins_ago));
        let content = if self.label.is_empty() {
            "untitled".to_string()
        } else {
            self.label.clone()
        };
        if self.open_ended {
            Event::new(start, content)
        } else {
            let end = start + Duration::minutes(i64::from(self.duration_mins));
            Event::closed(start, end, content)
        }
    }
}

/// Result of sidebar interactions
#[derive(Default)]
pub struct PanelResult {
    /// Settings were edited and the clock needs rebuilding
    pub settings_changed: bool,
    /// An event to add to the clock
    pub add_event: Option<Event>,
}

/// Draw the control sidebar.
pub fn draw_control_panel(
    ctx: &egui::Context,
    picker_state: &mut PickerState,
    composer: &mut ComposerState,
    settings: &mut Settings,
    zone: ClockZone,
    events: &[Event],
    now: DateTime<Utc>,
) -> PanelResult {
    let mut result = PanelResult::default();

    egui::SidePanel::right("controls")
        .resizable(false)
        .min_width(280.0)
        .show(ctx, |ui| {
            ui.add_space(10.0);
            ui.heading("Event Horizon");
            ui.add_space(10.0);

            // Display options
            ui.group(|ui| {
                ui.label(egui::RichText::new("Display").size(14.0).strong());
                ui.add_space(5.0);

                if ui.checkbox(&mut settings.is24, "24-hour face").changed() {
                    result.settings_changed = true;
                }
                if ui.checkbox(&mut settings.show_hour_hand, "Hour hand").changed() {
                    result.settings_changed = true;
                }
                if ui.checkbox(&mut settings.show_minute_hand, "Minute hand").changed() {
                    result.settings_changed = true;
                }
                if ui.checkbox(&mut settings.show_second_hand, "Second hand").changed() {
                    result.settings_changed = true;
                }
                if ui.checkbox(&mut settings.show_minute_ticks, "Minute ticks").changed() {
                    result.settings_changed = true;
                }
                if ui.checkbox(&mut settings.show_hour_ticks, "Hour ticks").changed() {
                    result.settings_changed = true;
                }
                if ui.checkbox(&mut settings.shadow, "Drop shadow").changed() {
                    result.settings_changed = true;
                }

                ui.add_space(5.0);
                ui.horizontal(|ui| {
                    ui.label("Theme:");
                    for theme in Theme::all() {
                        let selected = settings.theme == *theme;
                        let text = if selected {
                            egui::RichText::new(format!("[{}]", theme.label())).strong()
                        } else {
                            egui::RichText::new(theme.label())
                        };
                        if ui.button(text).clicked() && !selected {
                            settings.theme = *theme;
                            result.settings_changed = true;
                        }
                    }
                });
            });

            ui.add_space(10.0);

            // Timezone
            ui.group(|ui| {
                ui.label(egui::RichText::new("Timezone").size(14.0).strong());
                ui.add_space(5.0);
                ui.label(
                    egui::RichText::new(zone.name())
                        .size(13.0)
                        .color(egui::Color32::LIGHT_GRAY),
                );
                ui.add_space(5.0);
                if ui.button("Change Zone (T)").clicked() {
                    picker_state.open();
                }
            });

            ui.add_space(10.0);

            // Event composer
            ui.group(|ui| {
                ui.label(egui::RichText::new("Add Event").size(14.0).strong());
                ui.add_space(5.0);

                ui.horizontal(|ui| {
                    ui.label("Started");
                    ui.add(
                        egui::DragValue::new(&mut composer.started_mins_ago)
                            .clamp_range(0..=24 * 60)
                            .suffix(" min ago"),
                    );
                });
                ui.checkbox(&mut composer.open_ended, "Open-ended (still running)");
                if !composer.open_ended {
                    ui.horizontal(|ui| {
                        ui.label("Length");
                        ui.add(
                            egui::DragValue::new(&mut composer.duration_mins)
                                .clamp_range(1..=24 * 60)
                                .suffix(" min"),
                        );
                    });
                }
                ui.horizontal(|ui| {
                    ui.label("Label");
                    ui.text_edit_singleline(&mut composer.label);
                });

                ui.add_space(5.0);
                if ui.button("Add to face").clicked() {
                    result.add_event = Some(composer.compose(now));
                    composer.label.clear();
                }
            });

            ui.add_space(10.0);

            // Current events
            ui.group(|ui| {
                ui.label(egui::RichText::new("On the face").size(14.0).strong());
                ui.add_space(5.0);

                if events.is_empty() {
                    ui.label(
                        egui::RichText::new("no events")
                            .size(11.0)
                            .color(egui::Color32::DARK_GRAY),
                    );
                } else {
                    egui::ScrollArea::vertical()
                        .max_height(140.0)
                        .show(ui, |ui| {
                            for event in events {
                                ui.label(
                                    egui::RichText::new(format_event(event, zone))
                                        .size(11.0)
                                        .monospace(),
                                );
                            }
                        });
                }
                ui.add_space(3.0);
                ui.label(
                    egui::RichText::new("events leave the face on window rollover")
                        .size(10.0)
                        .color(egui::Color32::DARK_GRAY),
                );
            });

            ui.add_space(10.0);

            // Keyboard shortcuts help
            ui.group(|ui| {
                ui.label(egui::RichText::new("Shortcuts").size(14.0).strong());
                ui.add_space(5.0);

                let shortcuts = [
                    ("T", "Open timezone picker"),
                    ("H", "Toggle 12/24-hour face"),
                    ("S", "Toggle second hand"),
                    ("Esc", "Close picker / unpin readout"),
                ];

                for (key, desc) in shortcuts {
                    ui.horizontal(|ui| {
                        ui.label(
                            egui::RichText::new(format!("{:>4}", key))
                                .size(10.0)
                                .monospace(),
                        );
                        ui.label(
                            egui::RichText::new(desc)
                                .size(10.0)
                                .color(egui::Color32::GRAY),
                        );
                    });
                }
            });
        });

    // Draw picker overlay if open
    if picker_state.is_open {
        let picker_result = draw_timezone_picker(ctx, picker_state);

        if let Some(id) = picker_result.select_zone {
            settings.timezone_id = id;
            result.settings_changed = true;
            picker_state.close();
        }
        if picker_result.close {
            picker_state.close();
        }
    }

    result
}

/// Result of timezone picker interactions
#[derive(Default)]
struct PickerResult {
    /// `Some(None)` selects the system zone, `Some(Some(id))` a named one
    select_zone: Option<Option<String>>,
    close: bool,
}

/// Draw the timezone picker overlay
fn draw_timezone_picker(ctx: &egui::Context, picker_state: &mut PickerState) -> PickerResult {
    let mut result = PickerResult::default();

    egui::Window::new("Select Timezone")
        .collapsible(false)
        .resizable(true)
        .default_width(380.0)
        .default_height(460.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Search:");
                let search_response = ui.text_edit_singleline(&mut picker_state.search_query);

                if picker_state.should_focus_search {
                    search_response.request_focus();
                    picker_state.should_focus_search = false;
                }

                if search_response.changed() {
                    picker_state.update_search();
                }
            });

            ui.separator();

            if ui.button("Use System Timezone").clicked() {
                result.select_zone = Some(None);
            }

            ui.separator();

            ui.label(
                egui::RichText::new(format!("{} results", picker_state.search_results.len()))
                    .size(11.0)
                    .color(egui::Color32::GRAY),
            );

            egui::ScrollArea::vertical()
                .max_height(300.0)
                .show(ui, |ui| {
                    for &tz in picker_state.search_results.iter().take(100) {
                        if ui.button(format_zone_name(tz)).clicked() {
                            result.select_zone = Some(Some(tz.name().to_string()));
                        }
                    }
                });

            ui.separator();

            if ui.button("Close (Esc)").clicked() {
                result.close = true;
            }
        });

    result
}

/// Format timezone name for display
fn format_zone_name(tz: Tz) -> String {
    let name = tz.name();
    // Extract city name from "Continent/City" format
    if let Some(idx) = name.rfind('/') {
        name[idx + 1..].replace('_', " ")
    } else {
        name.to_string()
    }
}

/// Format an event as "HH:MM-HH:MM label" in the clock's zone.
fn format_event(event: &Event, zone: ClockZone) -> String {
    let start = zone.civil(event.start);
    let end = match event.end {
        Some(end) => {
            let c = zone.civil(end);
            format!("{:02}:{:02}", c.hour, c.minute)
        }
        None => "..".to_string(),
    };
    format!(
        "{:02}:{:02}-{:5} {}",
        start.hour, start.minute, end, event.content
    )
}

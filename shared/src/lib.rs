//! Core engine for the event horizon clock
//!
//! Everything reusable about the widget lives here: the turn/angle math, the
//! displayed time window, the event store, the event-to-wedge projector, face
//! geometry and hit testing, style resolution, the repaint sequence behind the
//! `DrawSurface` seam, and settings persistence. The crate has no graphics
//! dependency; rendering backends live with the hosting application.

pub mod angle;
pub mod clock;
pub mod config;
pub mod events;
pub mod geometry;
pub mod style;
pub mod surface;
pub mod wedge;
pub mod window;
pub mod zone;

pub use angle::{polar_from, turn_at, turn_to_angle, Point};
pub use clock::{Clock, ClockError, RepaintTimer};
pub use config::{config_path, load_config, save_config, ConfigError};
pub use events::{Event, EventStore};
pub use geometry::{FaceGeometry, FacePoint, HandMetrics, MIN_SURFACE_DIM};
pub use style::{ClockOptions, EventColorFn, FaceStyle, Rgba, ShadowSpec};
pub use surface::DrawSurface;
pub use wedge::{project, split_span, Wedge, WedgeKind};
pub use window::TimeWindow;
pub use zone::{parse_timezone, search_timezones, CivilTime, ClockZone};

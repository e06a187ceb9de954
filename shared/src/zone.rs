//! Clock zone - civil wall-clock fields for the face
//!
//! The widget keeps every instant in UTC and derives the displayed hour,
//! minute, and second from a `ClockZone`: either the system's local zone or a
//! named IANA zone. The zone also maps civil wall times (the window's midnight
//! or noon anchor) back to UTC, resolving DST ambiguity.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

/// Civil wall-clock fields of an instant, as read off the face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CivilTime {
    /// Calendar date in the clock's zone
    pub date: NaiveDate,
    /// Hour of day (0-23)
    pub hour: u32,
    /// Minute (0-59)
    pub minute: u32,
    /// Second (0-59)
    pub second: u32,
}

/// The zone a clock face displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockZone {
    /// The system's local timezone
    Local,
    /// A named IANA timezone
    Named(Tz),
}

impl Default for ClockZone {
    fn default() -> Self {
        ClockZone::Local
    }
}

impl ClockZone {
    /// Read the civil fields of a UTC instant in this zone.
    pub fn civil(&self, instant: DateTime<Utc>) -> CivilTime {
        match self {
            ClockZone::Local => civil_of(instant.with_timezone(&Local)),
            ClockZone::Named(tz) => civil_of(instant.with_timezone(tz)),
        }
    }

    /// Map a civil wall time in this zone back to a UTC instant.
    ///
    /// On a DST fall-back the wall time is ambiguous; the earlier mapping
    /// wins. On a spring-forward gap the wall time does not exist and the
    /// resolution probes forward in half-hour steps until it does.
    pub fn wall_to_utc(&self, wall: NaiveDateTime) -> DateTime<Utc> {
        match self {
            ClockZone::Local => resolve_wall(&Local, wall),
            ClockZone::Named(tz) => resolve_wall(tz, wall),
        }
    }

    /// Display name of the zone.
    pub fn name(&self) -> &'static str {
        match self {
            ClockZone::Local => "Local",
            ClockZone::Named(tz) => tz.name(),
        }
    }
}

fn civil_of<T: TimeZone>(local: DateTime<T>) -> CivilTime {
    CivilTime {
        date: local.date_naive(),
        hour: local.hour(),
        minute: local.minute(),
        second: local.second(),
    }
}

fn resolve_wall<T: TimeZone>(tz: &T, wall: NaiveDateTime) -> DateTime<Utc> {
    let mut candidate = wall;
    // Four probes cover every real-world gap width (gaps top out at 2h)
    for _ in 0..4 {
        if let Some(resolved) = tz.from_local_datetime(&candidate).earliest() {
            return resolved.with_timezone(&Utc);
        }
        candidate = candidate + Duration::minutes(30);
    }
    Utc.from_utc_datetime(&wall)
}

/// Parse a timezone string into a Tz.
pub fn parse_timezone(tz_str: &str) -> Result<Tz, String> {
    tz_str
        .parse::<Tz>()
        .map_err(|_| format!("Invalid timezone: {}", tz_str))
}

/// Search timezones by name (case-insensitive partial match).
pub fn search_timezones(query: &str) -> Vec<Tz> {
    let query_lower = query.to_lowercase();
    chrono_tz::TZ_VARIANTS
        .iter()
        .filter(|tz| tz.name().to_lowercase().contains(&query_lower))
        .copied()
        .collect()
}

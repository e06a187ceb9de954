//! Time window - the half-day or full-day span the face currently shows
//!
//! A 24-hour face shows the span from the most recent civil midnight; a
//! 12-hour face shows the span from the most recent midnight (AM) or noon
//! (PM). The window is recomputed only when a sample crosses a boundary, not
//! on every repaint.

use chrono::{DateTime, Duration, Utc};

use crate::zone::{CivilTime, ClockZone};

/// The displayable period of a clock face.
#[derive(Debug, Clone)]
pub struct TimeWindow {
    zone: ClockZone,
    /// 12 or 24
    hours: u32,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    last: DateTime<Utc>,
    /// Civil fields of `last`, kept for rollover detection
    last_civil: CivilTime,
}

impl TimeWindow {
    /// Build a window around `now`, performing the first sample.
    pub fn new(zone: ClockZone, is24: bool, now: DateTime<Utc>) -> Self {
        let hours = if is24 { 24 } else { 12 };
        let civil = zone.civil(now);
        let (start, end) = compute_bounds(&zone, hours, &civil);
        Self {
            zone,
            hours,
            start,
            end,
            last: now,
            last_civil: civil,
        }
    }

    /// Record a new observation, recomputing the bounds when the displayed
    /// period has rolled over. Returns whether a rollover happened.
    ///
    /// A rollover is a calendar date change, the 12-hour face crossing from
    /// the AM half into the PM half (11:59 -> 12:00), or `now` landing outside
    /// the current bounds entirely (a suspended process waking up).
    pub fn sample(&mut self, now: DateTime<Utc>) -> bool {
        let civil = self.zone.civil(now);
        let crossed_noon =
            self.hours == 12 && self.last_civil.hour < 12 && civil.hour >= 12;
        let rolled = civil.date != self.last_civil.date
            || crossed_noon
            || now < self.start
            || now >= self.end;
        if rolled {
            let (start, end) = compute_bounds(&self.zone, self.hours, &civil);
            self.start = start;
            self.end = end;
        }
        self.last = now;
        self.last_civil = civil;
        rolled
    }

    /// First instant shown on the face.
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// First instant past the face.
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// The most recently sampled instant.
    pub fn last_observed(&self) -> DateTime<Utc> {
        self.last
    }

    /// Hours in the displayed period (12 or 24).
    pub fn hours_in_period(&self) -> u32 {
        self.hours
    }

    /// Length of the displayed period in seconds.
    pub fn period_seconds(&self) -> i64 {
        i64::from(self.hours) * 3600
    }

    /// Rotation of the hour hand for `instant`, as a turn in [0, 1).
    ///
    /// Derived from civil fields rather than elapsed time so a DST shift
    /// inside the window cannot skew the hands.
    pub fn hour_turn(&self, instant: DateTime<Utc>) -> f64 {
        let c = self.zone.civil(instant);
        let seconds = c.second + 60 * (c.minute + 60 * (c.hour % self.hours));
        f64::from(seconds) / self.period_seconds() as f64
    }

    /// Rotation of the minute hand for `instant`, as a turn in [0, 1).
    pub fn minute_turn(&self, instant: DateTime<Utc>) -> f64 {
        let c = self.zone.civil(instant);
        f64::from(c.second + 60 * c.minute) / 3600.0
    }

    /// Rotation of the second hand for `instant`, as a turn in [0, 1).
    pub fn second_turn(&self, instant: DateTime<Utc>) -> f64 {
        let c = self.zone.civil(instant);
        f64::from(c.second) / 60.0
    }

    /// The instant a face turn points at: `start + turn * period`.
    pub fn instant_at_turn(&self, turn: f64) -> DateTime<Utc> {
        let millis = (turn * self.period_seconds() as f64 * 1000.0).round() as i64;
        self.start + Duration::milliseconds(millis)
    }
}

fn compute_bounds(
    zone: &ClockZone,
    hours: u32,
    civil: &CivilTime,
) -> (DateTime<Utc>, DateTime<Utc>) {
    let anchor_hour = if hours == 24 || civil.hour < 12 { 0 } else { 12 };
    // Statically valid wall time: hour is 0 or 12 on a real date
    let wall = civil.date.and_hms_opt(anchor_hour, 0, 0).unwrap();
    let start = zone.wall_to_utc(wall);
    (start, start + Duration::hours(i64::from(hours)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn zone() -> ClockZone {
        ClockZone::Named(chrono_tz::UTC)
    }

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_window_anchors_24h() {
        let w = TimeWindow::new(zone(), true, utc(2024, 1, 1, 15, 30, 0));
        assert_eq!(w.start(), utc(2024, 1, 1, 0, 0, 0));
        assert_eq!(w.end(), utc(2024, 1, 2, 0, 0, 0));
    }

    #[test]
    fn test_window_anchors_12h() {
        let am = TimeWindow::new(zone(), false, utc(2024, 1, 1, 9, 0, 0));
        assert_eq!(am.start(), utc(2024, 1, 1, 0, 0, 0));
        assert_eq!(am.end(), utc(2024, 1, 1, 12, 0, 0));

        let pm = TimeWindow::new(zone(), false, utc(2024, 1, 1, 15, 0, 0));
        assert_eq!(pm.start(), utc(2024, 1, 1, 12, 0, 0));
        assert_eq!(pm.end(), utc(2024, 1, 2, 0, 0, 0));
    }

    #[test]
    fn test_sample_keeps_window_within_period() {
        let mut w = TimeWindow::new(zone(), false, utc(2024, 1, 1, 9, 0, 0));
        let rolled = w.sample(utc(2024, 1, 1, 11, 59, 59));
        assert!(!rolled);
        assert_eq!(w.start(), utc(2024, 1, 1, 0, 0, 0));
        assert_eq!(w.last_observed(), utc(2024, 1, 1, 11, 59, 59));
    }

    #[test]
    fn test_sample_rolls_over_noon_in_12h_mode() {
        let mut w = TimeWindow::new(zone(), false, utc(2024, 1, 1, 11, 59, 59));
        let rolled = w.sample(utc(2024, 1, 1, 12, 0, 0));
        assert!(rolled);
        assert_eq!(w.start(), utc(2024, 1, 1, 12, 0, 0));
        assert_eq!(w.end(), utc(2024, 1, 2, 0, 0, 0));
    }

    #[test]
    fn test_sample_rolls_over_midnight() {
        let mut w = TimeWindow::new(zone(), true, utc(2024, 1, 1, 23, 59, 59));
        let rolled = w.sample(utc(2024, 1, 2, 0, 0, 0));
        assert!(rolled);
        assert_eq!(w.start(), utc(2024, 1, 2, 0, 0, 0));
    }

    #[test]
    fn test_sample_recovers_after_long_gap() {
        // a 12h window sampled hours past its end (suspend/resume)
        let mut w = TimeWindow::new(zone(), false, utc(2024, 1, 1, 9, 0, 0));
        let rolled = w.sample(utc(2024, 1, 1, 14, 30, 0));
        assert!(rolled);
        assert_eq!(w.start(), utc(2024, 1, 1, 12, 0, 0));
    }

    #[test]
    fn test_turns_at_period_start_are_zero() {
        let w = TimeWindow::new(zone(), true, utc(2024, 1, 1, 0, 0, 0));
        assert_eq!(w.hour_turn(utc(2024, 1, 1, 0, 0, 0)), 0.0);
        assert_eq!(w.minute_turn(utc(2024, 1, 1, 0, 0, 0)), 0.0);
        assert_eq!(w.second_turn(utc(2024, 1, 1, 0, 0, 0)), 0.0);
    }

    #[test]
    fn test_hour_turn_12h_wraps_at_noon() {
        let w = TimeWindow::new(zone(), false, utc(2024, 1, 1, 13, 0, 0));
        // 13:00 reads as one hour into the half-day
        assert!((w.hour_turn(utc(2024, 1, 1, 13, 0, 0)) - 1.0 / 12.0).abs() < 1e-12);
        // noon itself is the top of the face
        assert_eq!(w.hour_turn(utc(2024, 1, 1, 12, 0, 0)), 0.0);
    }

    #[test]
    fn test_turns_monotonic_within_period() {
        let w = TimeWindow::new(zone(), true, utc(2024, 1, 1, 0, 0, 0));
        let mut prev = -1.0;
        for h in 0..24 {
            let turn = w.hour_turn(utc(2024, 1, 1, h, 30, 0));
            assert!(turn > prev);
            prev = turn;
        }
    }

    #[test]
    fn test_minute_and_second_turns() {
        let w = TimeWindow::new(zone(), true, utc(2024, 1, 1, 0, 0, 0));
        let t = utc(2024, 1, 1, 5, 15, 30);
        assert!((w.minute_turn(t) - (30.0 + 60.0 * 15.0) / 3600.0).abs() < 1e-12);
        assert!((w.second_turn(t) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_instant_at_turn_inverts_position() {
        let w = TimeWindow::new(zone(), true, utc(2024, 1, 1, 15, 0, 0));
        assert_eq!(w.instant_at_turn(0.0), utc(2024, 1, 1, 0, 0, 0));
        assert_eq!(w.instant_at_turn(0.5), utc(2024, 1, 1, 12, 0, 0));
        assert_eq!(w.instant_at_turn(1.0), utc(2024, 1, 2, 0, 0, 0));
    }

    #[test]
    fn test_window_in_named_zone() {
        let ny = ClockZone::Named("America/New_York".parse().unwrap());
        // 2024-06-15 18:00 UTC is 14:00 EDT; the 24h window starts at the
        // local midnight, 04:00 UTC
        let w = TimeWindow::new(ny, true, utc(2024, 6, 15, 18, 0, 0));
        assert_eq!(w.start(), utc(2024, 6, 15, 4, 0, 0));
    }
}

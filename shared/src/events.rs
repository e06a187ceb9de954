//! Event store - chronologically ordered time intervals shown on the face
//!
//! Events are plain values: a start instant, an optional end instant, and an
//! opaque content label. The store is the sole owner of the collection; it
//! grows through `add` and shrinks only by evicting events that have scrolled
//! out of the displayable window.

use chrono::{DateTime, Utc};

/// A time interval to display as a wedge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// When the event begins
    pub start: DateTime<Utc>,
    /// When the event ends; `None` marks an ongoing, open-ended event
    pub end: Option<DateTime<Utc>>,
    /// Opaque payload shown by the host (label, id, ...)
    pub content: String,
}

impl Event {
    /// An open-ended event: started, no known end.
    pub fn new(start: DateTime<Utc>, content: impl Into<String>) -> Self {
        Self {
            start,
            end: None,
            content: content.into(),
        }
    }

    /// A closed event covering `[start, end)`. `end >= start` is the caller's
    /// responsibility.
    pub fn closed(start: DateTime<Utc>, end: DateTime<Utc>, content: impl Into<String>) -> Self {
        Self {
            start,
            end: Some(end),
            content: content.into(),
        }
    }

    /// Whether the event has no defined end.
    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }

    /// Whether the event ended strictly before `cutoff`. Open-ended events
    /// never qualify.
    pub fn ends_before(&self, cutoff: DateTime<Utc>) -> bool {
        match self.end {
            Some(end) => end < cutoff,
            None => false,
        }
    }
}

/// Ordered collection of events, ascending by start.
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a batch of events, keeping the store sorted.
    ///
    /// Ties on `start` put closed events before open-ended ones; the sort is
    /// stable, so fully equal keys keep insertion order.
    pub fn add(&mut self, batch: impl IntoIterator<Item = Event>) {
        self.events.extend(batch);
        self.events.sort_by_key(|e| (e.start, e.is_open()));
    }

    /// Drop the leading run of events that ended strictly before `cutoff`.
    ///
    /// The scan stops at the first event that does not qualify, so an
    /// open-ended event shields everything after it. Returns the number of
    /// events removed.
    pub fn evict_before(&mut self, cutoff: DateTime<Utc>) -> usize {
        let keep_from = self
            .events
            .iter()
            .position(|e| !e.ends_before(cutoff))
            .unwrap_or(self.events.len());
        self.events.drain(..keep_from).count()
    }

    /// The event active at `instant`, if any: the first event (in start
    /// order) that has begun by `instant` and has not ended by it.
    pub fn lookup(&self, instant: DateTime<Utc>) -> Option<&Event> {
        for event in &self.events {
            if event.start > instant {
                return None;
            }
            match event.end {
                None => return Some(event),
                Some(end) if end > instant => return Some(event),
                Some(_) => {}
            }
        }
        None
    }

    /// Events in ascending start order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, h, m, 0).unwrap()
    }

    #[test]
    fn test_add_keeps_ascending_start_order() {
        let mut store = EventStore::new();
        store.add([
            Event::closed(at(9, 0), at(10, 0), "b"),
            Event::closed(at(7, 0), at(8, 0), "a"),
            Event::closed(at(11, 0), at(12, 0), "c"),
        ]);
        let starts: Vec<_> = store.events().iter().map(|e| e.start).collect();
        assert_eq!(starts, vec![at(7, 0), at(9, 0), at(11, 0)]);
    }

    #[test]
    fn test_add_sorts_open_ended_after_closed_on_tie() {
        let mut store = EventStore::new();
        store.add([
            Event::new(at(9, 0), "open"),
            Event::closed(at(9, 0), at(10, 0), "closed"),
        ]);
        assert_eq!(store.events()[0].content, "closed");
        assert_eq!(store.events()[1].content, "open");
    }

    #[test]
    fn test_add_is_stable_for_equal_keys() {
        let mut store = EventStore::new();
        store.add([
            Event::closed(at(9, 0), at(10, 0), "first"),
            Event::closed(at(9, 0), at(9, 30), "second"),
        ]);
        assert_eq!(store.events()[0].content, "first");
        assert_eq!(store.events()[1].content, "second");
    }

    #[test]
    fn test_evict_before_drops_expired_prefix() {
        let mut store = EventStore::new();
        store.add([
            Event::closed(at(1, 0), at(2, 0), "gone"),
            Event::closed(at(3, 0), at(4, 0), "gone too"),
            Event::closed(at(5, 0), at(13, 0), "straddles"),
        ]);
        let removed = store.evict_before(at(12, 0));
        assert_eq!(removed, 2);
        assert_eq!(store.len(), 1);
        assert_eq!(store.events()[0].content, "straddles");
    }

    #[test]
    fn test_evict_before_never_removes_open_ended() {
        let mut store = EventStore::new();
        store.add([
            Event::new(at(1, 0), "open"),
            Event::closed(at(2, 0), at(3, 0), "shielded"),
        ]);
        // the open event leads and blocks the prefix scan
        assert_eq!(store.evict_before(at(12, 0)), 0);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_evict_before_keeps_events_ending_at_cutoff() {
        let mut store = EventStore::new();
        store.add([Event::closed(at(1, 0), at(12, 0), "boundary")]);
        assert_eq!(store.evict_before(at(12, 0)), 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_lookup_finds_active_event() {
        let mut store = EventStore::new();
        store.add([
            Event::closed(at(7, 0), at(8, 0), "past"),
            Event::closed(at(9, 0), at(11, 0), "active"),
            Event::closed(at(12, 0), at(13, 0), "future"),
        ]);
        assert_eq!(store.lookup(at(10, 0)).map(|e| e.content.as_str()), Some("active"));
        // end is exclusive
        assert!(store.lookup(at(11, 0)).is_none());
        // before anything started
        assert!(store.lookup(at(6, 0)).is_none());
    }

    #[test]
    fn test_lookup_treats_open_ended_as_still_active() {
        let mut store = EventStore::new();
        store.add([Event::new(at(9, 0), "open")]);
        assert!(store.lookup(at(23, 59)).is_some());
        assert!(store.lookup(at(8, 59)).is_none());
    }
}

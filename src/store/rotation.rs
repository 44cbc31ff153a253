//! Slot rotation: displacement of overflow from the recent window into the
//! per-day coalesced history window.
//!
//! The rotation algorithm is a pure function over [`PlayerSlots`] so it is
//! independent of the storage medium. Capacity is enforced by rotation, not
//! rejection: appending always succeeds.

use serde::Deserialize;

use super::record::{PlayerSlots, SaveRecord};

/// Capacity bounds for the two per-player windows.
///
/// The recent window keeps a small hot set of the latest saves for fast
/// continue access. The history window retains at most one archived save per
/// UTC calendar day, FIFO-evicted once it reaches its own bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RetentionPolicy {
    /// Maximum number of saves in the recent window.
    pub recent_capacity: usize,

    /// Maximum number of archived saves in the history window.
    pub history_capacity: usize,
}

impl RetentionPolicy {
    /// Default recent window capacity.
    pub const DEFAULT_RECENT_CAPACITY: usize = 5;

    /// Default history window capacity.
    pub const DEFAULT_HISTORY_CAPACITY: usize = 30;

    /// Clamp both capacities to at least one slot.
    ///
    /// A zero-capacity window cannot hold the save being appended, so
    /// degenerate configurations are rounded up rather than rejected.
    pub fn clamped(self) -> Self {
        Self {
            recent_capacity: self.recent_capacity.max(1),
            history_capacity: self.history_capacity.max(1),
        }
    }
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            recent_capacity: Self::DEFAULT_RECENT_CAPACITY,
            history_capacity: Self::DEFAULT_HISTORY_CAPACITY,
        }
    }
}

/// Append `record` to the recent window, rotating overflow into history.
///
/// When the recent window is below capacity the record is appended and
/// history is untouched. When it is full, the oldest recent entry is
/// displaced into history first:
///
/// - If history already holds an entry for the displaced entry's UTC
///   calendar day, that entry is replaced in place (the later save becomes
///   the day's representative).
/// - Otherwise the displaced entry is appended; if history then exceeds its
///   bound, the oldest history entry is evicted.
///
/// After rotation `recent.len() <= recent_capacity` and history holds at
/// most one entry per calendar day.
pub fn rotate_in(slots: &mut PlayerSlots, record: SaveRecord, policy: &RetentionPolicy) {
    let policy = policy.clamped();

    while slots.recent.len() >= policy.recent_capacity && !slots.recent.is_empty() {
        let displaced = slots.recent.remove(0);
        archive(&mut slots.history, displaced, policy.history_capacity);
    }

    slots.recent.push(record);
}

/// Place a displaced record into the history window, coalescing by day.
fn archive(history: &mut Vec<SaveRecord>, displaced: SaveRecord, capacity: usize) {
    let day = displaced.utc_day();
    let same_day = day.and_then(|d| history.iter().position(|h| h.utc_day() == Some(d)));

    match same_day {
        Some(index) => {
            if let Some(slot) = history.get_mut(index) {
                *slot = displaced;
            }
        }
        None => {
            history.push(displaced);
            while history.len() > capacity {
                history.remove(0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(day: u32, hour: u32) -> SaveRecord {
        SaveRecord {
            player_id: "p1".into(),
            ident: String::new(),
            device_description: "Test Device".into(),
            time_stamp: format!("2026-08-{:02}T{:02}:00:00Z", day, hour),
            save_data: serde_json::json!({"day": day, "hour": hour}),
        }
    }

    fn days(records: &[SaveRecord]) -> Vec<String> {
        records.iter().map(|r| r.time_stamp.clone()).collect()
    }

    #[test]
    fn test_append_below_capacity_never_touches_history() {
        let policy = RetentionPolicy::default();
        let mut slots = PlayerSlots::default();

        for day in 1..=5 {
            rotate_in(&mut slots, record(day, 12), &policy);
            assert!(slots.history.is_empty());
        }
        assert_eq!(slots.recent.len(), 5);
    }

    #[test]
    fn test_sixth_record_displaces_first_into_history() {
        let policy = RetentionPolicy::default();
        let mut slots = PlayerSlots::default();

        for day in 1..=6 {
            rotate_in(&mut slots, record(day, 12), &policy);
        }

        // recent now holds days 2..=6 in chronological order
        assert_eq!(
            days(&slots.recent),
            (2..=6)
                .map(|d| format!("2026-08-{:02}T12:00:00Z", d))
                .collect::<Vec<_>>()
        );
        // history holds the displaced day 1 save
        assert_eq!(days(&slots.history), vec!["2026-08-01T12:00:00Z"]);
    }

    #[test]
    fn test_recent_is_bounded_after_every_append() {
        let policy = RetentionPolicy::default();
        let mut slots = PlayerSlots::default();

        for day in 1..=20 {
            rotate_in(&mut slots, record(day, 12), &policy);
            assert!(slots.recent.len() <= policy.recent_capacity);
        }
    }

    #[test]
    fn test_same_day_displacements_coalesce_later_wins() {
        let policy = RetentionPolicy::default();
        let mut slots = PlayerSlots::default();

        // Two saves on day 1 at different hours, then enough later saves to
        // displace them both into history.
        rotate_in(&mut slots, record(1, 8), &policy);
        rotate_in(&mut slots, record(1, 20), &policy);
        for day in 2..=6 {
            rotate_in(&mut slots, record(day, 12), &policy);
        }

        let day_one: Vec<_> = slots
            .history
            .iter()
            .filter(|r| r.time_stamp.starts_with("2026-08-01"))
            .collect();
        assert_eq!(day_one.len(), 1, "one history entry per calendar day");
        assert_eq!(day_one[0].time_stamp, "2026-08-01T20:00:00Z");
    }

    #[test]
    fn test_history_evicts_oldest_when_full() {
        let policy = RetentionPolicy {
            recent_capacity: 1,
            history_capacity: 3,
        };
        let mut slots = PlayerSlots::default();

        // Each append displaces the previous day into history.
        for day in 1..=5 {
            rotate_in(&mut slots, record(day, 12), &policy);
        }

        // Days 1..=4 were displaced; with capacity 3 only days 2..=4 remain.
        assert_eq!(
            days(&slots.history),
            (2..=4)
                .map(|d| format!("2026-08-{:02}T12:00:00Z", d))
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_coalescing_does_not_grow_history() {
        let policy = RetentionPolicy {
            recent_capacity: 1,
            history_capacity: 10,
        };
        let mut slots = PlayerSlots::default();

        for hour in 1..=8 {
            rotate_in(&mut slots, record(1, hour), &policy);
        }

        // Seven displacements, all on the same day: still one entry.
        assert_eq!(slots.history.len(), 1);
        assert_eq!(days(&slots.history), vec!["2026-08-01T07:00:00Z"]);
    }

    #[test]
    fn test_unparseable_timestamps_never_coalesce() {
        let policy = RetentionPolicy {
            recent_capacity: 1,
            history_capacity: 10,
        };
        let mut slots = PlayerSlots::default();

        let mut broken = record(1, 12);
        broken.time_stamp = "not-a-date".into();
        let mut broken_too = record(1, 13);
        broken_too.time_stamp = "also-not-a-date".into();

        rotate_in(&mut slots, broken, &policy);
        rotate_in(&mut slots, broken_too, &policy);
        rotate_in(&mut slots, record(2, 12), &policy);

        // Both undated records were displaced and kept as separate entries.
        assert_eq!(slots.history.len(), 2);
    }

    #[test]
    fn test_zero_capacities_are_clamped() {
        let policy = RetentionPolicy {
            recent_capacity: 0,
            history_capacity: 0,
        };
        let mut slots = PlayerSlots::default();

        rotate_in(&mut slots, record(1, 12), &policy);
        rotate_in(&mut slots, record(2, 12), &policy);

        assert_eq!(slots.recent.len(), 1);
        assert_eq!(slots.history.len(), 1);
    }
}

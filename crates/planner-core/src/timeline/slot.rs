//! Half-open time intervals.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TimeSlotError;

/// A moment in time between two instants, as the half-open interval
/// `[start, end)`.
///
/// A slot always has a strictly positive duration; `end` is derived from
/// `start + duration` and never stored. Two slots that merely touch
/// (`a.end() == b.start()`) do not intersect.
///
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use planner_core::TimeSlot;
///
/// let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
/// let morning = TimeSlot::new(t0, Duration::hours(2)).unwrap();
/// let later = TimeSlot::between(t0 + Duration::hours(2), t0 + Duration::hours(4)).unwrap();
/// assert!(!morning.intersects(&later));
/// assert!(TimeSlot::new(t0, Duration::zero()).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTimeSlot", into = "RawTimeSlot")]
pub struct TimeSlot {
    start: DateTime<Utc>,
    duration: Duration,
}

impl TimeSlot {
    /// Create a slot from a start and a duration.
    ///
    /// # Errors
    /// Returns [`TimeSlotError::NonPositiveDuration`] if `duration <= 0`, or
    /// [`TimeSlotError::EndOutOfRange`] if `start + duration` is not a
    /// representable instant.
    pub fn new(start: DateTime<Utc>, duration: Duration) -> Result<Self, TimeSlotError> {
        if duration <= Duration::zero() {
            return Err(TimeSlotError::NonPositiveDuration {
                duration_secs: duration.num_seconds(),
            });
        }
        if start.checked_add_signed(duration).is_none() {
            return Err(TimeSlotError::EndOutOfRange {
                start,
                duration_secs: duration.num_seconds(),
            });
        }
        Ok(Self { start, duration })
    }

    /// Create a slot spanning `[start, end)`.
    ///
    /// # Errors
    /// Returns [`TimeSlotError::EndNotAfterStart`] if `end <= start`.
    pub fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, TimeSlotError> {
        if end <= start {
            return Err(TimeSlotError::EndNotAfterStart { start, end });
        }
        Ok(Self {
            start,
            duration: end - start,
        })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.start + self.duration
    }

    /// Same duration, new start.
    ///
    /// # Errors
    /// Returns [`TimeSlotError::EndOutOfRange`] if the moved slot would end
    /// past the representable range.
    pub fn starting_at(self, start: DateTime<Utc>) -> Result<Self, TimeSlotError> {
        Self::new(start, self.duration)
    }

    /// Same start, new duration.
    ///
    /// # Errors
    /// Same as [`TimeSlot::new`].
    pub fn with_duration(self, duration: Duration) -> Result<Self, TimeSlotError> {
        Self::new(self.start, duration)
    }

    /// Whether `instant` falls inside `[start, end)`.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end()
    }

    /// Common portion of two slots, if any.
    ///
    /// The result is `[max(start), min(end))` when that range is non-empty.
    /// Argument order does not matter.
    pub fn intersection(a: &TimeSlot, b: &TimeSlot) -> Option<TimeSlot> {
        let latest_start = a.start.max(b.start);
        let earliest_end = a.end().min(b.end());
        TimeSlot::between(latest_start, earliest_end).ok()
    }

    /// Common portion shared with `other`, see [`TimeSlot::intersection`].
    pub fn intersection_with(&self, other: &TimeSlot) -> Option<TimeSlot> {
        Self::intersection(self, other)
    }

    pub fn intersects(&self, other: &TimeSlot) -> bool {
        self.intersection_with(other).is_some()
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} - {})",
            self.start.format("%Y-%m-%d %H:%M:%S"),
            self.end().format("%Y-%m-%d %H:%M:%S")
        )
    }
}

/// On-disk shape: start timestamp plus duration in seconds.
#[derive(Serialize, Deserialize)]
struct RawTimeSlot {
    start: DateTime<Utc>,
    #[serde(with = "crate::duration_secs")]
    duration: Duration,
}

impl TryFrom<RawTimeSlot> for TimeSlot {
    type Error = TimeSlotError;

    fn try_from(raw: RawTimeSlot) -> Result<Self, Self::Error> {
        TimeSlot::new(raw.start, raw.duration)
    }
}

impl From<TimeSlot> for RawTimeSlot {
    fn from(slot: TimeSlot) -> Self {
        Self {
            start: slot.start,
            duration: slot.duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2001, 1, 1, 0, 0, 0).unwrap()
    }

    fn slot(start_min: i64, end_min: i64) -> TimeSlot {
        TimeSlot::between(
            t0() + Duration::minutes(start_min),
            t0() + Duration::minutes(end_min),
        )
        .unwrap()
    }

    #[test]
    fn new_keeps_start_and_duration() {
        let s = TimeSlot::new(t0(), Duration::seconds(2)).unwrap();
        assert_eq!(s.start(), t0());
        assert_eq!(s.duration(), Duration::seconds(2));
        assert_eq!(s.end(), t0() + Duration::seconds(2));
    }

    #[test]
    fn new_and_between_agree() {
        let a = TimeSlot::new(t0(), Duration::hours(2)).unwrap();
        let b = TimeSlot::between(t0(), t0() + Duration::hours(2)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn equality_is_structural() {
        let a = TimeSlot::new(t0(), Duration::seconds(2)).unwrap();
        let b = a.with_duration(Duration::seconds(3)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn rejects_non_positive_durations() {
        assert_eq!(
            TimeSlot::new(t0(), Duration::zero()),
            Err(TimeSlotError::NonPositiveDuration { duration_secs: 0 })
        );
        assert!(TimeSlot::new(t0(), Duration::seconds(-2)).is_err());
    }

    #[test]
    fn rejects_non_increasing_bounds() {
        assert!(TimeSlot::between(t0(), t0()).is_err());
        assert!(TimeSlot::between(t0() + Duration::hours(2), t0() + Duration::hours(1)).is_err());
    }

    #[test]
    fn overlapping_slots_intersect() {
        let a = slot(0, 120);
        let b = slot(60, 180);
        assert!(a.intersects(&b));
        assert_eq!(a.intersection_with(&b), Some(slot(60, 120)));
    }

    #[test]
    fn nested_slot_intersection_is_inner_slot() {
        let outer = slot(0, 120);
        let inner = slot(30, 40);
        assert_eq!(TimeSlot::intersection(&outer, &inner), Some(inner));
    }

    #[test]
    fn touching_slots_do_not_intersect() {
        let a = slot(0, 120);
        let b = slot(120, 240);
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));
        assert_eq!(TimeSlot::intersection(&a, &b), None);
    }

    #[test]
    fn disjoint_slots_do_not_intersect() {
        assert_eq!(TimeSlot::intersection(&slot(0, 60), &slot(120, 180)), None);
    }

    #[test]
    fn contains_is_half_open() {
        let s = slot(0, 10);
        assert!(s.contains(t0()));
        assert!(s.contains(t0() + Duration::minutes(9)));
        assert!(!s.contains(t0() + Duration::minutes(10)));
    }

    #[test]
    fn starting_at_preserves_duration() {
        let moved = slot(0, 10).starting_at(t0() + Duration::hours(1)).unwrap();
        assert_eq!(moved, slot(60, 70));
    }

    #[test]
    fn rejects_end_past_representable_range() {
        let late = DateTime::<Utc>::MAX_UTC - Duration::minutes(10);
        assert!(matches!(
            TimeSlot::new(late, Duration::minutes(30)),
            Err(TimeSlotError::EndOutOfRange { .. })
        ));
        let fits = TimeSlot::new(late, Duration::minutes(5)).unwrap();
        assert_eq!(fits.end(), late + Duration::minutes(5));
    }

    #[test]
    fn starting_at_rejects_out_of_range_move() {
        let late = DateTime::<Utc>::MAX_UTC - Duration::minutes(10);
        assert!(slot(0, 30).starting_at(late).is_err());
        assert!(slot(0, 5).starting_at(late).is_ok());
    }

    #[test]
    fn deserializing_huge_duration_fails() {
        let json = r#"{"start": "2024-01-01T00:00:00Z", "duration": 9e15}"#;
        assert!(serde_json::from_str::<TimeSlot>(json).is_err());
    }

    #[test]
    fn serializes_start_and_duration_seconds() {
        let json = serde_json::to_value(slot(0, 30)).unwrap();
        assert_eq!(json["duration"], serde_json::json!(1800.0));
        assert!(json.get("end").is_none());
        let back: TimeSlot = serde_json::from_value(json).unwrap();
        assert_eq!(back, slot(0, 30));
    }

    #[test]
    fn deserializing_zero_duration_fails() {
        let json = r#"{"start": "2001-01-01T00:00:00Z", "duration": 0}"#;
        assert!(serde_json::from_str::<TimeSlot>(json).is_err());
    }
}

//! Interview slot records shared by both domains

use chrono::{DateTime, Utc};
use yep_common::db::models::SlotStatus;

/// One proposed/confirmed interview time, already parsed from storage
#[derive(Debug, Clone, PartialEq)]
pub struct SlotRecord {
    pub status: SlotStatus,
    pub scheduled_at: Option<DateTime<Utc>>,
}

/// Whether any live (posted or confirmed) slot is still in the future
pub fn has_active_future_slot(slots: &[SlotRecord], now: DateTime<Utc>) -> bool {
    slots
        .iter()
        .any(|s| s.status.is_active() && s.scheduled_at.is_some_and(|t| t > now))
}

/// The slot time most relevant for display and ordering: the earliest
/// upcoming live slot if one exists, otherwise the latest slot on record.
pub fn relevant_slot_time(slots: &[SlotRecord], now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let upcoming = slots
        .iter()
        .filter(|s| s.status.is_active())
        .filter_map(|s| s.scheduled_at)
        .filter(|t| *t > now)
        .min();

    upcoming.or_else(|| slots.iter().filter_map(|s| s.scheduled_at).max())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, day, hour, 0, 0).unwrap()
    }

    fn slot(status: SlotStatus, scheduled_at: Option<DateTime<Utc>>) -> SlotRecord {
        SlotRecord {
            status,
            scheduled_at,
        }
    }

    #[test]
    fn test_active_future_slot_detection() {
        let now = at(15, 12);
        let slots = vec![
            slot(SlotStatus::Cancelled, Some(at(20, 9))),
            slot(SlotStatus::Confirmed, Some(at(18, 9))),
        ];
        assert!(has_active_future_slot(&slots, now));
    }

    #[test]
    fn test_past_confirmed_slot_is_not_active_future() {
        let now = at(15, 12);
        let slots = vec![slot(SlotStatus::Confirmed, Some(at(10, 9)))];
        assert!(!has_active_future_slot(&slots, now));
    }

    #[test]
    fn test_unscheduled_proposed_slot_is_not_active_future() {
        let now = at(15, 12);
        let slots = vec![slot(SlotStatus::Proposed, None), slot(SlotStatus::Posted, None)];
        assert!(!has_active_future_slot(&slots, now));
    }

    #[test]
    fn test_relevant_time_prefers_earliest_upcoming_live_slot() {
        let now = at(15, 12);
        let slots = vec![
            slot(SlotStatus::Posted, Some(at(25, 9))),
            slot(SlotStatus::Confirmed, Some(at(18, 9))),
            slot(SlotStatus::Cancelled, Some(at(16, 9))),
        ];
        assert_eq!(relevant_slot_time(&slots, now), Some(at(18, 9)));
    }

    #[test]
    fn test_relevant_time_falls_back_to_latest_past_slot() {
        let now = at(15, 12);
        let slots = vec![
            slot(SlotStatus::Completed, Some(at(10, 9))),
            slot(SlotStatus::Completed, Some(at(12, 9))),
        ];
        assert_eq!(relevant_slot_time(&slots, now), Some(at(12, 9)));
    }

    #[test]
    fn test_relevant_time_empty() {
        let now = at(15, 12);
        assert_eq!(relevant_slot_time(&[], now), None);
    }
}

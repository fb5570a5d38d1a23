use chrono::{NaiveTime, Timelike};

use crate::error::ScheduleError;
use crate::models::{DailySchedule, PrayerName, PrayerSlot, SLOTS_PER_DAY, validate_slots};

/// Which slot is active now and which one comes after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedDayState {
    pub current_index: usize,
    pub next_index: usize,
}

impl ResolvedDayState {
    pub fn current(&self) -> PrayerName {
        PrayerName::ALL[self.current_index]
    }

    pub fn next(&self) -> PrayerName {
        PrayerName::ALL[self.next_index]
    }
}

fn minutes_of(now: NaiveTime) -> u32 {
    now.hour() * 60 + now.minute()
}

/// Resolve the current and next prayer for `now`.
///
/// Before Fajr the previous day's Isha is still current. A slot whose minute
/// equals `now`'s minute is already current.
pub fn resolve_schedule(
    slots: &[PrayerSlot],
    now: NaiveTime,
) -> Result<ResolvedDayState, ScheduleError> {
    validate_slots(slots)?;
    Ok(resolve_validated(slots, now))
}

fn resolve_validated(slots: &[PrayerSlot], now: NaiveTime) -> ResolvedDayState {
    let now_min = minutes_of(now);
    let current_index = slots
        .iter()
        .rposition(|slot| slot.minutes_since_midnight() <= now_min)
        .unwrap_or(SLOTS_PER_DAY - 1);

    ResolvedDayState {
        current_index,
        next_index: (current_index + 1) % SLOTS_PER_DAY,
    }
}

impl DailySchedule {
    pub fn resolve(&self, now: NaiveTime) -> ResolvedDayState {
        resolve_validated(self.slots(), now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule() -> DailySchedule {
        DailySchedule::from_provider(&[
            ("Fajr", "05:57"),
            ("Sunrise", "07:37"),
            ("Dhuhr", "12:39"),
            ("Asr", "15:04"),
            ("Maghrib", "17:32"),
            ("Isha", "19:00"),
        ])
        .unwrap()
    }

    fn at(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn after_fajr_before_sunrise() {
        let state = resolve_schedule(schedule().slots(), at(6, 10, 0)).unwrap();
        assert_eq!(state.current_index, 0);
        assert_eq!(state.next_index, 1);
        assert_eq!(state.current(), PrayerName::Fajr);
        assert_eq!(state.next(), PrayerName::Sunrise);
    }

    #[test]
    fn after_isha_wraps_to_fajr() {
        let state = schedule().resolve(at(19, 30, 0));
        assert_eq!(state.current(), PrayerName::Isha);
        assert_eq!(state.next(), PrayerName::Fajr);
    }

    #[test]
    fn before_fajr_previous_isha_is_current() {
        let state = schedule().resolve(at(3, 0, 0));
        assert_eq!(state.current_index, 5);
        assert_eq!(state.next_index, 0);
    }

    #[test]
    fn exact_slot_minute_counts_as_current() {
        let state = schedule().resolve(at(12, 39, 0));
        assert_eq!(state.current(), PrayerName::Dhuhr);
        let state = schedule().resolve(at(12, 38, 59));
        assert_eq!(state.current(), PrayerName::Sunrise);
    }

    #[test]
    fn midnight_edges() {
        assert_eq!(schedule().resolve(at(0, 0, 0)).current(), PrayerName::Isha);
        assert_eq!(schedule().resolve(at(23, 59, 59)).current(), PrayerName::Isha);
    }

    #[test]
    fn invalid_slot_list_is_rejected() {
        let full = schedule();
        let slots = &full.slots()[..5];
        assert!(matches!(
            resolve_schedule(slots, at(10, 0, 0)),
            Err(ScheduleError::InvalidSchedule(_))
        ));
    }
}

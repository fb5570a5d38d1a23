use chrono::{Duration, NaiveDateTime};

use crate::error::ScheduleError;
use crate::models::PrayerSlot;

/// The wall-clock instant at which `next` begins, seen from `now`.
///
/// A slot at or before `now`'s time of day belongs to tomorrow.
pub fn target_instant(now: NaiveDateTime, next: &PrayerSlot) -> NaiveDateTime {
    let today = now.date().and_time(next.time);
    if next.time > now.time() {
        today
    } else {
        today + Duration::days(1)
    }
}

/// Time left until `next` begins. Always derived from `now`, never decremented.
pub fn remaining_time(now: NaiveDateTime, next: &PrayerSlot) -> Result<Duration, ScheduleError> {
    let target = target_instant(now, next);
    let remaining = target - now;
    if remaining < Duration::zero() {
        return Err(ScheduleError::ElapsedTarget { target, now });
    }
    Ok(remaining)
}

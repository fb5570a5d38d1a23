use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ScheduleError;

/// Number of slots in every daily schedule.
pub const SLOTS_PER_DAY: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrayerName {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl PrayerName {
    /// Canonical order within a day.
    pub const ALL: [PrayerName; SLOTS_PER_DAY] = [
        PrayerName::Fajr,
        PrayerName::Sunrise,
        PrayerName::Dhuhr,
        PrayerName::Asr,
        PrayerName::Maghrib,
        PrayerName::Isha,
    ];

    pub fn index(self) -> usize {
        match self {
            PrayerName::Fajr => 0,
            PrayerName::Sunrise => 1,
            PrayerName::Dhuhr => 2,
            PrayerName::Asr => 3,
            PrayerName::Maghrib => 4,
            PrayerName::Isha => 5,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PrayerName::Fajr => "Fajr",
            PrayerName::Sunrise => "Sunrise",
            PrayerName::Dhuhr => "Dhuhr",
            PrayerName::Asr => "Asr",
            PrayerName::Maghrib => "Maghrib",
            PrayerName::Isha => "Isha",
        }
    }

    pub fn arabic_name(&self) -> &'static str {
        match self {
            PrayerName::Fajr => "الفجر",
            PrayerName::Sunrise => "الشروق",
            PrayerName::Dhuhr => "الظهر",
            PrayerName::Asr => "العصر",
            PrayerName::Maghrib => "المغرب",
            PrayerName::Isha => "العشاء",
        }
    }
}

impl std::fmt::Display for PrayerName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for PrayerName {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fajr" => Ok(PrayerName::Fajr),
            "sunrise" | "shuruq" => Ok(PrayerName::Sunrise),
            "dhuhr" | "zuhr" | "dhuhur" => Ok(PrayerName::Dhuhr),
            "asr" => Ok(PrayerName::Asr),
            "maghrib" => Ok(PrayerName::Maghrib),
            "isha" => Ok(PrayerName::Isha),
            _ => Err(ScheduleError::invalid(format!("unknown prayer name '{}'", s))),
        }
    }
}

/// One named time-of-day for a calendar day. Seconds are always zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrayerSlot {
    pub name: PrayerName,
    pub time: NaiveTime,
}

impl PrayerSlot {
    pub fn new(name: PrayerName, time: NaiveTime) -> Self {
        let time = NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time);
        Self { name, time }
    }

    /// Parse a provider pair such as `("Maghrib", "17:32")`.
    pub fn parse(name: &str, time: &str) -> Result<Self, ScheduleError> {
        let name = PrayerName::from_str(name)?;
        let time = NaiveTime::parse_from_str(time.trim(), "%H:%M").map_err(|e| {
            ScheduleError::invalid(format!("bad time '{}' for {}: {}", time, name, e))
        })?;
        Ok(Self::new(name, time))
    }

    pub fn minutes_since_midnight(&self) -> u32 {
        self.time.hour() * 60 + self.time.minute()
    }
}

/// Check the six-slot invariants: count, canonical names, strictly increasing times.
pub fn validate_slots(slots: &[PrayerSlot]) -> Result<(), ScheduleError> {
    if slots.len() != SLOTS_PER_DAY {
        return Err(ScheduleError::invalid(format!(
            "expected {} slots, got {}",
            SLOTS_PER_DAY,
            slots.len()
        )));
    }
    for (slot, expected) in slots.iter().zip(PrayerName::ALL) {
        if slot.name != expected {
            return Err(ScheduleError::invalid(format!(
                "slot {} is {}, expected {}",
                expected.index(),
                slot.name,
                expected
            )));
        }
    }
    for pair in slots.windows(2) {
        if pair[0].time >= pair[1].time {
            return Err(ScheduleError::invalid(format!(
                "{} ({}) is not before {} ({})",
                pair[0].name,
                pair[0].time.format("%H:%M"),
                pair[1].name,
                pair[1].time.format("%H:%M")
            )));
        }
    }
    Ok(())
}

/// A validated day of prayer slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySchedule {
    slots: [PrayerSlot; SLOTS_PER_DAY],
}

impl DailySchedule {
    pub fn new(slots: Vec<PrayerSlot>) -> Result<Self, ScheduleError> {
        validate_slots(&slots)?;
        let slots: [PrayerSlot; SLOTS_PER_DAY] = slots
            .try_into()
            .map_err(|_| ScheduleError::invalid("slot count changed during validation"))?;
        Ok(Self { slots })
    }

    /// Build from `(name, "HH:MM")` pairs as delivered by a provider or cache.
    pub fn from_provider<N, T>(entries: &[(N, T)]) -> Result<Self, ScheduleError>
    where
        N: AsRef<str>,
        T: AsRef<str>,
    {
        let slots = entries
            .iter()
            .map(|(name, time)| PrayerSlot::parse(name.as_ref(), time.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(slots)
    }

    pub fn slots(&self) -> &[PrayerSlot] {
        &self.slots
    }

    pub fn slot(&self, name: PrayerName) -> &PrayerSlot {
        &self.slots[name.index()]
    }

    pub fn time_of(&self, name: PrayerName) -> NaiveTime {
        self.slot(name).time
    }
}

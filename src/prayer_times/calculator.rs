use anyhow::{Result, anyhow};
use chrono::{Duration, NaiveDate};
use rusqlite::Connection;
use salah::prelude::*;

use crate::config::SalahConfig;
use crate::db::repository::{CacheRepo, MetaRepo};
use crate::models::{DailySchedule, PrayerName, PrayerSlot, utc_offset, validate_coordinates};

const CACHE_KEY: &str = "cache_location";

pub struct PrayerCalculator {
    pub lat: f64,
    pub lng: f64,
    pub method_str: String,
    pub madhab_str: String,
    pub tz_offset_minutes: i32,
}

impl PrayerCalculator {
    pub fn new(
        lat: f64,
        lng: f64,
        method: &str,
        madhab: &str,
        tz_offset_minutes: i32,
    ) -> Result<Self> {
        // Validate everything early
        validate_coordinates(lat, lng)?;
        parse_method(method)?;
        parse_madhab(madhab)?;
        utc_offset(tz_offset_minutes)?;
        Ok(Self {
            lat,
            lng,
            method_str: method.to_string(),
            madhab_str: madhab.to_string(),
            tz_offset_minutes,
        })
    }

    pub fn from_config(salah: &SalahConfig) -> Result<Self> {
        Self::new(
            salah.latitude,
            salah.longitude,
            &salah.calc_method,
            &salah.madhab,
            salah.timezone_offset,
        )
    }

    /// Identifies the inputs a cached row was computed from.
    fn fingerprint(&self) -> String {
        format!(
            "{:.4},{:.4},{},{},{}",
            self.lat, self.lng, self.method_str, self.madhab_str, self.tz_offset_minutes
        )
    }

    pub fn schedule_for_date(&self, date: NaiveDate) -> Result<DailySchedule> {
        let coords = Coordinates::new(self.lat, self.lng);
        let method = parse_method(&self.method_str)?;
        let madhab = parse_madhab(&self.madhab_str)?;
        let params = Configuration::with(method, madhab);

        let times = PrayerSchedule::new()
            .on(date)
            .for_location(coords)
            .with_configuration(params)
            .calculate()
            .map_err(|e| anyhow!("Prayer calculation failed: {}", e))?;

        let offset = utc_offset(self.tz_offset_minutes)?;

        let slot = |name: PrayerName, prayer: Prayer| {
            PrayerSlot::new(name, times.time(prayer).with_timezone(&offset).time())
        };

        DailySchedule::new(vec![
            slot(PrayerName::Fajr, Prayer::Fajr),
            slot(PrayerName::Sunrise, Prayer::Sunrise),
            slot(PrayerName::Dhuhr, Prayer::Dhuhr),
            slot(PrayerName::Asr, Prayer::Asr),
            slot(PrayerName::Maghrib, Prayer::Maghrib),
            slot(PrayerName::Isha, Prayer::Isha),
        ])
        .map_err(|e| anyhow!("{} on {}", e, date))
    }

    /// Drop cached rows computed for a different location or method.
    pub fn invalidate_stale_cache(&self, conn: &Connection) -> Result<()> {
        let fingerprint = self.fingerprint();
        if MetaRepo::get(conn, CACHE_KEY)?.as_deref() != Some(fingerprint.as_str()) {
            log::debug!("prayer time cache is stale, clearing");
            CacheRepo::clear_all(conn)?;
            MetaRepo::set(conn, CACHE_KEY, &fingerprint)?;
        }
        Ok(())
    }

    /// Ensure prayer_times_cache has entries for today through `days_ahead` days.
    pub fn ensure_cached(&self, conn: &Connection, today: NaiveDate, days_ahead: u32) -> Result<()> {
        self.invalidate_stale_cache(conn)?;
        for i in 0..=i64::from(days_ahead) {
            self.get_cached_or_compute(conn, today + Duration::days(i))?;
        }
        Ok(())
    }

    /// Get times from cache (or compute if missing) for a specific date.
    pub fn get_cached_or_compute(&self, conn: &Connection, date: NaiveDate) -> Result<DailySchedule> {
        let date_str = date.format("%Y-%m-%d").to_string();

        if let Some(cached) = CacheRepo::get_schedule_for_date(conn, &date_str)? {
            return Ok(cached);
        }

        let schedule = self.schedule_for_date(date)?;
        CacheRepo::store_schedule(conn, &date_str, &schedule)?;
        log::debug!("cached prayer times for {}", date_str);
        Ok(schedule)
    }

    /// Schedules for `days` consecutive days starting at `start`.
    pub fn schedules_for_range(
        &self,
        conn: &Connection,
        start: NaiveDate,
        days: u32,
    ) -> Result<Vec<(NaiveDate, DailySchedule)>> {
        self.invalidate_stale_cache(conn)?;
        (0..i64::from(days))
            .map(|i| {
                let date = start + Duration::days(i);
                Ok((date, self.get_cached_or_compute(conn, date)?))
            })
            .collect()
    }
}

fn parse_method(s: &str) -> Result<Method> {
    match s {
        "MuslimWorldLeague" => Ok(Method::MuslimWorldLeague),
        "Egyptian" => Ok(Method::Egyptian),
        "Karachi" => Ok(Method::Karachi),
        "UmmAlQura" => Ok(Method::UmmAlQura),
        "Dubai" => Ok(Method::Dubai),
        "MoonsightingCommittee" => Ok(Method::MoonsightingCommittee),
        "NorthAmerica" => Ok(Method::NorthAmerica),
        "Kuwait" => Ok(Method::Kuwait),
        "Qatar" => Ok(Method::Qatar),
        "Singapore" => Ok(Method::Singapore),
        "Tehran" => Ok(Method::Tehran),
        "Turkey" => Ok(Method::Turkey),
        "Other" => Ok(Method::Other),
        _ => Err(anyhow!("Unknown calculation method: '{}'", s)),
    }
}

fn parse_madhab(s: &str) -> Result<Madhab> {
    match s {
        "Hanafi" => Ok(Madhab::Hanafi),
        "Shafi" | "Shafi'i" => Ok(Madhab::Shafi),
        _ => Err(anyhow!("Unknown madhab: '{}'", s)),
    }
}

pub const CALC_METHODS: &[&str] = &[
    "MuslimWorldLeague",
    "Egyptian",
    "Karachi",
    "UmmAlQura",
    "Dubai",
    "MoonsightingCommittee",
    "NorthAmerica",
    "Kuwait",
    "Qatar",
    "Singapore",
    "Tehran",
    "Turkey",
    "Other",
];

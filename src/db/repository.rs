use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};

use crate::models::{City, DailySchedule, PrayerName, SavedLocation, validate_coordinates};
use crate::utils::format::format_time;

// ─── Cached prayer times ────────────────────────────────────────────────────

pub struct CacheRepo;

impl CacheRepo {
    /// Cached schedule for `date` (YYYY-MM-DD). A row that no longer forms a
    /// valid schedule is treated as a miss.
    pub fn get_schedule_for_date(conn: &Connection, date: &str) -> Result<Option<DailySchedule>> {
        let row = conn
            .query_row(
                "SELECT fajr, sunrise, dhuhr, asr, maghrib, isha FROM prayer_times_cache WHERE date = ?1",
                params![date],
                |row| {
                    Ok([
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                        row.get::<_, String>(5)?,
                    ])
                },
            )
            .optional()?;

        let Some(times) = row else {
            return Ok(None);
        };
        let entries: Vec<(&str, &str)> = PrayerName::ALL
            .iter()
            .map(|p| p.display_name())
            .zip(times.iter().map(String::as_str))
            .collect();

        match DailySchedule::from_provider(&entries) {
            Ok(schedule) => Ok(Some(schedule)),
            Err(e) => {
                log::warn!("ignoring cached times for {}: {}", date, e);
                Ok(None)
            }
        }
    }

    pub fn store_schedule(conn: &Connection, date: &str, schedule: &DailySchedule) -> Result<()> {
        let t = |p: PrayerName| format_time(schedule.time_of(p));
        conn.execute(
            "INSERT OR REPLACE INTO prayer_times_cache (date, fajr, sunrise, dhuhr, asr, maghrib, isha)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                date,
                t(PrayerName::Fajr),
                t(PrayerName::Sunrise),
                t(PrayerName::Dhuhr),
                t(PrayerName::Asr),
                t(PrayerName::Maghrib),
                t(PrayerName::Isha),
            ],
        )?;
        Ok(())
    }

    pub fn clear_all(conn: &Connection) -> Result<()> {
        conn.execute("DELETE FROM prayer_times_cache", [])?;
        Ok(())
    }
}

// ─── Saved locations ────────────────────────────────────────────────────────

pub struct LocationRepo;

impl LocationRepo {
    fn row_to_location(row: &rusqlite::Row<'_>) -> rusqlite::Result<SavedLocation> {
        Ok(SavedLocation {
            id: row.get(0)?,
            city: City {
                name: row.get(1)?,
                country: row.get(2)?,
                latitude: row.get(3)?,
                longitude: row.get(4)?,
                timezone_offset: row.get(5)?,
            },
            created_at: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
        })
    }

    /// Save a city. Saving the same name and coordinates again returns the
    /// existing bookmark.
    pub fn add(conn: &Connection, city: &City) -> Result<SavedLocation> {
        validate_coordinates(city.latitude, city.longitude)?;
        conn.execute(
            "INSERT OR IGNORE INTO saved_locations (name, country, latitude, longitude, timezone_offset)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                city.name,
                city.country,
                city.latitude,
                city.longitude,
                city.timezone_offset
            ],
        )
        .with_context(|| format!("Saving location {}", city.name))?;

        conn.query_row(
            "SELECT id, name, country, latitude, longitude, timezone_offset, created_at
             FROM saved_locations WHERE name = ?1 AND latitude = ?2 AND longitude = ?3",
            params![city.name, city.latitude, city.longitude],
            Self::row_to_location,
        )
        .map_err(anyhow::Error::from)
    }

    pub fn list(conn: &Connection) -> Result<Vec<SavedLocation>> {
        let mut stmt = conn.prepare(
            "SELECT id, name, country, latitude, longitude, timezone_offset, created_at
             FROM saved_locations ORDER BY id",
        )?;
        let rows = stmt.query_map([], Self::row_to_location)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(anyhow::Error::from)
    }

    pub fn get(conn: &Connection, id: i64) -> Result<Option<SavedLocation>> {
        conn.query_row(
            "SELECT id, name, country, latitude, longitude, timezone_offset, created_at
             FROM saved_locations WHERE id = ?1",
            params![id],
            Self::row_to_location,
        )
        .optional()
        .map_err(anyhow::Error::from)
    }

    /// Returns false when no bookmark had that id.
    pub fn remove(conn: &Connection, id: i64) -> Result<bool> {
        let n = conn.execute("DELETE FROM saved_locations WHERE id = ?1", params![id])?;
        Ok(n > 0)
    }
}

// ─── App meta ────────────────────────────────────────────────────────────────

pub struct MetaRepo;

impl MetaRepo {
    pub fn get(conn: &Connection, key: &str) -> Result<Option<String>> {
        conn.query_row(
            "SELECT value FROM app_meta WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(anyhow::Error::from)
    }

    pub fn set(conn: &Connection, key: &str, value: &str) -> Result<()> {
        conn.execute(
            "INSERT INTO app_meta (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = ?2",
            params![key, value],
        )?;
        Ok(())
    }
}

use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDateTime;
use rusqlite::Connection;

use crate::cli::args::LocationCommands;
use crate::config::AppConfig;
use crate::db::repository::{CacheRepo, LocationRepo};
use crate::i18n;
use crate::models::{City, validate_coordinates};
use crate::prayer_times::PrayerCalculator;
use crate::schedule::{RestrictedWindow, remaining_time};
use crate::utils::export::{ExportFormat, TimeRange, render_csv, render_json, render_text};
use crate::utils::format::{COUNTDOWN_PLACEHOLDER, format_countdown, format_degrees, format_time, pad_display};
use crate::utils::hijri::hijri_string;
use crate::utils::qibla::{compass_point, qibla_bearing};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const GOLD: &str = "\x1b[38;2;196;160;68m";

// ─── Times ───────────────────────────────────────────────────────────────────

pub fn handle_times(conn: &Connection, config: &AppConfig, now: NaiveDateTime) -> Result<()> {
    let lang = config.display.language;
    let labels = i18n::labels(lang);
    let calc = PrayerCalculator::from_config(&config.salah)?;
    calc.invalidate_stale_cache(conn)?;
    let schedule = calc.get_cached_or_compute(conn, now.date())?;
    let state = schedule.resolve(now.time());

    println!();
    println_colored!(
        GOLD,
        "  {} ({})",
        config.salah.location_name,
        now.date().format("%Y-%m-%d")
    );
    println_colored!(DIM, "  {}", hijri_string(now.date(), config.salah.hijri_offset));
    println!();

    for slot in schedule.slots() {
        let idx = slot.name.index();
        let line = format!(
            "{}{}{}",
            pad_display(slot.name.display_name(), 10),
            pad_display(slot.name.arabic_name(), 8),
            format_time(slot.time)
        );
        if idx == state.current_index {
            println_colored!(GREEN, "▶ {}", line);
        } else if idx == state.next_index {
            println_colored!(BOLD, "  {}", line);
        } else {
            println_colored!(DIM, "  {}", line);
        }
    }

    let next_slot = schedule.slot(state.next());
    let countdown = match remaining_time(now, next_slot) {
        Ok(left) => format_countdown(left),
        Err(e) => {
            log::error!("{}", e);
            COUNTDOWN_PLACEHOLDER.to_string()
        }
    };
    println!();
    println_colored!(
        AMBER,
        "  {}: {} — {}",
        labels.next_prayer,
        state.next().display_name(),
        countdown
    );

    let bearing = qibla_bearing(config.salah.latitude, config.salah.longitude);
    println!(
        "  {}: {} ({})",
        labels.qibla_direction,
        format_degrees(bearing),
        compass_point(bearing)
    );

    for window in RestrictedWindow::ALL {
        if window.contains(schedule.slots(), now.time()) {
            println!();
            println_colored!(AMBER, "  ⚠ {}", window.message(lang));
        }
    }
    println!();
    Ok(())
}

// ─── Qibla ───────────────────────────────────────────────────────────────────

pub fn handle_qibla(config: &AppConfig, lat: Option<f64>, lng: Option<f64>) -> Result<()> {
    let (lat, lng, place) = match (lat, lng) {
        (Some(lat), Some(lng)) => (lat, lng, format!("{:.4}, {:.4}", lat, lng)),
        _ => (
            config.salah.latitude,
            config.salah.longitude,
            config.salah.location_name.clone(),
        ),
    };
    validate_coordinates(lat, lng)?;
    let bearing = qibla_bearing(lat, lng);
    let labels = i18n::labels(config.display.language);
    println!(
        "{} ({}): {} {}",
        labels.qibla_direction,
        place,
        format_degrees(bearing),
        compass_point(bearing)
    );
    Ok(())
}

// ─── Saved locations ─────────────────────────────────────────────────────────

pub fn handle_locations(
    conn: &Connection,
    config: &mut AppConfig,
    action: &LocationCommands,
) -> Result<()> {
    match action {
        LocationCommands::List => {
            let saved = LocationRepo::list(conn)?;
            let labels = i18n::labels(config.display.language);
            println!();
            if saved.is_empty() {
                println_colored!(DIM, "  {}", labels.no_saved_locations);
            } else {
                println_colored!(GOLD, "  {}", labels.saved_locations);
                println!();
                for loc in &saved {
                    let active = loc.city.name == config.salah.location_name
                        && loc.city.latitude == config.salah.latitude
                        && loc.city.longitude == config.salah.longitude;
                    let marker = if active { "▶" } else { " " };
                    println!(
                        "{} {:>3}  {}  ({:.4}, {:.4}, UTC{})",
                        marker,
                        loc.id,
                        pad_display(&loc.city.label(), 28),
                        loc.city.latitude,
                        loc.city.longitude,
                        format_tz_offset(loc.city.timezone_offset)
                    );
                }
            }
            println!();
        }
        LocationCommands::Add {
            name,
            lat,
            lng,
            country,
            tz,
        } => {
            let timezone_offset = match tz {
                Some(tz) => parse_tz_offset(tz)
                    .with_context(|| format!("Invalid UTC offset '{}'", tz))?,
                None => config.salah.timezone_offset,
            };
            let city = City {
                name: name.trim().to_string(),
                country: country.trim().to_string(),
                latitude: *lat,
                longitude: *lng,
                timezone_offset,
            };
            if city.name.is_empty() {
                bail!("Location name must not be empty");
            }
            let saved = LocationRepo::add(conn, &city)?;
            println_colored!(GREEN, "  ✓ Saved {} as #{}", saved.city.label(), saved.id);
        }
        LocationCommands::Remove { id } => {
            if LocationRepo::remove(conn, *id)? {
                println_colored!(GREEN, "  ✓ Removed location #{}", id);
            } else {
                bail!("No saved location with id {}", id);
            }
        }
        LocationCommands::Use { id } => {
            let saved = LocationRepo::get(conn, *id)?
                .ok_or_else(|| anyhow!("No saved location with id {}", id))?;
            switch_location(conn, config, &saved.city)?;
            println_colored!(GREEN, "  ✓ Now using {}", saved.city.label());
        }
    }
    Ok(())
}

/// Make `city` the active location, persist the config and drop cached times.
pub fn switch_location(conn: &Connection, config: &mut AppConfig, city: &City) -> Result<()> {
    config.salah.apply_city(city);
    config.save()?;
    CacheRepo::clear_all(conn)?;
    log::info!("switched location to {}", city.label());
    Ok(())
}

// ─── Export ──────────────────────────────────────────────────────────────────

pub fn handle_export(
    conn: &Connection,
    config: &AppConfig,
    range: TimeRange,
    format: ExportFormat,
    output: Option<&std::path::Path>,
) -> Result<()> {
    let calc = PrayerCalculator::from_config(&config.salah)?;
    let today = config.salah.now()?.date();
    let rows = calc.schedules_for_range(conn, today, range.days())?;

    let rendered = match format {
        ExportFormat::Csv => render_csv(&rows)?,
        ExportFormat::Json => render_json(&rows)?,
        ExportFormat::Text => render_text(
            &rows,
            range.title(config.display.language),
            &config.salah.location_name,
        )?,
    };

    match output {
        Some(path) => {
            std::fs::write(path, rendered).with_context(|| format!("Writing {:?}", path))?;
            eprintln!("Exported {} days to {}", rows.len(), path.display());
        }
        None => print!("{}", rendered),
    }
    Ok(())
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Parse a UTC offset string into total minutes.
/// Accepts: "5:30", "+5:30", "-5:30", "5", "+5", "5.5"
fn parse_tz_offset(s: &str) -> Result<i32> {
    let s = s.trim().trim_start_matches('+');
    let negative = s.starts_with('-');
    let s = s.trim_start_matches('-');
    let sign = if negative { -1 } else { 1 };

    const MAX_MINUTES: i32 = 14 * 60;
    let out_of_range = || anyhow!("UTC offset out of range: {}", s);

    let minutes = if s.contains(':') {
        let mut parts = s.splitn(2, ':');
        let hours: i32 = parts.next().unwrap_or("0").parse()?;
        let mins: i32 = parts.next().unwrap_or("0").parse()?;
        if !(0..60).contains(&mins) {
            bail!("Minutes must be between 0 and 59: {}", s);
        }
        hours
            .checked_mul(60)
            .and_then(|h| h.checked_add(mins))
            .ok_or_else(out_of_range)?
    } else if s.contains('.') {
        let hours: f64 = s.parse()?;
        if !hours.is_finite() || hours.abs() * 60.0 > f64::from(MAX_MINUTES) {
            return Err(out_of_range());
        }
        (hours * 60.0).round() as i32
    } else {
        let hours: i32 = s.parse()?;
        hours.checked_mul(60).ok_or_else(out_of_range)?
    };

    if minutes.abs() > MAX_MINUTES {
        return Err(out_of_range());
    }
    Ok(sign * minutes)
}

/// Format total minutes as "+H:MM" string
fn format_tz_offset(minutes: i32) -> String {
    let sign = if minutes < 0 { "-" } else { "+" };
    let abs = minutes.abs();
    let h = abs / 60;
    let m = abs % 60;
    if m == 0 {
        format!("{}{}", sign, h)
    } else {
        format!("{}{}:{:02}", sign, h, m)
    }
}

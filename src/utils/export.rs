use anyhow::{Result, bail};
use chrono::NaiveDate;
use clap::ValueEnum;
use serde::Serialize;

use crate::i18n::Language;
use crate::models::{DailySchedule, PrayerName};
use crate::utils::format::{format_time, pad_display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TimeRange {
    Weekly,
    Monthly,
    Yearly,
}

impl TimeRange {
    pub fn days(self) -> u32 {
        match self {
            TimeRange::Weekly => 7,
            TimeRange::Monthly => 30,
            TimeRange::Yearly => 365,
        }
    }

    pub fn title(self, lang: Language) -> &'static str {
        match (lang, self) {
            (Language::Tr, TimeRange::Weekly) => "Haftalık Namaz Vakitleri",
            (Language::Tr, TimeRange::Monthly) => "Aylık Namaz Vakitleri",
            (Language::Tr, TimeRange::Yearly) => "Yıllık Namaz Vakitleri",
            (Language::De, TimeRange::Weekly) => "Wöchentliche Gebetszeiten",
            (Language::De, TimeRange::Monthly) => "Monatliche Gebetszeiten",
            (Language::De, TimeRange::Yearly) => "Jährliche Gebetszeiten",
            (Language::En, TimeRange::Weekly) => "Weekly Prayer Times",
            (Language::En, TimeRange::Monthly) => "Monthly Prayer Times",
            (Language::En, TimeRange::Yearly) => "Yearly Prayer Times",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Text,
}

#[derive(Serialize)]
struct JsonRow {
    date: String,
    fajr: String,
    sunrise: String,
    dhuhr: String,
    asr: String,
    maghrib: String,
    isha: String,
}

fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

fn times(schedule: &DailySchedule) -> impl Iterator<Item = String> + '_ {
    schedule.slots().iter().map(|s| format_time(s.time))
}

pub fn render_csv(rows: &[(NaiveDate, DailySchedule)]) -> Result<String> {
    if rows.is_empty() {
        bail!("No prayer times to export");
    }
    let header: Vec<&str> = std::iter::once("Date")
        .chain(PrayerName::ALL.iter().map(|p| p.display_name()))
        .collect();
    let mut out = header.join(",");
    out.push('\n');
    for (date, schedule) in rows {
        let line: Vec<String> = std::iter::once(date.format("%d.%m.%Y").to_string())
            .chain(times(schedule))
            .map(|f| csv_field(&f))
            .collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }
    Ok(out)
}

pub fn render_json(rows: &[(NaiveDate, DailySchedule)]) -> Result<String> {
    if rows.is_empty() {
        bail!("No prayer times to export");
    }
    let json_rows: Vec<JsonRow> = rows
        .iter()
        .map(|(date, s)| {
            let t = |p: PrayerName| format_time(s.time_of(p));
            JsonRow {
                date: date.format("%Y-%m-%d").to_string(),
                fajr: t(PrayerName::Fajr),
                sunrise: t(PrayerName::Sunrise),
                dhuhr: t(PrayerName::Dhuhr),
                asr: t(PrayerName::Asr),
                maghrib: t(PrayerName::Maghrib),
                isha: t(PrayerName::Isha),
            }
        })
        .collect();
    Ok(serde_json::to_string_pretty(&json_rows)?)
}

pub fn render_text(
    rows: &[(NaiveDate, DailySchedule)],
    title: &str,
    location: &str,
) -> Result<String> {
    if rows.is_empty() {
        bail!("No prayer times to export");
    }
    let mut out = format!("{}\n{}\n\n", title, location);
    let mut header = pad_display("", 12);
    for p in PrayerName::ALL {
        header.push_str(&pad_display(p.display_name(), 9));
    }
    out.push_str(header.trim_end());
    out.push('\n');
    for (date, schedule) in rows {
        let mut line = pad_display(&date.format("%d.%m.%Y").to_string(), 12);
        for t in times(schedule) {
            line.push_str(&pad_display(&t, 9));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<(NaiveDate, DailySchedule)> {
        let s = DailySchedule::from_provider(&[
            ("Fajr", "05:57"),
            ("Sunrise", "07:37"),
            ("Dhuhr", "12:39"),
            ("Asr", "15:04"),
            ("Maghrib", "17:32"),
            ("Isha", "19:00"),
        ])
        .unwrap();
        vec![
            (NaiveDate::from_ymd_opt(2025, 1, 14).unwrap(), s.clone()),
            (NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(), s),
        ]
    }

    #[test]
    fn range_lengths() {
        assert_eq!(TimeRange::Weekly.days(), 7);
        assert_eq!(TimeRange::Monthly.days(), 30);
        assert_eq!(TimeRange::Yearly.days(), 365);
        assert_eq!(TimeRange::Monthly.title(Language::De), "Monatliche Gebetszeiten");
    }

    #[test]
    fn csv_layout() {
        let csv = render_csv(&rows()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("Date,Fajr,Sunrise,Dhuhr,Asr,Maghrib,Isha"));
        assert_eq!(lines.next(), Some("14.01.2025,05:57,07:37,12:39,15:04,17:32,19:00"));
        assert_eq!(lines.count(), 1);
    }

    #[test]
    fn csv_quoting() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn json_rows() {
        let json = render_json(&rows()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[0]["date"], "2025-01-14");
        assert_eq!(value[1]["maghrib"], "17:32");
    }

    #[test]
    fn text_table() {
        let text = render_text(&rows(), "Weekly Prayer Times", "Istanbul").unwrap();
        assert!(text.starts_with("Weekly Prayer Times\nIstanbul\n"));
        assert!(text.contains("14.01.2025  05:57"));
        assert!(text.lines().all(|l| l == l.trim_end()));
    }

    #[test]
    fn empty_is_an_error() {
        assert!(render_csv(&[]).is_err());
        assert!(render_json(&[]).is_err());
        assert!(render_text(&[], "t", "l").is_err());
    }
}

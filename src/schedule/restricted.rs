use chrono::{NaiveTime, Timelike};
use std::time::Duration;

use crate::i18n::{self, Language};
use crate::models::{PrayerName, PrayerSlot};

/// Intervals around Sunrise, Dhuhr and Maghrib during which voluntary
/// prayer is discouraged or limited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RestrictedWindow {
    PostSunrise,
    PreDhuhr,
    PreMaghrib,
}

impl RestrictedWindow {
    pub const ALL: [RestrictedWindow; 3] = [
        RestrictedWindow::PostSunrise,
        RestrictedWindow::PreDhuhr,
        RestrictedWindow::PreMaghrib,
    ];

    pub fn index(self) -> usize {
        match self {
            RestrictedWindow::PostSunrise => 0,
            RestrictedWindow::PreDhuhr => 1,
            RestrictedWindow::PreMaghrib => 2,
        }
    }

    pub fn anchor(self) -> PrayerName {
        match self {
            RestrictedWindow::PostSunrise => PrayerName::Sunrise,
            RestrictedWindow::PreDhuhr => PrayerName::Dhuhr,
            RestrictedWindow::PreMaghrib => PrayerName::Maghrib,
        }
    }

    /// (start, end) offsets from the anchor, in minutes.
    fn offsets(self) -> (i64, i64) {
        match self {
            RestrictedWindow::PostSunrise => (0, 45),
            RestrictedWindow::PreDhuhr => (-30, 0),
            RestrictedWindow::PreMaghrib => (-45, 0),
        }
    }

    /// Window bounds in seconds since midnight, `[start, end)`. `None` when
    /// the anchor slot is missing.
    pub fn bounds(self, slots: &[PrayerSlot]) -> Option<(i64, i64)> {
        let anchor = slots.iter().find(|s| s.name == self.anchor())?;
        let anchor_secs = i64::from(anchor.time.num_seconds_from_midnight());
        let (start, end) = self.offsets();
        Some((anchor_secs + start * 60, anchor_secs + end * 60))
    }

    pub fn contains(self, slots: &[PrayerSlot], now: NaiveTime) -> bool {
        let now = i64::from(now.num_seconds_from_midnight());
        self.bounds(slots)
            .is_some_and(|(start, end)| now >= start && now < end)
    }

    pub fn message(self, lang: Language) -> &'static str {
        match self {
            RestrictedWindow::PostSunrise => i18n::post_sunrise_message(lang),
            RestrictedWindow::PreDhuhr => i18n::pre_dhuhr_message(lang),
            RestrictedWindow::PreMaghrib => i18n::pre_maghrib_message(lang),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowState {
    pub has_fired: bool,
}

/// One tracker per window, indexed by [`RestrictedWindow::index`].
pub type WindowStates = [WindowState; 3];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advisory {
    pub window: RestrictedWindow,
    /// Time left until the window closes.
    pub display_duration: Duration,
}

impl Advisory {
    pub fn title(&self, lang: Language) -> &'static str {
        i18n::advisory_title(lang)
    }

    pub fn message(&self, lang: Language) -> &'static str {
        self.window.message(lang)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowEvaluation {
    pub advisories: Vec<Advisory>,
    pub state: WindowStates,
}

/// Decide which advisories to raise at `now` and return the updated trackers.
///
/// A window fires once while `now` is inside it and re-arms once `now` has
/// passed its end. Windows whose anchor slot is missing are skipped.
pub fn evaluate_windows(
    now: NaiveTime,
    slots: &[PrayerSlot],
    mut state: WindowStates,
) -> WindowEvaluation {
    let now_secs = i64::from(now.num_seconds_from_midnight());
    let mut advisories = Vec::new();

    for window in RestrictedWindow::ALL {
        let Some((start, end)) = window.bounds(slots) else {
            continue;
        };
        let tracker = &mut state[window.index()];

        if now_secs >= start && now_secs < end && !tracker.has_fired {
            advisories.push(Advisory {
                window,
                display_duration: Duration::from_secs((end - now_secs) as u64),
            });
            tracker.has_fired = true;
        }

        if now_secs >= end {
            tracker.has_fired = false;
        }
    }

    WindowEvaluation { advisories, state }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DailySchedule;

    fn slots() -> Vec<PrayerSlot> {
        DailySchedule::from_provider(&[
            ("Fajr", "05:57"),
            ("Sunrise", "07:37"),
            ("Dhuhr", "12:39"),
            ("Asr", "15:04"),
            ("Maghrib", "17:32"),
            ("Isha", "19:00"),
        ])
        .unwrap()
        .slots()
        .to_vec()
    }

    fn at(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn pre_maghrib_fires_inside_window() {
        let eval = evaluate_windows(at(16, 50, 0), &slots(), WindowStates::default());
        assert_eq!(eval.advisories.len(), 1);
        let advisory = &eval.advisories[0];
        assert_eq!(advisory.window, RestrictedWindow::PreMaghrib);
        assert_eq!(advisory.display_duration, Duration::from_secs(42 * 60));
        assert!(eval.state[RestrictedWindow::PreMaghrib.index()].has_fired);
    }

    #[test]
    fn pre_maghrib_not_yet_open() {
        let eval = evaluate_windows(at(16, 40, 0), &slots(), WindowStates::default());
        assert!(eval.advisories.is_empty());
        assert_eq!(eval.state, WindowStates::default());
    }

    #[test]
    fn does_not_fire_twice() {
        let first = evaluate_windows(at(16, 50, 0), &slots(), WindowStates::default());
        let second = evaluate_windows(at(16, 51, 0), &slots(), first.state);
        assert!(second.advisories.is_empty());
        assert!(second.state[RestrictedWindow::PreMaghrib.index()].has_fired);
    }

    #[test]
    fn post_sunrise_closed_resets() {
        let mut state = WindowStates::default();
        state[RestrictedWindow::PostSunrise.index()].has_fired = true;
        let eval = evaluate_windows(at(8, 25, 0), &slots(), state);
        assert!(eval.advisories.is_empty());
        assert!(!eval.state[RestrictedWindow::PostSunrise.index()].has_fired);
    }

    #[test]
    fn boundaries_are_half_open() {
        // Pre-Dhuhr is [12:09, 12:39)
        let start = evaluate_windows(at(12, 9, 0), &slots(), WindowStates::default());
        assert_eq!(start.advisories.len(), 1);
        assert_eq!(start.advisories[0].window, RestrictedWindow::PreDhuhr);

        let before = evaluate_windows(at(12, 8, 59), &slots(), WindowStates::default());
        assert!(before.advisories.is_empty());

        let end = evaluate_windows(at(12, 39, 0), &slots(), WindowStates::default());
        assert!(end.advisories.is_empty());
    }

    #[test]
    fn missing_anchor_skips_only_that_window() {
        let partial: Vec<PrayerSlot> = slots()
            .into_iter()
            .filter(|s| s.name != PrayerName::Sunrise)
            .collect();
        assert!(evaluate_windows(at(7, 40, 0), &partial, WindowStates::default())
            .advisories
            .is_empty());
        let eval = evaluate_windows(at(12, 30, 0), &partial, WindowStates::default());
        assert_eq!(eval.advisories.len(), 1);
        assert_eq!(eval.advisories[0].window, RestrictedWindow::PreDhuhr);
    }

    #[test]
    fn localized_text() {
        let eval = evaluate_windows(at(16, 50, 0), &slots(), WindowStates::default());
        let advisory = &eval.advisories[0];
        assert_eq!(advisory.title(Language::Tr), "Namaz Hatırlatması");
        assert!(advisory.message(Language::De).contains("Fard"));
    }
}

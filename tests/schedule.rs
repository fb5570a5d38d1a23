use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use proptest::prelude::*;

use vakit::models::{DailySchedule, PrayerName, PrayerSlot};
use vakit::schedule::{
    RestrictedWindow, TickEngine, WindowStates, evaluate_windows, remaining_time, resolve_schedule,
    target_instant,
};

fn fixture() -> DailySchedule {
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

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 14).unwrap()
}

fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
    day().and_hms_opt(h, m, s).unwrap()
}

fn hm(minutes: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0).unwrap()
}

fn slots_from_minutes(minutes: &[u32]) -> Vec<PrayerSlot> {
    PrayerName::ALL
        .iter()
        .zip(minutes)
        .map(|(name, m)| PrayerSlot::new(*name, hm(*m)))
        .collect()
}

/// Any six strictly increasing minute-of-day values.
fn any_slots() -> impl Strategy<Value = Vec<PrayerSlot>> {
    proptest::collection::btree_set(0u32..1440, 6).prop_map(|set| {
        let minutes: Vec<u32> = set.into_iter().collect();
        slots_from_minutes(&minutes)
    })
}

/// Plausible days where every restricted window stays inside one calendar day.
fn realistic_slots() -> impl Strategy<Value = Vec<PrayerSlot>> {
    (240u32..360, 60u32..120, 720u32..780, 150u32..200, 120u32..180, 60u32..100).prop_map(
        |(fajr, to_sunrise, dhuhr, to_asr, to_maghrib, to_isha)| {
            let sunrise = fajr + to_sunrise;
            let asr = dhuhr + to_asr;
            let maghrib = asr + to_maghrib;
            slots_from_minutes(&[fajr, sunrise, dhuhr, asr, maghrib, maghrib + to_isha])
        },
    )
}

fn any_time() -> impl Strategy<Value = NaiveTime> {
    (0u32..86_400).prop_map(|s| NaiveTime::from_num_seconds_from_midnight_opt(s, 0).unwrap())
}

proptest! {
    #[test]
    fn current_brackets_now(slots in any_slots(), now in any_time()) {
        let state = resolve_schedule(&slots, now).unwrap();
        prop_assert_eq!(state.next_index, (state.current_index + 1) % 6);

        let now_min = now.hour() * 60 + now.minute();
        let mins: Vec<u32> = slots.iter().map(|s| s.minutes_since_midnight()).collect();
        if state.current_index == 5 {
            prop_assert!(now_min >= mins[5] || now_min < mins[0]);
        } else {
            prop_assert!(mins[state.current_index] <= now_min);
            prop_assert!(now_min < mins[state.current_index + 1]);
        }
    }

    #[test]
    fn resolving_twice_agrees(slots in any_slots(), now in any_time()) {
        let first = resolve_schedule(&slots, now).unwrap();
        let second = resolve_schedule(&slots, now).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn countdown_ticks_down_by_one_second(
        slots in any_slots(),
        idx in 0usize..6,
        secs in 0u32..86_400,
    ) {
        let next = slots[idx];
        let now = day().and_time(NaiveTime::from_num_seconds_from_midnight_opt(secs, 0).unwrap());
        let left = remaining_time(now, &next).unwrap();
        let later = remaining_time(now + Duration::seconds(1), &next).unwrap();

        prop_assert!(left > Duration::zero() && left <= Duration::hours(24));
        if left > Duration::seconds(1) {
            prop_assert_eq!(later, left - Duration::seconds(1));
        } else {
            prop_assert_eq!(later, Duration::hours(24));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn each_window_fires_once_per_sweep(slots in realistic_slots()) {
        let mut state = WindowStates::default();
        let mut fired = [0usize; 3];
        for s in 0..86_400u32 {
            let now = NaiveTime::from_num_seconds_from_midnight_opt(s, 0).unwrap();
            let eval = evaluate_windows(now, &slots, state);
            for advisory in &eval.advisories {
                prop_assert!(advisory.window.contains(&slots, now));
                fired[advisory.window.index()] += 1;
            }
            state = eval.state;
        }
        prop_assert_eq!(fired, [1, 1, 1]);
        prop_assert!(state.iter().all(|w| !w.has_fired));
    }

    #[test]
    fn nothing_fires_outside_windows(slots in realistic_slots()) {
        let mut state = WindowStates::default();
        for m in (0..1440u32).step_by(7) {
            let now = hm(m);
            if RestrictedWindow::ALL.iter().any(|w| w.contains(&slots, now)) {
                continue;
            }
            let eval = evaluate_windows(now, &slots, state);
            prop_assert!(eval.advisories.is_empty(), "fired at {}", now);
            state = eval.state;
        }
    }
}

#[test]
fn early_morning_after_fajr() {
    let schedule = fixture();
    let now = at(6, 10, 0);
    let state = resolve_schedule(schedule.slots(), now.time()).unwrap();
    assert_eq!(state.current(), PrayerName::Fajr);
    assert_eq!(state.next(), PrayerName::Sunrise);
    let left = remaining_time(now, schedule.slot(state.next())).unwrap();
    assert_eq!(vakit::utils::format::format_countdown(left), "01:27:00");
}

#[test]
fn evening_targets_tomorrows_fajr() {
    let schedule = fixture();
    let now = at(19, 30, 0);
    let state = resolve_schedule(schedule.slots(), now.time()).unwrap();
    assert_eq!(state.current(), PrayerName::Isha);
    assert_eq!(state.next(), PrayerName::Fajr);
    let target = target_instant(now, schedule.slot(PrayerName::Fajr));
    assert_eq!(target, day().succ_opt().unwrap().and_hms_opt(5, 57, 0).unwrap());
}

#[test]
fn pre_maghrib_window_edges() {
    let schedule = fixture();
    let inside = evaluate_windows(hm(16 * 60 + 50), schedule.slots(), WindowStates::default());
    assert_eq!(inside.advisories.len(), 1);
    assert_eq!(inside.advisories[0].window, RestrictedWindow::PreMaghrib);

    let before = evaluate_windows(hm(16 * 60 + 40), schedule.slots(), WindowStates::default());
    assert!(before.advisories.is_empty());
}

#[test]
fn post_sunrise_closed_and_rearmed() {
    let schedule = fixture();
    let mut state = WindowStates::default();
    state[RestrictedWindow::PostSunrise.index()].has_fired = true;
    let eval = evaluate_windows(hm(8 * 60 + 25), schedule.slots(), state);
    assert!(eval.advisories.is_empty());
    assert!(!eval.state[RestrictedWindow::PostSunrise.index()].has_fired);
}

#[test]
fn engine_runs_a_full_day() {
    let mut engine = TickEngine::new();
    engine.set_schedule(fixture().slots().to_vec()).unwrap();

    let mut raised = 0;
    let mut now = at(0, 0, 0);
    while now < at(23, 59, 0) {
        let out = engine.tick(now);
        let display = out.display.expect("display while a schedule is set");
        assert_eq!(display.next_index, (display.current_index + 1) % 6);
        raised += out.raised.len();
        now += Duration::seconds(20);
    }
    assert_eq!(raised, 3);
    assert!(engine.notices().is_empty());
}

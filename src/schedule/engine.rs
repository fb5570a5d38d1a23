use chrono::{Duration, NaiveDateTime};

use crate::error::ScheduleError;
use crate::models::{DailySchedule, PrayerName, PrayerSlot};
use crate::schedule::countdown::remaining_time;
use crate::schedule::restricted::{Advisory, RestrictedWindow, WindowStates, evaluate_windows};
use crate::utils::format::{COUNTDOWN_PLACEHOLDER, format_countdown};

pub type NoticeId = u64;

/// A raised advisory while it is on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: NoticeId,
    pub advisory: Advisory,
    pub expires_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickDisplay {
    pub current: PrayerName,
    pub next: PrayerName,
    pub current_index: usize,
    pub next_index: usize,
    pub countdown: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickOutput {
    /// Last valid display state; `None` until a schedule has been ticked.
    pub display: Option<TickDisplay>,
    pub raised: Vec<Notice>,
    pub dismissed: Vec<NoticeId>,
}

/// Owns the latest schedule, the three window trackers and the visible
/// notices. Every tick recomputes everything from `now`.
#[derive(Debug, Default)]
pub struct TickEngine {
    schedule: Option<DailySchedule>,
    windows: WindowStates,
    display: Option<TickDisplay>,
    notices: Vec<Notice>,
    next_id: NoticeId,
}

impl TickEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the schedule. An invalid list leaves the engine without a
    /// schedule; ticks keep returning the last valid display until a valid
    /// one arrives.
    pub fn set_schedule(&mut self, slots: Vec<PrayerSlot>) -> Result<(), ScheduleError> {
        match DailySchedule::new(slots) {
            Ok(schedule) => {
                log::debug!("schedule updated: {:?}", schedule.slots());
                self.schedule = Some(schedule);
                Ok(())
            }
            Err(e) => {
                log::warn!("rejecting schedule: {}", e);
                self.schedule = None;
                Err(e)
            }
        }
    }

    pub fn schedule(&self) -> Option<&DailySchedule> {
        self.schedule.as_ref()
    }

    pub fn display(&self) -> Option<&TickDisplay> {
        self.display.as_ref()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn tick(&mut self, now: NaiveDateTime) -> TickOutput {
        let mut out = TickOutput::default();

        let before = self.notices.len();
        self.notices.retain(|n| n.expires_at > now);
        if self.notices.len() != before {
            log::debug!("{} notice(s) expired", before - self.notices.len());
        }

        let Some(schedule) = self.schedule.as_ref() else {
            out.display = self.display.clone();
            return out;
        };

        let state = schedule.resolve(now.time());
        let next_slot = schedule.slots()[state.next_index];
        let countdown = match remaining_time(now, &next_slot) {
            Ok(left) => format_countdown(left),
            Err(e) => {
                log::error!("countdown failed: {}", e);
                COUNTDOWN_PLACEHOLDER.to_string()
            }
        };

        let eval = evaluate_windows(now.time(), schedule.slots(), self.windows);
        self.windows = eval.state;

        for advisory in eval.advisories {
            if let Some(stale) = self.take_notice_for(advisory.window) {
                log::debug!("dismissing stale notice {}", stale);
                out.dismissed.push(stale);
            }
            let notice = Notice {
                id: self.next_id,
                expires_at: now + Duration::from_std(advisory.display_duration)
                    .unwrap_or_else(|_| Duration::zero()),
                advisory,
            };
            self.next_id += 1;
            log::info!(
                "restricted window {:?} open, notice {} until {}",
                notice.advisory.window,
                notice.id,
                notice.expires_at.time()
            );
            self.notices.push(notice.clone());
            out.raised.push(notice);
        }

        let display = TickDisplay {
            current: state.current(),
            next: state.next(),
            current_index: state.current_index,
            next_index: state.next_index,
            countdown,
        };
        self.display = Some(display.clone());
        out.display = Some(display);
        out
    }

    /// User dismissal. Returns false when the notice is already gone.
    pub fn dismiss(&mut self, id: NoticeId) -> bool {
        let before = self.notices.len();
        self.notices.retain(|n| n.id != id);
        self.notices.len() != before
    }

    fn take_notice_for(&mut self, window: RestrictedWindow) -> Option<NoticeId> {
        let pos = self.notices.iter().position(|n| n.advisory.window == window)?;
        Some(self.notices.remove(pos).id)
    }
}

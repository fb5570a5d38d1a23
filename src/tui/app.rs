use anyhow::Result;
use chrono::{Local, NaiveDate, NaiveDateTime};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use rusqlite::Connection;
use std::time::Duration;

use crate::cli::handlers::switch_location;
use crate::config::AppConfig;
use crate::db::repository::LocationRepo;
use crate::i18n;
use crate::models::SavedLocation;
use crate::prayer_times::PrayerCalculator;
use crate::schedule::{TickDisplay, TickEngine};
use crate::tui::events::{Event, EventHandler};
use crate::tui::theme;
use crate::tui::widgets::{advisory, header, locations, next_prayer, prayers, qibla, statusbar};
use crate::utils::hijri::hijri_string;
use crate::utils::qibla::qibla_bearing;

const TICK_RATE: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Dashboard,
    Help,
}

pub struct App {
    pub view: View,
    pub config: AppConfig,
    pub should_quit: bool,
    pub show_locations: bool,
    pub location_idx: usize,
    pub status: Option<String>,

    // Refreshed on tick / location change
    pub engine: TickEngine,
    pub display: Option<TickDisplay>,
    pub schedule_date: Option<NaiveDate>,
    pub now: NaiveDateTime,
    pub hijri_str: String,
    pub qibla: f64,
    pub saved_locations: Vec<SavedLocation>,
}

impl App {
    pub fn new(config: AppConfig, now: NaiveDateTime) -> Self {
        let qibla = qibla_bearing(config.salah.latitude, config.salah.longitude);
        App {
            view: View::Dashboard,
            should_quit: false,
            show_locations: false,
            location_idx: 0,
            status: None,
            engine: TickEngine::new(),
            display: None,
            schedule_date: None,
            now,
            hijri_str: hijri_string(now.date(), config.salah.hijri_offset),
            qibla,
            saved_locations: Vec::new(),
            config,
        }
    }

    /// Load everything that depends on the date or the location.
    pub fn load(&mut self, conn: &Connection) -> Result<()> {
        self.saved_locations = LocationRepo::list(conn)?;
        self.qibla = qibla_bearing(self.config.salah.latitude, self.config.salah.longitude);
        self.reload_schedule(conn, self.now.date());
        Ok(())
    }

    fn reload_schedule(&mut self, conn: &Connection, date: NaiveDate) {
        self.schedule_date = Some(date);
        self.hijri_str = hijri_string(date, self.config.salah.hijri_offset);

        let schedule = PrayerCalculator::from_config(&self.config.salah)
            .and_then(|calc| {
                calc.invalidate_stale_cache(conn)?;
                calc.get_cached_or_compute(conn, date)
            });
        match schedule {
            Ok(schedule) => {
                if let Err(e) = self.engine.set_schedule(schedule.slots().to_vec()) {
                    self.status = Some(e.to_string());
                } else {
                    self.status = None;
                }
            }
            Err(e) => {
                log::error!("loading prayer times for {}: {:#}", date, e);
                self.status = Some(format!("{:#}", e));
            }
        }
    }

    /// Start over after the active location changed. Window trackers and
    /// notices belong to the previous city and are dropped with the engine.
    fn reset_for_location(&mut self, conn: &Connection, now: NaiveDateTime) {
        self.engine = TickEngine::new();
        self.display = None;
        self.now = now;
        if let Err(e) = self.load(conn) {
            self.status = Some(format!("{:#}", e));
        }
        self.tick(conn, now);
    }

    pub fn tick(&mut self, conn: &Connection, now: NaiveDateTime) {
        self.now = now;
        if self.schedule_date != Some(now.date()) {
            self.reload_schedule(conn, now.date());
        }

        let out = self.engine.tick(now);
        self.display = out.display;
        for notice in &out.raised {
            log::debug!("raised notice {} for {:?}", notice.id, notice.advisory.window);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, conn: &Connection) {
        // Some terminals also report release and repeat events
        if key.kind != KeyEventKind::Press {
            return;
        }
        if self.show_locations {
            self.handle_locations_key(key, conn);
            return;
        }
        match self.view {
            View::Dashboard => self.handle_dashboard_key(key),
            View::Help => self.handle_help_key(key),
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Char('?') => {
                self.view = View::Help;
            }
            KeyCode::Char('l') => {
                self.show_locations = true;
                self.location_idx = 0;
            }
            KeyCode::Char('x') => {
                if let Some(id) = self.engine.notices().last().map(|n| n.id) {
                    self.engine.dismiss(id);
                }
            }
            _ => {}
        }
    }

    fn handle_help_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('?') => {
                self.view = View::Dashboard;
            }
            _ => {}
        }
    }

    fn handle_locations_key(&mut self, key: KeyEvent, conn: &Connection) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('l') => {
                self.show_locations = false;
            }
            KeyCode::Up => {
                self.location_idx = self.location_idx.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.location_idx + 1 < self.saved_locations.len() {
                    self.location_idx += 1;
                }
            }
            KeyCode::Enter => {
                if let Some(loc) = self.saved_locations.get(self.location_idx).cloned() {
                    match switch_location(conn, &mut self.config, &loc.city) {
                        Ok(()) => {
                            self.show_locations = false;
                            let now = location_now(&self.config);
                            self.reset_for_location(conn, now);
                        }
                        Err(e) => self.status = Some(format!("{:#}", e)),
                    }
                }
            }
            KeyCode::Char('d') => {
                if let Some(loc) = self.saved_locations.get(self.location_idx) {
                    if let Err(e) = LocationRepo::remove(conn, loc.id) {
                        self.status = Some(format!("{:#}", e));
                    }
                    match LocationRepo::list(conn) {
                        Ok(list) => self.saved_locations = list,
                        Err(e) => self.status = Some(format!("{:#}", e)),
                    }
                    self.location_idx = self
                        .location_idx
                        .min(self.saved_locations.len().saturating_sub(1));
                }
            }
            _ => {}
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        self.draw_dashboard(frame);

        if self.view == View::Help {
            self.draw_help_overlay(frame);
        }

        if self.show_locations {
            let labels = i18n::labels(self.config.display.language);
            locations::render(
                frame,
                area,
                &self.saved_locations,
                self.location_idx,
                labels,
            );
        }

        if self.config.display.advisories {
            if let Some(notice) = self.engine.notices().last() {
                advisory::render(
                    frame,
                    area,
                    notice,
                    self.config.display.language,
                    self.now,
                );
            }
        }
    }

    fn draw_dashboard(&self, frame: &mut Frame) {
        let area = frame.area();
        let labels = i18n::labels(self.config.display.language);

        // Clear background
        frame.render_widget(Block::default().style(theme::base()), area);

        let outer_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // header
                Constraint::Min(0),    // body
                Constraint::Length(1), // status bar
            ])
            .split(area);

        let location = match self.config.salah.location_name.trim() {
            "" => labels.unknown,
            name => name,
        };
        header::render(
            frame,
            outer_chunks[0],
            self.now.date(),
            &self.hijri_str,
            location,
        );
        statusbar::render(frame, outer_chunks[2], self.status.as_deref());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(outer_chunks[1]);

        let slots = self
            .engine
            .schedule()
            .map(|s| s.slots())
            .unwrap_or_default();
        prayers::render(frame, columns[0], slots, self.display.as_ref());

        let right_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(8), // next prayer
                Constraint::Length(4), // qibla
                Constraint::Min(0),
            ])
            .split(columns[1]);

        next_prayer::render(frame, right_chunks[0], self.display.as_ref(), labels);
        qibla::render(frame, right_chunks[1], self.qibla, labels.qibla_direction);
    }

    fn draw_help_overlay(&self, frame: &mut Frame) {
        let area = frame.area();

        // Center a help box
        let popup_area = Rect {
            x: area.width / 4,
            y: area.height / 4,
            width: area.width / 2,
            height: (area.height / 2).max(9).min(area.height),
        };

        frame.render_widget(Clear, popup_area);

        let bindings = [
            ("  [l]          ", "Saved locations"),
            ("  [x]          ", "Dismiss advisory"),
            ("  [?]          ", "Toggle help"),
            ("  [Esc] / [q]  ", "Quit"),
        ];
        let mut help_text = vec![
            Line::from(Span::styled(
                "  Keybindings",
                theme::accent().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        for (key, what) in bindings {
            help_text.push(Line::from(vec![
                Span::styled(key, theme::accent()),
                Span::styled(what, theme::dim()),
            ]));
        }

        let block = Block::default()
            .title(Span::styled(" Help ", theme::accent()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::accent())
            .style(theme::surface());

        let paragraph = Paragraph::new(help_text).block(block);
        frame.render_widget(paragraph, popup_area);
    }
}

/// Wall-clock time at the active location, falling back to the host clock
/// when the configured offset is unusable.
fn location_now(config: &AppConfig) -> NaiveDateTime {
    config.salah.now().unwrap_or_else(|e| {
        log::warn!("{:#}, using the host clock", e);
        Local::now().naive_local()
    })
}

/// Run the TUI event loop.
pub fn run(conn: Connection, config: AppConfig) -> Result<()> {
    let now = location_now(&config);
    let mut app = App::new(config, now);
    app.load(&conn)?;
    app.tick(&conn, location_now(&app.config));

    let mut terminal = ratatui::init();
    let events = EventHandler::new(TICK_RATE);

    let result = (|| -> Result<()> {
        loop {
            terminal.draw(|frame| app.draw(frame))?;

            match events.next()? {
                Event::Key(key) => {
                    app.handle_key(key, &conn);
                    if app.should_quit {
                        break;
                    }
                }
                Event::Resize => {}
                Event::Tick => {
                    let now = location_now(&app.config);
                    app.tick(&conn, now);
                }
            }
        }
        Ok(())
    })();

    ratatui::restore();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::models::PrayerName;
    use crossterm::event::KeyModifiers;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 14)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn tick_fills_display() {
        let conn = conn();
        let mut app = App::new(AppConfig::default(), noon());
        app.load(&conn).unwrap();
        app.tick(&conn, noon());
        let display = app.display.clone().unwrap();
        assert_eq!(display.next_index, (display.current_index + 1) % 6);
        assert_eq!(display.countdown.len(), 8);
        assert!(app.status.is_none());
    }

    #[test]
    fn date_change_reloads_schedule() {
        let conn = conn();
        let mut app = App::new(AppConfig::default(), noon());
        app.load(&conn).unwrap();
        let tomorrow = noon() + chrono::Duration::days(1);
        app.tick(&conn, tomorrow);
        assert_eq!(app.schedule_date, Some(tomorrow.date()));
    }

    #[test]
    fn bad_location_shows_status_not_panic() {
        let conn = conn();
        let mut config = AppConfig::default();
        config.salah.calc_method = "Bogus".into();
        let mut app = App::new(config, noon());
        app.load(&conn).unwrap();
        app.tick(&conn, noon());
        assert!(app.status.is_some());
        assert!(app.display.is_none());
    }

    #[test]
    fn keys_toggle_views() {
        let conn = conn();
        let mut app = App::new(AppConfig::default(), noon());
        app.handle_key(press(KeyCode::Char('?')), &conn);
        assert_eq!(app.view, View::Help);
        app.handle_key(press(KeyCode::Esc), &conn);
        assert_eq!(app.view, View::Dashboard);
        app.handle_key(press(KeyCode::Char('l')), &conn);
        assert!(app.show_locations);
        app.handle_key(press(KeyCode::Esc), &conn);
        assert!(!app.show_locations);
        app.handle_key(press(KeyCode::Esc), &conn);
        assert!(app.should_quit);
    }

    fn berlin() -> AppConfig {
        let mut config = AppConfig::default();
        config.salah.apply_city(&crate::models::City {
            name: "Berlin".into(),
            country: "Germany".into(),
            latitude: 52.52,
            longitude: 13.405,
            timezone_offset: 60,
        });
        config
    }

    #[test]
    fn clock_is_read_in_the_location_offset() {
        let utc = chrono::DateTime::parse_from_rfc3339("2025-01-14T15:30:00Z")
            .unwrap()
            .with_timezone(&chrono::Utc);
        let config = berlin();
        let now = config.salah.local_time(utc).unwrap();
        assert_eq!(now.time(), chrono::NaiveTime::from_hms_opt(16, 30, 0).unwrap());

        let conn = conn();
        let mut app = App::new(config, now);
        app.load(&conn).unwrap();
        app.tick(&conn, now);
        let display = app.display.clone().unwrap();
        assert_eq!(display.current, PrayerName::Maghrib);
        assert_eq!(display.next, PrayerName::Isha);
    }

    #[test]
    fn switching_location_drops_old_notices() {
        let conn = conn();
        let mut app = App::new(AppConfig::default(), noon());
        app.load(&conn).unwrap();
        let dhuhr = app.engine.schedule().unwrap().time_of(PrayerName::Dhuhr);
        let inside = noon().date().and_time(dhuhr) - chrono::Duration::minutes(10);
        app.tick(&conn, inside);
        let old = app.engine.notices()[0].clone();

        app.config = berlin();
        let berlin_dhuhr = PrayerCalculator::from_config(&app.config.salah)
            .unwrap()
            .schedule_for_date(noon().date())
            .unwrap()
            .time_of(PrayerName::Dhuhr);
        let berlin_inside = noon().date().and_time(berlin_dhuhr) - chrono::Duration::minutes(5);
        app.reset_for_location(&conn, berlin_inside);

        let notices = app.engine.notices();
        assert_eq!(notices.len(), 1);
        assert_ne!(notices[0].expires_at, old.expires_at);
        assert_eq!(notices[0].expires_at, noon().date().and_time(berlin_dhuhr));
        assert_eq!(app.now, berlin_inside);
    }

    #[test]
    fn dismiss_key_clears_notice() {
        let conn = conn();
        let mut app = App::new(AppConfig::default(), noon());
        app.load(&conn).unwrap();
        let dhuhr = app.engine.schedule().unwrap().time_of(PrayerName::Dhuhr);
        let inside = noon().date().and_time(dhuhr) - chrono::Duration::minutes(10);
        app.tick(&conn, inside);
        assert_eq!(app.engine.notices().len(), 1);
        app.handle_key(press(KeyCode::Char('x')), &conn);
        assert!(app.engine.notices().is_empty());
    }
}

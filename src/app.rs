use crate::config::DataPaths;
use crate::history::{self, History, TIMESTAMP_FORMAT};
use crate::models::{Notice, SolveId};
use crate::settings::{self, Settings};
use crate::stopwatch::Stopwatch;
use crate::ui::layout::{list_offset, Button, Regions};
use crate::ui::utils::format_clock;
use anyhow::Result;
use chrono::Local;
use ratatui::layout::Rect;
use std::time::{Duration, Instant};
use tracing::{error, info};

/// Poll interval while the clock is stopped. Nothing moves on screen then.
const IDLE_POLL: Duration = Duration::from_millis(250);

pub struct App {
    pub should_quit: bool,
    pub stopwatch: Stopwatch,
    pub history: History,
    pub settings: Settings,
    /// row highlighted in the solve list
    pub selected: Option<usize>,
    pub notice: Option<Notice>,

    pub terminal_width: u16,
    pub terminal_height: u16,

    tick: Duration,
    paths: DataPaths,
}

impl App {
    pub fn new(paths: DataPaths, tick: Duration) -> Result<Self> {
        let load = history::load_history(&paths.history)?;
        let settings = settings::load_settings(&paths.settings);

        let notice = if load.skipped.is_empty() {
            None
        } else {
            let name = paths
                .history
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| paths.history.display().to_string());
            Some(Notice::error(format!(
                "Skipped {} malformed line(s) in {}",
                load.skipped.len(),
                name
            )))
        };

        info!(solves = load.history.len(), theme = %settings.theme, "session started");

        Ok(Self {
            should_quit: false,
            stopwatch: Stopwatch::new(),
            history: load.history,
            settings,
            selected: None,
            notice,
            terminal_width: 80,
            terminal_height: 24,
            tick,
            paths,
        })
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.terminal_width = width;
        self.terminal_height = height;
    }

    /// How long the event loop may block before the next tick.
    pub fn poll_timeout(&self) -> Duration {
        if self.stopwatch.is_running() {
            self.tick
        } else {
            IDLE_POLL
        }
    }

    pub fn on_tick(&mut self, now: Instant) {
        self.stopwatch.tick(now);
    }

    pub fn toggle_timer(&mut self, now: Instant) {
        self.notice = None;
        if let Some(seconds) = self.stopwatch.toggle(now) {
            let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
            self.record_solve(seconds, timestamp);
        }
    }

    pub fn record_solve(&mut self, seconds: f64, timestamp: String) -> SolveId {
        let id = self.history.push(seconds, timestamp);
        let minutes = self.history.records().last().map_or(seconds / 60.0, |r| r.minutes());
        info!(solve = %id, time = %format_clock(seconds), minutes, "solve recorded");
        self.persist_history();
        id
    }

    pub fn select_next(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let last = self.history.len() - 1;
        self.selected = Some(match self.selected {
            Some(i) => (i + 1).min(last),
            None => 0,
        });
    }

    pub fn select_prev(&mut self) {
        if self.history.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) => i.saturating_sub(1),
            None => self.history.len() - 1,
        });
    }

    pub fn select_first(&mut self) {
        if !self.history.is_empty() {
            self.selected = Some(0);
        }
    }

    pub fn select_last(&mut self) {
        if !self.history.is_empty() {
            self.selected = Some(self.history.len() - 1);
        }
    }

    pub fn select(&mut self, index: usize) {
        if index < self.history.len() {
            self.selected = Some(index);
        }
    }

    /// Removes the highlighted solve. Without a valid selection nothing happens.
    pub fn delete_selected(&mut self) {
        if self.stopwatch.is_running() {
            return;
        }
        let Some(id) = self.selected.and_then(|i| self.history.id_at(i)) else {
            return;
        };
        self.delete(id);
    }

    pub fn delete(&mut self, id: SolveId) {
        let Some(index) = self.history.index_of(id) else {
            return;
        };
        self.history.remove(id);
        info!(solve = %id, "solve deleted");

        self.selected = if self.history.is_empty() {
            None
        } else {
            Some(index.min(self.history.len() - 1))
        };
        self.notice = None;
        self.persist_history();
    }

    pub fn delete_all(&mut self) {
        if self.stopwatch.is_running() {
            return;
        }
        let removed = self.history.len();
        self.history.clear();
        self.selected = None;
        self.notice = (removed > 0).then(|| Notice::info(format!("Deleted {} solve(s)", removed)));
        info!(removed, "all solves deleted");
        self.persist_history();
    }

    pub fn toggle_theme(&mut self) {
        self.settings.theme = self.settings.theme.toggled();
        self.notice = None;
        info!(theme = %self.settings.theme, "theme changed");
        if let Err(e) = settings::save_settings(&self.paths.settings, &self.settings) {
            let reason = format!("{e:#}");
            error!(error = %reason, "saving settings failed");
            self.notice = Some(Notice::error(format!("Could not save settings: {reason}")));
        }
    }

    pub fn press(&mut self, button: Button) {
        match button {
            Button::DeleteSelected => self.delete_selected(),
            Button::DeleteAll => self.delete_all(),
            Button::ToggleTheme => self.toggle_theme(),
        }
    }

    pub fn on_click(&mut self, column: u16, row: u16) {
        let regions = Regions::compute(Rect::new(0, 0, self.terminal_width, self.terminal_height));

        if let Some(button) = regions.button_at(column, row) {
            self.press(button);
            return;
        }

        let offset = list_offset(self.selected, regions.list_inner().height as usize);
        if let Some(index) = regions.list_row_at(column, row, offset) {
            self.select(index);
        }
    }

    // write-through; a failed write keeps the in-memory history as is
    fn persist_history(&mut self) {
        if let Err(e) = history::save_history(&self.paths.history, self.history.records()) {
            let reason = format!("{e:#}");
            error!(error = %reason, "saving history failed");
            self.notice = Some(Notice::error(format!("Could not save history: {reason}")));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NoticeKind;
    use crate::theme::Theme;
    use crate::ui;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::fs;
    use tempfile::TempDir;

    fn app_in(dir: &TempDir) -> App {
        let paths = DataPaths::in_dir(dir.path(), "times.txt", "config.json");
        App::new(paths, Duration::from_millis(10)).unwrap()
    }

    fn seeded(dir: &TempDir) -> App {
        fs::write(
            dir.path().join("times.txt"),
            "60,2024-03-01 09:00:00\n45,2024-03-01 09:05:00\n50,2024-03-01 09:10:00\n",
        )
        .unwrap();
        app_in(dir)
    }

    fn history_file(dir: &TempDir) -> String {
        fs::read_to_string(dir.path().join("times.txt")).unwrap_or_default()
    }

    #[test]
    fn stop_appends_solve_and_writes_through() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);
        let t0 = Instant::now();

        app.toggle_timer(t0);
        app.on_tick(t0 + Duration::from_secs(65));
        assert_eq!(format_clock(app.stopwatch.elapsed()), "01:05.00");

        app.toggle_timer(t0 + Duration::from_secs(75));
        assert_eq!(app.history.len(), 1);
        let record = &app.history.records()[0];
        assert_eq!(record.seconds, 75.0);
        assert_eq!(record.minutes(), 1.25);
        assert!(history_file(&dir).starts_with("75,"));
    }

    #[test]
    fn poll_timeout_follows_timer_phase() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);
        assert_eq!(app.poll_timeout(), IDLE_POLL);
        app.toggle_timer(Instant::now());
        assert_eq!(app.poll_timeout(), Duration::from_millis(10));
    }

    #[test]
    fn delete_without_selection_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = seeded(&dir);
        let before = history_file(&dir);

        app.delete_selected();
        assert_eq!(app.history.len(), 3);
        assert_eq!(history_file(&dir), before);

        app.selected = Some(99);
        app.delete_selected();
        assert_eq!(app.history.len(), 3);
        assert_eq!(history_file(&dir), before);
    }

    #[test]
    fn delete_selected_removes_that_row() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = seeded(&dir);

        app.select(1);
        app.delete_selected();
        assert_eq!(app.history.seconds(), vec![60.0, 50.0]);
        assert_eq!(app.selected, Some(1));
        assert_eq!(
            history_file(&dir),
            "60,2024-03-01 09:00:00\n50,2024-03-01 09:10:00\n"
        );

        app.select_last();
        app.delete_selected();
        app.delete_selected();
        assert!(app.history.is_empty());
        assert_eq!(app.selected, None);
    }

    #[test]
    fn delete_all_twice_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = seeded(&dir);
        app.delete_all();
        let once = history_file(&dir);
        app.delete_all();
        assert!(app.history.is_empty());
        assert_eq!(history_file(&dir), once);
        assert_eq!(once, "");
    }

    #[test]
    fn deletions_are_ignored_mid_solve() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = seeded(&dir);
        app.select(0);
        app.toggle_timer(Instant::now());
        app.delete_selected();
        app.delete_all();
        assert_eq!(app.history.len(), 3);
    }

    #[test]
    fn selection_moves_within_bounds() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = seeded(&dir);
        app.select_prev();
        assert_eq!(app.selected, Some(2));
        app.select_next();
        assert_eq!(app.selected, Some(2));
        app.select_first();
        app.select_prev();
        assert_eq!(app.selected, Some(0));
        app.select(7);
        assert_eq!(app.selected, Some(0));
    }

    #[test]
    fn theme_toggle_persists() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);
        assert_eq!(app.settings.theme, Theme::Light);

        app.toggle_theme();
        assert_eq!(app.settings.theme, Theme::Dark);
        let reloaded = settings::load_settings(&dir.path().join("config.json"));
        assert_eq!(reloaded.theme, Theme::Dark);
    }

    #[test]
    fn malformed_lines_raise_a_notice() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("times.txt"), "12,2024-03-01 09:00:00\ngarbage\n").unwrap();
        let app = app_in(&dir);
        assert_eq!(app.history.len(), 1);
        let notice = app.notice.unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert!(notice.text.contains("1 malformed"));
    }

    #[test]
    fn failed_write_keeps_history_in_memory() {
        let dir = tempfile::tempdir().unwrap();
        // a directory where the history file should be makes every write fail
        fs::create_dir(dir.path().join("times.txt")).unwrap();
        let paths = DataPaths::in_dir(dir.path(), "times.txt", "config.json");
        let mut app = App {
            should_quit: false,
            stopwatch: Stopwatch::new(),
            history: History::new(),
            settings: Settings::default(),
            selected: None,
            notice: None,
            terminal_width: 80,
            terminal_height: 24,
            tick: Duration::from_millis(10),
            paths,
        };

        app.record_solve(30.0, "2024-03-01 09:00:00".to_string());
        assert_eq!(app.history.len(), 1);
        let notice = app.notice.clone().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert!(notice.text.starts_with("Could not save history"));
    }

    #[test]
    fn failed_settings_write_keeps_new_theme() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("config.json")).unwrap();
        let mut app = app_in(&dir);
        assert_eq!(app.settings.theme, Theme::Light);

        app.toggle_theme();
        assert_eq!(app.settings.theme, Theme::Dark);
        let notice = app.notice.clone().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert!(notice.text.starts_with("Could not save settings"));
    }

    #[test]
    fn legend_is_drawn_with_ao5() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);
        for (i, s) in [1.0, 2.0, 3.0, 4.0, 5.0].into_iter().enumerate() {
            app.record_solve(s, format!("2024-03-01 09:0{}:00", i));
        }
        let buf = draw(&app);
        assert!(contains_text(&buf, "Average: 3.00"));
        assert!(contains_text(&buf, "Ao5"));
    }

    #[test]
    fn clicks_hit_buttons_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = seeded(&dir);
        app.resize(100, 30);
        let regions = Regions::compute(Rect::new(0, 0, 100, 30));

        let inner = regions.list_inner();
        app.on_click(inner.x + 2, inner.y + 1);
        assert_eq!(app.selected, Some(1));

        let delete = regions.buttons[0];
        app.on_click(delete.x + 1, delete.y + 1);
        assert_eq!(app.history.len(), 2);

        let theme = regions.buttons[2];
        app.on_click(theme.x + 1, theme.y + 1);
        assert_eq!(app.settings.theme, Theme::Dark);
    }

    fn draw(app: &App) -> ratatui::buffer::Buffer {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| ui::render(f, app)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn contains_text(buf: &ratatui::buffer::Buffer, needle: &str) -> bool {
        let area = buf.area;
        (area.top()..area.bottom()).any(|y| {
            let row: String = (area.left()..area.right())
                .map(|x| buf[(x, y)].symbol().to_string())
                .collect();
            row.contains(needle)
        })
    }

    #[test]
    fn empty_history_renders_placeholder_and_na() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_in(&dir);
        let buf = draw(&app);
        assert!(contains_text(&buf, "No solves yet"));
        assert!(contains_text(&buf, "Best Time: N/A"));
        assert!(contains_text(&buf, "00:00.00"));
    }

    #[test]
    fn list_rows_use_clock_format() {
        let dir = tempfile::tempdir().unwrap();
        let app = seeded(&dir);
        let buf = draw(&app);
        assert!(contains_text(&buf, "01:00.00 - 2024-03-01 09:00:00"));
        assert!(contains_text(&buf, "Best Time: 00:45.00"));
        assert!(contains_text(&buf, "Solve Times Graph"));
    }

    #[test]
    fn theme_round_trip_restores_every_cell() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = seeded(&dir);
        let light = draw(&app);

        app.toggle_theme();
        let dark = draw(&app);
        let dark_bg = ui::utils::hex_to_rgb(Theme::Dark.palette().bg);
        assert_eq!(dark[(0, 0)].bg, dark_bg);
        assert_ne!(light, dark);

        app.toggle_theme();
        assert_eq!(draw(&app), light);
    }
}

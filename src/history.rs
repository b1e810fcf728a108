use crate::models::{SolveId, SolveRecord};
use crate::stats::{self, AO5_WINDOW};
use crate::ui::utils::format_clock;
use anyhow::{Context, Result};
use crossterm::terminal as term;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info, warn};

/// Timestamp layout written next to every solve. Must never contain a comma.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Ordered list of solves, oldest first.
#[derive(Debug, Default, Clone)]
pub struct History {
    records: Vec<SolveRecord>,
    next_id: u64,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[SolveRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn push(&mut self, seconds: f64, timestamp: impl Into<String>) -> SolveId {
        let id = SolveId(self.next_id);
        self.next_id += 1;
        self.records.push(SolveRecord {
            id,
            seconds,
            timestamp: timestamp.into(),
        });
        id
    }

    pub fn remove(&mut self, id: SolveId) -> Option<SolveRecord> {
        let idx = self.index_of(id)?;
        Some(self.records.remove(idx))
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn id_at(&self, index: usize) -> Option<SolveId> {
        self.records.get(index).map(|r| r.id)
    }

    pub fn index_of(&self, id: SolveId) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    pub fn seconds(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.seconds).collect()
    }

    pub fn best(&self) -> Option<&SolveRecord> {
        self.records
            .iter()
            .min_by(|a, b| a.seconds.total_cmp(&b.seconds))
    }

    pub fn best_seconds(&self) -> Option<f64> {
        stats::best(&self.seconds())
    }

    pub fn mean_seconds(&self) -> Option<f64> {
        stats::mean(&self.seconds())
    }

    /// Rolling Ao5 keyed by the index of the last solve in each window.
    pub fn ao5_series(&self) -> Vec<(usize, f64)> {
        stats::rolling_mean(&self.seconds(), AO5_WINDOW)
            .into_iter()
            .enumerate()
            .map(|(i, avg)| (i + AO5_WINDOW - 1, avg))
            .collect()
    }
}

#[derive(Debug, Default)]
pub struct HistoryLoad {
    pub history: History,
    /// 1-based numbers of lines that could not be parsed and were dropped
    pub skipped: Vec<usize>,
}

fn parse_line(line: &str) -> Option<(f64, &str)> {
    let (duration, timestamp) = line.split_once(',')?;
    if timestamp.contains(',') {
        return None;
    }
    let seconds: f64 = duration.trim().parse().ok()?;
    if !seconds.is_finite() || seconds < 0.0 {
        return None;
    }
    Some((seconds, timestamp.trim()))
}

pub fn parse_history(raw: &str) -> HistoryLoad {
    let mut load = HistoryLoad::default();

    for (idx, line) in raw.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_line(line) {
            Some((seconds, timestamp)) => {
                load.history.push(seconds, timestamp);
            }
            None => {
                warn!(line = idx + 1, content = line, "skipping malformed history line");
                load.skipped.push(idx + 1);
            }
        }
    }

    load
}

pub fn render_history(records: &[SolveRecord]) -> String {
    let mut out = String::new();
    for r in records {
        out.push_str(&format!("{},{}\n", r.seconds, r.timestamp));
    }
    out
}

pub fn load_history(path: &Path) -> Result<HistoryLoad> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no history file yet");
            return Ok(HistoryLoad::default());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("reading history from {}", path.display()));
        }
    };

    let load = parse_history(&raw);
    info!(
        path = %path.display(),
        solves = load.history.len(),
        skipped = load.skipped.len(),
        "history loaded"
    );
    Ok(load)
}

pub fn save_history(path: &Path, records: &[SolveRecord]) -> Result<()> {
    // create the data directory if it doesn't exist yet
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating data directory {}", parent.display()))?;
    }

    fs::write(path, render_history(records))
        .with_context(|| format!("writing history to {}", path.display()))?;
    debug!(path = %path.display(), solves = records.len(), "history saved");
    Ok(())
}

pub fn history_report(history: &History, term_width: usize) -> String {
    if history.is_empty() {
        return "\n  No solves yet. Finish a solve to start tracking your progress.\n\n".to_string();
    }

    const W_NUM: usize = 6;
    const W_TIME: usize = 12;
    const W_DATE: usize = 12;
    const W_STAMP: usize = 21;

    // fall back to the date only when the full timestamp doesn't fit
    let show_full_stamp = term_width >= 1 + W_NUM + W_TIME + W_STAMP;
    let w_when = if show_full_stamp { W_STAMP } else { W_DATE };
    let divider = "-".repeat(1 + W_NUM + W_TIME + w_when);

    let mut out = String::from("\n");

    let best = history.best_seconds().map(format_clock).unwrap_or_else(|| "-".into());
    let mean = history.mean_seconds().map(format_clock).unwrap_or_else(|| "-".into());
    let ao5 = history
        .ao5_series()
        .last()
        .map(|(_, v)| format_clock(*v))
        .unwrap_or_else(|| "-".into());
    out.push_str(&format!(
        "  {} solves  |  best {}  |  mean {}  |  ao5 {}\n\n",
        history.len(),
        best,
        mean,
        ao5
    ));

    out.push_str(&format!(
        " {:<nw$}{:<tw$}{:<ww$}\n",
        "#",
        "time",
        if show_full_stamp { "finished" } else { "date" },
        nw = W_NUM,
        tw = W_TIME,
        ww = w_when
    ));
    out.push_str(&format!(" {}\n", divider));

    for (i, r) in history.records().iter().enumerate().rev() {
        let when = if show_full_stamp {
            r.timestamp.as_str()
        } else {
            r.timestamp.get(..10).unwrap_or(&r.timestamp)
        };
        out.push_str(&format!(
            " {:<nw$}{:<tw$}{:<ww$}\n",
            i + 1,
            format_clock(r.seconds),
            when,
            nw = W_NUM,
            tw = W_TIME,
            ww = w_when
        ));
    }

    out.push_str(&format!(" {}\n\n", divider));
    out
}

pub fn show_history(path: &Path) -> Result<()> {
    let load = load_history(path)?;

    let term_width = term::size()
        .map(|(w, _)| w as usize)
        .unwrap_or(80)
        .max(40);

    print!("{}", history_report(&load.history, term_width));
    if !load.skipped.is_empty() {
        eprintln!(
            "  Warning: skipped {} malformed line(s) in {}\n",
            load.skipped.len(),
            path.display()
        );
    }
    Ok(())
}

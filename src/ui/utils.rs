use crate::app::App;
use crate::models::NoticeKind;
use crate::theme::ERROR_COLOR;
use ratatui::style::Color;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn hex_to_rgb(hex: &str) -> Color {
    let hex = hex.trim_start_matches('#');
    if hex.len() == 6 {
        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);
        Color::Rgb(r, g, b)
    } else {
        Color::White
    }
}

/// `MM:SS.ss` for a duration in seconds.
///
/// Rounds to whole centiseconds before splitting, so the seconds field never
/// reads `60.00`.
pub fn format_clock(seconds: f64) -> String {
    let centis = (seconds.max(0.0) * 100.0).round() as u64;
    let minutes = centis / 6000;
    let rem = centis % 6000;
    format!("{:02}:{:02}.{:02}", minutes, rem / 100, rem % 100)
}

pub fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let palette = app.settings.theme.palette();
    let fg = hex_to_rgb(palette.fg);

    let header = Line::from(vec![
        Span::styled("cubetimer", Style::default().fg(fg).add_modifier(Modifier::BOLD)),
        Span::styled(format!(" | theme: {}", app.settings.theme), Style::default().fg(fg)),
    ]);
    f.render_widget(Paragraph::new(header), area);
}

pub fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let fg = hex_to_rgb(app.settings.theme.palette().fg);

    let line = match &app.notice {
        Some(notice) => {
            let color = match notice.kind {
                NoticeKind::Info => fg,
                NoticeKind::Error => hex_to_rgb(ERROR_COLOR),
            };
            Line::from(Span::styled(notice.text.clone(), Style::default().fg(color)))
        }
        None => {
            let h = &app.history;
            let mean = h.mean_seconds().map(format_clock).unwrap_or_else(|| "-".into());
            let ao5 = h
                .ao5_series()
                .last()
                .map(|(_, v)| format_clock(*v))
                .unwrap_or_else(|| "-".into());
            Line::from(Span::styled(
                format!("{} solves | mean {} | ao5 {}", h.len(), mean, ao5),
                Style::default().fg(fg),
            ))
        }
    };

    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

pub fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let fg = hex_to_rgb(app.settings.theme.palette().fg);
    let footer = Paragraph::new(
        "space: start/stop | ↑↓: select | d: delete | D: delete all | t: theme | esc: quit",
    )
    .style(Style::default().fg(fg).add_modifier(Modifier::DIM))
    .alignment(Alignment::Center);
    f.render_widget(footer, area);
}

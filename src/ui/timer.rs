use crate::app::App;
use crate::models::TimerPhase;
use crate::ui::layout::{list_offset, Button, Regions};
use crate::ui::utils::{format_clock, hex_to_rgb};
use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, List, ListItem, ListState, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, regions: &Regions) {
    let palette = app.settings.theme.palette();
    let fg = hex_to_rgb(palette.fg);
    let bg = hex_to_rgb(palette.bg);
    let base = Style::default().fg(fg).bg(bg);

    let clock_title = match app.stopwatch.phase() {
        TimerPhase::Running => " Solving ",
        TimerPhase::Idle => " Time ",
    };
    f.render_widget(
        Paragraph::new(format_clock(app.stopwatch.elapsed()))
            .alignment(Alignment::Center)
            .style(base.add_modifier(Modifier::BOLD))
            .block(Block::bordered().title(clock_title).style(base)),
        regions.clock,
    );

    let best_text = match app.history.best() {
        Some(best) => format!("Best Time: {}", format_clock(best.seconds)),
        None => "Best Time: N/A".to_string(),
    };
    f.render_widget(
        Paragraph::new(best_text).alignment(Alignment::Center).style(base),
        regions.best,
    );

    let items: Vec<ListItem> = app
        .history
        .records()
        .iter()
        .map(|r| ListItem::new(format!("{} - {}", format_clock(r.seconds), r.timestamp)))
        .collect();

    let visible_rows = regions.list_inner().height as usize;
    let mut state = ListState::default()
        .with_selected(app.selected)
        .with_offset(list_offset(app.selected, visible_rows));

    let list = List::new(items)
        .block(Block::bordered().title(" Solves ").style(base))
        .style(base)
        .highlight_style(Style::default().fg(bg).bg(fg).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");
    f.render_stateful_widget(list, regions.list, &mut state);

    for (button, area) in Button::ALL.into_iter().zip(regions.buttons) {
        let mut style = base;
        // deletions are locked while a solve is in progress
        if app.stopwatch.is_running() && button != Button::ToggleTheme {
            style = style.add_modifier(Modifier::DIM);
        }
        f.render_widget(
            Paragraph::new(Line::from(button.label()))
                .alignment(Alignment::Center)
                .style(style)
                .block(Block::bordered().style(style)),
            area,
        );
    }
}

use crate::app::App;
use crate::history::History;
use crate::theme::{Palette, AO5_COLOR, MEAN_COLOR, SOLVES_COLOR};
use crate::ui::utils::hex_to_rgb;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Chart, Dataset, GraphType, LegendPosition, Paragraph},
    Frame,
};

/// Plot-ready series derived from the history. X values are 1-based solve
/// numbers, y values seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub solves: Vec<(f64, f64)>,
    pub mean: f64,
    pub mean_line: Vec<(f64, f64)>,
    pub ao5: Vec<(f64, f64)>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
}

impl ChartData {
    pub fn from_history(history: &History) -> Option<Self> {
        let mean = history.mean_seconds()?;

        let solves: Vec<(f64, f64)> = history
            .records()
            .iter()
            .enumerate()
            .map(|(i, r)| ((i + 1) as f64, r.seconds))
            .collect();

        let ao5: Vec<(f64, f64)> = history
            .ao5_series()
            .into_iter()
            .map(|(i, avg)| ((i + 1) as f64, avg))
            .collect();

        // a single solve still needs a non-empty x range
        let x_max = (solves.len() as f64).max(2.0);
        let y_top = solves
            .iter()
            .map(|(_, y)| *y)
            .fold(0.0_f64, f64::max);

        Some(Self {
            mean,
            mean_line: vec![(1.0, mean), (x_max, mean)],
            solves,
            ao5,
            x_bounds: [1.0, x_max],
            y_bounds: [0.0, (y_top * 1.1).max(1.0)],
        })
    }
}

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let palette = app.settings.theme.palette();
    match ChartData::from_history(&app.history) {
        Some(data) => draw_chart(f, &data, palette, area),
        None => draw_placeholder(f, palette, area),
    }
}

fn draw_placeholder(f: &mut Frame, palette: Palette, area: Rect) {
    let base = Style::default().fg(hex_to_rgb(palette.fg)).bg(hex_to_rgb(palette.bg));
    let block = Block::bordered().style(base);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Fill(1), Constraint::Length(1), Constraint::Fill(1)])
        .split(inner);

    f.render_widget(
        Paragraph::new("No solves yet").alignment(Alignment::Center).style(base),
        rows[1],
    );
}

fn draw_chart(f: &mut Frame, data: &ChartData, palette: Palette, area: Rect) {
    let fg = hex_to_rgb(palette.fg);
    let base = Style::default().fg(fg).bg(hex_to_rgb(palette.bg));
    let solves_color = hex_to_rgb(SOLVES_COLOR);

    let mut datasets = vec![
        Dataset::default()
            .name("Solve Times")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(solves_color))
            .data(&data.solves),
        // point markers on top of the line, kept out of the legend
        Dataset::default()
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(solves_color))
            .data(&data.solves),
        Dataset::default()
            .name(format!("Average: {:.2}", data.mean))
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(hex_to_rgb(MEAN_COLOR)))
            .data(&data.mean_line),
    ];

    if !data.ao5.is_empty() {
        datasets.push(
            Dataset::default()
                .name("Ao5")
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(hex_to_rgb(AO5_COLOR)))
                .data(&data.ao5),
        );
    }

    let [x_min, x_max] = data.x_bounds;
    let x_labels = vec![
        Span::styled(format!("{}", x_min), base),
        Span::styled(format!("{}", x_max), base),
    ];

    let [y_min, y_max] = data.y_bounds;
    let y_labels = vec![
        Span::styled(format!("{:.1}", y_min), base),
        Span::styled(format!("{:.1}", (y_min + y_max) / 2.0), base),
        Span::styled(format!("{:.1}", y_max), base),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::bordered()
                .title(Line::from(" Solve Times Graph ").centered())
                .style(base),
        )
        .style(base)
        .legend_position(Some(LegendPosition::TopRight))
        .hidden_legend_constraints((Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)))
        .x_axis(
            Axis::default()
                .title("Solve Number")
                .style(base)
                .bounds(data.x_bounds)
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title("Time (s)")
                .style(base)
                .bounds(data.y_bounds)
                .labels(y_labels),
        );

    f.render_widget(chart, area);
}

pub mod chart;
pub mod layout;
pub mod timer;
pub mod utils;

use crate::app::App;
use crate::ui::layout::Regions;
use crate::ui::utils::{hex_to_rgb, render_footer, render_header, render_status};
use ratatui::{style::Style, widgets::Block, Frame};

pub fn render(f: &mut Frame, app: &App) {
    let palette = app.settings.theme.palette();
    f.render_widget(
        Block::default().style(Style::default().bg(hex_to_rgb(palette.bg)).fg(hex_to_rgb(palette.fg))),
        f.area(),
    );

    let regions = Regions::compute(f.area());
    render_header(f, app, regions.header);
    timer::draw(f, app, &regions);
    chart::draw(f, app, regions.chart);
    render_status(f, app, regions.status);
    render_footer(f, app, regions.footer);
}

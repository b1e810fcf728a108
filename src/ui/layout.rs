use ratatui::layout::{Constraint, Direction, Layout, Margin, Position, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    DeleteSelected,
    DeleteAll,
    ToggleTheme,
}

impl Button {
    pub const ALL: [Button; 3] = [Button::DeleteSelected, Button::DeleteAll, Button::ToggleTheme];

    pub fn label(self) -> &'static str {
        match self {
            Button::DeleteSelected => "Delete Selected",
            Button::DeleteAll => "Delete All",
            Button::ToggleTheme => "Toggle Theme",
        }
    }
}

/// Screen areas of every widget.
///
/// Drawing and mouse hit-testing both go through [`Regions::compute`] so a
/// click always lands on what was drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Regions {
    pub header: Rect,
    pub clock: Rect,
    pub best: Rect,
    pub list: Rect,
    pub chart: Rect,
    pub buttons: [Rect; 3],
    pub status: Rect,
    pub footer: Rect,
}

impl Regions {
    pub fn compute(area: Rect) -> Self {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Fill(1),
                Constraint::Percentage(94),
                Constraint::Fill(1),
            ])
            .split(area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(6),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(columns[1]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(rows[3]);

        let button_row = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Fill(1), Constraint::Fill(1), Constraint::Fill(1)])
            .split(rows[4]);

        Self {
            header: rows[0],
            clock: rows[1],
            best: rows[2],
            list: body[0],
            chart: body[1],
            buttons: [button_row[0], button_row[1], button_row[2]],
            status: rows[5],
            footer: rows[6],
        }
    }

    pub fn button_at(&self, x: u16, y: u16) -> Option<Button> {
        let pos = Position::new(x, y);
        Button::ALL
            .into_iter()
            .zip(self.buttons)
            .find(|(_, rect)| rect.contains(pos))
            .map(|(button, _)| button)
    }

    /// Rows of the list inside its border.
    pub fn list_inner(&self) -> Rect {
        self.list.inner(Margin::new(1, 1))
    }

    /// Index of the list entry under `(x, y)` given the current scroll offset.
    pub fn list_row_at(&self, x: u16, y: u16, offset: usize) -> Option<usize> {
        let inner = self.list_inner();
        if !inner.contains(Position::new(x, y)) {
            return None;
        }
        Some(offset + (y - inner.y) as usize)
    }
}

/// First visible list row that keeps `selected` on screen.
pub fn list_offset(selected: Option<usize>, visible_rows: usize) -> usize {
    match selected {
        Some(idx) if visible_rows > 0 && idx >= visible_rows => idx + 1 - visible_rows,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regions() -> Regions {
        Regions::compute(Rect::new(0, 0, 100, 30))
    }

    #[test]
    fn every_area_is_inside_the_frame() {
        let area = Rect::new(0, 0, 100, 30);
        let r = regions();
        for rect in [r.header, r.clock, r.best, r.list, r.chart, r.status, r.footer]
            .into_iter()
            .chain(r.buttons)
        {
            assert!(area.contains(rect.as_position()));
            assert!(rect.right() <= area.right() && rect.bottom() <= area.bottom());
        }
    }

    #[test]
    fn click_in_button_maps_to_button() {
        let r = regions();
        for (button, rect) in Button::ALL.into_iter().zip(r.buttons) {
            assert_eq!(r.button_at(rect.x + 1, rect.y + 1), Some(button));
        }
        assert_eq!(r.button_at(r.header.x, r.header.y), None);
    }

    #[test]
    fn click_in_list_maps_to_row() {
        let r = regions();
        let inner = r.list_inner();
        assert_eq!(r.list_row_at(inner.x, inner.y, 0), Some(0));
        assert_eq!(r.list_row_at(inner.x, inner.y + 2, 5), Some(7));
        // the border itself is not a row
        assert_eq!(r.list_row_at(r.list.x, r.list.y, 0), None);
    }

    #[test]
    fn offset_scrolls_only_when_selection_leaves_view() {
        assert_eq!(list_offset(None, 5), 0);
        assert_eq!(list_offset(Some(4), 5), 0);
        assert_eq!(list_offset(Some(5), 5), 1);
        assert_eq!(list_offset(Some(12), 5), 8);
        assert_eq!(list_offset(Some(3), 0), 0);
    }
}

use ratatui::layout::{Constraint, Direction, Layout as RatLayout, Rect};

pub struct Layout {
    pub inner_area: Rect, // Area inside the outer border
    pub picker_area: Rect,
    pub note_area: Rect,
    pub history_area: Rect,
    pub status_area: Rect,
}

impl Layout {
    /// Minimum terminal dimensions (inner area, without the outer border).
    /// Width fits five picker cells of 7 columns plus borders; height fits
    /// picker (4) + note (5) + history (3) + status (1) with a line to spare.
    pub const MIN_WIDTH: u16 = 38;
    pub const MIN_HEIGHT: u16 = 14;

    /// Rows of text inside the note pane
    pub const NOTE_LINES: u16 = 3;

    pub fn calculate(size: Rect) -> Self {
        let min_width_with_border = Self::MIN_WIDTH + 2;
        let min_height_with_border = Self::MIN_HEIGHT + 2;
        let width = size.width.max(min_width_with_border);
        let height = size.height.max(min_height_with_border);
        let size = Rect::new(size.x, size.y, width, height);

        let inner_area = Rect::new(
            size.x + 1,
            size.y + 1,
            size.width.saturating_sub(2),
            size.height.saturating_sub(2),
        );

        let vertical = RatLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),                    // Picker: border + glyph + label
                Constraint::Length(Self::NOTE_LINES + 2), // Note
                Constraint::Min(3),                       // History
                Constraint::Length(1),                    // Status
            ])
            .split(inner_area);

        Self {
            inner_area,
            picker_area: vertical[0],
            note_area: vertical[1],
            history_area: vertical[2],
            status_area: vertical[3],
        }
    }
}

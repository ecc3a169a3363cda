use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::widgets::color::Palette;
use crate::tui::widgets::editor::Editor;

const PLACEHOLDER: &str = "What happened today?";

pub fn render_note_input(f: &mut Frame, area: Rect, editor: &Editor, focused: bool, palette: &Palette) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Add a note (optional)")
        .border_style(palette.border(focused))
        .style(palette.base());
    let inner = block.inner(area);

    let paragraph = if editor.is_blank() && !focused {
        Paragraph::new(PLACEHOLDER).style(palette.muted())
    } else {
        let visible: Vec<Line> = editor
            .lines
            .iter()
            .skip(editor.scroll_offset)
            .take(inner.height as usize)
            .map(|l| Line::from(l.as_str()))
            .collect();
        Paragraph::new(visible).style(palette.base())
    };
    f.render_widget(paragraph.block(block), area);

    if focused && inner.width > 0 && inner.height > 0 {
        let row = editor.cursor_line.saturating_sub(editor.scroll_offset) as u16;
        let col = editor.cursor_display_col() as u16;
        f.set_cursor_position(Position::new(
            inner.x + col.min(inner.width - 1),
            inner.y + row.min(inner.height - 1),
        ));
    }
}

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use crate::MoodEntry;
use crate::tui::widgets::color::Palette;
use crate::utils::format_entry_date;

/// Build the lines shown for one entry: glyph + label, date, then the note if any
pub fn entry_lines(entry: &MoodEntry, date_format: &str, palette: &Palette) -> Vec<Line<'static>> {
    let mood = entry.mood();
    let mut lines = vec![
        Line::from(vec![
            Span::raw(format!("{}  ", mood.glyph())),
            Span::styled(mood.label(), palette.base().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(Span::styled(
            format!("    {}", format_entry_date(entry.date(), date_format)),
            palette.muted(),
        )),
    ];
    if entry.has_note() {
        lines.extend(entry.note().lines().map(|l| Line::from(format!("    {}", l))));
    }
    lines
}

pub fn render_history_list(
    f: &mut Frame,
    area: Rect,
    entries: &[MoodEntry],
    list_state: &mut ListState,
    focused: bool,
    date_format: &str,
    palette: &Palette,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("History ({})", entries.len()))
        .border_style(palette.border(focused))
        .style(palette.base());

    if entries.is_empty() {
        let paragraph = Paragraph::new("No moods saved yet")
            .alignment(Alignment::Center)
            .style(palette.muted())
            .block(block);
        f.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| ListItem::new(entry_lines(entry, date_format, palette)))
        .collect();

    // Only show the selection while the pane has focus
    let highlight = if focused {
        palette.highlight()
    } else {
        palette.base()
    };
    let list = List::new(items).block(block).highlight_style(highlight);
    f.render_stateful_widget(list, area, list_state);
}

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::Mood;
use crate::tui::widgets::color::Palette;

pub fn render_mood_picker(f: &mut Frame, area: Rect, selected: Mood, focused: bool, palette: &Palette) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("How do you feel today?")
        .border_style(palette.border(focused))
        .style(palette.base());
    let inner = block.inner(area);
    f.render_widget(block, area);

    // Five equal cells, glyph above label
    let cells = Layout::horizontal([Constraint::Ratio(1, 5); 5]).split(inner);
    for (mood, cell) in Mood::ALL.iter().zip(cells.iter()) {
        let style = if *mood == selected {
            palette.highlight()
        } else {
            palette.base()
        };
        let label = truncate(mood.label(), cell.width as usize);
        let paragraph = Paragraph::new(vec![Line::from(mood.glyph()), Line::from(label)])
            .alignment(Alignment::Center)
            .style(style);
        f.render_widget(paragraph, *cell);
    }
}

/// "Very angry" does not fit narrow cells
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        text.chars().take(width.saturating_sub(1)).collect::<String>() + "…"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Theme;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn truncates_long_labels() {
        assert_eq!(truncate("Very angry", 20), "Very angry");
        assert_eq!(truncate("Very angry", 6), "Very …");
    }

    #[test]
    fn renders_every_label() {
        let mut terminal = Terminal::new(TestBackend::new(80, 4)).unwrap();
        let palette = Palette::from_theme(&Theme::default());
        terminal
            .draw(|f| render_mood_picker(f, f.area(), Mood::Happy, true, &palette))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let row: String = (0..80u16).map(|x| buffer[(x, 2u16)].symbol().to_string()).collect();
        for mood in Mood::ALL {
            assert!(row.contains(mood.label()), "missing {} in {:?}", mood.label(), row);
        }
    }
}

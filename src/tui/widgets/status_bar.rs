use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::Paragraph;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::widgets::color::Palette;

const SEPARATOR: &str = " • ";
const ELLIPSIS: &str = "...";

/// Join as many hints as fit in `max_width` columns, ending with "..." when some are dropped
pub fn fit_hints(hints: &[String], max_width: usize) -> String {
    let mut text = String::new();
    for (i, hint) in hints.iter().enumerate() {
        let current = text.width();
        let needed = if i == 0 {
            hint.width()
        } else {
            current + SEPARATOR.width() + hint.width()
        };

        if needed > max_width {
            if i == 0 {
                text = truncate(hint, max_width);
            } else if current + ELLIPSIS.len() <= max_width {
                text.push_str(ELLIPSIS);
            } else {
                text = take_columns(&text, max_width.saturating_sub(ELLIPSIS.len())) + ELLIPSIS;
            }
            break;
        }

        if i > 0 {
            text.push_str(SEPARATOR);
        }
        text.push_str(hint);
    }
    text
}

fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    take_columns(text, max_width.saturating_sub(ELLIPSIS.len())) + ELLIPSIS
}

/// Longest prefix of `text` that fits in `columns` terminal cells
fn take_columns(text: &str, columns: usize) -> String {
    let mut used = 0;
    let mut kept = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > columns {
            break;
        }
        used += w;
        kept.push(ch);
    }
    kept
}

pub fn render_status_bar(
    f: &mut Frame,
    area: Rect,
    message: Option<&str>,
    key_hints: &[String],
    palette: &Palette,
) {
    let max_width = area.width as usize;
    // Messages take over the bar until they time out
    let (content, style) = match message {
        Some(msg) => (truncate(msg, max_width), palette.highlight()),
        None => (fit_hints(key_hints, max_width), palette.base()),
    };
    f.render_widget(Paragraph::new(content).style(style), area);
}

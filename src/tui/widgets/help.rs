use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::Config;
use crate::tui::widgets::color::Palette;
use crate::utils::format_key_binding_for_display as key;

pub fn render_help(f: &mut Frame, area: Rect, config: &Config, palette: &Palette) {
    let popup_area = popup_area(area, 60, 70);

    // Clear first so the panes underneath don't show through
    f.render_widget(Clear, popup_area);

    let paragraph = Paragraph::new(build_help_text(config))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help - Key Bindings")
                .title_alignment(Alignment::Center)
                .style(palette.base()),
        )
        .style(palette.base())
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, popup_area);
}

/// Centered rect taking the given percentage of `area`
fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}

pub fn build_help_text(config: &Config) -> String {
    let kb = &config.key_bindings;
    let mut text = String::new();

    text.push_str("Mood picker:\n");
    text.push_str(&format!("  {} / {}: Previous / next mood\n", key(&kb.mood_prev), key(&kb.mood_next)));
    text.push_str("  1-5: Pick a mood directly\n");
    text.push_str("  Enter: Write a note\n");
    text.push('\n');

    text.push_str("Note:\n");
    text.push_str("  Enter: New line\n");
    text.push_str("  Arrow keys / Home / End: Move cursor\n");
    text.push_str("  Esc: Back to the picker\n");
    text.push('\n');

    text.push_str("History:\n");
    text.push_str(&format!("  {} / {}: Scroll\n", key(&kb.list_up), key(&kb.list_down)));
    text.push_str("  Home / End: Newest / oldest\n");
    text.push('\n');

    text.push_str("General:\n");
    text.push_str(&format!("  {}: Save mood\n", key(&kb.save)));
    text.push_str(&format!("  {} / Shift+Tab: Next / previous pane\n", key(&kb.next_focus)));
    text.push_str(&format!("  {}: Show/hide help\n", key(&kb.help)));
    text.push_str(&format!("  {}: Quit (outside the note)\n", key(&kb.quit)));
    text.push_str("  Ctrl+c: Quit\n");

    text
}

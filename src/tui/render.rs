use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::widgets::{Block, Borders};

use crate::tui::app::{Focus, Mode};
use crate::tui::widgets::{
    color::Palette,
    help::render_help,
    history_list::render_history_list,
    mood_picker::render_mood_picker,
    note_input::render_note_input,
    status_bar::render_status_bar,
};
use crate::tui::{App, Layout};

pub fn render(f: &mut Frame, app: &mut App, layout: &Layout) {
    let palette = Palette::from_theme(&app.config.get_active_theme());

    let outer_block = Block::default()
        .borders(Borders::ALL)
        .title("Mood Tracker")
        .title_alignment(Alignment::Center)
        .style(palette.base());
    f.render_widget(outer_block, f.area());

    render_mood_picker(
        f,
        layout.picker_area,
        app.selected_mood,
        app.focus == Focus::Picker,
        &palette,
    );

    // Cursor is only placed while the note has focus and help is closed
    render_note_input(
        f,
        layout.note_area,
        &app.note,
        app.focus == Focus::Note && app.mode == Mode::Normal,
        &palette,
    );

    let history = app.history();
    app.sync_history_selection();
    render_history_list(
        f,
        layout.history_area,
        &history,
        &mut app.history_state,
        app.focus == Focus::History,
        &app.config.date_format,
        &palette,
    );

    let hints = app.key_hints();
    render_status_bar(
        f,
        layout.status_area,
        app.status_message.as_deref(),
        &hints,
        &palette,
    );

    if app.mode == Mode::Help {
        render_help(f, layout.inner_area, &app.config, &palette);
    }
}

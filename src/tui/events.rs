use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    size as terminal_size,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use std::io;
use std::time::Duration;

use crate::Mood;
use crate::config::KeyBindings;
use crate::tui::App;
use crate::tui::app::{Focus, Mode};
use crate::tui::error::TuiError;
use crate::tui::layout::Layout;
use crate::utils::{ParsedKeyBinding, has_primary_modifier, parse_key_binding};

/// Restores the terminal when dropped, including during a panic unwind.
/// A terminal left in raw mode or the alternate screen is unusable.
struct TerminalGuard {
    raw_mode_enabled: bool,
    alternate_screen_enabled: bool,
}

impl TerminalGuard {
    fn new() -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut guard = Self {
            raw_mode_enabled: true,
            alternate_screen_enabled: false,
        };
        execute!(io::stdout(), EnterAlternateScreen)?;
        guard.alternate_screen_enabled = true;
        Ok(guard)
    }

    /// Restore explicitly on normal exit; drop then does nothing
    fn restore(&mut self) -> Result<(), TuiError> {
        if self.raw_mode_enabled {
            disable_raw_mode()?;
            self.raw_mode_enabled = false;
        }
        if self.alternate_screen_enabled {
            execute!(io::stdout(), LeaveAlternateScreen)?;
            self.alternate_screen_enabled = false;
        }
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Already cleaning up; errors have nowhere to go
        if self.raw_mode_enabled {
            let _ = disable_raw_mode();
        }
        if self.alternate_screen_enabled {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
        }
    }
}

/// Key bindings from the config, parsed once at startup
#[derive(Debug, Clone)]
pub struct Keymap {
    pub quit: ParsedKeyBinding,
    pub save: ParsedKeyBinding,
    pub help: ParsedKeyBinding,
    pub next_focus: ParsedKeyBinding,
    pub mood_prev: ParsedKeyBinding,
    pub mood_next: ParsedKeyBinding,
    pub list_up: ParsedKeyBinding,
    pub list_down: ParsedKeyBinding,
}

impl Keymap {
    pub fn from_config(bindings: &KeyBindings) -> Result<Self, TuiError> {
        let parse = |name: &str, value: &str| {
            parse_key_binding(value)
                .map_err(|e| TuiError::KeyBindingError(format!("{}: {}", name, e)))
        };
        Ok(Self {
            quit: parse("quit", &bindings.quit)?,
            save: parse("save", &bindings.save)?,
            help: parse("help", &bindings.help)?,
            next_focus: parse("next_focus", &bindings.next_focus)?,
            mood_prev: parse("mood_prev", &bindings.mood_prev)?,
            mood_next: parse("mood_next", &bindings.mood_next)?,
            list_up: parse("list_up", &bindings.list_up)?,
            list_down: parse("list_down", &bindings.list_down)?,
        })
    }
}

pub fn run_event_loop(mut app: App) -> Result<(), TuiError> {
    let keymap = Keymap::from_config(&app.config.key_bindings)?;

    // Check size before entering the alternate screen so the message stays visible
    let (width, height) = terminal_size()?;
    let min_width_with_border = Layout::MIN_WIDTH + 2;
    let min_height_with_border = Layout::MIN_HEIGHT + 2;
    if width < min_width_with_border || height < min_height_with_border {
        return Err(TuiError::RenderError(format!(
            "Terminal size too small. Current: {}x{}, Minimum required: {}x{}. Please resize your terminal window.",
            width, height, min_width_with_border, min_height_with_border
        )));
    }

    let mut guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    loop {
        app.check_status_message_timeout();

        let size = terminal.size()?;
        let rect = Rect::new(0, 0, size.width, size.height);
        let layout = Layout::calculate(rect);
        app.note.update_scroll(Layout::NOTE_LINES as usize);

        terminal.draw(|f| crate::tui::render::render(f, &mut app, &layout))?;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                // Only Press events; Windows also reports Release
                Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    if handle_key_event(&mut app, &keymap, key_event) {
                        break;
                    }
                }
                // Resize needs nothing: layout is recomputed every frame
                _ => {}
            }
        }
    }

    guard.restore()?;
    log::info!("event=app_exit module=tui status=ok entries={}", app.store.len());

    Ok(())
}

/// Apply one key press to the app. Returns true when the user asked to quit.
pub fn handle_key_event(app: &mut App, keymap: &Keymap, key_event: KeyEvent) -> bool {
    // Ctrl+C always quits
    if key_event.code == KeyCode::Char('c') && key_event.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if app.mode == Mode::Help {
        if keymap.help.matches(&key_event)
            || keymap.quit.matches(&key_event)
            || key_event.code == KeyCode::Esc
        {
            app.exit_help_mode();
        }
        return false;
    }

    if keymap.save.matches(&key_event) {
        app.save_entry();
        return false;
    }
    if keymap.help.matches(&key_event) {
        app.enter_help_mode();
        return false;
    }
    if keymap.next_focus.matches(&key_event) {
        app.cycle_focus(true);
        return false;
    }
    if key_event.code == KeyCode::BackTab {
        app.cycle_focus(false);
        return false;
    }

    match app.focus {
        Focus::Note => {
            handle_note_key(app, key_event);
            false
        }
        Focus::Picker => handle_picker_key(app, keymap, key_event),
        Focus::History => handle_history_key(app, keymap, key_event),
    }
}

fn handle_note_key(app: &mut App, key_event: KeyEvent) {
    match key_event.code {
        KeyCode::Esc => app.focus = Focus::Picker,
        KeyCode::Enter => app.note.insert_newline(),
        KeyCode::Backspace => app.note.delete_char(),
        KeyCode::Delete => app.note.delete_forward(),
        KeyCode::Left => app.note.move_cursor_left(),
        KeyCode::Right => app.note.move_cursor_right(),
        KeyCode::Up => app.note.move_cursor_up(),
        KeyCode::Down => app.note.move_cursor_down(),
        KeyCode::Home => app.note.move_to_line_start(),
        KeyCode::End => app.note.move_to_line_end(),
        KeyCode::Char(ch) if !has_primary_modifier(key_event.modifiers) => {
            app.note.insert_char(ch);
        }
        _ => {}
    }
}

fn handle_picker_key(app: &mut App, keymap: &Keymap, key_event: KeyEvent) -> bool {
    if keymap.quit.matches(&key_event) {
        return true;
    }
    if keymap.mood_prev.matches(&key_event) {
        app.previous_mood();
        return false;
    }
    if keymap.mood_next.matches(&key_event) {
        app.next_mood();
        return false;
    }
    match key_event.code {
        KeyCode::Char(ch @ '1'..='5') => {
            let index = ch as usize - '1' as usize;
            if let Some(mood) = Mood::from_index(index) {
                app.select_mood(mood);
            }
        }
        KeyCode::Enter | KeyCode::Down => app.focus = Focus::Note,
        _ => {}
    }
    false
}

fn handle_history_key(app: &mut App, keymap: &Keymap, key_event: KeyEvent) -> bool {
    if keymap.quit.matches(&key_event) {
        return true;
    }
    if keymap.list_up.matches(&key_event) || key_event.code == KeyCode::Up {
        app.move_history_up();
        return false;
    }
    if keymap.list_down.matches(&key_event) || key_event.code == KeyCode::Down {
        app.move_history_down();
        return false;
    }
    match key_event.code {
        KeyCode::Home => app.move_history_to_top(),
        KeyCode::End => app.move_history_to_bottom(),
        KeyCode::Esc => app.focus = Focus::Picker,
        _ => {}
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SlotStorage;
    use crate::{Config, EntryStore, MemoryStorage};

    fn setup() -> (App, Keymap) {
        let storage: Box<dyn SlotStorage> = Box::new(MemoryStorage::new());
        let store = EntryStore::open(storage).unwrap();
        let config = Config::default();
        let keymap = Keymap::from_config(&config.key_bindings).unwrap();
        (App::new(config, store), keymap)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App, keymap: &Keymap, text: &str) {
        for ch in text.chars() {
            handle_key_event(app, keymap, key(KeyCode::Char(ch)));
        }
    }

    #[test]
    fn pick_type_and_save() {
        let (mut app, keymap) = setup();
        handle_key_event(&mut app, &keymap, key(KeyCode::Char('2')));
        assert_eq!(app.selected_mood, Mood::Sad);

        handle_key_event(&mut app, &keymap, key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Note);
        type_text(&mut app, &keymap, "Rough one");

        handle_key_event(&mut app, &keymap, ctrl('s'));
        let history = app.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].mood(), Mood::Sad);
        assert_eq!(history[0].note(), "Rough one");
        assert_eq!(app.note.text(), "");
    }

    #[test]
    fn quit_key_is_text_while_typing_note() {
        let (mut app, keymap) = setup();
        app.focus = Focus::Note;
        assert!(!handle_key_event(&mut app, &keymap, key(KeyCode::Char('q'))));
        assert_eq!(app.note.text(), "q");

        handle_key_event(&mut app, &keymap, key(KeyCode::Esc));
        assert_eq!(app.focus, Focus::Picker);
        assert!(handle_key_event(&mut app, &keymap, key(KeyCode::Char('q'))));
    }

    #[test]
    fn arrows_cycle_moods_in_picker() {
        let (mut app, keymap) = setup();
        handle_key_event(&mut app, &keymap, key(KeyCode::Right));
        assert_eq!(app.selected_mood, Mood::Great);
        handle_key_event(&mut app, &keymap, key(KeyCode::Right));
        assert_eq!(app.selected_mood, Mood::Angry);
        handle_key_event(&mut app, &keymap, key(KeyCode::Left));
        assert_eq!(app.selected_mood, Mood::Great);
    }

    #[test]
    fn help_swallows_keys_until_closed() {
        let (mut app, keymap) = setup();
        handle_key_event(&mut app, &keymap, key(KeyCode::F(1)));
        assert_eq!(app.mode, Mode::Help);
        handle_key_event(&mut app, &keymap, key(KeyCode::Right));
        assert_eq!(app.selected_mood, Mood::Happy);
        assert!(!handle_key_event(&mut app, &keymap, key(KeyCode::Char('q'))));
        assert_eq!(app.mode, Mode::Normal);
    }

    #[test]
    fn ctrl_c_quits_from_anywhere() {
        let (mut app, keymap) = setup();
        app.focus = Focus::Note;
        assert!(handle_key_event(&mut app, &keymap, ctrl('c')));
    }

    #[test]
    fn invalid_binding_is_reported() {
        let mut bindings = KeyBindings::default();
        bindings.save = "Hyper+s".to_string();
        let err = Keymap::from_config(&bindings).unwrap_err();
        assert!(err.to_string().contains("save"));
    }
}

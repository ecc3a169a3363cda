use crate::storage::SlotStorage;
use crate::tui::widgets::editor::Editor;
use crate::utils::format_key_binding_for_display;
use crate::{Config, EntryStore, Mood, MoodEntry};
use ratatui::widgets::ListState;
use std::time::{Duration, Instant};

/// How long a status message stays in the status bar
const STATUS_MESSAGE_TIMEOUT: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Picker,
    Note,
    History,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Picker => Focus::Note,
            Focus::Note => Focus::History,
            Focus::History => Focus::Picker,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Focus::Picker => Focus::History,
            Focus::Note => Focus::Picker,
            Focus::History => Focus::Note,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Help,
}

pub struct App {
    pub config: Config,
    pub store: EntryStore<Box<dyn SlotStorage>>,
    pub selected_mood: Mood,
    pub note: Editor,
    pub focus: Focus,
    pub mode: Mode,
    pub history_state: ListState,
    pub status_message: Option<String>,
    status_message_time: Option<Instant>,
}

impl App {
    pub fn new(config: Config, store: EntryStore<Box<dyn SlotStorage>>) -> Self {
        let selected_mood = config.default_mood;
        let mut app = Self {
            config,
            store,
            selected_mood,
            note: Editor::new(),
            focus: Focus::Picker,
            mode: Mode::Normal,
            history_state: ListState::default(),
            status_message: None,
            status_message_time: None,
        };
        app.sync_history_selection();
        app
    }

    /// Entries for the history pane, newest first
    pub fn history(&self) -> Vec<MoodEntry> {
        self.store.sorted_descending()
    }

    pub fn select_mood(&mut self, mood: Mood) {
        self.selected_mood = mood;
    }

    pub fn next_mood(&mut self) {
        self.selected_mood = self.selected_mood.next();
    }

    pub fn previous_mood(&mut self) {
        self.selected_mood = self.selected_mood.previous();
    }

    pub fn cycle_focus(&mut self, forward: bool) {
        self.focus = if forward {
            self.focus.next()
        } else {
            self.focus.previous()
        };
    }

    /// Record the selected mood with the current note, then persist.
    /// On success the note is cleared and the history jumps to the new entry.
    pub fn save_entry(&mut self) {
        let note = self.note.text();
        match self.store.record(self.selected_mood, &note) {
            Ok(entry) => {
                log::info!(
                    "event=entry_saved module=tui id={} mood={} note_chars={}",
                    entry.id(),
                    entry.mood().name(),
                    entry.note().chars().count()
                );
                self.note.clear();
                self.history_state.select(Some(0));
                self.set_status_message(format!("Mood saved: {}", entry.mood()));
            }
            Err(e) => {
                log::error!("event=entry_saved module=tui status=error error={}", e);
                self.set_status_message(format!("Failed to save mood: {}", e));
            }
        }
    }

    /// Clamp the history selection to the current number of entries
    pub fn sync_history_selection(&mut self) {
        let len = self.store.len();
        if len == 0 {
            self.history_state.select(None);
        } else {
            let selected = self.history_state.selected().unwrap_or(0);
            self.history_state.select(Some(selected.min(len - 1)));
        }
    }

    pub fn move_history_up(&mut self) {
        if let Some(selected) = self.history_state.selected() {
            self.history_state.select(Some(selected.saturating_sub(1)));
        }
        self.sync_history_selection();
    }

    pub fn move_history_down(&mut self) {
        let selected = self.history_state.selected().map(|i| i + 1).unwrap_or(0);
        self.history_state.select(Some(selected));
        self.sync_history_selection();
    }

    pub fn move_history_to_top(&mut self) {
        self.history_state.select(Some(0));
        self.sync_history_selection();
    }

    pub fn move_history_to_bottom(&mut self) {
        self.history_state.select(Some(self.store.len().saturating_sub(1)));
        self.sync_history_selection();
    }

    pub fn enter_help_mode(&mut self) {
        self.mode = Mode::Help;
    }

    pub fn exit_help_mode(&mut self) {
        self.mode = Mode::Normal;
    }

    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some(message);
        self.status_message_time = Some(Instant::now());
    }

    pub fn clear_status_message(&mut self) {
        self.status_message = None;
        self.status_message_time = None;
    }

    pub fn check_status_message_timeout(&mut self) {
        if let Some(time) = self.status_message_time {
            if time.elapsed() >= STATUS_MESSAGE_TIMEOUT {
                self.clear_status_message();
            }
        }
    }

    /// Key hints for the status bar, depending on focus
    pub fn key_hints(&self) -> Vec<String> {
        let kb = &self.config.key_bindings;
        let key = |s: &str| format_key_binding_for_display(s);
        let mut hints = vec![format!("{}: Save", key(&kb.save))];
        match self.focus {
            Focus::Picker => {
                hints.push(format!("{}/{}: Mood", key(&kb.mood_prev), key(&kb.mood_next)));
                hints.push("1-5: Pick".to_string());
            }
            Focus::Note => {
                hints.push("Enter: New line".to_string());
                hints.push("Esc: Done".to_string());
            }
            Focus::History => {
                hints.push(format!("{}/{}: Scroll", key(&kb.list_up), key(&kb.list_down)));
            }
        }
        hints.push(format!("{}: Next pane", key(&kb.next_focus)));
        hints.push(format!("{}: Help", key(&kb.help)));
        if self.focus != Focus::Note {
            hints.push(format!("{}: Quit", key(&kb.quit)));
        }
        hints
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStorage;

    fn app() -> App {
        let storage: Box<dyn SlotStorage> = Box::new(MemoryStorage::new());
        let store = EntryStore::open(storage).unwrap();
        App::new(Config::default(), store)
    }

    #[test]
    fn starts_on_default_mood_with_empty_history() {
        let app = app();
        assert_eq!(app.selected_mood, Mood::Happy);
        assert_eq!(app.focus, Focus::Picker);
        assert!(app.history().is_empty());
        assert_eq!(app.history_state.selected(), None);
    }

    #[test]
    fn save_entry_trims_note_and_clears_editor() {
        let mut app = app();
        app.select_mood(Mood::Great);
        for ch in "  walked the dog \n".chars() {
            app.note.insert_char(ch);
        }
        app.save_entry();

        let history = app.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].mood(), Mood::Great);
        assert_eq!(history[0].note(), "walked the dog");
        assert_eq!(app.note.text(), "");
        assert_eq!(app.history_state.selected(), Some(0));
        assert!(app.status_message.as_deref().unwrap_or("").starts_with("Mood saved"));
    }

    #[test]
    fn history_selection_stays_in_bounds() {
        let mut app = app();
        app.move_history_down();
        assert_eq!(app.history_state.selected(), None);

        app.save_entry();
        app.save_entry();
        app.move_history_to_top();
        app.move_history_down();
        app.move_history_down();
        assert_eq!(app.history_state.selected(), Some(1));
        app.move_history_up();
        app.move_history_up();
        assert_eq!(app.history_state.selected(), Some(0));
    }

    #[test]
    fn focus_cycles_both_ways() {
        let mut app = app();
        app.cycle_focus(true);
        assert_eq!(app.focus, Focus::Note);
        app.cycle_focus(true);
        assert_eq!(app.focus, Focus::History);
        app.cycle_focus(true);
        assert_eq!(app.focus, Focus::Picker);
        app.cycle_focus(false);
        assert_eq!(app.focus, Focus::History);
    }

    #[test]
    fn quit_hint_hidden_while_typing() {
        let mut app = app();
        assert!(app.key_hints().iter().any(|h| h.ends_with("Quit")));
        app.focus = Focus::Note;
        assert!(!app.key_hints().iter().any(|h| h.ends_with("Quit")));
    }
}

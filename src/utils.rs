use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use directories::{BaseDirs, ProjectDirs};
use std::fmt::Write;
use std::path::PathBuf;

/// Profile mode for the application (dev or prod)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Dev,
    Prod,
}

impl Profile {
    fn app_name(self) -> &'static str {
        match self {
            Profile::Dev => "mood-tracker-dev",
            Profile::Prod => "mood-tracker",
        }
    }
}

/// Get the configuration directory path.
/// The dev profile uses "mood-tracker-dev" so it never touches real entries.
pub fn get_config_dir(profile: Profile) -> Option<PathBuf> {
    ProjectDirs::from("com", "mood-tracker", profile.app_name())
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the data directory path (storage and logs)
pub fn get_data_dir(profile: Profile) -> Option<PathBuf> {
    ProjectDirs::from("com", "mood-tracker", profile.app_name())
        .map(|dirs| dirs.data_dir().to_path_buf())
}

/// Expand `~` in a path string to the user's home directory
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = BaseDirs::new().map(|d| d.home_dir().to_path_buf()) {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Whether chrono understands every specifier in a strftime pattern
pub fn is_valid_date_format(format: &str) -> bool {
    StrftimeItems::new(format).all(|item| !matches!(item, Item::Error))
}

/// Render an entry timestamp in local time. Falls back to RFC 3339 when
/// the pattern can't be rendered.
pub fn format_entry_date(date: DateTime<Utc>, format: &str) -> String {
    let local = date.with_timezone(&Local);
    let mut out = String::new();
    if write!(out, "{}", local.format(format)).is_err() {
        return local.to_rfc3339();
    }
    out
}

/// Parsed key binding information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedKeyBinding {
    pub key_code: KeyCode,
    pub requires_ctrl: bool,
}

impl ParsedKeyBinding {
    /// Whether a key press triggers this binding
    pub fn matches(&self, key_event: &KeyEvent) -> bool {
        if self.requires_ctrl != has_primary_modifier(key_event.modifiers) {
            return false;
        }
        match (self.key_code, key_event.code) {
            // Terminals report Ctrl+letter inconsistently in case
            (KeyCode::Char(expected), KeyCode::Char(actual)) => {
                expected.eq_ignore_ascii_case(&actual)
            }
            (expected, actual) => expected == actual,
        }
    }
}

/// Check if a key event has the primary modifier (Ctrl on Windows/Linux, Option/Alt on macOS)
pub fn has_primary_modifier(modifiers: KeyModifiers) -> bool {
    #[cfg(target_os = "macos")]
    {
        modifiers.contains(KeyModifiers::CONTROL) || modifiers.contains(KeyModifiers::ALT)
    }

    #[cfg(not(target_os = "macos"))]
    {
        modifiers.contains(KeyModifiers::CONTROL)
    }
}

/// Format a key binding string for display.
/// On macOS "Ctrl+" is shown as "Opt+".
pub fn format_key_binding_for_display(key_binding: &str) -> String {
    #[cfg(target_os = "macos")]
    {
        key_binding.replace("Ctrl+", "Opt+")
    }

    #[cfg(not(target_os = "macos"))]
    {
        key_binding.to_string()
    }
}

/// Parse a key binding string from config into a ParsedKeyBinding
/// Supports: single keys ("q", "j"), special keys ("Enter", "Left", "Tab", "F1"),
/// and the Ctrl modifier ("Ctrl+s")
pub fn parse_key_binding(key_str: &str) -> Result<ParsedKeyBinding, String> {
    let key_str = key_str.trim();

    if let Some(key_part) = key_str.strip_prefix("Ctrl+") {
        let key_code = parse_key_code(key_part)?;
        return Ok(ParsedKeyBinding {
            key_code,
            requires_ctrl: true,
        });
    }

    let key_code = parse_key_code(key_str)?;
    Ok(ParsedKeyBinding {
        key_code,
        requires_ctrl: false,
    })
}

/// Parse a key code from a string (without modifiers)
fn parse_key_code(key_str: &str) -> Result<KeyCode, String> {
    match key_str {
        "Enter" => Ok(KeyCode::Enter),
        "Esc" | "Escape" => Ok(KeyCode::Esc),
        "Backspace" => Ok(KeyCode::Backspace),
        "Tab" => Ok(KeyCode::Tab),
        "BackTab" => Ok(KeyCode::BackTab),
        "Space" | " " => Ok(KeyCode::Char(' ')),
        "Left" => Ok(KeyCode::Left),
        "Right" => Ok(KeyCode::Right),
        "Up" => Ok(KeyCode::Up),
        "Down" => Ok(KeyCode::Down),
        "Home" => Ok(KeyCode::Home),
        "End" => Ok(KeyCode::End),
        "PageUp" => Ok(KeyCode::PageUp),
        "PageDown" => Ok(KeyCode::PageDown),
        "Delete" => Ok(KeyCode::Delete),
        _ => {
            if let Some(n) = key_str.strip_prefix('F') {
                if let Ok(n) = n.parse::<u8>() {
                    if (1..=12).contains(&n) {
                        return Ok(KeyCode::F(n));
                    }
                }
            }
            let mut chars = key_str.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(KeyCode::Char(c)),
                (None, _) => Err("Empty key binding".to_string()),
                _ => Err(format!("Unknown key binding: {}", key_str)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use crossterm::event::KeyEventKind;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        let mut event = KeyEvent::new(code, modifiers);
        event.kind = KeyEventKind::Press;
        event
    }

    #[test]
    fn parses_plain_special_and_function_keys() {
        assert_eq!(parse_key_binding("q").unwrap().key_code, KeyCode::Char('q'));
        assert_eq!(parse_key_binding("Tab").unwrap().key_code, KeyCode::Tab);
        assert_eq!(parse_key_binding("F1").unwrap().key_code, KeyCode::F(1));
        assert_eq!(parse_key_binding(" Left ").unwrap().key_code, KeyCode::Left);
    }

    #[test]
    fn parses_ctrl_modifier() {
        let binding = parse_key_binding("Ctrl+s").unwrap();
        assert_eq!(binding.key_code, KeyCode::Char('s'));
        assert!(binding.requires_ctrl);
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(parse_key_binding("Hyper+x").is_err());
        assert!(parse_key_binding("F13").is_err());
        assert!(parse_key_binding("").is_err());
    }

    #[test]
    fn binding_matches_respect_modifier() {
        let save = parse_key_binding("Ctrl+s").unwrap();
        assert!(save.matches(&press(KeyCode::Char('s'), KeyModifiers::CONTROL)));
        assert!(!save.matches(&press(KeyCode::Char('s'), KeyModifiers::NONE)));

        let quit = parse_key_binding("q").unwrap();
        assert!(quit.matches(&press(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(!quit.matches(&press(KeyCode::Char('q'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn expand_path_leaves_absolute_paths_alone() {
        assert_eq!(expand_path("/tmp/mood.db"), PathBuf::from("/tmp/mood.db"));
    }

    #[test]
    fn format_entry_date_uses_pattern() {
        let date = Utc.with_ymd_and_hms(2025, 12, 2, 12, 0, 0).unwrap();
        assert_eq!(format_entry_date(date, "%Y"), "2025");
    }

    #[test]
    fn unknown_specifier_falls_back_to_rfc3339() {
        let date = Utc.with_ymd_and_hms(2025, 12, 2, 12, 0, 0).unwrap();
        let rendered = format_entry_date(date, "%Q");
        let parsed = DateTime::parse_from_rfc3339(&rendered).unwrap();
        assert_eq!(parsed.with_timezone(&Utc), date);
    }

    #[test]
    fn date_format_validation() {
        assert!(is_valid_date_format("%b %-d, %Y at %-I:%M %p"));
        assert!(!is_valid_date_format("%Q"));
    }
}

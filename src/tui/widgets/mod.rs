pub mod color;
pub mod editor;
pub mod help;
pub mod history_list;
pub mod mood_picker;
pub mod note_input;
pub mod status_bar;

use clap::Parser;
use color_eyre::Result;
use mood_tracker::{Config, EntryStore, Profile, cli::{Cli, Commands}, storage::open_storage};
use std::path::PathBuf;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    // --dev keeps a separate config and storage
    let profile = if cli.dev {
        Profile::Dev
    } else {
        Profile::Prod
    };

    let config = match cli.config {
        Some(ref path) => Config::load_from_path(&PathBuf::from(path), profile)?,
        None => Config::load_with_profile(profile)?,
    };

    // Keep the handle alive until exit; logging is optional
    let _logger = match mood_tracker::logging::init_logging(&config.log_level, &config.get_log_dir()) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("WARNING: logging disabled: {}", e);
            None
        }
    };

    let storage = open_storage(&config)?;
    let mut store = EntryStore::open(storage)?;

    let mut stdout = std::io::stdout();
    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            let app = mood_tracker::tui::App::new(config, store);
            mood_tracker::tui::run_event_loop(app)?;
        }
        Commands::Add { mood, note } => {
            mood_tracker::cli::handle_add(mood, &note, &mut store, &mut stdout)?;
        }
        Commands::List => {
            mood_tracker::cli::handle_list(&store, &config.date_format, &mut stdout)?;
        }
        Commands::Moods => {
            mood_tracker::cli::handle_moods(&mut stdout)?;
        }
    }

    Ok(())
}

// Terminal entry point for the slidetab demo.
// Sets up logging and the terminal, then runs the app until the user quits.

use std::fs::{self, OpenOptions};
use std::io::stdout;
use std::sync::Mutex;
use std::time::Instant;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use tracing_subscriber::EnvFilter;

use slidetab::app::App;
use slidetab::store::{FileStorage, MemoryStorage, Storage, paths};
use slidetab::{Config, Result};

fn main() -> Result<()> {
    let config = Config::from_env()?;
    init_logging(&config);

    let storage: Box<dyn Storage> = match &config.state_dir {
        Some(dir) => Box::new(FileStorage::new(dir)),
        None => {
            tracing::warn!("No state directory; tab selections will not persist");
            Box::new(MemoryStorage::new())
        }
    };
    let mut app = App::new(&config, storage, Instant::now());

    let mut terminal = ratatui::init();
    execute!(stdout(), EnableMouseCapture)?;
    let result = app.run(&mut terminal);
    execute!(stdout(), DisableMouseCapture)?;
    ratatui::restore();

    result?;
    tracing::info!("App exited");
    Ok(())
}

/// Log to a file in the state directory; the terminal belongs to the UI.
fn init_logging(config: &Config) {
    let Ok(dir) = config.require_state_dir() else {
        return;
    };
    if fs::create_dir_all(dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(paths::log_path(dir))
    else {
        return;
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

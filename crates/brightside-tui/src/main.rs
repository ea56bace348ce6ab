use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use brightside_scheduler::{DesktopNotifier, ReminderScheduler};
use brightside_service::{BlockingMotivationService, GeminiService, DEFAULT_API_URL, DEFAULT_MODEL};
use brightside_store::{create_store, StoreConfig};
use brightside_tui::app::App;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

#[derive(Debug, Parser)]
#[command(name = "brightside", about = "Daily motivation in your terminal")]
struct Config {
    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY")]
    api_key: String,

    /// Model used for generation
    #[arg(long, env = "BRIGHTSIDE_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Base URL of the generation API
    #[arg(long, env = "BRIGHTSIDE_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Directory for persisted state (goals, reminder handle)
    #[arg(long, env = "BRIGHTSIDE_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Write logs here. The terminal itself belongs to the TUI, so without
    /// this flag nothing is logged.
    #[arg(long, env = "BRIGHTSIDE_LOG_FILE")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let config = Config::parse();

    if let Some(ref path) = config.log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    }

    let store_config = match config.data_dir {
        Some(ref dir) => StoreConfig {
            data_dir: Some(dir.to_string_lossy().to_string()),
        },
        None => StoreConfig::from_env(),
    };
    let store = create_store(&store_config);

    let gemini = GeminiService::with_base_url(&config.api_url, config.api_key, config.model);
    let service = BlockingMotivationService::new(Arc::new(gemini))
        .context("failed to create tokio runtime")?;

    let notifier = Arc::new(DesktopNotifier);
    let (reminder_tx, reminder_rx) = std::sync::mpsc::channel();
    let scheduler = ReminderScheduler::new(store.clone(), notifier.clone(), reminder_tx);

    run_tui(service, scheduler, store, notifier, reminder_rx)
}

fn run_tui(
    service: BlockingMotivationService,
    scheduler: ReminderScheduler,
    store: Arc<dyn brightside_store::StateStore>,
    notifier: Arc<DesktopNotifier>,
    reminders: std::sync::mpsc::Receiver<brightside_scheduler::ReminderEvent>,
) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, service, scheduler, store, notifier, reminders);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e}");
    }

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    service: BlockingMotivationService,
    scheduler: ReminderScheduler,
    store: Arc<dyn brightside_store::StateStore>,
    notifier: Arc<DesktopNotifier>,
    reminders: std::sync::mpsc::Receiver<brightside_scheduler::ReminderEvent>,
) -> Result<()> {
    let mut app = App::new(service, scheduler, store, notifier, reminders)?;

    loop {
        terminal.draw(|frame| app.render(frame))?;

        // Short poll so background fetches and fired reminders surface
        // without a keypress.
        if event::poll(Duration::from_millis(200))? {
            if let Event::Key(key) = event::read()? {
                // Ctrl+C always quits
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    break;
                }
                // q quits unless we're in an input mode
                if key.code == KeyCode::Char('q') && !app.is_input_mode() {
                    break;
                }
                app.handle_key(key);
            }
        } else {
            app.poll();
        }
    }

    Ok(())
}

mod api;
mod app;
mod config;
mod format;
mod models;
mod routes;
mod ui;

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use crate::api::{ApiClient, HttpTransport, Transport};
use crate::app::AppState;
use crate::config::Config;
use crate::routes::Route;

/// Back office for cars, clients and sales orders
#[derive(Debug, Parser)]
#[command(name = "vendas", version)]
struct Cli {
    /// Base URL of the sales API (overrides API_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// File receiving the logs (overrides LOG_FILE)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Open a list screen directly instead of the menu
    #[arg(long, value_enum)]
    screen: Option<StartScreen>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StartScreen {
    Cars,
    Clients,
    Orders,
}

impl StartScreen {
    fn route(self) -> Route {
        match self {
            StartScreen::Cars => Route::CarList,
            StartScreen::Clients => Route::ClientList,
            StartScreen::Orders => Route::OrderList,
        }
    }
}

fn init_tracing(config: &Config) -> Result<()> {
    let path = config.log_file();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

// One user action at a time: the UI loop awaits each request in turn
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = config::init()?.with_overrides(cli.base_url, cli.log_file);
    init_tracing(&config)?;
    info!(base_url = config.api_base_url(), "starting vehicle sales back office");

    let transport = HttpTransport::new(config.api_base_url())?;
    let mut app_state = AppState::new(ApiClient::new(transport));

    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    if let Some(screen) = cli.screen {
        app_state.navigate(screen.route()).await;
    }

    // Run the main app loop
    let result = run_app(&mut terminal, &mut app_state).await;

    // Restore terminal
    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        error!(error = %err, "terminal failure");
        println!("Error: {}", err);
    }

    info!("back office closed");
    result
}

async fn run_app<B: Backend, T: Transport>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState<T>,
) -> Result<()> {
    loop {
        terminal.draw(|f| app_state.render(f))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app_state.handle_key(key.code).await {
                break;
            }
        }
    }

    Ok(())
}

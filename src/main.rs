mod config;
mod store;
mod tui;
mod workspace;

use anyhow::{Context, Result};
use clap::{Command, CommandFactory, Parser, Subcommand, ValueHint};
use clap_complete::{generate, Generator, Shell};
use config::{Config, ConfigError};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use store::{effects::ApplicationEffects, state::AppState, store::Store};
use tui::{app::App, ui};

#[derive(Parser)]
#[command(name = "app-header")]
#[command(about = "A TUI for browsing, renaming and deleting workspace applications")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Configuration management")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    #[command(about = "Generate shell completion scripts")]
    Completion {
        #[arg(help = "Shell to generate completions for")]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    #[command(about = "Set a configuration value")]
    Set {
        #[arg(help = "Configuration key (workspace_path or log_path)", value_parser = config::KEYS)]
        key: String,
        #[arg(help = "Configuration value", value_hint = ValueHint::FilePath)]
        value: String,
    },
    #[command(about = "Get a configuration value")]
    Get {
        #[arg(help = "Configuration key", value_parser = config::KEYS)]
        key: String,
    },
    #[command(about = "List all configuration values")]
    List,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Config { action }) => {
            if let Err(e) = handle_config_command(action) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            print_completions(shell, &mut cmd);
        }
        None => {
            if let Err(e) = run_main_app() {
                eprintln!("Error: {:#}", e);
                std::process::exit(1);
            }
        }
    }
}

fn handle_config_command(action: ConfigAction) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Set { key, value } => {
            let mut config = match Config::load() {
                Ok(config) => config,
                Err(ConfigError::ConfigNotFound) => Config::default(),
                Err(e) => return Err(e),
            };

            config.set(&key, value)?;
            config.save()?;
            println!("Configuration saved successfully.");
        }
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            println!("{}", config.get(&key)?);
        }
        ConfigAction::List => {
            let config = Config::load()?;
            for key in config::KEYS {
                println!("{} = {}", key, config.get(key)?);
            }
        }
    }
    Ok(())
}

fn run_main_app() -> Result<()> {
    let config = Config::load().context("Configuration error")?;
    init_logging(&config.log_file_path()?)?;

    let workspace_path = PathBuf::from(&config.workspace_path);
    tracing::info!(workspace = %workspace_path.display(), "starting app-header");

    let store = Rc::new(Store::new(AppState::default()));
    let _effects = ApplicationEffects::register(&store, workspace_path);

    let mut app = App::new(Rc::clone(&store));
    app.reload();

    run_tui(&mut app)?;

    tracing::info!("app-header stopped");
    Ok(())
}

fn init_logging(log_path: &Path) -> Result<()> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create log directory '{}'", parent.display()))?;
    }

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("failed to open log file '{}'", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(log_file))
        .init();

    Ok(())
}

fn run_tui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            app.handle_key_event(key)?;
            if app.should_quit {
                break;
            }
        }
    }
    Ok(())
}

fn print_completions<G: Generator>(generator: G, cmd: &mut Command) {
    generate(generator, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

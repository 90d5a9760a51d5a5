mod app;
mod keymap;
mod logging;
mod runner;
mod ui;

use std::io;
use std::ops::ControlFlow;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event as CEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing::{info, warn};

use unitdeck_core::catalog::UnitCatalog;
use unitdeck_core::config::{CONFIG_ENV, ConfigError, UnitdeckConfig};
use unitdeck_core::facets::Facet;
use unitdeck_core::policy::build_invocation;
use unitdeck_core::reducer::{Input, SessionEvent};
use unitdeck_core::state::SessionState;

use app::App;
use runner::CommandRunner;

#[derive(Parser)]
#[command(name = "unitdeck")]
#[command(about = "Browse and control service units from the terminal", long_about = None)]
struct Cli {
    /// Config file (default: $UNITDECK_CONFIG, then unitdeck.yml in the current directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Service manager executable
    #[arg(long, global = true)]
    tool: Option<String>,

    /// Write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Log level or filter directive
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive session (default)
    Tui,
    /// Fetch and print the unit listing once
    List {
        /// Only units of this type, e.g. `service`
        #[arg(short = 't', long = "type")]
        unit_type: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Print the unit types found in the listing
    Facets,
    /// Print the invocation a command would run, without running it
    Preview { command: String, unit: Option<String> },
}

fn resolve_config(cli: &Cli) -> Result<(Option<PathBuf>, UnitdeckConfig), ConfigError> {
    let found = match &cli.config {
        Some(path) => Some((path.clone(), UnitdeckConfig::load(path)?)),
        None => {
            let cwd = std::env::current_dir().map_err(|source| ConfigError::Io {
                path: PathBuf::from("."),
                source,
            })?;
            UnitdeckConfig::discover(&cwd, std::env::var_os(CONFIG_ENV).map(PathBuf::from))?
        }
    };

    let (path, mut config) = match found {
        Some((path, config)) => (Some(path), config),
        None => (None, UnitdeckConfig::default()),
    };

    if let Some(tool) = &cli.tool {
        config.tool = tool.clone();
    }
    if let Some(file) = &cli.log_file {
        config.log.file = Some(file.clone());
    }
    if let Some(level) = &cli.log_level {
        config.log.level = level.clone();
    }
    Ok((path, config))
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let (config_path, config) = match resolve_config(&cli) {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logging::init_logging(config.log.file.as_deref(), &config.log.level) {
        eprintln!("Warning: {}", e);
    }
    match &config_path {
        Some(path) => info!(path = %path.display(), "loaded config"),
        None => info!("no config file found, using defaults"),
    }
    ui::theme::init(config.theme);

    let result = match cli.command {
        None | Some(Commands::Tui) => run_tui(&config).await.map(|()| ExitCode::SUCCESS),
        Some(Commands::List { unit_type, json }) => run_list(&config, unit_type, json).await,
        Some(Commands::Facets) => run_facets(&config).await,
        Some(Commands::Preview { command, unit }) => Ok(run_preview(&config, &command, unit.as_deref())),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run_tui(config: &UnitdeckConfig) -> io::Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<SessionEvent>();
    let runner = CommandRunner::new(config.tool.clone(), config.list_args.clone(), event_tx);
    let mut app = App::new(SessionState::new(config.tool.clone()), runner);
    app.start();

    let mut terminal = setup_terminal()?;
    let result = tui_loop(
        &mut terminal,
        &mut app,
        &mut event_rx,
        Duration::from_millis(config.tick_ms),
    );
    restore_terminal(terminal)?;
    info!("session ended");
    result
}

fn tui_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<CommandRunner>,
    event_rx: &mut mpsc::UnboundedReceiver<SessionEvent>,
    tick: Duration,
) -> io::Result<()> {
    let size = terminal.size()?;
    app.dispatch(SessionEvent::Input(Input::Resize {
        width: size.width,
        height: size.height,
    }));

    loop {
        terminal.draw(|f| ui::draw(f, &app.state))?;

        // Background results first so a completion is never starved by input
        while let Ok(event) = event_rx.try_recv() {
            let _ = app.dispatch(event);
        }

        if !event::poll(tick)? {
            continue;
        }

        let input = match event::read()? {
            CEvent::Key(key) => keymap::map_key(key, app.state.phase),
            CEvent::Resize(width, height) => Some(Input::Resize { width, height }),
            _ => None,
        };
        let Some(input) = input else {
            continue;
        };

        if let ControlFlow::Break(()) = app.dispatch(SessionEvent::Input(input)) {
            return Ok(());
        }
    }
}

async fn load_catalog(config: &UnitdeckConfig) -> Result<UnitCatalog, ExitCode> {
    match runner::fetch_units(&config.tool, &config.list_args).await {
        Ok(units) => Ok(UnitCatalog::new(units)),
        Err(e) => {
            warn!(%e, "unit listing failed");
            eprintln!("Error: {}", e);
            Err(ExitCode::FAILURE)
        }
    }
}

async fn run_list(
    config: &UnitdeckConfig,
    unit_type: Option<String>,
    json: bool,
) -> io::Result<ExitCode> {
    let catalog = match load_catalog(config).await {
        Ok(catalog) => catalog,
        Err(code) => return Ok(code),
    };

    let facet = unit_type.map(Facet::of).unwrap_or_default();
    let units = catalog.filtered(&facet);

    if json {
        let out = serde_json::to_string_pretty(&units).map_err(io::Error::other)?;
        println!("{}", out);
        return Ok(ExitCode::SUCCESS);
    }

    let width = units.iter().map(|u| u.name.chars().count()).max().unwrap_or(0);
    for unit in &units {
        println!("{:<width$}  {}", unit.name, unit.summary(), width = width);
    }
    if units.is_empty() {
        eprintln!("No units found");
    }
    Ok(ExitCode::SUCCESS)
}

async fn run_facets(config: &UnitdeckConfig) -> io::Result<ExitCode> {
    let catalog = match load_catalog(config).await {
        Ok(catalog) => catalog,
        Err(code) => return Ok(code),
    };
    for facet in catalog.facets() {
        println!("{}", facet);
    }
    Ok(ExitCode::SUCCESS)
}

fn run_preview(config: &UnitdeckConfig, command: &str, unit: Option<&str>) -> ExitCode {
    match build_invocation(command, unit) {
        Ok(args) => {
            println!("{} {}", config.tool, args);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e.guidance());
            ExitCode::from(2)
        }
    }
}

mod app;
mod config;
mod history;
mod models;
mod settings;
mod stats;
mod stopwatch;
mod theme;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::{ArgAction, Parser};
use crate::config::{AppConfig, LOG_FILE};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
        MouseButton, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "cubetimer")]
#[command(version)]
#[command(about = "A terminal stopwatch for Rubik's Cube solves", long_about = None)]
#[command(disable_help_flag = true)]
#[command(disable_version_flag = true)]
#[command(help_template = "\
{name} {version}
{about-section}
{usage-heading} {usage}

{all-args}
")]
struct Cli {
    /// Directory holding times.txt, config.json and the log file
    #[arg(short, long, value_name = "PATH")]
    data_dir: Option<PathBuf>,

    /// Print solve history and statistics, then exit
    #[arg(long, default_value_t = false, help_heading = "Flags")]
    history: bool,

    /// Print help
    #[arg(short, long, action = ArgAction::Help, help_heading = "Flags")]
    help: Option<bool>,

    /// Print version
    #[arg(short = 'V', long, action = ArgAction::Version, help_heading = "Flags")]
    version: Option<bool>,
}

fn log_appender(dir: &Path) -> Result<RollingFileAppender> {
    fs::create_dir_all(dir)
        .with_context(|| format!("creating data directory {}", dir.display()))?;

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE)
        .build(dir)
        .with_context(|| format!("opening {} in {}", LOG_FILE, dir.display()))
}

fn init_logging(dir: &Path) -> Result<()> {
    // the terminal belongs to the UI, so logs go to a file
    let appender = log_appender(dir)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(appender)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let app_config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!(
            "Warning: Failed to load config, using defaults. Error: {}",
            e
        );
        AppConfig::default()
    });
    let paths = app_config.data_paths(cli.data_dir);

    if let Err(e) = init_logging(&paths.dir) {
        eprintln!("Warning: logging disabled. Error: {:#}", e);
    }

    if cli.history {
        history::show_history(&paths.history)?;
        return Ok(());
    }

    // load before touching the terminal so a bad history file is reported plainly
    let mut app = App::new(paths, app_config.tick())?;
    info!("starting ui");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    info!("exiting");
    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let size = terminal.size()?;
    app.resize(size.width, size.height);

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(app.poll_timeout())? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Esc | KeyCode::Char('q') => app.quit(),
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        app.quit()
                    }
                    KeyCode::Char(' ') => app.toggle_timer(Instant::now()),
                    KeyCode::Down | KeyCode::Char('j') => app.select_next(),
                    KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
                    KeyCode::Home => app.select_first(),
                    KeyCode::End => app.select_last(),
                    KeyCode::Delete | KeyCode::Char('d') => app.delete_selected(),
                    KeyCode::Char('D') => app.delete_all(),
                    KeyCode::Char('t') => app.toggle_theme(),
                    _ => {}
                },
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::Down(MouseButton::Left) => {
                        app.on_click(mouse.column, mouse.row)
                    }
                    MouseEventKind::ScrollDown => app.select_next(),
                    MouseEventKind::ScrollUp => app.select_prev(),
                    _ => {}
                },
                Event::Resize(w, h) => {
                    app.resize(w, h);
                }
                _ => {}
            }
        }

        app.on_tick(Instant::now());

        if app.should_quit {
            return Ok(());
        }
    }
}

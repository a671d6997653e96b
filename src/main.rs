#![warn(clippy::all, clippy::pedantic)]

use std::io;
use std::os::fd::AsRawFd;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{debug, error, info};
use playfield::app::{App, AppResult};
use playfield::config::{self, Config};
use playfield::sound::AudioState;
use playfield::ui;
use ratatui::{Terminal, prelude::*};

fn main() -> AppResult<()> {
    // Create log file and redirect stderr to it
    let log_path = "playfield.log";
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)
        .with_context(|| format!("Failed to create log file {log_path}"))?;

    let stderr_fd = std::io::stderr().as_raw_fd();
    let log_file_fd = log_file.as_raw_fd();

    // Safety: both descriptors are open for the duration of the call
    unsafe {
        libc::dup2(log_file_fd, stderr_fd);
    }

    // Configure the logger to use stderr (which is now redirected to our file)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_module_path(false)
        .init();

    info!("Starting playfield");

    match config::loader::load_config_from_file() {
        Ok(loaded) => {
            info!("Configuration loaded successfully");
            Config::install(loaded);
        }
        Err(e) => error!("Failed to load configuration, using defaults: {e}"),
    }
    let frame_duration = Config::current().gameplay.frame_duration();

    // Terminal initialization
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = App::new();
    let res = run_app(&mut terminal, app, frame_duration);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!("Game error: {err:?}");
    }

    res
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    frame_duration: Duration,
) -> AppResult<()> {
    // Flush anything typed before the terminal switched modes
    while event::poll(Duration::ZERO)? {
        let _ = event::read()?;
    }

    if !app.world.resource::<AudioState>().is_audio_available() {
        error!("Audio device is unavailable. Continuing without sound.");
    }

    // Measure the first frame from now rather than from App::new
    app.world.resource_mut::<playfield::Time>().update();
    let mut last_frame = Instant::now();

    loop {
        terminal.draw(|f| ui::render(f, &mut app))?;

        let timeout = frame_duration.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                debug!("Key event: {key:?}");
                app.handle_key(key);
            }
        }

        if app.should_quit {
            info!("Quitting");
            return Ok(());
        }

        if last_frame.elapsed() >= frame_duration {
            app.tick();
            last_frame = Instant::now();
        }
    }
}

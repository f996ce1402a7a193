// ABOUTME: Main entry point for cloud-onboard with TUI and CLI support
//
// Binary: cloud-onboard
// Usage: cloud-onboard [COMMAND]
// - No command: launches the onboarding wizard
// - catalog: print the selectable subscriptions, networks and storage accounts
// - submit: fill in and submit the wizard from flags

use anyhow::Result;
use clap::Parser;
use cloud_onboard::app::{App, EventHandler};
use cloud_onboard::cli;
use cloud_onboard::components::OnboardingComponent;
use cloud_onboard::config::{self, AppConfig};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::Backend, prelude::*};
use std::{
    io::{self, IsTerminal},
    time::{Duration, Instant},
};

/// Terminal cleanup utility to ensure proper restoration
fn cleanup_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

/// Unified terminal cleanup that works with a terminal instance
fn cleanup_terminal_with_instance<B: Backend + std::io::Write>(
    terminal: &mut Terminal<B>,
) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn main() -> Result<()> {
    setup_logging();
    setup_panic_handler();

    let args = cli::Cli::parse();
    let config = match &args.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    let result = match args.command {
        Some(cli::Commands::Catalog) => cli::catalog::execute(&config, args.format),
        Some(cli::Commands::Submit(submit_args)) => {
            cli::submit::execute(submit_args, &config, args.format)
        }

        // TUI mode (explicit or default)
        Some(cli::Commands::Tui) | None => {
            let mut app = App::from_config(&config)?;

            // Flush any pending terminal events so stray keypresses don't edit the form
            while event::poll(Duration::from_millis(10)).unwrap_or(false) {
                let _ = event::read();
            }

            run_tui(&mut app).map(|()| {
                if let Some(ack) = &app.state.receipt {
                    println!("{ack}");
                }
            })
        }
    };

    // Ensure terminal is cleaned up on any error
    if result.is_err() {
        cleanup_terminal();
    }

    result
}

fn run_tui(app: &mut App) -> Result<()> {
    // Check if we have a proper TTY
    if !IsTerminal::is_terminal(&io::stdout()) {
        return Err(anyhow::anyhow!(
            "No TTY detected. The wizard requires a terminal.\n\
             Use `cloud-onboard submit` for non-interactive onboarding."
        ));
    }

    if let Err(e) = crossterm::terminal::is_raw_mode_enabled() {
        eprintln!("Cannot check terminal raw mode: {}", e);
        return Err(anyhow::anyhow!("Terminal not compatible: {}", e));
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_tui_loop(app, &mut terminal);

    if let Err(e) = cleanup_terminal_with_instance(&mut terminal) {
        tracing::error!("Failed to cleanup terminal: {}", e);
        cleanup_terminal();
    }

    result
}

fn run_tui_loop(app: &mut App, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    const STARTUP_GUARD_MS: u64 = 100;

    let component = OnboardingComponent::new();
    let tick_rate = Duration::from_millis(250);
    let startup_time = Instant::now();

    loop {
        terminal.draw(|frame| {
            let area = frame.size();
            component.render(frame, area, &app.state);
        })?;

        if event::poll(tick_rate)? {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind != KeyEventKind::Press {
                    continue;
                }
                // Ignore buffered keys from before the wizard was on screen
                if startup_time.elapsed() < Duration::from_millis(STARTUP_GUARD_MS) {
                    tracing::debug!(
                        "Ignoring key event {:?} during startup guard period",
                        key_event.code
                    );
                    continue;
                }

                if let Some(app_event) = EventHandler::handle_key_event(key_event, &app.state) {
                    tracing::debug!("Processing event {:?}", app_event);
                    EventHandler::process_event(app_event, &mut app.state);
                }
            }
        }

        if app.state.should_quit {
            break;
        }
    }

    Ok(())
}

fn setup_logging() {
    use std::fs::OpenOptions;
    use std::path::PathBuf;
    use tracing_subscriber::prelude::*;

    let log_dir = config::base_dir()
        .map(|base| base.join("logs"))
        .unwrap_or_else(|_| PathBuf::from(".cloud-onboard/logs"));

    let _ = std::fs::create_dir_all(&log_dir);

    let log_file = log_dir.join(format!(
        "cloud-onboard-{}.jsonl",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    ));

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "cloud_onboard=info".into());

    // Without a writable log file the wizard still runs, just silently
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_file) else {
        tracing_subscriber::registry().with(filter).init();
        return;
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_writer(file)
                .with_ansi(false),
        )
        .with(filter)
        .init();
}

fn setup_panic_handler() {
    use tracing::error;

    std::panic::set_hook(Box::new(|panic_info| {
        // Ensure terminal is restored before logging the panic
        cleanup_terminal();

        error!("Application panicked: {}", panic_info);
        eprintln!("Application panicked: {}", panic_info);
        eprintln!("Please check the logs for more details.");
    }));
}

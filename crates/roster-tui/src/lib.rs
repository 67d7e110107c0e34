//! Library entry point for the Roster TUI.
//!
//! Provides a reusable [`run`] function that launches the Ratatui
//! registration form with an empty in-memory roster.

mod app;
mod event;
mod submitter;
mod ui;

use anyhow::anyhow;
use app::{App, KeyAction};
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent, KeyEventKind, KeyModifiers,
    MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use event::AppEvent;
use log::{debug, info};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use roster_config::RosterConfig;
use roster_core::FileImageEncoder;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use submitter::Submitter;
use tokio::sync::mpsc;

/// Configuration for a Roster TUI session.
#[derive(Debug, Clone, Default)]
pub struct TuiConfig {
    /// Effective configuration.
    pub roster: RosterConfig,
    /// Directory relative image paths are resolved against (defaults to cwd).
    pub image_dir: Option<PathBuf>,
}

/// Launch the TUI and block until the user quits.
pub async fn run(config: TuiConfig) -> anyhow::Result<()> {
    let image_dir = config
        .image_dir
        .clone()
        .or_else(|| std::env::current_dir().ok())
        .ok_or_else(|| anyhow!("cannot determine working directory"))?;
    info!(
        "starting roster (image_dir={}, max_bytes={:?})",
        image_dir.display(),
        config.roster.image.max_bytes
    );

    let mut app = App::new(image_dir, config.roster.image.accepted_extensions.clone());

    let mut terminal = setup_terminal()?;
    let (tx, mut rx) = mpsc::channel(config.roster.ui.event_buffer);
    spawn_input_handler(tx.clone(), config.roster.ui.mouse_scroll_lines);
    spawn_tick(tx.clone(), config.roster.ui.tick_ms);

    let encoder = FileImageEncoder::new().with_max_bytes(config.roster.image.max_bytes);
    let submitter = Submitter::new(Arc::new(encoder), tx.clone());

    let result = async {
        loop {
            terminal.draw(|frame| ui::draw(frame, &mut app))?;
            let event = rx
                .recv()
                .await
                .ok_or_else(|| anyhow!("event channel closed unexpectedly"))?;
            if handle_app_event(event, &submitter, &mut app) {
                break;
            }
        }
        Ok::<(), anyhow::Error>(())
    }
    .await;

    restore_terminal(&mut terminal)?;
    info!("roster closed (users={})", app.registry.len());
    result
}

/// Dispatch a UI event and return true when the app should exit.
fn handle_app_event(event: AppEvent, submitter: &Submitter, app: &mut App) -> bool {
    match event {
        AppEvent::Input(key) => {
            if key.kind != KeyEventKind::Press {
                return false;
            }
            match app.handle_key(key) {
                KeyAction::None => false,
                KeyAction::Quit => true,
                KeyAction::Encode(pending) => {
                    submitter.spawn(pending);
                    false
                }
            }
        }
        AppEvent::Tick => {
            app.on_tick();
            false
        }
        AppEvent::Scroll(delta) => {
            if delta < 0 {
                app.scroll_up(delta.unsigned_abs());
            } else if delta > 0 {
                app.scroll_down(delta.unsigned_abs());
            }
            false
        }
        AppEvent::ImageEncoded(result) => {
            debug!("image encoding finished (ok={})", result.is_ok());
            app.finish_submission(result);
            false
        }
    }
}

/// Spawn a task to poll for input events.
fn spawn_input_handler(sender: mpsc::Sender<AppEvent>, scroll_lines: u16) {
    tokio::spawn(async move {
        let scroll_lines = i16::try_from(scroll_lines).unwrap_or(i16::MAX);
        loop {
            if matches!(crossterm::event::poll(Duration::from_millis(30)), Ok(true)) {
                while matches!(crossterm::event::poll(Duration::from_millis(0)), Ok(true)) {
                    let event = match crossterm::event::read() {
                        Ok(event) => event,
                        Err(_) => break,
                    };
                    match event {
                        CrosstermEvent::Key(key) => {
                            let _ = sender.send(AppEvent::Input(key)).await;
                        }
                        CrosstermEvent::Mouse(mouse) => {
                            let lines = if mouse.modifiers.contains(KeyModifiers::SHIFT) {
                                scroll_lines.saturating_mul(2)
                            } else {
                                scroll_lines
                            };
                            match mouse.kind {
                                MouseEventKind::ScrollUp => {
                                    let _ = sender.send(AppEvent::Scroll(-lines)).await;
                                }
                                MouseEventKind::ScrollDown => {
                                    let _ = sender.send(AppEvent::Scroll(lines)).await;
                                }
                                _ => {}
                            }
                        }
                        _ => {}
                    }
                }
            }
            if sender.is_closed() {
                break;
            }
        }
    });
}

/// Spawn a periodic tick event generator.
fn spawn_tick(sender: mpsc::Sender<AppEvent>, tick_ms: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(tick_ms));
        loop {
            interval.tick().await;
            if sender.send(AppEvent::Tick).await.is_err() {
                break;
            }
        }
    });
}

/// Configure terminal in raw mode with alternate screen.
fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
    debug!("setting up terminal");
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal state on exit.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
    debug!("restoring terminal");
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

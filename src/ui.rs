// src/ui.rs

pub mod footer;
pub mod header;
pub mod quit_confirm;

use crate::app::{App, AppScreen};
use crate::chat_view;
use crate::key_handlers::{self, ChatAction};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::{
    error::Error,
    io,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::{mpsc, Mutex};

/// Runs the terminal UI until the user quits.
pub async fn run_ui(app: App) -> Result<(), Box<dyn Error + Send + Sync>> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = Arc::new(Mutex::new(app));
    let res = run_app(&mut terminal, app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

/// Enum for different types of events.
enum Event {
    Input(CEvent),
    Tick,
}

/// Main loop of the application.
async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: Arc<Mutex<App>>,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let (tx, mut rx) = mpsc::channel::<Event>(100);

    // Spawn a task to read terminal events and emit ticks
    tokio::spawn(async move {
        let mut last_tick = Instant::now();
        loop {
            let timeout = Duration::from_millis(100);
            if event::poll(timeout).unwrap_or(false) {
                if let Ok(event) = event::read() {
                    if tx.send(Event::Input(event)).await.is_err() {
                        return;
                    }
                }
            }

            if last_tick.elapsed() >= Duration::from_millis(250) {
                if tx.send(Event::Tick).await.is_err() {
                    return;
                }
                last_tick = Instant::now();
            }
        }
    });

    loop {
        {
            let mut guard = app.lock().await;
            guard.update_processing_animation();
            terminal.draw(|f| ui(f, &mut *guard))?;
            if guard.screen == AppScreen::Quit {
                break;
            }
        }

        match rx.recv().await {
            Some(Event::Input(CEvent::Key(key))) => {
                let action = {
                    let mut guard = app.lock().await;
                    match guard.screen {
                        AppScreen::Chat => key_handlers::handle_chat_input(key, &mut guard),
                        AppScreen::QuitConfirm => {
                            key_handlers::handle_quit_confirm_input(key, &mut guard);
                            None
                        }
                        AppScreen::Quit => None,
                    }
                };

                match action {
                    Some(ChatAction::Submit(query)) => {
                        tokio::spawn(chat_view::process_query(app.clone(), query));
                    }
                    Some(ChatAction::StartVoice) => {
                        tokio::spawn(chat_view::process_voice(app.clone()));
                    }
                    None => {}
                }
            }
            Some(Event::Input(CEvent::Mouse(mouse))) => {
                let mut guard = app.lock().await;
                key_handlers::handle_mouse(mouse, &mut guard);
            }
            Some(Event::Input(_)) => {}
            Some(Event::Tick) => {}
            None => break,
        }
    }

    Ok(())
}

/// Renders the active screen.
fn ui(f: &mut Frame<'_>, app: &mut App) {
    if app.screen == AppScreen::QuitConfirm {
        quit_confirm::draw_quit_confirm(f, f.area());
        return;
    }

    // The banner collapses while the transcript is scrolled away from its
    // latest entry, giving both panels the full height.
    let header_height = if app.stick_to_bottom { 7 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(header_height),
                Constraint::Min(1),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(f.area());

    if header_height > 0 {
        header::draw_header(f, chunks[0]);
    }
    chat_view::draw_chat(f, app, chunks[1]);
    footer::draw_footer(f, chunks[2], app);
}

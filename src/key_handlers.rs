use crate::app::{App, AppScreen, Focus};
use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

/// Commands that need work outside the input handler (spawning a dispatch
/// task). Text and voice input converge on `Submit`, keeping a single
/// submission path for both sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatAction {
    Submit(String),
    StartVoice,
}

pub fn handle_chat_input(key: KeyEvent, app: &mut App) -> Option<ChatAction> {
    match key.code {
        KeyCode::Esc => {
            app.screen = AppScreen::QuitConfirm;
            None
        }
        KeyCode::Tab | KeyCode::BackTab => {
            app.focus = match app.focus {
                Focus::Input => Focus::History,
                Focus::History => Focus::Input,
            };
            None
        }
        KeyCode::PageUp => {
            app.scroll_up();
            None
        }
        KeyCode::PageDown => {
            app.scroll_down();
            None
        }
        _ => match app.focus {
            Focus::Input => handle_input_key(key, app),
            Focus::History => handle_history_key(key, app),
        },
    }
}

fn handle_input_key(key: KeyEvent, app: &mut App) -> Option<ChatAction> {
    match key.code {
        KeyCode::Enter => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.input.push('\n');
                return None;
            }
            let query = app.input.trim().to_string();
            if query.is_empty() {
                log::warn!("empty query ignored");
                return None;
            }
            app.input.clear();
            Some(ChatAction::Submit(query))
        }
        KeyCode::Backspace => {
            app.input.pop();
            None
        }
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                match c {
                    'c' => app.screen = AppScreen::QuitConfirm,
                    'u' => app.scroll_up(),
                    'd' => app.scroll_down(),
                    'v' => return Some(ChatAction::StartVoice),
                    _ => {}
                }
                None
            } else {
                app.input.push(c);
                None
            }
        }
        _ => None,
    }
}

fn handle_history_key(key: KeyEvent, app: &mut App) -> Option<ChatAction> {
    match key.code {
        KeyCode::Up => app.history.select_prev(),
        KeyCode::Down => app.history.select_next(),
        KeyCode::Enter => app.replay_selected(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.screen = AppScreen::QuitConfirm;
        }
        _ => {}
    }
    None
}

pub fn handle_quit_confirm_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            app.screen = AppScreen::Quit;
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            app.screen = AppScreen::Chat;
        }
        _ => {}
    }
}

pub fn handle_mouse(mouse: MouseEvent, app: &mut App) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(index) = app.history.hit_test(mouse.column, mouse.row) {
                app.focus = Focus::History;
                app.history.select(index);
                app.replay_history(index);
            }
        }
        MouseEventKind::ScrollUp => app.scroll_up(),
        MouseEventKind::ScrollDown => app.scroll_down(),
        _ => {}
    }
}

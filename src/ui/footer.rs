use crate::{App, AppScreen, Focus};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Paragraph, Wrap},
    Frame,
};

/// Draws the footer with dynamic instructions
pub fn draw_footer(f: &mut Frame<'_>, area: Rect, app: &App) {
    let instructions = match (app.screen, app.focus) {
        (AppScreen::QuitConfirm, _) => "Press 'y' to confirm quit or 'n' to cancel.",
        (_, Focus::Input) => {
            "Enter to send, Shift+Enter for a new line, Ctrl+V for voice, Tab for history, Esc to quit."
        }
        (_, Focus::History) => {
            "Up/Down to select an entry, Enter to replay it, Tab to return to the input, Esc to quit."
        }
    };

    let footer = Paragraph::new(instructions)
        .style(Style::default().fg(Color::LightCyan))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(footer, area);
}

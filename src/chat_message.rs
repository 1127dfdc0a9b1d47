use chrono::{DateTime, Local};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use textwrap::wrap;

/// One rendered transcript item: either a finished message or the transient
/// typing placeholder for an in-flight query.
#[derive(Debug, Clone)]
pub enum TranscriptEntry {
    Message(ChatMessage),
    Typing { id: u64 },
}

#[derive(Debug, Clone)]
pub struct ChatMessage {
    content: String,
    from_user: bool,
    timestamp: DateTime<Local>,
}

impl ChatMessage {
    pub fn new(content: String, from_user: bool) -> Self {
        Self {
            content,
            from_user,
            timestamp: Local::now(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn from_user(&self) -> bool {
        self.from_user
    }

    pub fn render(&self, area: Rect) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        let style = self.base_style();
        let indent = if self.from_user { "  " } else { "" };

        // Header with timestamp
        let timestamp = self.timestamp.format("%H:%M:%S").to_string();
        lines.push(Line::from(vec![
            Span::styled(indent.to_string(), style),
            Span::styled("┌─ ".to_string(), style),
            Span::styled(timestamp, style.add_modifier(Modifier::DIM)),
        ]));

        // Wrapped message body
        let wrap_width = (area.width as usize).saturating_sub(4).max(1);
        for content_line in self.content.lines() {
            if content_line.is_empty() {
                lines.push(Line::from(vec![
                    Span::styled(indent.to_string(), style),
                    Span::styled("│".to_string(), style),
                ]));
                continue;
            }
            for wrapped_line in wrap(content_line, wrap_width) {
                lines.push(Line::from(vec![
                    Span::styled(indent.to_string(), style),
                    Span::styled("│ ".to_string(), style),
                    Span::styled(wrapped_line.to_string(), style),
                ]));
            }
        }

        lines.push(Line::from(vec![
            Span::styled(indent.to_string(), style),
            Span::styled("╰─".to_string(), style),
        ]));

        lines
    }

    fn base_style(&self) -> Style {
        Style::default().fg(if self.from_user {
            Color::Rgb(255, 223, 128) // Warmer yellow
        } else {
            Color::Rgb(144, 238, 144) // Softer green
        })
    }
}

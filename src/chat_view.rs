use crate::app::{App, Focus};
use crate::chat_message::TranscriptEntry;
use crate::constants::{
    EMPTY_QUERY_REPLY, ERROR_REPLY, VOICE_FAILED_REPLY, VOICE_UNSUPPORTED_REPLY,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Wrap},
    Frame,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use unicode_width::UnicodeWidthStr;

pub fn draw_chat(f: &mut Frame<'_>, app: &mut App, area: Rect) {
    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(2, 3), Constraint::Ratio(1, 3)])
        .split(area);

    let chat_vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(horizontal_chunks[0]);

    draw_messages(f, app, chat_vertical_chunks[0]);
    app.status_indicator.render(f, chat_vertical_chunks[1]);
    draw_input(f, app, chat_vertical_chunks[2]);
    draw_sidebar(f, app, horizontal_chunks[1]);
}

fn draw_messages(f: &mut Frame<'_>, app: &mut App, area: Rect) {
    let mut lines = Vec::new();
    for entry in &app.transcript {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        match entry {
            TranscriptEntry::Message(message) => lines.extend(message.render(area)),
            TranscriptEntry::Typing { .. } => lines.push(typing_line(app.processing_frame)),
        }
    }

    let total_lines = lines.len() as u16;
    let max_scroll = total_lines.saturating_sub(area.height);
    let chat_scroll = if app.stick_to_bottom {
        max_scroll
    } else {
        app.chat_scroll.min(max_scroll)
    };
    if !app.stick_to_bottom && chat_scroll >= max_scroll {
        app.stick_to_bottom = true;
    }
    app.chat_scroll = chat_scroll;

    let msgs_para = Paragraph::new(lines)
        .style(Style::default())
        .block(Block::default())
        .wrap(Wrap { trim: false });
    f.render_widget(msgs_para.scroll((chat_scroll, 0)), area);
}

fn typing_line(frame: usize) -> Line<'static> {
    let dots = ["●    ", "● ●  ", "● ● ●"];
    Line::from(vec![
        Span::styled("│ ".to_string(), Style::default().fg(Color::DarkGray)),
        Span::styled(
            dots[frame % dots.len()].to_string(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM),
        ),
    ])
}

fn draw_input(f: &mut Frame<'_>, app: &App, area: Rect) {
    let separator = "─".repeat(area.width as usize);
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            separator.clone(),
            Style::default().fg(Color::DarkGray),
        ))),
        Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height: 1,
        },
    );

    let prefix_style = if app.focus == Focus::Input {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    // Only the last line of a multi-line draft is shown on the input row
    let current_line = app.input.rsplit('\n').next().unwrap_or("");
    let input = Line::from(vec![
        Span::styled("→ ", prefix_style),
        Span::styled(current_line.to_string(), Style::default().fg(Color::White)),
    ]);

    let visible_width = area.width.saturating_sub(2);
    let text_width = current_line.width() as u16;
    let scroll_offset = text_width.saturating_sub(visible_width);

    f.render_widget(
        Paragraph::new(input).scroll((0, scroll_offset)),
        Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: 1,
        },
    );

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            separator,
            Style::default().fg(Color::DarkGray),
        ))),
        Rect {
            x: area.x,
            y: area.y + area.height - 1,
            width: area.width,
            height: 1,
        },
    );

    if app.focus == Focus::Input {
        let cursor_x = area.x + 2 + text_width - scroll_offset;
        f.set_cursor_position((cursor_x, area.y + 1));
    }
}

fn draw_sidebar(f: &mut Frame<'_>, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(8)].as_ref())
        .split(area);

    let focused = app.focus == Focus::History;
    app.history.render(f, chunks[0], focused);
    draw_logs(f, app, chunks[1]);
}

fn draw_logs(f: &mut Frame<'_>, app: &App, area: Rect) {
    let visible = area.height as usize;
    let start = app.logs.entries.len().saturating_sub(visible);
    let log_lines: Vec<Line> = app.logs.entries[start..]
        .iter()
        .map(|entry| {
            Line::from(vec![
                Span::styled("• ", Style::default().fg(Color::DarkGray)),
                Span::raw(entry.clone()),
            ])
        })
        .collect();

    let logs_para = Paragraph::new(log_lines)
        .style(Style::default().fg(Color::DarkGray))
        .wrap(Wrap { trim: true });
    f.render_widget(logs_para, area);
}

/// Drives one query through the backend and applies the results to the
/// shared state: user message and typing placeholder first, then the reply
/// (or a fallback), then the history entry. Failures never propagate past
/// this function.
pub async fn process_query(app: Arc<Mutex<App>>, query: String) {
    let (client, typing_id) = {
        let mut guard = app.lock().await;
        guard.push_user_message(query.clone());
        let typing_id = guard.begin_typing();
        guard.status_indicator.set_status("Typing...");
        guard.logs.add("Dispatching query...".to_string());
        (guard.client.clone(), typing_id)
    };

    let reply = if query.is_empty() {
        // The voice path submits transcripts untrimmed; an empty one is
        // answered locally without touching the backend.
        EMPTY_QUERY_REPLY.to_string()
    } else {
        match client.send(&query).await {
            Ok(text) => {
                let mut guard = app.lock().await;
                guard.logs.add("Response received".to_string());
                text
            }
            Err(e) => {
                let mut guard = app.lock().await;
                guard.logs.add(format!("Backend call failed: {}", e));
                log::error!("query dispatch failed: {}", e);
                ERROR_REPLY.to_string()
            }
        }
    };

    let mut guard = app.lock().await;
    guard.end_typing(typing_id);
    guard.push_bot_message(reply.clone());
    guard.record_exchange(query, reply);
}

/// Runs the configured transcriber and submits whatever it heard. The
/// transcript goes through the same path as typed input, untrimmed.
pub async fn process_voice(app: Arc<Mutex<App>>) {
    let voice = { app.lock().await.voice.clone() };

    if !voice.is_available() {
        let mut guard = app.lock().await;
        guard.logs.add("Voice capture unavailable".to_string());
        guard.push_bot_message(VOICE_UNSUPPORTED_REPLY.to_string());
        return;
    }

    let captured = tokio::task::spawn_blocking(move || voice.capture()).await;

    match captured {
        Ok(Ok(transcript)) => process_query(app, transcript).await,
        Ok(Err(e)) => {
            let mut guard = app.lock().await;
            guard.logs.add(format!("Voice capture failed: {}", e));
            log::error!("voice capture failed: {}", e);
            guard.push_bot_message(VOICE_FAILED_REPLY.to_string());
        }
        Err(e) => {
            let mut guard = app.lock().await;
            guard.logs.add(format!("Voice capture task failed: {}", e));
            log::error!("voice capture task failed: {}", e);
            guard.push_bot_message(VOICE_FAILED_REPLY.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::constants::NO_MATCH_REPLY;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn app_for(backend_url: &str, speech_command: Option<&str>) -> Arc<Mutex<App>> {
        let mut config = Config::default();
        config.backend_url = backend_url.to_string();
        config.request_timeout_secs = 2;
        config.speech_command = speech_command.map(str::to_string);
        Arc::new(Mutex::new(App::new(&config).unwrap()))
    }

    #[tokio::test]
    async fn test_successful_exchange_renders_user_then_bot_and_records_history() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/query"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "hi there"})))
            .mount(&server)
            .await;

        let app = app_for(&server.uri(), None);
        process_query(app.clone(), "hello".to_string()).await;

        let guard = app.lock().await;
        assert_eq!(guard.messages(), vec![(true, "hello"), (false, "hi there")]);
        assert_eq!(guard.typing_count(), 0);
        assert_eq!(guard.history.len(), 1);
        let entry = guard.history.get(0).unwrap();
        assert_eq!(entry.query, "hello");
        assert_eq!(entry.response, "hi there");
    }

    #[tokio::test]
    async fn test_backend_failure_maps_to_error_reply_and_still_records_history() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/query"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let app = app_for(&server.uri(), None);
        process_query(app.clone(), "hello".to_string()).await;

        let guard = app.lock().await;
        assert_eq!(guard.messages(), vec![(true, "hello"), (false, ERROR_REPLY)]);
        assert_eq!(guard.typing_count(), 0);
        assert_eq!(guard.history.len(), 1);
        assert_eq!(guard.history.get(0).unwrap().response, ERROR_REPLY);
    }

    #[tokio::test]
    async fn test_empty_response_body_maps_to_no_match_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/query"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": ""})))
            .mount(&server)
            .await;

        let app = app_for(&server.uri(), None);
        process_query(app.clone(), "hello".to_string()).await;

        let guard = app.lock().await;
        assert_eq!(
            guard.messages(),
            vec![(true, "hello"), (false, NO_MATCH_REPLY)]
        );
    }

    #[tokio::test]
    async fn test_typing_placeholder_lives_exactly_as_long_as_the_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/query"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"response": "slow reply"}))
                    .set_delay(Duration::from_millis(300)),
            )
            .mount(&server)
            .await;

        let app = app_for(&server.uri(), None);
        let task = tokio::spawn(process_query(app.clone(), "hello".to_string()));

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(app.lock().await.typing_count(), 1);

        task.await.unwrap();
        let guard = app.lock().await;
        assert_eq!(guard.typing_count(), 0);
        assert_eq!(guard.messages().last(), Some(&(false, "slow reply")));
    }

    #[tokio::test]
    async fn test_replay_does_not_issue_a_new_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/query"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "hi there"})))
            .expect(1)
            .mount(&server)
            .await;

        let app = app_for(&server.uri(), None);
        process_query(app.clone(), "hello".to_string()).await;

        {
            let mut guard = app.lock().await;
            guard.replay_history(0);
            assert_eq!(
                guard.messages(),
                vec![
                    (true, "hello"),
                    (false, "hi there"),
                    (true, "hello"),
                    (false, "hi there"),
                ]
            );
            // Replay is a render-only operation
            assert_eq!(guard.history.len(), 1);
        }

        server.verify().await;
    }

    #[tokio::test]
    async fn test_empty_voice_transcript_is_answered_locally() {
        // Unreachable backend: reaching it would produce ERROR_REPLY instead
        let app = app_for("http://127.0.0.1:1", Some("true"));
        process_voice(app.clone()).await;

        let guard = app.lock().await;
        assert_eq!(
            guard.messages(),
            vec![(true, ""), (false, EMPTY_QUERY_REPLY)]
        );
        assert_eq!(guard.history.len(), 1);
    }

    #[tokio::test]
    async fn test_voice_transcript_is_submitted_untrimmed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/query"))
            .and(body_json(json!({"query": "  hi  "})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "heard"})))
            .expect(1)
            .mount(&server)
            .await;

        let app = app_for(&server.uri(), Some("printf '  hi  '"));
        process_voice(app.clone()).await;

        let guard = app.lock().await;
        assert_eq!(guard.messages(), vec![(true, "  hi  "), (false, "heard")]);
        server.verify().await;
    }

    #[tokio::test]
    async fn test_voice_unavailable_degrades_to_unsupported_message() {
        let app = app_for("http://127.0.0.1:1", None);
        process_voice(app.clone()).await;

        let guard = app.lock().await;
        assert_eq!(guard.messages(), vec![(false, VOICE_UNSUPPORTED_REPLY)]);
        assert_eq!(guard.history.len(), 0);
    }

    #[tokio::test]
    async fn test_voice_capture_error_degrades_to_apology_message() {
        let app = app_for("http://127.0.0.1:1", Some("exit 3"));
        process_voice(app.clone()).await;

        let guard = app.lock().await;
        assert_eq!(guard.messages(), vec![(false, VOICE_FAILED_REPLY)]);
        assert_eq!(guard.history.len(), 0);
    }

    #[tokio::test]
    async fn test_overlapping_queries_complete_independently() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/query"))
            .and(body_json(json!({"query": "slow"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"response": "slow reply"}))
                    .set_delay(Duration::from_millis(300)),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/query"))
            .and(body_json(json!({"query": "fast"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "fast reply"})))
            .mount(&server)
            .await;

        let app = app_for(&server.uri(), None);
        let slow = tokio::spawn(process_query(app.clone(), "slow".to_string()));
        tokio::time::sleep(Duration::from_millis(50)).await;
        let fast = tokio::spawn(process_query(app.clone(), "fast".to_string()));

        tokio::time::sleep(Duration::from_millis(100)).await;
        {
            let guard = app.lock().await;
            // The fast query has finished while the slow one is still typing
            assert_eq!(guard.typing_count(), 1);
            assert!(guard
                .messages()
                .contains(&(false, "fast reply")));
        }

        slow.await.unwrap();
        fast.await.unwrap();

        let guard = app.lock().await;
        assert_eq!(guard.typing_count(), 0);
        assert_eq!(guard.history.len(), 2);
    }
}

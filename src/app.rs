use crate::api::QueryClient;
use crate::chat_message::{ChatMessage, TranscriptEntry};
use crate::config::Config;
use crate::errors::ParleyResult;
use crate::history::QueryHistory;
use crate::log_view::LogView;
use crate::status_indicator::StatusIndicator;
use crate::voice::VoiceInput;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppScreen {
    Chat,
    QuitConfirm,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    History,
}

/// The interaction controller. Owns the transcript, the input buffer, the
/// query history and the backend client; constructed once from `Config` with
/// its collaborators injected so tests can point it anywhere.
pub struct App {
    pub screen: AppScreen,
    pub focus: Focus,
    pub transcript: Vec<TranscriptEntry>,
    pub input: String,
    pub history: QueryHistory,
    pub logs: LogView,
    pub status_indicator: StatusIndicator,
    pub client: QueryClient,
    pub voice: VoiceInput,
    pub chat_scroll: u16,
    pub stick_to_bottom: bool,
    pub pending_queries: usize,
    pub processing_frame: usize,
    pub last_frame_update: Instant,
    next_typing_id: u64,
}

impl App {
    pub fn new(config: &Config) -> ParleyResult<App> {
        let client = QueryClient::new(
            &config.backend_url,
            Duration::from_secs(config.request_timeout_secs),
        )?;
        let voice = VoiceInput::new(
            config.speech_command.clone(),
            config.voice_language.clone(),
        );

        Ok(App {
            screen: AppScreen::Chat,
            focus: Focus::Input,
            transcript: Vec::new(),
            input: String::new(),
            history: QueryHistory::new(),
            logs: LogView::new(),
            status_indicator: StatusIndicator::new(),
            client,
            voice,
            chat_scroll: 0,
            stick_to_bottom: true,
            pending_queries: 0,
            processing_frame: 0,
            last_frame_update: Instant::now(),
            next_typing_id: 0,
        })
    }

    pub fn push_user_message(&mut self, content: String) {
        self.push_message(ChatMessage::new(content, true));
    }

    pub fn push_bot_message(&mut self, content: String) {
        self.push_message(ChatMessage::new(content, false));
    }

    fn push_message(&mut self, message: ChatMessage) {
        self.transcript.push(TranscriptEntry::Message(message));
        self.stick_to_bottom = true;
    }

    /// Inserts a typing placeholder and returns its id. Each in-flight query
    /// owns one placeholder, so overlapping queries complete independently.
    pub fn begin_typing(&mut self) -> u64 {
        let id = self.next_typing_id;
        self.next_typing_id += 1;
        self.transcript.push(TranscriptEntry::Typing { id });
        self.stick_to_bottom = true;
        self.pending_queries += 1;
        self.status_indicator.set_thinking(true);
        id
    }

    /// Removes the placeholder unconditionally, success or failure.
    pub fn end_typing(&mut self, id: u64) {
        self.transcript
            .retain(|entry| !matches!(entry, TranscriptEntry::Typing { id: t } if *t == id));
        self.pending_queries = self.pending_queries.saturating_sub(1);
        if self.pending_queries == 0 {
            self.status_indicator.set_thinking(false);
            self.status_indicator.clear_status();
        }
    }

    pub fn record_exchange(&mut self, query: String, response: String) {
        self.history.push(query, response);
    }

    /// Re-renders a stored exchange into the transcript without a backend
    /// call.
    pub fn replay_history(&mut self, index: usize) {
        let Some(entry) = self.history.get(index).cloned() else {
            return;
        };
        self.push_user_message(entry.query);
        self.push_bot_message(entry.response);
    }

    pub fn replay_selected(&mut self) {
        if let Some(index) = self.history.selected_index() {
            self.replay_history(index);
        }
    }

    pub fn scroll_up(&mut self) {
        self.stick_to_bottom = false;
        self.chat_scroll = self.chat_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.chat_scroll = self.chat_scroll.saturating_add(1);
    }

    pub fn update_processing_animation(&mut self) {
        if self.pending_queries > 0
            && self.last_frame_update.elapsed() >= Duration::from_millis(80)
        {
            self.processing_frame = (self.processing_frame + 1) % 10;
            self.status_indicator.update_spinner();
            self.last_frame_update = Instant::now();
        }
    }

    /// Finished messages in transcript order, as (from_user, content) pairs.
    pub fn messages(&self) -> Vec<(bool, &str)> {
        self.transcript
            .iter()
            .filter_map(|entry| match entry {
                TranscriptEntry::Message(m) => Some((m.from_user(), m.content())),
                TranscriptEntry::Typing { .. } => None,
            })
            .collect()
    }

    pub fn typing_count(&self) -> usize {
        self.transcript
            .iter()
            .filter(|entry| matches!(entry, TranscriptEntry::Typing { .. }))
            .count()
    }
}

//! Chat screen state
//!
//! Owned by the rendering thread only. Workers never touch it; their results
//! arrive as `Completion`s and are folded in with `ChatUI::complete`.

use std::collections::VecDeque;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::session::Completion;

/// Maximum log entries to keep
const MAX_LOG_ENTRIES: usize = 200;

/// Palette shortcuts, bound to F1..F7 in order
pub const QUICK_COMMANDS: [&str; 7] = [
    "What time is it?",
    "What is the date?",
    "Open Browser",
    "Search for Python",
    "Tell me a joke",
    "Weather",
    "Help",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Assistant,
}

/// An entry in the message log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub speaker: Speaker,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Online,
    Thinking,
}

impl Status {
    pub fn label(self) -> &'static str {
        match self {
            Status::Online => "●  Online",
            Status::Thinking => "●  Thinking...",
        }
    }
}

/// Chat UI state
#[derive(Debug, Default)]
pub struct ChatUI {
    /// Message log, oldest first
    pub log: VecDeque<LogEntry>,
    /// Text being typed
    pub input: String,
    /// Requests submitted but not yet completed
    pub in_flight: usize,
    /// Lines scrolled back from the bottom of the log
    pub scroll_back: u16,
    pub should_quit: bool,
}

impl ChatUI {
    pub fn new() -> Self {
        Self {
            log: VecDeque::with_capacity(MAX_LOG_ENTRIES),
            ..Self::default()
        }
    }

    /// Greeting shown when the screen opens
    pub fn welcome(&mut self, bot_name: &str) {
        self.log(
            Speaker::Assistant,
            format!("Hello! I'm {}, your personal desktop assistant.", bot_name),
        );
        self.log(
            Speaker::Assistant,
            "Type a message below or press F1-F7 for a quick command. Say HELP to see everything I can do!",
        );
    }

    /// Add an entry to the log
    pub fn log(&mut self, speaker: Speaker, message: impl Into<String>) {
        if self.log.len() >= MAX_LOG_ENTRIES {
            self.log.pop_front();
        }
        self.log.push_back(LogEntry {
            speaker,
            message: message.into(),
        });
        self.scroll_back = 0;
    }

    pub fn status(&self) -> Status {
        if self.in_flight > 0 {
            Status::Thinking
        } else {
            Status::Online
        }
    }

    /// Record a submission that was just dispatched
    pub fn begin_request(&mut self, utterance: &str) {
        self.log(Speaker::User, utterance);
        self.in_flight += 1;
    }

    /// Fold in a finished request (in whatever order they arrive)
    pub fn complete(&mut self, completion: Completion) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.log(Speaker::Assistant, completion.result.text);
    }

    /// Take the typed text if there is anything to submit
    pub fn take_input(&mut self) -> Option<String> {
        let text = self.input.trim().to_string();
        self.input.clear();
        (!text.is_empty()).then_some(text)
    }

    /// Apply a key press; returns an utterance to submit, if any
    pub fn on_key(&mut self, key: KeyEvent) -> Option<String> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') | KeyCode::Char('d') if ctrl => self.should_quit = true,
            KeyCode::Enter => return self.take_input(),
            KeyCode::F(n) => {
                let command = QUICK_COMMANDS.get(usize::from(n).checked_sub(1)?)?;
                self.input = command.to_string();
                return self.take_input();
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::PageUp => self.scroll_back = self.scroll_back.saturating_add(5),
            KeyCode::PageDown => self.scroll_back = self.scroll_back.saturating_sub(5),
            KeyCode::Char(c) if !ctrl => self.input.push(c),
            _ => {}
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::ActionResult;
    use crate::core::types::RequestId;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn completion(text: &str) -> Completion {
        Completion {
            id: RequestId::new(),
            utterance: String::new(),
            result: ActionResult::reply(text),
        }
    }

    #[test]
    fn test_typing_and_enter_submits_trimmed() {
        let mut ui = ChatUI::new();
        for c in " hi ".chars() {
            assert_eq!(ui.on_key(key(KeyCode::Char(c))), None);
        }
        assert_eq!(ui.on_key(key(KeyCode::Enter)), Some("hi".to_string()));
        assert!(ui.input.is_empty());
    }

    #[test]
    fn test_empty_enter_submits_nothing() {
        let mut ui = ChatUI::new();
        ui.input = "   ".into();
        assert_eq!(ui.on_key(key(KeyCode::Enter)), None);
    }

    #[test]
    fn test_function_keys_fire_quick_commands() {
        let mut ui = ChatUI::new();
        ui.input = "half typed".into();
        assert_eq!(ui.on_key(key(KeyCode::F(4))), Some("Search for Python".into()));
        assert!(ui.input.is_empty());
        assert_eq!(ui.on_key(key(KeyCode::F(0))), None);
        assert_eq!(ui.on_key(key(KeyCode::F(8))), None);
    }

    #[test]
    fn test_quit_keys() {
        let mut ui = ChatUI::new();
        ui.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(ui.should_quit);
        assert!(ui.input.is_empty());

        let mut ui = ChatUI::new();
        ui.on_key(key(KeyCode::Esc));
        assert!(ui.should_quit);
    }

    #[test]
    fn test_status_tracks_in_flight_requests() {
        let mut ui = ChatUI::new();
        assert_eq!(ui.status(), Status::Online);

        ui.begin_request("one");
        ui.begin_request("two");
        assert_eq!(ui.status(), Status::Thinking);

        ui.complete(completion("reply two"));
        assert_eq!(ui.status(), Status::Thinking);
        ui.complete(completion("reply one"));
        assert_eq!(ui.status(), Status::Online);

        let speakers: Vec<Speaker> = ui.log.iter().map(|e| e.speaker).collect();
        assert_eq!(
            speakers,
            vec![Speaker::User, Speaker::User, Speaker::Assistant, Speaker::Assistant]
        );
    }

    #[test]
    fn test_log_is_bounded() {
        let mut ui = ChatUI::new();
        for i in 0..(MAX_LOG_ENTRIES + 10) {
            ui.log(Speaker::Assistant, format!("line {}", i));
        }
        assert_eq!(ui.log.len(), MAX_LOG_ENTRIES);
        assert_eq!(ui.log.front().unwrap().message, "line 10");
    }

    #[test]
    fn test_new_entry_resets_scroll() {
        let mut ui = ChatUI::new();
        ui.on_key(key(KeyCode::PageUp));
        assert_eq!(ui.scroll_back, 5);
        ui.log(Speaker::Assistant, "hello");
        assert_eq!(ui.scroll_back, 0);
    }
}

//! Directive classification
//!
//! Maps a normalized query plus the knowledge engine's tagged response to
//! exactly one `Directive`. Rules are checked in a fixed order and the first
//! match wins. The phrase lists below are the user-facing command
//! vocabulary; changing them changes what people can type.

use serde::Serialize;

use crate::core::types::{ActionTag, NormalizedQuery, TaggedResponse};

pub const TIME_PHRASES: &[&str] = &["time", "what time is it", "tell me the time", "current time"];

pub const DATE_PHRASES: &[&str] = &[
    "date",
    "what is the date",
    "what is today",
    "what day is it",
    "today date",
];

pub const BROWSER_PHRASES: &[&str] = &["open browser", "launch browser"];
pub const TEXT_EDITOR_PHRASES: &[&str] = &["open notepad", "open text editor"];
pub const CALCULATOR_PHRASES: &[&str] = &["open calculator", "open calc"];
pub const MUSIC_PHRASES: &[&str] = &["open music", "play music"];

pub const WEATHER_PHRASES: &[&str] = &[
    "weather",
    "weather today",
    "what is the weather",
    "how is the weather",
];

/// Checked in order; "search for " must precede "search "
pub const SEARCH_PREFIXES: &[&str] = &["search for ", "search ", "google ", "find ", "look up "];

/// Applications the assistant knows how to start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppKind {
    Browser,
    TextEditor,
    Calculator,
    MusicPlayer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PowerAction {
    Shutdown,
    Restart,
}

/// The single intent extracted from one utterance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Directive {
    /// Conversational reply: the engine's text, shown as-is
    Reply(String),
    ShowTime,
    ShowDate,
    LaunchApp(AppKind),
    OpenWeather,
    /// Web search for the (normalized) term
    Search(String),
    SystemPower(PowerAction),
}

impl Directive {
    /// Short name for logs
    pub fn label(&self) -> &'static str {
        match self {
            Directive::Reply(_) => "reply",
            Directive::ShowTime => "show_time",
            Directive::ShowDate => "show_date",
            Directive::LaunchApp(AppKind::Browser) => "launch_browser",
            Directive::LaunchApp(AppKind::TextEditor) => "launch_text_editor",
            Directive::LaunchApp(AppKind::Calculator) => "launch_calculator",
            Directive::LaunchApp(AppKind::MusicPlayer) => "launch_music_player",
            Directive::OpenWeather => "open_weather",
            Directive::Search(_) => "search",
            Directive::SystemPower(PowerAction::Shutdown) => "shutdown",
            Directive::SystemPower(PowerAction::Restart) => "restart",
        }
    }
}

/// Decide what to do for `query` given the engine's `response`
///
/// Precedence, highest first:
///  1. time phrase, unless the response carries the browser tag
///  2. date phrase
///  3. browser tag or phrase
///  4. text editor tag or phrase
///  5. calculator tag or phrase
///  6. music tag or phrase
///  7. weather tag or phrase
///  8. search prefix with a non-empty term
///  9. shutdown tag
/// 10. restart tag
/// 11. reply with the engine's text
pub fn classify(query: &NormalizedQuery, response: &TaggedResponse) -> Directive {
    let text = query.as_str();

    // A time phrase yields to the browser tag. Kept literal pending product review.
    if !response.has_tag(ActionTag::LaunchBrowser) && TIME_PHRASES.contains(&text) {
        return Directive::ShowTime;
    }

    if DATE_PHRASES.contains(&text) {
        return Directive::ShowDate;
    }

    let launches = [
        (ActionTag::LaunchBrowser, BROWSER_PHRASES, AppKind::Browser),
        (ActionTag::LaunchNotepad, TEXT_EDITOR_PHRASES, AppKind::TextEditor),
        (ActionTag::LaunchCalculator, CALCULATOR_PHRASES, AppKind::Calculator),
        (ActionTag::LaunchMusic, MUSIC_PHRASES, AppKind::MusicPlayer),
    ];
    for (tag, phrases, kind) in launches {
        if response.has_tag(tag) || phrases.contains(&text) {
            return Directive::LaunchApp(kind);
        }
    }

    if response.has_tag(ActionTag::GetWeather) || WEATHER_PHRASES.contains(&text) {
        return Directive::OpenWeather;
    }

    if let Some(term) = search_term(text) {
        return Directive::Search(term.to_string());
    }

    if response.has_tag(ActionTag::SystemShutdown) {
        return Directive::SystemPower(PowerAction::Shutdown);
    }

    if response.has_tag(ActionTag::SystemRestart) {
        return Directive::SystemPower(PowerAction::Restart);
    }

    Directive::Reply(response.as_str().to_string())
}

/// Term after the first search prefix that leaves something behind
pub fn search_term(text: &str) -> Option<&str> {
    SEARCH_PREFIXES.iter().find_map(|prefix| {
        text.strip_prefix(prefix)
            .map(str::trim)
            .filter(|term| !term.is_empty())
    })
}

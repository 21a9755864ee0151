//! Core type definitions shared by the engine, classifier and front-ends

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier for one submitted utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canonical form of an utterance (trimmed, lower-cased)
///
/// Only `command::normalizer::normalize` creates these, so every value in
/// circulation already satisfies the canonical-form invariant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NormalizedQuery(String);

impl NormalizedQuery {
    pub(crate) fn from_canonical(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NormalizedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Knowledge engine output, possibly carrying action tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaggedResponse(String);

impl TaggedResponse {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the response embeds `tag` anywhere (case-sensitive)
    pub fn has_tag(&self, tag: ActionTag) -> bool {
        self.0.contains(tag.marker())
    }
}

impl From<&str> for TaggedResponse {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// Markers the knowledge base embeds to request an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionTag {
    LaunchBrowser,
    LaunchNotepad,
    LaunchCalculator,
    LaunchMusic,
    GetWeather,
    SystemShutdown,
    SystemRestart,
}

impl ActionTag {
    /// Literal text of the tag inside a response
    pub fn marker(self) -> &'static str {
        match self {
            ActionTag::LaunchBrowser => "LAUNCH_BROWSER",
            ActionTag::LaunchNotepad => "LAUNCH_NOTEPAD",
            ActionTag::LaunchCalculator => "LAUNCH_CALCULATOR",
            ActionTag::LaunchMusic => "LAUNCH_MUSIC",
            ActionTag::GetWeather => "GET_WEATHER",
            ActionTag::SystemShutdown => "SYSTEM_SHUTDOWN",
            ActionTag::SystemRestart => "SYSTEM_RESTART",
        }
    }
}

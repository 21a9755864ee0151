//! Knowledge base file format and loader
//!
//! A knowledge base is a TOML file of categories, each mapping a word
//! pattern to a response:
//!
//! ```toml
//! [bot]
//! name = "NOVA"
//!
//! [[category]]
//! pattern = "HELLO"
//! templates = ["Hi there!", "Hello!"]
//!
//! [[category]]
//! pattern = "MY NAME IS *"
//! template = "Nice to meet you, {star}."
//!
//! [[category]]
//! pattern = "HI"
//! redirect = "HELLO"
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::core::error::{NovaError, Result};

pub const DEFAULT_BOT_NAME: &str = "NOVA";
const DEFAULT_REPLY: &str =
    "I'm not sure how to respond to that. Type HELP to see what I can do.";

/// One element of a category pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternWord {
    /// Literal word (lower-cased, punctuation stripped)
    Word(String),
    /// `*`: one or more words, tried after literal words
    Star,
    /// `_`: one or more words, tried before literal words
    Underscore,
}

/// What a category answers with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Template(String),
    Random(Vec<String>),
    Redirect(String),
}

#[derive(Debug, Clone)]
pub struct Category {
    pub pattern: Vec<PatternWord>,
    pub response: Response,
}

/// Parsed, validated knowledge base
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    pub bot_name: String,
    pub default_reply: String,
    pub categories: Vec<Category>,
}

#[derive(Debug, Deserialize)]
struct KnowledgeFile {
    #[serde(default)]
    bot: BotSection,
    #[serde(default, rename = "category")]
    categories: Vec<RawCategory>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct BotSection {
    name: String,
    default_reply: String,
}

impl Default for BotSection {
    fn default() -> Self {
        Self {
            name: DEFAULT_BOT_NAME.into(),
            default_reply: DEFAULT_REPLY.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawCategory {
    pattern: String,
    template: Option<String>,
    templates: Option<Vec<String>>,
    redirect: Option<String>,
}

impl KnowledgeBase {
    /// Load a knowledge base from disk
    ///
    /// Every failure (missing file, bad TOML, invalid category) is reported
    /// as `NovaError::KnowledgeBaseLoad` naming the path.
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|e| NovaError::kb_load(path, e.to_string()))?;
        Self::parse(&content).map_err(|e| match e {
            NovaError::KnowledgeBaseLoad { reason, .. } => NovaError::kb_load(path, reason),
            other => NovaError::kb_load(path, other.to_string()),
        })
    }

    /// Parse knowledge base text; errors carry an empty path
    pub fn parse(content: &str) -> Result<Self> {
        let file: KnowledgeFile =
            toml::from_str(content).map_err(|e| NovaError::kb_load("", e.to_string()))?;

        let mut categories = Vec::with_capacity(file.categories.len());
        for (index, raw) in file.categories.into_iter().enumerate() {
            categories.push(parse_category(index, raw)?);
        }

        Ok(Self {
            bot_name: file.bot.name,
            default_reply: file.bot.default_reply,
            categories,
        })
    }
}

fn parse_category(index: usize, raw: RawCategory) -> Result<Category> {
    let pattern = parse_pattern(&raw.pattern);
    if pattern.is_empty() {
        return Err(NovaError::kb_load(
            "",
            format!("category {} has an empty pattern", index),
        ));
    }

    let response = match (raw.template, raw.templates, raw.redirect) {
        (Some(text), None, None) => Response::Template(text),
        (None, Some(list), None) if !list.is_empty() => Response::Random(list),
        (None, None, Some(target)) => Response::Redirect(target),
        _ => {
            return Err(NovaError::kb_load(
                "",
                format!(
                    "category {} ({:?}) needs exactly one of template, templates or redirect",
                    index, raw.pattern
                ),
            ))
        }
    };

    Ok(Category { pattern, response })
}

/// Split a pattern into words; `*` and `_` become wildcards
pub fn parse_pattern(pattern: &str) -> Vec<PatternWord> {
    pattern
        .split_whitespace()
        .filter_map(|word| match word {
            "*" => Some(PatternWord::Star),
            "_" => Some(PatternWord::Underscore),
            other => {
                let cleaned = clean_word(other);
                (!cleaned.is_empty()).then_some(PatternWord::Word(cleaned))
            }
        })
        .collect()
}

/// Split input into lower-cased words with punctuation removed
pub fn tokenize(input: &str) -> Vec<String> {
    input
        .split_whitespace()
        .map(clean_word)
        .filter(|w| !w.is_empty())
        .collect()
}

fn clean_word(word: &str) -> String {
    word.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

//! Pattern matching over a loaded knowledge base
//!
//! Categories are folded into a word graph. Lookup walks the input left to
//! right, trying `_` branches, then literal words, then `*` branches, and
//! backtracks on failure. The first complete path wins.

use std::ops::Range;
use std::path::Path;

use ahash::AHashMap;
use rand::seq::SliceRandom;

use crate::brain::adapter::KnowledgeEngine;
use crate::brain::kb::{tokenize, KnowledgeBase, PatternWord, Response};
use crate::core::error::{NovaError, Result};

/// Maximum chained redirects before a lookup is treated as a fault
const MAX_REDIRECT_DEPTH: usize = 8;

#[derive(Debug, Default)]
struct Node {
    words: AHashMap<String, Node>,
    underscore: Option<Box<Node>>,
    star: Option<Box<Node>>,
    response: Option<usize>,
}

impl Node {
    fn insert(&mut self, pattern: &[PatternWord], response: usize) {
        let Some((first, rest)) = pattern.split_first() else {
            if self.response.is_some() {
                tracing::debug!("Duplicate pattern, later category wins");
            }
            self.response = Some(response);
            return;
        };

        let next = match first {
            PatternWord::Word(word) => self.words.entry(word.clone()).or_default(),
            PatternWord::Underscore => &mut **self.underscore.get_or_insert_with(Default::default),
            PatternWord::Star => &mut **self.star.get_or_insert_with(Default::default),
        };
        next.insert(rest, response);
    }

    /// Match `words[pos..]`; wildcard captures are recorded as word ranges
    fn find(&self, words: &[String], pos: usize, captures: &mut Vec<Range<usize>>) -> Option<usize> {
        if pos == words.len() {
            return self.response;
        }

        if let Some(node) = &self.underscore {
            if let Some(found) = node.find_after_wildcard(words, pos, captures) {
                return Some(found);
            }
        }

        if let Some(node) = self.words.get(&words[pos]) {
            if let Some(found) = node.find(words, pos + 1, captures) {
                return Some(found);
            }
        }

        if let Some(node) = &self.star {
            if let Some(found) = node.find_after_wildcard(words, pos, captures) {
                return Some(found);
            }
        }

        None
    }

    /// `self` is the node reached through a wildcard that must eat 1+ words
    fn find_after_wildcard(
        &self,
        words: &[String],
        pos: usize,
        captures: &mut Vec<Range<usize>>,
    ) -> Option<usize> {
        for end in pos + 1..=words.len() {
            captures.push(pos..end);
            if let Some(found) = self.find(words, end, captures) {
                return Some(found);
            }
            captures.pop();
        }
        None
    }
}

/// In-memory pattern matcher built from a `KnowledgeBase`
///
/// Immutable after construction, so one instance can serve any number of
/// concurrent lookups.
#[derive(Debug)]
pub struct Brain {
    root: Node,
    responses: Vec<Response>,
    bot_name: String,
    default_reply: String,
}

impl Brain {
    /// Load and index a knowledge base file
    pub fn load(path: &Path) -> Result<Self> {
        tracing::info!("Loading knowledge base from {}", path.display());
        let kb = KnowledgeBase::load(path)?;
        let brain = Self::from_knowledge_base(kb);
        tracing::info!("Knowledge base ready ({} categories)", brain.len());
        Ok(brain)
    }

    pub fn from_knowledge_base(kb: KnowledgeBase) -> Self {
        let mut root = Node::default();
        let mut responses = Vec::with_capacity(kb.categories.len());

        for category in kb.categories {
            root.insert(&category.pattern, responses.len());
            responses.push(category.response);
        }

        Self {
            root,
            responses,
            bot_name: kb.bot_name,
            default_reply: kb.default_reply,
        }
    }

    /// Number of categories indexed
    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    pub fn bot_name(&self) -> &str {
        &self.bot_name
    }

    fn resolve(&self, input: &str, depth: usize) -> Result<String> {
        if depth > MAX_REDIRECT_DEPTH {
            return Err(NovaError::EngineFault(format!(
                "redirect chain deeper than {} at {:?}",
                MAX_REDIRECT_DEPTH, input
            )));
        }

        let words = tokenize(input);
        let mut ranges = Vec::new();
        let Some(index) = self.root.find(&words, 0, &mut ranges) else {
            return Ok(self.default_reply.clone());
        };
        let captures: Vec<String> = ranges.into_iter().map(|r| words[r].join(" ")).collect();

        match &self.responses[index] {
            Response::Template(text) => Ok(self.render(text, &captures)),
            Response::Random(choices) => {
                let text = choices
                    .choose(&mut rand::thread_rng())
                    .ok_or_else(|| NovaError::EngineFault("empty template list".into()))?;
                Ok(self.render(text, &captures))
            }
            Response::Redirect(target) => {
                let target = self.render(target, &captures);
                self.resolve(&target, depth + 1)
            }
        }
    }

    fn render(&self, template: &str, captures: &[String]) -> String {
        let star = captures.first().map(String::as_str).unwrap_or("");
        template
            .replace("{star}", star)
            .replace("{name}", &self.bot_name)
    }
}

impl KnowledgeEngine for Brain {
    fn lookup(&self, query: &str) -> Result<String> {
        self.resolve(query, 0)
    }

    fn name(&self) -> &str {
        &self.bot_name
    }
}

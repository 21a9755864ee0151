//! Boundary between the dispatch core and whatever answers queries
//!
//! The core only ever sees `EngineAdapter::respond`, which cannot fail.
//! Engine faults, errors and panics alike, are logged here and replaced
//! with an apology so the classifier and executor never observe them.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::brain::kb::DEFAULT_BOT_NAME;
use crate::core::error::Result;
use crate::core::types::{NormalizedQuery, TaggedResponse};

/// Reply used when the engine faults
pub const APOLOGY: &str = "Sorry, I had trouble thinking about that. Could you try again?";

/// A loaded knowledge engine
///
/// Implementations must be safe for concurrent read-only lookups.
pub trait KnowledgeEngine: Send + Sync {
    fn lookup(&self, query: &str) -> Result<String>;

    /// Name the assistant answers to
    fn name(&self) -> &str {
        DEFAULT_BOT_NAME
    }
}

/// Shared, infallible handle onto a knowledge engine
#[derive(Clone)]
pub struct EngineAdapter {
    engine: Arc<dyn KnowledgeEngine>,
}

impl EngineAdapter {
    pub fn new(engine: impl KnowledgeEngine + 'static) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    pub fn name(&self) -> &str {
        self.engine.name()
    }

    /// Answer a query; faults degrade to `APOLOGY`
    pub fn respond(&self, query: &NormalizedQuery) -> TaggedResponse {
        // The engine is only read, so no broken state survives an unwind
        let lookup = panic::catch_unwind(AssertUnwindSafe(|| self.engine.lookup(query.as_str())));
        match lookup {
            Ok(Ok(text)) => TaggedResponse::new(text),
            Ok(Err(e)) => {
                tracing::warn!("Knowledge engine fault for {:?}: {}", query.as_str(), e);
                TaggedResponse::new(APOLOGY)
            }
            Err(_) => {
                tracing::warn!("Knowledge engine panicked on {:?}", query.as_str());
                TaggedResponse::new(APOLOGY)
            }
        }
    }
}

impl std::fmt::Debug for EngineAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineAdapter").finish_non_exhaustive()
    }
}

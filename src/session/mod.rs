//! Session controller - one request end to end
//!
//! `Session::handle` runs normalize -> respond -> classify -> execute in that
//! order and returns only when the directive has been carried out. The
//! session holds no per-request state, so a single `Arc<Session>` can be
//! driven from a read loop or from many workers at once (see `dispatch`).

pub mod dispatch;

use crate::brain::{Brain, EngineAdapter};
use crate::command::{classify, normalize, ActionResult, Directive, Executor};
use crate::core::config::AssistantConfig;
use crate::core::error::Result;
use crate::core::types::NormalizedQuery;

pub use dispatch::{Completion, Dispatcher};

/// Everything that happened for one utterance
#[derive(Debug, Clone)]
pub struct Outcome {
    pub query: NormalizedQuery,
    pub directive: Directive,
    pub result: ActionResult,
}

#[derive(Debug)]
pub struct Session {
    engine: EngineAdapter,
    executor: Executor,
}

impl Session {
    pub fn new(engine: EngineAdapter, executor: Executor) -> Self {
        Self { engine, executor }
    }

    /// Load the configured knowledge base and build the executor
    ///
    /// Fails only if the knowledge base cannot be loaded.
    pub fn bootstrap(config: &AssistantConfig) -> Result<Self> {
        let brain = Brain::load(&config.knowledge_base)?;
        let executor = Executor::from_config(config);
        tracing::info!(
            "Session ready (platform: {:?}, dry run: {})",
            executor.platform(),
            config.dry_run
        );
        Ok(Self::new(EngineAdapter::new(brain), executor))
    }

    pub fn bot_name(&self) -> &str {
        self.engine.name()
    }

    /// Handle one utterance and return what to show the user
    pub fn handle(&self, utterance: &str) -> ActionResult {
        self.process(utterance).result
    }

    /// Like `handle`, but also reports the query and directive
    pub fn process(&self, utterance: &str) -> Outcome {
        let query = normalize(utterance);
        let response = self.engine.respond(&query);
        let directive = classify(&query, &response);
        tracing::debug!("{:?} -> {}", query.as_str(), directive.label());

        let result = self.executor.execute(&directive);
        Outcome {
            query,
            directive,
            result,
        }
    }
}

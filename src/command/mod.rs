//! Command pipeline
//!
//! Turns an utterance plus the engine's tagged response into a side effect:
//! utterance -> normalize -> NormalizedQuery -> classify -> Directive -> Executor -> ActionResult

pub mod classifier;
pub mod executor;
pub mod host;
pub mod normalizer;
pub mod platform;

pub use classifier::{classify, AppKind, Directive, PowerAction};
pub use executor::{ActionResult, ExecutionFailure, Executor};
pub use host::{DryRunHost, Host, SystemHost};
pub use normalizer::normalize;
pub use platform::{LaunchCommand, Platform};

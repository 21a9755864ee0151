//! Knowledge engine: loads a pattern knowledge base and answers queries
//!
//! The dispatch core treats this as a black box behind `EngineAdapter`.

pub mod adapter;
pub mod kb;
pub mod matcher;

pub use adapter::{EngineAdapter, KnowledgeEngine, APOLOGY};
pub use kb::KnowledgeBase;
pub use matcher::Brain;

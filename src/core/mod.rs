pub mod config;
pub mod error;
pub mod types;

pub use config::AssistantConfig;
pub use error::{NovaError, Result};
pub use types::{ActionTag, NormalizedQuery, RequestId, TaggedResponse};

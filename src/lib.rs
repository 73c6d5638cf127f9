pub mod cognition;
pub mod config;
pub mod logging;
pub mod runtime;
pub mod sessions;

pub use cognition::{CognitiveEngine, EngineConfig};
pub use sessions::{SessionError, SessionRegistry};

pub mod adaptation;
pub mod config;
pub mod engine;
pub mod history;
pub mod modeling;
pub mod policy;
pub mod sanitize;
pub mod types;

pub use adaptation::AdaptationDispatcher;
pub use config::{ConfigError, EngineConfig};
pub use engine::CognitiveEngine;
pub use history::{HistoryTracker, LoadSummary};
pub use modeling::{CognitiveScorer, FeatureNormalizer, FeatureScores};
pub use policy::RecommendationPolicy;
#[allow(unused_imports)]
pub use types::*;

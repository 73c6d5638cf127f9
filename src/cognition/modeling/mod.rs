pub mod emotion;
pub mod normalizer;
pub mod scorer;

pub use emotion::infer_emotion;
pub use normalizer::{eeg_activity, FeatureNormalizer, FeatureScores};
pub use scorer::CognitiveScorer;

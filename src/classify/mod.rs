pub mod engine;
pub mod rule;
pub mod score;

pub use engine::{accuracy, classify, ClassificationEngine, ANCHOR_LABEL};
pub use rule::{crossings, side, DecisionRule, Placement};
pub use score::{Accuracy, ClassificationResult};

// lib.rs - sliced word embedding association test
pub mod common;
pub mod similarity;
pub mod association;
pub mod engine;
pub mod report;

pub use association::PolarityAxis;
pub use common::{SweatCfg, SweatCode, SweatError, SweatResult};
pub use engine::{ResultRecord, Sweat, TestOutcome, TestParams};
pub use similarity::{EmbeddingTable, SimilarityProvider};

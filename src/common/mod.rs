//! Shared utilities that glue the different domains together.
pub mod config;
pub mod error;
pub mod log;
pub mod stats;
pub mod time;

pub use config::SweatCfg;
pub use error::{SweatCode, SweatError, SweatResult};

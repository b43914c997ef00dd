//! Inputs for the presentation layer. Nothing here draws; renderers consume
//! these records as-is.
//!
//! TODO: Carry the inner t statistic in `TermDetail` next to its p-value.

pub mod domain;
pub mod labels;
pub mod service;

pub use domain::{CumulativeAssociation, Direction, TermDetail};
pub use labels::Labels;
pub use service::{cumulative, directionality, term_details};

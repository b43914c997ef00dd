//! Similarity providers: the only view of an embedding model the core needs.
//!
//! TODO: Cache vector norms in `EmbeddingTable` so repeated pole lookups skip the sqrt.

pub mod domain;
pub mod table;

pub use domain::SimilarityProvider;
pub use table::EmbeddingTable;

//! Nearest-neighbor selection over the vector store.

mod diversity;

pub use diversity::{diversify, DiversityAwareTopK};

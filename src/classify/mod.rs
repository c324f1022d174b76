//! Document classification module
//!
//! Groups parsed documents into object types, scalar declarations, scalar
//! representations, connector links and models.

mod classifier;

pub use classifier::{Classified, Sourced};

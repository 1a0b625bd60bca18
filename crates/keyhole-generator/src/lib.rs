//! Short identifier generation for keyhole.
//!
//! Identifiers are plain alphanumeric strings drawn in one of four length
//! classes. Generators are pure: they never consult storage, so uniqueness
//! is probabilistic and collision handling belongs to the caller.

pub mod error;
pub mod length_class;
pub mod random;

pub use error::Error;
pub use length_class::LengthClass;
pub use random::{GeneratorSettings, RandomGenerator};

use keyhole_core::ShortId;

/// Trait for generating short identifiers.
///
/// Implementations are pure generators that don't interact with storage.
/// A longer class buys a bigger identifier space, not a stronger uniqueness
/// guarantee; callers retry against storage when a draw collides.
pub trait Generator: Send + Sync + 'static {
    /// Generates a fresh identifier whose length is fixed by `class`.
    fn generate(&self, class: LengthClass) -> ShortId;
}

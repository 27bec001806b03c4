//! Character-level Markov text generation library.
//!
//! This crate provides a fixed-order character model including:
//! - Per-window character distributions with cumulative probabilities
//! - Single-pass training from any character stream
//! - Reproducible or OS-seeded generation by inverse-CDF sampling
//! - Internal utilities for corpus I/O
//!
//! The training table is only reachable through read accessors, so a trained
//! model cannot be mutated from the outside.

/// Core model types and the training / generation logic.
pub mod model;

/// Error type shared by the whole crate.
pub mod error;

/// Corpus I/O helpers.
pub mod io;

pub use error::{MarkovError, Result};
pub use model::config::{ModelConfig, Randomness};
pub use model::distribution::{CharacterFrequency, Distribution};
pub use model::language_model::LanguageModel;

//! Top-level module for the character-level Markov model.
//!
//! This module provides:
//! - Per-window character distributions (`Distribution`, `CharacterFrequency`)
//! - The fixed-order model with training and generation (`LanguageModel`)
//! - Construction parameters (`ModelConfig`, `Randomness`)

/// Construction parameters and random source seeding.
pub mod config;

/// Distribution of the characters following one window.
///
/// Tracks character counts, derives cumulative probabilities and
/// supports inverse-CDF sampling.
pub mod distribution;

/// Fixed-order model (`window_length >= 1`).
///
/// Handles single-pass training, probability derivation
/// and seeded text generation.
pub mod language_model;

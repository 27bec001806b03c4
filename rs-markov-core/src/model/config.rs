use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Seed used by the fixed (reproducible) mode when none is given.
pub const DEFAULT_SEED: u64 = 20;

/// Window length used when none is given.
pub const DEFAULT_WINDOW_LENGTH: usize = 8;

/// How the model's random source is seeded.
///
/// # Variants
/// - `Fixed(u64)`: seeded from the given value, every run produces the same text.
/// - `Random`: seeded from the operating system, runs differ.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Randomness {
	Fixed(u64),
	Random,
}

impl Randomness {
	/// Builds the random source described by this mode.
	pub fn into_rng(self) -> StdRng {
		match self {
			Randomness::Fixed(seed) => StdRng::seed_from_u64(seed),
			Randomness::Random => StdRng::from_os_rng(),
		}
	}
}

impl Default for Randomness {
	fn default() -> Self {
		Randomness::Fixed(DEFAULT_SEED)
	}
}

/// Construction parameters of a `LanguageModel`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ModelConfig {
	/// Number of trailing characters used as lookup key (must be >= 1).
	pub window_length: usize,

	/// Seeding mode of the model's random source.
	#[serde(default)]
	pub randomness: Randomness,
}

impl Default for ModelConfig {
	fn default() -> Self {
		Self {
			window_length: DEFAULT_WINDOW_LENGTH,
			randomness: Randomness::default(),
		}
	}
}

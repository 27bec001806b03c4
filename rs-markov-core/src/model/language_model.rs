use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::path::Path;

use log::debug;
use rand::Rng;
use rand::rngs::StdRng;

use super::config::{ModelConfig, Randomness};
use super::distribution::Distribution;
use crate::error::{MarkovError, Result};
use crate::io::{last_n_chars, read_corpus};

/// Fixed-order character-level Markov model.
///
/// The `LanguageModel` maps every window of `window_length` characters seen
/// during training to the distribution of the characters that followed it,
/// and walks that mapping forward to generate text.
///
/// # Responsibilities
/// - Build the table from a character stream in a single pass
/// - Derive the probabilities of every distribution once training is done
/// - Generate text from a seed, one sampled character at a time
///
/// # Invariants
/// - `window_length` is always >= 1
/// - Every key of `table` has exactly `window_length` characters
/// - Every distribution in `table` holds at least one entry
#[derive(Debug)]
pub struct LanguageModel {
	/// Number of trailing characters used as lookup key
	window_length: usize,

	/// Mapping from a window to the distribution of the next character
	table: HashMap<String, Distribution>,

	/// Random source owned by this model
	rng: StdRng,
}

impl LanguageModel {
	/// Creates an untrained model.
	///
	/// # Errors
	/// Returns `InvalidWindowLength` if `window_length` is 0.
	pub fn new(window_length: usize, randomness: Randomness) -> Result<Self> {
		if window_length == 0 {
			return Err(MarkovError::InvalidWindowLength);
		}
		Ok(Self { window_length, table: HashMap::new(), rng: randomness.into_rng() })
	}

	/// Creates a model whose generations are reproducible for a given `seed`.
	pub fn with_seed(window_length: usize, seed: u64) -> Result<Self> {
		Self::new(window_length, Randomness::Fixed(seed))
	}

	/// Creates a model seeded from the operating system.
	pub fn unseeded(window_length: usize) -> Result<Self> {
		Self::new(window_length, Randomness::Random)
	}

	pub fn from_config(config: &ModelConfig) -> Result<Self> {
		Self::new(config.window_length, config.randomness)
	}

	pub fn window_length(&self) -> usize {
		self.window_length
	}

	/// Number of distinct windows learned.
	pub fn len(&self) -> usize {
		self.table.len()
	}

	pub fn is_empty(&self) -> bool {
		self.table.is_empty()
	}

	/// Returns the distribution learned for `window`, if any.
	pub fn distribution(&self, window: &str) -> Option<&Distribution> {
		self.table.get(window)
	}

	/// Iterates over the learned windows (unspecified order).
	pub fn windows(&self) -> impl Iterator<Item = &str> {
		self.table.keys().map(String::as_str)
	}

	/// Read-only view of the whole table.
	pub fn table(&self) -> &HashMap<String, Distribution> {
		&self.table
	}

	/// Trains the model on an ordered sequence of characters.
	///
	/// The first `window_length` characters form the initial window; every
	/// following character is recorded in the distribution of the current
	/// window, which then slides by one character.
	/// Probabilities are derived once the stream is exhausted.
	///
	/// # Errors
	/// Returns `InsufficientInput` if the stream is shorter than the window.
	/// The table is left untouched in that case.
	pub fn train<I>(&mut self, characters: I) -> Result<()>
	where
		I: IntoIterator<Item = char>,
	{
		let mut characters = characters.into_iter();
		let mut window: VecDeque<char> = characters.by_ref().take(self.window_length).collect();
		if window.len() < self.window_length {
			return Err(MarkovError::InsufficientInput {
				required: self.window_length,
				available: window.len(),
			});
		}

		let mut observed = 0usize;
		let mut key: String = window.iter().collect();
		for c in characters {
			self.table.entry(key).or_default().observe(c);
			observed += 1;

			window.pop_front();
			window.push_back(c);
			key = window.iter().collect();
		}

		for distribution in self.table.values_mut() {
			distribution.derive_probabilities();
		}

		debug!(
			"trained on {} characters: {} distinct windows of length {}",
			observed + self.window_length,
			self.table.len(),
			self.window_length
		);
		Ok(())
	}

	/// Reads a UTF-8 corpus file and trains the model on its characters.
	///
	/// # Errors
	/// Returns `Io` if the file cannot be read, or any error of `train`.
	pub fn train_file<P: AsRef<Path>>(&mut self, filepath: P) -> Result<()> {
		let corpus = read_corpus(&filepath)?;
		debug!("loaded corpus {}", filepath.as_ref().display());
		self.train(corpus.chars())
	}

	/// Generates text with the model's own random source.
	///
	/// See `generate_with`.
	pub fn generate(&mut self, seed_text: &str, target_length: usize) -> Result<String> {
		walk(self.window_length, &self.table, seed_text, target_length, &mut self.rng)
	}

	/// Generates text from `seed_text` until it holds `target_length` characters.
	///
	/// # Returns
	/// - `seed_text` unchanged if `target_length < window_length`
	/// - Otherwise the seed followed by the sampled characters. Generation
	///   stops early, without error, when the current window was never seen
	///   during training.
	///
	/// # Errors
	/// Returns `InvalidSeed` if `seed_text` is shorter than the window.
	///
	/// # Notes
	/// - Only reads the table, so independent calls may run concurrently,
	///   each with its own `rng`.
	/// - Lengths are counted in characters, not bytes.
	pub fn generate_with<R>(&self, seed_text: &str, target_length: usize, rng: &mut R) -> Result<String>
	where
		R: Rng + ?Sized,
	{
		walk(self.window_length, &self.table, seed_text, target_length, rng)
	}
}

/// Shared generation loop.
///
/// Kept outside `impl LanguageModel` so that `generate` can borrow the table
/// and the model's random source at the same time.
fn walk<R>(
	window_length: usize,
	table: &HashMap<String, Distribution>,
	seed_text: &str,
	target_length: usize,
	rng: &mut R,
) -> Result<String>
where
	R: Rng + ?Sized,
{
	if target_length < window_length {
		return Ok(seed_text.to_owned());
	}

	let provided = seed_text.chars().count();
	if provided < window_length {
		return Err(MarkovError::InvalidSeed { required: window_length, provided });
	}

	let mut text = seed_text.to_owned();
	let mut length = provided;
	let mut window: VecDeque<char> = last_n_chars(seed_text, window_length).chars().collect();

	while length < target_length {
		let key: String = window.iter().collect();
		let Some(distribution) = table.get(&key) else {
			debug!("dead end on window {:?} after {} characters", key, length);
			break;
		};
		let Some(next_char) = distribution.sample(rng.random::<f64>()) else {
			break;
		};

		text.push(next_char);
		length += 1;
		window.pop_front();
		window.push_back(next_char);
	}

	Ok(text)
}

/// One line per window: `<window> : (<c count p cp> ...)`.
///
/// Window order follows the hash table and is not stable between runs.
impl fmt::Display for LanguageModel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (window, distribution) in &self.table {
			writeln!(f, "{window} : {distribution}")?;
		}
		Ok(())
	}
}

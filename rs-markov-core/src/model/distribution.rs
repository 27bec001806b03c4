use std::fmt;

use log::trace;

use serde::Serialize;


/// One character observed after a window, with its count and derived probabilities.
///
/// `probability` and `cumulative_probability` stay at 0.0 until the owning
/// `Distribution` derives them.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct CharacterFrequency {
	character: char,
	count: usize,
	probability: f64,
	cumulative_probability: f64,
}

impl CharacterFrequency {
	fn new(character: char) -> Self {
		Self {
			character,
			count: 1,
			probability: 0.0,
			cumulative_probability: 0.0,
		}
	}

	/// The observed character.
	pub fn character(&self) -> char {
		self.character
	}

	/// How many times the character followed the owning window.
	pub fn count(&self) -> usize {
		self.count
	}

	/// `count / total` of the owning distribution.
	pub fn probability(&self) -> f64 {
		self.probability
	}

	/// Running sum of probabilities up to and including this entry.
	pub fn cumulative_probability(&self) -> f64 {
		self.cumulative_probability
	}
}

impl fmt::Display for CharacterFrequency {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "({} {} {} {})", self.character, self.count, self.probability, self.cumulative_probability)
	}
}

/// Empirical distribution of the characters following one window.
///
/// Conceptually, this is a node of a Markov chain whose outgoing edges are
/// weighted by their number of observations.
///
/// ## Responsibilities:
/// - Accumulate character occurrences during training
/// - Convert counts into probabilities and cumulative probabilities
/// - Pick a character by inverse-CDF sampling
///
/// ## Invariants
/// - Characters are unique within a distribution
/// - Entries keep the order in which their character was first observed
/// - Each count is strictly positive
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct Distribution {
	entries: Vec<CharacterFrequency>,
	/// Whether the probabilities match the current counts.
	#[serde(skip)]
	derived: bool,
}

impl Distribution {
	/// Creates an empty distribution.
	pub fn new() -> Self {
		Self::default()
	}

	/// Records one occurrence of `character`.
	///
	/// - If the character is already present, its count is increased.
	/// - Otherwise, a new entry is appended with a count of 1.
	pub fn observe(&mut self, character: char) {
		match self.entries.iter_mut().find(|entry| entry.character == character) {
			Some(entry) => entry.count += 1,
			None => self.entries.push(CharacterFrequency::new(character)),
		}
		self.derived = false;
	}

	/// Computes `probability` and `cumulative_probability` of every entry.
	///
	/// The result only depends on the current counts, calling it again
	/// without new observations changes nothing.
	///
	/// # Notes
	/// - A single entry always gets 1.0 / 1.0.
	/// - The last cumulative probability is pinned to exactly 1.0 so that
	///   rounding never leaves a gap at the tail.
	pub fn derive_probabilities(&mut self) {
		if self.entries.is_empty() {
			return;
		}

		if self.entries.len() == 1 {
			let only = &mut self.entries[0];
			only.probability = 1.0;
			only.cumulative_probability = 1.0;
		} else {
			let total = self.total_count() as f64;
			let mut cumulative = 0.0;
			for entry in &mut self.entries {
				entry.probability = entry.count as f64 / total;
				cumulative += entry.probability;
				entry.cumulative_probability = cumulative;
			}
			if let Some(last) = self.entries.last_mut() {
				last.cumulative_probability = 1.0;
			}
		}

		trace!("derived {} entries over {} observations", self.entries.len(), self.total_count());
		self.derived = true;
	}

	/// Whether the probabilities are up to date with the counts.
	pub fn is_derived(&self) -> bool {
		self.derived
	}

	/// Picks a character for a uniform draw `r` in `[0, 1)`.
	///
	/// Returns the first entry whose cumulative probability reaches `r`,
	/// or the last entry if rounding leaves none.
	/// If the probabilities are stale, cumulative values are recomputed
	/// from the counts on the fly.
	///
	/// Returns `None` if the distribution is empty.
	pub fn sample(&self, r: f64) -> Option<char> {
		let last = self.entries.last()?;

		if self.derived {
			return Some(
				self.entries
					.iter()
					.find(|entry| entry.cumulative_probability >= r)
					.unwrap_or(last)
					.character,
			);
		}

		let total = self.total_count() as f64;
		let mut cumulative = 0.0;
		for entry in &self.entries {
			cumulative += entry.count as f64 / total;
			if cumulative >= r {
				return Some(entry.character);
			}
		}
		Some(last.character)
	}

	/// Sum of all counts.
	pub fn total_count(&self) -> usize {
		self.entries.iter().map(|entry| entry.count).sum()
	}

	/// Number of distinct characters.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Position of `character` in iteration order.
	pub fn index_of(&self, character: char) -> Option<usize> {
		self.entries.iter().position(|entry| entry.character == character)
	}

	pub fn get(&self, index: usize) -> Option<&CharacterFrequency> {
		self.entries.get(index)
	}

	pub fn first(&self) -> Option<&CharacterFrequency> {
		self.entries.first()
	}

	/// All entries, in iteration order.
	pub fn entries(&self) -> &[CharacterFrequency] {
		&self.entries
	}

	pub fn iter(&self) -> impl Iterator<Item = &CharacterFrequency> {
		self.entries.iter()
	}

	/// Removes the entry of `character`.
	///
	/// Returns `false` if the character was never observed.
	/// Probabilities must be derived again afterwards.
	pub fn remove(&mut self, character: char) -> bool {
		match self.index_of(character) {
			Some(index) => {
				self.entries.remove(index);
				self.derived = false;
				true
			}
			None => false,
		}
	}
}

impl<'a> IntoIterator for &'a Distribution {
	type Item = &'a CharacterFrequency;
	type IntoIter = std::slice::Iter<'a, CharacterFrequency>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.iter()
	}
}

impl fmt::Display for Distribution {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "(")?;
		for (index, entry) in self.entries.iter().enumerate() {
			if index > 0 {
				write!(f, " ")?;
			}
			write!(f, "{entry}")?;
		}
		write!(f, ")")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn distribution_of(text: &str) -> Distribution {
		let mut distribution = Distribution::new();
		for c in text.chars() {
			distribution.observe(c);
		}
		distribution
	}

	#[test]
	fn test_observe_increments_or_appends() {
		let distribution = distribution_of("abcab");
		let summary: Vec<(char, usize)> = distribution.iter().map(|e| (e.character(), e.count())).collect();
		assert_eq!(summary, vec![('a', 2), ('b', 2), ('c', 1)]);
		assert_eq!(distribution.total_count(), 5);
	}

	#[test]
	fn test_single_entry_is_certain() {
		let mut distribution = distribution_of("zzz");
		distribution.derive_probabilities();
		let only = distribution.first().unwrap();
		assert_eq!(only.probability(), 1.0);
		assert_eq!(only.cumulative_probability(), 1.0);
		assert_eq!(distribution.sample(0.999), Some('z'));
	}

	#[test]
	fn test_derive_probabilities() {
		let mut distribution = distribution_of("aaab");
		distribution.derive_probabilities();
		let a = distribution.get(0).unwrap();
		let b = distribution.get(1).unwrap();
		assert!((a.probability() - 0.75).abs() < 1e-12);
		assert!((a.cumulative_probability() - 0.75).abs() < 1e-12);
		assert!((b.probability() - 0.25).abs() < 1e-12);
		assert_eq!(b.cumulative_probability(), 1.0);
	}

	#[test]
	fn test_sample_inverse_cdf() {
		let mut distribution = distribution_of("aaab");
		distribution.derive_probabilities();
		assert_eq!(distribution.sample(0.0), Some('a'));
		assert_eq!(distribution.sample(0.75), Some('a'));
		assert_eq!(distribution.sample(0.7500001), Some('b'));
		// Out-of-range draws fall back to the last entry
		assert_eq!(distribution.sample(1.5), Some('b'));
	}

	#[test]
	fn test_sample_empty() {
		assert_eq!(Distribution::new().sample(0.3), None);
	}

	#[test]
	fn test_sample_before_derivation_uses_counts() {
		let mut distribution = distribution_of("ab");
		assert!(!distribution.is_derived());
		assert_eq!(distribution.sample(0.4), Some('a'));
		assert_eq!(distribution.sample(0.6), Some('b'));

		distribution.derive_probabilities();
		distribution.observe('b');
		distribution.observe('b');
		assert!(!distribution.is_derived());
		// a: 1/4, b: 3/4
		assert_eq!(distribution.sample(0.3), Some('b'));
	}

	#[test]
	fn test_rederive_is_idempotent() {
		let mut distribution = distribution_of("abcabca");
		distribution.derive_probabilities();
		let before = distribution.clone();
		distribution.derive_probabilities();
		assert_eq!(distribution, before);
	}

	#[test]
	fn test_index_of_and_remove() {
		let mut distribution = distribution_of("xyz");
		assert_eq!(distribution.index_of('y'), Some(1));
		assert_eq!(distribution.index_of('q'), None);
		assert!(distribution.remove('y'));
		assert!(!distribution.remove('y'));
		assert_eq!(distribution.len(), 2);
		assert_eq!(distribution.index_of('z'), Some(1));
	}

	#[test]
	fn test_display() {
		let mut distribution = distribution_of("aab");
		assert_eq!(Distribution::new().to_string(), "()");
		distribution.remove('b');
		distribution.derive_probabilities();
		assert_eq!(distribution.to_string(), "((a 2 1 1))");
	}
}

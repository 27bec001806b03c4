use thiserror::Error;

/// Errors raised by model construction, training and generation.
///
/// A dead end during generation is not an error: generation simply
/// returns the text produced so far.
#[derive(Error, Debug)]
pub enum MarkovError {
	#[error("Window length must be >= 1")]
	InvalidWindowLength,

	#[error("Training input too short: {available} characters, window needs {required}")]
	InsufficientInput {
		required: usize,
		available: usize,
	},

	#[error("Seed text too short: {provided} characters, window needs {required}")]
	InvalidSeed {
		required: usize,
		provided: usize,
	},

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MarkovError>;

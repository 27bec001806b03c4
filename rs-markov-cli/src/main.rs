use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::info;

use rs_markov_core::model::config::DEFAULT_SEED;
use rs_markov_core::{LanguageModel, ModelConfig, Randomness};

/// Generation mode, as given on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
	/// Seeded from the operating system, every run differs
	Random,
	/// Seeded from `--seed`, every run is identical
	Fixed,
}

#[derive(Parser, Debug)]
#[command(name = "rs-markov", about = "Character-level Markov text generator")]
struct Cli {
	/// Number of trailing characters used to predict the next one
	window_length: usize,

	/// Text to start from (at least `window_length` characters)
	initial_text: String,

	/// Total length of the generated text, initial text included
	length: usize,

	/// Randomness mode
	#[arg(value_enum)]
	mode: Mode,

	/// Training corpus (UTF-8 text file)
	corpus: PathBuf,

	/// Seed used in `fixed` mode
	#[arg(long, default_value_t = DEFAULT_SEED)]
	seed: u64,

	/// Print the trained table instead of generating
	#[arg(long, conflicts_with = "json")]
	dump: bool,

	/// Print the trained table as JSON instead of generating
	#[arg(long)]
	json: bool,

	/// Increase log verbosity (-v: info, -vv: debug, -vvv: trace)
	#[arg(short, long, action = clap::ArgAction::Count)]
	verbose: u8,
}

impl Cli {
	/// Builds the model configuration from the command line.
	fn model_config(&self) -> ModelConfig {
		let randomness = match self.mode {
			Mode::Random => Randomness::Random,
			Mode::Fixed => Randomness::Fixed(self.seed),
		};
		ModelConfig { window_length: self.window_length, randomness }
	}

	fn log_filter(&self) -> &'static str {
		match self.verbose {
			0 => "warn",
			1 => "info",
			2 => "debug",
			_ => "trace",
		}
	}
}

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();

	// RUST_LOG takes precedence over -v
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter())).init();

	let config = cli.model_config();
	info!("window length {}, randomness {:?}", config.window_length, config.randomness);

	let mut model = LanguageModel::from_config(&config)?;
	model
		.train_file(&cli.corpus)
		.with_context(|| format!("failed to train on {}", cli.corpus.display()))?;
	info!("trained {} windows from {}", model.len(), cli.corpus.display());

	if cli.dump {
		print!("{model}");
		return Ok(());
	}
	if cli.json {
		println!("{}", serde_json::to_string_pretty(model.table())?);
		return Ok(());
	}

	let text = model.generate(&cli.initial_text, cli.length)?;
	if text.chars().count() < cli.length {
		info!("generation stopped early: no data after the last window");
	}
	println!("{text}");

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_fixed_mode() {
		let cli = Cli::try_parse_from(["rs-markov", "8", "FENNYMAN", "1000", "fixed", "corpus.txt"]).unwrap();
		assert_eq!(cli.mode, Mode::Fixed);
		assert_eq!(cli.model_config(), ModelConfig { window_length: 8, randomness: Randomness::Fixed(20) });
		assert_eq!(cli.log_filter(), "warn");
	}

	#[test]
	fn test_parse_random_mode_with_flags() {
		let cli = Cli::try_parse_from(["rs-markov", "-vv", "--dump", "2", "ab", "10", "random", "c.txt"]).unwrap();
		assert_eq!(cli.model_config().randomness, Randomness::Random);
		assert!(cli.dump);
		assert_eq!(cli.log_filter(), "debug");
	}

	#[test]
	fn test_parse_custom_seed() {
		let cli = Cli::try_parse_from(["rs-markov", "--seed", "7", "3", "abc", "10", "fixed", "c.txt"]).unwrap();
		assert_eq!(cli.model_config().randomness, Randomness::Fixed(7));
	}

	#[test]
	fn test_reject_unknown_mode() {
		assert!(Cli::try_parse_from(["rs-markov", "3", "abc", "10", "sometimes", "c.txt"]).is_err());
	}

	#[test]
	fn test_dump_and_json_conflict() {
		assert!(Cli::try_parse_from(["rs-markov", "--dump", "--json", "3", "abc", "10", "fixed", "c.txt"]).is_err());
	}
}

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Reads a whole corpus file as UTF-8 text.
///
/// - Reads the entire file into memory
/// - Line endings are kept: they are characters like any other
pub fn read_corpus<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents)
}

/// Returns the last `n` characters of a string.
///
/// If `n` is greater than the number of characters in `s`, the entire string is returned.
///
/// # Notes
/// - Handles UTF-8 correctly (multibyte characters).
pub(crate) fn last_n_chars(s: &str, n: usize) -> String {
	let len = s.chars().count();
	if n >= len {
		return s.to_owned();
	}
	s.chars().skip(len - n).collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	#[test]
	fn test_last_n_chars_multibyte() {
		assert_eq!(last_n_chars("héllo", 3), "llo");
		assert_eq!(last_n_chars("àéî", 2), "éî");
		assert_eq!(last_n_chars("ab", 5), "ab");
		assert_eq!(last_n_chars("ab", 0), "");
	}

	#[test]
	fn test_read_corpus_keeps_newlines() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		write!(file, "ab\r\ncd\n").unwrap();
		let text = read_corpus(file.path()).unwrap();
		assert_eq!(text, "ab\r\ncd\n");
	}

	#[test]
	fn test_read_corpus_missing_file() {
		let dir = tempfile::tempdir().unwrap();
		let err = read_corpus(dir.path().join("missing.txt")).unwrap_err();
		assert_eq!(err.kind(), io::ErrorKind::NotFound);
	}
}

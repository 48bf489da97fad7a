use serde::{Deserialize, Serialize};

use super::Mutate;
use super::positions::{pick_without_replacement, uppercase_masked, word_end, word_starts};
use crate::error::Result;
use crate::random::{ByteSource, RandomSource};

/// Capitalizes `word_count` whole words of at least `min_word_length` characters.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct UppercaseWordMutator {
	pub word_count: usize,
	pub min_word_length: usize,
}

impl UppercaseWordMutator {
	/// One word of four letters or more.
	pub fn basic() -> Self {
		Self { word_count: 1, min_word_length: 4 }
	}

	pub fn new(word_count: usize, min_word_length: usize) -> Self {
		Self { word_count, min_word_length }
	}
}

impl Default for UppercaseWordMutator {
	fn default() -> Self {
		Self::basic()
	}
}

impl Mutate for UppercaseWordMutator {
	fn mutate<S: ByteSource>(&self, phrase: &mut String, random: &mut RandomSource<S>) -> Result<()> {
		if self.word_count == 0 {
			return Ok(());
		}
		let chars: Vec<char> = phrase.chars().collect();
		let candidates: Vec<usize> = word_starts(&chars)
			.into_iter()
			.filter(|&start| word_end(&chars, start) - start >= self.min_word_length)
			.collect();
		let starts = pick_without_replacement(candidates, self.word_count, random)?;
		if starts.is_empty() {
			return Ok(());
		}

		let mut mask = vec![false; chars.len()];
		for start in starts {
			mask[start..word_end(&chars, start)].fill(true);
		}
		*phrase = uppercase_masked(&chars, &mask);
		Ok(())
	}

	fn extra_combinations(&self) -> f64 {
		if self.word_count == 0 { 1.0 } else { f64::NAN }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn mutate(input: &str, word_count: usize, min_word_length: usize, seed: u64) -> String {
		let mut phrase = input.to_owned();
		UppercaseWordMutator::new(word_count, min_word_length)
			.mutate(&mut phrase, &mut RandomSource::seeded(seed))
			.unwrap();
		phrase
	}

	#[test]
	fn test_only_long_words_are_candidates() {
		for seed in 0..30 {
			assert_eq!(mutate("the quick fox jumps ", 1, 5, seed).to_lowercase(), "the quick fox jumps ");
			let phrase = mutate("the quick fox jumps ", 1, 5, seed);
			assert!(phrase == "the QUICK fox jumps " || phrase == "the quick fox JUMPS ", "'{}'", phrase);
		}
	}

	#[test]
	fn test_word_count_clamps() {
		assert_eq!(mutate("big red dog", 5, 1, 1), "BIG RED DOG");
	}

	#[test]
	fn test_word_runs_to_buffer_end() {
		assert_eq!(mutate("elephant", 1, 3, 1), "ELEPHANT");
	}

	#[test]
	fn test_no_candidates_is_noop() {
		assert_eq!(mutate("a b c", 2, 2, 1), "a b c");
		assert_eq!(mutate("", 1, 0, 1), "");
		assert_eq!(mutate("big dog", 0, 1, 1), "big dog");
	}
}

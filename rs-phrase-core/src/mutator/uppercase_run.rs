use serde::{Deserialize, Serialize};

use super::Mutate;
use super::positions::{pick_without_replacement, uppercase_masked};
use crate::error::{Error, Result};
use crate::random::{ByteSource, RandomSource};

/// Capitalizes `run_count` runs of `run_length` consecutive letters.
///
/// Runs are drawn independently: two runs may overlap or touch.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct UppercaseRunMutator {
	pub run_length: usize,
	pub run_count: usize,
}

impl UppercaseRunMutator {
	/// One run of three letters.
	pub fn basic() -> Self {
		Self { run_length: 3, run_count: 1 }
	}

	pub fn new(run_length: usize, run_count: usize) -> Self {
		Self { run_length, run_count }
	}

	pub(crate) fn validate(&self) -> Result<()> {
		if self.run_count > 0 && self.run_length == 0 {
			return Err(Error::invalid_argument("uppercase run length must be positive"));
		}
		Ok(())
	}

	fn run_starts(&self, chars: &[char]) -> Vec<usize> {
		if self.run_length == 0 || self.run_length > chars.len() {
			return Vec::new();
		}
		(0..=chars.len() - self.run_length)
			.filter(|&i| chars[i..i + self.run_length].iter().all(|c| c.is_alphabetic()))
			.collect()
	}
}

impl Default for UppercaseRunMutator {
	fn default() -> Self {
		Self::basic()
	}
}

impl Mutate for UppercaseRunMutator {
	fn mutate<S: ByteSource>(&self, phrase: &mut String, random: &mut RandomSource<S>) -> Result<()> {
		if self.run_count == 0 || self.run_length == 0 {
			return Ok(());
		}
		let chars: Vec<char> = phrase.chars().collect();
		let starts = pick_without_replacement(self.run_starts(&chars), self.run_count, random)?;
		if starts.is_empty() {
			return Ok(());
		}

		let mut mask = vec![false; chars.len()];
		for start in starts {
			mask[start..start + self.run_length].fill(true);
		}
		*phrase = uppercase_masked(&chars, &mask);
		Ok(())
	}

	fn extra_combinations(&self) -> f64 {
		if self.run_count == 0 || self.run_length == 0 { 1.0 } else { f64::NAN }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn mutate(input: &str, run_length: usize, run_count: usize, seed: u64) -> String {
		let mut phrase = input.to_owned();
		UppercaseRunMutator::new(run_length, run_count)
			.mutate(&mut phrase, &mut RandomSource::seeded(seed))
			.unwrap();
		phrase
	}

	#[test]
	fn test_runs_stay_inside_words() {
		for seed in 0..30 {
			let phrase = mutate("big red dog", 3, 1, seed);
			assert!(["BIG red dog", "big RED dog", "big red DOG"].contains(&phrase.as_str()), "'{}'", phrase);
		}
	}

	#[test]
	fn test_overlapping_runs_are_permitted() {
		// Only offsets 0 and 1 can start a run of 3 in "cats": both are taken and overlap.
		for seed in 0..10 {
			assert_eq!(mutate("cats", 3, 2, seed), "CATS");
		}
	}

	#[test]
	fn test_run_covering_whole_word_clamps() {
		assert_eq!(mutate("cat", 3, 2, 1), "CAT");
	}

	#[test]
	fn test_run_longer_than_any_word_is_noop() {
		assert_eq!(mutate("big red dog", 4, 1, 1), "big red dog");
		assert_eq!(mutate("", 2, 1, 1), "");
	}

	#[test]
	fn test_validate() {
		assert!(UppercaseRunMutator::basic().validate().is_ok());
		assert!(matches!(UppercaseRunMutator::new(0, 1).validate(), Err(Error::InvalidArgument(_))));
		assert_eq!(UppercaseRunMutator::new(0, 1).extra_combinations(), 1.0);
	}
}

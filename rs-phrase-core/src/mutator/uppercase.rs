use serde::{Deserialize, Serialize};

use super::Mutate;
use super::positions::{pick_without_replacement, uppercase_masked, word_starts};
use crate::error::Result;
use crate::random::{ByteSource, RandomSource};

/// Which letters may be capitalized.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum UppercaseStyle {
	Never,
	StartOfWord,
	Anywhere,
}

/// Capitalizes `count` single letters.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct UppercaseMutator {
	pub when: UppercaseStyle,
	pub count: usize,
}

impl UppercaseMutator {
	/// Capitalizes the first letter of two words.
	pub fn basic() -> Self {
		Self { when: UppercaseStyle::StartOfWord, count: 2 }
	}

	pub fn new(when: UppercaseStyle, count: usize) -> Self {
		Self { when, count }
	}

	fn candidates(&self, chars: &[char]) -> Vec<usize> {
		match self.when {
			UppercaseStyle::Never => Vec::new(),
			UppercaseStyle::StartOfWord => word_starts(chars)
				.into_iter()
				.filter(|&i| chars[i].is_alphabetic())
				.collect(),
			UppercaseStyle::Anywhere => (0..chars.len()).filter(|&i| chars[i].is_alphabetic()).collect(),
		}
	}
}

impl Default for UppercaseMutator {
	fn default() -> Self {
		Self::basic()
	}
}

impl Mutate for UppercaseMutator {
	fn mutate<S: ByteSource>(&self, phrase: &mut String, random: &mut RandomSource<S>) -> Result<()> {
		if self.when == UppercaseStyle::Never || self.count == 0 {
			return Ok(());
		}
		let chars: Vec<char> = phrase.chars().collect();
		let picked = pick_without_replacement(self.candidates(&chars), self.count, random)?;
		if picked.is_empty() {
			return Ok(());
		}

		let mut mask = vec![false; chars.len()];
		for i in picked {
			mask[i] = true;
		}
		*phrase = uppercase_masked(&chars, &mask);
		Ok(())
	}

	fn extra_combinations(&self) -> f64 {
		if self.when == UppercaseStyle::Never || self.count == 0 { 1.0 } else { f64::NAN }
	}
}

use serde::{Deserialize, Serialize};

use super::Mutate;
use super::positions::{
	insert_at, is_end_of_word, is_start_of_word, last_alphanumeric, pick_without_replacement,
};
use crate::error::{Error, Result};
use crate::random::{ByteSource, RandomSource};

pub const DIGITS: &str = "0123456789";

/// Where numeric symbols may be inserted.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum NumericStyle {
	Never,
	StartOfWord,
	EndOfWord,
	StartOrEndOfWord,
	Anywhere,
	EndOfPhrase,
}

/// Inserts `count` random symbols (digits by default) into the phrase.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct NumericMutator {
	pub when: NumericStyle,
	pub count: usize,
	pub symbols: String,
}

impl NumericMutator {
	/// Two digits, each at the end of a word.
	pub fn basic() -> Self {
		Self {
			when: NumericStyle::EndOfWord,
			count: 2,
			symbols: DIGITS.to_owned(),
		}
	}

	pub fn new(when: NumericStyle, count: usize) -> Self {
		Self { when, count, ..Self::basic() }
	}

	pub(crate) fn validate(&self) -> Result<()> {
		if self.when != NumericStyle::Never && self.count > 0 && self.symbols.is_empty() {
			return Err(Error::invalid_argument("numeric mutator symbol set must not be empty"));
		}
		Ok(())
	}

	fn insertion_points(&self, chars: &[char]) -> Vec<usize> {
		if chars.is_empty() {
			return Vec::new();
		}
		let starts: Vec<usize> = (0..chars.len()).filter(|&i| is_start_of_word(chars, i)).collect();
		let mut ends: Vec<usize> = (0..chars.len()).filter(|&i| is_end_of_word(chars, i)).collect();
		if !chars[chars.len() - 1].is_whitespace() {
			ends.push(chars.len());
		}

		match self.when {
			NumericStyle::Never => Vec::new(),
			NumericStyle::StartOfWord => starts,
			NumericStyle::EndOfWord => ends,
			NumericStyle::StartOrEndOfWord => starts.into_iter().chain(ends).collect(),
			NumericStyle::Anywhere => (0..=chars.len()).collect(),
			NumericStyle::EndOfPhrase => last_alphanumeric(chars).map(|i| i + 1).into_iter().collect(),
		}
	}
}

impl Default for NumericMutator {
	fn default() -> Self {
		Self::basic()
	}
}

impl Mutate for NumericMutator {
	fn mutate<S: ByteSource>(&self, phrase: &mut String, random: &mut RandomSource<S>) -> Result<()> {
		if self.when == NumericStyle::Never || self.count == 0 {
			return Ok(());
		}
		self.validate()?;

		let mut chars: Vec<char> = phrase.chars().collect();
		let points = pick_without_replacement(self.insertion_points(&chars), self.count, random)?;
		if points.is_empty() {
			return Ok(());
		}

		let symbols: Vec<char> = self.symbols.chars().collect();
		for point in points {
			let symbol = symbols[random.next_index(symbols.len())?];
			insert_at(&mut chars, point, symbol.encode_utf8(&mut [0u8; 4]));
		}
		*phrase = chars.into_iter().collect();
		Ok(())
	}

	fn extra_combinations(&self) -> f64 {
		if self.when == NumericStyle::Never || self.count == 0 { 1.0 } else { f64::NAN }
	}
}

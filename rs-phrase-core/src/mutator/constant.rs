use serde::{Deserialize, Serialize};

use super::Mutate;
use super::positions::{insert_at, last_non_whitespace};
use crate::error::{Error, Result};
use crate::random::{ByteSource, RandomSource};

/// Where a constant may be inserted.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ConstantStyle {
	Never,
	StartOfPhrase,
	MiddleOfPhrase,
	EndOfPhrase,
	Anywhere,
}

/// Inserts a fixed token (usually punctuation) once into the phrase.
///
/// The token is followed by `separator`, except when appended at the very end.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ConstantMutator {
	pub when: ConstantStyle,
	pub value: String,
	pub separator: String,
}

impl ConstantMutator {
	/// A full stop at the end of the phrase.
	pub fn basic() -> Self {
		Self {
			when: ConstantStyle::EndOfPhrase,
			value: ".".to_owned(),
			separator: " ".to_owned(),
		}
	}

	pub fn new(when: ConstantStyle, value: &str) -> Self {
		Self { when, value: value.to_owned(), ..Self::basic() }
	}

	pub(crate) fn validate(&self) -> Result<()> {
		if self.when != ConstantStyle::Never && self.value.is_empty() {
			return Err(Error::invalid_argument("constant mutator value must not be empty"));
		}
		Ok(())
	}

	fn insertion_points(&self, chars: &[char]) -> Vec<usize> {
		let Some(last) = last_non_whitespace(chars) else {
			return Vec::new();
		};
		let mut points = Vec::new();
		if matches!(self.when, ConstantStyle::StartOfPhrase | ConstantStyle::Anywhere) {
			points.push(0);
		}
		if matches!(self.when, ConstantStyle::MiddleOfPhrase | ConstantStyle::Anywhere) {
			points.extend(
				(1..chars.len())
					.filter(|&i| {
						chars[i].is_whitespace() && chars[i - 1].is_alphanumeric() && i + 1 < chars.len()
					})
					.map(|i| i + 1),
			);
		}
		if matches!(self.when, ConstantStyle::EndOfPhrase | ConstantStyle::Anywhere) {
			// Assumes one trailing separator: the token lands after it.
			points.push(last + 2);
		}
		points
	}
}

impl Default for ConstantMutator {
	fn default() -> Self {
		Self::basic()
	}
}

impl Mutate for ConstantMutator {
	fn mutate<S: ByteSource>(&self, phrase: &mut String, random: &mut RandomSource<S>) -> Result<()> {
		if self.when == ConstantStyle::Never {
			return Ok(());
		}
		let mut chars: Vec<char> = phrase.chars().collect();
		let points = self.insertion_points(&chars);
		if points.is_empty() {
			return Ok(());
		}

		let point = points[random.next_index(points.len())?];
		if point >= chars.len() {
			phrase.push_str(&self.value);
		} else {
			insert_at(&mut chars, point, &format!("{}{}", self.value, self.separator));
			*phrase = chars.into_iter().collect();
		}
		Ok(())
	}

	fn extra_combinations(&self) -> f64 {
		if self.when == ConstantStyle::Never { 1.0 } else { f64::NAN }
	}
}

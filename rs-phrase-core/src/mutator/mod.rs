//! Text mutations applied to an assembled phrase.
//!
//! Mutators are immutable configuration values: `mutate` keeps no state
//! between calls, so one list can be shared by any number of generations.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::Result;
use crate::random::{ByteSource, RandomSource};

/// Inserts a constant token at the start, middle or end of the phrase.
pub mod constant;

/// Inserts random digits (or any symbol set) at word boundaries.
pub mod numeric;

/// Capitalizes single letters.
pub mod uppercase;

/// Capitalizes runs of consecutive letters.
pub mod uppercase_run;

/// Capitalizes whole words.
pub mod uppercase_word;

/// Candidate-offset helpers shared by every mutator.
mod positions;

pub use constant::{ConstantMutator, ConstantStyle};
pub use numeric::{NumericMutator, NumericStyle};
pub use uppercase::{UppercaseMutator, UppercaseStyle};
pub use uppercase_run::UppercaseRunMutator;
pub use uppercase_word::UppercaseWordMutator;

/// A reversible text transformation raising a phrase's guess-resistance.
pub trait Mutate {
	/// Edits `phrase` in place. Phrases without a legal edit position are left untouched.
	fn mutate<S: ByteSource>(&self, phrase: &mut String, random: &mut RandomSource<S>) -> Result<()>;

	/// Multiplicative number of phrase variants the mutation adds.
	///
	/// `NAN` when not modeled; `1.0` when the mutator is configured to do nothing.
	fn extra_combinations(&self) -> f64;
}

/// Any configured mutator, as listed in a phrase configuration.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "mutator", rename_all = "camelCase")]
pub enum Mutator {
	Constant(ConstantMutator),
	Numeric(NumericMutator),
	Uppercase(UppercaseMutator),
	UppercaseRun(UppercaseRunMutator),
	UppercaseWord(UppercaseWordMutator),
}

impl Mutator {
	/// Rejects settings no phrase could be mutated with.
	pub fn validate(&self) -> Result<()> {
		match self {
			Mutator::Constant(m) => m.validate(),
			Mutator::Numeric(m) => m.validate(),
			Mutator::UppercaseRun(m) => m.validate(),
			Mutator::Uppercase(_) | Mutator::UppercaseWord(_) => Ok(()),
		}
	}

	pub fn name(&self) -> &'static str {
		match self {
			Mutator::Constant(_) => "constant",
			Mutator::Numeric(_) => "numeric",
			Mutator::Uppercase(_) => "uppercase",
			Mutator::UppercaseRun(_) => "uppercaseRun",
			Mutator::UppercaseWord(_) => "uppercaseWord",
		}
	}
}

impl Mutate for Mutator {
	fn mutate<S: ByteSource>(&self, phrase: &mut String, random: &mut RandomSource<S>) -> Result<()> {
		match self {
			Mutator::Constant(m) => m.mutate(phrase, random)?,
			Mutator::Numeric(m) => m.mutate(phrase, random)?,
			Mutator::Uppercase(m) => m.mutate(phrase, random)?,
			Mutator::UppercaseRun(m) => m.mutate(phrase, random)?,
			Mutator::UppercaseWord(m) => m.mutate(phrase, random)?,
		}
		trace!(mutator = self.name(), "mutated phrase");
		Ok(())
	}

	fn extra_combinations(&self) -> f64 {
		match self {
			Mutator::Constant(m) => m.extra_combinations(),
			Mutator::Numeric(m) => m.extra_combinations(),
			Mutator::Uppercase(m) => m.extra_combinations(),
			Mutator::UppercaseRun(m) => m.extra_combinations(),
			Mutator::UppercaseWord(m) => m.extra_combinations(),
		}
	}
}

impl From<ConstantMutator> for Mutator {
	fn from(m: ConstantMutator) -> Self {
		Mutator::Constant(m)
	}
}

impl From<NumericMutator> for Mutator {
	fn from(m: NumericMutator) -> Self {
		Mutator::Numeric(m)
	}
}

impl From<UppercaseMutator> for Mutator {
	fn from(m: UppercaseMutator) -> Self {
		Mutator::Uppercase(m)
	}
}

impl From<UppercaseRunMutator> for Mutator {
	fn from(m: UppercaseRunMutator) -> Self {
		Mutator::UppercaseRun(m)
	}
}

impl From<UppercaseWordMutator> for Mutator {
	fn from(m: UppercaseWordMutator) -> Self {
		Mutator::UppercaseWord(m)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_deserialize_mutator_list() {
		let json = r#"[
			{ "mutator": "numeric", "when": "startOrEndOfWord", "count": 3 },
			{ "mutator": "constant", "when": "startOfPhrase", "value": "!" },
			{ "mutator": "uppercaseRun", "runLength": 2, "runCount": 2 },
			{ "mutator": "uppercaseWord" }
		]"#;
		let mutators: Vec<Mutator> = serde_json::from_str(json).unwrap();
		assert_eq!(
			mutators[0],
			Mutator::Numeric(NumericMutator {
				when: NumericStyle::StartOrEndOfWord,
				count: 3,
				symbols: "0123456789".into(),
			})
		);
		assert_eq!(
			mutators[1],
			Mutator::Constant(ConstantMutator {
				when: ConstantStyle::StartOfPhrase,
				value: "!".into(),
				separator: " ".into(),
			})
		);
		assert_eq!(mutators[2], UppercaseRunMutator::new(2, 2).into());
		assert_eq!(mutators[3], UppercaseWordMutator::basic().into());
	}

	#[test]
	fn test_pipeline_applies_in_order() {
		let mutators: Vec<Mutator> = vec![
			ConstantMutator::new(ConstantStyle::StartOfPhrase, "x").into(),
			UppercaseMutator::new(UppercaseStyle::StartOfWord, 1).into(),
		];
		let mut phrase = "dog".to_owned();
		let mut random = RandomSource::seeded(1);
		for mutator in &mutators {
			mutator.mutate(&mut phrase, &mut random).unwrap();
		}
		// The constant is a word of its own by the time capitalization runs.
		assert!(phrase == "X dog" || phrase == "x Dog", "'{}'", phrase);
	}

	#[test]
	fn test_combinations_propagate_nan() {
		let inert: Mutator = NumericMutator::new(NumericStyle::Never, 2).into();
		let active: Mutator = NumericMutator::basic().into();
		assert_eq!(inert.extra_combinations(), 1.0);
		assert!(active.extra_combinations().is_nan());
	}
}

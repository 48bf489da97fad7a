use tracing::{debug, trace};

use super::dictionary::WordDictionary;
use super::phrase_input::PhraseInput;
use super::template::Template;
use super::word::Word;
use crate::error::{Error, Result};
use crate::mutator::Mutate;
use crate::random::{ByteSource, CryptoByteSource, RandomSource};

/// Strength estimate of a phrase configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhraseStrength {
	/// Number of distinct phrases the configuration can produce.
	/// `NAN` when a mutator contribution is not modeled.
	pub combinations: f64,
	/// `log2(combinations)`.
	pub entropy_bits: f64,
}

/// High-level generator turning template sequences into passphrases.
///
/// # Responsibilities
/// - Resolve each slot of a `PhraseInput` against a shared dictionary
/// - Avoid repeating content words within one phrase
/// - Join the chosen forms and run the mutator pipeline
///
/// The dictionary is only borrowed: one dictionary may serve many generators,
/// each owning its own random source.
#[derive(Debug)]
pub struct PhraseGenerator<'d, S: ByteSource> {
	dictionary: &'d WordDictionary,
	random: RandomSource<S>,
}

impl<'d> PhraseGenerator<'d, CryptoByteSource> {
	/// Creates a generator drawing from the secure thread-local generator.
	pub fn new(dictionary: &'d WordDictionary) -> Self {
		Self::with_random(dictionary, RandomSource::crypto())
	}
}

impl<'d, S: ByteSource> PhraseGenerator<'d, S> {
	pub fn with_random(dictionary: &'d WordDictionary, random: RandomSource<S>) -> Self {
		Self { dictionary, random }
	}

	/// Resolves every template, in order, to its final word form.
	///
	/// # Behavior
	/// - Content words already used in this phrase are excluded from later slots.
	/// - Indefinite articles are rendered last, against the word that follows them.
	///
	/// # Errors
	/// - `InvalidArgument` if `templates` is empty.
	/// - `SelectionExhausted` if a slot cannot be filled; nothing is returned for
	///   the partially resolved phrase.
	pub fn generate_words(&mut self, templates: &[Template]) -> Result<Vec<String>> {
		if templates.is_empty() {
			return Err(Error::invalid_argument("a phrase needs at least one template"));
		}

		let mut already_chosen: Vec<&'d Word> = Vec::with_capacity(templates.len());
		let mut forms = Vec::with_capacity(templates.len());
		for template in templates {
			let (word, form) = template.choose_word(self.dictionary, &mut self.random, &already_chosen)?;
			trace!(slot = ?template, word = word.dictionary_entry(), "resolved slot");
			if template.tracks_repetition() {
				already_chosen.push(word);
			}
			forms.push(form);
		}

		let mut words = vec![String::new(); forms.len()];
		for i in (0..forms.len()).rev() {
			let rendered = forms[i].render(words.get(i + 1).map(String::as_str));
			words[i] = rendered;
		}
		words.retain(|w| !w.is_empty());
		Ok(words)
	}

	/// Generates one passphrase: resolved words joined by single spaces,
	/// then every mutator applied in order.
	///
	/// # Errors
	/// `InvalidArgument` if the input fails validation, `SelectionExhausted`
	/// if a slot cannot be filled.
	pub fn generate(&mut self, input: &PhraseInput) -> Result<String> {
		input.validate()?;
		let mut phrase = self.generate_words(&input.templates)?.join(" ");
		for mutator in &input.mutators {
			mutator.mutate(&mut phrase, &mut self.random)?;
		}
		debug!(templates = input.templates.len(), mutators = input.mutators.len(), "generated phrase");
		Ok(phrase)
	}

	/// Estimates how many phrases `input` can produce.
	///
	/// Slot counts ignore the no-repeat exclusion, so the estimate is an upper bound.
	pub fn strength(&self, input: &PhraseInput) -> PhraseStrength {
		let words: f64 = input.templates.iter().map(|t| t.combinations(self.dictionary)).product();
		let combinations = input.mutators.iter().fold(words, |acc, m| acc * m.extra_combinations());
		PhraseStrength { combinations, entropy_bits: combinations.log2() }
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::dictionary::tests::{noun, verb};
	use crate::model::word::{Adjective, Article, Plurality, Tense, WordKind};
	use crate::mutator::{ConstantMutator, ConstantStyle, NumericMutator, NumericStyle};

	fn dictionary() -> WordDictionary {
		WordDictionary::new(
			"en",
			"generator",
			1,
			vec![
				Word::Article(Article {
					definite: "the".into(),
					indefinite: "a".into(),
					indefinite_before_vowel: "an".into(),
				}),
				Word::Adjective(Adjective { value: "old".into() }),
				Word::Adjective(Adjective { value: "red".into() }),
				noun("owl", Some("owls")),
				noun("dog", Some("dogs")),
				verb("sees", "see", true),
				verb("naps", "nap", false),
			],
		)
	}

	#[test]
	fn test_generate_words_never_repeats_content_words() {
		let dictionary = dictionary();
		let mut generator = PhraseGenerator::with_random(&dictionary, RandomSource::seeded(1));
		let templates = [
			Template::Noun { plurality: Plurality::Singular },
			Template::Noun { plurality: Plurality::Singular },
		];
		for _ in 0..30 {
			let words = generator.generate_words(&templates).unwrap();
			assert_ne!(words[0], words[1]);
		}
		let three = [
			Template::Noun { plurality: Plurality::Singular },
			Template::Noun { plurality: Plurality::Singular },
			Template::Noun { plurality: Plurality::Singular },
		];
		assert!(matches!(
			generator.generate_words(&three),
			Err(Error::SelectionExhausted { kind: WordKind::Noun })
		));
	}

	#[test]
	fn test_articles_may_repeat() {
		let dictionary = dictionary();
		let mut generator = PhraseGenerator::with_random(&dictionary, RandomSource::seeded(2));
		let templates = [
			Template::Article { definite: true },
			Template::Noun { plurality: Plurality::Singular },
			Template::Article { definite: true },
			Template::Noun { plurality: Plurality::Singular },
		];
		let words = generator.generate_words(&templates).unwrap();
		assert_eq!(words[0], "the");
		assert_eq!(words[2], "the");
	}

	#[test]
	fn test_indefinite_article_agrees_with_next_word() {
		let dictionary = dictionary();
		let mut generator = PhraseGenerator::with_random(&dictionary, RandomSource::seeded(3));
		let templates =
			[Template::Article { definite: false }, Template::Noun { plurality: Plurality::Singular }];
		for _ in 0..30 {
			let words = generator.generate_words(&templates).unwrap();
			match words[1].as_str() {
				"owl" => assert_eq!(words[0], "an"),
				"dog" => assert_eq!(words[0], "a"),
				other => panic!("unexpected noun {}", other),
			}
		}
	}

	#[test]
	fn test_generate_applies_mutators() {
		let dictionary = dictionary();
		let mut generator = PhraseGenerator::with_random(&dictionary, RandomSource::seeded(4));
		let input = PhraseInput::new(vec![
			Template::Article { definite: true },
			Template::Noun { plurality: Plurality::Plural },
			Template::Verb { tense: Tense::Present, plurality: Plurality::Plural, transitive: Some(false) },
		])
		.with_mutator(NumericMutator::new(NumericStyle::EndOfPhrase, 1))
		.with_mutator(ConstantMutator::new(ConstantStyle::EndOfPhrase, "."));

		let phrase = generator.generate(&input).unwrap();
		assert!(phrase.starts_with("the "), "'{}'", phrase);
		assert!(phrase.ends_with('.'), "'{}'", phrase);
		let digit = phrase.chars().rev().nth(1).unwrap();
		assert!(digit.is_ascii_digit(), "'{}'", phrase);
		assert!(phrase.contains(" nap"), "'{}'", phrase);
	}

	#[test]
	fn test_generate_rejects_empty_input() {
		let dictionary = dictionary();
		let mut generator = PhraseGenerator::new(&dictionary);
		assert!(matches!(generator.generate(&PhraseInput::default()), Err(Error::InvalidArgument(_))));
	}

	#[test]
	fn test_strength() {
		let dictionary = dictionary();
		let generator = PhraseGenerator::new(&dictionary);
		let input = PhraseInput::new(vec![
			Template::Adjective,
			Template::Noun { plurality: Plurality::Singular },
			Template::Verb { tense: Tense::Present, plurality: Plurality::Singular, transitive: None },
		]);
		let strength = generator.strength(&input);
		assert_eq!(strength.combinations, 8.0);
		assert_eq!(strength.entropy_bits, 3.0);

		let strength = generator.strength(&input.with_mutator(NumericMutator::basic()));
		assert!(strength.combinations.is_nan());
	}
}

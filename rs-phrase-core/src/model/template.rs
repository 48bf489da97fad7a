use serde::{Deserialize, Serialize};

use super::dictionary::WordDictionary;
use super::word::{
	Adjective, Adverb, Article, Conjunction, Demonstrative, Interrogative, Noun, Number, Plurality,
	Preposition, Pronoun, ProperNoun, Tense, Verb, Word, WordKind,
};
use crate::error::Result;
use crate::random::{ByteSource, RandomSource};

/// What a conjunction joins.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ConjunctionRole {
	Nouns,
	Phrases,
}

/// A grammatical slot of a phrase, resolved to one concrete word form.
///
/// Templates are stateless descriptors: they request words from a dictionary
/// but never own them. The sequence of templates forming a sentence is decided
/// by the caller.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "slot", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Template {
	Article {
		definite: bool,
	},
	Demonstrative {
		#[serde(default)]
		plurality: Plurality,
	},
	/// A personal pronoun.
	Pronoun {
		#[serde(default)]
		plurality: Plurality,
	},
	Interrogative {
		#[serde(default)]
		plurality: Plurality,
	},
	Noun {
		#[serde(default)]
		plurality: Plurality,
	},
	ProperNoun,
	Adjective,
	Adverb,
	Preposition,
	Verb {
		#[serde(default)]
		tense: Tense,
		#[serde(default)]
		plurality: Plurality,
		/// `None` accepts transitive and intransitive verbs alike.
		#[serde(default)]
		transitive: Option<bool>,
	},
	Conjunction {
		joins: ConjunctionRole,
	},
	Number {
		/// Whether the number is followed by a singular noun ("one").
		#[serde(default)]
		singular_noun: bool,
	},
}

/// Surface form selected for a slot.
#[derive(Clone, Copy, Debug)]
pub enum SurfaceForm<'d> {
	/// Final text of the slot.
	Fixed(&'d str),
	/// Indefinite article whose form depends on the word that follows it.
	IndefiniteArticle(&'d Article),
}

impl SurfaceForm<'_> {
	/// Renders the form given the text of the following slot, if any.
	pub fn render(&self, next: Option<&str>) -> String {
		match self {
			SurfaceForm::Fixed(text) => (*text).to_owned(),
			SurfaceForm::IndefiniteArticle(article) => {
				if next.is_some_and(starts_with_vowel) {
					article.indefinite_before_vowel.clone()
				} else {
					article.indefinite.clone()
				}
			}
		}
	}
}

fn starts_with_vowel(text: &str) -> bool {
	text.chars()
		.next()
		.is_some_and(|c| matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u'))
}

fn singular_or_plural<'d>(singular: &'d str, plural: &'d str, plurality: Plurality) -> &'d str {
	if plurality.is_plural() { plural } else { singular }
}

impl Template {
	/// Whether the chosen word joins the already-chosen set.
	///
	/// Function words (articles, demonstratives, personal pronouns,
	/// interrogatives) repeat naturally and are never excluded.
	pub fn tracks_repetition(&self) -> bool {
		!matches!(
			self,
			Template::Article { .. }
				| Template::Demonstrative { .. }
				| Template::Pronoun { .. }
				| Template::Interrogative { .. }
		)
	}

	/// Resolves the slot to a dictionary word and the surface form it demands.
	///
	/// `already_chosen` is only consulted for slots tracking repetition.
	///
	/// # Errors
	/// `SelectionExhausted` if no word fits the slot.
	pub fn choose_word<'d, S: ByteSource>(
		&self,
		dictionary: &'d WordDictionary,
		random: &mut RandomSource<S>,
		already_chosen: &[&Word],
	) -> Result<(&'d Word, SurfaceForm<'d>)> {
		let excluded: &[&Word] = if self.tracks_repetition() { already_chosen } else { &[] };

		let choice = match *self {
			Template::Article { definite } => {
				let (word, article) =
					dictionary.choose_word::<Article, _, _>(random, excluded, |_| true)?;
				if definite {
					(word, SurfaceForm::Fixed(article.definite.as_str()))
				} else {
					(word, SurfaceForm::IndefiniteArticle(article))
				}
			}
			Template::Demonstrative { plurality } => {
				let (word, d) =
					dictionary.choose_word::<Demonstrative, _, _>(random, excluded, |_| true)?;
				(word, SurfaceForm::Fixed(singular_or_plural(&d.singular, &d.plural, plurality)))
			}
			Template::Pronoun { plurality } => {
				let (word, p) =
					dictionary.choose_word::<Pronoun, _, _>(random, excluded, personal(plurality))?;
				(word, SurfaceForm::Fixed(p.value.as_str()))
			}
			Template::Interrogative { plurality } => {
				let (word, i) =
					dictionary.choose_word::<Interrogative, _, _>(random, excluded, |_| true)?;
				(word, SurfaceForm::Fixed(singular_or_plural(&i.singular, &i.plural, plurality)))
			}
			Template::Noun { plurality } => {
				let (word, noun) =
					dictionary.choose_word::<Noun, _, _>(random, excluded, countable(plurality))?;
				let form = match (plurality, &noun.plural) {
					(Plurality::Plural, Some(plural)) => plural.as_str(),
					_ => noun.singular.as_str(),
				};
				(word, SurfaceForm::Fixed(form))
			}
			Template::ProperNoun => {
				let (word, p) =
					dictionary.choose_word::<ProperNoun, _, _>(random, excluded, |_| true)?;
				(word, SurfaceForm::Fixed(p.value.as_str()))
			}
			Template::Adjective => {
				let (word, a) =
					dictionary.choose_word::<Adjective, _, _>(random, excluded, |_| true)?;
				(word, SurfaceForm::Fixed(a.value.as_str()))
			}
			Template::Adverb => {
				let (word, a) = dictionary.choose_word::<Adverb, _, _>(random, excluded, |_| true)?;
				(word, SurfaceForm::Fixed(a.value.as_str()))
			}
			Template::Preposition => {
				let (word, p) =
					dictionary.choose_word::<Preposition, _, _>(random, excluded, |_| true)?;
				(word, SurfaceForm::Fixed(p.value.as_str()))
			}
			Template::Verb { tense, plurality, transitive } => {
				let fits = verb_fits(tense, plurality, transitive);
				let (word, verb) = dictionary.choose_word::<Verb, _, _>(random, excluded, fits)?;
				(word, SurfaceForm::Fixed(verb.form(tense, plurality).unwrap_or_default()))
			}
			Template::Conjunction { joins } => {
				let (word, c) =
					dictionary.choose_word::<Conjunction, _, _>(random, excluded, joining(joins))?;
				(word, SurfaceForm::Fixed(c.value.as_str()))
			}
			Template::Number { singular_noun: true } => {
				let (word, n) = dictionary.find_word::<Number, _>(|n| n.requires_singular_noun)?;
				(word, SurfaceForm::Fixed(n.value.as_str()))
			}
			Template::Number { singular_noun: false } => {
				let (word, n) = dictionary.choose_word::<Number, _, _>(random, excluded, |n| {
					!n.requires_singular_noun
				})?;
				(word, SurfaceForm::Fixed(n.value.as_str()))
			}
		};
		Ok(choice)
	}

	/// Number of distinct words the slot can resolve to in `dictionary`.
	///
	/// Ignores the already-chosen exclusion, so products over a phrase are an upper bound.
	pub fn combinations(&self, dictionary: &WordDictionary) -> f64 {
		let count = match *self {
			Template::Article { .. } => dictionary.count_of(WordKind::Article),
			Template::Demonstrative { .. } => dictionary.count_of(WordKind::Demonstrative),
			Template::Pronoun { plurality } => {
				dictionary.count_matching::<Pronoun, _>(personal(plurality))
			}
			Template::Interrogative { .. } => dictionary.count_of(WordKind::Interrogative),
			Template::Noun { plurality } => {
				dictionary.count_matching::<Noun, _>(countable(plurality))
			}
			Template::ProperNoun => dictionary.count_of(WordKind::ProperNoun),
			Template::Adjective => dictionary.count_of(WordKind::Adjective),
			Template::Adverb => dictionary.count_of(WordKind::Adverb),
			Template::Preposition => dictionary.count_of(WordKind::Preposition),
			Template::Verb { tense, plurality, transitive } => {
				dictionary.count_matching::<Verb, _>(verb_fits(tense, plurality, transitive))
			}
			Template::Conjunction { joins } => {
				dictionary.count_matching::<Conjunction, _>(joining(joins))
			}
			Template::Number { singular_noun: true } => {
				dictionary.count_matching::<Number, _>(|n| n.requires_singular_noun).min(1)
			}
			Template::Number { singular_noun: false } => {
				dictionary.count_matching::<Number, _>(|n| !n.requires_singular_noun)
			}
		};
		count as f64
	}
}

fn personal(plurality: Plurality) -> impl Fn(&Pronoun) -> bool {
	move |p| p.is_personal && p.is_plural == plurality.is_plural()
}

/// Plural slots only accept nouns with a plural form.
fn countable(plurality: Plurality) -> impl Fn(&Noun) -> bool {
	move |n| !plurality.is_plural() || n.plural.is_some()
}

fn verb_fits(
	tense: Tense,
	plurality: Plurality,
	transitive: Option<bool>,
) -> impl Fn(&Verb) -> bool {
	move |v| v.has_form(tense, plurality) && v.matches_transitivity(transitive)
}

fn joining(joins: ConjunctionRole) -> impl Fn(&Conjunction) -> bool {
	move |c| match joins {
		ConjunctionRole::Nouns => c.separates_nouns,
		ConjunctionRole::Phrases => c.separates_phrases,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::Error;
	use crate::model::dictionary::tests::{noun, verb};
	use std::collections::BTreeMap;

	fn dictionary() -> WordDictionary {
		let mut words = vec![
			Word::Article(Article {
				definite: "the".into(),
				indefinite: "a".into(),
				indefinite_before_vowel: "an".into(),
			}),
			Word::Demonstrative(Demonstrative { singular: "this".into(), plural: "these".into() }),
			Word::Pronoun(Pronoun { value: "he".into(), is_plural: false, is_personal: true }),
			Word::Pronoun(Pronoun { value: "they".into(), is_plural: true, is_personal: true }),
			Word::Pronoun(Pronoun {
				value: "someone".into(),
				is_plural: false,
				is_personal: false,
			}),
			Word::Number(Number { value: "one".into(), requires_singular_noun: true }),
			Word::Number(Number { value: "two".into(), requires_singular_noun: false }),
			Word::Number(Number { value: "seven".into(), requires_singular_noun: false }),
			Word::Conjunction(Conjunction {
				value: "and".into(),
				separates_nouns: true,
				separates_phrases: true,
			}),
			Word::Conjunction(Conjunction {
				value: "but".into(),
				separates_nouns: false,
				separates_phrases: true,
			}),
			noun("owl", Some("owls")),
			noun("rice", None),
			verb("eats", "eat", true),
			verb("sleeps", "sleep", false),
		];
		words.push(Word::Verb(
			Verb::new(
				BTreeMap::from([
					((Tense::Present, Plurality::Singular), "runs".to_owned()),
					((Tense::Past, Plurality::Plural), "ran".to_owned()),
				]),
				false,
			)
			.unwrap(),
		));
		WordDictionary::new("en", "templates", 1, words)
	}

	fn resolve(template: Template, seed: u64) -> Result<String> {
		let dictionary = dictionary();
		let mut random = RandomSource::seeded(seed);
		let (_, form) = template.choose_word(&dictionary, &mut random, &[])?;
		Ok(form.render(None))
	}

	#[test]
	fn test_plural_noun_skips_uncountable() {
		for seed in 0..30 {
			let plural = Template::Noun { plurality: Plurality::Plural };
			assert_eq!(resolve(plural, seed).unwrap(), "owls");
		}
	}

	#[test]
	fn test_verb_slot_uses_requested_form() {
		for seed in 0..30 {
			let template =
				Template::Verb { tense: Tense::Past, plurality: Plurality::Plural, transitive: None };
			assert_eq!(resolve(template, seed).unwrap(), "ran");
			let template = Template::Verb {
				tense: Tense::Present,
				plurality: Plurality::Plural,
				transitive: Some(true),
			};
			assert_eq!(resolve(template, seed).unwrap(), "eat");
		}
		let template =
			Template::Verb { tense: Tense::Future, plurality: Plurality::Singular, transitive: None };
		assert!(matches!(
			resolve(template, 1),
			Err(Error::SelectionExhausted { kind: WordKind::Verb })
		));
	}

	#[test]
	fn test_number_slots() {
		for seed in 0..30 {
			assert_eq!(resolve(Template::Number { singular_noun: true }, seed).unwrap(), "one");
			assert_ne!(resolve(Template::Number { singular_noun: false }, seed).unwrap(), "one");
		}
	}

	#[test]
	fn test_personal_pronoun_matches_plurality() {
		for seed in 0..30 {
			let plural = Template::Pronoun { plurality: Plurality::Plural };
			let singular = Template::Pronoun { plurality: Plurality::Singular };
			assert_eq!(resolve(plural, seed).unwrap(), "they");
			assert_eq!(resolve(singular, seed).unwrap(), "he");
		}
	}

	#[test]
	fn test_conjunction_role() {
		for seed in 0..30 {
			let template = Template::Conjunction { joins: ConjunctionRole::Nouns };
			assert_eq!(resolve(template, seed).unwrap(), "and");
		}
	}

	#[test]
	fn test_function_words_ignore_already_chosen() {
		let dictionary = dictionary();
		let mut random = RandomSource::seeded(3);
		let article = Template::Article { definite: true };
		let (the, _) = article.choose_word(&dictionary, &mut random, &[]).unwrap();
		let (again, form) = article.choose_word(&dictionary, &mut random, &[the]).unwrap();
		assert_eq!(again, the);
		assert!(matches!(form, SurfaceForm::Fixed("the")));

		let owl = noun("OWL", Some("owls"));
		let plural = Template::Noun { plurality: Plurality::Plural };
		let result = plural.choose_word(&dictionary, &mut random, &[&owl]);
		assert!(matches!(result, Err(Error::SelectionExhausted { kind: WordKind::Noun })));
	}

	#[test]
	fn test_indefinite_article_renders_against_next_word() {
		let dictionary = dictionary();
		let mut random = RandomSource::seeded(4);
		let article = Template::Article { definite: false };
		let (_, form) = article.choose_word(&dictionary, &mut random, &[]).unwrap();
		assert_eq!(form.render(Some("owl")), "an");
		assert_eq!(form.render(Some("Eagle")), "an");
		assert_eq!(form.render(Some("rice")), "a");
		assert_eq!(form.render(None), "a");
	}

	#[test]
	fn test_combinations() {
		let dictionary = dictionary();
		let singular = Template::Noun { plurality: Plurality::Singular };
		assert_eq!(singular.combinations(&dictionary), 2.0);
		assert_eq!(Template::Noun { plurality: Plurality::Plural }.combinations(&dictionary), 1.0);
		assert_eq!(Template::Number { singular_noun: true }.combinations(&dictionary), 1.0);
		assert_eq!(Template::Number { singular_noun: false }.combinations(&dictionary), 2.0);
		assert_eq!(Template::Adverb.combinations(&dictionary), 0.0);
	}

	#[test]
	fn test_deserialize_templates() {
		let json = r#"[
			{ "slot": "article", "definite": false },
			{ "slot": "noun", "plurality": "plural" },
			{ "slot": "verb", "tense": "past", "transitive": true },
			{ "slot": "number", "singularNoun": true },
			{ "slot": "properNoun" }
		]"#;
		let templates: Vec<Template> = serde_json::from_str(json).unwrap();
		assert_eq!(templates[0], Template::Article { definite: false });
		assert_eq!(templates[1], Template::Noun { plurality: Plurality::Plural });
		assert_eq!(
			templates[2],
			Template::Verb {
				tense: Tense::Past,
				plurality: Plurality::Singular,
				transitive: Some(true),
			}
		);
		assert_eq!(templates[3], Template::Number { singular_noun: true });
		assert_eq!(templates[4], Template::ProperNoun);
	}
}

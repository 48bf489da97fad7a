use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Part-of-speech discriminant of a [`Word`].
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub enum WordKind {
	Article,
	Adjective,
	Adverb,
	Conjunction,
	Demonstrative,
	Interrogative,
	Noun,
	Number,
	Preposition,
	Pronoun,
	ProperNoun,
	Verb,
}

impl WordKind {
	/// Every recognized part of speech.
	pub const ALL: [WordKind; 12] = [
		WordKind::Article,
		WordKind::Adjective,
		WordKind::Adverb,
		WordKind::Conjunction,
		WordKind::Demonstrative,
		WordKind::Interrogative,
		WordKind::Noun,
		WordKind::Number,
		WordKind::Preposition,
		WordKind::Pronoun,
		WordKind::ProperNoun,
		WordKind::Verb,
	];

	/// Tag naming this part of speech in dictionary documents.
	pub fn tag(self) -> &'static str {
		match self {
			WordKind::Article => "article",
			WordKind::Adjective => "adjective",
			WordKind::Adverb => "adverb",
			WordKind::Conjunction => "conjunction",
			WordKind::Demonstrative => "demonstrative",
			WordKind::Interrogative => "interrogative",
			WordKind::Noun => "noun",
			WordKind::Number => "number",
			WordKind::Preposition => "preposition",
			WordKind::Pronoun => "pronoun",
			WordKind::ProperNoun => "propernoun",
			WordKind::Verb => "verb",
		}
	}

	pub fn from_tag(tag: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|kind| kind.tag().eq_ignore_ascii_case(tag))
	}
}

impl fmt::Display for WordKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.tag())
	}
}

/// Grammatical number of a slot or form.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub enum Plurality {
	#[default]
	Singular,
	Plural,
}

impl Plurality {
	pub fn is_plural(self) -> bool {
		self == Plurality::Plural
	}
}

/// Verb tenses carried by the dictionary.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub enum Tense {
	#[default]
	Present,
	Past,
	Future,
	Continuous,
	Perfect,
	Subjunctive,
}

impl Tense {
	pub const ALL: [Tense; 6] = [
		Tense::Present,
		Tense::Past,
		Tense::Future,
		Tense::Continuous,
		Tense::Perfect,
		Tense::Subjunctive,
	];

	/// Dictionary attribute holding this tense in the given number,
	/// e.g. `presentSingular`.
	pub fn attribute(self, plurality: Plurality) -> &'static str {
		match (self, plurality) {
			(Tense::Present, Plurality::Singular) => "presentSingular",
			(Tense::Present, Plurality::Plural) => "presentPlural",
			(Tense::Past, Plurality::Singular) => "pastSingular",
			(Tense::Past, Plurality::Plural) => "pastPlural",
			(Tense::Future, Plurality::Singular) => "futureSingular",
			(Tense::Future, Plurality::Plural) => "futurePlural",
			(Tense::Continuous, Plurality::Singular) => "continuousSingular",
			(Tense::Continuous, Plurality::Plural) => "continuousPlural",
			(Tense::Perfect, Plurality::Singular) => "perfectSingular",
			(Tense::Perfect, Plurality::Plural) => "perfectPlural",
			(Tense::Subjunctive, Plurality::Singular) => "subjunctiveSingular",
			(Tense::Subjunctive, Plurality::Plural) => "subjunctivePlural",
		}
	}
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Article {
	pub definite: String,
	pub indefinite: String,
	pub indefinite_before_vowel: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Adjective {
	pub value: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Adverb {
	pub value: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Conjunction {
	pub value: String,
	pub separates_nouns: bool,
	pub separates_phrases: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Demonstrative {
	pub singular: String,
	pub plural: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Interrogative {
	pub singular: String,
	pub plural: String,
}

/// A common noun. Uncountable nouns carry no plural form.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Noun {
	pub singular: String,
	pub plural: Option<String>,
}

/// A number word. By convention exactly one number ("one") requires a singular noun.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Number {
	pub value: String,
	pub requires_singular_noun: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Preposition {
	pub value: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Pronoun {
	pub value: String,
	pub is_plural: bool,
	pub is_personal: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ProperNoun {
	pub value: String,
}

/// A verb and its inflection table.
///
/// The present singular form is mandatory and doubles as the dictionary entry;
/// every other form may be absent.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Verb {
	forms: BTreeMap<(Tense, Plurality), String>,
	pub is_transitive: bool,
}

impl Verb {
	/// Builds a verb from its forms.
	///
	/// # Errors
	/// `DictionaryParse` if the present singular form is missing.
	pub fn new(forms: BTreeMap<(Tense, Plurality), String>, is_transitive: bool) -> Result<Self> {
		if !forms.contains_key(&(Tense::Present, Plurality::Singular)) {
			return Err(Error::parse("verb is missing its presentSingular form"));
		}
		Ok(Self { forms, is_transitive })
	}

	pub fn form(&self, tense: Tense, plurality: Plurality) -> Option<&str> {
		self.forms.get(&(tense, plurality)).map(String::as_str)
	}

	pub fn has_form(&self, tense: Tense, plurality: Plurality) -> bool {
		self.forms.contains_key(&(tense, plurality))
	}

	/// Whether the verb fits the requested transitivity (`None` accepts any).
	pub fn matches_transitivity(&self, transitive: Option<bool>) -> bool {
		transitive.is_none_or(|t| t == self.is_transitive)
	}

	fn present_singular(&self) -> &str {
		self.form(Tense::Present, Plurality::Singular).unwrap_or_default()
	}
}

/// A dictionary word: part-of-speech discriminant plus its surface forms.
///
/// Equality, hashing and ordering only consider the dictionary entry,
/// compared case-insensitively.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub enum Word {
	Article(Article),
	Adjective(Adjective),
	Adverb(Adverb),
	Conjunction(Conjunction),
	Demonstrative(Demonstrative),
	Interrogative(Interrogative),
	Noun(Noun),
	Number(Number),
	Preposition(Preposition),
	Pronoun(Pronoun),
	ProperNoun(ProperNoun),
	Verb(Verb),
}

impl Word {
	pub fn kind(&self) -> WordKind {
		match self {
			Word::Article(_) => WordKind::Article,
			Word::Adjective(_) => WordKind::Adjective,
			Word::Adverb(_) => WordKind::Adverb,
			Word::Conjunction(_) => WordKind::Conjunction,
			Word::Demonstrative(_) => WordKind::Demonstrative,
			Word::Interrogative(_) => WordKind::Interrogative,
			Word::Noun(_) => WordKind::Noun,
			Word::Number(_) => WordKind::Number,
			Word::Preposition(_) => WordKind::Preposition,
			Word::Pronoun(_) => WordKind::Pronoun,
			Word::ProperNoun(_) => WordKind::ProperNoun,
			Word::Verb(_) => WordKind::Verb,
		}
	}

	/// Canonical form identifying the word in its dictionary.
	pub fn dictionary_entry(&self) -> &str {
		match self {
			Word::Article(w) => &w.definite,
			Word::Adjective(w) => &w.value,
			Word::Adverb(w) => &w.value,
			Word::Conjunction(w) => &w.value,
			Word::Demonstrative(w) => &w.singular,
			Word::Interrogative(w) => &w.singular,
			Word::Noun(w) => &w.singular,
			Word::Number(w) => &w.value,
			Word::Preposition(w) => &w.value,
			Word::Pronoun(w) => &w.value,
			Word::ProperNoun(w) => &w.value,
			Word::Verb(w) => w.present_singular(),
		}
	}

	/// Case-insensitive comparison of dictionary entries.
	pub fn same_entry(&self, other: &Word) -> bool {
		self.dictionary_entry().to_lowercase() == other.dictionary_entry().to_lowercase()
	}

	/// Materializes a word from a dictionary element: its part-of-speech tag
	/// and its attribute set.
	///
	/// # Errors
	/// `DictionaryParse` on an unknown tag, a missing mandatory attribute
	/// or a malformed boolean.
	pub fn from_attributes(tag: &str, attributes: &HashMap<String, String>) -> Result<Self> {
		let kind = WordKind::from_tag(tag)
			.ok_or_else(|| Error::parse(format!("unknown word tag '{}'", tag)))?;
		let attrs = Attributes { kind, attributes };

		let word = match kind {
			WordKind::Article => Word::Article(Article {
				definite: attrs.required("definite")?,
				indefinite: attrs.required("indefinite")?,
				indefinite_before_vowel: attrs.required("indefiniteBeforeVowel")?,
			}),
			WordKind::Adjective => Word::Adjective(Adjective { value: attrs.required("value")? }),
			WordKind::Adverb => Word::Adverb(Adverb { value: attrs.required("value")? }),
			WordKind::Conjunction => Word::Conjunction(Conjunction {
				value: attrs.required("value")?,
				separates_nouns: attrs.flag("separatesNouns")?,
				separates_phrases: attrs.flag("separatesPhrases")?,
			}),
			WordKind::Demonstrative => Word::Demonstrative(Demonstrative {
				singular: attrs.required("singular")?,
				plural: attrs.required("plural")?,
			}),
			WordKind::Interrogative => Word::Interrogative(Interrogative {
				singular: attrs.required("singular")?,
				plural: attrs.required("plural")?,
			}),
			WordKind::Noun => Word::Noun(Noun {
				singular: attrs.required("singular")?,
				plural: attrs.optional("plural"),
			}),
			WordKind::Number => Word::Number(Number {
				value: attrs.required("value")?,
				requires_singular_noun: attrs.flag("requiresSingularNoun")?,
			}),
			WordKind::Preposition => Word::Preposition(Preposition { value: attrs.required("value")? }),
			WordKind::Pronoun => Word::Pronoun(Pronoun {
				value: attrs.required("value")?,
				is_plural: attrs.flag("plural")?,
				is_personal: attrs.flag("personal")?,
			}),
			WordKind::ProperNoun => Word::ProperNoun(ProperNoun { value: attrs.required("value")? }),
			WordKind::Verb => {
				let mut forms = BTreeMap::new();
				for tense in Tense::ALL {
					for plurality in [Plurality::Singular, Plurality::Plural] {
						if let Some(form) = attrs.optional(tense.attribute(plurality)) {
							forms.insert((tense, plurality), form);
						}
					}
				}
				Word::Verb(Verb::new(forms, attrs.flag("transitive")?)?)
			}
		};
		Ok(word)
	}
}

impl PartialEq for Word {
	fn eq(&self, other: &Self) -> bool {
		self.same_entry(other)
	}
}

impl Eq for Word {}

impl Hash for Word {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.dictionary_entry().to_lowercase().hash(state);
	}
}

impl PartialOrd for Word {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for Word {
	fn cmp(&self, other: &Self) -> Ordering {
		self.dictionary_entry().to_lowercase().cmp(&other.dictionary_entry().to_lowercase())
	}
}

impl fmt::Display for Word {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} ({})", self.dictionary_entry(), self.kind())
	}
}

/// Attribute lookups with errors naming the offending word kind.
struct Attributes<'a> {
	kind: WordKind,
	attributes: &'a HashMap<String, String>,
}

impl Attributes<'_> {
	fn optional(&self, name: &str) -> Option<String> {
		self.attributes
			.get(name)
			.map(|v| v.trim())
			.filter(|v| !v.is_empty())
			.map(str::to_owned)
	}

	fn required(&self, name: &str) -> Result<String> {
		self.optional(name)
			.ok_or_else(|| Error::parse(format!("{} is missing attribute '{}'", self.kind, name)))
	}

	/// Absent flags read as `false`.
	fn flag(&self, name: &str) -> Result<bool> {
		match self.attributes.get(name).map(|v| v.trim().to_ascii_lowercase()) {
			None => Ok(false),
			Some(v) if v == "true" => Ok(true),
			Some(v) if v == "false" || v.is_empty() => Ok(false),
			Some(v) => Err(Error::parse(format!(
				"{} attribute '{}' is not a boolean: '{}'",
				self.kind, name, v
			))),
		}
	}
}

/// Typed access to one [`Word`] variant.
pub trait PartOfSpeech: Sized + 'static {
	const KIND: WordKind;

	fn cast(word: &Word) -> Option<&Self>;
}

macro_rules! part_of_speech {
	($($variant:ident),* $(,)?) => {
		$(
			impl PartOfSpeech for $variant {
				const KIND: WordKind = WordKind::$variant;

				fn cast(word: &Word) -> Option<&Self> {
					match word {
						Word::$variant(w) => Some(w),
						_ => None,
					}
				}
			}
		)*
	};
}

part_of_speech!(
	Article,
	Adjective,
	Adverb,
	Conjunction,
	Demonstrative,
	Interrogative,
	Noun,
	Number,
	Preposition,
	Pronoun,
	ProperNoun,
	Verb,
);

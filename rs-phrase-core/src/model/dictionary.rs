use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::word::{PartOfSpeech, Word, WordKind};
use crate::error::{Error, Result};
use crate::random::{ByteSource, RandomSource};

/// Number of random-index draws tried before falling back to exact enumeration.
pub const MAX_FAST_ATTEMPTS: usize = 10;

/// Indexed collection of words grouped by part of speech.
///
/// # Responsibilities
/// - Own every loaded `Word`
/// - Provide O(1) per-kind lookups and counts through a derived index
/// - Select random words under grammatical constraints (`choose_word`)
///
/// # Invariants
/// - The index holds an entry (possibly empty) for every `WordKind`
/// - The index and cached verb counts always reflect `words`: every mutation
///   rebuilds them before returning
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(from = "StoredDictionary")]
pub struct WordDictionary {
	language: String,
	name: String,
	version: u32,
	words: Vec<Word>,
	#[serde(skip)]
	index: HashMap<WordKind, Vec<usize>>,
	#[serde(skip)]
	verb_counts: VerbCounts,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct VerbCounts {
	transitive: usize,
	intransitive: usize,
}

/// Serialized shape of a dictionary; the index is rebuilt on load.
#[derive(Deserialize)]
struct StoredDictionary {
	language: String,
	name: String,
	version: u32,
	words: Vec<Word>,
}

impl From<StoredDictionary> for WordDictionary {
	fn from(stored: StoredDictionary) -> Self {
		let mut dictionary = Self {
			language: stored.language,
			name: stored.name,
			version: stored.version,
			words: stored.words,
			index: HashMap::new(),
			verb_counts: VerbCounts::default(),
		};
		dictionary.rebuild_index();
		dictionary
	}
}

impl WordDictionary {
	/// Builds a dictionary and its index.
	pub fn new(language: &str, name: &str, version: u32, words: Vec<Word>) -> Self {
		StoredDictionary {
			language: language.to_owned(),
			name: name.to_owned(),
			version,
			words,
		}
		.into()
	}

	pub fn language(&self) -> &str {
		&self.language
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn version(&self) -> u32 {
		self.version
	}

	pub fn len(&self) -> usize {
		self.words.len()
	}

	pub fn is_empty(&self) -> bool {
		self.words.is_empty()
	}

	pub fn words(&self) -> &[Word] {
		&self.words
	}

	/// Adds a word and rebuilds the index.
	pub fn push(&mut self, word: Word) {
		self.words.push(word);
		self.rebuild_index();
	}

	/// Adds many words and rebuilds the index once.
	pub fn extend<I: IntoIterator<Item = Word>>(&mut self, words: I) {
		self.words.extend(words);
		self.rebuild_index();
	}

	/// Recomputes the per-kind index and cached verb counts from the word list.
	pub fn rebuild_index(&mut self) {
		let mut index: HashMap<WordKind, Vec<usize>> =
			WordKind::ALL.into_iter().map(|kind| (kind, Vec::new())).collect();
		let mut verb_counts = VerbCounts::default();

		for (position, word) in self.words.iter().enumerate() {
			index.entry(word.kind()).or_default().push(position);
			if let Word::Verb(verb) = word {
				if verb.is_transitive {
					verb_counts.transitive += 1;
				} else {
					verb_counts.intransitive += 1;
				}
			}
		}

		self.index = index;
		self.verb_counts = verb_counts;
	}

	fn positions(&self, kind: WordKind) -> &[usize] {
		self.index.get(&kind).map(Vec::as_slice).unwrap_or_default()
	}

	/// Number of words of the given part of speech.
	pub fn count_of(&self, kind: WordKind) -> usize {
		self.positions(kind).len()
	}

	pub fn transitive_verb_count(&self) -> usize {
		self.verb_counts.transitive
	}

	pub fn intransitive_verb_count(&self) -> usize {
		self.verb_counts.intransitive
	}

	/// Iterates words of part of speech `T`, in dictionary order.
	pub fn words_of<T: PartOfSpeech>(&self) -> impl Iterator<Item = (&Word, &T)> {
		self.positions(T::KIND).iter().filter_map(|&position| {
			let word = &self.words[position];
			T::cast(word).map(|part| (word, part))
		})
	}

	/// Word at `index` within the list of part of speech `T`.
	pub fn word_at<T: PartOfSpeech>(&self, index: usize) -> Option<(&Word, &T)> {
		let word = &self.words[*self.positions(T::KIND).get(index)?];
		T::cast(word).map(|part| (word, part))
	}

	/// First word of part of speech `T` satisfying `predicate`.
	pub fn find_word<T, P>(&self, predicate: P) -> Result<(&Word, &T)>
	where
		T: PartOfSpeech,
		P: Fn(&T) -> bool,
	{
		self.words_of::<T>()
			.find(|&(_, part)| predicate(part))
			.ok_or(Error::SelectionExhausted { kind: T::KIND })
	}

	/// Number of words of part of speech `T` satisfying `predicate`.
	pub fn count_matching<T, P>(&self, predicate: P) -> usize
	where
		T: PartOfSpeech,
		P: Fn(&T) -> bool,
	{
		self.words_of::<T>().filter(|&(_, part)| predicate(part)).count()
	}

	/// Selects a random word of part of speech `T` satisfying `predicate`
	/// and not present in `already_chosen`.
	///
	/// # Behavior
	/// - Tries up to `MAX_FAST_ATTEMPTS` uniformly drawn indices in the `T` list.
	/// - If none is acceptable, enumerates every acceptable word and draws
	///   uniformly among them.
	///
	/// # Errors
	/// `SelectionExhausted` if no word of kind `T` is acceptable.
	pub fn choose_word<'d, T, S, P>(
		&'d self,
		random: &mut RandomSource<S>,
		already_chosen: &[&Word],
		predicate: P,
	) -> Result<(&'d Word, &'d T)>
	where
		T: PartOfSpeech,
		S: ByteSource,
		P: Fn(&T) -> bool,
	{
		let kind = T::KIND;
		let positions = self.positions(kind);
		if positions.is_empty() {
			return Err(Error::SelectionExhausted { kind });
		}

		let acceptable = |word: &Word, part: &T| {
			predicate(part) && !already_chosen.iter().any(|chosen| chosen.same_entry(word))
		};

		for _ in 0..MAX_FAST_ATTEMPTS {
			let word = &self.words[positions[random.next_index(positions.len())?]];
			if let Some(part) = T::cast(word) {
				if acceptable(word, part) {
					return Ok((word, part));
				}
			}
		}

		let candidates: Vec<(&Word, &T)> =
			self.words_of::<T>().filter(|&(word, part)| acceptable(word, part)).collect();
		debug!(%kind, candidates = candidates.len(), "fast selection missed, enumerating candidates");
		if candidates.is_empty() {
			return Err(Error::SelectionExhausted { kind });
		}
		Ok(candidates[random.next_index(candidates.len())?])
	}
}

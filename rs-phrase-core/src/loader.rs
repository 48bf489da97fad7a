//! Dictionary loading.
//!
//! A dictionary document is JSON: a schema version marker, metadata and one
//! element per word, each carrying its part-of-speech `tag` and the attributes
//! of its surface forms:
//!
//! ```json
//! {
//!     "version": 1,
//!     "language": "en",
//!     "name": "default",
//!     "words": [
//!         { "tag": "noun", "singular": "owl", "plural": "owls" },
//!         { "tag": "verb", "presentSingular": "sees", "presentPlural": "see", "transitive": "true" }
//!     ]
//! }
//! ```
//!
//! Documents may be gzip-compressed.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::io::{build_output_path, is_newer, maybe_gunzip, read_bytes};
use crate::model::dictionary::WordDictionary;
use crate::model::word::{Plurality, Tense, Word};

/// Schema version understood by this loader.
pub const DICTIONARY_VERSION: u32 = 1;

/// Source of a ready-to-query dictionary.
pub trait DictionaryLoader {
	/// # Errors
	/// `DictionaryUnavailable` if the source cannot be read,
	/// `DictionaryParse` if its content is not a valid dictionary.
	fn load(&self) -> Result<WordDictionary>;
}

#[derive(Deserialize)]
struct DictionaryDocument {
	version: u32,
	#[serde(default)]
	language: String,
	#[serde(default)]
	name: String,
	words: Vec<HashMap<String, Value>>,
}

/// Parses a dictionary document, gzip-wrapped or not.
///
/// The dictionary is only built once every word parsed successfully.
pub fn parse_dictionary(bytes: &[u8]) -> Result<WordDictionary> {
	let json =
		maybe_gunzip(bytes).map_err(|e| Error::parse(format!("invalid gzip stream: {}", e)))?;
	let document: DictionaryDocument = serde_json::from_slice(&json)?;
	if document.version != DICTIONARY_VERSION {
		return Err(Error::parse(format!(
			"unsupported dictionary version {} (expected {})",
			document.version, DICTIONARY_VERSION
		)));
	}

	let words = document
		.words
		.iter()
		.enumerate()
		.map(|(position, element)| {
			parse_word(element).map_err(|e| Error::parse(format!("word #{}: {}", position, e)))
		})
		.collect::<Result<Vec<Word>>>()?;

	let dictionary =
		WordDictionary::new(&document.language, &document.name, document.version, words);
	info!(
		name = dictionary.name(),
		language = dictionary.language(),
		words = dictionary.len(),
		"dictionary parsed"
	);
	Ok(dictionary)
}

/// Splits an element into its tag and string attributes.
fn parse_word(element: &HashMap<String, Value>) -> Result<Word> {
	let tag = element
		.get("tag")
		.and_then(Value::as_str)
		.ok_or_else(|| Error::parse("element has no 'tag'"))?;

	let mut attributes = HashMap::with_capacity(element.len());
	for (name, value) in element {
		if name == "tag" {
			continue;
		}
		let text = match value {
			Value::String(s) => s.clone(),
			Value::Bool(b) => b.to_string(),
			Value::Number(n) => n.to_string(),
			Value::Null => continue,
			_ => return Err(Error::parse(format!("attribute '{}' must be a scalar", name))),
		};
		attributes.insert(name.clone(), text);
	}
	Word::from_attributes(tag, &attributes)
}

/// Loads a dictionary from a file on disk.
///
/// With `cache` enabled, a `postcard` encoding of the parsed dictionary is kept
/// next to the source (full file name plus `.bin`) and reused while it is
/// newer than the source and passes the same checks as a parsed document.
#[derive(Debug, Clone)]
pub struct FileDictionaryLoader {
	path: PathBuf,
	cache: bool,
}

impl FileDictionaryLoader {
	pub fn new<P: AsRef<Path>>(path: P) -> Self {
		Self { path: path.as_ref().to_path_buf(), cache: false }
	}

	pub fn with_cache(mut self, cache: bool) -> Self {
		self.cache = cache;
		self
	}

	fn unavailable(&self, source: std::io::Error) -> Error {
		Error::DictionaryUnavailable { path: self.path.clone(), source }
	}

	fn load_cache(&self, cache_path: &Path) -> Result<WordDictionary> {
		let bytes = read_bytes(cache_path).map_err(|source| Error::DictionaryUnavailable {
			path: cache_path.to_path_buf(),
			source,
		})?;
		let dictionary: WordDictionary = postcard::from_bytes(&bytes)?;
		if dictionary.version() != DICTIONARY_VERSION {
			return Err(Error::parse(format!(
				"unsupported dictionary version {} (expected {})",
				dictionary.version(),
				DICTIONARY_VERSION
			)));
		}
		let incomplete_verb = dictionary.words().iter().any(|word| match word {
			Word::Verb(verb) => !verb.has_form(Tense::Present, Plurality::Singular),
			_ => false,
		});
		if incomplete_verb {
			return Err(Error::parse("verb is missing its presentSingular form"));
		}
		Ok(dictionary)
	}

	fn write_cache(&self, cache_path: &Path, dictionary: &WordDictionary) {
		let written = postcard::to_stdvec(dictionary)
			.map_err(|e| e.to_string())
			.and_then(|bytes| fs::write(cache_path, bytes).map_err(|e| e.to_string()));
		match written {
			Ok(()) => debug!(path = %cache_path.display(), "dictionary cache written"),
			Err(e) => {
				warn!(path = %cache_path.display(), error = %e, "could not write dictionary cache")
			}
		}
	}
}

impl DictionaryLoader for FileDictionaryLoader {
	fn load(&self) -> Result<WordDictionary> {
		let cache_path = build_output_path(&self.path, "bin").map_err(|e| self.unavailable(e))?;
		if self.cache && cache_path != self.path && is_newer(&cache_path, &self.path) {
			match self.load_cache(&cache_path) {
				Ok(dictionary) => {
					info!(
						path = %cache_path.display(),
						words = dictionary.len(),
						"dictionary loaded from cache"
					);
					return Ok(dictionary);
				}
				Err(e) => warn!(
					path = %cache_path.display(),
					error = %e,
					"ignoring unusable dictionary cache"
				),
			}
		}

		let bytes = read_bytes(&self.path).map_err(|e| self.unavailable(e))?;
		let dictionary = parse_dictionary(&bytes)?;
		if self.cache && cache_path != self.path {
			self.write_cache(&cache_path, &dictionary);
		}
		Ok(dictionary)
	}
}

/// Loads a dictionary from in-memory bytes, such as an embedded resource.
#[derive(Debug, Clone, Copy)]
pub struct SliceDictionaryLoader<'a> {
	bytes: &'a [u8],
}

impl<'a> SliceDictionaryLoader<'a> {
	pub fn new(bytes: &'a [u8]) -> Self {
		Self { bytes }
	}
}

impl DictionaryLoader for SliceDictionaryLoader<'_> {
	fn load(&self) -> Result<WordDictionary> {
		parse_dictionary(self.bytes)
	}
}

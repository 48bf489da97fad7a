//! Grammatical passphrase generation library.
//!
//! This crate builds passphrases that read like short sentences, such as
//! "the brave owls quietly watch a river", including:
//! - A word dictionary indexed by part of speech
//! - Template-driven phrase assembly without repeated content words
//! - Mutators adding digits, capitals and constant tokens
//! - An unbiased random source over a pluggable byte generator
//! - Dictionary loading from JSON (optionally gzip) with a binary cache
//!
//! ```no_run
//! use rs_phrase_core::loader::{DictionaryLoader, FileDictionaryLoader};
//! use rs_phrase_core::model::generator::PhraseGenerator;
//! use rs_phrase_core::model::phrase_input::PhraseInput;
//! use rs_phrase_core::model::template::Template;
//! use rs_phrase_core::model::word::Plurality;
//!
//! let dictionary = FileDictionaryLoader::new("data/english.json").load()?;
//! let mut generator = PhraseGenerator::new(&dictionary);
//! let input = PhraseInput::new(vec![
//!     Template::Article { definite: true },
//!     Template::Noun { plurality: Plurality::Singular },
//! ]);
//! println!("{}", generator.generate(&input)?);
//! # Ok::<(), rs_phrase_core::error::Error>(())
//! ```

/// Error type shared by every fallible operation.
pub mod error;

/// Uniform random numbers over a pluggable byte source.
pub mod random;

/// Words, dictionary, templates and the phrase generator.
pub mod model;

/// Post-assembly phrase mutations.
pub mod mutator;

/// Dictionary sources (files, embedded bytes).
pub mod loader;

/// I/O utilities (file loading, decompression, path helpers).
///
/// Not exposed
pub(crate) mod io;

pub use error::{Error, Result};
pub use model::generator::{PhraseGenerator, PhraseStrength};
pub use model::phrase_input::PhraseInput;

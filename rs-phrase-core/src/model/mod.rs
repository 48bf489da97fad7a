//! Top-level module for the phrase generation system.
//!
//! This module provides:
//! - Part-of-speech word entries (`Word`)
//! - The indexed word store (`WordDictionary`)
//! - Grammatical slot descriptions (`Template`)
//! - Phrase configuration (`PhraseInput`)
//! - A high-level generation interface (`PhraseGenerator`)

/// Word entries, one type per part of speech.
///
/// Also defines the `PartOfSpeech` trait used for typed dictionary queries.
pub mod word;

/// Immutable word store indexed by part of speech.
///
/// Supports uniform selection with exclusion lists and predicates.
pub mod dictionary;

/// Grammatical slots and their word-selection rules.
pub mod template;

/// Phrase configuration: template sequence plus mutator pipeline.
pub mod phrase_input;

/// High-level interface turning a `PhraseInput` into a passphrase.
pub mod generator;

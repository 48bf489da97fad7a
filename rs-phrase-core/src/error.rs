use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::model::word::WordKind;

/// Failure conditions of phrase generation and dictionary loading.
///
/// Every variant halts the current call and is handed back to the caller;
/// the only internal recovery is the exact-enumeration fallback of word selection.
#[derive(Error, Debug)]
pub enum Error {
	/// Malformed parameters or configuration (non-positive bounds, empty symbol sets, ...).
	#[error("invalid argument: {0}")]
	InvalidArgument(String),

	/// No word of the requested part of speech satisfies the slot constraints.
	#[error("no {kind} satisfies the requested constraints")]
	SelectionExhausted { kind: WordKind },

	/// The dictionary source could not be read.
	#[error("dictionary unavailable at {}: {source}", path.display())]
	DictionaryUnavailable {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	/// The dictionary source was read but its content is not a valid dictionary.
	#[error("dictionary parse error: {0}")]
	DictionaryParse(String),
}

impl Error {
	pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
		Error::InvalidArgument(message.into())
	}

	pub(crate) fn parse(message: impl Into<String>) -> Self {
		Error::DictionaryParse(message.into())
	}
}

impl From<serde_json::Error> for Error {
	fn from(error: serde_json::Error) -> Self {
		Error::DictionaryParse(error.to_string())
	}
}

impl From<postcard::Error> for Error {
	fn from(error: postcard::Error) -> Self {
		Error::DictionaryParse(error.to_string())
	}
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

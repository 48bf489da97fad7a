use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::template::Template;
use crate::error::{Error, Result};
use crate::mutator::Mutator;

/// Input parameters of one phrase generation.
///
/// `PhraseInput` bundles the **template sequence** (the grammatical shape of
/// the phrase, decided by the caller) and the **mutator list** applied, in order,
/// to the assembled phrase.
///
/// # Invariants
/// - A validated input has at least one template
/// - Every mutator of a validated input can run without configuration errors
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PhraseInput {
	/// Slots resolved from left to right.
	pub templates: Vec<Template>,

	/// Mutators applied after assembly.
	#[serde(default)]
	pub mutators: Vec<Mutator>,
}

impl PhraseInput {
	/// Creates an input without mutators.
	pub fn new(templates: Vec<Template>) -> Self {
		Self { templates, mutators: Vec::new() }
	}

	/// Appends a mutator to the pipeline.
	pub fn with_mutator(mut self, mutator: impl Into<Mutator>) -> Self {
		self.mutators.push(mutator.into());
		self
	}

	/// Parses an input from JSON.
	///
	/// # Errors
	/// `InvalidArgument` if the document is malformed or fails validation.
	pub fn from_json(json: &str) -> Result<Self> {
		let input: Self = serde_json::from_str(json)
			.map_err(|e| Error::invalid_argument(format!("invalid phrase configuration: {}", e)))?;
		input.validate()?;
		Ok(input)
	}

	/// Loads an input from a JSON file.
	///
	/// # Errors
	/// `InvalidArgument` if the file cannot be read, is malformed or fails validation.
	pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
		let path = path.as_ref();
		let json = fs::read_to_string(path).map_err(|e| {
			Error::invalid_argument(format!("cannot read phrase configuration {}: {}", path.display(), e))
		})?;
		Self::from_json(&json)
	}

	/// Checks the input can be generated from.
	///
	/// # Errors
	/// `InvalidArgument` on an empty template list or an unusable mutator.
	pub fn validate(&self) -> Result<()> {
		if self.templates.is_empty() {
			return Err(Error::invalid_argument("a phrase needs at least one template"));
		}
		self.mutators.iter().try_for_each(Mutator::validate)
	}
}

//! Position-finding helpers shared by the mutators.
//!
//! Every mutator works on the phrase as a `Vec<char>`: offsets are character
//! offsets, never byte offsets.

use crate::error::Result;
use crate::random::{ByteSource, RandomSource};

/// Index of the last non-whitespace character, skipping trailing whitespace.
pub(crate) fn last_non_whitespace(chars: &[char]) -> Option<usize> {
	chars.iter().rposition(|c| !c.is_whitespace())
}

/// Index of the last letter or digit.
pub(crate) fn last_alphanumeric(chars: &[char]) -> Option<usize> {
	chars.iter().rposition(|c| c.is_alphanumeric())
}

/// A word starts at a letter/digit at offset 0 or right after whitespace.
pub(crate) fn is_start_of_word(chars: &[char], i: usize) -> bool {
	chars.get(i).is_some_and(|c| c.is_alphanumeric()) && (i == 0 || chars[i - 1].is_whitespace())
}

/// A word ends at whitespace preceded by a letter/digit.
pub(crate) fn is_end_of_word(chars: &[char], i: usize) -> bool {
	i > 0 && chars.get(i).is_some_and(|c| c.is_whitespace()) && chars[i - 1].is_alphanumeric()
}

/// Offset one past the word starting at `start` (next whitespace or buffer end).
pub(crate) fn word_end(chars: &[char], start: usize) -> usize {
	chars[start..]
		.iter()
		.position(|c| c.is_whitespace())
		.map_or(chars.len(), |len| start + len)
}

/// Start-of-word offsets.
pub(crate) fn word_starts(chars: &[char]) -> Vec<usize> {
	(0..chars.len()).filter(|&i| is_start_of_word(chars, i)).collect()
}

/// Draws up to `count` distinct candidates, removing each pick from the pool.
///
/// Clamps silently when the pool is smaller than `count`. The result is sorted
/// in descending order so edits applied in sequence never shift pending offsets.
pub(crate) fn pick_without_replacement<S: ByteSource>(
	mut candidates: Vec<usize>,
	count: usize,
	random: &mut RandomSource<S>,
) -> Result<Vec<usize>> {
	let count = count.min(candidates.len());
	let mut picked = Vec::with_capacity(count);
	for _ in 0..count {
		let index = random.next_index(candidates.len())?;
		picked.push(candidates.swap_remove(index));
	}
	picked.sort_unstable_by(|a, b| b.cmp(a));
	Ok(picked)
}

/// Inserts `text` before character offset `at` (appends when `at` is past the end).
pub(crate) fn insert_at(chars: &mut Vec<char>, at: usize, text: &str) {
	let at = at.min(chars.len());
	chars.splice(at..at, text.chars());
}

/// Rebuilds the phrase, uppercasing every character flagged in `mask`.
pub(crate) fn uppercase_masked(chars: &[char], mask: &[bool]) -> String {
	let mut phrase = String::with_capacity(chars.len());
	for (c, upper) in chars.iter().zip(mask) {
		if *upper {
			phrase.extend(c.to_uppercase());
		} else {
			phrase.push(*c);
		}
	}
	phrase
}

#[cfg(test)]
mod tests {
	use super::*;

	fn chars(s: &str) -> Vec<char> {
		s.chars().collect()
	}

	#[test]
	fn test_word_boundaries() {
		let c = chars("big red  dog ");
		assert_eq!(word_starts(&c), vec![0, 4, 9]);
		assert!(is_end_of_word(&c, 3));
		assert!(!is_end_of_word(&c, 8));
		assert!(is_end_of_word(&c, 12));
		assert_eq!(word_end(&c, 4), 7);
		assert_eq!(word_end(&chars("dog"), 0), 3);
		assert_eq!(last_non_whitespace(&c), Some(11));
		assert_eq!(last_non_whitespace(&chars("   ")), None);
		assert_eq!(last_alphanumeric(&chars("dog!  ")), Some(2));
	}

	#[test]
	fn test_pick_without_replacement_clamps() {
		let mut random = RandomSource::seeded(11);
		let picked = pick_without_replacement(vec![3, 8, 1], 10, &mut random).unwrap();
		assert_eq!(picked, vec![8, 3, 1]);
		assert!(pick_without_replacement(Vec::new(), 2, &mut random).unwrap().is_empty());
	}

	#[test]
	fn test_pick_without_replacement_is_distinct() {
		let mut random = RandomSource::seeded(12);
		for _ in 0..100 {
			let picked = pick_without_replacement((0..10).collect(), 4, &mut random).unwrap();
			assert_eq!(picked.len(), 4);
			assert!(picked.windows(2).all(|w| w[0] > w[1]));
		}
	}

	#[test]
	fn test_insert_and_uppercase() {
		let mut c = chars("ab");
		insert_at(&mut c, 1, "12");
		insert_at(&mut c, 99, "!");
		assert_eq!(c.iter().collect::<String>(), "a12b!");
		assert_eq!(uppercase_masked(&chars("straße"), &[true, false, false, false, true, false]), "StraSSe");
	}
}

//! Unbiased random sampling built on an injectable byte source.
//!
//! Every entropy claim of the generator rests on this module: all bounded
//! integers are produced by rejection sampling, never by plain modulo.

use rand::rngs::{StdRng, ThreadRng};
use rand::{RngCore, SeedableRng};

use crate::error::{Error, Result};

/// Raw random byte capability.
///
/// Implementors only provide bytes; all derived operations live in [`RandomSource`].
pub trait ByteSource {
	/// Fills `dest` entirely with random bytes.
	fn fill_bytes(&mut self, dest: &mut [u8]);
}

/// Cryptographically secure bytes from the thread-local generator of `rand`
/// (ChaCha, seeded and periodically reseeded from the operating system).
///
/// Thread-confined: create one per thread or generation call.
#[derive(Debug, Default)]
pub struct CryptoByteSource {
	rng: ThreadRng,
}

impl CryptoByteSource {
	pub fn new() -> Self {
		Self { rng: rand::rng() }
	}
}

impl ByteSource for CryptoByteSource {
	fn fill_bytes(&mut self, dest: &mut [u8]) {
		self.rng.fill_bytes(dest);
	}
}

/// Reproducible bytes from a fixed seed. Not suitable for real passphrases.
#[derive(Debug, Clone)]
pub struct SeededByteSource {
	rng: StdRng,
}

impl SeededByteSource {
	pub fn new(seed: u64) -> Self {
		Self { rng: StdRng::seed_from_u64(seed) }
	}
}

impl ByteSource for SeededByteSource {
	fn fill_bytes(&mut self, dest: &mut [u8]) {
		self.rng.fill_bytes(dest);
	}
}

/// Derived random operations over a [`ByteSource`].
///
/// # Invariants
/// - `next()` is uniform over `[0, 2^31)`
/// - bounded draws are exactly uniform (rejection sampling)
#[derive(Debug)]
pub struct RandomSource<S: ByteSource> {
	source: S,
}

impl RandomSource<CryptoByteSource> {
	/// Random source backed by the secure thread-local generator.
	pub fn crypto() -> Self {
		Self::new(CryptoByteSource::new())
	}
}

impl RandomSource<SeededByteSource> {
	/// Deterministic random source, for reproducible runs.
	pub fn seeded(seed: u64) -> Self {
		Self::new(SeededByteSource::new(seed))
	}
}

impl<S: ByteSource> RandomSource<S> {
	pub fn new(source: S) -> Self {
		Self { source }
	}

	/// Returns `n` random bytes.
	///
	/// # Errors
	/// `InvalidArgument` if `n == 0`.
	pub fn get_random_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
		if n == 0 {
			return Err(Error::invalid_argument("byte count must be positive"));
		}
		let mut bytes = vec![0u8; n];
		self.source.fill_bytes(&mut bytes);
		Ok(bytes)
	}

	/// Uniform integer in `[0, 2^31)`.
	pub fn next(&mut self) -> i32 {
		let mut bytes = [0u8; 4];
		self.source.fill_bytes(&mut bytes);
		(u32::from_le_bytes(bytes) & 0x7FFF_FFFF) as i32
	}

	/// Uniform integer in `[0, max_exclusive)`.
	///
	/// Raw draws falling in the biased tail (the last `2^31 mod max` values)
	/// are discarded and redrawn before reducing modulo `max_exclusive`.
	///
	/// # Errors
	/// `InvalidArgument` if `max_exclusive <= 0`.
	pub fn next_below(&mut self, max_exclusive: i32) -> Result<i32> {
		if max_exclusive <= 0 {
			return Err(Error::invalid_argument(format!(
				"max_exclusive must be positive, got {}",
				max_exclusive
			)));
		}
		let tail = ((i32::MAX % max_exclusive) + 1) % max_exclusive;
		let limit = i32::MAX - tail;
		loop {
			let value = self.next();
			if value <= limit {
				return Ok(value % max_exclusive);
			}
		}
	}

	/// Uniform integer in `[min, max)`.
	///
	/// # Errors
	/// `InvalidArgument` if `min < 0` or `max <= min`.
	pub fn next_between(&mut self, min: i32, max: i32) -> Result<i32> {
		if min < 0 {
			return Err(Error::invalid_argument(format!("min must not be negative, got {}", min)));
		}
		if max <= min {
			return Err(Error::invalid_argument(format!("max ({}) must be greater than min ({})", max, min)));
		}
		Ok(min + self.next_below(max - min)?)
	}

	/// Uniform index into a collection of `len` elements.
	///
	/// # Errors
	/// `InvalidArgument` if `len` is zero or does not fit the sampling range.
	pub fn next_index(&mut self, len: usize) -> Result<usize> {
		let max = i32::try_from(len)
			.map_err(|_| Error::invalid_argument(format!("collection too large to sample: {}", len)))?;
		Ok(self.next_below(max)? as usize)
	}

	/// Fair coin: the low bit of one random byte.
	pub fn coin_flip(&mut self) -> bool {
		let mut byte = [0u8; 1];
		self.source.fill_bytes(&mut byte);
		byte[0] & 1 == 1
	}

	/// Returns `true` with probability `true_weight / (true_weight + false_weight)`.
	///
	/// A non-positive weight forces the other outcome.
	///
	/// # Errors
	/// `InvalidArgument` if both weights are non-positive or their sum overflows.
	pub fn weighted_coin_flip(&mut self, true_weight: i32, false_weight: i32) -> Result<bool> {
		match (true_weight > 0, false_weight > 0) {
			(false, false) => Err(Error::invalid_argument("at least one weight must be positive")),
			(true, false) => Ok(true),
			(false, true) => Ok(false),
			(true, true) => {
				let total = true_weight
					.checked_add(false_weight)
					.ok_or_else(|| Error::invalid_argument("weights overflow"))?;
				Ok(self.next_below(total)? < true_weight)
			}
		}
	}
}

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Reads a whole file into memory.
pub(crate) fn read_bytes<P: AsRef<Path>>(filename: P) -> io::Result<Vec<u8>> {
	let mut contents = Vec::new();
	fs::File::open(filename)?.read_to_end(&mut contents)?;
	Ok(contents)
}

/// Inflates gzip-wrapped data; anything else is returned unchanged.
pub(crate) fn maybe_gunzip(bytes: &[u8]) -> io::Result<Vec<u8>> {
	if !bytes.starts_with(&GZIP_MAGIC) {
		return Ok(bytes.to_vec());
	}
	let mut inflated = Vec::new();
	GzDecoder::new(bytes).read_to_end(&mut inflated)?;
	Ok(inflated)
}

/// Builds an output path by appending an extension to the full file name.
///
/// Example:
/// `data/english.json` + `"bin"` → `data/english.json.bin`
pub(crate) fn build_output_path<P: AsRef<Path>>(
	input_path: P,
	output_extension: &str,
) -> io::Result<PathBuf> {
	let input_path = input_path.as_ref();

	let file_name = input_path
		.file_name()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Input path has no filename"))?;

	let mut output_name = file_name.to_os_string();
	output_name.push(".");
	output_name.push(output_extension);

	Ok(input_path.with_file_name(output_name))
}

/// Whether `derived` was written after `source` last changed.
///
/// Any metadata error reads as stale.
pub(crate) fn is_newer<P: AsRef<Path>, Q: AsRef<Path>>(derived: P, source: Q) -> bool {
	let modified = |path: &Path| fs::metadata(path).and_then(|m| m.modified()).ok();
	match (modified(derived.as_ref()), modified(source.as_ref())) {
		(Some(derived), Some(source)) => derived >= source,
		_ => false,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use flate2::Compression;
	use flate2::write::GzEncoder;
	use std::io::Write;

	#[test]
	fn test_build_output_path() {
		let path = build_output_path("data/english.json", "bin").unwrap();
		assert_eq!(path, PathBuf::from("data/english.json.bin"));
		let gzip = build_output_path("data/english.json.gz", "bin").unwrap();
		assert_eq!(gzip, PathBuf::from("data/english.json.gz.bin"));
		assert!(build_output_path("", "bin").is_err());
	}

	#[test]
	fn test_maybe_gunzip() {
		let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
		encoder.write_all(b"{\"words\": []}").unwrap();
		let compressed = encoder.finish().unwrap();
		assert_eq!(maybe_gunzip(&compressed).unwrap(), b"{\"words\": []}");
		assert_eq!(maybe_gunzip(b"plain").unwrap(), b"plain");
		assert!(maybe_gunzip(&[0x1f, 0x8b, 0x00]).is_err());
	}
}

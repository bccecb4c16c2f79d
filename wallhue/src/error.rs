//! Error kinds surfaced by every fallible operation in the crate

use thiserror::Error;

/// Convenience alias used throughout the crate
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can go wrong while analysing or recoloring an image
#[derive(Debug, Error)]
pub enum Error {
	/// The input bytes could not be turned into a pixel buffer
	#[error("failed to decode image: {0}")]
	Decode(#[from] DecodeError),

	/// A hex color string was not exactly six hexadecimal digits
	#[error("malformed hex color {0:?}: expected 6 hex digits with an optional leading '#'")]
	Format(String),

	/// The image has no pixels to work with
	#[error("image is too small to process ({width}x{height})")]
	Dimension {
		/// Width of the rejected image
		width: u32,
		/// Height of the rejected image
		height: u32,
	},

	/// The composited image could not be encoded
	#[error("failed to encode image: {0}")]
	Encode(#[source] image::ImageError),
}

/// The reasons an image could not be decoded
#[derive(Debug, Error)]
pub enum DecodeError {
	/// The image format was not recognized or the data was corrupt
	#[error(transparent)]
	Image(#[from] image::ImageError),

	/// A data URL carried a payload that was not valid base64
	#[error("invalid base64 payload in data URL: {0}")]
	Base64(#[from] base64::DecodeError),

	/// The input looked like a data URL but was missing its `;base64,` marker
	#[error("data URL is not of the form data:image/<format>;base64,<payload>")]
	DataUrl,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn format_error_mentions_input() {
		let message = Error::Format("#12".to_owned()).to_string();
		assert!(message.contains("\"#12\""), "{message}");
	}

	#[test]
	fn decode_error_converts() {
		let error: Error = DecodeError::DataUrl.into();
		assert!(matches!(error, Error::Decode(DecodeError::DataUrl)));
	}
}

//! The byte boundary of the crate: decoding uploads and encoding rendered previews.
//!
//! Input may be raw encoded image bytes (JPEG, PNG, GIF, BMP)
//! or a base64 data URL of the form `data:image/<format>;base64,<payload>`.

use crate::{error::DecodeError, Error, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{DynamicImage, GenericImageView, ImageOutputFormat};
use std::io::Cursor;

/// Default JPEG quality for encoded output
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Prefix shared by all image data URLs
const DATA_URL_PREFIX: &[u8] = b"data:image/";

/// Separator between the media type and the payload of a base64 data URL
const BASE64_MARKER: &[u8] = b";base64,";

/// Supported formats for encoded output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
	/// Lossy JPEG, the default
	#[default]
	Jpeg,
	/// Lossless PNG, preserving any alpha channel
	Png,
}

impl OutputFormat {
	/// The subtype used in a `data:image/<subtype>` URL
	#[must_use]
	pub const fn media_subtype(self) -> &'static str {
		match self {
			OutputFormat::Jpeg => "jpeg",
			OutputFormat::Png => "png",
		}
	}
}

/// How to encode a rendered image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
	/// The output container format
	pub format: OutputFormat,
	/// JPEG quality in `1..=100`, ignored for PNG
	pub quality: u8,
}

impl Default for EncodeOptions {
	fn default() -> Self {
		Self {
			format: OutputFormat::Jpeg,
			quality: DEFAULT_JPEG_QUALITY,
		}
	}
}

/// If `input` is a base64 image data URL, returns its (still encoded) payload.
///
/// Returns `Ok(None)` for anything that does not start with `data:image/`.
///
/// # Errors
/// Returns [`DecodeError::DataUrl`] if the input starts like a data URL
/// but the format token is empty, not alphanumeric, or not followed by `;base64,`.
pub fn data_url_payload(input: &[u8]) -> Result<Option<&[u8]>, DecodeError> {
	let Some(rest) = input.strip_prefix(DATA_URL_PREFIX) else {
		return Ok(None);
	};

	let format_len = rest
		.iter()
		.take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
		.count();

	if format_len == 0 {
		return Err(DecodeError::DataUrl);
	}

	rest[format_len..]
		.strip_prefix(BASE64_MARKER)
		.map(Some)
		.ok_or(DecodeError::DataUrl)
}

/// Decode raw image bytes or a base64 data URL into a pixel buffer.
///
/// # Errors
/// Returns [`Error::Decode`] if the data URL or its base64 payload is malformed,
/// or if the image data cannot be decoded.
pub fn decode(input: &[u8]) -> Result<DynamicImage> {
	let image = match data_url_payload(input)? {
		Some(payload) => {
			let bytes = STANDARD.decode(payload.trim_ascii()).map_err(DecodeError::from)?;
			log::trace!("decoded {} byte base64 payload", bytes.len());
			image::load_from_memory(&bytes)
		},
		None => image::load_from_memory(input),
	}
	.map_err(DecodeError::from)?;

	let (width, height) = image.dimensions();
	log::debug!("decoded {width}x{height} {:?} image", image.color());

	Ok(image)
}

/// Encode an image with the given options.
///
/// JPEG output drops any alpha channel.
///
/// # Errors
/// Returns [`Error::Encode`] if the encoder fails.
pub fn encode(image: &DynamicImage, options: &EncodeOptions) -> Result<Vec<u8>> {
	let mut buf = Vec::new();
	let mut cursor = Cursor::new(&mut buf);

	match options.format {
		OutputFormat::Jpeg => {
			let quality = options.quality.clamp(1, 100);
			// the JPEG encoder does not accept an alpha channel
			let rgb = if image.color().has_alpha() {
				DynamicImage::ImageRgb8(image.to_rgb8())
			} else {
				image.clone()
			};
			rgb.write_to(&mut cursor, ImageOutputFormat::Jpeg(quality))
		},
		OutputFormat::Png => image.write_to(&mut cursor, ImageOutputFormat::Png),
	}
	.map_err(Error::Encode)?;

	log::debug!("encoded {} bytes as {:?}", buf.len(), options.format);

	Ok(buf)
}

/// Encode an image and wrap it in a `data:image/<format>;base64,` URL
///
/// # Errors
/// Returns [`Error::Encode`] if the encoder fails.
pub fn encode_data_url(image: &DynamicImage, options: &EncodeOptions) -> Result<String> {
	let bytes = encode(image, options)?;
	Ok(format!(
		"data:image/{};base64,{}",
		options.format.media_subtype(),
		STANDARD.encode(bytes)
	))
}

#[cfg(test)]
mod tests {
	use super::*;
	use image::{Rgb, RgbImage, Rgba, RgbaImage};

	fn test_image() -> DynamicImage {
		DynamicImage::ImageRgb8(RgbImage::from_fn(8, 6, |x, y| {
			#[allow(clippy::cast_possible_truncation)]
			Rgb([(x * 30) as u8, (y * 40) as u8, 200])
		}))
	}

	fn png_bytes(image: &DynamicImage) -> Vec<u8> {
		encode(
			image,
			&EncodeOptions {
				format: OutputFormat::Png,
				..EncodeOptions::default()
			},
		)
		.unwrap()
	}

	#[test]
	fn default_encoding_is_jpeg_90() {
		let options = EncodeOptions::default();
		assert_eq!(options.format, OutputFormat::Jpeg);
		assert_eq!(options.quality, 90);
	}

	#[test]
	fn decodes_raw_bytes() {
		let image = test_image();
		let decoded = decode(&png_bytes(&image)).unwrap();
		assert_eq!(decoded.to_rgb8(), image.to_rgb8());
	}

	#[test]
	fn decodes_data_url() {
		let image = test_image();
		let url = format!("data:image/png;base64,{}", STANDARD.encode(png_bytes(&image)));
		let decoded = decode(url.as_bytes()).unwrap();
		assert_eq!(decoded.to_rgb8(), image.to_rgb8());
	}

	#[test]
	fn data_url_round_trip() {
		let image = test_image();
		let options = EncodeOptions {
			format: OutputFormat::Png,
			..EncodeOptions::default()
		};
		let url = encode_data_url(&image, &options).unwrap();
		assert!(url.starts_with("data:image/png;base64,"));
		assert_eq!(decode(url.as_bytes()).unwrap().to_rgb8(), image.to_rgb8());
	}

	#[test]
	fn payload_is_stripped() {
		assert_eq!(data_url_payload(b"data:image/jpeg;base64,QUJD").unwrap(), Some(&b"QUJD"[..]));
		assert_eq!(data_url_payload(b"\x89PNG").unwrap(), None);
		assert!(matches!(data_url_payload(b"data:image/;base64,QUJD"), Err(DecodeError::DataUrl)));
		assert!(matches!(data_url_payload(b"data:image/png,QUJD"), Err(DecodeError::DataUrl)));
	}

	#[test]
	fn garbage_fails_with_decode_error() {
		assert!(matches!(decode(b"definitely not an image"), Err(Error::Decode(DecodeError::Image(_)))));
		assert!(matches!(decode(b"data:image/png;base64,***"), Err(Error::Decode(DecodeError::Base64(_)))));
		assert!(matches!(decode(b""), Err(Error::Decode(_))));
	}

	#[test]
	fn jpeg_drops_alpha() {
		let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([10, 20, 30, 128])));
		let bytes = encode(&image, &EncodeOptions::default()).unwrap();
		let decoded = decode(&bytes).unwrap();
		assert!(!decoded.color().has_alpha());
		assert_eq!(decoded.dimensions(), (4, 4));
	}

	#[test]
	fn png_keeps_alpha() {
		let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([10, 20, 30, 128])));
		let decoded = decode(&png_bytes(&image)).unwrap();
		assert_eq!(decoded.to_rgba8(), image.to_rgba8());
	}
}

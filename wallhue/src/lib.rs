//! Extract a color palette from a photo of a wall and preview the wall repainted.
//!
//! The crate has two halves that share only the [`Color`] type:
//! - palette extraction ([`extract`]) and naming ([`naming`]), which summarize a photo
//!   as a few diverse colors followed by a fixed set of designer colors,
//! - compositing ([`composite`]), which blends a chosen color into the photo while
//!   keeping detected edges ([`edges`]) so that shading and outlines stay visible.
//!
//! The functions at the crate root work on encoded image bytes and hex strings.
//! Every call is a pure computation over its own copy of the input.
//!
//! # Examples
//!
//! ## Get a palette for an uploaded photo
//!
//! ```no_run
//! # fn main() -> Result<(), wallhue::Error> {
//! let bytes = std::fs::read("wall.jpg").unwrap();
//! let hex = wallhue::extract_palette(&bytes, &wallhue::PaletteOptions::default())?;
//! for color in &hex {
//! 	println!("{color} {}", wallhue::name_color(color)?);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Preview a color on the wall
//!
//! ```no_run
//! # fn main() -> Result<(), wallhue::Error> {
//! let bytes = std::fs::read("wall.jpg").unwrap();
//! let preview = wallhue::apply_color(
//! 	&bytes,
//! 	"#4a6da7",
//! 	&wallhue::CompositeOptions::with_opacity(0.6),
//! 	&wallhue::EncodeOptions::default(),
//! )?;
//! std::fs::write("preview.jpg", preview).unwrap();
//! # Ok(())
//! # }
//! ```
//!
//! ## Work with decoded images directly
//!
//! ```no_run
//! # fn main() -> Result<(), wallhue::Error> {
//! use wallhue::{composite, extract, Strategy};
//!
//! let image = wallhue::decode(&std::fs::read("wall.png").unwrap())?;
//! let palette = extract::from_image(&image, &wallhue::PaletteOptions { num_colors: 8, ..Default::default() })?;
//!
//! let options = wallhue::CompositeOptions {
//! 	strategy: Strategy::Flat,
//! 	..wallhue::CompositeOptions::with_opacity(0.8)
//! };
//! let preview = composite::apply(&image, palette.extracted[0], &options)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Determinism
//!
//! Palette extraction is random but seeded through [`PaletteOptions::seed`],
//! so the same image and options always give the same palette.
//! Everything else is deterministic. Enabling the `threads` feature
//! only changes how rows are scheduled, never the output.

#![deny(unsafe_code)]
#![warn(clippy::pedantic, clippy::cargo)]
#![warn(clippy::use_debug, clippy::dbg_macro, clippy::todo, clippy::unimplemented)]
#![warn(clippy::unwrap_used, clippy::unwrap_in_result)]
#![warn(clippy::unneeded_field_pattern, clippy::rest_pat_in_fully_bound_structs)]
#![warn(clippy::unnecessary_self_imports)]
#![warn(clippy::str_to_string, clippy::string_to_string, clippy::string_slice)]
#![warn(missing_docs, clippy::missing_docs_in_private_items, rustdoc::all)]
#![warn(clippy::float_cmp_const, clippy::lossy_float_literal)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::unreadable_literal)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod brands;
pub mod codec;
pub mod color;
pub mod composite;
pub mod edges;
mod error;
pub mod extract;
pub mod naming;
pub mod suggest;

pub use brands::{Brand, BrandMatch, Finish};
pub use codec::{decode, encode, encode_data_url, EncodeOptions, OutputFormat};
pub use color::{color_distance, hex_to_rgb, hsv_to_rgb, rgb_to_hex, rgb_to_hsv, Color};
pub use composite::{CompositeOptions, FlatOptions, Strategy};
pub use edges::{EdgeMask, EdgeOptions};
pub use error::{DecodeError, Error, Result};
pub use extract::{Palette, PaletteOptions, DESIGNER_COLORS};
pub use naming::{name_palette, NamedColor};
pub use suggest::{CuratedColor, SuggestedPalette, SUGGESTED_PALETTES};

/// Extract a palette from encoded image bytes (or a base64 data URL).
///
/// Returns up to `options.num_colors` colors chosen from the image
/// followed by the fifteen [`DESIGNER_COLORS`], all as lowercase `#rrggbb` strings.
///
/// # Errors
/// Returns [`Error::Decode`] if the image cannot be decoded
/// or [`Error::Dimension`] if it has no pixels.
pub fn extract_palette(image: &[u8], options: &PaletteOptions) -> Result<Vec<String>> {
	let image = decode(image)?;
	Ok(extract::from_image(&image, options)?.to_hex())
}

/// The display name of a hex color, for example `"Light White"` for `#ffffff`.
///
/// # Errors
/// Returns [`Error::Format`] if `hex` is not a valid hex color.
pub fn name_color(hex: &str) -> Result<String> {
	hex_to_rgb(hex).map(naming::name)
}

/// Blend the color `hex` into an encoded image and return the encoded result.
///
/// # Errors
/// Returns [`Error::Format`] for a malformed color, [`Error::Decode`] if the image
/// cannot be decoded, [`Error::Dimension`] if it has no pixels, or [`Error::Encode`]
/// if the output cannot be encoded. The color is checked before the image is decoded.
pub fn apply_color(
	image: &[u8],
	hex: &str,
	options: &CompositeOptions,
	encoding: &EncodeOptions,
) -> Result<Vec<u8>> {
	let color = hex_to_rgb(hex)?;
	let image = decode(image)?;
	let output = composite::apply(&image, color, options)?;
	encode(&output, encoding)
}

/// `n` hue-rotated variants of the color `hex` as `#rrggbb` strings.
///
/// See [`suggest::complementary`].
///
/// # Errors
/// Returns [`Error::Format`] if `hex` is not a valid hex color.
pub fn complementary_colors(hex: &str, n: usize) -> Result<Vec<String>> {
	let base = hex_to_rgb(hex)?;
	Ok(suggest::complementary(base, n).into_iter().map(rgb_to_hex).collect())
}

/// Six named colors close to the color `hex`, starting with `hex` itself.
///
/// See [`suggest::similar`].
///
/// # Errors
/// Returns [`Error::Format`] if `hex` is not a valid hex color.
pub fn similar_colors(hex: &str) -> Result<Vec<NamedColor>> {
	hex_to_rgb(hex).map(suggest::similar)
}

/// Five contrasting shades of the color `hex` as `#rrggbb` strings.
///
/// See [`suggest::shades`].
///
/// # Errors
/// Returns [`Error::Format`] if `hex` is not a valid hex color.
pub fn shade_suggestions(hex: &str) -> Result<Vec<String>> {
	let base = hex_to_rgb(hex)?;
	Ok(suggest::shades(base).into_iter().map(rgb_to_hex).collect())
}

/// The color `hex` as sold by each [`Brand`], with a product code and finishes.
///
/// See [`brands::matches`].
///
/// # Errors
/// Returns [`Error::Format`] if `hex` is not a valid hex color.
pub fn brand_matches(hex: &str) -> Result<Vec<BrandMatch>> {
	hex_to_rgb(hex).map(brands::matches)
}

/// The hand-picked [`SUGGESTED_PALETTES`], in order.
#[must_use]
pub fn suggested_palettes() -> &'static [SuggestedPalette] {
	&SUGGESTED_PALETTES
}

#[cfg(test)]
mod tests {
	use super::*;
	use image::{DynamicImage, GenericImageView, Rgb, RgbImage};

	/// Four vertical stripes of widely separated colors
	fn stripes() -> DynamicImage {
		const STRIPES: [[u8; 3]; 4] = [[255, 0, 0], [0, 255, 0], [0, 0, 255], [255, 255, 255]];
		DynamicImage::ImageRgb8(RgbImage::from_fn(40, 40, |x, _| Rgb(STRIPES[(x / 10) as usize])))
	}

	fn png(image: &DynamicImage) -> Vec<u8> {
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
	fn palette_from_bytes() {
		let options = PaletteOptions {
			num_colors: 4,
			..PaletteOptions::default()
		};
		let hex = extract_palette(&png(&stripes()), &options).unwrap();
		assert_eq!(hex.len(), 4 + DESIGNER_COLORS.len());

		let mut extracted = hex[..4].to_vec();
		extracted.sort();
		assert_eq!(extracted, ["#0000ff", "#00ff00", "#ff0000", "#ffffff"]);
		assert_eq!(hex[4], "#f5f5dc");
		assert_eq!(hex[hex.len() - 1], "#ffe4b5");
	}

	#[test]
	fn palette_from_data_url() {
		let url = encode_data_url(
			&stripes(),
			&EncodeOptions {
				format: OutputFormat::Png,
				..EncodeOptions::default()
			},
		)
		.unwrap();
		let options = PaletteOptions::default();
		assert_eq!(
			extract_palette(url.as_bytes(), &options).unwrap(),
			extract_palette(&png(&stripes()), &options).unwrap()
		);
	}

	#[test]
	fn palette_is_seeded() {
		let bytes = png(&DynamicImage::ImageRgb8(RgbImage::from_fn(64, 64, |x, y| {
			#[allow(clippy::cast_possible_truncation)]
			Rgb([(x * 4) as u8, (y * 4) as u8, ((x + y) * 2) as u8])
		})));

		for seed in [0, 1, 42] {
			let options = PaletteOptions {
				seed,
				..PaletteOptions::default()
			};
			let first = extract_palette(&bytes, &options).unwrap();
			assert_eq!(first.len(), options.num_colors + DESIGNER_COLORS.len());
			assert_eq!(first, extract_palette(&bytes, &options).unwrap());
		}
	}

	#[test]
	fn undecodable_bytes() {
		assert!(matches!(
			extract_palette(b"GIF89a but not really", &PaletteOptions::default()),
			Err(Error::Decode(_))
		));
	}

	#[test]
	fn light_and_dark_names() {
		assert!(name_color("#ffffff").unwrap().starts_with("Light"));
		assert!(name_color("#000000").unwrap().starts_with("Dark"));
	}

	#[test]
	fn malformed_hex_is_a_format_error() {
		for bad in ["#12", "notacolor"] {
			assert!(matches!(name_color(bad), Err(Error::Format(_))));
			assert!(matches!(complementary_colors(bad, 3), Err(Error::Format(_))));
			assert!(matches!(similar_colors(bad), Err(Error::Format(_))));
			assert!(matches!(shade_suggestions(bad), Err(Error::Format(_))));
			assert!(matches!(brand_matches(bad), Err(Error::Format(_))));
			assert!(matches!(
				apply_color(&png(&stripes()), bad, &CompositeOptions::default(), &EncodeOptions::default()),
				Err(Error::Format(_))
			));
		}
	}

	#[test]
	fn color_is_checked_before_decoding() {
		assert!(matches!(
			apply_color(b"garbage", "nope", &CompositeOptions::default(), &EncodeOptions::default()),
			Err(Error::Format(_))
		));
		assert!(matches!(
			apply_color(b"garbage", "#ffffff", &CompositeOptions::default(), &EncodeOptions::default()),
			Err(Error::Decode(_))
		));
	}

	#[test]
	fn applied_preview_decodes() {
		let bytes = apply_color(
			&png(&stripes()),
			"#4a6da7",
			&CompositeOptions::default(),
			&EncodeOptions::default(),
		)
		.unwrap();

		// JPEG magic bytes
		assert_eq!(&bytes[..2], &[0xff, 0xd8]);
		assert_eq!(decode(&bytes).unwrap().dimensions(), (40, 40));
	}

	#[test]
	fn applied_png_is_exact() {
		let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb([0, 0, 0])));
		let bytes = apply_color(
			&png(&image),
			"#ffffff",
			&CompositeOptions::with_opacity(1.0),
			&EncodeOptions {
				format: OutputFormat::Png,
				..EncodeOptions::default()
			},
		)
		.unwrap();
		let output = decode(&bytes).unwrap().to_rgb8();
		assert!(output.pixels().all(|p| *p == Rgb([255, 255, 255])));
	}

	#[test]
	fn complementary_hex() {
		let hex = complementary_colors("#FF0000", 3).unwrap();
		assert_eq!(hex.len(), 3);
		assert_eq!(hex[1], "#00ffff");
		assert!(complementary_colors("#ff0000", 0).unwrap().is_empty());
	}

	#[test]
	fn suggestions_hex() {
		let similar = similar_colors("#6496fa").unwrap();
		assert_eq!(similar.len(), 6);
		assert_eq!(similar[0].hex(), "#6496fa");

		assert_eq!(
			shade_suggestions("0a64fa").unwrap(),
			["#f59b05", "#0a9bfa", "#f564fa", "#328cff", "#003cd2"]
		);
	}

	#[test]
	fn brand_matches_hex() {
		let matches = brand_matches("#6496FA").unwrap();
		assert_eq!(matches.len(), Brand::ALL.len());
		assert_eq!(matches[0].code, "SW-1500");
		assert_eq!(matches[1].code, "BM-500");
		assert!(matches.iter().all(|m| m.hex() == "#6496fa"));
		assert!(matches[2].name.starts_with("Premium Plus "));
	}

	#[test]
	fn palettes_are_listed() {
		let palettes = suggested_palettes();
		assert_eq!(palettes.len(), 3);
		assert!(palettes.iter().all(|p| p.colors.len() == 4));
		assert_eq!(palettes[0].colors[0].hex(), "#f5f5f5");
	}
}

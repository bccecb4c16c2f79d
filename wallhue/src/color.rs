//! Conversions between hex strings, sRGB, and HSV, plus RGB color distance

use crate::{Error, Result};
use palette::{encoding, rgb::channels::Argb, FromColor, Hsv, Srgb};

/// An 8-bit sRGB color
pub type Color = Srgb<u8>;

/// Parse a hex color of the form `#rrggbb` or `rrggbb` (case insensitive).
///
/// # Errors
/// Returns [`Error::Format`] if the string, after removing one optional leading `#`,
/// is not exactly six hexadecimal digits.
pub fn hex_to_rgb(hex: &str) -> Result<Color> {
	let digits = hex.strip_prefix('#').unwrap_or(hex);
	if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
		return Err(Error::Format(hex.to_owned()));
	}

	let packed = u32::from_str_radix(digits, 16).map_err(|_| Error::Format(hex.to_owned()))?;
	Ok(Color::from_u32::<Argb>(packed))
}

/// Format a color as a lowercase `#rrggbb` string
#[must_use]
pub fn rgb_to_hex(color: Color) -> String {
	format!("#{color:x}")
}

/// Euclidean distance between two colors in RGB space.
///
/// This is not perceptually uniform.
#[must_use]
pub fn color_distance(a: Color, b: Color) -> f32 {
	#[allow(clippy::cast_precision_loss)]
	let squared = squared_distance(a, b) as f32;
	squared.sqrt()
}

/// Squared Euclidean distance in RGB space, exact in integer arithmetic
#[must_use]
pub(crate) fn squared_distance(a: Color, b: Color) -> u32 {
	let dr = i32::from(a.red) - i32::from(b.red);
	let dg = i32::from(a.green) - i32::from(b.green);
	let db = i32::from(a.blue) - i32::from(b.blue);
	// at most 3 * 255^2
	dr.unsigned_abs().pow(2) + dg.unsigned_abs().pow(2) + db.unsigned_abs().pow(2)
}

/// Convert a color to `(hue, saturation, value)`, each in `0.0..=1.0`.
///
/// Hue is measured in turns, so `0.5` is 180 degrees. Grays have a hue of `0.0`.
#[must_use]
pub fn rgb_to_hsv(color: Color) -> (f32, f32, f32) {
	let hsv: Hsv<encoding::Srgb, f32> = Hsv::from_color(color.into_format::<f32>());
	let hue = hsv.hue.into_positive_degrees() / 360.0;
	// into_positive_degrees may return exactly 360.0 due to rounding
	let hue = if hue >= 1.0 { 0.0 } else { hue };
	(hue, hsv.saturation, hsv.value)
}

/// Convert `(hue, saturation, value)` in `0.0..=1.0` back to an 8-bit color,
/// rounding each channel to the nearest integer.
///
/// Hue wraps around, so `1.25` is the same as `0.25`.
#[must_use]
pub fn hsv_to_rgb(hue: f32, saturation: f32, value: f32) -> Color {
	let hsv = Hsv::<encoding::Srgb, f32>::new(hue.rem_euclid(1.0) * 360.0, saturation, value);
	let rgb: Srgb<f32> = Srgb::from_color(hsv);
	Color::new(to_channel(rgb.red), to_channel(rgb.green), to_channel(rgb.blue))
}

/// Scale a `0.0..=1.0` component to the nearest `0..=255` value
fn to_channel(component: f32) -> u8 {
	// clamped into u8 range before the cast
	#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
	{
		(component * 255.0).round().clamp(0.0, 255.0) as u8
	}
}

//! Color suggestions derived from a single base color

use crate::{
	color::{hsv_to_rgb, rgb_to_hex, rgb_to_hsv, Color},
	naming::{name, NamedColor},
};

/// The default number of complementary colors
pub const DEFAULT_COMPLEMENTARY: usize = 3;

/// `n` hue-rotated variants of `base`, evenly spaced around the hue circle.
///
/// The `i`th color (zero based) has its hue rotated by `(i + 1) / (n + 1)` turns
/// while saturation and value stay fixed. Grays have no hue, so all of their
/// variants are the gray itself.
#[must_use]
pub fn complementary(base: Color, n: usize) -> Vec<Color> {
	let (hue, saturation, value) = rgb_to_hsv(base);

	#[allow(clippy::cast_precision_loss)]
	let steps = (n + 1) as f32;

	(1..=n)
		.map(|i| {
			#[allow(clippy::cast_precision_loss)]
			let offset = i as f32 / steps;
			hsv_to_rgb((hue + offset).rem_euclid(1.0), saturation, value)
		})
		.collect()
}

/// Add `amount` to every channel, saturating at `0` and `255`
fn shift(color: Color, amount: i16) -> Color {
	let channel = |c: u8| {
		#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
		{
			(i16::from(c) + amount).clamp(0, 255) as u8
		}
	};
	Color::new(channel(color.red), channel(color.green), channel(color.blue))
}

/// Multiply a channel by 1.1, rounding down and saturating at `255`
fn boost(c: u8) -> u8 {
	u8::try_from(u16::from(c) * 11 / 10).unwrap_or(u8::MAX)
}

/// Six colors close to `base`, each with a display name.
///
/// In order: `base` itself, darker and lighter by 20 per channel,
/// then red, green, and blue each boosted by 10%.
#[must_use]
pub fn similar(base: Color) -> Vec<NamedColor> {
	let base_name = name(base);
	let Color { red, green, blue, .. } = base;

	let variants = [
		(None, base),
		(Some("Deep"), shift(base, -20)),
		(Some("Light"), shift(base, 20)),
		(Some("Vibrant"), Color::new(boost(red), green, blue)),
		(Some("Fresh"), Color::new(red, boost(green), blue)),
		(Some("Cool"), Color::new(red, green, boost(blue))),
	];

	variants
		.into_iter()
		.map(|(prefix, color)| NamedColor {
			color,
			name: prefix.map_or_else(|| base_name.clone(), |prefix| format!("{prefix} {base_name}")),
		})
		.collect()
}

/// Five contrasting shades of `base`.
///
/// In order: the full inversion, `base` with only green inverted,
/// `base` with only red inverted, then lighter and darker by 40 per channel.
#[must_use]
pub fn shades(base: Color) -> Vec<Color> {
	let Color { red, green, blue, .. } = base;
	vec![
		Color::new(!red, !green, !blue),
		Color::new(red, !green, blue),
		Color::new(!red, green, blue),
		shift(base, 40),
		shift(base, -40),
	]
}

/// A color with a fixed, hand-picked name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CuratedColor {
	/// The display name
	pub name: &'static str,
	/// The color
	pub color: Color,
}

impl CuratedColor {
	/// The color as a lowercase `#rrggbb` string
	#[must_use]
	pub fn hex(&self) -> String {
		rgb_to_hex(self.color)
	}
}

/// A named set of colors that work well together
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestedPalette {
	/// The palette's title
	pub name: &'static str,
	/// A one sentence description of the mood
	pub description: &'static str,
	/// The palette's colors
	pub colors: [CuratedColor; 4],
}

/// Shorthand for a table entry
const fn curated(name: &'static str, hex: u32) -> CuratedColor {
	#[allow(clippy::cast_possible_truncation)]
	let color = Color::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8);
	CuratedColor { name, color }
}

/// Hand-picked palettes offered alongside every extracted palette
pub static SUGGESTED_PALETTES: [SuggestedPalette; 3] = [
	SuggestedPalette {
		name: "Modern Neutrals",
		description: "Clean, contemporary colors that create a calm atmosphere",
		colors: [
			curated("Off White", 0xf5f5f5),
			curated("Soft Gray", 0xe0e0e0),
			curated("Warm Beige", 0xe6d2b5),
			curated("Light Sage", 0xd4e2d4),
		],
	},
	SuggestedPalette {
		name: "Bold Statements",
		description: "Expressive colors that energize your space",
		colors: [
			curated("Vibrant Teal", 0x009688),
			curated("Deep Navy", 0x1a237e),
			curated("Terracotta", 0xbf360c),
			curated("Emerald", 0x2e7d32),
		],
	},
	SuggestedPalette {
		name: "Pastel Dreams",
		description: "Soft, soothing tones for a relaxing environment",
		colors: [
			curated("Powder Blue", 0xbbdefb),
			curated("Blush Pink", 0xf8bbd0),
			curated("Mint Green", 0xc8e6c9),
			curated("Lavender", 0xd1c4e9),
		],
	},
];

/// Look up one of the [`SUGGESTED_PALETTES`] by name, ignoring ASCII case
#[must_use]
pub fn suggested_palette(name: &str) -> Option<&'static SuggestedPalette> {
	SUGGESTED_PALETTES
		.iter()
		.find(|palette| palette.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::color::{hex_to_rgb, rgb_to_hex};
	use approx::assert_abs_diff_eq;

	/// Hue difference in turns, in `0.0..1.0`
	fn hue_offset(from: Color, to: Color) -> f32 {
		(rgb_to_hsv(to).0 - rgb_to_hsv(from).0).rem_euclid(1.0)
	}

	#[test]
	fn complementary_hue_spacing() {
		for hex in ["#ff0000", "#4a6da7", "#f50057", "#00bcd4"] {
			let base = hex_to_rgb(hex).unwrap();
			let colors = complementary(base, 3);
			assert_eq!(colors.len(), 3);
			for (color, expected) in colors.into_iter().zip([0.25, 0.5, 0.75]) {
				assert_abs_diff_eq!(hue_offset(base, color), expected, epsilon = 0.01);
			}
		}
	}

	#[test]
	fn complementary_red() {
		let colors = complementary(Color::new(255, 0, 0), 3);
		assert_eq!(rgb_to_hex(colors[1]), "#00ffff");

		// half-intensity channels may round either way
		for (color, [r, g, b]) in colors.into_iter().zip([[128, 255, 0], [0, 255, 255], [128, 0, 255]]) {
			assert!(color.red.abs_diff(r) <= 1, "{color:?}");
			assert!(color.green.abs_diff(g) <= 1, "{color:?}");
			assert!(color.blue.abs_diff(b) <= 1, "{color:?}");
		}
	}

	#[test]
	fn complementary_keeps_saturation_and_value() {
		let base = Color::new(200, 120, 40);
		let (_, s, v) = rgb_to_hsv(base);
		for color in complementary(base, 5) {
			let (_, cs, cv) = rgb_to_hsv(color);
			assert_abs_diff_eq!(cs, s, epsilon = 0.01);
			assert_abs_diff_eq!(cv, v, epsilon = 0.01);
		}
	}

	#[test]
	fn complementary_count() {
		let base = Color::new(10, 20, 30);
		for n in 0..8 {
			assert_eq!(complementary(base, n).len(), n);
		}
	}

	#[test]
	fn complementary_of_gray_is_gray() {
		let gray = Color::new(128, 128, 128);
		assert!(complementary(gray, 4).into_iter().all(|c| c == gray));
	}

	#[test]
	fn complementary_is_deterministic() {
		let base = Color::new(12, 200, 99);
		assert_eq!(complementary(base, 6), complementary(base, 6));
	}

	#[test]
	fn similar_variants() {
		let base = Color::new(100, 150, 250);
		let similar = similar(base);
		let colors = similar.iter().map(|c| c.color).collect::<Vec<_>>();
		assert_eq!(
			colors,
			vec![
				base,
				Color::new(80, 130, 230),
				Color::new(120, 170, 255),
				Color::new(110, 150, 250),
				Color::new(100, 165, 250),
				Color::new(100, 150, 255),
			]
		);
	}

	#[test]
	fn similar_names() {
		let base = Color::new(100, 150, 250);
		let base_name = name(base);
		let names = similar(base).into_iter().map(|c| c.name).collect::<Vec<_>>();
		assert_eq!(names[0], base_name);
		for (name, prefix) in names[1..].iter().zip(["Deep", "Light", "Vibrant", "Fresh", "Cool"]) {
			assert_eq!(name, &format!("{prefix} {base_name}"));
		}
	}

	#[test]
	fn similar_saturates() {
		let colors = similar(Color::new(5, 240, 233))
			.into_iter()
			.map(|c| c.color)
			.collect::<Vec<_>>();
		assert_eq!(colors[1], Color::new(0, 220, 213));
		assert_eq!(colors[2], Color::new(25, 255, 253));
		assert_eq!(colors[3], Color::new(5, 240, 233));
		assert_eq!(colors[4], Color::new(5, 255, 233));
		assert_eq!(colors[5], Color::new(5, 240, 255));
	}

	#[test]
	fn suggested_palettes() {
		let names = SUGGESTED_PALETTES.iter().map(|p| p.name).collect::<Vec<_>>();
		assert_eq!(names, ["Modern Neutrals", "Bold Statements", "Pastel Dreams"]);

		let bold = &SUGGESTED_PALETTES[1];
		assert_eq!(bold.colors[0].name, "Vibrant Teal");
		assert_eq!(bold.colors[0].color, Color::new(0x00, 0x96, 0x88));
		assert_eq!(
			bold.colors.map(|c| c.hex()),
			["#009688", "#1a237e", "#bf360c", "#2e7d32"]
		);
		assert_eq!(SUGGESTED_PALETTES[2].colors[3].hex(), "#d1c4e9");
	}

	#[test]
	fn suggested_palette_lookup() {
		assert_eq!(suggested_palette("pastel dreams"), Some(&SUGGESTED_PALETTES[2]));
		assert_eq!(suggested_palette("Modern Neutrals"), Some(&SUGGESTED_PALETTES[0]));
		assert_eq!(suggested_palette("Loud Clashes"), None);
	}

	#[test]
	fn shade_variants() {
		assert_eq!(
			shades(Color::new(10, 100, 250)),
			vec![
				Color::new(245, 155, 5),
				Color::new(10, 155, 250),
				Color::new(245, 100, 250),
				Color::new(50, 140, 255),
				Color::new(0, 60, 210),
			]
		);
	}
}

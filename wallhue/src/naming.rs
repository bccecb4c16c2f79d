//! Human readable color names.
//!
//! A name is built from a coarse brightness/hue bucket ("Warm", "Cool", ...)
//! and the nearest entry of a fixed reference table, e.g. "Warm Tomato".
//! This is a labeling heuristic, not a perceptual color naming model.

use crate::color::{rgb_to_hex, squared_distance, Color};
use std::fmt::{self, Display};

/// A color paired with its generated display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedColor {
	/// The color
	pub color: Color,
	/// Its display name, not necessarily unique
	pub name: String,
}

impl NamedColor {
	/// Name the given color with [`name`]
	#[must_use]
	pub fn new(color: Color) -> Self {
		Self { color, name: name(color) }
	}

	/// The color as a lowercase `#rrggbb` string
	#[must_use]
	pub fn hex(&self) -> String {
		rgb_to_hex(self.color)
	}
}

/// Coarse brightness/hue classification used as a name qualifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
	/// Every channel above 200
	Light,
	/// Every channel below 60
	Dark,
	/// Bright red dominant with a strong green component
	Warm,
	/// Red dominant
	Rich,
	/// Bright green dominant
	Fresh,
	/// Green dominant
	Natural,
	/// Bright blue dominant
	Cool,
	/// Blue dominant
	Deep,
	/// Near-neutral and bright
	Soft,
	/// Near-neutral
	Classic,
	/// Anything else
	Elegant,
}

impl Bucket {
	/// Classify a color. The rules are checked in order and the first match wins.
	#[must_use]
	pub fn of(color: Color) -> Self {
		let (r, g, b) = (color.red, color.green, color.blue);

		if r > 200 && g > 200 && b > 200 {
			Bucket::Light
		} else if r < 60 && g < 60 && b < 60 {
			Bucket::Dark
		} else if r > g && r > b {
			if r > 200 && g > 150 {
				Bucket::Warm
			} else {
				Bucket::Rich
			}
		} else if g > r && g > b {
			if g > 200 {
				Bucket::Fresh
			} else {
				Bucket::Natural
			}
		} else if b > r && b > g {
			if b > 200 {
				Bucket::Cool
			} else {
				Bucket::Deep
			}
		} else if r.abs_diff(g) <= 30 && g.abs_diff(b) <= 30 && r.abs_diff(b) <= 30 {
			if r > 180 {
				Bucket::Soft
			} else {
				Bucket::Classic
			}
		} else {
			Bucket::Elegant
		}
	}

	/// The qualifier as it appears in a name
	#[must_use]
	pub const fn as_str(self) -> &'static str {
		match self {
			Bucket::Light => "Light",
			Bucket::Dark => "Dark",
			Bucket::Warm => "Warm",
			Bucket::Rich => "Rich",
			Bucket::Fresh => "Fresh",
			Bucket::Natural => "Natural",
			Bucket::Cool => "Cool",
			Bucket::Deep => "Deep",
			Bucket::Soft => "Soft",
			Bucket::Classic => "Classic",
			Bucket::Elegant => "Elegant",
		}
	}
}

impl Display for Bucket {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Reference colors used for nearest-neighbor naming
pub static NAMED_COLORS: [(&str, Color); 98] = [
	// neutrals
	("Black", Color::new(0x00, 0x00, 0x00)),
	("White", Color::new(0xff, 0xff, 0xff)),
	("Gray", Color::new(0x80, 0x80, 0x80)),
	("Silver", Color::new(0xc0, 0xc0, 0xc0)),
	("Dim Gray", Color::new(0x69, 0x69, 0x69)),
	("Dark Gray", Color::new(0xa9, 0xa9, 0xa9)),
	("Light Gray", Color::new(0xd3, 0xd3, 0xd3)),
	("Gainsboro", Color::new(0xdc, 0xdc, 0xdc)),
	("White Smoke", Color::new(0xf5, 0xf5, 0xf5)),
	("Slate Gray", Color::new(0x70, 0x80, 0x90)),
	("Dark Slate Gray", Color::new(0x2f, 0x4f, 0x4f)),
	// reds
	("Red", Color::new(0xff, 0x00, 0x00)),
	("Dark Red", Color::new(0x8b, 0x00, 0x00)),
	("Maroon", Color::new(0x80, 0x00, 0x00)),
	("Firebrick", Color::new(0xb2, 0x22, 0x22)),
	("Crimson", Color::new(0xdc, 0x14, 0x3c)),
	("Indian Red", Color::new(0xcd, 0x5c, 0x5c)),
	("Light Coral", Color::new(0xf0, 0x80, 0x80)),
	("Salmon", Color::new(0xfa, 0x80, 0x72)),
	("Dark Salmon", Color::new(0xe9, 0x96, 0x7a)),
	("Light Salmon", Color::new(0xff, 0xa0, 0x7a)),
	("Tomato", Color::new(0xff, 0x63, 0x47)),
	("Coral", Color::new(0xff, 0x7f, 0x50)),
	("Orange Red", Color::new(0xff, 0x45, 0x00)),
	// oranges and yellows
	("Orange", Color::new(0xff, 0xa5, 0x00)),
	("Dark Orange", Color::new(0xff, 0x8c, 0x00)),
	("Gold", Color::new(0xff, 0xd7, 0x00)),
	("Yellow", Color::new(0xff, 0xff, 0x00)),
	("Light Yellow", Color::new(0xff, 0xff, 0xe0)),
	("Lemon Chiffon", Color::new(0xff, 0xfa, 0xcd)),
	("Khaki", Color::new(0xf0, 0xe6, 0x8c)),
	("Dark Khaki", Color::new(0xbd, 0xb7, 0x6b)),
	("Goldenrod", Color::new(0xda, 0xa5, 0x20)),
	// browns and creams
	("Brown", Color::new(0xa5, 0x2a, 0x2a)),
	("Saddle Brown", Color::new(0x8b, 0x45, 0x13)),
	("Sienna", Color::new(0xa0, 0x52, 0x2d)),
	("Chocolate", Color::new(0xd2, 0x69, 0x1e)),
	("Peru", Color::new(0xcd, 0x85, 0x3f)),
	("Sandy Brown", Color::new(0xf4, 0xa4, 0x60)),
	("Burlywood", Color::new(0xde, 0xb8, 0x87)),
	("Tan", Color::new(0xd2, 0xb4, 0x8c)),
	("Rosy Brown", Color::new(0xbc, 0x8f, 0x8f)),
	("Wheat", Color::new(0xf5, 0xde, 0xb3)),
	("Bisque", Color::new(0xff, 0xe4, 0xc4)),
	("Moccasin", Color::new(0xff, 0xe4, 0xb5)),
	("Antique White", Color::new(0xfa, 0xeb, 0xd7)),
	("Linen", Color::new(0xfa, 0xf0, 0xe6)),
	("Old Lace", Color::new(0xfd, 0xf5, 0xe6)),
	("Beige", Color::new(0xf5, 0xf5, 0xdc)),
	("Ivory", Color::new(0xff, 0xff, 0xf0)),
	("Snow", Color::new(0xff, 0xfa, 0xfa)),
	// greens
	("Lime", Color::new(0x00, 0xff, 0x00)),
	("Lime Green", Color::new(0x32, 0xcd, 0x32)),
	("Green", Color::new(0x00, 0x80, 0x00)),
	("Dark Green", Color::new(0x00, 0x64, 0x00)),
	("Forest Green", Color::new(0x22, 0x8b, 0x22)),
	("Sea Green", Color::new(0x2e, 0x8b, 0x57)),
	("Light Green", Color::new(0x90, 0xee, 0x90)),
	("Pale Green", Color::new(0x98, 0xfb, 0x98)),
	("Olive", Color::new(0x80, 0x80, 0x00)),
	("Yellow Green", Color::new(0x9a, 0xcd, 0x32)),
	("Chartreuse", Color::new(0x7f, 0xff, 0x00)),
	("Honeydew", Color::new(0xf0, 0xff, 0xf0)),
	("Mint Cream", Color::new(0xf5, 0xff, 0xfa)),
	// cyans
	("Teal", Color::new(0x00, 0x80, 0x80)),
	("Cyan", Color::new(0x00, 0xff, 0xff)),
	("Light Cyan", Color::new(0xe0, 0xff, 0xff)),
	("Turquoise", Color::new(0x40, 0xe0, 0xd0)),
	("Aquamarine", Color::new(0x7f, 0xff, 0xd4)),
	("Cadet Blue", Color::new(0x5f, 0x9e, 0xa0)),
	("Azure", Color::new(0xf0, 0xff, 0xff)),
	// blues
	("Blue", Color::new(0x00, 0x00, 0xff)),
	("Navy", Color::new(0x00, 0x00, 0x80)),
	("Dark Blue", Color::new(0x00, 0x00, 0x8b)),
	("Midnight Blue", Color::new(0x19, 0x19, 0x70)),
	("Royal Blue", Color::new(0x41, 0x69, 0xe1)),
	("Steel Blue", Color::new(0x46, 0x82, 0xb4)),
	("Light Steel Blue", Color::new(0xb0, 0xc4, 0xde)),
	("Sky Blue", Color::new(0x87, 0xce, 0xeb)),
	("Light Blue", Color::new(0xad, 0xd8, 0xe6)),
	("Cornflower Blue", Color::new(0x64, 0x95, 0xed)),
	("Dodger Blue", Color::new(0x1e, 0x90, 0xff)),
	("Alice Blue", Color::new(0xf0, 0xf8, 0xff)),
	("Ghost White", Color::new(0xf8, 0xf8, 0xff)),
	// purples and pinks
	("Purple", Color::new(0x80, 0x00, 0x80)),
	("Indigo", Color::new(0x4b, 0x00, 0x82)),
	("Dark Violet", Color::new(0x94, 0x00, 0xd3)),
	("Violet", Color::new(0xee, 0x82, 0xee)),
	("Orchid", Color::new(0xda, 0x70, 0xd6)),
	("Plum", Color::new(0xdd, 0xa0, 0xdd)),
	("Thistle", Color::new(0xd8, 0xbf, 0xd8)),
	("Lavender", Color::new(0xe6, 0xe6, 0xfa)),
	("Lavender Blush", Color::new(0xff, 0xf0, 0xf5)),
	("Magenta", Color::new(0xff, 0x00, 0xff)),
	("Slate Blue", Color::new(0x6a, 0x5a, 0xcd)),
	("Pink", Color::new(0xff, 0xc0, 0xcb)),
	("Hot Pink", Color::new(0xff, 0x69, 0xb4)),
	("Misty Rose", Color::new(0xff, 0xe4, 0xe1)),
];

/// Generate a display name for a color using the built-in reference table
#[must_use]
pub fn name(color: Color) -> String {
	name_with_table(color, &NAMED_COLORS)
}

/// Generate a display name for a color using the given reference table.
///
/// Reference names that already say "Light" or "Dark" are returned verbatim.
/// An empty table yields `"{bucket} Tone #rrggbb"`.
#[must_use]
pub fn name_with_table(color: Color, table: &[(&str, Color)]) -> String {
	let bucket = Bucket::of(color);

	match nearest(color, table) {
		Some(reference) if reference.contains("Light") || reference.contains("Dark") => reference.to_owned(),
		Some(reference) => format!("{bucket} {reference}"),
		None => format!("{bucket} Tone {}", rgb_to_hex(color)),
	}
}

/// The name of the closest table entry. The first of several equally close entries wins.
fn nearest<'a>(color: Color, table: &[(&'a str, Color)]) -> Option<&'a str> {
	let mut best = None;
	let mut best_dist = u32::MAX;
	for &(name, reference) in table {
		let dist = squared_distance(color, reference);
		if dist < best_dist {
			best_dist = dist;
			best = Some(name);
		}
	}
	best
}

/// Name every color of a palette
#[must_use]
pub fn name_palette(colors: &[Color]) -> Vec<NamedColor> {
	colors.iter().map(|&color| NamedColor::new(color)).collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn white_is_light() {
		let name = name(Color::new(255, 255, 255));
		assert!(name.starts_with("Light"), "{name}");
		assert_eq!(name, "Light White");
	}

	#[test]
	fn black_is_dark() {
		let name = name(Color::new(0, 0, 0));
		assert!(name.starts_with("Dark"), "{name}");
		assert_eq!(name, "Dark Black");
	}

	#[test]
	fn bucket_rules() {
		let cases = [
			((201, 201, 201), Bucket::Light),
			((200, 255, 255), Bucket::Elegant),
			((59, 59, 59), Bucket::Dark),
			((60, 10, 10), Bucket::Rich),
			((220, 160, 10), Bucket::Warm),
			((220, 150, 10), Bucket::Rich),
			((10, 220, 10), Bucket::Fresh),
			((10, 120, 10), Bucket::Natural),
			((10, 10, 220), Bucket::Cool),
			((10, 10, 120), Bucket::Deep),
			((190, 190, 170), Bucket::Soft),
			((100, 100, 80), Bucket::Classic),
			((100, 100, 50), Bucket::Elegant),
			((50, 150, 150), Bucket::Elegant),
		];

		for ((r, g, b), expected) in cases {
			assert_eq!(Bucket::of(Color::new(r, g, b)), expected, "({r}, {g}, {b})");
		}
	}

	#[test]
	fn qualifier_and_reference() {
		assert_eq!(name(Color::new(0xff, 0x63, 0x47)), "Rich Tomato");
		assert_eq!(name(Color::new(0x41, 0x69, 0xe1)), "Cool Royal Blue");
	}

	#[test]
	fn light_and_dark_references_are_verbatim() {
		assert_eq!(name(Color::new(0x8b, 0x00, 0x00)), "Dark Red");
		assert_eq!(name(Color::new(0xe0, 0xff, 0xff)), "Light Cyan");
	}

	#[test]
	fn first_equally_close_entry_wins() {
		let table = [
			("First", Color::new(10, 0, 0)),
			("Second", Color::new(0, 10, 0)),
		];
		assert_eq!(name_with_table(Color::new(0, 0, 0), &table), "Dark First");

		let table = [table[1], table[0]];
		assert_eq!(name_with_table(Color::new(0, 0, 0), &table), "Dark Second");
	}

	#[test]
	fn empty_table_falls_back() {
		assert_eq!(name_with_table(Color::new(0x12, 0x34, 0x56), &[]), "Deep Tone #123456");
	}

	#[test]
	fn table_is_well_formed() {
		let mut names = NAMED_COLORS.iter().map(|(name, _)| *name).collect::<Vec<_>>();
		names.sort_unstable();
		names.dedup();
		assert_eq!(names.len(), NAMED_COLORS.len());
	}

	#[test]
	fn named_palette() {
		let named = name_palette(&[Color::new(255, 255, 255), Color::new(0x12, 0x34, 0x56)]);
		assert_eq!(named.len(), 2);
		assert_eq!(named[0].name, "Light White");
		assert_eq!(named[1].hex(), "#123456");
	}
}

//! Paint brand matches for a color.
//!
//! Each [`Brand`] derives a product code from the color's channels
//! and offers a fixed list of [`Finish`]es. The codes are stable for a
//! given color but are not real catalogue numbers.

use crate::{
	color::{rgb_to_hex, Color},
	naming::name,
};
use std::fmt::{self, Display};

/// Paint sheens a brand may offer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finish {
	/// No sheen
	Flat,
	/// Almost no sheen
	Matte,
	/// Low sheen
	Eggshell,
	/// Between eggshell and satin
	Pearl,
	/// Medium sheen
	Satin,
	/// Noticeably shiny
	SemiGloss,
	/// Shiniest
	HighGloss,
}

impl Finish {
	/// The display name, for example `"Semi-Gloss"`
	#[must_use]
	pub const fn name(self) -> &'static str {
		match self {
			Finish::Flat => "Flat",
			Finish::Matte => "Matte",
			Finish::Eggshell => "Eggshell",
			Finish::Pearl => "Pearl",
			Finish::Satin => "Satin",
			Finish::SemiGloss => "Semi-Gloss",
			Finish::HighGloss => "High-Gloss",
		}
	}
}

impl Display for Finish {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Paint brands that colors are matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Brand {
	/// Sherwin-Williams
	SherwinWilliams,
	/// Benjamin Moore
	BenjaminMoore,
	/// Behr
	Behr,
	/// Valspar
	Valspar,
	/// PPG
	Ppg,
}

impl Brand {
	/// Every brand, in the order matches are reported
	pub const ALL: [Brand; 5] = [
		Brand::SherwinWilliams,
		Brand::BenjaminMoore,
		Brand::Behr,
		Brand::Valspar,
		Brand::Ppg,
	];

	/// The brand's display name
	#[must_use]
	pub const fn name(self) -> &'static str {
		match self {
			Brand::SherwinWilliams => "Sherwin-Williams",
			Brand::BenjaminMoore => "Benjamin Moore",
			Brand::Behr => "Behr",
			Brand::Valspar => "Valspar",
			Brand::Ppg => "PPG",
		}
	}

	/// The word put in front of a generated color name
	const fn prefix(self) -> &'static str {
		match self {
			Brand::SherwinWilliams => "SW",
			Brand::BenjaminMoore => "BM",
			Brand::Behr => "Premium Plus",
			Brand::Valspar => "Signature",
			Brand::Ppg => "Timeless",
		}
	}

	/// The finishes the brand offers, from least to most sheen
	#[must_use]
	pub const fn finishes(self) -> &'static [Finish] {
		use Finish::{Eggshell, Flat, HighGloss, Matte, Pearl, Satin, SemiGloss};
		match self {
			Brand::SherwinWilliams => &[Matte, Eggshell, Satin, SemiGloss, HighGloss],
			Brand::BenjaminMoore => &[Flat, Matte, Eggshell, Pearl, SemiGloss, HighGloss],
			Brand::Behr | Brand::Valspar => &[Flat, Eggshell, Satin, SemiGloss],
			Brand::Ppg => &[Flat, Eggshell, Satin, SemiGloss, HighGloss],
		}
	}

	/// The brand's product code for `color`
	#[must_use]
	pub fn code(self, color: Color) -> String {
		let Color { red, green, blue, .. } = color;
		let (r, g, b) = (u32::from(red), u32::from(green), u32::from(blue));
		let sum = r + g + b;
		match self {
			Brand::SherwinWilliams => format!("SW-{}", 1000 + sum % 9000),
			Brand::BenjaminMoore => format!("BM-{sum}"),
			Brand::Behr => format!("BHR{}", r * g * b % 900 + 100),
			Brand::Valspar => format!("VLP-{}", sum / 3),
			Brand::Ppg => format!("PPG{}", r * b % 999 + 1000),
		}
	}
}

impl Display for Brand {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// A color as sold by one brand
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandMatch {
	/// The brand
	pub brand: Brand,
	/// The brand's name for the color
	pub name: String,
	/// The brand's product code
	pub code: String,
	/// The matched color
	pub color: Color,
	/// The finishes the color is available in
	pub finishes: &'static [Finish],
}

impl BrandMatch {
	/// The color as a lowercase `#rrggbb` string
	#[must_use]
	pub fn hex(&self) -> String {
		rgb_to_hex(self.color)
	}
}

/// Match `color` against every brand in [`Brand::ALL`]
#[must_use]
pub fn matches(color: Color) -> Vec<BrandMatch> {
	let base_name = name(color);
	Brand::ALL
		.into_iter()
		.map(|brand| BrandMatch {
			brand,
			name: format!("{} {base_name}", brand.prefix()),
			code: brand.code(color),
			color,
			finishes: brand.finishes(),
		})
		.collect()
}

//! Palette extraction by greedy farthest-point sampling.
//!
//! The image is shrunk to a small thumbnail, a random subset of its pixels is
//! deduplicated, and then colors are picked one at a time so that each new color
//! is as far as possible (in RGB) from every color picked before it.
//! This is a cheap stand-in for clustering: it favors diverse colors over
//! frequent ones.

use crate::{
	color::{rgb_to_hex, squared_distance, Color},
	Error, Result,
};
use image::{imageops::FilterType, DynamicImage, GenericImageView};
use rand::{seq::index, Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::collections::HashSet;

/// Paint colors appended to every extracted palette.
///
/// These are not derived from the image; they give the user a few
/// safe choices regardless of what the photo contains.
pub static DESIGNER_COLORS: [Color; 15] = [
	Color::new(0xf5, 0xf5, 0xdc), // Beige
	Color::new(0xe0, 0xff, 0xff), // Light Cyan
	Color::new(0xff, 0xf0, 0xf5), // Lavender Blush
	Color::new(0xe6, 0xe6, 0xfa), // Lavender
	Color::new(0xf0, 0xff, 0xf0), // Honeydew
	Color::new(0xf0, 0xf8, 0xff), // Alice Blue
	Color::new(0xfd, 0xf5, 0xe6), // Old Lace
	Color::new(0xf8, 0xf8, 0xff), // Ghost White
	Color::new(0xff, 0xfa, 0xfa), // Snow
	Color::new(0xf0, 0xff, 0xff), // Azure
	Color::new(0x70, 0x80, 0x90), // Slate Gray
	Color::new(0xb0, 0xc4, 0xde), // Light Steel Blue
	Color::new(0xe9, 0x96, 0x7a), // Dark Salmon
	Color::new(0xff, 0xe4, 0xe1), // Misty Rose
	Color::new(0xff, 0xe4, 0xb5), // Moccasin
];

/// Parameters for [`from_image`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteOptions {
	/// The (maximum) number of colors to extract from the image
	pub num_colors: usize,
	/// Width and height of the thumbnail the image is shrunk to before sampling
	pub thumbnail_size: u32,
	/// The maximum number of thumbnail pixels to sample
	pub max_samples: usize,
	/// Seed for the random number generator used for sampling and the first pick
	pub seed: u64,
}

impl Default for PaletteOptions {
	fn default() -> Self {
		Self {
			num_colors: 5,
			thumbnail_size: 100,
			max_samples: 1000,
			seed: 0,
		}
	}
}

/// The result of palette extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
	/// Colors chosen from the image, in selection order
	pub extracted: Vec<Color>,
}

impl Palette {
	/// The fixed designer colors that follow the extracted colors
	#[must_use]
	pub fn designer(&self) -> &'static [Color] {
		&DESIGNER_COLORS
	}

	/// All colors: the extracted colors followed by the designer colors
	pub fn colors(&self) -> impl Iterator<Item = Color> + '_ {
		self.extracted.iter().copied().chain(self.designer().iter().copied())
	}

	/// All colors as lowercase `#rrggbb` strings
	#[must_use]
	pub fn to_hex(&self) -> Vec<String> {
		self.colors().map(rgb_to_hex).collect()
	}
}

/// Extract a palette from an image.
///
/// # Errors
/// Returns [`Error::Dimension`] if the image has no pixels.
pub fn from_image(image: &DynamicImage, options: &PaletteOptions) -> Result<Palette> {
	let (width, height) = image.dimensions();
	if width == 0 || height == 0 {
		return Err(Error::Dimension { width, height });
	}

	let size = options.thumbnail_size.max(1);
	let thumbnail = image::imageops::resize(&image.to_rgb8(), size, size, FilterType::Nearest);
	let pixels = thumbnail
		.pixels()
		.map(|p| Color::new(p[0], p[1], p[2]))
		.collect::<Vec<_>>();

	let mut rng = Xoshiro256PlusPlus::seed_from_u64(options.seed);
	let candidates = sample_unique(&pixels, options.max_samples, &mut rng);
	log::debug!(
		"sampled {} unique colors from a {size}x{size} thumbnail",
		candidates.len()
	);

	let extracted = farthest_point_sampling(&candidates, options.num_colors, &mut rng);
	Ok(Palette { extracted })
}

/// Randomly sample up to `max_samples` pixels without replacement
/// and remove exact duplicates, keeping the first occurrence of each color.
fn sample_unique(pixels: &[Color], max_samples: usize, rng: &mut impl Rng) -> Vec<Color> {
	let amount = max_samples.min(pixels.len());
	let mut seen = HashSet::with_capacity(amount);

	index::sample(rng, pixels.len(), amount)
		.into_iter()
		.map(|i| pixels[i])
		.filter(|&color| seen.insert(color.into_u32::<palette::rgb::channels::Rgba>()))
		.collect()
}

/// Greedily choose `k` diverse colors from a set of unique `candidates`.
///
/// The first color is picked at random. Each following color is the candidate whose
/// distance to its nearest already chosen color is largest; ties go to the
/// candidate that comes first in `candidates`.
/// If there are no more than `k` candidates, all of them are returned as is.
pub fn farthest_point_sampling(candidates: &[Color], k: usize, rng: &mut impl Rng) -> Vec<Color> {
	if candidates.len() <= k {
		return candidates.to_vec();
	}
	if k == 0 {
		return Vec::new();
	}

	let first = candidates[rng.gen_range(0..candidates.len())];
	let mut selected = Vec::with_capacity(k);
	selected.push(first);

	// Squared distance from each candidate to its closest selected color.
	// Squaring preserves the ordering, so the max-min choice is unchanged.
	let mut nearest = candidates
		.iter()
		.map(|&color| squared_distance(color, first))
		.collect::<Vec<_>>();

	while selected.len() < k {
		let mut best = None;
		let mut best_dist = 0;
		for (i, &dist) in nearest.iter().enumerate() {
			if dist > best_dist {
				best_dist = dist;
				best = Some(i);
			}
		}

		// only reachable if candidates were not unique
		let Some(i) = best else { break };

		let chosen = candidates[i];
		selected.push(chosen);

		for (dist, &color) in nearest.iter_mut().zip(candidates) {
			*dist = u32::min(*dist, squared_distance(color, chosen));
		}
	}

	selected
}

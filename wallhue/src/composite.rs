//! Recolor a photo by blending a solid color over it.
//!
//! Two strategies share one entry point, [`apply`]:
//! - [`Strategy::EdgeAware`] weights the color by an [`EdgeMask`] so that detected
//!   edges keep their original pixels, which preserves shadows and outlines.
//! - [`Strategy::Flat`] lays a uniform translucent layer over the whole image
//!   and then boosts contrast and sharpness slightly.

use crate::{
	color::Color,
	edges::{EdgeMask, EdgeOptions},
	Error, Result,
};
use image::{imageops, DynamicImage, GenericImageView, ImageBuffer, Pixel};

/// The compositing strategy to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
	/// Blend weighted by the dilated, inverted edge map
	#[default]
	EdgeAware,
	/// Uniform translucent layer followed by contrast and sharpening
	Flat,
}

/// Parameters for [`Strategy::Flat`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatOptions {
	/// Alpha of the color layer at full opacity
	pub alpha: u8,
	/// Contrast adjustment passed to [`imageops::contrast`], where `0.0` is no change
	pub contrast: f32,
	/// Sigma of the unsharp mask; `0.0` or less disables sharpening
	pub sharpen_sigma: f32,
	/// Minimum difference before the unsharp mask changes a pixel
	pub sharpen_threshold: i32,
}

impl Default for FlatOptions {
	fn default() -> Self {
		Self {
			alpha: 180,
			contrast: 8.0,
			sharpen_sigma: 1.0,
			sharpen_threshold: 2,
		}
	}
}

/// Parameters for [`apply`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositeOptions {
	/// How strongly to apply the color, clamped to `0.0..=1.0`
	pub opacity: f32,
	/// Which compositing strategy to use
	pub strategy: Strategy,
	/// Edge detection parameters for [`Strategy::EdgeAware`]
	pub edges: EdgeOptions,
	/// Layer parameters for [`Strategy::Flat`]
	pub flat: FlatOptions,
}

impl Default for CompositeOptions {
	fn default() -> Self {
		Self {
			opacity: DEFAULT_OPACITY,
			strategy: Strategy::default(),
			edges: EdgeOptions::default(),
			flat: FlatOptions::default(),
		}
	}
}

impl CompositeOptions {
	/// The default options with the given opacity
	#[must_use]
	pub fn with_opacity(opacity: f32) -> Self {
		Self {
			opacity,
			..Self::default()
		}
	}
}

/// Default opacity for [`CompositeOptions`]
pub const DEFAULT_OPACITY: f32 = 0.5;

/// Blend `color` into a copy of `image`.
///
/// The output is RGBA if the input has an alpha channel and RGB otherwise;
/// alpha values are carried over unchanged. The input is never modified.
///
/// # Errors
/// Returns [`Error::Dimension`] if the image has zero width or height.
pub fn apply(image: &DynamicImage, color: Color, options: &CompositeOptions) -> Result<DynamicImage> {
	let (width, height) = image.dimensions();
	if width == 0 || height == 0 {
		return Err(Error::Dimension { width, height });
	}

	log::debug!(
		"compositing #{color:x} over {width}x{height} image at opacity {} using {:?}",
		options.opacity,
		options.strategy
	);

	Ok(if image.color().has_alpha() {
		DynamicImage::ImageRgba8(composite(image.to_rgba8(), color, options))
	} else {
		DynamicImage::ImageRgb8(composite(image.to_rgb8(), color, options))
	})
}

/// Dispatch on the strategy
fn composite<P>(buffer: ImageBuffer<P, Vec<u8>>, color: Color, options: &CompositeOptions) -> ImageBuffer<P, Vec<u8>>
where
	P: Pixel<Subpixel = u8> + 'static,
{
	let opacity = if options.opacity.is_nan() {
		0.0
	} else {
		options.opacity.clamp(0.0, 1.0)
	};

	match options.strategy {
		Strategy::EdgeAware => edge_aware(buffer, color, opacity, &options.edges),
		Strategy::Flat => flat(buffer, color, opacity, &options.flat),
	}
}

/// The color as floats, one per color channel
fn components(color: Color) -> [f32; 3] {
	[f32::from(color.red), f32::from(color.green), f32::from(color.blue)]
}

/// `output = pixel * (1 - opacity) + color * opacity * weight`, truncated to 8 bits
fn edge_aware<P>(mut buffer: ImageBuffer<P, Vec<u8>>, color: Color, opacity: f32, options: &EdgeOptions) -> ImageBuffer<P, Vec<u8>>
where
	P: Pixel<Subpixel = u8>,
{
	let mask = EdgeMask::new(&buffer, options);
	let channels = usize::from(P::CHANNEL_COUNT);
	let width = buffer.width() as usize;
	let target = components(color);

	for_each_row(&mut buffer, width, channels, mask.weights(), |row, weights| {
		for (pixel, &weight) in row.chunks_exact_mut(channels).zip(weights) {
			// zipping with three components leaves any alpha channel untouched
			for (value, target) in pixel.iter_mut().zip(target) {
				let blended = f32::from(*value) * (1.0 - opacity) + target * opacity * weight;
				#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
				{
					*value = blended.clamp(0.0, 255.0) as u8;
				}
			}
		}
	});

	buffer
}

/// Run `blend` over each row of pixels together with its row of mask weights
#[cfg(feature = "threads")]
fn for_each_row(
	data: &mut [u8],
	width: usize,
	channels: usize,
	weights: &[f32],
	blend: impl Fn(&mut [u8], &[f32]) + Sync,
) {
	use rayon::prelude::*;

	data.par_chunks_exact_mut(width * channels)
		.zip(weights.par_chunks_exact(width))
		.for_each(|(row, weights)| blend(row, weights));
}

/// Run `blend` over each row of pixels together with its row of mask weights
#[cfg(not(feature = "threads"))]
fn for_each_row(
	data: &mut [u8],
	width: usize,
	channels: usize,
	weights: &[f32],
	blend: impl Fn(&mut [u8], &[f32]),
) {
	data.chunks_exact_mut(width * channels)
		.zip(weights.chunks_exact(width))
		.for_each(|(row, weights)| blend(row, weights));
}

/// Uniform layer with alpha `options.alpha * opacity`, then contrast and unsharp mask
fn flat<P>(mut buffer: ImageBuffer<P, Vec<u8>>, color: Color, opacity: f32, options: &FlatOptions) -> ImageBuffer<P, Vec<u8>>
where
	P: Pixel<Subpixel = u8> + 'static,
{
	let alpha = f32::from(options.alpha) / f32::from(u8::MAX) * opacity;
	let channels = usize::from(P::CHANNEL_COUNT);
	let target = components(color);

	for pixel in buffer.chunks_exact_mut(channels) {
		for (value, target) in pixel.iter_mut().zip(target) {
			let blended = f32::from(*value) * (1.0 - alpha) + target * alpha;
			#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
			{
				*value = blended.round().clamp(0.0, 255.0) as u8;
			}
		}
	}

	// contrast and unsharpen also touch the alpha channel
	let original_alpha = (channels == 4).then(|| buffer.chunks_exact(4).map(|p| p[3]).collect::<Vec<_>>());

	let mut output = imageops::contrast(&buffer, options.contrast);
	if options.sharpen_sigma > 0.0 {
		output = imageops::unsharpen(&output, options.sharpen_sigma, options.sharpen_threshold);
	}

	if let Some(alpha) = original_alpha {
		for (pixel, a) in output.chunks_exact_mut(4).zip(alpha) {
			pixel[3] = a;
		}
	}

	output
}

//! Edge detection and the per-pixel blend mask derived from it.
//!
//! The pipeline is: luminance, Gaussian smoothing, Canny-style dual-threshold
//! edge detection, dilation, and finally inversion into weights in `0.0..=1.0`
//! where edges get `0.0` and flat regions get `1.0`.

use image::{GrayImage, ImageBuffer, Luma, Pixel};

/// Largest supported Gaussian kernel size
pub const MAX_BLUR_KERNEL: u32 = 15;

/// Tunable parameters for edge detection.
///
/// The defaults were tuned by eye on photos of painted walls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeOptions {
	/// Size of the Gaussian smoothing kernel, made odd and clamped to `1..=15`
	pub blur_kernel: u32,
	/// Gradient magnitudes at or below this are never edges
	pub low_threshold: f32,
	/// Gradient magnitudes above this are always edges
	pub high_threshold: f32,
	/// Size of the square dilation structuring element
	pub dilation_kernel: u32,
	/// Number of times dilation is applied
	pub dilation_iterations: u32,
}

impl Default for EdgeOptions {
	fn default() -> Self {
		Self {
			blur_kernel: 5,
			low_threshold: 50.0,
			high_threshold: 150.0,
			dilation_kernel: 2,
			dilation_iterations: 1,
		}
	}
}

/// Per-pixel blend weights in `0.0..=1.0`, row-major.
///
/// A weight of `1.0` means "apply the full color" and `0.0` means
/// "keep the original pixel" because it lies on a detected edge.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeMask {
	/// Width in pixels
	width: u32,
	/// Height in pixels
	height: u32,
	/// One weight per pixel
	weights: Vec<f32>,
}

impl EdgeMask {
	/// Detect edges in an 8-bit image and build its blend mask
	#[must_use]
	pub fn new<P>(image: &ImageBuffer<P, Vec<u8>>, options: &EdgeOptions) -> Self
	where
		P: Pixel<Subpixel = u8>,
	{
		let gray = luminance(image);
		let blurred = gaussian_blur(&gray, options.blur_kernel);
		let edges = detect_edges(&blurred, options.low_threshold, options.high_threshold);
		let dilated = dilate(&edges, options.dilation_kernel, options.dilation_iterations);
		Self::from_edges(&dilated)
	}

	/// Invert a binary edge map (`255` on edges) into blend weights
	#[must_use]
	pub fn from_edges(edges: &GrayImage) -> Self {
		let weights = edges
			.as_raw()
			.iter()
			.map(|&v| f32::from(u8::MAX - v) / f32::from(u8::MAX))
			.collect::<Vec<_>>();

		let mask = Self {
			width: edges.width(),
			height: edges.height(),
			weights,
		};

		log::debug!(
			"edge mask covers {} of {} pixels",
			mask.edge_pixels(),
			mask.weights.len()
		);

		mask
	}

	/// Width in pixels
	#[must_use]
	pub const fn width(&self) -> u32 {
		self.width
	}

	/// Height in pixels
	#[must_use]
	pub const fn height(&self) -> u32 {
		self.height
	}

	/// The weight of the pixel at `(x, y)`.
	///
	/// # Panics
	/// Panics if `(x, y)` is out of bounds.
	#[must_use]
	pub fn weight(&self, x: u32, y: u32) -> f32 {
		assert!(x < self.width && y < self.height, "({x}, {y}) is out of bounds");
		self.weights[y as usize * self.width as usize + x as usize]
	}

	/// All weights in row-major order
	#[must_use]
	pub fn weights(&self) -> &[f32] {
		&self.weights
	}

	/// The number of pixels that receive less than the full color
	#[must_use]
	pub fn edge_pixels(&self) -> usize {
		self.weights.iter().filter(|&&w| w < 1.0).count()
	}
}

/// Convert to single channel luminance using the ITU-R BT.601 weights.
///
/// Images with fewer than three channels use their first channel as is.
#[must_use]
pub fn luminance<P>(image: &ImageBuffer<P, Vec<u8>>) -> GrayImage
where
	P: Pixel<Subpixel = u8>,
{
	let channels = usize::from(P::CHANNEL_COUNT);
	let data = image
		.as_raw()
		.chunks_exact(channels)
		.map(|p| {
			if channels >= 3 {
				// 14-bit fixed point, rounded
				let y = u32::from(p[0]) * 4899 + u32::from(p[1]) * 9617 + u32::from(p[2]) * 1868 + (1 << 13);
				#[allow(clippy::cast_possible_truncation)]
				{
					(y >> 14) as u8
				}
			} else {
				p[0]
			}
		})
		.collect::<Vec<_>>();

	from_plane(image.width(), image.height(), &data)
}

/// Build a [`GrayImage`] from a row-major plane of the right length
fn from_plane(width: u32, height: u32, data: &[u8]) -> GrayImage {
	let w = width as usize;
	GrayImage::from_fn(width, height, |x, y| Luma([data[y as usize * w + x as usize]]))
}

/// Map an out of range index back into `0..n` by mirroring about the border pixel
#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
fn reflect_101(i: isize, n: usize) -> usize {
	if n == 1 {
		return 0;
	}

	let last = n as isize - 1;
	let mut i = i;
	loop {
		if i < 0 {
			i = -i;
		} else if i > last {
			i = 2 * last - i;
		} else {
			return i as usize;
		}
	}
}

/// Clamp an index into `0..n`, repeating the border pixel
#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
fn replicate(i: isize, n: usize) -> usize {
	i.clamp(0, n as isize - 1) as usize
}

/// A row of Pascal's triangle, the integer binomial approximation of a Gaussian
fn binomial_kernel(size: usize) -> Vec<u64> {
	let mut row = vec![1u64];
	for _ in 1..size {
		let mut next = vec![1u64; row.len() + 1];
		for i in 1..row.len() {
			next[i] = row[i - 1] + row[i];
		}
		row = next;
	}
	row
}

/// Smooth with a separable binomial (Gaussian) kernel, mirroring at the borders.
///
/// The kernel size is made odd and clamped to `1..=MAX_BLUR_KERNEL`.
/// For a size of 5 this is the `[1 4 6 4 1] / 16` kernel.
#[must_use]
#[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
pub fn gaussian_blur(gray: &GrayImage, kernel_size: u32) -> GrayImage {
	let size = (kernel_size.clamp(1, MAX_BLUR_KERNEL) | 1) as usize;
	if size == 1 {
		return gray.clone();
	}

	let kernel = binomial_kernel(size);
	let radius = (size / 2) as isize;
	let norm = 1u64 << (2 * (size - 1));
	let (w, h) = (gray.width() as usize, gray.height() as usize);
	let src = gray.as_raw();

	let mut horizontal = vec![0u64; w * h];
	for y in 0..h {
		for x in 0..w {
			horizontal[y * w + x] = kernel
				.iter()
				.enumerate()
				.map(|(k, &c)| c * u64::from(src[y * w + reflect_101(x as isize + k as isize - radius, w)]))
				.sum();
		}
	}

	let mut data = vec![0u8; w * h];
	for y in 0..h {
		for x in 0..w {
			let sum: u64 = kernel
				.iter()
				.enumerate()
				.map(|(k, &c)| c * horizontal[reflect_101(y as isize + k as isize - radius, h) * w + x])
				.sum();
			// a weighted average of u8 values fits in u8
			data[y * w + x] = ((sum + norm / 2) / norm) as u8;
		}
	}

	from_plane(gray.width(), gray.height(), &data)
}

/// tan(22.5 degrees)
const TAN_22_5: f32 = 0.414_213_57;
/// tan(67.5 degrees)
const TAN_67_5: f32 = 2.414_213_6;

/// Candidate edge pixel states before hysteresis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Candidate {
	/// Not an edge
	None,
	/// An edge only if connected to a strong edge
	Weak,
	/// Always an edge
	Strong,
}

/// Canny-style edge detection on an already smoothed image.
///
/// Gradients come from 3x3 Sobel operators with replicated borders and the
/// magnitude is `|gx| + |gy|`. Non-maximum suppression thins the edges, then
/// pixels above `high` seed edges that grow through 8-connected pixels above `low`.
/// The thresholds are swapped if `low > high`.
///
/// Returns `255` for edge pixels and `0` elsewhere.
#[must_use]
#[allow(clippy::cast_possible_wrap, clippy::cast_precision_loss)]
pub fn detect_edges(gray: &GrayImage, low: f32, high: f32) -> GrayImage {
	let (low, high) = if low > high { (high, low) } else { (low, high) };
	let (w, h) = (gray.width() as usize, gray.height() as usize);
	let src = gray.as_raw();

	let at = |x: isize, y: isize| i32::from(src[replicate(y, h) * w + replicate(x, w)]);

	let mut gx = vec![0i32; w * h];
	let mut gy = vec![0i32; w * h];
	let mut magnitude = vec![0i32; w * h];
	for y in 0..h {
		for x in 0..w {
			let (xi, yi) = (x as isize, y as isize);
			let dx = (at(xi + 1, yi - 1) + 2 * at(xi + 1, yi) + at(xi + 1, yi + 1))
				- (at(xi - 1, yi - 1) + 2 * at(xi - 1, yi) + at(xi - 1, yi + 1));
			let dy = (at(xi - 1, yi + 1) + 2 * at(xi, yi + 1) + at(xi + 1, yi + 1))
				- (at(xi - 1, yi - 1) + 2 * at(xi, yi - 1) + at(xi + 1, yi - 1));

			let i = y * w + x;
			gx[i] = dx;
			gy[i] = dy;
			magnitude[i] = dx.abs() + dy.abs();
		}
	}

	let mag_at = |x: isize, y: isize| {
		if x < 0 || y < 0 || x >= w as isize || y >= h as isize {
			0
		} else {
			magnitude[y as usize * w + x as usize]
		}
	};

	let mut candidates = vec![Candidate::None; w * h];
	let mut stack = Vec::new();
	for y in 0..h {
		for x in 0..w {
			let i = y * w + x;
			let m = magnitude[i];
			if m as f32 <= low {
				continue;
			}

			let (xi, yi) = (x as isize, y as isize);
			let ax = gx[i].abs() as f32;
			let ay = gy[i].abs() as f32;

			let is_max = if ay <= ax * TAN_22_5 {
				m > mag_at(xi - 1, yi) && m >= mag_at(xi + 1, yi)
			} else if ay >= ax * TAN_67_5 {
				m > mag_at(xi, yi - 1) && m >= mag_at(xi, yi + 1)
			} else {
				let s = if (gx[i] < 0) == (gy[i] < 0) { 1 } else { -1 };
				m > mag_at(xi - s, yi - 1) && m > mag_at(xi + s, yi + 1)
			};

			if is_max {
				if m as f32 > high {
					candidates[i] = Candidate::Strong;
					stack.push(i);
				} else {
					candidates[i] = Candidate::Weak;
				}
			}
		}
	}

	let mut edges = vec![0u8; w * h];
	for &i in &stack {
		edges[i] = u8::MAX;
	}

	// hysteresis
	while let Some(i) = stack.pop() {
		let (x, y) = (i % w, i / w);
		for ny in y.saturating_sub(1)..=(y + 1).min(h - 1) {
			for nx in x.saturating_sub(1)..=(x + 1).min(w - 1) {
				let j = ny * w + nx;
				if candidates[j] == Candidate::Weak && edges[j] == 0 {
					edges[j] = u8::MAX;
					stack.push(j);
				}
			}
		}
	}

	from_plane(gray.width(), gray.height(), &edges)
}

/// Grow bright regions with a square `kernel_size` structuring element.
///
/// The anchor is the kernel center (`kernel_size / 2`), so a 2x2 kernel extends
/// each edge pixel one pixel to the right and one pixel down.
#[must_use]
#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
pub fn dilate(image: &GrayImage, kernel_size: u32, iterations: u32) -> GrayImage {
	let size = kernel_size.max(1) as isize;
	let anchor = size / 2;
	let (w, h) = (image.width() as usize, image.height() as usize);

	let mut current = image.as_raw().clone();
	for _ in 0..iterations {
		let mut next = vec![0u8; w * h];
		for y in 0..h {
			for x in 0..w {
				let mut max = 0;
				for dy in -anchor..(size - anchor) {
					let sy = y as isize + dy;
					if sy < 0 || sy >= h as isize {
						continue;
					}
					for dx in -anchor..(size - anchor) {
						let sx = x as isize + dx;
						if sx < 0 || sx >= w as isize {
							continue;
						}
						max = u8::max(max, current[sy as usize * w + sx as usize]);
					}
				}
				next[y * w + x] = max;
			}
		}
		current = next;
	}

	from_plane(image.width(), image.height(), &current)
}

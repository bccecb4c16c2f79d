//! Specifies the CLI and handles arg parsing

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::{
	fmt::{Debug, Display},
	ops::RangeBounds,
	path::{Path, PathBuf},
	str::FromStr,
};
use wallhue::{Color, OutputFormat, Strategy};

/// Supported output formats for printed colors
#[derive(Copy, Clone, ValueEnum)]
pub enum FormatOutput {
	/// sRGB hexcode
	Hex,
	/// sRGB (r,g,b) triple
	Rgb,
	/// Whitespace with true color background
	Swatch,
}

/// Ways to colorize the output text
#[derive(Copy, Clone, ValueEnum)]
pub enum ColorizeOutput {
	/// Foreground
	Fg,
	/// Background
	Bg,
}

/// Compositing strategies
#[derive(Copy, Clone, ValueEnum)]
pub enum StrategyArg {
	/// Keep detected edges, blend the color everywhere else
	Edge,
	/// Uniform translucent layer with a slight contrast and sharpness boost
	Flat,
}

impl From<StrategyArg> for Strategy {
	fn from(value: StrategyArg) -> Self {
		match value {
			StrategyArg::Edge => Strategy::EdgeAware,
			StrategyArg::Flat => Strategy::Flat,
		}
	}
}

/// Encoded image formats for previews
#[derive(Copy, Clone, ValueEnum)]
pub enum ImageFormatArg {
	/// Lossy JPEG
	Jpeg,
	/// Lossless PNG
	Png,
}

impl From<ImageFormatArg> for OutputFormat {
	fn from(value: ImageFormatArg) -> Self {
		match value {
			ImageFormatArg::Jpeg => OutputFormat::Jpeg,
			ImageFormatArg::Png => OutputFormat::Png,
		}
	}
}

/// Extract color palettes from photos of walls and preview them repainted.
#[derive(Parser)]
#[command(version)]
pub struct Options {
	/// The action to perform
	#[command(subcommand)]
	pub command: Command,

	/// Print the running time of each step
	#[arg(long, global = true)]
	pub verbose: bool,

	/// The number of threads to use, where 0 picks one per logical core
	#[cfg(feature = "threads")]
	#[arg(short = 't', long, global = true, default_value_t = 0)]
	pub threads: u8,
}

/// Subcommands
#[derive(Subcommand)]
pub enum Command {
	/// Print the palette of an image: the extracted colors followed by the designer colors
	Palette(PaletteArgs),

	/// Print the display name of each color
	Name {
		/// Hex colors of the form #rrggbb or rrggbb
		#[arg(required = true, value_parser = parse_hex)]
		colors: Vec<Color>,
	},

	/// Write a preview of an image recolored with the given color
	Apply(ApplyArgs),

	/// Print hue-rotated variants of a color
	Complement {
		/// A hex color of the form #rrggbb or rrggbb
		#[arg(value_parser = parse_hex)]
		color: Color,

		/// The number of colors to generate
		#[arg(short, default_value_t = wallhue::suggest::DEFAULT_COMPLEMENTARY)]
		n: usize,

		#[command(flatten)]
		print: PrintArgs,
	},

	/// Print six named colors close to a color
	Similar {
		/// A hex color of the form #rrggbb or rrggbb
		#[arg(value_parser = parse_hex)]
		color: Color,
	},

	/// Print five contrasting shades of a color
	Shades {
		/// A hex color of the form #rrggbb or rrggbb
		#[arg(value_parser = parse_hex)]
		color: Color,

		#[command(flatten)]
		print: PrintArgs,
	},

	/// Print the hand-picked palettes, or only the one with the given name
	Palettes {
		/// A palette name such as "Pastel Dreams", ignoring case
		name: Option<String>,
	},

	/// Print the paint brand matches for a color, with product codes and finishes
	Brands {
		/// A hex color of the form #rrggbb or rrggbb
		#[arg(value_parser = parse_hex)]
		color: Color,
	},
}

/// How to print a list of colors
#[derive(Args)]
pub struct PrintArgs {
	/// The format to print the colors in
	#[arg(short, long, default_value = "hex")]
	pub output: FormatOutput,

	/// Color the foreground or background for each printed color
	#[arg(short, long)]
	pub colorize: Option<ColorizeOutput>,
}

/// Options for the `palette` subcommand
#[derive(Args)]
pub struct PaletteArgs {
	/// The path to the input image
	pub image: PathBuf,

	/// The (maximum) number of colors to extract from the image
	#[arg(short, default_value_t = 5)]
	pub k: usize,

	/// The width and height of the thumbnail that pixels are sampled from
	#[arg(long, default_value_t = 100, value_parser = parse_positive_u32)]
	pub thumbnail_size: u32,

	/// The maximum number of thumbnail pixels to sample
	#[arg(long, default_value_t = 1000, value_parser = parse_positive_usize)]
	pub max_samples: usize,

	/// The seed value used for the random number generator
	///
	/// A random seed is used if none is given, so repeated runs may differ.
	#[arg(long)]
	pub seed: Option<u64>,

	/// Only print the colors extracted from the image
	#[arg(long)]
	pub no_designer: bool,

	/// Print a display name after each color, one color per line
	#[arg(long)]
	pub names: bool,

	#[command(flatten)]
	pub print: PrintArgs,
}

/// Options for the `apply` subcommand
#[derive(Args)]
pub struct ApplyArgs {
	/// The path to the input image
	pub image: PathBuf,

	/// The color to apply, of the form #rrggbb or rrggbb
	#[arg(value_parser = parse_hex)]
	pub color: Color,

	/// The path to write the preview to
	#[arg(short = 'O', long)]
	pub out: PathBuf,

	/// How strongly to apply the color, in [0.0, 1.0]
	#[arg(short = 'a', long, default_value_t = wallhue::composite::DEFAULT_OPACITY, value_parser = parse_unit_float)]
	pub opacity: f32,

	/// The compositing strategy
	#[arg(short, long, default_value = "edge")]
	pub strategy: StrategyArg,

	/// Size of the Gaussian smoothing kernel before edge detection
	#[arg(long, default_value_t = 5, value_parser = parse_positive_u32)]
	pub blur_kernel: u32,

	/// Gradient magnitudes at or below this are never edges
	#[arg(long, default_value_t = 50.0, value_parser = parse_non_negative_float)]
	pub low_threshold: f32,

	/// Gradient magnitudes above this are always edges
	#[arg(long, default_value_t = 150.0, value_parser = parse_non_negative_float)]
	pub high_threshold: f32,

	/// Size of the square kernel used to thicken edges
	#[arg(long, default_value_t = 2, value_parser = parse_positive_u32)]
	pub dilation_kernel: u32,

	/// How many times edges are thickened
	#[arg(long, default_value_t = 1)]
	pub dilation_iterations: u32,

	/// Alpha of the color layer at full opacity for the flat strategy
	#[arg(long, default_value_t = 180)]
	pub flat_alpha: u8,

	/// Contrast boost for the flat strategy, where 0.0 is no change
	#[arg(long, default_value_t = 8.0)]
	pub contrast: f32,

	/// The output image format, guessed from the file extension if not given
	#[arg(short, long)]
	pub format: Option<ImageFormatArg>,

	/// JPEG quality in [1, 100]
	#[arg(short, long, default_value_t = wallhue::codec::DEFAULT_JPEG_QUALITY, value_parser = parse_quality)]
	pub quality: u8,

	/// Write a base64 data URL instead of raw image bytes
	#[arg(long)]
	pub data_url: bool,
}

impl ApplyArgs {
	/// The output format: explicit, else from the extension of `out`, else JPEG
	pub fn output_format(&self) -> OutputFormat {
		self.format.map_or_else(|| format_from_extension(&self.out), OutputFormat::from)
	}
}

/// PNG for a `.png` extension, JPEG otherwise
fn format_from_extension(path: &Path) -> OutputFormat {
	if path
		.extension()
		.map_or(false, |ext| ext.eq_ignore_ascii_case("png"))
	{
		OutputFormat::Png
	} else {
		OutputFormat::Jpeg
	}
}

/// Parse a value and ensure it is in the provided, valid range
fn parse_in_range<T>(s: &str, range: impl RangeBounds<T> + Debug) -> Result<T, String>
where
	T: FromStr + Display + PartialOrd,
	T::Err: Display,
{
	let value: T = s.parse().map_err(|e| format!("{e}"))?;
	if range.contains(&value) {
		Ok(value)
	} else {
		Err(format!("{value} is not in {range:?}"))
	}
}

/// Parse a float and ensure it is in `0.0..=1.0`
fn parse_unit_float(s: &str) -> Result<f32, String> {
	parse_in_range(s, 0.0..=1.0)
}

/// Parse a float and ensure it is `>= 0.0`
fn parse_non_negative_float(s: &str) -> Result<f32, String> {
	parse_in_range(s, 0.0..)
}

/// Parse an integer and ensure it is `>= 1`
fn parse_positive_u32(s: &str) -> Result<u32, String> {
	parse_in_range(s, 1..)
}

/// Parse a count and ensure it is `>= 1`
fn parse_positive_usize(s: &str) -> Result<usize, String> {
	parse_in_range(s, 1..)
}

/// Parse a JPEG quality and ensure it is in `1..=100`
fn parse_quality(s: &str) -> Result<u8, String> {
	parse_in_range(s, 1..=100)
}

/// Parse a hex color
fn parse_hex(s: &str) -> Result<Color, String> {
	wallhue::hex_to_rgb(s).map_err(|e| e.to_string())
}

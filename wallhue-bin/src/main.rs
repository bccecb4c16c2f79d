//! Extract color palettes from photos of walls and preview them repainted.

#![deny(unsafe_code, unsafe_op_in_unsafe_fn)]
#![warn(
    clippy::pedantic,
    clippy::cargo,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,
    clippy::unwrap_in_result,
    clippy::unneeded_field_pattern,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::unnecessary_self_imports,
    clippy::str_to_string,
    clippy::string_to_string,
    clippy::string_slice,
    missing_docs,
    clippy::missing_docs_in_private_items,
    rustdoc::all,
    clippy::float_cmp_const,
    clippy::lossy_float_literal
)]
#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::missing_panics_doc,
    clippy::unreadable_literal
)]

mod cli;

#[allow(clippy::wildcard_imports)]
use cli::*;

use std::{
    fmt::{self, Display},
    io,
    path::{Path, PathBuf},
    process::ExitCode,
    time::Instant,
};

use clap::Parser;
use colored::Colorize;
use image::GenericImageView;
use wallhue::{
    brands, codec, composite, extract, naming, suggest, BrandMatch, Color, CompositeOptions,
    CuratedColor, EdgeOptions, EncodeOptions, FlatOptions, NamedColor, PaletteOptions,
    SuggestedPalette,
};

/// Record the running time of a function and print the elapsed time
macro_rules! time {
    ($name: literal, $verbose: expr, $func_call: expr) => {{
        let start = Instant::now();
        let result = $func_call;
        let elapsed = start.elapsed().as_millis();
        if $verbose {
            println!("{} took {}ms", $name, elapsed);
        } else {
            log::debug!("{} took {}ms", $name, elapsed);
        }
        result
    }};
}

/// Error cases for the CLI
#[derive(Debug)]
enum CliError {
    /// Failed to read the input image file
    Read(PathBuf, io::Error),
    /// Failed to write the output file
    Write(PathBuf, io::Error),
    /// Failed to decode, composite, or encode an image
    Wallhue(wallhue::Error),
    /// No hand-picked palette has the given name
    UnknownPalette(String),
    /// Failed to build the thread pool
    #[cfg(feature = "threads")]
    ThreadPool(rayon::ThreadPoolBuildError),
}

impl Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CliError::Read(path, e) => write!(f, "Failed to read {}: {e}", path.display()),
            CliError::Write(path, e) => write!(f, "Failed to write {}: {e}", path.display()),
            CliError::Wallhue(e) => write!(f, "{e}"),
            CliError::UnknownPalette(name) => write!(f, "No palette is named '{name}'"),
            #[cfg(feature = "threads")]
            CliError::ThreadPool(e) => write!(f, "Failed to start worker threads: {e}"),
        }
    }
}

impl From<wallhue::Error> for CliError {
    fn from(e: wallhue::Error) -> Self {
        CliError::Wallhue(e)
    }
}

fn main() -> ExitCode {
    pretty_env_logger::init_custom_env("WALLHUE_LOG");

    let options = Options::parse();

    // Returning Result<_> uses Debug printing instead of Display
    if let Err(e) = run_in_pool(&options) {
        eprintln!("{e}");
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Builds a thread pool and then runs the command
#[cfg(feature = "threads")]
fn run_in_pool(options: &Options) -> Result<(), CliError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(usize::from(options.threads))
        .build()
        .map_err(CliError::ThreadPool)?;

    pool.install(|| run(options))
}

/// Runs the command on a single thread
#[cfg(not(feature = "threads"))]
fn run_in_pool(options: &Options) -> Result<(), CliError> {
    run(options)
}

/// Dispatch on the subcommand
fn run(options: &Options) -> Result<(), CliError> {
    let verbose = options.verbose;
    match &options.command {
        Command::Palette(args) => palette(args, verbose),
        Command::Name { colors } => {
            for &color in colors {
                print_named(&NamedColor::new(color));
            }
            Ok(())
        }
        Command::Apply(args) => apply(args, verbose),
        Command::Complement { color, n, print } => {
            print_colors(&suggest::complementary(*color, *n), print);
            Ok(())
        }
        Command::Similar { color } => {
            for named in suggest::similar(*color) {
                print_named(&named);
            }
            Ok(())
        }
        Command::Shades { color, print } => {
            print_colors(&suggest::shades(*color), print);
            Ok(())
        }
        Command::Palettes { name } => palettes(name.as_deref()),
        Command::Brands { color } => {
            for brand_match in brands::matches(*color) {
                print_brand_match(&brand_match);
            }
            Ok(())
        }
    }
}

/// Read a file, keeping its path for error messages
fn read(path: &Path) -> Result<Vec<u8>, CliError> {
    std::fs::read(path).map_err(|e| CliError::Read(path.to_owned(), e))
}

/// Extract and print the palette of an image
fn palette(args: &PaletteArgs, verbose: bool) -> Result<(), CliError> {
    let seed = args.seed.unwrap_or_else(rand::random);
    if verbose {
        println!("Using seed {seed}");
    }

    let options = PaletteOptions {
        num_colors: args.k,
        thumbnail_size: args.thumbnail_size,
        max_samples: args.max_samples,
        seed,
    };

    let bytes = time!("Image loading", verbose, read(&args.image))?;
    let image = time!("Image decoding", verbose, codec::decode(&bytes))?;
    let palette = time!(
        "Palette extraction",
        verbose,
        extract::from_image(&image, &options)
    )?;

    let colors = if args.no_designer {
        palette.extracted
    } else {
        palette.colors().collect()
    };

    if args.names {
        for named in naming::name_palette(&colors) {
            print_named(&named);
        }
    } else {
        print_colors(&colors, &args.print);
    }

    Ok(())
}

/// Recolor an image and write the preview
fn apply(args: &ApplyArgs, verbose: bool) -> Result<(), CliError> {
    let options = CompositeOptions {
        opacity: args.opacity,
        strategy: args.strategy.into(),
        edges: EdgeOptions {
            blur_kernel: args.blur_kernel,
            low_threshold: args.low_threshold,
            high_threshold: args.high_threshold,
            dilation_kernel: args.dilation_kernel,
            dilation_iterations: args.dilation_iterations,
        },
        flat: FlatOptions {
            alpha: args.flat_alpha,
            contrast: args.contrast,
            ..FlatOptions::default()
        },
    };

    let encoding = EncodeOptions {
        format: args.output_format(),
        quality: args.quality,
    };

    let bytes = time!("Image loading", verbose, read(&args.image))?;
    let image = time!("Image decoding", verbose, codec::decode(&bytes))?;
    if verbose {
        let (width, height) = image.dimensions();
        println!("Compositing a {width}x{height} image");
    }

    let preview = time!(
        "Compositing",
        verbose,
        composite::apply(&image, args.color, &options)
    )?;

    let output = if args.data_url {
        time!(
            "Encoding",
            verbose,
            codec::encode_data_url(&preview, &encoding)
        )?
        .into_bytes()
    } else {
        time!("Encoding", verbose, codec::encode(&preview, &encoding))?
    };

    std::fs::write(&args.out, output).map_err(|e| CliError::Write(args.out.clone(), e))?;
    log::info!("wrote preview to {}", args.out.display());

    Ok(())
}

/// Print every hand-picked palette, or only the named one
fn palettes(name: Option<&str>) -> Result<(), CliError> {
    match name {
        Some(name) => {
            let palette = suggest::suggested_palette(name)
                .ok_or_else(|| CliError::UnknownPalette(name.to_owned()))?;
            print_palette(palette);
        }
        None => {
            for (i, palette) in wallhue::suggested_palettes().iter().enumerate() {
                if i > 0 {
                    println!();
                }
                print_palette(palette);
            }
        }
    }
    Ok(())
}

/// Print a palette's title and description, then one line per color
fn print_palette(palette: &SuggestedPalette) {
    println!("{}", palette.name.bold());
    println!("{}", palette.description);
    for curated in &palette.colors {
        let CuratedColor { name, color } = *curated;
        let Color { red, green, blue, .. } = color;
        println!("{} {} {name}", "   ".on_truecolor(red, green, blue), curated.hex());
    }
}

/// Print a brand match: swatch, brand, code, name, then the finishes
fn print_brand_match(brand_match: &BrandMatch) {
    let Color { red, green, blue, .. } = brand_match.color;
    let finishes = brand_match
        .finishes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    println!(
        "{} {} {} {} ({finishes})",
        "   ".on_truecolor(red, green, blue),
        brand_match.brand,
        brand_match.code,
        brand_match.name
    );
}

/// Print a color's hex code, swatch, and name on one line
fn print_named(named: &NamedColor) {
    let Color { red, green, blue, .. } = named.color;
    println!(
        "{} {} {}",
        "   ".on_truecolor(red, green, blue),
        named.hex(),
        named.name
    );
}

/// Print a line of colors using the given format and colorization
fn print_colors(colors: &[Color], print: &PrintArgs) {
    let delimiter = match print.output {
        FormatOutput::Swatch => "",
        FormatOutput::Hex | FormatOutput::Rgb => " ",
    };

    println!(
        "{}",
        colors
            .iter()
            .map(|&color| format_color(color, print))
            .collect::<Vec<_>>()
            .join(delimiter)
    );
}

/// Format and colorize a single color
fn format_color(color: Color, print: &PrintArgs) -> String {
    let Color { red, green, blue, .. } = color;
    let text = match print.output {
        FormatOutput::Hex => wallhue::rgb_to_hex(color),
        FormatOutput::Rgb => format!("({red},{green},{blue})"),
        FormatOutput::Swatch => return "   ".on_truecolor(red, green, blue).to_string(),
    };

    match print.colorize {
        Some(ColorizeOutput::Fg) => text.truecolor(red, green, blue).to_string(),
        Some(ColorizeOutput::Bg) => text.on_truecolor(red, green, blue).to_string(),
        None => text,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn plain(output: FormatOutput) -> PrintArgs {
        PrintArgs {
            output,
            colorize: None,
        }
    }

    #[test]
    fn formats_colors() {
        let color = Color::new(0x4a, 0x6d, 0xa7);
        assert_eq!(format_color(color, &plain(FormatOutput::Hex)), "#4a6da7");
        assert_eq!(format_color(color, &plain(FormatOutput::Rgb)), "(74,109,167)");
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let error = read(Path::new("definitely/not/a/file.jpg")).unwrap_err();
        assert!(matches!(error, CliError::Read(..)));
        assert!(error.to_string().starts_with("Failed to read definitely"));
    }

    #[test]
    fn unknown_palette_is_an_error() {
        let error = palettes(Some("Loud Clashes")).unwrap_err();
        assert!(matches!(error, CliError::UnknownPalette(_)));
        assert_eq!(error.to_string(), "No palette is named 'Loud Clashes'");
        assert!(palettes(Some("modern neutrals")).is_ok());
        assert!(palettes(None).is_ok());
    }

    #[test]
    fn library_errors_display_as_is() {
        let error = CliError::from(wallhue::hex_to_rgb("#12").unwrap_err());
        assert_eq!(error.to_string(), wallhue::hex_to_rgb("#12").unwrap_err().to_string());
    }
}

use image::error::ImageError;
use log::LevelFilter;

use quadtree_leaf::error::{AnalyzeError, PayloadError};
use quadtree_leaf::CompressOptions;

use std::fs::File;
use std::path::{Path, PathBuf};

use std::io::{Read, Write};

/// Helper function for `main`.
fn error_exit(msg: &str, code: i32) -> ! {
	log::error!("{}", msg);
	std::process::exit(code)
}

/// Parses a numeric option, exiting with status 2 if it isn't a number.
fn numeric_arg<T: std::str::FromStr>(matches: &clap::ArgMatches, name: &str, default: T) -> T {
	match matches.value_of(name) {
		None => default,
		Some(raw) => match raw.parse() {
			Ok(n) => n,
			Err(_) => error_exit(&format!("Non-numeric value for {}", name), 2)
		}
	}
}

/// Default output path: `input_path` in the same directory, with its last
/// extension (if any) replaced by `ext`.
fn sibling_path(input_path: &str, ext: &str) -> PathBuf {
	Path::new(input_path).with_extension(ext)
}

/// `clap`-based CLI for working with QTL payload files.
///
/// May exit process with status code if there are errors:
///
/// 1: `clap` error
///
/// 2: invalid arguments
///
/// 3: file I/O issues
///
/// 4: invalid image or payload data
///
/// 5: image too large or computation limits exceeded
///
/// 10: other, potentially unknown error
fn main() {
	let clap_matches = clap::App::new("quadtree_leaf")
		.version("0.1.0")
		.author("vkcz")
		.about("Converts images to and from quadtree leaf payloads (QTL).")
		.arg_from_usage("-i, --into 'Convert the input file from PNG or JFIF to a QTL payload'")
		.arg_from_usage("-f, --from 'Convert the input file from a QTL payload to PNG'")
		.arg_from_usage("-d, --depth=[N] 'Maximum quadtree depth (--into only); defaults to 200'")
		.arg_from_usage("-t, --tolerance=[N] 'Color tolerance in percent (--into only); defaults to 0, which is lossless'")
		.arg_from_usage("-m, --merges=[N] 'Number of merge passes (--into only); defaults to 10'")
		.arg_from_usage("-v, --verbose... 'Log more; repeat for more detail'")
		.arg_from_usage("<INPUT> 'Path to input file'")
		.arg_from_usage("[OUTPUT] 'Path to output file; defaults to INPUT with a modified file extension'")
		.get_matches();

	let level = match clap_matches.occurrences_of("verbose") {
		0 => LevelFilter::Warn,
		1 => LevelFilter::Info,
		2 => LevelFilter::Debug,
		_ => LevelFilter::Trace,
	};
	env_logger::Builder::new()
		.filter_level(level)
		.parse_default_env()
		.init();

	// INPUT is required, so clap has already exited if it is missing.
	let input_path = clap_matches.value_of("INPUT").unwrap_or_default();
	let (into, from) = (clap_matches.is_present("into"), clap_matches.is_present("from"));
	match (into, from) {
		(true, true) => error_exit("Only one of -i/--into and -f/--from must be present", 2),
		(true, false) => {
			let source = match image::open(input_path) {
				Ok(i) => i,
				Err(e) => {
					let (msg, code) = match e {
						ImageError::Decoding(_) | ImageError::Unsupported(_) => ("Invalid image data", 4),
						ImageError::Limits(_) => ("Computation limits exceeded", 5),
						ImageError::IoError(_) => ("File not found or could not be read", 3),
						_ => ("An error occurred", 10)
					};
					error_exit(msg, code)
				}
			}.into_rgb8();
			let defaults = CompressOptions::default();
			let options = CompressOptions {
				max_depth: numeric_arg(&clap_matches, "depth", defaults.max_depth),
				tolerance: numeric_arg(&clap_matches, "tolerance", defaults.tolerance),
				merge_passes: numeric_arg(&clap_matches, "merges", defaults.merge_passes),
			};
			log::info!("compressing {} with {:?}", input_path, options);
			let payload = match quadtree_leaf::compress(&source, &options) {
				Ok(p) => p,
				Err(e @ AnalyzeError::TooLarge { .. }) => error_exit(&e.to_string(), 5)
			};
			let output_path = clap_matches.value_of("OUTPUT")
				.map(PathBuf::from)
				.unwrap_or_else(|| sibling_path(input_path, "qtl"));
			let mut out_fh = match File::create(&output_path) {
				Ok(f) => f,
				Err(_) => error_exit("Could not open output file", 3)
			};
			match out_fh.write_all(payload.as_bytes()) {
				Ok(_) => log::info!("wrote {} bytes to {}", payload.len(), output_path.display()),
				Err(_) => error_exit("Could not write to output file", 3)
			}
		},
		(false, true) => {
			let mut source_data = String::new();
			let mut source_fh = match File::open(input_path) {
				Ok(f) => f,
				Err(_) => error_exit("File not found or could not be read", 3)
			};
			match source_fh.read_to_string(&mut source_data) {
				Ok(_) => (),
				Err(e) if e.kind() == std::io::ErrorKind::InvalidData =>
					error_exit("Invalid payload data", 4),
				Err(_) => error_exit("Could not read from input file", 3)
			}
			let output = match quadtree_leaf::decompress(&source_data) {
				Ok(img) => img,
				Err(PayloadError::NotAContainer) => error_exit("Input is not a QTL payload", 4),
				Err(e @ PayloadError::Base64(_)) => error_exit(&e.to_string(), 4)
			};
			log::info!("restored a {}x{} image", output.width(), output.height());
			match output.save(clap_matches.value_of("OUTPUT")
				.map(PathBuf::from)
				.unwrap_or_else(|| sibling_path(input_path, "png"))) {
				Ok(_) => (),
				Err(_) => error_exit("Could not save output", 3)
			}
		},
		(false, false) => error_exit("One of -i/--into and -f/--from must be present", 2)
	}
}

use crate::codec;
use crate::config::HuffConfig;
use crate::error::HuffError;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const FALLBACK_SUFFIX: &str = "decompressed";
const MAX_RENAMES: usize = 1000;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompressionStats {
	pub original_size: u64,
	pub compressed_size: u64,
	/// compressed / original, 0 for empty input
	pub ratio: f64,
	/// (1 - ratio) * 100, 0 for empty input
	pub savings_percent: f64,
}

impl CompressionStats {
	pub fn new(original_size: u64, compressed_size: u64) -> Self {
		let ratio = if original_size > 0 { compressed_size as f64 / original_size as f64 } else { 0.0 };
		let savings_percent = if original_size > 0 { (1.0 - ratio) * 100.0 } else { 0.0 };
		Self { original_size, compressed_size, ratio, savings_percent }
	}
}

#[derive(Debug, Clone, Serialize)]
pub struct CompressReport {
	pub input: PathBuf,
	pub output: PathBuf,
	pub stats: CompressionStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct DecompressReport {
	pub input: PathBuf,
	pub output: PathBuf,
	pub original_file_name: String,
	pub compressed_size: u64,
	pub decompressed_size: u64,
}

/// Byte counts a batch summary adds up.
pub trait Report {
	fn bytes_in(&self) -> u64;
	fn bytes_out(&self) -> u64;
}

impl Report for CompressReport {
	fn bytes_in(&self) -> u64 { self.stats.original_size }
	fn bytes_out(&self) -> u64 { self.stats.compressed_size }
}

impl Report for DecompressReport {
	fn bytes_in(&self) -> u64 { self.compressed_size }
	fn bytes_out(&self) -> u64 { self.decompressed_size }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
	pub succeeded: usize,
	pub failed: usize,
	pub bytes_in: u64,
	pub bytes_out: u64,
}

impl BatchSummary {
	pub fn collect<T: Report>(results: &[Result<T, HuffError>]) -> Self {
		results.iter().fold(Self::default(), |mut summary, result| {
			match result {
				Ok(report) => {
					summary.succeeded += 1;
					summary.bytes_in += report.bytes_in();
					summary.bytes_out += report.bytes_out();
				}
				Err(_) => summary.failed += 1,
			}
			summary
		})
	}
}

/// Compresses one file into `<name>.<extension>`.
///
/// Existing files are never replaced: a taken name becomes `<name> (1).<extension>`
/// and so on.
pub fn compress_file(input: &Path, config: &HuffConfig) -> Result<CompressReport, HuffError> {
	let data = fs::read(input)?;
	let name = file_name(input);
	let container = codec::compress(&data, &name);

	let extension = config.extension.trim_start_matches('.');
	let output = write_new(&output_dir(input, config), &format!("{}.{}", name, extension), &container)?;

	let stats = CompressionStats::new(data.len() as u64, container.len() as u64);
	log::info!(
		"compressed {} -> {} ({} -> {} bytes, {:.2}%)",
		input.display(),
		output.display(),
		stats.original_size,
		stats.compressed_size,
		stats.savings_percent
	);
	Ok(CompressReport { input: input.to_path_buf(), output, stats })
}

/// Decompresses one container, restoring the stored file name.
///
/// Like [`compress_file`], a name that is already taken gets a ` (n)` suffix
/// in front of its extension.
pub fn decompress_file(input: &Path, config: &HuffConfig) -> Result<DecompressReport, HuffError> {
	let bytes = fs::read(input)?;
	let restored = codec::decompress(&bytes)?;

	let name = restored_name(&restored.original_file_name, input, &config.extension);
	let output = write_new(&output_dir(input, config), &name, &restored.data)?;

	log::info!("decompressed {} -> {} ({} bytes)", input.display(), output.display(), restored.data.len());
	Ok(DecompressReport {
		input: input.to_path_buf(),
		output,
		original_file_name: restored.original_file_name,
		compressed_size: bytes.len() as u64,
		decompressed_size: restored.data.len() as u64,
	})
}

/// Compresses every input in parallel. One result per input, in input order.
pub fn compress_files(inputs: &[PathBuf], config: &HuffConfig) -> Result<Vec<Result<CompressReport, HuffError>>, HuffError> {
	run_batch(inputs, config, "Compressing", compress_file)
}

/// Decompresses every input in parallel. One result per input, in input order.
pub fn decompress_files(inputs: &[PathBuf], config: &HuffConfig) -> Result<Vec<Result<DecompressReport, HuffError>>, HuffError> {
	run_batch(inputs, config, "Decompressing", decompress_file)
}

fn run_batch<T, F>(inputs: &[PathBuf], config: &HuffConfig, label: &'static str, op: F) -> Result<Vec<Result<T, HuffError>>, HuffError>
where
	T: Send,
	F: Fn(&Path, &HuffConfig) -> Result<T, HuffError> + Sync,
{
	config.validate()?;
	let pool = rayon::ThreadPoolBuilder::new()
		.num_threads(config.threads)
		.build()
		.map_err(|e| HuffError::Config(format!("failed to start thread pool: {}", e)))?;

	let pb = progress_bar(inputs.len() as u64, config.progress, label);

	let results: Vec<Result<T, HuffError>> = pool.install(|| {
		inputs
			.par_iter()
			.map(|input| {
				let result = op(input.as_path(), config);
				if let Err(e) = &result {
					log::warn!("{} {} failed: {}", label, input.display(), e);
				}
				pb.inc(1);
				result
			})
			.collect()
	});

	pb.finish_with_message("done");
	Ok(results)
}

fn progress_bar(len: u64, visible: bool, label: &'static str) -> ProgressBar {
	if !visible {
		return ProgressBar::hidden();
	}
	let pb = ProgressBar::new(len);
	if let Ok(style) = ProgressStyle::default_bar()
		.template("{spinner:.green} {prefix} [{elapsed_precise}] [{bar:40.cyan/blue}] Files {pos}/{len} {msg}")
	{
		pb.set_style(style.progress_chars("#>-"));
	}
	pb.set_prefix(label);
	pb
}

/// Writes `data` to a file in `dir` that did not exist before.
fn write_new(dir: &Path, name: &str, data: &[u8]) -> Result<PathBuf, HuffError> {
	let (path, mut file) = create_unique(dir, name)?;
	file.write_all(data)?;
	Ok(path)
}

fn create_unique(dir: &Path, name: &str) -> io::Result<(PathBuf, File)> {
	let mut path = dir.join(name);
	for attempt in 1..=MAX_RENAMES {
		match OpenOptions::new().write(true).create_new(true).open(&path) {
			Ok(file) => return Ok((path, file)),
			Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
				log::debug!("{} exists, trying another name", path.display());
				path = dir.join(numbered_name(name, attempt));
			}
			Err(e) => return Err(e),
		}
	}
	Err(io::Error::new(
		io::ErrorKind::AlreadyExists,
		format!("no free name for {} in {}", name, dir.display()),
	))
}

/// `report.txt` -> `report (n).txt`, numbering in front of the last extension.
fn numbered_name(name: &str, n: usize) -> String {
	match name.rfind('.') {
		Some(dot) if dot > 0 => format!("{} ({}){}", &name[..dot], n, &name[dot..]),
		_ => format!("{} ({})", name, n),
	}
}

fn output_dir(input: &Path, config: &HuffConfig) -> PathBuf {
	match &config.output_dir {
		Some(dir) => dir.clone(),
		None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
	}
}

fn file_name(path: &Path) -> String {
	path.file_name()
		.map(|name| name.to_string_lossy().into_owned())
		.unwrap_or_default()
}

/// The stored name reduced to its last path component, or the container's
/// own name with the extension swapped for `.decompressed`.
fn restored_name(stored: &str, input: &Path, extension: &str) -> String {
	let stored = Path::new(stored)
		.file_name()
		.and_then(|name| name.to_str())
		.filter(|name| !name.is_empty());
	if let Some(name) = stored {
		return name.to_string();
	}

	let container_name = file_name(input);
	let suffix = format!(".{}", extension.trim_start_matches('.'));
	let stem = container_name.strip_suffix(&suffix).unwrap_or(&container_name);
	format!("{}.{}", stem, FALLBACK_SUFFIX)
}

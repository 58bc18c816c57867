use crate::codec;
use crate::config::{HuffConfig, ReportFormat};
use crate::error::HuffError;
use crate::pipeline::{self, BatchSummary, CompressReport, DecompressReport, Report};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(author, version, about, long_about = "Static Huffman compression for individual files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compresses files into Huffman containers
    Compress(BatchArgs),
    /// Restores files from Huffman containers under their original names
    Decompress(BatchArgs),
    /// Prints the header of a container without writing anything
    Inspect {
        /// Container to inspect
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Report format [text, json]
        #[arg(short, long, default_value = "text")]
        report: ReportFormat,
    },
}

#[derive(Args)]
struct BatchArgs {
    /// Files to process
    #[arg(required = true, value_name = "FILE")]
    inputs: Vec<PathBuf>,

    /// Directory for the results (default: next to each input)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Number of threads to use (default: all available cores)
    #[arg(short, long)]
    threads: Option<usize>,

    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,

    /// Report format [text, json]
    #[arg(short, long, default_value = "text")]
    report: ReportFormat,
}

impl BatchArgs {
    fn config(&self) -> HuffConfig {
        HuffConfig {
            threads: self.threads.unwrap_or_else(num_cpus::get),
            output_dir: self.output_dir.clone(),
            progress: !self.no_progress,
            report: self.report,
            ..Default::default()
        }
    }
}

#[derive(Serialize)]
struct JsonEntry<'a, T: Serialize> {
    input: &'a Path,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<&'a T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct JsonBatch<'a, T: Serialize> {
    files: Vec<JsonEntry<'a, T>>,
    summary: BatchSummary,
}

/// Runs the command line and returns how many files failed.
pub fn run() -> Result<usize, HuffError> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Compress(args) => {
            let config = args.config();
            let start = Instant::now();
            let results = pipeline::compress_files(&args.inputs, &config)?;
            log::debug!("compressed {} files in {:.2?}", results.len(), start.elapsed());

            match config.report {
                ReportFormat::Text => {
                    for (input, result) in args.inputs.iter().zip(&results) {
                        match result {
                            Ok(report) => print_compress(report),
                            Err(e) => eprintln!("Failed to compress {}: {}\n", input.display(), e),
                        }
                    }
                }
                ReportFormat::Json => print_json(&args.inputs, &results)?,
            }
            Ok(BatchSummary::collect(&results).failed)
        }
        Commands::Decompress(args) => {
            let config = args.config();
            let start = Instant::now();
            let results = pipeline::decompress_files(&args.inputs, &config)?;
            log::debug!("decompressed {} files in {:.2?}", results.len(), start.elapsed());

            match config.report {
                ReportFormat::Text => {
                    for (input, result) in args.inputs.iter().zip(&results) {
                        match result {
                            Ok(report) => print_decompress(report),
                            Err(e) => eprintln!("Failed to decompress {}: {}\n", input.display(), e),
                        }
                    }
                }
                ReportFormat::Json => print_json(&args.inputs, &results)?,
            }
            Ok(BatchSummary::collect(&results).failed)
        }
        Commands::Inspect { input, report } => {
            let bytes = fs::read(input)?;
            let info = codec::inspect(&bytes)?;
            match report {
                ReportFormat::Text => {
                    println!("{}", input.display());
                    println!("  Original Name:    \"{}\"", info.original_file_name);
                    println!("  Symbols:          {}", info.distinct_symbols);
                    println!("  Longest Code:     {} bits", info.longest_code);
                    println!("  Payload:          {} bytes ({} bits + {} padding)", info.payload_bytes, info.encoded_bits, info.padding);
                }
                ReportFormat::Json => {
                    let json = serde_json::to_string_pretty(&info)?;
                    println!("{}", json);
                }
            }
            Ok(0)
        }
    }
}

fn print_compress(report: &CompressReport) {
    println!("Compressed \"{}\" -> {}", report.input.display(), report.output.display());
    println!("  Original Size:    {} bytes", report.stats.original_size);
    println!("  Compressed Size:  {} bytes", report.stats.compressed_size);
    println!("  Compression:      {:.2}%", report.stats.savings_percent);
    println!();
}

fn print_decompress(report: &DecompressReport) {
    println!("Decompressed \"{}\" -> {}", report.input.display(), report.output.display());
    println!("  Original Name:      \"{}\"", report.original_file_name);
    println!("  Decompressed Size:  {} bytes", report.decompressed_size);
    println!();
}

fn print_json<T: Serialize + Report>(inputs: &[PathBuf], results: &[Result<T, HuffError>]) -> Result<(), HuffError> {
    let files = inputs
        .iter()
        .zip(results)
        .map(|(input, result)| match result {
            Ok(report) => JsonEntry { input: input.as_path(), report: Some(report), error: None },
            Err(e) => JsonEntry { input: input.as_path(), report: None, error: Some(e.to_string()) },
        })
        .collect();
    let batch = JsonBatch { files, summary: BatchSummary::collect(results) };
    let json = serde_json::to_string_pretty(&batch)?;
    println!("{}", json);
    Ok(())
}

//! # huffpack
//!
//! A static, byte-oriented Huffman codec with a self-describing container.
//!
//! ## Features
//!
//! - **Optimal prefix codes**: codes are built from byte frequencies with a
//!   deterministic min-heap Huffman construction
//! - **Self-describing containers**: a JSON header carries the code table, the
//!   padding bit count and the original file name, followed by a NUL delimiter
//!   and the packed payload
//! - **Strict decoding**: malformed headers, invalid code tables, bad padding
//!   and truncated payloads are reported as errors
//! - **Parallel batches**: the file pipeline compresses many independent files
//!   at once, reporting failures per file
//!
//! ## Quick Start
//!
//! ### Basic Compression/Decompression
//!
//! ```rust
//! use huffpack::{compress, decompress};
//!
//! let original = b"Hello, world! This is test data.";
//! let container = compress(original, "hello.txt");
//!
//! let restored = decompress(&container).unwrap();
//! assert_eq!(restored.data, original.to_vec());
//! assert_eq!(restored.original_file_name, "hello.txt");
//! ```
//!
//! ### Inspecting a Container
//!
//! ```rust
//! use huffpack::{compress, inspect};
//!
//! let container = compress(&[5, 5, 5, 5, 5], "fives.bin");
//! let info = inspect(&container).unwrap();
//! assert_eq!(info.distinct_symbols, 1);
//! assert_eq!(info.padding, 3);
//! ```
//!
//! ### Working with Files
//!
//! ```rust,no_run
//! use huffpack::{pipeline, HuffConfig};
//! use std::path::PathBuf;
//!
//! # fn example() -> Result<(), huffpack::HuffError> {
//! let config = HuffConfig::default().with_output_dir("out");
//! let inputs = vec![PathBuf::from("a.txt"), PathBuf::from("b.bin")];
//!
//! for result in pipeline::compress_files(&inputs, &config)? {
//!     match result {
//!         Ok(report) => println!("{:.2}% saved", report.stats.savings_percent),
//!         Err(e) => eprintln!("failed: {}", e),
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod bits;
pub mod cli;
pub mod codec;
pub mod codes;
pub mod config;
pub mod container;
pub mod error;
pub mod frequency;
pub mod pipeline;
pub mod tree;

// Re-export commonly used types for convenience
pub use codec::{compress, decompress, inspect, validate, ContainerInfo, Decompressed};
pub use codes::CodeTable;
pub use config::{HuffConfig, ReportFormat};
pub use container::{Container, Header};
pub use error::{HuffError, Result};
pub use frequency::FrequencyTable;
pub use pipeline::{BatchSummary, CompressReport, CompressionStats, DecompressReport};
pub use tree::{CodeTree, CodeTreeNode};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

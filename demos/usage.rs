use huffpack::{compress, decompress, inspect, CompressionStats};

fn main() {
	let data = b"hello hello hello hello".to_vec();
	let container = compress(&data, "hello.txt");
	let stats = CompressionStats::new(data.len() as u64, container.len() as u64);
	println!("compressed {} -> {} ({:.2}%)", stats.original_size, stats.compressed_size, stats.savings_percent);

	let info = inspect(&container).unwrap();
	println!("{} symbols, {} payload bits, padding {}", info.distinct_symbols, info.encoded_bits, info.padding);

	let restored = decompress(&container).unwrap();
	println!("restored {} bytes as \"{}\"", restored.data.len(), restored.original_file_name);
}

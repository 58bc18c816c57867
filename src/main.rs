use huffpack::cli;

fn main() {
	env_logger::init();
	match cli::run() {
		Ok(0) => {}
		Ok(failed) => {
			eprintln!("{} file(s) failed", failed);
			std::process::exit(1);
		}
		Err(e) => {
			eprintln!("Error: {}", e);
			std::process::exit(1);
		}
	}
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HuffError {
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Invalid container format: {0}")]
	Format(String),

	#[error("Decoding failed: {0}")]
	Decode(String),

	#[error("Configuration error: {0}")]
	Config(String),

	#[error("Failed to write report: {0}")]
	Report(#[from] serde_json::Error),
}

impl HuffError {
	pub(crate) fn format(msg: impl Into<String>) -> Self {
		HuffError::Format(msg.into())
	}

	pub(crate) fn decode(msg: impl Into<String>) -> Self {
		HuffError::Decode(msg.into())
	}

	/// True for errors raised by a structurally invalid container.
	pub fn is_format(&self) -> bool {
		matches!(self, HuffError::Format(_))
	}

	/// True for errors raised while matching payload bits against the code table.
	pub fn is_decode(&self) -> bool {
		matches!(self, HuffError::Decode(_))
	}
}


pub type Result<T> = std::result::Result<T, HuffError>;

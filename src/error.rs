use thiserror::Error;

#[derive(Error, Debug)]
pub enum SawyerError {
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Cannot encode zero bytes")]
	EmptyInput,

	#[error("Truncated record at offset {offset}: needs {needed} payload bytes, {available} available")]
	TruncatedRecord {
		offset: usize,
		needed: usize,
		available: usize,
	},

	#[error("No control byte describes a {kind} run of {len} bytes")]
	InvalidRunLength { kind: &'static str, len: usize },

	#[error("Input of {actual} bytes is shorter than its {expected}-byte trailer")]
	MissingTrailer { expected: usize, actual: usize },

	#[error("Decoded length mismatch: expected {expected} bytes, got {actual}")]
	LengthMismatch { expected: usize, actual: usize },

	#[error("Configuration error: {0}")]
	ConfigError(String),
}

pub type Result<T> = std::result::Result<T, SawyerError>;

//! # Sawyer
//!
//! Encoder and decoder for "sawyer coding", the run-length scheme used by the
//! classic park-simulation games to compress their save states, scenarios and
//! graphics containers.
//!
//! ## Features
//!
//! - **Bit-exact encoding**: produces the same streams as the game, including
//!   its 125-byte run ceiling
//! - **Tolerant decoding**: accepts any well-formed stream, not only ones this
//!   encoder would write
//! - **Container framing**: strips and re-appends checksum trailers and checks
//!   fixed decoded sizes
//! - **Batch processing**: decodes or encodes many files in parallel
//!
//! ## Quick Start
//!
//! ```rust
//! use sawyer::{decode, encode};
//!
//! let raw = [0x01, 0x01, 0x01, 0x02, 0x02, 0x03];
//! let encoded = encode(&raw).unwrap();
//! assert_eq!(encoded, vec![0xFE, 0x01, 0xFF, 0x02, 0x00, 0x03]);
//!
//! let decoded = decode(&encoded).unwrap();
//! assert_eq!(decoded, raw);
//! ```
//!
//! ### Reading a Save File
//!
//! ```rust
//! use sawyer::{frame, FrameConfig, FramePreset};
//!
//! // A stream followed by a 4-byte checksum.
//! let file = [0xFD, 0x2A, 0x11, 0x22, 0x33, 0x44];
//! let unpacked = frame::unpack(&file, &FrameConfig::from(FramePreset::Sc4)).unwrap();
//!
//! assert_eq!(unpacked.data, vec![0x2A; 4]);
//! assert_eq!(unpacked.trailer, vec![0x11, 0x22, 0x33, 0x44]);
//! ```

pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod frame;
pub mod pipeline;

// Re-export commonly used types for convenience
pub use codec::{decode, encode, inspect, records, validate, ControlByte, Record, StreamInfo, MAX_LITERAL_LEN, MAX_REPEAT_COUNT, MAX_RUN_LENGTH};
pub use config::{FrameConfig, FramePreset, PipelineConfig, CHECKSUM_LEN, SAVE_STATE_SIZE};
pub use error::{Result, SawyerError};
pub use frame::{decode_framed, Unpacked};
pub use pipeline::{CodecStats, Direction, Job, JobReport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

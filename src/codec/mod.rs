//! Sawyer coding, the run-length scheme behind the game's save and graphics files.
//!
//! An encoded stream is a plain concatenation of records. Every record opens
//! with a control byte `cmd`:
//!
//! * `cmd < 0x80`: literal run, the next `cmd + 1` bytes are copied verbatim.
//! * `cmd >= 0x80`: repeat run, the next byte is repeated `(1 - cmd) mod 256` times.
//!
//! The stream carries no length prefix and no terminator. Where it ends is
//! decided by whatever file wraps it (see [`crate::frame`]).

pub mod decoder;
pub mod encoder;
mod run;

pub use decoder::{decode, inspect, records, validate, Records, StreamInfo};
pub use encoder::encode;

use crate::error::{Result, SawyerError};

/// Longest run the game's own decoder can buffer.
pub const MAX_RUN_LENGTH: usize = 125;

/// Control bytes at or above this value open a repeat run.
pub const REPEAT_FLAG: u8 = 0x80;

/// Longest literal a control byte can describe (`0x7F`).
pub const MAX_LITERAL_LEN: usize = 128;

/// Longest repeat a control byte can describe (`0x80`).
pub const MAX_REPEAT_COUNT: usize = 129;

/// Interpretation of a single control byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlByte {
    /// `len` literal bytes follow.
    Literal(usize),
    /// One byte follows, expanded `count` times.
    Repeat(usize),
}

impl ControlByte {
    /// Control byte for a literal run of `len` bytes.
    pub fn literal(len: usize) -> Result<u8> {
        if !(1..=MAX_LITERAL_LEN).contains(&len) {
            return Err(SawyerError::InvalidRunLength { kind: "literal", len });
        }
        Ok((len - 1) as u8)
    }

    /// Control byte for a repeat run of `count` bytes, `(1 - count) mod 256`.
    pub fn repeat(count: usize) -> Result<u8> {
        if !(2..=MAX_REPEAT_COUNT).contains(&count) {
            return Err(SawyerError::InvalidRunLength { kind: "repeat", len: count });
        }
        Ok(1u8.wrapping_sub(count as u8))
    }

    /// Number of payload bytes that follow this control byte.
    pub fn payload_len(self) -> usize {
        match self {
            ControlByte::Literal(len) => len,
            ControlByte::Repeat(_) => 1,
        }
    }

    /// Number of bytes this record expands to.
    pub fn run_len(self) -> usize {
        match self {
            ControlByte::Literal(len) | ControlByte::Repeat(len) => len,
        }
    }
}

impl From<u8> for ControlByte {
    fn from(cmd: u8) -> Self {
        if cmd < REPEAT_FLAG {
            ControlByte::Literal(cmd as usize + 1)
        } else {
            ControlByte::Repeat(1u8.wrapping_sub(cmd) as usize)
        }
    }
}

/// One decoded record, borrowing its literal payload from the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record<'a> {
    Literal(&'a [u8]),
    Repeat { value: u8, count: usize },
}

impl Record<'_> {
    /// Number of raw bytes this record stands for.
    pub fn run_len(&self) -> usize {
        match self {
            Record::Literal(bytes) => bytes.len(),
            Record::Repeat { count, .. } => *count,
        }
    }

    /// Append the control byte and payload.
    ///
    /// Fails with [`SawyerError::InvalidRunLength`] when no control byte can
    /// describe the record; `out` is left untouched in that case.
    pub fn encode_into(&self, out: &mut Vec<u8>) -> Result<()> {
        match *self {
            Record::Literal(bytes) => {
                out.push(ControlByte::literal(bytes.len())?);
                out.extend_from_slice(bytes);
            }
            Record::Repeat { value, count } => {
                out.push(ControlByte::repeat(count)?);
                out.push(value);
            }
        }
        Ok(())
    }

    /// Append the raw bytes this record expands to.
    pub fn expand_into(&self, out: &mut Vec<u8>) {
        match *self {
            Record::Literal(bytes) => out.extend_from_slice(bytes),
            Record::Repeat { value, count } => out.resize(out.len() + count, value),
        }
    }
}

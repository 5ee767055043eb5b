//! Sawyer decoder.
//!
//! Accepts any stream that follows the record grammar, including records the
//! encoder never writes (one-byte literals in a row, repeats longer than
//! [`MAX_RUN_LENGTH`](super::MAX_RUN_LENGTH)).

use super::{ControlByte, Record};
use crate::error::{Result, SawyerError};

/// Iterator over the records of an encoded stream.
///
/// Yields each record together with the offset of its control byte. A
/// truncated record ends iteration after its error.
#[derive(Debug, Clone)]
pub struct Records<'a> {
    input: &'a [u8],
    pos: usize,
}

/// Iterate over the records of `encoded`.
pub fn records(encoded: &[u8]) -> Records<'_> {
    Records { input: encoded, pos: 0 }
}

impl<'a> Iterator for Records<'a> {
    type Item = Result<(usize, Record<'a>)>;

    fn next(&mut self) -> Option<Self::Item> {
        let offset = self.pos;
        let (&cmd, payload) = self.input.get(offset..)?.split_first()?;

        let control = ControlByte::from(cmd);
        let needed = control.payload_len();
        if payload.len() < needed {
            self.pos = self.input.len();
            return Some(Err(SawyerError::TruncatedRecord {
                offset,
                needed,
                available: payload.len(),
            }));
        }

        let record = match control {
            ControlByte::Literal(len) => Record::Literal(&payload[..len]),
            ControlByte::Repeat(count) => Record::Repeat { value: payload[0], count },
        };
        self.pos = offset + 1 + needed;
        Some(Ok((offset, record)))
    }
}

/// Decode a complete Sawyer stream.
///
/// All or nothing: a [`SawyerError::TruncatedRecord`] anywhere discards
/// everything decoded before it.
pub fn decode(encoded: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(encoded.len() * 2);

    for item in records(encoded) {
        let (_, record) = item?;
        record.expand_into(&mut out);
    }

    log::debug!("decoded {} bytes into {}", encoded.len(), out.len());
    Ok(out)
}

/// Summary of an encoded stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamInfo {
    pub encoded_size: usize,
    pub decoded_size: usize,
    pub literal_runs: usize,
    pub repeat_runs: usize,
    pub longest_run: usize,
}

impl StreamInfo {
    pub fn records(&self) -> usize {
        self.literal_runs + self.repeat_runs
    }

    /// Decoded size over encoded size; zero for an empty stream.
    pub fn ratio(&self) -> f64 {
        if self.encoded_size > 0 {
            self.decoded_size as f64 / self.encoded_size as f64
        } else {
            0.0
        }
    }
}

/// Walk `encoded` and tally its records without expanding them.
pub fn inspect(encoded: &[u8]) -> Result<StreamInfo> {
    let mut info = StreamInfo {
        encoded_size: encoded.len(),
        ..Default::default()
    };

    for item in records(encoded) {
        let (_, record) = item?;
        match record {
            Record::Literal(_) => info.literal_runs += 1,
            Record::Repeat { .. } => info.repeat_runs += 1,
        }
        info.decoded_size += record.run_len();
        info.longest_run = info.longest_run.max(record.run_len());
    }

    Ok(info)
}

/// Check that every record in `encoded` is complete.
pub fn validate(encoded: &[u8]) -> Result<()> {
    records(encoded).try_for_each(|item| item.map(|_| ()))
}

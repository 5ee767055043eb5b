use super::{Record, MAX_RUN_LENGTH};
use crate::error::Result;

/// The run the encoder is currently assembling.
///
/// A run is replaced wholesale whenever it changes shape or gets flushed, so
/// each variant only ever holds bytes that fit its classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Run {
    /// A single byte, not yet known to start a literal or a repeat.
    Undetermined(u8),
    Repeat { value: u8, count: usize },
    Literal(Vec<u8>),
}

impl Run {
    pub(crate) fn len(&self) -> usize {
        match self {
            Run::Undetermined(_) => 1,
            Run::Repeat { count, .. } => *count,
            Run::Literal(bytes) => bytes.len(),
        }
    }

    pub(crate) fn is_full(&self) -> bool {
        self.len() >= MAX_RUN_LENGTH
    }

    /// Feed the next byte. `prev` is the byte scanned just before `current`.
    ///
    /// Returns the run that continues the scan; any run completed along the
    /// way is flushed into `out`.
    pub(crate) fn push(self, prev: u8, current: u8, out: &mut Vec<u8>) -> Result<Run> {
        let run = match self {
            Run::Undetermined(value) => {
                if current == prev {
                    Run::Repeat { value, count: 2 }
                } else {
                    let mut bytes = Vec::with_capacity(MAX_RUN_LENGTH);
                    bytes.push(value);
                    bytes.push(current);
                    Run::Literal(bytes)
                }
            }
            Run::Repeat { value, count } => {
                if current == prev {
                    Run::Repeat { value, count: count + 1 }
                } else {
                    Run::Repeat { value, count }.flush(out)?;
                    Run::Undetermined(current)
                }
            }
            Run::Literal(mut bytes) => {
                if current == prev {
                    // prev opens a repeat run, so it leaves the literal
                    let popped = bytes.pop();
                    debug_assert_eq!(popped, Some(prev));
                    debug_assert!(!bytes.is_empty(), "literal run emptied by repeat switch");
                    Run::Literal(bytes).flush(out)?;
                    Run::Repeat { value: prev, count: 2 }
                } else {
                    bytes.push(current);
                    Run::Literal(bytes)
                }
            }
        };
        Ok(run)
    }

    pub(crate) fn record(&self) -> Record<'_> {
        match self {
            Run::Undetermined(value) => Record::Literal(std::slice::from_ref(value)),
            Run::Repeat { value, count } => Record::Repeat { value: *value, count: *count },
            Run::Literal(bytes) => Record::Literal(bytes),
        }
    }

    /// Emit this run as one record.
    pub(crate) fn flush(self, out: &mut Vec<u8>) -> Result<()> {
        let record = self.record();
        log::trace!("flush {:?}", record);
        record.encode_into(out)
    }
}

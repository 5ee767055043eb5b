//! Greedy Sawyer encoder.
//!
//! Bytes are scanned once, left to right, with a single [`Run`] live at a
//! time. The output matches what the game itself writes byte for byte, which
//! is not always the shortest possible stream.

use super::run::Run;
use super::MAX_RUN_LENGTH;
use crate::error::{Result, SawyerError};

/// Encode `raw` into a Sawyer stream.
///
/// Fails with [`SawyerError::EmptyInput`] on an empty buffer.
pub fn encode(raw: &[u8]) -> Result<Vec<u8>> {
    let (&first, _) = raw.split_first().ok_or(SawyerError::EmptyInput)?;

    let mut out = Vec::with_capacity(raw.len() + raw.len() / MAX_RUN_LENGTH + 2);
    let mut run = Run::Undetermined(first);
    let mut prev = first;
    let mut i = 1;

    while i < raw.len() {
        let current = raw[i];
        run = run.push(prev, current, &mut out)?;

        if run.is_full() {
            run.flush(&mut out)?;
            if i + 1 == raw.len() {
                log::debug!("encoded {} bytes into {}", raw.len(), out.len());
                return Ok(out);
            }
            // The byte after the ceiling seeds the next run without being
            // compared to the byte before it.
            i += 1;
            run = Run::Undetermined(raw[i]);
        }

        prev = raw[i];
        i += 1;
    }

    run.flush(&mut out)?;
    log::debug!("encoded {} bytes into {}", raw.len(), out.len());
    Ok(out)
}

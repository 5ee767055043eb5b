//! Container framing around a Sawyer stream.
//!
//! Game files append a checksum after the encoded stream and some of them
//! require a fixed decoded size. Neither belongs to the codec, so both are
//! handled here.

use crate::codec;
use crate::config::FrameConfig;
use crate::error::{Result, SawyerError};

/// A decoded file together with the trailer that followed its stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unpacked {
    pub data: Vec<u8>,
    pub trailer: Vec<u8>,
}

/// Split `file` into its encoded stream and a `trailer_len` byte trailer.
pub fn split_trailer(file: &[u8], trailer_len: usize) -> Result<(&[u8], &[u8])> {
    let body_len = file
        .len()
        .checked_sub(trailer_len)
        .ok_or(SawyerError::MissingTrailer {
            expected: trailer_len,
            actual: file.len(),
        })?;
    Ok(file.split_at(body_len))
}

/// Fail unless `actual` matches the expected decoded length.
pub fn check_len(actual: usize, expected: Option<usize>) -> Result<()> {
    match expected {
        Some(expected) if actual != expected => Err(SawyerError::LengthMismatch { expected, actual }),
        _ => Ok(()),
    }
}

/// Decode `file` after dropping its last `trailer_len` bytes.
pub fn decode_framed(file: &[u8], trailer_len: usize) -> Result<Vec<u8>> {
    let (body, _) = split_trailer(file, trailer_len)?;
    codec::decode(body)
}

/// Strip the trailer, decode the stream and enforce the container's size.
pub fn unpack(file: &[u8], frame: &FrameConfig) -> Result<Unpacked> {
    let (body, trailer) = split_trailer(file, frame.trailer_len)?;
    let data = codec::decode(body)?;
    check_len(data.len(), frame.expected_len)?;

    Ok(Unpacked {
        data,
        trailer: trailer.to_vec(),
    })
}

/// Encode `raw` and append a trailer.
///
/// The checksum is not computed here. Without an explicit `trailer` the
/// trailer is zero-filled and must be patched by the caller.
pub fn pack(raw: &[u8], frame: &FrameConfig, trailer: Option<&[u8]>) -> Result<Vec<u8>> {
    check_len(raw.len(), frame.expected_len)?;

    let mut out = codec::encode(raw)?;
    match trailer {
        Some(trailer) if trailer.len() == frame.trailer_len => out.extend_from_slice(trailer),
        Some(trailer) => {
            return Err(SawyerError::ConfigError(format!(
                "Trailer is {} bytes, frame expects {}",
                trailer.len(),
                frame.trailer_len
            )))
        }
        None => {
            if frame.trailer_len > 0 {
                log::warn!("writing zero-filled {}-byte trailer", frame.trailer_len);
            }
            out.resize(out.len() + frame.trailer_len, 0);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FramePreset;

    #[test]
    fn test_split_trailer() {
        let (body, trailer) = split_trailer(&[1, 2, 3, 4, 5], 4).unwrap();
        assert_eq!(body, &[1]);
        assert_eq!(trailer, &[2, 3, 4, 5]);

        assert!(matches!(
            split_trailer(&[1, 2], 4),
            Err(SawyerError::MissingTrailer { expected: 4, actual: 2 })
        ));
    }

    #[test]
    fn test_check_len() {
        assert!(check_len(3, None).is_ok());
        assert!(check_len(3, Some(3)).is_ok());
        assert!(matches!(
            check_len(2, Some(3)),
            Err(SawyerError::LengthMismatch { expected: 3, actual: 2 })
        ));
    }

    #[test]
    fn test_decode_framed() {
        let file = [0xFF, 0x00, 0x05, 0x00, 0x00, 0x00];
        assert_eq!(decode_framed(&file, 4).unwrap(), vec![0x00, 0x00]);
        // read as part of the stream, the checksum is a truncated literal
        assert!(matches!(
            decode_framed(&file, 0),
            Err(SawyerError::TruncatedRecord { offset: 2, .. })
        ));
    }

    #[test]
    fn test_unpack_keeps_trailer() {
        let frame = FrameConfig::from(FramePreset::Sc4);
        let unpacked = unpack(&[0x02, 1, 2, 3, 9, 8, 7, 6], &frame).unwrap();
        assert_eq!(unpacked.data, vec![1, 2, 3]);
        assert_eq!(unpacked.trailer, vec![9, 8, 7, 6]);
    }

    #[test]
    fn test_unpack_length_check() {
        let frame = FrameConfig::default().with_expected_len(Some(4));
        assert!(matches!(
            unpack(&[0xFE, 0x00], &frame),
            Err(SawyerError::LengthMismatch { expected: 4, actual: 3 })
        ));
        assert!(unpack(&[0xFD, 0x00], &frame).is_ok());
    }

    #[test]
    fn test_pack_roundtrip() {
        let frame = FrameConfig::from(FramePreset::Sc4);
        let raw = b"ABBBBBCD".to_vec();
        let packed = pack(&raw, &frame, Some(&[1, 2, 3, 4])).unwrap();
        assert_eq!(&packed[packed.len() - 4..], &[1, 2, 3, 4]);

        let unpacked = unpack(&packed, &frame).unwrap();
        assert_eq!(unpacked.data, raw);
        assert_eq!(unpacked.trailer, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_pack_zero_trailer() {
        let frame = FrameConfig::from(FramePreset::Sc4);
        let packed = pack(&[7], &frame, None).unwrap();
        assert_eq!(packed, vec![0x00, 7, 0, 0, 0, 0]);
    }

    #[test]
    fn test_pack_rejects_bad_trailer() {
        let frame = FrameConfig::from(FramePreset::Sc4);
        assert!(matches!(
            pack(&[7], &frame, Some(&[1, 2])),
            Err(SawyerError::ConfigError(_))
        ));
    }

    #[test]
    fn test_pack_rejects_wrong_save_size() {
        let frame = FrameConfig::from(FramePreset::Sv4);
        assert!(matches!(
            pack(&[0; 16], &frame, None),
            Err(SawyerError::LengthMismatch { .. })
        ));
    }
}

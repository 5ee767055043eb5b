use crate::error::SawyerError;
use std::str::FromStr;

/// Decompressed size of every save state, regardless of its encoded size.
pub const SAVE_STATE_SIZE: usize = 2_065_676;

/// Length of the checksum appended to encoded save and scenario files.
pub const CHECKSUM_LEN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramePreset {
    /// Bare codec stream, nothing appended.
    Raw,
    /// Save state: checksum trailer and a fixed decoded size.
    Sv4,
    /// Scenario and graphics containers: checksum trailer only.
    Sc4,
}

/// How an encoded stream sits inside its file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameConfig {
    pub trailer_len: usize,
    pub expected_len: Option<usize>,
}

impl FrameConfig {
    pub fn with_trailer_len(mut self, trailer_len: usize) -> Self {
        self.trailer_len = trailer_len;
        self
    }

    pub fn with_expected_len(mut self, expected_len: Option<usize>) -> Self {
        self.expected_len = expected_len;
        self
    }
}

impl From<FramePreset> for FrameConfig {
    fn from(preset: FramePreset) -> Self {
        match preset {
            FramePreset::Raw => FrameConfig::default(),
            FramePreset::Sv4 => FrameConfig {
                trailer_len: CHECKSUM_LEN,
                expected_len: Some(SAVE_STATE_SIZE),
            },
            FramePreset::Sc4 => FrameConfig {
                trailer_len: CHECKSUM_LEN,
                expected_len: None,
            },
        }
    }
}

impl FromStr for FramePreset {
    type Err = SawyerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "raw" => Ok(FramePreset::Raw),
            "sv4" => Ok(FramePreset::Sv4),
            "sc4" => Ok(FramePreset::Sc4),
            _ => Err(SawyerError::ConfigError(format!("Invalid preset: {}", s))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub frame: FrameConfig,
    pub threads: usize,
    pub progress: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            frame: FrameConfig::default(),
            threads: num_cpus::get(),
            progress: false,
        }
    }
}

impl PipelineConfig {
    pub fn with_frame(mut self, frame: FrameConfig) -> Self {
        self.frame = frame;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_parsing() {
        assert_eq!("sv4".parse::<FramePreset>().unwrap(), FramePreset::Sv4);
        assert_eq!("SC4".parse::<FramePreset>().unwrap(), FramePreset::Sc4);
        assert_eq!("raw".parse::<FramePreset>().unwrap(), FramePreset::Raw);
        assert!(matches!(
            "td6".parse::<FramePreset>(),
            Err(SawyerError::ConfigError(_))
        ));
    }

    #[test]
    fn test_preset_frames() {
        let sv4 = FrameConfig::from(FramePreset::Sv4);
        assert_eq!(sv4.trailer_len, 4);
        assert_eq!(sv4.expected_len, Some(SAVE_STATE_SIZE));

        let raw = FrameConfig::from(FramePreset::Raw);
        assert_eq!(raw, FrameConfig::default());
    }

    #[test]
    fn test_overrides() {
        let frame = FrameConfig::from(FramePreset::Sv4)
            .with_trailer_len(0)
            .with_expected_len(None);
        assert_eq!(frame, FrameConfig::default());
    }
}

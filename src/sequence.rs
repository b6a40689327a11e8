use crate::decode::PreparedFrame;
use crate::error::{ScrubError, ScrubResult};

/// Filename prefix used by the production asset pipeline.
pub const DEFAULT_FILENAME_PREFIX: &str = "ezgif-frame-";

/// Identity of one frame sequence: an asset directory, a frame count, and a
/// filename prefix. Frame files are numbered 1..=N and zero-padded to width 3
/// (`{prefix}001.jpg`). Indices >= 1000 widen past three digits; that matches
/// the asset naming contract and is an accepted limitation.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SequenceSpec {
    pub sequence_path: String,
    pub frame_count: u32,
    #[serde(default = "default_prefix")]
    pub filename_prefix: String,
}

fn default_prefix() -> String {
    DEFAULT_FILENAME_PREFIX.to_owned()
}

impl SequenceSpec {
    pub fn new(sequence_path: impl Into<String>, frame_count: u32) -> Self {
        Self {
            sequence_path: sequence_path.into(),
            frame_count,
            filename_prefix: default_prefix(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.filename_prefix = prefix.into();
        self
    }

    pub fn validate(&self) -> ScrubResult<()> {
        if self.frame_count == 0 {
            return Err(ScrubError::validation(
                "SequenceSpec frame_count must be > 0",
            ));
        }
        if self.sequence_path.is_empty() {
            return Err(ScrubError::validation(
                "SequenceSpec sequence_path must be non-empty",
            ));
        }
        if self.filename_prefix.is_empty() {
            return Err(ScrubError::validation(
                "SequenceSpec filename_prefix must be non-empty",
            ));
        }
        Ok(())
    }

    /// Asset-root-relative path for a 1-based frame index.
    pub fn frame_rel_path(&self, index: u32) -> String {
        format!(
            "{}/{}{:03}.jpg",
            self.sequence_path, self.filename_prefix, index
        )
    }
}

/// Lifecycle of one frame inside its sequence. A failed frame stays in the
/// list as a placeholder and is skipped at draw time; the list never shrinks.
#[derive(Clone, Debug, Default)]
pub enum FrameSlot {
    #[default]
    Pending,
    Loaded(PreparedFrame),
    Failed,
}

impl FrameSlot {
    pub fn image(&self) -> Option<&PreparedFrame> {
        match self {
            Self::Loaded(frame) => Some(frame),
            Self::Pending | Self::Failed => None,
        }
    }

    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_paths_are_zero_padded() {
        let spec = SequenceSpec::new("sequence-1", 120);
        assert_eq!(spec.frame_rel_path(1), "sequence-1/ezgif-frame-001.jpg");
        assert_eq!(spec.frame_rel_path(42), "sequence-1/ezgif-frame-042.jpg");
        assert_eq!(spec.frame_rel_path(999), "sequence-1/ezgif-frame-999.jpg");
    }

    #[test]
    fn indices_past_999_widen_instead_of_truncating() {
        let spec = SequenceSpec::new("sequence-1", 1200);
        assert_eq!(spec.frame_rel_path(1000), "sequence-1/ezgif-frame-1000.jpg");
    }

    #[test]
    fn custom_prefix_is_used() {
        let spec = SequenceSpec::new("clouds", 10).with_prefix("cloud-");
        assert_eq!(spec.frame_rel_path(3), "clouds/cloud-003.jpg");
    }

    #[test]
    fn validate_rejects_bad_specs() {
        assert!(SequenceSpec::new("sequence-1", 0).validate().is_err());
        assert!(SequenceSpec::new("", 10).validate().is_err());
        assert!(
            SequenceSpec::new("sequence-1", 10)
                .with_prefix("")
                .validate()
                .is_err()
        );
        assert!(SequenceSpec::new("sequence-1", 10).validate().is_ok());
    }

    #[test]
    fn serde_defaults_the_prefix() {
        let spec: SequenceSpec =
            serde_json::from_str(r#"{"sequence_path":"sequence-2","frame_count":120}"#).unwrap();
        assert_eq!(spec.filename_prefix, DEFAULT_FILENAME_PREFIX);
    }
}

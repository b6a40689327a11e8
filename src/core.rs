use crate::error::{ScrubError, ScrubResult};

pub use kurbo::Vec2;

/// Pixel dimensions of a drawing surface, tied to the viewport size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32) -> ScrubResult<Self> {
        if width == 0 || height == 0 {
            return Err(ScrubError::validation(
                "SurfaceSize width and height must be > 0",
            ));
        }
        Ok(Self { width, height })
    }

    /// Length of the backing RGBA8 buffer in bytes.
    pub fn byte_len(self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_dimensions() {
        assert!(SurfaceSize::new(0, 10).is_err());
        assert!(SurfaceSize::new(10, 0).is_err());
        assert!(SurfaceSize::new(1, 1).is_ok());
    }

    #[test]
    fn byte_len_is_rgba8() {
        let size = SurfaceSize::new(1920, 1080).unwrap();
        assert_eq!(size.byte_len(), 1920 * 1080 * 4);
    }
}

use std::sync::Arc;

use anyhow::Context as _;

use crate::error::ScrubResult;

/// Decoded frame in straight (non-premultiplied) RGBA8. Sequence frames are
/// opaque photographs, so no compositing-oriented preparation is needed.
#[derive(Clone, Debug)]
pub struct PreparedFrame {
    pub width: u32,
    pub height: u32,
    /// Pixel bytes in row-major RGBA8.
    pub rgba8: Arc<Vec<u8>>,
}

/// Decode frame bytes (JPEG in production; any format `image` can sniff) into
/// a [`PreparedFrame`].
pub fn decode_frame(bytes: &[u8]) -> ScrubResult<PreparedFrame> {
    let dyn_img = image::load_from_memory(bytes).context("decode frame from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(PreparedFrame {
        width,
        height,
        rgba8: Arc::new(rgba.into_raw()),
    })
}

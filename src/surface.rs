use kurbo::Vec2;

use crate::core::SurfaceSize;
use crate::decode::PreparedFrame;

/// Cover-fit placement of an image inside a target rectangle: uniform scale
/// that fully covers the target, centered, overflow cropped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoverFit {
    pub scale: f64,
    /// Top-left offset of the scaled image; non-positive on the covering axis.
    pub offset: Vec2,
}

impl CoverFit {
    pub fn compute(target: SurfaceSize, image_width: u32, image_height: u32) -> Self {
        let w = f64::from(target.width);
        let h = f64::from(target.height);
        let iw = f64::from(image_width);
        let ih = f64::from(image_height);

        let scale = (w / iw).max(h / ih);
        Self {
            scale,
            offset: Vec2::new((w - iw * scale) / 2.0, (h - ih * scale) / 2.0),
        }
    }
}

/// Mutable RGBA8 draw target tied to the viewport size.
///
/// Content is fully overwritten on every repaint; frames are opaque
/// photographs covering the whole surface, so there is no dirty-rect
/// bookkeeping. Resizing reallocates the buffer and clears it.
#[derive(Clone, Debug)]
pub struct Surface {
    size: SurfaceSize,
    data: Vec<u8>,
}

impl Surface {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            data: vec![0; size.byte_len()],
        }
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    /// Row-major RGBA8 pixel bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let i = (y as usize * self.size.width as usize + x as usize) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    pub fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
        self.data = vec![0; size.byte_len()];
    }

    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Clear, then draw the frame cover-fit with nearest-neighbor sampling.
    /// Every destination pixel maps inside the source, so the surface is fully
    /// covered after this call.
    pub fn draw_cover(&mut self, frame: &PreparedFrame) {
        let fit = CoverFit::compute(self.size, frame.width, frame.height);
        self.clear();

        let src = frame.rgba8.as_slice();
        let iw = frame.width as i64;
        let ih = frame.height as i64;
        let dst_w = self.size.width as usize;

        for y in 0..self.size.height {
            let src_y = (((f64::from(y) + 0.5 - fit.offset.y) / fit.scale).floor() as i64)
                .clamp(0, ih - 1);
            let src_row = src_y as usize * frame.width as usize;
            let dst_row = y as usize * dst_w;
            for x in 0..self.size.width {
                let src_x = (((f64::from(x) + 0.5 - fit.offset.x) / fit.scale).floor() as i64)
                    .clamp(0, iw - 1);
                let s = (src_row + src_x as usize) * 4;
                let d = (dst_row + x as usize) * 4;
                self.data[d..d + 4].copy_from_slice(&src[s..s + 4]);
            }
        }
    }
}

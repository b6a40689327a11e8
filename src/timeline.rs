use crate::error::{ScrubError, ScrubResult};

/// Converts absolute scroll position into normalized [0,1] progress for a
/// sticky container.
///
/// Semantics match a "start start" / "end end" tracking range: progress is 0
/// while the container top is below the viewport top, 1 once the container
/// bottom has reached the viewport bottom, and linear in between over
/// `container_height - viewport_height` pixels of scrolling.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollTimeline {
    container_top: f64,
    container_height: f64,
    viewport_height: f64,
}

impl ScrollTimeline {
    pub fn new(
        container_top: f64,
        container_height: f64,
        viewport_height: f64,
    ) -> ScrubResult<Self> {
        if !container_top.is_finite() || !container_height.is_finite() || !viewport_height.is_finite()
        {
            return Err(ScrubError::validation(
                "ScrollTimeline geometry must be finite",
            ));
        }
        if container_height <= 0.0 || viewport_height <= 0.0 {
            return Err(ScrubError::validation(
                "ScrollTimeline heights must be > 0",
            ));
        }
        Ok(Self {
            container_top,
            container_height,
            viewport_height,
        })
    }

    /// Progress for an absolute scroll offset, clamped to [0,1]. A container
    /// no taller than the viewport has no scrubbing range: progress snaps from
    /// 0 to 1 at the container top.
    pub fn progress(&self, scroll_y: f64) -> f64 {
        if scroll_y.is_nan() {
            return 0.0;
        }
        let span = self.container_height - self.viewport_height;
        if span <= 0.0 {
            return if scroll_y >= self.container_top { 1.0 } else { 0.0 };
        }
        ((scroll_y - self.container_top) / span).clamp(0.0, 1.0)
    }
}

use std::sync::Arc;

use crate::core::SurfaceSize;
use crate::error::ScrubResult;
use crate::fetch::FrameFetcher;
use crate::loader::SequenceLoader;
use crate::sequence::SequenceSpec;
use crate::surface::Surface;

/// Map scroll progress in [0,1] to a frame index: linear, clamped, rounded to
/// nearest. NaN input selects frame 0.
pub fn map_scroll_to_index(progress: f64, frame_count: usize) -> usize {
    if frame_count == 0 || progress.is_nan() {
        return 0;
    }
    let p = progress.clamp(0.0, 1.0);
    (p * (frame_count - 1) as f64).round() as usize
}

/// Player lifecycle. The transition is one-way and happens exactly once, when
/// the loader settles; a sequence is loaded once per mount.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerState {
    Loading,
    Ready,
}

/// Scroll-driven frame player.
///
/// Owns a [`SequenceLoader`] and a [`Surface`], and keeps the surface showing
/// the frame selected by the most recent scroll progress. Repaints happen on
/// readiness (so the surface is never blank once ready), on every change of
/// the mapped frame index, and on resize (from already-loaded frames, never a
/// re-fetch). Draws against a pending or failed frame are silent no-ops that
/// retain the previous paint.
///
/// Dropping the player is its dispose: the completion channel closes and any
/// in-flight fetch completions become no-ops.
pub struct ScrollPlayer {
    loader: SequenceLoader,
    surface: Surface,
    state: PlayerState,
    target: usize,
    last_drawn: Option<usize>,
}

impl ScrollPlayer {
    /// Start loading and return the player in `Loading` state. Frames from
    /// multiple specs are scrubbed as one concatenated sequence.
    pub fn mount(
        specs: Vec<SequenceSpec>,
        fetcher: Arc<dyn FrameFetcher>,
        size: SurfaceSize,
    ) -> ScrubResult<Self> {
        let loader = SequenceLoader::start_chain(specs, fetcher)?;
        Ok(Self {
            loader,
            surface: Surface::new(size),
            state: PlayerState::Loading,
            target: 0,
            last_drawn: None,
        })
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == PlayerState::Ready
    }

    /// Loader progress percentage, 0..=100.
    pub fn load_progress(&self) -> u8 {
        self.loader.progress()
    }

    pub fn frame_count(&self) -> usize {
        self.loader.frame_count()
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Frame index selected by the most recent scroll progress.
    pub fn target_index(&self) -> usize {
        self.target
    }

    /// Frame index currently painted on the surface, if any.
    pub fn last_drawn_index(&self) -> Option<usize> {
        self.last_drawn
    }

    /// Drain loader completions. Transitions `Loading -> Ready` (painting the
    /// current target immediately) and repaints when a straggler completion
    /// matches the current target.
    pub fn pump(&mut self) {
        let newly_loaded = self.loader.pump();
        self.apply_load_events(&newly_loaded);
    }

    /// Block until the whole sequence settles, then paint the current target.
    pub fn wait_until_ready(&mut self) -> ScrubResult<()> {
        let newly_loaded = self.loader.wait_until_ready()?;
        self.apply_load_events(&newly_loaded);
        Ok(())
    }

    fn apply_load_events(&mut self, newly_loaded: &[usize]) {
        if self.state == PlayerState::Loading && self.loader.is_ready() {
            self.state = PlayerState::Ready;
            self.draw_target();
            return;
        }
        if self.state == PlayerState::Ready
            && self.last_drawn != Some(self.target)
            && newly_loaded.contains(&self.target)
        {
            self.draw_target();
        }
    }

    /// Scroll-progress update from the external tracker. Repaints only when
    /// the mapped frame index changes; overlay curves are evaluated by the
    /// caller at whatever precision it wants, independent of this path.
    pub fn set_scroll_progress(&mut self, progress: f64) {
        self.target = map_scroll_to_index(progress, self.loader.frame_count());
        if self.state == PlayerState::Ready && self.last_drawn != Some(self.target) {
            self.draw_target();
        }
    }

    /// Viewport resize. Reallocates the surface and repaints the currently
    /// selected frame from cache; if that frame failed to load, falls back to
    /// the last frame that drew successfully.
    pub fn resize(&mut self, size: SurfaceSize) {
        if size == self.surface.size() {
            return;
        }
        self.surface.resize(size);
        if self.state != PlayerState::Ready {
            return;
        }

        let previous = self.last_drawn.take();
        self.draw_target();
        if self.last_drawn.is_none()
            && let Some(prev) = previous
            && let Some(frame) = self.loader.frame(prev)
        {
            self.surface.draw_cover(frame);
            self.last_drawn = Some(prev);
        }
    }

    fn draw_target(&mut self) {
        if self.state != PlayerState::Ready {
            return;
        }
        // Failed or pending frame: keep whatever was painted last.
        let Some(frame) = self.loader.frame(self.target) else {
            return;
        };
        self.surface.draw_cover(frame);
        self.last_drawn = Some(self.target);
    }
}

use std::sync::{Arc, mpsc};

use crate::decode::{PreparedFrame, decode_frame};
use crate::error::{ScrubError, ScrubResult};
use crate::fetch::FrameFetcher;
use crate::sequence::{FrameSlot, SequenceSpec};

struct FetchDone {
    slot: usize,
    result: ScrubResult<PreparedFrame>,
}

/// Progressive loader for one frame sequence (or a chain of sequences scrubbed
/// as one unit).
///
/// Every frame fetch is issued at construction, all in parallel with no
/// concurrency cap. Completions arrive in arbitrary order over an mpsc channel
/// and are applied by [`pump`](Self::pump) on the owner's thread, so the frame
/// list and the settled counter have exactly one writer. A fetch failure
/// counts toward progress like a success but leaves a permanent
/// [`FrameSlot::Failed`] placeholder; the list never shrinks.
///
/// Progress is an integer percentage 0..=100, monotonically non-decreasing.
/// Readiness flips to true exactly once, when every fetch has settled, and
/// never reverts. Reloading is not supported: a new sequence means a new
/// loader instance. Dropping the loader abandons in-flight fetches; their
/// late completions are no-ops.
pub struct SequenceLoader {
    slots: Vec<FrameSlot>,
    settled: usize,
    ready: bool,
    rx: mpsc::Receiver<FetchDone>,
}

impl SequenceLoader {
    /// Start loading a single sequence.
    pub fn start(spec: SequenceSpec, fetcher: Arc<dyn FrameFetcher>) -> ScrubResult<Self> {
        Self::start_chain(vec![spec], fetcher)
    }

    /// Start loading several sequences as one concatenated frame list.
    /// Progress and readiness span the whole chain.
    #[tracing::instrument(skip_all)]
    pub fn start_chain(
        specs: Vec<SequenceSpec>,
        fetcher: Arc<dyn FrameFetcher>,
    ) -> ScrubResult<Self> {
        if specs.is_empty() {
            return Err(ScrubError::validation(
                "loader needs at least one sequence spec",
            ));
        }
        for spec in &specs {
            spec.validate()?;
        }

        let mut paths = Vec::new();
        for spec in &specs {
            for index in 1..=spec.frame_count {
                paths.push(spec.frame_rel_path(index));
            }
        }
        let total = paths.len();
        tracing::debug!(total_frames = total, "starting sequence load");

        let (tx, rx) = mpsc::channel::<FetchDone>();
        for (slot, rel_path) in paths.into_iter().enumerate() {
            let tx = tx.clone();
            let fetcher = Arc::clone(&fetcher);
            // One task per frame, fired without waiting on earlier ones.
            std::thread::spawn(move || {
                let result = fetcher
                    .fetch(&rel_path)
                    .and_then(|bytes| decode_frame(&bytes));
                // The owner may already be gone; an abandoned completion is a no-op.
                let _ = tx.send(FetchDone { slot, result });
            });
        }

        Ok(Self {
            slots: vec![FrameSlot::Pending; total],
            settled: 0,
            ready: false,
            rx,
        })
    }

    /// Drain pending completions without blocking. Returns the indices that
    /// newly became [`FrameSlot::Loaded`] during this call, so the caller can
    /// repaint when a straggler frame matches its current target.
    pub fn pump(&mut self) -> Vec<usize> {
        let mut newly_loaded = Vec::new();
        while let Ok(done) = self.rx.try_recv() {
            self.settle(done, &mut newly_loaded);
        }
        newly_loaded
    }

    /// Block until every fetch has settled. Returns the indices that newly
    /// became loaded while waiting.
    pub fn wait_until_ready(&mut self) -> ScrubResult<Vec<usize>> {
        let mut newly_loaded = Vec::new();
        while !self.ready {
            let done = self.rx.recv().map_err(|_| {
                ScrubError::load("completion channel disconnected before readiness")
            })?;
            self.settle(done, &mut newly_loaded);
        }
        Ok(newly_loaded)
    }

    fn settle(&mut self, done: FetchDone, newly_loaded: &mut Vec<usize>) {
        let slot = &mut self.slots[done.slot];
        // The counter increments exactly once per frame.
        if slot.is_settled() {
            return;
        }
        match done.result {
            Ok(frame) => {
                *slot = FrameSlot::Loaded(frame);
                newly_loaded.push(done.slot);
            }
            Err(err) => {
                tracing::debug!(slot = done.slot, %err, "frame fetch failed, slot marked failed");
                *slot = FrameSlot::Failed;
            }
        }
        self.settled += 1;
        if self.settled == self.slots.len() {
            self.ready = true;
        }
    }

    /// Integer load percentage, `round(settled / frame_count * 100)`.
    pub fn progress(&self) -> u8 {
        ((self.settled * 100) as f64 / self.slots.len() as f64).round() as u8
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn frame_count(&self) -> usize {
        self.slots.len()
    }

    /// Image for a 0-based frame index; `None` while pending or after failure.
    pub fn frame(&self, index: usize) -> Option<&PreparedFrame> {
        self.slots.get(index).and_then(FrameSlot::image)
    }

    pub fn failed_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| matches!(s, FrameSlot::Failed))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::io::Cursor;

    use super::*;

    /// Serves one generated PNG per known path; errors on everything else.
    struct StubFetcher {
        known: BTreeSet<String>,
        fail: BTreeSet<String>,
        bytes: Vec<u8>,
    }

    impl StubFetcher {
        fn for_specs(specs: &[SequenceSpec], fail: &[&str]) -> Self {
            let mut known = BTreeSet::new();
            for spec in specs {
                for i in 1..=spec.frame_count {
                    known.insert(spec.frame_rel_path(i));
                }
            }

            let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([7, 7, 7, 255]));
            let mut bytes = Vec::new();
            image::DynamicImage::ImageRgba8(img)
                .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
                .unwrap();

            Self {
                known,
                fail: fail.iter().map(|s| s.to_string()).collect(),
                bytes,
            }
        }
    }

    impl FrameFetcher for StubFetcher {
        fn fetch(&self, rel_path: &str) -> ScrubResult<Vec<u8>> {
            if self.fail.contains(rel_path) || !self.known.contains(rel_path) {
                return Err(ScrubError::load(format!("no such frame '{rel_path}'")));
            }
            Ok(self.bytes.clone())
        }
    }

    #[test]
    fn all_settled_means_ready_and_100() {
        let specs = vec![SequenceSpec::new("sequence-1", 6)];
        let fetcher = Arc::new(StubFetcher::for_specs(&specs, &[]));
        let mut loader = SequenceLoader::start_chain(specs, fetcher).unwrap();

        assert!(!loader.is_ready());
        loader.wait_until_ready().unwrap();
        assert!(loader.is_ready());
        assert_eq!(loader.progress(), 100);
        assert_eq!(loader.failed_count(), 0);
        for i in 0..6 {
            assert!(loader.frame(i).is_some());
        }
    }

    #[test]
    fn failures_count_toward_readiness_but_leave_failed_slots() {
        let specs = vec![SequenceSpec::new("sequence-1", 5)];
        let fetcher = Arc::new(StubFetcher::for_specs(
            &specs,
            &[
                "sequence-1/ezgif-frame-002.jpg",
                "sequence-1/ezgif-frame-004.jpg",
            ],
        ));
        let mut loader = SequenceLoader::start_chain(specs, fetcher).unwrap();

        loader.wait_until_ready().unwrap();
        assert_eq!(loader.progress(), 100);
        assert_eq!(loader.frame_count(), 5);
        assert_eq!(loader.failed_count(), 2);
        assert!(loader.frame(1).is_none());
        assert!(loader.frame(3).is_none());
        assert!(loader.frame(0).is_some());
    }

    #[test]
    fn chain_concatenates_sequences() {
        let specs = vec![
            SequenceSpec::new("sequence-2", 3),
            SequenceSpec::new("sequence-3", 4),
        ];
        let fetcher = Arc::new(StubFetcher::for_specs(&specs, &[]));
        let mut loader = SequenceLoader::start_chain(specs, fetcher).unwrap();

        loader.wait_until_ready().unwrap();
        assert_eq!(loader.frame_count(), 7);
        assert!(loader.frame(6).is_some());
        assert!(loader.frame(7).is_none());
    }

    #[test]
    fn rejects_empty_and_invalid_specs() {
        let fetcher: Arc<dyn FrameFetcher> = Arc::new(StubFetcher::for_specs(&[], &[]));
        assert!(SequenceLoader::start_chain(Vec::new(), Arc::clone(&fetcher)).is_err());
        assert!(SequenceLoader::start(SequenceSpec::new("x", 0), fetcher).is_err());
    }

    #[test]
    fn pump_reports_newly_loaded_indices() {
        let specs = vec![SequenceSpec::new("sequence-1", 4)];
        let fetcher = Arc::new(StubFetcher::for_specs(&specs, &[]));
        let mut loader = SequenceLoader::start_chain(specs, fetcher).unwrap();

        let mut seen = BTreeSet::new();
        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(10);
        while !loader.is_ready() {
            assert!(std::time::Instant::now() < deadline, "loader never settled");
            for idx in loader.pump() {
                assert!(seen.insert(idx), "index {idx} reported twice");
            }
            std::thread::sleep(std::time::Duration::from_millis(1));
        }
        for idx in loader.pump() {
            assert!(seen.insert(idx), "index {idx} reported twice");
        }
        assert_eq!(seen, (0..4).collect::<BTreeSet<_>>());
    }
}

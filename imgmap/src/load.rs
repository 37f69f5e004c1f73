/// Polling interval for hosts that can only observe a "complete" flag.
pub const POLL_INTERVAL_MS: u32 = 500;

/// What an image element's `complete` flag and natural width say about it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadStatus {
    /// Still fetching or decoding; keep waiting.
    Pending,
    /// Decoded with a usable size.
    Ready,
    /// Complete but with no pixels: a failed fetch, a broken image or no
    /// source at all. Waiting longer will not change it.
    Failed,
}

impl LoadStatus {
    pub fn classify(complete: bool, natural_width: f64) -> LoadStatus {
        match (complete, natural_width > 0.0) {
            (false, _) => LoadStatus::Pending,
            (true, true) => LoadStatus::Ready,
            (true, false) => LoadStatus::Failed,
        }
    }
}

/// One-shot latch over image load completion. Hosts may feed it from a load
/// event, a polling timer, or both; initialization runs once either way.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadWatch {
    fired: bool,
}

impl LoadWatch {
    pub fn new() -> Self {
        LoadWatch::default()
    }

    /// True exactly once: the first time `complete` is observed.
    pub fn observe(&mut self, complete: bool) -> bool {
        if self.fired || !complete {
            return false;
        }
        self.fired = true;
        true
    }

    pub fn is_done(&self) -> bool {
        self.fired
    }

    /// Arm again, e.g. after the image source changed.
    pub fn rearm(&mut self) {
        self.fired = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_on_first_complete() {
        let mut w = LoadWatch::new();
        assert!(!w.observe(false));
        assert!(!w.is_done());
        assert!(w.observe(true));
        assert!(!w.observe(true));
        assert!(w.is_done());
    }

    #[test]
    fn complete_without_pixels_is_failed() {
        assert_eq!(LoadStatus::classify(false, 0.0), LoadStatus::Pending);
        assert_eq!(LoadStatus::classify(false, 640.0), LoadStatus::Pending);
        assert_eq!(LoadStatus::classify(true, 640.0), LoadStatus::Ready);
        assert_eq!(LoadStatus::classify(true, 0.0), LoadStatus::Failed);
    }

    #[test]
    fn rearm_allows_another_load() {
        let mut w = LoadWatch::new();
        assert!(w.observe(true));
        w.rearm();
        assert!(!w.is_done());
        assert!(w.observe(true));
    }
}

//! Boolean moving-average filter
//!
//! Fixed-capacity rolling window over boolean samples. The average is the
//! fraction of `true` samples currently held.

use heapless::Deque;

/// Largest supported window (samples)
pub const MAX_WINDOW: usize = 32;

/// Default window (samples, 0.5 s at 20 Hz)
pub const DEFAULT_WINDOW: usize = 10;

/// Rolling average of boolean samples.
///
/// # Configuration
/// - `window = 1`: no smoothing, the average is the last sample
/// - `window = N`: a run of `ceil(fraction * N)` true samples is needed
///   before `average() >= fraction` once the window is full of false samples
#[derive(Debug, Clone)]
pub struct MovingAverageFilter {
    samples: Deque<bool, MAX_WINDOW>,
    window: usize,
    true_count: usize,
}

impl MovingAverageFilter {
    /// Create a filter holding at most `window` samples.
    ///
    /// Window is clamped to [1, MAX_WINDOW].
    pub fn new(window: usize) -> Self {
        Self {
            samples: Deque::new(),
            window: window.clamp(1, MAX_WINDOW),
            true_count: 0,
        }
    }

    /// Append one sample, evicting the oldest once the window is full.
    pub fn add(&mut self, sample: bool) {
        while self.samples.len() >= self.window {
            self.evict_oldest();
        }
        if self.samples.push_back(sample).is_ok() && sample {
            self.true_count += 1;
        }
    }

    /// Fraction of true samples in the window, 0.0 when empty.
    pub fn average(&self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.true_count as f32 / self.samples.len() as f32
    }

    /// True when the window holds samples and their average reaches `fraction`.
    pub fn reaches(&self, fraction: f32) -> bool {
        !self.samples.is_empty() && self.average() >= fraction
    }

    /// Clear all samples.
    pub fn reset(&mut self) {
        self.samples.clear();
        self.true_count = 0;
    }

    /// Change the window size, dropping the oldest samples that no longer fit.
    pub fn set_window(&mut self, window: usize) {
        self.window = window.clamp(1, MAX_WINDOW);
        while self.samples.len() > self.window {
            self.evict_oldest();
        }
    }

    /// Configured window size
    pub fn window(&self) -> usize {
        self.window
    }

    /// Number of samples currently held
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if the filter holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    fn evict_oldest(&mut self) {
        if let Some(true) = self.samples.pop_front() {
            self.true_count -= 1;
        }
    }
}

impl Default for MovingAverageFilter {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

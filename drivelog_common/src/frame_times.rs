//! Per-stage timings of the frame pipeline.

use std::time::Duration;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameTimes {
    pub retrieve: Duration,
    pub mosaic: Duration,
    pub bev: Duration,
    pub composite: Duration,
}

impl FrameTimes {
    pub fn total(&self) -> Duration {
        self.retrieve + self.mosaic + self.bev + self.composite
    }

    fn zip_with(self, other: Self, f: impl Fn(Duration, Duration) -> Duration) -> Self {
        Self {
            retrieve: f(self.retrieve, other.retrieve),
            mosaic: f(self.mosaic, other.mosaic),
            bev: f(self.bev, other.bev),
            composite: f(self.composite, other.composite),
        }
    }
}

/// Timings of every emitted frame of a run.
#[derive(Debug, Default, Clone)]
pub struct AggregatedTimes {
    frames: Vec<FrameTimes>,
}

impl AggregatedTimes {
    pub fn push(&mut self, times: FrameTimes) {
        self.frames.push(times);
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// The first frame pays for lazy setup, callers can leave it out.
    fn samples(&self, skip_first: bool) -> &[FrameTimes] {
        if skip_first && self.frames.len() > 1 {
            &self.frames[1..]
        } else {
            &self.frames
        }
    }

    pub fn avg(&self, skip_first: bool) -> FrameTimes {
        let samples = self.samples(skip_first);
        if samples.is_empty() {
            return FrameTimes::default();
        }
        let sum = samples
            .iter()
            .fold(FrameTimes::default(), |acc, t| acc.zip_with(*t, |a, b| a + b));
        let n = samples.len() as u32;
        sum.zip_with(sum, |a, _| a / n)
    }

    pub fn min(&self, skip_first: bool) -> FrameTimes {
        self.samples(skip_first)
            .iter()
            .copied()
            .reduce(|acc, t| acc.zip_with(t, Duration::min))
            .unwrap_or_default()
    }

    pub fn max(&self, skip_first: bool) -> FrameTimes {
        self.samples(skip_first)
            .iter()
            .copied()
            .reduce(|acc, t| acc.zip_with(t, Duration::max))
            .unwrap_or_default()
    }
}

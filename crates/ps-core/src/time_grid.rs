//! Simulation time grid.
//!
//! A `TimeGrid` is the caller-owned set of sample instants at which a step
//! response is evaluated. The engine never resamples it: every response
//! value corresponds to exactly one grid point.

use crate::error::{CoreError, CoreResult};
use crate::numeric::Real;

/// Ordered, non-empty sequence of finite time samples (seconds).
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    samples: Vec<Real>,
}

impl TimeGrid {
    /// Validate and wrap caller-supplied samples.
    ///
    /// Samples must be finite and non-decreasing. Repeated instants are
    /// allowed and simply produce repeated response values.
    pub fn new(samples: Vec<Real>) -> CoreResult<Self> {
        if samples.is_empty() {
            return Err(CoreError::InvalidArg {
                what: "time grid must not be empty",
            });
        }
        crate::numeric::ensure_all_finite(&samples, "time sample")?;

        for (i, pair) in samples.windows(2).enumerate() {
            if pair[1] < pair[0] {
                return Err(CoreError::Unordered {
                    index: i + 1,
                    value: pair[1],
                    prev_index: i,
                    prev: pair[0],
                });
            }
        }

        Ok(Self { samples })
    }

    /// `num_points` evenly spaced samples over `[start, stop]`, both ends included.
    pub fn linspace(start: Real, stop: Real, num_points: usize) -> CoreResult<Self> {
        if num_points == 0 {
            return Err(CoreError::InvalidArg {
                what: "num_points must be positive",
            });
        }
        crate::numeric::ensure_finite(start, "grid start")?;
        crate::numeric::ensure_finite(stop, "grid stop")?;
        if stop < start {
            return Err(CoreError::InvalidArg {
                what: "grid stop must not precede start",
            });
        }

        if num_points == 1 {
            return Self::new(vec![start]);
        }

        let step = (stop - start) / (num_points - 1) as Real;
        let mut samples: Vec<Real> = (0..num_points)
            .map(|i| start + step * i as Real)
            .collect();
        // Pin the endpoint so accumulated rounding never overshoots `stop`.
        samples[num_points - 1] = stop;

        Self::new(samples)
    }

    pub fn as_slice(&self) -> &[Real] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false; kept for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn start(&self) -> Real {
        self.samples[0]
    }

    pub fn end(&self) -> Real {
        self.samples[self.samples.len() - 1]
    }

    /// Total simulated horizon `end - start`.
    pub fn horizon(&self) -> Real {
        self.end() - self.start()
    }

    pub fn iter(&self) -> impl Iterator<Item = Real> + '_ {
        self.samples.iter().copied()
    }
}

impl AsRef<[Real]> for TimeGrid {
    fn as_ref(&self) -> &[Real] {
        &self.samples
    }
}

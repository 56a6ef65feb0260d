//! Batch simulation over many gain triples.
//!
//! Every point is independent, so points are simulated in parallel and the
//! results are returned in the order the gains were given.

use ps_controls::{GainAxis, PidGains};
use ps_core::{Real, TimeGrid};
use ps_lti::TransferFunction;
use rayon::prelude::*;

use crate::config::SimConfig;
use crate::error::SimResult;
use crate::simulate::{Simulation, simulate_with};

/// Ordered list of gain triples to simulate.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GainSweep {
    gains: Vec<PidGains>,
}

impl GainSweep {
    /// Vary one gain of `base` over `values`, keeping the others fixed.
    pub fn along(base: PidGains, axis: GainAxis, values: &[Real]) -> Self {
        Self {
            gains: values.iter().map(|&v| base.with(axis, v)).collect(),
        }
    }

    pub fn from_gains(gains: impl IntoIterator<Item = PidGains>) -> Self {
        Self {
            gains: gains.into_iter().collect(),
        }
    }

    pub fn gains(&self) -> &[PidGains] {
        &self.gains
    }

    pub fn len(&self) -> usize {
        self.gains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gains.is_empty()
    }
}

/// One sweep entry and its own outcome.
///
/// A structural failure at one point does not abort the rest of the sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepPoint {
    pub gains: PidGains,
    pub outcome: SimResult<Simulation>,
}

/// Simulate every gain triple of `sweep` against `plant` on `grid`.
pub fn run_sweep(
    plant: &TransferFunction,
    grid: &TimeGrid,
    sweep: &GainSweep,
    cfg: &SimConfig,
) -> Vec<SweepPoint> {
    tracing::debug!(points = sweep.len(), "running gain sweep");

    let points: Vec<SweepPoint> = sweep
        .gains
        .par_iter()
        .map(|&gains| SweepPoint {
            gains,
            outcome: simulate_with(gains, plant, grid, cfg),
        })
        .collect();

    let failed = points.iter().filter(|p| p.outcome.is_err()).count();
    if failed > 0 {
        tracing::warn!(failed, total = points.len(), "some sweep points failed");
    }
    points
}

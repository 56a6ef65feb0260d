//! Step-response performance metrics.
//!
//! Computes standard control metrics (rise time, settling time, overshoot,
//! steady-state error) from a simulated unit step response. Detection of the
//! first three depends on the response being well behaved; when it is not,
//! [`extract_metrics`] falls back to a zero-filled record instead of failing.

use std::fmt;

use ps_core::{Real, TimeGrid};
use ps_lti::TransferFunction;

use crate::error::MetricsError;

/// Thresholds used by the metrics detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsOptions {
    /// Settling band as a fraction of the final value (0.02 = ±2%)
    pub settling_threshold: Real,
    /// Rise time lower and upper fractions of the final value
    pub rise_time_limits: (Real, Real),
}

impl Default for MetricsOptions {
    fn default() -> Self {
        Self {
            settling_threshold: 0.02,
            rise_time_limits: (0.1, 0.9),
        }
    }
}

impl MetricsOptions {
    fn check(&self) -> Result<(), MetricsError> {
        let (lo, hi) = self.rise_time_limits;
        if !(self.settling_threshold > 0.0 && self.settling_threshold < 1.0) {
            return Err(MetricsError::InvalidOptions {
                what: "settling_threshold must lie in (0, 1)",
            });
        }
        if !(0.0 <= lo && lo < hi && hi <= 1.0) {
            return Err(MetricsError::InvalidOptions {
                what: "rise_time_limits must satisfy 0 <= low < high <= 1",
            });
        }
        Ok(())
    }
}

/// Full detector output for a well-behaved step response.
///
/// Times are measured from the first grid instant, when the step is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepInfo {
    /// Time from the lower to the upper rise threshold (seconds)
    pub rise_time: Real,
    /// Time after which the response stays inside the settling band (seconds)
    pub settling_time: Real,
    /// Minimum of the final value and every sample after the rise
    pub settling_min: Real,
    /// Maximum of the final value and every sample after the rise
    pub settling_max: Real,
    /// Peak excess above the final value, percent
    pub overshoot: Real,
    /// Peak excursion opposite to the final value, percent
    pub undershoot: Real,
    /// Largest absolute response value
    pub peak: Real,
    /// Time of the peak (seconds)
    pub peak_time: Real,
    /// Final value predicted by the model's DC gain
    pub steady_state_value: Real,
}

/// Keys present in every [`MetricsRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKey {
    Overshoot,
    SettlingTime,
    RiseTime,
    SteadyStateError,
}

impl MetricKey {
    pub const ALL: [MetricKey; 4] = [
        MetricKey::Overshoot,
        MetricKey::SettlingTime,
        MetricKey::RiseTime,
        MetricKey::SteadyStateError,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MetricKey::Overshoot => "Overshoot",
            MetricKey::SettlingTime => "SettlingTime",
            MetricKey::RiseTime => "RiseTime",
            MetricKey::SteadyStateError => "SteadyStateError",
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether the detected metrics can be trusted.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricsStatus {
    /// All four values come from the detector.
    Complete,
    /// Only `steady_state_error` is meaningful; the rest are zero.
    Degraded { reason: MetricsError },
}

/// Metrics returned for every simulation, on success or fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsRecord {
    /// Peak overshoot, percent of the final value
    pub overshoot: Real,
    /// 2% settling time (seconds)
    pub settling_time: Real,
    /// 10-90% rise time (seconds)
    pub rise_time: Real,
    /// `1 - y[last]`
    pub steady_state_error: Real,
    pub status: MetricsStatus,
    /// Detector details when `status` is `Complete`
    pub info: Option<StepInfo>,
}

impl MetricsRecord {
    fn complete(info: StepInfo, steady_state_error: Real) -> Self {
        Self {
            overshoot: info.overshoot,
            settling_time: info.settling_time,
            rise_time: info.rise_time,
            steady_state_error,
            status: MetricsStatus::Complete,
            info: Some(info),
        }
    }

    fn degraded(reason: MetricsError, steady_state_error: Real) -> Self {
        Self {
            overshoot: 0.0,
            settling_time: 0.0,
            rise_time: 0.0,
            steady_state_error,
            status: MetricsStatus::Degraded { reason },
            info: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.status, MetricsStatus::Complete)
    }

    pub fn get(&self, key: MetricKey) -> Real {
        match key {
            MetricKey::Overshoot => self.overshoot,
            MetricKey::SettlingTime => self.settling_time,
            MetricKey::RiseTime => self.rise_time,
            MetricKey::SteadyStateError => self.steady_state_error,
        }
    }

    /// All four `(key, value)` entries in fixed order.
    pub fn iter(&self) -> impl Iterator<Item = (MetricKey, Real)> + '_ {
        MetricKey::ALL.into_iter().map(|k| (k, self.get(k)))
    }
}

/// `1 - y[last]`; NaN for an empty response.
pub fn steady_state_error(response: &[Real]) -> Real {
    response.last().map_or(Real::NAN, |&y| 1.0 - y)
}

/// Compute metrics, falling back to a degraded record on detector failure.
///
/// The steady-state error is always computed from the last response sample,
/// independently of the detector.
pub fn extract_metrics(
    system: &TransferFunction,
    grid: &TimeGrid,
    response: &[Real],
    opts: &MetricsOptions,
) -> MetricsRecord {
    let sse = steady_state_error(response);

    match step_info(system, grid.as_slice(), response, opts) {
        Ok(info) => MetricsRecord::complete(info, sse),
        Err(reason) => {
            tracing::warn!(
                %reason,
                steady_state_error = sse,
                "could not compute step metrics; overshoot, settling and rise time set to zero"
            );
            MetricsRecord::degraded(reason, sse)
        }
    }
}

/// Primary metrics detector.
///
/// The final value is the system's DC gain, not the last sample, so a
/// response that has not converged within the horizon is reported as not
/// settled rather than measured against a wrong target.
pub fn step_info(
    system: &TransferFunction,
    times: &[Real],
    response: &[Real],
    opts: &MetricsOptions,
) -> Result<StepInfo, MetricsError> {
    opts.check()?;
    if response.is_empty() {
        return Err(MetricsError::EmptyResponse);
    }
    if response.len() != times.len() {
        return Err(MetricsError::LengthMismatch {
            response: response.len(),
            grid: times.len(),
        });
    }
    if let Some((&time, &value)) = times.iter().zip(response).find(|(_, y)| !y.is_finite()) {
        return Err(MetricsError::NonFiniteResponse { time, value });
    }
    if !system.is_stable() {
        return Err(MetricsError::Unstable);
    }

    let final_value = system.dc_gain();
    if !final_value.is_finite() {
        return Err(MetricsError::UndefinedFinalValue { value: final_value });
    }
    if final_value == 0.0 {
        return Err(MetricsError::ZeroFinalValue);
    }

    let t0 = times[0];
    let sign = final_value.signum();
    let (lo, hi) = opts.rise_time_limits;

    let lower_idx = first_crossing(response, final_value, lo)?;
    let upper_idx = first_crossing(response, final_value, hi)?;
    let rise_time = times[upper_idx] - times[lower_idx];

    let settled_idx = settling_index(response, final_value, opts.settling_threshold)?;
    let settling_time = times[settled_idx] - t0;

    // Bounds after the rise, widened to include the final value.
    let after_rise = &response[upper_idx..];
    let settling_min = after_rise.iter().copied().fold(final_value, Real::min);
    let settling_max = after_rise.iter().copied().fold(final_value, Real::max);

    let (peak_idx, peak) = response
        .iter()
        .map(|y| y.abs())
        .enumerate()
        .fold((0, Real::NEG_INFINITY), |best, (i, v)| {
            if v > best.1 { (i, v) } else { best }
        });
    let peak_time = times[peak_idx] - t0;

    // Extremes measured in the direction of the final value.
    let y_os = response
        .iter()
        .map(|y| sign * y)
        .fold(Real::NEG_INFINITY, Real::max);
    let y_us = response
        .iter()
        .map(|y| sign * y)
        .fold(Real::INFINITY, Real::min);

    let excess = y_os.abs() - final_value.abs();
    let overshoot = if excess > 0.0 {
        100.0 * excess / final_value.abs()
    } else {
        0.0
    };
    let undershoot = if y_us < 0.0 {
        100.0 * y_us.abs() / final_value.abs()
    } else {
        0.0
    };

    Ok(StepInfo {
        rise_time,
        settling_time,
        settling_min,
        settling_max,
        overshoot,
        undershoot,
        peak,
        peak_time,
        steady_state_value: final_value,
    })
}

/// Index of the first sample at or beyond `fraction` of the final value.
fn first_crossing(
    response: &[Real],
    final_value: Real,
    fraction: Real,
) -> Result<usize, MetricsError> {
    let sign = final_value.signum();
    let target = fraction * final_value;
    response
        .iter()
        .position(|&y| sign * (y - target) >= 0.0)
        .ok_or(MetricsError::ThresholdNotReached {
            percent: fraction * 100.0,
        })
}

/// Index of the first sample after which every sample stays inside the band.
fn settling_index(
    response: &[Real],
    final_value: Real,
    threshold: Real,
) -> Result<usize, MetricsError> {
    let settled = response
        .iter()
        .rposition(|&y| (y / final_value - 1.0).abs() >= threshold)
        .map_or(0, |last_outside| last_outside + 1);

    if settled < response.len() {
        Ok(settled)
    } else {
        Err(MetricsError::NotSettled {
            percent: threshold * 100.0,
        })
    }
}

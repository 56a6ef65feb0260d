//! Controller transfer-function construction.
//!
//! The textbook PID law `Kp + Ki/s + Kd s` is usually written as the single
//! rational function `(Kd s^2 + Kp s + Ki) / s`. Used for every gain
//! combination, that form carries a pole/zero pair at the origin whenever
//! `Ki = 0`, which cancels algebraically but not numerically. The builder
//! therefore emits the minimal-order form for each case.

use ps_lti::TransferFunction;

use crate::error::ControlResult;
use crate::gains::{ControllerKind, PidGains};

/// Build the controller transfer function for `gains`.
///
/// Returns `Ok(None)` when all gains are zero: there is no controller and
/// the caller should simulate the plant open-loop.
///
/// # Errors
///
/// `NonFiniteGain` when any gain is NaN or infinite.
pub fn build_controller(gains: PidGains) -> ControlResult<Option<TransferFunction>> {
    gains.validate()?;
    let PidGains { kp, ki, kd } = gains;

    let (num, den) = match gains.kind() {
        ControllerKind::Off => return Ok(None),
        ControllerKind::P => (vec![kp], vec![1.0]),
        ControllerKind::PD => (vec![kd, kp], vec![1.0]),
        ControllerKind::PI => (vec![kp, ki], vec![1.0, 0.0]),
        ControllerKind::PID => (vec![kd, kp, ki], vec![1.0, 0.0]),
    };

    Ok(Some(TransferFunction::new(num, den)?))
}

//! PID gain triples and structural classification.

use std::fmt;

use ps_core::Real;
use serde::Deserialize;

use crate::error::{ControlError, ControlResult};

/// Proportional, integral and derivative gains.
///
/// Any real value is accepted, including zero and negative gains. A
/// negative gain yields an inverted (often unstable) controller, which is
/// a legitimate simulation input.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct PidGains {
    /// Proportional gain.
    pub kp: Real,
    /// Integral gain.
    #[serde(default)]
    pub ki: Real,
    /// Derivative gain.
    #[serde(default)]
    pub kd: Real,
}

impl PidGains {
    pub fn new(kp: Real, ki: Real, kd: Real) -> Self {
        Self { kp, ki, kd }
    }

    /// All gains zero: no controller, open-loop plant.
    pub fn off() -> Self {
        Self::default()
    }

    pub fn p(kp: Real) -> Self {
        Self::new(kp, 0.0, 0.0)
    }

    pub fn pi(kp: Real, ki: Real) -> Self {
        Self::new(kp, ki, 0.0)
    }

    pub fn pd(kp: Real, kd: Real) -> Self {
        Self::new(kp, 0.0, kd)
    }

    /// Reject NaN or infinite gains.
    pub fn validate(&self) -> ControlResult<()> {
        let gains = [
            ("proportional", self.kp),
            ("integral", self.ki),
            ("derivative", self.kd),
        ];
        for (which, value) in gains {
            if !value.is_finite() {
                return Err(ControlError::NonFiniteGain { which, value });
            }
        }
        Ok(())
    }

    /// Which controller structure these gains select.
    pub fn kind(&self) -> ControllerKind {
        let (kp, ki, kd) = (self.kp, self.ki, self.kd);
        if kp == 0.0 && ki == 0.0 && kd == 0.0 {
            ControllerKind::Off
        } else if ki == 0.0 && kd == 0.0 {
            ControllerKind::P
        } else if ki == 0.0 {
            ControllerKind::PD
        } else if kd == 0.0 {
            ControllerKind::PI
        } else {
            ControllerKind::PID
        }
    }

    /// Gain along one axis.
    pub fn get(&self, axis: GainAxis) -> Real {
        match axis {
            GainAxis::Kp => self.kp,
            GainAxis::Ki => self.ki,
            GainAxis::Kd => self.kd,
        }
    }

    /// Copy with one gain replaced.
    pub fn with(mut self, axis: GainAxis, value: Real) -> Self {
        match axis {
            GainAxis::Kp => self.kp = value,
            GainAxis::Ki => self.ki = value,
            GainAxis::Kd => self.kd = value,
        }
        self
    }
}

impl fmt::Display for PidGains {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Kp={} Ki={} Kd={}", self.kp, self.ki, self.kd)
    }
}

/// Structural controller case selected by a gain triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerKind {
    /// No controller; the plant runs open-loop.
    Off,
    P,
    PD,
    PI,
    PID,
}

impl ControllerKind {
    pub fn label(self) -> &'static str {
        match self {
            ControllerKind::Off => "open-loop",
            ControllerKind::P => "P",
            ControllerKind::PD => "PD",
            ControllerKind::PI => "PI",
            ControllerKind::PID => "PID",
        }
    }

    /// True when the controller adds a pole at the origin.
    pub fn has_integrator(self) -> bool {
        matches!(self, ControllerKind::PI | ControllerKind::PID)
    }
}

impl fmt::Display for ControllerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One of the three gains, used to describe tuning sweeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GainAxis {
    Kp,
    Ki,
    Kd,
}

impl fmt::Display for GainAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GainAxis::Kp => "Kp",
            GainAxis::Ki => "Ki",
            GainAxis::Kd => "Kd",
        })
    }
}

//! PID controller construction for pidscope.
//!
//! This crate turns three scalar gains into the transfer function of a
//! continuous-time PID law. The builder selects the minimal-order structure
//! for each combination of zero and non-zero gains:
//!
//! | case | numerator       | denominator |
//! |------|-----------------|-------------|
//! | off  | none            | none        |
//! | P    | `[Kp]`          | `[1]`       |
//! | PD   | `[Kd, Kp]`      | `[1]`       |
//! | PI   | `[Kp, Ki]`      | `[1, 0]`    |
//! | PID  | `[Kd, Kp, Ki]`  | `[1, 0]`    |
//!
//! The "off" case has no controller at all: callers simulate the plant
//! open-loop instead of closing a loop around a zero gain.

pub mod controller;
pub mod error;
pub mod gains;

pub use controller::build_controller;
pub use error::{ControlError, ControlResult};
pub use gains::{ControllerKind, GainAxis, PidGains};

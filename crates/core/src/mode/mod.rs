//! Conditional mode decision
//!
//! Fuses low-speed, navigation, curve, slower-lead and turn-signal
//! conditions into a single cautious-mode flag with a cause code.
//!
//! # Contents
//!
//! - `ModeCause` / `ModeDecision`: decision value and stable status codes
//! - `ModeDecisionStateMachine`: priority rules and moving-average smoothing

mod cause;
mod state_machine;

pub use cause::{ModeCause, ModeDecision};
pub use state_machine::{ModeDecisionStateMachine, ModeInputs, ModeSettings};

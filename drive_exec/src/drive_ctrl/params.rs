//! Parameters structure for DriveCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;
use super::RampMode;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for drive control.
#[derive(Debug, Default, Deserialize)]
pub struct Params {

    // ---- RAMPING ----

    /// Maximum rate of change of the forward channel demand.
    ///
    /// Units: percent output/second
    pub forward_max_rate_per_s: f64,

    /// Maximum rate of change of the turn channel demand.
    ///
    /// Units: percent output/second
    pub turn_max_rate_per_s: f64,

    /// The ramp formula used by both channels.
    pub ramp_mode: RampMode,

    // ---- INPUT CONDITIONING ----

    /// Stick inputs with a magnitude at or below this threshold read as zero.
    ///
    /// Units: percent output
    pub stick_deadband: f64
}

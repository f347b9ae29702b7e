//! Tank drive calculations

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal imports
use super::*;

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl DriveCtrl {

    /// Perform the tank drive calculations.
    ///
    /// Side demands pass straight through to the wheels. Ramping applies to
    /// the arcade channel pair only, so tank demands are not ramped.
    pub(crate) fn calc_tank(&self, left_sp: f64, right_sp: f64) -> WheelDems {
        WheelDems {
            left_dem: left_sp,
            right_dem: right_sp
        }
    }
}

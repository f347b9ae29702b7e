//! Arcade drive calculations

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal imports
use super::*;

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl DriveCtrl {

    /// Perform the arcade drive calculations.
    ///
    /// The forward and turn channels are ramped independently *before* being
    /// combined into the per-side demands. Ramping the channel pair rather
    /// than the combined demands gives different transients, and is the
    /// ordering the historical controller used.
    ///
    /// The button-directional and cheezy modes also route through this
    /// function, so all arcade-style demands share the same ramp state.
    pub(crate) fn calc_arcade(
        &mut self,
        forward_sp: f64,
        turn_sp: f64
    ) -> Result<WheelDems, DriveCtrlError> {

        // Ramp the channel demands
        let (forward, turn) = match (
            self.forward_ramp.as_mut(),
            self.turn_ramp.as_mut()
        ) {
            (Some(forward_ramp), Some(turn_ramp)) => (
                forward_ramp.apply(forward_sp),
                turn_ramp.apply(turn_sp)
            ),
            _ => return Err(DriveCtrlError::NotInitialised)
        };

        if forward != forward_sp {
            self.report.forward_ramped = true;
        }
        if turn != turn_sp {
            self.report.turn_ramped = true;
        }

        // Combine into the per-side demands
        Ok(WheelDems {
            left_dem: forward + turn,
            right_dem: forward - turn
        })
    }
}

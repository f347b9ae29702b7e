//! Button-directional drive calculations

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal imports
use super::*;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Fixed forward/reverse demand magnitude for button driving.
///
/// Units: percent output
pub const BUTTON_DRIVE_SP: f64 = 0.5;

/// Fixed turn demand magnitude for button driving.
///
/// Units: percent output
pub const BUTTON_TURN_SP: f64 = 0.5;

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl DriveCtrl {

    /// Perform the button-directional drive calculations.
    ///
    /// Exactly one preset is active per cycle. Simultaneous presses resolve
    /// by priority - forward, then reverse, then right, then left - never by
    /// combination. The selected preset feeds the arcade path, so button
    /// demands are ramped like any other arcade demand.
    pub(crate) fn calc_button(
        &mut self,
        forward: bool,
        right: bool,
        reverse: bool,
        left: bool
    ) -> Result<WheelDems, DriveCtrlError> {

        let (forward_sp, turn_sp) = if forward {
            (BUTTON_DRIVE_SP, 0.0)
        }
        else if reverse {
            (-BUTTON_DRIVE_SP, 0.0)
        }
        else if right {
            (0.0, BUTTON_TURN_SP)
        }
        else if left {
            (0.0, -BUTTON_TURN_SP)
        }
        else {
            (0.0, 0.0)
        };

        self.calc_arcade(forward_sp, turn_sp)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::drive_ctrl::RampMode;

    fn test_ctrl() -> DriveCtrl {
        let mut ctrl = DriveCtrl::default();

        ctrl.forward_ramp =
            Some(RateLimiter::new(0.01, RampMode::Legacy).unwrap());
        ctrl.turn_ramp =
            Some(RateLimiter::new(0.01, RampMode::Legacy).unwrap());

        ctrl
    }

    #[test]
    fn test_forward_beats_right() {
        let mut ctrl = test_ctrl();

        // Forward and right pressed together resolves to the forward preset
        let dems = ctrl.calc_button(true, true, false, false).unwrap();

        assert_eq!(dems.left_dem, BUTTON_DRIVE_SP);
        assert_eq!(dems.right_dem, BUTTON_DRIVE_SP);
    }

    #[test]
    fn test_reverse_beats_right_and_left() {
        let mut ctrl = test_ctrl();

        let dems = ctrl.calc_button(false, true, true, true).unwrap();

        assert_eq!(dems.left_dem, -BUTTON_DRIVE_SP);
        assert_eq!(dems.right_dem, -BUTTON_DRIVE_SP);
    }

    #[test]
    fn test_right_beats_left() {
        let mut ctrl = test_ctrl();

        let dems = ctrl.calc_button(false, true, false, true).unwrap();

        assert_eq!(dems.left_dem, BUTTON_TURN_SP);
        assert_eq!(dems.right_dem, -BUTTON_TURN_SP);
    }

    #[test]
    fn test_no_buttons_gives_zero() {
        let mut ctrl = test_ctrl();

        let dems = ctrl.calc_button(false, false, false, false).unwrap();

        assert_eq!(dems.left_dem, 0.0);
        assert_eq!(dems.right_dem, 0.0);
    }
}

//! Cheezy drive calculations

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal imports
use super::*;

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl DriveCtrl {

    /// Perform the cheezy drive calculations.
    ///
    /// Unless `arcade_mode` is set the turn authority scales with the
    /// commanded forward speed - no turn at zero forward demand, full turn at
    /// full forward demand. The scaled pair then feeds the arcade path.
    pub(crate) fn calc_cheezy(
        &mut self,
        arcade_mode: bool,
        forward_sp: f64,
        turn_sp: f64
    ) -> Result<WheelDems, DriveCtrlError> {
        self.calc_arcade(
            forward_sp,
            cheezy_turn_power(arcade_mode, forward_sp, turn_sp)
        )
    }
}

/// Calculate the turn power for a cheezy drive command.
pub(crate) fn cheezy_turn_power(
    arcade_mode: bool,
    forward_sp: f64,
    turn_sp: f64
) -> f64 {
    if arcade_mode {
        turn_sp
    }
    else {
        turn_sp * forward_sp.abs()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_no_turn_authority_at_zero_forward() {
        assert_eq!(cheezy_turn_power(false, 0.0, 1.0), 0.0);
        assert_eq!(cheezy_turn_power(false, 0.0, -0.5), 0.0);
    }

    #[test]
    fn test_turn_authority_scales_with_forward() {
        assert_eq!(cheezy_turn_power(false, 0.5, 1.0), 0.5);
        assert_eq!(cheezy_turn_power(false, -0.5, 1.0), 0.5);
        assert_eq!(cheezy_turn_power(false, 1.0, 0.25), 0.25);
    }

    #[test]
    fn test_arcade_mode_uses_turn_unscaled() {
        assert_eq!(cheezy_turn_power(true, 0.0, 0.75), 0.75);
        assert_eq!(cheezy_turn_power(true, 0.5, -0.25), -0.25);
    }
}

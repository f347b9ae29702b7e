//! Commands passed into DriveCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A command to drive the robot using one of the supported drive modes.
///
/// All scalar demands are percent outputs, signed fractions of full motor
/// output in [-1, +1]. The input source is responsible for keeping them in
/// range, DriveCtrl clamps the final per-side demands into range.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub enum DriveCmd {
    /// Tank drive - each side of the drivetrain is commanded directly.
    Tank {
        /// Demand for the left side.
        left_sp: f64,

        /// Demand for the right side.
        right_sp: f64
    },

    /// Arcade drive - a forward demand and a turn demand are combined into
    /// the per-side demands.
    Arcade {
        /// Demand along the robot's forward axis.
        forward_sp: f64,

        /// Turn demand, positive turns the robot to the right.
        turn_sp: f64
    },

    /// Button-directional drive - four direction buttons map to fixed
    /// forward/reverse/turn presets.
    ButtonDirectional {
        forward: bool,
        right: bool,
        reverse: bool,
        left: bool
    },

    /// Cheezy drive - like arcade, but unless `arcade_mode` is set the turn
    /// authority scales with the commanded forward speed.
    Cheezy {
        /// If true the turn demand is used as-is, as in arcade drive.
        arcade_mode: bool,

        /// Demand along the robot's forward axis.
        forward_sp: f64,

        /// Turn demand, positive turns the robot to the right.
        turn_sp: f64
    }
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl DriveCmd {

    /// Determine if the command is valid (i.e. all scalar demands are finite).
    pub fn is_valid(&self) -> bool {
        match *self {
            DriveCmd::Tank { left_sp, right_sp } =>
                left_sp.is_finite() && right_sp.is_finite(),
            DriveCmd::Arcade { forward_sp, turn_sp }
            | DriveCmd::Cheezy { forward_sp, turn_sp, .. } =>
                forward_sp.is_finite() && turn_sp.is_finite(),
            DriveCmd::ButtonDirectional { .. } => true
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_script_json_format() {
        // The JSON format used in drive scripts
        let cmd: DriveCmd = serde_json::from_str(
            r#"{"Arcade": {"forward_sp": 0.5, "turn_sp": -0.25}}"#
        ).unwrap();

        match cmd {
            DriveCmd::Arcade { forward_sp, turn_sp } => {
                assert_eq!(forward_sp, 0.5);
                assert_eq!(turn_sp, -0.25);
            }
            _ => panic!("Expected an arcade command")
        }
    }

    #[test]
    fn test_is_valid() {
        assert!(DriveCmd::Tank { left_sp: 0.5, right_sp: -0.5 }.is_valid());
        assert!(!DriveCmd::Tank { left_sp: f64::NAN, right_sp: 0.0 }.is_valid());
        assert!(!DriveCmd::Arcade {
            forward_sp: f64::INFINITY,
            turn_sp: 0.0
        }
        .is_valid());
        assert!(DriveCmd::ButtonDirectional {
            forward: true,
            right: true,
            reverse: true,
            left: true
        }
        .is_valid());
    }
}

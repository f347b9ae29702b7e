//! # Motor Driver
//!
//! This module delivers the wheel demands computed by DriveCtrl to the motor
//! actuators. The [`MotorDriver`] trait is the boundary to the real hardware;
//! [`SimMotorDriver`] stands in for it here, converting demands into the PWM
//! counts a motor board would receive and archiving them.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use log::debug;
use serde::{Deserialize, Serialize};

// Internal
use crate::drive_ctrl::WheelDems;
use util::{archive::Archiver, maths::lin_map, params, session::Session};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Parameters for the motor driver.
#[derive(Debug, Default, Deserialize)]
pub struct Params {
    /// True if the left motor's direction is inverted.
    ///
    /// The left motor faces the opposite way to the right one on the
    /// drivetrain, so one side is normally inverted.
    pub left_inverted: bool,

    /// True if the right motor's direction is inverted.
    pub right_inverted: bool,

    /// PWM counts corresponding to a demand of -1.
    pub pwm_min_counts: f64,

    /// PWM counts corresponding to a demand of +1.
    pub pwm_max_counts: f64
}

/// Simulated motor driver.
pub struct SimMotorDriver {
    params: Params,

    arch_pwm: Archiver
}

/// A single cycle's PWM outputs, written to the archive.
#[derive(Clone, Copy, Debug, Serialize)]
struct PwmRecord {
    left_counts: f64,
    right_counts: f64
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(thiserror::Error, Debug)]
pub enum MotorDriverError {
    #[error("Cannot load the parameters: {0}")]
    ParamLoadError(#[from] params::LoadError),

    #[error("Cannot initialise an archiver: {0}")]
    ArchiverInitError(String),

    #[error("Cannot write the PWM archive: {0}")]
    ArchiveWriteError(String)
}

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Interface to the motor actuators.
///
/// One demand per side is accepted each cycle as a percent output in
/// [-1, +1]. Implementations are side-effecting sinks - nothing is read back
/// from the motors.
pub trait MotorDriver {
    /// Actuate the given wheel demands.
    fn set_dems(&mut self, dems: &WheelDems) -> Result<(), MotorDriverError>;
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl SimMotorDriver {
    /// Create a new simulated motor driver.
    ///
    /// Expected init data is the path to the parameter file.
    pub fn new(
        param_file: &'static str,
        session: &Session
    ) -> Result<Self, MotorDriverError> {
        let params: Params = params::load(param_file)?;

        let arch_pwm = Archiver::from_path(session, "motor_pwm.csv")
            .map_err(|e| MotorDriverError::ArchiverInitError(e.to_string()))?;

        Ok(Self { params, arch_pwm })
    }

    /// Convert a single side's demand into PWM counts.
    fn dem_to_counts(&self, dem: f64, inverted: bool) -> f64 {
        let dem = if inverted { -dem } else { dem };

        lin_map(
            (-1f64, 1f64),
            (self.params.pwm_min_counts, self.params.pwm_max_counts),
            dem
        )
    }
}

impl MotorDriver for SimMotorDriver {
    fn set_dems(&mut self, dems: &WheelDems) -> Result<(), MotorDriverError> {
        let record = PwmRecord {
            left_counts: self.dem_to_counts(
                dems.left_dem, self.params.left_inverted),
            right_counts: self.dem_to_counts(
                dems.right_dem, self.params.right_inverted)
        };

        debug!(
            "Motor PWM: left {:.0}, right {:.0}",
            record.left_counts,
            record.right_counts);

        self.arch_pwm.serialise(record)
            .map_err(|e| MotorDriverError::ArchiveWriteError(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn test_driver(left_inverted: bool) -> SimMotorDriver {
        SimMotorDriver {
            params: Params {
                left_inverted,
                right_inverted: false,
                pwm_min_counts: 1000.0,
                pwm_max_counts: 2000.0
            },
            arch_pwm: Archiver::default()
        }
    }

    #[test]
    fn test_dem_to_counts() {
        let driver = test_driver(false);

        assert_eq!(driver.dem_to_counts(0.0, false), 1500.0);
        assert_eq!(driver.dem_to_counts(1.0, false), 2000.0);
        assert_eq!(driver.dem_to_counts(-1.0, false), 1000.0);
    }

    #[test]
    fn test_inversion_mirrors_counts() {
        let driver = test_driver(true);

        assert_eq!(driver.dem_to_counts(0.5, true), 1250.0);
        assert_eq!(driver.dem_to_counts(0.5, false), 1750.0);
    }
}

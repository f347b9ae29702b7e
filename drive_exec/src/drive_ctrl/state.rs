//! Implementations for the DriveCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::trace;
use serde::Serialize;

// Internal
use super::{DriveCmd, DriveCtrlError, Params, RateLimiter};
use util::{
    archive::{Archived, Archiver},
    maths::clamp,
    module::State,
    params,
    session::Session};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Drive control module state
#[derive(Default)]
pub struct DriveCtrl {

    pub(crate) params: Params,

    pub(crate) report: StatusReport,
    arch_report: Archiver,

    pub(crate) current_cmd: Option<DriveCmd>,

    /// Rate limiter for the forward channel. Owned by the controller so the
    /// ramp state persists across cycles.
    pub(crate) forward_ramp: Option<RateLimiter>,

    /// Rate limiter for the turn channel.
    pub(crate) turn_ramp: Option<RateLimiter>,

    pub(crate) output: Option<WheelDems>,
    arch_output: Archiver
}

/// Input data to drive control.
#[derive(Default)]
pub struct InputData {
    /// The drive command to be executed, or `None` if there is no new
    /// command on this cycle (the last command continues to apply).
    pub cmd: Option<DriveCmd>
}

/// Output demands from DriveCtrl that the motor driver must execute.
#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct WheelDems {
    /// Left wheel demand.
    ///
    /// Units: percent output in [-1, +1]
    pub left_dem: f64,

    /// Right wheel demand.
    ///
    /// Units: percent output in [-1, +1]
    pub right_dem: f64
}

/// Status report for DriveCtrl processing.
#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct StatusReport {
    /// True if the left demand was clamped into the actuator range.
    pub left_dem_limited: bool,

    /// True if the right demand was clamped into the actuator range.
    pub right_dem_limited: bool,

    /// True if the ramp changed the forward channel demand this cycle.
    pub forward_ramped: bool,

    /// True if the ramp changed the turn channel demand this cycle.
    pub turn_ramped: bool
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl State for DriveCtrl {
    type InitData = &'static str;
    type InitError = DriveCtrlError;

    type InputData = InputData;
    type OutputData = WheelDems;
    type StatusReport = StatusReport;
    type ProcError = DriveCtrlError;

    /// Initialise the DriveCtrl module.
    ///
    /// Expected init data is the path to the parameter file
    fn init(&mut self, init_data: Self::InitData, session: &Session)
        -> Result<(), Self::InitError>
    {

        // Load the parameters
        self.params = params::load(init_data)?;

        // Build the channel rate limiters, which live for the lifetime of the
        // controller
        self.forward_ramp = Some(RateLimiter::new(
            self.params.forward_max_rate_per_s,
            self.params.ramp_mode
        )?);
        self.turn_ramp = Some(RateLimiter::new(
            self.params.turn_max_rate_per_s,
            self.params.ramp_mode
        )?);

        // Create the arch folder for drive_ctrl
        let mut arch_path = session.arch_root.clone();
        arch_path.push("drive_ctrl");
        std::fs::create_dir_all(arch_path)
            .map_err(|e| DriveCtrlError::ArchiverInitError(e.to_string()))?;

        // Initialise the archivers
        self.arch_report = Archiver::from_path(
            session, "drive_ctrl/status_report.csv"
        ).map_err(|e| DriveCtrlError::ArchiverInitError(e.to_string()))?;
        self.arch_output = Archiver::from_path(
            session, "drive_ctrl/output.csv"
        ).map_err(|e| DriveCtrlError::ArchiverInitError(e.to_string()))?;

        Ok(())
    }

    /// Perform cyclic processing of drive control.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>
    {
        // Clear the status report
        self.report = StatusReport::default();

        // Check to see if there's a new command
        if let Some(cmd) = input_data.cmd {
            if !cmd.is_valid() {
                return Err(DriveCtrlError::InvalidDriveCmd(cmd));
            }

            // Update the internal copy of the command
            self.current_cmd = Some(cmd);
        }

        // Calculate the demands for the current command. With no command yet
        // recieved the wheels stay at zero demand.
        let dems = match self.current_cmd {
            Some(cmd) => self.calc_dems(&cmd)?,
            None => WheelDems::default()
        };

        // Limit demands to the actuator's range
        let dems = self.enforce_limits(dems);

        trace!(
            "DriveCtrl output:\n    left: {:+.3}\n    right: {:+.3}",
            dems.left_dem,
            dems.right_dem);

        // Update the output in self
        self.output = Some(dems);

        Ok((dems, self.report))
    }
}

impl Archived for DriveCtrl {
    fn write(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        // Write each one individually
        self.arch_report.serialise(self.report)?;
        self.arch_output.serialise(self.output.unwrap_or_default())?;

        Ok(())
    }
}

impl DriveCtrl {

    /// Calculate the wheel demands for the given command.
    ///
    /// Stick inputs are deadbanded here, then the calculation function for
    /// the command's drive mode produces the (unclamped) per-side demands.
    fn calc_dems(&mut self, cmd: &DriveCmd) -> Result<WheelDems, DriveCtrlError> {
        match *cmd {
            DriveCmd::Tank { left_sp, right_sp } => Ok(self.calc_tank(
                self.deadband(left_sp),
                self.deadband(right_sp)
            )),
            DriveCmd::Arcade { forward_sp, turn_sp } => {
                let forward_sp = self.deadband(forward_sp);
                let turn_sp = self.deadband(turn_sp);
                self.calc_arcade(forward_sp, turn_sp)
            }
            DriveCmd::ButtonDirectional { forward, right, reverse, left } =>
                self.calc_button(forward, right, reverse, left),
            DriveCmd::Cheezy { arcade_mode, forward_sp, turn_sp } => {
                let forward_sp = self.deadband(forward_sp);
                let turn_sp = self.deadband(turn_sp);
                self.calc_cheezy(arcade_mode, forward_sp, turn_sp)
            }
        }
    }

    /// Apply the stick deadband to a single axis input.
    ///
    /// Inputs within the deadband read as zero, so a stick that doesn't
    /// quite centre won't creep the robot.
    pub(crate) fn deadband(&self, input: f64) -> f64 {
        if input.abs() > self.params.stick_deadband.abs() {
            input
        }
        else {
            0.0
        }
    }

    /// Limit the demands to the [-1, +1] actuator range.
    ///
    /// If a demand is clamped the corresponding flag in the status report
    /// will be raised.
    fn enforce_limits(&mut self, dems: WheelDems) -> WheelDems {
        let mut limited = dems;

        limited.left_dem = clamp(&dems.left_dem, &-1.0, &1.0);
        if limited.left_dem != dems.left_dem {
            self.report.left_dem_limited = true;
        }

        limited.right_dem = clamp(&dems.right_dem, &-1.0, &1.0);
        if limited.right_dem != dems.right_dem {
            self.report.right_dem_limited = true;
        }

        limited
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::drive_ctrl::RampMode;

    /// Build an initialised controller without touching the filesystem.
    ///
    /// The ramp rates are made small so the legacy formula passes step
    /// demands through unchanged within the runtime of a test.
    fn test_ctrl() -> DriveCtrl {
        let mut ctrl = DriveCtrl::default();

        ctrl.params = Params {
            forward_max_rate_per_s: 0.01,
            turn_max_rate_per_s: 0.01,
            ramp_mode: RampMode::Legacy,
            stick_deadband: 0.05
        };
        ctrl.forward_ramp =
            Some(RateLimiter::new(0.01, RampMode::Legacy).unwrap());
        ctrl.turn_ramp =
            Some(RateLimiter::new(0.01, RampMode::Legacy).unwrap());

        ctrl
    }

    fn proc_cmd(ctrl: &mut DriveCtrl, cmd: DriveCmd) -> WheelDems {
        let (dems, _) = ctrl.proc(&InputData { cmd: Some(cmd) }).unwrap();
        dems
    }

    #[test]
    fn test_no_cmd_gives_zero_dems() {
        let mut ctrl = test_ctrl();

        let (dems, report) = ctrl.proc(&InputData::default()).unwrap();

        assert_eq!(dems.left_dem, 0.0);
        assert_eq!(dems.right_dem, 0.0);
        assert!(!report.left_dem_limited);
        assert!(!report.right_dem_limited);
    }

    #[test]
    fn test_tank_pass_through() {
        let mut ctrl = test_ctrl();

        let dems = proc_cmd(
            &mut ctrl,
            DriveCmd::Tank { left_sp: 0.75, right_sp: -0.25 }
        );

        assert_eq!(dems.left_dem, 0.75);
        assert_eq!(dems.right_dem, -0.25);
    }

    #[test]
    fn test_arcade_combination() {
        let mut ctrl = test_ctrl();

        let dems = proc_cmd(
            &mut ctrl,
            DriveCmd::Arcade { forward_sp: 0.25, turn_sp: 0.125 }
        );

        assert_eq!(dems.left_dem, 0.375);
        assert_eq!(dems.right_dem, 0.125);
    }

    #[test]
    fn test_arcade_clamped_to_actuator_range() {
        let mut ctrl = test_ctrl();

        let (dems, report) = ctrl
            .proc(&InputData {
                cmd: Some(DriveCmd::Arcade { forward_sp: 1.0, turn_sp: 0.5 })
            })
            .unwrap();

        assert_eq!(dems.left_dem, 1.0);
        assert_eq!(dems.right_dem, 0.5);
        assert!(report.left_dem_limited);
        assert!(!report.right_dem_limited);
    }

    #[test]
    fn test_deadband_zeroes_small_inputs() {
        let mut ctrl = test_ctrl();

        let dems = proc_cmd(
            &mut ctrl,
            DriveCmd::Tank { left_sp: 0.03, right_sp: -0.03 }
        );

        assert_eq!(dems.left_dem, 0.0);
        assert_eq!(dems.right_dem, 0.0);
    }

    #[test]
    fn test_cmd_persists_across_cycles() {
        let mut ctrl = test_ctrl();

        proc_cmd(&mut ctrl, DriveCmd::Tank { left_sp: 0.5, right_sp: 0.5 });

        // No new command, the last one continues to apply
        let (dems, _) = ctrl.proc(&InputData::default()).unwrap();

        assert_eq!(dems.left_dem, 0.5);
        assert_eq!(dems.right_dem, 0.5);
    }

    #[test]
    fn test_invalid_cmd_rejected() {
        let mut ctrl = test_ctrl();

        let result = ctrl.proc(&InputData {
            cmd: Some(DriveCmd::Tank { left_sp: f64::NAN, right_sp: 0.0 })
        });

        assert!(matches!(
            result,
            Err(DriveCtrlError::InvalidDriveCmd(_))
        ));
    }

    #[test]
    fn test_button_left_end_to_end() {
        let mut ctrl = test_ctrl();

        // Only the left button pressed maps to (forward 0, turn -0.5), which
        // combines into a left-backwards/right-forwards pivot
        let dems = proc_cmd(
            &mut ctrl,
            DriveCmd::ButtonDirectional {
                forward: false,
                right: false,
                reverse: false,
                left: true
            }
        );

        assert_eq!(dems.left_dem, -0.5);
        assert_eq!(dems.right_dem, 0.5);
    }
}

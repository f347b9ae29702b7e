//! Main drive executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise all modules
//!     - Main loop:
//!         - Drive script command acquisition
//!         - Drive control processing
//!         - Motor driver execution
//!         - Archive writing
//!         - Cycle management
//!
//! # Modules
//!
//! All modules (e.g. `drive_ctrl`) shall meet the following requirements:
//!     1. Provide a public struct implementing the `util::module::State` trait.
//!

// ---------------------------------------------------------------------------
// USE MODULES FROM LIBRARY
// ---------------------------------------------------------------------------

use drive_lib::{
    data_store::DataStore,
    drive_ctrl::{DriveCmd, WheelDems},
    motor_driver::{MotorDriver, SimMotorDriver}
};

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{Report, eyre::{WrapErr, eyre}};
use log::{debug, info, warn};
use std::env;
use std::thread;
use std::time::{Duration, Instant};

// Internal
use util::{
    archive::Archived,
    logger::{logger_init, LevelFilter},
    module::State,
    script_interpreter::{PendingCmds, ScriptInterpreter},
    session::Session
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Target period of one cycle.
const CYCLE_PERIOD_S: f64 = 0.05;

/// Number of cycles per second
const CYCLE_FREQUENCY_HZ: f64 = 1.0 / CYCLE_PERIOD_S;

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new(
        "drive_exec",
        "sessions"
    ).wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Trace, &session)
        .wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Differential Drive Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- INITIALISE COMMAND SOURCE ----

    // Collect all arguments
    let args: Vec<String> = env::args().collect();

    debug!("CLI arguments: {:?}", args);

    // The single argument is the path to the drive script
    let mut script = if args.len() == 2 {

        info!("Loading drive script from \"{}\"", &args[1]);

        let si = ScriptInterpreter::<DriveCmd>::new(&args[1])
            .wrap_err("Failed to load the drive script")?;

        // Display some info
        info!(
            "Loaded script lasts {:.02} s and contains {} commands\n",
            si.get_duration(),
            si.get_num_cmds()
        );

        si
    }
    else {
        return Err(eyre!(
            "Expected the path to a drive script as the only argument, \
            found {} argument(s)", args.len() - 1)
        );
    };

    // ---- INITIALISE MODULES ----

    info!("Initialising modules...");

    let mut ds = DataStore::default();

    ds.drive_ctrl.init("drive_ctrl.toml", &session)
        .wrap_err("Failed to initialise DriveCtrl")?;
    info!("DriveCtrl init complete");

    let mut motor_driver = SimMotorDriver::new("motor_driver.toml", &session)
        .wrap_err("Failed to initialise the motor driver")?;
    info!("Motor driver init complete");

    info!("Module initialisation complete\n");

    // ---- MAIN LOOP ----

    info!("Begining main loop\n");

    loop {

        // Get cycle start time
        let cycle_start_instant = Instant::now();

        // Clear items that need wiping at the start of the cycle
        ds.cycle_start(CYCLE_FREQUENCY_HZ);

        // ---- COMMAND PROCESSING ----

        match script.get_pending_cmds() {
            PendingCmds::None => (),
            PendingCmds::Some(cmd_vec) => {
                // Commands within a single cycle supersede each other, so
                // only the last one is passed on
                ds.drive_ctrl_input.cmd = cmd_vec.last().copied();
            }
            // Exit if end of script reached
            PendingCmds::EndOfScript => {
                info!("End of drive script reached, stopping");
                break
            }
        }

        // ---- CONTROL ALGORITHM PROCESSING ----

        // DriveCtrl processing
        match ds.drive_ctrl.proc(&ds.drive_ctrl_input) {
            Ok((o, r)) => {
                ds.drive_ctrl_output = o;
                ds.drive_ctrl_status_rpt = r;
            },
            Err(e) => {
                // DriveCtrl errors usually just mean a bad command was
                // scripted, so just issue the warning and continue.
                warn!("Error during DriveCtrl processing: {}", e)
            }
        };

        // ---- ACTUATOR OUTPUT ----

        motor_driver.set_dems(&ds.drive_ctrl_output)
            .wrap_err("Failed to send demands to the motor driver")?;

        if ds.is_1_hz_cycle {
            info!(
                "Wheel demands: left {:+.3}, right {:+.3}",
                ds.drive_ctrl_output.left_dem,
                ds.drive_ctrl_output.right_dem
            );
        }

        // ---- WRITE ARCHIVES ----

        if let Err(e) = ds.drive_ctrl.write() {
            warn!("Could not write DriveCtrl archives: {}", e);
        }

        // ---- CYCLE MANAGEMENT ----

        let cycle_dur = Instant::now() - cycle_start_instant;

        // Get sleep duration
        match Duration::from_secs_f64(CYCLE_PERIOD_S)
            .checked_sub(cycle_dur)
        {
            Some(d) => {
                ds.num_consec_cycle_overruns = 0;
                thread::sleep(d);
            },
            None => {
                warn!(
                    "Cycle overran by {:.06} s",
                    cycle_dur.as_secs_f64() - CYCLE_PERIOD_S
                );
                ds.num_consec_cycle_overruns += 1;
            }
        }

        // Increment cycle counter
        ds.num_cycles += 1;
    }

    // ---- SHUTDOWN ----

    // Leave the motors stopped
    motor_driver.set_dems(&WheelDems::default())
        .wrap_err("Failed to stop the motors")?;

    info!("End of execution");

    Ok(())
}

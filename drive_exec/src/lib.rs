//! # Drive library.
//!
//! This library allows other crates in the workspace, and the tests, to
//! access items defined inside the drive executable.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Global data store for the executable
pub mod data_store;

/// Drive control module - converts high level drive commands into per-side wheel demands
pub mod drive_ctrl;

/// Motor driver - delivers the wheel demands to the motor actuators
pub mod motor_driver;

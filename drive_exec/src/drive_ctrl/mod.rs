//! Drive control module

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod cmd;
mod params;
mod rate_limiter;
mod state;
mod calc_arcade;
mod calc_button;
mod calc_cheezy;
mod calc_tank;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use cmd::*;
pub use params::*;
pub use rate_limiter::*;
pub use state::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during DriveCtrl operation.
#[derive(Debug, thiserror::Error)]
pub enum DriveCtrlError {
    #[error("Cannot load the parameters: {0}")]
    ParamLoadError(#[from] util::params::LoadError),

    #[error("Cannot initialise an archiver: {0}")]
    ArchiverInitError(String),

    #[error("Ramp rate must be positive, got {0}")]
    NonPositiveRampRate(f64),

    #[error("Recieved an invalid drive command: {0:#?}")]
    InvalidDriveCmd(DriveCmd),

    #[error("DriveCtrl has not been initialised")]
    NotInitialised,
}

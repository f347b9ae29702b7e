//! Host platform utility functions

use std::env;
use std::path::PathBuf;

/// Name of the environment variable giving the software's root directory.
pub const SW_ROOT_ENV_VAR: &str = "DDRIVE_SW_ROOT";

/// Retrieve the root directory of the software installation.
///
/// The root is read from the `DDRIVE_SW_ROOT` environment variable, and is
/// used to locate the `params`, `scripts`, and `sessions` directories.
pub fn get_ddrive_sw_root() -> Result<PathBuf, env::VarError> {
    Ok(PathBuf::from(env::var(SW_ROOT_ENV_VAR)?))
}

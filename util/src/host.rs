//! Host platform utility functions

use std::env;
use std::path::PathBuf;

/// Name of the environment variable pointing at the software root directory.
pub const SW_ROOT_ENV_VAR: &str = "MAZE_SW_ROOT";

/// Get the software root directory from the `MAZE_SW_ROOT` environment
/// variable.
///
/// The root contains the `params` directory and is where the `sessions`
/// directory is created.
pub fn get_maze_sw_root() -> Result<PathBuf, env::VarError> {
    env::var(SW_ROOT_ENV_VAR).map(PathBuf::from)
}

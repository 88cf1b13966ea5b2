//! Start-up configuration read from the environment.

use popout_core::{DEFAULT_COLS, DEFAULT_ROWS, MAX_DIMENSION};
use thiserror::Error;

/// Board height override
pub const ROWS_VAR: &str = "POPOUT_ROWS";

/// Board width override
pub const COLS_VAR: &str = "POPOUT_COLS";

/// Errors that can occur when reading configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var} must be a whole number, got {value:?}")]
    NotANumber { var: &'static str, value: String },

    #[error("{var} must be at least 1")]
    Zero { var: &'static str },

    #[error("{var} must be at most {max}, got {value}")]
    TooLarge {
        var: &'static str,
        value: usize,
        max: usize,
    },
}

/// Board dimensions for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub rows: usize,
    pub cols: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
        }
    }
}

impl SessionConfig {
    /// Read `POPOUT_ROWS` and `POPOUT_COLS`, falling back to the classic 4x5
    /// board for unset variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build a config from any variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            rows: read_dimension(&lookup, ROWS_VAR, defaults.rows)?,
            cols: read_dimension(&lookup, COLS_VAR, defaults.cols)?,
        })
    }
}

fn read_dimension<F>(lookup: &F, var: &'static str, default: usize) -> Result<usize, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(var) else {
        return Ok(default);
    };

    match value.trim().parse::<usize>() {
        Ok(0) => Err(ConfigError::Zero { var }),
        Ok(n) if n > MAX_DIMENSION => Err(ConfigError::TooLarge {
            var,
            value: n,
            max: MAX_DIMENSION,
        }),
        Ok(n) => Ok(n),
        Err(_) => Err(ConfigError::NotANumber { var, value }),
    }
}

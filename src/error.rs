//! Unified error type for knobkiosk.
//!
//! We avoid `alloc` - all variants carry only fixed-size data. Startup
//! errors (configuration) are fatal; everything that can happen inside the
//! tick loop is logged by the driver and swallowed at the tick boundary,
//! because a kiosk must never halt on a transient I/O hiccup.

use core::fmt;

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The configuration document is missing or malformed. Fatal at startup.
    Config(ConfigError),

    /// A GPIO line could not be sampled this tick. Treated as "no change".
    HardwareRead,

    /// A render request could not be served (empty or unreadable category
    /// directory). The previous frame persists.
    Render,
}

/// Configuration problems that abort startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A required key (`leds`, `dt`, `clk`, `sw`) is absent.
    MissingKey(&'static str),

    /// The `leds` list is empty - no categories to select.
    NoCategories,

    /// The `leds` list exceeds the supported category bound.
    TooManyCategories,
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "configuration error: {e}"),
            Error::HardwareRead => write!(f, "GPIO sample failed"),
            Error::Render => write!(f, "render request could not be served"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingKey(key) => write!(f, "missing required key `{key}`"),
            ConfigError::NoCategories => write!(f, "`leds` must list at least one output pin"),
            ConfigError::TooManyCategories => {
                write!(f, "`leds` lists more pins than the supported maximum")
            }
        }
    }
}

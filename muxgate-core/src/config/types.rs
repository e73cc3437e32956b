//! Configuration type definitions

use crate::input::ButtonId;
use crate::passcode::Passcode;

/// Maximum passcode length
pub const MAX_PASSCODE_LEN: usize = 8;

/// Maximum number of debounced presses waiting for evaluation
pub const MAX_QUEUED_PRESSES: usize = 16;

/// Maximum number of passcode buttons
pub const MAX_BUTTONS: u8 = 8;

/// Errors found while validating configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Passcode has no entries
    EmptyPasscode,
    /// Passcode is longer than [`MAX_PASSCODE_LEN`]
    PasscodeTooLong,
    /// Passcode refers to a button that is not wired
    UnknownButton(ButtonId),
    /// Button count is zero or above [`MAX_BUTTONS`]
    InvalidButtonCount,
    /// Debounce window of zero accepts every bounce
    ZeroDebounce,
    /// Idle timeout must be longer than the debounce window
    IdleTimeoutTooShort,
}

/// Timing parameters (all in milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimingConfig {
    /// Wait after driving the select lines before sampling the sense line
    pub settle_ms: u32,
    /// Pause between the scan and the passcode evaluation of each cycle
    pub cycle_ms: u32,
    /// Edges closer than this to the last accepted edge are bounces
    pub debounce_ms: u32,
    /// Inactivity after which an incomplete sequence is discarded
    pub idle_timeout_ms: u32,
}

impl TimingConfig {
    /// Reference timings: 20ms settle, 100ms cycle, 200ms debounce, 3s idle
    pub const DEFAULT: Self = Self {
        settle_ms: 20,
        cycle_ms: 100,
        debounce_ms: 200,
        idle_timeout_ms: 3000,
    };

    /// Validate timing relationships
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.debounce_ms == 0 {
            return Err(ConfigError::ZeroDebounce);
        }
        if self.idle_timeout_ms <= self.debounce_ms {
            return Err(ConfigError::IdleTimeoutTooShort);
        }
        Ok(())
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Complete control loop configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlConfig {
    /// Timing parameters
    pub timing: TimingConfig,
    /// Reference button sequence
    pub passcode: Passcode,
    /// Number of wired passcode buttons
    pub button_count: u8,
}

impl ControlConfig {
    /// Build and validate a configuration from button indices
    pub fn new(
        timing: TimingConfig,
        passcode: &[u8],
        button_count: u8,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            timing,
            passcode: Passcode::from_indices(passcode)?,
            button_count,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check all configuration invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.timing.validate()?;

        if self.button_count == 0 || self.button_count > MAX_BUTTONS {
            return Err(ConfigError::InvalidButtonCount);
        }

        if let Some(&unknown) = self
            .passcode
            .as_slice()
            .iter()
            .find(|button| button.index() >= self.button_count)
        {
            return Err(ConfigError::UnknownButton(unknown));
        }

        Ok(())
    }
}

impl Default for ControlConfig {
    /// Three buttons, passcode 0-2-1, reference timings
    fn default() -> Self {
        Self {
            timing: TimingConfig::DEFAULT,
            passcode: Passcode::reference(),
            button_count: 3,
        }
    }
}

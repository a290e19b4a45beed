//! Validated game configuration with explicit defaults.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Timing characteristics of a spin.
///
/// All intervals are milliseconds. The defaults reproduce the classic feel:
/// 100ms base step, three full laps, and a five-unit starting buffer that
/// burns off over the first frames and builds back up near landing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinConfig {
    /// Base interval between highlight frames.
    pub step_ms: u64,
    /// Full ring traversals before the pointer may land.
    pub laps: u32,
    /// Initial deceleration counter, in buffer units.
    pub buffer: u32,
    /// Milliseconds added to a frame per buffer unit.
    pub buffer_unit_ms: u64,
    /// Pause between landing and the result dialog.
    pub settle_ms: u64,
    /// Resting tile from a previous session, replayed before the next spin.
    pub history_index: usize,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            step_ms: 100,
            laps: 3,
            buffer: 5,
            buffer_unit_ms: 50,
            settle_ms: 600,
            history_index: 0,
        }
    }
}

impl SpinConfig {
    /// Validate invariants. Construction of a game fails on the first
    /// violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.step_ms == 0 {
            return Err(ConfigError::ZeroStep);
        }
        if self.laps == 0 {
            return Err(ConfigError::ZeroLaps);
        }
        if self.buffer_unit_ms == 0 {
            return Err(ConfigError::ZeroBufferUnit);
        }
        Ok(())
    }
}

/// Copy shown by the result and address dialogs. Front-end concern; the
/// engine never reads it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogText {
    pub success_title: String,
    pub failed_title: String,
    pub address_title: String,
    pub confirm_text: String,
    pub cancel_text: String,
}

impl Default for DialogText {
    fn default() -> Self {
        Self {
            success_title: "You won!".to_string(),
            failed_title: "No luck this time".to_string(),
            address_title: "Shipping address".to_string(),
            confirm_text: "OK".to_string(),
            cancel_text: "Cancel".to_string(),
        }
    }
}

/// Stored receiver details used to prefill the address form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiverPrefill {
    pub player_phone: String,
    pub receiver: String,
    pub region: String,
    pub detail: String,
}

impl ReceiverPrefill {
    pub fn is_empty(&self) -> bool {
        self.player_phone.is_empty()
            && self.receiver.is_empty()
            && self.region.is_empty()
            && self.detail.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SpinConfig::default();
        assert_eq!(config.step_ms, 100);
        assert_eq!(config.laps, 3);
        assert_eq!(config.buffer, 5);
        assert_eq!(config.buffer_unit_ms, 50);
        assert_eq!(config.settle_ms, 600);
        assert_eq!(config.history_index, 0);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn zero_fields_are_rejected() {
        use crate::error::ConfigError;

        let config = SpinConfig {
            step_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroStep));

        let config = SpinConfig {
            laps: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroLaps));

        let config = SpinConfig {
            buffer_unit_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroBufferUnit));
    }

    #[test]
    fn zero_buffer_and_settle_are_allowed() {
        let config = SpinConfig {
            buffer: 0,
            settle_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn empty_prefill_reports_empty() {
        assert!(ReceiverPrefill::default().is_empty());
        let filled = ReceiverPrefill {
            receiver: "A. Winner".to_string(),
            ..Default::default()
        };
        assert!(!filled.is_empty());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: SpinConfig = serde_json::from_str(r#"{"step_ms": 20}"#).expect("deserialize");
        assert_eq!(config.step_ms, 20);
        assert_eq!(config.laps, 3);

        let text: DialogText = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(text.confirm_text, "OK");
    }
}

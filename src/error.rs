//! Configuration errors.
//!
//! Gameplay operations never fail: a jump at the cap or a dash on cooldown is
//! a silent no-op. The only failures are bad tuning values and missing
//! collaborators, both of which are caught before the first gameplay tick.
use thiserror::Error;

/// Errors raised while loading settings or wiring the scene.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A settings field holds a value outside its accepted range.
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        /// Dotted path of the offending field (e.g. `player.speed`).
        field: &'static str,
        /// Human readable explanation.
        reason: String,
    },

    /// A collaborator the gameplay systems require is absent.
    #[error("missing required collaborator: {0}")]
    MissingCollaborator(&'static str),
}

/// Reject negative, NaN and infinite tuning values.
pub(crate) fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("expected a finite, non-negative number, got {value}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_negative_accepts_zero_and_positive() {
        assert!(non_negative("x", 0.0).is_ok());
        assert!(non_negative("x", 12.5).is_ok());
    }

    #[test]
    fn non_negative_rejects_negative_and_nan() {
        assert!(matches!(
            non_negative("player.speed", -1.0),
            Err(ConfigError::Invalid { field: "player.speed", .. })
        ));
        assert!(non_negative("x", f32::NAN).is_err());
        assert!(non_negative("x", f32::INFINITY).is_err());
    }

    #[test]
    fn error_messages_name_the_field() {
        let err = ConfigError::Invalid { field: "coins.value", reason: "must be at least 1".into() };
        assert_eq!(err.to_string(), "invalid setting `coins.value`: must be at least 1");
        assert_eq!(
            ConfigError::MissingCollaborator("player").to_string(),
            "missing required collaborator: player"
        );
    }
}

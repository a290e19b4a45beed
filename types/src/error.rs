//! Error taxonomy for board construction and the draw pipeline.

use thiserror::Error;

/// Configuration rejected when a game is constructed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("prize catalog is empty")]
    EmptyCatalog,
    #[error("step_ms must be nonzero")]
    ZeroStep,
    #[error("laps must be nonzero")]
    ZeroLaps,
    #[error("buffer_unit_ms must be nonzero")]
    ZeroBufferUnit,
}

/// Failure of a single draw.
///
/// No failure leaves the in-flight flag set: errors before the spin lands
/// clear it, and errors after landing happen with the flag already
/// released (and possibly held again by a newer draw, which keeps it).
#[derive(Debug, Error)]
pub enum GameError {
    /// A draw was requested while another is still running. The running
    /// draw is unaffected.
    #[error("draw already in progress")]
    ConcurrentDraw,
    /// The backend resolved a prize without an identifier.
    #[error("drawn prize has no id")]
    MissingPrizeId,
    /// The backend resolved a prize id that is not on the board.
    #[error("prize {prize_id} is not on the board")]
    PrizeNotFound { prize_id: u64 },
    /// The externally supplied draw/save call failed.
    #[error("backend: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// The front end failed while presenting.
    #[error("frontend: {0}")]
    Frontend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl GameError {
    /// Wrap a backend error.
    pub fn backend<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        GameError::Backend(Box::new(err))
    }

    /// Wrap a front-end error.
    pub fn frontend<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        GameError::Frontend(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failure() {
        assert_eq!(
            GameError::ConcurrentDraw.to_string(),
            "draw already in progress"
        );
        assert_eq!(
            GameError::PrizeNotFound { prize_id: 42 }.to_string(),
            "prize 42 is not on the board"
        );
        assert_eq!(ConfigError::ZeroStep.to_string(), "step_ms must be nonzero");
    }

    #[test]
    fn wrappers_preserve_source() {
        let err = GameError::backend(std::io::Error::new(
            std::io::ErrorKind::TimedOut,
            "draw endpoint unreachable",
        ));
        assert!(err.to_string().contains("draw endpoint unreachable"));
        assert!(std::error::Error::source(&err).is_some());
    }
}

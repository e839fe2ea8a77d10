//! Error handling logic

/// Error types raised across the emotional core.
///
/// Each variant carries a human readable `message`. Only
/// [`AuraError::InvalidInput`], [`AuraError::Config`] and
/// [`AuraError::Internal`] ever reach callers of
/// [`EmotionalCore`](crate::EmotionalCore); simulation failures are recovered
/// by the evaluator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuraError {
    /// A request was rejected before evaluation (unknown emotion,
    /// out-of-range intensity, zero shots, wrong parameter count).
    #[error("Invalid Input: {message}")]
    InvalidInput {
        /// InvalidInput failure message
        message: String,
    },

    /// The statevector backend could not build or run a circuit.
    #[error("Simulation Failure: {message}")]
    Simulation {
        /// Simulation failure message
        message: String,
    },

    /// A circuit or operation is inconsistent with the register it acts on.
    #[error("Invalid Operation: {message}")]
    InvalidOperation {
        /// InvalidOperation failure message
        message: String,
    },

    /// Configuration values could not be parsed or are out of range.
    #[error("Configuration Error: {message}")]
    Config {
        /// Config failure message
        message: String,
    },

    /// Unexpected internal failure; counters stay consistent.
    #[error("Internal Error: {message}")]
    Internal {
        /// Internal failure message
        message: String,
    },
}

impl AuraError {
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput { message: message.into() }
    }

    pub(crate) fn simulation(message: impl Into<String>) -> Self {
        Self::Simulation { message: message.into() }
    }

    pub(crate) fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation { message: message.into() }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }

    pub(crate) fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into() }
    }
}

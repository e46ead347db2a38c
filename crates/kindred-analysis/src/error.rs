use kindred_core::ErrorCode;

/// Errors raised by metric computations and the ranking reporter.
///
/// A metric error never poisons other metrics: callers running several
/// metrics report each failure against its own metric.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MetricsError {
    #[error("{metric} did not converge within {iterations} iterations (tolerance {tolerance})")]
    NotConverged {
        metric: &'static str,
        iterations: usize,
        tolerance: f64,
    },

    #[error("{metric} is undefined on an empty graph")]
    EmptyGraph { metric: &'static str },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl MetricsError {
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::NotConverged { .. } | Self::EmptyGraph { .. } => ErrorCode::ConvergenceFailed,
            Self::InvalidArgument(_) => ErrorCode::InvalidArgument,
        }
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, MetricsError>;

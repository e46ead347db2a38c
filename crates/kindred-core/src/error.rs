use std::fmt;

/// Stable error classes surfaced by the CLI as `E####` codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InputReadFailed,
    ConfigParseError,
    ValidationFailed,
    InvalidArgument,
    ConvergenceFailed,
    InternalUnexpected,
}

impl ErrorCode {
    /// The `E####` identifier; the leading digit groups the class.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::InputReadFailed => "E1001",
            Self::ConfigParseError => "E1002",
            Self::ValidationFailed => "E2001",
            Self::InvalidArgument => "E2002",
            Self::ConvergenceFailed => "E3001",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// One-line summary of the class.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::InputReadFailed => "Input table could not be read",
            Self::ConfigParseError => "Config file parse error",
            Self::ValidationFailed => "Input graph failed validation",
            Self::InvalidArgument => "Argument out of domain",
            Self::ConvergenceFailed => "Iterative solver did not converge",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// What to try next, if anything useful can be said.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::InputReadFailed => Some("Check the --nodes/--edges paths and file format (csv or json)."),
            Self::ConfigParseError => Some("Fix syntax in kindred.toml and retry."),
            Self::ValidationFailed => {
                Some("Every edge must reference a known node and node names must be unique.")
            }
            Self::InvalidArgument => None,
            Self::ConvergenceFailed => Some("Raise max_iter or loosen tolerance in kindred.toml."),
            Self::InternalUnexpected => Some("Rerun with KINDRED_LOG=debug and report the log."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Referential-integrity failures detected while registering a graph.
///
/// Any of these aborts the run before a single metric is computed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("duplicate node id: {0}")]
    DuplicateNode(String),

    #[error("edge {from} -> {to} references unknown node {missing}")]
    DanglingEdge {
        from: String,
        to: String,
        missing: String,
    },

    #[error("self-loop on node {0} is not allowed")]
    SelfLoop(String),

    #[error("node at row {0} has an empty name")]
    EmptyName(usize),

    #[error("node {name} has popularity {value}, expected a value in [0, 1]")]
    PopularityOutOfRange { name: String, value: f64 },
}

impl ValidationError {
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        ErrorCode::ValidationFailed
    }
}

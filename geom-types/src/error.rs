use std::fmt;

/// The shared error kinds surfaced by every fallible constructor and
/// operation in this workspace.
///
/// Construction-argument problems (`ArgumentInvalid`, `ArgumentMissing`)
/// are the caller's fault and are expected to occur for malformed input.
/// `Overflow` and `InvariantViolation` indicate either an unrepresentable
/// input or an implementation bug; neither is recoverable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeomError {
    /// A constructor argument was present but out of its valid domain,
    /// e.g. a negative epsilon or a rectangle with `max < min`.
    ArgumentInvalid { message: String },
    /// A required input was absent, e.g. an empty point list.
    ArgumentMissing { message: String },
    /// An index (real or pseudo) escaped its valid domain.
    IndexOutOfBounds { index: isize, bound: usize },
    /// Checked integer arithmetic wrapped.
    Overflow { message: String },
    /// A structural invariant was found broken by a `validate` pass.
    /// This signals an implementation bug, not a user error.
    InvariantViolation { message: String },
}

impl GeomError {
    pub fn argument_invalid(message: impl Into<String>) -> Self {
        GeomError::ArgumentInvalid {
            message: message.into(),
        }
    }

    pub fn argument_missing(message: impl Into<String>) -> Self {
        GeomError::ArgumentMissing {
            message: message.into(),
        }
    }

    pub fn overflow(message: impl Into<String>) -> Self {
        GeomError::Overflow {
            message: message.into(),
        }
    }

    pub fn invariant_violation(message: impl Into<String>) -> Self {
        GeomError::InvariantViolation {
            message: message.into(),
        }
    }
}

impl fmt::Display for GeomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeomError::ArgumentInvalid { message } => write!(f, "invalid argument: {message}"),
            GeomError::ArgumentMissing { message } => write!(f, "missing argument: {message}"),
            GeomError::IndexOutOfBounds { index, bound } => {
                write!(f, "index {index} out of bounds (valid range is 0..{bound})")
            }
            GeomError::Overflow { message } => write!(f, "integer overflow: {message}"),
            GeomError::InvariantViolation { message } => {
                write!(f, "invariant violation: {message}")
            }
        }
    }
}

impl std::error::Error for GeomError {}

pub type GeomResult<T> = Result<T, GeomError>;

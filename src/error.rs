//! Error type for ALNS runs.

use std::error;
use std::fmt;
use std::result;

/// Boxed error returned by user-supplied destroy/repair operators.
pub type BoxError = Box<dyn error::Error + Send + Sync + 'static>;

/// Which operator collection an [`AlnsError::Operator`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorKind {
    Destroy,
    Repair,
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperatorKind::Destroy => write!(f, "destroy"),
            OperatorKind::Repair => write!(f, "repair"),
        }
    }
}

/// Errors surfaced by scheme/criterion construction and by [`Alns::iterate`].
///
/// Numerical edge cases (a temperature approaching zero, all operator
/// weights decaying to zero) are not errors: they are clamped or fall back
/// to uniform selection.
///
/// [`Alns::iterate`]: crate::Alns::iterate
#[derive(Debug)]
pub enum AlnsError {
    /// An operator set is empty, a strategy parameter is out of range, or
    /// the initial objective cannot be evaluated.
    Configuration(String),

    /// A destroy or repair operator failed. The run is aborted and the
    /// operator's own error is available through [`error::Error::source`].
    Operator {
        kind: OperatorKind,
        name: String,
        source: BoxError,
    },
}

impl AlnsError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        AlnsError::Configuration(msg.into())
    }

    /// Whether this is a configuration error.
    pub fn is_configuration(&self) -> bool {
        matches!(self, AlnsError::Configuration(_))
    }
}

impl fmt::Display for AlnsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlnsError::Configuration(msg) => write!(f, "configuration error: {msg}"),
            AlnsError::Operator { kind, name, source } => {
                write!(f, "{kind} operator '{name}' failed: {source}")
            }
        }
    }
}

impl error::Error for AlnsError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            AlnsError::Configuration(_) => None,
            AlnsError::Operator { source, .. } => Some(source.as_ref()),
        }
    }
}

pub type Result<T> = result::Result<T, AlnsError>;

use thiserror::Error;

/// Errors raised while assembling a message payload.
///
/// All variants surface synchronously during construction, before anything is
/// submitted for delivery, and are recoverable by fixing the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    /// A value had a shape that cannot become the requested entity (e.g. an
    /// integer passed where a built field or an attribute map was expected).
    #[error("{entity} must be a built value or an attribute map, got {found}")]
    InvalidShape {
        /// What the caller was trying to build.
        entity: &'static str,
        /// Shape of the value actually supplied.
        found: &'static str,
    },

    /// A recognized attribute key held a value of the wrong type.
    #[error("attribute `{key}` expects {expected}, got {found}")]
    InvalidAttribute {
        /// The offending attribute key.
        key: &'static str,
        /// The type the attribute requires.
        expected: &'static str,
        /// Shape of the value actually supplied.
        found: &'static str,
    },

    /// The per-attachment action limit was exceeded at the point of addition.
    #[error("an attachment holds at most {limit} actions")]
    TooManyActions {
        /// The enforced limit.
        limit: usize,
    },
}

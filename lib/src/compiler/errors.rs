/*! Errors returned while compiling patterns. */

use thiserror::Error;

use crate::engine::Status;

/// Error returned when the engine rejects a pattern.
///
/// No compiled pattern exists after this error: compilation is atomic and
/// a failure leaves nothing behind.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("invalid pattern at byte {offset}: {status}")]
pub struct CompileError {
    /// Engine status code describing the failure.
    pub status: Status,
    /// Byte offset within the pattern at which the error was detected.
    pub offset: usize,
}

/// Error returned when compiling a batch of patterns fails.
///
/// The whole batch fails as a unit: no pattern set is observable after this
/// error, regardless of how many patterns had already been registered.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum MultiCompileError {
    /// One of the patterns in the batch was rejected by the engine.
    #[error("invalid pattern {index} at byte {offset}: {status}")]
    Compile {
        /// Engine status code describing the failure.
        status: Status,
        /// Zero-based index of the first failing pattern in the batch.
        index: usize,
        /// Byte offset within that pattern at which the error was detected.
        offset: usize,
    },
    /// A compiled pattern could not be registered into the shared context.
    #[error("registration of pattern {index} failed: {status}")]
    Register {
        /// Engine status code describing the failure.
        status: Status,
        /// Zero-based index of the pattern that failed to register.
        index: usize,
    },
}

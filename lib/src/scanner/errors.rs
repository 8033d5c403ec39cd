/*! Errors returned while searching. */

use thiserror::Error;

use crate::engine::{PatternId, Status};

/// Error returned when a search operation fails at the call level.
///
/// In a multi-pattern search this covers only call-level failures; a
/// failure affecting a single pattern is reported in that pattern's own
/// result record instead of being raised.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SearchError {
    /// The engine reported a non-success status for the call.
    #[error("search failed: {status}")]
    Engine {
        /// Engine status code describing the failure.
        status: Status,
    },
    /// No pattern with the given id is registered in the set.
    #[error("no registered pattern with id {pattern_id}")]
    UnknownPatternId {
        /// The id that was not found.
        pattern_id: PatternId,
    },
}

/*! Result records produced by searches. */

use crate::engine::{PatternId, Status};

/// Successful outcome of a search that found something.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchCount {
    /// Number of match records the engine filled in. Never exceeds the
    /// pattern's capture-group count plus one (the whole-match slot).
    pub count: usize,
    /// Engine status reported by the search.
    pub status: Status,
}

/// Per-pattern outcome of a multi-pattern search.
///
/// A search over a pattern set yields exactly one of these per registered
/// pattern, in registration order. Only the success-with-matches variant
/// carries a match count; an error record never does. That asymmetry is
/// part of the contract consumers rely on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternResult {
    /// The pattern was searched successfully and matched.
    Found {
        /// 1-based id of the pattern this record belongs to.
        pattern_id: PatternId,
        /// Per-pattern engine status.
        status: Status,
        /// True if the engine has no further matches to report for this
        /// pattern in this call.
        done: bool,
        /// Number of match records filled for this pattern.
        count: usize,
    },
    /// The pattern was searched successfully and did not match.
    NotFound {
        /// 1-based id of the pattern this record belongs to.
        pattern_id: PatternId,
        /// Per-pattern engine status.
        status: Status,
        /// True if the engine has no further matches to report for this
        /// pattern in this call.
        done: bool,
    },
    /// The engine failed while searching this pattern. Other patterns in
    /// the same call are unaffected and report their own records.
    Error {
        /// 1-based id of the pattern this record belongs to.
        pattern_id: PatternId,
        /// Engine status describing the per-pattern failure.
        error: Status,
        /// True if the engine has no further matches to report for this
        /// pattern in this call.
        done: bool,
    },
}

impl PatternResult {
    /// 1-based id of the pattern this record belongs to.
    pub fn pattern_id(&self) -> PatternId {
        match self {
            Self::Found { pattern_id, .. }
            | Self::NotFound { pattern_id, .. }
            | Self::Error { pattern_id, .. } => *pattern_id,
        }
    }

    /// The engine's "nothing further to report" flag for this pattern.
    pub fn done(&self) -> bool {
        match self {
            Self::Found { done, .. }
            | Self::NotFound { done, .. }
            | Self::Error { done, .. } => *done,
        }
    }

    /// The match count, if this record reports a successful match.
    pub fn count(&self) -> Option<usize> {
        match self {
            Self::Found { count, .. } => Some(*count),
            _ => None,
        }
    }

    /// True if this record reports a successful match.
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    /// The per-pattern error status, if this record reports a failure.
    pub fn error(&self) -> Option<Status> {
        match self {
            Self::Error { error, .. } => Some(*error),
            _ => None,
        }
    }
}

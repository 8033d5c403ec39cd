/*! Searches byte buffers with compiled patterns.

This module implements the search operations of [`Pattern`] and
[`PatternSet`]. Every search allocates its match-record scratch space
fresh, sized from the capture-group count recorded at compile time, and
releases it before returning on every path; no state is carried from one
call to the next apart from engine state explicitly changed through the
match-limit setters.

Searches are synchronous and run to completion. A given pattern or set is
not meant to be shared between threads without external serialization: the
engine handle is mutable engine state and no internal locking is performed.
*/

#[cfg(feature = "logging")]
use log::*;

use crate::compiler::{Pattern, PatternSet};
use crate::engine::{MatchSlot, MultiFind, PatternId, Status};

pub mod errors;
mod matches;


pub use matches::{MatchCount, PatternResult};

use errors::SearchError;

impl Pattern {
    /// Searches `input` for the pattern.
    ///
    /// Returns `Ok(None)` if the pattern does not match: an explicit "no
    /// match", distinct from an error. Otherwise returns the number of
    /// match records the engine filled in, which never exceeds
    /// `group_count() + 1`.
    pub fn search(
        &mut self,
        input: &[u8],
    ) -> Result<Option<MatchCount>, SearchError> {
        // One slot for the whole match plus one per capture group. The
        // whole-match slot is why the capacity is group_count + 1, and it
        // is required even for patterns with no groups at all.
        let capacity = 1 + self.group_count();
        let mut slots = vec![MatchSlot::default(); capacity];

        let outcome = self.handle().find(input, &mut slots);
        if !outcome.status.is_ok() {
            return Err(SearchError::Engine { status: outcome.status });
        }

        #[cfg(feature = "logging")]
        debug!(
            "searched {} bytes: {} of {} slots filled",
            input.len(),
            outcome.count,
            capacity
        );

        if outcome.count == 0 {
            return Ok(None);
        }
        Ok(Some(MatchCount { count: outcome.count, status: outcome.status }))
    }

    /// Caps the work the engine may spend on a single search with this
    /// pattern.
    ///
    /// The limit is engine state on the handle: it persists across
    /// searches until changed again. A non-success engine status is
    /// surfaced as an error; on success the numeric status is returned for
    /// inspection.
    pub fn set_match_limit(
        &mut self,
        limit: u32,
    ) -> Result<Status, SearchError> {
        let status = self.handle_mut().set_match_limit(limit);
        if !status.is_ok() {
            return Err(SearchError::Engine { status });
        }
        Ok(status)
    }
}

impl PatternSet {
    /// Searches `input` with every pattern in the set in one call.
    ///
    /// Returns exactly one [`PatternResult`] per registered pattern, in
    /// registration order, regardless of how many patterns matched. A
    /// failure affecting one pattern is reported in that pattern's record
    /// while the others report normally; only a call-level engine failure
    /// makes the whole search return an error.
    pub fn search_multi(
        &mut self,
        input: &[u8],
    ) -> Result<Vec<PatternResult>, SearchError> {
        // All per-pattern record arrays are allocated up front, each sized
        // to its own pattern's capture-group capacity.
        let mut finds: Vec<MultiFind> = self
            .patterns()
            .iter()
            .map(|info| MultiFind::with_capacity(1 + info.group_count()))
            .collect();
        debug_assert_eq!(finds.len(), self.multi().len());

        let status = self.multi().find(input, &mut finds);
        if !status.is_ok() {
            return Err(SearchError::Engine { status });
        }

        #[cfg(feature = "logging")]
        debug!(
            "multi-searched {} bytes with {} patterns",
            input.len(),
            finds.len()
        );

        Ok(finds
            .iter()
            .map(|find| {
                if !find.status.is_ok() {
                    PatternResult::Error {
                        pattern_id: find.pattern_id,
                        error: find.status,
                        done: find.done,
                    }
                } else if find.count > 0 {
                    PatternResult::Found {
                        pattern_id: find.pattern_id,
                        status: find.status,
                        done: find.done,
                        count: find.count,
                    }
                } else {
                    PatternResult::NotFound {
                        pattern_id: find.pattern_id,
                        status: find.status,
                        done: find.done,
                    }
                }
            })
            .collect())
    }

    /// Caps the work the engine may spend on the registered pattern
    /// `pattern_id` during a single search.
    ///
    /// Ids are the 1-based registration ids. An unknown id is an error; a
    /// pattern whose limit is exceeded during [`Self::search_multi`] fails
    /// individually, in its own result record.
    pub fn set_match_limit(
        &mut self,
        pattern_id: PatternId,
        limit: u32,
    ) -> Result<Status, SearchError> {
        let status = self.multi_mut().set_match_limit(pattern_id, limit);
        if status == Status::BadArgument {
            return Err(SearchError::UnknownPatternId { pattern_id });
        }
        if !status.is_ok() {
            return Err(SearchError::Engine { status });
        }
        Ok(status)
    }
}

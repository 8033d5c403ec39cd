/*! Compiles patterns into searchable form.

Patterns must be compiled before they can be used for searching data. A
single pattern compiles into a [`Pattern`]; an ordered batch of patterns
compiles into a [`PatternSet`], where every pattern is registered into one
shared engine context under a 1-based id matching its position in the batch.

Compilation is all-or-nothing in both cases. A failed [`compile`] returns
an error and nothing else; a failed [`compile_multi`] releases everything it
had acquired for the earlier patterns in the batch and returns an error, so
a partially built set is never observable.
*/

use bstr::{BStr, BString};
#[cfg(feature = "logging")]
use log::*;
use memchr::memchr_iter;

use crate::engine;
use crate::engine::{PatternId, Status};
use crate::options::RegexpOptions;

pub mod errors;

#[cfg(test)]
mod tests;

use errors::{CompileError, MultiCompileError};

/// Counts the capture groups in a pattern.
///
/// This is an approximation: it counts literal `(` bytes, so escaped
/// parentheses, non-capturing groups and parentheses inside character
/// classes are counted as if they opened a group. The result is therefore
/// an upper bound on the real capture-group count, which makes it safe for
/// sizing match-record arrays as `1 + count`.
pub(crate) fn count_capture_groups(pattern: &[u8]) -> usize {
    memchr_iter(b'(', pattern).count()
}

/// A compiled pattern.
///
/// Owns the engine handle produced by compiling one pattern, along with a
/// copy of the pattern text and the metadata gathered at compile time. The
/// handle is live for the whole lifetime of the `Pattern` and is freed
/// exactly once when it is dropped; a failed compilation never produces a
/// `Pattern` at all.
#[derive(Debug)]
pub struct Pattern {
    handle: engine::PatternHandle,
    pattern: BString,
    group_count: usize,
    state_size: usize,
    status: Status,
}

impl Pattern {
    /// The source text of the pattern.
    pub fn pattern(&self) -> &BStr {
        self.pattern.as_ref()
    }

    /// Number of capture groups in the pattern.
    ///
    /// Computed once at compile time by counting literal `(` bytes; see
    /// [`count_capture_groups`] for the approximation this implies.
    pub fn group_count(&self) -> usize {
        self.group_count
    }

    /// Engine-reported size of the compiled state, in bytes.
    /// Informational.
    pub fn state_size(&self) -> usize {
        self.state_size
    }

    /// The engine status reported by the compilation. Always the success
    /// status on a live `Pattern`.
    pub fn status(&self) -> Status {
        self.status
    }

    pub(crate) fn handle(&self) -> &engine::PatternHandle {
        &self.handle
    }

    pub(crate) fn handle_mut(&mut self) -> &mut engine::PatternHandle {
        &mut self.handle
    }
}

/// Metadata about one pattern registered in a [`PatternSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternInfo {
    pattern: BString,
    group_count: usize,
}

impl PatternInfo {
    /// The source text of the pattern.
    pub fn pattern(&self) -> &BStr {
        self.pattern.as_ref()
    }

    /// Number of capture groups in the pattern, counted the same way as
    /// [`Pattern::group_count`].
    pub fn group_count(&self) -> usize {
        self.group_count
    }
}

/// An ordered batch of compiled patterns sharing one engine context.
///
/// Produced by [`compile_multi`]. The patterns keep the order of the batch
/// they were compiled from: the pattern at index `i` holds the engine id
/// `i + 1`, and search results are reported in the same order. All engine
/// resources, including the per-pattern handles created during
/// registration, are owned by the set and freed when it is dropped.
#[derive(Debug)]
pub struct PatternSet {
    multi: engine::MultiHandle,
    patterns: Vec<PatternInfo>,
    state_size: usize,
    status: Status,
}

impl PatternSet {
    /// Number of patterns in the set.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// True if the set contains no patterns.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Per-pattern metadata, in registration order. The entry at index `i`
    /// describes the pattern with engine id `i + 1`.
    pub fn patterns(&self) -> &[PatternInfo] {
        &self.patterns
    }

    /// Accumulated engine-reported state size for the whole set, in bytes.
    /// Informational.
    pub fn state_size(&self) -> usize {
        self.state_size
    }

    /// The engine status reported by the batch compilation. Always the
    /// success status on a live `PatternSet`.
    pub fn status(&self) -> Status {
        self.status
    }

    pub(crate) fn multi(&self) -> &engine::MultiHandle {
        &self.multi
    }

    pub(crate) fn multi_mut(&mut self) -> &mut engine::MultiHandle {
        &mut self.multi
    }
}

/// Compiles a pattern.
///
/// Returns a [`Pattern`] owning the compiled engine state, or a
/// [`CompileError`] carrying the engine status and the byte offset of the
/// error within the pattern. Nothing is left allocated on failure.
///
/// # Example
///
/// ```
/// use patset::RegexpOptions;
///
/// let pattern = patset::compile(b"(a)(b)", RegexpOptions::empty()).unwrap();
/// assert_eq!(pattern.group_count(), 2);
/// ```
pub fn compile(
    pattern: &[u8],
    options: RegexpOptions,
) -> Result<Pattern, CompileError> {
    let opts = options.encode();
    let handle = engine::compile(pattern, &opts).map_err(|err| {
        CompileError { status: err.status, offset: err.offset }
    })?;

    #[cfg(feature = "logging")]
    debug!(
        "compiled pattern ({} bytes of state): {:?}",
        handle.state_size(),
        BStr::new(pattern)
    );

    Ok(Pattern {
        state_size: handle.state_size(),
        handle,
        pattern: BString::from(pattern),
        group_count: count_capture_groups(pattern),
        status: Status::Ok,
    })
}

/// Compiles a pattern, with options given as a raw integer.
///
/// Bits outside the five recognized option positions are silently ignored.
pub fn compile_with_flags(
    pattern: &[u8],
    flags: u32,
) -> Result<Pattern, CompileError> {
    compile(pattern, RegexpOptions::from_raw(flags))
}

/// Compiles an ordered batch of patterns into a [`PatternSet`].
///
/// The options are shared by every pattern in the batch. Each pattern is
/// compiled individually and registered into the shared context under the
/// id `index + 1`. The first failure aborts the whole call: all resources
/// acquired for the earlier patterns are released and a
/// [`MultiCompileError`] identifying the failing pattern is returned.
///
/// # Example
///
/// ```
/// use patset::RegexpOptions;
///
/// let set =
///     patset::compile_multi(&[b"(a)".as_slice(), b"b+".as_slice()],
///         RegexpOptions::empty())
///     .unwrap();
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.patterns()[0].group_count(), 1);
/// assert_eq!(set.patterns()[1].group_count(), 0);
/// ```
pub fn compile_multi(
    patterns: &[impl AsRef<[u8]>],
    options: RegexpOptions,
) -> Result<PatternSet, MultiCompileError> {
    let mut multi = engine::MultiHandle::with_capacity(patterns.len());
    let mut infos = Vec::with_capacity(patterns.len());
    let mut state_size = engine::MultiHandle::base_state_size(patterns.len());

    // Encoded once, shared by every pattern in the batch.
    let opts = options.encode();

    for (index, pattern) in patterns.iter().enumerate() {
        let pattern = pattern.as_ref();

        let handle = engine::compile(pattern, &opts).map_err(|err| {
            MultiCompileError::Compile {
                status: err.status,
                index,
                offset: err.offset,
            }
        })?;
        state_size += handle.state_size();

        let id = (index + 1) as PatternId;
        let status = multi.register(handle, id);
        if !status.is_ok() {
            return Err(MultiCompileError::Register { status, index });
        }

        infos.push(PatternInfo {
            pattern: BString::from(pattern),
            group_count: count_capture_groups(pattern),
        });
    }

    #[cfg(feature = "logging")]
    info!(
        "compiled pattern set: {} patterns, {} bytes of state",
        infos.len(),
        state_size
    );

    Ok(PatternSet { multi, patterns: infos, state_size, status: Status::Ok })
}

/// Compiles a batch of patterns, with options given as a raw integer.
///
/// Bits outside the five recognized option positions are silently ignored.
pub fn compile_multi_with_flags(
    patterns: &[impl AsRef<[u8]>],
    flags: u32,
) -> Result<PatternSet, MultiCompileError> {
    compile_multi(patterns, RegexpOptions::from_raw(flags))
}

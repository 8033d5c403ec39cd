/*! The matching engine behind the compiled-pattern types.

The rest of the crate talks to this module through a small set of
operations: compile a pattern into a [`PatternHandle`], allocate a
[`MultiHandle`] for a declared number of patterns, register compiled
patterns into it under 1-based ids, run a single or multi-pattern find over
a byte buffer, and adjust the match limit of a handle.

Patterns are parsed with [`regex-syntax`][1], which reports precise byte
offsets for syntax errors, and executed with [`regex-automata`][2]'s meta
regex. Option strings produced by
[`RegexpOptions::encode`](crate::RegexpOptions) are decoded here; characters
outside the known set are ignored.

[1]: https://docs.rs/regex-syntax
[2]: https://docs.rs/regex-automata
*/

use std::fmt::{Display, Formatter};
use std::mem::size_of;
use std::str;

use regex_automata::meta;
use regex_syntax::ast::parse::ParserBuilder;
use regex_syntax::hir::translate::TranslatorBuilder;

/// 1-based identifier assigned to a pattern when it is registered into a
/// [`MultiHandle`], in registration order.
pub type PatternId = u32;

/// Work units a single find call may spend on a handle before it fails
/// with [`Status::MatchLimit`]. Can be changed per handle with
/// [`PatternHandle::set_match_limit`].
pub(crate) const DEFAULT_MATCH_LIMIT: u32 = 1 << 20;

/// Status code reported by the matching engine.
///
/// This is the engine's closed result-code set: [`Status::Ok`] is the only
/// success value, failures are negative. The numeric value is available
/// through [`Status::code`] and a human-readable description through
/// [`Status::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Status {
    /// The operation completed successfully.
    Ok = 0,
    /// An argument was outside the accepted range, such as an unknown
    /// pattern id.
    BadArgument = -3,
    /// The engine could not allocate memory.
    NoMemory = -4,
    /// The pattern was rejected by the compiler.
    BadPattern = -10,
    /// The search exceeded the match limit configured for the handle.
    MatchLimit = -11,
    /// A capacity was exceeded, such as registering more patterns than the
    /// context was sized for.
    Overflow = -12,
}

impl Status {
    /// Returns the numeric status code.
    #[inline]
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Returns true if this is the success status.
    #[inline]
    pub fn is_ok(self) -> bool {
        matches!(self, Status::Ok)
    }

    /// Returns a human-readable description of the status code.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Ok => "no error",
            Status::BadArgument => "bad argument",
            Status::NoMemory => "memory allocation failed",
            Status::BadPattern => "invalid pattern",
            Status::MatchLimit => "match limit exceeded",
            Status::Overflow => "capacity exceeded",
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.as_str(), self.code())
    }
}

/// Error returned when the engine rejects a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct EngineError {
    pub status: Status,
    /// Byte offset within the pattern at which the error was detected.
    pub offset: usize,
}

/// One match record filled in by a find call.
///
/// Records the span of the whole match, of a participating capture group,
/// or of one occurrence when the `g` option is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct MatchSlot {
    pub start: usize,
    pub end: usize,
}

/// Outcome of a find call on a single handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FindOutcome {
    pub status: Status,
    /// Number of slots filled. Zero means no match.
    pub count: usize,
    /// True when the engine has nothing further to report for this call.
    /// False when it stopped early, either because the slot array was full
    /// with occurrences remaining or because the match limit was hit.
    pub done: bool,
}

/// Per-pattern in/out record for [`MultiHandle::find`].
///
/// The caller sizes `slots` before the call; the engine fills the remaining
/// fields, one record per registered pattern.
#[derive(Debug)]
pub(crate) struct MultiFind {
    pub pattern_id: PatternId,
    pub slots: Vec<MatchSlot>,
    pub status: Status,
    pub count: usize,
    pub done: bool,
}

impl MultiFind {
    /// Creates a record with `capacity` match slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pattern_id: 0,
            slots: vec![MatchSlot::default(); capacity],
            status: Status::Ok,
            count: 0,
            done: false,
        }
    }
}

/// Engine options decoded from an option string.
#[derive(Debug, Default, Clone, Copy)]
struct Options {
    multi_line: bool,
    dot_matches_new_line: bool,
    case_insensitive: bool,
    ignore_whitespace: bool,
    global: bool,
}

impl Options {
    /// Decodes an `m,s,i,x,g` option string. Unknown characters are
    /// ignored.
    fn parse(opts: &str) -> Self {
        let mut options = Self::default();
        for ch in opts.chars() {
            match ch {
                'm' => options.multi_line = true,
                's' => options.dot_matches_new_line = true,
                'i' => options.case_insensitive = true,
                'x' => options.ignore_whitespace = true,
                'g' => options.global = true,
                _ => {}
            }
        }
        options
    }
}

/// A compiled single-pattern handle.
///
/// Always holds a live, executable regex. Failed compilations never produce
/// a handle, so there is no null or half-constructed state to check for.
#[derive(Debug)]
pub(crate) struct PatternHandle {
    re: meta::Regex,
    global: bool,
    match_limit: u32,
}

/// Compiles `pattern` with the given option string into a handle.
///
/// The pattern must be valid UTF-8; the offset of the first invalid byte,
/// or of the syntax error, is reported in the returned [`EngineError`].
pub(crate) fn compile(
    pattern: &[u8],
    opts: &str,
) -> Result<PatternHandle, EngineError> {
    let options = Options::parse(opts);

    let pattern = str::from_utf8(pattern).map_err(|err| EngineError {
        status: Status::BadPattern,
        offset: err.valid_up_to(),
    })?;

    let ast = ParserBuilder::new()
        .ignore_whitespace(options.ignore_whitespace)
        .build()
        .parse(pattern)
        .map_err(|err| EngineError {
            status: Status::BadPattern,
            offset: err.span().start.offset,
        })?;

    // The translator works on bytes, not unicode codepoints, because the
    // buffers being searched can contain arbitrary non-UTF8 data.
    let hir = TranslatorBuilder::new()
        .case_insensitive(options.case_insensitive)
        .multi_line(options.multi_line)
        .dot_matches_new_line(options.dot_matches_new_line)
        .unicode(false)
        .utf8(false)
        .build()
        .translate(pattern, &ast)
        .map_err(|err| EngineError {
            status: Status::BadPattern,
            offset: err.span().start.offset,
        })?;

    let re = meta::Regex::builder().build_from_hir(&hir).map_err(|_| {
        EngineError { status: Status::Overflow, offset: 0 }
    })?;

    Ok(PatternHandle {
        re,
        global: options.global,
        match_limit: DEFAULT_MATCH_LIMIT,
    })
}

impl PatternHandle {
    /// Heap memory used by the compiled pattern, in bytes. Informational.
    pub fn state_size(&self) -> usize {
        self.re.memory_usage()
    }

    /// Caps the work units a single find call may spend on this handle.
    pub fn set_match_limit(&mut self, limit: u32) -> Status {
        self.match_limit = limit;
        Status::Ok
    }

    /// Searches `haystack`, filling `slots` with up to `slots.len()` match
    /// records and reporting how many were filled.
    ///
    /// Without the `g` option a successful match fills one record for the
    /// whole match followed by one per participating capture group. With
    /// `g` each record is one occurrence of the whole pattern, and `done`
    /// is false if occurrences remained when the slot array filled up.
    pub fn find(&self, haystack: &[u8], slots: &mut [MatchSlot]) -> FindOutcome {
        if self.global {
            self.find_global(haystack, slots)
        } else {
            self.find_first(haystack, slots)
        }
    }

    fn find_first(
        &self,
        haystack: &[u8],
        slots: &mut [MatchSlot],
    ) -> FindOutcome {
        if self.match_limit < 1 {
            return FindOutcome {
                status: Status::MatchLimit,
                count: 0,
                done: false,
            };
        }
        let mut caps = self.re.create_captures();
        self.re.captures(haystack, &mut caps);
        if !caps.is_match() {
            return FindOutcome { status: Status::Ok, count: 0, done: true };
        }
        // Group 0 is the whole match, so this fills the whole-match slot
        // first and then one slot per participating capture group.
        let mut count = 0;
        for group in 0..caps.group_len() {
            if count == slots.len() {
                break;
            }
            if let Some(span) = caps.get_group(group) {
                slots[count] = MatchSlot { start: span.start, end: span.end };
                count += 1;
            }
        }
        FindOutcome { status: Status::Ok, count, done: true }
    }

    fn find_global(
        &self,
        haystack: &[u8],
        slots: &mut [MatchSlot],
    ) -> FindOutcome {
        let mut spent: u32 = 0;
        let mut count = 0;
        for m in self.re.find_iter(haystack) {
            spent += 1;
            if spent > self.match_limit {
                return FindOutcome {
                    status: Status::MatchLimit,
                    count: 0,
                    done: false,
                };
            }
            if count == slots.len() {
                // Capacity exhausted with at least one occurrence left.
                return FindOutcome { status: Status::Ok, count, done: false };
            }
            slots[count] = MatchSlot { start: m.start(), end: m.end() };
            count += 1;
        }
        FindOutcome { status: Status::Ok, count, done: true }
    }
}

/// A multi-pattern context sized for a declared number of patterns.
///
/// Patterns are registered under consecutive 1-based ids and searched with
/// one [`MultiHandle::find`] call that reports a per-pattern outcome for
/// every registered pattern.
#[derive(Debug)]
pub(crate) struct MultiHandle {
    capacity: usize,
    entries: Vec<Entry>,
}

#[derive(Debug)]
struct Entry {
    id: PatternId,
    handle: PatternHandle,
}

impl MultiHandle {
    /// Creates a context that accepts up to `capacity` patterns.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { capacity, entries: Vec::with_capacity(capacity) }
    }

    /// Fixed bookkeeping size of a context for `capacity` patterns, in
    /// bytes, not counting the registered patterns themselves.
    /// Informational.
    pub fn base_state_size(capacity: usize) -> usize {
        size_of::<Self>() + capacity * size_of::<Entry>()
    }

    /// Number of patterns registered so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Registers `handle` under `id`, taking ownership of it.
    ///
    /// Ids must be assigned consecutively starting at 1; anything else is
    /// rejected with [`Status::BadArgument`]. Registering beyond the
    /// declared capacity is rejected with [`Status::Overflow`].
    pub fn register(&mut self, handle: PatternHandle, id: PatternId) -> Status {
        if self.entries.len() == self.capacity {
            return Status::Overflow;
        }
        if id as usize != self.entries.len() + 1 {
            return Status::BadArgument;
        }
        self.entries.push(Entry { id, handle });
        Status::Ok
    }

    /// Changes the match limit of the registered pattern `id`.
    pub fn set_match_limit(&mut self, id: PatternId, limit: u32) -> Status {
        match self.entries.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => entry.handle.set_match_limit(limit),
            None => Status::BadArgument,
        }
    }

    /// Searches `haystack` with every registered pattern in one call.
    ///
    /// `finds` must contain one record per registered pattern, in
    /// registration order, with its slot array already sized; the engine
    /// fills in id, status, count and done flag of each record. The
    /// returned status is call-level: per-pattern failures are reported in
    /// the records, not here.
    pub fn find(&self, haystack: &[u8], finds: &mut [MultiFind]) -> Status {
        if finds.len() != self.entries.len() {
            return Status::BadArgument;
        }
        for (entry, rec) in self.entries.iter().zip(finds.iter_mut()) {
            rec.pattern_id = entry.id;
            let outcome = entry.handle.find(haystack, &mut rec.slots);
            rec.status = outcome.status;
            rec.count = outcome.count;
            rec.done = outcome.done;
        }
        Status::Ok
    }
}

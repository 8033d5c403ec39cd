/*! Compiled-pattern lifecycle and multi-pattern batch search.

Patterns are compiled before use, either one at a time or as an ordered
batch sharing one engine context. Compiling yields an owning object — a
[`Pattern`] or a [`PatternSet`] — that holds the engine state for its whole
lifetime and releases it exactly once when dropped. Construction is atomic:
a compilation failure returns an error and leaves nothing behind, so a live
object always has live engine state.

Searching is synchronous and stateless between calls. A single pattern
reports an explicit "no match" or a match count bounded by its
capture-group count plus one. A pattern set searches all of its patterns in
one call and reports one result record per pattern, in registration order,
with per-pattern failures confined to their own records.

# Example

```rust
use patset::RegexpOptions;

// Compile a pattern with two capture groups.
let mut pattern = patset::compile(b"(a)(b)", RegexpOptions::empty()).unwrap();
assert_eq!(pattern.group_count(), 2);

// Search some data. The match count never exceeds group_count + 1.
let found = pattern.search(b"ab").unwrap();
assert!(found.unwrap().count <= 3);

// No match is reported explicitly, not as an error.
assert!(pattern.search(b"xyz").unwrap().is_none());

// Compile a batch of patterns into a set and search them in one call.
let mut set = patset::compile_multi(
    &[b"(a)".as_slice(), b"b+".as_slice()],
    RegexpOptions::empty(),
)
.unwrap();

let results = set.search_multi(b"ab").unwrap();
assert_eq!(results.len(), 2);
assert!(results.iter().all(|r| r.is_found()));
```
*/

#![deny(missing_docs)]

use thiserror::Error;

pub use compiler::compile;
pub use compiler::compile_multi;
pub use compiler::compile_multi_with_flags;
pub use compiler::compile_with_flags;
pub use compiler::errors::CompileError;
pub use compiler::errors::MultiCompileError;
pub use compiler::Pattern;
pub use compiler::PatternInfo;
pub use compiler::PatternSet;

pub use engine::PatternId;
pub use engine::Status;

pub use options::RegexpOptions;

pub use scanner::errors::SearchError;
pub use scanner::MatchCount;
pub use scanner::PatternResult;

mod compiler;
mod engine;
mod options;
mod scanner;

#[cfg(test)]
mod tests;

/// Error returned by the one-shot [`search`] convenience function.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The pattern failed to compile.
    #[error(transparent)]
    Compile(#[from] CompileError),
    /// The search failed.
    #[error(transparent)]
    Search(#[from] SearchError),
}

/// Compiles `pattern` and searches `input` with it in one call.
///
/// Equivalent to [`compile`] followed by [`Pattern::search`]; the compiled
/// pattern is dropped before returning. Useful for one-off searches where
/// the compiled state is not worth keeping.
pub fn search(
    pattern: &[u8],
    input: &[u8],
    options: RegexpOptions,
) -> Result<Option<MatchCount>, Error> {
    let mut compiled = compile(pattern, options)?;
    Ok(compiled.search(input)?)
}

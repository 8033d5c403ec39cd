/*! Option flags accepted by the pattern compilers.

Options are a set of five independent bits. Callers that receive flags as a
raw integer (for example from a configuration file or a foreign API) can use
[`RegexpOptions::from_raw`], which silently drops any bit outside the five
recognized positions. Internally the set is normalized to the option string
consumed by the matching engine: one character per set bit, in the fixed
order `m`, `s`, `i`, `x`, `g`.
*/

use bitflags::bitflags;

bitflags! {
    /// A set of options that modify how a pattern is compiled and searched.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RegexpOptions: u32 {
        /// `m`: `^` and `$` match at line boundaries, not only at the start
        /// and end of the input.
        const MULTI_LINE = 0x01;
        /// `s`: `.` matches newline characters too.
        const SINGLE_LINE = 0x02;
        /// `i`: case-insensitive matching.
        const CASE_INSENSITIVE = 0x04;
        /// `x`: whitespace in the pattern is ignored, permitting readable,
        /// multi-line patterns.
        const EXTENDED = 0x08;
        /// `g`: report every occurrence in the input instead of the first.
        const GLOBAL = 0x10;
    }
}

/// Option characters in the order the engine expects them.
const OPTION_CHARS: [(RegexpOptions, char); 5] = [
    (RegexpOptions::MULTI_LINE, 'm'),
    (RegexpOptions::SINGLE_LINE, 's'),
    (RegexpOptions::CASE_INSENSITIVE, 'i'),
    (RegexpOptions::EXTENDED, 'x'),
    (RegexpOptions::GLOBAL, 'g'),
];

impl RegexpOptions {
    /// Builds an option set from a raw integer, ignoring unrecognized bits.
    pub fn from_raw(bits: u32) -> Self {
        Self::from_bits_truncate(bits)
    }

    /// Encodes the set as the option string consumed by the engine.
    ///
    /// The result contains at most five characters, one per set bit, always
    /// in `m,s,i,x,g` order.
    pub(crate) fn encode(&self) -> String {
        let mut opts = String::with_capacity(OPTION_CHARS.len());
        for (flag, ch) in OPTION_CHARS {
            if self.contains(flag) {
                opts.push(ch);
            }
        }
        opts
    }
}

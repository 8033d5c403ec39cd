use pretty_assertions::assert_eq;

use crate::compiler::{
    compile, compile_multi, compile_multi_with_flags, compile_with_flags,
    count_capture_groups,
};
use crate::{CompileError, MultiCompileError, RegexpOptions, Status};

#[test]
fn group_count_is_the_literal_paren_count() {
    assert_eq!(count_capture_groups(b""), 0);
    assert_eq!(count_capture_groups(b"abc"), 0);
    assert_eq!(count_capture_groups(b"(a)(b)"), 2);
    // The scan is deliberately approximate: escaped parentheses and
    // non-capturing groups are counted too.
    assert_eq!(count_capture_groups(b"\\(a\\)"), 1);
    assert_eq!(count_capture_groups(b"(?:ab)"), 1);

    let pattern = compile(b"(a)(b)", RegexpOptions::empty()).unwrap();
    assert_eq!(pattern.group_count(), 2);
    assert_eq!(pattern.pattern(), "(a)(b)");
    assert_eq!(pattern.status(), Status::Ok);

    let pattern = compile(b"b+", RegexpOptions::empty()).unwrap();
    assert_eq!(pattern.group_count(), 0);
}

#[test]
fn state_size_is_reported() {
    let pattern = compile(b"(abc)+def", RegexpOptions::empty()).unwrap();
    assert!(pattern.state_size() > 0);
}

#[test]
fn invalid_patterns_fail_with_status_and_offset() {
    let err = compile(b"abc(def", RegexpOptions::empty()).unwrap_err();
    assert_eq!(
        err,
        CompileError { status: Status::BadPattern, offset: 3 }
    );

    // Patterns are byte strings, but the engine requires UTF-8; the first
    // invalid byte is reported as the error offset.
    let err = compile(b"ab\xffcd", RegexpOptions::empty()).unwrap_err();
    assert_eq!(
        err,
        CompileError { status: Status::BadPattern, offset: 2 }
    );
}

#[test]
fn empty_pattern_with_unrecognized_flags_compiles() {
    // Bits outside the five known positions must be silently ignored.
    let pattern = compile_with_flags(b"", 0xdead_bee0).unwrap();
    assert_eq!(pattern.group_count(), 0);
    assert_eq!(pattern.status(), Status::Ok);
}

#[test]
fn every_flag_combination_compiles() {
    for bits in 0..32 {
        let result = compile_with_flags(b"^(.*)$", bits);
        assert!(result.is_ok(), "flags {bits:#x} failed to compile");
    }
}

#[test]
fn compiled_patterns_are_independent() {
    let mut first = compile(b"(foo)", RegexpOptions::empty()).unwrap();
    let second = compile(b"(foo)", RegexpOptions::empty()).unwrap();
    assert_eq!(first.group_count(), second.group_count());

    // Dropping one compiled pattern must not affect the other.
    drop(second);
    assert!(first.search(b"foo").unwrap().is_some());
}

#[test]
fn multi_compile_registers_patterns_in_order() {
    let set = compile_multi(
        &[b"(a)".as_slice(), b"b+".as_slice(), b"(x)(y)".as_slice()],
        RegexpOptions::empty(),
    )
    .unwrap();

    assert_eq!(set.len(), 3);
    assert_eq!(set.status(), Status::Ok);
    assert!(set.state_size() > 0);

    let groups: Vec<_> =
        set.patterns().iter().map(|info| info.group_count()).collect();
    assert_eq!(groups, vec![1, 0, 2]);
    assert_eq!(set.patterns()[0].pattern(), "(a)");
    assert_eq!(set.patterns()[2].pattern(), "(x)(y)");
}

#[test]
fn multi_compile_fails_as_a_unit() {
    // The second pattern is invalid: the whole batch must fail, naming
    // the failing pattern and the error offset within it.
    let err = compile_multi(
        &[b"a".as_slice(), b"b(".as_slice(), b"c".as_slice()],
        RegexpOptions::empty(),
    )
    .unwrap_err();

    assert_eq!(
        err,
        MultiCompileError::Compile {
            status: Status::BadPattern,
            index: 1,
            offset: 1,
        }
    );
}

#[test]
fn empty_batch_compiles_to_an_empty_set() {
    let patterns: &[&[u8]] = &[];
    let set = compile_multi(patterns, RegexpOptions::empty()).unwrap();
    assert!(set.is_empty());
    assert_eq!(set.len(), 0);
}

#[test]
fn multi_compile_accepts_raw_flags() {
    let set = compile_multi_with_flags(
        &[b"(a)".as_slice(), b"b".as_slice()],
        0xffff_ffff,
    )
    .unwrap();
    assert_eq!(set.len(), 2);
}

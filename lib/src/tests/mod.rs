/*! End-to-end tests exercising the public API. */

use pretty_assertions::assert_eq;

use crate::{
    compile, compile_multi, search, Error, RegexpOptions, Status,
};

#[test]
fn one_shot_search() {
    let found = search(b"\\d+", b"line42", RegexpOptions::empty())
        .unwrap()
        .expect("should match");
    assert_eq!(found.count, 1);

    assert_eq!(
        search(b"\\d+", b"nothing here", RegexpOptions::empty()).unwrap(),
        None
    );

    // Compile failures come back through the aggregate error type.
    let err = search(b"(", b"abc", RegexpOptions::empty()).unwrap_err();
    assert!(matches!(err, Error::Compile(_)));
}

#[test]
fn extended_patterns_permit_whitespace() {
    let mut pattern = compile(
        b"foo  \n  bar  # trailing comment\n",
        RegexpOptions::EXTENDED,
    )
    .unwrap();
    assert!(pattern.search(b"xfoobarx").unwrap().is_some());
}

#[test]
fn multi_line_and_single_line_options() {
    let mut pattern = compile(b"^bar", RegexpOptions::MULTI_LINE).unwrap();
    assert!(pattern.search(b"foo\nbar").unwrap().is_some());

    let mut pattern = compile(b"^bar", RegexpOptions::empty()).unwrap();
    assert_eq!(pattern.search(b"foo\nbar").unwrap(), None);

    let mut pattern = compile(b"a.b", RegexpOptions::SINGLE_LINE).unwrap();
    assert!(pattern.search(b"a\nb").unwrap().is_some());
}

#[test]
fn searched_buffers_may_contain_arbitrary_bytes() {
    let mut pattern = compile(b"ab", RegexpOptions::empty()).unwrap();
    assert!(pattern.search(b"\x00\xff\xfeab\xff").unwrap().is_some());
}

#[test]
fn status_codes_translate_to_strings() {
    assert_eq!(Status::Ok.code(), 0);
    assert!(Status::Ok.is_ok());
    assert_eq!(Status::Ok.as_str(), "no error");

    for status in [
        Status::BadArgument,
        Status::NoMemory,
        Status::BadPattern,
        Status::MatchLimit,
        Status::Overflow,
    ] {
        assert!(status.code() < 0);
        assert!(!status.is_ok());
        assert!(!status.as_str().is_empty());
        // Display carries both the description and the numeric code.
        assert!(status.to_string().contains(status.as_str()));
    }
}

#[test]
fn searches_do_not_retain_state_between_calls() {
    let mut pattern = compile(b"(o)+", RegexpOptions::empty()).unwrap();
    let first = pattern.search(b"foo").unwrap();
    let second = pattern.search(b"foo").unwrap();
    assert_eq!(first, second);
}

#[test]
fn set_survives_repeated_searches() {
    let mut set = compile_multi(
        &[b"foo".as_slice(), b"(b)(a)(r)".as_slice()],
        RegexpOptions::empty(),
    )
    .unwrap();

    for _ in 0..3 {
        let results = set.search_multi(b"foobar").unwrap();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_found());
        assert!(results[1].is_found());
        assert_eq!(results[0].pattern_id(), 1);
        assert_eq!(results[1].pattern_id(), 2);
        assert!(results[1].count().unwrap() <= 4);
    }
}

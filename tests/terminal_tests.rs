use threadparse::parse;
use threadparse::parser::{
    Status, any_char, ascii_letter, char, digit, eoi, literal, newline, one_of, string, whitespace,
};
use threadparse::position::Position;
use threadparse::term::Term;

fn chars(s: &str) -> Term {
    Term::List(s.chars().map(Term::Char).collect())
}

#[test]
fn any_char_consumes_first_code_point() {
    for input in ["abc", "é!", "\u{1F600}x", "z"] {
        let ctx = parse(&any_char(), input);
        let first = input.chars().next().unwrap();
        assert!(ctx.is_ok());
        assert_eq!(ctx.term(), Some(&Term::Char(first)));
        assert_eq!(ctx.parsed(), &input[..first.len_utf8()]);
        assert_eq!(ctx.input(), &input[first.len_utf8()..]);
        assert_eq!(
            ctx.position(),
            Position {
                offset: 1,
                line: 1,
                column: 2
            }
        );
    }
}

#[test]
fn any_char_over_newline_moves_to_next_line() {
    let ctx = parse(&any_char(), "\nx");
    assert!(ctx.is_ok());
    assert_eq!(ctx.term(), Some(&Term::Char('\n')));
    assert_eq!(
        ctx.position(),
        Position {
            offset: 1,
            line: 2,
            column: 1
        }
    );
}

#[test]
fn any_char_on_empty_input_fails() {
    let ctx = parse(&any_char(), "");
    assert_eq!(ctx.status(), Status::Error);
    assert_eq!(ctx.message(), "Unexpected end of input");
    assert_eq!(ctx.input(), "");
    assert_eq!(ctx.position(), Position::origin());
}

#[test]
fn match_records_start_position() {
    let ctx = parse(&literal("ab"), "abc");
    assert_eq!(ctx.matched().unwrap().position, Position::origin());
    assert_eq!(ctx.position().column, 3);
}

#[test]
fn char_matches_expected() {
    let ctx = parse(&char('x'), "xy");
    assert!(ctx.is_ok());
    assert_eq!(ctx.term(), Some(&Term::Char('x')));
    assert_eq!(ctx.input(), "y");
}

#[test]
fn char_mismatch_names_expected_and_actual() {
    let ctx = parse(&char('x'), "yz");
    assert!(ctx.is_error());
    assert_eq!(ctx.message(), "Expected 'x', found 'y'");
    assert_eq!(ctx.input(), "yz");
    assert_eq!(ctx.parsed(), "");
    assert_eq!(ctx.position(), Position::origin());
}

#[test]
fn char_on_empty_input_names_expected() {
    let ctx = parse(&char('x'), "");
    assert!(ctx.is_error());
    assert_eq!(ctx.message(), "Expected 'x', found end of input");
}

#[test]
fn character_classes() {
    assert!(parse(&digit(), "7").is_ok());
    assert!(parse(&ascii_letter(), "Q").is_ok());
    assert!(parse(&ascii_letter(), "q").is_ok());
    assert!(parse(&whitespace(), "\t").is_ok());
    assert!(parse(&whitespace(), "\r").is_ok());
    assert!(parse(&newline(), "\n").is_ok());
    assert!(parse(&one_of("+-"), "-").is_ok());

    assert!(parse(&digit(), "a").is_error());
    assert!(parse(&ascii_letter(), "é").is_error());
    assert!(parse(&ascii_letter(), "1").is_error());
    assert!(parse(&whitespace(), "x").is_error());
    assert!(parse(&newline(), "\r").is_error());
    assert!(parse(&one_of("+-"), "*").is_error());
}

#[test]
fn character_class_errors_name_the_class() {
    assert_eq!(parse(&digit(), "a").message(), "Expected a digit, found 'a'");
    assert_eq!(
        parse(&ascii_letter(), "1").message(),
        "Expected an ASCII letter, found '1'"
    );
    assert_eq!(
        parse(&newline(), "").message(),
        "Expected a newline, found end of input"
    );
}

#[test]
fn literal_consumes_exactly_its_text() {
    let ctx = parse(&literal("foo"), "foobar");
    assert!(ctx.is_ok());
    assert_eq!(ctx.term(), Some(&chars("foo")));
    assert_eq!(ctx.parsed(), "foo");
    assert_eq!(ctx.input(), "bar");
}

#[test]
fn string_over_literal_recovers_text() {
    let ctx = parse(&string(literal("héllo")), "héllo world");
    assert!(ctx.is_ok());
    assert_eq!(ctx.term(), Some(&Term::from("héllo")));
    assert_eq!(ctx.position().offset, 5);
}

#[test]
fn literal_fails_at_first_mismatch() {
    let ctx = parse(&literal("foo"), "fob");
    assert!(ctx.is_error());
    assert_eq!(ctx.message(), "Expected 'o', found 'b'");
    assert_eq!(ctx.parsed(), "fo");
    assert_eq!(ctx.position().column, 3);
}

#[test]
fn literal_fails_on_short_input() {
    let ctx = parse(&literal("foo"), "fo");
    assert!(ctx.is_error());
    assert_eq!(ctx.message(), "Expected 'o', found end of input");
    assert_eq!(ctx.input(), "");
}

#[test]
#[should_panic(expected = "sequence requires at least one parser")]
fn empty_literal_is_a_grammar_error() {
    let _ = literal("");
}

#[test]
fn eoi_succeeds_only_at_end() {
    let ctx = parse(&eoi(), "");
    assert!(ctx.is_ok());
    assert_eq!(ctx.term(), Some(&Term::Ignored));

    let ctx = parse(&eoi(), "rest");
    assert!(ctx.is_error());
    assert_eq!(ctx.message(), "Expected end of input, found: rest");
    assert_eq!(ctx.input(), "rest");
}

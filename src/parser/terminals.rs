//! Leaf parsers over single characters.
//!
//! Everything here is [`any_char`] gated by a predicate, or a sequence of
//! such parsers. There is no separate matching algorithm.

use crate::term::{Match, Term};

use super::combinators::{BoxedParser, satisfy, sequence};
use super::state::{Context, Parser};

/// Exactly one character, whatever it is.
pub fn any_char() -> BoxedParser {
    BoxedParser::new(|ctx: Context| {
        ctx.trace("char");
        if ctx.peek().is_none() {
            return ctx.fail("Unexpected end of input");
        }
        ctx.advance()
    })
}

/// Low-level character parser with custom error - for internal use
fn char_with_error<F: Fn(char) -> bool + 'static>(
    predicate: F,
    expected: impl Into<String>,
) -> BoxedParser {
    let expected = expected.into();
    let reject_message = expected.clone();
    let gated = satisfy(
        any_char(),
        move |term| matches!(term, Term::Char(c) if predicate(*c)),
        move |term| format!("Expected {reject_message}, found {term}"),
    );
    BoxedParser::new(move |ctx: Context| {
        if ctx.peek().is_none() {
            return ctx.fail(format!("Expected {expected}, found end of input"));
        }
        gated.parse(ctx)
    })
}

/// One character equal to `expected`.
pub fn char(expected: char) -> BoxedParser {
    char_with_error(move |c| c == expected, format!("{expected:?}"))
}

pub fn digit() -> BoxedParser {
    char_with_error(|c| c.is_ascii_digit(), "a digit")
}

pub fn ascii_letter() -> BoxedParser {
    char_with_error(|c| c.is_ascii_alphabetic(), "an ASCII letter")
}

/// Space, tab, carriage return or line feed.
pub fn whitespace() -> BoxedParser {
    char_with_error(|c| matches!(c, ' ' | '\t' | '\r' | '\n'), "whitespace")
}

pub fn newline() -> BoxedParser {
    char_with_error(|c| c == '\n', "a newline")
}

/// Any one character from `set`.
pub fn one_of(set: &str) -> BoxedParser {
    let set = set.to_string();
    let expected = format!("one of {set:?}");
    char_with_error(move |c| set.contains(c), expected)
}

/// The characters of `s`, in order. The term is the list of characters.
///
/// # Panics
///
/// Panics if `s` is empty.
pub fn literal(s: &str) -> BoxedParser {
    sequence(s.chars().map(char).collect())
}

/// Succeeds only at the end of input, consuming nothing. The match is
/// ignored so it never shows up in an enclosing sequence.
pub fn eoi() -> BoxedParser {
    BoxedParser::new(|ctx: Context| {
        ctx.trace("eoi");
        if !ctx.input().is_empty() {
            let message = format!("Expected end of input, found: {}", ctx.input());
            return ctx.fail(message);
        }
        let position = ctx.position();
        ctx.succeed(Match::ignored(position))
    })
}

//! # threadparse - Position-aware Parser Combinators
//!
//! A small algebra of composable parsers over a fully materialized input.
//! It favours precise error positions over raw speed and suits hand-rolled
//! recursive-descent grammars: configuration-like formats, small DSLs.
//!
//! ## Architecture Overview
//!
//! ```text
//! &str
//!   ↓
//! [Context::new] → Context { status, message, parsed | input, position, match }
//!   ↓
//! [Parser] Context → Context  (combinators call their children and restitch)
//!   ↓
//! [Context::into_result] → Result<Match, ParseError>
//! ```
//!
//! ## Key Design Decisions
//!
//! ### Context threading
//! There is no mutable parser state. A parser is a function from a
//! [`parser::Context`] to a new one, so backtracking is nothing more than
//! running another parser against a context that was kept around. The input
//! is held once in a shared buffer and a context only moves a cursor over it.
//!
//! ### Closed term type
//! Every match carries a [`term::Term`]: a character, a list, text, an
//! integer, or the ignore sentinel that enclosing `sequence`/`many` drop.
//!
//! ### Failures are values
//! A failed parser returns a context with `Status::Error` and a message.
//! Nothing panics on bad input and there is no error recovery; `choice`,
//! `many` and `optional` are the only places a failure is absorbed.
//!
//! ### Injected tracing
//! A [`trace::Trace`] sink passed to [`parse_with_trace`] observes every
//! combinator invocation. It rides inside the context and cannot influence
//! results.
//!
//! ## Module Structure
//!
//! - [`position`] - Cursor positions (offset, line, column)
//! - [`term`] - Terms and matches
//! - [`parser`] - Context, combinators and terminal parsers
//! - [`trace`] - Diagnostic trace sinks
//! - [`error`] - Error types at the crate boundary
//!
//! ## Example
//!
//! ```
//! use threadparse::parser::{char, choice, digit, integer, many, sequence};
//! use threadparse::term::Term;
//!
//! let number = integer(many(digit()));
//! let op = choice(vec![char('+').replace("+"), char('-').replace("-")]);
//! let expr = sequence(vec![number.clone(), op, number]);
//!
//! let result = threadparse::parse(&expr, "1+2").into_result().unwrap();
//! assert_eq!(
//!     result.term,
//!     Term::List(vec![Term::Integer(1), Term::from("+"), Term::Integer(2)])
//! );
//! ```

use std::rc::Rc;

pub mod error;
pub mod parser;
pub mod position;
pub mod term;
pub mod trace;

use parser::{Context, Parser};
use trace::Trace;

/// Run `parser` over `input` from the origin.
pub fn parse<P: Parser + ?Sized>(parser: &P, input: &str) -> Context {
    parser.parse(Context::new(input))
}

/// Like [`parse`], reporting every combinator invocation to `trace`.
pub fn parse_with_trace<P: Parser + ?Sized>(
    parser: &P,
    input: &str,
    trace: Rc<dyn Trace>,
) -> Context {
    parser.parse(Context::with_trace(input, trace))
}

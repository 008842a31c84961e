//! # Error Definitions
//!
//! Parse failures travel through the combinators as ordinary [`Context`]
//! values. The types here appear at the edges:
//!
//! - [`ParseError`] is what a finished, failed context turns into at the
//!   crate boundary (see [`Context::into_result`]).
//! - [`TermError`] is produced when a matched term cannot be converted, for
//!   example by [`Match::to_integer`]. Combinators fold it back into a failed
//!   context.
//! - [`GrammarError`] reports a grammar that cannot be built at all, such as
//!   an alternation with no alternatives.
//!
//! [`Context`]: crate::parser::Context
//! [`Context::into_result`]: crate::parser::Context::into_result
//! [`Match::to_integer`]: crate::term::Match::to_integer

use thiserror::Error;

use crate::position::Position;

/// A failed parse, as reported by the top-level entry points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at {position}")]
pub struct ParseError {
    pub message: String,
    pub position: Position,
}

impl ParseError {
    pub fn new(message: impl Into<String>, position: Position) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }
}

/// A term that could not be converted to the requested shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TermError {
    /// The term converted to empty text.
    #[error("Cannot interpret as integer")]
    EmptyInteger,

    /// The term's text is not a decimal integer.
    #[error("Cannot interpret as integer: {0:?}")]
    NotAnInteger(String),

    /// A list was required but the term is a scalar.
    #[error("Cannot flatten a non-list term: {0}")]
    NotAList(String),
}

/// A grammar that was assembled incorrectly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("sequence requires at least one parser")]
    EmptySequence,

    #[error("choice requires at least one parser")]
    EmptyChoice,
}

use std::fmt;
use std::rc::Rc;

use crate::error::ParseError;
use crate::position::Position;
use crate::term::{Match, Term};
use crate::trace::{NoTrace, Trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Error,
}

/// The value threaded through every parser.
///
/// The original input is shared, never copied: a context is the shared
/// buffer plus a cursor, so `parsed() + input()` always equals the original
/// string. Cloning a context to retry from it later is cheap apart from the
/// match it carries.
#[derive(Clone)]
pub struct Context {
    source: Rc<str>,
    /// Byte index of the first unconsumed character in `source`.
    cursor: usize,
    position: Position,
    status: Status,
    message: String,
    matched: Option<Match>,
    trace: Rc<dyn Trace>,
}

impl Context {
    pub fn new(input: &str) -> Self {
        Self::with_trace(input, Rc::new(NoTrace))
    }

    pub fn with_trace(input: &str, trace: Rc<dyn Trace>) -> Self {
        Self {
            source: Rc::from(input),
            cursor: 0,
            position: Position::origin(),
            status: Status::Ok,
            message: String::new(),
            matched: None,
            trace,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }

    pub fn is_error(&self) -> bool {
        self.status == Status::Error
    }

    /// Why the parse failed. Empty while the status is `Ok`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The prefix of the original input already consumed.
    pub fn parsed(&self) -> &str {
        &self.source[..self.cursor]
    }

    /// The remaining, unconsumed suffix.
    pub fn input(&self) -> &str {
        &self.source[self.cursor..]
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn matched(&self) -> Option<&Match> {
        self.matched.as_ref()
    }

    pub fn term(&self) -> Option<&Term> {
        self.matched.as_ref().map(|m| &m.term)
    }

    pub fn label(&self) -> Option<&str> {
        self.matched.as_ref().and_then(|m| m.label.as_deref())
    }

    /// Next unconsumed character, if any.
    pub fn peek(&self) -> Option<char> {
        self.input().chars().next()
    }

    /// Consume one character and match it.
    ///
    /// Returns the context unchanged when the input is exhausted; callers
    /// check [`Context::peek`] first.
    pub fn advance(self) -> Self {
        let Some(c) = self.peek() else {
            return self;
        };
        let start = self.position;
        Self {
            cursor: self.cursor + c.len_utf8(),
            position: start.advance_over(c),
            status: Status::Ok,
            message: String::new(),
            matched: Some(Match::new(c, start)),
            ..self
        }
    }

    /// Mark the context successful with `matched` as its result.
    pub fn succeed(self, matched: Match) -> Self {
        Self {
            status: Status::Ok,
            message: String::new(),
            matched: Some(matched),
            ..self
        }
    }

    /// Mark the context failed, keeping its consumable state as it is.
    pub fn fail(self, message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: message.into(),
            ..self
        }
    }

    /// Force the status back to `Ok` without touching the match.
    pub fn recover(self) -> Self {
        Self {
            status: Status::Ok,
            message: String::new(),
            ..self
        }
    }

    pub fn with_match(self, matched: Option<Match>) -> Self {
        Self { matched, ..self }
    }

    /// Rewrite the current match, if there is one.
    pub fn map_match(self, f: impl FnOnce(Match) -> Match) -> Self {
        Self {
            matched: self.matched.map(f),
            ..self
        }
    }

    pub(crate) fn take_match(&mut self) -> Option<Match> {
        self.matched.take()
    }

    /// Report an invocation to the injected trace sink.
    pub fn trace(&self, event: &str) {
        self.trace.record(event, self.position, self.input());
    }

    /// Turn a finished parse into its match or its error.
    ///
    /// A successful parse that recorded no match yields an empty list.
    pub fn into_result(self) -> Result<Match, ParseError> {
        match self.status {
            Status::Ok => Ok(self
                .matched
                .unwrap_or_else(|| Match::empty_list(self.position))),
            Status::Error => Err(ParseError::new(self.message, self.position)),
        }
    }

    pub fn error(&self) -> Option<ParseError> {
        match self.status {
            Status::Ok => None,
            Status::Error => Some(ParseError::new(self.message.clone(), self.position)),
        }
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("status", &self.status)
            .field("message", &self.message)
            .field("parsed", &self.parsed())
            .field("input", &self.input())
            .field("position", &self.position)
            .field("matched", &self.matched)
            .finish()
    }
}

/// Contexts compare by their observable state; the trace sink is ignored.
impl PartialEq for Context {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
            && self.cursor == other.cursor
            && self.position == other.position
            && self.status == other.status
            && self.message == other.message
            && self.matched == other.matched
    }
}

pub trait Parser {
    fn parse(&self, ctx: Context) -> Context;
}

impl<F: Fn(Context) -> Context> Parser for F {
    fn parse(&self, ctx: Context) -> Context {
        self(ctx)
    }
}

use std::cell::OnceCell;
use std::fmt;
use std::ops::{BitOr, Shr};
use std::rc::Rc;

use crate::error::GrammarError;
use crate::term::{Match, Term};

use super::state::{Context, Parser};

type ParserFn = Rc<dyn Fn(Context) -> Context>;

// === Boxed Parser for type erasure ===

pub struct BoxedParser {
    parser: ParserFn,
}

impl Clone for BoxedParser {
    fn clone(&self) -> Self {
        BoxedParser {
            parser: Rc::clone(&self.parser),
        }
    }
}

impl fmt::Debug for BoxedParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BoxedParser")
    }
}

impl BoxedParser {
    pub fn new<P: Parser + 'static>(parser: P) -> Self {
        BoxedParser {
            parser: Rc::new(move |ctx: Context| parser.parse(ctx)),
        }
    }
}

impl Parser for BoxedParser {
    fn parse(&self, ctx: Context) -> Context {
        (self.parser)(ctx)
    }
}

// === Combinators as methods ===

impl BoxedParser {
    /// Rewrite the matched term: see [`transform`]
    pub fn map<F: Fn(Term) -> Term + 'static>(self, f: F) -> BoxedParser {
        transform(self, f)
    }

    /// Choice: try self, if it fails try other from the same starting point
    pub fn or(self, other: BoxedParser) -> BoxedParser {
        choice(vec![self, other])
    }

    pub fn label(self, name: impl Into<String>) -> BoxedParser {
        label(self, name)
    }

    pub fn ignore(self) -> BoxedParser {
        ignore(self)
    }

    pub fn replace(self, value: impl Into<Term>) -> BoxedParser {
        replace(self, value)
    }

    pub fn optional(self) -> BoxedParser {
        optional(self)
    }

    pub fn many(self) -> BoxedParser {
        many(self)
    }

    pub fn flatten(self) -> BoxedParser {
        flatten(self)
    }

    pub fn string(self) -> BoxedParser {
        string(self)
    }

    pub fn integer(self) -> BoxedParser {
        integer(self)
    }
}

// === Operator Overloading ===

/// `|` for choice: A | B -> A or B
impl BitOr<BoxedParser> for BoxedParser {
    type Output = BoxedParser;

    fn bitor(self, rhs: BoxedParser) -> Self::Output {
        self.or(rhs)
    }
}

/// `>>` for transform: A >> fn -> fn(A)
impl<F: Fn(Term) -> Term + 'static> Shr<F> for BoxedParser {
    type Output = BoxedParser;

    fn shr(self, f: F) -> Self::Output {
        self.map(f)
    }
}

// === Structural combinators ===

/// Apply every parser in order, collecting their terms into one list.
///
/// The first failure is the result of the whole sequence. Ignored terms are
/// consumed but left out of the list.
pub fn try_sequence(parsers: Vec<BoxedParser>) -> Result<BoxedParser, GrammarError> {
    if parsers.is_empty() {
        return Err(GrammarError::EmptySequence);
    }
    Ok(BoxedParser::new(move |ctx: Context| {
        ctx.trace("sequence");
        let mut collected = Match::empty_list(ctx.position());
        let mut ctx = ctx.with_match(None);
        for parser in &parsers {
            ctx = parser.parse(ctx);
            if ctx.is_error() {
                return ctx;
            }
            if let Some(m) = ctx.take_match() {
                collected = collected.append(m.term);
            }
        }
        ctx.succeed(collected)
    }))
}

/// # Panics
///
/// Panics if `parsers` is empty.
pub fn sequence(parsers: Vec<BoxedParser>) -> BoxedParser {
    try_sequence(parsers).unwrap_or_else(|err| panic!("{err}"))
}

/// Try each parser against the same starting context; the first success
/// wins.
pub fn try_choice(parsers: Vec<BoxedParser>) -> Result<BoxedParser, GrammarError> {
    if parsers.is_empty() {
        return Err(GrammarError::EmptyChoice);
    }
    Ok(BoxedParser::new(move |ctx: Context| {
        ctx.trace("choice");
        for parser in &parsers {
            let attempt = parser.parse(ctx.clone());
            if attempt.is_ok() {
                return attempt;
            }
        }
        let message = format!("No parser matches input: {}", describe(ctx.input()));
        ctx.fail(message)
    }))
}

/// # Panics
///
/// Panics if `parsers` is empty.
pub fn choice(parsers: Vec<BoxedParser>) -> BoxedParser {
    try_choice(parsers).unwrap_or_else(|err| panic!("{err}"))
}

fn describe(remaining: &str) -> String {
    if remaining.is_empty() {
        "end of input".to_string()
    } else {
        format!("{remaining:?}")
    }
}

/// Keep applying `parser` from wherever the last success left off until
/// it fails.
fn repeat(parser: &BoxedParser, mut ctx: Context, mut collected: Match) -> Context {
    loop {
        let attempt = parser.parse(ctx.clone());
        if attempt.is_error() {
            break;
        }
        ctx = attempt;
        if let Some(m) = ctx.take_match() {
            collected = collected.append(m.term);
        }
    }
    ctx.succeed(collected)
}

/// Parse zero or more occurrences. Never fails.
///
/// A `parser` that can succeed without consuming input never terminates.
pub fn many(parser: BoxedParser) -> BoxedParser {
    BoxedParser::new(move |ctx: Context| {
        ctx.trace("many");
        let collected = Match::empty_list(ctx.position());
        repeat(&parser, ctx.with_match(None), collected)
    })
}

/// Parse one or more occurrences
pub fn many1(parser: BoxedParser) -> BoxedParser {
    BoxedParser::new(move |ctx: Context| {
        ctx.trace("many1");
        let collected = Match::empty_list(ctx.position());
        let mut first = parser.parse(ctx.with_match(None));
        if first.is_error() {
            return first;
        }
        let collected = match first.take_match() {
            Some(m) => collected.append(m.term),
            None => collected,
        };
        repeat(&parser, first, collected)
    })
}

/// Optional: parse zero or one. Never fails.
///
/// On failure the context comes back exactly as it was passed in.
pub fn optional(parser: BoxedParser) -> BoxedParser {
    BoxedParser::new(move |ctx: Context| {
        ctx.trace("optional");
        let attempt = parser.parse(ctx.clone());
        if attempt.is_ok() { attempt } else { ctx.recover() }
    })
}

/// `parser` repeated `n` times in sequence.
pub fn try_times(parser: BoxedParser, n: usize) -> Result<BoxedParser, GrammarError> {
    try_sequence(vec![parser; n])
}

/// # Panics
///
/// Panics if `n` is zero.
pub fn times(parser: BoxedParser, n: usize) -> BoxedParser {
    sequence(vec![parser; n])
}

/// Defer building a parser until it first runs, so a grammar rule can refer
/// to itself.
pub fn lazy<F: Fn() -> BoxedParser + 'static>(factory: F) -> BoxedParser {
    let cell: OnceCell<BoxedParser> = OnceCell::new();
    BoxedParser::new(move |ctx: Context| cell.get_or_init(&factory).parse(ctx))
}

// === Value-rewriting combinators ===

/// Attach a label to the match.
///
/// Status, consumption and term are untouched. A failure message gets the
/// label as a prefix so it names the rule that failed.
pub fn label(parser: BoxedParser, name: impl Into<String>) -> BoxedParser {
    let name = name.into();
    BoxedParser::new(move |ctx: Context| {
        ctx.trace(&name);
        let result = parser.parse(ctx);
        if result.is_error() {
            let message = format!("{name}: {}", result.message());
            return result.fail(message);
        }
        result.map_match(|m| m.with_label(name.as_str()))
    })
}

/// Consume what `parser` matches but leave it out of enclosing collections.
pub fn ignore(parser: BoxedParser) -> BoxedParser {
    BoxedParser::new(move |ctx: Context| {
        ctx.trace("ignore");
        let position = ctx.position();
        let result = parser.parse(ctx);
        if result.is_error() {
            return result;
        }
        let position = result.matched().map_or(position, |m| m.position);
        result.with_match(Some(Match::ignored(position)))
    })
}

/// Run `parser` with no match carried in. A success that recorded no match
/// counts as an empty list starting where `parser` began.
fn run_child(parser: &BoxedParser, ctx: Context) -> Result<(Context, Match), Context> {
    let start = ctx.position();
    let mut result = parser.parse(ctx.with_match(None));
    if result.is_error() {
        return Err(result);
    }
    let matched = result
        .take_match()
        .unwrap_or_else(|| Match::empty_list(start));
    Ok((result, matched))
}

/// Gate `parser` on a predicate over its term.
///
/// A rejected term fails with `on_reject(term)` and the context reverts to
/// where it was before `parser` ran.
pub fn satisfy<P, E>(parser: BoxedParser, predicate: P, on_reject: E) -> BoxedParser
where
    P: Fn(&Term) -> bool + 'static,
    E: Fn(&Term) -> String + 'static,
{
    BoxedParser::new(move |ctx: Context| {
        ctx.trace("satisfy");
        let before = ctx.clone();
        let (result, matched) = match run_child(&parser, ctx) {
            Ok(done) => done,
            Err(failed) => return failed,
        };
        if predicate(&matched.term) {
            result.succeed(matched)
        } else {
            before.fail(on_reject(&matched.term))
        }
    })
}

pub fn transform<F: Fn(Term) -> Term + 'static>(parser: BoxedParser, f: F) -> BoxedParser {
    BoxedParser::new(move |ctx: Context| {
        ctx.trace("transform");
        match run_child(&parser, ctx) {
            Ok((result, matched)) => result.succeed(matched.map_term(&f)),
            Err(failed) => failed,
        }
    })
}

/// Replace whatever `parser` matched with a constant.
pub fn replace(parser: BoxedParser, value: impl Into<Term>) -> BoxedParser {
    let value = value.into();
    BoxedParser::new(move |ctx: Context| {
        ctx.trace("replace");
        let start = ctx.position();
        let mut result = parser.parse(ctx);
        if result.is_error() {
            return result;
        }
        let replaced = match result.take_match() {
            Some(m) => m.with_term(value.clone()),
            None => Match::new(value.clone(), start),
        };
        result.succeed(replaced)
    })
}

/// Run a fallible term conversion after `parser` succeeds.
fn convert<F>(parser: BoxedParser, event: &'static str, f: F) -> BoxedParser
where
    F: Fn(Term) -> Result<Term, String> + 'static,
{
    BoxedParser::new(move |ctx: Context| {
        ctx.trace(event);
        let (result, matched) = match run_child(&parser, ctx) {
            Ok(done) => done,
            Err(failed) => return failed,
        };
        let Match {
            term,
            position,
            label,
        } = matched;
        match f(term) {
            Ok(term) => result.succeed(Match {
                term,
                position,
                label,
            }),
            Err(message) => result.fail(message),
        }
    })
}

/// Flatten a nested list term into a single level.
pub fn flatten(parser: BoxedParser) -> BoxedParser {
    convert(parser, "flatten", |term| {
        term.flatten().map_err(|err| err.to_string())
    })
}

/// Convert the matched term to text.
pub fn string(parser: BoxedParser) -> BoxedParser {
    convert(parser, "string", |term| Ok(Term::Text(term.to_text())))
}

/// Convert the matched term to an integer.
pub fn integer(parser: BoxedParser) -> BoxedParser {
    convert(parser, "integer", |term| {
        term.to_integer()
            .map(Term::Integer)
            .map_err(|err| err.to_string())
    })
}

/// Apply an arbitrary rewrite to a successful result. The rewrite is
/// responsible for keeping the context consistent.
pub fn update_context<F: Fn(Context) -> Context + 'static>(
    parser: BoxedParser,
    updater: F,
) -> BoxedParser {
    BoxedParser::new(move |ctx: Context| {
        ctx.trace("update_context");
        let result = parser.parse(ctx);
        if result.is_error() {
            return result;
        }
        updater(result)
    })
}

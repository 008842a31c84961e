//! Matched values.
//!
//! Every successful parser invocation produces a fresh [`Match`]: the parsed
//! [`Term`], the position where the matched span began, and an optional
//! descriptive label. Terms are plain values; combinators that rewrite a
//! match build a new one instead of editing the old.

use std::fmt;

use crate::error::TermError;
use crate::position::Position;

/// The payload of a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    Char(char),
    /// Results of `sequence`, `many` and friends, in input order.
    List(Vec<Term>),
    Text(String),
    Integer(i64),
    /// Consumed but excluded from any enclosing collection.
    Ignored,
}

impl Term {
    pub fn is_ignored(&self) -> bool {
        matches!(self, Term::Ignored)
    }

    /// Convert to text. Lists concatenate the text of their items.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out);
        out
    }

    fn write_text(&self, out: &mut String) {
        match self {
            Term::Char(c) => out.push(*c),
            Term::Text(s) => out.push_str(s),
            Term::Integer(i) => out.push_str(&i.to_string()),
            Term::List(items) => items.iter().for_each(|item| item.write_text(out)),
            Term::Ignored => {}
        }
    }

    /// Convert to text, then parse that text as a decimal integer.
    pub fn to_integer(&self) -> Result<i64, TermError> {
        if let Term::Integer(i) = self {
            return Ok(*i);
        }
        let text = self.to_text();
        if text.is_empty() {
            return Err(TermError::EmptyInteger);
        }
        text.parse().map_err(|_| TermError::NotAnInteger(text))
    }

    /// Flatten arbitrarily nested lists into one level of leaves, in order.
    /// Ignored leaves are dropped.
    pub fn flatten(self) -> Result<Term, TermError> {
        match self {
            Term::List(items) => {
                let mut leaves = Vec::new();
                collect_leaves(items, &mut leaves);
                Ok(Term::List(leaves))
            }
            other => Err(TermError::NotAList(other.to_string())),
        }
    }
}

fn collect_leaves(items: Vec<Term>, leaves: &mut Vec<Term>) {
    for item in items {
        match item {
            Term::List(nested) => collect_leaves(nested, leaves),
            Term::Ignored => {}
            leaf => leaves.push(leaf),
        }
    }
}

impl From<char> for Term {
    fn from(c: char) -> Self {
        Term::Char(c)
    }
}

impl From<&str> for Term {
    fn from(s: &str) -> Self {
        Term::Text(s.to_string())
    }
}

impl From<String> for Term {
    fn from(s: String) -> Self {
        Term::Text(s)
    }
}

impl From<i64> for Term {
    fn from(i: i64) -> Self {
        Term::Integer(i)
    }
}

impl From<Vec<Term>> for Term {
    fn from(items: Vec<Term>) -> Self {
        Term::List(items)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Char(c) => write!(f, "{c:?}"),
            Term::Text(s) => write!(f, "{s:?}"),
            Term::Integer(i) => write!(f, "{i}"),
            Term::Ignored => f.write_str("<ignored>"),
            Term::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

/// The result of one successful parse step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub term: Term,
    /// Where the matched span began.
    pub position: Position,
    pub label: Option<String>,
}

impl Match {
    pub fn new(term: impl Into<Term>, position: Position) -> Self {
        Self {
            term: term.into(),
            position,
            label: None,
        }
    }

    pub fn empty_list(position: Position) -> Self {
        Self::new(Term::List(Vec::new()), position)
    }

    /// The ignore sentinel, anchored where the ignored span began.
    pub fn ignored(position: Position) -> Self {
        Self::new(Term::Ignored, position)
    }

    pub fn is_ignored(&self) -> bool {
        self.term.is_ignored()
    }

    /// Append `item` to a list match. Ignored items are elided and a scalar
    /// term is first wrapped into a one-element list.
    pub fn append(self, item: Term) -> Self {
        let mut items = match self.term {
            Term::List(items) => items,
            Term::Ignored => Vec::new(),
            scalar => vec![scalar],
        };
        if !item.is_ignored() {
            items.push(item);
        }
        Self {
            term: Term::List(items),
            ..self
        }
    }

    /// The same match with its term replaced.
    pub fn with_term(self, term: impl Into<Term>) -> Self {
        Self {
            term: term.into(),
            ..self
        }
    }

    /// The same match with its term rewritten by `f`.
    pub fn map_term(self, f: impl FnOnce(Term) -> Term) -> Self {
        Self {
            term: f(self.term),
            ..self
        }
    }

    pub fn with_label(self, label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..self
        }
    }

    pub fn to_text(&self) -> String {
        self.term.to_text()
    }

    pub fn to_integer(&self) -> Result<i64, TermError> {
        self.term.to_integer()
    }
}

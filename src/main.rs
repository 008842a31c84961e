use std::rc::Rc;

use threadparse::parser::{
    BoxedParser, char, choice, digit, eoi, ignore, integer, many, many1, sequence, whitespace,
};
use threadparse::term::Term;
use threadparse::trace::LogTrace;

const INPUT: &str = "1+2";

/// number := digit+
fn number() -> BoxedParser {
    integer(many1(digit())).label("number")
}

/// operator := "+" | "-"
fn operator() -> BoxedParser {
    choice(vec![char('+').replace("+"), char('-').replace("-")]).label("operator")
}

/// expr := number (operator number)* eoi, with optional blanks between tokens
fn expression() -> BoxedParser {
    let blanks = || ignore(many(whitespace()));
    let tail = sequence(vec![blanks(), operator(), blanks(), number()]);
    sequence(vec![blanks(), number(), many(tail), blanks(), eoi()])
}

fn evaluate(term: &Term) -> anyhow::Result<i64> {
    let Term::List(parts) = term else {
        anyhow::bail!("expected an expression, found {term}");
    };
    let [first, rest] = parts.as_slice() else {
        anyhow::bail!("malformed expression: {term}");
    };
    let mut total = first.to_integer()?;
    let Term::List(tail) = rest else {
        anyhow::bail!("malformed operator list: {rest}");
    };
    for step in tail {
        match step {
            Term::List(pair) => match pair.as_slice() {
                [Term::Text(op), value] if op == "+" => total += value.to_integer()?,
                [Term::Text(op), value] if op == "-" => total -= value.to_integer()?,
                _ => anyhow::bail!("malformed operation: {step}"),
            },
            _ => anyhow::bail!("malformed operation: {step}"),
        }
    }
    Ok(total)
}

fn main() -> anyhow::Result<()> {
    let input = std::env::args().nth(1).unwrap_or_else(|| INPUT.to_string());

    let result = threadparse::parse_with_trace(&expression(), &input, Rc::new(LogTrace));
    let matched = result.into_result()?;

    println!("{} = {}", input.trim(), evaluate(&matched.term)?);

    Ok(())
}

//! The parser engine.
//!
//! - `state`: the [`Context`] threaded through every parser and the
//!   [`Parser`] trait
//! - `combinators`: [`BoxedParser`] and the combinators that build new
//!   parsers out of existing ones
//! - `terminals`: leaf parsers over single characters

mod combinators;
mod state;
mod terminals;

pub use combinators::*;
pub use state::*;
pub use terminals::*;

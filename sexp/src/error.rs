//! Errors raised when a [`Sexp`] is accessed in a way its shape does not allow.
//!
//! [`Sexp`]: crate::Sexp
use smol_str::SmolStr;

use crate::parser::ParseError;

/// A contract violation on a [`Sexp`](crate::Sexp) accessor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SexpError {
    #[error("expected a list, found an atom")]
    NotAList,
    #[error("expected an atom, found a list")]
    NotAnAtom,
    #[error("the list is empty")]
    EmptyList,
    #[error("index {index} is out of range for a list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("atom `{0}` is not an integer")]
    NotANumber(SmolStr),
}

/// Error returned by [`Sexp::add_expression`](crate::Sexp::add_expression).
#[derive(Debug, thiserror::Error)]
pub enum AddExpressionError {
    #[error(transparent)]
    Sexp(#[from] SexpError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

//! S-expressions as an in-memory tree.
//!
//! # Syntax
//!
//! - **Lists** are sequences of values, delimited on the outside by `(` and `)`
//!   and separated by whitespace.
//!
//! - **Atoms** are strings, either appearing verbatim without delimiters or
//!   enclosed within double quotes. A bare atom runs until the next whitespace
//!   or parenthesis and may not begin with `"` or `;`; its text is taken as
//!   is. Within quoted atoms, the following escaping rules apply:
//!
//!    - `\"`, `\\`, `\'` and `\?` stand for `"`, `\`, `'` and `?`.
//!    - `\n`, `\r`, `\t`, `\a`, `\b`, `\f` and `\v` stand for the usual
//!      control characters.
//!    - `\u{HEX}` stands in for any unicode character where `HEX` is a
//!      codepoint in hexadecimal notation.
//!
//!   A raw newline inside a quoted atom is an error.
//!
//! - **Comments** begin with a `;` at the start of a token and extend to the
//!   end of the line.
//!
//! # Trees
//!
//! [`parse`] always returns a list whose children are the top-level
//! expressions of the source. The first child of a list is its head, the rest
//! are its [arguments](Sexp::arguments). Descendants can be reached by
//! [index](Sexp::child), by [dotted path](Sexp::get_child_by_path), or by
//! walking the whole tree in [post-order](Sexp::post_order).

pub mod args;
pub mod error;
pub(crate) mod escape;
pub(crate) mod lexer;
pub mod parser;
pub mod path;
pub mod printer;
mod sexp;
pub mod traverse;

pub use args::Arguments;
pub use error::{AddExpressionError, SexpError};
pub use escape::{escape, unescape, EscapeError};
pub use parser::{
    parse, parse_with_err, parse_with_options, ParseError, ParseErrorKind, ParseOptions,
};
pub use printer::{to_string, to_string_pretty};
pub use sexp::{Sexp, SexpKind};
pub use traverse::{PostOrder, PostOrderView};

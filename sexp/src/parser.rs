//! Parse s-expressions from text.
//!
//! The result of a parse is always a list: the implicit top-level wrapper
//! whose children are the expressions found in the source, in order.
use std::fmt::Display;
use std::ops::Range;

use tracing::{debug, trace};

use crate::lexer::{LexError, Lexer, Token};
use crate::Sexp;

/// Broad category of a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A `)` with no open list.
    UnexpectedClose,
    /// End of input reached while lists were still open.
    UnclosedList,
    /// A quoted atom without its closing `"`.
    UnterminatedString,
    /// A raw newline inside a quoted atom.
    NewlineInString,
    /// A malformed escape sequence inside a quoted atom.
    InvalidEscape,
    /// Lists nested deeper than [`ParseOptions::max_depth`].
    TooDeep,
    /// Any other unreadable input.
    Syntax,
}

/// A parse error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ParseError {
    kind: ParseErrorKind,
    message: String,
    span: Span,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, message: impl Display, span: Span) -> Self {
        ParseError {
            kind,
            message: message.to_string(),
            span,
        }
    }

    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }

    pub fn span(&self) -> Span {
        self.span.clone()
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        let kind = match err {
            LexError::Unterminated(_) => ParseErrorKind::UnterminatedString,
            LexError::Newline(_) => ParseErrorKind::NewlineInString,
            LexError::Escape { .. } => ParseErrorKind::InvalidEscape,
            LexError::Syntax(_) => ParseErrorKind::Syntax,
        };
        ParseError::new(kind, &err, err.span())
    }
}

/// Shorthand for a result specialised to parse errors.
pub type Result<T, E = ParseError> = std::result::Result<T, E>;

/// Span within a string.
pub type Span = Range<usize>;

/// Options controlling a parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum number of simultaneously open lists, not counting the
    /// top-level wrapper. `None` means unlimited.
    pub max_depth: Option<usize>,
}

impl ParseOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}

/// Parse a source string into a list of its top-level expressions.
///
/// Nesting depth is not limited. Building and dropping the tree never
/// recurse, but printing, cloning and comparing do; use
/// [`parse_with_options`] with a `max_depth` for untrusted input that will
/// go through those.
pub fn parse(source: &str) -> Result<Sexp> {
    parse_with_options(source, &ParseOptions::default())
}

/// Parse a source string, reporting failure through `err`.
///
/// On success `err` is cleared. On failure the error message is written to
/// `err` and nil (the empty list) is returned; a partially built tree is
/// never handed out.
pub fn parse_with_err(source: &str, err: &mut String) -> Sexp {
    err.clear();
    match parse(source) {
        Ok(sexp) => sexp,
        Err(error) => {
            err.push_str(&error.to_string());
            Sexp::new()
        }
    }
}

/// Parse a source string with the given options.
pub fn parse_with_options(source: &str, options: &ParseOptions) -> Result<Sexp> {
    trace!(len = source.len(), "parsing s-expression");
    let result = parse_expressions(source, options).map(Sexp::List);
    match &result {
        Ok(root) => trace!(expressions = root.child_count(), "parsed s-expression"),
        Err(err) => debug!(span = ?err.span(), "failed to parse s-expression: {err}"),
    }
    result
}

/// Parse a source string into its top-level expressions.
pub(crate) fn parse_expressions(source: &str, options: &ParseOptions) -> Result<Vec<Sexp>> {
    let mut current: Vec<Sexp> = Vec::new();
    let mut open_stack: Vec<(Vec<Sexp>, Span)> = Vec::new();

    for token in Lexer::new(source) {
        let (token, span) = token?;

        match token {
            Token::Open => {
                if options.max_depth.is_some_and(|max| open_stack.len() >= max) {
                    return Err(ParseError::new(
                        ParseErrorKind::TooDeep,
                        format!("lists nested deeper than {}", open_stack.len()),
                        span,
                    ));
                }
                let parent = std::mem::take(&mut current);
                open_stack.push((parent, span));
            }
            Token::Close => {
                let Some((mut parent, _)) = open_stack.pop() else {
                    return Err(ParseError::new(
                        ParseErrorKind::UnexpectedClose,
                        "unexpected ) with no open list",
                        span,
                    ));
                };
                let children = std::mem::take(&mut current);
                parent.push(Sexp::List(children));
                current = parent;
            }
            Token::Atom(text) => current.push(Sexp::Atom(text)),
        }
    }

    if let Some((_, span)) = open_stack.last() {
        return Err(ParseError::new(
            ParseErrorKind::UnclosedList,
            format!(
                "unexpected end of input: {} list(s) left open",
                open_stack.len()
            ),
            span.start..source.len(),
        ));
    }

    Ok(current)
}

use logos::Logos;
use smol_str::SmolStr;

use crate::{
    escape::{unescape, EscapeError},
    parser::Span,
};

#[derive(Debug, Clone, PartialEq, Logos)]
#[logos(skip r"([ \t\n\r\x0B\x0C]+|;[^\n]*)+")]
pub(crate) enum LexerToken {
    #[token("(")]
    OpenList,
    #[token(")")]
    CloseList,
    #[regex(r#"[^ \t\n\r\x0B\x0C\(\)";][^ \t\n\r\x0B\x0C\(\)]*"#)]
    BareAtom,
    #[regex(r#""([^"\\\n]|\\[^\n])*""#)]
    QuotedAtom,
    #[regex(r#""([^"\\\n]|\\[^\n])*"#)]
    UnterminatedAtom,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    Open,
    Close,
    Atom(SmolStr),
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum LexError {
    #[error("unterminated string literal")]
    Unterminated(Span),
    #[error("unexpected newline in string literal")]
    Newline(Span),
    #[error("{source}")]
    Escape { source: EscapeError, span: Span },
    #[error("syntax error")]
    Syntax(Span),
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::Unterminated(span) => span.clone(),
            LexError::Newline(span) => span.clone(),
            LexError::Escape { span, .. } => span.clone(),
            LexError::Syntax(span) => span.clone(),
        }
    }
}

/// Splits a source string into list delimiters and unescaped atoms.
pub(crate) struct Lexer<'a> {
    source: &'a str,
    inner: logos::Lexer<'a, LexerToken>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            inner: LexerToken::lexer(source),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<(Token, Span), LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.inner.next()?;
        let span = self.inner.span();

        let Ok(token) = token else {
            return Some(Err(LexError::Syntax(span)));
        };

        let result = match token {
            LexerToken::OpenList => Ok(Token::Open),
            LexerToken::CloseList => Ok(Token::Close),
            LexerToken::BareAtom => Ok(Token::Atom(self.inner.slice().into())),
            LexerToken::QuotedAtom => {
                let slice = self.inner.slice();
                unescape(&slice[1..slice.len() - 1])
                    .map(|unescaped| Token::Atom(unescaped.into()))
                    .map_err(|source| LexError::Escape {
                        source,
                        span: span.clone(),
                    })
            }
            LexerToken::UnterminatedAtom => {
                if self.source[span.end..].starts_with('\n') {
                    Err(LexError::Newline(span.start..span.end + 1))
                } else {
                    Err(LexError::Unterminated(span.start..self.source.len()))
                }
            }
        };

        Some(result.map(|token| (token, span)))
    }
}

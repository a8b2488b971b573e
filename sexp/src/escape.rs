use logos::Logos;

use crate::lexer::LexerToken;

/// Lexer token for the contents of a quoted atom.
#[derive(Debug, Clone, Logos)]
enum EscapedToken {
    #[token(r"\'", |_| '\'')]
    #[token(r#"\""#, |_| '"')]
    #[token(r"\?", |_| '?')]
    #[token(r"\\", |_| '\\')]
    #[token(r"\a", |_| '\x07')]
    #[token(r"\b", |_| '\x08')]
    #[token(r"\f", |_| '\x0C')]
    #[token(r"\n", |_| '\n')]
    #[token(r"\r", |_| '\r')]
    #[token(r"\t", |_| '\t')]
    #[token(r"\v", |_| '\x0B')]
    Escaped(char),

    #[regex(r#"\\u\{[a-fA-F0-9]+\}"#, |lex| parse_unicode(lex.slice()))]
    Unicode(char),

    #[regex(r#"[^\\]+"#)]
    Literal,
}

/// Error produced when a string contains a malformed escape sequence.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EscapeError {
    #[error("invalid escape sequence `{sequence}` at offset {offset}")]
    Invalid { sequence: String, offset: usize },
    #[error("unfinished escape sequence at the end of the string")]
    Unfinished,
}

/// Parses a unicode escape sequence of the form `\u{HEX}` where `HEX` is a
/// hexadecimal number representing a unicode codepoint.
fn parse_unicode(str: &str) -> Option<char> {
    // Skip the '\u{' prefix and '}' suffix
    let hex = str.get(3..str.len() - 1)?;
    let code = u32::from_str_radix(hex, 16).ok()?;
    char::from_u32(code)
}

/// Replaces escape sequences with their corresponding characters.
pub fn unescape(str: &str) -> Result<String, EscapeError> {
    let mut lexer = EscapedToken::lexer(str);
    let mut output = String::with_capacity(str.len());

    while let Some(token) = lexer.next() {
        let Ok(token) = token else {
            let offset = lexer.span().start;
            let sequence: String = str[offset..].chars().take(2).collect();
            if sequence.len() < 2 {
                return Err(EscapeError::Unfinished);
            }
            return Err(EscapeError::Invalid { sequence, offset });
        };

        match token {
            EscapedToken::Escaped(c) => output.push(c),
            EscapedToken::Unicode(c) => output.push(c),
            EscapedToken::Literal => output.push_str(lexer.slice()),
        }
    }

    Ok(output)
}

/// Returns `true` when `str` lexes back as one bare atom covering all of it
/// and holds no quote or backslash.
fn is_bare(str: &str) -> bool {
    if str.contains(['"', '\\']) {
        return false;
    }

    let mut lexer = LexerToken::lexer(str);
    match lexer.next() {
        Some(Ok(LexerToken::BareAtom)) if lexer.span() == (0..str.len()) => lexer.next().is_none(),
        _ => false,
    }
}

/// Produces the printable form of an atom.
///
/// Text that already reads back as a single bare atom, and contains neither
/// `"` nor `\`, is returned as is. Anything else is wrapped in double quotes,
/// with quotes, backslashes and control characters escaped, so that parsing
/// the result yields exactly one atom holding `str`.
pub fn escape(str: &str) -> String {
    if is_bare(str) {
        return str.to_string();
    }

    let mut output = String::with_capacity(str.len() + 2);
    output.push('"');

    for c in str.chars() {
        match c {
            '"' => output.push_str(r#"\""#),
            '\\' => output.push_str(r"\\"),
            '\n' => output.push_str(r"\n"),
            '\r' => output.push_str(r"\r"),
            '\t' => output.push_str(r"\t"),
            '\x07' => output.push_str(r"\a"),
            '\x08' => output.push_str(r"\b"),
            '\x0C' => output.push_str(r"\f"),
            '\x0B' => output.push_str(r"\v"),
            c => output.push(c),
        }
    }

    output.push('"');
    output
}

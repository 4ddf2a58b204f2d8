//! Low-level nom parsers shared by the stylesheet and value parsers.

use crate::error::CssParseError;
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{anychar, char, digit1, multispace1, one_of, satisfy};
use nom::combinator::{opt, recognize, value};
use nom::error::{ErrorKind, ParseError};
use nom::multi::many0_count;
use nom::{IResult, Parser};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SyntaxErrorKind {
    Nom(ErrorKind),
    UnterminatedString,
    UnterminatedComment,
    UnterminatedBlock,
    UnexpectedCloseBrace,
    InvalidDeclaration(&'static str),
    Expected(&'static str),
}

/// nom error carrying the position where parsing stopped.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SyntaxError<'a> {
    pub input: &'a str,
    pub kind: SyntaxErrorKind,
}

impl<'a> SyntaxError<'a> {
    pub fn new(input: &'a str, kind: SyntaxErrorKind) -> Self {
        Self { input, kind }
    }

    /// A non-recoverable error at `input`.
    pub fn fail<T>(input: &'a str, kind: SyntaxErrorKind) -> PResult<'a, T> {
        Err(nom::Err::Failure(Self::new(input, kind)))
    }

    /// Converts to a public error using the position relative to `source`.
    pub fn into_parse_error(self, source: &str) -> CssParseError {
        let offset = offset_in(source, self.input);
        match self.kind {
            SyntaxErrorKind::UnterminatedString => CssParseError::UnterminatedString { offset },
            SyntaxErrorKind::UnterminatedComment => CssParseError::UnterminatedComment { offset },
            SyntaxErrorKind::UnterminatedBlock => CssParseError::UnterminatedBlock { offset },
            SyntaxErrorKind::UnexpectedCloseBrace => CssParseError::UnexpectedCloseBrace { offset },
            SyntaxErrorKind::InvalidDeclaration(message) => CssParseError::InvalidDeclaration {
                offset,
                message: message.to_string(),
            },
            SyntaxErrorKind::Expected(what) => CssParseError::Syntax {
                offset,
                message: format!("expected {}", what),
            },
            SyntaxErrorKind::Nom(kind) => CssParseError::Syntax {
                offset,
                message: kind.description().to_string(),
            },
        }
    }
}

impl<'a> ParseError<&'a str> for SyntaxError<'a> {
    fn from_error_kind(input: &'a str, kind: ErrorKind) -> Self {
        Self::new(input, SyntaxErrorKind::Nom(kind))
    }

    fn append(_input: &'a str, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

pub(crate) type PResult<'a, O> = IResult<&'a str, O, SyntaxError<'a>>;

/// Byte offset of `part` within `source`; `part` must be a subslice of `source`.
pub(crate) fn offset_in(source: &str, part: &str) -> usize {
    (part.as_ptr() as usize).saturating_sub(source.as_ptr() as usize)
}

/// Converts a finished nom result into a public error.
pub(crate) fn finish<'a, O>(source: &'a str, result: PResult<'a, O>) -> Result<O, CssParseError> {
    match result {
        Ok((_, output)) => Ok(output),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(e.into_parse_error(source)),
        Err(nom::Err::Incomplete(_)) => Err(CssParseError::Syntax {
            offset: source.len(),
            message: "unexpected end of input".to_string(),
        }),
    }
}

// --- Trivia ---

pub(crate) fn comment(input: &str) -> PResult<'_, &str> {
    let (rest, _) = tag("/*").parse(input)?;
    match rest.find("*/") {
        Some(end) => Ok((&rest[end + 2..], &input[..end + 4])),
        None => SyntaxError::fail(input, SyntaxErrorKind::UnterminatedComment),
    }
}

/// Skips whitespace and comments.
pub(crate) fn trivia(input: &str) -> PResult<'_, ()> {
    value((), many0_count(alt((multispace1, comment)))).parse(input)
}

// --- Tokens ---

/// Recognizes a quoted string token, quotes included.
pub(crate) fn string_token(input: &str) -> PResult<'_, &str> {
    let (rest, quote) = one_of("\"'").parse(input)?;
    let mut chars = rest.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '\n' => break,
            c if c == quote => {
                let end = 1 + i + c.len_utf8();
                return Ok((&input[end..], &input[..end]));
            }
            _ => {}
        }
    }
    SyntaxError::fail(input, SyntaxErrorKind::UnterminatedString)
}

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

fn is_name_char(c: char) -> bool {
    is_name_start(c) || c.is_ascii_digit() || c == '-'
}

fn escape(input: &str) -> PResult<'_, ()> {
    value((), (char('\\'), anychar)).parse(input)
}

/// Recognizes a CSS identifier, including custom property names.
pub(crate) fn ident(input: &str) -> PResult<'_, &str> {
    recognize((
        opt(char('-')),
        alt((value((), satisfy(is_name_start)), value((), char('-')), escape)),
        many0_count(alt((value((), satisfy(is_name_char)), escape))),
    ))
    .parse(input)
}

/// Recognizes the name part of a hash token (`#fff`, `#main`).
pub(crate) fn hash_name(input: &str) -> PResult<'_, &str> {
    recognize(many0_count(alt((value((), satisfy(is_name_char)), escape)))).parse(input)
}

/// Recognizes a CSS number: sign, integer/fraction, exponent.
pub(crate) fn number(input: &str) -> PResult<'_, &str> {
    recognize((
        opt(one_of("+-")),
        alt((
            recognize((digit1, opt((char('.'), digit1)))),
            recognize((char('.'), digit1)),
        )),
        opt((one_of("eE"), opt(one_of("+-")), digit1)),
    ))
    .parse(input)
}

/// Resolves backslash escapes in identifiers and string contents.
pub(crate) fn unescape(text: &str) -> String {
    if !text.contains('\\') {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let mut hex = String::new();
        while hex.len() < 6 {
            match chars.peek() {
                Some(h) if h.is_ascii_hexdigit() => {
                    hex.push(*h);
                    chars.next();
                }
                _ => break,
            }
        }
        if !hex.is_empty() {
            let code = u32::from_str_radix(&hex, 16).unwrap_or(0xFFFD);
            out.push(char::from_u32(code).filter(|c| *c != '\0').unwrap_or('\u{FFFD}'));
            if matches!(chars.peek(), Some(w) if w.is_ascii_whitespace()) {
                chars.next();
            }
            continue;
        }
        match chars.next() {
            Some('\n') | None => {}
            Some(other) => out.push(other),
        }
    }
    out
}

/// Unescapes a quoted string token and strips its quotes.
pub(crate) fn string_contents(token: &str) -> String {
    let inner = token.get(1..token.len().saturating_sub(1)).unwrap_or_default();
    unescape(inner)
}

// --- Scanning ---

/// Takes text up to (not including) the first of `stops` found outside strings,
/// comments, parentheses, and brackets. Stops at end of input as well.
pub(crate) fn scan_until<'a>(input: &'a str, stops: &[char]) -> PResult<'a, &'a str> {
    let mut depth = 0usize;
    let mut i = 0usize;
    while i < input.len() {
        let rest = &input[i..];
        let Some(c) = rest.chars().next() else { break };
        match c {
            '"' | '\'' => {
                let (after, _) = string_token(rest)?;
                i = input.len() - after.len();
                continue;
            }
            '/' if rest.starts_with("/*") => {
                let (after, _) = comment(rest)?;
                i = input.len() - after.len();
                continue;
            }
            '\\' => {
                i += 1 + rest[1..].chars().next().map_or(0, char::len_utf8);
                continue;
            }
            '(' | '[' => depth += 1,
            ')' | ']' if depth > 0 => depth -= 1,
            c if depth == 0 && stops.contains(&c) => return Ok((rest, &input[..i])),
            _ => {}
        }
        i += c.len_utf8();
    }
    Ok((&input[input.len()..], input))
}

/// Drops trailing whitespace and comments. Strings and escapes are kept intact.
pub(crate) fn trim_trivia_end(text: &str) -> &str {
    let mut end = 0usize;
    let mut i = 0usize;
    while i < text.len() {
        let rest = &text[i..];
        let Some(c) = rest.chars().next() else { break };
        if rest.starts_with("/*") {
            match rest[2..].find("*/") {
                Some(close) => i += close + 4,
                None => return text,
            }
            continue;
        }
        match c {
            '"' | '\'' => match string_token(rest) {
                Ok((after, _)) => i = text.len() - after.len(),
                Err(_) => return text,
            },
            '\\' => i += 1 + rest[1..].chars().next().map_or(0, char::len_utf8),
            c if c.is_whitespace() => {
                i += c.len_utf8();
                continue;
            }
            c => i += c.len_utf8(),
        }
        end = i;
    }
    &text[..end]
}

/// Recognizes a `{ ... }` block with balanced braces, braces included.
pub(crate) fn balanced_block(input: &str) -> PResult<'_, &str> {
    let (mut rest, _) = char('{').parse(input)?;
    let mut depth = 1usize;
    loop {
        let (after, _) = scan_until(rest, &['{', '}'])?;
        match after.chars().next() {
            Some('{') => depth += 1,
            Some(_) => depth -= 1,
            None => return SyntaxError::fail(input, SyntaxErrorKind::UnterminatedBlock),
        }
        rest = &after[1..];
        if depth == 0 {
            let end = input.len() - rest.len();
            return Ok((rest, &input[..end]));
        }
    }
}

//! Tokenizer for declaration values.

use crate::ast::{Component, ComponentKind, Span};
use crate::error::CssParseError;
use crate::lexer::{
    PResult, SyntaxError, SyntaxErrorKind, finish, hash_name, ident, number, offset_in, string_contents,
    string_token, trivia, unescape,
};
use nom::Parser;
use nom::bytes::complete::{tag_no_case, take_while};
use nom::character::complete::char;

/// Tokenizes a standalone value, such as the text of a raw custom property.
///
/// Spans are relative to `text`.
pub fn parse_value(text: &str) -> Result<Vec<Component>, CssParseError> {
    let parser = ValueParser::new(text);
    finish(text, parser.components(text, false))
}

pub(crate) struct ValueParser<'a> {
    source: &'a str,
}

impl<'a> ValueParser<'a> {
    /// `source` is the text that component spans are measured against.
    pub fn new(source: &'a str) -> Self {
        Self { source }
    }

    fn span(&self, start: &str, end: &str) -> Span {
        Span::new(offset_in(self.source, start), offset_in(self.source, end))
    }

    /// Parses components until end of input, or until `)` when inside a function.
    pub fn components(&self, mut input: &'a str, in_function: bool) -> PResult<'a, Vec<Component>> {
        let mut components = Vec::new();
        loop {
            (input, _) = trivia(input)?;
            if input.is_empty() {
                if in_function {
                    return SyntaxError::fail(input, SyntaxErrorKind::Expected("')'"));
                }
                return Ok((input, components));
            }
            if in_function && input.starts_with(')') {
                return Ok((input, components));
            }
            let (rest, component) = self.component(input)?;
            components.push(component);
            input = rest;
        }
    }

    fn component(&self, input: &'a str) -> PResult<'a, Component> {
        let (rest, kind) = match input.chars().next() {
            Some('"') | Some('\'') => {
                let (rest, token) = string_token(input)?;
                (rest, ComponentKind::String(string_contents(token)))
            }
            Some(',') => (&input[1..], ComponentKind::Comma),
            Some('/') => (&input[1..], ComponentKind::Slash),
            Some('#') => {
                let (rest, name) = hash_name(&input[1..])?;
                (rest, ComponentKind::Hash(unescape(name)))
            }
            _ => {
                if let Ok(parsed) = self.url(input) {
                    parsed
                } else if let Ok(parsed) = self.numeric(input) {
                    parsed
                } else if let Ok((rest, name)) = ident(input) {
                    self.ident_or_function(rest, name)?
                } else {
                    let c = input.chars().next().unwrap_or_default();
                    (&input[c.len_utf8()..], ComponentKind::Delim(c))
                }
            }
        };
        Ok((rest, Component { kind, span: self.span(input, rest) }))
    }

    fn url(&self, input: &'a str) -> PResult<'a, ComponentKind> {
        let (rest, _) = tag_no_case("url(").parse(input)?;
        let (rest, _) = trivia(rest)?;
        let (rest, url) = if rest.starts_with(['"', '\'']) {
            let (rest, token) = string_token(rest)?;
            (rest, string_contents(token))
        } else {
            let (rest, url) = take_while(|c: char| c != ')').parse(rest)?;
            (rest, url.trim().to_string())
        };
        let (rest, _) = trivia(rest)?;
        let (rest, _) = char(')').parse(rest)?;
        Ok((rest, ComponentKind::Url(url)))
    }

    fn numeric(&self, input: &'a str) -> PResult<'a, ComponentKind> {
        let (rest, value) = number(input)?;
        if let Some(rest) = rest.strip_prefix('%') {
            return Ok((rest, ComponentKind::Percentage(value.to_string())));
        }
        if let Ok((rest, unit)) = ident(rest) {
            return Ok((
                rest,
                ComponentKind::Dimension { value: value.to_string(), unit: unit.to_ascii_lowercase() },
            ));
        }
        Ok((rest, ComponentKind::Number(value.to_string())))
    }

    fn ident_or_function(&self, rest: &'a str, name: &'a str) -> PResult<'a, ComponentKind> {
        let name = unescape(name);
        let Some(args) = rest.strip_prefix('(') else {
            return Ok((rest, ComponentKind::Ident(name)));
        };
        let (after_args, arguments) = self.components(args, true)?;
        let (rest, _) = char(')').parse(after_args)?;
        Ok((rest, ComponentKind::Function { name: name.to_ascii_lowercase(), arguments }))
    }
}

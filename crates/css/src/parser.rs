//! Stylesheet structure parser.
//!
//! Produces [`Node`]s whose spans are byte offsets into the parsed source.
//! Style rule blocks are treated as flat declaration lists: a nested rule inside
//! one is kept as an opaque [`Node::Raw`] and never descended into.

use crate::ast::{AtRule, Declaration, Node, Raw, Rule, Span, Stylesheet, Value};
use crate::error::CssParseError;
use crate::lexer::{
    PResult, SyntaxError, SyntaxErrorKind, balanced_block, finish, ident, offset_in, scan_until,
    trim_trivia_end, trivia, unescape,
};
use crate::value::ValueParser;
use nom::Parser;
use nom::character::complete::char;

/// At-rules whose block contains rules rather than declarations.
const RULE_LIST_AT_RULES: &[&str] = &[
    "media",
    "supports",
    "layer",
    "container",
    "document",
    "scope",
    "starting-style",
    "keyframes",
    "-webkit-keyframes",
    "-moz-keyframes",
    "-o-keyframes",
];

/// Parses a complete stylesheet.
pub fn parse_stylesheet(source: &str) -> Result<Stylesheet, CssParseError> {
    let parser = StylesheetParser { source };
    let nodes = finish(source, parser.rule_list(source, true))?;
    Ok(Stylesheet { nodes })
}

struct StylesheetParser<'a> {
    source: &'a str,
}

impl<'a> StylesheetParser<'a> {
    fn offset(&self, part: &str) -> usize {
        offset_in(self.source, part)
    }

    fn span(&self, start: &str, end: &str) -> Span {
        Span::new(self.offset(start), self.offset(end))
    }

    /// Parses rules until end of input (top level) or an unconsumed `}`.
    fn rule_list(&self, mut input: &'a str, top_level: bool) -> PResult<'a, Vec<Node>> {
        let mut nodes = Vec::new();
        loop {
            (input, _) = trivia(input)?;
            if input.is_empty() {
                return Ok((input, nodes));
            }
            if input.starts_with('}') {
                if top_level {
                    return SyntaxError::fail(input, SyntaxErrorKind::UnexpectedCloseBrace);
                }
                return Ok((input, nodes));
            }
            if let Some(rest) = input.strip_prefix(';') {
                input = rest;
                continue;
            }
            if top_level && (input.starts_with("<!--") || input.starts_with("-->")) {
                input = &input[if input.starts_with("<!--") { 4 } else { 3 }..];
                continue;
            }
            let (rest, node) = if input.starts_with('@') {
                self.at_rule(input)?
            } else {
                self.qualified_rule(input)?
            };
            nodes.push(node);
            input = rest;
        }
    }

    fn at_rule(&self, input: &'a str) -> PResult<'a, Node> {
        let (rest, _) = char('@').parse(input)?;
        let (rest, name) = match ident(rest) {
            Ok(ok) => ok,
            Err(_) => return SyntaxError::fail(rest, SyntaxErrorKind::Expected("at-rule name")),
        };
        let name = unescape(name).to_ascii_lowercase();
        let (rest, prelude) = scan_until(rest, &['{', ';', '}'])?;
        let prelude = prelude.trim().to_string();

        match rest.chars().next() {
            Some('{') => {
                let block_start = rest;
                let (body, _) = char('{').parse(rest)?;
                let (after_body, children) = if RULE_LIST_AT_RULES.contains(&name.as_str()) {
                    self.rule_list(body, false)?
                } else {
                    self.declaration_list(body)?
                };
                let rest = self.close_block(block_start, after_body)?;
                Ok((
                    rest,
                    Node::AtRule(AtRule {
                        name,
                        prelude,
                        block: Some(children),
                        span: self.span(input, rest),
                    }),
                ))
            }
            Some(';') => {
                let rest = &rest[1..];
                Ok((
                    rest,
                    Node::AtRule(AtRule { name, prelude, block: None, span: self.span(input, rest) }),
                ))
            }
            // Statement ended by the enclosing block or end of input.
            _ => Ok((
                rest,
                Node::AtRule(AtRule { name, prelude, block: None, span: self.span(input, rest) }),
            )),
        }
    }

    fn qualified_rule(&self, input: &'a str) -> PResult<'a, Node> {
        let (rest, prelude) = scan_until(input, &['{', ';', '}'])?;
        if !rest.starts_with('{') {
            return SyntaxError::fail(rest, SyntaxErrorKind::Expected("'{' after selector"));
        }
        let block_start = rest;
        let (body, _) = char('{').parse(rest)?;
        let (after_body, children) = self.declaration_list(body)?;
        let rest = self.close_block(block_start, after_body)?;
        Ok((
            rest,
            Node::Rule(Rule {
                prelude: prelude.trim().to_string(),
                children,
                span: self.span(input, rest),
            }),
        ))
    }

    fn close_block(&self, block_start: &'a str, input: &'a str) -> Result<&'a str, nom::Err<SyntaxError<'a>>> {
        match char::<&str, SyntaxError<'a>>('}').parse(input) {
            Ok((rest, _)) => Ok(rest),
            Err(_) => Err(nom::Err::Failure(SyntaxError::new(
                block_start,
                SyntaxErrorKind::UnterminatedBlock,
            ))),
        }
    }

    /// Parses declarations until an unconsumed `}` or end of input.
    fn declaration_list(&self, mut input: &'a str) -> PResult<'a, Vec<Node>> {
        let mut nodes = Vec::new();
        loop {
            (input, _) = trivia(input)?;
            if input.is_empty() || input.starts_with('}') {
                return Ok((input, nodes));
            }
            if let Some(rest) = input.strip_prefix(';') {
                input = rest;
                continue;
            }
            let (rest, statement) = scan_until(input, &['{', ';', '}'])?;
            if rest.starts_with('{') {
                // Nested rule or at-rule: keep it opaque.
                let (after, _) = balanced_block(rest)?;
                let span = self.span(input, after);
                nodes.push(Node::Raw(Raw { text: input[..span.len()].to_string(), span }));
                input = after;
                continue;
            }
            if statement.starts_with('@') {
                let span = self.span(input, rest);
                nodes.push(Node::Raw(Raw { text: statement.to_string(), span }));
            } else {
                nodes.push(Node::Declaration(self.declaration(statement)?));
            }
            input = rest;
        }
    }

    /// Parses one `property: value [!important]` statement.
    ///
    /// A `*` before the property name (the legacy star hack) is kept as part of the name.
    fn declaration(&self, statement: &'a str) -> Result<Declaration, nom::Err<SyntaxError<'a>>> {
        let name_start = statement.strip_prefix('*').unwrap_or(statement);
        let (rest, property) = match ident(name_start) {
            Ok((rest, _)) => (rest, &statement[..statement.len() - rest.len()]),
            Err(_) => {
                return Err(nom::Err::Failure(SyntaxError::new(
                    statement,
                    SyntaxErrorKind::InvalidDeclaration("expected a property name"),
                )));
            }
        };
        let (rest, _) = trivia(rest)?;
        let Some(value_text) = rest.strip_prefix(':') else {
            return Err(nom::Err::Failure(SyntaxError::new(
                rest,
                SyntaxErrorKind::InvalidDeclaration("expected ':' after property name"),
            )));
        };

        let property = unescape(property);
        let custom = property.starts_with("--");
        let property = if custom { property } else { property.to_ascii_lowercase() };
        let (value_text, important) = split_important(value_text);
        let trimmed_end = value_text.trim_end();
        let value_span_end = self.offset(value_text) + trimmed_end.len();

        let value = if custom {
            let text = trimmed_end.trim_start();
            let start = value_span_end - text.len();
            Value::Raw(Raw { text: text.to_string(), span: Span::new(start, value_span_end) })
        } else {
            let (_, components) = ValueParser::new(self.source).components(trimmed_end, false)?;
            Value::Components(components)
        };

        let statement_end = self.offset(statement) + statement.trim_end().len();
        Ok(Declaration {
            property,
            value,
            important,
            span: Span::new(self.offset(statement), statement_end),
        })
    }
}

/// Splits a trailing `!important` off a declaration value.
///
/// Comments may sit around the `!` and after the keyword.
fn split_important(value: &str) -> (&str, bool) {
    const KEYWORD: &str = "important";
    let content = trim_trivia_end(value);
    let Some(split) = content.len().checked_sub(KEYWORD.len()) else {
        return (value, false);
    };
    let is_keyword = content
        .get(split..)
        .is_some_and(|tail| tail.eq_ignore_ascii_case(KEYWORD));
    if is_keyword && let Some(head) = trim_trivia_end(&content[..split]).strip_suffix('!') {
        return (head, true);
    }
    (value, false)
}

//! CSS parsing for font-face injection.
//!
//! Parses flat (non-nested) stylesheets into an AST whose nodes carry byte spans
//! into the original source, so callers can splice text at exact offsets.

pub mod ast;
pub mod error;
pub mod family;
mod lexer;
pub mod parser;
pub mod value;
pub mod visit;

pub use ast::{AtRule, Component, ComponentKind, Declaration, Node, Raw, Rule, Span, Stylesheet, Value};
pub use error::CssParseError;
pub use family::{FamilyList, extract_families};
pub use parser::parse_stylesheet;
pub use value::parse_value;
pub use visit::{Ancestor, VisitContext, Visitor, walk};

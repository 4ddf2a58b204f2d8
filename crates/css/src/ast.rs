//! Stylesheet AST with byte spans.

/// A half-open byte range `[start, end)` into the parsed source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the text this span covers, or `None` if it is out of bounds.
    pub fn slice<'s>(&self, source: &'s str) -> Option<&'s str> {
        source.get(self.start..self.end)
    }
}

/// A parsed stylesheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stylesheet {
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Rule(Rule),
    AtRule(AtRule),
    Declaration(Declaration),
    /// Source text that is kept opaque, such as a nested rule.
    Raw(Raw),
}

impl Node {
    pub fn span(&self) -> Span {
        match self {
            Node::Rule(rule) => rule.span,
            Node::AtRule(at_rule) => at_rule.span,
            Node::Declaration(declaration) => declaration.span,
            Node::Raw(raw) => raw.span,
        }
    }
}

/// A qualified rule: `selector { declarations }`.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub prelude: String,
    pub children: Vec<Node>,
    pub span: Span,
}

/// An at-rule, with or without a block.
#[derive(Debug, Clone, PartialEq)]
pub struct AtRule {
    /// Lowercased name without the leading `@`.
    pub name: String,
    pub prelude: String,
    pub block: Option<Vec<Node>>,
    pub span: Span,
}

impl AtRule {
    pub fn is_font_face(&self) -> bool {
        self.name == "font-face"
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// Property name; lowercased unless it is a custom property.
    pub property: String,
    pub value: Value,
    pub important: bool,
    pub span: Span,
}

impl Declaration {
    pub fn is_custom_property(&self) -> bool {
        self.property.starts_with("--")
    }
}

/// A declaration value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Components(Vec<Component>),
    /// An unparsed token stream (custom property values).
    Raw(Raw),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Raw {
    pub text: String,
    pub span: Span,
}

/// One token-level component of a declaration value.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub kind: ComponentKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ComponentKind {
    Ident(String),
    /// A quoted string, unescaped and without its quotes.
    String(String),
    Number(String),
    Percentage(String),
    Dimension { value: String, unit: String },
    Hash(String),
    Url(String),
    Function { name: String, arguments: Vec<Component> },
    Comma,
    Slash,
    Delim(char),
}

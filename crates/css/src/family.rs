//! Font family extraction from `font-family`, `font`, and custom property values.

use crate::ast::{Component, ComponentKind, Declaration, Value};
use crate::error::CssParseError;
use crate::value::parse_value;
use fontless_types::GenericFamily;

/// CSS-wide keywords, which never name a family.
const CSS_WIDE_KEYWORDS: &[&str] = &["inherit", "initial", "unset", "revert", "revert-layer"];

/// Absolute and relative `font-size` keywords accepted by the `font` shorthand.
const FONT_SIZE_KEYWORDS: &[&str] = &[
    "xx-small", "x-small", "small", "medium", "large", "x-large", "xx-large", "xxx-large", "larger",
    "smaller", "math",
];

/// The families named by a declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FamilyList {
    /// Named families in declaration order; generic keywords are excluded.
    pub families: Vec<String>,
    /// The last generic family keyword in the value.
    pub generic: Option<GenericFamily>,
    /// Byte offset just past the primary family in the source, when the value
    /// was parsed into components.
    pub primary_end: Option<usize>,
}

impl FamilyList {
    pub fn primary(&self) -> Option<&str> {
        self.families.first().map(String::as_str)
    }

    /// The author-declared families after the primary one.
    pub fn fallbacks(&self) -> &[String] {
        self.families.get(1..).unwrap_or_default()
    }
}

/// Extracts the family list of a declaration.
///
/// Raw values are tokenized on the fly; their families are reported but no
/// insertion point is, since their positions are not tracked.
pub fn extract_families(declaration: &Declaration) -> Result<FamilyList, CssParseError> {
    let shorthand = declaration.property == "font";
    match &declaration.value {
        Value::Components(components) => Ok(collect_families(components, shorthand)),
        Value::Raw(raw) => {
            let components = parse_value(&raw.text)?;
            let mut list = collect_families(&components, shorthand);
            list.primary_end = None;
            Ok(list)
        }
    }
}

fn collect_families(components: &[Component], shorthand: bool) -> FamilyList {
    let components = if shorthand { skip_font_prefix(components) } else { components };

    let mut list = FamilyList::default();
    let mut words: Vec<&str> = Vec::new();
    let mut words_end = None;

    for component in components {
        match &component.kind {
            ComponentKind::String(name) => {
                push_family(&mut list, name.clone(), component.span.end);
            }
            ComponentKind::Ident(name) => {
                if let Some(generic) = GenericFamily::parse(name) {
                    list.generic = Some(generic);
                } else if !CSS_WIDE_KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(name)) {
                    words.push(name);
                    words_end = Some(component.span.end);
                }
            }
            ComponentKind::Comma => {
                if let Some(end) = words_end.take() {
                    push_family(&mut list, words.join(" "), end);
                }
                words.clear();
            }
            _ => {}
        }
    }
    if let Some(end) = words_end {
        push_family(&mut list, words.join(" "), end);
    }
    list
}

fn push_family(list: &mut FamilyList, name: String, end: usize) {
    if list.families.is_empty() {
        list.primary_end = Some(end);
    }
    list.families.push(name);
}

/// Drops the style/weight/size/line-height prefix of a `font` shorthand.
///
/// Returns an empty slice when there is no size, as with system font keywords.
fn skip_font_prefix(components: &[Component]) -> &[Component] {
    let size_index = components.iter().position(|component| match &component.kind {
        ComponentKind::Dimension { .. } | ComponentKind::Percentage(_) => true,
        ComponentKind::Ident(name) => {
            FONT_SIZE_KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(name))
        }
        _ => false,
    });
    let Some(mut index) = size_index.map(|i| i + 1) else {
        return &[];
    };
    if matches!(components.get(index).map(|c| &c.kind), Some(ComponentKind::Slash)) {
        index += 2;
    }
    components.get(index..).unwrap_or_default()
}

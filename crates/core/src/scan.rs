//! Stylesheet passes that find declared and referenced font families.

use fontless_css::{CssParseError, Declaration, Stylesheet, VisitContext, Visitor, extract_families, walk};
use fontless_types::ResolveOptions;
use log::trace;
use std::collections::HashSet;

/// A declaration whose primary family should be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub family: String,
    /// Author fallbacks and generic family, handed to the resolver as-is.
    pub options: ResolveOptions,
    /// Where synthetic fallback names are spliced in. `None` for unparsed values.
    pub insertion_offset: Option<usize>,
}

/// Families already declared by `@font-face` rules in the stylesheet.
pub fn declared_families(stylesheet: &Stylesheet) -> Result<HashSet<String>, CssParseError> {
    let mut scanner = DeclaredFamilyScanner::default();
    walk(stylesheet, &mut scanner)?;
    Ok(scanner.families)
}

/// Collects candidate declarations in document order.
///
/// Declarations inside `@font-face`, or whose primary family is empty or in
/// `declared`, are skipped. Custom properties are considered only when
/// `process_css_variables` is set.
pub fn find_candidates(
    stylesheet: &Stylesheet,
    declared: &HashSet<String>,
    process_css_variables: bool,
) -> Result<Vec<Candidate>, CssParseError> {
    let mut walker = CandidateWalker {
        declared,
        process_css_variables,
        candidates: Vec::new(),
    };
    walk(stylesheet, &mut walker)?;
    Ok(walker.candidates)
}

#[derive(Default)]
struct DeclaredFamilyScanner {
    families: HashSet<String>,
}

impl<'a> Visitor<'a> for DeclaredFamilyScanner {
    type Error = CssParseError;

    fn visit_declaration(&mut self, declaration: &'a Declaration, cx: &VisitContext<'a, '_>) -> Result<(), CssParseError> {
        if declaration.property == "font-family" && cx.in_font_face() {
            self.families.extend(extract_families(declaration)?.families);
        }
        Ok(())
    }
}

struct CandidateWalker<'d> {
    declared: &'d HashSet<String>,
    process_css_variables: bool,
    candidates: Vec<Candidate>,
}

impl CandidateWalker<'_> {
    fn is_candidate(&self, declaration: &Declaration) -> bool {
        matches!(declaration.property.as_str(), "font-family" | "font")
            || (self.process_css_variables && declaration.is_custom_property())
    }
}

impl<'a> Visitor<'a> for CandidateWalker<'_> {
    type Error = CssParseError;

    fn visit_declaration(&mut self, declaration: &'a Declaration, cx: &VisitContext<'a, '_>) -> Result<(), CssParseError> {
        if cx.in_font_face() || !self.is_candidate(declaration) {
            return Ok(());
        }
        let list = extract_families(declaration)?;
        let Some(family) = list.primary() else {
            return Ok(());
        };
        if self.declared.contains(family) {
            trace!("Skipping '{}': already declared by @font-face", family);
            return Ok(());
        }
        self.candidates.push(Candidate {
            family: family.to_string(),
            options: ResolveOptions {
                fallbacks: list.fallbacks().to_vec(),
                generic: list.generic,
            },
            insertion_offset: list.primary_end,
        });
        Ok(())
    }
}

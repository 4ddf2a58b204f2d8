//! Depth-first traversal over a parsed stylesheet.

use crate::ast::{AtRule, Declaration, Node, Raw, Rule, Stylesheet};

/// A block that encloses the node being visited.
#[derive(Debug, Clone, Copy)]
pub enum Ancestor<'a> {
    Rule(&'a Rule),
    AtRule(&'a AtRule),
}

/// Where in the tree the visited node sits.
#[derive(Debug, Clone, Copy)]
pub struct VisitContext<'a, 'b> {
    ancestors: &'b [Ancestor<'a>],
}

impl<'a> VisitContext<'a, '_> {
    pub fn parent(&self) -> Option<Ancestor<'a>> {
        self.ancestors.last().copied()
    }

    /// Whether the node sits directly inside an `@font-face` block.
    pub fn in_font_face(&self) -> bool {
        matches!(self.parent(), Some(Ancestor::AtRule(at_rule)) if at_rule.is_font_face())
    }
}

/// Callbacks invoked by [`walk`]. Every method defaults to doing nothing.
pub trait Visitor<'a> {
    type Error;

    fn visit_rule(&mut self, _rule: &'a Rule, _cx: &VisitContext<'a, '_>) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_at_rule(&mut self, _at_rule: &'a AtRule, _cx: &VisitContext<'a, '_>) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_declaration(
        &mut self,
        _declaration: &'a Declaration,
        _cx: &VisitContext<'a, '_>,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_raw(&mut self, _raw: &'a Raw, _cx: &VisitContext<'a, '_>) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Visits every node in document order, parents before children.
///
/// Stops at the first error a callback returns.
pub fn walk<'a, V: Visitor<'a>>(stylesheet: &'a Stylesheet, visitor: &mut V) -> Result<(), V::Error> {
    let mut ancestors = Vec::new();
    walk_nodes(&stylesheet.nodes, &mut ancestors, visitor)
}

fn walk_nodes<'a, V: Visitor<'a>>(
    nodes: &'a [Node],
    ancestors: &mut Vec<Ancestor<'a>>,
    visitor: &mut V,
) -> Result<(), V::Error> {
    for node in nodes {
        match node {
            Node::Rule(rule) => {
                visitor.visit_rule(rule, &VisitContext { ancestors: ancestors.as_slice() })?;
                ancestors.push(Ancestor::Rule(rule));
                let result = walk_nodes(&rule.children, ancestors, visitor);
                ancestors.pop();
                result?;
            }
            Node::AtRule(at_rule) => {
                visitor.visit_at_rule(at_rule, &VisitContext { ancestors: ancestors.as_slice() })?;
                if let Some(block) = &at_rule.block {
                    ancestors.push(Ancestor::AtRule(at_rule));
                    let result = walk_nodes(block, ancestors, visitor);
                    ancestors.pop();
                    result?;
                }
            }
            Node::Declaration(declaration) => {
                visitor.visit_declaration(declaration, &VisitContext { ancestors: ancestors.as_slice() })?;
            }
            Node::Raw(raw) => visitor.visit_raw(raw, &VisitContext { ancestors: ancestors.as_slice() })?,
        }
    }
    Ok(())
}

//! Depth-first walk over a nested forest

use crate::domain::node::TreeNode;

/// One visited node together with where it sits.
#[derive(Debug, Clone, Copy)]
pub struct Visit<'a> {
    pub node: &'a TreeNode,
    /// Node whose `children` hold this one, None for roots
    pub container: Option<&'a TreeNode>,
    /// Roots are at depth 0
    pub depth: usize,
}

/// Pre-order iterator over every node of a forest, in display order.
pub struct Walk<'a> {
    stack: Vec<Visit<'a>>,
}

impl<'a> Walk<'a> {
    fn new(roots: &'a [TreeNode]) -> Self {
        // Push in reverse for left-to-right traversal
        let stack = roots
            .iter()
            .rev()
            .map(|node| Visit {
                node,
                container: None,
                depth: 0,
            })
            .collect();
        Self { stack }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let visit = self.stack.pop()?;
        for child in visit.node.children().iter().rev() {
            self.stack.push(Visit {
                node: child,
                container: Some(visit.node),
                depth: visit.depth + 1,
            });
        }
        Some(visit)
    }
}

pub fn walk(roots: &[TreeNode]) -> Walk<'_> {
    Walk::new(roots)
}

/// Number of levels in the forest; 0 for an empty forest.
pub fn depth(roots: &[TreeNode]) -> usize {
    walk(roots).map(|v| v.depth + 1).max().unwrap_or(0)
}

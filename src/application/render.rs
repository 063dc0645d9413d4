//! Text rendering of a forest for terminal inspection

use termtree::Tree;
use tracing::instrument;

use crate::config::DisplaySettings;
use crate::domain::TreeNode;

pub trait ToTextTree {
    fn to_text_tree(&self, display: &DisplaySettings) -> Tree<String>;
}

/// Node whose subtree is being assembled, plus the leaves finished so far.
struct Frame<'a> {
    node: &'a TreeNode,
    next: usize,
    leaves: Vec<Tree<String>>,
}

impl<'a> Frame<'a> {
    fn new(node: &'a TreeNode) -> Self {
        Self {
            node,
            next: 0,
            leaves: Vec::new(),
        }
    }
}

impl ToTextTree for TreeNode {
    /// Built with an explicit stack so deep trees do not exhaust the call stack.
    fn to_text_tree(&self, display: &DisplaySettings) -> Tree<String> {
        let mut current = Frame::new(self);
        let mut parents: Vec<Frame> = Vec::new();

        loop {
            if let Some(child) = current.node.children().get(current.next) {
                current.next += 1;
                parents.push(std::mem::replace(&mut current, Frame::new(child)));
                continue;
            }

            let tree = Tree::new(label(current.node, display)).with_leaves(current.leaves);
            match parents.pop() {
                Some(mut parent) => {
                    parent.leaves.push(tree);
                    current = parent;
                }
                None => return tree,
            }
        }
    }
}

/// One text tree per root, in order.
#[instrument(level = "debug", skip_all, fields(root_count = roots.len()))]
pub fn render_forest(roots: &[TreeNode], display: &DisplaySettings) -> Vec<Tree<String>> {
    roots.iter().map(|root| root.to_text_tree(display)).collect()
}

/// Label for one node: state markers, name, then optional id and extensions.
pub fn label(node: &TreeNode, display: &DisplaySettings) -> String {
    let mut parts = Vec::new();

    if display.show_state {
        if let Some(checked) = node.checked {
            parts.push(if checked { "[x]" } else { "[ ]" }.to_string());
        }
        if node.has_loaded_children() {
            parts.push(if node.is_expanded() { "-" } else { "+" }.to_string());
        }
    }

    parts.push(node.name.clone());

    if display.show_state && node.awaits_children() {
        parts.push("…".to_string());
    }
    if display.show_ids {
        parts.push(format!("[{}]", node.id));
    }
    if display.show_extensions && !node.extensions.is_empty() {
        let fields: Vec<_> = node
            .extensions
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect();
        parts.push(format!("{{{}}}", fields.join(", ")));
    }

    parts.join(" ")
}

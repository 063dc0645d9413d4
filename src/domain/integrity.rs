//! Detection of structural invariant violations in a forest.
//!
//! Nothing here repairs data. Callers decide whether a report with issues is
//! fatal (the CLI `check` command treats it so).

use std::collections::HashSet;
use std::fmt;

use tracing::{debug, instrument};

use crate::domain::node::TreeNode;
use crate::domain::walk::walk;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityIssue {
    /// Second or later occurrence of an id
    DuplicateId { id: String },
    SelfParent { id: String },
    /// `parentId` names no node in the forest
    DanglingParent { id: String, parent_id: String },
    /// Nested under `container` but `parentId` names another node
    MisplacedChild {
        id: String,
        parent_id: String,
        container: String,
    },
    /// `hasChildren = false` while children are loaded
    ChildrenContradictHint { id: String },
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityIssue::DuplicateId { id } => write!(f, "duplicate id: {id}"),
            IntegrityIssue::SelfParent { id } => write!(f, "node {id} is its own parent"),
            IntegrityIssue::DanglingParent { id, parent_id } => {
                write!(f, "node {id} references unknown parent {parent_id}")
            }
            IntegrityIssue::MisplacedChild {
                id,
                parent_id,
                container,
            } => write!(
                f,
                "node {id} declares parent {parent_id} but is nested under {container}"
            ),
            IntegrityIssue::ChildrenContradictHint { id } => {
                write!(f, "node {id} has children but hasChildren is false")
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrityReport {
    pub nodes: usize,
    pub roots: usize,
    /// Nodes announcing children that are not loaded
    pub lazy: usize,
    pub issues: Vec<IntegrityIssue>,
}

impl IntegrityReport {
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Check a forest against the node invariants.
///
/// Issues are reported in walk order. A node's `parentId` is only compared with its
/// container when it is non-empty, so nested children without `parentId` are fine.
#[instrument(level = "debug", skip(roots), fields(root_count = roots.len()))]
pub fn check_integrity(roots: &[TreeNode]) -> IntegrityReport {
    let mut report = IntegrityReport {
        roots: roots.len(),
        ..Default::default()
    };

    let known: HashSet<&str> = walk(roots).map(|v| v.node.id.as_str()).collect();
    let mut seen: HashSet<&str> = HashSet::new();

    for visit in walk(roots) {
        let node = visit.node;
        report.nodes += 1;
        if node.awaits_children() {
            report.lazy += 1;
        }

        if !seen.insert(node.id.as_str()) {
            report.issues.push(IntegrityIssue::DuplicateId {
                id: node.id.clone(),
            });
        }

        if node.has_children == Some(false) && node.has_loaded_children() {
            report.issues.push(IntegrityIssue::ChildrenContradictHint {
                id: node.id.clone(),
            });
        }

        let Some(parent_id) = node.parent_id.as_deref().filter(|p| !p.is_empty()) else {
            continue;
        };

        if parent_id == node.id {
            report.issues.push(IntegrityIssue::SelfParent {
                id: node.id.clone(),
            });
        } else if !known.contains(parent_id) {
            report.issues.push(IntegrityIssue::DanglingParent {
                id: node.id.clone(),
                parent_id: parent_id.to_string(),
            });
        } else if let Some(container) = visit.container {
            if container.id != parent_id {
                report.issues.push(IntegrityIssue::MisplacedChild {
                    id: node.id.clone(),
                    parent_id: parent_id.to_string(),
                    container: container.id.clone(),
                });
            }
        }
    }

    debug!(
        "check_integrity: nodes={} issues={}",
        report.nodes,
        report.issues.len()
    );
    report
}

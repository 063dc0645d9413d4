//! Tree-list node data contract.
//!
//! [`TreeNode`] is the record a tree-list widget and its data sources exchange:
//! required `id` and `name`, optional parent link, image, children and UI state,
//! plus open-ended extension fields. Documents round-trip through JSON with field
//! presence preserved.
//!
//! ```
//! use treenode::TreeNode;
//!
//! let node = TreeNode::new("1", "Documents")
//!     .with_has_children(true)
//!     .with_extension("size", 2048)
//!     .unwrap();
//! assert!(node.awaits_children());
//!
//! let json = serde_json::to_string(&node).unwrap();
//! assert_eq!(json, r#"{"id":"1","name":"Documents","hasChildren":true,"size":2048}"#);
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use domain::{
    check_integrity, DomainError, Extensions, FieldValue, IntegrityIssue, IntegrityReport,
    TreeDocument, TreeNode,
};

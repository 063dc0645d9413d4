//! Domain layer: the node contract and checks over it
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod document;
pub mod error;
pub mod extensions;
pub mod integrity;
pub mod node;
pub mod value;
pub mod walk;

pub use document::TreeDocument;
pub use error::{DomainError, DomainResult};
pub use extensions::{is_reserved, Extensions, RESERVED_FIELDS};
pub use integrity::{check_integrity, IntegrityIssue, IntegrityReport};
pub use node::TreeNode;
pub use value::FieldValue;
pub use walk::{walk, Visit, Walk};

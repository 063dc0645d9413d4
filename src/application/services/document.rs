//! Tree document service
//!
//! Loads, checks, summarizes and writes JSON tree documents.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::walk::{depth, walk};
use crate::domain::{check_integrity, IntegrityReport, TreeDocument, TreeNode};
use crate::infrastructure::traits::FileSystem;

/// Summary numbers for a forest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForestStats {
    pub nodes: usize,
    pub roots: usize,
    /// Number of levels, roots included
    pub depth: usize,
    pub lazy: usize,
    pub expanded: usize,
    pub checked: usize,
    /// Distinct extension field names across all nodes
    pub extension_names: BTreeSet<String>,
}

impl ForestStats {
    pub fn collect(roots: &[TreeNode]) -> Self {
        let mut stats = ForestStats {
            roots: roots.len(),
            depth: depth(roots),
            ..Default::default()
        };
        for visit in walk(roots) {
            let node = visit.node;
            stats.nodes += 1;
            if node.awaits_children() {
                stats.lazy += 1;
            }
            if node.is_expanded() {
                stats.expanded += 1;
            }
            if node.is_checked() {
                stats.checked += 1;
            }
            stats
                .extension_names
                .extend(node.extensions.names().map(str::to_string));
        }
        stats
    }
}

/// Service for reading and writing tree documents.
pub struct DocumentService {
    fs: Arc<dyn FileSystem>,
}

impl DocumentService {
    /// Create a new document service.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Read and parse a document.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<TreeDocument> {
        if !self.fs.is_file(path) {
            return Err(ApplicationError::OperationFailed {
                context: format!("file not found: {}", path.display()),
                source: Box::new(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "file does not exist",
                )),
            });
        }

        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read tree document", path)?;

        let doc = TreeDocument::from_json_str(&content).map_err(|source| {
            ApplicationError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })?;
        debug!("load: {} roots", doc.roots().len());
        Ok(doc)
    }

    /// Load a document and check it against the node invariants.
    #[instrument(level = "debug", skip(self))]
    pub fn check(&self, path: &Path) -> ApplicationResult<IntegrityReport> {
        let doc = self.load(path)?;
        let report = check_integrity(doc.roots());
        info!(
            "check: {} nodes, {} issues in {}",
            report.nodes,
            report.issues.len(),
            path.display()
        );
        Ok(report)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn stats(&self, path: &Path) -> ApplicationResult<ForestStats> {
        let doc = self.load(path)?;
        Ok(ForestStats::collect(doc.roots()))
    }

    /// Serialize a document, keeping its top-level shape.
    pub fn format(&self, doc: &TreeDocument, pretty: bool) -> ApplicationResult<String> {
        let mut out = doc
            .to_json_string(pretty)
            .map_err(|e| ApplicationError::OperationFailed {
                context: "serialize tree document".to_string(),
                source: Box::new(e),
            })?;
        out.push('\n');
        Ok(out)
    }

    #[instrument(level = "debug", skip(self, doc))]
    pub fn save(&self, path: &Path, doc: &TreeDocument, pretty: bool) -> ApplicationResult<()> {
        let content = self.format(doc, pretty)?;
        self.fs
            .ensure_parent(path)
            .with_path_context("create parent directory", path)?;
        self.fs
            .write(path, &content)
            .with_path_context("write tree document", path)?;
        debug!("save: wrote {} bytes", content.len());
        Ok(())
    }
}

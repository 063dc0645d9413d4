//! JSON documents holding either one node or a list of roots

use std::fmt;

use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::node::{NodeVisitor, TreeNode};

/// Top-level shape of a tree document.
///
/// Producers send either a single root object or an array of roots. The shape is
/// kept so that re-serializing writes back what was read.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TreeDocument {
    Forest(Vec<TreeNode>),
    Single(TreeNode),
}

impl TreeDocument {
    /// Parse a document, dispatching on the top-level JSON type.
    ///
    /// Nesting depth is not capped: serde_json's recursion limit is lifted and
    /// `serde_stacker` grows the stack on demand instead.
    pub fn from_json_str(input: &str) -> Result<Self, serde_json::Error> {
        let mut de = serde_json::Deserializer::from_str(input);
        de.disable_recursion_limit();
        let doc = TreeDocument::deserialize(serde_stacker::Deserializer::new(&mut de))?;
        de.end()?;
        Ok(doc)
    }

    pub fn to_json_string(&self, pretty: bool) -> Result<String, serde_json::Error> {
        use serde::ser::Error as _;

        let mut buf = Vec::new();
        if pretty {
            let mut ser = serde_json::Serializer::pretty(&mut buf);
            self.serialize(serde_stacker::Serializer::new(&mut ser))?;
        } else {
            let mut ser = serde_json::Serializer::new(&mut buf);
            self.serialize(serde_stacker::Serializer::new(&mut ser))?;
        }
        String::from_utf8(buf).map_err(serde_json::Error::custom)
    }

    pub fn roots(&self) -> &[TreeNode] {
        match self {
            TreeDocument::Forest(roots) => roots,
            TreeDocument::Single(root) => std::slice::from_ref(root),
        }
    }

    pub fn into_roots(self) -> Vec<TreeNode> {
        match self {
            TreeDocument::Forest(roots) => roots,
            TreeDocument::Single(root) => vec![root],
        }
    }

    /// The single root, if the document was written as one object.
    pub fn single(&self) -> DomainResult<&TreeNode> {
        match self {
            TreeDocument::Single(root) => Ok(root),
            TreeDocument::Forest(roots) => Err(DomainError::InvalidDocument {
                message: format!("expected a single node, found {} roots", roots.len()),
            }),
        }
    }
}

impl<'de> Deserialize<'de> for TreeDocument {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(DocumentVisitor)
    }
}

struct DocumentVisitor;

impl<'de> Visitor<'de> for DocumentVisitor {
    type Value = TreeDocument;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a node object or an array of nodes")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<TreeDocument, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut roots = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(node) = seq.next_element::<TreeNode>()? {
            roots.push(node);
        }
        Ok(TreeDocument::Forest(roots))
    }

    fn visit_map<A>(self, map: A) -> Result<TreeDocument, A::Error>
    where
        A: MapAccess<'de>,
    {
        NodeVisitor.visit_map(map).map(TreeDocument::Single)
    }
}

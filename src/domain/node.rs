//! The tree node record shared by tree-list widgets and their data sources

use std::fmt;

use serde::de::{self, Error as _, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::error::DomainResult;
use crate::domain::extensions::Extensions;
use crate::domain::value::FieldValue;

/// One node of a hierarchical tree.
///
/// `id` and `name` are required; every other fixed field is optional and keeps its
/// presence on the wire: an absent field is omitted, never written as a default.
/// That matters most for `children` vs `has_children`, where absence is the signal
/// for lazily loaded descendants.
///
/// Anything beyond the fixed schema lives in [`Extensions`] and is written next
/// to the fixed fields when serialized.
///
/// Serialization is hand-written: fixed fields and extensions are read in one pass
/// over the object, with no intermediate buffering.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    /// Unique within one tree
    pub id: String,
    /// Logical parent; absent or empty means root
    pub parent_id: Option<String>,
    /// Display label
    pub name: String,
    pub image_url: Option<String>,
    /// Direct children in display order
    pub children: Option<Vec<TreeNode>>,
    pub expanded: Option<bool>,
    pub checked: Option<bool>,
    /// Descendants exist even if `children` is not loaded yet
    pub has_children: Option<bool>,
    pub extensions: Extensions,
}

impl TreeNode {
    /// Node with only the required fields set.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent_id: None,
            name: name.into(),
            image_url: None,
            children: None,
            expanded: None,
            checked: None,
            has_children: None,
            extensions: Extensions::new(),
        }
    }

    pub fn with_parent_id(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Replace the children sequence. An empty vec keeps `children` present.
    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children = Some(children);
        self
    }

    /// Append one child, creating the sequence if absent.
    pub fn with_child(mut self, child: TreeNode) -> Self {
        self.children.get_or_insert_with(Vec::new).push(child);
        self
    }

    pub fn with_expanded(mut self, expanded: bool) -> Self {
        self.expanded = Some(expanded);
        self
    }

    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = Some(checked);
        self
    }

    pub fn with_has_children(mut self, has_children: bool) -> Self {
        self.has_children = Some(has_children);
        self
    }

    pub fn with_extension(
        mut self,
        name: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> DomainResult<Self> {
        self.extensions.insert(name, value)?;
        Ok(self)
    }

    /// No parent reference, or an empty one.
    pub fn is_root(&self) -> bool {
        self.parent_id.as_deref().map_or(true, str::is_empty)
    }

    /// Loaded children; empty when the sequence is absent.
    pub fn children(&self) -> &[TreeNode] {
        self.children.as_deref().unwrap_or_default()
    }

    pub fn has_loaded_children(&self) -> bool {
        !self.children().is_empty()
    }

    /// Descendants are announced via `has_children` but none are loaded.
    pub fn awaits_children(&self) -> bool {
        self.has_children == Some(true) && !self.has_loaded_children()
    }

    /// Absent reads as collapsed.
    pub fn is_expanded(&self) -> bool {
        self.expanded.unwrap_or(false)
    }

    /// Absent reads as unchecked.
    pub fn is_checked(&self) -> bool {
        self.checked.unwrap_or(false)
    }

    pub fn extension(&self, name: &str) -> Option<&FieldValue> {
        self.extensions.get(name)
    }

    pub fn set_extension(
        &mut self,
        name: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> DomainResult<Option<FieldValue>> {
        self.extensions.insert(name, value)
    }

    pub fn remove_extension(&mut self, name: &str) -> Option<FieldValue> {
        self.extensions.remove(name)
    }
}

// ============================================================
// WIRE FORMAT
// ============================================================

impl Serialize for TreeNode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("id", &self.id)?;
        if let Some(parent_id) = &self.parent_id {
            map.serialize_entry("parentId", parent_id)?;
        }
        map.serialize_entry("name", &self.name)?;
        if let Some(image_url) = &self.image_url {
            map.serialize_entry("imageUrl", image_url)?;
        }
        if let Some(children) = &self.children {
            map.serialize_entry("children", children)?;
        }
        if let Some(expanded) = &self.expanded {
            map.serialize_entry("expanded", expanded)?;
        }
        if let Some(checked) = &self.checked {
            map.serialize_entry("checked", checked)?;
        }
        if let Some(has_children) = &self.has_children {
            map.serialize_entry("hasChildren", has_children)?;
        }
        for (name, value) in &self.extensions {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TreeNode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(NodeVisitor)
    }
}

/// Reads one node object. Also used for the single-node document shape.
pub(crate) struct NodeVisitor;

/// Read a fixed field's value, rejecting a second occurrence of the same key.
fn next_once<'de, A, T>(map: &mut A, slot: &mut Option<T>, field: &'static str) -> Result<(), A::Error>
where
    A: MapAccess<'de>,
    T: Deserialize<'de>,
{
    if slot.is_some() {
        return Err(de::Error::duplicate_field(field));
    }
    *slot = Some(map.next_value()?);
    Ok(())
}

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = TreeNode;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a tree node object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<TreeNode, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut id: Option<String> = None;
        let mut name: Option<String> = None;
        // Outer Option tracks "seen", inner keeps an explicit null as absent
        let mut parent_id: Option<Option<String>> = None;
        let mut image_url: Option<Option<String>> = None;
        let mut children: Option<Option<Vec<TreeNode>>> = None;
        let mut expanded: Option<Option<bool>> = None;
        let mut checked: Option<Option<bool>> = None;
        let mut has_children: Option<Option<bool>> = None;
        let mut extensions = Extensions::new();

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "id" => next_once(&mut map, &mut id, "id")?,
                "name" => next_once(&mut map, &mut name, "name")?,
                "parentId" => next_once(&mut map, &mut parent_id, "parentId")?,
                "imageUrl" => next_once(&mut map, &mut image_url, "imageUrl")?,
                "children" => next_once(&mut map, &mut children, "children")?,
                "expanded" => next_once(&mut map, &mut expanded, "expanded")?,
                "checked" => next_once(&mut map, &mut checked, "checked")?,
                "hasChildren" => next_once(&mut map, &mut has_children, "hasChildren")?,
                _ => {
                    let value: FieldValue = map.next_value()?;
                    extensions.insert(key, value).map_err(A::Error::custom)?;
                }
            }
        }

        Ok(TreeNode {
            id: id.ok_or_else(|| A::Error::missing_field("id"))?,
            parent_id: parent_id.flatten(),
            name: name.ok_or_else(|| A::Error::missing_field("name"))?,
            image_url: image_url.flatten(),
            children: children.flatten(),
            expanded: expanded.flatten(),
            checked: checked.flatten(),
            has_children: has_children.flatten(),
            extensions,
        })
    }
}

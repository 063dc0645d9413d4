//! Extension fields: the open-ended side of a node

use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::value::FieldValue;

/// Wire names of the fixed node fields. None of these may be used as an extension name.
pub const RESERVED_FIELDS: [&str; 8] = [
    "id",
    "parentId",
    "name",
    "imageUrl",
    "children",
    "expanded",
    "checked",
    "hasChildren",
];

pub fn is_reserved(name: &str) -> bool {
    RESERVED_FIELDS.contains(&name)
}

/// Named extension fields attached to a node, ordered by name.
///
/// On the wire these are flattened next to the fixed fields, so a reserved name
/// would collide with a fixed field. Every way in (insert, deserialize) rejects them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Extensions(BTreeMap<String, FieldValue>);

impl Extensions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a field, returning the previous value.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> DomainResult<Option<FieldValue>> {
        let name = name.into();
        if is_reserved(&name) {
            return Err(DomainError::ReservedField(name));
        }
        Ok(self.0.insert(name, value.into()))
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut FieldValue> {
        self.0.get_mut(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.0.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, FieldValue> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a Extensions {
    type Item = (&'a String, &'a FieldValue);
    type IntoIter = btree_map::Iter<'a, String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl TryFrom<BTreeMap<String, FieldValue>> for Extensions {
    type Error = DomainError;

    fn try_from(map: BTreeMap<String, FieldValue>) -> DomainResult<Self> {
        if let Some(name) = map.keys().find(|name| is_reserved(name)) {
            return Err(DomainError::ReservedField(name.clone()));
        }
        Ok(Self(map))
    }
}

impl<'de> Deserialize<'de> for Extensions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = BTreeMap::<String, FieldValue>::deserialize(deserializer)?;
        Extensions::try_from(map).map_err(D::Error::custom)
    }
}

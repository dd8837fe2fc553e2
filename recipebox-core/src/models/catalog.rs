//! Reference vocabularies a recipe points into.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An embedded copy of a referenced entity's identifying fields.
///
/// Taken at write time and never re-synced with the source entity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntityRef {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cuisine {
    pub id: Uuid,
    pub name: String,
}

impl Cuisine {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }

    pub fn snapshot(&self) -> EntityRef {
        EntityRef {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }

    pub fn snapshot(&self) -> EntityRef {
        EntityRef {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_copies_identity() {
        let cuisine = Cuisine::new("Thai");
        let snap = cuisine.snapshot();
        assert_eq!(snap.id, cuisine.id);
        assert_eq!(snap.name, "Thai");

        let tag = Tag::new("spicy");
        assert_eq!(tag.snapshot().id, tag.id);
    }
}

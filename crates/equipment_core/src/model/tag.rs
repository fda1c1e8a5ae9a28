//! Tag collection attached to an equipment record.
//!
//! # Invariants
//! - A tag appears at most once.
//! - Equality ignores order; iteration follows insertion order.

use super::fields::Tag;
use serde::{Deserialize, Serialize};

/// Insertion-ordered, duplicate-free set of tags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Tag>", into = "Vec<Tag>")]
pub struct TagSet {
    tags: Vec<Tag>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `tag` unless already present. Returns whether it was added.
    pub fn insert(&mut self, tag: Tag) -> bool {
        if self.contains(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    /// Removes `tag` if present, keeping the order of the remaining tags.
    pub fn remove(&mut self, tag: &Tag) -> bool {
        let before = self.tags.len();
        self.tags.retain(|existing| existing != tag);
        self.tags.len() != before
    }

    pub fn contains(&self, tag: &Tag) -> bool {
        self.tags.iter().any(|existing| existing == tag)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.tags.iter()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl PartialEq for TagSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|tag| other.contains(tag))
    }
}

impl Eq for TagSet {}

impl FromIterator<Tag> for TagSet {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        let mut set = Self::new();
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}

impl From<Vec<Tag>> for TagSet {
    fn from(value: Vec<Tag>) -> Self {
        value.into_iter().collect()
    }
}

impl From<TagSet> for Vec<Tag> {
    fn from(value: TagSet) -> Self {
        value.tags
    }
}

impl<'a> IntoIterator for &'a TagSet {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::TagSet;
    use crate::model::fields::Tag;

    fn tag(value: &str) -> Tag {
        value.parse().unwrap()
    }

    #[test]
    fn equality_ignores_order() {
        let left: TagSet = vec![tag("west"), tag("urgent")].into();
        let right: TagSet = vec![tag("urgent"), tag("west")].into();
        assert_eq!(left, right);
        assert_ne!(left, TagSet::from(vec![tag("west")]));
    }

    #[test]
    fn insert_dedups_and_keeps_first_position() {
        let mut set: TagSet = vec![tag("b"), tag("a"), tag("b")].into();
        assert!(!set.insert(tag("a")));
        assert!(set.insert(tag("c")));
        let order: Vec<&str> = set.iter().map(Tag::as_str).collect();
        assert_eq!(order, vec!["b", "a", "c"]);
    }

    #[test]
    fn remove_reports_whether_present() {
        let mut set: TagSet = vec![tag("a"), tag("b")].into();
        assert!(set.remove(&tag("a")));
        assert!(!set.remove(&tag("a")));
        assert_eq!(set.len(), 1);
    }
}

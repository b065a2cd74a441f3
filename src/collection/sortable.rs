use std::borrow::Cow;
use std::ops::Deref;

use serde_json::{Map, Value};

use super::errors::{CollectionError, CollectionResult};

/// Named attribute access for collection items
pub trait HasAttributes {
    /// Value of the attribute, or `None` if the item has no such attribute
    fn attribute(&self, name: &str) -> Option<Cow<'_, Value>>;
}

impl HasAttributes for Map<String, Value> {
    fn attribute(&self, name: &str) -> Option<Cow<'_, Value>> {
        self.get(name).map(Cow::Borrowed)
    }
}

impl HasAttributes for Value {
    fn attribute(&self, name: &str) -> Option<Cow<'_, Value>> {
        self.as_object().and_then(|object| object.attribute(name))
    }
}

impl<T: HasAttributes + ?Sized> HasAttributes for &T {
    fn attribute(&self, name: &str) -> Option<Cow<'_, Value>> {
        (**self).attribute(name)
    }
}

/// Truthiness: null, false, zero, and empty strings/arrays/objects are falsy
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

/// Ordered sequence with attribute predicates
#[derive(Debug, Clone, PartialEq)]
pub struct SortableCollection<T> {
    items: Vec<T>,
}

impl<T> SortableCollection<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn into_inner(self) -> Vec<T> {
        self.items
    }
}

impl<T: HasAttributes> SortableCollection<T> {
    /// True if at least one item's attribute is truthy.
    ///
    /// Stops at the first truthy item; an item before it that lacks the
    /// attribute is an error.
    pub fn any(&self, name: &str) -> CollectionResult<bool> {
        for (index, item) in self.items.iter().enumerate() {
            if is_truthy(&*lookup(item, index, name)?) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// True if every item's attribute is truthy; true when empty.
    ///
    /// Stops at the first falsy item; an item before it that lacks the
    /// attribute is an error.
    pub fn all(&self, name: &str) -> CollectionResult<bool> {
        for (index, item) in self.items.iter().enumerate() {
            if !is_truthy(&*lookup(item, index, name)?) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

fn lookup<'a, T: HasAttributes>(
    item: &'a T,
    index: usize,
    name: &str,
) -> CollectionResult<Cow<'a, Value>> {
    item.attribute(name)
        .ok_or_else(|| CollectionError::MissingAttribute {
            attribute: name.to_string(),
            index,
        })
}

impl<T> Default for SortableCollection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Deref for SortableCollection<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T> From<Vec<T>> for SortableCollection<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T> FromIterator<T> for SortableCollection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<T> IntoIterator for SortableCollection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a SortableCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Collects any iterator of items into a `SortableCollection`
pub fn sortable<I: IntoIterator>(items: I) -> SortableCollection<I::Item> {
    items.into_iter().collect()
}

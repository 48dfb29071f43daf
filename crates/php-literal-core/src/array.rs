//! PHP array construction.
//!
//! Every producer of array values (the literal parser and the JSON reader)
//! goes through [`ArrayBuilder`], so implicit keys, duplicate keys and the
//! List/Map decision behave the same regardless of where the data came from.

use std::collections::HashMap;

use crate::types::{ArrayKey, PhpValue};

/// Collects array elements and decides the final representation once all of
/// them are known.
#[derive(Debug)]
pub struct ArrayBuilder<'a> {
    entries: Vec<(ArrayKey<'a>, PhpValue<'a>)>,
    index: HashMap<ArrayKey<'a>, usize>,
    /// Key given to the next unkeyed element. `None` once `i64::MAX` is taken.
    next_index: Option<i64>,
}

/// Appending an unkeyed element failed because key `i64::MAX` is in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOverflow;

impl<'a> ArrayBuilder<'a> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
            next_index: Some(0),
        }
    }

    /// Create an empty builder with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            next_index: Some(0),
        }
    }

    /// Append an element without a key, as `$a[] = $value` would.
    pub fn push(&mut self, value: PhpValue<'a>) -> Result<(), IndexOverflow> {
        let key = self.next_index.ok_or(IndexOverflow)?;
        self.insert(ArrayKey::Int(key), value);
        Ok(())
    }

    /// Set an element under an explicit key, as `$a[$key] = $value` would.
    ///
    /// A repeated key overwrites the earlier value but keeps its position.
    pub fn insert(&mut self, key: ArrayKey<'a>, value: PhpValue<'a>) {
        if let ArrayKey::Int(i) = key {
            if self.next_index.map_or(false, |next| i >= next) {
                self.next_index = i.checked_add(1);
            }
        }

        match self.index.get(&key) {
            Some(&slot) => self.entries[slot].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    /// Number of distinct keys collected so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no element has been added.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the collected keys are exactly `0..n` in insertion order.
    pub fn is_sequential(&self) -> bool {
        self.entries
            .iter()
            .enumerate()
            .all(|(i, (k, _))| matches!(k, ArrayKey::Int(idx) if *idx >= 0 && *idx as usize == i))
    }

    /// Produce a [`PhpValue::List`] when the keys are sequential from zero,
    /// otherwise a [`PhpValue::Map`].
    pub fn finish(self) -> PhpValue<'a> {
        if self.is_sequential() {
            PhpValue::List(self.entries.into_iter().map(|(_, v)| v).collect())
        } else {
            PhpValue::Map(self.entries)
        }
    }
}

impl Default for ArrayBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

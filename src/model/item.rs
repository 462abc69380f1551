//! Catalog item record and the insertion-ordered entity store.

use crate::model::ItemId;
use std::collections::HashMap;

/// A single catalog record with display and rating metadata.
///
/// Immutable once constructed; identity is `id`. The favorite flag is a
/// derived property of the favorites set, never stored on the item.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// Upstream identity.
    pub id: ItemId,
    /// Full URL of the poster image.
    pub image_url: String,
    /// Display title.
    pub title: String,
    /// Short plot description.
    pub overview: String,
    /// Average user rating.
    pub rating: f64,
    /// Release year, when the upstream release date parses.
    pub year: Option<i32>,
}

/// Insertion-ordered, id-keyed collection of items.
///
/// Iteration preserves the order items were inserted in (the order the
/// data source returned them), while lookup by id stays O(1). Inserting an
/// item whose id is already present replaces the record in place without
/// disturbing its position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemTable {
    order: Vec<ItemId>,
    by_id: HashMap<ItemId, Item>,
}

impl ItemTable {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the table holds no items.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Insert or replace by id.
    ///
    /// A new id appends; an existing id replaces the record in place.
    pub fn insert(&mut self, item: Item) {
        let id = item.id;
        if self.by_id.insert(id, item).is_none() {
            self.order.push(id);
        }
    }

    /// Lookup by id.
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.by_id.get(&id)
    }

    /// Whether an item with this id is present.
    pub fn contains(&self, id: ItemId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Ids in insertion order.
    pub fn ids(&self) -> &[ItemId] {
        &self.order
    }

    /// Items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.order.iter().map(move |id| &self.by_id[id])
    }
}

impl FromIterator<Item> for ItemTable {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        let mut table = ItemTable::new();
        for item in iter {
            table.insert(item);
        }
        table
    }
}

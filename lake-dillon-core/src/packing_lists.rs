//! Per-member packing lists.
//!
//! Each family member has one document at `packingLists/<memberId>` holding
//! `{ "items": [...] }`. A missing document is an empty list.

use serde::{Deserialize, Serialize};

use crate::models::{PackingCategory, PackingItem};
use crate::store::{DocumentPath, DocumentStore, StoreError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackingList {
    #[serde(skip)]
    pub member_id: String,
    #[serde(default)]
    pub items: Vec<PackingItem>,
}

impl PackingList {
    pub fn empty(member_id: impl Into<String>) -> Self {
        Self {
            member_id: member_id.into(),
            items: Vec::new(),
        }
    }

    pub fn item(&self, id: &str) -> Option<&PackingItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Appends a user-added item with id `item-<now_ms>`. Returns the new
    /// list and the id.
    pub fn add_item(
        &self,
        name: &str,
        category: PackingCategory,
        now_ms: i64,
    ) -> (PackingList, String) {
        let id = format!("item-{}", now_ms);
        let mut items = self.items.clone();
        items.push(PackingItem {
            id: id.clone(),
            name: name.trim().to_string(),
            category,
            packed: false,
            is_default: false,
            family_member_id: Some(self.member_id.clone()),
        });
        (
            PackingList {
                member_id: self.member_id.clone(),
                items,
            },
            id,
        )
    }

    /// Flips the packed flag of one item. Unknown ids leave the list as is.
    pub fn toggle_packed(&self, id: &str) -> PackingList {
        PackingList {
            member_id: self.member_id.clone(),
            items: self
                .items
                .iter()
                .map(|i| {
                    if i.id == id {
                        PackingItem {
                            packed: !i.packed,
                            ..i.clone()
                        }
                    } else {
                        i.clone()
                    }
                })
                .collect(),
        }
    }

    pub fn remove_item(&self, id: &str) -> PackingList {
        PackingList {
            member_id: self.member_id.clone(),
            items: self.items.iter().filter(|i| i.id != id).cloned().collect(),
        }
    }

    /// `(packed, total)`.
    pub fn progress(&self) -> (usize, usize) {
        let packed = self.items.iter().filter(|i| i.packed).count();
        (packed, self.items.len())
    }

    /// Items grouped by category, in category order. Empty groups are skipped.
    pub fn by_category(&self) -> Vec<(PackingCategory, Vec<&PackingItem>)> {
        PackingCategory::ALL
            .iter()
            .map(|cat| {
                (
                    *cat,
                    self.items.iter().filter(|i| i.category == *cat).collect::<Vec<_>>(),
                )
            })
            .filter(|(_, items)| !items.is_empty())
            .collect()
    }
}

/// Loads and saves packing lists through a [`DocumentStore`].
#[derive(Debug)]
pub struct PackingLists<S> {
    store: S,
}

impl<S: DocumentStore> PackingLists<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn load(&self, member_id: &str) -> Result<PackingList, StoreError> {
        let path = DocumentPath::packing_list(member_id)?;
        let list = match self.store.get(&path)? {
            Some(doc) => {
                let mut list: PackingList =
                    serde_json::from_value(doc).map_err(|e| StoreError::Malformed {
                        path: path.to_string(),
                        message: e.to_string(),
                    })?;
                list.member_id = member_id.to_string();
                list
            }
            None => PackingList::empty(member_id),
        };
        Ok(list)
    }

    pub fn save(&self, list: &PackingList) -> Result<(), StoreError> {
        let path = DocumentPath::packing_list(&list.member_id)?;
        let doc = serde_json::to_value(list).map_err(|e| StoreError::Malformed {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        self.store.set(&path, &doc)?;
        tracing::debug!(member = %list.member_id, items = list.items.len(), "saved packing list");
        Ok(())
    }
}

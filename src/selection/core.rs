use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::catalog::{Catalog, VariantId};

/// One staged region and the variants currently ticked for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingEntry {
    pub name: String,
    pub variants: BTreeSet<VariantId>,
}

/// Insertion-ordered mapping from region display name to selected variants.
///
/// Names are unique. An entry may hold an empty variant set; such entries are
/// dropped rather than promoted when the selection is committed.
#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
    entries: Vec<PendingEntry>,
    index: HashMap<String, usize>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&BTreeSet<VariantId>> {
        self.position(name).map(|idx| &self.entries[idx].variants)
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[PendingEntry] {
        &self.entries
    }

    /// Stage `name` with every eligible variant pre-selected.
    ///
    /// Returns `false` without touching the store when the name is unknown to
    /// the catalog or already staged.
    pub fn add_region<C>(&mut self, catalog: &C, name: &str) -> bool
    where
        C: Catalog + ?Sized,
    {
        if self.contains(name) {
            return false;
        }
        let Some(canonical_id) = catalog.canonical_id(name) else {
            return false;
        };
        let variants = eligible_variants(catalog, canonical_id);
        self.push(name.to_string(), variants);
        true
    }

    /// Stage every catalog region that is not staged yet, in catalog order.
    /// Returns how many entries were inserted.
    pub fn add_all_eligible<C>(&mut self, catalog: &C) -> usize
    where
        C: Catalog + ?Sized,
    {
        let mut added = 0;
        for entry in catalog.entries() {
            if self.contains(&entry.display_name) {
                continue;
            }
            let variants = eligible_variants(catalog, &entry.canonical_id);
            self.push(entry.display_name.clone(), variants);
            added += 1;
        }
        added
    }

    pub fn remove_region(&mut self, name: &str) -> bool {
        let Some(idx) = self.index.remove(name) else {
            return false;
        };
        self.entries.remove(idx);
        for slot in self.index.values_mut() {
            if *slot > idx {
                *slot -= 1;
            }
        }
        true
    }

    /// Flip membership of `variant` for `name`.
    ///
    /// Returns the new membership, or `None` when `name` is not staged.
    pub fn toggle_variant(&mut self, name: &str, variant: &VariantId) -> Option<bool> {
        let idx = self.position(name)?;
        let variants = &mut self.entries[idx].variants;
        if variants.remove(variant) {
            Some(false)
        } else {
            variants.insert(variant.clone());
            Some(true)
        }
    }

    /// Drop every staged entry, returning how many there were.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        self.index.clear();
        count
    }

    /// Move every staged entry out, leaving the store empty.
    pub fn take(&mut self) -> Vec<PendingEntry> {
        self.index.clear();
        std::mem::take(&mut self.entries)
    }

    fn push(&mut self, name: String, variants: BTreeSet<VariantId>) {
        self.index.insert(name.clone(), self.entries.len());
        self.entries.push(PendingEntry { name, variants });
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }
}

fn eligible_variants<C>(catalog: &C, canonical_id: &str) -> BTreeSet<VariantId>
where
    C: Catalog + ?Sized,
{
    catalog
        .variants()
        .iter()
        .filter(|info| catalog.is_eligible(&info.id, canonical_id))
        .map(|info| info.id.clone())
        .collect()
}

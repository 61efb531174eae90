use std::collections::{BTreeSet, HashSet};

use serde::Serialize;

use crate::catalog::VariantId;
use crate::selection::SelectionStore;

/// A committed region. The variant set is fixed at construction.
#[derive(Debug, Clone, Serialize)]
pub struct QueueEntry {
    name: String,
    variants: BTreeSet<VariantId>,
}

impl QueueEntry {
    pub(crate) fn new(name: String, variants: BTreeSet<VariantId>) -> Self {
        Self { name, variants }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variants(&self) -> &BTreeSet<VariantId> {
        &self.variants
    }
}

/// Entries are the same queue item when their names match.
impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for QueueEntry {}

impl PartialEq<str> for QueueEntry {
    fn eq(&self, other: &str) -> bool {
        self.name == other
    }
}

/// Outcome of promoting a pending selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitReport {
    /// Names appended to the queue, in order.
    pub promoted: Vec<String>,
    /// Pending entries dropped because their variant set was empty.
    pub skipped_empty: Vec<String>,
    /// Pending entries dropped because the name was already queued.
    pub skipped_queued: Vec<String>,
}

impl CommitReport {
    pub fn skipped(&self) -> usize {
        self.skipped_empty.len() + self.skipped_queued.len()
    }
}

/// Ordered, name-deduplicated queue of committed regions.
#[derive(Debug, Clone, Default)]
pub struct QueueStore {
    entries: Vec<QueueEntry>,
    names: HashSet<String>,
}

impl QueueStore {
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
        self.names.contains(name)
    }

    /// Entries in consumption order; the head is the region being captured.
    pub fn entries(&self) -> &[QueueEntry] {
        &self.entries
    }

    pub fn head(&self) -> Option<&QueueEntry> {
        self.entries.first()
    }

    /// Promote every non-empty, not-yet-queued pending entry, then empty the
    /// selection regardless of how many entries were promoted.
    pub fn commit_from(&mut self, selection: &mut SelectionStore) -> CommitReport {
        let mut report = CommitReport::default();
        for pending in selection.take() {
            if pending.variants.is_empty() {
                report.skipped_empty.push(pending.name);
            } else if self.names.contains(&pending.name) {
                report.skipped_queued.push(pending.name);
            } else {
                self.names.insert(pending.name.clone());
                report.promoted.push(pending.name.clone());
                self.entries
                    .push(QueueEntry::new(pending.name, pending.variants));
            }
        }
        report
    }

    /// Abort: drop every queued entry, returning how many there were.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        self.names.clear();
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{RegionSpec, StaticCatalog, VariantSpec};
    use crate::palette::Rgb;

    fn catalog() -> StaticCatalog {
        let regions = ["A", "B", "C"]
            .iter()
            .map(|id| RegionSpec {
                name: format!("Region {id}"),
                id: id.to_string(),
            })
            .collect();
        let variants = ["v1", "v2"]
            .iter()
            .map(|id| VariantSpec {
                id: VariantId::new(*id),
                label: None,
                color: Rgb::gray(0.5),
                story_regions: vec!["A".into(), "C".into()],
                optional_regions: Vec::new(),
                hidden: false,
            })
            .collect();
        StaticCatalog::new(regions, variants).unwrap()
    }

    #[test]
    fn commit_promotes_in_pending_order_and_clears_selection() {
        let catalog = catalog();
        let mut selection = SelectionStore::new();
        selection.add_region(&catalog, "Region C");
        selection.add_region(&catalog, "Region A");

        let mut queue = QueueStore::new();
        let report = queue.commit_from(&mut selection);

        assert_eq!(report.promoted, vec!["Region C", "Region A"]);
        assert!(selection.is_empty());
        let names: Vec<_> = queue.entries().iter().map(QueueEntry::name).collect();
        assert_eq!(names, vec!["Region C", "Region A"]);
        assert_eq!(queue.head().map(QueueEntry::name), Some("Region C"));
    }

    #[test]
    fn commit_skips_empty_sets() {
        let catalog = catalog();
        let mut selection = SelectionStore::new();
        selection.add_region(&catalog, "Region B");

        let mut queue = QueueStore::new();
        let report = queue.commit_from(&mut selection);

        assert_eq!(report.skipped_empty, vec!["Region B"]);
        assert!(queue.is_empty());
        assert!(selection.is_empty());
        assert!(!queue.contains("Region B"));
    }

    #[test]
    fn commit_leaves_existing_entry_untouched() {
        let catalog = catalog();
        let mut selection = SelectionStore::new();
        let mut queue = QueueStore::new();

        selection.add_region(&catalog, "Region A");
        selection.toggle_variant("Region A", &VariantId::new("v2"));
        queue.commit_from(&mut selection);
        let before = queue.entries()[0].variants().clone();

        selection.add_region(&catalog, "Region A");
        let report = queue.commit_from(&mut selection);

        assert_eq!(report.skipped_queued, vec!["Region A"]);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.entries()[0].variants(), &before);
        assert!(selection.is_empty());
    }

    #[test]
    fn queued_entry_is_a_copy_of_the_pending_set() {
        let catalog = catalog();
        let mut selection = SelectionStore::new();
        let mut queue = QueueStore::new();
        selection.add_region(&catalog, "Region A");
        queue.commit_from(&mut selection);

        selection.add_region(&catalog, "Region A");
        selection.toggle_variant("Region A", &VariantId::new("v1"));
        assert_eq!(queue.entries()[0].variants().len(), 2);
    }

    #[test]
    fn clear_allows_recommit() {
        let catalog = catalog();
        let mut selection = SelectionStore::new();
        let mut queue = QueueStore::new();
        selection.add_all_eligible(&catalog);
        queue.commit_from(&mut selection);
        assert_eq!(queue.len(), 2);

        assert_eq!(queue.clear(), 2);
        assert!(queue.is_empty());
        assert_eq!(queue.clear(), 0);

        selection.add_region(&catalog, "Region A");
        let report = queue.commit_from(&mut selection);
        assert_eq!(report.promoted, vec!["Region A"]);
    }

    #[test]
    fn equality_is_by_name() {
        let a = QueueEntry::new("Region A".into(), BTreeSet::new());
        let b = QueueEntry::new(
            "Region A".into(),
            [VariantId::new("v1")].into_iter().collect(),
        );
        assert_eq!(a, b);
        assert!(a == *"Region A");
    }
}

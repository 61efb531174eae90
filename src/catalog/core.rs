use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::palette::Rgb;

/// Opaque identifier of a capture variant (a playable character).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantId(String);

impl VariantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VariantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VariantId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A selectable region: the display name is the key used by the panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub display_name: String,
    pub canonical_id: String,
}

impl CatalogEntry {
    pub fn new(display_name: impl Into<String>, canonical_id: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            canonical_id: canonical_id.into(),
        }
    }
}

/// Display metadata for a variant.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantInfo {
    pub id: VariantId,
    pub label: String,
    pub base_color: Rgb,
}

/// Read-only source of regions, variants and eligibility.
pub trait Catalog: Send + Sync {
    /// Regions in display order.
    fn entries(&self) -> &[CatalogEntry];

    /// Selectable variants in display order.
    fn variants(&self) -> &[VariantInfo];

    /// Whether `variant` is pre-selected when `canonical_id` is added.
    fn is_eligible(&self, variant: &VariantId, canonical_id: &str) -> bool;

    fn canonical_id(&self, display_name: &str) -> Option<&str> {
        self.entries()
            .iter()
            .find(|entry| entry.display_name == display_name)
            .map(|entry| entry.canonical_id.as_str())
    }

    fn variant(&self, id: &VariantId) -> Option<&VariantInfo> {
        self.variants().iter().find(|info| &info.id == id)
    }

    fn display_label(&self, id: &VariantId) -> Option<&str> {
        self.variant(id).map(|info| info.label.as_str())
    }

    fn base_color(&self, id: &VariantId) -> Option<Rgb> {
        self.variant(id).map(|info| info.base_color)
    }
}

/// Serialized region row: `{ "name": "Outskirts", "id": "SU" }`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegionSpec {
    pub name: String,
    pub id: String,
}

/// Serialized variant row with the region lists that drive eligibility.
#[derive(Debug, Clone, Deserialize)]
pub struct VariantSpec {
    pub id: VariantId,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub color: Rgb,
    #[serde(default)]
    pub story_regions: Vec<String>,
    #[serde(default)]
    pub optional_regions: Vec<String>,
    #[serde(default)]
    pub hidden: bool,
}

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    regions: Vec<RegionSpec>,
    #[serde(default)]
    variants: Vec<VariantSpec>,
}

#[derive(Debug, Clone)]
struct VariantRegions {
    story: HashSet<String>,
    optional: HashSet<String>,
}

/// In-memory catalog where eligibility comes from per-variant region lists.
///
/// A variant is eligible for a region when the region's canonical id appears
/// in either its story or optional list. Hidden variants are kept out of
/// [`Catalog::variants`] entirely.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    entries: Vec<CatalogEntry>,
    variants: Vec<VariantInfo>,
    regions: Vec<VariantRegions>,
}

impl StaticCatalog {
    pub fn new(
        regions: Vec<RegionSpec>,
        variants: Vec<VariantSpec>,
    ) -> std::result::Result<Self, CatalogError> {
        let mut seen_regions = HashSet::new();
        let mut entries = Vec::with_capacity(regions.len());
        for region in regions {
            if !seen_regions.insert(region.name.clone()) {
                return Err(CatalogError::DuplicateRegion(region.name));
            }
            entries.push(CatalogEntry::new(region.name, region.id));
        }

        let mut seen_variants = HashSet::new();
        let mut infos = Vec::new();
        let mut lists = Vec::new();
        for spec in variants {
            if !seen_variants.insert(spec.id.clone()) {
                return Err(CatalogError::DuplicateVariant(spec.id.to_string()));
            }
            if spec.hidden {
                continue;
            }
            infos.push(VariantInfo {
                label: spec.label.unwrap_or_else(|| spec.id.to_string()),
                id: spec.id,
                base_color: spec.color,
            });
            lists.push(VariantRegions {
                story: spec.story_regions.into_iter().collect(),
                optional: spec.optional_regions.into_iter().collect(),
            });
        }

        Ok(Self {
            entries,
            variants: infos,
            regions: lists,
        })
    }

    pub fn from_json_str(source: &str) -> std::result::Result<Self, CatalogError> {
        let document: CatalogDocument = serde_json::from_str(source)?;
        Self::new(document.regions, document.variants)
    }

    pub fn from_path(path: impl AsRef<Path>) -> std::result::Result<Self, CatalogError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_json_str(&source)
    }
}

impl Catalog for StaticCatalog {
    fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    fn variants(&self) -> &[VariantInfo] {
        &self.variants
    }

    fn is_eligible(&self, variant: &VariantId, canonical_id: &str) -> bool {
        self.variants
            .iter()
            .position(|info| &info.id == variant)
            .map(|idx| {
                let lists = &self.regions[idx];
                lists.story.contains(canonical_id) || lists.optional.contains(canonical_id)
            })
            .unwrap_or(false)
    }
}

//! Region and variant catalog consumed read-only by the panel.
//!
//! The panel never decides what a region or a variant is. It asks a
//! [`Catalog`] for the display names, canonical ids, variant metadata, and the
//! eligibility predicate used to pre-populate new pending entries.

mod core;

pub use self::core::{
    Catalog, CatalogEntry, RegionSpec, StaticCatalog, VariantId, VariantInfo, VariantSpec,
};

//! Card system: definitions, catalog file format, and the catalog.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card definitions
//! - `CardDefinition`: Static card data, vaccine or virus
//! - `CardRecord`: A card as written in catalog JSON
//! - `CardCatalog`: Immutable id -> card lookup

pub mod catalog;
pub mod definition;
pub mod record;

pub use catalog::CardCatalog;
pub use definition::{
    CardDefinition, CardId, CardKind, CardTraits, Rarity, VaccineTraits, VirusTraits,
};
pub use record::{CardRecord, CatalogFile, RecordData};

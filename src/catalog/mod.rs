//! Food catalog access.
//!
//! The aggregation pipeline only ever sees the catalog through
//! [`CatalogLookup`], a single batched read by id.

mod file;
mod memory;
mod persistence;

use std::collections::BTreeSet;
use std::future::Future;

use crate::error::Result;
use crate::models::FoodRecord;

pub use file::{CatalogFormat, FileCatalog};
pub use memory::InMemoryCatalog;
pub use persistence::{
    dedupe_by_id, load_payload, parse_csv_records, parse_json_records, save_json,
};

/// Batched read of raw catalog records.
///
/// Given a non-empty set of ids, returns the records that exist. Ids with no
/// record are left out rather than reported as errors.
pub trait CatalogLookup {
    fn lookup(
        &self,
        ids: &BTreeSet<String>,
    ) -> impl Future<Output = Result<Vec<FoodRecord>>> + Send;
}

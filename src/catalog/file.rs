use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::catalog::persistence::{parse_csv_records, parse_json_records};
use crate::catalog::{CatalogLookup, InMemoryCatalog};
use crate::error::Result;
use crate::models::FoodRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Csv,
}

impl CatalogFormat {
    /// `.csv` files are CSV, everything else is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => CatalogFormat::Csv,
            _ => CatalogFormat::Json,
        }
    }
}

/// A catalog backed by a JSON or CSV file, re-read on every lookup.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
    format: CatalogFormat,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = CatalogFormat::from_path(&path);
        Self { path, format }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse every record in the file.
    pub async fn load_all(&self) -> Result<Vec<FoodRecord>> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let records = match self.format {
            CatalogFormat::Json => parse_json_records(&content)?,
            CatalogFormat::Csv => parse_csv_records(&content)?,
        };
        debug!(path = %self.path.display(), records = records.len(), "read food catalog");
        Ok(records)
    }

    /// Load the whole file into an in-memory catalog.
    pub async fn to_memory(&self) -> Result<InMemoryCatalog> {
        Ok(InMemoryCatalog::new(self.load_all().await?))
    }
}

impl CatalogLookup for FileCatalog {
    async fn lookup(&self, ids: &BTreeSet<String>) -> Result<Vec<FoodRecord>> {
        let records = self.load_all().await?;
        Ok(records.into_iter().filter(|r| ids.contains(&r.id)).collect())
    }
}

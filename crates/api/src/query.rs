//! Query-string parameter types.

use std::str::FromStr;

use bazaar_core::error::CoreError;
use bazaar_core::item::ItemSelection;
use bazaar_core::types::DbId;
use serde::Deserialize;

/// `GET /items?items=&format=`.
#[derive(Debug, Default, Deserialize)]
pub struct ItemListParams {
    pub items: Option<String>,
    pub format: Option<String>,
}

impl ItemListParams {
    pub fn selection(&self) -> Result<ItemSelection, CoreError> {
        ItemSelection::from_query(self.items.as_deref())
    }

    pub fn format(&self) -> Result<ExportFormat, CoreError> {
        self.format
            .as_deref()
            .map_or(Ok(ExportFormat::Json), str::parse)
    }
}

/// `GET /categories?counts=`. Absent means names only.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryParams {
    pub counts: Option<String>,
}

/// `GET /sales?startId=`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesParams {
    pub start_id: Option<DbId>,
}

/// Response format of the item listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl FromStr for ExportFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(CoreError::InvalidRequest(format!(
                "Invalid format '{other}'. Expected 'json' or 'csv'"
            ))),
        }
    }
}

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Literal tag every emitted pathway id starts with.
pub const PATHWAY_ID_PREFIX: &str = "ko";

/// Stands in for the numeric id when the markup carries none.
pub const MISSING_ID: &str = "N/A";

pub const CSV_COLUMNS: [&str; 6] = [
    "Organism Latin Name",
    "Level 1 Category",
    "Level 2 Category",
    "KEGG ID",
    "Pathway Name",
    "URL",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organism {
    pub code: String,
    pub display_name: String,
}

impl Organism {
    pub fn new(code: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            display_name: display_name.into(),
        }
    }
}

/// One leaf pathway entry. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathwayRecord {
    #[serde(rename = "Organism Latin Name")]
    pub organism_name: String,
    #[serde(rename = "Level 1 Category")]
    pub level1: String,
    #[serde(rename = "Level 2 Category")]
    pub level2: String,
    #[serde(rename = "KEGG ID")]
    pub pathway_id: String,
    #[serde(rename = "Pathway Name")]
    pub pathway_name: String,
    #[serde(rename = "URL")]
    pub url: String,
}

pub fn pathway_id(raw: Option<&str>) -> String {
    format!("{PATHWAY_ID_PREFIX}{}", raw.unwrap_or(MISSING_ID))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecordSummary {
    pub organisms: usize,
    pub records: usize,
}

pub fn summarize(records: &[PathwayRecord]) -> RecordSummary {
    let organisms = records
        .iter()
        .map(|record| record.organism_name.as_str())
        .collect::<HashSet<_>>()
        .len();
    RecordSummary {
        organisms,
        records: records.len(),
    }
}

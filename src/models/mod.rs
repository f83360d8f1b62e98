use crate::config::SortVariant;
use crate::services::category::Category;
use crate::services::year::YearBucket;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Where each file of one upload landed.
///
/// Serializes as `{"CW": {"1st": [...], ...}, "SW": {...}}` when sorting by
/// semester and as `{"CW": [...], "SW": [...], "Uncategorized": [...]}` for
/// the simple variant. Every slot is present, possibly empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SortedReport {
    ByYear(BTreeMap<Category, BTreeMap<YearBucket, Vec<PathBuf>>>),
    Flat(BTreeMap<Category, Vec<PathBuf>>),
}

impl SortedReport {
    pub fn empty(variant: SortVariant) -> Self {
        let categories = Category::for_variant(variant);
        match variant {
            SortVariant::Semester => Self::ByYear(
                categories
                    .iter()
                    .map(|c| {
                        let years = YearBucket::ALL.iter().map(|y| (*y, Vec::new())).collect();
                        (*c, years)
                    })
                    .collect(),
            ),
            SortVariant::Simple => {
                Self::Flat(categories.iter().map(|c| (*c, Vec::new())).collect())
            }
        }
    }

    /// Adds a placed file. `year` is ignored by the flat layout; a missing
    /// year goes to the `Uncategorized` slot of the yearly layout.
    pub fn record(&mut self, category: Category, year: Option<YearBucket>, path: PathBuf) {
        match self {
            Self::ByYear(map) => map
                .entry(category)
                .or_default()
                .entry(year.unwrap_or(YearBucket::Uncategorized))
                .or_default()
                .push(path),
            Self::Flat(map) => map.entry(category).or_default().push(path),
        }
    }

    pub fn files(&self, category: Category, year: Option<YearBucket>) -> &[PathBuf] {
        let slot = match self {
            Self::ByYear(map) => map
                .get(&category)
                .and_then(|years| years.get(&year.unwrap_or(YearBucket::Uncategorized))),
            Self::Flat(map) => map.get(&category),
        };
        slot.map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn paths(&self) -> Box<dyn Iterator<Item = &Path> + '_> {
        match self {
            Self::ByYear(map) => Box::new(
                map.values()
                    .flat_map(|years| years.values())
                    .flatten()
                    .map(PathBuf::as_path),
            ),
            Self::Flat(map) => Box::new(map.values().flatten().map(PathBuf::as_path)),
        }
    }

    pub fn total(&self) -> usize {
        self.paths().count()
    }
}

/// Result of sorting one staging directory
#[derive(Debug, Clone, Serialize)]
pub struct ProcessOutcome {
    pub sorted_files: SortedReport,
    /// Staged files that could not be placed and are not in the report
    pub failed: Vec<PathBuf>,
}

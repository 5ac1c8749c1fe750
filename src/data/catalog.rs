use std::collections::BTreeSet;

use log::{error, info};

use super::*;

use crate::search;

/// The loaded dataset together with its search index.
///
/// A catalog never changes after construction, so the index is built once
/// here and shared by every request.
pub struct Catalog {
    records: Vec<BookRecord>,
    search_index: search::Index,
    year_field: YearField,
}

impl Catalog {
    pub fn new(records: Vec<BookRecord>, year_field: YearField) -> Self {
        let mut search_index = search::Index::new();
        for record in &records {
            let genre = record.genre().map(Genre::as_str).unwrap_or("");
            let year = record
                .year(year_field)
                .map(|key| key.to_string())
                .unwrap_or_default();
            search_index.add_record(&[
                record.full_name(),
                record.title(),
                record.publisher(),
                genre,
                year.as_str(),
            ]);
        }

        Catalog {
            records,
            search_index,
            year_field,
        }
    }

    pub fn empty(year_field: YearField) -> Self {
        Self::new(Vec::new(), year_field)
    }

    /// Read and index the dataset.
    ///
    /// A dataset that cannot be read or decoded yields an empty catalog.
    pub async fn load(source: &Source, year_field: YearField) -> Self {
        match Self::try_load(source).await {
            Ok(records) => {
                info!("Read {} records from {source}", records.len());
                Self::new(records, year_field)
            }
            Err(e) => {
                error!("Could not load dataset from {source}: {e}");
                Self::empty(year_field)
            }
        }
    }

    async fn try_load(source: &Source) -> DataResult<Vec<BookRecord>> {
        let text = source.read().await?;
        parse_records(&text)
    }

    pub fn records(&self) -> &[BookRecord] {
        &self.records
    }

    pub fn record(&self, position: usize) -> Option<&BookRecord> {
        self.records.get(position)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn year_field(&self) -> YearField {
        self.year_field
    }

    /// Every distinct year present in the dataset: numbers ascending, then
    /// any cohort labels that are not numbers.
    pub fn years(&self) -> Vec<YearKey> {
        self.records
            .iter()
            .filter_map(|r| r.year(self.year_field))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Positions of the records matching the query, most relevant first.
    pub fn search(&self, query: &str) -> Vec<usize> {
        self.search_index
            .search(query)
            .into_iter()
            .map(|hit| hit.position)
            .collect()
    }
}

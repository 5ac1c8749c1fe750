use std::{
    convert::Infallible,
    fmt::{self, Display},
    str::FromStr,
    sync::Arc,
};

use log::debug;

use crate::data::*;

/// Selection in the genre dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GenreFilter {
    #[default]
    All,
    Only(Genre),
}

impl GenreFilter {
    /// The fixed list of genre options, "All" first.
    pub fn options() -> Vec<GenreFilter> {
        std::iter::once(GenreFilter::All)
            .chain(Genre::FIXED.into_iter().map(GenreFilter::Only))
            .collect()
    }

    pub fn accepts(&self, genre: Option<&Genre>) -> bool {
        match self {
            GenreFilter::All => true,
            GenreFilter::Only(selected) => genre == Some(selected),
        }
    }
}

impl Display for GenreFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenreFilter::All => f.write_str("All"),
            GenreFilter::Only(genre) => genre.fmt(f),
        }
    }
}

impl FromStr for GenreFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "All" => GenreFilter::All,
            other => Genre::parse(other).map_or(GenreFilter::All, GenreFilter::Only),
        })
    }
}

/// Selection in the year dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum YearFilter {
    #[default]
    All,
    Only(YearKey),
}

impl YearFilter {
    pub fn accepts(&self, year: Option<YearKey>) -> bool {
        match self {
            YearFilter::All => true,
            YearFilter::Only(selected) => year.as_ref() == Some(selected),
        }
    }
}

impl Display for YearFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearFilter::All => f.write_str("All"),
            YearFilter::Only(year) => year.fmt(f),
        }
    }
}

impl FromStr for YearFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "" | "All" => YearFilter::All,
            other => YearFilter::Only(other.parse()?),
        })
    }
}

/// Everything that decides which records are visible.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Filters {
    pub query: String,
    pub genre: GenreFilter,
    pub year: YearFilter,
}

impl Filters {
    /// Positions of the visible records, in display order.
    ///
    /// Without a query the dataset order is kept. With one, records are
    /// ranked by relevance and only matches are kept.
    pub fn apply(&self, catalog: &Catalog) -> Vec<usize> {
        let candidates = if self.query.trim().is_empty() {
            (0..catalog.len()).collect()
        } else {
            catalog.search(&self.query)
        };

        candidates
            .into_iter()
            .filter(|&position| {
                let Some(record) = catalog.record(position) else {
                    return false;
                };
                self.genre.accepts(record.genre())
                    && self.year.accepts(record.year(catalog.year_field()))
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// One visitor's view of the catalog.
///
/// Every setter recomputes the visible records before returning, so the
/// visible set is always the filters applied to the current catalog.
pub struct Browser {
    catalog: Arc<Catalog>,
    filters: Filters,
    visible: Vec<usize>,
    theme: Theme,
}

impl Browser {
    pub fn new(catalog: Arc<Catalog>, theme: Theme) -> Self {
        let visible = (0..catalog.len()).collect();
        Browser {
            catalog,
            filters: Filters::default(),
            visible,
            theme,
        }
    }

    fn recompute(&mut self) {
        self.visible = self.filters.apply(&self.catalog);
        debug!(
            "{} of {} records visible for {:?}",
            self.visible.len(),
            self.catalog.len(),
            self.filters
        );
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filters.query = query.into();
        self.recompute();
    }

    pub fn set_genre(&mut self, genre: GenreFilter) {
        self.filters.genre = genre;
        self.recompute();
    }

    pub fn set_year(&mut self, year: YearFilter) {
        self.filters.year = year;
        self.recompute();
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The visible records with their position in the dataset.
    pub fn visible(&self) -> impl Iterator<Item = (usize, &BookRecord)> + '_ {
        self.visible
            .iter()
            .filter_map(|&position| Some((position, self.catalog.record(position)?)))
    }

    pub fn count_label(&self) -> String {
        count_label(self.visible.len())
    }

    pub fn genre_options(&self) -> Vec<GenreFilter> {
        GenreFilter::options()
    }

    /// "All" followed by each year present in the catalog, then any cohort
    /// labels.
    pub fn year_options(&self) -> Vec<YearFilter> {
        std::iter::once(YearFilter::All)
            .chain(self.catalog.years().into_iter().map(YearFilter::Only))
            .collect()
    }
}

pub fn count_label(count: usize) -> String {
    let plural = if count == 1 { "" } else { "s" };
    format!("{count} result{plural} found")
}

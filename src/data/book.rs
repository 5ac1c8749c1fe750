use std::{
    convert::Infallible,
    fmt::{self, Display},
    num::ParseIntError,
    str::FromStr,
};

use serde::{Deserialize, Serialize, Serializer};

/// A year as it appears in the dataset, either a class cohort or a
/// publication date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Year(i32);

impl Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Year {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Year)
    }
}

impl Serialize for Year {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.0)
    }
}

/// What a record is matched on in the year dropdown.
///
/// Class cohorts are not always numbers, so a label that is not a year is
/// kept and matched as text. Years sort before labels.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum YearKey {
    Year(Year),
    Label(String),
}

impl Display for YearKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearKey::Year(year) => year.fmt(f),
            YearKey::Label(label) => f.write_str(label),
        }
    }
}

impl FromStr for YearKey {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.parse() {
            Ok(year) => YearKey::Year(year),
            Err(_) => YearKey::Label(s.to_owned()),
        })
    }
}

/// Which record field drives the year filter and the year options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum YearField {
    /// The alumni class cohort.
    Class,

    /// The year the book was published.
    Publication,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Genre {
    Poetry,
    Fiction,
    PoetryFiction,
    Other(String),
}

impl Genre {
    /// The genres offered as filter options, in display order.
    pub const FIXED: [Genre; 3] = [Genre::Poetry, Genre::Fiction, Genre::PoetryFiction];

    /// Read a genre from dataset text. Blank text means no genre.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        Some(match text {
            "" => return None,
            "Poetry" => Genre::Poetry,
            "Fiction" => Genre::Fiction,
            "Poetry/Fiction" => Genre::PoetryFiction,
            other => Genre::Other(other.to_owned()),
        })
    }

    pub fn as_str(&self) -> &str {
        match self {
            Genre::Poetry => "Poetry",
            Genre::Fiction => "Fiction",
            Genre::PoetryFiction => "Poetry/Fiction",
            Genre::Other(other) => other,
        }
    }
}

impl Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Genre {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// The class cohort of an author.
///
/// Cohorts usually arrive as a number or a numeric string, in which case the
/// year is available for filtering. Anything else is kept only as a label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassYear {
    label: String,
    year: Option<Year>,
}

impl ClassYear {
    pub fn label(&self) -> &str {
        &self.label
    }

    fn key(&self) -> YearKey {
        match self.year {
            Some(year) => YearKey::Year(year),
            None => YearKey::Label(self.label.clone()),
        }
    }
}

impl Serialize for ClassYear {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.year {
            Some(year) => year.serialize(serializer),
            None => serializer.serialize_str(&self.label),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum YearData {
    Number(serde_json::Number),
    Text(String),
}

impl YearData {
    fn label(&self) -> String {
        match self {
            YearData::Number(number) => number.to_string(),
            YearData::Text(text) => text.trim().to_owned(),
        }
    }

    fn year(&self) -> Option<Year> {
        match self {
            YearData::Number(number) => number
                .as_i64()
                .and_then(|n| i32::try_from(n).ok())
                .map(Year),
            YearData::Text(text) => text.parse().ok(),
        }
    }
}

/// A record exactly as it is stored in the dataset file.
///
/// `Title` and `Notes` are older spellings of `title` and `notes`. A record
/// may carry both spellings; the lowercase one wins unless it is blank.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub(super) struct RecordData {
    full_name: Option<String>,
    title: Option<String>,
    #[serde(rename = "Title")]
    legacy_title: Option<String>,
    genre: Option<String>,
    class_year: Option<YearData>,
    publication_year: Option<YearData>,
    publisher: Option<String>,
    notes: Option<String>,
    #[serde(rename = "Notes")]
    legacy_notes: Option<String>,
}

/// The trimmed canonical value, or the trimmed legacy one when the canonical
/// value is missing or blank.
fn either_spelling(canonical: Option<String>, legacy: Option<String>) -> Option<String> {
    [canonical, legacy]
        .into_iter()
        .flatten()
        .map(|value| value.trim().to_owned())
        .find(|value| !value.is_empty())
}

/// One book in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRecord {
    full_name: String,
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    genre: Option<Genre>,
    #[serde(skip_serializing_if = "Option::is_none")]
    class_year: Option<ClassYear>,
    #[serde(skip_serializing_if = "Option::is_none")]
    publication_year: Option<Year>,
    publisher: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
}

impl From<RecordData> for BookRecord {
    fn from(data: RecordData) -> Self {
        let class_year = data.class_year.and_then(|c| {
            let label = c.label();
            (!label.is_empty()).then(|| ClassYear {
                year: c.year(),
                label,
            })
        });

        BookRecord {
            full_name: data.full_name.unwrap_or_default().trim().to_owned(),
            title: either_spelling(data.title, data.legacy_title).unwrap_or_default(),
            genre: data.genre.as_deref().and_then(Genre::parse),
            class_year,
            publication_year: data.publication_year.and_then(|p| p.year()),
            publisher: data.publisher.unwrap_or_default().trim().to_owned(),
            notes: either_spelling(data.notes, data.legacy_notes),
        }
    }
}

impl BookRecord {
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn genre(&self) -> Option<&Genre> {
        self.genre.as_ref()
    }

    pub fn class_year(&self) -> Option<&ClassYear> {
        self.class_year.as_ref()
    }

    pub fn publication_year(&self) -> Option<Year> {
        self.publication_year
    }

    pub fn publisher(&self) -> &str {
        &self.publisher
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// The year this record is filtered by.
    pub fn year(&self, field: YearField) -> Option<YearKey> {
        match field {
            YearField::Class => self.class_year.as_ref().map(ClassYear::key),
            YearField::Publication => self.publication_year.map(YearKey::Year),
        }
    }

    /// Identity of the record within a rendered list. Two records may share
    /// a title and author, so the position is part of the key.
    pub fn display_key(&self, position: usize) -> String {
        format!("{}-{}-{}", self.title, self.full_name, position)
    }
}

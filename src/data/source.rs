use std::{convert::Infallible, fmt::Display, path::PathBuf, str::FromStr, time::Duration};

use log::warn;
use serde_json::Value;

use super::*;

/// How long a dataset download may take, start to finish.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the dataset is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Url(String),
}

impl Source {
    /// Read the raw dataset text.
    pub async fn read(&self) -> DataResult<String> {
        match self {
            Source::File(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|source| DataError::Io {
                    path: path.clone(),
                    source,
                }),
            Source::Url(url) => fetch(url, FETCH_TIMEOUT).await,
        }
    }
}

async fn fetch(url: &str, timeout: Duration) -> DataResult<String> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;
    let response = client.get(url).send().await?.error_for_status()?;
    Ok(response.text().await?)
}

impl FromStr for Source {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s.starts_with("http://") || s.starts_with("https://") {
            Source::Url(s.to_owned())
        } else {
            Source::File(s.into())
        })
    }
}

impl Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::File(path) => write!(f, "{}", path.display()),
            Source::Url(url) => f.write_str(url),
        }
    }
}

/// Decode the dataset text into records.
///
/// The text must hold a JSON array. Elements are decoded one at a time, and
/// an element that cannot be read as a book is skipped.
pub fn parse_records(text: &str) -> DataResult<Vec<BookRecord>> {
    let value: Value = serde_json::from_str(text)?;
    let elements = match value {
        Value::Array(elements) => elements,
        other => return Err(DataError::NotAnArray(json_kind(&other))),
    };

    let records = elements
        .into_iter()
        .enumerate()
        .filter_map(|(i, element)| {
            if !element.is_object() {
                warn!(
                    "Skipping dataset element {i}: expected an object, found {}",
                    json_kind(&element)
                );
                return None;
            }
            match serde_json::from_value::<RecordData>(element) {
                Ok(data) => Some(BookRecord::from(data)),
                Err(e) => {
                    warn!("Skipping dataset element {i}: {e}");
                    None
                }
            }
        })
        .collect();

    Ok(records)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn urls_and_paths_are_told_apart() {
        assert_eq!(
            "https://example.org/books.json".parse::<Source>().unwrap(),
            Source::Url("https://example.org/books.json".to_owned())
        );
        assert_eq!(
            "static/books.json".parse::<Source>().unwrap(),
            Source::File("static/books.json".into())
        );
    }

    #[test]
    fn malformed_elements_do_not_abort_the_rest() {
        let text = r#"[
            { "title": "A", "fullName": "Jane Doe" },
            42,
            { "title": ["not", "a", "string"] },
            { "title": "B", "publicationYear": true },
            { "title": "C" }
        ]"#;
        let titles: Vec<_> = parse_records(text)
            .unwrap()
            .iter()
            .map(|b| b.title().to_owned())
            .collect();
        assert_eq!(titles, vec!["A", "C"]);
    }

    #[test]
    fn either_key_spelling_is_read() {
        let text = r#"[
            { "title": "A", "Title": "A (older)" },
            { "Title": "B" },
            { "title": "C", "Notes": "Signed" }
        ]"#;
        let records = parse_records(text).unwrap();
        let titles: Vec<_> = records.iter().map(BookRecord::title).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
        assert_eq!(records[2].notes(), Some("Signed"));
    }

    #[test]
    fn top_level_must_be_an_array() {
        let error = parse_records(r#"{ "title": "A" }"#).unwrap_err();
        assert!(matches!(error, DataError::NotAnArray("an object")));
    }

    #[test]
    fn invalid_json_is_an_error() {
        let error = parse_records("[{").unwrap_err();
        assert!(matches!(error, DataError::Json(_)));
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = Source::File(dir.path().join("absent.json"));
        let error = source.read().await.unwrap_err();
        assert!(matches!(error, DataError::Io { .. }));
    }

    #[tokio::test]
    async fn silent_server_times_out() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            // Accept and never answer.
            let (_stream, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(60)).await;
        });

        let url = format!("http://{address}/books.json");
        let error = fetch(&url, Duration::from_millis(200)).await.unwrap_err();
        match error {
            DataError::Http(e) => assert!(e.is_timeout(), "{e}"),
            other => panic!("expected a timeout, got {other}"),
        }
    }
}

use axum::extract::{Path as ReqPath, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;

use log::debug;
use maud::Markup;
use serde::Deserialize;

use crate::browser::*;
use crate::html;
use crate::AppState;

pub mod components;
pub mod files;
pub mod pages;
pub mod theme;

pub const THEME_COOKIE: &str = "alumni_shelf_theme";

pub fn get_cookie<'a>(headers: &'a HeaderMap, key: &str) -> Option<&'a str> {
    let cookie = headers.get(header::COOKIE)?.to_str().ok()?;
    cookie
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == key)
        .map(|(_, value)| value)
}

pub fn get_theme(headers: &HeaderMap) -> Theme {
    Theme::from_name(get_cookie(headers, THEME_COOKIE))
}

/// Filter selections as they arrive in a query string.
#[derive(Debug, Default, Deserialize)]
pub struct FilterParams {
    q: Option<String>,
    genre: Option<String>,
    year: Option<String>,
}

impl FilterParams {
    pub fn into_filters(self) -> Filters {
        let genre = self
            .genre
            .and_then(|g| g.parse::<GenreFilter>().ok())
            .unwrap_or_default();
        let year = self
            .year
            .and_then(|y| y.parse::<YearFilter>().ok())
            .unwrap_or_default();

        Filters {
            query: self.q.unwrap_or_default(),
            genre,
            year,
        }
    }
}

/// A browser with the requested filters applied. The query goes last so the
/// search runs once.
fn browser(state: &AppState, params: FilterParams, theme: Theme) -> Browser {
    let Filters { query, genre, year } = params.into_filters();
    let mut browser = Browser::new(state.catalog.clone(), theme);
    browser.set_genre(genre);
    browser.set_year(year);
    browser.set_query(query);
    browser
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::to_bytes;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::data::{parse_records, Catalog, YearField};

    fn state() -> AppState {
        let records = parse_records(
            r#"[
                { "title": "A", "fullName": "Jane Doe", "genre": "Poetry", "classYear": 2001, "publisher": "X" },
                { "title": "B", "fullName": "John Roe", "genre": "Fiction", "classYear": 2010, "publisher": "Y" }
            ]"#,
        )
        .unwrap();
        AppState {
            catalog: Arc::new(Catalog::new(records, YearField::Class)),
        }
    }

    fn params(query: &str) -> Query<FilterParams> {
        Query::try_from_uri(&format!("/?{query}").parse().unwrap()).unwrap()
    }

    fn theme_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, value.parse().unwrap());
        headers
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn cookies_are_found_by_name() {
        let headers = theme_cookie("other=1; alumni_shelf_theme=dark; last=x");
        assert_eq!(get_cookie(&headers, THEME_COOKIE), Some("dark"));
        assert_eq!(get_cookie(&headers, "missing"), None);
        assert_eq!(get_theme(&headers), Theme::Dark);
        assert_eq!(get_theme(&HeaderMap::new()), Theme::Light);
    }

    #[test]
    fn params_fall_back_to_all() {
        let filters = FilterParams {
            q: None,
            genre: Some("All".to_owned()),
            year: Some(" ".to_owned()),
        }
        .into_filters();
        assert_eq!(filters, Filters::default());
    }

    #[test]
    fn non_numeric_year_is_a_label() {
        let Query(params) = params("year=Fall+cohort");
        assert_eq!(
            params.into_filters().year,
            YearFilter::Only(crate::data::YearKey::Label("Fall cohort".to_owned()))
        );
    }

    #[test]
    fn params_read_from_a_query_string() {
        let Query(params) = params("q=salt&genre=Poetry%2FFiction&year=2004");
        assert_eq!(
            params.into_filters(),
            Filters {
                query: "salt".to_owned(),
                genre: GenreFilter::Only(crate::data::Genre::PoetryFiction),
                year: "2004".parse().unwrap(),
            }
        );
    }

    #[tokio::test]
    async fn page_renders_with_filters() {
        let filters = params("genre=Poetry&year=All");
        let page = pages::catalog(HeaderMap::new(), filters, State(state()))
            .await
            .into_string();
        assert!(page.contains("1 result found"));
        assert!(page.contains(r#"data-key="A-Jane Doe-0""#));
        assert!(!page.contains(r#"data-key="B-John Roe-1""#));
    }

    #[tokio::test]
    async fn results_component_searches() {
        let fragment = components::results(params("q=doe"), State(state()))
            .await
            .into_string();
        assert!(fragment.starts_with(r#"<p class="count">1 result found</p>"#));
        assert!(fragment.contains("Jane Doe"));
        assert!(!fragment.contains("<html"));
    }

    #[tokio::test]
    async fn results_component_filters_by_year() {
        let fragment = components::results(params("year=2010"), State(state()))
            .await
            .into_string();
        assert!(fragment.contains("1 result found"));
        assert!(fragment.contains("John Roe"));
    }

    #[tokio::test]
    async fn dataset_is_served_as_json() {
        let response = files::books(State(state())).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");

        let body = body_text(response).await;
        let books: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(books[0]["fullName"], "Jane Doe");
        assert_eq!(books[1]["classYear"], 2010);
    }

    #[tokio::test]
    async fn theme_toggle_flips_the_cookie() {
        let response = theme::toggle(theme_cookie("alumni_shelf_theme=dark"))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[header::SET_COOKIE]
            .to_str()
            .unwrap()
            .starts_with("alumni_shelf_theme=light"));
        assert_eq!(body_text(response).await, "light");
    }

    #[tokio::test]
    async fn theme_toggle_without_script_redirects_home() {
        let response = theme::toggle_and_return(HeaderMap::new())
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");
        assert!(response.headers()[header::SET_COOKIE]
            .to_str()
            .unwrap()
            .starts_with("alumni_shelf_theme=dark"));
    }

    #[tokio::test]
    async fn dark_theme_cookie_reaches_the_page() {
        let headers = theme_cookie("alumni_shelf_theme=dark");
        let page = pages::catalog(headers, params(""), State(state()))
            .await
            .into_string();
        assert!(page.contains(r#"<body class="dark-theme">"#));
        assert!(page.contains("2 results found"));
    }

    #[tokio::test]
    async fn unknown_static_files_are_not_found() {
        let missing = files::style(ReqPath("missing.css".to_owned()))
            .await
            .into_response();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let escaping = files::script(ReqPath("../Cargo.toml".to_owned()))
            .await
            .into_response();
        assert_eq!(escaping.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn bundled_stylesheet_is_served() {
        let response = files::style(ReqPath("catalog.css".to_owned()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/css");
    }
}

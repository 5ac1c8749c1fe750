use super::*;

pub async fn catalog(
    headers: HeaderMap,
    Query(params): Query<FilterParams>,
    State(state): State<AppState>,
) -> Markup {
    let browser = browser(&state, params, get_theme(&headers));
    html::pages::catalog(&browser)
}

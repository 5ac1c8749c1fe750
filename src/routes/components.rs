use super::*;

pub async fn results(
    Query(params): Query<FilterParams>,
    State(state): State<AppState>,
) -> Markup {
    let browser = browser(&state, params, Theme::default());
    html::components::results(&browser)
}

use super::*;

/// One year, so the choice outlives the session.
const MAX_AGE: u32 = 60 * 60 * 24 * 365;

fn theme_cookie(theme: Theme) -> String {
    format!(
        "{THEME_COOKIE}={}; Path=/; Max-Age={MAX_AGE}; SameSite=Lax",
        theme.name()
    )
}

/// Flip the theme and answer with the new theme's name.
pub async fn toggle(headers: HeaderMap) -> impl IntoResponse {
    let theme = get_theme(&headers).toggled();
    ([(header::SET_COOKIE, theme_cookie(theme))], theme.name())
}

/// Flip the theme and return to the catalog, for visitors without scripts.
pub async fn toggle_and_return(headers: HeaderMap) -> impl IntoResponse {
    let theme = get_theme(&headers).toggled();
    (
        [(header::SET_COOKIE, theme_cookie(theme))],
        Redirect::to("/"),
    )
}

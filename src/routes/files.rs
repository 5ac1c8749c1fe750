use std::{fs, path::Path};

use super::*;

pub async fn script(ReqPath(file_name): ReqPath<String>) -> impl IntoResponse {
    static_file("static/scripts", &file_name, "text/javascript")
}

pub async fn style(ReqPath(file_name): ReqPath<String>) -> impl IntoResponse {
    static_file("static/styles", &file_name, "text/css")
}

/// The loaded dataset, with canonical keys.
pub async fn books(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.catalog.records().to_vec())
}

fn static_file(directory: &str, file_name: &str, content_type: &'static str) -> Response {
    // Only plain names inside the directory.
    if file_name.starts_with('.') || file_name.contains(['/', '\\']) {
        return StatusCode::NOT_FOUND.into_response();
    }

    let path = Path::new(directory).join(file_name);
    match fs::read_to_string(&path) {
        Ok(content) => (
            [
                (header::CONTENT_TYPE, content_type.to_owned()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("inline; filename=\"{file_name}\""),
                ),
            ],
            content,
        )
            .into_response(),
        Err(e) => {
            debug!("Could not serve {}: {e}", path.display());
            StatusCode::NOT_FOUND.into_response()
        }
    }
}
